//! Input emulation implementations.
//!
//! The XTest implementation is selected at compile time via
//! `#[cfg(target_os = "linux")]`; other targets only have the mock.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;
