//! Infrastructure layer for the scroll daemon.
//!
//! Contains OS-facing adapters: the X11 input emulator, the TOML
//! configuration store, and the line-based gesture event feed.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `keyscroll_core`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`input_emulation`** – Implementations of `PlatformInputEmulator`.
//!   The XTest implementation is compiled on Linux only; a recording
//!   `MockInputEmulator` is always available for tests and `--dry-run`.
//!
//! - **`storage`** – Reads and writes the daemon's `config.toml`.
//!
//! - **`gesture_feed`** – Parses `start` / `update dx dy` / `finish` lines
//!   from any async reader into gesture events.

pub mod gesture_feed;
pub mod input_emulation;
pub mod storage;
