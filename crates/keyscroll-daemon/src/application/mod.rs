//! Application layer use cases for the scroll daemon.
//!
//! - **`emulate_input`** – The [`PlatformInputEmulator`] trait: the only way
//!   this layer reaches the display.  Implementations are injected.
//!
//! - **`tick_output`** – Resolves the parsed output settings into keycodes or
//!   wheel buttons and emits one event per tick.
//!
//! - **`scroll_action`** – The per-gesture action: start / update / finish.
//!
//! - **`gesture_session`** – Creates and retires one action per gesture.
//!
//! [`PlatformInputEmulator`]: emulate_input::PlatformInputEmulator

pub mod emulate_input;
pub mod gesture_session;
pub mod scroll_action;
pub mod tick_output;
