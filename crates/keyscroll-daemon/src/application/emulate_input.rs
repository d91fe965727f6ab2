//! The input-synthesis seam between the scroll action and the display.
//!
//! The application layer never talks to X11 directly.  It asks a
//! [`PlatformInputEmulator`] for keycodes and hands it key, button and window
//! activation requests; the infrastructure layer provides the XTest
//! implementation and a recording mock.

use keyscroll_core::Keysym;
use thiserror::Error;

/// A server-specific X11 keycode (8..=255).
pub type KeyCode = u8;

/// An X11 core pointer button number.
pub type ButtonId = u8;

/// An X11 window id.
pub type WindowId = u64;

/// Error type for input emulation operations.
#[derive(Debug, Error)]
pub enum EmulationError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("cannot open X display {0}")]
    DisplayUnavailable(String),
}

/// Synthetic input sink.
///
/// Implementations only need to be correct for one caller at a time; the
/// gesture pipeline drives a single action serially.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformInputEmulator: Send + Sync {
    /// Resolves a KeySym to the keycode the display currently maps it to.
    ///
    /// Returns `None` when no key produces `keysym`.
    fn keysym_to_keycode(&self, keysym: Keysym) -> Option<KeyCode>;

    /// Presses (`pressed = true`) or releases a key.
    fn emit_key(&self, keycode: KeyCode, pressed: bool) -> Result<(), EmulationError>;

    /// Presses or releases a pointer button.
    fn emit_button(&self, button: ButtonId, pressed: bool) -> Result<(), EmulationError>;

    /// Asks the window manager to raise and focus `window`.
    fn activate_window(&self, window: WindowId) -> Result<(), EmulationError>;

    /// Sends any buffered requests to the display.
    fn flush(&self) -> Result<(), EmulationError>;
}
