//! # keyscroll-core
//!
//! Shared library for KeyScroll containing the settings grammar, the scroll
//! accumulator, and the X11 keysym name table.
//!
//! It has zero dependencies on OS APIs or display connections: every call
//! into X11 lives in `keyscroll-daemon` behind an injected emulator trait.
//!
//! # Architecture overview (for beginners)
//!
//! KeyScroll is one gesture action of a desktop gesture daemon.  While a
//! multi-finger drag is in progress the gesture pipeline reports how far the
//! fingers moved since the last frame (`delta x`, `delta y`).  KeyScroll turns
//! that continuous motion into discrete input events: either a key tap (for
//! example `Control` held + `Up` tapped to zoom) or a mouse wheel click.
//!
//! This crate defines:
//!
//! - **`domain`** – The pure logic.  `settings` parses the colon separated
//!   settings string into a [`ScrollSettings`], and `accumulator` collects
//!   motion until it crosses a threshold and then emits [`Direction`] ticks.
//!
//! - **`keymap`** – Translation of symbolic X11 key names (`"Page_Up"`,
//!   `"Control_L"`) into KeySym values, the equivalent of `XStringToKeysym`.

pub mod domain;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `keyscroll_core::ScrollSettings` instead of the full module path.
pub use domain::accumulator::ScrollAccumulator;
pub use domain::direction::{Direction, DirectionMap};
pub use domain::settings::{
    LoadedSettings, Modifier, OutputSettings, ScrollSettings, ScrollVariant, SettingsError,
    SpeedCurve, Threshold,
};
pub use keymap::{KeyMapper, Keysym};
