//! keyscroll-daemon library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the daemon do? (for beginners)
//!
//! A gesture recognizer reports a multi-finger drag as three kinds of
//! events: *start*, a stream of *updates* carrying how far the fingers moved,
//! and *finish*.  For each gesture the daemon:
//!
//! 1. Builds a scroll action from the configured settings string and brings
//!    the target window to the front.
//! 2. Presses any configured modifier keys (for example `Control`).
//! 3. Accumulates the motion of every update and, each time it crosses the
//!    speed threshold, taps the key bound to that direction or clicks the
//!    matching mouse wheel button through the X11 XTest extension.
//! 4. Releases the modifiers when the gesture finishes.

/// Application layer: the scroll action and its collaborators.
pub mod application;

/// Infrastructure layer: X11 emulator, config storage, gesture event feed.
pub mod infrastructure;
