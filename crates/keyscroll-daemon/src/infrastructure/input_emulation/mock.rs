//! Mock input emulator for tests and `--dry-run`.
//!
//! # Why a mock emulator?
//!
//! The real `LinuxXTestEmulator` needs a running X server and actually
//! presses keys on it.  The `MockInputEmulator` replaces every display call
//! with in-memory recording: each event is pushed into a `Mutex<Vec<...>>`
//! so tests can inspect exactly what was emitted and in what order.
//!
//! With `logging` enabled every event is also reported through `tracing`,
//! which is what `keyscroll --dry-run` uses to show what it would send.
//!
//! # Keycodes
//!
//! There is no keyboard mapping to consult, so KeySyms resolve to a fake
//! but stable keycode: the low byte of the KeySym, raised into the valid
//! X11 keycode range 8..=255.  KeySyms listed in `unmapped` resolve to
//! `None`, simulating keys the keyboard does not have.
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every emitting method return an
//! `EmulationError::Platform`, for testing error-handling paths.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use keyscroll_core::Keysym;
use tracing::info;

use crate::application::emulate_input::{
    ButtonId, EmulationError, KeyCode, PlatformInputEmulator, WindowId,
};

/// One call recorded by [`MockInputEmulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmittedEvent {
    Key { keycode: KeyCode, pressed: bool },
    Button { button: ButtonId, pressed: bool },
    ActivateWindow(WindowId),
    Flush,
}

/// A mock emulator that records all calls without touching a display.
#[derive(Default)]
pub struct MockInputEmulator {
    /// Every emitted event in call order.
    pub events: Mutex<Vec<EmittedEvent>>,
    /// KeySyms that have no keycode.
    pub unmapped: HashSet<Keysym>,
    /// When `true`, every emitting method returns an error.
    pub should_fail: bool,
    /// When `true`, every event is also logged at `info` level.
    pub logging: bool,
}

impl MockInputEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that logs each event, for dry runs.
    pub fn logging() -> Self {
        Self {
            logging: true,
            ..Self::default()
        }
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Recorded events without the flushes.
    pub fn input_events(&self) -> Vec<EmittedEvent> {
        self.events()
            .into_iter()
            .filter(|e| *e != EmittedEvent::Flush)
            .collect()
    }

    fn record(&self, event: EmittedEvent) -> Result<(), EmulationError> {
        if self.should_fail {
            return Err(EmulationError::Platform("mock failure".into()));
        }
        if self.logging && event != EmittedEvent::Flush {
            info!(?event, "dry run");
        }
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
        Ok(())
    }
}

impl PlatformInputEmulator for MockInputEmulator {
    fn keysym_to_keycode(&self, keysym: Keysym) -> Option<KeyCode> {
        if self.unmapped.contains(&keysym) {
            return None;
        }
        Some(((keysym & 0xFF) as KeyCode).max(8))
    }

    fn emit_key(&self, keycode: KeyCode, pressed: bool) -> Result<(), EmulationError> {
        self.record(EmittedEvent::Key { keycode, pressed })
    }

    fn emit_button(&self, button: ButtonId, pressed: bool) -> Result<(), EmulationError> {
        self.record(EmittedEvent::Button { button, pressed })
    }

    fn activate_window(&self, window: WindowId) -> Result<(), EmulationError> {
        self.record(EmittedEvent::ActivateWindow(window))
    }

    fn flush(&self) -> Result<(), EmulationError> {
        self.record(EmittedEvent::Flush)
    }
}
