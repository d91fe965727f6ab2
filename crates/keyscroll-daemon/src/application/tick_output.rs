//! Turns a scroll tick into synthetic input.
//!
//! The strategy is chosen once, when the action is built, from the parsed
//! [`OutputSettings`]:
//!
//! - **Key chord** – modifiers are pressed at gesture start and released at
//!   finish; each tick taps the key bound to its direction.
//! - **Mouse buttons** – each tick clicks the wheel button for its direction.
//!
//! KeySyms are resolved to keycodes here, against the live keyboard mapping,
//! so the per-tick path does no lookups.

use keyscroll_core::{
    domain::settings::wheel_buttons, Direction, DirectionMap, OutputSettings,
};
use tracing::debug;

use super::emulate_input::{ButtonId, EmulationError, KeyCode, PlatformInputEmulator};

/// Resolved output strategy for one gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutput {
    KeyChord {
        /// Modifier keycodes held for the whole gesture, in press order.
        held: Vec<KeyCode>,
        /// Key tapped per tick; `None` drops the tick.
        taps: DirectionMap<Option<KeyCode>>,
    },
    MouseButtons {
        buttons: DirectionMap<ButtonId>,
    },
}

impl TickOutput {
    /// Resolves `output` against the emulator's keyboard mapping.
    ///
    /// KeySyms the display has no key for resolve to nothing: a missing
    /// modifier is not held and a missing directional key drops its ticks.
    pub fn resolve(output: &OutputSettings, emulator: &dyn PlatformInputEmulator) -> Self {
        match output {
            OutputSettings::KeyChord { modifiers, keys } => {
                let held = modifiers
                    .iter()
                    .filter_map(|modifier| {
                        let keycode = emulator.keysym_to_keycode(modifier.keysym());
                        if keycode.is_none() {
                            debug!(?modifier, "modifier has no keycode on this display");
                        }
                        keycode
                    })
                    .collect();
                let taps = keys.map(|keysym| keysym.and_then(|k| emulator.keysym_to_keycode(k)));
                TickOutput::KeyChord { held, taps }
            }
            OutputSettings::MouseButtons { inverted } => TickOutput::MouseButtons {
                buttons: wheel_buttons(*inverted),
            },
        }
    }

    /// Keycodes held for the duration of the gesture.
    pub fn held_keys(&self) -> &[KeyCode] {
        match self {
            TickOutput::KeyChord { held, .. } => held,
            TickOutput::MouseButtons { .. } => &[],
        }
    }

    /// Presses every held modifier.
    ///
    /// # Errors
    ///
    /// Every key is attempted; the first failure is returned.
    pub fn press_held(&self, emulator: &dyn PlatformInputEmulator) -> Result<(), EmulationError> {
        each_key(self.held_keys().iter().copied(), true, emulator)
    }

    /// Releases every held modifier, last pressed first.
    ///
    /// # Errors
    ///
    /// Every key is attempted; the first failure is returned.
    pub fn release_held(
        &self,
        emulator: &dyn PlatformInputEmulator,
    ) -> Result<(), EmulationError> {
        each_key(self.held_keys().iter().rev().copied(), false, emulator)
    }

    /// Emits one press/release pair for `direction`.
    ///
    /// Returns `Ok(false)` when no key is bound to `direction`.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmulationError`]; the release is attempted even
    /// when the press fails so nothing stays stuck down.
    pub fn emit_tick(
        &self,
        direction: Direction,
        emulator: &dyn PlatformInputEmulator,
    ) -> Result<bool, EmulationError> {
        match self {
            TickOutput::KeyChord { taps, .. } => {
                let Some(keycode) = *taps.get(direction) else {
                    return Ok(false);
                };
                let pressed = emulator.emit_key(keycode, true);
                let released = emulator.emit_key(keycode, false);
                pressed.and(released).map(|()| true)
            }
            TickOutput::MouseButtons { buttons } => {
                let button = *buttons.get(direction);
                let pressed = emulator.emit_button(button, true);
                let released = emulator.emit_button(button, false);
                pressed.and(released).map(|()| true)
            }
        }
    }
}

fn each_key(
    keycodes: impl Iterator<Item = KeyCode>,
    pressed: bool,
    emulator: &dyn PlatformInputEmulator,
) -> Result<(), EmulationError> {
    let mut first_error = None;
    for keycode in keycodes {
        if let Err(e) = emulator.emit_key(keycode, pressed) {
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
