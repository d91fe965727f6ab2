//! The scroll gesture action.
//!
//! A [`ScrollAction`] lives for exactly one gesture.  It is built when the
//! gesture starts, receives one `execute_update` per motion frame, and is
//! dropped after `execute_finish`.
//!
//! ```text
//! new()            parse settings, resolve keycodes, activate target window
//! execute_start    press held modifiers
//! execute_update   accumulate delta x / delta y, emit one event per tick
//! execute_finish   release held modifiers
//! ```
//!
//! Synthesis failures are logged and the gesture carries on; only a speed
//! curve that can produce a non-positive threshold stops construction.

use std::collections::HashMap;
use std::sync::Arc;

use keyscroll_core::{
    Direction, ScrollAccumulator, ScrollSettings, ScrollVariant, SettingsError, SpeedCurve,
};
use tracing::{debug, info, warn};

use super::emulate_input::{PlatformInputEmulator, WindowId};
use super::tick_output::TickOutput;

/// Name of the horizontal motion attribute delivered with each update.
pub const ATTR_DELTA_X: &str = "delta x";
/// Name of the vertical motion attribute delivered with each update.
pub const ATTR_DELTA_Y: &str = "delta y";

/// Named numeric attributes attached to a gesture event.
pub type GestureAttributes = HashMap<String, f64>;

/// Callbacks the gesture pipeline invokes, in order, for one gesture.
pub trait GestureAction {
    fn execute_start(&mut self, attrs: &GestureAttributes);
    fn execute_update(&mut self, attrs: &GestureAttributes);
    fn execute_finish(&mut self, attrs: &GestureAttributes);
}

/// Everything needed to build a [`ScrollAction`] except the target window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollActionConfig {
    pub variant: ScrollVariant,
    pub curve: SpeedCurve,
    pub settings: String,
}

impl ScrollActionConfig {
    /// Uses the built-in speed curve of `variant`.
    pub fn new(variant: ScrollVariant, settings: impl Into<String>) -> Self {
        Self {
            variant,
            curve: variant.default_curve(),
            settings: settings.into(),
        }
    }

    pub fn with_curve(mut self, curve: SpeedCurve) -> Self {
        self.curve = curve;
        self
    }
}

/// Scrolls by synthesizing key taps or wheel clicks from gesture motion.
pub struct ScrollAction {
    emulator: Arc<dyn PlatformInputEmulator>,
    window: WindowId,
    accumulator: ScrollAccumulator,
    output: TickOutput,
    modifiers_held: bool,
    ticks: u64,
}

impl ScrollAction {
    /// Builds the action for one gesture on `window`.
    ///
    /// Malformed settings fall back to the defaults with a warning.  The
    /// target window is activated immediately because only the focused
    /// window receives synthetic key events.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidThreshold`] when the configured speed
    /// curve can yield a non-positive threshold.
    pub fn new(
        config: &ScrollActionConfig,
        window: WindowId,
        emulator: Arc<dyn PlatformInputEmulator>,
    ) -> Result<Self, SettingsError> {
        let loaded = ScrollSettings::load(config.variant, config.curve, &config.settings)?;
        let settings = loaded.settings;
        let output = TickOutput::resolve(&settings.output, emulator.as_ref());

        if let Err(e) = emulator
            .activate_window(window)
            .and_then(|()| emulator.flush())
        {
            warn!(window, "failed to activate target window: {e}");
        }

        debug!(
            window,
            horizontal = settings.horizontal.get(),
            vertical = settings.vertical.get(),
            ?output,
            "scroll action ready"
        );

        Ok(Self {
            accumulator: ScrollAccumulator::new(settings.horizontal, settings.vertical),
            emulator,
            window,
            output,
            modifiers_held: false,
            ticks: 0,
        })
    }

    /// Feeds one motion sample; emits and flushes one event per tick.
    pub fn process_sample(&mut self, delta_x: f64, delta_y: f64) -> u64 {
        let emulator = self.emulator.as_ref();
        let output = &self.output;
        let emitted = self
            .accumulator
            .process_sample(delta_x, delta_y, |direction| {
                emit_tick(output, direction, emulator)
            });
        self.ticks += emitted;
        emitted
    }

    pub fn accumulator(&self) -> &ScrollAccumulator {
        &self.accumulator
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Ticks emitted since construction, including ones without a binding.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn release_modifiers(&mut self) {
        if !self.modifiers_held {
            return;
        }
        self.modifiers_held = false;
        if let Err(e) = self
            .output
            .release_held(self.emulator.as_ref())
            .and_then(|()| self.emulator.flush())
        {
            warn!(window = self.window, "failed to release held modifiers: {e}");
        }
    }
}

fn emit_tick(output: &TickOutput, direction: Direction, emulator: &dyn PlatformInputEmulator) {
    match output.emit_tick(direction, emulator) {
        Ok(true) => {
            if let Err(e) = emulator.flush() {
                warn!(%direction, "failed to flush scroll tick: {e}");
            }
            debug!(%direction, "scroll tick");
        }
        Ok(false) => debug!(%direction, "no key bound, tick dropped"),
        Err(e) => warn!(%direction, "failed to emit scroll tick: {e}"),
    }
}

impl GestureAction for ScrollAction {
    fn execute_start(&mut self, _attrs: &GestureAttributes) {
        if self.output.held_keys().is_empty() {
            return;
        }
        if let Err(e) = self
            .output
            .press_held(self.emulator.as_ref())
            .and_then(|()| self.emulator.flush())
        {
            warn!(window = self.window, "failed to press held modifiers: {e}");
        }
        self.modifiers_held = true;
    }

    fn execute_update(&mut self, attrs: &GestureAttributes) {
        let delta_x = attrs.get(ATTR_DELTA_X).copied().unwrap_or(0.0);
        let delta_y = attrs.get(ATTR_DELTA_Y).copied().unwrap_or(0.0);
        self.process_sample(delta_x, delta_y);
    }

    fn execute_finish(&mut self, _attrs: &GestureAttributes) {
        self.release_modifiers();
        info!(window = self.window, ticks = self.ticks, "scroll gesture finished");
    }
}

impl Drop for ScrollAction {
    fn drop(&mut self) {
        if self.modifiers_held {
            warn!(
                window = self.window,
                "scroll gesture dropped without finish; releasing held modifiers"
            );
            self.release_modifiers();
        }
    }
}

/// Builds a fresh [`ScrollAction`] for every gesture.
pub struct ScrollActionFactory {
    config: ScrollActionConfig,
    emulator: Arc<dyn PlatformInputEmulator>,
}

impl ScrollActionFactory {
    pub fn new(config: ScrollActionConfig, emulator: Arc<dyn PlatformInputEmulator>) -> Self {
        Self { config, emulator }
    }

    /// Rejects a speed curve that would fail every gesture, before the first
    /// gesture arrives.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidThreshold`] for an unusable curve.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.config.curve.validate()
    }

    /// # Errors
    ///
    /// See [`ScrollAction::new`].
    pub fn create(&self, window: WindowId) -> Result<ScrollAction, SettingsError> {
        ScrollAction::new(&self.config, window, Arc::clone(&self.emulator))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
