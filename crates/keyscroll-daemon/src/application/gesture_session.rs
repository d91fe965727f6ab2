//! Drives one [`ScrollAction`] per gesture from a stream of gesture events.
//!
//! The session is the piece of the gesture pipeline this crate owns: it
//! creates an action on `Start`, forwards `Update`s, and finishes and drops
//! the action on `Finish`.  At most one gesture is in flight.

use keyscroll_core::SettingsError;
use tracing::{debug, warn};

use super::emulate_input::WindowId;
use super::scroll_action::{
    GestureAction, GestureAttributes, ScrollAction, ScrollActionFactory, ATTR_DELTA_X,
    ATTR_DELTA_Y,
};

/// One event of the gesture stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start,
    Update { delta_x: f64, delta_y: f64 },
    Finish,
}

impl GestureEvent {
    /// Attribute map handed to the action callbacks.
    pub fn attributes(&self) -> GestureAttributes {
        match *self {
            GestureEvent::Update { delta_x, delta_y } => GestureAttributes::from([
                (ATTR_DELTA_X.to_string(), delta_x),
                (ATTR_DELTA_Y.to_string(), delta_y),
            ]),
            GestureEvent::Start | GestureEvent::Finish => GestureAttributes::new(),
        }
    }
}

pub struct GestureSession {
    factory: ScrollActionFactory,
    window: WindowId,
    active: Option<ScrollAction>,
    completed: u64,
}

impl GestureSession {
    pub fn new(factory: ScrollActionFactory, window: WindowId) -> Self {
        Self {
            factory,
            window,
            active: None,
            completed: 0,
        }
    }

    /// Applies one gesture event.
    ///
    /// A `Start` while a gesture is active finishes the old gesture first.
    /// `Update` and `Finish` without an active gesture are ignored.
    ///
    /// # Errors
    ///
    /// Returns the fatal [`SettingsError`] from building the action on
    /// `Start`.
    pub fn handle(&mut self, event: GestureEvent) -> Result<(), SettingsError> {
        let attrs = event.attributes();
        match event {
            GestureEvent::Start => {
                if self.active.is_some() {
                    warn!("gesture started before the previous one finished");
                    self.finish(&attrs);
                }
                let mut action = self.factory.create(self.window)?;
                action.execute_start(&attrs);
                self.active = Some(action);
            }
            GestureEvent::Update { .. } => match self.active.as_mut() {
                Some(action) => action.execute_update(&attrs),
                None => debug!("update without an active gesture ignored"),
            },
            GestureEvent::Finish => {
                if self.active.is_none() {
                    debug!("finish without an active gesture ignored");
                }
                self.finish(&attrs);
            }
        }
        Ok(())
    }

    /// Finishes the active gesture, if any.  Used on shutdown.
    pub fn end(&mut self) {
        self.finish(&GestureAttributes::new());
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Number of gestures finished so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    fn finish(&mut self, attrs: &GestureAttributes) {
        if let Some(mut action) = self.active.take() {
            action.execute_finish(attrs);
            self.completed += 1;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
