//! Converts continuous gesture motion into discrete scroll ticks.
//!
//! Each direction keeps its own running total of unconsumed motion.  A sample
//! adds its magnitude to the total of the direction it points in; every time
//! a total reaches the axis threshold, the threshold is subtracted and one
//! tick is emitted.  Output is therefore proportional to the distance
//! travelled, not to the speed of a single frame: slow motion still scrolls
//! once enough distance accrues, and one fast frame can produce several
//! ticks.
//!
//! Invariant: after [`ScrollAccumulator::process_sample`] returns, every
//! total lies in `[0, threshold)`.  Crossings are computed by division, not
//! by repeated subtraction, so a huge sample cannot stall the drain.  At most
//! [`MAX_TICKS_PER_SAMPLE`] ticks are emitted per direction for one sample;
//! the excess is discarded with a warning.

use tracing::{debug, warn};

use super::direction::{Direction, DirectionMap};
use super::settings::Threshold;

/// Upper bound on ticks emitted in one direction by a single sample.
pub const MAX_TICKS_PER_SAMPLE: u64 = 1024;

/// Running totals of unconsumed motion for one gesture.
#[derive(Debug, Clone)]
pub struct ScrollAccumulator {
    horizontal: Threshold,
    vertical: Threshold,
    pending: DirectionMap<f64>,
}

impl ScrollAccumulator {
    /// Creates an accumulator with all four totals at zero.
    pub fn new(horizontal: Threshold, vertical: Threshold) -> Self {
        Self {
            horizontal,
            vertical,
            pending: DirectionMap::default(),
        }
    }

    /// Adds one `(delta_x, delta_y)` sample and calls `on_tick` once per
    /// threshold crossing.
    ///
    /// Positive `delta_y` is downward motion, positive `delta_x` is motion to
    /// the right.  The vertical axis is drained before the horizontal one.
    /// Returns the number of ticks emitted.
    pub fn process_sample(
        &mut self,
        delta_x: f64,
        delta_y: f64,
        mut on_tick: impl FnMut(Direction),
    ) -> u64 {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            debug!(delta_x, delta_y, "ignoring non-finite gesture sample");
            return 0;
        }

        let vertical = if delta_y > 0.0 {
            (Direction::Down, delta_y)
        } else {
            (Direction::Up, -delta_y)
        };
        let horizontal = if delta_x > 0.0 {
            (Direction::Right, delta_x)
        } else {
            (Direction::Left, -delta_x)
        };

        let (vertical_threshold, horizontal_threshold) = (self.vertical, self.horizontal);
        let mut ticks = self.feed(vertical.0, vertical.1, vertical_threshold, &mut on_tick);
        ticks += self.feed(horizontal.0, horizontal.1, horizontal_threshold, &mut on_tick);
        ticks
    }

    fn feed(
        &mut self,
        direction: Direction,
        magnitude: f64,
        threshold: Threshold,
        on_tick: &mut impl FnMut(Direction),
    ) -> u64 {
        let threshold = f64::from(threshold.get());
        let total = self.pending.get_mut(direction);
        *total += magnitude;

        let crossings = (*total / threshold).floor();
        let residual = total.rem_euclid(threshold);
        // Rounding in rem_euclid can land exactly on the divisor.
        *total = if residual < threshold { residual } else { 0.0 };

        let ticks = if crossings > MAX_TICKS_PER_SAMPLE as f64 {
            warn!(
                %direction,
                magnitude,
                crossings,
                "gesture sample too large, limiting to {MAX_TICKS_PER_SAMPLE} ticks"
            );
            MAX_TICKS_PER_SAMPLE
        } else {
            crossings as u64
        };
        for _ in 0..ticks {
            on_tick(direction);
        }
        ticks
    }

    /// Unconsumed motion currently held for `direction`.
    pub fn pending(&self, direction: Direction) -> f64 {
        *self.pending.get(direction)
    }

    /// Threshold of the axis `direction` lies on.
    pub fn threshold(&self, direction: Direction) -> Threshold {
        match direction {
            Direction::Up | Direction::Down => self.vertical,
            Direction::Left | Direction::Right => self.horizontal,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
