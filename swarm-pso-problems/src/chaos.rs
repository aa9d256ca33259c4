//! Logistic-map parameter drift
//!
//! DF1 moves each drifting parameter by a step whose size follows the
//! logistic recurrence `Y' = a * Y * (1 - Y)`. Every parameter owns its own
//! [`ChaoticMap`]: the map state sets the step length as a fraction of the
//! parameter span, and the parameter bounces off the span ends. For `a` close
//! to 4 the step sequence is chaotic: deterministic, bounded, and hard to
//! predict from a few observations.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Map states are kept this far from the fixed point at zero
pub const Y_FLOOR: f64 = 1e-3;

/// Largest rate for which the map stays inside `[0, 1]`
pub const MAX_RATE: f64 = 4.0;

/// Starting state for maps built without a random source
pub const DEFAULT_STATE: f64 = 0.37;

/// One application of the logistic map
pub fn logistic(rate: f64, y: f64) -> f64 {
    rate * y * (1.0 - y)
}

fn keep_off_fixed_points(y: f64) -> f64 {
    y.clamp(Y_FLOOR, 1.0 - Y_FLOOR)
}

/// Logistic state and travel direction of one drifting parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaoticMap {
    y: f64,
    ascending: bool,
}

impl Default for ChaoticMap {
    fn default() -> Self {
        Self::new(DEFAULT_STATE, true)
    }
}

impl ChaoticMap {
    /// Create a map at state `y`, moving upwards when `ascending`
    pub fn new(y: f64, ascending: bool) -> Self {
        Self {
            y: keep_off_fixed_points(y),
            ascending,
        }
    }

    /// Draw a state and direction uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen(), rng.gen())
    }

    /// Current state in `(0, 1)`
    pub fn state(&self) -> f64 {
        self.y
    }

    /// Whether the next step moves the parameter upwards
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Advance the state once and return it
    pub fn advance(&mut self, rate: f64) -> f64 {
        self.y = keep_off_fixed_points(logistic(rate, self.y));
        self.y
    }

    /// Move `value` one chaotic step inside `[lower, upper]`.
    ///
    /// The step is `scale * span * Y`. A step that crosses a span end is
    /// reflected back inside and reverses the direction. A degenerate span
    /// leaves both the value and the state untouched.
    pub fn step(&mut self, value: f64, lower: f64, upper: f64, scale: f64, rate: f64) -> f64 {
        let span = upper - lower;
        if span <= 0.0 {
            return value;
        }
        let delta = scale * span * self.advance(rate);
        let next = if self.ascending {
            value + delta
        } else {
            value - delta
        };

        if next > upper {
            self.ascending = false;
            (2.0 * upper - next).max(lower)
        } else if next < lower {
            self.ascending = true;
            (2.0 * lower - next).min(upper)
        } else {
            next
        }
    }
}
