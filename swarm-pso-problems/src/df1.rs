//! DF1 dynamic landscape generator
//!
//! After Morrison and De Jong, "A test problem generator for non-stationary
//! environments". The landscape is the upper envelope of `peak_count` cones:
//!
//! ```text
//! f(x) = max_i [ h_i - r_i * ||x - x_i|| ]
//! ```
//!
//! Heights `h`, slopes `r` and locations `x` drift between generations. Each
//! parameter of each peak carries its own [`ChaoticMap`], so peaks wander
//! independently; every axis is switched on separately.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use swarm_pso_core::traits::{Objective, Problem};
use swarm_pso_core::{Error, Result};

use crate::chaos::{ChaoticMap, MAX_RATE};

/// DF1 parameter set
///
/// Heights live in `[h_base, h_base + h_range]`, slopes in
/// `[r_base, r_base + r_range]`, and every location coordinate (and the search
/// space) in `[x_base - x_range, x_base + x_range]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DfParameters {
    /// Dimensionality of the landscape
    pub dimensions: usize,
    /// Number of peaks
    pub peak_count: usize,

    /// Minimum peak height
    pub h_base: f64,
    /// Height span above `h_base`
    pub h_range: f64,
    /// Largest step for heights, as a fraction of their span
    pub h_scale: f64,
    /// Logistic rate for heights
    pub a_h: f64,
    /// Whether heights drift
    pub dynamic_h: bool,

    /// Minimum peak slope
    pub r_base: f64,
    /// Slope span above `r_base`
    pub r_range: f64,
    /// Largest step for slopes, as a fraction of their span
    pub r_scale: f64,
    /// Logistic rate for slopes
    pub a_r: f64,
    /// Whether slopes drift
    pub dynamic_r: bool,

    /// Center of the location span
    pub x_base: f64,
    /// Half-width of the location span
    pub x_range: f64,
    /// Largest step for locations, as a fraction of their span
    pub x_scale: f64,
    /// Logistic rate for locations
    pub a_x: f64,
    /// Whether locations drift
    pub dynamic_x: bool,
}

impl Default for DfParameters {
    fn default() -> Self {
        Self {
            dimensions: 2,
            peak_count: 5,
            h_base: 40.0,
            h_range: 30.0,
            h_scale: 0.1,
            a_h: 3.9,
            dynamic_h: true,
            r_base: 8.0,
            r_range: 12.0,
            r_scale: 0.1,
            a_r: 3.9,
            dynamic_r: true,
            x_base: 0.0,
            x_range: 1.0,
            x_scale: 0.1,
            a_x: 3.9,
            dynamic_x: true,
        }
    }
}

impl DfParameters {
    /// Disable every dynamic axis, yielding a static landscape
    pub fn frozen(mut self) -> Self {
        self.dynamic_h = false;
        self.dynamic_r = false;
        self.dynamic_x = false;
        self
    }

    /// Whether any axis drifts
    pub fn is_dynamic(&self) -> bool {
        self.dynamic_h || self.dynamic_r || self.dynamic_x
    }

    /// Reject parameter sets the generator cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.dimensions == 0 {
            return Err(invalid("dimensions", 0.0));
        }
        if self.peak_count == 0 {
            return Err(invalid("peak_count", 0.0));
        }
        for (name, value) in [
            ("h_base", self.h_base),
            ("r_base", self.r_base),
            ("x_base", self.x_base),
        ] {
            if !value.is_finite() {
                return Err(invalid(name, value));
            }
        }
        for (name, value) in [
            ("h_range", self.h_range),
            ("r_range", self.r_range),
            ("x_range", self.x_range),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(name, value));
            }
        }
        for (name, value) in [
            ("h_scale", self.h_scale),
            ("r_scale", self.r_scale),
            ("x_scale", self.x_scale),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(name, value));
            }
        }
        for (name, value) in [("a_h", self.a_h), ("a_r", self.a_r), ("a_x", self.a_x)] {
            if !(value > 0.0 && value <= MAX_RATE) {
                return Err(invalid(name, value));
            }
        }
        Ok(())
    }

    /// Lowest admissible location coordinate
    pub fn x_lower(&self) -> f64 {
        self.x_base - self.x_range
    }

    /// Highest admissible location coordinate
    pub fn x_upper(&self) -> f64 {
        self.x_base + self.x_range
    }
}

fn invalid(name: &'static str, value: f64) -> Error {
    Error::InvalidParameter { name, value }
}

/// A single cone of the landscape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    h: f64,
    r: f64,
    x: Vec<f64>,
    h_map: ChaoticMap,
    r_map: ChaoticMap,
    x_maps: Vec<ChaoticMap>,
}

impl Peak {
    /// Create a peak with explicit height, slope and location.
    ///
    /// Every parameter starts from the default map state, moving upwards.
    pub fn new(h: f64, r: f64, x: Vec<f64>) -> Self {
        let x_maps = vec![ChaoticMap::default(); x.len()];
        Self {
            h,
            r,
            x,
            h_map: ChaoticMap::default(),
            r_map: ChaoticMap::default(),
            x_maps,
        }
    }

    /// Draw a peak and its map states uniformly from the parameter spans
    pub fn random<R: Rng + ?Sized>(params: &DfParameters, rng: &mut R) -> Self {
        let h = params.h_base + params.h_range * rng.gen::<f64>();
        let r = params.r_base + params.r_range * rng.gen::<f64>();
        let x = (0..params.dimensions)
            .map(|_| params.x_base + params.x_range * (2.0 * rng.gen::<f64>() - 1.0))
            .collect();
        let h_map = ChaoticMap::random(rng);
        let r_map = ChaoticMap::random(rng);
        let x_maps = (0..params.dimensions)
            .map(|_| ChaoticMap::random(rng))
            .collect();
        Self {
            h,
            r,
            x,
            h_map,
            r_map,
            x_maps,
        }
    }

    /// Height
    pub fn height(&self) -> f64 {
        self.h
    }

    /// Slope
    pub fn slope(&self) -> f64 {
        self.r
    }

    /// Location
    pub fn location(&self) -> &[f64] {
        &self.x
    }

    /// Contribution at `position`: `h - r * ||position - x||`
    pub fn value(&self, position: &[f64]) -> f64 {
        let distance = position
            .iter()
            .zip(&self.x)
            .map(|(p, x)| (p - x) * (p - x))
            .sum::<f64>()
            .sqrt();
        self.h - self.r * distance
    }

    /// Drift every enabled axis one chaotic step
    pub fn change_peak(&mut self, params: &DfParameters) {
        if params.dynamic_h {
            self.h = self.h_map.step(
                self.h,
                params.h_base,
                params.h_base + params.h_range,
                params.h_scale,
                params.a_h,
            );
        }
        if params.dynamic_r {
            self.r = self.r_map.step(
                self.r,
                params.r_base,
                params.r_base + params.r_range,
                params.r_scale,
                params.a_r,
            );
        }
        if params.dynamic_x {
            let (lower, upper) = (params.x_lower(), params.x_upper());
            for (coord, map) in self.x.iter_mut().zip(&mut self.x_maps) {
                *coord = map.step(*coord, lower, upper, params.x_scale, params.a_x);
            }
        }
    }
}

/// The DF1 problem: maximize the envelope of drifting peaks
#[derive(Debug, Clone, PartialEq)]
pub struct Df1 {
    params: DfParameters,
    peaks: Vec<Peak>,
    last_change: Option<u64>,
}

impl Df1 {
    /// Validate `params` and draw `peak_count` random peaks
    pub fn new<R: Rng + ?Sized>(params: DfParameters, rng: &mut R) -> Result<Self> {
        params.validate()?;
        let peaks = (0..params.peak_count)
            .map(|_| Peak::random(&params, rng))
            .collect();
        Ok(Self {
            params,
            peaks,
            last_change: None,
        })
    }

    /// Build from explicit peaks. `peak_count` is taken from `peaks`.
    pub fn from_peaks(mut params: DfParameters, peaks: Vec<Peak>) -> Result<Self> {
        params.peak_count = peaks.len();
        params.validate()?;
        if let Some(peak) = peaks
            .iter()
            .find(|p| p.x.len() != params.dimensions || p.x_maps.len() != params.dimensions)
        {
            return Err(Error::DimensionMismatch {
                expected: params.dimensions,
                actual: peak.x.len().min(peak.x_maps.len()),
            });
        }
        Ok(Self {
            params,
            peaks,
            last_change: None,
        })
    }

    /// Parameter set
    pub fn params(&self) -> &DfParameters {
        &self.params
    }

    /// Current peaks
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    /// Iteration index passed to the most recent change
    pub fn last_change(&self) -> Option<u64> {
        self.last_change
    }

    /// Drift every peak one step on behalf of `iteration`.
    ///
    /// Every call advances the landscape, whatever the index; a driver that
    /// restarts its generation count keeps the peaks moving.
    pub fn change_peaks(&mut self, iteration: u64) {
        for peak in &mut self.peaks {
            peak.change_peak(&self.params);
        }
        self.last_change = Some(iteration);
        trace!(iteration, peaks = self.peaks.len(), "landscape changed");
    }
}

impl Problem for Df1 {
    fn dimensions(&self) -> usize {
        self.params.dimensions
    }

    fn lower_bound(&self, _dim: usize) -> f64 {
        self.params.x_lower()
    }

    fn upper_bound(&self, _dim: usize) -> f64 {
        self.params.x_upper()
    }

    fn fitness(&self, position: &[f64]) -> Result<f64> {
        if position.len() != self.params.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.params.dimensions,
                actual: position.len(),
            });
        }
        Ok(self
            .peaks
            .iter()
            .map(|peak| peak.value(position))
            .fold(f64::NEG_INFINITY, f64::max))
    }

    fn objective(&self) -> Objective {
        Objective::Maximize
    }

    fn is_dynamic(&self) -> bool {
        self.params.is_dynamic()
    }

    fn change(&mut self, generation: u64) {
        self.change_peaks(generation);
    }
}
