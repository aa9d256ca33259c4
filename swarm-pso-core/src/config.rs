//! Engine configuration
//!
//! Every tunable the engine reads lives here. Validation happens once, when
//! an [`Engine`](crate::engine::Engine) is constructed, so a bad
//! configuration never starts a run.

use serde::{Deserialize, Serialize};

use crate::charge::ChargeConfig;
use crate::topology::TopologyKind;
use crate::{Error, Result};

/// Inertia weight at generation zero
pub const INITIAL_WEIGHT: f64 = 0.9;

/// Inertia weight the linear decay approaches
pub const FINAL_WEIGHT: f64 = 0.4;

/// Particle Swarm Optimization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Cognitive coefficient (attraction to personal best)
    pub c1: f64,
    /// Social coefficient (attraction to neighborhood best)
    pub c2: f64,
    /// Number of particles in the swarm
    pub swarm_size: usize,
    /// Generation count the inertia schedule decays over. Required.
    pub max_iterations: Option<u64>,
    /// Optional symmetric velocity clamp
    pub max_velocity: Option<f64>,
    /// Neighborhood topology
    pub topology: TopologyKind,
    /// Charged PSO repulsion; `None` runs plain PSO
    pub charge: Option<ChargeConfig>,
    /// Seed for the engine's random source; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            c1: 1.5,
            c2: 1.5,
            swarm_size: 30,
            max_iterations: None,
            max_velocity: None,
            topology: TopologyKind::default(),
            charge: None,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Check every field, returning the validated maximum iteration count
    pub fn validate(&self) -> Result<u64> {
        let max_iterations = match self.max_iterations {
            Some(n) if n > 0 => n,
            _ => return Err(Error::MissingMaxIterations),
        };
        if self.swarm_size == 0 {
            return Err(Error::InvalidSwarmSize);
        }
        check_coefficient("c1", self.c1)?;
        check_coefficient("c2", self.c2)?;
        if let Some(max) = self.max_velocity {
            if !(max.is_finite() && max > 0.0) {
                return Err(Error::InvalidParameter {
                    name: "max_velocity",
                    value: max,
                });
            }
        }
        if let TopologyKind::Ring { radius: 0 } = self.topology {
            return Err(Error::InvalidParameter {
                name: "radius",
                value: 0.0,
            });
        }
        if let Some(charge) = &self.charge {
            charge.validate()?;
        }
        Ok(max_iterations)
    }
}

fn check_coefficient(name: &'static str, value: f64) -> Result<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(Error::InvalidParameter { name, value });
    }
    Ok(())
}

/// Linear inertia decay: `(w - FINAL) * (max - elapsed) / max + FINAL`.
///
/// `max - elapsed` saturates at zero, so running past `max_iterations` pins
/// the weight at [`FINAL_WEIGHT`].
pub fn decay_inertia(weight: f64, elapsed: u64, max_iterations: u64) -> f64 {
    let remaining = max_iterations.saturating_sub(elapsed) as f64;
    (weight - FINAL_WEIGHT) * (remaining / max_iterations as f64) + FINAL_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> EngineConfig {
        EngineConfig {
            max_iterations: Some(100),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn missing_max_iterations_fails_fast() {
        assert_eq!(
            EngineConfig::default().validate(),
            Err(Error::MissingMaxIterations)
        );
        let zero = EngineConfig {
            max_iterations: Some(0),
            ..valid()
        };
        assert_eq!(zero.validate(), Err(Error::MissingMaxIterations));
        assert_eq!(valid().validate(), Ok(100));
    }

    #[test]
    fn rejects_bad_fields() {
        let empty = EngineConfig {
            swarm_size: 0,
            ..valid()
        };
        assert_eq!(empty.validate(), Err(Error::InvalidSwarmSize));

        let negative = EngineConfig { c2: -1.0, ..valid() };
        assert!(matches!(
            negative.validate(),
            Err(Error::InvalidParameter { name: "c2", .. })
        ));

        let ring = EngineConfig {
            topology: TopologyKind::ring(0),
            ..valid()
        };
        assert!(ring.validate().is_err());

        let clamp = EngineConfig {
            max_velocity: Some(0.0),
            ..valid()
        };
        assert!(clamp.validate().is_err());
    }

    #[test]
    fn inertia_decays_linearly() {
        let max = 10;
        assert_eq!(decay_inertia(INITIAL_WEIGHT, 0, max), INITIAL_WEIGHT);

        let mut w = INITIAL_WEIGHT;
        for elapsed in 0..max {
            let expected =
                (w - FINAL_WEIGHT) * ((max - elapsed) as f64 / max as f64) + FINAL_WEIGHT;
            w = decay_inertia(w, elapsed, max);
            assert_eq!(w, expected);
            assert!(w >= FINAL_WEIGHT);
        }
        assert_eq!(decay_inertia(w, max, max), FINAL_WEIGHT);
        assert_eq!(decay_inertia(w, max + 5, max), FINAL_WEIGHT);
    }

    #[test]
    fn parses_camel_case_json() {
        let config: EngineConfig = serde_json::from_str(
            r#"{
                "c1": 1.5,
                "c2": 1.5,
                "swarmSize": 12,
                "maxIterations": 500,
                "topology": { "kind": "ring", "radius": 2 },
                "charge": { "charge": 1.0, "interactionRadius": 3.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.swarm_size, 12);
        assert_eq!(config.max_iterations, Some(500));
        assert_eq!(config.topology, TopologyKind::ring(2));
        let charge = config.charge.unwrap();
        assert_eq!(charge.epsilon, crate::charge::DEFAULT_EPSILON);
        assert_eq!(config.seed, None);
    }
}
