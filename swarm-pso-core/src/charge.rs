//! Charged PSO repulsion
//!
//! Charged particles repel each other with a Coulomb-like force, which keeps
//! part of the swarm spread out and able to track a moving optimum. The force
//! between particles `i` and `j` within the interaction radius is
//! `q_i * q_j / max(d, epsilon)^2`, directed from `j` towards `i`.

use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::{Error, Result};

/// Default distance floor
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Charge configuration shared by the swarm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeConfig {
    /// Charge magnitude given to every particle
    pub charge: f64,
    /// Particles farther apart than this do not interact
    pub interaction_radius: f64,
    /// Distance floor preventing division by zero
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            charge: 16.0,
            interaction_radius: 64.0,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ChargeConfig {
    /// Reject negative or non-finite parameters
    pub fn validate(&self) -> Result<()> {
        check_non_negative("charge", self.charge)?;
        check_non_negative("interaction_radius", self.interaction_radius)?;
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                value: self.epsilon,
            });
        }
        Ok(())
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(Error::InvalidParameter { name, value });
    }
    Ok(())
}

/// Pairwise repulsion model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsion {
    interaction_radius: f64,
    epsilon: f64,
}

impl Repulsion {
    /// Create a repulsion model
    pub fn new(interaction_radius: f64, epsilon: f64) -> Result<Self> {
        ChargeConfig {
            charge: 0.0,
            interaction_radius,
            epsilon,
        }
        .validate()?;
        Ok(Self {
            interaction_radius,
            epsilon,
        })
    }

    /// Build from the swarm-wide charge configuration
    pub fn from_config(config: &ChargeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            interaction_radius: config.interaction_radius,
            epsilon: config.epsilon,
        })
    }

    /// Interaction radius
    pub fn interaction_radius(&self) -> f64 {
        self.interaction_radius
    }

    /// Force exerted on a particle at `target` by one at `source`.
    ///
    /// Zero beyond the interaction radius, and zero when both positions
    /// coincide (there is no direction to push along).
    pub fn pairwise(
        &self,
        target: &[f64],
        target_charge: f64,
        source: &[f64],
        source_charge: f64,
    ) -> Vec<f64> {
        let delta: Vec<f64> = target.iter().zip(source).map(|(t, s)| t - s).collect();
        let distance = delta.iter().map(|d| d * d).sum::<f64>().sqrt();

        if distance > self.interaction_radius || distance == 0.0 {
            return vec![0.0; delta.len()];
        }

        let floored = distance.max(self.epsilon);
        let magnitude = target_charge * source_charge / (floored * floored);
        delta.into_iter().map(|d| magnitude * d / distance).collect()
    }

    /// Total repulsion acting on `swarm[index]`
    pub fn acceleration(&self, swarm: &[Particle], index: usize) -> Result<Vec<f64>> {
        let target = swarm.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: swarm.len(),
        })?;
        let mut total = vec![0.0; target.dimensions()];
        if target.charge() == 0.0 {
            return Ok(total);
        }

        for (j, other) in swarm.iter().enumerate() {
            if j == index || other.charge() == 0.0 {
                continue;
            }
            let force = self.pairwise(
                target.position(),
                target.charge(),
                other.position(),
                other.charge(),
            );
            for (t, f) in total.iter_mut().zip(force) {
                *t += f;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charged_at(position: Vec<f64>, charge: f64) -> Particle {
        let mut p = Particle::new(position.len());
        p.set_current_position(position, 0.0).unwrap();
        p.set_charge(charge);
        p
    }

    #[test]
    fn unit_charges_one_apart_push_with_unit_force() {
        let repulsion = Repulsion::new(2.0, 1e-12).unwrap();
        let swarm = vec![charged_at(vec![0.0], 1.0), charged_at(vec![1.0], 1.0)];

        let on_first = repulsion.acceleration(&swarm, 0).unwrap();
        let on_second = repulsion.acceleration(&swarm, 1).unwrap();
        assert_eq!(on_first, vec![-1.0]);
        assert_eq!(on_second, vec![1.0]);
    }

    #[test]
    fn beyond_radius_contributes_exactly_zero() {
        let repulsion = Repulsion::new(2.0, 1e-9).unwrap();
        let force = repulsion.pairwise(&[0.0, 0.0], 5.0, &[3.0, 0.0], 5.0);
        assert_eq!(force, vec![0.0, 0.0]);
    }

    #[test]
    fn force_follows_inverse_square() {
        let repulsion = Repulsion::new(10.0, 1e-9).unwrap();
        let force = repulsion.pairwise(&[3.0, 4.0], 2.0, &[0.0, 0.0], 1.0);
        // |d| = 5, magnitude = 2 / 25, along (0.6, 0.8)
        assert!((force[0] - 0.08 * 0.6).abs() < 1e-12);
        assert!((force[1] - 0.08 * 0.8).abs() < 1e-12);
    }

    #[test]
    fn near_zero_distance_caps_magnitude() {
        let repulsion = Repulsion::new(1.0, 0.1).unwrap();
        // magnitude capped at 1 / 0.1^2, still along the unit vector
        let force = repulsion.pairwise(&[1e-6], 1.0, &[0.0], 1.0);
        assert!((force[0] - 100.0).abs() < 1e-9);
        let force = repulsion.pairwise(&[0.0, -1e-6], 2.0, &[0.0, 0.0], 3.0);
        assert_eq!(force[0], 0.0);
        assert!((force[1] + 600.0).abs() < 1e-9);

        let coincident = repulsion.pairwise(&[0.5], 1.0, &[0.5], 1.0);
        assert_eq!(coincident, vec![0.0]);
    }

    #[test]
    fn neutral_particles_neither_push_nor_move() {
        let repulsion = Repulsion::new(5.0, 1e-9).unwrap();
        let swarm = vec![
            charged_at(vec![0.0], 0.0),
            charged_at(vec![1.0], 1.0),
            charged_at(vec![2.0], 1.0),
        ];
        assert_eq!(repulsion.acceleration(&swarm, 0).unwrap(), vec![0.0]);
        // particle 1 only feels particle 2
        assert_eq!(repulsion.acceleration(&swarm, 1).unwrap(), vec![-1.0]);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(Repulsion::new(-1.0, 1e-9).is_err());
        assert!(Repulsion::new(1.0, 0.0).is_err());
        let config = ChargeConfig {
            charge: f64::NAN,
            ..ChargeConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(Repulsion::new(1.0, 1e-9)
            .unwrap()
            .acceleration(&[], 0)
            .is_err());
    }
}
