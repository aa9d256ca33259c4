//! Particle state and the canonical PSO update rule
//!
//! A particle owns one candidate solution: its position, velocity, current
//! fitness and personal best. All mutation happens in place, once per
//! generation, driven by the engine.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::traits::{evaluate, Problem, Solution};
use crate::{Error, Result};

/// Particle state in PSO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    fitness: f64,
    best: Solution,
    charge: f64,
}

impl Particle {
    /// Create a neutral particle at the origin with zero velocity.
    ///
    /// Fitness values start as NaN until the first evaluation.
    pub fn new(dimensions: usize) -> Self {
        Self {
            position: vec![0.0; dimensions],
            velocity: vec![0.0; dimensions],
            fitness: f64::NAN,
            best: Solution::new(vec![0.0; dimensions], f64::NAN),
            charge: 0.0,
        }
    }

    /// Number of dimensions
    pub fn dimensions(&self) -> usize {
        self.position.len()
    }

    /// Current position
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Fitness of the current position
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Personal best position
    pub fn best_position(&self) -> &[f64] {
        &self.best.position
    }

    /// Personal best fitness
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness
    }

    /// Personal best as a solution
    pub fn best(&self) -> &Solution {
        &self.best
    }

    /// Charge magnitude (0 for neutral particles)
    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// Set the charge magnitude
    pub fn set_charge(&mut self, charge: f64) {
        self.charge = charge;
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec<f64>) -> Result<()> {
        self.check_len(velocity.len())?;
        self.velocity = velocity;
        Ok(())
    }

    /// Replace the current position and its fitness
    pub fn set_current_position(&mut self, position: Vec<f64>, fitness: f64) -> Result<()> {
        self.check_len(position.len())?;
        self.position = position;
        self.fitness = fitness;
        Ok(())
    }

    /// Replace the personal best
    pub fn set_best_position(&mut self, position: Vec<f64>, fitness: f64) -> Result<()> {
        self.check_len(position.len())?;
        self.best = Solution::new(position, fitness);
        Ok(())
    }

    /// Adopt the current position as personal best if it is strictly better.
    ///
    /// Returns `true` when the personal best changed. A particle whose
    /// personal best was never evaluated always adopts its current position.
    pub fn update_pbest<P: Problem + ?Sized>(&mut self, problem: &P) -> bool {
        if self.best.fitness.is_nan() || problem.is_better(self.fitness, self.best.fitness) {
            self.best.position.clone_from(&self.position);
            self.best.fitness = self.fitness;
            return true;
        }
        false
    }

    /// Apply the inertia-weighted PSO velocity update.
    ///
    /// For every dimension `i`, with fresh `r1, r2` drawn from `[0, 1)`:
    /// `v[i] = w*v[i] + c1*r1*(pbest[i] - x[i]) + c2*r2*(nb[i] - x[i])`
    pub fn update_velocity<R: Rng + ?Sized>(
        &mut self,
        inertia_weight: f64,
        neighborhood_best: &[f64],
        c1: f64,
        c2: f64,
        rng: &mut R,
    ) -> Result<()> {
        self.check_len(neighborhood_best.len())?;
        for i in 0..self.velocity.len() {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();

            let cognitive = c1 * r1 * (self.best.position[i] - self.position[i]);
            let social = c2 * r2 * (neighborhood_best[i] - self.position[i]);

            self.velocity[i] = inertia_weight * self.velocity[i] + cognitive + social;
        }
        Ok(())
    }

    /// Add an external acceleration (e.g. charge repulsion) to the velocity
    pub fn accelerate(&mut self, acceleration: &[f64]) -> Result<()> {
        self.check_len(acceleration.len())?;
        for (v, a) in self.velocity.iter_mut().zip(acceleration) {
            *v += a;
        }
        Ok(())
    }

    /// Clamp every velocity component into `[-max, max]`
    pub fn clamp_velocity(&mut self, max: f64) {
        for v in &mut self.velocity {
            *v = v.clamp(-max, max);
        }
    }

    /// Move by the current velocity, clamp into bounds and re-evaluate.
    ///
    /// The particle is left untouched if evaluation fails.
    pub fn update_current_position<P: Problem + ?Sized>(&mut self, problem: &P) -> Result<()> {
        let mut next = self.position.clone();
        for (i, x) in next.iter_mut().enumerate() {
            *x = (*x + self.velocity[i]).clamp(problem.lower_bound(i), problem.upper_bound(i));
        }
        let fitness = evaluate(problem, &next)?;
        self.position = next;
        self.fitness = fitness;
        Ok(())
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual != self.position.len() {
            return Err(Error::DimensionMismatch {
                expected: self.position.len(),
                actual,
            });
        }
        Ok(())
    }
}
