//! Core traits for Swarm PSO
//!
//! These traits define the contract between the engine and the objective it
//! optimizes.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Objective {
    /// Lower fitness is better
    #[default]
    Minimize,
    /// Higher fitness is better
    Maximize,
}

impl Objective {
    /// Returns `true` if `a` is strictly better than `b`
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Objective::Minimize => a < b,
            Objective::Maximize => a > b,
        }
    }
}

/// An objective function the swarm searches over
///
/// Implementations own their search space bounds and decide the comparison
/// direction; the engine never assumes minimization or maximization.
pub trait Problem {
    /// Number of decision variables
    fn dimensions(&self) -> usize;

    /// Lower bound of dimension `dim`
    fn lower_bound(&self, dim: usize) -> f64;

    /// Upper bound of dimension `dim`
    fn upper_bound(&self, dim: usize) -> f64;

    /// Evaluate a position
    fn fitness(&self, position: &[f64]) -> Result<f64>;

    /// Comparison direction
    fn objective(&self) -> Objective {
        Objective::Minimize
    }

    /// Returns `true` if fitness `a` is strictly better than fitness `b`
    fn is_better(&self, a: f64, b: f64) -> bool {
        self.objective().is_better(a, b)
    }

    /// Whether the landscape changes between generations
    fn is_dynamic(&self) -> bool {
        false
    }

    /// Advance a dynamic landscape to `generation`. Static problems ignore it.
    fn change(&mut self, _generation: u64) {}
}

/// A position paired with its fitness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Decision variables
    pub position: Vec<f64>,
    /// Fitness of `position`
    pub fitness: f64,
}

impl Solution {
    /// Create a new solution
    pub fn new(position: Vec<f64>, fitness: f64) -> Self {
        Self { position, fitness }
    }
}

/// Evaluate `position` and reject values no comparator can order.
pub(crate) fn evaluate<P: Problem + ?Sized>(problem: &P, position: &[f64]) -> Result<f64> {
    if position.len() != problem.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: problem.dimensions(),
            actual: position.len(),
        });
    }
    let fitness = problem.fitness(position)?;
    if fitness.is_nan() {
        return Err(Error::InvalidFitness);
    }
    Ok(fitness)
}
