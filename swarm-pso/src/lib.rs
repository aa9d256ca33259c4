//! # Swarm PSO
//!
//! **A pluggable particle swarm optimization research engine, with charged
//! PSO and the DF1 dynamic benchmark.**
//!
//! A swarm of candidate solutions iteratively improves toward the optimum of a
//! pluggable [`Problem`]. Neighborhood topologies are injected strategies, and
//! the charged variant adds pairwise repulsion to keep the swarm diverse on
//! landscapes that move, such as [`Df1`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rand::SeedableRng;
//! use swarm_pso::prelude::*;
//!
//! # fn main() -> swarm_pso::Result<()> {
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let problem = Df1::new(DfParameters::default(), &mut rng)?;
//!
//! let config = EngineConfigBuilder::new()
//!     .swarm_size(20)
//!     .max_iterations(200)
//!     .charged_local_best(ChargeConfig::default())
//!     .seed(7)
//!     .build();
//!
//! let mut runner = Runner::new(Engine::new(problem, config)?);
//! let summary = runner.run()?;
//! println!("best fitness {}", summary.best.fitness);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`swarm_pso_core`]: problem trait, particles, topologies, engine, repulsion
//! - [`swarm_pso_problems`]: the DF1 dynamic landscape generator

#![forbid(unsafe_code)]

// Re-export sub-crates
pub use swarm_pso_core as core;
pub use swarm_pso_problems as problems;

// Re-export commonly used items at the top level
pub use swarm_pso_core::{
    charge::{ChargeConfig, Repulsion},
    config::{EngineConfig, FINAL_WEIGHT, INITIAL_WEIGHT},
    engine::Engine,
    particle::Particle,
    topology::{GlobalBest, LocalBest, Topology, TopologyKind},
    traits::{Objective, Problem, Solution},
    Error, Result,
};
pub use swarm_pso_problems::df1::{Df1, DfParameters, Peak};

pub mod runner;

pub use runner::{RunSummary, Runner, StopCondition};

/// Prelude module for convenient imports
///
/// ```rust,ignore
/// use swarm_pso::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::problems::prelude::*;
    pub use crate::runner::*;

    pub use crate::EngineConfigBuilder;
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cognitive coefficient
    pub fn c1(mut self, c1: f64) -> Self {
        self.config.c1 = c1;
        self
    }

    /// Set the social coefficient
    pub fn c2(mut self, c2: f64) -> Self {
        self.config.c2 = c2;
        self
    }

    /// Set the number of particles
    pub fn swarm_size(mut self, swarm_size: usize) -> Self {
        self.config.swarm_size = swarm_size;
        self
    }

    /// Set the generation count the inertia schedule decays over
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.config.max_iterations = Some(max_iterations);
        self
    }

    /// Clamp velocities to `[-max, max]`
    pub fn max_velocity(mut self, max: f64) -> Self {
        self.config.max_velocity = Some(max);
        self
    }

    /// Set the neighborhood topology
    pub fn topology(mut self, topology: TopologyKind) -> Self {
        self.config.topology = topology;
        self
    }

    /// Enable charged-particle repulsion
    pub fn charged(mut self, charge: ChargeConfig) -> Self {
        self.config.charge = Some(charge);
        self
    }

    /// Charged PSO over a radius-one ring, the usual setup for DF1
    pub fn charged_local_best(self, charge: ChargeConfig) -> Self {
        self.topology(TopologyKind::ring(1)).charged(charge)
    }

    /// Seed the engine's random source
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the configuration
    pub fn build(self) -> EngineConfig {
        self.config
    }
}
