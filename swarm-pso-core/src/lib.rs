//! # Swarm PSO Core
//!
//! Core particle swarm optimization primitives for Swarm PSO.
//!
//! This crate provides:
//! - The [`Problem`](traits::Problem) abstraction the engine optimizes
//! - Particles and their velocity/position update rule
//! - Neighborhood topologies (global best, ring local best)
//! - The PSO [`Engine`](engine::Engine) with a linearly decaying inertia weight
//! - Coulomb-like repulsion for the charged PSO variant
//!
//! The engine is single-threaded and performs exactly one generation per
//! [`Engine::iterate`](engine::Engine::iterate) call. Deciding when to stop is
//! left to the driving loop.

#![forbid(unsafe_code)]

pub mod charge;
pub mod config;
pub mod engine;
pub mod particle;
pub mod topology;
pub mod traits;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::charge::*;
    pub use crate::config::*;
    pub use crate::engine::*;
    pub use crate::particle::*;
    pub use crate::topology::*;
    pub use crate::traits::*;
}

/// Result type for Swarm PSO operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for Swarm PSO core operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No maximum iteration count was configured
    #[error("maximum iteration count is required and must be positive")]
    MissingMaxIterations,
    /// Swarm size must be a positive integer
    #[error("swarm size must be positive")]
    InvalidSwarmSize,
    /// A tunable parameter is outside its admissible range
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },
    /// A vector does not match the problem dimensionality
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the problem
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },
    /// A particle index does not exist in the swarm
    #[error("particle index {index} out of range for swarm of {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Swarm length
        len: usize,
    },
    /// The problem produced a fitness the comparator cannot order
    #[error("fitness evaluation returned a non-comparable value")]
    InvalidFitness,
    /// The problem failed to evaluate a position
    #[error("fitness evaluation failed: {0}")]
    Evaluation(String),
    /// `iterate` was called before a successful `init`
    #[error("engine has not been initialized")]
    NotInitialized,
}
