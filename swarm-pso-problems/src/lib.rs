//! # Swarm PSO Problems
//!
//! Benchmark problems for Swarm PSO.
//!
//! This crate provides:
//! - [`Df1`](df1::Df1), the DF1 non-stationary landscape generator
//! - The logistic-map drift DF1 uses to move its peaks ([`chaos`])
//!
//! Problems implement [`swarm_pso_core::traits::Problem`] and are otherwise
//! independent of the engine. Dynamic problems are advanced by the driving
//! loop, never by the engine itself.

#![forbid(unsafe_code)]

pub mod chaos;
pub mod df1;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::df1::*;
}
