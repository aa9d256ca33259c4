//! The PSO engine
//!
//! [`Engine`] composes a [`Problem`], a [`Topology`] strategy, an optional
//! charged-particle [`Repulsion`] model and an owned random source. It runs
//! one generation per [`Engine::iterate`] call and never decides on its own
//! when to stop.
//!
//! ## Generation
//!
//! 1. Every particle refreshes its personal best; the global best follows.
//! 2. Neighborhood bests and repulsion are taken from that snapshot, then every
//!    particle updates its velocity and moves.
//! 3. The inertia weight decays linearly towards
//!    [`FINAL_WEIGHT`](crate::config::FINAL_WEIGHT).
//!
//! A generation is staged on a copy of the swarm and committed only when every
//! evaluation succeeded.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::charge::Repulsion;
use crate::config::{decay_inertia, EngineConfig, INITIAL_WEIGHT};
use crate::particle::Particle;
use crate::topology::Topology;
use crate::traits::{evaluate, Problem, Solution};
use crate::{Error, Result};

/// Particle swarm optimizer over a problem `P`, drawing randomness from `R`
#[derive(Debug)]
pub struct Engine<P, R = StdRng> {
    problem: P,
    config: EngineConfig,
    max_iterations: u64,
    topology: Box<dyn Topology>,
    repulsion: Option<Repulsion>,
    rng: R,
    swarm: Vec<Particle>,
    global_best: Option<Solution>,
    inertia_weight: f64,
}

impl<P: Problem> Engine<P, StdRng> {
    /// Create an engine seeded from `config.seed`, or from entropy if unset
    pub fn new(problem: P, config: EngineConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(problem, config, rng)
    }
}

impl<P: Problem, R: Rng> Engine<P, R> {
    /// Create an engine with an explicit random source.
    ///
    /// Fails fast on an invalid configuration.
    pub fn with_rng(problem: P, config: EngineConfig, rng: R) -> Result<Self> {
        let max_iterations = config.validate()?;
        let topology = config.topology.build()?;
        let repulsion = config
            .charge
            .as_ref()
            .map(Repulsion::from_config)
            .transpose()?;

        Ok(Self {
            problem,
            config,
            max_iterations,
            topology,
            repulsion,
            rng,
            swarm: Vec::new(),
            global_best: None,
            inertia_weight: INITIAL_WEIGHT,
        })
    }

    /// Allocate and randomize the swarm, then locate the initial global best.
    ///
    /// Positions are uniform within bounds, velocities uniform in `[0, 1)`.
    /// On error the engine stays uninitialized.
    pub fn init(&mut self) -> Result<()> {
        let dims = self.problem.dimensions();
        self.check_bounds(dims)?;

        let charge = self.config.charge.map_or(0.0, |c| c.charge);
        let mut swarm = Vec::with_capacity(self.config.swarm_size);

        for _ in 0..self.config.swarm_size {
            let mut position = Vec::with_capacity(dims);
            for i in 0..dims {
                let lower = self.problem.lower_bound(i);
                let upper = self.problem.upper_bound(i);
                let value = (upper - lower) * self.rng.gen::<f64>() + lower;
                position.push(value.clamp(lower, upper));
            }
            let velocity: Vec<f64> = (0..dims).map(|_| self.rng.gen()).collect();
            let fitness = evaluate(&self.problem, &position)?;

            let mut particle = Particle::new(dims);
            particle.set_current_position(position.clone(), fitness)?;
            particle.set_best_position(position, fitness)?;
            particle.set_velocity(velocity)?;
            particle.set_charge(charge);
            swarm.push(particle);
        }

        let global_best = scan_best(&self.problem, swarm[0].best().clone(), &swarm);

        debug!(
            swarm_size = swarm.len(),
            dimensions = dims,
            topology = self.topology.name(),
            charged = self.repulsion.is_some(),
            best_fitness = global_best.fitness,
            "swarm initialized"
        );

        self.swarm = swarm;
        self.global_best = Some(global_best);
        self.inertia_weight = INITIAL_WEIGHT;
        Ok(())
    }

    /// Run one generation.
    ///
    /// `elapsed` is the number of generations the driving loop has completed;
    /// it feeds the inertia decay.
    pub fn iterate(&mut self, elapsed: u64) -> Result<()> {
        let mut best = self.global_best.clone().ok_or(Error::NotInitialized)?;
        let mut swarm = self.swarm.clone();
        let previous = best.fitness;

        for particle in &mut swarm {
            particle.update_pbest(&self.problem);
            if self.problem.is_better(particle.best_fitness(), best.fitness) {
                best = particle.best().clone();
            }
        }

        let guides = (0..swarm.len())
            .map(|i| -> Result<Vec<f64>> {
                let j = self.topology.best_neighbor(&swarm, i, &self.problem)?;
                Ok(swarm[j].best_position().to_vec())
            })
            .collect::<Result<Vec<_>>>()?;
        let forces = match &self.repulsion {
            Some(repulsion) => Some(
                (0..swarm.len())
                    .map(|i| repulsion.acceleration(&swarm, i))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };

        for (i, particle) in swarm.iter_mut().enumerate() {
            particle.update_velocity(
                self.inertia_weight,
                &guides[i],
                self.config.c1,
                self.config.c2,
                &mut self.rng,
            )?;
            if let Some(forces) = &forces {
                particle.accelerate(&forces[i])?;
            }
            if let Some(max) = self.config.max_velocity {
                particle.clamp_velocity(max);
            }
            particle.update_current_position(&self.problem)?;
        }

        if self.problem.is_better(best.fitness, previous) {
            debug!(elapsed, from = previous, to = best.fitness, "global best improved");
        }

        self.swarm = swarm;
        self.global_best = Some(best);
        self.inertia_weight = decay_inertia(self.inertia_weight, elapsed, self.max_iterations);

        trace!(
            elapsed,
            inertia_weight = self.inertia_weight,
            best_fitness = self.best_solution_value(),
            "generation complete"
        );
        Ok(())
    }

    /// Re-evaluate remembered fitness after the landscape changed.
    ///
    /// Current and personal-best fitness of every particle, and the global
    /// best, are recomputed; the global best is then re-selected from the
    /// refreshed personal bests.
    pub fn refresh_memory(&mut self) -> Result<()> {
        let stale = self.global_best.clone().ok_or(Error::NotInitialized)?;
        let mut swarm = self.swarm.clone();

        for particle in &mut swarm {
            let current = evaluate(&self.problem, particle.position())?;
            let best = evaluate(&self.problem, particle.best_position())?;
            particle.set_current_position(particle.position().to_vec(), current)?;
            particle.set_best_position(particle.best_position().to_vec(), best)?;
        }
        let refreshed = evaluate(&self.problem, &stale.position)?;
        let global_best = scan_best(
            &self.problem,
            Solution::new(stale.position, refreshed),
            &swarm,
        );

        debug!(
            stale = stale.fitness,
            refreshed = global_best.fitness,
            "memory refreshed"
        );

        self.swarm = swarm;
        self.global_best = Some(global_best);
        Ok(())
    }

    fn check_bounds(&self, dims: usize) -> Result<()> {
        if dims == 0 {
            return Err(Error::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        for i in 0..dims {
            let lower = self.problem.lower_bound(i);
            let upper = self.problem.upper_bound(i);
            if !(lower.is_finite() && upper.is_finite() && lower <= upper) {
                return Err(Error::InvalidParameter {
                    name: "bounds",
                    value: lower,
                });
            }
        }
        Ok(())
    }
}

impl<P, R> Engine<P, R> {
    /// Whether [`init`](Self::init) has completed
    pub fn is_initialized(&self) -> bool {
        self.global_best.is_some()
    }

    /// Copy of the best position found so far
    pub fn best_solution(&self) -> Option<Vec<f64>> {
        self.global_best.as_ref().map(|s| s.position.clone())
    }

    /// Fitness of the best position found so far
    pub fn best_solution_value(&self) -> Option<f64> {
        self.global_best.as_ref().map(|s| s.fitness)
    }

    /// Read-only view of the global best
    pub fn best(&self) -> Option<&Solution> {
        self.global_best.as_ref()
    }

    /// Read-only view of the swarm
    pub fn particles(&self) -> &[Particle] {
        &self.swarm
    }

    /// Current inertia weight
    pub fn inertia_weight(&self) -> f64 {
        self.inertia_weight
    }

    /// Validated maximum iteration count
    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    /// Configuration the engine was built from
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the topology in use
    pub fn topology_name(&self) -> &'static str {
        self.topology.name()
    }

    /// The problem being optimized
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Mutable access for the driving loop (e.g. to advance a dynamic landscape)
    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }
}

/// Best of `seed` and every personal best, first-found on ties.
fn scan_best<P: Problem>(problem: &P, seed: Solution, swarm: &[Particle]) -> Solution {
    let mut best = seed;
    for particle in swarm {
        if problem.is_better(particle.best_fitness(), best.fitness) {
            best = particle.best().clone();
        }
    }
    best
}
