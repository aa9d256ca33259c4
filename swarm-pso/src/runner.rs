//! Generation-driving loop
//!
//! The engine performs exactly one generation per call and never stops on
//! its own. [`Runner`] owns that loop: it checks stop conditions, feeds the
//! elapsed generation count to the inertia schedule, advances dynamic
//! landscapes between generations and records the best fitness history.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use swarm_pso_core::engine::Engine;
use swarm_pso_core::traits::{Problem, Solution};
use swarm_pso_core::{Error, Result};

/// Condition that ends a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopCondition {
    /// Stop once this many generations have completed
    MaxIterations(u64),
    /// Stop once the global best is at least as good as this fitness
    TargetFitness(f64),
}

impl StopCondition {
    /// Whether the condition holds after `elapsed` generations
    pub fn is_met<P: Problem, R>(&self, engine: &Engine<P, R>, elapsed: u64) -> bool {
        match *self {
            StopCondition::MaxIterations(max) => elapsed >= max,
            StopCondition::TargetFitness(target) => engine
                .best_solution_value()
                .map_or(false, |best| !engine.problem().is_better(target, best)),
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Generations executed
    pub generations: u64,
    /// Global best at the end of the run
    pub best: Solution,
    /// Global best fitness after initialization and after every generation
    pub history: Vec<f64>,
    /// Topology the engine used
    pub topology: String,
}

impl RunSummary {
    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Drives an [`Engine`] until a stop condition holds
#[derive(Debug)]
pub struct Runner<P, R> {
    engine: Engine<P, R>,
    stop_conditions: Vec<StopCondition>,
    refresh_memory: bool,
}

impl<P: Problem, R: Rng> Runner<P, R> {
    /// Wrap an engine, stopping at its configured maximum iteration count
    pub fn new(engine: Engine<P, R>) -> Self {
        let max = engine.max_iterations();
        Self {
            engine,
            stop_conditions: vec![StopCondition::MaxIterations(max)],
            refresh_memory: true,
        }
    }

    /// Add a stop condition; the run ends when any condition holds
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_conditions.push(condition);
        self
    }

    /// Whether remembered fitness is re-evaluated after a landscape change
    pub fn refresh_memory(mut self, enabled: bool) -> Self {
        self.refresh_memory = enabled;
        self
    }

    /// Active stop conditions
    pub fn stop_conditions(&self) -> &[StopCondition] {
        &self.stop_conditions
    }

    /// Initialize the engine if needed, then iterate until a condition holds
    pub fn run(&mut self) -> Result<RunSummary> {
        if !self.engine.is_initialized() {
            self.engine.init()?;
        }

        let mut elapsed = 0;
        let mut history = vec![self.best_value()?];

        while !self.should_stop(elapsed) {
            self.engine.iterate(elapsed)?;
            elapsed += 1;

            if self.engine.problem().is_dynamic() {
                self.engine.problem_mut().change(elapsed);
                if self.refresh_memory {
                    self.engine.refresh_memory()?;
                }
                debug!(generation = elapsed, "landscape advanced");
            }
            history.push(self.best_value()?);
        }

        let best = self.engine.best().cloned().ok_or(Error::NotInitialized)?;
        info!(
            generations = elapsed,
            best_fitness = best.fitness,
            topology = self.engine.topology_name(),
            "run complete"
        );

        Ok(RunSummary {
            generations: elapsed,
            best,
            history,
            topology: self.engine.topology_name().to_string(),
        })
    }

    /// The driven engine
    pub fn engine(&self) -> &Engine<P, R> {
        &self.engine
    }

    /// Release the engine
    pub fn into_engine(self) -> Engine<P, R> {
        self.engine
    }

    fn should_stop(&self, elapsed: u64) -> bool {
        self.stop_conditions
            .iter()
            .any(|condition| condition.is_met(&self.engine, elapsed))
    }

    fn best_value(&self) -> Result<f64> {
        self.engine
            .best_solution_value()
            .ok_or(Error::NotInitialized)
    }
}
