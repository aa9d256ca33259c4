//! Dynamic Peaks Example
//!
//! Tracks the moving optimum of a DF1 landscape with charged local-best PSO.
//! Set `RUST_LOG=swarm_pso=debug` to watch the run.

use rand::rngs::StdRng;
use rand::SeedableRng;
use swarm_pso::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Swarm PSO Dynamic Peaks Example");
    println!("===============================");

    let params = DfParameters {
        dimensions: 2,
        peak_count: 8,
        ..DfParameters::default()
    };
    let mut rng = StdRng::seed_from_u64(2024);
    let problem = Df1::new(params, &mut rng)?;

    let config = EngineConfigBuilder::new()
        .swarm_size(24)
        .max_iterations(300)
        .charged_local_best(ChargeConfig {
            charge: 0.1,
            interaction_radius: 0.4,
            epsilon: 1e-6,
        })
        .max_velocity(0.25)
        .seed(2024)
        .build();

    println!("Configuration:");
    println!("  Swarm size: {}", config.swarm_size);
    println!("  Topology: {:?}", config.topology);

    let mut runner = Runner::new(Engine::new(problem, config)?);
    let summary = runner.run()?;

    println!("\nGenerations: {}", summary.generations);
    println!("Best fitness: {:.4}", summary.best.fitness);
    println!("Best position: {:?}", summary.best.position);
    println!("\n{}", summary.to_json()?);

    Ok(())
}
