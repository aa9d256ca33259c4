//! Property-based tests for the swarm engine
//!
//! These tests check invariants that must hold for any seed, bounds or swarm
//! shape, using randomized testing with proptest.

use proptest::prelude::*;
use swarm_pso::prelude::*;

/// Shifted sphere over a box with configurable bounds
struct Bowl {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Problem for Bowl {
    fn dimensions(&self) -> usize {
        self.lower.len()
    }
    fn lower_bound(&self, dim: usize) -> f64 {
        self.lower[dim]
    }
    fn upper_bound(&self, dim: usize) -> f64 {
        self.upper[dim]
    }
    fn fitness(&self, position: &[f64]) -> swarm_pso::Result<f64> {
        Ok(position.iter().map(|x| (x - 1.0) * (x - 1.0)).sum())
    }
}

fn bounds() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((-100.0_f64..100.0, 0.0_f64..50.0), 1..6).prop_map(|dims| {
        dims.into_iter()
            .map(|(lower, width)| (lower, lower + width))
            .unzip()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn init_positions_within_bounds((lower, upper) in bounds(), seed in any::<u64>(), size in 1usize..20) {
        let problem = Bowl { lower: lower.clone(), upper: upper.clone() };
        let config = EngineConfigBuilder::new()
            .swarm_size(size)
            .max_iterations(10)
            .seed(seed)
            .build();
        let mut engine = Engine::new(problem, config).unwrap();
        engine.init().unwrap();

        prop_assert_eq!(engine.particles().len(), size);
        for particle in engine.particles() {
            for (i, &x) in particle.position().iter().enumerate() {
                prop_assert!(x >= lower[i] && x <= upper[i]);
            }
        }
    }

    #[test]
    fn positions_stay_within_bounds_while_iterating(
        (lower, upper) in bounds(),
        seed in any::<u64>(),
        radius in 1usize..4,
    ) {
        let problem = Bowl { lower: lower.clone(), upper: upper.clone() };
        let config = EngineConfigBuilder::new()
            .swarm_size(8)
            .max_iterations(15)
            .charged_local_best(ChargeConfig { charge: 2.0, interaction_radius: 10.0, epsilon: 1e-6 })
            .topology(TopologyKind::ring(radius))
            .seed(seed)
            .build();
        let mut engine = Engine::new(problem, config).unwrap();
        engine.init().unwrap();

        for elapsed in 0..15 {
            engine.iterate(elapsed).unwrap();
            for particle in engine.particles() {
                for (i, &x) in particle.position().iter().enumerate() {
                    prop_assert!(x >= lower[i] && x <= upper[i]);
                }
            }
        }
    }

    #[test]
    fn global_best_is_monotone((lower, upper) in bounds(), seed in any::<u64>()) {
        let problem = Bowl { lower, upper };
        let config = EngineConfigBuilder::new()
            .swarm_size(10)
            .max_iterations(20)
            .seed(seed)
            .build();
        let mut engine = Engine::new(problem, config).unwrap();
        engine.init().unwrap();

        let mut last = engine.best_solution_value().unwrap();
        for elapsed in 0..20 {
            engine.iterate(elapsed).unwrap();
            let best = engine.best_solution_value().unwrap();
            prop_assert!(best <= last);
            for particle in engine.particles() {
                prop_assert!(best <= particle.best_fitness());
            }
            last = best;
        }
    }

    #[test]
    fn repulsion_vanishes_beyond_radius(
        gap in 2.0001_f64..1000.0,
        q1 in 0.0_f64..100.0,
        q2 in 0.0_f64..100.0,
    ) {
        let repulsion = Repulsion::new(2.0, 1e-9).unwrap();
        let force = repulsion.pairwise(&[0.0, 0.0], q1, &[gap, 0.0], q2);
        prop_assert_eq!(force, vec![0.0, 0.0]);
    }

    #[test]
    fn ring_neighborhood_wraps(len in 1usize..40, radius in 1usize..5, index in 0usize..40) {
        let index = index % len;
        let ring = LocalBest::new(radius).unwrap();
        let neighbors: Vec<usize> = ring.neighborhood(len, index).collect();

        prop_assert_eq!(neighbors.len(), 2 * radius + 1);
        prop_assert!(neighbors.iter().all(|&n| n < len));
        prop_assert_eq!(neighbors[radius], index);
        prop_assert_eq!(neighbors[radius - 1], (index + len - 1) % len);
        prop_assert_eq!(neighbors[radius + 1], (index + 1) % len);
    }
}
