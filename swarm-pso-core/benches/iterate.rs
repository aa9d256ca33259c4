use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swarm_pso_core::prelude::*;
use swarm_pso_core::Result;

struct Rastrigin {
    dims: usize,
}

impl Problem for Rastrigin {
    fn dimensions(&self) -> usize {
        self.dims
    }
    fn lower_bound(&self, _dim: usize) -> f64 {
        -5.12
    }
    fn upper_bound(&self, _dim: usize) -> f64 {
        5.12
    }
    fn fitness(&self, position: &[f64]) -> Result<f64> {
        let sum: f64 = position
            .iter()
            .map(|x| x * x - 10.0 * (2.0 * std::f64::consts::PI * x).cos())
            .sum();
        Ok(10.0 * self.dims as f64 + sum)
    }
}

fn engine(swarm_size: usize, charge: Option<ChargeConfig>) -> Engine<Rastrigin> {
    let config = EngineConfig {
        swarm_size,
        max_iterations: Some(1_000),
        topology: TopologyKind::ring(1),
        charge,
        seed: Some(7),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(Rastrigin { dims: 10 }, config).unwrap();
    engine.init().unwrap();
    engine
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for &swarm_size in &[10usize, 50, 100] {
        group.bench_with_input(BenchmarkId::new("plain", swarm_size), &swarm_size, |b, &n| {
            let mut engine = engine(n, None);
            b.iter(|| engine.iterate(black_box(0)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("charged", swarm_size), &swarm_size, |b, &n| {
            let mut engine = engine(n, Some(ChargeConfig::default()));
            b.iter(|| engine.iterate(black_box(0)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
