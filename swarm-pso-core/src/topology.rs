//! Neighborhood topologies
//!
//! A topology decides which particles count as a particle's neighborhood for
//! the social term of the velocity update. Topologies are stateless: they only
//! read the personal bests of the swarm they are handed.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::traits::Problem;
use crate::{Error, Result};

/// Strategy returning the best-informed neighbor of a particle
pub trait Topology: fmt::Debug + Send + Sync {
    /// Index of the particle whose personal best leads `index`'s neighborhood
    fn best_neighbor(&self, swarm: &[Particle], index: usize, problem: &dyn Problem)
        -> Result<usize>;

    /// Human-readable name
    fn name(&self) -> &'static str;
}

/// Star topology: every particle is informed by the swarm-wide best
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalBest;

impl Topology for GlobalBest {
    fn best_neighbor(
        &self,
        swarm: &[Particle],
        index: usize,
        problem: &dyn Problem,
    ) -> Result<usize> {
        check_index(swarm, index)?;
        let mut best = 0;
        for (j, particle) in swarm.iter().enumerate().skip(1) {
            if problem.is_better(particle.best_fitness(), swarm[best].best_fitness()) {
                best = j;
            }
        }
        Ok(best)
    }

    fn name(&self) -> &'static str {
        "global-best"
    }
}

/// Ring topology: `radius` neighbors on each side, wrapping at the ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalBest {
    radius: usize,
}

impl LocalBest {
    /// Create a ring topology. The radius must be at least one.
    pub fn new(radius: usize) -> Result<Self> {
        if radius == 0 {
            return Err(Error::InvalidParameter {
                name: "radius",
                value: 0.0,
            });
        }
        Ok(Self { radius })
    }

    /// Neighbors on each side
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Ring indices visited for `index`, from `index - radius` to `index + radius`.
    /// Empty for an empty ring.
    pub fn neighborhood(&self, len: usize, index: usize) -> impl Iterator<Item = usize> {
        let radius = self.radius as isize;
        let center = index as isize;
        let offsets = if len == 0 { 1..=0 } else { -radius..=radius };
        let len = len as isize;
        offsets.map(move |offset| (center + offset).rem_euclid(len) as usize)
    }
}

impl Topology for LocalBest {
    fn best_neighbor(
        &self,
        swarm: &[Particle],
        index: usize,
        problem: &dyn Problem,
    ) -> Result<usize> {
        check_index(swarm, index)?;
        let mut neighbors = self.neighborhood(swarm.len(), index);
        let mut best = neighbors.next().unwrap_or(index);
        for j in neighbors {
            if problem.is_better(swarm[j].best_fitness(), swarm[best].best_fitness()) {
                best = j;
            }
        }
        Ok(best)
    }

    fn name(&self) -> &'static str {
        "local-best-ring"
    }
}

/// Serializable topology selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TopologyKind {
    /// Global best (star)
    Global,
    /// Local best over a ring of the given radius
    Ring {
        /// Neighbors on each side
        radius: usize,
    },
}

impl Default for TopologyKind {
    fn default() -> Self {
        Self::Global
    }
}

impl TopologyKind {
    /// Create a ring topology selection
    pub fn ring(radius: usize) -> Self {
        Self::Ring { radius }
    }

    /// Instantiate the strategy
    pub fn build(self) -> Result<Box<dyn Topology>> {
        match self {
            TopologyKind::Global => Ok(Box::new(GlobalBest)),
            TopologyKind::Ring { radius } => Ok(Box::new(LocalBest::new(radius)?)),
        }
    }
}

fn check_index(swarm: &[Particle], index: usize) -> Result<()> {
    if index >= swarm.len() {
        return Err(Error::IndexOutOfRange {
            index,
            len: swarm.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Minimize;

    impl Problem for Minimize {
        fn dimensions(&self) -> usize {
            1
        }
        fn lower_bound(&self, _dim: usize) -> f64 {
            -10.0
        }
        fn upper_bound(&self, _dim: usize) -> f64 {
            10.0
        }
        fn fitness(&self, position: &[f64]) -> Result<f64> {
            Ok(position[0].abs())
        }
    }

    fn swarm_with_best(fitness: &[f64]) -> Vec<Particle> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut p = Particle::new(1);
                p.set_best_position(vec![i as f64], f).unwrap();
                p
            })
            .collect()
    }

    #[test]
    fn global_best_is_same_for_every_index() {
        let swarm = swarm_with_best(&[4.0, 1.0, 3.0, 2.0]);
        for index in 0..swarm.len() {
            assert_eq!(GlobalBest.best_neighbor(&swarm, index, &Minimize), Ok(1));
        }
    }

    #[test]
    fn ring_neighbor_can_differ_per_index() {
        let swarm = swarm_with_best(&[4.0, 1.0, 3.0, 2.0]);
        let ring = LocalBest::new(1).unwrap();

        let picks: Vec<usize> = (0..4)
            .map(|i| ring.best_neighbor(&swarm, i, &Minimize).unwrap())
            .collect();
        // index 2 sees {1, 2, 3}; index 3 sees {2, 3, 0}
        assert_eq!(picks, vec![1, 1, 1, 3]);
    }

    #[test]
    fn ring_wraps_at_both_ends() {
        let ring = LocalBest::new(1).unwrap();
        assert_eq!(ring.neighborhood(5, 0).collect::<Vec<_>>(), vec![4, 0, 1]);
        assert_eq!(ring.neighborhood(5, 4).collect::<Vec<_>>(), vec![3, 4, 0]);
        assert_eq!(ring.neighborhood(0, 0).count(), 0);

        let swarm = swarm_with_best(&[5.0, 5.0, 5.0, 5.0, 0.5]);
        assert_eq!(ring.best_neighbor(&swarm, 0, &Minimize), Ok(4));
        let swarm = swarm_with_best(&[0.5, 5.0, 5.0, 5.0, 5.0]);
        assert_eq!(ring.best_neighbor(&swarm, 4, &Minimize), Ok(0));
    }

    #[test]
    fn ties_keep_first_found() {
        let swarm = swarm_with_best(&[1.0, 1.0, 1.0]);
        assert_eq!(GlobalBest.best_neighbor(&swarm, 2, &Minimize), Ok(0));

        let ring = LocalBest::new(1).unwrap();
        // scan for index 1 starts at index 0
        assert_eq!(ring.best_neighbor(&swarm, 1, &Minimize), Ok(0));
        // scan for index 0 starts at the last index
        assert_eq!(ring.best_neighbor(&swarm, 0, &Minimize), Ok(2));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let swarm = swarm_with_best(&[1.0, 2.0]);
        let err = Err(Error::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(GlobalBest.best_neighbor(&swarm, 2, &Minimize), err);
        assert_eq!(
            LocalBest::new(1).unwrap().best_neighbor(&swarm, 2, &Minimize),
            err
        );
        assert!(GlobalBest.best_neighbor(&[], 0, &Minimize).is_err());
    }

    #[test]
    fn zero_radius_is_a_configuration_error() {
        assert!(LocalBest::new(0).is_err());
        assert!(TopologyKind::ring(0).build().is_err());
        assert_eq!(TopologyKind::ring(2).build().unwrap().name(), "local-best-ring");
    }
}
