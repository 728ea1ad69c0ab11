use anyhow::{bail, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::skiplist_options::{DEFAULT_MAX_LEVELS, DEFAULT_PROMOTION_PROBABILITY};

/// Picks the tower height of a freshly inserted node.
pub trait LevelGenerator {
    /// Largest level this generator will ever return.
    fn total(&self) -> usize;

    /// A level in `1..=total()`.
    fn random(&mut self) -> usize;
}

/// Geometric heights: every node starts at level 1 and is promoted one level
/// at a time with probability `p`, stopping at `total`.
///
/// The rng is seeded once and reused for every draw.
pub struct GeometricLevelGenerator {
    total: usize,
    p: f64,
    rng: StdRng,
}

impl GeometricLevelGenerator {
    pub fn new(total: usize, p: f64) -> Result<Self> {
        Self::with_rng(total, p, StdRng::from_entropy())
    }

    pub fn with_seed(total: usize, p: f64, seed: u64) -> Result<Self> {
        Self::with_rng(total, p, StdRng::seed_from_u64(seed))
    }

    fn with_rng(total: usize, p: f64, rng: StdRng) -> Result<Self> {
        if total == 0 {
            bail!("level generator needs at least one level");
        }
        if !(p > 0.0 && p < 1.0) {
            bail!("promotion probability must be in (0, 1), got {}", p);
        }
        Ok(Self { total, p, rng })
    }
}

impl Default for GeometricLevelGenerator {
    fn default() -> Self {
        Self {
            total: DEFAULT_MAX_LEVELS,
            p: DEFAULT_PROMOTION_PROBABILITY,
            rng: StdRng::from_entropy(),
        }
    }
}

impl LevelGenerator for GeometricLevelGenerator {
    fn total(&self) -> usize {
        self.total
    }

    fn random(&mut self) -> usize {
        let mut level = 1;
        while level < self.total && self.rng.gen_bool(self.p) {
            level += 1;
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use super::{GeometricLevelGenerator, LevelGenerator};

    #[test]
    fn test_invalid_parameters() {
        assert!(GeometricLevelGenerator::new(0, 0.5).is_err());
        assert!(GeometricLevelGenerator::new(4, 0.0).is_err());
        assert!(GeometricLevelGenerator::new(4, 1.0).is_err());
        assert!(GeometricLevelGenerator::with_seed(4, 0.5, 7).is_ok());
    }

    #[test]
    fn test_default() {
        let mut generator = GeometricLevelGenerator::default();
        assert_eq!(generator.total(), 32);
        assert!((1..=32).contains(&generator.random()));
    }

    #[test]
    fn test_levels_within_bounds() {
        let mut generator = GeometricLevelGenerator::with_seed(4, 0.9, 1).unwrap();
        assert_eq!(generator.total(), 4);
        for _ in 0..10_000 {
            let level = generator.random();
            assert!((1..=4).contains(&level));
        }

        // a single level leaves nothing to promote to
        let mut flat = GeometricLevelGenerator::new(1, 0.5).unwrap();
        for _ in 0..100 {
            assert_eq!(flat.random(), 1);
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = GeometricLevelGenerator::with_seed(32, 0.5, 42).unwrap();
        let mut b = GeometricLevelGenerator::with_seed(32, 0.5, 42).unwrap();
        let draws_a: Vec<usize> = (0..256).map(|_| a.random()).collect();
        let draws_b: Vec<usize> = (0..256).map(|_| b.random()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_geometric_distribution() {
        let n = 100_000;
        let mut generator = GeometricLevelGenerator::with_seed(32, 0.5, 2024).unwrap();
        let mut histogram = [0usize; 33];
        for _ in 0..n {
            histogram[generator.random()] += 1;
        }
        // expect ~1/2 at level 1, ~1/4 at level 2, ~1/8 at level 3
        let share = |level: usize| histogram[level] as f64 / n as f64;
        assert!((share(1) - 0.5).abs() < 0.02);
        assert!((share(2) - 0.25).abs() < 0.02);
        assert!((share(3) - 0.125).abs() < 0.02);
        assert_eq!(histogram[0], 0);
    }
}
