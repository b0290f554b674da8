use std::f32::consts::TAU;

use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Seedable random source shared by zone generation, enemy wandering and
/// combat rolls. Two instances built from the same seed yield the same
/// sequence.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    pub fn random_bool(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Uniform heading in `[0, 2π)`.
    pub fn angle(&mut self) -> f32 {
        self.unit() * TAU
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            let index = self.random_range(0..items.len());
            items.get(index)
        }
    }
}
