//! Randomness for the step engine
//!
//! The engine only ever needs unit-interval draws, so it depends on this
//! small trait instead of a concrete generator. Tests plug in fixed sources.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform draw in `[min, max]`
    fn between(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_unit() * (max - min)
    }
}

/// Seeded PCG generator used by sessions
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Always returns the same value
#[derive(Debug, Clone, Copy)]
pub struct FixedUnit(pub f32);

impl RandomSource for FixedUnit {
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}
