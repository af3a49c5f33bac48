//! Random source used while generating a particle field.
//!
//! One `SpawnContext` lives for one call to
//! [`ParticleField::generate`](crate::field::ParticleField::generate).
//! With a seed the whole field is reproducible; without one the seed is
//! drawn from the system clock, so every run looks different.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random helpers shared by the field layouts.
pub struct SpawnContext {
    /// Total number of particles being spawned.
    pub count: u32,
    seed: u64,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context for `count` particles.
    pub fn new(count: u32, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        Self {
            count,
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seed actually used, handy for reproducing a field seen on screen.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Normalized position of particle `index` in the spawn order (0.0 to 1.0).
    #[inline]
    pub fn progress(&self, index: u32) -> f32 {
        index as f32 / self.count as f32
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniformly chosen element of a non-empty slice.
    #[inline]
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Random sign, `1.0` or `-1.0` with equal odds.
    #[inline]
    pub fn random_sign(&mut self) -> f32 {
        if self.rng.gen::<bool>() {
            1.0
        } else {
            -1.0
        }
    }

    // ========== Offset helpers ==========

    /// `((u - 0.5) * randomness)^2` per axis.
    ///
    /// Squaring a centered sample folds it onto the positive side, so every
    /// component is `>= 0` and clusters near zero.
    pub fn squared_jitter(&mut self, randomness: f32) -> Vec3 {
        let mut axis = || {
            let v = (self.random() - 0.5) * randomness;
            v * v
        };
        Vec3::new(axis(), axis(), axis())
    }

    /// `u^power * sign * scale` per axis, with an independent sign per axis.
    ///
    /// Higher powers pull most samples toward zero while keeping a few
    /// outliers, which gives spiral arms a dense core and a soft edge.
    pub fn power_offset(&mut self, power: f32, scale: f32) -> Vec3 {
        let mut axis = || self.random().powf(power) * self.random_sign() * scale;
        Vec3::new(axis(), axis(), axis())
    }
}
