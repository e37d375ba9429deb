//! The seeded generator.
//!
//! A small two-word multiply-with-carry generator operating on 32-bit
//! integers. It is deliberately hand-rolled rather than delegated to a
//! library RNG: the tracker derives a separate sub-stream per (round,
//! creature, choice) by seed arithmetic, and the exact integer recurrence is
//! part of the contract — the same seed must yield the same rolls on every
//! platform, forever.

use rand::Rng;

use crate::error::{DiceError, DiceResult};

const W_BASE: i64 = 123_456_789;
const Z_BASE: i64 = 987_654_321;

/// A deterministic dice generator keyed by an integer seed.
///
/// `seed` derives an independent generator without touching the receiver;
/// `roll` advances the receiver's internal stream. Two generators never
/// share state, so rolls drawn from one can never affect another.
#[derive(Debug, Clone)]
pub struct Dice {
    base: i64,
    w: u32,
    z: u32,
}

impl Dice {
    /// Create a generator from an explicit seed.
    pub fn seeded(seed: i64) -> Self {
        Self {
            base: seed,
            // Truncation to u32 is the masking step: both words live in
            // 32 bits regardless of the seed's magnitude or sign.
            w: W_BASE.wrapping_add(seed) as u32,
            z: Z_BASE.wrapping_sub(seed) as u32,
        }
    }

    /// Create a generator with a seed drawn from system randomness.
    ///
    /// The seed lands in `0..=10_000`, small enough to read back and share
    /// for a reproducible re-run.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::rng().random_range(0..=10_000))
    }

    /// The base seed this generator was created with.
    pub fn base_seed(&self) -> i64 {
        self.base
    }

    /// Derive a new, independent generator seeded with `base + offset`.
    ///
    /// Does not mutate or observe the receiver's rolling state, so derived
    /// streams are reproducible no matter how many rolls the parent has
    /// already made.
    pub fn seed(&self, offset: i64) -> Self {
        Self::seeded(self.base.wrapping_add(offset))
    }

    /// Roll a die with the given number of sides, returning a value in
    /// `1..=sides` and advancing the internal stream.
    pub fn roll(&mut self, sides: u32) -> DiceResult<u32> {
        if sides == 0 {
            return Err(DiceError::InvalidSides(sides));
        }
        let uniform = self.next_f64();
        // ceil maps [0, 1) onto 0..=sides; the max(1) pins the one-in-2^32
        // zero draw onto the die's lower face.
        Ok(((uniform * f64::from(sides)).ceil() as u32).max(1))
    }

    /// Advance both carry words and combine them into a 32-bit draw.
    fn next_u32(&mut self) -> u32 {
        self.z = 36_969u32
            .wrapping_mul(self.z & 0xffff)
            .wrapping_add(self.z >> 16);
        self.w = 18_000u32
            .wrapping_mul(self.w & 0xffff)
            .wrapping_add(self.w >> 16);
        (self.z << 16).wrapping_add(self.w & 0xffff)
    }

    /// A uniform draw in `[0, 1)` — the only floating-point step.
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}
