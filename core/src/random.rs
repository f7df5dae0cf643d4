//! Pluggable uniform integer generation.
//!
//! Every randomized decision in the simulation (map tiles, wandering,
//! spawn placement, floating text jitter and eviction) draws from a single
//! [`RandomSource`] passed down explicitly, so the call order alone
//! determines a run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform integer generator consumed in a strict, caller-determined order.
pub trait RandomSource {
    /// Uniform value in `minimum..=maximum`.
    fn generate_i32(&mut self, minimum: i32, maximum: i32) -> i32;

    /// Uniform value in `minimum..=maximum`.
    fn generate_size(&mut self, minimum: usize, maximum: usize) -> usize;
}

/// Seeded generator backed by ChaCha8, replayable from its seed.
#[derive(Clone, Debug)]
pub struct ChaChaRandom {
    rng: ChaCha8Rng,
}

impl ChaChaRandom {
    /// Creates a generator whose whole sequence is determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for ChaChaRandom {
    fn generate_i32(&mut self, minimum: i32, maximum: i32) -> i32 {
        if minimum >= maximum {
            return minimum;
        }
        self.rng.gen_range(minimum..=maximum)
    }

    fn generate_size(&mut self, minimum: usize, maximum: usize) -> usize {
        if minimum >= maximum {
            return minimum;
        }
        self.rng.gen_range(minimum..=maximum)
    }
}

/// Replays a fixed script of values, for forcing exact branches in tests.
///
/// Each draw takes the next scripted value and clamps it into the requested
/// range. Once the script runs out, draws return the range minimum.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    values: std::collections::VecDeque<i64>,
    draws: usize,
}

#[cfg(any(test, feature = "test-support"))]
impl ScriptedRandom {
    /// Creates a source that yields `values` in order.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            draws: 0,
        }
    }

    /// Creates a source that always yields the range minimum.
    #[must_use]
    pub fn minimums() -> Self {
        Self::default()
    }

    /// Number of draws served so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.draws
    }

    /// Number of scripted values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn next_clamped(&mut self, minimum: i64, maximum: i64) -> i64 {
        self.draws += 1;
        match self.values.pop_front() {
            Some(value) => value.clamp(minimum, maximum.max(minimum)),
            None => minimum,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl RandomSource for ScriptedRandom {
    fn generate_i32(&mut self, minimum: i32, maximum: i32) -> i32 {
        let value = self.next_clamped(i64::from(minimum), i64::from(maximum));
        i32::try_from(value).unwrap_or(minimum)
    }

    fn generate_size(&mut self, minimum: usize, maximum: usize) -> usize {
        let low = i64::try_from(minimum).unwrap_or(i64::MAX);
        let high = i64::try_from(maximum).unwrap_or(i64::MAX);
        let value = self.next_clamped(low, high);
        usize::try_from(value).unwrap_or(minimum)
    }
}
