//! Random number generation for the connector
//!
//! Uses a seeded ChaCha RNG so a map can be rebuilt from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Uniform integer source consumed by the connector.
///
/// Every random decision [`crate::connect`] makes is a single `range_int`
/// call, so replaying the same sequence of results replays the same map.
pub trait RandomSource {
    /// Returns a value in `min_inclusive..max_exclusive`.
    ///
    /// Returns `min_inclusive` when the range is empty.
    fn range_int(&mut self, min_inclusive: i32, max_exclusive: i32) -> i32;
}

/// Connector random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - deserializing restarts the stream from the seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn range_int(&mut self, min_inclusive: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min_inclusive {
            return min_inclusive;
        }
        self.rng.gen_range(min_inclusive..max_exclusive)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Pick an index into a list of `len` items.
pub(crate) fn pick_index(rng: &mut impl RandomSource, len: usize) -> usize {
    let upper = i32::try_from(len).unwrap_or(i32::MAX);
    rng.range_int(0, upper).clamp(0, upper.saturating_sub(1).max(0)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_int_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let n = rng.range_int(-3, 4);
            assert!((-3..4).contains(&n));
        }
    }

    #[test]
    fn test_range_int_empty_range() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.range_int(5, 5), 5);
        assert_eq!(rng.range_int(5, 2), 5);
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.range_int(0, 100), rng2.range_int(0, 100));
        }
    }

    #[test]
    fn test_serde_restarts_from_seed() {
        let rng = GameRng::new(99);
        let json = serde_json::to_string(&rng).unwrap();
        assert_eq!(json, "99");
        let restored: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed(), 99);
    }

    #[test]
    fn test_pick_index_stays_in_range() {
        let mut rng = GameRng::new(11);
        for len in 1..20 {
            assert!(pick_index(&mut rng, len) < len);
        }
        assert_eq!(pick_index(&mut rng, 0), 0);
    }
}
