use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Deterministic random source for the whole simulation.
///
/// Serialized with the save state so a loaded game replays the same draws.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        self.state
    }

    /// Uniform draw in `0..bound`. A zero bound yields zero.
    pub fn roll(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.next_u64() % bound
    }

    /// Uniform inclusive draw in `lo..=hi`.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if lo >= hi {
            return lo;
        }
        let span = (hi - lo) as u64 + 1;
        lo + self.roll(span) as i32
    }

    /// Symmetric perturbation in `-spread..=spread`.
    pub fn jitter(&mut self, spread: i32) -> i32 {
        self.range_i32(-spread, spread)
    }

    /// True with the given percent probability.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.roll(100) < percent as u64
    }
}

/// FNV-1a over a string, used to fold labels into seeds.
pub fn hash_seed(value: &str) -> u64 {
    let mut hash = 1469598103934665603u64;
    for byte in value.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(1099511628211);
    }
    hash
}

/// Rarity-weighted draw over a slice of weights (each treated as at least 1).
/// Returns the index whose cumulative weight first crosses the roll.
pub fn weighted_index(weights: &[u32], rng: &mut SimRng) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    let total: u64 = weights.iter().map(|w| (*w).max(1) as u64).sum();
    let roll = rng.roll(total);
    let mut acc = 0u64;
    for (idx, weight) in weights.iter().enumerate() {
        acc += (*weight).max(1) as u64;
        if roll < acc {
            return Some(idx);
        }
    }
    Some(weights.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn range_is_inclusive_and_bounded() {
        let mut rng = SimRng::new(99);
        for _ in 0..200 {
            let v = rng.range_i32(-3, 3);
            assert!((-3..=3).contains(&v));
        }
    }

    #[test]
    fn weighted_index_stays_in_bounds() {
        let mut rng = SimRng::new(42);
        let weights = [10, 1, 4];
        for _ in 0..100 {
            let idx = weighted_index(&weights, &mut rng).unwrap();
            assert!(idx < weights.len());
        }
        assert_eq!(weighted_index(&[], &mut rng), None);
    }

    #[test]
    fn weighted_index_tracks_weight_ratio() {
        let mut rng = SimRng::new(1234);
        let weights = [90, 10];
        let mut heavy = 0u32;
        for _ in 0..10_000 {
            if weighted_index(&weights, &mut rng) == Some(0) {
                heavy += 1;
            }
        }
        // 9:1 ratio with a generous statistical margin.
        assert!(heavy > 8_500 && heavy < 9_500, "heavy = {}", heavy);
    }
}
