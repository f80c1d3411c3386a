//! Seeded, reproducible randomness for tests and deterministic ID generation.

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Wraps a seeded PRNG so the same seed always yields the same sequence.
pub struct DeterministicRng {
    rng: StdRng,
}

impl DeterministicRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn random_u64(&mut self) -> u64 {
        self.rng.random()
    }

    #[must_use]
    pub fn random_string(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = DeterministicRng::new(1);
        let mut b = DeterministicRng::new(1);
        assert_eq!(a.random_u64(), b.random_u64());
    }

    #[test]
    fn string_has_requested_length() {
        let mut rng = DeterministicRng::new(9);
        assert_eq!(rng.random_string(10).len(), 10);
    }
}
