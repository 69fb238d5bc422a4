//! Environment abstraction for deterministic testing.
//!
//! The only ambient resource the round session needs is randomness (rack
//! shuffles). Production uses [`SystemEnv`]; simulation harnesses supply a
//! seeded implementation so shuffles are reproducible.

use rand::RngCore;

/// Abstract environment providing randomness.
///
/// # Invariants
///
/// - Given the same seed, a simulation implementation produces the same
///   sequence of bytes.
/// - `random_index(bound)` is uniform over `0..bound`.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Generates a uniform index in `0..bound`.
    ///
    /// Uses rejection sampling so small bounds carry no modulo bias. Returns 0
    /// when `bound` is 0 or 1.
    fn random_index(&self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }

        let bound = bound as u64;
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let candidate = self.random_u64();
            if candidate < zone {
                return (candidate % bound) as usize;
            }
        }
    }
}

/// Production environment backed by the thread-local `rand` generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        rand::rng().fill_bytes(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct CountingEnv;

    impl Environment for CountingEnv {
        fn random_bytes(&self, buffer: &mut [u8]) {
            for (i, byte) in buffer.iter_mut().enumerate() {
                *byte = i as u8;
            }
        }
    }

    #[test]
    fn random_index_stays_in_bounds() {
        for bound in 1..=7 {
            assert!(CountingEnv.random_index(bound) < bound);
            assert!(SystemEnv.random_index(bound) < bound);
        }
    }

    #[test]
    fn degenerate_bound_is_zero() {
        assert_eq!(SystemEnv.random_index(0), 0);
        assert_eq!(SystemEnv.random_index(1), 0);
    }
}
