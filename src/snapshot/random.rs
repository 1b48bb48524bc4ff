//! Entropy for percentage-based feature flags.

use rand::Rng;

/// Source of uniformly distributed draws in `[0, 100)`.
pub trait RandomSource: Send + Sync {
    fn next_percent(&self) -> u64;
}

/// Draws from the calling thread's `rand::thread_rng()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_percent(&self) -> u64 {
        rand::thread_rng().gen_range(0..100)
    }
}

/// Always returns the same draw. Useful for pinning flag decisions in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub u64);

impl RandomSource for FixedRandom {
    fn next_percent(&self) -> u64 {
        self.0 % 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_range() {
        for _ in 0..1000 {
            assert!(ThreadRandom.next_percent() < 100);
        }
    }

    #[test]
    fn test_fixed_random_wraps() {
        assert_eq!(FixedRandom(42).next_percent(), 42);
        assert_eq!(FixedRandom(142).next_percent(), 42);
    }
}
