use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
///
/// Callers that need randomness take `&mut impl RandomSource` instead of
/// reaching for a global generator, so tests can pin the outcome.
pub trait RandomSource {
    /// Returns an index in `0..upper`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Thread-local generator, seeded by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::rng().random_range(0..upper)
    }
}

/// Deterministic generator for reproducible picks.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Replays a fixed list of indices, wrapping each into range.
/// Cycles back to the start once exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    script: Vec<usize>,
    position: usize,
}

impl ScriptedRandom {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, position: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.position % self.script.len()];
        self.position += 1;
        value % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let mut source = ThreadRandom;
        for upper in 1..50 {
            assert!(source.next_index(upper) < upper);
        }
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut first = SeededRandom::from_seed(42);
        let mut second = SeededRandom::from_seed(42);

        let a: Vec<usize> = (0..20).map(|_| first.next_index(26)).collect();
        let b: Vec<usize> = (0..20).map(|_| second.next_index(26)).collect();

        assert_eq!(a, b);
        assert!(a.iter().all(|&i| i < 26));
    }

    #[test]
    fn test_scripted_random_wraps() {
        let mut source = ScriptedRandom::new(vec![1, 7, 2]);

        assert_eq!(source.next_index(5), 1);
        assert_eq!(source.next_index(5), 2); // 7 % 5
        assert_eq!(source.next_index(5), 2);
        assert_eq!(source.next_index(5), 1); // cycles
    }

    #[test]
    fn test_scripted_random_empty_script() {
        let mut source = ScriptedRandom::new(Vec::new());
        assert_eq!(source.next_index(3), 0);
    }
}
