use crate::Generator;
use codemint_core::{Code, Prefix, ALPHABET, CODE_LENGTH};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Draws every suffix symbol uniformly from `A-Z0-9`, with replacement.
///
/// This is not a cryptographic identifier scheme. Uniqueness comes only from
/// the registry check done by the sampler.
#[derive(Debug, Clone)]
pub struct RandomGenerator<R: Rng = ThreadRng> {
    rng: R,
}

impl RandomGenerator<ThreadRng> {
    /// Creates a generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomGenerator<StdRng> {
    /// Creates a reproducible generator. Same seed, same candidate stream.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Generator for RandomGenerator<R> {
    fn generate(&mut self, prefix: &Prefix, suffix_len: usize) -> Code {
        let mut code = String::with_capacity(CODE_LENGTH);
        code.push_str(prefix.as_str());
        code.extend((0..suffix_len).map(|_| {
            let idx = self.rng.random_range(0..ALPHABET.len());
            char::from(ALPHABET[idx])
        }));
        Code::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_have_prefix_and_width() {
        let prefix = Prefix::parse("XYZ12").unwrap();
        let mut generator = RandomGenerator::new();

        for _ in 0..100 {
            let code = generator.generate(&prefix, 11);
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert!(code.starts_with(&prefix));
            assert!(Code::new(code.as_str()).is_ok());
        }
    }

    #[test]
    fn seeded_generators_repeat() {
        let prefix = Prefix::parse("ABC").unwrap();
        let mut first = RandomGenerator::seeded(42);
        let mut second = RandomGenerator::seeded(42);

        for _ in 0..10 {
            assert_eq!(first.generate(&prefix, 13), second.generate(&prefix, 13));
        }
    }

    #[test]
    fn explicit_rng_matches_seeded() {
        let prefix = Prefix::parse("ABC").unwrap();
        let mut seeded = RandomGenerator::seeded(9);
        let mut explicit = RandomGenerator::with_rng(StdRng::seed_from_u64(9));

        for _ in 0..10 {
            assert_eq!(seeded.generate(&prefix, 13), explicit.generate(&prefix, 13));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let prefix = Prefix::parse("ABC").unwrap();
        let a = RandomGenerator::seeded(1).generate(&prefix, 13);
        let b = RandomGenerator::seeded(2).generate(&prefix, 13);
        assert_ne!(a, b);
    }
}
