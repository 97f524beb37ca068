use crate::Generator;
use codemint_core::{Code, Prefix, CODE_LENGTH};

const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A deterministic generator counting through the suffix space in base 36.
///
/// This generator produces codes like "ABC0000000000000", "ABC0000000000001",
/// etc. The counter wraps once it runs past the last suffix of the requested
/// width, so it keeps producing candidates (and collisions) forever.
///
/// Useful for reproducible output and for exercising the sampler against a
/// known candidate stream.
#[derive(Debug, Clone, Default)]
pub struct SeqGenerator {
    counter: u64,
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(offset: u64) -> Self {
        Self { counter: offset }
    }

    fn encode(mut value: u64, width: usize) -> String {
        let mut digits = vec![b'0'; width];
        for slot in digits.iter_mut().rev() {
            *slot = DIGITS[(value % 36) as usize];
            value /= 36;
        }
        // Every byte comes from DIGITS, which is ASCII.
        digits.into_iter().map(char::from).collect()
    }
}

impl Generator for SeqGenerator {
    fn generate(&mut self, prefix: &Prefix, suffix_len: usize) -> Code {
        let space = u32::try_from(suffix_len)
            .ok()
            .and_then(|width| 36_u64.checked_pow(width));
        let value = match space {
            Some(space) => self.counter % space,
            None => self.counter,
        };
        self.counter = self.counter.wrapping_add(1);

        let mut code = String::with_capacity(CODE_LENGTH);
        code.push_str(prefix.as_str());
        code.push_str(&Self::encode(value, suffix_len));
        Code::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(s: &str) -> Prefix {
        Prefix::parse(s).unwrap()
    }

    #[test]
    fn seq_generator_produces_sequential_codes() {
        let mut generator = SeqGenerator::new();
        let prefix = prefix("ABC");

        assert_eq!(generator.generate(&prefix, 13).as_str(), "ABC0000000000000");
        assert_eq!(generator.generate(&prefix, 13).as_str(), "ABC0000000000001");
        assert_eq!(generator.generate(&prefix, 13).as_str(), "ABC0000000000002");
    }

    #[test]
    fn seq_generator_with_offset() {
        let mut generator = SeqGenerator::with_offset(36);
        let prefix = prefix("ABCDEFGH");

        assert_eq!(generator.generate(&prefix, 8).as_str(), "ABCDEFGH00000010");
        assert_eq!(generator.generate(&prefix, 8).as_str(), "ABCDEFGH00000011");
    }

    #[test]
    fn seq_generator_uses_letters_after_nine() {
        let mut generator = SeqGenerator::with_offset(35);
        assert_eq!(
            generator.generate(&prefix("ABC"), 13).as_str(),
            "ABC000000000000Z"
        );
    }

    #[test]
    fn seq_generator_wraps_at_width() {
        let mut generator = SeqGenerator::with_offset(36 * 36 - 1);
        let prefix = prefix("ABC");

        assert_eq!(generator.generate(&prefix, 2).as_str(), "ABCZZ");
        assert_eq!(generator.generate(&prefix, 2).as_str(), "ABC00");
    }

    #[test]
    fn clone_preserves_counter_state() {
        let mut generator = SeqGenerator::new();
        let prefix = prefix("ABC");
        generator.generate(&prefix, 13);
        generator.generate(&prefix, 13);

        let mut cloned = generator.clone();

        assert_eq!(generator.generate(&prefix, 13).as_str(), "ABC0000000000002");
        assert_eq!(cloned.generate(&prefix, 13).as_str(), "ABC0000000000002");
    }
}
