pub mod random;
pub mod sampler;
pub mod seq;

pub use random::RandomGenerator;
pub use sampler::{generate_codes, Generation, Sampler, ATTEMPTS_PER_CODE};
pub use seq::SeqGenerator;

use codemint_core::{Code, Prefix};

/// Trait for producing candidate codes.
///
/// Implementations are pure generators that don't look at any registry;
/// a candidate may collide with an issued code or with an earlier candidate.
/// Rejecting collisions is the job of [`generate_codes`].
pub trait Generator {
    /// Produces one candidate made of `prefix` and `suffix_len` more symbols.
    fn generate(&mut self, prefix: &Prefix, suffix_len: usize) -> Code;
}

impl<G: Generator + ?Sized> Generator for &mut G {
    fn generate(&mut self, prefix: &Prefix, suffix_len: usize) -> Code {
        (**self).generate(prefix, suffix_len)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&mut self, prefix: &Prefix, suffix_len: usize) -> Code {
        (**self).generate(prefix, suffix_len)
    }
}
