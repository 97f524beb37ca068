use crate::Generator;
use codemint_core::{Code, CoreError, ExistingCodes, Prefix, Progress};
use std::collections::HashSet;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Attempts granted per requested code before the sampler gives up.
pub const ATTEMPTS_PER_CODE: usize = 10;

/// Upper bound on the capacity reserved before sampling starts. Larger runs
/// grow their buffers as codes are accepted.
const PREALLOC_LIMIT: usize = 4096;

/// Outcome of one sampling run.
///
/// Running out of attempts is not an error: `codes` may hold fewer entries
/// than were requested, and callers detect that through [`Generation::shortfall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    codes: Vec<Code>,
    requested: usize,
    attempts: usize,
}

impl Generation {
    /// Accepted codes, in acceptance order. The order carries no meaning.
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    pub fn into_codes(self) -> Vec<Code> {
        self.codes
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// How many requested codes could not be produced.
    pub fn shortfall(&self) -> usize {
        self.requested - self.codes.len()
    }

    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }
}

/// Bounded rejection sampler.
///
/// Candidates are drawn from a [`Generator`] and accepted only when they are
/// neither in the existing set nor already accepted. Sampling stops when the
/// requested quantity is reached or after `quantity * attempts_per_code`
/// draws, whichever comes first. An optional `attempt_limit` caps the draws
/// of a single run regardless of quantity.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct Sampler {
    #[builder(default = ATTEMPTS_PER_CODE)]
    attempts_per_code: usize,
    #[builder(default, setter(strip_option))]
    attempt_limit: Option<usize>,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Sampler {
    pub fn attempts_per_code(&self) -> usize {
        self.attempts_per_code
    }

    pub fn attempt_limit(&self) -> Option<usize> {
        self.attempt_limit
    }

    /// Hard ceiling on draws for a request of `quantity` codes.
    pub fn max_attempts(&self, quantity: usize) -> usize {
        let ceiling = quantity.saturating_mul(self.attempts_per_code);
        match self.attempt_limit {
            Some(limit) => ceiling.min(limit),
            None => ceiling,
        }
    }

    pub fn run<G: Generator + ?Sized>(
        &self,
        prefix: &Prefix,
        quantity: usize,
        existing: &ExistingCodes,
        generator: &mut G,
        progress: Option<&dyn Progress>,
    ) -> Result<Generation, CoreError> {
        let suffix_len = prefix.suffix_len()?;
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity(0));
        }

        let max_attempts = self.max_attempts(quantity);
        let reserve = quantity.min(max_attempts).min(PREALLOC_LIMIT);
        let mut accepted: HashSet<Code> = HashSet::with_capacity(reserve);
        let mut codes = Vec::with_capacity(reserve);
        let mut attempts = 0;

        while codes.len() < quantity && attempts < max_attempts {
            let candidate = generator.generate(prefix, suffix_len);
            if !existing.contains(&candidate) && accepted.insert(candidate.clone()) {
                codes.push(candidate);
            }
            attempts += 1;

            if let Some(progress) = progress {
                let fraction = (codes.len() as f64 / quantity as f64).min(1.0);
                progress.report(
                    fraction,
                    &format!(
                        "Generating codes: {} / {} (Attempts: {})",
                        codes.len(),
                        quantity,
                        attempts
                    ),
                );
            }
        }

        let generation = Generation {
            codes,
            requested: quantity,
            attempts,
        };

        if generation.is_complete() {
            debug!(
                prefix = %prefix,
                generated = generation.len(),
                attempts,
                "generated codes"
            );
        } else {
            warn!(
                prefix = %prefix,
                generated = generation.len(),
                requested = quantity,
                max_attempts,
                existing = existing.len(),
                "attempt ceiling reached before the requested quantity; \
                 existing codes may be dense or the suffix space too small"
            );
        }

        Ok(generation)
    }
}

/// Generates up to `quantity` codes under `prefix` that are absent from
/// `existing` and distinct from each other, using the default ceiling of
/// [`ATTEMPTS_PER_CODE`] draws per requested code.
pub fn generate_codes<G: Generator + ?Sized>(
    prefix: &Prefix,
    quantity: usize,
    existing: &ExistingCodes,
    generator: &mut G,
    progress: Option<&dyn Progress>,
) -> Result<Generation, CoreError> {
    Sampler::default().run(prefix, quantity, existing, generator, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RandomGenerator, SeqGenerator};
    use codemint_core::CODE_LENGTH;
    use std::cell::RefCell;

    fn prefix(s: &str) -> Prefix {
        Prefix::parse(s).unwrap()
    }

    /// Cycles through a fixed list of candidates forever.
    struct Cycle {
        codes: Vec<&'static str>,
        next: usize,
    }

    impl Cycle {
        fn new(codes: Vec<&'static str>) -> Self {
            Self { codes, next: 0 }
        }
    }

    impl Generator for Cycle {
        fn generate(&mut self, _prefix: &Prefix, _suffix_len: usize) -> Code {
            let code = self.codes[self.next % self.codes.len()];
            self.next += 1;
            Code::new_unchecked(code)
        }
    }

    #[test]
    fn five_codes_for_abc() {
        let prefix = prefix("ABC");
        let mut generator = RandomGenerator::seeded(7);

        let generation =
            generate_codes(&prefix, 5, &ExistingCodes::new(), &mut generator, None).unwrap();

        assert_eq!(generation.len(), 5);
        assert!(generation.is_complete());
        let distinct: HashSet<_> = generation.codes().iter().collect();
        assert_eq!(distinct.len(), 5);
        for code in generation.codes() {
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert!(code.starts_with(&prefix));
            assert!(code.as_str()[3..]
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn every_prefix_width_fills_request() {
        for raw in ["ABC", "ABCD", "ABCDE", "ABCDEF", "ABCDEFG", "ABCDEFGH"] {
            let prefix = prefix(raw);
            let mut generator = RandomGenerator::seeded(raw.len() as u64);
            let generation =
                generate_codes(&prefix, 200, &ExistingCodes::new(), &mut generator, None)
                    .unwrap();

            assert_eq!(generation.len(), 200);
            assert!(generation
                .codes()
                .iter()
                .all(|code| code.as_str().len() == CODE_LENGTH && code.starts_with(&prefix)));
        }
    }

    #[test]
    fn skips_existing_codes() {
        let prefix = prefix("ABC");
        let existing: ExistingCodes =
            ["ABC0000000000000", "ABC0000000000001", "ABC0000000000003"]
                .into_iter()
                .collect();
        let mut generator = SeqGenerator::new();

        let generation = generate_codes(&prefix, 3, &existing, &mut generator, None).unwrap();

        let codes: Vec<&str> = generation.codes().iter().map(Code::as_str).collect();
        assert_eq!(
            codes,
            vec!["ABC0000000000002", "ABC0000000000004", "ABC0000000000005"]
        );
        assert_eq!(generation.attempts(), 6);
    }

    #[test]
    fn no_intersection_with_existing_set() {
        let prefix = prefix("ABCDEFGH");
        let mut seed_generator = RandomGenerator::seeded(99);
        let existing: ExistingCodes = (0..100)
            .map(|_| seed_generator.generate(&prefix, 8).to_string())
            .collect();

        // Replaying the same seed proposes all 100 existing codes first.
        let mut generator = RandomGenerator::seeded(99);
        let generation = generate_codes(&prefix, 50, &existing, &mut generator, None).unwrap();

        assert_eq!(generation.len(), 50);
        assert!(generation.codes().iter().all(|code| !existing.contains(code)));
    }

    #[test]
    fn duplicate_candidates_are_rejected() {
        let prefix = prefix("ABC");
        let mut generator = Cycle::new(vec![
            "ABC0000000000001",
            "ABC0000000000001",
            "ABC0000000000002",
        ]);

        let generation =
            generate_codes(&prefix, 2, &ExistingCodes::new(), &mut generator, None).unwrap();

        assert_eq!(generation.len(), 2);
        assert_eq!(generation.attempts(), 3);
    }

    #[test]
    fn exhaustion_returns_partial_result() {
        let prefix = prefix("ABC");
        let mut generator = Cycle::new(vec![
            "ABC0000000000001",
            "ABC0000000000002",
            "ABC0000000000003",
        ]);

        let generation =
            generate_codes(&prefix, 5, &ExistingCodes::new(), &mut generator, None).unwrap();

        assert_eq!(generation.len(), 3);
        assert_eq!(generation.shortfall(), 2);
        assert!(!generation.is_complete());
        assert_eq!(generation.attempts(), 50);
    }

    #[test]
    fn fully_taken_space_yields_nothing() {
        let prefix = prefix("ABC");
        let existing: ExistingCodes = ["ABC0000000000001"].into_iter().collect();
        let mut generator = Cycle::new(vec!["ABC0000000000001"]);

        let generation = generate_codes(&prefix, 4, &existing, &mut generator, None).unwrap();

        assert!(generation.is_empty());
        assert_eq!(generation.attempts(), 40);
    }

    #[test]
    fn custom_ceiling_is_respected() {
        let prefix = prefix("ABC");
        let sampler = Sampler::builder().attempts_per_code(2).build();
        let mut generator = Cycle::new(vec!["ABC0000000000001"]);

        let generation = sampler
            .run(&prefix, 3, &ExistingCodes::new(), &mut generator, None)
            .unwrap();

        assert_eq!(generation.len(), 1);
        assert_eq!(generation.attempts(), 6);
        assert_eq!(Sampler::default().attempts_per_code(), ATTEMPTS_PER_CODE);
        assert_eq!(Sampler::default().attempt_limit(), None);
    }

    #[test]
    fn huge_quantity_runs_within_attempt_limit() {
        let prefix = prefix("ABC");
        let sampler = Sampler::builder().attempt_limit(25).build();

        for quantity in [1_000_000_000_000, i64::MAX as usize, usize::MAX] {
            let mut generator = SeqGenerator::new();
            let generation = sampler
                .run(&prefix, quantity, &ExistingCodes::new(), &mut generator, None)
                .unwrap();

            assert_eq!(generation.len(), 25);
            assert_eq!(generation.attempts(), 25);
            assert_eq!(generation.requested(), quantity);
            assert!(!generation.is_complete());
        }
    }

    #[test]
    fn attempt_limit_only_lowers_the_ceiling() {
        let sampler = Sampler::builder().attempt_limit(100).build();
        assert_eq!(sampler.max_attempts(3), 30);
        assert_eq!(sampler.max_attempts(50), 100);
        assert_eq!(Sampler::default().max_attempts(usize::MAX), usize::MAX);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut generator = SeqGenerator::new();
        let err = generate_codes(&prefix("ABC"), 0, &ExistingCodes::new(), &mut generator, None)
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidQuantity(0));
    }

    #[test]
    fn progress_is_reported_after_every_attempt() {
        let prefix = prefix("ABC");
        let reports = RefCell::new(Vec::new());
        let observer = |fraction: f64, message: &str| {
            reports.borrow_mut().push((fraction, message.to_owned()));
        };
        let mut generator = Cycle::new(vec![
            "ABC0000000000001",
            "ABC0000000000001",
            "ABC0000000000002",
        ]);

        generate_codes(
            &prefix,
            2,
            &ExistingCodes::new(),
            &mut generator,
            Some(&observer),
        )
        .unwrap();

        let reports = reports.into_inner();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0], (0.5, "Generating codes: 1 / 2 (Attempts: 1)".to_owned()));
        assert_eq!(reports[1], (0.5, "Generating codes: 1 / 2 (Attempts: 2)".to_owned()));
        assert_eq!(reports[2], (1.0, "Generating codes: 2 / 2 (Attempts: 3)".to_owned()));
    }
}
