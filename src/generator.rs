//! The password generator: allocation, drawing and shuffling put together.

use std::time::Instant;

use crate::allocator::{allocate, CategoryRequest, DrawPlan};
use crate::alphabet::{Alphabet, Scheme, DIGITS, LOWER, SPECIAL, UPPER};
use crate::entropy::{EntropySource, OsEntropy};
use crate::{builder, shuffle, Result, Secret};

/// The makeup of a password: how long it is, and how many of some kinds of character it must have.
///
/// Whatever isn't taken up by uppercase letters, digits and special characters is filled with
/// lowercase letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Form {
    pub length: usize,
    pub uppercase: usize,
    pub digits: usize,
    pub special: usize,
}

impl Default for Form {
    fn default() -> Form {
        Form {
            length: 8,
            uppercase: 0,
            digits: 0,
            special: 0,
        }
    }
}

impl Form {
    pub fn requests(&self) -> [CategoryRequest; 3] {
        [
            CategoryRequest::new(UPPER.clone(), self.uppercase),
            CategoryRequest::new(DIGITS.clone(), self.digits),
            CategoryRequest::new(SPECIAL.clone(), self.special),
        ]
    }

    pub fn plan(&self) -> Result<DrawPlan> {
        allocate(self.length, &self.requests(), &LOWER)
    }
}

/// Generates passwords, drawing randomness from `S`.
#[derive(Clone, Debug, Default)]
pub struct Generator<S = OsEntropy> {
    source: S,
}

impl Generator<OsEntropy> {
    /// A generator backed by the operating system's secure RNG.
    pub fn new() -> Generator<OsEntropy> {
        Generator { source: OsEntropy }
    }
}

impl<S: EntropySource> Generator<S> {
    pub fn with_source(source: S) -> Generator<S> {
        Generator { source }
    }

    /// Generate a password of `length` symbols from one of the named encoding alphabets.
    pub fn scheme(&self, scheme: Scheme, length: usize) -> Result<Secret> {
        let started = Instant::now();
        let plan = allocate(length, &[], scheme.alphabet())?;
        log::debug!("generating a {scheme} password of length {length}");
        // A single alphabet: the draws are already in a uniformly random order.
        let password = builder::build(&self.source, &plan)?;
        log::trace!("generated in {:?}", started.elapsed());
        Ok(password.into_iter().collect())
    }

    /// Generate a password with the given makeup.
    pub fn form(&self, form: &Form) -> Result<Secret> {
        self.generate(form.length, &form.requests(), &LOWER)
    }

    /// Generate a password of `length` symbols that has exactly `count` symbols of each request's
    /// alphabet, filling the rest from `default`, in a uniformly random order.
    pub fn generate(
        &self,
        length: usize,
        requests: &[CategoryRequest],
        default: &Alphabet,
    ) -> Result<Secret> {
        let plan = allocate(length, requests, default)?;
        self.generate_planned(&plan)
    }

    /// Draw and shuffle an already resolved plan.
    pub fn generate_planned(&self, plan: &DrawPlan) -> Result<Secret> {
        let started = Instant::now();
        log::debug!(
            "generating a password of length {} from {} alphabet(s), counts {:?}",
            plan.len(),
            plan.entries().len(),
            plan.entries().iter().map(|(_, count)| *count).collect::<Vec<_>>(),
        );
        let mut buffer = builder::build(&self.source, plan)?;
        shuffle::shuffle(&self.source, &mut buffer)?;
        log::trace!("generated in {:?}", started.elapsed());
        Ok(buffer.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::Error;

    struct Broken;

    impl EntropySource for Broken {
        fn fill_bytes(&self, _dest: &mut [u8]) -> Result<()> {
            Err(Error::EntropySource(rand::Error::new("unavailable")))
        }
    }

    fn seeded(seed: u64) -> Generator<Mutex<StdRng>> {
        Generator::with_source(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    #[test]
    fn hexadecimal_scheme() {
        let generator = Generator::new();
        let first = generator.scheme(Scheme::Hexadecimal, 16).unwrap();
        let second = generator.scheme(Scheme::Hexadecimal, 16).unwrap();
        for password in [&first, &second] {
            assert_eq!(password.as_str().chars().count(), 16);
            assert!(password
                .as_str()
                .chars()
                .all(|ch| "0123456789abcdef".contains(ch)));
        }
        assert_ne!(first, second);
    }

    #[test]
    fn form_scenario() {
        let form = Form {
            length: 8,
            uppercase: 2,
            digits: 2,
            special: 1,
        };
        let password = Generator::new().form(&form).unwrap();
        let s = password.as_str();
        assert_eq!(s.chars().count(), 8);
        assert_eq!(s.chars().filter(|c| c.is_ascii_uppercase()).count(), 2);
        assert_eq!(s.chars().filter(|c| c.is_ascii_digit()).count(), 2);
        assert_eq!(s.chars().filter(|c| SPECIAL.contains(*c)).count(), 1);
        assert_eq!(s.chars().filter(|c| c.is_ascii_lowercase()).count(), 3);
    }

    #[test]
    fn repeated_calls_share_structure_not_content() {
        let form = Form {
            length: 24,
            uppercase: 4,
            digits: 4,
            special: 4,
        };
        let generator = seeded(3);
        let first = generator.form(&form).unwrap();
        let second = generator.form(&form).unwrap();
        let composition = |s: &Secret| {
            let count = |alphabet: &Alphabet| {
                s.as_str().chars().filter(|c| alphabet.contains(*c)).count()
            };
            (count(&UPPER), count(&DIGITS), count(&SPECIAL), count(&LOWER))
        };
        assert_eq!(composition(&first), (4, 4, 4, 12));
        assert_eq!(composition(&first), composition(&second));
        assert_ne!(first, second);
    }

    #[test]
    fn default_form_is_eight_lowercase_letters() {
        let password = Generator::new().form(&Form::default()).unwrap();
        assert_eq!(password.as_str().len(), 8);
        assert!(password.as_str().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn zero_length_is_refused() {
        let generator = Generator::new();
        assert!(matches!(
            generator.scheme(Scheme::Base64, 0),
            Err(Error::InvalidLength)
        ));
        let form = Form {
            length: 0,
            ..Form::default()
        };
        assert!(matches!(generator.form(&form), Err(Error::InvalidLength)));
    }

    #[test]
    fn huge_lengths_are_an_error_not_a_panic() {
        assert!(matches!(
            Generator::new().scheme(Scheme::Hexadecimal, usize::MAX / 2),
            Err(Error::LengthTooLong { .. })
        ));
    }

    #[test]
    fn entropy_failures_reach_the_caller() {
        let generator = Generator::with_source(Broken);
        assert!(matches!(
            generator.scheme(Scheme::Base32, 10),
            Err(Error::EntropySource(_))
        ));
        let form = Form {
            length: 10,
            uppercase: 3,
            digits: 3,
            special: 0,
        };
        assert!(matches!(
            generator.form(&form),
            Err(Error::EntropySource(_))
        ));
    }
}
