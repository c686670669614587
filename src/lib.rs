//! Password generation from uniformly sampled alphabets.
//!
//! Passwords are assembled from a [`DrawPlan`](allocator::DrawPlan): every entry of the plan is
//! drawn, symbol by symbol, from a cryptographically secure [`EntropySource`], and the assembled
//! symbols are then put through a uniform shuffle so that the order in which categories were drawn
//! does not leak into the result.

pub mod alphabet;
pub mod allocator;
pub mod builder;
pub mod entropy;
pub mod generator;
pub mod sampler;
pub mod shuffle;

pub use alphabet::{Alphabet, Scheme};
pub use allocator::{CategoryRequest, DrawPlan};
pub use entropy::{EntropySource, OsEntropy};
pub use generator::{Form, Generator};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid encoding scheme provided: {0:?}")]
    InvalidEncodingScheme(String),
    #[error("password length must be greater than 0")]
    InvalidLength,
    #[error("a password length of {length} is more than the maximum of {max}")]
    LengthTooLong { length: usize, max: usize },
    #[error(
        "the requested character counts add up to {required}, which is more than the password \
         length of {length}"
    )]
    OverconstrainedRequest { required: usize, length: usize },
    #[error("cannot sample an index below a bound of 0")]
    InvalidBound,
    #[error("the secure random source failed: {0}")]
    EntropySource(rand::Error),
    #[error("an alphabet must contain at least one symbol")]
    EmptyAlphabet,
    #[error("the symbol {0:?} appears more than once in the alphabet")]
    DuplicateSymbol(char),
    #[error("a worker drawing characters failed before completing")]
    WorkerFailed,
}

/// A generated password.
///
/// The contents are never shown by `Debug`, so a `Secret` can be logged or put into an error
/// without leaking it.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

impl FromIterator<char> for Secret {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Secret {
        Secret(iter.into_iter().collect())
    }
}
