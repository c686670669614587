//! Sources of secure random bytes.

use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// Something which can hand out cryptographically secure random bytes.
///
/// Sources are shared by reference between the threads building a password, so they must be
/// `Sync`. A source must fail closed: if it cannot produce secure bytes it returns an error, and it
/// never falls back to a weaker generator.
pub trait EntropySource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

impl<T: EntropySource + ?Sized> EntropySource for &T {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

/// The operating system's random number generator.
///
/// This holds no state of its own, so concurrent callers do not contend on anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng.try_fill_bytes(dest).map_err(Error::EntropySource)
    }
}

/// Serialize access to a cryptographic RNG that can't be shared on its own.
///
/// Mostly useful with a seeded `StdRng`, to get reproducible output.
impl<R> EntropySource for Mutex<R>
where
    R: RngCore + CryptoRng + Send,
{
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        let mut rng = self
            .lock()
            .map_err(|_| Error::EntropySource(rand::Error::new("random source lock poisoned")))?;
        rng.try_fill_bytes(dest).map_err(Error::EntropySource)
    }
}
