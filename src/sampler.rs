//! Unbiased random indices.

use crate::entropy::EntropySource;
use crate::{Error, Result};

/// Pick an integer uniformly from `0..bound`.
///
/// Taking a random `u64` modulo `bound` would favour the low residues whenever `bound` doesn't
/// divide 2^64. Instead, draws below `2^64 mod bound` are thrown away and re-drawn with fresh
/// bytes, which leaves an accepted range whose size is an exact multiple of `bound`.
pub fn sample<S>(source: &S, bound: usize) -> Result<usize>
where
    S: EntropySource + ?Sized,
{
    if bound == 0 {
        return Err(Error::InvalidBound);
    }
    let bound = bound as u64;
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let mut bytes = [0u8; 8];
        source.fill_bytes(&mut bytes)?;
        let x = u64::from_le_bytes(bytes);
        if x >= threshold {
            // `x % bound < bound <= usize::MAX`, so this can't truncate.
            return Ok((x % bound) as usize);
        }
    }
}
