//! Uniform shuffling.

use crate::entropy::EntropySource;
use crate::sampler::sample;
use crate::Result;

/// Put `items` into a uniformly random order, in place (Fisher–Yates).
///
/// Position `i`, counting down from the end, is swapped with a position picked uniformly from
/// `0..=i`, so each of the `n!` orderings comes out with probability exactly `1/n!`. Only swaps are
/// performed, so the contents of `items` are never lost or overwritten.
pub fn shuffle<S, T>(source: &S, items: &mut [T]) -> Result<()>
where
    S: EntropySource + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = sample(source, i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}
