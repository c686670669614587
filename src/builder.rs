//! Drawing the symbols of a [`DrawPlan`].

use std::sync::Mutex;
use std::thread;

use crate::alphabet::Alphabet;
use crate::allocator::DrawPlan;
use crate::entropy::EntropySource;
use crate::sampler::sample;
use crate::{Error, Result};

/// Draw `count` symbols from `alphabet`, independently and with replacement.
pub fn draw<S>(source: &S, alphabet: &Alphabet, count: usize) -> Result<Vec<char>>
where
    S: EntropySource + ?Sized,
{
    let symbols = alphabet.symbols();
    let mut drawn = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = sample(source, symbols.len())?;
        drawn.push(symbols[idx]);
    }
    Ok(drawn)
}

/// Draw every entry of `plan`, concatenated in plan order.
///
/// Entries are independent of each other, so when there is more than one, each gets its own
/// thread. Workers append their finished run of symbols to a shared buffer; the order in which
/// runs land depends on scheduling, which is fine since the result is shuffled afterwards.
///
/// If any entry fails, the first failure (in plan order) is returned and everything drawn so far is
/// dropped.
pub fn build<S>(source: &S, plan: &DrawPlan) -> Result<Vec<char>>
where
    S: EntropySource + ?Sized,
{
    match plan.entries() {
        [] => Ok(Vec::new()),
        [(alphabet, count)] => draw(source, alphabet, *count),
        entries => build_parallel(source, entries, plan.len()),
    }
}

fn build_parallel<S>(source: &S, entries: &[(Alphabet, usize)], len: usize) -> Result<Vec<char>>
where
    S: EntropySource + ?Sized,
{
    let buffer = Mutex::new(Vec::with_capacity(len));

    let outcomes = thread::scope(|s| {
        let workers = entries
            .iter()
            .enumerate()
            .map(|(idx, (alphabet, count))| {
                let buffer = &buffer;
                thread::Builder::new()
                    .name(format!("passgen-draw-{idx}"))
                    .spawn_scoped(s, move || -> Result<()> {
                        let drawn = draw(source, alphabet, *count)?;
                        buffer
                            .lock()
                            .map_err(|_| Error::WorkerFailed)?
                            .extend_from_slice(&drawn);
                        Ok(())
                    })
            })
            .collect::<Vec<_>>();

        workers
            .into_iter()
            .map(|worker| match worker {
                Ok(handle) => handle.join().unwrap_or(Err(Error::WorkerFailed)),
                Err(err) => {
                    log::warn!("could not start a worker thread: {err}");
                    Err(Error::WorkerFailed)
                }
            })
            .collect::<Vec<_>>()
    });

    for (idx, outcome) in outcomes.into_iter().enumerate() {
        if let Err(err) = outcome {
            log::debug!("worker for plan entry {idx} failed: {err}");
            return Err(err);
        }
    }

    let buffer = buffer.into_inner().map_err(|_| Error::WorkerFailed)?;
    debug_assert_eq!(buffer.len(), len);
    Ok(buffer)
}
