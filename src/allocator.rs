//! Turning a password length plus per-category requirements into a concrete draw plan.

use crate::alphabet::Alphabet;
use crate::{Error, Result};

/// The longest password a plan will be made for.
pub const MAX_LENGTH: usize = 1 << 16;

/// "Exactly `count` symbols of the password come from `alphabet`."
#[derive(Clone, Debug)]
pub struct CategoryRequest {
    pub alphabet: Alphabet,
    pub count: usize,
}

impl CategoryRequest {
    pub fn new(alphabet: Alphabet, count: usize) -> CategoryRequest {
        CategoryRequest { alphabet, count }
    }
}

/// How many symbols to draw from each alphabet.
///
/// The counts always sum to the requested password length, and every count is positive.
#[derive(Clone, Debug)]
pub struct DrawPlan {
    entries: Vec<(Alphabet, usize)>,
    len: usize,
}

impl DrawPlan {
    /// Total number of symbols the plan draws.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn entries(&self) -> &[(Alphabet, usize)] {
        &self.entries
    }

    /// Bits of entropy in the symbols drawn under this plan, before shuffling.
    ///
    /// Each symbol drawn from an alphabet of size `n` contributes `log2(n)` bits. The shuffle
    /// adds some more on top when there is more than one entry, which isn't counted here, so this
    /// is a lower bound.
    pub fn entropy_bits(&self) -> f64 {
        self.entries
            .iter()
            .map(|(alphabet, count)| *count as f64 * (alphabet.len() as f64).log2())
            .sum()
    }
}

/// Work out the draw plan for a password of `length` symbols.
///
/// Every request is honoured exactly. Whatever length is left over once the requests are
/// satisfied is drawn from `default`. Requests that add up to more than `length` are refused,
/// rather than growing the password past what was asked for.
pub fn allocate(
    length: usize,
    requests: &[CategoryRequest],
    default: &Alphabet,
) -> Result<DrawPlan> {
    if length == 0 {
        return Err(Error::InvalidLength);
    }
    if length > MAX_LENGTH {
        return Err(Error::LengthTooLong {
            length,
            max: MAX_LENGTH,
        });
    }

    let required = requests
        .iter()
        .try_fold(0usize, |acc, req| acc.checked_add(req.count))
        .ok_or(Error::OverconstrainedRequest {
            required: usize::MAX,
            length,
        })?;
    if required > length {
        return Err(Error::OverconstrainedRequest { required, length });
    }

    let mut entries = requests
        .iter()
        .filter(|req| req.count > 0)
        .map(|req| (req.alphabet.clone(), req.count))
        .collect::<Vec<_>>();
    let remainder = length - required;
    if remainder > 0 {
        entries.push((default.clone(), remainder));
    }

    Ok(DrawPlan { entries, len: length })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{DIGITS, LOWER, SPECIAL, UPPER};

    fn form(upper: usize, digits: usize, special: usize) -> Vec<CategoryRequest> {
        vec![
            CategoryRequest::new(UPPER.clone(), upper),
            CategoryRequest::new(DIGITS.clone(), digits),
            CategoryRequest::new(SPECIAL.clone(), special),
        ]
    }

    #[test]
    fn remainder_goes_to_the_default() {
        let plan = allocate(8, &form(2, 2, 1), &LOWER).unwrap();
        assert_eq!(plan.len(), 8);
        let counts = plan
            .entries()
            .iter()
            .map(|(a, c)| (a.clone(), *c))
            .collect::<Vec<_>>();
        assert_eq!(
            counts,
            vec![
                (UPPER.clone(), 2),
                (DIGITS.clone(), 2),
                (SPECIAL.clone(), 1),
                (LOWER.clone(), 3),
            ]
        );
    }

    #[test]
    fn exact_fit_has_no_default_entry() {
        let plan = allocate(5, &form(2, 2, 1), &LOWER).unwrap();
        assert_eq!(plan.entries().len(), 3);
        assert!(plan.entries().iter().all(|(a, _)| *a != *LOWER));
    }

    #[test]
    fn zero_counts_are_dropped() {
        let plan = allocate(4, &form(0, 4, 0), &LOWER).unwrap();
        assert_eq!(plan.entries().len(), 1);
        assert_eq!(plan.entries()[0], (DIGITS.clone(), 4));
    }

    #[test]
    fn no_requests_means_all_default() {
        let plan = allocate(12, &[], &LOWER).unwrap();
        assert_eq!(plan.entries(), &[(LOWER.clone(), 12)]);
    }

    #[test]
    fn zero_length_is_invalid() {
        assert!(matches!(
            allocate(0, &[], &LOWER),
            Err(Error::InvalidLength)
        ));
    }

    #[test]
    fn huge_lengths_are_refused() {
        assert!(allocate(MAX_LENGTH, &[], &LOWER).is_ok());
        match allocate(usize::MAX / 2, &[], &LOWER) {
            Err(Error::LengthTooLong { length, max }) => {
                assert_eq!(length, usize::MAX / 2);
                assert_eq!(max, MAX_LENGTH);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn overconstrained_requests_are_refused() {
        match allocate(4, &form(2, 2, 1), &LOWER) {
            Err(Error::OverconstrainedRequest { required, length }) => {
                assert_eq!(required, 5);
                assert_eq!(length, 4);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn overflowing_requests_are_refused() {
        let requests = form(usize::MAX, 1, 0);
        assert!(matches!(
            allocate(10, &requests, &LOWER),
            Err(Error::OverconstrainedRequest { .. })
        ));
    }

    #[test]
    fn entropy_is_log2_per_symbol() {
        let hex = Alphabet::new("0123456789abcdef").unwrap();
        let plan = allocate(16, &[], &hex).unwrap();
        assert!((plan.entropy_bits() - 64.0).abs() < 1e-9);
    }
}
