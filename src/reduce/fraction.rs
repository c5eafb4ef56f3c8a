//! Exact IPM fraction.

use std::fmt;

use crate::error::{IpmError, NoMatchReason};
use crate::occurrence::OccurrenceTable;

use super::Significant;

/// Digits used when printing the floating-point IPM.
pub const FLOAT_PRECISION: usize = 10;

/// Greatest common divisor by Euclid's algorithm.
///
/// `gcd(a, 0) == a`, so `gcd(0, 0) == 0`.
pub fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// The inverse probability of matching as a reduced fraction.
///
/// For `N` characters with per-character counts `c`, the fraction is
///
/// ```text
///          N * (N - 1)
/// IPM = -----------------
///       sum c * (c - 1)
/// ```
///
/// Both sides count ordered pairs, so the factor of two cancels. After
/// construction `gcd(numerator, denominator) == 1` and `denominator > 0`.
///
/// # Example
///
/// ```
/// use ipmrs::Ipm;
///
/// // "abcabc"
/// let ipm = Ipm::from_counts([2, 2, 2])?;
/// assert_eq!((ipm.numerator(), ipm.denominator()), (5, 1));
/// assert_eq!(ipm.to_string(), "5 / 1");
/// # Ok::<(), ipmrs::IpmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipm {
    numerator: u128,
    denominator: u128,
}

impl Ipm {
    /// Derives the IPM from a finished occurrence table.
    pub fn from_table(table: &OccurrenceTable) -> Result<Self, IpmError> {
        Self::from_counts(table.counts())
    }

    /// Derives the IPM from per-character counts.
    ///
    /// Zero counts are ignored.
    ///
    /// # Errors
    ///
    /// - [`IpmError::NoMatchingPairs`] if fewer than two characters were
    ///   counted or no character repeats
    /// - [`IpmError::Overflow`] if the total count does not fit in `u64`
    pub fn from_counts<I>(counts: I) -> Result<Self, IpmError>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut total: u64 = 0;
        let mut matching_pairs: u128 = 0;

        for c in counts {
            total = total
                .checked_add(c)
                .ok_or(IpmError::Overflow { stage: "total" })?;
            let pairs = u128::from(c)
                .checked_mul(u128::from(c.saturating_sub(1)))
                .ok_or(IpmError::Overflow {
                    stage: "matching pairs",
                })?;
            matching_pairs = matching_pairs
                .checked_add(pairs)
                .ok_or(IpmError::Overflow {
                    stage: "matching pairs",
                })?;
        }

        if total < 2 {
            return Err(IpmError::NoMatchingPairs {
                reason: NoMatchReason::TooFewCharacters,
            });
        }
        if matching_pairs == 0 {
            return Err(IpmError::NoMatchingPairs {
                reason: NoMatchReason::AllDistinct,
            });
        }

        let numerator = u128::from(total)
            .checked_mul(u128::from(total - 1))
            .ok_or(IpmError::Overflow { stage: "numerator" })?;

        Ok(Self::reduced(numerator, matching_pairs))
    }

    fn reduced(numerator: u128, denominator: u128) -> Self {
        let g = gcd(numerator, denominator);
        Self {
            numerator: numerator / g,
            denominator: denominator / g,
        }
    }

    /// Returns the reduced numerator.
    pub fn numerator(&self) -> u128 {
        self.numerator
    }

    /// Returns the reduced denominator.
    pub fn denominator(&self) -> u128 {
        self.denominator
    }

    /// Returns the IPM as a float, divided from the reduced integers.
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Returns the float value ready for printing with ten significant digits.
    pub fn float_display(&self) -> Significant {
        Significant::new(self.as_f64(), FLOAT_PRECISION)
    }
}

impl fmt::Display for Ipm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 4), 4);
        assert_eq!(gcd(4, 12), 4);
        assert_eq!(gcd(30, 6), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(9, 0), 9);
        assert_eq!(gcd(0, 9), 9);
    }

    #[test]
    fn test_aabb() {
        let ipm = Ipm::from_counts([2, 2]).unwrap();
        assert_eq!(ipm.numerator(), 3);
        assert_eq!(ipm.denominator(), 1);
        assert_eq!(ipm.as_f64(), 3.0);
    }

    #[test]
    fn test_abcabc() {
        let ipm = Ipm::from_counts([2, 2, 2]).unwrap();
        assert_eq!((ipm.numerator(), ipm.denominator()), (5, 1));
        assert_eq!(ipm.as_f64(), 5.0);
    }

    #[test]
    fn test_non_integer_ipm() {
        // "aaab": 4 * 3 / (3 * 2) = 12 / 6 = 2
        assert_eq!(Ipm::from_counts([3, 1]).unwrap().to_string(), "2 / 1");
        // "aabbc": 5 * 4 / (2 + 2) = 20 / 4 = 5
        assert_eq!(Ipm::from_counts([2, 2, 1]).unwrap().to_string(), "5 / 1");
        // "aaabb": 5 * 4 / (6 + 2) = 20 / 8 = 5 / 2
        let ipm = Ipm::from_counts([3, 2]).unwrap();
        assert_eq!(ipm.to_string(), "5 / 2");
        assert_eq!(ipm.float_display().to_string(), "2.5");
    }

    #[test]
    fn test_single_character_repeated() {
        let ipm = Ipm::from_counts([1000]).unwrap();
        assert_eq!((ipm.numerator(), ipm.denominator()), (1, 1));
    }

    #[test]
    fn test_all_distinct() {
        let err = Ipm::from_counts([1, 1, 1, 1]).unwrap_err();
        assert!(matches!(
            err,
            IpmError::NoMatchingPairs {
                reason: NoMatchReason::AllDistinct
            }
        ));
    }

    #[test]
    fn test_too_few_characters() {
        for counts in [vec![], vec![1], vec![0, 1, 0]] {
            let err = Ipm::from_counts(counts).unwrap_err();
            assert!(matches!(
                err,
                IpmError::NoMatchingPairs {
                    reason: NoMatchReason::TooFewCharacters
                }
            ));
        }
    }

    #[test]
    fn test_total_overflow() {
        let err = Ipm::from_counts([u64::MAX, 1]).unwrap_err();
        assert!(matches!(err, IpmError::Overflow { stage: "total" }));
    }

    #[test]
    fn test_huge_counts_stay_exact() {
        let ipm = Ipm::from_counts([u64::MAX]).unwrap();
        assert_eq!((ipm.numerator(), ipm.denominator()), (1, 1));

        let half = u64::MAX / 2;
        let ipm = Ipm::from_counts([half, half]).unwrap();
        assert!(ipm.denominator() > 0);
        assert_eq!(gcd(ipm.numerator(), ipm.denominator()), 1);
    }

    #[test]
    fn test_from_table() {
        let mut table = OccurrenceTable::new();
        table.record(&"aabb".chars().collect::<Vec<_>>()).unwrap();
        assert_eq!(Ipm::from_table(&table).unwrap().to_string(), "3 / 1");
    }

    #[test]
    fn reduced_fraction_invariants_quickcheck() {
        fn prop(counts: Vec<u32>) -> bool {
            let counts: Vec<u64> = counts.into_iter().map(u64::from).collect();
            let total: u64 = counts.iter().sum();
            let repeats = counts.iter().any(|&c| c > 1);

            match Ipm::from_counts(counts) {
                Ok(ipm) => {
                    repeats
                        && ipm.denominator() > 0
                        && ipm.denominator() <= ipm.numerator()
                        && gcd(ipm.numerator(), ipm.denominator()) == 1
                }
                Err(IpmError::NoMatchingPairs { .. }) => total < 2 || !repeats,
                Err(_) => false,
            }
        }

        QuickCheck::new()
            .tests(1_000)
            .quickcheck(prop as fn(Vec<u32>) -> bool);
    }
}
