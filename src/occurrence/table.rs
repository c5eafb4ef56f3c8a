//! The Frequency Accumulator.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::codec::CodePoint;
use crate::error::IpmError;

/// Running occurrence counts for every code point seen so far.
///
/// Counts only ever grow and keys are never evicted. The sum of all counts
/// always equals [`OccurrenceTable::total`].
///
/// # Example
///
/// ```
/// use ipmrs::OccurrenceTable;
///
/// let mut table = OccurrenceTable::new();
/// table.record(&['a', 'b', 'a'])?;
///
/// assert_eq!(table.total(), 3);
/// assert_eq!(table.count('a'), 2);
/// assert_eq!(table.alphabet_size(), 2);
/// # Ok::<(), ipmrs::IpmError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceTable {
    counts: HashMap<CodePoint, u64>,
    total: u64,
}

impl OccurrenceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a run of decoded code points into the table.
    ///
    /// # Errors
    ///
    /// Returns [`IpmError::Accumulation`] if a counter or the total would
    /// overflow. The table is left consistent: the code points before the
    /// failing one are counted and the failing one is not.
    pub fn record(&mut self, code_points: &[CodePoint]) -> Result<(), IpmError> {
        for &cp in code_points {
            let overflow = || IpmError::Accumulation {
                code_point: u32::from(cp),
            };
            let total = self.total.checked_add(1).ok_or_else(overflow)?;

            match self.counts.entry(cp) {
                Entry::Occupied(mut e) => {
                    let count = e.get().checked_add(1).ok_or_else(overflow)?;
                    e.insert(count);
                }
                Entry::Vacant(e) => {
                    e.insert(1);
                }
            }
            self.total = total;
        }
        Ok(())
    }

    /// Returns the total number of code points recorded.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of distinct code points.
    pub fn alphabet_size(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns how often `code_point` occurred.
    pub fn count(&self, code_point: CodePoint) -> u64 {
        self.counts.get(&code_point).copied().unwrap_or(0)
    }

    /// Iterates over `(code point, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (CodePoint, u64)> + '_ {
        self.counts.iter().map(|(&cp, &n)| (cp, n))
    }

    /// Iterates over the counts alone.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }

    /// Returns all entries sorted by ascending code point.
    pub fn sorted(&self) -> Vec<(CodePoint, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(cp, _)| cp);
        entries
    }

    #[cfg(test)]
    pub(crate) fn with_counts(counts: HashMap<CodePoint, u64>) -> Self {
        let total = counts.values().sum();
        Self { counts, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let table = OccurrenceTable::new();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.alphabet_size(), 0);
        assert_eq!(table.count('x'), 0);
    }

    #[test]
    fn test_record_across_calls() {
        let mut table = OccurrenceTable::new();
        table.record(&['a', 'a']).unwrap();
        table.record(&[]).unwrap();
        table.record(&['b', 'b', 'é']).unwrap();

        assert_eq!(table.total(), 5);
        assert_eq!(table.count('a'), 2);
        assert_eq!(table.count('b'), 2);
        assert_eq!(table.count('é'), 1);
        assert_eq!(table.counts().sum::<u64>(), table.total());
    }

    #[test]
    fn test_sorted_by_code_point() {
        let mut table = OccurrenceTable::new();
        table.record(&['z', '日', 'a', 'z', '\n']).unwrap();
        assert_eq!(
            table.sorted(),
            vec![('\n', 1), ('a', 1), ('z', 2), ('日', 1)]
        );
    }

    #[test]
    fn test_counter_overflow() {
        let mut table = OccurrenceTable::with_counts(HashMap::from([('a', u64::MAX - 1)]));
        table.record(&['a']).unwrap();

        let err = OccurrenceTable::with_counts(HashMap::from([('a', u64::MAX)]))
            .record(&['b'])
            .unwrap_err();
        assert!(matches!(err, IpmError::Accumulation { code_point: 0x62 }));
    }
}
