use crate::error::{HuffmanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Occurrence counts for every symbol seen in an input.
///
/// Symbols are kept in ascending order so that everything derived from the
/// table (tree shape, codes) is reproducible between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "Symbol: Ord + Serialize",
    deserialize = "Symbol: Ord + Deserialize<'de>"
))]
pub struct FrequencyTable<Symbol> {
    counts: BTreeMap<Symbol, usize>,
}

impl<Symbol> FrequencyTable<Symbol>
where
    Symbol: Ord,
{
    /// Counts every symbol in `symbols`. Absent symbols get no entry.
    pub fn count(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut counts = BTreeMap::new();
        for s in symbols {
            *counts.entry(s).or_default() += 1;
        }

        Self { counts }
    }

    /// Folds the counts of `other` into this table.
    ///
    /// Counting independent chunks and merging gives the same table as
    /// counting the concatenated input.
    pub fn merge(&mut self, other: FrequencyTable<Symbol>) {
        for (s, n) in other.counts {
            *self.counts.entry(s).or_default() += n;
        }
    }

    /// Checks a table that did not come from [`FrequencyTable::count`].
    ///
    /// Every count must be positive and the total must fit in a `usize`, or
    /// merging nodes during tree construction would overflow.
    pub fn validate(&self) -> Result<()> {
        let mut total = 0usize;
        for n in self.counts.values() {
            if *n == 0 {
                return Err(HuffmanError::InvalidFrequencies {
                    reason: "zero count",
                });
            }
            total = total
                .checked_add(*n)
                .ok_or(HuffmanError::InvalidFrequencies {
                    reason: "total count overflows",
                })?;
        }

        Ok(())
    }

    pub fn get(&self, symbol: &Symbol) -> Option<usize> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, usize)> {
        self.counts.iter().map(|(s, n)| (s, *n))
    }
}
