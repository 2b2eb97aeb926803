//! Flattened frequency histograms.

use super::table::ContingencyTable;

/// Empirical bin counts of a (possibly multi-dimensional) histogram,
/// flattened to one dimension, together with their total.
///
/// The total is caller-asserted: [`with_total`](Self::with_total) does not
/// check it against the counts, and an inconsistent total silently skews
/// the resampler's scaling. [`new`](Self::new) computes it.
///
/// # Examples
///
/// ```rust
/// use tabsim_core::types::Histogram;
///
/// let hist = Histogram::new(vec![10, 20, 30]);
/// assert_eq!(hist.total(), 60);
/// assert_eq!(hist.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    counts: Vec<i64>,
    total: i64,
}

impl Histogram {
    /// Wraps `counts`, computing the total.
    ///
    /// The total saturates at the `i64` bounds instead of overflowing.
    pub fn new(counts: Vec<i64>) -> Self {
        let total = counts.iter().fold(0i64, |acc, &c| acc.saturating_add(c));
        Self { counts, total }
    }

    /// Wraps `counts` with a caller-supplied total.
    pub fn with_total(counts: Vec<i64>, total: i64) -> Self {
        Self { counts, total }
    }

    /// Flattens a two-dimensional table row-major.
    pub fn from_table(table: &ContingencyTable) -> Self {
        Self::new(table.as_slice().to_vec())
    }

    /// Bin counts.
    #[inline]
    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    /// Total count as asserted at construction.
    #[inline]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if there are no bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Whether the asserted total matches the bin counts.
    pub fn is_consistent(&self) -> bool {
        self.counts
            .iter()
            .try_fold(0i64, |acc, &c| acc.checked_add(c))
            == Some(self.total)
    }
}
