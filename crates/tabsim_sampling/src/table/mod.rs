//! Random contingency tables with fixed margins.
//!
//! [`TableSampler`] implements Patefield's algorithm AS 159: cells are
//! filled row by row, left to right, each drawn from its exact conditional
//! distribution given everything assigned so far. The last cell of every
//! row and the whole last row are then fixed by the margins.
//!
//! # Reference
//!
//! W. M. Patefield, "Algorithm AS 159: An Efficient Method of Generating
//! R x C Tables with Given Row and Column Totals", *Applied Statistics*
//! 30(1), 1981, pp. 91-97.
//!
//! # Examples
//!
//! ```rust
//! use tabsim_core::types::Margins;
//! use tabsim_sampling::table::TableSampler;
//!
//! let margins = Margins::new(vec![3, 2, 5], vec![4, 4, 2]).unwrap();
//! let table = TableSampler::new().sample(&margins, 12345);
//!
//! assert_eq!(table.row_sums(), margins.row_sums());
//! assert_eq!(table.col_sums(), margins.col_sums());
//! ```

mod walk;

use std::sync::Arc;

use tabsim_core::math::{FactorialCache, LogFactorials};
use tabsim_core::rng::MinStdRng;
use tabsim_core::types::{ContingencyTable, Margins, SimError};
use tracing::debug;

use walk::{draw_cell, CellMass};

/// Generator of random tables with prescribed row and column sums.
///
/// Without a cache every call builds its own log-factorial table. With
/// [`with_cache`](Self::with_cache) tables are shared per total through a
/// [`FactorialCache`], which may itself be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct TableSampler {
    cache: Option<Arc<FactorialCache>>,
}

impl TableSampler {
    /// Creates a sampler that builds log-factorials per call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sampler that memoises log-factorials in `cache`.
    pub fn with_cache(cache: Arc<FactorialCache>) -> Self {
        Self { cache: Some(cache) }
    }

    /// The shared cache, if any.
    pub fn cache(&self) -> Option<&Arc<FactorialCache>> {
        self.cache.as_ref()
    }

    fn factorials(&self, total: i64) -> Arc<LogFactorials> {
        let n = total as usize;
        match &self.cache {
            Some(cache) => cache.get_or_build(n),
            None => Arc::new(LogFactorials::new(n)),
        }
    }

    /// Validates raw sums and draws one table.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidMargins`] with the first violated precondition.
    pub fn sample_from_sums(
        &self,
        row_sums: &[i64],
        col_sums: &[i64],
        seed: i64,
    ) -> Result<ContingencyTable, SimError> {
        let margins = Margins::from_slices(row_sums, col_sums)?;
        Ok(self.sample(&margins, seed))
    }

    /// Draws one table from a fresh generator seeded with `seed`.
    pub fn sample(&self, margins: &Margins, seed: i64) -> ContingencyTable {
        let mut rng = MinStdRng::new(seed);
        self.sample_with_rng(margins, &mut rng)
    }

    /// Draws `count` tables from one generator stream seeded with `seed`.
    pub fn sample_many(&self, margins: &Margins, seed: i64, count: usize) -> Vec<ContingencyTable> {
        let mut rng = MinStdRng::new(seed);
        let fact = self.factorials(margins.total());
        (0..count)
            .map(|_| fill_table(margins, &fact, &mut rng))
            .collect()
    }

    /// Draws one table, advancing the caller's generator.
    ///
    /// Successive calls on the same generator continue one stream, the way
    /// an in/out seed would.
    pub fn sample_with_rng(&self, margins: &Margins, rng: &mut MinStdRng) -> ContingencyTable {
        let fact = self.factorials(margins.total());
        fill_table(margins, &fact, rng)
    }
}

/// Fills a fresh table. `fact` must cover `margins.total()`.
fn fill_table(margins: &Margins, fact: &LogFactorials, rng: &mut MinStdRng) -> ContingencyTable {
    let (rows, cols) = margins.shape();
    let row_sums = margins.row_sums();
    debug!(rows, cols, total = margins.total(), seed = rng.seed(), "sampling table");

    let mut table = ContingencyTable::zeros(rows, cols);
    // Column remainders over the rows not yet filled.
    let mut col_left: Vec<i64> = margins.col_sums().to_vec();
    // Mass in the rows not yet filled.
    let mut rows_mass = margins.total();

    for l in 0..rows - 1 {
        let mut row_left = row_sums[l];
        let mut mass_after = rows_mass;
        rows_mass -= row_left;

        for m in 0..cols - 1 {
            let col = col_left[m];
            let mass = mass_after;
            mass_after -= col;

            if mass == 0 {
                // Nothing left in this row; the table starts out zeroed.
                row_left = 0;
                break;
            }

            let cell = CellMass {
                row: row_left,
                col,
                mass,
                after: mass_after,
                rest: mass - row_left,
            };
            let value = draw_cell(cell, fact, rng);

            table.set(l, m, value);
            row_left -= value;
            col_left[m] -= value;
        }
        table.set(l, cols - 1, row_left);
    }

    let last = rows - 1;
    for (m, &left) in col_left.iter().enumerate().take(cols - 1) {
        table.set(last, m, left);
    }
    let assigned: i64 = table.row(last)[..cols - 1].iter().sum();
    table.set(last, cols - 1, row_sums[last] - assigned);

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsim_core::types::MarginError;

    fn margins(rows: &[i64], cols: &[i64]) -> Margins {
        Margins::from_slices(rows, cols).unwrap()
    }

    #[test]
    fn test_reference_table() {
        let m = margins(&[3, 2, 5], &[4, 4, 2]);
        let table = TableSampler::new().sample(&m, 12345);
        let expected =
            ContingencyTable::from_rows(&[vec![1, 2, 0], vec![0, 1, 1], vec![3, 1, 1]]).unwrap();
        assert_eq!(table, expected);
    }

    #[test]
    fn test_margins_preserved() {
        let m = margins(&[12, 7, 30, 1], &[5, 25, 20]);
        let sampler = TableSampler::new();
        for seed in [1, 99, 123_456, 2_000_000_000] {
            let table = sampler.sample(&m, seed);
            assert_eq!(table.row_sums(), m.row_sums());
            assert_eq!(table.col_sums(), m.col_sums());
            assert!(table.as_slice().iter().all(|&v| v >= 0));
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let m = margins(&[40, 35, 25], &[30, 30, 40]);
        let sampler = TableSampler::new();
        assert_eq!(sampler.sample(&m, 777), sampler.sample(&m, 777));
    }

    #[test]
    fn test_cached_and_uncached_agree() {
        let m = margins(&[40, 35, 25], &[30, 30, 40]);
        let cache = Arc::new(FactorialCache::new());
        let cached = TableSampler::with_cache(Arc::clone(&cache));
        assert_eq!(cached.sample(&m, 4242), TableSampler::new().sample(&m, 4242));
        assert!(cache.contains(100));
        assert!(cached.cache().is_some());
    }

    #[test]
    fn test_sample_many_continues_stream() {
        let m = margins(&[20, 20], &[15, 25]);
        let sampler = TableSampler::new();
        let tables = sampler.sample_many(&m, 55, 3);

        let mut rng = MinStdRng::new(55);
        for table in &tables {
            assert_eq!(*table, sampler.sample_with_rng(&m, &mut rng));
        }
        assert_eq!(tables[0], sampler.sample(&m, 55));
    }

    #[test]
    fn test_sample_from_sums_rejects_invalid() {
        let sampler = TableSampler::new();
        let err = sampler.sample_from_sums(&[3, -1], &[1, 1], 1).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidMargins(MarginError::NonPositiveRowSum {
                index: 1,
                value: -1
            })
        );
        assert!(sampler.sample_from_sums(&[2, 2], &[1, 3], 1).is_ok());
    }

    #[test]
    fn test_zero_mass_tail_of_row() {
        // When row 0 is [0, 1, 1], row 1 exhausts its mass in column 0 and
        // the rest of the row is zero without further draws.
        let m = margins(&[2, 1, 1], &[2, 1, 1]);
        let sampler = TableSampler::new();
        let mut rng = MinStdRng::new(3);
        let mut hit = false;
        for _ in 0..300 {
            let table = sampler.sample_with_rng(&m, &mut rng);
            assert_eq!(table.row_sums(), vec![2, 1, 1]);
            assert_eq!(table.col_sums(), vec![2, 1, 1]);
            if table.row(0) == [0, 1, 1] {
                assert_eq!(table.row(1), &[1, 0, 0]);
                assert_eq!(table.row(2), &[1, 0, 0]);
                hit = true;
            }
        }
        assert!(hit, "row [0, 1, 1] has probability 1/6 per draw");
    }
}
