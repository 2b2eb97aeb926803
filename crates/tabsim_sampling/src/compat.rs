//! Flat-buffer entry points with numeric status codes.
//!
//! These keep the older calling convention where shapes are passed
//! explicitly into caller-allocated buffers and an integer status replaces
//! the typed error. Tables are written column-major
//! (`row + col * row_count`).
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | fewer than 2 rows |
//! | 2 | fewer than 2 columns |
//! | 3 | non-positive row sum |
//! | 4 | non-positive column sum |
//! | 5 | reserved, never returned |
//! | 6 | row and column totals differ |
//! | 7 | slice lengths disagree with the declared shape |
//! | 9 | row or column sums overflow the total |
//!
//! Outputs are written only on success, and then completely.

use tabsim_core::types::{Histogram, MarginError, Margins, SimError};

use crate::histogram::HistogramResampler;
use crate::table::TableSampler;

/// Status returned on success.
pub const SUCCESS: i32 = 0;

fn check_shape(expected: usize, actual: usize) -> Result<(), SimError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SimError::ShapeMismatch { expected, actual })
    }
}

fn validate(
    row_count: usize,
    col_count: usize,
    row_sums: &[i32],
    col_sums: &[i32],
    out_len: usize,
) -> Result<Margins, SimError> {
    if row_count < 2 {
        return Err(MarginError::TooFewRows { rows: row_count }.into());
    }
    if col_count < 2 {
        return Err(MarginError::TooFewCols { cols: col_count }.into());
    }
    check_shape(row_count, row_sums.len())?;
    check_shape(col_count, col_sums.len())?;
    check_shape(row_count * col_count, out_len)?;

    let rows = row_sums.iter().map(|&v| i64::from(v)).collect();
    let cols = col_sums.iter().map(|&v| i64::from(v)).collect();
    Ok(Margins::new(rows, cols)?)
}

/// Fills `out` with a random table and returns a status code.
///
/// `out` must hold `row_count * col_count` cells.
pub fn sample_contingency_table_into(
    row_count: usize,
    col_count: usize,
    row_sums: &[i32],
    col_sums: &[i32],
    seed: i32,
    out: &mut [i32],
) -> i32 {
    let margins = match validate(row_count, col_count, row_sums, col_sums, out.len()) {
        Ok(margins) => margins,
        Err(err) => return err.code(),
    };

    let table = TableSampler::new().sample(&margins, i64::from(seed));
    for (slot, value) in out.iter_mut().zip(table.to_column_major()) {
        // Cells never exceed their row sum, which came in as i32.
        *slot = value as i32;
    }
    SUCCESS
}

/// Draws a random table and returns it column-major with a status code.
///
/// On failure the table is empty.
pub fn sample_contingency_table(
    row_count: usize,
    col_count: usize,
    row_sums: &[i32],
    col_sums: &[i32],
    seed: i32,
) -> (Vec<i32>, i32) {
    let mut out = vec![0; row_count.saturating_mul(col_count)];
    let code =
        sample_contingency_table_into(row_count, col_count, row_sums, col_sums, seed, &mut out);
    if code != SUCCESS {
        out.clear();
    }
    (out, code)
}

/// Resamples `counts` to `target_total` into `out`.
///
/// `counts_sum` is trusted, not recomputed.
///
/// # Errors
///
/// [`SimError::ShapeMismatch`] if `out` and `counts` differ in length.
pub fn resample_histogram(
    counts: &[i64],
    counts_sum: i64,
    target_total: i64,
    seed: u64,
    out: &mut [i64],
) -> Result<(), SimError> {
    let hist = Histogram::with_total(counts.to_vec(), counts_sum);
    HistogramResampler::new().resample_into(&hist, target_total, seed, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_writes_column_major() {
        let mut out = [0; 9];
        let code = sample_contingency_table_into(3, 3, &[3, 2, 5], &[4, 4, 2], 12345, &mut out);
        assert_eq!(code, SUCCESS);
        // Row-major [[1, 2, 0], [0, 1, 1], [3, 1, 1]]
        assert_eq!(out, [1, 0, 3, 2, 1, 1, 0, 1, 1]);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(sample_contingency_table(1, 2, &[3], &[1, 2], 1).1, 1);
        assert_eq!(sample_contingency_table(2, 1, &[1, 2], &[3], 1).1, 2);
        assert_eq!(sample_contingency_table(2, 2, &[3, -1], &[1, 1], 1).1, 3);
        assert_eq!(sample_contingency_table(2, 2, &[1, 1], &[0, 2], 1).1, 4);
        assert_eq!(sample_contingency_table(2, 2, &[1, 2], &[1, 1], 1).1, 6);
        assert_eq!(sample_contingency_table(3, 2, &[1, 2], &[1, 2], 1).1, 7);
    }

    #[test]
    fn test_failure_returns_empty_table() {
        let (table, code) = sample_contingency_table(2, 2, &[1, 2], &[1, 1], 1);
        assert_eq!(code, 6);
        assert!(table.is_empty());
    }

    #[test]
    fn test_buffer_untouched_on_error() {
        let mut out = [-9; 4];
        let code = sample_contingency_table_into(2, 2, &[0, 2], &[1, 1], 1, &mut out);
        assert_eq!(code, 3);
        assert_eq!(out, [-9; 4]);

        let mut short = [-9; 3];
        let code = sample_contingency_table_into(2, 2, &[1, 1], &[1, 1], 1, &mut short);
        assert_eq!(code, 7);
    }

    #[test]
    fn test_resample_histogram() {
        let mut out = [0; 3];
        resample_histogram(&[10, 20, 30], 60, 100, 5, &mut out).unwrap();
        assert_eq!(out.iter().sum::<i64>(), 100);

        let mut single = [0; 1];
        resample_histogram(&[5], 5, 5, 5, &mut single).unwrap();
        assert_eq!(single, [5]);
    }
}
