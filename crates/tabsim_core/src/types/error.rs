//! Error types for structured error handling.
//!
//! This module provides:
//! - `MarginError`: Invalid row/column sums passed to the table sampler
//! - `SimError`: Top-level error for sampling and resampling operations

use thiserror::Error;

/// Invalid margins for a contingency table.
///
/// Each variant corresponds to one precondition of the table sampler and
/// carries the offending values. Checks run in declaration order, so the
/// first violated precondition is the one reported.
///
/// # Examples
/// ```
/// use tabsim_core::types::MarginError;
///
/// let err = MarginError::NonPositiveRowSum { index: 1, value: -1 };
/// assert_eq!(err.code(), 3);
/// assert_eq!(format!("{}", err), "Row sum at index 1 is not positive: -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarginError {
    /// Fewer than two rows.
    #[error("Table needs at least 2 rows, got {rows}")]
    TooFewRows {
        /// Number of rows supplied
        rows: usize,
    },

    /// Fewer than two columns.
    #[error("Table needs at least 2 columns, got {cols}")]
    TooFewCols {
        /// Number of columns supplied
        cols: usize,
    },

    /// A row sum is zero or negative.
    #[error("Row sum at index {index} is not positive: {value}")]
    NonPositiveRowSum {
        /// Row index
        index: usize,
        /// Offending sum
        value: i64,
    },

    /// A column sum is zero or negative.
    #[error("Column sum at index {index} is not positive: {value}")]
    NonPositiveColSum {
        /// Column index
        index: usize,
        /// Offending sum
        value: i64,
    },

    /// Row sums and column sums disagree on the table total.
    #[error("Row sums total {row_total} but column sums total {col_total}")]
    SumMismatch {
        /// Sum of the row sums
        row_total: i64,
        /// Sum of the column sums
        col_total: i64,
    },

    /// Adding up the row or column sums overflows `i64`.
    #[error("{axis} sums overflow i64 at index {index}")]
    TotalOverflow {
        /// `"Row"` or `"Column"`
        axis: &'static str,
        /// Index of the sum that overflowed the running total
        index: usize,
    },
}

impl MarginError {
    /// Historical numeric error code.
    ///
    /// | Variant | Code |
    /// |---------|------|
    /// | `TooFewRows` | 1 |
    /// | `TooFewCols` | 2 |
    /// | `NonPositiveRowSum` | 3 |
    /// | `NonPositiveColSum` | 4 |
    /// | `SumMismatch` | 6 |
    /// | `TotalOverflow` | 9 |
    ///
    /// Code 5 is reserved and never produced.
    pub fn code(&self) -> i32 {
        match self {
            MarginError::TooFewRows { .. } => 1,
            MarginError::TooFewCols { .. } => 2,
            MarginError::NonPositiveRowSum { .. } => 3,
            MarginError::NonPositiveColSum { .. } => 4,
            MarginError::SumMismatch { .. } => 6,
            MarginError::TotalOverflow { .. } => 9,
        }
    }
}

/// Errors from sampling and resampling operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Margins failed validation.
    #[error("Invalid margins: {0}")]
    InvalidMargins(#[from] MarginError),

    /// A flat buffer or declared dimension does not match the data supplied.
    #[error("Shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        /// Length required
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// The corrective pass hit its iteration limit before reaching the target.
    #[error("Resample exhausted after {iterations} draws with {remaining} adjustments outstanding")]
    ResampleExhausted {
        /// Number of bin draws performed
        iterations: u64,
        /// Adjustments still required
        remaining: i64,
    },
}

impl SimError {
    /// Numeric code used by the flat-buffer entry points.
    ///
    /// Margin errors keep their historical codes; shape mismatches map to 7
    /// and exhausted resamples to 8.
    pub fn code(&self) -> i32 {
        match self {
            SimError::InvalidMargins(err) => err.code(),
            SimError::ShapeMismatch { .. } => 7,
            SimError::ResampleExhausted { .. } => 8,
        }
    }
}
