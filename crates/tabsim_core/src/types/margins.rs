//! Validated row and column sums.

use super::error::MarginError;

/// Row and column sums constraining a contingency table.
///
/// Construction validates every precondition of the table sampler, so a
/// `Margins` value always describes a non-empty set of tables:
///
/// 1. at least two rows
/// 2. at least two columns
/// 3. every row sum strictly positive
/// 4. every column sum strictly positive
/// 5. row sums and column sums share the same total, which fits in `i64`
///
/// # Examples
///
/// ```rust
/// use tabsim_core::types::{MarginError, Margins};
///
/// let margins = Margins::new(vec![3, 2, 5], vec![4, 4, 2]).unwrap();
/// assert_eq!(margins.shape(), (3, 3));
/// assert_eq!(margins.total(), 10);
///
/// let err = Margins::new(vec![3, 2], vec![4, 4]).unwrap_err();
/// assert_eq!(err, MarginError::SumMismatch { row_total: 5, col_total: 8 });
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMargins"))]
pub struct Margins {
    row_sums: Vec<i64>,
    col_sums: Vec<i64>,
    total: i64,
}

impl Margins {
    /// Validates and wraps the given row and column sums.
    ///
    /// # Errors
    ///
    /// Returns the [`MarginError`] for the first violated precondition.
    pub fn new(row_sums: Vec<i64>, col_sums: Vec<i64>) -> Result<Self, MarginError> {
        if row_sums.len() < 2 {
            return Err(MarginError::TooFewRows {
                rows: row_sums.len(),
            });
        }
        if col_sums.len() < 2 {
            return Err(MarginError::TooFewCols {
                cols: col_sums.len(),
            });
        }
        if let Some((index, &value)) = row_sums.iter().enumerate().find(|(_, &v)| v <= 0) {
            return Err(MarginError::NonPositiveRowSum { index, value });
        }
        if let Some((index, &value)) = col_sums.iter().enumerate().find(|(_, &v)| v <= 0) {
            return Err(MarginError::NonPositiveColSum { index, value });
        }

        let row_total = checked_total(&row_sums, "Row")?;
        let col_total = checked_total(&col_sums, "Column")?;
        if row_total != col_total {
            return Err(MarginError::SumMismatch {
                row_total,
                col_total,
            });
        }

        Ok(Self {
            row_sums,
            col_sums,
            total: row_total,
        })
    }

    /// Convenience constructor from slices.
    pub fn from_slices(row_sums: &[i64], col_sums: &[i64]) -> Result<Self, MarginError> {
        Self::new(row_sums.to_vec(), col_sums.to_vec())
    }

    /// Row sums.
    #[inline]
    pub fn row_sums(&self) -> &[i64] {
        &self.row_sums
    }

    /// Column sums.
    #[inline]
    pub fn col_sums(&self) -> &[i64] {
        &self.col_sums
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.row_sums.len()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.col_sums.len()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Total table mass N.
    #[inline]
    pub fn total(&self) -> i64 {
        self.total
    }
}

/// Deserialised form; `total` is recomputed rather than trusted.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMargins {
    row_sums: Vec<i64>,
    col_sums: Vec<i64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMargins> for Margins {
    type Error = MarginError;

    fn try_from(raw: RawMargins) -> Result<Self, Self::Error> {
        Margins::new(raw.row_sums, raw.col_sums)
    }
}

fn checked_total(sums: &[i64], axis: &'static str) -> Result<i64, MarginError> {
    sums.iter()
        .enumerate()
        .try_fold(0i64, |acc, (index, &v)| {
            acc.checked_add(v)
                .ok_or(MarginError::TotalOverflow { axis, index })
        })
}
