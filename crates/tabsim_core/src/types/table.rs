//! Row-major contingency table storage.

/// A rows-by-columns matrix of non-negative counts.
///
/// Cells are stored row-major: cell `(row, col)` lives at
/// `row * cols + col`. All access goes through [`get`](Self::get),
/// [`set`](Self::set) and the row views; callers never compute offsets.
/// [`to_column_major`](Self::to_column_major) produces the
/// `row + col * rows` layout used by the flat-buffer entry points.
///
/// # Examples
///
/// ```rust
/// use tabsim_core::types::ContingencyTable;
///
/// let table = ContingencyTable::from_rows(&[vec![1, 2, 0], vec![3, 0, 1]]).unwrap();
/// assert_eq!(table.row_sums(), vec![3, 4]);
/// assert_eq!(table.col_sums(), vec![4, 2, 1]);
/// assert_eq!(table.to_column_major(), vec![1, 3, 2, 0, 0, 1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTable"))]
pub struct ContingencyTable {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl ContingencyTable {
    /// Creates a table of the given shape filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Builds a table from a list of equally long rows.
    ///
    /// Returns `None` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<i64>]) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            cols,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Cell value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.cells[self.offset(row, col)]
    }

    /// Overwrites the cell at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        let idx = self.offset(row, col);
        self.cells[idx] = value;
    }

    /// Read-only view of one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[i64] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Mutable view of one row.
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [i64] {
        let start = row * self.cols;
        &mut self.cells[start..start + self.cols]
    }

    /// Iterator over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i64]> {
        // chunks_exact(0) panics; an empty table has no rows to yield anyway
        self.cells.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Row-major cell slice.
    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Consumes the table and returns its row-major cells.
    pub fn into_vec(self) -> Vec<i64> {
        self.cells
    }

    /// Cells in column-major order (`row + col * rows`).
    pub fn to_column_major(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.cells.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                out.push(self.get(row, col));
            }
        }
        out
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<i64> {
        self.iter_rows().map(|r| r.iter().sum()).collect()
    }

    /// Sum of each column.
    pub fn col_sums(&self) -> Vec<i64> {
        let mut sums = vec![0; self.cols];
        for r in self.iter_rows() {
            for (sum, &v) in sums.iter_mut().zip(r) {
                *sum += v;
            }
        }
        sums
    }

    /// Sum of all cells.
    pub fn total(&self) -> i64 {
        self.cells.iter().sum()
    }
}

/// Deserialised form, checked against its declared shape.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTable {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTable> for ContingencyTable {
    type Error = super::error::SimError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let expected = raw.rows.checked_mul(raw.cols).unwrap_or(usize::MAX);
        if raw.cells.len() != expected {
            return Err(super::error::SimError::ShapeMismatch {
                expected,
                actual: raw.cells.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}
