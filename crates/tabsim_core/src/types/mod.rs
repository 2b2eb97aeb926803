//! Core data types.
//!
//! - [`Margins`]: validated row and column sums
//! - [`ContingencyTable`]: row-major integer matrix with `(row, col)` access
//! - [`Histogram`]: flattened bin counts with a caller-asserted total
//! - [`MarginError`], [`SimError`]: structured errors

pub mod error;
pub mod histogram;
pub mod margins;
pub mod table;

pub use error::{MarginError, SimError};
pub use histogram::Histogram;
pub use margins::Margins;
pub use table::ContingencyTable;
