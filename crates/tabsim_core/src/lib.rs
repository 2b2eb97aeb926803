//! # tabsim Core (Core Layer)
//!
//! Foundation types shared by the samplers and the command-line service:
//!
//! - [`types`]: margins, contingency tables, histograms and error types
//! - [`rng`]: the Park–Miller generator used by the table sampler and the
//!   seeded `rand` wrapper used by the histogram resampler
//! - [`math`]: natural-log-factorial tables and the per-total cache
//!
//! ## Usage Example
//!
//! ```rust
//! use tabsim_core::types::{ContingencyTable, Margins};
//!
//! let margins = Margins::new(vec![3, 2], vec![1, 4]).unwrap();
//! assert_eq!(margins.total(), 5);
//!
//! let mut table = ContingencyTable::zeros(2, 2);
//! table.set(0, 1, 3);
//! assert_eq!(table.get(0, 1), 3);
//! ```
//!
//! No module in this crate holds global mutable state. The only shared
//! structure, [`math::FactorialCache`], is owned by whoever creates it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;

pub use types::{ContingencyTable, Histogram, MarginError, Margins, SimError};
