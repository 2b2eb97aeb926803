//! # tabsim Sampling (Kernel Layer)
//!
//! Random data under fixed marginal constraints, for permutation-style
//! significance testing of association measures:
//!
//! - [`table`]: random R x C tables with given row and column sums
//!   (Patefield's AS 159)
//! - [`histogram`]: simulated histograms with an exact target total
//! - [`compat`]: flat-buffer entry points returning numeric status codes
//!
//! Every routine is a pure function of its inputs and a seed. Nothing here
//! spawns threads or keeps state between calls; a
//! [`FactorialCache`](tabsim_core::math::FactorialCache) is shared only if
//! the caller hands one to [`TableSampler::with_cache`].
//!
//! ## Usage Example
//!
//! ```rust
//! use tabsim_core::types::{Histogram, Margins};
//! use tabsim_sampling::{HistogramResampler, TableSampler};
//!
//! let margins = Margins::new(vec![10, 20], vec![15, 15]).unwrap();
//! let table = TableSampler::new().sample(&margins, 2024);
//! assert_eq!(table.col_sums(), vec![15, 15]);
//!
//! let hist = Histogram::from_table(&table);
//! let simulated = HistogramResampler::new().resample(&hist, 300, 7).unwrap();
//! assert_eq!(simulated.iter().sum::<i64>(), 300);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compat;
pub mod histogram;
pub mod table;

pub use histogram::{HistogramResampler, ResampleConfig};
pub use table::TableSampler;
