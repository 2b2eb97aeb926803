//! Mathematical utilities.
//!
//! - [`LogFactorials`]: natural-log-factorials `ln(0!) .. ln(N!)`
//! - [`FactorialCache`]: thread-safe build-once-per-N memo of those tables

mod factorial;

pub use factorial::{FactorialCache, LogFactorials};
