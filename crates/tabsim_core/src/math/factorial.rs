//! Log-factorial tables and their per-total cache.
//!
//! Combinatorial probabilities in the table sampler are evaluated as sums
//! and differences of `ln(k!)` and exponentiated once, which keeps them
//! finite for totals far beyond where `k!` overflows.
//!
//! ## Caching
//!
//! A table for total N costs N logarithms. Callers drawing many tables with
//! the same total share one through [`FactorialCache`], which maps N to an
//! immutable `Arc<LogFactorials>`. Lookups take a read lock; a miss takes
//! the write lock, re-checks, and builds at most once per N.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

/// Natural-log-factorials `ln(k!)` for `k` in `0..=N`.
///
/// # Examples
///
/// ```rust
/// use tabsim_core::math::LogFactorials;
///
/// let table = LogFactorials::new(5);
/// assert_eq!(table.max_n(), 5);
/// assert!((table.ln_factorial(5) - 120f64.ln()).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LogFactorials {
    values: Vec<f64>,
}

impl LogFactorials {
    /// Builds the table for `0..=n` by running summation of `ln(k)`.
    pub fn new(n: usize) -> Self {
        let mut values = Vec::with_capacity(n + 1);
        let mut acc = 0.0;
        values.push(acc);
        for k in 1..=n {
            acc += (k as f64).ln();
            values.push(acc);
        }
        Self { values }
    }

    /// Largest `k` covered.
    #[inline]
    pub fn max_n(&self) -> usize {
        self.values.len() - 1
    }

    /// `ln(k!)`.
    ///
    /// # Panics
    ///
    /// Panics if `k` is negative or exceeds [`max_n`](Self::max_n).
    #[inline]
    pub fn ln_factorial(&self, k: i64) -> f64 {
        self.values[k as usize]
    }

    /// All values, indexed by `k`.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Thread-safe memo of [`LogFactorials`] keyed by total mass N.
///
/// Tables are immutable once built and handed out as `Arc`s, so a reader
/// never observes a partially built table. Entries live until
/// [`invalidate`](Self::invalidate) or [`clear`](Self::clear) is called.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tabsim_core::math::FactorialCache;
///
/// let cache = FactorialCache::new();
/// let a = cache.get_or_build(100);
/// let b = cache.get_or_build(100);
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.len(), 1);
///
/// assert!(cache.invalidate(100));
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct FactorialCache {
    tables: RwLock<HashMap<usize, Arc<LogFactorials>>>,
}

impl FactorialCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table for total `n`, building it on first request.
    pub fn get_or_build(&self, n: usize) -> Arc<LogFactorials> {
        {
            let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(table) = tables.get(&n) {
                return Arc::clone(table);
            }
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(tables.entry(n).or_insert_with(|| {
            debug!(total = n, "building log-factorial table");
            Arc::new(LogFactorials::new(n))
        }))
    }

    /// Drops the table for total `n`. Returns whether one was cached.
    pub fn invalidate(&self, n: usize) -> bool {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&n)
            .is_some()
    }

    /// Drops every cached table.
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a table for total `n` is cached.
    pub fn contains(&self, n: usize) -> bool {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;

    #[test]
    fn test_small_values() {
        let table = LogFactorials::new(10);
        assert_eq!(table.ln_factorial(0), 0.0);
        assert_eq!(table.ln_factorial(1), 0.0);
        assert_relative_eq!(table.ln_factorial(2), 2f64.ln(), epsilon = 1e-14);
        assert_relative_eq!(table.ln_factorial(10), 3_628_800f64.ln(), epsilon = 1e-12);
        assert_eq!(table.as_slice().len(), 11);
    }

    #[test]
    fn test_zero_total() {
        let table = LogFactorials::new(0);
        assert_eq!(table.max_n(), 0);
        assert_eq!(table.ln_factorial(0), 0.0);
    }

    #[test]
    fn test_large_total_stays_finite() {
        let table = LogFactorials::new(100_000);
        let v = table.ln_factorial(100_000);
        assert!(v.is_finite());
        // Stirling: n ln n - n + 0.5 ln(2 pi n)
        let n = 100_000f64;
        let stirling = n * n.ln() - n + 0.5 * (2.0 * std::f64::consts::PI * n).ln();
        assert_relative_eq!(v, stirling, max_relative = 1e-9);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let table = LogFactorials::new(3);
        let _ = table.ln_factorial(4);
    }

    #[test]
    fn test_cache_reuses_tables() {
        let cache = FactorialCache::new();
        let a = cache.get_or_build(50);
        let b = cache.get_or_build(50);
        let c = cache.get_or_build(60);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(60));
    }

    #[test]
    fn test_cache_invalidation_rebuilds() {
        let cache = FactorialCache::new();
        let a = cache.get_or_build(20);
        assert!(cache.invalidate(20));
        assert!(!cache.invalidate(20));
        let b = cache.get_or_build(20);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_concurrent_builds_once() {
        let cache = Arc::new(FactorialCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_build(1_000))
            })
            .collect();

        let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for t in &tables[1..] {
            assert!(Arc::ptr_eq(&tables[0], t));
        }
        assert_eq!(cache.len(), 1);
    }
}
