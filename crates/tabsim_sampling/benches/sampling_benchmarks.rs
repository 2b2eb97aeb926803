//! Criterion benchmarks for table sampling and histogram resampling.
//!
//! Measures how the AS 159 walk scales with table shape and total mass,
//! the saving from a shared factorial cache, and resampler throughput
//! across histogram sizes.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tabsim_core::math::FactorialCache;
use tabsim_core::types::{Histogram, Margins};
use tabsim_sampling::{HistogramResampler, TableSampler};

/// Square margins with `n` rows and columns, each summing to `per_line`.
fn square_margins(n: usize, per_line: i64) -> Margins {
    Margins::new(vec![per_line; n], vec![per_line; n]).unwrap()
}

/// Benchmark table sampling with and without a shared cache.
fn bench_table_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_sampling");

    for (n, per_line) in [(2, 50), (5, 1_000), (10, 10_000)] {
        let margins = square_margins(n, per_line);
        let label = format!("{}x{}_N{}", n, n, margins.total());

        // Fresh log-factorials per call
        let sampler = TableSampler::new();
        group.bench_with_input(BenchmarkId::new("uncached", &label), &margins, |b, m| {
            let mut seed = 1;
            b.iter(|| {
                seed += 1;
                sampler.sample(black_box(m), seed)
            });
        });

        // Shared cache, warmed before timing
        let cached = TableSampler::with_cache(Arc::new(FactorialCache::new()));
        let _ = cached.sample(&margins, 0);
        group.bench_with_input(BenchmarkId::new("cached", &label), &margins, |b, m| {
            let mut seed = 1;
            b.iter(|| {
                seed += 1;
                cached.sample(black_box(m), seed)
            });
        });
    }

    group.finish();
}

/// Benchmark histogram resampling across bin counts.
fn bench_histogram_resampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_resampling");
    let resampler = HistogramResampler::new();

    for bins in [10usize, 100, 1_000] {
        let counts: Vec<i64> = (0..bins).map(|i| 1 + (i as i64 * 37) % 50).collect();
        let hist = Histogram::new(counts);
        let target = hist.total() * 2;

        group.bench_with_input(BenchmarkId::new("double_total", bins), &hist, |b, h| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                resampler.resample(black_box(h), target, seed).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_table_sampling, bench_histogram_resampling);
criterion_main!(benches);
