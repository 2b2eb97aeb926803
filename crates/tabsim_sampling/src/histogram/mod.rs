//! Simulated datasets from an empirical histogram.
//!
//! [`HistogramResampler`] treats a (flattened, possibly multi-dimensional)
//! histogram as a probability density and draws a new histogram whose
//! total is exactly a requested count:
//!
//! 1. scale every bin by `target / total`
//! 2. draw each bin independently from a Poisson law with that mean
//! 3. correct the total one unit at a time, choosing bins by acceptance
//!    sampling proportional to their scaled counts
//!
//! All draws come from one [`SimRng`] stream, so output is a pure function
//! of the histogram, the target and the seed.
//!
//! # Examples
//!
//! ```rust
//! use tabsim_core::types::Histogram;
//! use tabsim_sampling::histogram::HistogramResampler;
//!
//! let hist = Histogram::new(vec![10, 20, 30]);
//! let out = HistogramResampler::new().resample(&hist, 100, 42).unwrap();
//! assert_eq!(out.iter().sum::<i64>(), 100);
//! ```

mod config;

pub use config::ResampleConfig;

use tabsim_core::rng::SimRng;
use tabsim_core::types::{Histogram, SimError};
use tracing::{debug, trace, warn};

/// Resampler preserving a target total.
#[derive(Clone, Debug, Default)]
pub struct HistogramResampler {
    config: ResampleConfig,
}

impl HistogramResampler {
    /// Creates a resampler with an unbounded corrective pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resampler with the given configuration.
    pub fn with_config(config: ResampleConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ResampleConfig {
        &self.config
    }

    /// Poisson means `count * target / total`, one per bin.
    ///
    /// A zero or negative total gives infinite, NaN or negative means.
    pub fn expected_counts(hist: &Histogram, target: i64) -> Vec<f64> {
        let scale = target as f64 / hist.total() as f64;
        hist.counts().iter().map(|&c| c as f64 * scale).collect()
    }

    /// Whether the corrective pass can ever accept a bin.
    ///
    /// True when at least one expected count is positive and finite. When
    /// this is false and the Poisson pass misses the target, an uncapped
    /// resample never returns.
    pub fn can_correct(hist: &Histogram, target: i64) -> bool {
        Self::expected_counts(hist, target)
            .iter()
            .any(|e| e.is_finite() && *e > 0.0)
    }

    /// Draws a histogram with `target` total counts.
    ///
    /// The histogram's total is taken as given; an inconsistent total skews
    /// the scaling but is not an error. `target` must be non-negative.
    ///
    /// # Errors
    ///
    /// [`SimError::ResampleExhausted`] if the iteration cap is reached, or
    /// if the histogram has no bins but `target` is not zero.
    pub fn resample(&self, hist: &Histogram, target: i64, seed: u64) -> Result<Vec<i64>, SimError> {
        let mut rng = SimRng::from_seed(seed);
        self.resample_with_rng(hist, target, &mut rng)
    }

    /// Like [`resample`](Self::resample), writing into `out`.
    ///
    /// `out` is only written when the call succeeds, and then in full.
    ///
    /// # Errors
    ///
    /// [`SimError::ShapeMismatch`] if `out` and the histogram differ in
    /// length, plus the errors of [`resample`](Self::resample).
    pub fn resample_into(
        &self,
        hist: &Histogram,
        target: i64,
        seed: u64,
        out: &mut [i64],
    ) -> Result<(), SimError> {
        if out.len() != hist.len() {
            return Err(SimError::ShapeMismatch {
                expected: hist.len(),
                actual: out.len(),
            });
        }
        let resampled = self.resample(hist, target, seed)?;
        out.copy_from_slice(&resampled);
        Ok(())
    }

    /// Draws a histogram from the caller's generator.
    pub fn resample_with_rng(
        &self,
        hist: &Histogram,
        target: i64,
        rng: &mut SimRng,
    ) -> Result<Vec<i64>, SimError> {
        debug_assert!(target >= 0, "target total must be non-negative");
        debug!(
            bins = hist.len(),
            total = hist.total(),
            target,
            seed = rng.seed(),
            "resampling histogram"
        );

        let expected = Self::expected_counts(hist, target);

        let mut out = vec![0; expected.len()];
        rng.fill_poisson(&expected, &mut out);

        let achieved: i64 = out.iter().sum();
        let increasing = achieved <= target;
        let mut deficit = (target - achieved).abs();
        debug!(achieved, deficit, increasing, "poisson pass complete");

        if deficit == 0 {
            return Ok(out);
        }
        if out.is_empty() {
            return Err(SimError::ResampleExhausted {
                iterations: 0,
                remaining: deficit,
            });
        }

        let max_expected = expected.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut iterations: u64 = 0;

        while deficit > 0 {
            if self.config.max_iterations.is_some_and(|cap| iterations >= cap) {
                warn!(iterations, remaining = deficit, "corrective pass exhausted");
                return Err(SimError::ResampleExhausted {
                    iterations,
                    remaining: deficit,
                });
            }
            iterations += 1;

            let bin = rng.gen_index(out.len());
            let u = rng.gen_uniform_to(max_expected);
            if u < expected[bin] {
                if increasing {
                    out[bin] += 1;
                } else if out[bin] > 0 {
                    out[bin] -= 1;
                } else {
                    continue;
                }
                deficit -= 1;
                trace!(bin, value = out[bin], deficit, "adjusted bin");
            }
        }

        debug!(iterations, "corrective pass complete");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_target_total() {
        let hist = Histogram::new(vec![10, 20, 30]);
        let resampler = HistogramResampler::new();
        for seed in 0..50 {
            let out = resampler.resample(&hist, 100, seed).unwrap();
            assert_eq!(out.iter().sum::<i64>(), 100, "seed {}", seed);
            assert!(out.iter().all(|&v| v >= 0));
        }
    }

    #[test]
    fn test_can_correct() {
        assert!(HistogramResampler::can_correct(&Histogram::new(vec![1, 2]), 5));
        assert!(HistogramResampler::can_correct(&Histogram::new(vec![0, 3]), 5));
        assert!(!HistogramResampler::can_correct(&Histogram::new(vec![0, 0]), 5));
        assert!(!HistogramResampler::can_correct(&Histogram::with_total(vec![1, 2], 0), 5));
        assert!(!HistogramResampler::can_correct(&Histogram::with_total(vec![1, 2], -3), 5));
    }

    #[test]
    fn test_non_positive_total_never_corrects() {
        let capped =
            HistogramResampler::with_config(ResampleConfig::new().with_max_iterations(10_000));
        for total in [0, -3] {
            let hist = Histogram::with_total(vec![1, 2], total);
            assert_eq!(
                capped.resample(&hist, 5, 1),
                Err(SimError::ResampleExhausted {
                    iterations: 10_000,
                    remaining: 5
                })
            );
        }
    }

    #[test]
    fn test_shrinking_target() {
        let hist = Histogram::new(vec![100, 200, 300, 0, 5]);
        let out = HistogramResampler::new().resample(&hist, 60, 3).unwrap();
        assert_eq!(out.iter().sum::<i64>(), 60);
        assert_eq!(out[3], 0, "empty bins stay empty");
    }

    #[test]
    fn test_single_bin() {
        let hist = Histogram::new(vec![5]);
        for seed in 0..20 {
            assert_eq!(HistogramResampler::new().resample(&hist, 5, seed).unwrap(), vec![5]);
        }
    }

    #[test]
    fn test_zero_target() {
        let hist = Histogram::new(vec![4, 0, 9]);
        let out = HistogramResampler::new().resample(&hist, 0, 11).unwrap();
        assert_eq!(out, vec![0, 0, 0]);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let hist = Histogram::new(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        let resampler = HistogramResampler::new();
        assert_eq!(
            resampler.resample(&hist, 77, 2024).unwrap(),
            resampler.resample(&hist, 77, 2024).unwrap()
        );
    }

    #[test]
    fn test_all_zero_histogram_exhausts_cap() {
        let hist = Histogram::with_total(vec![0, 0, 0], 1);
        let resampler =
            HistogramResampler::with_config(ResampleConfig::new().with_max_iterations(500));
        let err = resampler.resample(&hist, 10, 1).unwrap_err();
        assert_eq!(
            err,
            SimError::ResampleExhausted {
                iterations: 500,
                remaining: 10
            }
        );
    }

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram::new(vec![]);
        let resampler = HistogramResampler::new();
        assert_eq!(resampler.resample(&hist, 0, 1).unwrap(), Vec::<i64>::new());
        assert!(matches!(
            resampler.resample(&hist, 3, 1),
            Err(SimError::ResampleExhausted { iterations: 0, remaining: 3 })
        ));
    }

    #[test]
    fn test_resample_into() {
        let hist = Histogram::new(vec![10, 20, 30]);
        let resampler = HistogramResampler::new();

        let mut out = [0i64; 3];
        resampler.resample_into(&hist, 100, 8, &mut out).unwrap();
        assert_eq!(out.to_vec(), resampler.resample(&hist, 100, 8).unwrap());

        let mut short = [7i64; 2];
        let err = resampler.resample_into(&hist, 100, 8, &mut short).unwrap_err();
        assert_eq!(err, SimError::ShapeMismatch { expected: 3, actual: 2 });
        assert_eq!(short, [7, 7], "buffer untouched on error");
    }
}
