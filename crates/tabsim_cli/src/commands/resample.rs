//! Resample command implementation
//!
//! Simulates a histogram with the same shape as the input and a fixed total.

use std::io::Write;

use tabsim_core::types::Histogram;
use tabsim_sampling::HistogramResampler;
use tracing::info;

use crate::config::AppConfig;
use crate::{output, CliError, Result};

/// Run the resample command
///
/// `total` overrides the computed input total, which rescales the Poisson
/// means without touching the counts.
pub fn run<W: Write>(
    out: &mut W,
    config: &AppConfig,
    counts: Vec<i64>,
    target: i64,
    total: Option<i64>,
) -> Result<()> {
    if target < 0 {
        return Err(CliError::InvalidArgument(format!(
            "--target must be non-negative, got {}",
            target
        )));
    }
    if let Some((bin, value)) = counts.iter().enumerate().find(|(_, &c)| c < 0) {
        return Err(CliError::InvalidArgument(format!(
            "bin {} has negative count {}",
            bin, value
        )));
    }

    let hist = match total {
        Some(total) => Histogram::with_total(counts, total),
        None => Histogram::new(counts),
    };
    if target > 0
        && config.resample.max_iterations.is_none()
        && !HistogramResampler::can_correct(&hist, target)
    {
        // No bin has a positive finite mean, so the corrective pass would
        // never terminate.
        return Err(CliError::InvalidArgument(format!(
            "no bin can absorb a target of {} with input total {}; \
             set --max-iterations to attempt it anyway",
            target,
            hist.total()
        )));
    }
    let seed = config.resample.seed;

    info!("Resampling histogram...");
    info!("  Bins: {}", hist.len());
    info!("  Input total: {}", hist.total());
    info!("  Target: {}", target);
    info!("  Seed: {}", seed);

    let resampler = HistogramResampler::with_config(config.resample.to_resample_config());
    let simulated = resampler.resample(&hist, target, seed)?;

    output::write_histogram(out, config.format, &hist, target, seed, &simulated)?;
    info!("Resampling complete");
    Ok(())
}
