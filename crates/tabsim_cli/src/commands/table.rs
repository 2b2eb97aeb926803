//! Table command implementation
//!
//! Draws random contingency tables with fixed row and column sums.

use std::io::Write;
use std::sync::Arc;

use tabsim_core::math::FactorialCache;
use tabsim_core::types::{Margins, SimError};
use tabsim_sampling::TableSampler;
use tracing::info;

use crate::config::AppConfig;
use crate::{output, CliError, Result};

/// Run the table command
pub fn run<W: Write>(
    out: &mut W,
    config: &AppConfig,
    rows: Vec<i64>,
    cols: Vec<i64>,
    count: usize,
) -> Result<()> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "--count must be at least 1".to_string(),
        ));
    }

    let margins = Margins::new(rows, cols).map_err(SimError::from)?;
    let seed = config.table.seed;

    info!("Sampling contingency tables...");
    info!("  Shape: {}x{}", margins.rows(), margins.cols());
    info!("  Total: {}", margins.total());
    info!("  Seed: {}", seed);
    info!("  Count: {}", count);

    let sampler = TableSampler::with_cache(Arc::new(FactorialCache::new()));
    let tables = sampler.sample_many(&margins, seed, count);

    output::write_tables(out, config.format, &margins, seed, &tables)?;
    info!("Sampling complete");
    Ok(())
}
