//! tabsim CLI - Random Contingency Tables and Histograms
//!
//! Command-line front end for the tabsim sampling library.
//!
//! # Commands
//!
//! - `tabsim table --rows 3,2,5 --cols 4,4,2` - Draw tables with fixed margins
//! - `tabsim resample --counts 10,20,30 --target 100` - Simulate a histogram
//!   with a fixed total
//! - `tabsim check` - Print the effective configuration and self-test
//!
//! # Architecture
//!
//! As the service layer, this crate owns configuration, logging and output
//! formatting; all sampling happens in `tabsim_sampling`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, OutputFormat};

/// Random contingency tables and histograms with fixed totals
#[derive(Parser)]
#[command(name = "tabsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: tabsim.toml, if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw random tables with the given row and column sums
    Table {
        /// Row sums, comma separated
        #[arg(short, long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        rows: Vec<i64>,

        /// Column sums, comma separated
        #[arg(short = 'k', long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        cols: Vec<i64>,

        /// Generator seed (reduced modulo 2^31-1)
        #[arg(short, long, allow_negative_numbers = true)]
        seed: Option<i64>,

        /// Number of tables to draw from one stream
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Simulate a histogram with a fixed total
    Resample {
        /// Input bin counts, comma separated
        #[arg(short = 'b', long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        counts: Vec<i64>,

        /// Required total of the simulated histogram
        #[arg(short, long, allow_negative_numbers = true)]
        target: i64,

        /// Override the input total used to scale the Poisson means
        #[arg(long)]
        total: Option<i64>,

        /// Generator seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Cap on corrective-pass bin draws
        #[arg(short, long)]
        max_iterations: Option<u64>,
    },

    /// Print the effective configuration and run a self-test
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        verbose: cli.verbose,
        format: cli.format,
    })?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Table {
            rows,
            cols,
            seed,
            count,
        } => {
            if let Some(seed) = seed {
                config.table.seed = seed;
            }
            commands::table::run(&mut out, &config, rows, cols, count)
        }
        Commands::Resample {
            counts,
            target,
            total,
            seed,
            max_iterations,
        } => {
            if let Some(seed) = seed {
                config.resample.seed = seed;
            }
            if max_iterations.is_some() {
                config.resample.max_iterations = max_iterations;
            }
            commands::resample::run(&mut out, &config, counts, target, total)
        }
        Commands::Check => commands::check::run(&mut out, &config),
    }
}
