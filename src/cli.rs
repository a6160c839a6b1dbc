//! CLI argument parsing for Iris

use crate::simulation::Scenario;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for classification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "iris")]
#[command(version)]
#[command(about = "Classify the shape of latency degradation across time windows", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify windows read from a JSON file
    Classify {
        /// JSON array of {"mean", "std", "p95"} objects, one per window in time order
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Treat FILE as a JSON array of raw latency arrays, one per window
        #[arg(long = "samples")]
        samples: bool,

        /// Output format (text or json)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate synthetic windows for a scenario and classify them
    Simulate {
        /// Degradation shape to generate
        #[arg(value_enum)]
        scenario: Scenario,

        /// TOML file with simulation parameters (flags below override it)
        #[arg(long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Number of windows
        #[arg(long = "windows", value_name = "N")]
        windows: Option<usize>,

        /// Samples drawn per window
        #[arg(long = "samples-per-window", value_name = "N")]
        samples_per_window: Option<usize>,

        /// Latency added per window in ms
        #[arg(long = "drift-step", value_name = "MS")]
        drift_step: Option<f64>,

        /// Seed for reproducible output
        #[arg(long = "seed")]
        seed: Option<u64>,

        /// Output format (text or json)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },
}
