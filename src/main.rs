use anyhow::{Context, Result};
use clap::Parser;
use iris::classify::WindowStats;
use iris::cli::{Cli, Command, OutputFormat};
use iris::report::ClassificationReport;
use iris::simulation::{self, Scenario, SimulationConfig};
use iris::stats;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load windows from a JSON file of window stats or raw samples
fn load_windows(path: &Path, samples: bool) -> Result<Vec<WindowStats>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if samples {
        let raw: Vec<Vec<f64>> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse raw samples from {}", path.display()))?;
        Ok(stats::windows_from_samples(&raw)?)
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse window stats from {}", path.display()))
    }
}

/// Build simulation config: TOML file first, then flag overrides
fn load_simulation_config(
    path: Option<&Path>,
    windows: Option<usize>,
    samples_per_window: Option<usize>,
    drift_step: Option<f64>,
    seed: Option<u64>,
) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SimulationConfig::from_toml_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(windows) = windows {
        config.windows = windows;
    }
    if let Some(samples_per_window) = samples_per_window {
        config.samples_per_window = samples_per_window;
    }
    if let Some(drift_step) = drift_step {
        config.drift_step = drift_step;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    Ok(config)
}

fn print_report(report: &ClassificationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn run_classify(input: PathBuf, samples: bool, format: OutputFormat) -> Result<()> {
    let windows = load_windows(&input, samples)?;
    let report = ClassificationReport::from_windows(windows)
        .with_context(|| format!("Failed to classify {}", input.display()))?;
    print_report(&report, format)
}

fn run_simulate(scenario: Scenario, config: &SimulationConfig, format: OutputFormat) -> Result<()> {
    let raw = simulation::simulate(scenario, config)?;
    let windows = stats::windows_from_samples(&raw)?;
    let report = ClassificationReport::from_windows(windows)?;
    print_report(&report, format)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::Classify {
            input,
            samples,
            format,
        } => run_classify(input, samples, format),
        Command::Simulate {
            scenario,
            config,
            windows,
            samples_per_window,
            drift_step,
            seed,
            format,
        } => {
            let config = load_simulation_config(
                config.as_deref(),
                windows,
                samples_per_window,
                drift_step,
                seed,
            )?;
            run_simulate(scenario, &config, format)
        }
    }
}
