//! Synthetic latency windows for each degradation pattern
//!
//! Generates raw samples window by window so the whole pipeline
//! (`stats` → `classify`) can be exercised end to end. The classifier never
//! depends on this module; tests of the classifier use fixed fixtures.
//!
//! Per window index `w`:
//!
//! - `Steady`: `U(base_min, base_max) + U(-jitter, jitter)`
//! - `SlowDrift`: the steady sample `+ w * drift_step`
//! - `VarianceExplosion`: centre of the base range `± U(spread)`, where the
//!   spread doubles every window
//! - `TailOnly`: centre `+ U(-jitter, jitter)`, with [`TAIL_FRACTION`] of
//!   samples pushed out by `2 * w * drift_step`

use crate::classify::{ClassifyError, Result};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Share of samples that land in the degrading tail for `TailOnly`
pub const TAIL_FRACTION: f64 = 0.06;

/// Upper bound on `windows`; the variance spread doubles per window
pub const MAX_WINDOWS: usize = 64;

/// Degradation shape to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    SlowDrift,
    VarianceExplosion,
    TailOnly,
    Steady,
}

/// Parameters for synthetic window generation
///
/// # Example
/// ```
/// use iris::simulation::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// assert_eq!(config.windows, 4);
/// assert_eq!(config.samples_per_window, 120);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of consecutive windows
    pub windows: usize,

    /// Samples drawn per window
    pub samples_per_window: usize,

    /// Lower bound of the uniform baseline latency (ms)
    pub base_min: f64,

    /// Upper bound of the uniform baseline latency (ms)
    pub base_max: f64,

    /// Half-width of the uniform per-sample jitter (ms)
    pub jitter: f64,

    /// Latency added per window for drifting scenarios (ms)
    pub drift_step: f64,

    /// Seed for reproducible runs; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            windows: 4,
            samples_per_window: 120,
            base_min: 20.0,
            base_max: 50.0,
            jitter: 2.0,
            drift_step: 3.0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(input: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.windows < 2 || self.windows > MAX_WINDOWS {
            return Err(format!(
                "windows must be >= 2 and <= {}, got {}",
                MAX_WINDOWS, self.windows
            ));
        }

        if self.samples_per_window < 2 {
            return Err(format!(
                "samples_per_window must be >= 2, got {}",
                self.samples_per_window
            ));
        }

        for (field, value) in [
            ("base_min", self.base_min),
            ("base_max", self.base_max),
            ("jitter", self.jitter),
            ("drift_step", self.drift_step),
        ] {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", field, value));
            }
        }

        if self.base_min < 0.0 || self.base_min >= self.base_max {
            return Err(format!(
                "base range must satisfy 0 <= base_min < base_max, got [{}, {}]",
                self.base_min, self.base_max
            ));
        }

        if self.jitter < 0.0 {
            return Err(format!("jitter must be non-negative, got {}", self.jitter));
        }

        if self.drift_step < 0.0 {
            return Err(format!(
                "drift_step must be non-negative, got {}",
                self.drift_step
            ));
        }

        // Sampling draws from [-spread, spread]; its width must stay finite
        let widest = 2.0 * variance_spread(self.jitter, self.windows - 1);
        if widest.is_infinite() {
            return Err(format!(
                "jitter {} overflows the variance spread over {} windows",
                self.jitter, self.windows
            ));
        }

        Ok(())
    }
}

fn variance_spread(jitter: f64, window: usize) -> f64 {
    jitter.max(1.0) * 2f64.powi(window as i32)
}

fn uniform(rng: &mut StdRng, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.gen_range(-half_width..=half_width)
    } else {
        0.0
    }
}

fn sample(rng: &mut StdRng, scenario: Scenario, window: usize, config: &SimulationConfig) -> f64 {
    let w = window as f64;
    let jitter = uniform(rng, config.jitter);

    let value = match scenario {
        Scenario::SlowDrift => {
            rng.gen_range(config.base_min..config.base_max) + w * config.drift_step + jitter
        }
        Scenario::Steady => rng.gen_range(config.base_min..config.base_max) + jitter,
        Scenario::VarianceExplosion => {
            let centre = (config.base_min + config.base_max) / 2.0;
            centre + uniform(rng, variance_spread(config.jitter, window))
        }
        Scenario::TailOnly => {
            let centre = (config.base_min + config.base_max) / 2.0;
            let tail = if rng.gen_bool(TAIL_FRACTION) {
                2.0 * w * config.drift_step
            } else {
                0.0
            };
            centre + jitter + tail
        }
    };

    value.max(0.0)
}

/// Generate `config.windows` windows of raw latency samples
pub fn simulate(scenario: Scenario, config: &SimulationConfig) -> Result<Vec<Vec<f64>>> {
    config.validate().map_err(ClassifyError::InvalidInput)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::debug!(
        ?scenario,
        windows = config.windows,
        samples_per_window = config.samples_per_window,
        seed = ?config.seed,
        "simulating latency windows"
    );

    let windows: Vec<Vec<f64>> = (0..config.windows)
        .map(|window| {
            (0..config.samples_per_window)
                .map(|_| sample(&mut rng, scenario, window, config))
                .collect()
        })
        .collect();

    Ok(windows)
}
