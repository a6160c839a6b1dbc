// Feature extraction: ordered window statistics → trend/stability scalars
//
// Window order encodes time and is never re-sorted. Deltas use the full
// range of each metric rather than first/last endpoints, so one noisy
// window in the middle still registers.

use crate::classify::error::{ClassifyError, Result};
use crate::classify::window::WindowStats;
use serde::{Deserialize, Serialize};

/// Minimum number of windows (one inter-window step)
pub const MIN_WINDOWS: usize = 2;

/// Tolerated per-step decrease when testing the mean trend
pub const MEAN_SLACK: f64 = 0.3;

/// Tolerated per-step decrease when testing the p95 trend
pub const P95_SLACK: f64 = 0.5;

/// Substituted for a zero first-window std in `std_growth`
pub const STD_EPSILON: f64 = 1e-9;

/// Scalar features derived from one ordered run of windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub p95s: Vec<f64>,

    /// max(means) - min(means)
    pub mean_delta: f64,
    /// max(stds) - min(stds)
    pub std_delta: f64,
    /// max(p95s) - min(p95s)
    pub p95_delta: f64,

    /// Means non-decreasing within [`MEAN_SLACK`]
    pub mean_trend_up: bool,
    /// p95s non-decreasing within [`P95_SLACK`]
    pub p95_trend_up: bool,

    /// Last std over first std (first floored to [`STD_EPSILON`] when zero),
    /// capped at `f64::MAX`
    pub std_growth: f64,
}

/// "Almost monotonic" test: true iff `seq[i] <= seq[i + 1] + slack` for
/// every adjacent pair. Any single step that drops by more than `slack`
/// breaks it.
///
/// # Example
/// ```
/// use iris::classify::is_monotonic_increasing;
///
/// assert!(!is_monotonic_increasing(&[5.0, 4.0, 10.0], 0.0));
/// assert!(is_monotonic_increasing(&[5.0, 4.0, 10.0], 2.0));
/// ```
pub fn is_monotonic_increasing(seq: &[f64], slack: f64) -> bool {
    seq.windows(2).all(|pair| pair[0] <= pair[1] + slack)
}

fn range(seq: &[f64]) -> f64 {
    let max = seq.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = seq.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

/// Reduce an ordered sequence of windows to a [`FeatureSet`]
///
/// Fails with [`ClassifyError::InsufficientWindows`] for fewer than
/// [`MIN_WINDOWS`] windows and [`ClassifyError::InvalidInput`] when a window
/// holds a negative or non-finite value. A zero-variance first window is
/// not an error.
pub fn extract(windows: &[WindowStats]) -> Result<FeatureSet> {
    if windows.len() < MIN_WINDOWS {
        tracing::warn!(windows = windows.len(), "rejecting run with too few windows");
        return Err(ClassifyError::InsufficientWindows {
            required: MIN_WINDOWS,
            actual: windows.len(),
        });
    }

    for (index, window) in windows.iter().enumerate() {
        window.validate().map_err(|e| match e {
            ClassifyError::InvalidInput(msg) => {
                ClassifyError::InvalidInput(format!("window {}: {}", index + 1, msg))
            }
            other => other,
        })?;
    }

    let means: Vec<f64> = windows.iter().map(|w| w.mean).collect();
    let stds: Vec<f64> = windows.iter().map(|w| w.std).collect();
    let p95s: Vec<f64> = windows.iter().map(|w| w.p95).collect();

    let first_std = if stds[0] != 0.0 { stds[0] } else { STD_EPSILON };
    // Saturates instead of overflowing to inf for tiny first stds
    let std_growth = (stds[stds.len() - 1] / first_std).min(f64::MAX);

    let features = FeatureSet {
        mean_delta: range(&means),
        std_delta: range(&stds),
        p95_delta: range(&p95s),
        mean_trend_up: is_monotonic_increasing(&means, MEAN_SLACK),
        p95_trend_up: is_monotonic_increasing(&p95s, P95_SLACK),
        std_growth,
        means,
        stds,
        p95s,
    };

    tracing::debug!(
        windows = windows.len(),
        mean_delta = features.mean_delta,
        std_delta = features.std_delta,
        p95_delta = features.p95_delta,
        mean_trend_up = features.mean_trend_up,
        p95_trend_up = features.p95_trend_up,
        std_growth = features.std_growth,
        "extracted features"
    );

    Ok(features)
}
