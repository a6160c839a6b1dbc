//! Window statistics over raw latency samples
//!
//! Reduces a batch of latency samples to the [`WindowStats`] the classifier
//! consumes: arithmetic mean, sample standard deviation and linearly
//! interpolated 95th percentile.

use crate::classify::{ClassifyError, Result, WindowStats};

/// Percentile reported as the window's tail latency
pub const TAIL_PERCENTILE: f64 = 95.0;

/// Calculate a percentile from sorted data
///
/// Linear interpolation between the two nearest ranks at
/// `(n - 1) * percentile / 100`.
///
/// # Example
/// ```
/// use iris::stats::percentile;
///
/// let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
/// assert_eq!(percentile(&sorted, 50.0).unwrap(), 30.0);
/// assert!((percentile(&sorted, 95.0).unwrap() - 48.0).abs() < 1e-9);
/// ```
pub fn percentile(sorted_data: &[f64], percentile: f64) -> Result<f64> {
    if sorted_data.is_empty() {
        return Err(ClassifyError::InvalidInput(
            "cannot take a percentile of an empty window".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&percentile) {
        return Err(ClassifyError::InvalidInput(format!(
            "percentile must be in [0, 100], got {}",
            percentile
        )));
    }
    if sorted_data.len() == 1 {
        return Ok(sorted_data[0]);
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = (lower + 1).min(sorted_data.len() - 1);

    if lower == upper {
        Ok(sorted_data[lower])
    } else {
        let weight = index - lower as f64;
        Ok(sorted_data[lower] + (sorted_data[upper] - sorted_data[lower]) * weight)
    }
}

/// Arithmetic mean; `None` for an empty slice
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

/// Sample standard deviation (n - 1 denominator), 0.0 below two samples
pub fn sample_std(samples: &[f64]) -> f64 {
    let Some(mean) = mean(samples) else {
        return 0.0;
    };
    if samples.len() < 2 {
        return 0.0;
    }

    let sum_sq: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (samples.len() - 1) as f64).sqrt()
}

/// Reduce one window of raw latencies to [`WindowStats`]
pub fn compute_window_stats(samples: &[f64]) -> Result<WindowStats> {
    if samples.is_empty() {
        return Err(ClassifyError::InvalidInput(
            "window has no samples".to_string(),
        ));
    }
    if let Some(bad) = samples.iter().find(|s| !s.is_finite()) {
        return Err(ClassifyError::InvalidInput(format!(
            "window contains non-finite sample {}",
            bad
        )));
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let stats = WindowStats {
        mean: mean(samples).unwrap_or(0.0),
        std: sample_std(samples),
        p95: percentile(&sorted, TAIL_PERCENTILE)?,
    };

    tracing::trace!(
        samples = samples.len(),
        mean = stats.mean,
        std = stats.std,
        p95 = stats.p95,
        "computed window stats"
    );

    Ok(stats)
}

/// Reduce consecutive windows of raw latencies, preserving order
pub fn windows_from_samples(windows: &[Vec<f64>]) -> Result<Vec<WindowStats>> {
    windows
        .iter()
        .enumerate()
        .map(|(index, samples)| {
            compute_window_stats(samples).map_err(|e| match e {
                ClassifyError::InvalidInput(msg) => {
                    ClassifyError::InvalidInput(format!("window {}: {}", index + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[42.0], 95.0).unwrap(), 42.0);
    }

    #[test]
    fn test_percentile_empty() {
        assert!(percentile(&[], 95.0).is_err());
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert!(percentile(&[1.0, 2.0], 101.0).is_err());
        assert!(percentile(&[1.0, 2.0], -1.0).is_err());
    }

    #[test]
    fn test_percentile_endpoints() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&sorted, 100.0).unwrap(), 4.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        // rank = 0.95 * 3 = 2.85 → 3 + 0.85 * (4 - 3)
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&sorted, 95.0).unwrap() - 3.85).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_uses_n_minus_one() {
        // mean 5, squared deviations sum to 20, / 3
        let std = sample_std(&[2.0, 4.0, 6.0, 8.0]);
        assert!((std - (20.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_short_windows() {
        assert_eq!(sample_std(&[]), 0.0);
        assert_eq!(sample_std(&[7.0]), 0.0);
    }

    #[test]
    fn test_compute_window_stats() {
        let stats = compute_window_stats(&[10.0, 12.0, 11.0, 13.0, 10.0]).unwrap();
        assert!((stats.mean - 11.2).abs() < 1e-12);
        assert!(stats.std > 0.0);
        // sorted [10, 10, 11, 12, 13], rank 3.8 → 12.8
        assert!((stats.p95 - 12.8).abs() < 1e-12);
    }

    #[test]
    fn test_compute_window_stats_single_sample() {
        let stats = compute_window_stats(&[25.0]).unwrap();
        assert_eq!(stats, WindowStats::new(25.0, 0.0, 25.0));
    }

    #[test]
    fn test_compute_window_stats_rejects_nan() {
        assert!(compute_window_stats(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_windows_from_samples_reports_window_index() {
        let err = windows_from_samples(&[vec![1.0, 2.0], vec![]]).unwrap_err();
        assert!(err.to_string().contains("window 2"));
    }

    #[test]
    fn test_windows_from_samples_preserves_order() {
        let stats = windows_from_samples(&[vec![30.0, 32.0], vec![20.0, 22.0]]).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].mean, 31.0);
        assert_eq!(stats[1].mean, 21.0);
    }
}
