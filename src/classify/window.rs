// Per-window latency summary consumed by the classifier
//
// Windows are produced externally (see `crate::stats` for one producer) and
// are treated as immutable values. Order of a window slice encodes time.

use crate::classify::error::{ClassifyError, Result};
use serde::{Deserialize, Serialize};

/// Summary statistics for one fixed-size time window of latency samples
///
/// All windows passed to a single classification run must share a latency
/// unit and window size.
///
/// # Example
/// ```
/// use iris::classify::WindowStats;
///
/// let window = WindowStats::new(30.0, 1.1, 35.0);
/// assert!(window.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Average latency in the window
    pub mean: f64,

    /// Sample standard deviation (0.0 for windows with fewer than 2 samples)
    pub std: f64,

    /// 95th-percentile latency
    pub p95: f64,
}

impl WindowStats {
    pub const fn new(mean: f64, std: f64, p95: f64) -> Self {
        Self { mean, std, p95 }
    }

    /// Check that every field is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("mean", self.mean), ("std", self.std), ("p95", self.p95)] {
            if !value.is_finite() {
                return Err(ClassifyError::InvalidInput(format!(
                    "{field} must be finite, got {value}"
                )));
            }
            if value < 0.0 {
                return Err(ClassifyError::InvalidInput(format!(
                    "{field} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_zero_std() {
        assert!(WindowStats::new(10.0, 0.0, 10.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let err = WindowStats::new(f64::NAN, 1.0, 2.0).validate().unwrap_err();
        assert!(err.to_string().contains("mean"));
    }

    #[test]
    fn test_validate_rejects_negative_std() {
        let err = WindowStats::new(10.0, -0.5, 12.0).validate().unwrap_err();
        assert!(err.to_string().contains("std"));
    }

    #[test]
    fn test_validate_rejects_infinite_p95() {
        assert!(WindowStats::new(10.0, 1.0, f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        let window: WindowStats =
            serde_json::from_str(r#"{"mean": 30.5, "std": 1.2, "p95": 36.0}"#).unwrap();
        assert_eq!(window, WindowStats::new(30.5, 1.2, 36.0));
    }
}
