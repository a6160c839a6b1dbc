//! Human-readable and JSON rendering of classification runs

use crate::classify::{
    analyze, Analysis, ClassificationResult, FeatureSet, Label, PatternEvidence, Result,
    WindowStats,
};
use serde::Serialize;

/// One-line reading of a label for operators
pub fn interpretation(label: Label) -> &'static str {
    match label {
        Label::SlowDrift => "Gradual, persistent performance degradation.",
        Label::VarianceExplosion => {
            "Latency is becoming unpredictable while the typical request is unchanged."
        }
        Label::TailOnlyDegradation => {
            "The slowest requests are getting slower; mean and variability are stable."
        }
        Label::MixedTransition => {
            "Two patterns are about equally supported; the system may be shifting between them."
        }
        Label::Uncertain => "No degradation pattern is clearly supported.",
    }
}

/// Complete record of one classification run
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub windows: Vec<WindowStats>,
    pub features: FeatureSet,
    pub evidence: Vec<PatternEvidence>,
    pub result: ClassificationResult,
}

impl ClassificationReport {
    /// Classify `windows` and keep everything needed to explain the result
    pub fn from_windows(windows: Vec<WindowStats>) -> Result<Self> {
        let Analysis {
            features,
            evidence,
            result,
        } = analyze(&windows)?;

        Ok(Self {
            windows,
            features,
            evidence,
            result,
        })
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str("=== IRIS WINDOW STATISTICS ===\n");
        for (index, window) in self.windows.iter().enumerate() {
            report.push_str(&format!(
                "Window {}: Mean={:.2}ms P95={:.2}ms Std={:.2}ms\n",
                index + 1,
                window.mean,
                window.p95,
                window.std
            ));
        }

        report.push_str("\n=== IRIS PATTERN CLASSIFICATION ===\n");
        let label = self.result.label;
        match label.pattern() {
            Some(_) => report.push_str(&format!(
                "✅ Pattern detected: {} (confidence {})\n",
                label, self.result.confidence
            )),
            None => report.push_str(&format!(
                "⚠️  {} (confidence {})\n",
                label, self.result.confidence
            )),
        }
        report.push_str(&format!("Interpretation: {}\n", interpretation(label)));

        report.push_str(&format!(
            "\n📊 Features: mean_delta={:.2} std_delta={:.2} p95_delta={:.2} \
             mean_trend_up={} p95_trend_up={} std_growth={:.2}\n",
            self.features.mean_delta,
            self.features.std_delta,
            self.features.p95_delta,
            self.features.mean_trend_up,
            self.features.p95_trend_up,
            self.features.std_growth
        ));

        report.push_str("\nRanking:\n");
        for (position, entry) in self.result.ranking.iter().enumerate() {
            let fired = self
                .evidence
                .iter()
                .find(|e| e.pattern == entry.pattern)
                .map(|e| {
                    e.fired
                        .iter()
                        .map(|c| format!("{} (+{})", c.description, c.points))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();

            report.push_str(&format!(
                "  {}. {} score={}",
                position + 1,
                entry.pattern,
                entry.score
            ));
            if !fired.is_empty() {
                report.push_str(&format!(" [{}]", fired));
            }
            report.push('\n');
        }

        report
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Confidence;

    fn drift_windows() -> Vec<WindowStats> {
        vec![
            WindowStats::new(30.0, 1.1, 48.0),
            WindowStats::new(33.0, 1.1, 49.5),
            WindowStats::new(36.0, 1.1, 51.0),
            WindowStats::new(39.0, 1.1, 52.5),
        ]
    }

    #[test]
    fn test_report_from_windows() {
        let report = ClassificationReport::from_windows(drift_windows()).unwrap();
        assert_eq!(report.windows.len(), 4);
        assert_eq!(report.result.label, Label::SlowDrift);
        assert_eq!(report.result.confidence, Confidence::High);
    }

    #[test]
    fn test_report_rejects_short_run() {
        assert!(ClassificationReport::from_windows(vec![WindowStats::new(1.0, 0.0, 1.0)]).is_err());
    }

    #[test]
    fn test_report_string_detected() {
        let text = ClassificationReport::from_windows(drift_windows())
            .unwrap()
            .to_report_string();

        assert!(text.contains("Window 1: Mean=30.00ms P95=48.00ms Std=1.10ms"));
        assert!(text.contains("Pattern detected: SLOW_DRIFT (confidence HIGH)"));
        assert!(text.contains("Gradual, persistent performance degradation."));
        assert!(text.contains("1. SLOW_DRIFT score=9"));
        assert!(text.contains("mean_trend_up (+3)"));
    }

    #[test]
    fn test_report_string_uncertain() {
        let windows = vec![
            WindowStats::new(40.0, 1.0, 45.0),
            WindowStats::new(39.5, 1.0, 44.3),
            WindowStats::new(39.0, 1.0, 43.6),
            WindowStats::new(38.5, 1.0, 42.9),
        ];
        let text = ClassificationReport::from_windows(windows)
            .unwrap()
            .to_report_string();

        assert!(text.contains("UNCERTAIN (confidence LOW)"));
        assert!(!text.contains("Pattern detected"));
    }

    #[test]
    fn test_report_json_fields() {
        let json = ClassificationReport::from_windows(drift_windows())
            .unwrap()
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["result"]["label"], "SLOW_DRIFT");
        assert_eq!(value["result"]["confidence"], "HIGH");
        assert_eq!(value["result"]["ranking"][0]["pattern"], "SLOW_DRIFT");
        assert_eq!(value["result"]["ranking"][0]["score"], 9);
        assert_eq!(value["features"]["mean_trend_up"], true);
        assert_eq!(value["windows"].as_array().unwrap().len(), 4);
        assert_eq!(value["evidence"][0]["fired"][0]["description"], "mean_trend_up");
    }

    #[test]
    fn test_every_label_has_interpretation() {
        for label in [
            Label::SlowDrift,
            Label::VarianceExplosion,
            Label::TailOnlyDegradation,
            Label::MixedTransition,
            Label::Uncertain,
        ] {
            assert!(!interpretation(label).is_empty());
        }
    }
}
