// Latency degradation pattern classification
//
// Three pure stages over pre-aggregated window statistics:
//
//   extract  ordered WindowStats  → FeatureSet      (trend/stability features)
//   score    FeatureSet           → PatternScores   (fixed additive rubric)
//   resolve  PatternScores        → ClassificationResult (label + confidence)
//
// No stage keeps state between calls, so runs may execute concurrently
// without coordination. A host classifying a sliding window of live stats
// treats every invocation as an independent ordered batch.

mod error;
mod features;
mod pattern;
mod resolver;
mod rubric;
mod window;

pub use error::{ClassifyError, Result};
pub use features::{
    extract, is_monotonic_increasing, FeatureSet, MEAN_SLACK, MIN_WINDOWS, P95_SLACK,
    STD_EPSILON,
};
pub use pattern::{Pattern, PatternScores};
pub use resolver::{rank, resolve, ClassificationResult, Confidence, Label, RankedPattern};
pub use rubric::{
    rubric_for, score, score_with_evidence, Check, FiredCheck, PatternEvidence, Rubric, Rule,
    RUBRICS,
};
pub use window::WindowStats;

use serde::Serialize;

/// Everything one classification run derived, for auditing and reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub features: FeatureSet,
    pub evidence: Vec<PatternEvidence>,
    pub result: ClassificationResult,
}

/// Run extract → score → resolve over an ordered run of windows
///
/// # Example
/// ```
/// use iris::classify::{classify, Confidence, Label, WindowStats};
///
/// let windows = [
///     WindowStats::new(30.0, 1.1, 48.0),
///     WindowStats::new(33.0, 1.1, 49.5),
///     WindowStats::new(36.0, 1.1, 51.0),
///     WindowStats::new(39.0, 1.1, 52.5),
/// ];
///
/// let result = classify(&windows).unwrap();
/// assert_eq!(result.label, Label::SlowDrift);
/// assert_eq!(result.confidence, Confidence::High);
/// ```
pub fn classify(windows: &[WindowStats]) -> Result<ClassificationResult> {
    let features = extract(windows)?;
    resolve(&score(&features))
}

/// Like [`classify`], but also returns the features and rubric evidence
pub fn analyze(windows: &[WindowStats]) -> Result<Analysis> {
    let features = extract(windows)?;
    let evidence = score_with_evidence(&features);
    let scores: PatternScores = evidence.iter().map(|e| (e.pattern, e.score)).collect();
    let result = resolve(&scores)?;

    tracing::info!(
        windows = windows.len(),
        label = %result.label,
        confidence = %result.confidence,
        "classified latency windows"
    );

    Ok(Analysis {
        features,
        evidence,
        result,
    })
}

#[cfg(test)]
mod tests;
