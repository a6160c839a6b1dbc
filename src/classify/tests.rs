// Scenario tests for the full extract → score → resolve pipeline
//
// Fixtures are fixed window statistics shaped like each degradation
// pattern; nothing here depends on random sampling.

use super::*;

fn windows(means: &[f64], stds: &[f64], p95s: &[f64]) -> Vec<WindowStats> {
    means
        .iter()
        .zip(stds)
        .zip(p95s)
        .map(|((&mean, &std), &p95)| WindowStats::new(mean, std, p95))
        .collect()
}

fn score_of(result: &ClassificationResult, pattern: Pattern) -> u32 {
    result
        .ranking
        .iter()
        .find(|r| r.pattern == pattern)
        .map(|r| r.score)
        .unwrap()
}

/// Mean climbs 3ms per window, std stays flat, p95 climbs steadily
#[test]
fn test_slow_drift_high_confidence() {
    let run = windows(
        &[30.0, 33.0, 36.0, 39.0],
        &[1.1, 1.1, 1.1, 1.1],
        &[48.0, 49.5, 51.0, 52.5],
    );

    let features = extract(&run).unwrap();
    assert!(features.mean_trend_up);
    assert!(features.p95_trend_up);
    assert!((features.std_growth - 1.0).abs() < 1e-12);

    let result = classify(&run).unwrap();
    assert_eq!(result.label, Label::SlowDrift);
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(score_of(&result, Pattern::SlowDrift), 9);
    assert!(result.gap() >= 3);
}

/// When p95 rises as much as the mean, the tail rubric also scores well and
/// the drift call drops to MEDIUM.
#[test]
fn test_drift_with_proportional_tail_rise_is_medium() {
    let run = windows(
        &[30.0, 33.0, 36.0, 39.0],
        &[1.1, 1.1, 1.1, 1.1],
        &[35.0, 38.0, 41.0, 44.0],
    );

    let result = classify(&run).unwrap();
    assert_eq!(result.label, Label::SlowDrift);
    assert_eq!(result.confidence, Confidence::Medium);
    assert_eq!(score_of(&result, Pattern::SlowDrift), 9);
    assert_eq!(score_of(&result, Pattern::TailOnlyDegradation), 7);
}

/// Flat mean, std doubling every window
#[test]
fn test_variance_explosion_high_confidence() {
    let run = windows(
        &[40.0, 39.2, 40.5, 39.8],
        &[1.0, 2.0, 4.0, 8.0],
        &[42.0, 49.0, 45.5, 56.0],
    );

    let features = extract(&run).unwrap();
    assert_eq!(features.std_growth, 8.0);
    assert!(!features.mean_trend_up);
    assert!(features.mean_delta < 3.5);
    assert!(features.p95_delta >= 3.0);

    let result = classify(&run).unwrap();
    assert_eq!(result.label, Label::VarianceExplosion);
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(score_of(&result, Pattern::VarianceExplosion), 9);
}

/// Mean and std steady, p95 pulling away
#[test]
fn test_tail_only_high_confidence() {
    let run = windows(
        &[40.0, 40.6, 40.1, 40.4],
        &[1.2, 1.3, 1.25, 1.35],
        &[45.0, 48.0, 52.0, 57.0],
    );

    let features = extract(&run).unwrap();
    assert!(features.mean_delta < 3.0);
    assert!(features.std_delta < 3.0);
    assert!(features.p95_delta >= 5.0);
    assert!(features.p95_trend_up);

    let result = classify(&run).unwrap();
    assert_eq!(result.label, Label::TailOnlyDegradation);
    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(score_of(&result, Pattern::TailOnlyDegradation), 9);
}

/// Drift and variance explosion both score 5
#[test]
fn test_ambiguous_mixed_transition() {
    let run = windows(
        &[40.0, 40.5, 41.0, 41.5],
        &[10.0, 11.0, 12.0, 13.2],
        &[60.0, 64.0, 61.0, 63.0],
    );

    let result = classify(&run).unwrap();
    assert_eq!(score_of(&result, Pattern::SlowDrift), 5);
    assert_eq!(score_of(&result, Pattern::VarianceExplosion), 5);
    assert_eq!(result.gap(), 0);
    assert_eq!(result.label, Label::MixedTransition);
    assert_eq!(result.confidence, Confidence::Low);

    // Equal scores: drift outranks variance by priority
    assert_eq!(result.ranking[0].pattern, Pattern::SlowDrift);
    assert_eq!(result.ranking[1].pattern, Pattern::VarianceExplosion);
}

/// Nothing moves enough to support any pattern
#[test]
fn test_flat_uncertain() {
    let run = windows(
        &[40.0, 39.5, 39.0, 38.5],
        &[1.0, 1.0, 1.0, 1.0],
        &[45.0, 44.3, 43.6, 42.9],
    );

    let features = extract(&run).unwrap();
    assert!(!features.mean_trend_up);
    assert!(!features.p95_trend_up);

    let result = classify(&run).unwrap();
    assert!(result.ranking.iter().all(|r| r.score <= 4));
    assert_eq!(result.label, Label::Uncertain);
    assert_eq!(result.confidence, Confidence::Low);
}

#[test]
fn test_score_then_resolve_is_deterministic() {
    let run = windows(
        &[40.0, 40.5, 41.0, 41.5],
        &[10.0, 11.0, 12.0, 13.2],
        &[60.0, 64.0, 61.0, 63.0],
    );
    let features = extract(&run).unwrap();

    let first = resolve(&score(&features)).unwrap();
    let second = resolve(&score(&features)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_zero_variance_first_window_classifies() {
    let run = windows(&[20.0, 20.0, 20.0], &[0.0, 0.0, 0.0], &[20.0, 20.0, 20.0]);

    let analysis = analyze(&run).unwrap();
    assert_eq!(analysis.features.std_growth, 0.0);
    assert_eq!(analysis.result.ranking.len(), 3);
}

#[test]
fn test_analyze_agrees_with_classify() {
    let run = windows(
        &[40.0, 40.6, 40.1, 40.4],
        &[1.2, 1.3, 1.25, 1.35],
        &[45.0, 48.0, 52.0, 57.0],
    );

    let analysis = analyze(&run).unwrap();
    assert_eq!(analysis.result, classify(&run).unwrap());

    let tail = analysis
        .evidence
        .iter()
        .find(|e| e.pattern == Pattern::TailOnlyDegradation)
        .unwrap();
    assert_eq!(tail.fired.len(), 4);
}

#[test]
fn test_single_window_rejected() {
    let err = classify(&[WindowStats::new(30.0, 1.0, 35.0)]).unwrap_err();
    assert!(err.is_invalid_input());
}
