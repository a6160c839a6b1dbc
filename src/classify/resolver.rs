// Resolve pattern scores into a single label with a confidence tier
//
// Rules are evaluated in a fixed order and the first match wins:
//
//   top >= 8 and gap >= 3  → HIGH,   top pattern
//   top >= 6 and gap >= 2  → MEDIUM, top pattern
//   top >= 5 and gap <= 1  → LOW,    MIXED_TRANSITION
//   otherwise              → LOW,    UNCERTAIN

use crate::classify::error::{ClassifyError, Result};
use crate::classify::pattern::{Pattern, PatternScores};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

pub const HIGH_MIN_SCORE: u32 = 8;
pub const HIGH_MIN_GAP: u32 = 3;
pub const MEDIUM_MIN_SCORE: u32 = 6;
pub const MEDIUM_MIN_GAP: u32 = 2;
pub const MIXED_MIN_SCORE: u32 = 5;
pub const MIXED_MAX_GAP: u32 = 1;

/// Qualitative strength of a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        })
    }
}

/// Final label: a known pattern, or one of the two inconclusive outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    SlowDrift,
    VarianceExplosion,
    TailOnlyDegradation,
    /// Two patterns are nearly equally well supported
    MixedTransition,
    /// No pattern is well supported
    Uncertain,
}

impl Label {
    pub fn pattern(self) -> Option<Pattern> {
        match self {
            Self::SlowDrift => Some(Pattern::SlowDrift),
            Self::VarianceExplosion => Some(Pattern::VarianceExplosion),
            Self::TailOnlyDegradation => Some(Pattern::TailOnlyDegradation),
            Self::MixedTransition | Self::Uncertain => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SlowDrift => "SLOW_DRIFT",
            Self::VarianceExplosion => "VARIANCE_EXPLOSION",
            Self::TailOnlyDegradation => "TAIL_ONLY_DEGRADATION",
            Self::MixedTransition => "MIXED_TRANSITION",
            Self::Uncertain => "UNCERTAIN",
        }
    }
}

impl From<Pattern> for Label {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::SlowDrift => Self::SlowDrift,
            Pattern::VarianceExplosion => Self::VarianceExplosion,
            Pattern::TailOnlyDegradation => Self::TailOnlyDegradation,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPattern {
    pub pattern: Pattern,
    pub score: u32,
}

/// Label, confidence and the full ranking for one classification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,
    pub confidence: Confidence,

    /// Every known pattern, best first; ties follow `Pattern::PRIORITY`
    pub ranking: Vec<RankedPattern>,
}

impl ClassificationResult {
    /// Score difference between the winner and the runner-up
    pub fn gap(&self) -> u32 {
        match self.ranking.as_slice() {
            [top, second, ..] => top.score.saturating_sub(second.score),
            _ => 0,
        }
    }
}

/// Order patterns by score descending, ties broken by priority
///
/// Fails when `scores` lacks any pattern in `Pattern::PRIORITY`.
pub fn rank(scores: &PatternScores) -> Result<Vec<RankedPattern>> {
    let mut ranking = Pattern::PRIORITY
        .iter()
        .map(|&pattern| {
            scores
                .get(pattern)
                .map(|score| RankedPattern { pattern, score })
                .ok_or_else(|| {
                    ClassifyError::InvalidInput(format!("missing score for {}", pattern))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    ranking.sort_by_key(|entry| (Reverse(entry.score), entry.pattern.priority_rank()));
    Ok(ranking)
}

fn decide(top: &RankedPattern, gap: u32) -> (Label, Confidence) {
    if top.score >= HIGH_MIN_SCORE && gap >= HIGH_MIN_GAP {
        (top.pattern.into(), Confidence::High)
    } else if top.score >= MEDIUM_MIN_SCORE && gap >= MEDIUM_MIN_GAP {
        (top.pattern.into(), Confidence::Medium)
    } else if top.score >= MIXED_MIN_SCORE && gap <= MIXED_MAX_GAP {
        (Label::MixedTransition, Confidence::Low)
    } else {
        (Label::Uncertain, Confidence::Low)
    }
}

/// Turn per-pattern scores into a [`ClassificationResult`]
///
/// # Example
/// ```
/// use iris::classify::{resolve, Confidence, Label, Pattern, PatternScores};
///
/// let scores: PatternScores = [
///     (Pattern::SlowDrift, 9),
///     (Pattern::VarianceExplosion, 2),
///     (Pattern::TailOnlyDegradation, 5),
/// ]
/// .into_iter()
/// .collect();
///
/// let result = resolve(&scores).unwrap();
/// assert_eq!(result.label, Label::SlowDrift);
/// assert_eq!(result.confidence, Confidence::High);
/// ```
pub fn resolve(scores: &PatternScores) -> Result<ClassificationResult> {
    let ranking = rank(scores)?;

    let (label, confidence) = match ranking.as_slice() {
        [top, second, ..] => decide(top, top.score - second.score),
        _ => (Label::Uncertain, Confidence::Low),
    };

    tracing::debug!(%label, %confidence, "resolved classification");

    Ok(ClassificationResult {
        label,
        confidence,
        ranking,
    })
}
