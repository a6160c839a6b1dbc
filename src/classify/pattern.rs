// Known degradation patterns and their per-run scores

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Degradation pattern recognised by the rubric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pattern {
    /// Gradual, sustained rise in mean and p95
    SlowDrift,
    /// Variability multiplies while the mean stays put
    VarianceExplosion,
    /// p95 worsens while mean and variability stay stable
    TailOnlyDegradation,
}

impl Pattern {
    /// Tie-break order for equal scores, highest priority first.
    ///
    /// A new pattern needs a position here and a rubric entry; the resolver
    /// has no pattern-specific logic.
    pub const PRIORITY: [Pattern; 3] = [
        Pattern::SlowDrift,
        Pattern::VarianceExplosion,
        Pattern::TailOnlyDegradation,
    ];

    /// Position in [`Pattern::PRIORITY`] (0 = wins ties)
    pub fn priority_rank(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|p| *p == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SlowDrift => "SLOW_DRIFT",
            Self::VarianceExplosion => "VARIANCE_EXPLOSION",
            Self::TailOnlyDegradation => "TAIL_ONLY_DEGRADATION",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer score per pattern for one classification run
///
/// Scores are unnormalised: they are only comparable within a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternScores(BTreeMap<Pattern, u32>);

impl PatternScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pattern: Pattern, score: u32) {
        self.0.insert(pattern, score);
    }

    pub fn get(&self, pattern: Pattern) -> Option<u32> {
        self.0.get(&pattern).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pattern, u32)> + '_ {
        self.0.iter().map(|(p, s)| (*p, *s))
    }
}

impl FromIterator<(Pattern, u32)> for PatternScores {
    fn from_iter<I: IntoIterator<Item = (Pattern, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
