// Pattern rubrics and the scorer that folds over them
//
// Each pattern owns an additive list of rules. A rule is either a single
// check or an ordered list of mutually exclusive tiers, where only the first
// satisfied tier awards points. Totals are not normalised or capped.
//
// Adding a pattern = one more `Rubric` entry here plus a slot in
// `Pattern::PRIORITY`. Existing entries and the resolver stay untouched.

use crate::classify::features::FeatureSet;
use crate::classify::pattern::{Pattern, PatternScores};
use serde::Serialize;
use std::fmt;

/// Boolean test over a feature set
pub type Predicate = fn(&FeatureSet) -> bool;

/// One rubric row: a named threshold test worth a fixed number of points
#[derive(Clone, Copy)]
pub struct Check {
    pub description: &'static str,
    pub points: u32,
    pub predicate: Predicate,
}

impl Check {
    pub fn passes(&self, features: &FeatureSet) -> bool {
        (self.predicate)(features)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("description", &self.description)
            .field("points", &self.points)
            .finish()
    }
}

/// Independent check, or tiers of which at most one fires
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Single(Check),
    Tiered(&'static [Check]),
}

impl Rule {
    /// The check that awards points for this rule, if any
    pub fn fired(&self, features: &FeatureSet) -> Option<&Check> {
        match self {
            Rule::Single(check) => check.passes(features).then_some(check),
            Rule::Tiered(tiers) => tiers.iter().find(|check| check.passes(features)),
        }
    }
}

/// Full rule set for one pattern
#[derive(Debug, Clone, Copy)]
pub struct Rubric {
    pub pattern: Pattern,
    pub rules: &'static [Rule],
}

/// A check that awarded points during scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiredCheck {
    pub description: &'static str,
    pub points: u32,
}

/// Score for one pattern together with the checks that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternEvidence {
    pub pattern: Pattern,
    pub score: u32,
    pub fired: Vec<FiredCheck>,
}

impl Rubric {
    pub fn score(&self, features: &FeatureSet) -> u32 {
        self.rules
            .iter()
            .filter_map(|rule| rule.fired(features))
            .map(|check| check.points)
            .sum()
    }

    pub fn evidence(&self, features: &FeatureSet) -> PatternEvidence {
        let fired: Vec<FiredCheck> = self
            .rules
            .iter()
            .filter_map(|rule| rule.fired(features))
            .map(|check| FiredCheck {
                description: check.description,
                points: check.points,
            })
            .collect();

        PatternEvidence {
            pattern: self.pattern,
            score: fired.iter().map(|c| c.points).sum(),
            fired,
        }
    }

    /// Highest score this rubric can award (best tier of every rule)
    pub fn max_score(&self) -> u32 {
        self.rules
            .iter()
            .map(|rule| match rule {
                Rule::Single(check) => check.points,
                Rule::Tiered(tiers) => tiers.iter().map(|c| c.points).max().unwrap_or(0),
            })
            .sum()
    }
}

/// The fixed rubric table, in priority order
pub static RUBRICS: &[Rubric] = &[
    Rubric {
        pattern: Pattern::SlowDrift,
        rules: &[
            Rule::Single(Check {
                description: "mean_trend_up",
                points: 3,
                predicate: |f| f.mean_trend_up,
            }),
            Rule::Single(Check {
                description: "p95_trend_up",
                points: 2,
                predicate: |f| f.p95_trend_up,
            }),
            Rule::Single(Check {
                description: "mean_delta >= 3",
                points: 2,
                predicate: |f| f.mean_delta >= 3.0,
            }),
            Rule::Tiered(&[
                Check {
                    description: "std_growth < 1.35",
                    points: 2,
                    predicate: |f| f.std_growth < 1.35,
                },
                Check {
                    description: "std_growth < 1.5",
                    points: 1,
                    predicate: |f| f.std_growth < 1.5,
                },
            ]),
        ],
    },
    Rubric {
        pattern: Pattern::VarianceExplosion,
        rules: &[
            Rule::Tiered(&[
                Check {
                    description: "std_growth >= 1.5",
                    points: 4,
                    predicate: |f| f.std_growth >= 1.5,
                },
                Check {
                    description: "std_growth >= 1.3",
                    points: 2,
                    predicate: |f| f.std_growth >= 1.3,
                },
            ]),
            Rule::Single(Check {
                description: "p95_delta >= 3",
                points: 2,
                predicate: |f| f.p95_delta >= 3.0,
            }),
            Rule::Single(Check {
                description: "not mean_trend_up",
                points: 2,
                predicate: |f| !f.mean_trend_up,
            }),
            Rule::Single(Check {
                description: "mean_delta < 3.5",
                points: 1,
                predicate: |f| f.mean_delta < 3.5,
            }),
        ],
    },
    Rubric {
        pattern: Pattern::TailOnlyDegradation,
        rules: &[
            Rule::Tiered(&[
                Check {
                    description: "p95_delta >= 5",
                    points: 4,
                    predicate: |f| f.p95_delta >= 5.0,
                },
                Check {
                    description: "p95_delta >= 3",
                    points: 2,
                    predicate: |f| f.p95_delta >= 3.0,
                },
            ]),
            Rule::Single(Check {
                description: "mean_delta < 3",
                points: 2,
                predicate: |f| f.mean_delta < 3.0,
            }),
            Rule::Single(Check {
                description: "std_delta < 3",
                points: 2,
                predicate: |f| f.std_delta < 3.0,
            }),
            Rule::Single(Check {
                description: "p95_trend_up",
                points: 1,
                predicate: |f| f.p95_trend_up,
            }),
        ],
    },
];

/// Rubric for a pattern
pub fn rubric_for(pattern: Pattern) -> Option<&'static Rubric> {
    RUBRICS.iter().find(|rubric| rubric.pattern == pattern)
}

/// Score every known pattern against `features`
///
/// Pure and deterministic: identical features always yield identical scores.
pub fn score(features: &FeatureSet) -> PatternScores {
    let scores: PatternScores = RUBRICS
        .iter()
        .map(|rubric| (rubric.pattern, rubric.score(features)))
        .collect();

    tracing::debug!(scores = ?scores, "scored patterns");
    scores
}

/// Per-pattern scores plus the checks that fired, in priority order
pub fn score_with_evidence(features: &FeatureSet) -> Vec<PatternEvidence> {
    Pattern::PRIORITY
        .iter()
        .filter_map(|pattern| rubric_for(*pattern))
        .map(|rubric| rubric.evidence(features))
        .collect()
}
