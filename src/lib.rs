//! Iris - rule-based classifier for the shape of latency degradation
//!
//! Given per-window latency statistics (mean, standard deviation, p95) in
//! time order, Iris extracts trend and stability features, scores each known
//! degradation pattern against a fixed rubric, and resolves the scores into a
//! label with a confidence tier.
//!
//! The core lives in [`classify`]. The remaining modules are optional
//! collaborators: [`stats`] reduces raw samples to windows, [`simulation`]
//! synthesizes samples per pattern, and [`report`] renders results.

pub mod classify;
pub mod cli;
pub mod report;
pub mod simulation;
pub mod stats;
