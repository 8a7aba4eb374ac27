//! End-of-run summary artifact.

use chrono::{DateTime, Utc};
use serde::Serialize;
use spritepack_search::RunSeed;

/// Summary of one completed run, saved as JSON when requested.
///
/// `best_score` and `best_raw_score` are absent when no feasible placement was
/// found within the budget.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub strategy: &'static str,
    pub completed_at: DateTime<Utc>,
    pub seed: RunSeed,
    pub evaluations: u64,
    pub feasible_evaluations: u64,
    pub best_score: Option<u64>,
    pub best_raw_score: Option<u64>,
}
