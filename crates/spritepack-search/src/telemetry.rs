//! Per-evaluation telemetry and run results.
//!
//! Every candidate evaluation produces one [`IterationRecord`], pushed into a
//! [`TelemetrySink`] in evaluation order. The sink is the interface to external
//! logging and plotting; the search core never interprets the records itself.

use serde::Serialize;

use crate::problem::Score;

/// One telemetry record per evaluated candidate, emitted in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// Zero-based evaluation index within the run.
    pub iteration: u64,
    /// Penalized fitness of the evaluated candidate.
    pub score: u64,
    /// Objective value without the penalty term.
    pub raw_score: u64,
    /// Overlapping cell units of the evaluated candidate.
    pub overlap: u64,
}

/// Consumer of per-evaluation telemetry.
pub trait TelemetrySink {
    fn record(&mut self, record: IterationRecord);
}

/// Sink that discards all records.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn record(&mut self, _record: IterationRecord) {}
}

/// The best feasible candidate observed during a run.
#[derive(Debug, Clone)]
pub struct BestSolution<C> {
    pub candidate: C,
    pub score: Score,
}

/// Result of a completed search run.
///
/// `best` is `None` when no feasible (zero-overlap) candidate was ever
/// evaluated; that is a first-class outcome, not an error.
#[derive(Debug, Clone)]
pub struct SearchOutcome<C> {
    pub best: Option<BestSolution<C>>,
    pub evaluations: u64,
}

/// Run-scoped evaluation bookkeeping shared by the search strategies: counts
/// evaluations, forwards telemetry, and maintains the best-so-far solution.
pub(crate) struct ProgressTracker<'t, C, T>
where
    T: TelemetrySink + ?Sized,
{
    telemetry: &'t mut T,
    best: Option<BestSolution<C>>,
    evaluations: u64,
}

impl<'t, C, T> ProgressTracker<'t, C, T>
where
    C: Clone,
    T: TelemetrySink + ?Sized,
{
    pub(crate) fn new(telemetry: &'t mut T) -> Self {
        Self {
            telemetry,
            best: None,
            evaluations: 0,
        }
    }

    pub(crate) fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Registers one evaluation: emits telemetry and, if the candidate is
    /// feasible and strictly better than the incumbent, makes it the new
    /// best-so-far. Infeasible candidates never become best, whatever their
    /// score.
    pub(crate) fn record(&mut self, candidate: &C, score: Score) {
        self.telemetry.record(IterationRecord {
            iteration: self.evaluations,
            score: score.score,
            raw_score: score.raw_score,
            overlap: score.overlap,
        });
        if score.is_feasible()
            && self
                .best
                .as_ref()
                .is_none_or(|best| best.score.score > score.score)
        {
            match &mut self.best {
                // reuse the incumbent's candidate storage
                Some(best) => {
                    best.candidate.clone_from(candidate);
                    best.score = score;
                }
                None => {
                    self.best = Some(BestSolution {
                        candidate: candidate.clone(),
                        score,
                    });
                }
            }
        }
        self.evaluations += 1;
    }

    pub(crate) fn into_outcome(self) -> SearchOutcome<C> {
        SearchOutcome {
            best: self.best,
            evaluations: self.evaluations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(score: u64, raw_score: u64, overlap: u64) -> Score {
        Score {
            score,
            raw_score,
            overlap,
        }
    }

    #[test]
    fn test_best_requires_zero_overlap() {
        let mut telemetry = NullTelemetry;
        let mut tracker: ProgressTracker<'_, u32, _> = ProgressTracker::new(&mut telemetry);

        // overlapping candidate with the numerically lowest scores of the run
        tracker.record(&1, score(3, 2, 4));
        assert!(tracker.best.is_none());

        // first feasible candidate wins despite its higher score
        tracker.record(&2, score(9, 9, 0));
        assert_eq!(tracker.best.as_ref().unwrap().candidate, 2);

        // worse feasible candidate does not replace it
        tracker.record(&3, score(12, 12, 0));
        assert_eq!(tracker.best.as_ref().unwrap().candidate, 2);

        // better feasible candidate does
        tracker.record(&4, score(8, 8, 0));
        let best = tracker.best.as_ref().unwrap();
        assert_eq!(best.candidate, 4);
        assert_eq!(best.score.score, 8);
    }

    #[test]
    fn test_equal_score_does_not_replace_best() {
        let mut telemetry = NullTelemetry;
        let mut tracker: ProgressTracker<'_, u32, _> = ProgressTracker::new(&mut telemetry);
        tracker.record(&1, score(8, 8, 0));
        tracker.record(&2, score(8, 8, 0));
        assert_eq!(tracker.best.as_ref().unwrap().candidate, 1);
    }

    #[test]
    fn test_records_are_emitted_in_evaluation_order() {
        let mut records = Vec::new();
        struct Collect<'a>(&'a mut Vec<IterationRecord>);
        impl TelemetrySink for Collect<'_> {
            fn record(&mut self, record: IterationRecord) {
                self.0.push(record);
            }
        }

        let mut sink = Collect(&mut records);
        let mut tracker: ProgressTracker<'_, u32, _> = ProgressTracker::new(&mut sink);
        tracker.record(&1, score(5, 5, 0));
        tracker.record(&2, score(7, 3, 1));
        let outcome = tracker.into_outcome();

        assert_eq!(outcome.evaluations, 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].iteration, 0);
        assert_eq!(records[1].iteration, 1);
        assert_eq!(records[1].raw_score, 3);
        assert_eq!(records[1].overlap, 1);
    }
}
