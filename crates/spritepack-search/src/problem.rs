//! The candidate-problem capability consumed by the search strategies.

use std::io;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fitness of one evaluated candidate. Lower `score` is better.
///
/// `raw_score` is the undistorted objective (for sprite packing, the bounding
/// box area alone); `score` adds the overlap penalty used for selection and
/// termination. `overlap` counts overlapping cell units and decides
/// feasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Penalized fitness used for selection (lower is better).
    pub score: u64,
    /// Objective value without the penalty term.
    pub raw_score: u64,
    /// Number of overlapping cell units; zero means feasible.
    pub overlap: u64,
}

impl Score {
    /// A candidate is feasible exactly when nothing overlaps.
    ///
    /// Only feasible candidates may become the best-so-far solution of a run,
    /// regardless of how low their penalized score is.
    #[must_use]
    pub fn is_feasible(self) -> bool {
        self.overlap == 0
    }
}

/// A search problem the [`genetic`](crate::genetic) engine and the
/// [`random`](crate::random) baseline can drive.
///
/// Implementations own all fixed problem data (and any evaluation scratch
/// state, hence `&mut self` on [`evaluate`](Self::evaluate)); candidates are
/// opaque to the search strategies. Operators that create or modify candidates
/// write into caller-provided storage so population buffers can be reused
/// across generations instead of reallocated.
///
/// Randomized operations receive the run's random number generator explicitly;
/// implementations must not hold their own source of randomness.
pub trait CandidateProblem {
    /// One encoded solution. Cloning must produce an independent candidate.
    type Candidate: Clone;

    /// Allocates storage for one candidate. The contents are unspecified until
    /// [`initialize`](Self::initialize) has filled them.
    fn allocate_candidate(&self) -> Self::Candidate;

    /// Overwrites `candidate` with a valid random encoding.
    fn initialize<R>(&self, candidate: &mut Self::Candidate, rng: &mut R)
    where
        R: Rng + ?Sized;

    /// Scores a candidate against the fixed problem data.
    ///
    /// The candidate is mutable because some encodings resolve derived data
    /// (such as concrete placements) during evaluation and store it back for
    /// later rendering. Evaluation must not depend on anything but the
    /// candidate and the fixed problem data.
    fn evaluate(&mut self, candidate: &mut Self::Candidate) -> Score;

    /// Recombines `mother` and `father` into two valid children, written over
    /// the previous contents of `child0` and `child1`.
    fn crossover<R>(
        &self,
        mother: &Self::Candidate,
        father: &Self::Candidate,
        child0: &mut Self::Candidate,
        child1: &mut Self::Candidate,
        rng: &mut R,
    ) where
        R: Rng + ?Sized;

    /// Perturbs a candidate in place.
    ///
    /// `rate` is the per-gene perturbation probability, `distance` the relative
    /// perturbation magnitude. Mutation never evaluates; scoring is always a
    /// separate explicit step performed by the caller.
    fn mutate<R>(&self, candidate: &mut Self::Candidate, rate: f32, distance: f32, rng: &mut R)
    where
        R: Rng + ?Sized;

    /// Writes a human-readable listing of the candidate's solution.
    ///
    /// Optional; the default emits nothing.
    fn render(&self, candidate: &Self::Candidate, out: &mut dyn io::Write) -> io::Result<()> {
        let _ = (candidate, out);
        Ok(())
    }
}
