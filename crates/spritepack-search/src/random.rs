//! Pure random-sampling baseline.
//!
//! The control condition the genetic engine is compared against: every
//! iteration draws one fresh candidate and scores it. No population, no
//! recombination, same telemetry and same feasibility rule for the best
//! solution.

use rand::Rng;

use crate::{
    problem::CandidateProblem,
    telemetry::{ProgressTracker, SearchOutcome, TelemetrySink},
};

/// Settings for [`random_search`].
#[derive(Debug, Clone)]
pub struct RandomSettings {
    /// Total evaluation budget for the run.
    pub max_iterations: u64,
}

/// Repeatedly initializes and evaluates a single reused candidate buffer,
/// performing exactly `max_iterations` evaluations.
pub fn random_search<P, R, T>(
    problem: &mut P,
    settings: &RandomSettings,
    rng: &mut R,
    telemetry: &mut T,
) -> SearchOutcome<P::Candidate>
where
    P: CandidateProblem + ?Sized,
    R: Rng + ?Sized,
    T: TelemetrySink + ?Sized,
{
    let mut tracker = ProgressTracker::new(telemetry);
    let mut candidate = problem.allocate_candidate();
    while tracker.evaluations() < settings.max_iterations {
        problem.initialize(&mut candidate, rng);
        let score = problem.evaluate(&mut candidate);
        tracker.record(&candidate, score);
    }
    tracker.into_outcome()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::problem::Score;

    /// Candidate is a random value in 1..100; score is the value, and values
    /// divisible by 3 count as overlapping.
    struct ModuloProblem;

    impl CandidateProblem for ModuloProblem {
        type Candidate = u64;

        fn allocate_candidate(&self) -> u64 {
            0
        }

        fn initialize<R: Rng + ?Sized>(&self, candidate: &mut u64, rng: &mut R) {
            *candidate = rng.random_range(1..100);
        }

        fn evaluate(&mut self, candidate: &mut u64) -> Score {
            Score {
                score: *candidate,
                raw_score: *candidate,
                overlap: u64::from(*candidate % 3 == 0),
            }
        }

        fn crossover<R: Rng + ?Sized>(
            &self,
            _mother: &u64,
            _father: &u64,
            _child0: &mut u64,
            _child1: &mut u64,
            _rng: &mut R,
        ) {
            unreachable!("random search never recombines");
        }

        fn mutate<R: Rng + ?Sized>(
            &self,
            _candidate: &mut u64,
            _rate: f32,
            _distance: f32,
            _rng: &mut R,
        ) {
            unreachable!("random search never mutates");
        }
    }

    #[test]
    fn test_evaluates_exactly_the_budget() {
        let settings = RandomSettings {
            max_iterations: 250,
        };
        let mut rng = Pcg32::seed_from_u64(42);
        let outcome = random_search(
            &mut ModuloProblem,
            &settings,
            &mut rng,
            &mut crate::telemetry::NullTelemetry,
        );
        assert_eq!(outcome.evaluations, 250);

        // the best solution must be feasible
        let best = outcome.best.unwrap();
        assert_eq!(best.score.overlap, 0);
        assert_ne!(best.candidate % 3, 0);
    }

    #[test]
    fn test_same_seed_reproduces_the_run() {
        let settings = RandomSettings { max_iterations: 64 };
        let outcome1 = random_search(
            &mut ModuloProblem,
            &settings,
            &mut Pcg32::seed_from_u64(9),
            &mut crate::telemetry::NullTelemetry,
        );
        let outcome2 = random_search(
            &mut ModuloProblem,
            &settings,
            &mut Pcg32::seed_from_u64(9),
            &mut crate::telemetry::NullTelemetry,
        );
        assert_eq!(
            outcome1.best.map(|best| best.candidate),
            outcome2.best.map(|best| best.candidate)
        );
    }
}
