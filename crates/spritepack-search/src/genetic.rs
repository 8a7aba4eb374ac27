//! Genetic search over a candidate problem.
//!
//! This module implements a generational genetic algorithm with
//! fitness-proportional selection, elitism, and optional restarts. Candidates
//! are opaque; all domain knowledge lives behind the [`CandidateProblem`]
//! capability.
//!
//! # Algorithm Overview
//!
//! Each generation transforms the "current" population into the "next" one:
//!
//! 1. **Selection weights** - Either fitness-proportional
//!    (`(1/score) / sum(1/score)`, so lower scores weigh more) or, under
//!    [`GeneticSettings::random_selection`], uniform. Uniform selection trades
//!    convergence speed for diversity.
//! 2. **Elitism** - The top `elite_count` individuals by weight are copied into
//!    the next generation verbatim, candidate and score, without re-evaluation.
//! 3. **Reproduction** - Remaining slots are filled in pairs: mother and father
//!    are drawn by roulette sampling (a draw may pick the same individual
//!    twice), crossed over, and each child is mutated and evaluated
//!    immediately.
//! 4. **Restart** - After each bred pair there is a `restart_probability`
//!    chance to abandon the generation. An abandoned generation, or a stagnant
//!    one (every current score identical, when `restart_on_stagnation` is set),
//!    is replaced wholesale by freshly initialized candidates.
//!
//! The run terminates once the total number of evaluations reaches
//! `max_iterations`. The bound is checked between generations, so the final
//! generation may overshoot it; evaluations, not generations, are the budget.
//!
//! # Buffers
//!
//! The two population buffers are allocated once and swapped each generation.
//! Slot candidates are overwritten in place (crossover and initialization write
//! into existing storage), so a run performs no per-generation allocation.

use std::mem;

use rand::Rng;

use crate::{
    problem::CandidateProblem,
    telemetry::{ProgressTracker, SearchOutcome, TelemetrySink},
};

/// Tuning knobs for [`genetic_search`].
#[derive(Debug, Clone)]
pub struct GeneticSettings {
    /// Total evaluation budget for the run.
    pub max_iterations: u64,
    /// Number of individuals per generation (at least 2).
    pub population_size: usize,
    /// Number of top individuals preserved unchanged (must be smaller than the
    /// population size).
    pub elite_count: usize,
    /// Select parents uniformly instead of fitness-proportionally.
    pub random_selection: bool,
    /// Per-gene mutation probability in [0, 1].
    pub mutation_rate: f32,
    /// Relative mutation magnitude (non-negative).
    pub mutation_distance: f32,
    /// Per-pair probability in [0, 1] of abandoning the current generation.
    pub restart_probability: f32,
    /// Reseed the whole population when every current score is identical.
    pub restart_on_stagnation: bool,
}

/// A settings combination that cannot produce a valid run.
///
/// These are misconfigurations, not runtime conditions: they are rejected
/// before any candidate is evaluated.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SettingsError {
    #[display("population size must be at least 2, got {size}")]
    PopulationTooSmall { size: usize },
    #[display("elite count ({elite_count}) must be smaller than population size ({population_size})")]
    TooManyElites {
        elite_count: usize,
        population_size: usize,
    },
    #[display("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[display("mutation distance must be non-negative, got {value}")]
    NegativeMutationDistance { value: f32 },
}

impl GeneticSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.population_size < 2 {
            return Err(SettingsError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if self.elite_count >= self.population_size {
            return Err(SettingsError::TooManyElites {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        for (name, value) in [
            ("mutation rate", self.mutation_rate),
            ("restart probability", self.restart_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::RateOutOfRange { name, value });
            }
        }
        if self.mutation_distance < 0.0 {
            return Err(SettingsError::NegativeMutationDistance {
                value: self.mutation_distance,
            });
        }
        Ok(())
    }
}

/// One population slot: a candidate plus its per-generation bookkeeping.
///
/// `score` is authoritative only after evaluation; `weight` only within the
/// generation that computed it.
#[derive(Debug, Clone)]
struct Individual<C> {
    candidate: C,
    score: u64,
    weight: f64,
}

impl<C> Individual<C> {
    fn new(candidate: C) -> Self {
        Self {
            candidate,
            score: 0,
            weight: 0.0,
        }
    }
}

/// Runs the genetic algorithm until the evaluation budget is exhausted.
///
/// Returns the best feasible candidate observed across the whole run (if any)
/// and the number of evaluations performed. Every evaluation is reported to
/// `telemetry` in order.
pub fn genetic_search<P, R, T>(
    problem: &mut P,
    settings: &GeneticSettings,
    rng: &mut R,
    telemetry: &mut T,
) -> Result<SearchOutcome<P::Candidate>, SettingsError>
where
    P: CandidateProblem + ?Sized,
    R: Rng + ?Sized,
    T: TelemetrySink + ?Sized,
{
    settings.validate()?;

    let mut tracker = ProgressTracker::new(telemetry);
    let mut current = allocate_population(problem, settings.population_size);
    let mut next = allocate_population(problem, settings.population_size);
    // crossover target for the second child of the last pair when the number
    // of non-elite slots is odd; never mutated or evaluated
    let mut spare = Individual::new(problem.allocate_candidate());

    for individual in &mut current {
        problem.initialize(&mut individual.candidate, rng);
        evaluate_slot(problem, &mut tracker, individual);
    }

    while tracker.evaluations() < settings.max_iterations {
        run_generation(
            problem,
            settings,
            &mut current,
            &mut next,
            &mut spare,
            rng,
            &mut tracker,
        );
        mem::swap(&mut current, &mut next);
    }

    Ok(tracker.into_outcome())
}

fn allocate_population<P>(problem: &P, size: usize) -> Vec<Individual<P::Candidate>>
where
    P: CandidateProblem + ?Sized,
{
    (0..size)
        .map(|_| Individual::new(problem.allocate_candidate()))
        .collect()
}

fn evaluate_slot<P, T>(
    problem: &mut P,
    tracker: &mut ProgressTracker<'_, P::Candidate, T>,
    individual: &mut Individual<P::Candidate>,
) where
    P: CandidateProblem + ?Sized,
    T: TelemetrySink + ?Sized,
{
    let score = problem.evaluate(&mut individual.candidate);
    individual.score = score.score;
    tracker.record(&individual.candidate, score);
}

/// Builds `next` from `current`. See the module documentation for the steps.
fn run_generation<P, R, T>(
    problem: &mut P,
    settings: &GeneticSettings,
    current: &mut [Individual<P::Candidate>],
    next: &mut [Individual<P::Candidate>],
    spare: &mut Individual<P::Candidate>,
    rng: &mut R,
    tracker: &mut ProgressTracker<'_, P::Candidate, T>,
) where
    P: CandidateProblem + ?Sized,
    R: Rng + ?Sized,
    T: TelemetrySink + ?Sized,
{
    compute_selection_weights(current, settings.random_selection);
    // stable sort: ordering only matters for elitism, not for sampling
    current.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap());

    for (elite, source) in next.iter_mut().zip(&*current).take(settings.elite_count) {
        elite.candidate.clone_from(&source.candidate);
        elite.score = source.score;
    }

    let mut restart = false;
    let mut slot = settings.elite_count;
    while slot < settings.population_size {
        let mother = pick_by_weight(current, rng.random::<f64>());
        let father = pick_by_weight(current, rng.random::<f64>());

        if slot + 1 < settings.population_size {
            let (head, tail) = next.split_at_mut(slot + 1);
            let child0 = &mut head[slot];
            let child1 = &mut tail[0];
            problem.crossover(
                &mother.candidate,
                &father.candidate,
                &mut child0.candidate,
                &mut child1.candidate,
                rng,
            );
            problem.mutate(
                &mut child0.candidate,
                settings.mutation_rate,
                settings.mutation_distance,
                rng,
            );
            evaluate_slot(problem, tracker, child0);
            problem.mutate(
                &mut child1.candidate,
                settings.mutation_rate,
                settings.mutation_distance,
                rng,
            );
            evaluate_slot(problem, tracker, child1);
        } else {
            // one slot left: the pair's second child lands in the spare buffer
            let child0 = &mut next[slot];
            problem.crossover(
                &mother.candidate,
                &father.candidate,
                &mut child0.candidate,
                &mut spare.candidate,
                rng,
            );
            problem.mutate(
                &mut child0.candidate,
                settings.mutation_rate,
                settings.mutation_distance,
                rng,
            );
            evaluate_slot(problem, tracker, child0);
        }

        if rng.random::<f32>() < settings.restart_probability {
            restart = true;
            break;
        }
        slot += 2;
    }

    let stagnated = settings.restart_on_stagnation
        && current
            .iter()
            .all(|individual| individual.score == current[0].score);
    if restart || stagnated {
        // full-population reset: discard next as built and reseed it
        for individual in next.iter_mut() {
            problem.initialize(&mut individual.candidate, rng);
            evaluate_slot(problem, tracker, individual);
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn compute_selection_weights<C>(population: &mut [Individual<C>], uniform: bool) {
    if uniform {
        let weight = 1.0 / population.len() as f64;
        for individual in population.iter_mut() {
            individual.weight = weight;
        }
        return;
    }
    let total_inv_score: f64 = population
        .iter()
        .map(|individual| 1.0 / individual.score as f64)
        .sum();
    for individual in population.iter_mut() {
        individual.weight = (1.0 / individual.score as f64) / total_inv_score;
    }
}

/// Roulette selection: walks the cumulative weights until they reach `target`
/// (a uniform draw from [0, 1)). Floating-point rounding can leave the sum just
/// short of the target; the last individual is the fallback.
fn pick_by_weight<C>(population: &[Individual<C>], target: f64) -> &Individual<C> {
    let mut cumulative = 0.0;
    for individual in population {
        cumulative += individual.weight;
        if cumulative >= target {
            return individual;
        }
    }
    debug_assert!(cumulative > 0.99);
    population.last().expect("population is never empty")
}
