//! Evolutionary search over opaque candidate problems.
//!
//! This crate implements the strategy side of the sprite-packing experiments: a
//! genetic algorithm ([`genetic`]) and a pure random-sampling baseline
//! ([`random`]), both driving the same [`CandidateProblem`] capability without
//! knowing which problem domain is behind it.
//!
//! # How a Run Works
//!
//! 1. **Initialize** - Candidates are filled with valid random encodings by the problem
//! 2. **Evaluate** - The problem scores each candidate ([`Score`], lower is better)
//! 3. **Track** - Every evaluation emits one telemetry record, and feasible
//!    candidates (zero overlap) compete for the best-so-far slot
//! 4. **Reproduce** (genetic only) - Selection, crossover, and mutation build the
//!    next generation
//! 5. **Terminate** - After a fixed number of evaluations
//!
//! # Determinism
//!
//! All randomized operations draw from a single sequential [`rand_pcg::Pcg32`]
//! stream owned by the caller and passed explicitly. Running the same problem
//! with the same [`RunSeed`] and settings reproduces a run bit for bit.

pub use self::{
    genetic::{GeneticSettings, SettingsError, genetic_search},
    problem::{CandidateProblem, Score},
    random::{RandomSettings, random_search},
    seed::{ParseRunSeedError, RunSeed},
    telemetry::{BestSolution, IterationRecord, NullTelemetry, SearchOutcome, TelemetrySink},
};

pub mod genetic;
pub mod problem;
pub mod random;
pub mod seed;
pub mod telemetry;
