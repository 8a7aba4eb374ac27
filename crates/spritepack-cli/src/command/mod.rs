use std::{io::Write as _, path::PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use spritepack_packing::{Genome, SpritePackingProblem};
use spritepack_search::{CandidateProblem as _, RunSeed, SearchOutcome};
use spritepack_stats::descriptive::DescriptiveStats;

use crate::{record::RunRecorder, report::RunReport, util::Output};

mod random;
mod search;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Genetic search for a tight sprite packing
    Search(#[clap(flatten)] search::SearchArg),
    /// Random-sampling baseline over the same problem
    Random(#[clap(flatten)] random::RandomArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Search(arg) => search::run(&arg)?,
        Mode::Random(arg) => random::run(&arg)?,
    }
    Ok(())
}

/// End-of-run reporting shared by both strategies: stderr stats, the best
/// placement listing (the run's sole stdout artifact, absent when nothing
/// feasible was found), and the optional JSON summary.
fn report_outcome(
    strategy: &'static str,
    seed: RunSeed,
    problem: &SpritePackingProblem,
    outcome: &SearchOutcome<Genome>,
    recorder: &RunRecorder,
    best_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    eprintln!(
        "Completed {} evaluations ({} feasible)",
        outcome.evaluations,
        recorder.feasible()
    );
    if let Some(stats) = DescriptiveStats::new(recorder.scores().iter().copied()) {
        eprintln!("Score Stats:");
        eprintln!("  Min:    {:.1}", stats.min);
        eprintln!("  Max:    {:.1}", stats.max);
        eprintln!("  Mean:   {:.1}", stats.mean);
        eprintln!("  Median: {:.1}", stats.median);
    }

    match &outcome.best {
        Some(best) => {
            eprintln!(
                "Best feasible placement: score {} (bounding box area {})",
                best.score.score, best.score.raw_score
            );
            let mut output = Output::from_output_path(best_path)?;
            problem.render(&best.candidate, &mut output)?;
            output.flush()?;
            eprintln!("Placement listing written to {}", output.display_path());
        }
        None => eprintln!("No feasible placement found within the evaluation budget"),
    }

    if let Some(path) = summary_path {
        let report = RunReport {
            strategy,
            completed_at: Utc::now(),
            seed,
            evaluations: outcome.evaluations,
            feasible_evaluations: recorder.feasible(),
            best_score: outcome.best.as_ref().map(|best| best.score.score),
            best_raw_score: outcome.best.as_ref().map(|best| best.score.raw_score),
        };
        Output::open(path)?.write_json(&report)?;
    }
    Ok(())
}
