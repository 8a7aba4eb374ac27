use std::path::PathBuf;

use rand::Rng as _;
use spritepack_packing::{PenaltyKind, PlacementEncoding, SpritePackingProblem};
use spritepack_search::{RandomSettings, RunSeed, random_search};

use crate::{record::RunRecorder, sheet};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RandomArg {
    /// Placement encoding interpreting the genome
    #[arg(long, default_value = "cartesian")]
    encoding: PlacementEncoding,
    /// Overlap penalty formula
    #[arg(long, default_value = "area")]
    penalty: PenaltyKind,
    /// Total evaluation budget
    #[arg(long, default_value_t = 20_000)]
    max_iterations: u64,
    /// Hex seed for a reproducible run (random when omitted)
    #[arg(long)]
    seed: Option<RunSeed>,
    /// Index-grid sheet file (a built-in demo sheet when omitted)
    #[arg(long)]
    sheet: Option<PathBuf>,
    /// Write per-iteration scores as CSV
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Write the best placement listing here instead of stdout
    #[arg(long)]
    best: Option<PathBuf>,
    /// Write a JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,
}

pub(crate) fn run(arg: &RandomArg) -> anyhow::Result<()> {
    let sheet = match &arg.sheet {
        Some(path) => sheet::load_index_sheet(path)?,
        None => sheet::default_sheet(),
    };
    let mut problem = SpritePackingProblem::new(sheet, arg.encoding, arg.penalty);
    let (grid_width, grid_height) = problem.grid_size();
    eprintln!(
        "Sampling {} sprites on a {grid_width}x{grid_height} grid ({:?} encoding)",
        problem.sheet().len(),
        arg.encoding,
    );

    let settings = RandomSettings {
        max_iterations: arg.max_iterations,
    };
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Seed: {seed}");

    let mut recorder = RunRecorder::new(arg.scores.clone())?;
    let mut rng = seed.rng();
    let outcome = random_search(&mut problem, &settings, &mut rng, &mut recorder);
    recorder.finish()?;

    super::report_outcome(
        "random",
        seed,
        &problem,
        &outcome,
        &recorder,
        arg.best.clone(),
        arg.summary.clone(),
    )
}
