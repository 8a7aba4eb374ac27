use std::path::PathBuf;

use rand::Rng as _;
use spritepack_packing::{PenaltyKind, PlacementEncoding, SpritePackingProblem};
use spritepack_search::{GeneticSettings, RunSeed, genetic_search};

use crate::{record::RunRecorder, sheet};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SearchArg {
    /// Placement encoding interpreting the genome
    #[arg(long, default_value = "cartesian")]
    encoding: PlacementEncoding,
    /// Overlap penalty formula
    #[arg(long, default_value = "area")]
    penalty: PenaltyKind,
    /// Total evaluation budget
    #[arg(long, default_value_t = 20_000)]
    max_iterations: u64,
    #[arg(long, default_value_t = 100)]
    population_size: usize,
    #[arg(long, default_value_t = 2)]
    elite_count: usize,
    /// Select parents uniformly instead of by fitness
    #[arg(long)]
    random_selection: bool,
    #[arg(long, default_value_t = 0.02)]
    mutation_rate: f32,
    #[arg(long, default_value_t = 0.2)]
    mutation_distance: f32,
    /// Per-pair probability of abandoning a generation
    #[arg(long, default_value_t = 0.0)]
    restart_probability: f32,
    /// Reseed the population when every score is identical
    #[arg(long)]
    restart_on_stagnation: bool,
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

pub(crate) fn run(arg: &SearchArg) -> anyhow::Result<()> {
    let sheet = match &arg.sheet {
        Some(path) => sheet::load_index_sheet(path)?,
        None => sheet::default_sheet(),
    };
    let mut problem = SpritePackingProblem::new(sheet, arg.encoding, arg.penalty);
    let (grid_width, grid_height) = problem.grid_size();
    eprintln!(
        "Packing {} sprites on a {grid_width}x{grid_height} grid ({:?} encoding)",
        problem.sheet().len(),
        arg.encoding,
    );

    let settings = GeneticSettings {
        max_iterations: arg.max_iterations,
        population_size: arg.population_size,
        elite_count: arg.elite_count,
        random_selection: arg.random_selection,
        mutation_rate: arg.mutation_rate,
        mutation_distance: arg.mutation_distance,
        restart_probability: arg.restart_probability,
        restart_on_stagnation: arg.restart_on_stagnation,
    };
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Seed: {seed}");

    let mut recorder = RunRecorder::new(arg.scores.clone())?;
    let mut rng = seed.rng();
    let outcome = genetic_search(&mut problem, &settings, &mut rng, &mut recorder)?;
    recorder.finish()?;

    super::report_outcome(
        "search",
        seed,
        &problem,
        &outcome,
        &recorder,
        arg.best.clone(),
        arg.summary.clone(),
    )
}
