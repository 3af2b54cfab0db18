//! Solve command: load a puzzle, search it, and build a report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use petdetective_lib::{
    load_graph, DeliveryReport, Problem, SearchConfig, Solver, DEFAULT_PROGRESS_INTERVAL,
};

/// Arguments for a solve run.
#[derive(Debug, Clone)]
pub struct SolveArgs {
    /// Edge list file.
    pub graph_file: PathBuf,
    /// Fuel budget.
    pub fuel: u32,
    /// Pets carried at once.
    pub capacity: usize,
    /// Optional cap on search expansions.
    pub max_expansions: Option<usize>,
    /// Log search progress.
    pub debug: bool,
}

impl SolveArgs {
    /// Convert CLI args to a library search configuration.
    pub fn to_config(&self) -> SearchConfig {
        SearchConfig::new(self.fuel)
            .with_capacity(self.capacity)
            .with_max_expansions(self.max_expansions)
            .with_progress_interval(self.debug.then_some(DEFAULT_PROGRESS_INTERVAL))
    }
}

/// Load the puzzle named by `args` and search it.
pub fn run_solve(args: &SolveArgs) -> Result<DeliveryReport> {
    let graph = load_graph(&args.graph_file)
        .with_context(|| format!("failed to load puzzle from {}", args.graph_file.display()))?;
    let problem = Problem::new(graph).context("failed to prepare puzzle")?;

    let config = args.to_config();
    let outcome = Solver::new(&problem, config)
        .context("invalid search configuration")?
        .run();

    Ok(DeliveryReport::from_outcome(&problem, &config, &outcome))
}
