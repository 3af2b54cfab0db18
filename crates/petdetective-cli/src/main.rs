use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use petdetective_cli::output::{write_report, OutputFormat};
use petdetective_cli::solve::{run_solve, SolveArgs};
use petdetective_lib::DEFAULT_CAPACITY;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find a pickup and delivery sequence for a Pet Detective puzzle"
)]
struct Cli {
    /// Edge list file with one `A <--> B` connection per line.
    graph_file: PathBuf,

    /// Fuel budget: the number of road segments the car may drive.
    fuel: u32,

    /// Log search progress (expansions, queue size, deliveries) to stderr.
    #[arg(long)]
    debug: bool,

    /// Number of pets the car can carry at once.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Stop after this many expansions and report the best partial sequence.
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Usage errors exit with 1; --help and --version are not errors.
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let args = SolveArgs {
        graph_file: cli.graph_file,
        fuel: cli.fuel,
        capacity: cli.capacity,
        max_expansions: cli.max_expansions,
        debug: cli.debug,
    };
    tracing::debug!(?args, "solving puzzle");

    let report = run_solve(&args)?;
    write_report(&mut io::stdout().lock(), &report, cli.format)
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
