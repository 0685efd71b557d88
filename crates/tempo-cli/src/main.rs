#![forbid(unsafe_code)]

mod cmd;
mod output;
mod snapshot;

use clap::{Parser, Subcommand};
use output::OutputMode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tempo: dependency-aware task scheduling",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Compute a value-maximizing schedule",
        long_about = "Select a value-maximizing subset of tasks that fits the time and energy \
                      budgets and respects dependencies.",
        after_help = "EXAMPLES:\n    # Auto-select the solver\n    tempo schedule --tasks tasks.json --time 120 --energy 5\n\n    # Force the exact solver on a subset\n    tempo schedule --tasks tasks.json --time 90 --energy 4 --algorithm knapsack --task-ids t1,t2\n\n    # Emit machine-readable output\n    tempo schedule --tasks tasks.json --time 120 --energy 5 --json"
    )]
    Schedule(cmd::schedule::ScheduleArgs),

    #[command(
        about = "Inspect the dependency graph",
        long_about = "Report graph nodes, whether a cycle exists, and (if acyclic) a topological \
                      order of task ids.",
        after_help = "EXAMPLES:\n    tempo graph --tasks tasks.json\n    tempo graph --tasks tasks.json --json"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        name = "check-cycle",
        about = "Check whether a proposed dependency would create a cycle",
        long_about = "Validate a single proposed dependency edge before committing it, without \
                      mutating the snapshot.",
        after_help = "EXAMPLES:\n    tempo check-cycle --tasks tasks.json --task t2 --depends-on t1"
    )]
    CheckCycle(cmd::check_cycle::CheckCycleArgs),

    #[command(
        about = "List dependency cycles currently in the snapshot",
        after_help = "EXAMPLES:\n    tempo cycles --tasks tasks.json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        about = "List tasks that depend on a task (the deletion pre-check)",
        long_about = "Report every task that directly or transitively depends on the given task. \
                      A task with dependents must not be deleted.",
        after_help = "EXAMPLES:\n    tempo dependents --tasks tasks.json --task t1"
    )]
    Dependents(cmd::dependents::DependentsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let mode = cli.output_mode();
    match cli.command {
        Commands::Schedule(args) => cmd::schedule::run(&args, mode),
        Commands::Graph(args) => cmd::graph::run(&args, mode),
        Commands::CheckCycle(args) => cmd::check_cycle::run(&args, mode),
        Commands::Cycles(args) => cmd::cycles::run(&args, mode),
        Commands::Dependents(args) => cmd::dependents::run(&args, mode),
    }
}
