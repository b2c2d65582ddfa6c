//! CLI frontend for the DiceCheck Monte Carlo dice simulator.

mod commands;

use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dc_core::{DEFAULT_BATCH_SIZE, DEFAULT_SIMULATIONS};

#[derive(Parser)]
#[command(
    name = "dicecheck",
    about = "DiceCheck — compare dice odds by Monte Carlo simulation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log simulation progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Runs interactive mode when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two scenarios, e.g. `compare 1d6 atLeastOne 1 2d12 atLeastOne 1`
    Compare {
        /// Dice for scenario 1 (e.g. 2d6)
        dice_a: String,

        /// Condition kind for scenario 1 (name or number 0-5)
        kind_a: String,

        /// Condition value for scenario 1
        #[arg(allow_negative_numbers = true)]
        value_a: i64,

        /// Dice for scenario 2
        dice_b: String,

        /// Condition kind for scenario 2
        kind_b: String,

        /// Condition value for scenario 2
        #[arg(allow_negative_numbers = true)]
        value_b: i64,

        /// Matching dice required by a countMatching condition in scenario 1
        #[arg(long, allow_negative_numbers = true)]
        count_a: Option<i64>,

        /// Matching dice required by a countMatching condition in scenario 2
        #[arg(long, allow_negative_numbers = true)]
        count_b: Option<i64>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Prompt for both scenarios and the number of simulations
    Interactive,

    /// Roll dice once and check conditions against the result
    Roll {
        /// Dice to roll (e.g. 3d6)
        dice: String,

        /// Condition as KIND:VALUE or countMatching:VALUE:COUNT (repeatable)
        #[arg(short, long = "condition")]
        conditions: Vec<String>,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

/// Settings shared by simulation runs.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of simulations per scenario
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIMULATIONS)]
    pub simulations: u64,

    /// Trials per parallel batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u64,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Worker threads (0 = one per core)
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "dicecheck=debug,dc_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Compare {
            dice_a,
            kind_a,
            value_a,
            dice_b,
            kind_b,
            value_b,
            count_a,
            count_b,
            run,
        }) => {
            let scenarios = commands::scenario(&dice_a, &kind_a, value_a, count_a).and_then(|a| {
                commands::scenario(&dice_b, &kind_b, value_b, count_b).map(|b| (a, b))
            });
            scenarios.and_then(|(a, b)| commands::compare::run(&a, &b, &run))
        }
        Some(Commands::Interactive) | None => commands::interactive::run(),
        Some(Commands::Roll {
            dice,
            conditions,
            seed,
        }) => commands::roll::run(&dice, &conditions, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
