//! CLI frontend for the Umbra dice table.

mod commands;
mod logging;

use std::process;

use clap::{Parser, Subcommand};

use umbra_mechanics::{PoolSpec, TableConfig};

#[derive(Parser)]
#[command(
    name = "umbra",
    about = "Umbra: soul and assimilation dice at the table",
    version,
    propagate_version = true
)]
struct Cli {
    /// RNG seed for reproducible rolls
    #[arg(short, long, global = true, env = "UMBRA_SEED")]
    seed: Option<u64>,

    /// Target number each d10 must reach (1-10)
    #[arg(
        short,
        long,
        global = true,
        default_value = "6",
        value_parser = clap::value_parser!(i32).range(1..=10)
    )]
    difficulty: i32,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log every roll to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice pool, e.g. `5s2a` (5 soul, 2 assimilation)
    Roll {
        /// Pool notation: `5s2a`, `5s`, `2a`, `5/2`, or `5`
        pool: PoolSpec,
    },

    /// Evaluate a damage formula, e.g. `2d6 + successes`
    Damage {
        /// The formula to evaluate
        formula: String,

        /// Successes substituted for the placeholder
        #[arg(long, default_value = "0")]
        successes: u32,

        /// Largest dice group accepted in the formula
        #[arg(long, default_value = "1000")]
        max_group_dice: u32,
    },

    /// Resolve a full attack: attack, defense, damage, absorption
    Attack {
        /// The attacker's pool
        #[arg(short, long)]
        attack: PoolSpec,

        /// The defender's defense pool
        #[arg(short = 'D', long, default_value = "0")]
        defense: PoolSpec,

        /// The defender's absorption pool
        #[arg(short = 'A', long, default_value = "0")]
        absorption: PoolSpec,

        /// The weapon's damage formula
        #[arg(short, long, default_value = "")]
        formula: String,
    },

    /// Estimate the odds of a pool by rolling it many times
    Odds {
        /// Pool notation: `5s2a`, `5s`, `2a`, `5/2`, or `5`
        pool: PoolSpec,

        /// Number of rolls to sample
        #[arg(short, long, default_value = "10000")]
        trials: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = TableConfig::default().with_difficulty(cli.difficulty);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    tracing::debug!(seed = ?config.seed, difficulty = config.difficulty, "table configured");

    let result = match cli.command {
        Commands::Roll { pool } => commands::roll::run(&config, pool, cli.json),
        Commands::Damage {
            formula,
            successes,
            max_group_dice,
        } => config
            .with_max_group_dice(max_group_dice)
            .map_err(|e| e.to_string())
            .and_then(|config| commands::damage::run(&config, &formula, successes, cli.json)),
        Commands::Attack {
            attack,
            defense,
            absorption,
            formula,
        } => commands::attack::run(&config, attack, defense, absorption, &formula, cli.json),
        Commands::Odds { pool, trials } => commands::odds::run(&config, pool, trials, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
