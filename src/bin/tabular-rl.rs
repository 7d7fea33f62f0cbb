//! tabular-rl CLI - train, compare and evaluate tabular agents

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tabular-rl")]
#[command(version, about = "Tabular reinforcement learning toolkit", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent (Q-learning, scheduled Q-learning, SARSA)
    Train(Box<tabular_rl::cli::commands::train::TrainArgs>),

    /// Compare all algorithms side-by-side
    Compare(tabular_rl::cli::commands::compare::CompareArgs),

    /// Evaluate a trained agent greedily
    Evaluate(tabular_rl::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Train(args) => tabular_rl::cli::commands::train::execute(*args),
        Commands::Compare(args) => tabular_rl::cli::commands::compare::execute(args),
        Commands::Evaluate(args) => tabular_rl::cli::commands::evaluate::execute(args),
    }
}
