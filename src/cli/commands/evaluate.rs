//! Evaluate command - Greedy rollouts of a saved agent

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section},
    envs::{ChainState, TwoStateChain},
    pipeline::evaluate,
    q_learning::SavedAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent")]
pub struct EvaluateArgs {
    /// Path to a trained agent file
    pub agent: PathBuf,

    /// Number of evaluation episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Step cap per episode
    #[arg(long, default_value_t = 10_000)]
    pub max_steps: usize,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let saved = SavedAgent::<ChainState>::load_from_file(&args.agent)?;

    print_section("Loaded agent");
    print_kv("Algorithm", &saved.algorithm.to_string());
    print_kv("Episodes trained", &saved.metadata.episodes.to_string());
    if let Some(env) = &saved.metadata.environment {
        print_kv("Environment", env);
    }
    print_kv("Q-values stored", &saved.table_size().to_string());

    let mut agent = saved.to_agent()?;
    let mut env = TwoStateChain::new();
    let result = evaluate(&mut env, agent.as_agent_mut(), args.episodes, args.max_steps)?;

    print_section("Greedy evaluation");
    print_kv("Episodes", &result.episodes.to_string());
    print_kv("Mean reward", &format!("{:.3}", result.mean_reward));
    print_kv("Mean steps", &format!("{:.2}", result.mean_steps));
    print_kv("Completed", &result.completed.to_string());
    Ok(())
}
