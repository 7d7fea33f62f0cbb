//! Compare command - Train every algorithm under the same configuration

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use super::ExperimentArgs;
use crate::{
    app::{AgentKind, App},
    cli::output::{print_comparison, print_section},
    envs::{ChainState, TwoStateChain},
    pipeline::ComparisonFramework,
    ports::Environment,
};

#[derive(Parser, Debug)]
#[command(about = "Compare Q-learning, scheduled Q-learning and SARSA")]
pub struct CompareArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Greedy evaluation episodes after training
    #[arg(long, default_value_t = 100)]
    pub eval_episodes: usize,

    /// Optional JSON file for the comparison results
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let experiment = args.experiment.resolve()?;
    let app = App::new();
    let legal_actions = TwoStateChain::new().legal_actions();

    let mut framework = ComparisonFramework::<ChainState>::new(experiment.training.clone())
        .with_eval_episodes(args.eval_episodes);
    for kind in AgentKind::ALL {
        let agent = app.create_agent(kind, &experiment, legal_actions.clone())?;
        framework = framework.with_agent(agent.into_box());
    }

    let results = framework.run(TwoStateChain::new)?;

    print_section("Comparison");
    print_comparison(&results);

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &results)?;
    }
    Ok(())
}
