//! Train command - Train one tabular agent

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

use super::ExperimentArgs;
use crate::{
    app::{AgentKind, App},
    cli::output::{print_kv, print_section},
    envs::{ChainState, TwoStateChain},
    export::{export_learning_curve, export_value_table},
    pipeline::{JsonlObserver, LoggingObserver, ProgressObserver, TrainingPipeline},
    ports::Environment,
    q_learning::TrainingMetadata,
};

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train an agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Algorithm to train
    #[arg(value_enum)]
    pub algorithm: AgentKind,

    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Output file for the trained agent (MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for JSONL episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional CSV file for the learning curve
    #[arg(long)]
    pub curve: Option<PathBuf>,

    /// Optional CSV file for the learned value table
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Log the mean reward every N episodes
    #[arg(long, default_value_t = 100)]
    pub log_every: usize,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let experiment = args.experiment.resolve()?;
    let mut env = TwoStateChain::new();
    let mut agent = App::new().create_agent::<ChainState>(
        args.algorithm,
        &experiment,
        env.legal_actions(),
    )?;
    let name = agent.as_agent_mut().name().to_string();

    let mut pipeline = TrainingPipeline::new(experiment.training.clone())
        .with_observer(Box::new(LoggingObserver::new(name.clone(), args.log_every)));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = pipeline
        .run(&mut env, agent.as_agent_mut())
        .with_context(|| format!("Training {name} failed"))?;

    print_section(&format!("{name} on {}", env.name()));
    print_kv("Episodes", &result.episodes.to_string());
    print_kv(
        "Mean reward (100)",
        &format!("{:.3}", result.mean_reward_last_100),
    );
    print_kv("Final epsilon", &format!("{:.4}", agent.as_agent_mut().epsilon()));
    print_kv("Q-values stored", &agent.table().len().to_string());
    print_kv("Elapsed", &format!("{:.3}s", result.elapsed_secs));

    if let Some(path) = &args.curve {
        export_learning_curve(pipeline.summaries(), path)
            .with_context(|| format!("Failed to write learning curve {}", path.display()))?;
    }
    if let Some(path) = &args.values {
        export_value_table(agent.table(), path)
            .with_context(|| format!("Failed to write value table {}", path.display()))?;
    }
    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        result
            .save(&path)
            .with_context(|| format!("Failed to write summary {}", path.display()))?;
    }
    if let Some(path) = &args.output {
        let metadata = TrainingMetadata {
            environment: Some(env.name().to_string()),
            episodes: result.episodes,
            mean_reward_last_100: Some(result.mean_reward_last_100),
        };
        agent.to_saved(metadata).save_to_file(path)?;
        println!("\nSaved agent to {}", path.display());
    }

    Ok(())
}
