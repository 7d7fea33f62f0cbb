//! CLI command implementations

pub mod compare;
pub mod evaluate;
pub mod train;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::ExperimentConfig;

/// Options shared by the training commands
#[derive(Args, Debug, Clone)]
pub struct ExperimentArgs {
    /// JSON experiment file (hyperparameters, schedule, training loop)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Step cap per episode
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Learning rate α
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Fixed exploration rate ε
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ExperimentArgs {
    /// Load the experiment file, if any, and apply flag overrides
    pub fn resolve(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("Failed to load experiment {}", path.display()))?,
            None => ExperimentConfig::default(),
        };
        if let Some(episodes) = self.episodes {
            config.training.episodes = episodes;
        }
        if let Some(max_steps) = self.max_steps {
            config.training.max_steps = max_steps;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if self.seed.is_some() {
            config.training.seed = self.seed;
        }
        Ok(config)
    }
}
