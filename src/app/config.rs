//! Configuration types for agent creation.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    pipeline::TrainingConfig,
    q_learning::Schedule,
    types::{Action, Discount, Epsilon, LearningRate},
};

/// Construction-time configuration shared by all agents.
///
/// # Examples
///
/// ```
/// use tabular_rl::app::AgentConfig;
///
/// let config = AgentConfig::new(vec![0, 1, 2, 3])
///     .with_learning_rate(0.5)
///     .with_gamma(0.99)
///     .with_epsilon(0.1)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Step size α in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ in [0, 1]
    pub gamma: f64,
    /// Exploration rate ε in [0, 1]
    pub epsilon: f64,
    /// Ordered legal-action set shared by every state
    pub legal_actions: Vec<Action>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

/// Hyperparameters after range validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    pub learning_rate: LearningRate,
    pub gamma: Discount,
    pub epsilon: Epsilon,
}

impl AgentConfig {
    /// Create a configuration for the given legal actions.
    ///
    /// Uses default values for other parameters:
    /// - Learning rate: 0.5
    /// - Gamma: 0.99
    /// - Epsilon: 0.1
    /// - Seed: None (non-deterministic)
    pub fn new(legal_actions: Vec<Action>) -> Self {
        Self {
            learning_rate: 0.5,
            gamma: 0.99,
            epsilon: 0.1,
            legal_actions,
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every hyperparameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] for the first value out of range.
    pub fn validate(&self) -> Result<Hyperparameters> {
        Ok(Hyperparameters {
            learning_rate: LearningRate::new(self.learning_rate)?,
            gamma: Discount::new(self.gamma)?,
            epsilon: Epsilon::new(self.epsilon)?,
        })
    }
}

/// Experiment file contents: agent hyperparameters, ε schedule and training loop.
///
/// Legal actions are not part of the file; they come from the environment.
///
/// ```json
/// {
///   "learning_rate": 0.5,
///   "gamma": 0.99,
///   "epsilon": 0.1,
///   "schedule": { "kind": "exponential", "initial": 0.25, "decay_rate": 0.99, "floor": 0.01 },
///   "training": { "episodes": 1000, "max_steps": 10000, "seed": 7 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub learning_rate: f64,
    pub gamma: f64,
    /// Fixed ε for the non-scheduled agents
    pub epsilon: f64,
    /// ε schedule for the scheduled Q-learning agent
    pub schedule: Schedule,
    pub training: TrainingConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            gamma: 0.99,
            epsilon: 0.1,
            schedule: Schedule::default(),
            training: TrainingConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Load an experiment from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open config file {}", path.as_ref().display()),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Agent configuration for the given legal actions
    pub fn agent_config(&self, legal_actions: Vec<Action>) -> AgentConfig {
        let config = AgentConfig::new(legal_actions)
            .with_learning_rate(self.learning_rate)
            .with_gamma(self.gamma)
            .with_epsilon(self.epsilon);
        match self.training.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
