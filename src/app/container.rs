//! Factory for agents built from experiment configuration.

use std::hash::Hash;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::config::ExperimentConfig;
use crate::{
    Result,
    q_learning::{
        Algorithm, QLearningAgent, QLearningAgentEpsScheduling, SarsaAgent, TrainedAgent,
    },
    types::Action,
};

/// Agents the toolkit can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    /// Off-policy Q-learning with fixed ε
    QLearning,
    /// Q-learning with an ε schedule over episodes
    QLearningEps,
    /// On-policy SARSA with fixed ε
    Sarsa,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::QLearning, AgentKind::QLearningEps, AgentKind::Sarsa];
}

impl From<AgentKind> for Algorithm {
    fn from(kind: AgentKind) -> Self {
        match kind {
            AgentKind::QLearning => Algorithm::QLearning,
            AgentKind::QLearningEps => Algorithm::QLearningEpsScheduling,
            AgentKind::Sarsa => Algorithm::Sarsa,
        }
    }
}

/// Application entry point for creating agents.
///
/// # Examples
///
/// ```
/// use tabular_rl::app::{AgentKind, App, ExperimentConfig};
///
/// let app = App::new().with_default_seed(42);
/// let agent = app.create_agent::<u32>(AgentKind::Sarsa, &ExperimentConfig::default(), vec![0, 1])?;
/// # Ok::<(), tabular_rl::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed used when the experiment does not specify one
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Create an agent of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidHyperparameter`] for out-of-range values
    /// in `experiment`.
    pub fn create_agent<S: Clone + Eq + Hash>(
        &self,
        kind: AgentKind,
        experiment: &ExperimentConfig,
        legal_actions: Vec<Action>,
    ) -> Result<TrainedAgent<S>> {
        let mut config = experiment.agent_config(legal_actions);
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }

        Ok(match kind {
            AgentKind::QLearning => TrainedAgent::QLearning(QLearningAgent::from_config(&config)?),
            AgentKind::QLearningEps => TrainedAgent::QLearningEpsScheduling(
                QLearningAgentEpsScheduling::from_config(&config, experiment.schedule)?,
            ),
            AgentKind::Sarsa => TrainedAgent::Sarsa(SarsaAgent::from_config(&config)?),
        })
    }
}
