//! Serialization support for trained tabular agents.

use std::{
    fs::File,
    hash::Hash,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    ports::Agent,
    q_learning::{
        agent::{QLearningAgent, SarsaAgent},
        eps_scheduling::QLearningAgentEpsScheduling,
        policy::PolicyState,
        q_table::ValueTable,
        schedule::Schedule,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    QLearning,
    QLearningEpsScheduling,
    Sarsa,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::QLearning => "q-learning",
            Algorithm::QLearningEpsScheduling => "q-learning-eps",
            Algorithm::Sarsa => "sarsa",
        };
        f.write_str(name)
    }
}

/// Information about how a saved agent was trained
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub environment: Option<String>,
    pub episodes: usize,
    pub mean_reward_last_100: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize + Eq + Hash",
    deserialize = "S: Deserialize<'de> + Eq + Hash"
))]
pub struct SavedAgent<S> {
    pub version: u32,
    pub algorithm: Algorithm,
    state: PolicyState<S>,
    schedule: Option<Schedule>,
    episode: usize,
    pub metadata: TrainingMetadata,
}

pub enum TrainedAgent<S> {
    QLearning(QLearningAgent<S>),
    QLearningEpsScheduling(QLearningAgentEpsScheduling<S>),
    Sarsa(SarsaAgent<S>),
}

impl<S: Clone + Eq + Hash + 'static> TrainedAgent<S> {
    pub fn into_box(self) -> Box<dyn Agent<S>> {
        match self {
            TrainedAgent::QLearning(agent) => Box::new(agent),
            TrainedAgent::QLearningEpsScheduling(agent) => Box::new(agent),
            TrainedAgent::Sarsa(agent) => Box::new(agent),
        }
    }

    pub fn as_agent_mut(&mut self) -> &mut dyn Agent<S> {
        match self {
            TrainedAgent::QLearning(agent) => agent,
            TrainedAgent::QLearningEpsScheduling(agent) => agent,
            TrainedAgent::Sarsa(agent) => agent,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            TrainedAgent::QLearning(_) => Algorithm::QLearning,
            TrainedAgent::QLearningEpsScheduling(_) => Algorithm::QLearningEpsScheduling,
            TrainedAgent::Sarsa(_) => Algorithm::Sarsa,
        }
    }

    /// Value table of the wrapped agent
    pub fn table(&self) -> &ValueTable<S> {
        match self {
            TrainedAgent::QLearning(agent) => agent.policy().table(),
            TrainedAgent::QLearningEpsScheduling(agent) => agent.inner().policy().table(),
            TrainedAgent::Sarsa(agent) => agent.policy().table(),
        }
    }
}

impl<S> TrainedAgent<S>
where
    S: Clone + Eq + Hash + Serialize + DeserializeOwned,
{
    pub fn to_saved(&self, metadata: TrainingMetadata) -> SavedAgent<S> {
        match self {
            TrainedAgent::QLearning(agent) => SavedAgent::from_q_learning(agent, metadata),
            TrainedAgent::QLearningEpsScheduling(agent) => {
                SavedAgent::from_scheduled(agent, metadata)
            }
            TrainedAgent::Sarsa(agent) => SavedAgent::from_sarsa(agent, metadata),
        }
    }
}

impl<S> SavedAgent<S>
where
    S: Clone + Eq + Hash + Serialize + DeserializeOwned,
{
    pub const VERSION: u32 = 1;

    pub fn from_q_learning(agent: &QLearningAgent<S>, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            algorithm: Algorithm::QLearning,
            state: agent.export_state(),
            schedule: None,
            episode: 0,
            metadata,
        }
    }

    pub fn from_scheduled(
        agent: &QLearningAgentEpsScheduling<S>,
        metadata: TrainingMetadata,
    ) -> Self {
        Self {
            version: Self::VERSION,
            algorithm: Algorithm::QLearningEpsScheduling,
            state: agent.export_state(),
            schedule: Some(*agent.schedule()),
            episode: agent.episode(),
            metadata,
        }
    }

    pub fn from_sarsa(agent: &SarsaAgent<S>, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            algorithm: Algorithm::Sarsa,
            state: agent.export_state(),
            schedule: None,
            episode: 0,
            metadata,
        }
    }

    /// Completed episodes recorded by a scheduled agent, zero otherwise
    pub fn episode(&self) -> usize {
        self.episode
    }

    /// Number of stored Q-values
    pub fn table_size(&self) -> usize {
        self.state.table.len()
    }

    pub fn to_agent(&self) -> Result<TrainedAgent<S>> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported agent save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }

        let state = self.state.clone();
        match self.algorithm {
            Algorithm::QLearning => Ok(TrainedAgent::QLearning(QLearningAgent::from_state(state))),
            Algorithm::Sarsa => Ok(TrainedAgent::Sarsa(SarsaAgent::from_state(state))),
            Algorithm::QLearningEpsScheduling => {
                let schedule = self
                    .schedule
                    .ok_or_else(|| anyhow!("Scheduled agent saved without a schedule"))?;
                Ok(TrainedAgent::QLearningEpsScheduling(
                    QLearningAgentEpsScheduling::from_state(state, schedule, self.episode),
                ))
            }
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, self).context("Failed to serialize agent")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize agent")
    }
}
