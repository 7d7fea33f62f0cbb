//! Training pipeline: the episode loop that drives an agent

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Agent, Environment, EpisodeSummary, Observer, Transition},
    types::Action,
};

/// Window used for the headline mean reward
pub const REWARD_WINDOW: usize = 100;

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Step cap per episode
    pub max_steps: usize,

    /// Random seed for the agent's exploration
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_steps: 10_000,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub episodes: usize,

    /// Total reward of each episode, in order
    pub rewards: Vec<f64>,

    /// Steps taken in each episode
    pub steps: Vec<usize>,

    /// Mean reward over the last 100 episodes
    pub mean_reward_last_100: f64,

    /// Wall-clock training time
    pub elapsed_secs: f64,
}

/// Mean of the last `window` entries, 0.0 when empty
pub fn trailing_mean(values: &[f64], window: usize) -> f64 {
    let tail = &values[values.len().saturating_sub(window)..];
    if tail.is_empty() {
        0.0
    } else {
        tail.iter().sum::<f64>() / tail.len() as f64
    }
}

impl TrainingResult {
    /// Create a training result from per-episode summaries
    pub fn new(summaries: &[EpisodeSummary], elapsed_secs: f64) -> Self {
        let rewards: Vec<f64> = summaries.iter().map(|s| s.total_reward).collect();
        let steps = summaries.iter().map(|s| s.steps).collect();
        Self {
            episodes: summaries.len(),
            mean_reward_last_100: trailing_mean(&rewards, REWARD_WINDOW),
            rewards,
            steps,
            elapsed_secs,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for a single agent in an environment
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    summaries: Vec<EpisodeSummary>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            summaries: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Per-episode summaries of the last run
    pub fn summaries(&self) -> &[EpisodeSummary] {
        &self.summaries
    }

    /// Train `agent` for the configured number of episodes
    ///
    /// Learning is cumulative: the agent's table is never reset between
    /// episodes.
    pub fn run<E, A>(&mut self, env: &mut E, agent: &mut A) -> Result<TrainingResult>
    where
        E: Environment,
        A: Agent<E::State> + ?Sized,
    {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }
        self.summaries.clear();
        let started = Instant::now();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            let summary = self.play_episode(episode, env, agent)?;
            agent.on_episode_end()?;
            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
            self.summaries.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::new(&self.summaries, started.elapsed().as_secs_f64());
        log::info!(
            "{} trained for {} episodes on {}: mean reward (last {}) {:.3}",
            agent.name(),
            result.episodes,
            env.name(),
            REWARD_WINDOW,
            result.mean_reward_last_100
        );
        Ok(result)
    }

    /// Run one episode, updating the agent after every step
    ///
    /// Off-policy agents are updated before the next action is selected. For
    /// agents that need a′, it is drawn from the agent first, passed to
    /// `update`, and then executed on the following step.
    pub fn play_episode<E, A>(
        &self,
        episode: usize,
        env: &mut E,
        agent: &mut A,
    ) -> Result<EpisodeSummary>
    where
        E: Environment,
        A: Agent<E::State> + ?Sized,
    {
        let epsilon = agent.epsilon();
        let mut state = env.reset();
        let mut pending: Option<Action> = None;
        let mut total_reward = 0.0;
        let mut steps = 0;

        while steps < self.config.max_steps {
            let action = match pending.take() {
                Some(action) => action,
                None => agent.get_action(&state)?,
            };
            let step = env.step(action)?;
            total_reward += step.reward;
            steps += 1;

            let mut transition = Transition::new(state, action, step.reward, step.next_state);
            transition.done = step.done;
            if !step.done && agent.requires_next_action() {
                let next_action = agent.get_action(&transition.next_state)?;
                transition.next_action = Some(next_action);
                pending = Some(next_action);
            }
            agent.update(&transition);

            if step.done {
                break;
            }
            state = transition.next_state;
        }

        Ok(EpisodeSummary {
            episode,
            total_reward,
            steps,
            epsilon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(episode: usize, total_reward: f64) -> EpisodeSummary {
        EpisodeSummary {
            episode,
            total_reward,
            steps: 1,
            epsilon: 0.0,
        }
    }

    #[test]
    fn test_trailing_mean() {
        assert_eq!(trailing_mean(&[], 100), 0.0);
        assert_eq!(trailing_mean(&[1.0, 2.0, 3.0], 2), 2.5);
        assert_eq!(trailing_mean(&[1.0, 2.0, 3.0], 10), 2.0);
    }

    #[test]
    fn test_training_result_uses_last_hundred() {
        let summaries: Vec<_> = (0..150)
            .map(|i| summary(i, if i < 50 { -10.0 } else { 1.0 }))
            .collect();
        let result = TrainingResult::new(&summaries, 0.5);
        assert_eq!(result.episodes, 150);
        assert_eq!(result.mean_reward_last_100, 1.0);
        assert_eq!(result.steps.len(), 150);
    }

    #[test]
    fn test_training_result_json_roundtrip() {
        let result = TrainingResult::new(&[summary(0, 2.0), summary(1, -1.0)], 0.25);
        let file = tempfile::NamedTempFile::new().unwrap();
        result.save(file.path()).unwrap();
        let loaded = TrainingResult::load(file.path()).unwrap();
        assert_eq!(loaded, result);
    }
}
