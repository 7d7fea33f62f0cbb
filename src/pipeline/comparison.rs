//! Side-by-side comparison of agents trained under the same configuration

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{
    evaluation::evaluate,
    training::{TrainingConfig, TrainingPipeline},
};
use crate::{
    Result,
    ports::{Agent, Environment},
};

/// Training time and performance of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub name: String,
    pub episodes: usize,
    pub mean_reward_last_100: f64,
    pub training_secs: f64,
    pub greedy_mean_reward: f64,
}

/// Trains each agent on a fresh environment and collects comparable numbers
pub struct ComparisonFramework<S> {
    config: TrainingConfig,
    agents: Vec<Box<dyn Agent<S>>>,
    eval_episodes: usize,
}

impl<S> ComparisonFramework<S> {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            agents: Vec::new(),
            eval_episodes: 100,
        }
    }

    pub fn with_agent(mut self, agent: Box<dyn Agent<S>>) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn with_eval_episodes(mut self, episodes: usize) -> Self {
        self.eval_episodes = episodes;
        self
    }

    /// Train every agent on an environment from `make_env`
    pub fn run<E, F>(&mut self, mut make_env: F) -> Result<Vec<ComparisonResult>>
    where
        E: Environment<State = S>,
        F: FnMut() -> E,
    {
        let mut results = Vec::with_capacity(self.agents.len());
        for agent in &mut self.agents {
            let mut env = make_env();
            let mut pipeline = TrainingPipeline::new(self.config.clone());

            let started = Instant::now();
            let training = pipeline.run(&mut env, agent.as_mut())?;
            let training_secs = started.elapsed().as_secs_f64();

            let greedy = evaluate(
                &mut env,
                agent.as_mut(),
                self.eval_episodes,
                self.config.max_steps,
            )?;

            results.push(ComparisonResult {
                name: agent.name().to_string(),
                episodes: training.episodes,
                mean_reward_last_100: training.mean_reward_last_100,
                training_secs,
                greedy_mean_reward: greedy.mean_reward,
            });
        }
        Ok(results)
    }

    /// Trained agents, in insertion order
    pub fn agents(&self) -> &[Box<dyn Agent<S>>] {
        &self.agents
    }
}
