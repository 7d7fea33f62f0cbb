//! Q-learning with an episode-indexed exploration schedule
//!
//! [`QLearningAgentEpsScheduling`] wraps a [`QLearningAgent`] and only
//! changes when ε is written: at construction and on every
//! [`Agent::on_episode_end`]. The update rule is the wrapped agent's.

use std::hash::Hash;

use crate::{
    app::AgentConfig,
    error::Result,
    ports::{Agent, Transition},
    q_learning::{
        agent::QLearningAgent,
        policy::PolicyState,
        schedule::{EpsilonSchedule, Schedule},
    },
    types::{Action, Epsilon},
};

/// Q-learning agent whose ε follows a schedule over completed episodes
#[derive(Debug, Clone)]
pub struct QLearningAgentEpsScheduling<S, E = Schedule> {
    inner: QLearningAgent<S>,
    schedule: E,
    episode: usize,
}

impl<S, E> QLearningAgentEpsScheduling<S, E>
where
    S: Clone + Eq + Hash,
    E: EpsilonSchedule,
{
    /// Create a scheduled agent; ε starts at `schedule.epsilon(0)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidHyperparameter`] if α, γ or the first
    /// scheduled ε is out of range.
    pub fn new(
        learning_rate: f64,
        gamma: f64,
        legal_actions: Vec<Action>,
        schedule: E,
    ) -> Result<Self> {
        let config = AgentConfig::new(legal_actions)
            .with_learning_rate(learning_rate)
            .with_gamma(gamma);
        Self::from_config(&config, schedule)
    }

    /// Create a scheduled agent; `config.epsilon` is replaced by the schedule
    pub fn from_config(config: &AgentConfig, schedule: E) -> Result<Self> {
        let config = config.clone().with_epsilon(schedule.epsilon(0));
        Ok(Self {
            inner: QLearningAgent::from_config(&config)?,
            schedule,
            episode: 0,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.inner.set_rng_seed(seed);
        self
    }

    /// Number of episodes completed so far
    pub fn episode(&self) -> usize {
        self.episode
    }

    pub fn schedule(&self) -> &E {
        &self.schedule
    }

    pub fn inner(&self) -> &QLearningAgent<S> {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut QLearningAgent<S> {
        &mut self.inner
    }

    pub(crate) fn export_state(&self) -> PolicyState<S> {
        self.inner.export_state()
    }

    pub(crate) fn from_state(state: PolicyState<S>, schedule: E, episode: usize) -> Self {
        Self {
            inner: QLearningAgent::from_state(state),
            schedule,
            episode,
        }
    }
}

impl<S, E> Agent<S> for QLearningAgentEpsScheduling<S, E>
where
    S: Clone + Eq + Hash,
    E: EpsilonSchedule,
{
    fn get_action(&mut self, state: &S) -> Result<Action> {
        self.inner.get_action(state)
    }

    fn update(&mut self, transition: &Transition<S>) {
        self.inner.update(transition);
    }

    fn get_value(&self, state: &S, action: Action) -> f64 {
        self.inner.get_value(state, action)
    }

    fn get_best_value(&self, state: &S) -> f64 {
        self.inner.get_best_value(state)
    }

    /// Advance the episode counter and write the scheduled ε.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidHyperparameter`] if the schedule yields a
    /// value outside [0, 1]; the previous ε is kept in that case.
    fn on_episode_end(&mut self) -> Result<()> {
        let epsilon = Epsilon::new(self.schedule.epsilon(self.episode + 1))?;
        self.episode += 1;
        if epsilon.value() != self.inner.epsilon() {
            log::debug!(
                "episode {}: epsilon {} -> {}",
                self.episode,
                self.inner.epsilon(),
                epsilon
            );
        }
        self.inner.policy_mut().set_epsilon(epsilon);
        Ok(())
    }

    fn epsilon(&self) -> f64 {
        self.inner.epsilon()
    }

    fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.inner.set_epsilon(epsilon)
    }

    fn name(&self) -> &str {
        "Q-Learning (epsilon scheduling)"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.inner.set_rng_seed(seed);
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.episode = 0;
    }
}
