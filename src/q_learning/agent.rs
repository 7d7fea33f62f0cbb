//! Q-learning and SARSA agents
//!
//! Both agents share the ε-greedy behaviour policy in [`EpsilonGreedy`] and
//! differ only in the bootstrap term of their temporal difference target.

use std::hash::Hash;

use crate::{
    app::AgentConfig,
    error::Result,
    ports::{Agent, Transition},
    q_learning::policy::{EpsilonGreedy, PolicyState},
    types::{Action, Epsilon},
};

/// Q-learning agent (off-policy TD control)
///
/// Learns the optimal Q* function by always updating toward the maximum
/// next-state value, regardless of the action the behaviour policy takes.
#[derive(Debug, Clone)]
pub struct QLearningAgent<S> {
    policy: EpsilonGreedy<S>,
}

impl<S: Clone + Eq + Hash> QLearningAgent<S> {
    /// Create a new Q-learning agent
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter, in (0, 1]
    /// * `epsilon` - Exploration rate, in [0, 1]
    /// * `gamma` - Discount factor, in [0, 1]
    /// * `legal_actions` - Ordered actions available in every state
    pub fn new(
        learning_rate: f64,
        epsilon: f64,
        gamma: f64,
        legal_actions: Vec<Action>,
    ) -> Result<Self> {
        Self::from_config(
            &AgentConfig::new(legal_actions)
                .with_learning_rate(learning_rate)
                .with_epsilon(epsilon)
                .with_gamma(gamma),
        )
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            policy: EpsilonGreedy::new(config)?,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.policy.set_rng_seed(seed);
        self
    }

    pub fn policy(&self) -> &EpsilonGreedy<S> {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut EpsilonGreedy<S> {
        &mut self.policy
    }

    /// Q-learning target: r + γ max_b Q(s', b), with 0 bootstrap at terminals
    pub fn td_target(&self, transition: &Transition<S>) -> f64 {
        let max_next_q = if transition.done || self.policy.is_terminal(&transition.next_state) {
            0.0
        } else {
            self.policy.get_best_value(&transition.next_state)
        };
        transition.reward + self.policy.gamma() * max_next_q
    }

    pub(crate) fn export_state(&self) -> PolicyState<S> {
        self.policy.export_state()
    }

    pub(crate) fn from_state(state: PolicyState<S>) -> Self {
        Self {
            policy: EpsilonGreedy::from_state(state),
        }
    }
}

impl<S: Clone + Eq + Hash> Agent<S> for QLearningAgent<S> {
    fn get_action(&mut self, state: &S) -> Result<Action> {
        self.policy.get_action(state)
    }

    fn update(&mut self, transition: &Transition<S>) {
        let target = self.td_target(transition);
        self.policy
            .td_update(&transition.state, transition.action, target);
    }

    fn get_value(&self, state: &S, action: Action) -> f64 {
        self.policy.get_value(state, action)
    }

    fn get_best_value(&self, state: &S) -> f64 {
        self.policy.get_best_value(state)
    }

    fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.policy.set_epsilon(Epsilon::new(epsilon)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.policy.set_rng_seed(seed);
    }

    fn reset(&mut self) {
        self.policy.reset();
    }
}

/// SARSA agent (on-policy TD control)
///
/// Learns Q^π for the policy it follows, exploration included. The driver
/// must pass the action it will actually execute at the successor state.
#[derive(Debug, Clone)]
pub struct SarsaAgent<S> {
    policy: EpsilonGreedy<S>,
}

impl<S: Clone + Eq + Hash> SarsaAgent<S> {
    /// Create a new SARSA agent
    pub fn new(
        learning_rate: f64,
        epsilon: f64,
        gamma: f64,
        legal_actions: Vec<Action>,
    ) -> Result<Self> {
        Self::from_config(
            &AgentConfig::new(legal_actions)
                .with_learning_rate(learning_rate)
                .with_epsilon(epsilon)
                .with_gamma(gamma),
        )
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            policy: EpsilonGreedy::new(config)?,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.policy.set_rng_seed(seed);
        self
    }

    pub fn policy(&self) -> &EpsilonGreedy<S> {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut EpsilonGreedy<S> {
        &mut self.policy
    }

    /// SARSA target: r + γ Q(s', a'), with 0 bootstrap at terminals
    pub fn td_target(&self, transition: &Transition<S>) -> f64 {
        let next_q = if transition.done || self.policy.is_terminal(&transition.next_state) {
            0.0
        } else {
            match transition.next_action {
                Some(next_action) => self.policy.get_value(&transition.next_state, next_action),
                None => {
                    log::warn!("SARSA update without a next action on a non-terminal state");
                    0.0
                }
            }
        };
        transition.reward + self.policy.gamma() * next_q
    }

    pub(crate) fn export_state(&self) -> PolicyState<S> {
        self.policy.export_state()
    }

    pub(crate) fn from_state(state: PolicyState<S>) -> Self {
        Self {
            policy: EpsilonGreedy::from_state(state),
        }
    }
}

impl<S: Clone + Eq + Hash> Agent<S> for SarsaAgent<S> {
    fn get_action(&mut self, state: &S) -> Result<Action> {
        self.policy.get_action(state)
    }

    fn update(&mut self, transition: &Transition<S>) {
        let target = self.td_target(transition);
        self.policy
            .td_update(&transition.state, transition.action, target);
    }

    fn get_value(&self, state: &S, action: Action) -> f64 {
        self.policy.get_value(state, action)
    }

    fn get_best_value(&self, state: &S) -> f64 {
        self.policy.get_best_value(state)
    }

    fn requires_next_action(&self) -> bool {
        true
    }

    fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.policy.set_epsilon(Epsilon::new(epsilon)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "SARSA"
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.policy.set_rng_seed(seed);
    }

    fn reset(&mut self) {
        self.policy.reset();
    }
}
