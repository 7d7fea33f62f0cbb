//! Agent port - the contract every tabular learner implements
//!
//! The driver owns the interaction loop and talks to an agent only through
//! this trait:
//! 1. `get_action(state)` for the action to execute
//! 2. `update(transition)` exactly once per environment step, in order
//! 3. `on_episode_end()` when an episode finishes

use serde::{Deserialize, Serialize};

use crate::{Result, types::Action};

/// One environment transition fed back into an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<S> {
    pub state: S,
    pub action: Action,
    pub reward: f64,
    pub next_state: S,
    /// Action the behaviour policy will execute at `next_state` (on-policy agents)
    pub next_action: Option<Action>,
    /// Whether `next_state` ends the episode
    pub done: bool,
}

impl<S> Transition<S> {
    /// Create a non-terminal transition without a next action
    pub fn new(state: S, action: Action, reward: f64, next_state: S) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
            next_action: None,
            done: false,
        }
    }

    /// Attach the action selected for `next_state`
    pub fn with_next_action(mut self, next_action: Action) -> Self {
        self.next_action = Some(next_action);
        self
    }

    /// Mark `next_state` as terminal
    pub fn terminal(mut self) -> Self {
        self.done = true;
        self
    }
}

/// Agent trait - Unified interface for tabular learners
///
/// Implementations share ε-greedy action selection and differ only in how
/// `update` forms its temporal difference target.
pub trait Agent<S> {
    /// Select an action for `state` with the agent's current policy.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalActions`] if `state` has no legal actions.
    fn get_action(&mut self, state: &S) -> Result<Action>;

    /// Apply the temporal difference update for one transition.
    ///
    /// Must be called once per transition, in the order transitions occur.
    fn update(&mut self, transition: &Transition<S>);

    /// Current estimate for a state-action pair.
    fn get_value(&self, state: &S, action: Action) -> f64;

    /// Best estimate over the legal actions of `state` (0.0 if there are none).
    fn get_best_value(&self, state: &S) -> f64;

    /// Signal that an episode has finished.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Agents with a fixed exploration rate keep it unchanged.
    fn on_episode_end(&mut self) -> Result<()> {
        Ok(())
    }

    /// Whether `update` needs the next action chosen by the behaviour policy.
    ///
    /// Drivers select a′ before calling `update` for agents returning `true`
    /// and must then execute that same a′.
    fn requires_next_action(&self) -> bool {
        false
    }

    /// Current exploration rate.
    fn epsilon(&self) -> f64;

    /// Overwrite the exploration rate, used for greedy evaluation.
    fn set_epsilon(&mut self, epsilon: f64) -> Result<()>;

    /// Name used in logs and comparisons.
    fn name(&self) -> &str;

    /// Seed the exploration RNG for reproducible runs.
    fn set_rng_seed(&mut self, seed: u64);

    /// Forget everything learned and restore the initial exploration rate.
    fn reset(&mut self);
}
