//! Environment port - the source of transitions
//!
//! Environments are external collaborators; the crate only needs `reset`
//! and `step` from them.

use std::hash::Hash;

use crate::{Result, types::Action};

/// Result of applying one action to an environment
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    pub next_state: S,
    pub reward: f64,
    pub done: bool,
}

/// Discrete-state, discrete-action episodic environment
pub trait Environment {
    type State: Clone + Eq + Hash;

    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> Self::State;

    /// Apply `action` in the current state.
    ///
    /// # Errors
    ///
    /// Returns an error when the action is not valid or the episode is over.
    fn step(&mut self, action: Action) -> Result<Step<Self::State>>;

    /// Ordered set of actions legal in every non-terminal state.
    fn legal_actions(&self) -> Vec<Action>;

    fn name(&self) -> &str;
}
