//! ε-greedy base shared by every tabular agent
//!
//! [`EpsilonGreedy`] owns the value table, the hyperparameters and the
//! exploration RNG. Concrete agents compose it and only decide which target
//! to hand to [`EpsilonGreedy::td_update`].

use std::{collections::HashMap, hash::Hash};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    app::AgentConfig,
    error::{Error, Result},
    q_learning::q_table::ValueTable,
    types::{Action, Discount, Epsilon, LearningRate},
};

/// Ordered legal-action set with optional per-state overrides
///
/// An empty override marks a terminal (absorbing) state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize + Eq + Hash",
    deserialize = "S: Deserialize<'de> + Eq + Hash"
))]
pub struct ActionSpace<S> {
    actions: Vec<Action>,
    overrides: HashMap<S, Vec<Action>>,
}

fn check_unique(actions: &[Action]) -> Result<()> {
    for (i, action) in actions.iter().enumerate() {
        if actions[..i].contains(action) {
            return Err(Error::InvalidConfiguration {
                message: format!("action {action} listed more than once in legal actions"),
            });
        }
    }
    Ok(())
}

impl<S: Eq + Hash> ActionSpace<S> {
    /// Same legal actions in every state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if an action is repeated.
    pub fn new(actions: Vec<Action>) -> Result<Self> {
        check_unique(&actions)?;
        Ok(Self {
            actions,
            overrides: HashMap::new(),
        })
    }

    /// Replace the legal actions of a single state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if an action is repeated.
    pub fn set_state_actions(&mut self, state: S, actions: Vec<Action>) -> Result<()> {
        check_unique(&actions)?;
        self.overrides.insert(state, actions);
        Ok(())
    }

    /// Legal actions of `state` in their fixed order
    pub fn legal_actions(&self, state: &S) -> &[Action] {
        self.overrides
            .get(state)
            .map_or(self.actions.as_slice(), Vec::as_slice)
    }

    /// Default actions shared by states without an override
    pub fn default_actions(&self) -> &[Action] {
        &self.actions
    }
}

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize + Eq + Hash",
    deserialize = "S: Deserialize<'de> + Eq + Hash"
))]
pub(crate) struct PolicyState<S> {
    pub table: ValueTable<S>,
    pub learning_rate: LearningRate,
    pub gamma: Discount,
    pub epsilon: Epsilon,
    pub initial_epsilon: Epsilon,
    pub actions: ActionSpace<S>,
    pub rng_seed: Option<u64>,
}

/// ε-greedy policy over a value table
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<S> {
    table: ValueTable<S>,
    learning_rate: LearningRate,
    gamma: Discount,
    epsilon: Epsilon,
    initial_epsilon: Epsilon,
    actions: ActionSpace<S>,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl<S: Clone + Eq + Hash> EpsilonGreedy<S> {
    /// Build the policy from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] for out-of-range α, γ or ε and
    /// [`Error::InvalidConfiguration`] for repeated legal actions.
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let params = config.validate()?;
        Ok(Self {
            table: ValueTable::new(),
            learning_rate: params.learning_rate,
            gamma: params.gamma,
            epsilon: params.epsilon,
            initial_epsilon: params.epsilon,
            actions: ActionSpace::new(config.legal_actions.clone())?,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
        })
    }

    /// ε-greedy action selection
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] when `state` has no legal actions.
    pub fn get_action(&mut self, state: &S) -> Result<Action> {
        let legal = self.actions.legal_actions(state);
        if legal.is_empty() {
            return Err(Error::NoLegalActions);
        }
        if self.rng.random::<f64>() < self.epsilon.value() {
            // Explore: uniform over legal actions
            legal.choose(&mut self.rng).copied().ok_or(Error::NoLegalActions)
        } else {
            // Exploit
            self.table
                .best_action(state, legal)
                .map_err(|_| Error::NoLegalActions)
        }
    }

    /// Greedy action without exploration
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyActionSet`] when `state` has no legal actions.
    pub fn best_action(&self, state: &S) -> Result<Action> {
        self.table
            .best_action(state, self.actions.legal_actions(state))
    }

    pub fn get_value(&self, state: &S, action: Action) -> f64 {
        self.table.get_value(state, action)
    }

    pub fn get_best_value(&self, state: &S) -> f64 {
        self.table
            .best_value(state, self.actions.legal_actions(state))
    }

    /// Whether `state` has no legal actions
    pub fn is_terminal(&self, state: &S) -> bool {
        self.actions.legal_actions(state).is_empty()
    }

    /// Move Q(s,a) a fraction α of the way toward `target`
    ///
    /// Q(s,a) ← Q(s,a) + α[target - Q(s,a)]
    pub fn td_update(&mut self, state: &S, action: Action, target: f64) {
        let current_q = self.table.get_value(state, action);
        let td_error = target - current_q;
        let new_q = current_q + self.learning_rate.value() * td_error;
        self.table.set_value(state.clone(), action, new_q);
    }

    pub fn gamma(&self) -> f64 {
        self.gamma.value()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate.value()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon.value()
    }

    pub fn set_epsilon(&mut self, epsilon: Epsilon) {
        self.epsilon = epsilon;
    }

    pub fn actions(&self) -> &ActionSpace<S> {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionSpace<S> {
        &mut self.actions
    }

    pub fn table(&self) -> &ValueTable<S> {
        &self.table
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// Clear the table, restore the initial ε and rewind the RNG
    pub fn reset(&mut self) {
        self.table.clear();
        self.epsilon = self.initial_epsilon;
        self.rng = build_rng(self.rng_seed);
    }

    pub(crate) fn export_state(&self) -> PolicyState<S> {
        PolicyState {
            table: self.table.clone(),
            learning_rate: self.learning_rate,
            gamma: self.gamma,
            epsilon: self.epsilon,
            initial_epsilon: self.initial_epsilon,
            actions: self.actions.clone(),
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_state(state: PolicyState<S>) -> Self {
        Self {
            table: state.table,
            learning_rate: state.learning_rate,
            gamma: state.gamma,
            epsilon: state.epsilon,
            initial_epsilon: state.initial_epsilon,
            actions: state.actions,
            rng: build_rng(state.rng_seed),
            rng_seed: state.rng_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(epsilon: f64) -> EpsilonGreedy<u32> {
        let config = AgentConfig::new(vec![0, 1, 2])
            .with_epsilon(epsilon)
            .with_seed(5);
        EpsilonGreedy::new(&config).unwrap()
    }

    #[test]
    fn test_greedy_when_epsilon_zero() {
        let mut policy = policy(0.0);
        policy.td_update(&3, 2, 4.0);
        for _ in 0..200 {
            assert_eq!(policy.get_action(&3).unwrap(), 2);
        }
    }

    #[test]
    fn test_td_update_moves_toward_target() {
        let mut policy = policy(0.0);
        policy.td_update(&0, 1, 10.0);
        // α = 0.5 by default
        assert!((policy.get_value(&0, 1) - 5.0).abs() < 1e-12);
        policy.td_update(&0, 1, 10.0);
        assert!((policy.get_value(&0, 1) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_state_override_marks_terminal() {
        let mut policy = policy(0.3);
        policy.actions_mut().set_state_actions(9, vec![]).unwrap();
        assert!(policy.is_terminal(&9));
        assert!(!policy.is_terminal(&1));
        assert!(matches!(policy.get_action(&9), Err(Error::NoLegalActions)));
        assert!(matches!(policy.best_action(&9), Err(Error::EmptyActionSet)));
        assert_eq!(policy.get_best_value(&9), 0.0);
    }

    #[test]
    fn test_state_override_restricts_choices() {
        let mut policy = policy(1.0);
        policy.actions_mut().set_state_actions(4, vec![2]).unwrap();
        for _ in 0..100 {
            assert_eq!(policy.get_action(&4).unwrap(), 2);
        }
    }

    #[test]
    fn test_duplicate_actions_rejected() {
        assert!(ActionSpace::<u32>::new(vec![0, 1, 0]).is_err());
    }

    #[test]
    fn test_empty_action_space() {
        let config = AgentConfig::new(vec![]);
        let mut policy: EpsilonGreedy<u32> = EpsilonGreedy::new(&config).unwrap();
        assert!(matches!(policy.get_action(&0), Err(Error::NoLegalActions)));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut policy = policy(0.4);
        policy.td_update(&1, 0, 2.0);
        policy.set_epsilon(Epsilon::greedy());
        policy.reset();
        assert!(policy.table().is_empty());
        assert_eq!(policy.epsilon(), 0.4);
    }

    #[test]
    fn test_seeded_policies_agree() {
        let mut a = policy(0.5);
        let mut b = policy(0.5);
        let left: Vec<_> = (0..50).map(|_| a.get_action(&0).unwrap()).collect();
        let right: Vec<_> = (0..50).map(|_| b.get_action(&0).unwrap()).collect();
        assert_eq!(left, right);
    }
}
