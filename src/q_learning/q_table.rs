//! Value table for tabular temporal difference learning

use std::{collections::HashMap, hash::Hash};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::Action,
};

/// Q-table mapping (state, action) pairs to value estimates
///
/// Grows lazily: a state gets an entry the first time one of its actions is
/// written. Any pair that was never written reads as 0.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize + Eq + Hash",
    deserialize = "S: Deserialize<'de> + Eq + Hash"
))]
pub struct ValueTable<S> {
    /// Q-values: state -> (action -> Q-value)
    q_values: HashMap<S, HashMap<Action, f64>>,
}

impl<S> Default for ValueTable<S> {
    fn default() -> Self {
        Self {
            q_values: HashMap::new(),
        }
    }
}

impl<S: Eq + Hash> ValueTable<S> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the Q-value for a state-action pair, 0.0 if never written
    pub fn get_value(&self, state: &S, action: Action) -> f64 {
        self.q_values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set the Q-value for a state-action pair
    pub fn set_value(&mut self, state: S, action: Action, value: f64) {
        self.q_values
            .entry(state)
            .or_default()
            .insert(action, value);
    }

    /// Greedy action over `legal_actions`
    ///
    /// Ties resolve to the first maximising action in `legal_actions` order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyActionSet`] when `legal_actions` is empty.
    pub fn best_action(&self, state: &S, legal_actions: &[Action]) -> Result<Action> {
        let (&first, rest) = legal_actions.split_first().ok_or(Error::EmptyActionSet)?;
        let mut best = (first, self.get_value(state, first));
        for &action in rest {
            let value = self.get_value(state, action);
            if value > best.1 {
                best = (action, value);
            }
        }
        Ok(best.0)
    }

    /// Maximum Q-value over `legal_actions`, 0.0 when the set is empty
    pub fn best_value(&self, state: &S, legal_actions: &[Action]) -> f64 {
        match self.best_action(state, legal_actions) {
            Ok(action) => self.get_value(state, action),
            Err(_) => 0.0,
        }
    }

    /// Number of stored (state, action) entries
    pub fn len(&self) -> usize {
        self.q_values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Number of distinct states with at least one stored entry
    pub fn num_states(&self) -> usize {
        self.q_values.len()
    }

    /// Iterate over every stored (state, action, value) triple
    pub fn iter(&self) -> impl Iterator<Item = (&S, Action, f64)> {
        self.q_values
            .iter()
            .flat_map(|(state, actions)| actions.iter().map(move |(&a, &v)| (state, a, v)))
    }

    /// Drop all stored values
    pub fn clear(&mut self) {
        self.q_values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_pairs_are_zero() {
        let table: ValueTable<&str> = ValueTable::new();
        assert_eq!(table.get_value(&"start", 0), 0.0);
        assert_eq!(table.get_value(&"start", 17), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_get() {
        let mut table = ValueTable::new();
        table.set_value("s", 4, 1.5);
        assert_eq!(table.get_value(&"s", 4), 1.5);
        assert_eq!(table.get_value(&"s", 3), 0.0);
        table.set_value("s", 4, -2.0);
        assert_eq!(table.get_value(&"s", 4), -2.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lazy_growth() {
        let mut table = ValueTable::new();
        assert_eq!(table.num_states(), 0);
        table.set_value(7u32, 0, 0.1);
        table.set_value(7u32, 1, 0.2);
        table.set_value(9u32, 0, 0.3);
        assert_eq!(table.num_states(), 2);
        assert_eq!(table.len(), 3);
        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    fn test_best_action_and_value() {
        let mut table = ValueTable::new();
        table.set_value("s", 0, 0.5);
        table.set_value("s", 1, 1.5);
        table.set_value("s", 2, 0.8);

        let legal_actions = vec![0, 1, 2];
        assert_eq!(table.best_action(&"s", &legal_actions).unwrap(), 1);
        assert_eq!(table.best_value(&"s", &legal_actions), 1.5);
    }

    #[test]
    fn test_best_action_ties_take_first_in_order() {
        let mut table = ValueTable::new();
        table.set_value("s", 1, 2.0);
        table.set_value("s", 3, 2.0);

        assert_eq!(table.best_action(&"s", &[0, 1, 2, 3]).unwrap(), 1);
        assert_eq!(table.best_action(&"s", &[3, 2, 1, 0]).unwrap(), 3);
        // All unseen: first legal action wins
        assert_eq!(table.best_action(&"other", &[2, 0, 1]).unwrap(), 2);
    }

    #[test]
    fn test_best_value_all_negative() {
        let mut table = ValueTable::new();
        table.set_value("s", 0, -3.0);
        table.set_value("s", 1, -1.0);
        assert_eq!(table.best_value(&"s", &[0, 1]), -1.0);
        // Unseen action 2 reads as 0.0 and wins
        assert_eq!(table.best_value(&"s", &[0, 1, 2]), 0.0);
    }

    #[test]
    fn test_empty_action_set() {
        let table: ValueTable<&str> = ValueTable::new();
        assert!(matches!(
            table.best_action(&"s", &[]),
            Err(Error::EmptyActionSet)
        ));
        assert_eq!(table.best_value(&"s", &[]), 0.0);
    }
}
