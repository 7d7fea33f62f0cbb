//! Common test utilities for the tabular_rl test suite.
//!
//! Provides small environments and an agent wrapper that records the order
//! in which the driver calls into an agent.

#![allow(dead_code)]

use tabular_rl::{
    Action, Agent, Error, Result, Transition,
    ports::{Environment, Step},
};

/// Corridor of `length` cells; 0 moves left, 1 moves right, -1 per step.
/// Reaching the rightmost cell ends the episode.
pub struct Corridor {
    length: usize,
    position: usize,
}

impl Corridor {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            position: 0,
        }
    }
}

impl Environment for Corridor {
    type State = usize;

    fn reset(&mut self) -> usize {
        self.position = 0;
        self.position
    }

    fn step(&mut self, action: Action) -> Result<Step<usize>> {
        match action {
            0 => self.position = self.position.saturating_sub(1),
            1 => self.position += 1,
            other => {
                return Err(Error::InvalidAction {
                    action: other,
                    context: "corridor".to_string(),
                });
            }
        }
        Ok(Step {
            next_state: self.position,
            reward: -1.0,
            done: self.position + 1 == self.length,
        })
    }

    fn legal_actions(&self) -> Vec<Action> {
        vec![0, 1]
    }

    fn name(&self) -> &str {
        "corridor"
    }
}

/// Single-state environment that never terminates
pub struct EndlessLoop;

impl Environment for EndlessLoop {
    type State = u8;

    fn reset(&mut self) -> u8 {
        0
    }

    fn step(&mut self, _action: Action) -> Result<Step<u8>> {
        Ok(Step {
            next_state: 0,
            reward: 0.5,
            done: false,
        })
    }

    fn legal_actions(&self) -> Vec<Action> {
        vec![0, 1, 2]
    }

    fn name(&self) -> &str {
        "endless-loop"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call<S> {
    GetAction { state: S, action: Action },
    Update(Transition<S>),
    EpisodeEnd,
}

/// Agent wrapper that records every call made by the driver
pub struct Recording<A, S> {
    pub inner: A,
    pub calls: Vec<Call<S>>,
}

impl<A, S> Recording<A, S> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    pub fn updates(&self) -> Vec<&Transition<S>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Update(transition) => Some(transition),
                _ => None,
            })
            .collect()
    }
}

impl<A: Agent<S>, S: Clone> Agent<S> for Recording<A, S> {
    fn get_action(&mut self, state: &S) -> Result<Action> {
        let action = self.inner.get_action(state)?;
        self.calls.push(Call::GetAction {
            state: state.clone(),
            action,
        });
        Ok(action)
    }

    fn update(&mut self, transition: &Transition<S>) {
        self.calls.push(Call::Update(transition.clone()));
        self.inner.update(transition);
    }

    fn get_value(&self, state: &S, action: Action) -> f64 {
        self.inner.get_value(state, action)
    }

    fn get_best_value(&self, state: &S) -> f64 {
        self.inner.get_best_value(state)
    }

    fn on_episode_end(&mut self) -> Result<()> {
        self.calls.push(Call::EpisodeEnd);
        self.inner.on_episode_end()
    }

    fn requires_next_action(&self) -> bool {
        self.inner.requires_next_action()
    }

    fn epsilon(&self) -> f64 {
        self.inner.epsilon()
    }

    fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        self.inner.set_epsilon(epsilon)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.inner.set_rng_seed(seed);
    }

    fn reset(&mut self) {
        self.calls.clear();
        self.inner.reset();
    }
}
