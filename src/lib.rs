//! Tabular reinforcement learning toolkit
//!
//! This crate provides:
//! - A lazily grown value table over discrete (state, action) pairs
//! - ε-greedy Q-learning and SARSA agents
//! - Q-learning with an episode-indexed exploration schedule
//! - A training pipeline, observers, greedy evaluation and comparisons
//! - Persistence of trained agents and CSV export of learning curves

pub mod app;
pub mod cli;
pub mod envs;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use ports::{Agent, Environment, Transition};
pub use q_learning::{QLearningAgent, QLearningAgentEpsScheduling, SarsaAgent, ValueTable};
pub use types::Action;
