//! Application layer: configuration and agent construction.
//!
//! `config` holds the serde-backed configuration types. `container` turns an
//! [`ExperimentConfig`] into a ready-to-train agent.

pub mod config;
pub mod container;

pub use config::{AgentConfig, ExperimentConfig, Hyperparameters};
pub use container::{AgentKind, App};
