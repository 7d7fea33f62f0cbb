//! Ports (interfaces) for hexagonal architecture
//!
//! Ports define the boundaries between the learning core and its
//! collaborators: the environment that produces transitions and the
//! observers that record training progress.

pub mod agent;
pub mod environment;
pub mod observer;

pub use agent::{Agent, Transition};
pub use environment::{Environment, Step};
pub use observer::{EpisodeSummary, Observer};
