//! Observer port - abstraction for training observation and data collection
//!
//! The observer methods are called in the following order:
//! 1. `on_training_start(total_episodes)` - Once at the beginning
//! 2. `on_episode_end(summary)` - After every episode
//! 3. `on_training_end()` - Once at the end

use serde::{Deserialize, Serialize};

use crate::Result;

/// Summary of one finished episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Zero-based episode index
    pub episode: usize,
    /// Sum of rewards collected during the episode
    pub total_reward: f64,
    /// Number of environment steps taken
    pub steps: usize,
    /// Exploration rate used for the episode
    pub epsilon: f64,
}

/// Observer trait for monitoring training
///
/// All methods default to doing nothing, so adapters only override the
/// events they care about.
pub trait Observer {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode, once the agent has been told it ended.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
