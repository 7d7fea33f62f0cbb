//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::{
    Error, Result,
    pipeline::training::{REWARD_WINDOW, trailing_mean},
    ports::{EpisodeSummary, Observer},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    rewards: Vec<f64>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            rewards: Vec::new(),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        self.rewards.clear();
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.rewards.push(summary.total_reward);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(format!(
                "mean reward {:.2}, eps {:.3}",
                trailing_mean(&self.rewards, REWARD_WINDOW),
                summary.epsilon
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "mean reward {:.2}",
                trailing_mean(&self.rewards, REWARD_WINDOW)
            ));
        }
        Ok(())
    }
}

/// Logging observer - reports the windowed mean reward every `every` episodes
pub struct LoggingObserver {
    label: String,
    every: usize,
    rewards: Vec<f64>,
}

impl LoggingObserver {
    pub fn new(label: impl Into<String>, every: usize) -> Self {
        Self {
            label: label.into(),
            every: every.max(1),
            rewards: Vec::new(),
        }
    }
}

impl Observer for LoggingObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.rewards.clear();
        log::info!("training {} for {total_episodes} episodes", self.label);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.rewards.push(summary.total_reward);
        if summary.episode.is_multiple_of(self.every) {
            log::info!(
                "mean reward {} episode {}: {:.3}",
                self.label,
                summary.episode,
                trailing_mean(&self.rewards, REWARD_WINDOW)
            );
        }
        Ok(())
    }
}

/// Metrics observer - Tracks reward statistics over a trailing window
pub struct MetricsObserver {
    window: usize,
    rewards: Vec<f64>,
    steps: Vec<usize>,
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub window_mean_reward: f64,
    pub window_std_reward: f64,
    pub best_reward: f64,
    pub avg_episode_length: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer with the default 100-episode window
    pub fn new() -> Self {
        Self::with_window(REWARD_WINDOW)
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
            rewards: Vec::new(),
            steps: Vec::new(),
        }
    }

    fn window_rewards(&self) -> &[f64] {
        &self.rewards[self.rewards.len().saturating_sub(self.window)..]
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let window = self.window_rewards();
        let window_mean_reward = if window.is_empty() {
            0.0
        } else {
            window.iter().mean()
        };
        let window_std_reward = if window.len() < 2 {
            0.0
        } else {
            window.iter().std_dev()
        };
        let avg_episode_length = if self.steps.is_empty() {
            0.0
        } else {
            self.steps.iter().sum::<usize>() as f64 / self.steps.len() as f64
        };
        MetricsSummary {
            episodes: self.rewards.len(),
            window_mean_reward,
            window_std_reward,
            best_reward: self.rewards.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            avg_episode_length,
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        self.rewards.clear();
        self.steps.clear();
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.rewards.push(summary.total_reward);
        self.steps.push(summary.steps);
        Ok(())
    }
}

/// JSONL observer - Writes one episode summary per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create observation file {}", path.as_ref().display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        serde_json::to_writer(&mut self.writer, summary)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(episode: usize, total_reward: f64, steps: usize) -> EpisodeSummary {
        EpisodeSummary {
            episode,
            total_reward,
            steps,
            epsilon: 0.1,
        }
    }

    #[test]
    fn test_metrics_window() {
        let mut observer = MetricsObserver::with_window(2);
        observer.on_training_start(3).unwrap();
        observer.on_episode_end(&summary(0, 10.0, 4)).unwrap();
        observer.on_episode_end(&summary(1, 1.0, 2)).unwrap();
        observer.on_episode_end(&summary(2, 3.0, 3)).unwrap();

        let metrics = observer.summary();
        assert_eq!(metrics.episodes, 3);
        assert_eq!(metrics.window_mean_reward, 2.0);
        // Sample standard deviation of [1, 3]
        assert!((metrics.window_std_reward - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(metrics.best_reward, 10.0);
        assert_eq!(metrics.avg_episode_length, 3.0);
    }

    #[test]
    fn test_metrics_empty() {
        let metrics = MetricsObserver::new().summary();
        assert_eq!(metrics.episodes, 0);
        assert_eq!(metrics.window_mean_reward, 0.0);
        assert_eq!(metrics.window_std_reward, 0.0);
    }

    #[test]
    fn test_jsonl_writes_one_line_per_episode() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut observer = JsonlObserver::new(file.path()).unwrap();
        observer.on_training_start(2).unwrap();
        observer.on_episode_end(&summary(0, 1.0, 1)).unwrap();
        observer.on_episode_end(&summary(1, -1.0, 5)).unwrap();
        observer.on_training_end().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<EpisodeSummary> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].steps, 5);
        assert_eq!(lines[1].total_reward, -1.0);
    }
}
