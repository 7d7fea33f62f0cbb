//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training agents in an environment
//! - Greedy evaluation of learned policies
//! - Comparing multiple agents
//! - Recording observations during training

pub mod comparison;
pub mod evaluation;
pub mod observers;
pub mod training;

pub use comparison::{ComparisonFramework, ComparisonResult};
pub use evaluation::{EvaluationResult, evaluate};
pub use observers::{
    JsonlObserver, LoggingObserver, MetricsObserver, MetricsSummary, ProgressObserver,
};
pub use training::{REWARD_WINDOW, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Environment, Observer};
