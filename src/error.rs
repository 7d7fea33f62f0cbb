//! Error types for the tabular RL crate

use thiserror::Error;

/// Main error type for the tabular RL crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("no legal actions available in the current state")]
    NoLegalActions,

    #[error("cannot select a best action from an empty action set")]
    EmptyActionSet,

    #[error("invalid hyperparameter {name}={value} (expected {expected})")]
    InvalidHyperparameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("action {action} is not valid in {context}")]
    InvalidAction { action: usize, context: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
