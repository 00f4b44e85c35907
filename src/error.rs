//! Error types for the synonym benchmark.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur in the benchmark.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error during serialization/deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The benchmark dataset is unreadable or malformed. Fatal: it affects
    /// every model identically.
    #[error("Benchmark dataset error: {0}")]
    Dataset(String),

    /// The named model is not present in the local store.
    #[error("Model '{0}' not found in the local store")]
    ModelNotFound(String),

    /// The model file exists but could not be parsed.
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// A similarity lookup on a word without a vector.
    #[error("Word '{0}' is not in the model vocabulary")]
    NotInVocabulary(String),

    /// A model attempted no questions, so its accuracy is undefined.
    #[error("Model '{0}' attempted no questions; accuracy is undefined")]
    NoAttempts(String),

    /// Evaluation was cancelled between questions.
    #[error("Evaluation of model '{0}' was cancelled")]
    Cancelled(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error writing report files.
    #[error("Report output error: {0}")]
    Report(String),

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl BenchError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for BenchError {
    fn from(err: reqwest::Error) -> Self {
        BenchError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}
