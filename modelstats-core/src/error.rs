//! Error types for the modelstats-core crate.
//!
//! Uses `thiserror` for structured variants. Per-model retrieval failures
//! (`RetrievalError`) and empty frontiers (`EmptyFrontierError`) are
//! recoverable and surface as values; everything folded into
//! `ModelStatsError` aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a modelstats run.
#[derive(Debug, Error)]
pub enum ModelStatsError {
    #[error("{} is not a folder", path.display())]
    ModelsRootNotFound { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown platform '{name}', valid values are ({valid})")]
    UnknownPlatform { name: String, valid: String },

    #[error("Unsupported plot format '{0}', supported formats are (svg)")]
    UnsupportedFormat(String),

    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ModelStatsError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

impl From<Box<figment::Error>> for ModelStatsError {
    fn from(err: Box<figment::Error>) -> Self {
        Self::Config(err.to_string())
    }
}

/// Errors raised by a [`ModelInfoSource`](crate::retriever::ModelInfoSource)
/// while reading one model's metadata.
#[derive(Debug, Error)]
pub enum ModelInfoError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field} value {value} in {}", path.display())]
    InvalidValue {
        path: PathBuf,
        field: &'static str,
        value: f64,
    },
}

/// A model whose statistics could not be collected.
///
/// Carries the model name alongside the underlying cause so the run can
/// report it and carry on with the remaining models.
#[derive(Debug, Error)]
#[error("could not collect stats for model '{model}': {source}")]
pub struct RetrievalError {
    pub model: String,
    #[source]
    pub source: ModelInfoError,
}

/// No model on a platform reports a speed below the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("no models faster than {max_secs_per_frame} seconds/frame")]
pub struct EmptyFrontierError {
    pub max_secs_per_frame: f64,
}

pub type Result<T> = std::result::Result<T, ModelStatsError>;
