//! Analysis pipeline error types.
//!
//! Classification itself never fails: unresolvable facts are skipped. Only
//! faults below the analyzer (reading the model, writing the graph, loading
//! configuration) surface here, with their original error kept as the source.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::sink::SinkError;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The program model could not be read.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The program model is not valid JSON for the expected schema.
    #[error("Invalid program model in {}: {source}", path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The graph could not be written.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}
