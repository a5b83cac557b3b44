use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading graph files.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing graph file: {}", .0.display())]
    MissingFile(PathBuf),
}

impl SinkError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SinkError::Io {
            path: path.into(),
            source,
        }
    }
}
