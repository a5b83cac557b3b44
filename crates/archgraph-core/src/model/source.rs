//! Sources of typed program models.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AnalysisError;

use super::decl::ProgramModel;

/// Something that can hand the analyzer one module's program model.
///
/// Front ends that materialize the model differently (compiler plugin dump,
/// language server, in-memory fixture) implement this trait. Read and parse
/// faults are the only errors the analysis pipeline propagates.
pub trait ModelSource {
    /// Load the model.
    fn load(&self) -> Result<ProgramModel, AnalysisError>;

    /// Human-readable origin for log lines.
    fn describe(&self) -> String;
}

/// Reads a model serialized as JSON.
pub struct JsonModelSource {
    path: PathBuf,
}

impl JsonModelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for JsonModelSource {
    fn load(&self) -> Result<ProgramModel, AnalysisError> {
        let content = fs::read_to_string(&self.path).map_err(|e| AnalysisError::io(&self.path, e))?;
        serde_json::from_str(&content).map_err(|source| AnalysisError::Model {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl ModelSource for ProgramModel {
    fn load(&self) -> Result<ProgramModel, AnalysisError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory module '{}'", self.module)
    }
}
