use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("Project directory '{project}' not found (expected at {})", root.display())]
    MissingProjectDirectory { project: String, root: PathBuf },

    #[error("Class '{filename}' not found in project '{project}' (expected package: {package})")]
    ClassFileNotFound {
        project: String,
        package: String,
        filename: String,
    },

    #[error("Failed to read file {}: {source}", path.display())]
    FileReadFailure { path: PathBuf, source: io::Error },

    #[error("Failed to write file {}: {source}", path.display())]
    FileWriteFailure { path: PathBuf, source: io::Error },

    #[error("{0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PrepError {
    /// Per-item failures are logged and skipped; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingProjectDirectory { .. }
                | Self::ClassFileNotFound { .. }
                | Self::FileReadFailure { .. }
                | Self::FileWriteFailure { .. }
        )
    }
}

pub type Result<T, E = PrepError> = std::result::Result<T, E>;
