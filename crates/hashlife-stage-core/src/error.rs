//! Error taxonomy for asset staging.

use std::io;
use std::path::{Path, PathBuf};

/// Coarse error classification, for callers that branch on cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageErrorKind {
    NotFound,
    PermissionDenied,
    Io,
    InvalidArtifactName,
    Config,
    DigestMismatch,
    SameFile,
}

/// Staging errors.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid artifact name: {0}")]
    InvalidArtifactName(String),

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("digest mismatch for {}: expected {expected}, got {actual}", .path.display())]
    DigestMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("source and destination are the same file: {}", .path.display())]
    SameFile { path: PathBuf },
}

impl StageError {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => StageError::NotFound { path },
            io::ErrorKind::PermissionDenied => StageError::PermissionDenied { path },
            _ => StageError::Io { path, source: err },
        }
    }

    pub fn kind(&self) -> StageErrorKind {
        match self {
            StageError::NotFound { .. } => StageErrorKind::NotFound,
            StageError::PermissionDenied { .. } => StageErrorKind::PermissionDenied,
            StageError::Io { .. } => StageErrorKind::Io,
            StageError::InvalidArtifactName(_) => StageErrorKind::InvalidArtifactName,
            StageError::Config { .. } => StageErrorKind::Config,
            StageError::DigestMismatch { .. } => StageErrorKind::DigestMismatch,
            StageError::SameFile { .. } => StageErrorKind::SameFile,
        }
    }

    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            StageError::NotFound { path }
            | StageError::PermissionDenied { path }
            | StageError::Io { path, .. }
            | StageError::Config { path, .. }
            | StageError::DigestMismatch { path, .. }
            | StageError::SameFile { path } => Some(path.as_path()),
            StageError::InvalidArtifactName(_) => None,
        }
    }
}

/// Result type for staging operations.
pub type Result<T> = std::result::Result<T, StageError>;
