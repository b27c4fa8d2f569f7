//! Error types for mesh I/O operations.

use std::path::PathBuf;

use mesh_types::MeshError;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while writing meshes.
#[derive(Debug, Error)]
pub enum IoError {
    /// Creating, writing or flushing a file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The mesh breaks its own invariants and was not written.
    #[error("refusing to write invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    /// I/O error from a caller-supplied writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
