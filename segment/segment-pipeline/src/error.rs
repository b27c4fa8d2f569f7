//! Error types for the segment pipeline.

use std::path::PathBuf;

use mesh_isosurface::IsosurfaceError;
use thiserror::Error;
use volume_io::VolumeIoError;
use volume_types::Label;

/// Result type for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for manifest persistence.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Hard errors that abort a pipeline run.
///
/// Segments that are merely skipped (unknown label, no surface) are reported
/// in the run summary instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input volume could not be loaded.
    #[error("failed to load volume: {0}")]
    LoadVolume(#[from] VolumeIoError),

    /// The output directory could not be created.
    #[error("failed to create output directory {path}")]
    CreateOutputDir {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Surface extraction failed for a reason other than a missing surface.
    #[error("surface extraction failed for label {label}")]
    Isosurface {
        /// Label being meshed.
        label: Label,
        /// Underlying extraction error.
        #[source]
        source: IsosurfaceError,
    },

    /// A mesh file could not be written.
    #[error("failed to write mesh for segment '{name}'")]
    MeshWrite {
        /// Segment name.
        name: String,
        /// Underlying write error.
        #[source]
        source: mesh_io::IoError,
    },

    /// The manifest could not be written.
    #[error("failed to write manifest")]
    ManifestWrite(#[from] ManifestError),
}

/// Errors from writing the manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Creating or writing the temporary file failed.
    #[error("failed to write manifest next to {path}: {source}")]
    Io {
        /// Final manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be encoded.
    #[error("failed to encode manifest: {0}")]
    Encode(#[from] serde_json::Error),

    /// The finished temporary file could not replace the manifest.
    #[error("failed to replace manifest {path}: {source}")]
    Persist {
        /// Final manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors from building a segment registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry {path}: {source}")]
    Read {
        /// Registry file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not a JSON object of strings.
    #[error("invalid registry document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A key is not a decimal label.
    #[error("registry key '{key}' is not a label")]
    InvalidLabel {
        /// Offending key.
        key: String,
    },

    /// The background label cannot be named.
    #[error("label 0 is background and cannot be registered")]
    BackgroundLabel,

    /// A name is unusable as a file stem.
    #[error("invalid name {name:?} for label {label}")]
    InvalidName {
        /// Label being named.
        label: Label,
        /// Offending name.
        name: String,
    },

    /// Two labels share a name, so their mesh files would collide.
    #[error("name {name:?} is used by labels {} and {}", .labels[0], .labels[1])]
    DuplicateName {
        /// The shared name.
        name: String,
        /// The two labels, ascending.
        labels: [Label; 2],
    },
}
