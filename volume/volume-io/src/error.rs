//! Error types for volume I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for volume I/O operations.
pub type VolumeIoResult<T> = Result<T, VolumeIoError>;

/// Errors that can occur while reading or writing volume files.
#[derive(Debug, Error)]
pub enum VolumeIoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown volume format: {file_name}")]
    UnknownFormat {
        /// The file name whose extension was not recognized.
        file_name: String,
    },

    /// The header is malformed or describes something unsupported.
    #[error("invalid NIfTI header: {message}")]
    InvalidHeader {
        /// Description of what was invalid.
        message: String,
    },

    /// Voxel datatype code this reader does not handle.
    #[error("unsupported NIfTI datatype code {code}")]
    UnsupportedDatatype {
        /// The NIfTI `datatype` field.
        code: i16,
    },

    /// Voxel data is present but not usable as labels.
    #[error("invalid volume content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// The file ends before all voxel data was read.
    #[error("unexpected end of file: needed {expected} bytes, found {actual}")]
    UnexpectedEof {
        /// Bytes needed.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// The decoded header and data do not form a valid volume.
    #[error(transparent)]
    Volume(#[from] volume_types::VolumeError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VolumeIoError {
    /// Create an `InvalidHeader` error with the given message.
    #[must_use]
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Whether the error describes a malformed file rather than an I/O failure.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownFormat { .. }
                | Self::InvalidHeader { .. }
                | Self::UnsupportedDatatype { .. }
                | Self::InvalidContent { .. }
                | Self::UnexpectedEof { .. }
                | Self::Volume(_)
        )
    }
}
