//! Error types for isosurface extraction.

use mesh_types::MeshError;
use thiserror::Error;

/// Result type for isosurface extraction.
pub type IsoResult<T> = Result<T, IsosurfaceError>;

/// Why a field has no surface at the requested level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoSurfaceReason {
    /// Some axis has fewer than two samples.
    TooSmall {
        /// Grid dimensions (nx, ny, nz).
        dimensions: (usize, usize, usize),
    },
    /// Every sample has the same value.
    FlatField {
        /// The shared value.
        value: f64,
    },
    /// The requested level is not strictly between the extremes.
    LevelOutOfRange {
        /// Requested level.
        level: f64,
        /// Smallest sample.
        min: f64,
        /// Largest sample.
        max: f64,
    },
    /// No cube crosses the level.
    NoTriangles,
}

impl std::fmt::Display for NoSurfaceReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall { dimensions: (x, y, z) } => {
                write!(f, "grid {x}x{y}x{z} needs at least 2 samples per axis")
            }
            Self::FlatField { value } => write!(f, "every sample equals {value}"),
            Self::LevelOutOfRange { level, min, max } => {
                write!(f, "level {level} is outside the data range ({min}, {max})")
            }
            Self::NoTriangles => write!(f, "no cube crosses the level"),
        }
    }
}

/// Errors that can occur during isosurface extraction.
#[derive(Debug, Error)]
pub enum IsosurfaceError {
    /// The field has no surface; a property of the data, not a fault.
    #[error("no surface: {reason}")]
    NoSurface {
        /// Why there is no surface.
        reason: NoSurfaceReason,
    },

    /// Configuration is unusable.
    #[error("invalid marching cubes configuration: {0}")]
    InvalidConfig(String),

    /// The extracted mesh could not be assembled.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl IsosurfaceError {
    /// Whether this error only means there is nothing to mesh.
    #[must_use]
    pub const fn is_no_surface(&self) -> bool {
        matches!(self, Self::NoSurface { .. })
    }
}

impl From<NoSurfaceReason> for IsosurfaceError {
    fn from(reason: NoSurfaceReason) -> Self {
        Self::NoSurface { reason }
    }
}
