//! Error types for volume construction.

use thiserror::Error;

/// Result type for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur while building volumes.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// A spacing component is zero, negative or not finite.
    #[error("invalid voxel spacing along {axis}: {value}")]
    InvalidSpacing {
        /// Axis name (`x`, `y` or `z`).
        axis: char,
        /// Offending value.
        value: f64,
    },

    /// Number of values does not match the grid dimensions.
    #[error("grid of {dimensions:?} needs {expected} values, got {actual}")]
    DimensionMismatch {
        /// Requested dimensions.
        dimensions: (usize, usize, usize),
        /// `nx * ny * nz`.
        expected: usize,
        /// Number of values provided.
        actual: usize,
    },

    /// Dimensions overflow `usize` when multiplied.
    #[error("grid dimensions {0:?} are too large")]
    TooLarge((usize, usize, usize)),
}
