//! Voxel volume types for segmesh.
//!
//! This crate provides the in-memory representation of a segmentation volume
//! and the values derived from it:
//!
//! - [`VoxelGrid`] - A dense 3D grid stored x-fastest
//! - [`LabeledVolume`] - One integer [`Label`] per voxel plus [`VoxelSpacing`]
//! - [`Mask`] - Binary occupancy of a single label
//! - [`ScalarField`] - Read-only scalar view consumed by isosurface extraction
//!
//! # Coordinates
//!
//! Grid coordinates are voxel indices `(x, y, z)`. Physical coordinates are
//! obtained by multiplying each index with the matching spacing component, so
//! voxel `(0, 0, 0)` sits at the physical origin.
//!
//! # Example
//!
//! ```
//! use volume_types::{LabeledVolume, VoxelGrid, VoxelSpacing};
//!
//! let mut grid = VoxelGrid::filled((4, 4, 4), 0u32);
//! grid.set(1, 2, 3, 5);
//!
//! let volume = LabeledVolume::new(grid, VoxelSpacing::isotropic(1.5)?);
//! let mask = volume.mask(5);
//!
//! assert_eq!(mask.occupied_count(), 1);
//! assert!(mask.is_occupied(1, 2, 3));
//! # Ok::<(), volume_types::VolumeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod grid;
mod mask;
mod spacing;
mod traits;
mod volume;

pub use error::{VolumeError, VolumeResult};
pub use grid::VoxelGrid;
pub use mask::Mask;
pub use spacing::VoxelSpacing;
pub use traits::ScalarField;
pub use volume::{BACKGROUND, Label, LabeledVolume};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
