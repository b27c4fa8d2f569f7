//! Isosurface extraction from voxel scalar fields.
//!
//! [`extract_surface`] runs marching cubes over any
//! [`ScalarField`](volume_types::ScalarField), most often a binary
//! [`Mask`](volume_types::Mask), and returns a [`SurfaceMesh`](mesh_types::SurfaceMesh)
//! in physical units with 1-based faces and one outward normal per vertex.
//!
//! # Example
//!
//! ```
//! use mesh_isosurface::{MarchingCubesConfig, extract_surface};
//! use volume_types::{Mask, VoxelGrid, VoxelSpacing};
//!
//! // A single occupied voxel in the middle of a 3x3x3 grid
//! let mask = Mask::from_grid(VoxelGrid::from_fn((3, 3, 3), |x, y, z| {
//!     (x, y, z) == (1, 1, 1)
//! }));
//!
//! let mesh = extract_surface(&mask, VoxelSpacing::default(), &MarchingCubesConfig::default())?;
//! assert_eq!(mesh.vertex_count(), 6);
//! assert_eq!(mesh.face_count(), 8);
//! # Ok::<(), mesh_isosurface::IsosurfaceError>(())
//! ```
//!
//! # Failure modes
//!
//! Inputs that have no surface to extract (an empty or completely full mask,
//! a grid thinner than two samples) return [`IsosurfaceError::NoSurface`]
//! with a [`NoSurfaceReason`]. Callers that mesh many segments treat this as
//! a skip rather than a failure.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
mod marching_cubes;
mod tables;

pub use config::MarchingCubesConfig;
pub use error::{IsoResult, IsosurfaceError, NoSurfaceReason};
pub use marching_cubes::extract_surface;
