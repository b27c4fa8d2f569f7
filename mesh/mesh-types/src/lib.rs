//! Surface mesh types for segmesh.
//!
//! This crate provides the mesh representation shared by isosurface
//! extraction and mesh file output:
//!
//! - [`SurfaceMesh`] - Vertices, per-vertex normals and triangular faces
//! - [`VertexIndex`] - A **1-based** index into the vertex and normal lists
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Indexing
//!
//! Face indices are 1-based, matching the convention of text mesh formats
//! such as OBJ. [`VertexIndex`] cannot hold 0, so an invalid index cannot be
//! constructed, and [`SurfaceMesh::from_zero_based`] rejects faces that point
//! past the end of the vertex list.
//!
//! # Units
//!
//! Coordinates are physical units (millimetres for NIfTI input) as `f64`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Point3, SurfaceMesh, Vector3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let normals = vec![Vector3::z(); 3];
//!
//! let mesh = SurfaceMesh::from_zero_based(vertices, normals, vec![[0, 1, 2]])?;
//! assert_eq!(mesh.faces[0][0].get(), 1);
//! assert_eq!(mesh.face_count(), 1);
//! # Ok::<(), mesh_types::MeshError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod error;
mod index;
mod mesh;

// Re-export core types
pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use index::VertexIndex;
pub use mesh::{Face, SurfaceMesh};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
