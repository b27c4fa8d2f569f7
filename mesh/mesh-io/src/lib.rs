//! Mesh file output for segmesh.
//!
//! Surface meshes are written as Wavefront OBJ text with one normal per
//! vertex:
//!
//! ```text
//! v 1 0.5 2
//! vn 0 0 1
//! f 1//1 2//2 3//3
//! ```
//!
//! All `v` lines come first, then all `vn` lines, then all `f` lines. Face
//! indices are 1-based and each vertex reuses its own normal index. Numbers
//! use the shortest text that reads back to the same `f64`, so the same mesh
//! always produces the same bytes.
//!
//! # Example
//!
//! ```
//! use mesh_io::write_obj;
//! use mesh_types::{Point3, SurfaceMesh, Vector3};
//!
//! let mesh = SurfaceMesh::from_zero_based(
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
//!     vec![Vector3::z(); 3],
//!     vec![[0, 1, 2]],
//! )?;
//!
//! let mut out = Vec::new();
//! write_obj(&mesh, &mut out)?;
//! assert!(String::from_utf8_lossy(&out).ends_with("f 1//1 2//2 3//3\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod obj;

pub use error::{IoError, IoResult};
pub use obj::{OBJ_EXTENSION, save_obj, write_obj};
