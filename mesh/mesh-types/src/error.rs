//! Error types for mesh construction.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building a mesh.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Position of the face in the face list.
        face: usize,
        /// Offending 0-based index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Normal list length differs from the vertex list length.
    #[error("mesh has {vertices} vertices but {normals} normals")]
    NormalCountMismatch {
        /// Number of vertices.
        vertices: usize,
        /// Number of normals.
        normals: usize,
    },

    /// The mesh has more vertices than a `u32` index can address.
    #[error("mesh has {0} vertices, more than 32-bit indices can address")]
    TooManyVertices(usize),
}
