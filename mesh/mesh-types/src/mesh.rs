//! Triangle surface mesh with 1-based face indices.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, MeshError, MeshResult, VertexIndex};

/// A triangle as three 1-based vertex indices.
pub type Face = [VertexIndex; 3];

/// A triangulated surface with one normal per vertex.
///
/// # Invariants
///
/// - `normals.len() == vertices.len()`
/// - Every face index is in `1..=vertices.len()`
///
/// Faces are wound counter-clockwise when seen from outside the surface, so
/// a closed surface has positive [`SurfaceMesh::signed_volume`].
///
/// Constructors check both invariants. The fields stay public for readers
/// such as mesh writers; code that mutates them is responsible for keeping
/// the invariants, and can re-check with [`SurfaceMesh::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions in physical units.
    pub vertices: Vec<Point3<f64>>,
    /// Unit normal of each vertex, pointing out of the surface.
    pub normals: Vec<Vector3<f64>>,
    /// Triangles referencing `vertices` and `normals`.
    pub faces: Vec<Face>,
}

impl SurfaceMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Build a mesh from 0-based triangle indices, converting them to 1-based.
    ///
    /// # Errors
    ///
    /// - [`MeshError::NormalCountMismatch`] if the list lengths differ
    /// - [`MeshError::TooManyVertices`] if indices cannot fit in 32 bits
    /// - [`MeshError::IndexOutOfRange`] for an index past the last vertex
    pub fn from_zero_based(
        vertices: Vec<Point3<f64>>,
        normals: Vec<Vector3<f64>>,
        triangles: Vec<[u32; 3]>,
    ) -> MeshResult<Self> {
        check_lengths(vertices.len(), normals.len())?;
        let vertex_count = vertices.len();

        let faces = triangles
            .into_iter()
            .enumerate()
            .map(|(face, tri)| -> MeshResult<Face> {
                let mut out = [VertexIndex::MIN; 3];
                for (slot, index) in out.iter_mut().zip(tri) {
                    *slot = VertexIndex::from_zero_based(index)
                        .filter(|v| v.to_zero_based() < vertex_count)
                        .ok_or(MeshError::IndexOutOfRange {
                            face,
                            index,
                            vertex_count,
                        })?;
                }
                Ok(out)
            })
            .collect::<MeshResult<Vec<_>>>()?;

        Ok(Self {
            vertices,
            normals,
            faces,
        })
    }

    /// Check the mesh invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> MeshResult<()> {
        check_lengths(self.vertices.len(), self.normals.len())?;
        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(bad) = tri.iter().find(|v| v.to_zero_based() >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index: bad.get() - 1,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Bounding box of the vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Corner positions of a face.
    #[must_use]
    pub fn triangle(&self, face: &Face) -> [Point3<f64>; 3] {
        face.map(|v| self.vertices[v.to_zero_based()])
    }

    /// Total triangle area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.faces
            .iter()
            .map(|face| {
                let [a, b, c] = self.triangle(face);
                (b - a).cross(&(c - a)).norm() * 0.5
            })
            .sum()
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive for a closed surface with outward winding.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let six_v: f64 = self
            .faces
            .iter()
            .map(|face| {
                let [a, b, c] = self.triangle(face);
                a.coords.dot(&b.coords.cross(&c.coords))
            })
            .sum();
        six_v / 6.0
    }
}

fn check_lengths(vertices: usize, normals: usize) -> MeshResult<()> {
    if vertices != normals {
        return Err(MeshError::NormalCountMismatch { vertices, normals });
    }
    if u32::try_from(vertices).is_err() {
        return Err(MeshError::TooManyVertices(vertices));
    }
    Ok(())
}
