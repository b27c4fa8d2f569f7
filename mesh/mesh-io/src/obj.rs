//! Wavefront OBJ writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::SurfaceMesh;
use tracing::{debug, info};

use crate::error::{IoError, IoResult};

/// Conventional file extension for OBJ meshes.
pub const OBJ_EXTENSION: &str = "obj";

/// Write `mesh` as OBJ text to any writer.
///
/// The writer is not flushed; wrap files in a [`BufWriter`] and flush it, or
/// use [`save_obj`].
///
/// # Errors
///
/// - [`IoError::InvalidMesh`] if the mesh fails [`SurfaceMesh::validate`]
/// - [`IoError::Io`] if the writer fails
pub fn write_obj<W: Write>(mesh: &SurfaceMesh, writer: &mut W) -> IoResult<()> {
    mesh.validate()?;
    write_lines(mesh, writer)?;
    Ok(())
}

/// Save `mesh` to an OBJ file at `path`, replacing any existing file.
///
/// # Errors
///
/// - [`IoError::InvalidMesh`] if the mesh fails [`SurfaceMesh::validate`];
///   nothing is written in that case
/// - [`IoError::Write`] if the file cannot be created, written or flushed
pub fn save_obj<P: AsRef<Path>>(mesh: &SurfaceMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "saving OBJ mesh"
    );
    mesh.validate()?;

    let file = File::create(path).map_err(|e| IoError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    write_lines(mesh, &mut writer).map_err(|e| IoError::write(path, e))?;
    writer.flush().map_err(|e| IoError::write(path, e))?;

    debug!(path = %path.display(), "OBJ mesh saved");
    Ok(())
}

fn write_lines<W: Write>(mesh: &SurfaceMesh, w: &mut W) -> std::io::Result<()> {
    for v in &mesh.vertices {
        writeln!(w, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for n in &mesh.normals {
        writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for [a, b, c] in &mesh.faces {
        writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    Ok(())
}
