//! Output manifest and its atomic persistence.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ManifestError, ManifestResult};

/// Default manifest file name inside the output directory.
pub const DEFAULT_MANIFEST_FILE_NAME: &str = "manifest.json";

/// How `geometricOrigin` is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginEncoding {
    /// A string holding the JSON array, e.g. `"[1.0, 2.5, 3.0]"`.
    ///
    /// Matches manifests consumed by existing viewers.
    #[default]
    JsonString,
    /// A plain numeric array, e.g. `[1.0, 2.5, 3.0]`.
    Array,
}

/// One successfully meshed segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    /// Mesh file name, e.g. `liver.obj`.
    pub name: String,
    /// Mean voxel index of the segment.
    pub geometric_origin: Point3<f64>,
    /// Whether the segment is a region of interest.
    pub is_roi: bool,
}

/// Ordered, append-only list of meshed segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputManifest {
    entries: Vec<ManifestEntry>,
}

impl OutputManifest {
    /// An empty manifest.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Entries in the order they were appended.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the manifest as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// [`ManifestError::Encode`] if an origin coordinate is not finite.
    pub fn to_json_string(&self, encoding: OriginEncoding) -> ManifestResult<String> {
        let mut out = serde_json::to_string_pretty(&self.document(encoding)?)?;
        out.push('\n');
        Ok(out)
    }

    fn document(&self, encoding: OriginEncoding) -> ManifestResult<Document<'_>> {
        let meshes = self
            .entries
            .iter()
            .map(|entry| {
                let coords = [
                    entry.geometric_origin.x,
                    entry.geometric_origin.y,
                    entry.geometric_origin.z,
                ];
                if !coords.iter().all(|c| c.is_finite()) {
                    return Err(ManifestError::Encode(<serde_json::Error as serde::ser::Error>::custom(
                        format!("origin of {} is not finite", entry.name),
                    )));
                }
                let geometric_origin = match encoding {
                    OriginEncoding::JsonString => Origin::Text(encode_origin(coords)?),
                    OriginEncoding::Array => Origin::Array(coords),
                };
                Ok(EntryDocument {
                    name: &entry.name,
                    geometric_origin,
                    is_roi: entry.is_roi,
                })
            })
            .collect::<ManifestResult<Vec<_>>>()?;
        Ok(Document { meshes })
    }
}

#[derive(Serialize)]
struct Document<'a> {
    meshes: Vec<EntryDocument<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryDocument<'a> {
    name: &'a str,
    geometric_origin: Origin,
    #[serde(rename = "isROI")]
    is_roi: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Origin {
    Text(String),
    Array([f64; 3]),
}

/// `[x, y, z]` with `", "` separators and JSON number formatting.
fn encode_origin(coords: [f64; 3]) -> ManifestResult<String> {
    let parts = coords
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", parts.join(", ")))
}

/// Writes a manifest to a fixed path, replacing the previous version atomically.
///
/// Each write goes to a temporary file in the same directory, which is then
/// renamed over the target, so readers see either the old or the new
/// document and never a partial one.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    path: PathBuf,
    encoding: OriginEncoding,
}

impl ManifestWriter {
    /// Writer for the manifest at `path`.
    pub fn new(path: impl Into<PathBuf>, encoding: OriginEncoding) -> Self {
        Self {
            path: path.into(),
            encoding,
        }
    }

    /// Target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file with `manifest`.
    ///
    /// # Errors
    ///
    /// - [`ManifestError::Encode`] if the manifest cannot be encoded
    /// - [`ManifestError::Io`] if the temporary file cannot be written
    /// - [`ManifestError::Persist`] if it cannot be renamed into place
    ///
    /// The previous file is untouched on any error.
    pub fn write(&self, manifest: &OutputManifest) -> ManifestResult<()> {
        let text = manifest.to_json_string(self.encoding)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |source| ManifestError::Io {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            writer.write_all(text.as_bytes()).map_err(io_err)?;
            writer.flush().map_err(io_err)?;
        }
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path)
            .map_err(|e| ManifestError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;

        debug!(path = %self.path.display(), entries = manifest.len(), "manifest written");
        Ok(())
    }
}
