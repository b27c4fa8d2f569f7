//! Pipeline configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use mesh_io::OBJ_EXTENSION;
use mesh_isosurface::MarchingCubesConfig;

use crate::manifest::{DEFAULT_MANIFEST_FILE_NAME, OriginEncoding};

/// Configuration for a [`Pipeline`](crate::Pipeline) run.
///
/// # Example
///
/// ```
/// use segment_pipeline::{OriginEncoding, PipelineConfig};
///
/// let config = PipelineConfig::new("out")
///     .with_regions_of_interest(["liver", "spleen"])
///     .with_origin_encoding(OriginEncoding::Array);
///
/// assert!(config.is_roi("liver"));
/// assert!(!config.is_roi("gallbladder"));
/// assert_eq!(config.manifest_path(), std::path::Path::new("out/manifest.json"));
/// assert_eq!(config.mesh_file_name("liver"), "liver.obj");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory receiving meshes and the manifest. Created if absent.
    pub output_dir: PathBuf,
    /// Mesh file extension without the dot.
    pub mesh_extension: String,
    /// Manifest file name inside `output_dir`.
    pub manifest_file_name: String,
    /// How `geometricOrigin` is written.
    pub origin_encoding: OriginEncoding,
    /// Surface extraction parameters.
    pub marching_cubes: MarchingCubesConfig,
    /// Segment names flagged as regions of interest.
    pub regions_of_interest: BTreeSet<String>,
}

impl PipelineConfig {
    /// Defaults writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            mesh_extension: OBJ_EXTENSION.to_string(),
            manifest_file_name: DEFAULT_MANIFEST_FILE_NAME.to_string(),
            origin_encoding: OriginEncoding::default(),
            marching_cubes: MarchingCubesConfig::default(),
            regions_of_interest: BTreeSet::new(),
        }
    }

    /// Set the mesh file extension. A leading dot is dropped.
    #[must_use]
    pub fn with_mesh_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.mesh_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the manifest file name.
    #[must_use]
    pub fn with_manifest_file_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_file_name = name.into();
        self
    }

    /// Set the origin encoding.
    #[must_use]
    pub const fn with_origin_encoding(mut self, encoding: OriginEncoding) -> Self {
        self.origin_encoding = encoding;
        self
    }

    /// Set the surface extraction parameters.
    #[must_use]
    pub fn with_marching_cubes(mut self, marching_cubes: MarchingCubesConfig) -> Self {
        self.marching_cubes = marching_cubes;
        self
    }

    /// Replace the region-of-interest names.
    #[must_use]
    pub fn with_regions_of_interest<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions_of_interest = names.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `name` is a region of interest.
    #[must_use]
    pub fn is_roi(&self, name: &str) -> bool {
        self.regions_of_interest.contains(name)
    }

    /// Full path of the manifest.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_file_name)
    }

    /// Mesh file name for a segment, e.g. `liver.obj`.
    #[must_use]
    pub fn mesh_file_name(&self, segment: &str) -> String {
        if self.mesh_extension.is_empty() {
            segment.to_string()
        } else {
            format!("{segment}.{}", self.mesh_extension)
        }
    }

    /// Full path of a segment's mesh file.
    #[must_use]
    pub fn mesh_path(&self, segment: &str) -> PathBuf {
        self.output_dir.join(self.mesh_file_name(segment))
    }

    /// The output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
