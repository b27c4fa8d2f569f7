//! Segment-to-mesh pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use mesh_io::save_obj;
use mesh_isosurface::{IsosurfaceError, NoSurfaceReason, extract_surface};
use nalgebra::Point3;
use tracing::{debug, info, warn};
use volume_types::{Label, LabeledVolume};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::manifest::{ManifestEntry, ManifestWriter, OutputManifest};
use crate::origin::geometric_origin;
use crate::registry::SegmentRegistry;

/// Why a segment produced no mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// The label has no name in the registry.
    UnknownLabel,
    /// Surface extraction found nothing to mesh.
    NoSurface(NoSurfaceReason),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLabel => write!(f, "label is not registered"),
            Self::NoSurface(reason) => write!(f, "no surface: {reason}"),
        }
    }
}

/// A segment written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshedSegment {
    /// Volume label.
    pub label: Label,
    /// Registry name.
    pub name: String,
    /// Written mesh file.
    pub mesh_path: PathBuf,
    /// Mean voxel index of the segment.
    pub geometric_origin: Point3<f64>,
    /// Mesh vertex count.
    pub vertex_count: usize,
    /// Mesh triangle count.
    pub face_count: usize,
}

/// A segment that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSegment {
    /// Volume label.
    pub label: Label,
    /// Registry name, if the label had one.
    pub name: Option<String>,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Meshed segments in ascending label order.
    pub meshed: Vec<MeshedSegment>,
    /// Skipped segments in ascending label order.
    pub skipped: Vec<SkippedSegment>,
    /// The manifest as last written.
    pub manifest: OutputManifest,
    /// Where the manifest was written.
    pub manifest_path: PathBuf,
}

/// Turns each named segment of a labeled volume into a mesh file plus a
/// manifest entry.
///
/// A run first writes an empty manifest, then processes labels in ascending
/// order, skipping background. After every segment, meshed or skipped, the
/// whole manifest is rewritten, so the file on disk always lists exactly the
/// segments finished so far, even if a later segment fails.
///
/// # Example
///
/// ```no_run
/// use segment_pipeline::{Pipeline, PipelineConfig, SegmentRegistry};
///
/// let config = PipelineConfig::new("out").with_regions_of_interest(["liver"]);
/// let pipeline = Pipeline::new(SegmentRegistry::default(), config);
///
/// let summary = pipeline.run_file("segmentation.nii.gz")?;
/// println!("{} meshes, {} skipped", summary.meshed.len(), summary.skipped.len());
/// # Ok::<(), segment_pipeline::PipelineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    registry: SegmentRegistry,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline.
    #[must_use]
    pub const fn new(registry: SegmentRegistry, config: PipelineConfig) -> Self {
        Self { registry, config }
    }

    /// The label names in use.
    #[must_use]
    pub const fn registry(&self) -> &SegmentRegistry {
        &self.registry
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load a volume file and run on it.
    ///
    /// # Errors
    ///
    /// [`PipelineError::LoadVolume`] if the volume cannot be read, otherwise
    /// as [`Pipeline::run`].
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> PipelineResult<RunSummary> {
        let volume = volume_io::load_volume(path)?;
        self.run(&volume)
    }

    /// Mesh every named segment of `volume`.
    ///
    /// # Errors
    ///
    /// Aborts on the first hard error; the manifest on disk keeps its last
    /// successfully written state.
    ///
    /// - [`PipelineError::CreateOutputDir`] if the output directory cannot be created
    /// - [`PipelineError::ManifestWrite`] if the manifest cannot be written
    /// - [`PipelineError::MeshWrite`] if a mesh file cannot be written
    /// - [`PipelineError::Isosurface`] for extraction failures other than a
    ///   missing surface, such as an invalid configuration
    pub fn run(&self, volume: &LabeledVolume) -> PipelineResult<RunSummary> {
        let output_dir = self.config.output_dir();
        std::fs::create_dir_all(output_dir).map_err(|source| PipelineError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let writer = ManifestWriter::new(self.config.manifest_path(), self.config.origin_encoding);
        let mut manifest = OutputManifest::new();
        writer.write(&manifest)?;

        info!(
            dimensions = ?volume.dimensions(),
            spacing = ?volume.spacing(),
            output = %output_dir.display(),
            "meshing segments"
        );

        let mut meshed = Vec::new();
        let mut skipped = Vec::new();
        for label in volume.segment_labels() {
            match self.registry.lookup(label) {
                None => {
                    warn!(label, "no name registered for label, skipping segment");
                    skipped.push(SkippedSegment {
                        label,
                        name: None,
                        reason: SkipReason::UnknownLabel,
                    });
                }
                Some(name) => match self.mesh_segment(volume, label, name)? {
                    Ok(segment) => {
                        manifest.push(ManifestEntry {
                            name: self.config.mesh_file_name(name),
                            geometric_origin: segment.geometric_origin,
                            is_roi: self.config.is_roi(name),
                        });
                        meshed.push(segment);
                    }
                    Err(reason) => {
                        warn!(label, name, %reason, "skipping segment");
                        skipped.push(SkippedSegment {
                            label,
                            name: Some(name.to_string()),
                            reason,
                        });
                    }
                },
            }
            writer.write(&manifest)?;
        }

        info!(
            meshed = meshed.len(),
            skipped = skipped.len(),
            manifest = %writer.path().display(),
            "run complete"
        );
        Ok(RunSummary {
            meshed,
            skipped,
            manifest,
            manifest_path: writer.path().to_path_buf(),
        })
    }

    /// Mask, mesh, save and locate one segment.
    ///
    /// The outer result carries hard errors, the inner one a soft skip.
    fn mesh_segment(
        &self,
        volume: &LabeledVolume,
        label: Label,
        name: &str,
    ) -> PipelineResult<Result<MeshedSegment, SkipReason>> {
        let mask = volume.mask(label);
        debug!(label, name, voxels = mask.occupied_count(), "extracting surface");

        let mesh = match extract_surface(&mask, volume.spacing(), &self.config.marching_cubes) {
            Ok(mesh) => mesh,
            Err(IsosurfaceError::NoSurface { reason }) => {
                return Ok(Err(SkipReason::NoSurface(reason)));
            }
            Err(source) => return Err(PipelineError::Isosurface { label, source }),
        };

        let mesh_path = self.config.mesh_path(name);
        save_obj(&mesh, &mesh_path).map_err(|source| PipelineError::MeshWrite {
            name: name.to_string(),
            source,
        })?;

        // An empty mask is a flat field, so extraction has already failed
        // with this reason before a mesh could exist.
        let Some(origin) = geometric_origin(&mask) else {
            return Ok(Err(SkipReason::NoSurface(NoSurfaceReason::FlatField {
                value: 0.0,
            })));
        };

        info!(
            label,
            name,
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "segment meshed"
        );
        Ok(Ok(MeshedSegment {
            label,
            name: name.to_string(),
            mesh_path,
            geometric_origin: origin,
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
        }))
    }
}
