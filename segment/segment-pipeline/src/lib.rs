//! Segment-to-mesh pipeline.
//!
//! Converts a labeled segmentation volume into one OBJ surface mesh per
//! named segment, plus a JSON manifest listing the meshes:
//!
//! 1. [`SegmentRegistry`] maps labels to names; unknown labels are skipped
//! 2. [`LabeledVolume::mask`](volume_types::LabeledVolume::mask) isolates a
//!    segment
//! 3. [`extract_surface`](mesh_isosurface::extract_surface) meshes it; masks
//!    without a surface are skipped
//! 4. [`save_obj`](mesh_io::save_obj) writes the mesh
//! 5. [`geometric_origin`] computes the segment's anchor point
//! 6. The [`OutputManifest`] grows by one entry and is rewritten atomically
//!
//! Skips are reported in the [`RunSummary`]; I/O failures abort the run with
//! a [`PipelineError`] and leave the last valid manifest on disk.
//!
//! # Manifest format
//!
//! ```json
//! {
//!   "meshes": [
//!     { "name": "liver.obj", "geometricOrigin": "[120.5, 98.0, 61.25]", "isROI": true }
//!   ]
//! }
//! ```
//!
//! `geometricOrigin` is a string holding a JSON array unless
//! [`OriginEncoding::Array`] is selected.
//!
//! # Example
//!
//! ```
//! use segment_pipeline::{Pipeline, PipelineConfig, SegmentRegistry};
//! use volume_types::{LabeledVolume, VoxelGrid, VoxelSpacing};
//!
//! // A 2x2x2 block of liver (label 5) inside a 6x6x6 grid
//! let labels = VoxelGrid::from_fn((6, 6, 6), |x, y, z| {
//!     if (2..4).contains(&x) && (2..4).contains(&y) && (2..4).contains(&z) { 5 } else { 0 }
//! });
//! let volume = LabeledVolume::new(labels, VoxelSpacing::default());
//!
//! let out = tempfile::tempdir()?;
//! let config = PipelineConfig::new(out.path()).with_regions_of_interest(["liver"]);
//! let summary = Pipeline::new(SegmentRegistry::default(), config).run(&volume)?;
//!
//! assert_eq!(summary.meshed.len(), 1);
//! assert!(out.path().join("liver.obj").exists());
//! assert!(summary.manifest.entries()[0].is_roi);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
mod manifest;
mod origin;
mod pipeline;
mod registry;

pub use config::PipelineConfig;
pub use error::{
    ManifestError, ManifestResult, PipelineError, PipelineResult, RegistryError, RegistryResult,
};
pub use manifest::{
    DEFAULT_MANIFEST_FILE_NAME, ManifestEntry, ManifestWriter, OriginEncoding, OutputManifest,
};
pub use origin::geometric_origin;
pub use pipeline::{MeshedSegment, Pipeline, RunSummary, SkipReason, SkippedSegment};
pub use registry::SegmentRegistry;
