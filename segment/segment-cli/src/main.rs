//! segmesh: labeled segmentation volume to per-segment OBJ meshes.
//!
//! # Usage
//!
//! ```bash
//! # Mesh every known organ of a segmentation
//! segmesh scan-01.nii.gz out/scan-01
//!
//! # Flag regions of interest and use a custom label table
//! segmesh scan-01.nii.gz out/scan-01 --roi liver,spleen --registry labels.json
//!
//! # Native numeric origins and verbose logs
//! segmesh scan-01.nii.gz out/scan-01 --origin-format array -l debug
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mesh_isosurface::MarchingCubesConfig;
use segment_pipeline::{
    DEFAULT_MANIFEST_FILE_NAME, OriginEncoding, Pipeline, PipelineConfig, SegmentRegistry,
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Convert a labeled segmentation volume into per-segment OBJ meshes and a
/// JSON manifest.
#[derive(Parser, Debug)]
#[command(name = "segmesh")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Labeled volume (.nii or .nii.gz)
    input: PathBuf,

    /// Directory for meshes and the manifest, created if missing
    output_dir: PathBuf,

    /// Segment names to flag as regions of interest
    #[arg(long = "roi", value_name = "NAME", value_delimiter = ',')]
    roi: Vec<String>,

    /// JSON object mapping labels to names, e.g. {"1": "spleen"}
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// How geometricOrigin is written in the manifest
    #[arg(long, value_enum, default_value_t = OriginFormat::String)]
    origin_format: OriginFormat,

    /// Manifest file name inside the output directory
    #[arg(long, default_value = DEFAULT_MANIFEST_FILE_NAME)]
    manifest_name: String,

    /// Mesh file extension
    #[arg(long, default_value = "obj")]
    mesh_extension: String,

    /// Sample every N-th voxel along each axis
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    step_size: u32,

    /// Logging verbosity level
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OriginFormat {
    /// A string holding a JSON array
    String,
    /// A numeric array
    Array,
}

impl From<OriginFormat> for OriginEncoding {
    fn from(format: OriginFormat) -> Self {
        match format {
            OriginFormat::String => Self::JsonString,
            OriginFormat::Array => Self::Array,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

impl Cli {
    fn registry(&self) -> Result<SegmentRegistry> {
        match &self.registry {
            Some(path) => SegmentRegistry::from_json_file(path)
                .with_context(|| format!("failed to load registry {}", path.display())),
            None => Ok(SegmentRegistry::default()),
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        let roi = self
            .roi
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty());

        PipelineConfig::new(&self.output_dir)
            .with_regions_of_interest(roi)
            .with_origin_encoding(self.origin_format.into())
            .with_manifest_file_name(&self.manifest_name)
            .with_mesh_extension(&self.mesh_extension)
            .with_marching_cubes(
                MarchingCubesConfig::default().with_step_size(self.step_size as usize),
            )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("segmesh v{}", env!("CARGO_PKG_VERSION"));

    let pipeline = Pipeline::new(cli.registry()?, cli.pipeline_config());
    let summary = pipeline
        .run_file(&cli.input)
        .with_context(|| format!("failed to mesh {}", cli.input.display()))?;

    for segment in &summary.meshed {
        println!(
            "meshed  {:>3} {:<20} {} vertices, {} faces",
            segment.label, segment.name, segment.vertex_count, segment.face_count
        );
    }
    for segment in &summary.skipped {
        println!(
            "skipped {:>3} {:<20} {}",
            segment.label,
            segment.name.as_deref().unwrap_or("-"),
            segment.reason
        );
    }
    println!("manifest: {}", summary.manifest_path.display());

    Ok(())
}
