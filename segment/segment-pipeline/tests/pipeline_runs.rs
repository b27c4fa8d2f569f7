//! End-to-end runs of the segment pipeline against a temporary directory.

use std::fs;
use std::path::Path;

use mesh_isosurface::{IsosurfaceError, MarchingCubesConfig, NoSurfaceReason, extract_surface};
use segment_pipeline::{
    OriginEncoding, Pipeline, PipelineConfig, PipelineError, SegmentRegistry, SkipReason,
    geometric_origin,
};
use serde_json::{Value, json};
use tempfile::tempdir;
use volume_types::{Label, LabeledVolume, VoxelGrid, VoxelSpacing};

/// Axis-aligned box `[lo, hi)` carrying one label.
type LabeledBox = (Label, [usize; 3], [usize; 3]);

fn volume_with(dims: (usize, usize, usize), boxes: &[LabeledBox]) -> LabeledVolume {
    let labels = VoxelGrid::from_fn(dims, |x, y, z| {
        boxes
            .iter()
            .find(|(_, lo, hi)| {
                (lo[0]..hi[0]).contains(&x) && (lo[1]..hi[1]).contains(&y) && (lo[2]..hi[2]).contains(&z)
            })
            .map_or(0, |(label, _, _)| *label)
    });
    LabeledVolume::new(labels, VoxelSpacing::new(0.8, 0.8, 2.5).expect("valid spacing"))
}

/// Spleen, right kidney and liver blocks plus an unregistered label 9.
fn abdomen() -> LabeledVolume {
    volume_with(
        (12, 10, 8),
        &[
            (1, [1, 1, 1], [4, 4, 3]),
            (2, [6, 1, 1], [8, 3, 5]),
            (9, [1, 6, 1], [3, 8, 3]),
            (5, [5, 5, 4], [11, 9, 7]),
        ],
    )
}

fn read_manifest(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("manifest exists");
    serde_json::from_str(&text).expect("manifest is valid JSON")
}

fn manifest_names(manifest: &Value) -> Vec<String> {
    manifest["meshes"]
        .as_array()
        .expect("meshes array")
        .iter()
        .map(|entry| entry["name"].as_str().expect("name").to_string())
        .collect()
}

#[test]
fn meshes_registered_segments_in_label_order() {
    let out = tempdir().expect("tempdir");
    let config = PipelineConfig::new(out.path());
    let summary = Pipeline::new(SegmentRegistry::default(), config)
        .run(&abdomen())
        .expect("run");

    let labels: Vec<Label> = summary.meshed.iter().map(|s| s.label).collect();
    assert_eq!(labels, vec![1, 2, 5]);
    for name in ["spleen.obj", "kidney_right.obj", "liver.obj"] {
        assert!(out.path().join(name).is_file(), "{name}");
    }

    let manifest = read_manifest(&summary.manifest_path);
    assert_eq!(
        manifest_names(&manifest),
        vec!["spleen.obj", "kidney_right.obj", "liver.obj"]
    );
    assert_eq!(summary.manifest.len(), 3);
}

#[test]
fn background_never_listed() {
    let out = tempdir().expect("tempdir");
    let mut registry = SegmentRegistry::default();
    registry.insert(0, "background");

    let summary = Pipeline::new(registry, PipelineConfig::new(out.path()))
        .run(&abdomen())
        .expect("run");

    assert!(summary.meshed.iter().all(|s| s.label != 0));
    assert!(summary.skipped.iter().all(|s| s.label != 0));
    let manifest = read_manifest(&summary.manifest_path);
    assert!(!manifest_names(&manifest).iter().any(|n| n.starts_with("background")));
    assert!(!out.path().join("background.obj").exists());
}

#[test]
fn unknown_label_is_skipped_without_stopping() {
    let out = tempdir().expect("tempdir");
    let summary = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path()))
        .run(&abdomen())
        .expect("run");

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].label, 9);
    assert_eq!(summary.skipped[0].reason, SkipReason::UnknownLabel);
    // Label 5 comes after 9 in the volume's box list and is still meshed.
    assert!(summary.meshed.iter().any(|s| s.name == "liver"));

    let files: Vec<_> = fs::read_dir(out.path())
        .expect("list")
        .map(|e| e.expect("entry").file_name().into_string().expect("utf8"))
        .collect();
    assert_eq!(files.len(), 4, "{files:?}");
}

#[test]
fn origin_is_index_space_block_center() {
    let out = tempdir().expect("tempdir");
    let summary = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path()))
        .run(&abdomen())
        .expect("run");

    let manifest = read_manifest(&summary.manifest_path);
    let spleen = &manifest["meshes"][0];
    assert_eq!(spleen["geometricOrigin"], json!("[2.0, 2.0, 1.5]"));
    let liver = &manifest["meshes"][2];
    assert_eq!(liver["geometricOrigin"], json!("[7.5, 6.5, 5.0]"));
}

#[test]
fn array_origin_encoding() {
    let out = tempdir().expect("tempdir");
    let config = PipelineConfig::new(out.path()).with_origin_encoding(OriginEncoding::Array);
    let summary = Pipeline::new(SegmentRegistry::default(), config)
        .run(&abdomen())
        .expect("run");

    let manifest = read_manifest(&summary.manifest_path);
    assert_eq!(manifest["meshes"][1]["geometricOrigin"], json!([6.5, 1.5, 2.5]));
}

#[test]
fn roi_flags_follow_the_roi_set() {
    let out = tempdir().expect("tempdir");
    let config = PipelineConfig::new(out.path()).with_regions_of_interest(["liver", "pancreas"]);
    let summary = Pipeline::new(SegmentRegistry::default(), config)
        .run(&abdomen())
        .expect("run");

    let manifest = read_manifest(&summary.manifest_path);
    let flags: Vec<(String, bool)> = manifest["meshes"]
        .as_array()
        .expect("meshes")
        .iter()
        .map(|e| (e["name"].as_str().expect("name").to_string(), e["isROI"].as_bool().expect("bool")))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("spleen.obj".to_string(), false),
            ("kidney_right.obj".to_string(), false),
            ("liver.obj".to_string(), true),
        ]
    );
}

#[test]
fn empty_roi_set_flags_nothing() {
    let out = tempdir().expect("tempdir");
    let summary = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path()))
        .run(&abdomen())
        .expect("run");

    assert!(summary.manifest.entries().iter().all(|e| !e.is_roi));
}

#[test]
fn background_only_volume_writes_empty_manifest() {
    let out = tempdir().expect("tempdir");
    let volume = volume_with((4, 4, 4), &[]);
    let summary = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path().join("nested/dir")))
        .run(&volume)
        .expect("run");

    assert!(summary.meshed.is_empty());
    assert_eq!(read_manifest(&summary.manifest_path), json!({ "meshes": [] }));
}

#[test]
fn segment_without_surface_is_skipped() {
    let out = tempdir().expect("tempdir");
    // Liver fills the whole grid, so its mask is flat.
    let volume = volume_with((3, 3, 3), &[(5, [0, 0, 0], [3, 3, 3])]);
    let summary = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path()))
        .run(&volume)
        .expect("run");

    assert_eq!(summary.skipped.len(), 1);
    assert!(matches!(
        summary.skipped[0].reason,
        SkipReason::NoSurface(NoSurfaceReason::FlatField { .. })
    ));
    assert_eq!(summary.skipped[0].name.as_deref(), Some("liver"));
    assert!(!out.path().join("liver.obj").exists());
    assert_eq!(read_manifest(&summary.manifest_path), json!({ "meshes": [] }));
}

#[test]
fn manifest_on_disk_matches_summary_after_trailing_skip() {
    let out = tempdir().expect("tempdir");
    let config = PipelineConfig::new(out.path()).with_origin_encoding(OriginEncoding::Array);
    // Label 9 is unregistered and processed last.
    let summary = Pipeline::new(SegmentRegistry::default(), config)
        .run(&abdomen())
        .expect("run");

    assert_eq!(summary.skipped.last().map(|s| s.label), Some(9));
    let on_disk = fs::read_to_string(&summary.manifest_path).expect("manifest");
    let expected = summary
        .manifest
        .to_json_string(OriginEncoding::Array)
        .expect("encode");
    assert_eq!(on_disk, expected);
}

#[test]
fn empty_mask_has_neither_surface_nor_origin() {
    let volume = abdomen();
    let mask = volume.mask(7);

    let err = extract_surface(&mask, volume.spacing(), &MarchingCubesConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        IsosurfaceError::NoSurface {
            reason: NoSurfaceReason::FlatField { value }
        } if value.abs() < f64::EPSILON
    ));
    assert_eq!(geometric_origin(&mask), None);
}

#[test]
fn single_slice_volume_is_skipped() {
    let out = tempdir().expect("tempdir");
    let volume = volume_with((6, 6, 1), &[(1, [2, 2, 0], [4, 4, 1])]);
    let summary = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path()))
        .run(&volume)
        .expect("run");

    assert!(matches!(
        summary.skipped[0].reason,
        SkipReason::NoSurface(NoSurfaceReason::TooSmall { dimensions: (6, 6, 1) })
    ));
}

#[test]
fn failed_mesh_write_keeps_last_valid_manifest() {
    let out = tempdir().expect("tempdir");
    // A directory where the liver mesh should go makes that write fail.
    fs::create_dir(out.path().join("liver.obj")).expect("blocker");

    let err = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path()))
        .run(&abdomen())
        .unwrap_err();

    assert!(matches!(err, PipelineError::MeshWrite { ref name, .. } if name == "liver"));
    let manifest = read_manifest(&out.path().join("manifest.json"));
    assert_eq!(manifest_names(&manifest), vec!["spleen.obj", "kidney_right.obj"]);
}

#[test]
fn invalid_config_is_a_hard_error() {
    let out = tempdir().expect("tempdir");
    let config = PipelineConfig::new(out.path())
        .with_marching_cubes(MarchingCubesConfig::default().with_step_size(0));

    let err = Pipeline::new(SegmentRegistry::default(), config)
        .run(&abdomen())
        .unwrap_err();

    assert!(matches!(err, PipelineError::Isosurface { label: 1, .. }));
    assert_eq!(read_manifest(&out.path().join("manifest.json")), json!({ "meshes": [] }));
}

#[test]
fn unusable_output_dir_is_a_hard_error() {
    let out = tempdir().expect("tempdir");
    let file = out.path().join("not-a-dir");
    fs::write(&file, b"x").expect("seed");

    let err = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(&file))
        .run(&abdomen())
        .unwrap_err();

    assert!(matches!(err, PipelineError::CreateOutputDir { .. }));
}

#[test]
fn reruns_are_byte_identical() {
    let out = tempdir().expect("tempdir");
    let pipeline = Pipeline::new(
        SegmentRegistry::default(),
        PipelineConfig::new(out.path()).with_regions_of_interest(["spleen"]),
    );
    let volume = abdomen();

    let snapshot = || -> Vec<(String, Vec<u8>)> {
        let mut files: Vec<_> = fs::read_dir(out.path())
            .expect("list")
            .map(|e| {
                let e = e.expect("entry");
                (e.file_name().into_string().expect("utf8"), fs::read(e.path()).expect("read"))
            })
            .collect();
        files.sort();
        files
    };

    let first_summary = pipeline.run(&volume).expect("first run");
    let first = snapshot();
    let second_summary = pipeline.run(&volume).expect("second run");
    let second = snapshot();

    assert_eq!(first, second);
    assert_eq!(first_summary, second_summary);
}

#[test]
fn custom_registry_and_names() {
    let out = tempdir().expect("tempdir");
    let registry = SegmentRegistry::from_json_str(r#"{"9": "aorta"}"#).expect("registry");
    let config = PipelineConfig::new(out.path())
        .with_mesh_extension("mesh.obj")
        .with_manifest_file_name("segments.json");

    let summary = Pipeline::new(registry, config).run(&abdomen()).expect("run");

    assert_eq!(summary.meshed.len(), 1);
    assert!(out.path().join("aorta.mesh.obj").is_file());
    let manifest = read_manifest(&out.path().join("segments.json"));
    assert_eq!(manifest_names(&manifest), vec!["aorta.mesh.obj"]);
    let skipped: Vec<Label> = summary.skipped.iter().map(|s| s.label).collect();
    assert_eq!(skipped, vec![1, 2, 5]);
}

#[test]
fn run_file_loads_nifti() {
    let out = tempdir().expect("tempdir");
    let input = out.path().join("segmentation.nii.gz");
    volume_io::save_volume(&abdomen(), &input).expect("save volume");

    let pipeline = Pipeline::new(
        SegmentRegistry::default(),
        PipelineConfig::new(out.path().join("meshes")),
    );
    let from_file = pipeline.run_file(&input).expect("run from file");
    let in_memory = pipeline.run(&abdomen()).expect("run in memory");

    assert_eq!(from_file.manifest, in_memory.manifest);
}

#[test]
fn missing_input_is_a_load_error() {
    let out = tempdir().expect("tempdir");
    let pipeline = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path()));

    let err = pipeline.run_file(out.path().join("missing.nii")).unwrap_err();
    assert!(matches!(err, PipelineError::LoadVolume(_)));
}

#[test]
fn mesh_files_are_obj_with_one_based_faces() {
    let out = tempdir().expect("tempdir");
    let summary = Pipeline::new(SegmentRegistry::default(), PipelineConfig::new(out.path()))
        .run(&abdomen())
        .expect("run");

    for segment in &summary.meshed {
        let text = fs::read_to_string(&segment.mesh_path).expect("mesh");
        let v = text.lines().filter(|l| l.starts_with("v ")).count();
        let vn = text.lines().filter(|l| l.starts_with("vn ")).count();
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();

        assert_eq!(v, segment.vertex_count);
        assert_eq!(vn, v);
        assert_eq!(faces.len(), segment.face_count);
        for face in faces {
            for corner in face.split_whitespace().skip(1) {
                let (a, b) = corner.split_once("//").expect("v//vn");
                assert_eq!(a, b);
                let index: usize = a.parse().expect("index");
                assert!((1..=v).contains(&index));
            }
        }
    }
}
