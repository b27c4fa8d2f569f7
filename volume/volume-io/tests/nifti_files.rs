//! File-level tests for NIfTI loading and saving.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::io::Write;

use volume_io::{VolumeIoError, load_volume, save_volume, write_nifti};
use volume_types::{LabeledVolume, VoxelGrid, VoxelSpacing};

fn organ_volume() -> LabeledVolume {
    let grid = VoxelGrid::from_fn((8, 6, 5), |x, y, z| match (x, y, z) {
        (1..=3, 1..=2, 1..=3) => 1,
        (5..=6, 2..=4, 1..=2) => 5,
        _ => 0,
    });
    LabeledVolume::new(grid, VoxelSpacing::new(0.8, 0.8, 2.5).unwrap())
}

#[test]
fn save_and_load_uncompressed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seg.nii");
    let volume = organ_volume();

    save_volume(&volume, &path).unwrap();
    let loaded = load_volume(&path).unwrap();

    assert_eq!(loaded.labels(), volume.labels());
    assert!((loaded.spacing().z() - 2.5).abs() < 1e-6);
}

#[test]
fn gzip_and_raw_agree() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("seg.nii");
    let gz = dir.path().join("seg.nii.gz");
    let volume = organ_volume();

    save_volume(&volume, &raw).unwrap();
    save_volume(&volume, &gz).unwrap();

    let raw_size = std::fs::metadata(&raw).unwrap().len();
    let gz_size = std::fs::metadata(&gz).unwrap().len();
    assert!(gz_size < raw_size);

    let from_raw = load_volume(&raw).unwrap();
    let from_gz = load_volume(&gz).unwrap();
    assert_eq!(from_raw, from_gz);
}

#[test]
fn gzip_of_hand_written_stream_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hand.nii.gz");
    let volume = organ_volume();

    let mut bytes = Vec::new();
    write_nifti(&volume, &mut bytes).unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::fast());
    encoder.write_all(&bytes).unwrap();
    encoder.finish().unwrap();

    let loaded = load_volume(&path).unwrap();
    assert_eq!(loaded.voxel_count(5), volume.voxel_count(5));
}

#[test]
fn uncompressed_file_named_gz_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("seg.nii");
    let fake = dir.path().join("fake.nii.gz");
    save_volume(&organ_volume(), &raw).unwrap();
    std::fs::copy(&raw, &fake).unwrap();

    let err = load_volume(&fake).unwrap_err();
    assert!(err.is_format_error(), "unexpected error: {err}");
}

#[test]
fn garbage_file_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.nii");
    std::fs::write(&path, vec![0xAB; 400]).unwrap();

    let err = load_volume(&path).unwrap_err();
    assert!(matches!(err, VolumeIoError::InvalidHeader { .. }));
    assert!(err.is_format_error());
}

#[test]
fn missing_file_is_not_a_format_error() {
    let err = load_volume("/definitely/not/here.nii").unwrap_err();
    assert!(matches!(err, VolumeIoError::FileNotFound { .. }));
    assert!(!err.is_format_error());
}
