//! Volume file I/O for segmesh.
//!
//! This crate loads labeled segmentation volumes from disk and writes them
//! back:
//!
//! - **NIfTI-1** (`.nii`) - Single-file, uncompressed
//! - **NIfTI-1 gzip** (`.nii.gz`) - The same stream, gzip-compressed
//!
//! The loaded volume is a [`volume_types::LabeledVolume`]: one `u32` label
//! per voxel plus the physical voxel spacing taken from `pixdim`.
//!
//! # Example
//!
//! ```no_run
//! use volume_io::load_volume;
//!
//! let volume = load_volume("segmentation.nii.gz").unwrap();
//! println!("{:?} voxels", volume.dimensions());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod nifti;

pub use error::{VolumeIoError, VolumeIoResult};
pub use nifti::{load_nifti, parse_nifti, save_nifti, write_nifti};

use std::path::Path;

use volume_types::LabeledVolume;

/// Supported volume file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeFormat {
    /// Uncompressed single-file NIfTI-1.
    Nifti,
    /// Gzip-compressed single-file NIfTI-1.
    NiftiGz,
}

impl VolumeFormat {
    /// Detect format from the file name.
    ///
    /// `.nii.gz` is checked before `.nii`, case-insensitively.
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the name is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_str()?.to_lowercase();
        if name.ends_with(".nii.gz") {
            Some(Self::NiftiGz)
        } else if name.ends_with(".nii") {
            Some(Self::Nifti)
        } else {
            None
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Nifti => "nii",
            Self::NiftiGz => "nii.gz",
        }
    }
}

/// Load a volume from a file, detecting format from the file name.
///
/// # Errors
///
/// Returns an error if the format is unknown, the file cannot be read, or
/// its content is not a valid label volume.
pub fn load_volume<P: AsRef<Path>>(path: P) -> VolumeIoResult<LabeledVolume> {
    load_nifti(path)
}

/// Save a volume to a file, detecting format from the file name.
///
/// # Errors
///
/// Returns an error if the format is unknown or the file cannot be written.
pub fn save_volume<P: AsRef<Path>>(volume: &LabeledVolume, path: P) -> VolumeIoResult<()> {
    save_nifti(volume, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_path_nifti() {
        assert_eq!(VolumeFormat::from_path("ct.nii"), Some(VolumeFormat::Nifti));
        assert_eq!(VolumeFormat::from_path("CT.NII"), Some(VolumeFormat::Nifti));
        assert_eq!(
            VolumeFormat::from_path("/path/to/ct.nii"),
            Some(VolumeFormat::Nifti)
        );
    }

    #[test]
    fn format_from_path_nifti_gz() {
        assert_eq!(
            VolumeFormat::from_path("1-tsoc.nii.gz"),
            Some(VolumeFormat::NiftiGz)
        );
        assert_eq!(
            VolumeFormat::from_path("/data/SEG.NII.GZ"),
            Some(VolumeFormat::NiftiGz)
        );
    }

    #[test]
    fn format_from_path_unknown() {
        assert_eq!(VolumeFormat::from_path("volume.gz"), None);
        assert_eq!(VolumeFormat::from_path("volume.mha"), None);
        assert_eq!(VolumeFormat::from_path("volume"), None);
        assert_eq!(VolumeFormat::from_path(""), None);
    }

    #[test]
    fn format_extension() {
        assert_eq!(VolumeFormat::Nifti.extension(), "nii");
        assert_eq!(VolumeFormat::NiftiGz.extension(), "nii.gz");
    }
}
