//! Labeled segmentation volume.

use std::collections::BTreeSet;

use crate::{Mask, VoxelGrid, VoxelSpacing};

/// Segment identifier stored in each voxel.
pub type Label = u32;

/// Label reserved for voxels that belong to no segment.
pub const BACKGROUND: Label = 0;

/// A segmentation volume: one [`Label`] per voxel plus physical spacing.
///
/// The volume is immutable once built. Every derived value, including
/// [`Mask`], is freshly allocated.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledVolume {
    labels: VoxelGrid<Label>,
    spacing: VoxelSpacing,
}

impl LabeledVolume {
    /// Create a volume from a label grid and its spacing.
    #[must_use]
    pub const fn new(labels: VoxelGrid<Label>, spacing: VoxelSpacing) -> Self {
        Self { labels, spacing }
    }

    /// Grid dimensions (nx, ny, nz).
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        self.labels.dimensions()
    }

    /// Physical voxel spacing.
    #[must_use]
    pub const fn spacing(&self) -> VoxelSpacing {
        self.spacing
    }

    /// The underlying label grid.
    #[must_use]
    pub const fn labels(&self) -> &VoxelGrid<Label> {
        &self.labels
    }

    /// Label at grid coordinates, `None` if out of bounds.
    #[must_use]
    pub fn label_at(&self, ix: usize, iy: usize, iz: usize) -> Option<Label> {
        self.labels.get(ix, iy, iz)
    }

    /// Every label present in the volume, in ascending order.
    ///
    /// Includes [`BACKGROUND`] when present.
    #[must_use]
    pub fn distinct_labels(&self) -> BTreeSet<Label> {
        self.labels.values().iter().copied().collect()
    }

    /// Labels present in the volume other than [`BACKGROUND`], ascending.
    pub fn segment_labels(&self) -> impl Iterator<Item = Label> {
        self.distinct_labels()
            .into_iter()
            .filter(|&label| label != BACKGROUND)
    }

    /// Number of voxels carrying `label`.
    #[must_use]
    pub fn voxel_count(&self, label: Label) -> usize {
        self.labels.values().iter().filter(|&&v| v == label).count()
    }

    /// Binary occupancy mask of `label`.
    ///
    /// The mask has the same dimensions as the volume; the volume itself is
    /// left untouched.
    #[must_use]
    pub fn mask(&self, label: Label) -> Mask {
        Mask::from_grid(self.labels.map(|&v| v == label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_volume() -> LabeledVolume {
        let labels = VoxelGrid::from_fn((4, 3, 2), |x, y, _| match (x, y) {
            (0, _) => 0,
            (1, _) => 5,
            (2, 0) => 2,
            _ => 9,
        });
        LabeledVolume::new(labels, VoxelSpacing::default())
    }

    #[test]
    fn distinct_labels_ascending() {
        let volume = sample_volume();
        let labels: Vec<_> = volume.distinct_labels().into_iter().collect();

        assert_eq!(labels, vec![0, 2, 5, 9]);
    }

    #[test]
    fn segment_labels_skip_background() {
        let volume = sample_volume();
        let labels: Vec<_> = volume.segment_labels().collect();

        assert_eq!(labels, vec![2, 5, 9]);
    }

    #[test]
    fn voxel_count_per_label() {
        let volume = sample_volume();

        assert_eq!(volume.voxel_count(0), 6);
        assert_eq!(volume.voxel_count(5), 6);
        assert_eq!(volume.voxel_count(2), 2);
        assert_eq!(volume.voxel_count(9), 10);
        assert_eq!(volume.voxel_count(42), 0);
    }

    #[test]
    fn mask_leaves_volume_untouched() {
        let volume = sample_volume();
        let before = volume.clone();

        for label in [0, 2, 5, 9, 42] {
            let _ = volume.mask(label);
        }

        assert_eq!(volume, before);
        assert_eq!(volume.voxel_count(5), 6);
    }

    #[test]
    fn mask_matches_label() {
        let volume = sample_volume();
        let mask = volume.mask(5);

        assert_eq!(mask.dimensions(), volume.dimensions());
        assert_eq!(mask.occupied_count(), 6);
        for (ix, iy, iz, label) in volume.labels().iter() {
            assert_eq!(mask.is_occupied(ix, iy, iz), label == 5);
        }
    }

    #[test]
    fn mask_of_absent_label_is_empty() {
        let volume = sample_volume();
        assert!(volume.mask(42).is_empty());
    }
}
