//! Binary occupancy mask.

use crate::{ScalarField, VoxelGrid};

/// Binary occupancy of a single segment.
///
/// Seen as a [`ScalarField`], occupied voxels are `1.0` and all others `0.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    grid: VoxelGrid<bool>,
}

impl Mask {
    /// Wrap an occupancy grid.
    #[must_use]
    pub const fn from_grid(grid: VoxelGrid<bool>) -> Self {
        Self { grid }
    }

    /// Grid dimensions (nx, ny, nz).
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        self.grid.dimensions()
    }

    /// Whether the voxel is occupied. Out-of-bounds voxels are not.
    #[must_use]
    pub fn is_occupied(&self, ix: usize, iy: usize, iz: usize) -> bool {
        self.grid.get(ix, iy, iz).unwrap_or(false)
    }

    /// Number of occupied voxels.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.grid.values().iter().filter(|&&v| v).count()
    }

    /// True when no voxel is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.grid.values().contains(&true)
    }

    /// Coordinates of occupied voxels, x varying fastest.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.grid
            .iter()
            .filter_map(|(ix, iy, iz, occupied)| occupied.then_some((ix, iy, iz)))
    }
}

impl ScalarField for Mask {
    fn dimensions(&self) -> (usize, usize, usize) {
        self.grid.dimensions()
    }

    fn value(&self, ix: usize, iy: usize, iz: usize) -> f64 {
        if self.is_occupied(ix, iy, iz) { 1.0 } else { 0.0 }
    }

    fn value_range(&self) -> Option<(f64, f64)> {
        if self.grid.is_empty() {
            return None;
        }
        let any_set = self.grid.values().contains(&true);
        let any_clear = self.grid.values().contains(&false);
        let lo = if any_clear { 0.0 } else { 1.0 };
        let hi = if any_set { 1.0 } else { 0.0 };
        Some((lo, hi))
    }
}
