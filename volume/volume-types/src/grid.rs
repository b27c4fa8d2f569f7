//! Dense 3D voxel grid.

use crate::error::{VolumeError, VolumeResult};

/// A dense 3D grid of voxel values.
///
/// Values are stored in row-major order with x varying fastest, which is the
/// on-disk order of NIfTI volumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid<T> {
    /// Grid values, `x + y * nx + z * nx * ny`.
    values: Vec<T>,
    /// Grid dimensions (nx, ny, nz).
    dimensions: (usize, usize, usize),
}

impl<T: Copy> VoxelGrid<T> {
    /// Create a grid with every voxel set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `nx * ny * nz` overflows `usize`. Use [`VoxelGrid::from_vec`]
    /// for dimensions read from untrusted input.
    ///
    /// # Example
    ///
    /// ```
    /// use volume_types::VoxelGrid;
    ///
    /// let grid = VoxelGrid::filled((3, 4, 5), 0u32);
    /// assert_eq!(grid.len(), 60);
    /// ```
    #[must_use]
    pub fn filled(dimensions: (usize, usize, usize), value: T) -> Self {
        let (nx, ny, nz) = dimensions;
        Self {
            values: vec![value; nx * ny * nz],
            dimensions,
        }
    }

    /// Create a grid from values already laid out x-fastest.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::DimensionMismatch`] if `values.len()` is not
    /// `nx * ny * nz`, or [`VolumeError::TooLarge`] if that product overflows.
    pub fn from_vec(dimensions: (usize, usize, usize), values: Vec<T>) -> VolumeResult<Self> {
        let expected = voxel_count(dimensions)?;
        if values.len() != expected {
            return Err(VolumeError::DimensionMismatch {
                dimensions,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { values, dimensions })
    }

    /// Build a grid by evaluating `f` at every voxel.
    pub fn from_fn<F>(dimensions: (usize, usize, usize), mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let (nx, ny, nz) = dimensions;
        let mut values = Vec::with_capacity(nx * ny * nz);
        for iz in 0..nz {
            for iy in 0..ny {
                for ix in 0..nx {
                    values.push(f(ix, iy, iz));
                }
            }
        }
        Self { values, dimensions }
    }

    /// Get grid dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        self.dimensions
    }

    /// Get the value at grid coordinates.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> Option<T> {
        self.contains(ix, iy, iz)
            .then(|| self.values[self.index(ix, iy, iz)])
    }

    /// Set the value at grid coordinates.
    ///
    /// Does nothing if coordinates are out of bounds.
    pub fn set(&mut self, ix: usize, iy: usize, iz: usize, value: T) {
        if self.contains(ix, iy, iz) {
            let idx = self.index(ix, iy, iz);
            self.values[idx] = value;
        }
    }

    /// Check whether grid coordinates are inside the grid.
    #[must_use]
    pub const fn contains(&self, ix: usize, iy: usize, iz: usize) -> bool {
        ix < self.dimensions.0 && iy < self.dimensions.1 && iz < self.dimensions.2
    }

    /// Iterate over all voxels as `(ix, iy, iz, value)`, x varying fastest.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, T)> + '_ {
        let (nx, ny, _) = self.dimensions;
        self.values.iter().enumerate().map(move |(i, &value)| {
            let ix = i % nx;
            let iy = (i / nx) % ny;
            let iz = i / (nx * ny);
            (ix, iy, iz, value)
        })
    }

    /// Raw values in storage order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Produce a new grid of the same shape by mapping every value.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> VoxelGrid<U>
    where
        F: FnMut(&T) -> U,
    {
        VoxelGrid {
            values: self.values.iter().map(f).collect(),
            dimensions: self.dimensions,
        }
    }

    /// Get the total number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the grid has no voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert 3D coordinates to linear index.
    const fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + iy * self.dimensions.0 + iz * self.dimensions.0 * self.dimensions.1
    }
}

/// Checked `nx * ny * nz`.
fn voxel_count(dimensions: (usize, usize, usize)) -> VolumeResult<usize> {
    let (nx, ny, nz) = dimensions;
    nx.checked_mul(ny)
        .and_then(|n| n.checked_mul(nz))
        .ok_or(VolumeError::TooLarge(dimensions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_grid() {
        let grid = VoxelGrid::filled((10, 10, 10), 7u32);

        assert_eq!(grid.dimensions(), (10, 10, 10));
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.get(9, 9, 9), Some(7));
    }

    #[test]
    fn get_set() {
        let mut grid = VoxelGrid::filled((5, 5, 5), 0u32);

        grid.set(2, 3, 4, 42);
        assert_eq!(grid.get(2, 3, 4), Some(42));
        assert_eq!(grid.get(4, 3, 2), Some(0));
    }

    #[test]
    fn get_out_of_bounds() {
        let grid = VoxelGrid::filled((5, 5, 5), 1u32);

        assert_eq!(grid.get(5, 0, 0), None);
        assert_eq!(grid.get(100, 100, 100), None);
    }

    #[test]
    fn set_out_of_bounds_is_ignored() {
        let mut grid = VoxelGrid::filled((2, 2, 2), 0u32);
        grid.set(2, 0, 0, 9);

        assert!(grid.values().iter().all(|&v| v == 0));
    }

    #[test]
    fn storage_is_x_fastest() {
        let grid = VoxelGrid::from_vec((2, 3, 1), vec![0, 1, 2, 3, 4, 5]).expect("valid grid");

        assert_eq!(grid.get(1, 0, 0), Some(1));
        assert_eq!(grid.get(0, 1, 0), Some(2));
        assert_eq!(grid.get(1, 2, 0), Some(5));
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let result = VoxelGrid::from_vec((2, 2, 2), vec![0u32; 7]);

        assert!(matches!(
            result,
            Err(VolumeError::DimensionMismatch {
                expected: 8,
                actual: 7,
                ..
            })
        ));
    }

    #[test]
    fn from_vec_rejects_overflow() {
        let result = VoxelGrid::<u8>::from_vec((usize::MAX, 2, 1), Vec::new());
        assert!(matches!(result, Err(VolumeError::TooLarge(_))));
    }

    #[test]
    fn from_fn_matches_get() {
        let grid = VoxelGrid::from_fn((3, 4, 5), |x, y, z| x * 100 + y * 10 + z);

        assert_eq!(grid.get(2, 3, 4), Some(234));
        assert_eq!(grid.get(0, 1, 2), Some(12));
    }

    #[test]
    fn iter_yields_coordinates_in_storage_order() {
        let grid = VoxelGrid::from_fn((2, 2, 2), |x, y, z| (x, y, z));

        for (ix, iy, iz, value) in grid.iter() {
            assert_eq!(value, (ix, iy, iz));
        }
        let first: Vec<_> = grid.iter().take(3).map(|(x, y, z, _)| (x, y, z)).collect();
        assert_eq!(first, vec![(0, 0, 0), (1, 0, 0), (0, 1, 0)]);
    }

    #[test]
    fn map_keeps_shape() {
        let grid = VoxelGrid::filled((3, 2, 1), 2u32);
        let doubled = grid.map(|&v| f64::from(v) * 2.0);

        assert_eq!(doubled.dimensions(), (3, 2, 1));
        assert_eq!(doubled.get(2, 1, 0), Some(4.0));
    }

    #[test]
    fn is_empty() {
        let grid = VoxelGrid::filled((0, 0, 0), 0u8);
        assert!(grid.is_empty());

        let grid2 = VoxelGrid::filled((1, 1, 1), 0u8);
        assert!(!grid2.is_empty());
    }
}
