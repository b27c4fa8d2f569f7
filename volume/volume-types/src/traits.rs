//! Traits for volume types.

/// Read-only scalar samples on a regular grid.
///
/// Isosurface extraction works against this trait so that binary masks and
/// real-valued grids can share one implementation.
pub trait ScalarField {
    /// Number of samples along each axis.
    fn dimensions(&self) -> (usize, usize, usize);

    /// Sample value at grid coordinates.
    ///
    /// Callers only pass coordinates inside [`ScalarField::dimensions`].
    fn value(&self, ix: usize, iy: usize, iz: usize) -> f64;

    /// Smallest and largest sample, or `None` for an empty field.
    fn value_range(&self) -> Option<(f64, f64)> {
        let (nx, ny, nz) = self.dimensions();
        let mut range: Option<(f64, f64)> = None;
        for iz in 0..nz {
            for iy in 0..ny {
                for ix in 0..nx {
                    let v = self.value(ix, iy, iz);
                    range = Some(match range {
                        Some((lo, hi)) => (lo.min(v), hi.max(v)),
                        None => (v, v),
                    });
                }
            }
        }
        range
    }
}

impl ScalarField for crate::VoxelGrid<f64> {
    fn dimensions(&self) -> (usize, usize, usize) {
        Self::dimensions(self)
    }

    fn value(&self, ix: usize, iy: usize, iz: usize) -> f64 {
        self.get(ix, iy, iz).unwrap_or(0.0)
    }
}
