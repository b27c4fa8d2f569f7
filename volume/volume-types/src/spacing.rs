//! Physical voxel spacing.

use nalgebra::{Point3, Vector3};

use crate::error::{VolumeError, VolumeResult};

/// Physical size of one voxel along each axis.
///
/// Every component is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelSpacing(Vector3<f64>);

impl VoxelSpacing {
    /// Create a spacing from per-axis sizes.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidSpacing`] for the first component that
    /// is zero, negative, NaN or infinite.
    ///
    /// # Example
    ///
    /// ```
    /// use volume_types::VoxelSpacing;
    ///
    /// let spacing = VoxelSpacing::new(0.8, 0.8, 2.5)?;
    /// assert!((spacing.z() - 2.5).abs() < f64::EPSILON);
    ///
    /// assert!(VoxelSpacing::new(1.0, 0.0, 1.0).is_err());
    /// # Ok::<(), volume_types::VolumeError>(())
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> VolumeResult<Self> {
        for (axis, value) in [('x', x), ('y', y), ('z', z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(VolumeError::InvalidSpacing { axis, value });
            }
        }
        Ok(Self(Vector3::new(x, y, z)))
    }

    /// Create a spacing that is the same along every axis.
    ///
    /// # Errors
    ///
    /// Same as [`VoxelSpacing::new`].
    pub fn isotropic(size: f64) -> VolumeResult<Self> {
        Self::new(size, size, size)
    }

    /// Spacing along x.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    /// Spacing along y.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Spacing along z.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Spacing as a vector.
    #[must_use]
    pub const fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }

    /// Physical position of a (possibly fractional) grid coordinate.
    #[must_use]
    pub fn to_physical(&self, grid: Point3<f64>) -> Point3<f64> {
        Point3::from(grid.coords.component_mul(&self.0))
    }
}

impl Default for VoxelSpacing {
    fn default() -> Self {
        Self(Vector3::new(1.0, 1.0, 1.0))
    }
}
