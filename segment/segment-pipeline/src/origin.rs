//! Geometric origin of a segment.

use nalgebra::Point3;
use volume_types::Mask;

/// Mean voxel-index position of the occupied voxels of `mask`.
///
/// The result is in index space, not physical units: an anchor point for
/// placing labels, not the centroid of the mesh. `None` for an empty mask.
///
/// # Example
///
/// ```
/// use segment_pipeline::geometric_origin;
/// use volume_types::{Mask, Point3, VoxelGrid};
///
/// // Voxels x in 2..4, y in 0..1, z in 1..4
/// let mask = Mask::from_grid(VoxelGrid::from_fn((5, 5, 5), |x, y, z| {
///     (2..4).contains(&x) && y == 0 && (1..4).contains(&z)
/// }));
///
/// assert_eq!(geometric_origin(&mask), Some(Point3::new(2.5, 0.0, 2.0)));
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn geometric_origin(mask: &Mask) -> Option<Point3<f64>> {
    let mut count: u64 = 0;
    let mut sum = [0u64; 3];
    for (x, y, z) in mask.iter_occupied() {
        count += 1;
        sum[0] += x as u64;
        sum[1] += y as u64;
        sum[2] += z as u64;
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(Point3::new(
        sum[0] as f64 / n,
        sum[1] as f64 / n,
        sum[2] as f64 / n,
    ))
}
