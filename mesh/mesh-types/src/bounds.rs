//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

/// An axis-aligned box spanning `min..=max` on every axis.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::from_points([
///     Point3::new(1.0, 0.0, 2.0),
///     Point3::new(-1.0, 4.0, 0.0),
/// ]);
///
/// assert_eq!(aabb.min, Point3::new(-1.0, 0.0, 0.0));
/// assert_eq!(aabb.max, Point3::new(1.0, 4.0, 2.0));
/// assert!(aabb.contains(&Point3::new(0.0, 2.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Lower corner.
    pub min: Point3<f64>,
    /// Upper corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box between two corners, given in any order.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// A box containing nothing. Expanding it by a point yields that point.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box holding every point. Empty for no points.
    #[must_use]
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        points.into_iter().fold(Self::empty(), |mut aabb, p| {
            aabb.expand(&p);
            aabb
        })
    }

    /// True if `min > max` on some axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to include `point`.
    pub fn expand(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Edge lengths. Zero for an empty box.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
