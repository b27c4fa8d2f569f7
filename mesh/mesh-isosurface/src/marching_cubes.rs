//! Marching cubes over a voxel scalar field.

use hashbrown::HashMap;
use mesh_types::{MeshError, SurfaceMesh};
use nalgebra::{Point3, Vector3};
use tracing::debug;
use volume_types::{ScalarField, VoxelSpacing};

use crate::config::MarchingCubesConfig;
use crate::error::{IsoResult, IsosurfaceError, NoSurfaceReason};
use crate::tables::{CORNER_OFFSETS, EDGE_CORNERS, TRIANGLE_TABLE};

/// Relative tolerance below which a triangle counts as zero-area.
const DEGENERATE_TOLERANCE: f64 = 1e-12;

/// Gradients shorter than this fall back to face normals.
const MIN_GRADIENT: f64 = 1e-12;

/// A grid edge: its lower sample point and the axis it runs along.
type EdgeKey = ([usize; 3], usize);

/// Extract the isosurface of `field` as a triangle mesh.
///
/// A sample is inside when its value is strictly greater than the level.
/// Vertex positions are grid coordinates scaled by `spacing`, so sample
/// `(0, 0, 0)` sits at the physical origin. Vertices are shared between
/// neighbouring cubes and numbered in scan order (z outer, x inner). Each
/// vertex normal is the normalized negative field gradient, which points
/// from inside to outside.
///
/// # Errors
///
/// - [`IsosurfaceError::InvalidConfig`] for `step_size == 0` or a non-finite level
/// - [`IsosurfaceError::NoSurface`] when the field has nothing to mesh
/// - [`IsosurfaceError::Mesh`] if the vertex count exceeds 32-bit indexing
pub fn extract_surface<F>(
    field: &F,
    spacing: VoxelSpacing,
    config: &MarchingCubesConfig,
) -> IsoResult<SurfaceMesh>
where
    F: ScalarField + ?Sized,
{
    if config.step_size == 0 {
        return Err(IsosurfaceError::InvalidConfig(
            "step_size must be at least 1".to_string(),
        ));
    }
    if let Some(level) = config.level.filter(|l| !l.is_finite()) {
        return Err(IsosurfaceError::InvalidConfig(format!(
            "level must be finite, got {level}"
        )));
    }

    let dimensions = field.dimensions();
    let step = config.step_size;
    let samples = [dimensions.0, dimensions.1, dimensions.2].map(|n| n.div_ceil(step));
    if samples.iter().any(|&n| n < 2) {
        return Err(NoSurfaceReason::TooSmall { dimensions }.into());
    }

    let level = resolve_level(field, config.level)?;
    debug!(?dimensions, step, level, "extracting isosurface");

    #[allow(clippy::cast_precision_loss)]
    let mut extractor = Extractor {
        field,
        step,
        samples,
        cell: spacing.as_vector() * step as f64,
        level,
        allow_degenerate: config.allow_degenerate,
        cache: HashMap::new(),
        vertices: Vec::new(),
        gradients: Vec::new(),
        triangles: Vec::new(),
    };
    extractor.march()?;

    if extractor.triangles.is_empty() {
        return Err(NoSurfaceReason::NoTriangles.into());
    }

    let normals = extractor.normals();
    debug!(
        vertices = extractor.vertices.len(),
        faces = extractor.triangles.len(),
        "isosurface extracted"
    );
    Ok(SurfaceMesh::from_zero_based(
        extractor.vertices,
        normals,
        extractor.triangles,
    )?)
}

fn resolve_level<F>(field: &F, requested: Option<f64>) -> IsoResult<f64>
where
    F: ScalarField + ?Sized,
{
    let Some((min, max)) = field.value_range() else {
        return Err(NoSurfaceReason::TooSmall {
            dimensions: field.dimensions(),
        }
        .into());
    };
    if min >= max {
        return Err(NoSurfaceReason::FlatField { value: min }.into());
    }
    let level = requested.unwrap_or_else(|| f64::midpoint(min, max));
    if level <= min || level >= max {
        return Err(NoSurfaceReason::LevelOutOfRange { level, min, max }.into());
    }
    Ok(level)
}

struct Extractor<'a, F: ?Sized> {
    field: &'a F,
    step: usize,
    /// Sample counts per axis after subsampling.
    samples: [usize; 3],
    /// Physical size of one sampled cube.
    cell: Vector3<f64>,
    level: f64,
    allow_degenerate: bool,
    cache: HashMap<EdgeKey, u32>,
    vertices: Vec<Point3<f64>>,
    gradients: Vec<Vector3<f64>>,
    triangles: Vec<[u32; 3]>,
}

/// A surface crossing on one grid edge, not yet numbered.
struct Crossing {
    key: EdgeKey,
    upper: [usize; 3],
    t: f64,
    position: Point3<f64>,
}

impl<F: ScalarField + ?Sized> Extractor<'_, F> {
    fn sample(&self, p: [usize; 3]) -> f64 {
        self.field
            .value(p[0] * self.step, p[1] * self.step, p[2] * self.step)
    }

    fn march(&mut self) -> IsoResult<()> {
        let [nx, ny, nz] = self.samples;
        for z in 0..nz - 1 {
            for y in 0..ny - 1 {
                for x in 0..nx - 1 {
                    self.march_cube([x, y, z])?;
                }
            }
        }
        Ok(())
    }

    fn march_cube(&mut self, origin: [usize; 3]) -> IsoResult<()> {
        let mut case = 0usize;
        for (corner, offset) in CORNER_OFFSETS.iter().enumerate() {
            if self.sample(add(origin, *offset)) > self.level {
                case |= 1 << corner;
            }
        }

        for tri in TRIANGLE_TABLE[case] {
            let crossings = tri.map(|edge| self.crossing(origin, edge));
            if !self.allow_degenerate && is_degenerate(&crossings) {
                continue;
            }
            let mut face = [0u32; 3];
            for (slot, crossing) in face.iter_mut().zip(crossings) {
                *slot = self.intern(crossing)?;
            }
            self.triangles.push(face);
        }
        Ok(())
    }

    /// Locate the level crossing on `edge` of the cube at `origin`.
    #[allow(clippy::cast_precision_loss)]
    fn crossing(&self, origin: [usize; 3], edge: usize) -> Crossing {
        let [c0, c1] = EDGE_CORNERS[edge];
        let p0 = add(origin, CORNER_OFFSETS[c0]);
        let p1 = add(origin, CORNER_OFFSETS[c1]);
        // Always interpolate from the lower end so shared edges agree exactly.
        let (lo, hi) = if p0 <= p1 { (p0, p1) } else { (p1, p0) };
        let axis = (0..3).find(|&a| lo[a] != hi[a]).unwrap_or(0);

        let v_lo = self.sample(lo);
        let v_hi = self.sample(hi);
        let t = ((self.level - v_lo) / (v_hi - v_lo)).clamp(0.0, 1.0);

        let mut grid = Vector3::new(lo[0] as f64, lo[1] as f64, lo[2] as f64);
        grid[axis] += t;
        Crossing {
            key: (lo, axis),
            upper: hi,
            t,
            position: Point3::from(grid.component_mul(&self.cell)),
        }
    }

    /// Central-difference gradient at a sample point, one-sided at borders.
    #[allow(clippy::cast_precision_loss)]
    fn gradient(&self, p: [usize; 3]) -> Vector3<f64> {
        let mut g = Vector3::zeros();
        for axis in 0..3 {
            let n = self.samples[axis];
            let (a, b) = match p[axis] {
                0 => (0, 1),
                i if i == n - 1 => (i - 1, i),
                i => (i - 1, i + 1),
            };
            let mut pa = p;
            let mut pb = p;
            pa[axis] = a;
            pb[axis] = b;
            g[axis] = (self.sample(pb) - self.sample(pa)) / ((b - a) as f64 * self.cell[axis]);
        }
        g
    }

    fn intern(&mut self, crossing: Crossing) -> IsoResult<u32> {
        if let Some(&index) = self.cache.get(&crossing.key) {
            return Ok(index);
        }
        let index = u32::try_from(self.vertices.len())
            .map_err(|_| MeshError::TooManyVertices(self.vertices.len()))?;
        let (lower, _) = crossing.key;
        let gradient = self
            .gradient(lower)
            .lerp(&self.gradient(crossing.upper), crossing.t);

        self.cache.insert(crossing.key, index);
        self.vertices.push(crossing.position);
        self.gradients.push(gradient);
        Ok(index)
    }

    /// Outward unit normals, one per vertex.
    fn normals(&self) -> Vec<Vector3<f64>> {
        let mut face_sums: Option<Vec<Vector3<f64>>> = None;

        (0..self.vertices.len())
            .map(|i| {
                let outward = -self.gradients[i];
                if outward.norm() > MIN_GRADIENT {
                    return outward.normalize();
                }
                let sums = face_sums.get_or_insert_with(|| self.area_weighted_face_normals());
                sums[i].try_normalize(0.0).unwrap_or_else(Vector3::z)
            })
            .collect()
    }

    fn area_weighted_face_normals(&self) -> Vec<Vector3<f64>> {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| self.vertices[i as usize]);
            let n = (b - a).cross(&(c - a));
            for &i in tri {
                sums[i as usize] += n;
            }
        }
        sums
    }
}

fn add(a: [usize; 3], b: [usize; 3]) -> [usize; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn is_degenerate(crossings: &[Crossing; 3]) -> bool {
    let [a, b, c] = crossings.each_ref().map(|crossing| crossing.position);
    let ab = b - a;
    let ac = c - a;
    let scale = ab.norm() * ac.norm();
    scale == 0.0 || ab.cross(&ac).norm() <= DEGENERATE_TOLERANCE * scale
}
