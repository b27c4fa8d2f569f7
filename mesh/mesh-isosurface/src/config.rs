//! Marching cubes parameters.

/// Configuration for [`extract_surface`](crate::extract_surface).
///
/// # Example
///
/// ```
/// use mesh_isosurface::MarchingCubesConfig;
///
/// let config = MarchingCubesConfig::default()
///     .with_level(0.25)
///     .with_step_size(2);
///
/// assert_eq!(config.level, Some(0.25));
/// assert_eq!(config.step_size, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MarchingCubesConfig {
    /// Iso level. `None` uses the midpoint of the field's value range.
    pub level: Option<f64>,
    /// Sample every `step_size`-th grid point along each axis. At least 1.
    pub step_size: usize,
    /// Keep zero-area triangles.
    pub allow_degenerate: bool,
}

impl Default for MarchingCubesConfig {
    fn default() -> Self {
        Self {
            level: None,
            step_size: 1,
            allow_degenerate: false,
        }
    }
}

impl MarchingCubesConfig {
    /// Full resolution, automatic level.
    #[must_use]
    pub fn fine() -> Self {
        Self::default()
    }

    /// Every other sample; roughly an eighth of the cubes.
    #[must_use]
    pub fn coarse() -> Self {
        Self::default().with_step_size(2)
    }

    /// Set an explicit iso level.
    #[must_use]
    pub const fn with_level(mut self, level: f64) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the sampling step.
    #[must_use]
    pub const fn with_step_size(mut self, step_size: usize) -> Self {
        self.step_size = step_size;
        self
    }

    /// Keep or drop zero-area triangles.
    #[must_use]
    pub const fn with_allow_degenerate(mut self, allow: bool) -> Self {
        self.allow_degenerate = allow;
        self
    }
}
