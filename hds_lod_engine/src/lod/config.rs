/// LOD configuration.

use crate::error::Result;
use crate::engine_bail;

/// Default screen-area threshold for front-facing clusters
pub const DEFAULT_DETAIL_THRESHOLD: f32 = 1e-9;
/// Default screen-area threshold for clusters on the silhouette
pub const DEFAULT_SILHOUETTE_THRESHOLD: f32 = 5e-10;
/// Default factor applied by one detail step
pub const DEFAULT_THRESHOLD_STEP: f32 = 0.9;

/// Screen-area thresholds a node must reach to be expanded.
///
/// Areas are measured on the near plane, in squared world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Threshold for clusters whose normals all face the eye
    pub detail: f32,
    /// Threshold for clusters that may lie on the silhouette
    pub silhouette: f32,
}

impl Thresholds {
    /// Thresholds that expand every visible node.
    pub const FULL_DETAIL: Thresholds = Thresholds { detail: 0.0, silhouette: 0.0 };

    /// Thresholds that never expand anything.
    pub const COARSEST: Thresholds = Thresholds {
        detail: f32::INFINITY,
        silhouette: f32::INFINITY,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            detail: DEFAULT_DETAIL_THRESHOLD,
            silhouette: DEFAULT_SILHOUETTE_THRESHOLD,
        }
    }
}

/// Simplifier configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodConfig {
    /// Threshold for front-facing clusters
    pub detail_threshold: f32,
    /// Threshold for clusters on the silhouette
    pub silhouette_threshold: f32,
    /// Factor applied by `increase_detail` (inverse for `decrease_detail`)
    pub threshold_step: f32,
    /// Drop triangles whose three representatives are all outside the frustum
    pub cull_triangles: bool,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            detail_threshold: DEFAULT_DETAIL_THRESHOLD,
            silhouette_threshold: DEFAULT_SILHOUETTE_THRESHOLD,
            threshold_step: DEFAULT_THRESHOLD_STEP,
            cull_triangles: false,
        }
    }
}

impl LodConfig {
    /// Thresholds part of the configuration.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            detail: self.detail_threshold,
            silhouette: self.silhouette_threshold,
        }
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` for a negative or NaN threshold, or a
    /// step outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        check_threshold("detail", self.detail_threshold)?;
        check_threshold("silhouette", self.silhouette_threshold)?;
        if !(self.threshold_step > 0.0 && self.threshold_step < 1.0) {
            engine_bail!("hds::LodConfig", InvalidParameter,
                "threshold step must be in (0, 1), got {}", self.threshold_step);
        }
        Ok(())
    }
}

/// Thresholds may be zero or infinite, never negative or NaN.
pub(crate) fn check_threshold(name: &str, value: f32) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        engine_bail!("hds::LodConfig", InvalidParameter,
            "{} threshold must be non-negative, got {}", name, value);
    }
    Ok(())
}
