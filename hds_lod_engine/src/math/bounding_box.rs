/// Axis-aligned bounding box stored as midpoint and half-extent.
///
/// The midpoint is what the octree splits on, so it is kept directly
/// instead of being recomputed from min/max corners on every descent.

use glam::Vec3;

/// Slack used by containment tests to absorb float rounding
pub const CONTAINMENT_TOLERANCE: f32 = 1e-7;

/// Axis-aligned bounding box (midpoint + extent form)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Center of the box
    pub midpoint: Vec3,
    /// Half size along each axis (non-negative)
    pub extent: Vec3,
}

impl BoundingBox {
    /// Build from min/max corners.
    pub fn from_corners(min: Vec3, max: Vec3) -> Self {
        let midpoint = min.lerp(max, 0.5);
        Self {
            midpoint,
            extent: max - midpoint,
        }
    }

    /// Zero-extent box around a single point.
    pub fn from_point(point: Vec3) -> Self {
        Self {
            midpoint: point,
            extent: Vec3::ZERO,
        }
    }

    /// Tight box around a set of points, `None` if the set is empty.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::from_corners(min, max))
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        self.midpoint - self.extent
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        self.midpoint + self.extent
    }

    /// The eight corners, in octant order (bit 4 = X, 2 = Y, 1 = Z).
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min(), self.max());
        std::array::from_fn(|k| {
            Vec3::new(
                if k & 4 == 0 { min.x } else { max.x },
                if k & 2 == 0 { min.y } else { max.y },
                if k & 1 == 0 { min.z } else { max.z },
            )
        })
    }

    /// Test if a point lies inside the box, within `CONTAINMENT_TOLERANCE`.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let d = (point - self.midpoint).abs();
        d.x <= self.extent.x + CONTAINMENT_TOLERANCE
            && d.y <= self.extent.y + CONTAINMENT_TOLERANCE
            && d.z <= self.extent.z + CONTAINMENT_TOLERANCE
    }

    /// Test if this box fully contains another one.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        let (min, max) = (self.min(), self.max());
        let (omin, omax) = (other.min(), other.max());
        min.cmple(omin).all() && omax.cmple(max).all()
    }

    /// Largest side length.
    pub fn max_side(&self) -> f32 {
        self.extent.max_element() * 2.0
    }
}

#[cfg(test)]
#[path = "bounding_box_tests.rs"]
mod tests;
