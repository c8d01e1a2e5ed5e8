/// Bounding sphere with Ritter's incremental construction.

use glam::Vec3;

/// Sphere bounding a cluster of points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Zero-radius sphere on a point.
    pub fn from_point(point: Vec3) -> Self {
        Self { center: point, radius: 0.0 }
    }

    /// Approximate minimal sphere (Ritter, Graphics Gems I).
    ///
    /// Seeds the sphere with the pair of points realizing the min and max
    /// of the axis whose extreme points lie farthest apart, then grows it
    /// in one sweep over every point. Contains all points, not minimal.
    /// An empty slice yields the zero sphere at the origin.
    pub fn ritter(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let mut min_idx = [0usize; 3];
        let mut max_idx = [0usize; 3];
        for (j, p) in points.iter().enumerate().skip(1) {
            for axis in 0..3 {
                if points[min_idx[axis]][axis] > p[axis] {
                    min_idx[axis] = j;
                } else if points[max_idx[axis]][axis] < p[axis] {
                    max_idx[axis] = j;
                }
            }
        }

        let span = |axis: usize| points[max_idx[axis]].distance_squared(points[min_idx[axis]]);
        let axis = if span(0) >= span(1) && span(0) >= span(2) {
            0
        } else if span(1) >= span(2) {
            1
        } else {
            2
        };

        let (dia1, dia2) = (points[min_idx[axis]], points[max_idx[axis]]);
        let mut center = dia1.lerp(dia2, 0.5);
        let mut radius = dia2.distance(center);
        let mut radius2 = radius * radius;

        for &p in points {
            let d2 = p.distance_squared(center);
            if d2 > radius2 {
                let d = d2.sqrt();
                radius = (radius + d) * 0.5;
                radius2 = radius * radius;
                let shift = d - radius;
                center = (center * radius + p * shift) / d;
            }
        }

        Self { center, radius }
    }

    /// Test if a point lies inside (with a relative slack for rounding).
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.distance(self.center) <= self.radius * (1.0 + 1e-5) + 1e-6
    }
}

#[cfg(test)]
#[path = "bounding_sphere_tests.rs"]
mod tests;
