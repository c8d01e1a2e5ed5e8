/// Frustum - four side planes through the eye plus near/far distances.
///
/// Side planes pass through the eye, so each is stored as its outward
/// normal only: a point P is outside a side if dot(P - eye, normal) > 0.
/// Near and far are distances along the (unit) gaze direction.
///
/// Built by `ViewParams`; the caller never fills one in by hand.

use glam::Vec3;
use crate::math::{BoundingBox, BoundingSphere};

/// Result of a 3-way frustum/sphere classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Sphere is entirely outside the frustum
    Outside,
    /// Sphere is entirely inside the frustum
    Inside,
    /// Sphere straddles at least one plane
    Partial,
}

/// Side plane indices
pub const SIDE_RIGHT: usize = 0;
pub const SIDE_LEFT: usize = 1;
pub const SIDE_TOP: usize = 2;
pub const SIDE_BOTTOM: usize = 3;

/// View frustum in world space.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    eye: Vec3,
    gaze: Vec3,
    /// Outward side normals: right, left, top, bottom
    sides: [Vec3; 4],
    znear: f32,
    zfar: f32,
}

impl Frustum {
    /// Assemble a frustum from an eye frame.
    ///
    /// `gaze` must be unit length and `sides` the outward unit normals.
    pub fn new(eye: Vec3, gaze: Vec3, sides: [Vec3; 4], znear: f32, zfar: f32) -> Self {
        Self { eye, gaze, sides, znear, zfar }
    }

    /// Outward normal of one side plane (`SIDE_*` index).
    pub fn side_normal(&self, side: usize) -> Vec3 {
        self.sides[side]
    }

    /// Distance of a point along the gaze, measured from the eye.
    pub fn depth_of(&self, point: Vec3) -> f32 {
        self.gaze.dot(point - self.eye)
    }

    /// Test if a point lies inside the frustum (boundaries included).
    pub fn contains_point(&self, point: Vec3) -> bool {
        let v_eye = point - self.eye;

        let d = self.gaze.dot(v_eye);
        if d < self.znear || d > self.zfar {
            return false;
        }

        self.sides.iter().all(|n| v_eye.dot(*n) <= 0.0)
    }

    /// Test if a sphere intersects the frustum.
    ///
    /// Conservative: may accept spheres near a frustum edge that are
    /// actually outside, never rejects a visible one.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.classify_sphere(center, radius) != FrustumTest::Outside
    }

    /// Classify a sphere against the frustum (3-way test).
    pub fn classify_sphere(&self, center: Vec3, radius: f32) -> FrustumTest {
        let c_eye = center - self.eye;
        let mut all_inside = true;

        let d = self.gaze.dot(c_eye);
        if d + radius < self.znear || d - radius > self.zfar {
            return FrustumTest::Outside;
        }
        if d - radius < self.znear || d + radius > self.zfar {
            all_inside = false;
        }

        for normal in &self.sides {
            let signed = c_eye.dot(*normal);
            if signed > radius {
                return FrustumTest::Outside;
            }
            if signed > -radius {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// Sphere overload used by the node tests.
    pub fn intersects_bounding_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.intersects_sphere(sphere.center, sphere.radius)
    }

    /// Test if any corner of a box lies inside the frustum.
    ///
    /// Corner sampling only: a box enclosing the whole frustum with all
    /// corners outside is reported as not intersecting.
    pub fn any_corner_inside(&self, bbox: &BoundingBox) -> bool {
        bbox.corners().iter().any(|c| self.contains_point(*c))
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
