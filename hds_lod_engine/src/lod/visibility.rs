/// Per-node view tests: frustum, facing and projected area.

use std::f32::consts::{FRAC_PI_2, PI};
use crate::camera::ViewParams;
use crate::math::BoundingSphere;
use crate::octree::{NormalCone, OctreeNode};
use super::config::Thresholds;

/// Orientation of a cluster's normals relative to the eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Every normal in the cone points towards the eye
    Front,
    /// Every normal in the cone points away from the eye
    Back,
    /// The cone may straddle the silhouette
    Silhouette,
}

fn angle_between(a: glam::Vec3, b: glam::Vec3) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Classify a cluster by its normal cone and bounding sphere.
///
/// `theta` is the angle between the eye-to-center direction and the cone
/// axis; the cone half angle is widened by the angle the sphere
/// subtends from the eye. A cluster is front-facing when even the widened
/// cone stays more than 90 degrees away from the view direction, and
/// back-facing when it stays within 90 degrees of it.
pub fn classify_facing(sphere: &BoundingSphere, cone: &NormalCone, view: &ViewParams) -> Facing {
    let to_center = (sphere.center - view.eye()).normalize_or_zero();
    let to_top = (sphere.center + view.up() * sphere.radius - view.eye()).normalize_or_zero();

    let view_angle = angle_between(to_center, to_top);
    let theta = angle_between(to_center, cone.axis);
    let spread = cone.half_angle + view_angle;

    if theta - spread > FRAC_PI_2 {
        Facing::Front
    } else if theta + spread < FRAC_PI_2 {
        Facing::Back
    } else {
        Facing::Silhouette
    }
}

/// Approximate area of the sphere's projection on the near plane.
///
/// `pi r^2 n^2 / (d - n)^2` with `d` the depth of the center along the
/// gaze; the off-axis position of the center is ignored. Zero when the
/// sphere lies entirely before the near plane or beyond the far plane.
pub fn screen_area(sphere: &BoundingSphere, view: &ViewParams) -> f32 {
    let (znear, zfar) = (view.znear(), view.zfar());
    let r = sphere.radius;

    let d = view.gaze().dot(sphere.center - view.eye());
    if d + r <= znear || d - r >= zfar {
        return 0.0;
    }
    let d = d - znear;
    PI * r * r * znear * znear / (d * d)
}

/// Whether a node is worth expanding for this view.
///
/// Fails when the bounding sphere is outside the frustum or the cluster
/// is back-facing; otherwise compares the projected area against the
/// silhouette or detail threshold.
pub fn expansion_admissible(node: &OctreeNode, view: &ViewParams, thresholds: Thresholds) -> bool {
    if !view.frustum().intersects_bounding_sphere(node.sphere()) {
        return false;
    }
    let threshold = match classify_facing(node.sphere(), node.cone(), view) {
        Facing::Back => return false,
        Facing::Front => thresholds.detail,
        Facing::Silhouette => thresholds.silhouette,
    };
    screen_area(node.sphere(), view) >= threshold
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
