use glam::Vec3;
use crate::camera::ViewParams;
use crate::lod::Thresholds;
use crate::math::BoundingSphere;
use crate::mesh::Mesh;
use crate::octree::{NormalCone, Octree};
use super::*;

fn eye_on_z() -> ViewParams {
    ViewParams::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Vec3::Y, 45.0, 1.0, 1.0, 100.0).unwrap()
}

fn small_sphere() -> BoundingSphere {
    BoundingSphere { center: Vec3::ZERO, radius: 0.1 }
}

fn cone(axis: Vec3, half_angle: f32) -> NormalCone {
    NormalCone { axis, half_angle }
}

/// One triangle facing +Z, i.e. towards `eye_on_z`.
fn facing_triangle() -> Mesh {
    Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], None, vec![[0, 1, 2]]).unwrap()
}

// ============================================================================
// Facing
// ============================================================================

#[test]
fn test_normals_towards_eye_are_front_facing() {
    let view = eye_on_z();
    assert_eq!(classify_facing(&small_sphere(), &cone(Vec3::Z, 0.0), &view), Facing::Front);
}

#[test]
fn test_normals_away_from_eye_are_back_facing() {
    let view = eye_on_z();
    assert_eq!(classify_facing(&small_sphere(), &cone(Vec3::NEG_Z, 0.0), &view), Facing::Back);
}

#[test]
fn test_normals_across_view_are_on_silhouette() {
    let view = eye_on_z();
    assert_eq!(classify_facing(&small_sphere(), &cone(Vec3::X, 0.0), &view), Facing::Silhouette);
}

#[test]
fn test_wide_cone_is_on_silhouette() {
    let view = eye_on_z();
    let wide = cone(Vec3::Z, std::f32::consts::FRAC_PI_2);
    assert_eq!(classify_facing(&small_sphere(), &wide, &view), Facing::Silhouette);
}

#[test]
fn test_empty_cone_is_on_silhouette() {
    let view = eye_on_z();
    assert_eq!(classify_facing(&small_sphere(), &NormalCone::default(), &view), Facing::Silhouette);
}

#[test]
fn test_large_sphere_widens_cone() {
    let view = eye_on_z();
    // 60 degree half angle alone stays front-facing...
    let c = cone(Vec3::Z, 60f32.to_radians());
    assert_eq!(classify_facing(&small_sphere(), &c, &view), Facing::Front);
    // ...but a sphere subtending over 30 degrees tips it onto the silhouette
    let big = BoundingSphere { center: Vec3::ZERO, radius: 4.0 };
    assert_eq!(classify_facing(&big, &c, &view), Facing::Silhouette);
}

// ============================================================================
// Screen area
// ============================================================================

#[test]
fn test_screen_area_formula() {
    let view = eye_on_z();
    let sphere = BoundingSphere { center: Vec3::ZERO, radius: 1.0 };
    // d = 5, minus near 1: pi * 1 * 1 / 16
    let expected = std::f32::consts::PI / 16.0;
    assert!((screen_area(&sphere, &view) - expected).abs() < 1e-6);
}

#[test]
fn test_screen_area_grows_when_closer() {
    let view = eye_on_z();
    let far = BoundingSphere { center: Vec3::new(0.0, 0.0, -10.0), radius: 1.0 };
    let near = BoundingSphere { center: Vec3::new(0.0, 0.0, 0.0), radius: 1.0 };
    assert!(screen_area(&near, &view) > screen_area(&far, &view));
}

#[test]
fn test_screen_area_zero_behind_near_plane() {
    let view = eye_on_z();
    let behind = BoundingSphere { center: Vec3::new(0.0, 0.0, 10.0), radius: 1.0 };
    assert_eq!(screen_area(&behind, &view), 0.0);
}

#[test]
fn test_screen_area_zero_beyond_far_plane() {
    let view = eye_on_z();
    let beyond = BoundingSphere { center: Vec3::new(0.0, 0.0, -200.0), radius: 1.0 };
    assert_eq!(screen_area(&beyond, &view), 0.0);
}

#[test]
fn test_screen_area_of_point_is_zero() {
    let view = eye_on_z();
    assert_eq!(screen_area(&BoundingSphere::from_point(Vec3::ZERO), &view), 0.0);
}

// ============================================================================
// Expansion test
// ============================================================================

#[test]
fn test_visible_front_node_expands_at_full_detail() {
    let tree = Octree::build(&facing_triangle()).unwrap();
    let view = eye_on_z();
    assert!(expansion_admissible(&tree[tree.root()], &view, Thresholds::FULL_DETAIL));
}

#[test]
fn test_node_stays_collapsed_at_coarsest() {
    let tree = Octree::build(&facing_triangle()).unwrap();
    let view = eye_on_z();
    assert!(!expansion_admissible(&tree[tree.root()], &view, Thresholds::COARSEST));
}

#[test]
fn test_back_facing_node_never_expands() {
    let mut mesh = facing_triangle();
    mesh.flip();
    let tree = Octree::build(&mesh).unwrap();
    let view = eye_on_z();
    assert!(!expansion_admissible(&tree[tree.root()], &view, Thresholds::FULL_DETAIL));
}

#[test]
fn test_node_outside_frustum_never_expands() {
    let tree = Octree::build(&facing_triangle()).unwrap();
    let away = ViewParams::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, Vec3::Y, 45.0, 1.0, 1.0, 100.0).unwrap();
    assert!(!expansion_admissible(&tree[tree.root()], &away, Thresholds::FULL_DETAIL));
}

#[test]
fn test_front_node_uses_detail_threshold() {
    let tree = Octree::build(&facing_triangle()).unwrap();
    let view = eye_on_z();
    let area = screen_area(tree[tree.root()].sphere(), &view);

    let strict_detail = Thresholds { detail: area * 2.0, silhouette: 0.0 };
    let strict_silhouette = Thresholds { detail: 0.0, silhouette: area * 2.0 };
    assert!(!expansion_admissible(&tree[tree.root()], &view, strict_detail));
    assert!(expansion_admissible(&tree[tree.root()], &view, strict_silhouette));
}
