//! Integration tests for the Simplifier frame loop
//!
//! These tests drive the public API end to end: mesh in, camera poses in,
//! index lists out. No GPU required.
//!
//! Run with: cargo test --test simplifier_integration_tests

use std::collections::HashSet;
use std::f32::consts::PI;
use hds_lod_engine::glam::Vec3;
use hds_lod_engine::hds::camera::ViewParams;
use hds_lod_engine::hds::lod::{BoundaryPrimitive, LodConfig, Simplifier};
use hds_lod_engine::hds::mesh::Mesh;
use hds_lod_engine::hds::octree::NodeStatus;

// ============================================================================
// HELPERS
// ============================================================================

/// Closed unit sphere, counter-clockwise seen from outside
fn uv_sphere(stacks: u32, slices: u32) -> Mesh {
    let mut positions = vec![Vec3::Y];
    for i in 1..stacks {
        let phi = PI * i as f32 / stacks as f32;
        for j in 0..slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            positions.push(Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()));
        }
    }
    positions.push(Vec3::NEG_Y);

    let ring = |i: u32, j: u32| 1 + (i - 1) * slices + j % slices;
    let bottom = positions.len() as u32 - 1;
    let mut triangles = Vec::new();
    for j in 0..slices {
        triangles.push([0, ring(1, j + 1), ring(1, j)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let (a, b) = (ring(i, j), ring(i, j + 1));
            let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
            triangles.push([a, b, d]);
            triangles.push([a, d, c]);
        }
    }
    for j in 0..slices {
        triangles.push([bottom, ring(stacks - 1, j), ring(stacks - 1, j + 1)]);
    }

    Mesh::new(positions, None, triangles).unwrap()
}

fn orbit(distance: f32, theta: f32, phi: f32) -> ViewParams {
    ViewParams::orbit(distance, theta, phi, 45.0, 4.0 / 3.0, 0.1, 5000.0).unwrap()
}

fn config(detail: f32, silhouette: f32) -> LodConfig {
    LodConfig {
        detail_threshold: detail,
        silhouette_threshold: silhouette,
        ..Default::default()
    }
}

/// Every rendered index must be the representative of a boundary node
fn assert_indices_on_boundary(simplifier: &Simplifier) {
    let octree = simplifier.octree();
    let reps: HashSet<u32> = simplifier
        .boundary()
        .boundary()
        .iter()
        .map(|&key| &octree[key])
        .filter(|node| node.status() == NodeStatus::Boundary)
        .map(|node| node.rep_vertex())
        .collect();
    for index in simplifier.indices() {
        assert!(reps.contains(index), "index {} is not a boundary representative", index);
    }
}

// ============================================================================
// SMALL SCENES
// ============================================================================

#[test]
fn test_integration_two_vertices() {
    let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::ONE], None, Vec::new()).unwrap();
    let view = ViewParams::look_at(Vec3::new(0.5, 0.5, 5.0), Vec3::splat(0.5), Vec3::Y, 60.0, 1.0, 0.1, 100.0)
        .unwrap();

    let mut simplifier = Simplifier::new(mesh.clone(), config(0.0, 0.0)).unwrap();
    simplifier.frame(&view);
    let primitives = simplifier.boundary_primitives();
    assert_eq!(primitives.len(), 2);
    assert!(primitives.contains(&BoundaryPrimitive::Point(Vec3::ZERO)));
    assert!(primitives.contains(&BoundaryPrimitive::Point(Vec3::ONE)));

    let mut simplifier = Simplifier::new(mesh, config(f32::INFINITY, f32::INFINITY)).unwrap();
    simplifier.frame(&view);
    let primitives = simplifier.boundary_primitives();
    assert_eq!(primitives.len(), 1);
    assert!(matches!(primitives[0], BoundaryPrimitive::Box(_)));
}

#[test]
fn test_integration_coincident_vertices_collapse_triangle() {
    // Vertex 3 sits on vertex 0: triangle 1 can never be drawn
    let mesh = Mesh::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ZERO],
        None,
        vec![[0, 1, 2], [3, 1, 0]],
    ).unwrap();
    let view = ViewParams::new(Vec3::new(0.5, 0.5, 4.0), Vec3::NEG_Z, Vec3::Y, 45.0, 1.0, 0.1, 100.0)
        .unwrap();

    let mut simplifier = Simplifier::new(mesh, config(0.0, 0.0)).unwrap();
    let stats = simplifier.frame(&view);

    assert_eq!(stats.rendered, 1);
    assert_eq!(stats.collapsed, 1);
    assert_eq!(simplifier.indices(), &[0, 1, 2]);
}

// ============================================================================
// SPHERE
// ============================================================================

#[test]
fn test_integration_full_detail_sphere() {
    let mut simplifier = Simplifier::new(uv_sphere(8, 12), config(0.0, 0.0)).unwrap();
    let stats = simplifier.frame(&orbit(4.0, 0.0, 0.0));

    assert!(simplifier.boundary().check_partition(simplifier.octree()));
    assert_eq!(stats.triangles(), simplifier.mesh().triangle_count());
    assert!(stats.rendered > 0);
    assert_indices_on_boundary(&simplifier);
}

#[test]
fn test_integration_partition_holds_along_orbit() {
    let mut simplifier = Simplifier::new(uv_sphere(10, 16), config(1e-4, 5e-5)).unwrap();

    for step in 0..36 {
        let theta = step as f32 * 10.0;
        let phi = step as f32 * 7.0;
        let distance = 2.0 + (step % 6) as f32;
        let stats = simplifier.frame(&orbit(distance, theta, phi));

        assert!(simplifier.boundary().check_partition(simplifier.octree()), "step {}", step);
        assert_eq!(stats.triangles(), simplifier.mesh().triangle_count(), "step {}", step);
        assert_eq!(simplifier.indices().len(), stats.rendered * 3, "step {}", step);
        assert_indices_on_boundary(&simplifier);
    }
}

#[test]
fn test_integration_static_view_is_stable() {
    let mut simplifier = Simplifier::new(uv_sphere(10, 16), config(1e-4, 5e-5)).unwrap();
    let view = orbit(3.0, 30.0, 20.0);

    simplifier.frame(&view);
    let indices = simplifier.indices().to_vec();
    let boundary_len = simplifier.boundary_len();

    let stats = simplifier.frame(&view);
    assert_eq!(simplifier.indices(), indices.as_slice());
    assert_eq!(simplifier.boundary_len(), boundary_len);
    assert_eq!(stats.proxy_updates, 0);
}

#[test]
fn test_integration_distance_controls_detail() {
    let mut simplifier = Simplifier::new(uv_sphere(10, 16), config(1e-4, 1e-4)).unwrap();

    simplifier.frame(&orbit(1000.0, 0.0, 0.0));
    assert_eq!(simplifier.boundary_len(), 1);
    assert_eq!(simplifier.last_stats().rendered, 0);

    simplifier.frame(&orbit(3.0, 0.0, 0.0));
    assert!(simplifier.boundary_len() > 1);
    assert!(simplifier.last_stats().rendered > 0);
    assert_indices_on_boundary(&simplifier);

    // Back out again: the proxies must follow the collapse
    simplifier.frame(&orbit(1000.0, 0.0, 0.0));
    assert_eq!(simplifier.boundary_len(), 1);
    assert!(simplifier.indices().is_empty());
    assert!(simplifier.boundary().check_partition(simplifier.octree()));
}

#[test]
fn test_integration_lock_freezes_boundary() {
    let mut simplifier = Simplifier::new(uv_sphere(10, 16), config(1e-4, 1e-4)).unwrap();
    simplifier.frame(&orbit(1000.0, 0.0, 0.0));

    simplifier.set_locked(true);
    simplifier.frame(&orbit(3.0, 0.0, 0.0));
    assert_eq!(simplifier.boundary_len(), 1);

    simplifier.set_locked(false);
    simplifier.frame(&orbit(3.0, 0.0, 0.0));
    assert!(simplifier.boundary_len() > 1);
}

#[test]
fn test_integration_flip_keeps_frames_valid() {
    let mut simplifier = Simplifier::new(uv_sphere(8, 12), config(0.0, 0.0)).unwrap();
    let view = orbit(4.0, 45.0, 30.0);
    simplifier.frame(&view);

    simplifier.flip_orientation().unwrap();
    assert_eq!(simplifier.boundary_len(), 0);

    let stats = simplifier.frame(&view);
    assert!(simplifier.boundary().check_partition(simplifier.octree()));
    assert_eq!(stats.triangles(), simplifier.mesh().triangle_count());
    assert_indices_on_boundary(&simplifier);
}
