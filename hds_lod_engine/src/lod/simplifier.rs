/// Simplifier - per-frame entry point of the LOD system.
///
/// Owns the mesh, its octree, the boundary engine, the proxy resolver and
/// the current thresholds. A frame is one boundary update followed by one
/// resolve; the result is a reduced index list over the original vertex
/// array, ready for upload.

use std::time::Instant;
use glam::Vec3;
use crate::camera::ViewParams;
use crate::error::Result;
use crate::{engine_debug, engine_info, engine_trace};
use crate::math::BoundingBox;
use crate::mesh::{Mesh, VertexIndex};
use crate::octree::{NodeStatus, Octree};
use super::boundary::BoundaryEngine;
use super::config::{check_threshold, LodConfig, Thresholds};
use super::frame_stats::FrameStats;
use super::proxy::ProxyResolver;

/// Shape drawn for one boundary node in octree view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryPrimitive {
    /// Boundary leaf: its vertex
    Point(Vec3),
    /// Boundary internal node: its bounding box
    Box(BoundingBox),
}

/// View-dependent mesh simplifier.
#[derive(Debug, Clone)]
pub struct Simplifier {
    mesh: Mesh,
    octree: Octree,
    boundary: BoundaryEngine,
    resolver: ProxyResolver,
    config: LodConfig,
    locked: bool,
    last_stats: FrameStats,
}

impl Simplifier {
    /// Build the octree for `mesh`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if the configuration is invalid.
    pub fn new(mesh: Mesh, config: LodConfig) -> Result<Self> {
        config.validate()?;

        let start = Instant::now();
        let octree = Octree::build(&mesh)?;
        engine_info!("hds::Simplifier",
            "Ready: {} vertices, {} triangles, {} nodes, depth {} [{:.3?}]",
            mesh.vertex_count(), mesh.triangle_count(), octree.node_count(),
            octree.depth(), start.elapsed());

        Ok(Self {
            mesh,
            octree,
            boundary: BoundaryEngine::new(),
            resolver: ProxyResolver::new(),
            config,
            locked: false,
            last_stats: FrameStats::default(),
        })
    }

    // ===== FRAME =====

    /// Update the boundary (unless locked) and rebuild the index list.
    pub fn frame(&mut self, view: &ViewParams) -> FrameStats {
        if !self.locked {
            self.update(view);
        }
        self.resolve(view)
    }

    /// Run the boundary update alone, ignoring the lock.
    pub fn update(&mut self, view: &ViewParams) {
        self.boundary.update(&mut self.octree, view, self.config.thresholds());
    }

    /// Rebuild the index list for the current boundary.
    pub fn resolve(&mut self, view: &ViewParams) -> FrameStats {
        let start = Instant::now();
        let mut stats = self.resolver.resolve(
            &self.octree,
            &self.mesh,
            view,
            self.config.cull_triangles,
        );
        stats.tests = self.boundary.tests();
        stats.tests_saved = self.boundary.tests_saved();
        engine_trace!("hds::Simplifier", "lod resolve [{:.3?}] {}", start.elapsed(), stats);

        self.last_stats = stats;
        stats
    }

    /// Reduced triangle list of the last frame.
    pub fn indices(&self) -> &[VertexIndex] {
        self.resolver.indices()
    }

    /// Byte view of `indices()` for buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.resolver.indices())
    }

    /// Counters of the last frame.
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }

    // ===== THRESHOLDS =====

    pub fn thresholds(&self) -> Thresholds {
        self.config.thresholds()
    }

    pub fn detail_threshold(&self) -> f32 {
        self.config.detail_threshold
    }

    /// # Errors
    ///
    /// `Error::InvalidParameter` for a negative or NaN value.
    pub fn set_detail_threshold(&mut self, value: f32) -> Result<()> {
        check_threshold("detail", value)?;
        self.config.detail_threshold = value;
        Ok(())
    }

    pub fn silhouette_threshold(&self) -> f32 {
        self.config.silhouette_threshold
    }

    /// # Errors
    ///
    /// `Error::InvalidParameter` for a negative or NaN value.
    pub fn set_silhouette_threshold(&mut self, value: f32) -> Result<()> {
        check_threshold("silhouette", value)?;
        self.config.silhouette_threshold = value;
        Ok(())
    }

    /// Lower the detail threshold by one step (more detail).
    pub fn increase_detail(&mut self) {
        self.config.detail_threshold *= self.config.threshold_step;
        engine_debug!("hds::Simplifier", "detail threshold {:.3e}", self.config.detail_threshold);
    }

    /// Raise the detail threshold by one step (less detail).
    pub fn decrease_detail(&mut self) {
        self.config.detail_threshold /= self.config.threshold_step;
        engine_debug!("hds::Simplifier", "detail threshold {:.3e}", self.config.detail_threshold);
    }

    /// Lower the silhouette threshold by one step.
    pub fn increase_silhouette_detail(&mut self) {
        self.config.silhouette_threshold *= self.config.threshold_step;
        engine_debug!("hds::Simplifier", "silhouette threshold {:.3e}", self.config.silhouette_threshold);
    }

    /// Raise the silhouette threshold by one step.
    pub fn decrease_silhouette_detail(&mut self) {
        self.config.silhouette_threshold /= self.config.threshold_step;
        engine_debug!("hds::Simplifier", "silhouette threshold {:.3e}", self.config.silhouette_threshold);
    }

    // ===== CONTROLS =====

    /// Freeze the boundary: `frame` keeps resolving against it but no
    /// longer updates it.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn config(&self) -> &LodConfig {
        &self.config
    }

    /// Turn the mesh inside out and rebuild everything derived from it.
    ///
    /// # Errors
    ///
    /// Propagates an octree build failure; the simplifier is left unchanged.
    pub fn flip_orientation(&mut self) -> Result<()> {
        let mut mesh = self.mesh.clone();
        mesh.flip();
        let octree = Octree::build(&mesh)?;

        self.mesh = mesh;
        self.octree = octree;
        self.boundary.reset();
        self.resolver.reset();
        self.last_stats = FrameStats::default();
        engine_info!("hds::Simplifier", "Orientation flipped, octree rebuilt");
        Ok(())
    }

    // ===== DIAGNOSTICS =====

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    pub fn boundary(&self) -> &BoundaryEngine {
        &self.boundary
    }

    pub fn proxies(&self) -> &ProxyResolver {
        &self.resolver
    }

    /// Number of nodes on the boundary.
    pub fn boundary_len(&self) -> usize {
        self.boundary.len()
    }

    /// Unsimplified index list (the mesh triangles, flattened).
    pub fn full_resolution_indices(&self) -> &[VertexIndex] {
        bytemuck::cast_slice(self.mesh.triangles())
    }

    /// One primitive per boundary node: the vertex of a leaf, the box of
    /// an internal node.
    pub fn boundary_primitives(&self) -> Vec<BoundaryPrimitive> {
        let positions = self.mesh.positions();
        self.boundary
            .boundary()
            .iter()
            .map(|&key| &self.octree[key])
            .filter(|node| node.status() == NodeStatus::Boundary)
            .map(|node| {
                if node.is_leaf() {
                    BoundaryPrimitive::Point(positions[node.rep_vertex() as usize])
                } else {
                    BoundaryPrimitive::Box(*node.bbox())
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "simplifier_tests.rs"]
mod tests;
