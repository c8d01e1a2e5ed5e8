/// Octree - static vertex hierarchy over a mesh.
///
/// Owns the node arena, the root handle, the per-vertex leaf table and
/// the per-triangle activator table. Structure and tables never change
/// after `build`; only node `status` and `test_id` do.

use std::ops::Index;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use glam::Vec3;
use slotmap::SlotMap;
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_info, engine_warn};
use crate::math::octant_of;
use crate::mesh::Mesh;
use super::builder::Builder;
use super::cones::compute_normal_cones;
use super::node::{NodeKey, NodeStatus, OctreeNode};

/// Source of `Octree::id`
static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Static vertex octree.
#[derive(Debug, Clone)]
pub struct Octree {
    id: u64,
    nodes: SlotMap<NodeKey, OctreeNode>,
    root: NodeKey,
    vertex_nodes: Vec<NodeKey>,
    activators: Vec<NodeKey>,
}

impl Octree {
    /// Build the tree for a mesh.
    ///
    /// Every node starts `Inactive` except the root, which starts as the
    /// single `Boundary` node.
    ///
    /// # Errors
    ///
    /// `Error::InvalidMesh` if the mesh has no vertices.
    pub fn build(mesh: &Mesh) -> Result<Self> {
        if mesh.vertex_count() == 0 {
            engine_bail!("hds::Octree", InvalidMesh, "cannot build an octree without vertices");
        }

        let start = Instant::now();
        let (nodes, root) = Builder::new(mesh).run();
        let mut tree = Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            nodes,
            root,
            vertex_nodes: Vec::new(),
            activators: Vec::new(),
        };
        tree.nodes[root].status = NodeStatus::Boundary;
        engine_info!("hds::Octree", "Constructed vertex octree: {} nodes, depth {} [{:.3?}]",
            tree.nodes.len(), tree.depth(), start.elapsed());

        let start = Instant::now();
        let mut faulty = 0usize;
        tree.vertex_nodes = mesh
            .positions()
            .iter()
            .enumerate()
            .map(|(v, &p)| tree.associate_vertex(mesh, v, p, &mut faulty))
            .collect();
        engine_info!("hds::Octree", "Associated {} vertices with nodes [{:.3?}]",
            mesh.vertex_count(), start.elapsed());
        if faulty > 0 {
            engine_warn!("hds::Octree", "{} vertices map to a leaf with a different position", faulty);
        }

        let start = Instant::now();
        tree.activators = Vec::with_capacity(mesh.triangle_count());
        for (t, tri) in mesh.triangles().iter().enumerate() {
            let corners = tri.map(|v| mesh.positions()[v as usize]);
            let key = tree.find_activator(corners);
            tree.nodes[key].activated.push(t);
            tree.activators.push(key);
        }
        engine_info!("hds::Octree", "Found {} triangle activators [{:.3?}]",
            mesh.triangle_count(), start.elapsed());

        let start = Instant::now();
        compute_normal_cones(&mut tree.nodes, &tree.vertex_nodes, mesh);
        engine_info!("hds::Octree", "Computed normal cones [{:.3?}]", start.elapsed());

        Ok(tree)
    }

    /// Descend to the leaf holding vertex `v`, reporting inconsistencies.
    fn associate_vertex(&self, mesh: &Mesh, v: usize, p: Vec3, faulty: &mut usize) -> NodeKey {
        let mut key = self.root;
        loop {
            let node = &self.nodes[key];
            if node.leaf {
                break;
            }
            if !node.bbox.contains_point(p) {
                engine_warn!("hds::Octree",
                    "vertex {} at {} outside node box at depth {} (min {}, max {})",
                    v, p, node.depth, node.bbox.min(), node.bbox.max());
            }
            match node.children[octant_of(p, node.bbox.midpoint)] {
                Some(child) => key = child,
                None => {
                    engine_warn!("hds::Octree",
                        "vertex {} at {} has no child to descend into at depth {}",
                        v, p, node.depth);
                    break;
                }
            }
        }

        let rep = mesh.positions()[self.nodes[key].rep_vertex as usize];
        if rep != p {
            engine_debug!("hds::Octree", "vertex {} at {} maps to representative at {}", v, p, rep);
            *faulty += 1;
        }
        key
    }

    /// Node at which the three corners first fall into different children.
    fn find_activator(&self, corners: [Vec3; 3]) -> NodeKey {
        let key = self.descend_together(self.root, &corners);
        let node = &self.nodes[key];
        if node.leaf {
            return key;
        }

        // Keep following the pair that still agrees, if any
        let k = corners.map(|c| octant_of(c, node.bbox.midpoint));
        if k[0] == k[1] {
            self.descend_together(key, &[corners[0], corners[1]])
        } else if k[0] == k[2] {
            self.descend_together(key, &[corners[0], corners[2]])
        } else if k[1] == k[2] {
            self.descend_together(key, &[corners[1], corners[2]])
        } else {
            key
        }
    }

    /// Descend from `start` while every point falls in the same child.
    fn descend_together(&self, start: NodeKey, points: &[Vec3]) -> NodeKey {
        let mut key = start;
        loop {
            let node = &self.nodes[key];
            if node.leaf {
                return key;
            }
            let octant = octant_of(points[0], node.bbox.midpoint);
            if points[1..].iter().any(|p| octant_of(*p, node.bbox.midpoint) != octant) {
                return key;
            }
            match node.children[octant] {
                Some(child) => key = child,
                None => return key,
            }
        }
    }

    // ===== QUERIES =====

    /// Identity of this build. Clones share it, rebuilds never do.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Node by key, `None` for a key from another tree.
    pub fn get(&self, key: NodeKey) -> Option<&OctreeNode> {
        self.nodes.get(key)
    }

    pub(crate) fn node_mut(&mut self, key: NodeKey) -> &mut OctreeNode {
        &mut self.nodes[key]
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes with their keys (arena order).
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &OctreeNode)> {
        self.nodes.iter()
    }

    /// Leaf originally containing vertex `v`.
    pub fn vertex_node(&self, v: usize) -> NodeKey {
        self.vertex_nodes[v]
    }

    pub fn vertex_nodes(&self) -> &[NodeKey] {
        &self.vertex_nodes
    }

    /// Activator node of triangle `t`.
    pub fn activator(&self, t: usize) -> NodeKey {
        self.activators[t]
    }

    pub fn activators(&self) -> &[NodeKey] {
        &self.activators
    }

    /// Deepest node depth (root = 0).
    pub fn depth(&self) -> u32 {
        self.nodes.values().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Walk from a node up to the root, the node included.
    pub fn ancestors(&self, start: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        std::iter::successors(Some(start), move |key| self.nodes[*key].parent)
    }

    /// Child of `key` on the side of `point`, if that octant is occupied.
    pub fn child_toward(&self, key: NodeKey, point: Vec3) -> Option<NodeKey> {
        let node = &self.nodes[key];
        node.children[octant_of(point, node.bbox.midpoint)]
    }

    /// Every node strictly below `key`, depth first.
    pub fn descendants(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeKey> = self.nodes[key].children().collect();
        while let Some(k) = stack.pop() {
            out.push(k);
            stack.extend(self.nodes[k].children());
        }
        out
    }
}

impl Index<NodeKey> for Octree {
    type Output = OctreeNode;

    fn index(&self, key: NodeKey) -> &OctreeNode {
        &self.nodes[key]
    }
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
