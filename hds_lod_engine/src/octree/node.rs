/// Octree node types.

use glam::Vec3;
use slotmap::new_key_type;
use crate::math::{BoundingBox, BoundingSphere};
use crate::mesh::VertexIndex;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Handle of a node in its octree's node arena.
    ///
    /// Only meaningful for the tree that produced it; rebuilding the
    /// tree invalidates every key.
    pub struct NodeKey;
}

/// Test id of a node that has never been tested
pub const NO_TEST: u64 = 0;

/// Where a node sits relative to the active boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Expanded: its children carry the detail
    Active,
    /// Strictly below the boundary
    Inactive,
    /// On the boundary: its representative vertex stands in for its subtree
    Boundary,
}

/// Bound on the face normals of all triangles touching a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalCone {
    /// Unit axis, or zero when no triangle touches the subtree
    pub axis: Vec3,
    /// Half angle in radians
    pub half_angle: f32,
}

/// A node of the vertex octree.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    pub(crate) status: NodeStatus,
    pub(crate) depth: u32,
    pub(crate) leaf: bool,
    pub(crate) test_id: u64,
    pub(crate) rep_vertex: VertexIndex,
    pub(crate) rep_normal: Vec3,
    pub(crate) sphere: BoundingSphere,
    pub(crate) bbox: BoundingBox,
    pub(crate) cone: NormalCone,
    pub(crate) activated: Vec<usize>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: [Option<NodeKey>; 8],
}

impl OctreeNode {
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Depth in the tree (root = 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Id of the last boundary update that tested this node.
    pub fn test_id(&self) -> u64 {
        self.test_id
    }

    /// Index of the vertex standing in for the whole subtree.
    pub fn rep_vertex(&self) -> VertexIndex {
        self.rep_vertex
    }

    pub fn rep_normal(&self) -> Vec3 {
        self.rep_normal
    }

    pub fn sphere(&self) -> &BoundingSphere {
        &self.sphere
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn cone(&self) -> &NormalCone {
        &self.cone
    }

    /// Triangles whose three corners first separate at this node.
    pub fn activated(&self) -> &[usize] {
        &self.activated
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Child in a given octant, if any vertex fell there.
    pub fn child(&self, octant: usize) -> Option<NodeKey> {
        self.children[octant]
    }

    /// Existing children in octant order.
    pub fn children(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.children.iter().flatten().copied()
    }
}
