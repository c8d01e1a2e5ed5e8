/// Recursive construction of the node arena.
///
/// Works on a private copy of the positions plus a parallel permutation
/// of vertex indices, so the mesh itself is never reordered. Every node
/// owns a contiguous range of the copy; children split it into up to
/// eight sub-ranges by three successive partitions (X, then Y, then Z
/// about the node's box midpoint).

use glam::Vec3;
use slotmap::SlotMap;
use crate::engine_warn;
use crate::math::{BoundingBox, BoundingSphere};
use crate::mesh::{Mesh, VertexIndex};
use super::node::{NodeKey, NodeStatus, NormalCone, OctreeNode, NO_TEST};

pub(super) struct Builder<'a> {
    positions: Vec<Vec3>,
    order: Vec<VertexIndex>,
    normals: &'a [Vec3],
    nodes: SlotMap<NodeKey, OctreeNode>,
}

impl<'a> Builder<'a> {
    pub(super) fn new(mesh: &'a Mesh) -> Self {
        let count = mesh.vertex_count();
        Self {
            positions: mesh.positions().to_vec(),
            order: (0..count as VertexIndex).collect(),
            normals: mesh.normals(),
            nodes: SlotMap::with_capacity_and_key(2 * count),
        }
    }

    /// Build the whole tree and return the arena with its root.
    ///
    /// The vertex range must not be empty.
    pub(super) fn run(mut self) -> (SlotMap<NodeKey, OctreeNode>, NodeKey) {
        let end = self.positions.len();
        let root = self.build(0, end, 0);
        (self.nodes, root)
    }

    /// Build the subtree over `positions[start..end]`, children first.
    fn build(&mut self, start: usize, end: usize, depth: u32) -> NodeKey {
        let mut end = end;
        while end - start > 1 && self.positions[start] == self.positions[end - 1] {
            end -= 1;
        }

        if end - start == 1 {
            return self.insert_leaf(start, depth);
        }

        let points = &self.positions[start..end];
        let bbox = BoundingBox::from_points(points.iter().copied()).unwrap_or_default();
        let sphere = BoundingSphere::ritter(points);
        let (rep_vertex, rep_normal) = self.representative(start, end);

        let ranges = self.split(start, end, bbox.midpoint);
        if ranges.iter().any(|&(lo, hi)| lo == start && hi == end) {
            // Float resolution too coarse to separate the cluster
            engine_warn!("hds::Octree",
                "cannot split {} vertices at depth {} (box {:?}), keeping them as one leaf",
                end - start, depth, bbox);
            let key = self.insert_leaf(start, depth);
            let leaf = &mut self.nodes[key];
            leaf.rep_vertex = rep_vertex;
            leaf.rep_normal = rep_normal;
            leaf.bbox = bbox;
            leaf.sphere = sphere;
            return key;
        }

        let mut children = [None; 8];
        for (octant, &(lo, hi)) in ranges.iter().enumerate() {
            if lo < hi {
                children[octant] = Some(self.build(lo, hi, depth + 1));
            }
        }

        let key = self.nodes.insert(OctreeNode {
            status: NodeStatus::Inactive,
            depth,
            leaf: false,
            test_id: NO_TEST,
            rep_vertex,
            rep_normal,
            sphere,
            bbox,
            cone: NormalCone::default(),
            activated: Vec::new(),
            parent: None,
            children,
        });
        for child in children.into_iter().flatten() {
            self.nodes[child].parent = Some(key);
        }
        key
    }

    fn insert_leaf(&mut self, at: usize, depth: u32) -> NodeKey {
        let vertex = self.order[at];
        let position = self.positions[at];
        self.nodes.insert(OctreeNode {
            status: NodeStatus::Inactive,
            depth,
            leaf: true,
            test_id: NO_TEST,
            rep_vertex: vertex,
            rep_normal: self.normals[vertex as usize],
            sphere: BoundingSphere::from_point(position),
            bbox: BoundingBox::from_point(position),
            cone: NormalCone::default(),
            activated: Vec::new(),
            parent: None,
            children: [None; 8],
        })
    }

    /// Average normal of the range, and the vertex whose normal is
    /// closest to it (first one on ties).
    fn representative(&self, start: usize, end: usize) -> (VertexIndex, Vec3) {
        let order = &self.order[start..end];
        let normal = order
            .iter()
            .map(|&v| self.normals[v as usize])
            .sum::<Vec3>()
            .normalize_or_zero();

        let mut best = order[0];
        let mut best_dot = normal.dot(self.normals[best as usize]);
        for &v in &order[1..] {
            let dot = normal.dot(self.normals[v as usize]);
            if dot > best_dot {
                best = v;
                best_dot = dot;
            }
        }
        (best, normal)
    }

    /// Partition `start..end` into the eight octant sub-ranges.
    fn split(&mut self, start: usize, end: usize, mid: Vec3) -> [(usize, usize); 8] {
        let mut ranges = [(start, start); 8];
        let x = self.partition(start, end, 0, mid.x);
        for (xi, (a, b)) in [(start, x), (x, end)].into_iter().enumerate() {
            let y = self.partition(a, b, 1, mid.y);
            for (yi, (c, d)) in [(a, y), (y, b)].into_iter().enumerate() {
                let z = self.partition(c, d, 2, mid.z);
                let octant = xi * 4 + yi * 2;
                ranges[octant] = (c, z);
                ranges[octant + 1] = (z, d);
            }
        }
        ranges
    }

    /// Hoare-style partition on one axis.
    ///
    /// Afterwards `start..split` is below `value` and `split..end` is at
    /// or above it; the permutation follows every swap.
    fn partition(&mut self, start: usize, end: usize, axis: usize, value: f32) -> usize {
        let (mut i, mut j) = (start, end);
        loop {
            while i < j && self.positions[i][axis] < value {
                i += 1;
            }
            while i < j && self.positions[j - 1][axis] >= value {
                j -= 1;
            }
            if i >= j {
                return i;
            }
            self.positions.swap(i, j - 1);
            self.order.swap(i, j - 1);
        }
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
