/// Normal cone computation, run once after the tree is linked.
///
/// Pass 1 sums each triangle's unit face normal into every ancestor of
/// each corner's leaf (the leaf included); the sums become the cone
/// axes. Pass 2 takes the smallest cosine between axis and face normal
/// over the same walks. Both run on side tables so node fields are only
/// written once at the end.

use glam::Vec3;
use slotmap::{SecondaryMap, SlotMap};
use crate::mesh::Mesh;
use super::node::{NodeKey, NormalCone, OctreeNode};

/// Walk from a node up to the root, the node included.
fn ancestors(
    nodes: &SlotMap<NodeKey, OctreeNode>,
    start: NodeKey,
) -> impl Iterator<Item = NodeKey> + '_ {
    std::iter::successors(Some(start), move |key| nodes[*key].parent)
}

pub(super) fn compute_normal_cones(
    nodes: &mut SlotMap<NodeKey, OctreeNode>,
    vertex_nodes: &[NodeKey],
    mesh: &Mesh,
) {
    let mut axes: SecondaryMap<NodeKey, Vec3> = SecondaryMap::with_capacity(nodes.len());
    for key in nodes.keys() {
        axes.insert(key, Vec3::ZERO);
    }

    // Pass 1: axis = normalized sum of face normals
    for (tri, normal) in mesh.triangles().iter().zip(mesh.face_normals()) {
        for &v in tri {
            for key in ancestors(nodes, vertex_nodes[v as usize]) {
                axes[key] += *normal;
            }
        }
    }
    for axis in axes.values_mut() {
        *axis = axis.normalize_or_zero();
    }

    // Pass 2: widest deviation from the axis
    let mut min_cos: SecondaryMap<NodeKey, f32> = SecondaryMap::with_capacity(nodes.len());
    for key in nodes.keys() {
        min_cos.insert(key, 1.0);
    }
    for (tri, normal) in mesh.triangles().iter().zip(mesh.face_normals()) {
        for &v in tri {
            for key in ancestors(nodes, vertex_nodes[v as usize]) {
                let cos = axes[key].dot(*normal);
                if cos < min_cos[key] {
                    min_cos[key] = cos;
                }
            }
        }
    }

    for (key, node) in nodes.iter_mut() {
        node.cone = NormalCone {
            axis: axes[key],
            half_angle: min_cos[key].clamp(-1.0, 1.0).acos(),
        };
    }
}

#[cfg(test)]
#[path = "cones_tests.rs"]
mod tests;
