/// ProxyResolver - maps triangle corners onto boundary representatives.
///
/// Keeps one proxy per vertex: the boundary node that currently stands
/// in for it. The table is repaired lazily as triangles are visited: a
/// stale proxy walks up while `Inactive` (its subtree was collapsed) and
/// down towards the vertex while `Active` (it was expanded).

use glam::Vec3;
use crate::camera::ViewParams;
use crate::engine_warn;
use crate::mesh::{Mesh, VertexIndex};
use crate::octree::{NodeKey, NodeStatus, Octree};
use super::frame_stats::FrameStats;

/// Per-vertex proxy table and the reduced index list it produces.
#[derive(Debug, Clone, Default)]
pub struct ProxyResolver {
    /// `Octree::id` of the tree the proxies point into
    tree_id: Option<u64>,
    proxies: Vec<NodeKey>,
    indices: Vec<VertexIndex>,
}

impl ProxyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the proxy table; it is rebuilt on the next resolve.
    pub fn reset(&mut self) {
        self.tree_id = None;
        self.proxies.clear();
        self.indices.clear();
    }

    /// Whether the proxy table has been built.
    pub fn is_initialized(&self) -> bool {
        !self.proxies.is_empty()
    }

    /// Current proxy of a vertex, `None` before the first resolve.
    pub fn proxy(&self, vertex: usize) -> Option<NodeKey> {
        self.proxies.get(vertex).copied()
    }

    /// Reduced triangle list from the last resolve (three indices per triangle).
    pub fn indices(&self) -> &[VertexIndex] {
        &self.indices
    }

    /// Rebuild the index list for the current boundary.
    ///
    /// The proxy table is (re)built on the first call and whenever
    /// `octree` is a different build than the one it was made for.
    ///
    /// Fills the `collapsed`, `culled`, `rendered` and `proxy_updates`
    /// counters of the returned stats.
    pub fn resolve(
        &mut self,
        octree: &Octree,
        mesh: &Mesh,
        view: &ViewParams,
        cull_triangles: bool,
    ) -> FrameStats {
        let positions = mesh.positions();
        if self.tree_id != Some(octree.id()) || self.proxies.len() != positions.len() {
            self.tree_id = Some(octree.id());
            self.proxies = octree
                .vertex_nodes()
                .iter()
                .zip(positions)
                .map(|(&leaf, &p)| repair(octree, leaf, p))
                .collect();
        }

        let mut stats = FrameStats::default();
        self.indices.clear();

        for (t, tri) in mesh.triangles().iter().enumerate() {
            if octree[octree.activator(t)].status() == NodeStatus::Inactive {
                stats.collapsed += 1;
                continue;
            }

            let n0 = self.lookup(octree, positions, tri[0], &mut stats);
            let n1 = self.lookup(octree, positions, tri[1], &mut stats);
            let (r0, r1) = (octree[n0].rep_vertex(), octree[n1].rep_vertex());
            if n0 == n1 || r0 == r1 {
                stats.collapsed += 1;
                continue;
            }

            let n2 = self.lookup(octree, positions, tri[2], &mut stats);
            let r2 = octree[n2].rep_vertex();
            if n2 == n0 || n2 == n1 || r2 == r0 || r2 == r1 {
                stats.collapsed += 1;
                continue;
            }

            if cull_triangles {
                let frustum = view.frustum();
                if [r0, r1, r2].iter().all(|&r| !frustum.contains_point(positions[r as usize])) {
                    stats.culled += 1;
                    continue;
                }
            }

            self.indices.extend_from_slice(&[r0, r1, r2]);
            stats.rendered += 1;
        }

        stats
    }

    /// Proxy of a vertex, repairing the cached entry if it went stale.
    fn lookup(
        &mut self,
        octree: &Octree,
        positions: &[Vec3],
        vertex: VertexIndex,
        stats: &mut FrameStats,
    ) -> NodeKey {
        let v = vertex as usize;
        let cached = self.proxies[v];
        if octree[cached].status() == NodeStatus::Boundary {
            return cached;
        }
        let key = repair(octree, cached, positions[v]);
        self.proxies[v] = key;
        stats.proxy_updates += 1;
        key
    }
}

/// Walk from `start` to the boundary node covering `position`.
fn repair(octree: &Octree, start: NodeKey, position: Vec3) -> NodeKey {
    let mut key = start;
    while octree[key].status() == NodeStatus::Inactive {
        match octree[key].parent() {
            Some(parent) => key = parent,
            None => {
                engine_warn!("hds::ProxyResolver", "proxy walk left the tree above an inactive root");
                return key;
            }
        }
    }
    while octree[key].status() == NodeStatus::Active {
        match octree.child_toward(key, position) {
            Some(child) => key = child,
            None => {
                engine_warn!("hds::ProxyResolver",
                    "no child towards {} below active node at depth {}", position, octree[key].depth());
                return key;
            }
        }
    }
    key
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
