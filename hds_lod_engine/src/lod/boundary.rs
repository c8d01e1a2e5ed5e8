/// BoundaryEngine - per-frame expand/collapse of the active boundary.
///
/// The boundary is a set of nodes that cuts every leaf-to-root path
/// exactly once. Nodes above it are `Active`, nodes below it
/// `Inactive`. Each update revisits only the current boundary: a node
/// that passes the view test is replaced by its children, a node whose
/// parent fails the test is folded into the highest failing ancestor.

use std::collections::VecDeque;
use rustc_hash::FxHashSet;
use crate::camera::ViewParams;
use crate::{engine_trace, engine_warn};
use crate::octree::{NodeKey, NodeStatus, Octree};
use super::config::Thresholds;
use super::visibility::expansion_admissible;

/// Incremental active-boundary maintenance.
#[derive(Debug, Clone, Default)]
pub struct BoundaryEngine {
    boundary: Vec<NodeKey>,
    seeded: bool,
    current_test_id: u64,
    tests: usize,
    tests_saved: usize,
}

impl BoundaryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the boundary; the next update starts again from the root.
    ///
    /// Node statuses are not touched, so this is meant to be paired with
    /// a freshly built octree.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Bring the boundary up to date with a new view.
    pub fn update(&mut self, octree: &mut Octree, view: &ViewParams, thresholds: Thresholds) {
        self.current_test_id += 1;
        self.tests = 0;
        self.tests_saved = 0;

        if !self.seeded {
            let root = octree.root();
            octree.node_mut(root).status = NodeStatus::Boundary;
            self.boundary.push(root);
            self.seeded = true;
        }

        let current = self.current_test_id;
        let mut work: VecDeque<NodeKey> = self.boundary.drain(..).collect();
        let mut kept = Vec::with_capacity(work.len());

        while let Some(key) = work.pop_front() {
            let node = &octree[key];
            if node.status != NodeStatus::Boundary {
                if node.status == NodeStatus::Active {
                    engine_warn!("hds::BoundaryEngine",
                        "active node at depth {} found on the boundary list", node.depth());
                }
                continue;
            }

            if node.test_id == current {
                self.tests_saved += 1;
                kept.push(key);
                continue;
            }

            if !node.is_leaf() && self.test_node(octree, key, view, thresholds) {
                let node = octree.node_mut(key);
                node.status = NodeStatus::Active;
                let children = node.children;
                for child in children.iter().rev().flatten() {
                    octree.node_mut(*child).status = NodeStatus::Boundary;
                    work.push_front(*child);
                }
                continue;
            }

            let mut reached = key;
            while let Some(parent) = octree[reached].parent() {
                if self.test_node(octree, parent, view, thresholds) {
                    break;
                }
                reached = parent;
            }
            if reached != key {
                octree.node_mut(reached).status = NodeStatus::Boundary;
                Self::deactivate_below(octree, reached);
                if let Some(parent) = octree[reached].parent() {
                    octree.node_mut(parent).test_id = current;
                }
            }
            kept.push(reached);
        }

        // Entries collapsed into an ancestor processed later
        kept.retain(|key| octree[*key].status == NodeStatus::Boundary);
        self.boundary = kept;

        engine_trace!("hds::BoundaryEngine", "update {}: {} boundary nodes, {} tests, {} saved",
            current, self.boundary.len(), self.tests, self.tests_saved);
    }

    /// Memoized expansion test.
    ///
    /// A node tested earlier in the same update answers with its current
    /// status instead of being evaluated again.
    fn test_node(
        &mut self,
        octree: &mut Octree,
        key: NodeKey,
        view: &ViewParams,
        thresholds: Thresholds,
    ) -> bool {
        let node = octree.node_mut(key);
        if node.test_id == self.current_test_id {
            self.tests_saved += 1;
            return node.status == NodeStatus::Active;
        }
        node.test_id = self.current_test_id;
        self.tests += 1;
        expansion_admissible(&octree[key], view, thresholds)
    }

    /// Mark everything below `key` inactive, skipping subtrees that already are.
    fn deactivate_below(octree: &mut Octree, key: NodeKey) {
        let mut stack: Vec<NodeKey> = octree[key].children().collect();
        while let Some(k) = stack.pop() {
            let node = octree.node_mut(k);
            if node.status == NodeStatus::Inactive {
                continue;
            }
            node.status = NodeStatus::Inactive;
            stack.extend(node.children.iter().flatten());
        }
    }

    // ===== QUERIES =====

    /// Current boundary nodes.
    pub fn boundary(&self) -> &[NodeKey] {
        &self.boundary
    }

    pub fn len(&self) -> usize {
        self.boundary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    /// Whether the first update has run.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Id of the last update (zero before the first one).
    pub fn current_test_id(&self) -> u64 {
        self.current_test_id
    }

    /// Tests evaluated by the last update.
    pub fn tests(&self) -> usize {
        self.tests
    }

    /// Tests answered from the memo by the last update.
    pub fn tests_saved(&self) -> usize {
        self.tests_saved
    }

    /// Verify that the boundary cuts every leaf-to-root path exactly once
    /// and that node statuses agree with it: `Active` above the boundary,
    /// `Inactive` below. Violations are logged; returns whether none was found.
    pub fn check_partition(&self, octree: &Octree) -> bool {
        let on_list: FxHashSet<NodeKey> = self.boundary.iter().copied().collect();
        if on_list.len() != self.boundary.len() {
            engine_warn!("hds::BoundaryEngine", "boundary list holds duplicate nodes");
            return false;
        }

        for (key, node) in octree.iter() {
            if (node.status == NodeStatus::Boundary) != on_list.contains(&key) {
                engine_warn!("hds::BoundaryEngine",
                    "node at depth {} is {:?} but {} the boundary list",
                    node.depth(), node.status,
                    if on_list.contains(&key) { "on" } else { "not on" });
                return false;
            }
            if !node.is_leaf() {
                continue;
            }

            let mut crossings = 0;
            for k in octree.ancestors(key) {
                if on_list.contains(&k) {
                    crossings += 1;
                    continue;
                }
                let status = octree[k].status;
                let expected = if crossings == 0 { NodeStatus::Inactive } else { NodeStatus::Active };
                if status != expected {
                    engine_warn!("hds::BoundaryEngine",
                        "node at depth {} is {:?}, expected {:?}", octree[k].depth(), status, expected);
                    return false;
                }
            }
            if crossings != 1 {
                engine_warn!("hds::BoundaryEngine",
                    "leaf of vertex {} crosses the boundary {} times", node.rep_vertex(), crossings);
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "boundary_tests.rs"]
mod tests;
