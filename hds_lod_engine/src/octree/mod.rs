//! Octree module - static vertex-clustering hierarchy.
//!
//! Built once from a `Mesh`; afterwards only node `status` and `test_id`
//! change, driven by the boundary engine.

mod node;
mod builder;
mod cones;
mod octree;

pub use node::{NodeKey, NodeStatus, NormalCone, OctreeNode, NO_TEST};
pub use octree::Octree;
