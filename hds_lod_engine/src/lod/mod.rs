//! LOD module - per-frame maintenance of the active boundary.
//!
//! - `BoundaryEngine`: expands and collapses boundary nodes for a view
//! - `ProxyResolver`: maps triangle corners to boundary representatives
//! - `Simplifier`: facade owning mesh, octree, engine and resolver

mod config;
mod frame_stats;
mod visibility;
mod boundary;
mod proxy;
mod simplifier;

pub use config::{LodConfig, Thresholds};
pub use frame_stats::FrameStats;
pub use visibility::{Facing, classify_facing, screen_area, expansion_admissible};
pub use boundary::BoundaryEngine;
pub use proxy::ProxyResolver;
pub use simplifier::{Simplifier, BoundaryPrimitive};
