//! Geometry kernel - bounding volumes and octant classification.
//!
//! Pure functions and small value types shared by the octree builder,
//! the visibility tests and the proxy resolver. No state.

mod bounding_box;
mod bounding_sphere;
mod octant;

pub use bounding_box::{BoundingBox, CONTAINMENT_TOLERANCE};
pub use bounding_sphere::BoundingSphere;
pub use octant::{octant_of, OCTANT_X, OCTANT_Y, OCTANT_Z};
