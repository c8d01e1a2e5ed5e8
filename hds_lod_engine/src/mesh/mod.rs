//! Mesh module - validated triangle mesh input.

mod mesh;

pub use mesh::{Mesh, VertexIndex};
