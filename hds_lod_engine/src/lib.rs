/*!
# HDS LOD Engine

View-dependent, continuous level-of-detail for large triangle meshes,
driven by a vertex-clustering octree (hierarchical dynamic simplification).

The crate does no drawing itself. Each frame it turns a camera pose into a
reduced triangle index list that a rendering backend uploads and draws.

## Architecture

- **Mesh**: Validated input arrays (positions, normals, triangles)
- **Octree**: Static vertex hierarchy with bounding volumes, normal cones,
  per-vertex leaf lookup and per-triangle activator lookup
- **BoundaryEngine**: Per-frame expand/collapse of the active boundary
- **ProxyResolver**: Maps triangle corners to boundary representatives
- **Simplifier**: Facade owning all of the above, one `frame()` per frame
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod camera;
pub mod mesh;
pub mod octree;
pub mod lod;

// Main hds namespace module
pub mod hds {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Geometry kernel
    pub mod math {
        pub use crate::math::*;
    }

    // View parameters and frustum
    pub mod camera {
        pub use crate::camera::*;
    }

    // Input mesh
    pub mod mesh {
        pub use crate::mesh::*;
    }

    // Vertex octree
    pub mod octree {
        pub use crate::octree::*;
    }

    // Per-frame LOD maintenance
    pub mod lod {
        pub use crate::lod::*;
    }
}

// Re-export math library at crate root
pub use glam;
