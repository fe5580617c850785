/*!
# Galaxy 3D Spatial

Spatial index and per-frame visibility culling for Galaxy3D scenes.

A quad tree tracks the world-space bounding volumes of moving entities.
Once per frame a cull visitor turns "what can this camera see" into the
item and light lists of a scene, either by walking the whole entity tree
or by querying the quad tree with the camera frustum.

## Architecture

- **math**: bounding volumes and query shapes built on glam
- **spatial**: `SpatialSystem` trait, `QuadTree`, `SpatialSystemComponent`
- **ecs**: entity tree with bounding volume and scenery components
- **scene**: camera, items and lights of a scene
- **cull**: `CullVisitor` trait, brute-force and spatial visitors, `CullDriver`

Rendering the culled scenes is left to the caller.
*/

// Internal modules
mod error;
pub mod log;
pub mod math;
pub mod spatial;
pub mod ecs;
pub mod scene;
pub mod cull;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types and global logger API, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
    }

    // Bounding volumes and query shapes
    pub mod math {
        pub use crate::math::*;
    }

    // Spatial index
    pub mod spatial {
        pub use crate::spatial::*;
    }

    // Entity tree and components
    pub mod ecs {
        pub use crate::ecs::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Culling
    pub mod cull {
        pub use crate::cull::*;
    }
}

// Re-export math library at crate root
pub use glam;
