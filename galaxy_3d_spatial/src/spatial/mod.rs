//! Spatial index: the `SpatialSystem` contract, its quad tree
//! implementation and the entity-facing adapter component.

mod spatial_system;
mod quad_tree;
mod spatial_system_component;

pub use spatial_system::{EntryKey, NodeId, SpatialEntry, SpatialSystem};
pub use quad_tree::{QuadNode, QuadTree};
pub use spatial_system_component::{
    SpatialSystemComponent, SpatialSystemDesc, MAX_QUAD_TREE_DEPTH,
};
