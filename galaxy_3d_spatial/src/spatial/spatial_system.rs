/// Spatial system contract.
///
/// A SpatialSystem stores opaque elements by bounding volume and answers
/// intersection queries. The system owns its nodes and entries; callers
/// address them through `NodeId` and `EntryKey` handles.
///
/// Ownership: the caller creates and owns the SpatialSystem and passes it
/// by reference to whoever needs to query it.

use slotmap::new_key_type;
use crate::math::{AABB, BoundingSphere, BoundingVolume, Frustum, Plane, QueryShape, Ray};
use glam::Vec3;

new_key_type! {
    /// Stable key of an entry inside a spatial system
    pub struct EntryKey;
}

/// Index of a node in a spatial system's node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always the first node of the arena.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// An element tracked by a spatial system.
///
/// `element` and `volume` belong to the caller, `node` is maintained by the
/// system's `insert`/`remove` and is `None` while the entry is detached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialEntry<T> {
    pub element: T,
    pub volume: BoundingVolume,
    pub node: Option<NodeId>,
}

/// Trait for spatial systems.
///
/// Each `test_*` query returns whether the system's outer bound intersects
/// the shape and appends every matching element to `out`. `out` is never
/// cleared by the system.
pub trait SpatialSystem<T: Copy>: Send + Sync {
    /// Handle of the root node.
    fn root(&self) -> NodeId;

    /// Outer bound of the system (the root node's box).
    fn bounds(&self) -> AABB;

    /// Smallest node that should own `volume`, searched from the root.
    fn fit(&self, volume: &BoundingVolume) -> NodeId;

    /// Create a detached entry.
    fn create_entry(&mut self, element: T, volume: BoundingVolume) -> EntryKey;

    /// Detach the entry from its node (if any) and drop it.
    fn destroy_entry(&mut self, key: EntryKey) -> Option<SpatialEntry<T>>;

    fn entry(&self, key: EntryKey) -> Option<&SpatialEntry<T>>;

    /// Replace the volume snapshot of an entry without moving it.
    /// Returns `false` for an unknown key.
    fn update_entry_volume(&mut self, key: EntryKey, volume: BoundingVolume) -> bool;

    /// Append the entry to the node's entry list.
    /// Returns `false` if it is already there or if either handle is unknown.
    fn insert(&mut self, node: NodeId, key: EntryKey) -> bool;

    /// Remove the entry from the node's entry list.
    /// Returns `true` only if it was there.
    fn remove(&mut self, node: NodeId, key: EntryKey) -> bool;

    /// Entries owned by a node, in insertion order. Empty for an unknown node.
    fn entries_at(&self, node: NodeId) -> &[EntryKey];

    /// Query with any shape. The `test_*` methods bind this to one shape kind.
    fn test_shape(&self, shape: &QueryShape, out: &mut Vec<T>) -> bool;

    fn test_ray(&self, ray: &Ray, out: &mut Vec<T>) -> bool {
        self.test_shape(&QueryShape::Ray(*ray), out)
    }

    fn test_point(&self, point: Vec3, out: &mut Vec<T>) -> bool {
        self.test_shape(&QueryShape::Point(point), out)
    }

    fn test_plane(&self, plane: &Plane, out: &mut Vec<T>) -> bool {
        self.test_shape(&QueryShape::Plane(*plane), out)
    }

    fn test_box(&self, aabb: &AABB, out: &mut Vec<T>) -> bool {
        self.test_shape(&QueryShape::Box(*aabb), out)
    }

    fn test_sphere(&self, sphere: &BoundingSphere, out: &mut Vec<T>) -> bool {
        self.test_shape(&QueryShape::Sphere(*sphere), out)
    }

    fn test_frustum(&self, frustum: &Frustum, out: &mut Vec<T>) -> bool {
        self.test_shape(&QueryShape::Frustum(*frustum), out)
    }
}
