/// SpatialSystemComponent: entity-facing adapter over a SpatialSystem.
///
/// Keeps the `Entity → EntryKey` lookup and drives fit/insert/remove on the
/// underlying system. The system itself never sees entity identity beyond
/// the opaque element it stores.

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::ecs::{Entity, World};
use crate::engine_debug;
use crate::engine_err;
use crate::engine_trace;
use crate::error::Result;
use crate::math::{AABB, BoundingSphere, BoundingVolume, Frustum, Plane, Ray};
use super::quad_tree::QuadTree;
use super::spatial_system::{EntryKey, NodeId, SpatialSystem};

/// Deepest quad tree accepted by `SpatialSystemDesc::validate`.
///
/// Depth 8 already allocates (4^10 - 1) / 3 nodes.
pub const MAX_QUAD_TREE_DEPTH: u32 = 8;

/// Quad tree configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialSystemDesc {
    /// Minimum corner of the world box
    pub world_min: Vec3,
    /// Maximum corner of the world box
    pub world_max: Vec3,
    /// Last subdivided level (leaves sit one level below)
    pub max_depth: u32,
}

impl Default for SpatialSystemDesc {
    fn default() -> Self {
        Self {
            world_min: Vec3::splat(-512.0),
            world_max: Vec3::splat(512.0),
            max_depth: 6,
        }
    }
}

impl SpatialSystemDesc {
    /// Check bounds and depth.
    pub fn validate(&self) -> Result<()> {
        if !self.world_min.is_finite() || !self.world_max.is_finite() {
            return Err(engine_err!(
                "galaxy3d::SpatialSystemComponent",
                InvalidBounds,
                "World bounds must be finite, got {:?}..{:?}",
                self.world_min, self.world_max
            ));
        }
        if self.world_min.cmpge(self.world_max).any() {
            return Err(engine_err!(
                "galaxy3d::SpatialSystemComponent",
                InvalidBounds,
                "World min {:?} must be below max {:?} on every axis",
                self.world_min, self.world_max
            ));
        }
        if self.max_depth > MAX_QUAD_TREE_DEPTH {
            return Err(engine_err!(
                "galaxy3d::SpatialSystemComponent",
                InvalidConfig,
                "Quad tree depth {} exceeds the maximum of {}",
                self.max_depth, MAX_QUAD_TREE_DEPTH
            ));
        }
        Ok(())
    }
}

/// Spatial index of the entities of a world.
pub struct SpatialSystemComponent {
    system: Box<dyn SpatialSystem<Entity>>,
    lookup: FxHashMap<Entity, EntryKey>,
}

impl SpatialSystemComponent {
    /// Quad tree over the default world box.
    pub fn new() -> Self {
        let desc = SpatialSystemDesc::default();
        Self::with_system(Box::new(QuadTree::create(
            desc.world_min,
            desc.world_max,
            desc.max_depth,
        )))
    }

    /// Quad tree built from a validated description.
    pub fn from_desc(desc: &SpatialSystemDesc) -> Result<Self> {
        desc.validate()?;
        Ok(Self::with_system(Box::new(QuadTree::create(
            desc.world_min,
            desc.world_max,
            desc.max_depth,
        ))))
    }

    /// Use a custom spatial system.
    pub fn with_system(system: Box<dyn SpatialSystem<Entity>>) -> Self {
        engine_debug!(
            "galaxy3d::SpatialSystemComponent",
            "Created spatial system component, bounds {:?}",
            system.bounds()
        );
        Self {
            system,
            lookup: FxHashMap::default(),
        }
    }

    /// Index `entity` by the world volume of its bounding volume component.
    ///
    /// The component is required. An entity whose component has no volume
    /// is removed from the index instead.
    pub fn insert(&mut self, world: &World, entity: Entity) -> Result<()> {
        let component = world.require_bounding_volume(entity)?;
        match component.volume() {
            Some(volume) => self.insert_volume(entity, volume),
            None => {
                self.remove(entity);
            }
        }
        Ok(())
    }

    /// Index `entity` with the given world volume.
    ///
    /// When the entity is already tracked by the fitted node only its volume
    /// snapshot is refreshed. Otherwise its old entry is dropped and a new
    /// one is attached to the fitted node.
    pub fn insert_volume(&mut self, entity: Entity, volume: &BoundingVolume) {
        let node = self.system.fit(volume);

        if let Some(&key) = self.lookup.get(&entity) {
            let current = self.system.entry(key).and_then(|entry| entry.node);
            if current == Some(node) {
                self.system.update_entry_volume(key, *volume);
                return;
            }
            if let Some(old) = current {
                self.system.remove(old, key);
            }
            self.system.destroy_entry(key);
            engine_trace!(
                "galaxy3d::SpatialSystemComponent",
                "Entity {:?} moved from {:?} to {:?}",
                entity, current, node
            );
        }

        let key = self.system.create_entry(entity, *volume);
        self.system.insert(node, key);
        self.lookup.insert(entity, key);
    }

    /// Stop tracking `entity`. Returns `false` if it was not tracked.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(key) = self.lookup.remove(&entity) else {
            return false;
        };
        if let Some(node) = self.system.entry(key).and_then(|entry| entry.node) {
            self.system.remove(node, key);
        }
        self.system.destroy_entry(key);
        true
    }

    /// Stop tracking every entity.
    pub fn clear(&mut self) {
        for (_, key) in self.lookup.drain() {
            if let Some(node) = self.system.entry(key).and_then(|entry| entry.node) {
                self.system.remove(node, key);
            }
            self.system.destroy_entry(key);
        }
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.lookup.contains_key(&entity)
    }

    /// Node currently owning the entity's entry.
    pub fn node_of(&self, entity: Entity) -> Option<NodeId> {
        let key = self.lookup.get(&entity)?;
        self.system.entry(*key)?.node
    }

    pub fn system(&self) -> &dyn SpatialSystem<Entity> {
        self.system.as_ref()
    }

    // ===== QUERIES =====

    pub fn test_ray(&self, ray: &Ray, out: &mut Vec<Entity>) -> bool {
        self.system.test_ray(ray, out)
    }

    pub fn test_point(&self, point: Vec3, out: &mut Vec<Entity>) -> bool {
        self.system.test_point(point, out)
    }

    pub fn test_plane(&self, plane: &Plane, out: &mut Vec<Entity>) -> bool {
        self.system.test_plane(plane, out)
    }

    pub fn test_box(&self, aabb: &AABB, out: &mut Vec<Entity>) -> bool {
        self.system.test_box(aabb, out)
    }

    pub fn test_sphere(&self, sphere: &BoundingSphere, out: &mut Vec<Entity>) -> bool {
        self.system.test_sphere(sphere, out)
    }

    pub fn test_frustum(&self, frustum: &Frustum, out: &mut Vec<Entity>) -> bool {
        self.system.test_frustum(frustum, out)
    }
}

impl Default for SpatialSystemComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "spatial_system_component_tests.rs"]
mod tests;
