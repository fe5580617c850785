/// World: entity tree with the components culling relies on.
///
/// Entities are stored in a SlotMap; keys stay valid while other entities
/// come and go. The root entity exists for the whole life of the world.

use glam::Mat4;
use slotmap::{new_key_type, SlotMap};
use crate::engine_err;
use crate::error::Result;
use crate::spatial::SpatialSystemComponent;
use super::bounding_volume_component::{BoundingVolumeComponent, VolumeUpdate};
use super::collectables::{LightComponent, MeshComponent, ModelComponent, SpriteComponent};
use super::scenery::SceneryLinkComponent;

new_key_type! {
    /// Stable key for an entity in a World
    pub struct Entity;
}

struct EntityNode {
    name: String,
    parent: Option<Entity>,
    children: Vec<Entity>,
    /// World transform
    transform: Mat4,
    bounding_volume: Option<BoundingVolumeComponent>,
    scenery_link: Option<SceneryLinkComponent>,
}

impl EntityNode {
    fn new(name: &str, parent: Option<Entity>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            transform: Mat4::IDENTITY,
            bounding_volume: None,
            scenery_link: None,
        }
    }
}

/// Entity tree.
pub struct World {
    entities: SlotMap<Entity, EntityNode>,
    root: Entity,
}

impl World {
    /// Create a world holding only the root entity ("Root").
    pub fn new() -> Self {
        let mut entities = SlotMap::with_key();
        let root = entities.insert(EntityNode::new("Root", None));
        Self { entities, root }
    }

    pub fn root(&self) -> Entity {
        self.root
    }

    /// Number of entities, root included.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Always false: the root cannot be destroyed.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    fn node(&self, entity: Entity) -> Result<&EntityNode> {
        match self.entities.get(entity) {
            Some(node) => Ok(node),
            None => Err(engine_err!("galaxy3d::World", InvalidEntity,
                "Entity {:?} not found", entity)),
        }
    }

    fn node_mut(&mut self, entity: Entity) -> Result<&mut EntityNode> {
        match self.entities.get_mut(entity) {
            Some(node) => Ok(node),
            None => Err(engine_err!("galaxy3d::World", InvalidEntity,
                "Entity {:?} not found", entity)),
        }
    }

    /// Append a new child to `parent`.
    pub fn create_child(&mut self, parent: Entity, name: &str) -> Result<Entity> {
        self.node(parent)?;
        let entity = self.entities.insert(EntityNode::new(name, Some(parent)));
        self.node_mut(parent)?.children.push(entity);
        Ok(entity)
    }

    /// Children in creation order. Empty for an unknown entity.
    pub fn children(&self, entity: Entity) -> &[Entity] {
        self.entities
            .get(entity)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.entities.get(entity)?.parent
    }

    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.entities.get(entity).map(|node| node.name.as_str())
    }

    /// `entity` and all its descendants, depth-first pre-order.
    pub fn descendants(&self, entity: Entity) -> Vec<Entity> {
        let mut result = Vec::new();
        if !self.contains(entity) {
            return result;
        }
        let mut stack = vec![entity];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    // ===== TRANSFORM =====

    /// Set the world transform and flag the bounding volume for refresh.
    pub fn set_transform(&mut self, entity: Entity, transform: Mat4) -> Result<()> {
        let node = self.node_mut(entity)?;
        node.transform = transform;
        if let Some(volume) = node.bounding_volume.as_mut() {
            volume.mark_transform_changed();
        }
        Ok(())
    }

    pub fn transform(&self, entity: Entity) -> Option<&Mat4> {
        self.entities.get(entity).map(|node| &node.transform)
    }

    // ===== COMPONENTS =====

    /// Attach (or replace) the bounding volume component.
    pub fn add_bounding_volume(
        &mut self,
        entity: Entity,
        component: BoundingVolumeComponent,
    ) -> Result<&mut BoundingVolumeComponent> {
        let node = self.node_mut(entity)?;
        Ok(node.bounding_volume.insert(component))
    }

    pub fn bounding_volume(&self, entity: Entity) -> Option<&BoundingVolumeComponent> {
        self.entities.get(entity)?.bounding_volume.as_ref()
    }

    pub fn bounding_volume_mut(&mut self, entity: Entity) -> Option<&mut BoundingVolumeComponent> {
        self.entities.get_mut(entity)?.bounding_volume.as_mut()
    }

    /// Bounding volume component of an entity that must have one.
    pub fn require_bounding_volume(&self, entity: Entity) -> Result<&BoundingVolumeComponent> {
        let node = self.node(entity)?;
        match node.bounding_volume.as_ref() {
            Some(volume) => Ok(volume),
            None => Err(engine_err!("galaxy3d::World", MissingService,
                "Entity '{}' ({:?}) has no BoundingVolumeComponent", node.name, entity)),
        }
    }

    fn ensure_bounding_volume(&mut self, entity: Entity) -> Result<&mut BoundingVolumeComponent> {
        let node = self.node_mut(entity)?;
        Ok(node.bounding_volume.get_or_insert_with(BoundingVolumeComponent::new))
    }

    /// Scenery link of the entity, created on first use.
    pub fn ensure_scenery_link(&mut self, entity: Entity) -> Result<&mut SceneryLinkComponent> {
        let node = self.node_mut(entity)?;
        Ok(node.scenery_link.get_or_insert_with(SceneryLinkComponent::new))
    }

    pub fn scenery_link(&self, entity: Entity) -> Option<&SceneryLinkComponent> {
        self.entities.get(entity)?.scenery_link.as_ref()
    }

    /// Add a light. The entity's bounding volume is linked to the light's
    /// unbounded local volume.
    pub fn add_light(&mut self, entity: Entity, light: LightComponent) -> Result<()> {
        self.ensure_bounding_volume(entity)?
            .link_volume(Some(light.local_volume()));
        self.ensure_scenery_link(entity)?.register(Box::new(light));
        Ok(())
    }

    /// Add a mesh. Its local bounds, if any, become the entity's linked volume.
    pub fn add_mesh(&mut self, entity: Entity, mesh: MeshComponent) -> Result<()> {
        let bounding_volume = self.ensure_bounding_volume(entity)?;
        if let Some(volume) = mesh.volume {
            bounding_volume.link_volume(Some(volume));
        }
        self.ensure_scenery_link(entity)?.register(Box::new(mesh));
        Ok(())
    }

    /// Add a model. Its local bounds, if any, become the entity's linked volume.
    pub fn add_model(&mut self, entity: Entity, model: ModelComponent) -> Result<()> {
        let bounding_volume = self.ensure_bounding_volume(entity)?;
        if let Some(volume) = model.volume {
            bounding_volume.link_volume(Some(volume));
        }
        self.ensure_scenery_link(entity)?.register(Box::new(model));
        Ok(())
    }

    /// Add a sprite. The sphere enclosing its rectangle becomes the entity's
    /// linked volume.
    pub fn add_sprite(&mut self, entity: Entity, sprite: SpriteComponent) -> Result<()> {
        self.ensure_bounding_volume(entity)?
            .link_volume(Some(sprite.local_volume()));
        self.ensure_scenery_link(entity)?.register(Box::new(sprite));
        Ok(())
    }

    // ===== PER-FRAME =====

    /// Refresh every changed bounding volume and re-index it.
    ///
    /// Entities are visited depth-first from the root. Without a spatial
    /// component the world volumes are still refreshed.
    pub fn update_bounding_volumes(&mut self, mut spatial: Option<&mut SpatialSystemComponent>) {
        for entity in self.descendants(self.root) {
            let Some(node) = self.entities.get_mut(entity) else {
                continue;
            };
            let transform = node.transform;
            let Some(component) = node.bounding_volume.as_mut() else {
                continue;
            };
            match component.update(&transform) {
                VolumeUpdate::Unchanged => {}
                VolumeUpdate::Insert(volume) => {
                    if let Some(spatial) = spatial.as_deref_mut() {
                        spatial.insert_volume(entity, &volume);
                        component.set_added(true);
                    }
                }
                VolumeUpdate::Remove => {
                    if let Some(spatial) = spatial.as_deref_mut() {
                        spatial.remove(entity);
                        component.set_added(false);
                    }
                }
            }
        }
    }

    /// Destroy an entity and its subtree, dropping their spatial entries.
    pub fn destroy_entity(
        &mut self,
        entity: Entity,
        mut spatial: Option<&mut SpatialSystemComponent>,
    ) -> Result<()> {
        if entity == self.root {
            return Err(engine_err!("galaxy3d::World", InvalidEntity,
                "The root entity cannot be destroyed"));
        }
        let parent = self.node(entity)?.parent;

        if let Some(parent) = parent.and_then(|p| self.entities.get_mut(p)) {
            parent.children.retain(|&child| child != entity);
        }

        for doomed in self.descendants(entity) {
            if let Some(spatial) = spatial.as_deref_mut() {
                spatial.remove(doomed);
            }
            self.entities.remove(doomed);
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
