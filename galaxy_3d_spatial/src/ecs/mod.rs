//! Minimal entity world
//!
//! Entities form a tree rooted at `World::root`. Each entity carries a world
//! transform and optionally a bounding volume and a scenery link, which is
//! all the culling code needs to know about an entity.

mod world;
mod bounding_volume_component;
mod scenery;
mod collectables;

pub use world::{Entity, World};
pub use bounding_volume_component::BoundingVolumeComponent;
pub use scenery::{SceneryCollectable, SceneryCollector, SceneryLinkComponent};
pub use collectables::{
    LightComponent, LightComponentDesc, MeshComponent, ModelComponent, ModelPart,
    SpriteComponent, LIGHT_VOLUME_RADIUS,
};
