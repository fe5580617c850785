//! Integration tests for per-frame culling
//!
//! Builds small worlds, syncs their bounding volumes into a spatial index
//! and checks what the cull visitors put into the scenes.
//!
//! Run with: cargo test --test culling_integration_tests

use galaxy_3d_spatial::galaxy3d::cull::{
    BruteForceCullVisitor, CullDriver, CullVisitor, SpatialCullVisitor,
};
use galaxy_3d_spatial::galaxy3d::ecs::{
    Entity, LightComponent, LightComponentDesc, MeshComponent, ModelComponent, ModelPart,
    SpriteComponent, World,
};
use galaxy_3d_spatial::galaxy3d::math::{AABB, BoundingSphere, BoundingVolume};
use galaxy_3d_spatial::galaxy3d::scene::{
    DrawableHandle, LightType, MaterialHandle, Scene, SceneCamera, SceneItem, TextureHandle,
};
use galaxy_3d_spatial::galaxy3d::spatial::{
    NodeId, QuadTree, SpatialSystem, SpatialSystemComponent, SpatialSystemDesc,
};
use galaxy_3d_spatial::glam::{Mat4, Vec3};

// ============================================================================
// HELPERS
// ============================================================================

fn camera_at(eye: Vec3, target: Vec3) -> SceneCamera {
    SceneCamera::new(
        Mat4::look_at_rh(eye, target, Vec3::Y),
        Mat4::perspective_rh(std::f32::consts::FRAC_PI_3, 16.0 / 9.0, 0.1, 200.0),
    )
}

fn unit_box() -> BoundingVolume {
    BoundingVolume::Box(AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0)))
}

fn spawn_mesh(world: &mut World, parent: Entity, id: u64, position: Vec3) -> Entity {
    let entity = world.create_child(parent, &format!("mesh{}", id)).unwrap();
    world.set_transform(entity, Mat4::from_translation(position)).unwrap();
    world
        .add_mesh(entity, MeshComponent::new(DrawableHandle(id), MaterialHandle(1)).with_volume(unit_box()))
        .unwrap();
    entity
}

fn drawable_ids(scene: &Scene) -> Vec<u64> {
    let mut ids: Vec<u64> = scene
        .items()
        .iter()
        .filter_map(|item| match item {
            SceneItem::Drawable { drawable, .. } => Some(drawable.0),
            SceneItem::Sprite { .. } => None,
        })
        .collect();
    ids.sort();
    ids
}

/// A grid of meshes on the XZ plane, some of them nested.
fn grid_world() -> (World, Vec<Entity>) {
    let mut world = World::new();
    let root = world.root();
    let mut entities = Vec::new();
    let mut id = 0;
    for x in -5..=5 {
        for z in -5..=5 {
            id += 1;
            let parent = if id % 7 == 0 { entities[entities.len() - 1] } else { root };
            let position = Vec3::new(x as f32 * 15.0, (id % 3) as f32, z as f32 * 15.0);
            entities.push(spawn_mesh(&mut world, parent, id, position));
        }
    }
    (world, entities)
}

// ============================================================================
// QUAD TREE SCENARIOS
// ============================================================================

#[test]
fn test_integration_point_entry_found_by_point_query() {
    let mut tree: QuadTree<u32> = QuadTree::create(Vec3::splat(-8.0), Vec3::splat(8.0), 1);
    let volume = BoundingVolume::Point(Vec3::new(1.0, 1.0, 1.0));
    let key = tree.create_entry(1, volume);
    let node = tree.fit(&volume);
    tree.insert(node, key);

    let mut out = Vec::new();
    tree.test_point(Vec3::new(1.0, 1.0, 1.0), &mut out);
    assert_eq!(out, vec![1]);

    let mut out2 = Vec::new();
    tree.test_point(Vec3::new(-7.0, -7.0, -7.0), &mut out2);
    assert!(out2.is_empty());
}

#[test]
fn test_integration_oversized_entry_found_by_any_sphere() {
    let mut tree: QuadTree<u32> = QuadTree::create(Vec3::splat(-8.0), Vec3::splat(8.0), 1);
    let volume = BoundingVolume::Box(AABB::new(Vec3::splat(-100.0), Vec3::splat(100.0)));
    let key = tree.create_entry(7, volume);
    let node = tree.fit(&volume);
    assert_eq!(node, NodeId::ROOT);
    tree.insert(node, key);

    for radius in [0.0, 1.0, 10.0, 500.0] {
        let mut out = Vec::new();
        tree.test_sphere(&BoundingSphere::new(Vec3::ZERO, radius), &mut out);
        assert_eq!(out, vec![7]);
    }
}

// ============================================================================
// FRAME SCENARIOS
// ============================================================================

#[test]
fn test_integration_no_camera_leaves_scene_empty() {
    let (world, _) = grid_world();
    let mut scene = Scene::new("no camera");

    BruteForceCullVisitor::new().run(&world, world.root(), None, &mut scene).unwrap();

    assert!(scene.items().is_empty());
    assert!(scene.lights().is_empty());
}

#[test]
fn test_integration_brute_force_and_spatial_agree() {
    let (mut world, _) = grid_world();
    let mut spatial = SpatialSystemComponent::from_desc(&SpatialSystemDesc {
        world_min: Vec3::splat(-128.0),
        world_max: Vec3::splat(128.0),
        max_depth: 4,
    })
    .unwrap();
    world.update_bounding_volumes(Some(&mut spatial));

    let cameras = [
        camera_at(Vec3::new(0.0, 10.0, 90.0), Vec3::ZERO),
        camera_at(Vec3::new(-80.0, 5.0, -80.0), Vec3::new(0.0, 0.0, 0.0)),
        camera_at(Vec3::new(0.0, 150.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
        camera_at(Vec3::new(300.0, 0.0, 0.0), Vec3::new(400.0, 0.0, 0.0)),
    ];

    let mut brute = BruteForceCullVisitor::new();
    let mut indexed = SpatialCullVisitor::new();
    for camera in cameras {
        let mut a = Scene::new("brute").with_camera(camera);
        let mut b = Scene::new("spatial").with_camera(camera);
        brute.run(&world, world.root(), Some(&spatial), &mut a).unwrap();
        indexed.run(&world, world.root(), Some(&spatial), &mut b).unwrap();
        assert_eq!(drawable_ids(&a), drawable_ids(&b));
    }
}

#[test]
fn test_integration_moving_entity_across_frames() {
    let mut world = World::new();
    let mut spatial = SpatialSystemComponent::new();
    let root = world.root();
    let mover = spawn_mesh(&mut world, root, 1, Vec3::new(0.0, 0.0, -20.0));
    let camera = camera_at(Vec3::ZERO, Vec3::NEG_Z);
    let mut driver = CullDriver::with_visitor(Box::new(SpatialCullVisitor::new()));
    let scene = driver.add_scene(Scene::new("main").with_camera(camera));

    // Frame 1: in view
    world.update_bounding_volumes(Some(&mut spatial));
    driver.cull_scenes(&world, root, Some(&spatial)).unwrap();
    assert_eq!(drawable_ids(driver.scene(scene).unwrap()), vec![1]);

    // Frame 2: behind the camera
    world.set_transform(mover, Mat4::from_translation(Vec3::new(0.0, 0.0, 40.0))).unwrap();
    world.update_bounding_volumes(Some(&mut spatial));
    driver.cull_scenes(&world, root, Some(&spatial)).unwrap();
    assert!(drawable_ids(driver.scene(scene).unwrap()).is_empty());

    // Frame 3: back in view, far away
    world.set_transform(mover, Mat4::from_translation(Vec3::new(10.0, 0.0, -150.0))).unwrap();
    world.update_bounding_volumes(Some(&mut spatial));
    driver.cull_scenes(&world, root, Some(&spatial)).unwrap();
    assert_eq!(drawable_ids(driver.scene(scene).unwrap()), vec![1]);

    assert_eq!(spatial.len(), 1);
}

#[test]
fn test_integration_small_move_keeps_node() {
    let mut world = World::new();
    let mut spatial = SpatialSystemComponent::new();
    let root = world.root();
    let mover = spawn_mesh(&mut world, root, 1, Vec3::new(100.0, 0.0, 100.0));
    world.update_bounding_volumes(Some(&mut spatial));
    let node = spatial.node_of(mover).unwrap();
    let entries = spatial.system().entries_at(node).len();

    world.set_transform(mover, Mat4::from_translation(Vec3::new(100.5, 3.0, 100.25))).unwrap();
    world.update_bounding_volumes(Some(&mut spatial));

    assert_eq!(spatial.node_of(mover), Some(node));
    assert_eq!(spatial.system().entries_at(node).len(), entries);
}

#[test]
fn test_integration_lights_sprites_and_models() {
    let mut world = World::new();
    let mut spatial = SpatialSystemComponent::new();
    let root = world.root();

    let lamp = world.create_child(root, "lamp").unwrap();
    world.set_transform(lamp, Mat4::from_translation(Vec3::new(0.0, 0.0, 900.0))).unwrap();
    world.add_light(lamp, LightComponent::new(LightComponentDesc {
        light_type: LightType::Point,
        range: 25.0,
        ..Default::default()
    })).unwrap();

    let sprite = world.create_child(root, "sprite").unwrap();
    world.set_transform(sprite, Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0))).unwrap();
    world.add_sprite(sprite, SpriteComponent::new(TextureHandle(3), MaterialHandle(4))).unwrap();

    let hidden_sprite = world.create_child(root, "hidden sprite").unwrap();
    world.set_transform(hidden_sprite, Mat4::from_translation(Vec3::new(0.0, 0.0, 20.0))).unwrap();
    world.add_sprite(hidden_sprite, SpriteComponent::new(TextureHandle(9), MaterialHandle(4))).unwrap();

    let parts = vec![
        ModelPart::new(DrawableHandle(20), MaterialHandle(1)),
        ModelPart::new(DrawableHandle(21), MaterialHandle(2)),
    ];
    let model = world.create_child(root, "model").unwrap();
    world.set_transform(model, Mat4::from_translation(Vec3::new(3.0, 0.0, -30.0))).unwrap();
    world.add_model(model, ModelComponent::new(parts.clone()).with_volume(unit_box())).unwrap();

    let hidden_model = world.create_child(root, "hidden model").unwrap();
    world.set_transform(hidden_model, Mat4::from_translation(Vec3::new(0.0, 0.0, 30.0))).unwrap();
    let behind = parts.iter().map(|part| ModelPart::new(DrawableHandle(part.drawable.0 + 10), part.material)).collect();
    world.add_model(hidden_model, ModelComponent::new(behind).with_volume(unit_box())).unwrap();

    world.update_bounding_volumes(Some(&mut spatial));

    let camera = camera_at(Vec3::ZERO, Vec3::NEG_Z);
    for visitor in [
        Box::new(BruteForceCullVisitor::new()) as Box<dyn CullVisitor>,
        Box::new(SpatialCullVisitor::new()),
    ] {
        let mut driver = CullDriver::with_visitor(visitor);
        driver.add_scene(Scene::new("main").with_camera(camera));
        driver.cull_scenes(&world, root, Some(&spatial)).unwrap();

        let scene = &driver.scenes()[0];
        // The lamp is far outside the frustum but lights are never culled
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.lights()[0].light_type, LightType::Point);
        assert_eq!(scene.lights()[0].range, 25.0);
        assert_eq!(scene.lights()[0].position, Vec3::new(0.0, 0.0, 900.0));
        // Sprites and models are culled by their own volumes
        assert_eq!(scene.items().len(), 3);
        let sprites: Vec<u64> = scene
            .items()
            .iter()
            .filter_map(|item| match item {
                SceneItem::Sprite { texture, .. } => Some(texture.0),
                SceneItem::Drawable { .. } => None,
            })
            .collect();
        assert_eq!(sprites, vec![3]);
        assert_eq!(drawable_ids(scene), vec![20, 21]);
    }
}

#[test]
fn test_integration_destroyed_entities_disappear() {
    let (mut world, entities) = grid_world();
    let mut spatial = SpatialSystemComponent::new();
    world.update_bounding_volumes(Some(&mut spatial));
    let before = spatial.len();

    world.destroy_entity(entities[0], Some(&mut spatial)).unwrap();
    assert_eq!(spatial.len(), before - 1);

    let camera = SceneCamera {
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
        view_projection: Some(Mat4::orthographic_rh(-200.0, 200.0, -200.0, 200.0, -200.0, 200.0)),
    };
    let mut scene = Scene::new("top").with_camera(camera);
    SpatialCullVisitor::new().run(&world, world.root(), Some(&spatial), &mut scene).unwrap();
    assert_eq!(scene.items().len(), before - 1);
}
