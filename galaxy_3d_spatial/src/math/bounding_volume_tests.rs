use glam::{Mat4, Vec3};
use super::*;

fn box_volume() -> BoundingVolume {
    BoundingVolume::Box(AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0)))
}

fn sphere_volume() -> BoundingVolume {
    BoundingVolume::Sphere(BoundingSphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0))
}

fn point_volume() -> BoundingVolume {
    BoundingVolume::Point(Vec3::new(1.0, 1.0, 1.0))
}

// ============================================================================
// BoundingVolume
// ============================================================================

#[test]
fn test_point_volume_tests() {
    let point = point_volume();
    assert!(point.intersects_point(Vec3::new(1.0, 1.0, 1.0)));
    assert!(!point.intersects_point(Vec3::new(1.0, 1.0, 1.1)));
    assert!(point.intersects_plane(&Plane::new(Vec3::Y, -1.0)));
    assert!(point.intersects_ray(&Ray::new(Vec3::ZERO, Vec3::ONE)));
    assert!(!point.intersects_ray(&Ray::new(Vec3::ZERO, -Vec3::ONE)));
    assert!(point.intersects_box(&AABB::new(Vec3::ZERO, Vec3::ONE)));
    assert!(point.intersects_sphere(&BoundingSphere::new(Vec3::ZERO, 2.0)));
    assert!(point.intersects_frustum(&Frustum::default()));
}

#[test]
fn test_sphere_volume_tests() {
    let sphere = sphere_volume();
    assert!(sphere.intersects_point(Vec3::new(5.5, 0.0, 0.0)));
    assert!(sphere.intersects_box(&AABB::new(Vec3::new(3.0, -1.0, -1.0), Vec3::new(4.0, 1.0, 1.0))));
    assert!(!sphere.intersects_box(&AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))));
    assert!(sphere.intersects_ray(&Ray::new(Vec3::ZERO, Vec3::X)));
    assert!(!sphere.intersects_frustum(&Frustum::default()));
}

#[test]
fn test_short_ray_direction() {
    let up = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y * 1e-6);
    let down = Ray::new(Vec3::new(0.0, -5.0, 0.0), -Vec3::Y * 1e-6);
    let ground = Plane::new(Vec3::Y, 0.0);

    assert!(up.intersects_plane(&ground));
    assert!(!down.intersects_plane(&ground));
    assert!(up.intersects_point(Vec3::new(0.0, 3.0, 0.0)));
    assert!(!down.intersects_point(Vec3::new(0.0, 3.0, 0.0)));
    assert!(box_volume().intersects_ray(&up));
    assert!(!box_volume().intersects_ray(&down));
}

#[test]
fn test_contained_by_box() {
    let world = AABB::new(Vec3::splat(-8.0), Vec3::splat(8.0));
    assert!(box_volume().contained_by_box(&world));
    assert!(sphere_volume().contained_by_box(&world));
    assert!(point_volume().contained_by_box(&world));

    let small = AABB::new(Vec3::ZERO, Vec3::splat(2.0));
    assert!(!box_volume().contained_by_box(&small));
    assert!(!sphere_volume().contained_by_box(&small));
    assert!(point_volume().contained_by_box(&small));
}

#[test]
fn test_transformed_keeps_variant() {
    let m = Mat4::from_translation(Vec3::new(0.0, 10.0, 0.0));
    match box_volume().transformed(&m) {
        BoundingVolume::Box(aabb) => assert_eq!(aabb.min, Vec3::new(-1.0, 9.0, -1.0)),
        other => panic!("unexpected {:?}", other),
    }
    match point_volume().transformed(&m) {
        BoundingVolume::Point(p) => assert_eq!(p, Vec3::new(1.0, 11.0, 1.0)),
        other => panic!("unexpected {:?}", other),
    }
    let scaled = sphere_volume().transformed(&Mat4::from_scale(Vec3::new(1.0, 3.0, 2.0)));
    match scaled {
        BoundingVolume::Sphere(s) => {
            assert_eq!(s.center, Vec3::new(5.0, 0.0, 0.0));
            assert!((s.radius - 3.0).abs() < 1e-6);
        }
        other => panic!("unexpected {:?}", other),
    }
}

// ============================================================================
// QueryShape
// ============================================================================

#[test]
fn test_query_shape_node_and_entry_dispatch() {
    let node = AABB::new(Vec3::splat(-8.0), Vec3::splat(8.0));
    let shapes = [
        QueryShape::Ray(Ray::new(Vec3::new(-20.0, 1.0, 1.0), Vec3::X)),
        QueryShape::Point(Vec3::new(1.0, 1.0, 1.0)),
        QueryShape::Plane(Plane::new(Vec3::X, -1.0)),
        QueryShape::Box(AABB::new(Vec3::ZERO, Vec3::splat(2.0))),
        QueryShape::Sphere(BoundingSphere::new(Vec3::ZERO, 2.0)),
        QueryShape::Frustum(Frustum::default()),
    ];
    for shape in &shapes {
        assert!(shape.intersects_aabb(&node), "{} should hit the node", shape.kind());
        assert!(shape.intersects_volume(&point_volume()), "{} should hit the point", shape.kind());
    }
}

#[test]
fn test_query_shape_misses() {
    let far = AABB::new(Vec3::splat(100.0), Vec3::splat(101.0));
    assert!(!QueryShape::Point(Vec3::ZERO).intersects_aabb(&far));
    assert!(!QueryShape::Sphere(BoundingSphere::new(Vec3::ZERO, 1.0)).intersects_aabb(&far));
    assert!(!QueryShape::Point(Vec3::new(-7.0, -7.0, -7.0)).intersects_volume(&point_volume()));
}
