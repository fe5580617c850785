//! Tagged bounding volumes and query shapes.
//!
//! `BoundingVolume` is what an entry stores, `QueryShape` is what a query
//! carries. A tree traversal holds one `QueryShape` and dispatches both the
//! node test and the entry test through a single `match`.

use glam::{Mat4, Vec3};
use super::aabb::AABB;
use super::sphere::BoundingSphere;
use super::ray::Ray;
use super::plane::Plane;
use super::frustum::Frustum;
use super::EPSILON;

/// Volume owned by a boundable object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Box(AABB),
    Sphere(BoundingSphere),
    Point(Vec3),
}

impl BoundingVolume {
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        match self {
            BoundingVolume::Box(aabb) => aabb.intersects_ray(ray),
            BoundingVolume::Sphere(sphere) => sphere.intersects_ray(ray),
            BoundingVolume::Point(point) => ray.intersects_point(*point),
        }
    }

    pub fn intersects_point(&self, point: Vec3) -> bool {
        match self {
            BoundingVolume::Box(aabb) => aabb.contains_point(point),
            BoundingVolume::Sphere(sphere) => sphere.contains_point(point),
            BoundingVolume::Point(p) => p.distance_squared(point) <= EPSILON * EPSILON,
        }
    }

    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        match self {
            BoundingVolume::Box(aabb) => aabb.intersects_plane(plane),
            BoundingVolume::Sphere(sphere) => sphere.intersects_plane(plane),
            BoundingVolume::Point(point) => plane.distance(*point).abs() <= EPSILON,
        }
    }

    pub fn intersects_box(&self, other: &AABB) -> bool {
        match self {
            BoundingVolume::Box(aabb) => aabb.intersects(other),
            BoundingVolume::Sphere(sphere) => sphere.intersects_aabb(other),
            BoundingVolume::Point(point) => other.contains_point(*point),
        }
    }

    pub fn intersects_sphere(&self, other: &BoundingSphere) -> bool {
        match self {
            BoundingVolume::Box(aabb) => aabb.intersects_sphere(other),
            BoundingVolume::Sphere(sphere) => sphere.intersects_sphere(other),
            BoundingVolume::Point(point) => other.contains_point(*point),
        }
    }

    pub fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        match self {
            BoundingVolume::Box(aabb) => frustum.intersects_aabb(aabb),
            BoundingVolume::Sphere(sphere) => frustum.intersects_sphere(sphere),
            BoundingVolume::Point(point) => frustum.contains_point(*point),
        }
    }

    /// Test if the whole volume lies inside `aabb` (boundary included).
    pub fn contained_by_box(&self, aabb: &AABB) -> bool {
        match self {
            BoundingVolume::Box(inner) => aabb.contains(inner),
            BoundingVolume::Sphere(sphere) => sphere.contained_by_box(aabb),
            BoundingVolume::Point(point) => aabb.contains_point(*point),
        }
    }

    /// Local to world.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingVolume {
        match self {
            BoundingVolume::Box(aabb) => BoundingVolume::Box(aabb.transformed(matrix)),
            BoundingVolume::Sphere(sphere) => BoundingVolume::Sphere(sphere.transformed(matrix)),
            BoundingVolume::Point(point) => BoundingVolume::Point(matrix.transform_point3(*point)),
        }
    }
}

impl From<AABB> for BoundingVolume {
    fn from(aabb: AABB) -> Self {
        BoundingVolume::Box(aabb)
    }
}

impl From<BoundingSphere> for BoundingVolume {
    fn from(sphere: BoundingSphere) -> Self {
        BoundingVolume::Sphere(sphere)
    }
}

impl From<Vec3> for BoundingVolume {
    fn from(point: Vec3) -> Self {
        BoundingVolume::Point(point)
    }
}

/// Shape carried by a spatial query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryShape {
    Ray(Ray),
    Point(Vec3),
    Plane(Plane),
    Box(AABB),
    Sphere(BoundingSphere),
    Frustum(Frustum),
}

impl QueryShape {
    /// Node test: does the node's box intersect the shape?
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        match self {
            QueryShape::Ray(ray) => aabb.intersects_ray(ray),
            QueryShape::Point(point) => aabb.contains_point(*point),
            QueryShape::Plane(plane) => aabb.intersects_plane(plane),
            QueryShape::Box(other) => aabb.intersects(other),
            QueryShape::Sphere(sphere) => aabb.intersects_sphere(sphere),
            QueryShape::Frustum(frustum) => frustum.intersects_aabb(aabb),
        }
    }

    /// Entry test: does the entry's stored volume intersect the shape?
    pub fn intersects_volume(&self, volume: &BoundingVolume) -> bool {
        match self {
            QueryShape::Ray(ray) => volume.intersects_ray(ray),
            QueryShape::Point(point) => volume.intersects_point(*point),
            QueryShape::Plane(plane) => volume.intersects_plane(plane),
            QueryShape::Box(aabb) => volume.intersects_box(aabb),
            QueryShape::Sphere(sphere) => volume.intersects_sphere(sphere),
            QueryShape::Frustum(frustum) => volume.intersects_frustum(frustum),
        }
    }

    /// Short name used in trace logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryShape::Ray(_) => "ray",
            QueryShape::Point(_) => "point",
            QueryShape::Plane(_) => "plane",
            QueryShape::Box(_) => "box",
            QueryShape::Sphere(_) => "sphere",
            QueryShape::Frustum(_) => "frustum",
        }
    }
}

#[cfg(test)]
#[path = "bounding_volume_tests.rs"]
mod tests;
