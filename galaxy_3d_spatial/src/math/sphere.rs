/// Bounding sphere.

use glam::{Mat4, Vec3};
use super::aabb::AABB;
use super::ray::Ray;
use super::plane::Plane;
use super::frustum::Frustum;

/// Sphere given by center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center in world (or local) space
    pub center: Vec3,
    /// Radius, expected to be >= 0
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a sphere from center and radius.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere centered on the box center that encloses the box.
    pub fn from_aabb(aabb: &AABB) -> Self {
        let center = aabb.center();
        Self { center, radius: center.distance(aabb.max) }
    }

    /// Transform the sphere: the center as a point, the radius by the
    /// largest axis scale of the matrix.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingSphere {
        let scale = matrix.x_axis.truncate().length()
            .max(matrix.y_axis.truncate().length())
            .max(matrix.z_axis.truncate().length());
        BoundingSphere {
            center: matrix.transform_point3(self.center),
            radius: self.radius * scale,
        }
    }

    /// Test if a point lies inside or on the sphere.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Test if this sphere lies entirely inside a box.
    pub fn contained_by_box(&self, aabb: &AABB) -> bool {
        let r = Vec3::splat(self.radius);
        aabb.contains(&AABB { min: self.center - r, max: self.center + r })
    }

    /// Test against another sphere.
    pub fn intersects_sphere(&self, other: &BoundingSphere) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }

    /// Test against a box.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.intersects_sphere(self)
    }

    /// Test if the plane cuts (or touches) the sphere.
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        plane.distance(self.center).abs() <= self.radius
    }

    /// Test against a ray.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        let m = ray.origin - self.center;
        let c = m.dot(m) - self.radius * self.radius;
        // Origin inside the sphere
        if c <= 0.0 {
            return true;
        }
        let b = m.dot(ray.direction);
        // Origin outside and pointing away
        if b > 0.0 {
            return false;
        }
        let a = ray.direction.dot(ray.direction);
        b * b - a * c >= 0.0
    }

    /// Test against a frustum: the sphere is out only if it is fully behind one plane.
    pub fn intersects_frustum(&self, frustum: &Frustum) -> bool {
        frustum.intersects_sphere(self)
    }
}
