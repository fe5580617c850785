/// Frustum: six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes

use glam::{Mat4, Vec3, Vec4};
use super::aabb::AABB;
use super::sphere::BoundingSphere;
use super::ray::Ray;
use super::plane::Plane;
use super::EPSILON;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes for culling.
///
/// Each plane is (A, B, C, D) where Ax + By + Cz + D = 0.
/// Normal (A, B, C) points inward (toward the visible volume).
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Default for Frustum {
    /// The NDC cube of the identity view-projection.
    fn default() -> Self {
        Self::from_view_projection(&Mat4::IDENTITY)
    }
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. Works for both perspective
    /// and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        // Gribb & Hartmann: extract planes from rows of the VP matrix
        let mut planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row3 + row2
            Vec4::new(m[0][3] + m[0][2], m[1][3] + m[1][2], m[2][3] + m[2][2], m[3][3] + m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Plane `index` (see PLANE_* constants) as a `Plane`.
    pub fn plane(&self, index: usize) -> Plane {
        Plane::from_vec4(self.planes[index])
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Uses the "positive vertex" test: for each plane, find the AABB corner
    /// most in the direction of the plane normal. If that corner is outside,
    /// the AABB is fully outside.
    ///
    /// May return false positives (conservative), never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();

            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return false;
            }
        }

        true
    }

    /// Test if a sphere intersects this frustum.
    ///
    /// Conservative like `intersects_aabb`: only rejects spheres fully behind a plane.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(sphere.center) + plane.w >= -sphere.radius)
    }

    /// Test if a point lies inside (or on) all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Test if a ray enters the frustum by clipping it against each half-space.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;
        let parallel = EPSILON * ray.direction.length();

        for plane in &self.planes {
            let normal = plane.truncate();
            let dist = normal.dot(ray.origin) + plane.w;
            let denom = normal.dot(ray.direction);

            if denom.abs() <= parallel {
                // Parallel: must start on the inner side
                if dist < 0.0 {
                    return false;
                }
                continue;
            }

            let t = -dist / denom;
            if denom > 0.0 {
                // Entering the half-space
                t_min = t_min.max(t);
            } else {
                t_max = t_max.min(t);
            }
            if t_min > t_max {
                return false;
            }
        }

        true
    }

    /// Test if a plane cuts the frustum volume (corners on both sides).
    pub fn intersects_plane(&self, plane: &Plane) -> bool {
        let mut front = false;
        let mut back = false;
        for corner in self.corners() {
            let d = plane.distance(corner);
            if d >= 0.0 {
                front = true;
            }
            if d <= 0.0 {
                back = true;
            }
            if front && back {
                return true;
            }
        }
        false
    }

    /// The 8 corner points.
    ///
    /// Index bit 0 selects right over left, bit 1 top over bottom,
    /// bit 2 far over near. Degenerate plane triples yield `Vec3::ZERO`.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let x = if i & 1 == 0 { PLANE_LEFT } else { PLANE_RIGHT };
            let y = if i & 2 == 0 { PLANE_BOTTOM } else { PLANE_TOP };
            let z = if i & 4 == 0 { PLANE_NEAR } else { PLANE_FAR };
            *corner = Self::intersect_planes(self.planes[x], self.planes[y], self.planes[z])
                .unwrap_or(Vec3::ZERO);
        }
        corners
    }

    /// Point shared by three planes, `None` if two of them are parallel.
    fn intersect_planes(a: Vec4, b: Vec4, c: Vec4) -> Option<Vec3> {
        let (n1, n2, n3) = (a.truncate(), b.truncate(), c.truncate());
        let n2_x_n3 = n2.cross(n3);
        let denom = n1.dot(n2_x_n3);
        if denom.abs() < EPSILON {
            return None;
        }
        let point = n2_x_n3 * -a.w + n3.cross(n1) * -b.w + n1.cross(n2) * -c.w;
        Some(point / denom)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
