/// Plane in Hessian form.

use glam::{Vec3, Vec4};

/// Plane of all points `p` with `normal·p + d = 0`.
///
/// Same convention as the frustum planes: positive distances lie on the
/// side the normal points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal, unit length for metric distances
    pub normal: Vec3,
    /// Signed offset
    pub d: f32,
}

impl Plane {
    /// Create a plane from normal and offset.
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Plane through `point` with the given normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self { normal, d: -normal.dot(point) }
    }

    /// Plane from (A, B, C, D) coefficients.
    pub fn from_vec4(v: Vec4) -> Self {
        Self { normal: v.truncate(), d: v.w }
    }

    /// (A, B, C, D) coefficients.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.d)
    }

    /// Signed distance of a point (scaled by the normal length).
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }
}
