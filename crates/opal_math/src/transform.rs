// Transform utilities for Mat4
//
// Extends glam::Mat4 with the transforms ray tracing needs beyond
// transform_point3(): direction vectors (w=0) and surface normals.

use glam::{Mat4, Vec3, Vec4};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a vector in 3D space (applies rotation and scale, but NOT translation).
    /// Vectors have an implicit w=0 component.
    fn transform_vector3(&self, vector: Vec3) -> Vec3;

    /// Transform a surface normal by the inverse-transpose rule and renormalize.
    ///
    /// `self` must be the INVERSE of the matrix that maps local points to
    /// world points. Normals do not transform like directions under
    /// non-uniform scale; the inverse-transpose keeps them perpendicular to
    /// the transformed surface.
    fn transform_normal(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn transform_vector3(&self, vector: Vec3) -> Vec3 {
        // Transform as direction (w=0) - translation should not affect vectors
        let v4 = Vec4::new(vector.x, vector.y, vector.z, 0.0);
        let transformed = *self * v4;
        Vec3::new(transformed.x, transformed.y, transformed.z)
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        self.transpose().transform_vector3(normal).normalize()
    }
}
