//! Camera ray generation.

use opal_core::Scene;
use opal_math::{Ray, Vec3};
use rand::RngCore;

use crate::gen_f32;

/// Generates world-space primary rays from pixel addresses.
///
/// The orthonormal basis and view-plane extents are computed once at
/// construction; generating a ray is then a pure per-pixel computation.
/// The view plane sits at focal distance 1 in front of the eye.
#[derive(Clone, Debug)]
pub struct Camera {
    eye: Vec3,

    // Orthonormal basis: w points backwards, u right, v up
    u: Vec3,
    v: Vec3,
    w: Vec3,

    // Image dimensions in pixels
    width: f32,
    height: f32,

    // View-plane extents at focal distance 1
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,

    // Per-axis sub-sample count
    samples: u32,
}

impl Camera {
    /// Create a camera from its extrinsics and image geometry.
    ///
    /// `fov` is the vertical field of view in degrees.
    pub fn new(
        eye: Vec3,
        lookat: Vec3,
        up: Vec3,
        fov: f32,
        width: u32,
        height: u32,
        samples: u32,
    ) -> Self {
        let w = (eye - lookat).normalize();
        let u = up.cross(w).normalize();
        let v = w.cross(u);

        let aspect = width as f32 / height as f32;
        let top = (fov.to_radians() / 2.0).tan();
        let right = aspect * top;

        Self {
            eye,
            u,
            v,
            w,
            width: width as f32,
            height: height as f32,
            left: -right,
            right,
            top,
            bottom: -top,
            samples: samples.max(1),
        }
    }

    /// Create the camera a scene describes.
    pub fn from_scene(scene: &Scene) -> Self {
        Self::new(
            scene.eye,
            scene.lookat,
            scene.up,
            scene.fov,
            scene.width,
            scene.height,
            scene.samples,
        )
    }

    /// The ray through the center of sub-sample `(sx, sy)` of pixel
    /// `(col, row)`.
    pub fn ray(&self, col: u32, row: u32, sx: u32, sy: u32) -> Ray {
        self.ray_at(col, row, sx, sy, (0.5, 0.5))
    }

    /// Like [`Camera::ray`] but with the sample position jittered uniformly
    /// within its sub-sample cell.
    pub fn ray_jittered(
        &self,
        col: u32,
        row: u32,
        sx: u32,
        sy: u32,
        rng: &mut dyn RngCore,
    ) -> Ray {
        self.ray_at(col, row, sx, sy, (gen_f32(rng), gen_f32(rng)))
    }

    fn ray_at(&self, col: u32, row: u32, sx: u32, sy: u32, offset: (f32, f32)) -> Ray {
        let n = self.samples as f32;

        let pixel_x = self.left
            + (col as f32 + (sx as f32 + offset.0) / n) / self.width * (self.right - self.left);
        let pixel_y = self.bottom
            + (row as f32 + (sy as f32 + offset.1) / n) / self.height * (self.top - self.bottom);

        // -pixel_y flips the rows so row 0 is the top of the image
        let direction = (self.u * pixel_x - self.v * pixel_y - self.w).normalize();

        Ray::new(self.eye, direction)
    }
}
