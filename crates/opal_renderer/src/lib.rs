//! Opal Renderer - CPU Whitted ray tracing.
//!
//! Casts one ray per pixel sub-sample through an immutable
//! [`opal_core::Scene`], finds the nearest intersection, and shades it with
//! ambient plus per-light Lambertian diffuse and Blinn-Phong specular terms,
//! testing each light with a shadow ray first. Rendering is parallelized
//! over image buckets with rayon; every ray cast is a pure function of the
//! scene, so workers share it read-only and write disjoint pixels.

mod bucket;
mod camera;
mod hit;
mod intersect;
mod renderer;
mod shading;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hit::Hit;
pub use intersect::{intersect, nearest_hit};
pub use renderer::{render, render_pixel, ImageBuffer};
pub use shading::{shade, visible};

/// Re-export common math types from opal_math
pub use opal_math::{Ray, Vec3};

use rand::RngCore;

/// Generate a uniform f32 in [0, 1).
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}
