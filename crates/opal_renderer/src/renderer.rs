//! Top-level render loop and image accumulation.
//!
//! Renders an immutable scene into an [`ImageBuffer`]: buckets are traced in
//! parallel with rayon, each writing only its own pixels, and assembled into
//! the final row-major buffer (row 0 at the top of the image).

use std::path::Path;
use std::time::Instant;

use opal_core::Scene;
use opal_math::Vec3;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::intersect::nearest_hit;
use crate::shading::shade;

/// Render a single pixel: trace its n x n sub-sample grid, average, clamp.
///
/// Rays that hit nothing contribute the scene's ambient colour (the defined
/// background), not black. The RNG is only consulted when the scene enables
/// jitter, so unjittered renders are exactly the centered-sample image.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let n = scene.samples;
    let mut sum = Vec3::ZERO;

    for sy in 0..n {
        for sx in 0..n {
            let ray = if scene.jitter {
                camera.ray_jittered(x, y, sx, sy, rng)
            } else {
                camera.ray(x, y, sx, sy)
            };

            sum += match nearest_hit(&scene.objects, &ray) {
                Some(hit) => shade(scene, &hit),
                None => scene.ambient,
            };
        }
    }

    let averaged = sum / (n * n) as f32;
    averaged.clamp(Vec3::ZERO, Vec3::ONE)
}

/// Render the whole scene.
///
/// The scene must be fully constructed before this is called; it is shared
/// read-only across the rayon workers.
pub fn render(scene: &Scene) -> ImageBuffer {
    let camera = Camera::from_scene(scene);
    let buckets = generate_buckets(scene.width, scene.height, DEFAULT_BUCKET_SIZE);

    log::info!(
        "Rendering {}x{} ({} rays/pixel{}, {} buckets)",
        scene.width,
        scene.height,
        scene.rays_per_pixel(),
        if scene.jitter { ", jittered" } else { "" },
        buckets.len()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            // Seeded from the bucket index so jittered renders are
            // reproducible across runs and thread schedules
            let mut rng = StdRng::seed_from_u64(bucket.index as u64);
            BucketResult::new(*bucket, render_bucket(bucket, scene, &camera, &mut rng))
        })
        .collect();

    let mut image = ImageBuffer::new(scene.width, scene.height);
    for result in &results {
        image.blit(&result.bucket, &result.pixels);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}

/// Row-major RGB image with channels in [0, 1]; row 0 is the top row.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec3>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Copy a rendered bucket into its region of the image.
    pub fn blit(&mut self, bucket: &Bucket, pixels: &[Vec3]) {
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = pixels[(local_y * bucket.width + local_x) as usize];
                self.set(bucket.x + local_x, bucket.y + local_y, color);
            }
        }
    }

    /// Convert to 8-bit RGB bytes (for PNG encoding).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for color in &self.pixels {
            bytes.push((255.0 * color.x.clamp(0.0, 1.0)) as u8);
            bytes.push((255.0 * color.y.clamp(0.0, 1.0)) as u8);
            bytes.push((255.0 * color.z.clamp(0.0, 1.0)) as u8);
        }
        bytes
    }

    /// Write the image to a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opal_core::{Light, Material, Object};
    use opal_math::Ray;
    use std::sync::Arc;

    fn empty_scene(samples: u32) -> Scene {
        Scene {
            width: 16,
            height: 16,
            jitter: false,
            samples,
            eye: Vec3::new(0.0, 0.0, 5.0),
            lookat: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60.0,
            ambient: Vec3::new(0.2, 0.3, 0.4),
            lights: Vec::new(),
            objects: Vec::new(),
        }
    }

    fn sphere_scene() -> Scene {
        let material = Arc::new(Material::new(
            "grey",
            Vec3::splat(0.6),
            Vec3::splat(0.2),
            16.0,
        ));
        let sphere = Arc::new(Object::sphere("ball", vec![material], Vec3::ZERO, 1.0).unwrap());
        let light = Light::point(
            "key",
            Vec3::ONE,
            Vec3::new(0.0, 5.0, 5.0),
            Vec3::new(0.0, 0.0, 1.0),
        );

        Scene {
            lights: vec![light],
            objects: vec![sphere],
            ..empty_scene(1)
        }
    }

    #[test]
    fn test_background_is_ambient_not_black() {
        let scene = empty_scene(1);
        let camera = Camera::from_scene(&scene);
        let mut rng = StdRng::seed_from_u64(0);

        let colour = render_pixel(&scene, &camera, 8, 8, &mut rng);
        assert_eq!(colour, Vec3::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_single_sample_matches_single_ray() {
        let scene = sphere_scene();
        let camera = Camera::from_scene(&scene);
        let mut rng = StdRng::seed_from_u64(0);

        let pixel = render_pixel(&scene, &camera, 8, 8, &mut rng);

        let ray = camera.ray(8, 8, 0, 0);
        let direct = match nearest_hit(&scene.objects, &ray) {
            Some(hit) => shade(&scene, &hit),
            None => scene.ambient,
        }
        .clamp(Vec3::ZERO, Vec3::ONE);

        assert!((pixel - direct).length() < 1e-6);
    }

    #[test]
    fn test_supersampling_flat_background_is_unchanged() {
        let one = empty_scene(1);
        let many = empty_scene(3);
        let camera_one = Camera::from_scene(&one);
        let camera_many = Camera::from_scene(&many);
        let mut rng = StdRng::seed_from_u64(0);

        let a = render_pixel(&one, &camera_one, 3, 12, &mut rng);
        let b = render_pixel(&many, &camera_many, 3, 12, &mut rng);

        assert!((a - b).length() < 1e-6);
    }

    #[test]
    fn test_pixel_colour_is_clamped() {
        let mut scene = sphere_scene();
        // Blow out the light far past displayable range
        scene.lights[0].colour = Vec3::splat(1000.0);

        let camera = Camera::from_scene(&scene);
        let mut rng = StdRng::seed_from_u64(0);
        let colour = render_pixel(&scene, &camera, 8, 8, &mut rng);

        assert!(colour.x <= 1.0 && colour.y <= 1.0 && colour.z <= 1.0);
        assert!(colour.x >= 0.0 && colour.y >= 0.0 && colour.z >= 0.0);
    }

    #[test]
    fn test_render_covers_every_pixel() {
        // Ambient-only scene: every pixel must come out the same known
        // colour, including the odd-sized right and bottom edges
        let mut scene = empty_scene(1);
        scene.width = 10;
        scene.height = 7;

        let image = render(&scene);
        assert_eq!(image.width, 10);
        assert_eq!(image.height, 7);
        for y in 0..7 {
            for x in 0..10 {
                assert_eq!(image.get(x, y), Vec3::new(0.2, 0.3, 0.4));
            }
        }
    }

    #[test]
    fn test_render_hits_sphere_in_center() {
        let scene = sphere_scene();
        let image = render(&scene);

        let center = image.get(8, 8);
        let corner = image.get(0, 0);

        // The sphere shades differently from the ambient background
        assert_ne!(center, corner);
        assert_eq!(corner, Vec3::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_jittered_render_is_reproducible() {
        let mut scene = sphere_scene();
        scene.jitter = true;
        scene.samples = 2;

        let a = render(&scene);
        let b = render(&scene);

        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_image_buffer_set_get_roundtrip() {
        let mut image = ImageBuffer::new(4, 4);
        image.set(2, 1, Vec3::new(0.1, 0.2, 0.3));

        assert_eq!(image.get(2, 1), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(image.get(1, 2), Vec3::ZERO);
    }

    #[test]
    fn test_to_rgb8_row_zero_first() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Vec3::new(1.0, 0.0, 0.0));
        image.set(1, 1, Vec3::new(0.0, 0.0, 1.0));

        let bytes = image.to_rgb8();
        assert_eq!(bytes.len(), 12);
        // Top-left pixel leads the byte stream
        assert_eq!(&bytes[0..3], &[255, 0, 0]);
        // Bottom-right pixel is last
        assert_eq!(&bytes[9..12], &[0, 0, 255]);
    }

    #[test]
    fn test_primary_ray_helper_against_scene() {
        // Sanity-check the wiring: the center ray of the test scene hits
        // the unit sphere front face at z = 1
        let scene = sphere_scene();
        let ray = Ray::new(scene.eye, Vec3::new(0.0, 0.0, -1.0));
        let hit = nearest_hit(&scene.objects, &ray).unwrap();

        assert!((hit.t - 4.0).abs() < 1e-5);
    }
}
