//! The complete scene description handed to the renderer.

use std::sync::Arc;

use opal_math::Vec3;

use crate::geometry::Object;
use crate::light::Light;

/// A complete, immutable scene: image settings, camera extrinsics, lights,
/// and the root objects of the geometry graph.
///
/// A scene is built once by the loader (or by hand in tests) before any ray
/// is cast, and is only ever read during rendering, so it can be shared
/// freely across render workers.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,

    /// Randomize sub-pixel sample positions
    pub jitter: bool,
    /// Per-axis sub-sample count; a pixel receives samples^2 rays
    pub samples: u32,

    /// Camera position
    pub eye: Vec3,
    /// Point the camera looks at
    pub lookat: Vec3,
    /// Camera up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,

    /// Ambient light colour; also the background for rays that hit nothing
    pub ambient: Vec3,

    /// All lights in the scene
    pub lights: Vec<Light>,

    /// Root objects of the geometry graph
    pub objects: Vec<Arc<Object>>,
}

impl Scene {
    /// Aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Number of root objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Total rays cast per pixel (primary rays only).
    pub fn rays_per_pixel(&self) -> u32 {
        self.samples * self.samples
    }
}
