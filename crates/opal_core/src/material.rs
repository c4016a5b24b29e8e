//! Surface material definitions.

use opal_math::Vec3;

/// A Blinn-Phong surface material.
///
/// Materials are immutable once loaded and shared by reference (`Arc`)
/// between any number of objects; rendering only ever reads them.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (from the scene description)
    pub name: String,

    /// Diffuse reflectance coefficient (RGB, 0-1)
    pub diffuse: Vec3,

    /// Specular reflectance coefficient (RGB, 0-1)
    pub specular: Vec3,

    /// Specular exponent (>= 0); higher is shinier
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse: Vec3::new(0.5, 0.5, 0.5), // Grey default
            specular: Vec3::ZERO,
            shininess: 0.0,
        }
    }
}

impl Material {
    /// Create a new material.
    pub fn new(name: impl Into<String>, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            name: name.into(),
            diffuse,
            specular,
            shininess,
        }
    }

    /// Create a purely diffuse material.
    pub fn diffuse(name: impl Into<String>, diffuse: Vec3) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Default::default()
        }
    }

    /// Check whether this material has a specular lobe worth evaluating.
    pub fn is_specular(&self) -> bool {
        self.specular.length_squared() > 0.0
    }
}
