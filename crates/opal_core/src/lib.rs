//! Opal Core - scene model and scene-description loading.
//!
//! This crate provides:
//!
//! - **Scene model types**: `Scene`, `Object`, `Shape`, `Material`, `Light`
//! - **JSON loading**: the declarative scene-description format
//!
//! # Example
//!
//! ```ignore
//! use opal_core::json::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.object_count(),
//!     scene.light_count());
//! ```

pub mod geometry;
pub mod json;
pub mod light;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use geometry::{GeometryError, Object, Shape};
pub use json::{load_scene, load_scene_from_str, LoadError};
pub use light::{Light, LightKind};
pub use material::Material;
pub use scene::Scene;
