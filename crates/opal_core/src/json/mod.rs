//! JSON scene-description loading.
//!
//! The scene format is a single JSON document holding the camera, image
//! resolution, anti-aliasing settings, ambient light, named materials,
//! lights, and a list of geometry objects (including `node` hierarchies and
//! `instance` references to previously named geometry).

mod loader;
mod types;

pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
