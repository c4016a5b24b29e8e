// Re-export glam for convenience
pub use glam::*;

// Opal math types
mod ray;
pub use ray::Ray;

mod transform;
pub use transform::Mat4Ext;
