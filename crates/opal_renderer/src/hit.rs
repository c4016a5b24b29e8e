//! The result of a successful ray-surface intersection.

use std::sync::Arc;

use opal_core::Material;
use opal_math::Vec3;

/// Record of a ray-object intersection.
///
/// Every constructed `Hit` has a finite, strictly positive `t`, a unit
/// normal, and a material; "no hit" is `Option::None`, never a record with
/// sentinel fields.
#[derive(Clone, Debug)]
pub struct Hit {
    /// Parameter along the ray where the intersection occurs
    pub t: f32,
    /// World-space intersection position
    pub point: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Material struck
    pub material: Arc<Material>,
}
