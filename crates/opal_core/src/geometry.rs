//! Scene geometry: primitives and transform nodes.
//!
//! Geometry is a tagged variant over the primitive kinds rather than a trait
//! hierarchy; the renderer dispatches intersection by matching on [`Shape`].
//! Nodes own their children as shared `Arc`s so instanced geometry is stored
//! once and referenced from every instancing node.

use std::sync::Arc;

use opal_math::{Mat4, Vec3};
use thiserror::Error;

use crate::material::Material;

/// Errors raised while constructing geometry.
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("invalid geometry `{name}`: {reason}")]
    InvalidGeometry { name: String, reason: String },
}

/// The geometric shape of an [`Object`].
#[derive(Clone, Debug)]
pub enum Shape {
    /// A sphere given by center and radius (radius > 0).
    Sphere { center: Vec3, radius: f32 },

    /// An infinite plane through `point` with unit `normal`.
    Plane { point: Vec3, normal: Vec3 },

    /// An axis-aligned box with `min[i] <= max[i]` on every axis.
    Box { min: Vec3, max: Vec3 },

    /// A transform node: children are intersected in the node's local space.
    ///
    /// `inverse` is computed together with `transform` at construction; the
    /// two are never mutated independently.
    Node {
        transform: Mat4,
        inverse: Mat4,
        children: Vec<Arc<Object>>,
    },
}

/// A named piece of scene geometry with its material bindings.
#[derive(Clone, Debug)]
pub struct Object {
    /// Object name (from the scene description; referenced by instances)
    pub name: String,

    /// One or more materials. Planes use two for checkerboard patterning;
    /// everything else uses the first. A node's first material, when
    /// present, overrides whatever its children report.
    pub materials: Vec<Arc<Material>>,

    /// The shape to intersect
    pub shape: Shape,
}

impl Object {
    /// Create a sphere.
    pub fn sphere(
        name: impl Into<String>,
        materials: Vec<Arc<Material>>,
        center: Vec3,
        radius: f32,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        if radius <= 0.0 {
            return Err(GeometryError::InvalidGeometry {
                name,
                reason: format!("sphere radius must be positive, got {radius}"),
            });
        }
        if materials.is_empty() {
            return Err(GeometryError::InvalidGeometry {
                name,
                reason: "sphere requires a material".to_string(),
            });
        }
        Ok(Self {
            name,
            materials,
            shape: Shape::Sphere { center, radius },
        })
    }

    /// Create a plane through `point` with the given normal.
    ///
    /// The normal is normalized here so hit records always report unit
    /// normals.
    pub fn plane(
        name: impl Into<String>,
        materials: Vec<Arc<Material>>,
        point: Vec3,
        normal: Vec3,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        if normal.length_squared() == 0.0 || !normal.is_finite() {
            return Err(GeometryError::InvalidGeometry {
                name,
                reason: format!("plane normal must be a non-zero vector, got {normal}"),
            });
        }
        if materials.is_empty() || materials.len() > 2 {
            return Err(GeometryError::InvalidGeometry {
                name,
                reason: format!(
                    "plane requires one or two materials, got {}",
                    materials.len()
                ),
            });
        }
        Ok(Self {
            name,
            materials,
            shape: Shape::Plane {
                point,
                normal: normal.normalize(),
            },
        })
    }

    /// Create an axis-aligned box from its min/max corners.
    pub fn aabb(
        name: impl Into<String>,
        materials: Vec<Arc<Material>>,
        min: Vec3,
        max: Vec3,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(GeometryError::InvalidGeometry {
                name,
                reason: format!("box min {min} exceeds max {max} on some axis"),
            });
        }
        if materials.is_empty() {
            return Err(GeometryError::InvalidGeometry {
                name,
                reason: "box requires a material".to_string(),
            });
        }
        Ok(Self {
            name,
            materials,
            shape: Shape::Box { min, max },
        })
    }

    /// Create a transform node over `children`.
    ///
    /// The inverse matrix is derived from `transform` here, keeping the pair
    /// consistent for the node's lifetime.
    pub fn node(
        name: impl Into<String>,
        materials: Vec<Arc<Material>>,
        transform: Mat4,
        children: Vec<Arc<Object>>,
    ) -> Result<Self, GeometryError> {
        let name = name.into();
        if transform.determinant().abs() < 1e-8 {
            return Err(GeometryError::InvalidGeometry {
                name,
                reason: "node transform is singular and cannot be inverted".to_string(),
            });
        }
        let inverse = transform.inverse();
        Ok(Self {
            name,
            materials,
            shape: Shape::Node {
                transform,
                inverse,
                children,
            },
        })
    }

    /// The kind tag of this object's shape.
    pub fn kind(&self) -> &'static str {
        match self.shape {
            Shape::Sphere { .. } => "sphere",
            Shape::Plane { .. } => "plane",
            Shape::Box { .. } => "box",
            Shape::Node { .. } => "node",
        }
    }
}
