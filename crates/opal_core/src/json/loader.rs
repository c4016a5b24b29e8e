//! Resolution of the raw JSON scene format into validated core types.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use opal_math::{Mat4, Vec3};
use serde_json::Value;
use thiserror::Error;

use crate::geometry::{GeometryError, Object};
use crate::light::Light;
use crate::material::Material;
use crate::scene::Scene;

use super::types::{RawLight, RawObject, RawObjectHeader, RawScene};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown light type `{0}`")]
    UnknownLightType(String),

    #[error("unknown geometry type `{0}`")]
    UnknownGeometryType(String),

    #[error("geometry type `{kind}` is not supported (object `{object}`)")]
    UnsupportedGeometry { object: String, kind: String },

    #[error("object `{object}` references unknown material `{material}`")]
    UnknownMaterial { object: String, material: String },

    #[error("instance `{object}` references unknown geometry `{reference}`")]
    UnknownReference { object: String, reference: String },

    #[error("`{object}` is missing required field `{field}`")]
    MissingField { object: String, field: String },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::info!("Parsing scene file: {}", path.display());
    let content = fs::read_to_string(path)?;
    load_scene_from_str(&content)
}

/// Load a scene description from a JSON string.
///
/// This is the entry point tests use; `load_scene` is a thin file wrapper
/// around it.
pub fn load_scene_from_str(json: &str) -> LoadResult<Scene> {
    let raw: RawScene = serde_json::from_str(json)?;

    let [width, height] = raw.resolution.unwrap_or([1280, 720]);
    let ambient = vec3(raw.ambient.unwrap_or([0.1, 0.1, 0.1]));

    let mut samples = raw.samples.unwrap_or(1);
    if samples == 0 {
        log::warn!("AA_samples is 0, clamping to 1");
        samples = 1;
    }

    let mut lights = Vec::with_capacity(raw.lights.len());
    for light in &raw.lights {
        lights.push(load_light(light)?);
    }

    let mut materials: HashMap<String, Arc<Material>> = HashMap::new();
    for mat in &raw.materials {
        let material = Material::new(
            mat.name.clone(),
            vec3(mat.diffuse),
            vec3(mat.specular),
            mat.shininess.unwrap_or(0.0),
        );
        materials.insert(mat.name.clone(), Arc::new(material));
    }

    let mut objects = Vec::with_capacity(raw.objects.len());
    let mut by_name: HashMap<String, Arc<Object>> = HashMap::new();
    for value in &raw.objects {
        let object = load_object(value, &materials, &mut by_name)?;
        by_name.insert(object.name.clone(), object.clone());
        objects.push(object);
    }

    Ok(Scene {
        width,
        height,
        jitter: raw.jitter,
        samples,
        eye: vec3(raw.camera.position),
        lookat: vec3(raw.camera.lookat),
        up: vec3(raw.camera.up),
        fov: raw.camera.fov,
        ambient,
        lights,
        objects,
    })
}

fn load_light(raw: &RawLight) -> LoadResult<Light> {
    // The power factor scales the specified light colour
    let colour = vec3(raw.colour) * raw.power.unwrap_or(1.0);

    match raw.kind.as_str() {
        "point" => {
            let position = raw.position.ok_or_else(|| LoadError::MissingField {
                object: format!("light `{}`", raw.name),
                field: "position".to_string(),
            })?;
            // Default is pure inverse-square falloff: (quadratic, linear, constant)
            let attenuation = vec3(raw.attenuation.unwrap_or([1.0, 0.0, 0.0]));
            Ok(Light::point(
                raw.name.clone(),
                colour,
                vec3(position),
                attenuation,
            ))
        }
        "directional" => {
            let direction = raw.direction.ok_or_else(|| LoadError::MissingField {
                object: format!("light `{}`", raw.name),
                field: "direction".to_string(),
            })?;
            if raw.attenuation.is_some() {
                log::warn!("Directional light `{}` has attenuation, ignoring", raw.name);
            }
            Ok(Light::directional(raw.name.clone(), colour, vec3(direction)))
        }
        other => Err(LoadError::UnknownLightType(other.to_string())),
    }
}

fn load_object(
    value: &Value,
    materials: &HashMap<String, Arc<Material>>,
    by_name: &mut HashMap<String, Arc<Object>>,
) -> LoadResult<Arc<Object>> {
    let header: RawObjectHeader = serde_json::from_value(value.clone())?;
    let name = header.name.ok_or_else(|| LoadError::MissingField {
        object: "geometry object".to_string(),
        field: "name".to_string(),
    })?;
    let kind = header.kind.ok_or_else(|| LoadError::MissingField {
        object: format!("object `{name}`"),
        field: "type".to_string(),
    })?;

    match kind.as_str() {
        "sphere" | "plane" | "box" | "node" | "instance" => {}
        "mesh" => {
            return Err(LoadError::UnsupportedGeometry { object: name, kind });
        }
        other => return Err(LoadError::UnknownGeometryType(other.to_string())),
    }

    let raw: RawObject = serde_json::from_value(value.clone())?;
    let mats = resolve_materials(&raw, materials)?;

    let object = match kind.as_str() {
        "sphere" => {
            let center = vec3(raw.position.unwrap_or([0.0, 0.0, 0.0]));
            let radius = raw.radius.ok_or_else(|| LoadError::MissingField {
                object: format!("sphere `{name}`"),
                field: "radius".to_string(),
            })?;
            Object::sphere(name, mats, center, radius)?
        }
        "plane" => {
            let point = vec3(raw.position.unwrap_or([0.0, 0.0, 0.0]));
            let normal = raw.normal.ok_or_else(|| LoadError::MissingField {
                object: format!("plane `{name}`"),
                field: "normal".to_string(),
            })?;
            Object::plane(name, mats, point, vec3(normal))?
        }
        "box" => {
            let min = vec3(raw.min.unwrap_or([-1.0, -1.0, -1.0]));
            let max = vec3(raw.max.unwrap_or([1.0, 1.0, 1.0]));
            Object::aabb(name, mats, min, max)?
        }
        "node" => {
            let transform = compose_transform(&raw);
            let mut children = Vec::with_capacity(raw.children.len());
            for child_value in &raw.children {
                let child = load_object(child_value, materials, by_name)?;
                by_name.insert(child.name.clone(), child.clone());
                children.push(child);
            }
            Object::node(name, mats, transform, children)?
        }
        "instance" => {
            let transform = compose_transform(&raw);
            let reference = raw.reference.ok_or_else(|| LoadError::MissingField {
                object: format!("instance `{name}`"),
                field: "ref".to_string(),
            })?;
            let child = by_name
                .get(&reference)
                .cloned()
                .ok_or_else(|| LoadError::UnknownReference {
                    object: name.clone(),
                    reference,
                })?;
            Object::node(name, mats, transform, vec![child])?
        }
        _ => unreachable!("kind was validated above"),
    };

    Ok(Arc::new(object))
}

fn resolve_materials(
    raw: &RawObject,
    materials: &HashMap<String, Arc<Material>>,
) -> LoadResult<Vec<Arc<Material>>> {
    raw.materials
        .iter()
        .map(|mat_name| {
            materials
                .get(mat_name)
                .cloned()
                .ok_or_else(|| LoadError::UnknownMaterial {
                    object: raw.name.clone(),
                    material: mat_name.clone(),
                })
        })
        .collect()
}

/// Compose a node transform from translation, XYZ Euler rotation (degrees),
/// and scale, in T * Rx * Ry * Rz * S order.
fn compose_transform(raw: &RawObject) -> Mat4 {
    let t = vec3(raw.position.unwrap_or([0.0, 0.0, 0.0]));
    let r = vec3(raw.rotation.unwrap_or([0.0, 0.0, 0.0]));
    let s = vec3(raw.scale.unwrap_or([1.0, 1.0, 1.0]));

    Mat4::from_translation(t)
        * Mat4::from_rotation_x(r.x.to_radians())
        * Mat4::from_rotation_y(r.y.to_radians())
        * Mat4::from_rotation_z(r.z.to_radians())
        * Mat4::from_scale(s)
}

fn vec3(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use crate::light::LightKind;

    const CAMERA: &str = r#""camera": {
        "position": [0, 2, 10],
        "lookAt": [0, 0, 0],
        "up": [0, 1, 0],
        "fov": 45
    }"#;

    #[test]
    fn test_load_minimal_scene_defaults() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [
                    {{ "name": "grey", "diffuse": [0.5, 0.5, 0.5], "specular": [0, 0, 0] }}
                ],
                "objects": [
                    {{ "name": "ball", "type": "sphere", "materials": ["grey"], "radius": 1.0 }}
                ]
            }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        assert_eq!(scene.width, 1280);
        assert_eq!(scene.height, 720);
        assert_eq!(scene.samples, 1);
        assert!(!scene.jitter);
        assert!((scene.ambient - Vec3::splat(0.1)).length() < 1e-6);
        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.objects[0].kind(), "sphere");
        // Sphere position defaults to the origin
        match scene.objects[0].shape {
            Shape::Sphere { center, radius } => {
                assert_eq!(center, Vec3::ZERO);
                assert_eq!(radius, 1.0);
            }
            _ => panic!("expected a sphere"),
        }
    }

    #[test]
    fn test_load_lights() {
        let json = format!(
            r#"{{
                {CAMERA},
                "lights": [
                    {{
                        "type": "point", "name": "key", "colour": [1, 1, 1],
                        "power": 2.0, "position": [0, 5, 0],
                        "attenuation": [0, 0, 1]
                    }},
                    {{
                        "type": "directional", "name": "sun", "colour": [0.9, 0.9, 0.8],
                        "direction": [0, 2, 0],
                        "attenuation": [1, 0, 0]
                    }}
                ],
                "materials": [],
                "objects": []
            }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        assert_eq!(scene.light_count(), 2);

        let key = &scene.lights[0];
        assert_eq!(key.kind, LightKind::Point);
        // Power scales colour
        assert_eq!(key.colour, Vec3::splat(2.0));
        assert_eq!(key.attenuation, Vec3::new(0.0, 0.0, 1.0));

        let sun = &scene.lights[1];
        assert_eq!(sun.kind, LightKind::Directional);
        // Direction normalized, attenuation dropped with a warning
        assert!((sun.vector - Vec3::Y).length() < 1e-6);
        assert_eq!(sun.attenuation, Vec3::ZERO);
    }

    #[test]
    fn test_point_light_default_attenuation_is_inverse_square() {
        let json = format!(
            r#"{{
                {CAMERA},
                "lights": [
                    {{ "type": "point", "name": "key", "colour": [1, 1, 1], "position": [0, 5, 0] }}
                ],
                "materials": [],
                "objects": []
            }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        assert_eq!(scene.lights[0].attenuation, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_load_node_hierarchy_and_instance() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [
                    {{ "name": "red", "diffuse": [1, 0, 0], "specular": [0, 0, 0] }},
                    {{ "name": "blue", "diffuse": [0, 0, 1], "specular": [0, 0, 0] }}
                ],
                "objects": [
                    {{
                        "name": "group", "type": "node",
                        "position": [2, 0, 0], "rotation": [0, 90, 0],
                        "children": [
                            {{ "name": "ball", "type": "sphere", "materials": ["red"], "radius": 1.0 }}
                        ]
                    }},
                    {{
                        "name": "copy", "type": "instance", "ref": "ball",
                        "position": [-2, 0, 0], "materials": ["blue"]
                    }}
                ]
            }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        assert_eq!(scene.object_count(), 2);

        let group = &scene.objects[0];
        let instance = &scene.objects[1];
        assert_eq!(group.kind(), "node");
        assert_eq!(instance.kind(), "node");

        // The instance shares the named child geometry, not a copy
        let group_child = match &group.shape {
            Shape::Node { children, .. } => children[0].clone(),
            _ => panic!("expected a node"),
        };
        let instance_child = match &instance.shape {
            Shape::Node { children, .. } => children[0].clone(),
            _ => panic!("expected a node"),
        };
        assert!(Arc::ptr_eq(&group_child, &instance_child));

        // The instance re-skins the shared geometry via its own material
        assert_eq!(instance.materials[0].name, "blue");
        assert_eq!(group_child.materials[0].name, "red");
    }

    #[test]
    fn test_plane_with_two_materials() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [
                    {{ "name": "white", "diffuse": [1, 1, 1], "specular": [0, 0, 0] }},
                    {{ "name": "black", "diffuse": [0, 0, 0], "specular": [0, 0, 0] }}
                ],
                "objects": [
                    {{
                        "name": "floor", "type": "plane",
                        "materials": ["white", "black"],
                        "normal": [0, 1, 0]
                    }}
                ]
            }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        assert_eq!(scene.objects[0].materials.len(), 2);
    }

    #[test]
    fn test_unknown_light_type_errors() {
        let json = format!(
            r#"{{
                {CAMERA},
                "lights": [
                    {{ "type": "area", "name": "panel", "colour": [1, 1, 1] }}
                ],
                "materials": [],
                "objects": []
            }}"#
        );

        match load_scene_from_str(&json) {
            Err(LoadError::UnknownLightType(kind)) => assert_eq!(kind, "area"),
            other => panic!("expected UnknownLightType, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_geometry_type_errors() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [],
                "objects": [ {{ "name": "blob", "type": "metaball" }} ]
            }}"#
        );

        match load_scene_from_str(&json) {
            Err(LoadError::UnknownGeometryType(kind)) => assert_eq!(kind, "metaball"),
            other => panic!("expected UnknownGeometryType, got {other:?}"),
        }
    }

    #[test]
    fn test_mesh_is_rejected_as_unsupported() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [],
                "objects": [
                    {{ "name": "bunny", "type": "mesh", "filepath": "bunny.obj", "scale": 2.0 }}
                ]
            }}"#
        );

        match load_scene_from_str(&json) {
            Err(LoadError::UnsupportedGeometry { object, kind }) => {
                assert_eq!(object, "bunny");
                assert_eq!(kind, "mesh");
            }
            other => panic!("expected UnsupportedGeometry, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_material_errors() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [],
                "objects": [
                    {{ "name": "ball", "type": "sphere", "materials": ["gold"], "radius": 1.0 }}
                ]
            }}"#
        );

        match load_scene_from_str(&json) {
            Err(LoadError::UnknownMaterial { object, material }) => {
                assert_eq!(object, "ball");
                assert_eq!(material, "gold");
            }
            other => panic!("expected UnknownMaterial, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_instance_reference_errors() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [],
                "objects": [ {{ "name": "copy", "type": "instance", "ref": "ghost" }} ]
            }}"#
        );

        match load_scene_from_str(&json) {
            Err(LoadError::UnknownReference { reference, .. }) => assert_eq!(reference, "ghost"),
            other => panic!("expected UnknownReference, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_sphere_radius_errors() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [],
                "objects": [ {{ "name": "ball", "type": "sphere", "radius": -1.0 }} ]
            }}"#
        );

        assert!(matches!(
            load_scene_from_str(&json),
            Err(LoadError::Geometry(GeometryError::InvalidGeometry { .. }))
        ));
    }

    #[test]
    fn test_box_defaults_to_unit_cube_corners() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [
                    {{ "name": "wood", "diffuse": [0.6, 0.4, 0.2], "specular": [0, 0, 0] }}
                ],
                "objects": [ {{ "name": "crate", "type": "box", "materials": ["wood"] }} ]
            }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        match scene.objects[0].shape {
            Shape::Box { min, max } => {
                assert_eq!(min, Vec3::splat(-1.0));
                assert_eq!(max, Vec3::splat(1.0));
            }
            _ => panic!("expected a box"),
        }
    }

    #[test]
    fn test_missing_radius_errors() {
        let json = format!(
            r#"{{
                {CAMERA},
                "materials": [],
                "objects": [ {{ "name": "ball", "type": "sphere" }} ]
            }}"#
        );

        match load_scene_from_str(&json) {
            Err(LoadError::MissingField { field, .. }) => assert_eq!(field, "radius"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }
}
