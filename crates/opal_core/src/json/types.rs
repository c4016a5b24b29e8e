//! Raw deserialization types for the JSON scene format.
//!
//! These mirror the on-disk layout one-to-one; `loader` resolves them into
//! validated core types. Geometry objects stay as `serde_json::Value` until
//! their `type` tag has been inspected, so a malformed or unsupported object
//! reports a scene-level error instead of a bare serde failure.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct RawScene {
    pub camera: RawCamera,
    pub resolution: Option<[u32; 2]>,
    pub ambient: Option<[f32; 3]>,
    #[serde(rename = "AA_jitter", default)]
    pub jitter: bool,
    #[serde(rename = "AA_samples")]
    pub samples: Option<u32>,
    #[serde(default)]
    pub lights: Vec<RawLight>,
    #[serde(default)]
    pub materials: Vec<RawMaterial>,
    #[serde(default)]
    pub objects: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCamera {
    pub position: [f32; 3],
    #[serde(rename = "lookAt")]
    pub lookat: [f32; 3],
    pub up: [f32; 3],
    pub fov: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLight {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub colour: [f32; 3],
    pub power: Option<f32>,
    pub position: Option<[f32; 3]>,
    pub direction: Option<[f32; 3]>,
    pub attenuation: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMaterial {
    pub name: String,
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: Option<f32>,
}

/// Header shared by every geometry object; read before the full payload.
#[derive(Debug, Deserialize)]
pub(crate) struct RawObjectHeader {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawObject {
    pub name: String,
    #[serde(default)]
    pub materials: Vec<String>,
    pub position: Option<[f32; 3]>,
    pub radius: Option<f32>,
    pub normal: Option<[f32; 3]>,
    pub min: Option<[f32; 3]>,
    pub max: Option<[f32; 3]>,
    pub rotation: Option<[f32; 3]>,
    pub scale: Option<[f32; 3]>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub children: Vec<Value>,
}
