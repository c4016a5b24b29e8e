//! Whitted-style local illumination with shadow-ray visibility.

use opal_core::{Light, LightKind, Scene};
use opal_math::{Ray, Vec3};

use crate::hit::Hit;
use crate::intersect::nearest_hit;

/// Offset applied along the surface normal before casting a shadow ray, so
/// the ray cannot re-intersect the surface it starts on.
const SHADOW_BIAS: f32 = 0.01;

/// Test whether `light` is visible from a surface point.
///
/// Casts a shadow ray from the bias point toward the light. For point
/// lights only occluders strictly between the surface and the light count;
/// directional shadow rays are unbounded. Pure and reentrant: safe to call
/// from any render worker.
pub fn visible(scene: &Scene, point: Vec3, normal: Vec3, light: &Light) -> bool {
    let origin = point + SHADOW_BIAS * normal;

    match light.kind {
        LightKind::Point => {
            let to_light = light.vector - origin;
            let distance = to_light.length();
            if distance == 0.0 {
                return true;
            }
            let ray = Ray::new(origin, to_light / distance);
            match nearest_hit(&scene.objects, &ray) {
                Some(hit) => hit.t >= distance,
                None => true,
            }
        }
        LightKind::Directional => {
            let ray = Ray::new(origin, light.vector);
            nearest_hit(&scene.objects, &ray).is_none()
        }
    }
}

/// Shade a hit point.
///
/// Ambient (modulated by the surface's diffuse coefficient) plus, for every
/// light that passes its shadow test, Lambertian diffuse and Blinn-Phong
/// specular contributions. Returns unclamped linear RGB; the accumulator
/// clamps once after sub-sample averaging.
pub fn shade(scene: &Scene, hit: &Hit) -> Vec3 {
    let m = hit.material.as_ref();
    let view = (scene.eye - hit.point).normalize();

    let mut colour = scene.ambient * m.diffuse;

    for light in &scene.lights {
        let (incident, intensity) = match light.kind {
            LightKind::Point => {
                let to_light = light.vector - hit.point;
                let distance = to_light.length();
                if distance == 0.0 {
                    // Light exactly on the surface has no incident direction
                    continue;
                }
                (to_light / distance, light.intensity_at(distance))
            }
            LightKind::Directional => (light.vector, light.colour),
        };

        if !visible(scene, hit.point, hit.normal, light) {
            continue;
        }

        let n_dot_l = hit.normal.dot(incident).max(0.0);
        colour += m.diffuse * intensity * n_dot_l;

        let half = (view + incident).normalize();
        let n_dot_h = hit.normal.dot(half).max(0.0);
        colour += m.specular * intensity * n_dot_h.powf(m.shininess);
    }

    colour
}
