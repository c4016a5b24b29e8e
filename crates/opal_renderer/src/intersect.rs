//! Ray-primitive intersection and the nearest-hit search.
//!
//! Each shape is intersected in its own coordinate space; transform nodes
//! reproject the ray into local space for their children and map the winning
//! hit back out. A hit exists only for finite, strictly positive `t`.

use std::sync::Arc;

use opal_core::{Material, Object, Shape};
use opal_math::{Mat4, Mat4Ext, Ray, Vec3};

use crate::hit::Hit;

/// Intersect a ray with an object.
///
/// Pure and side-effect-free; the ray is expected in the object's own space
/// (world space for top-level objects).
pub fn intersect(object: &Object, ray: &Ray) -> Option<Hit> {
    match &object.shape {
        Shape::Sphere { center, radius } => sphere_hit(object, *center, *radius, ray),
        Shape::Plane { point, normal } => plane_hit(object, *point, *normal, ray),
        Shape::Box { min, max } => box_hit(object, *min, *max, ray),
        Shape::Node {
            transform,
            inverse,
            children,
        } => node_hit(object, transform, inverse, children, ray),
    }
}

/// Find the nearest hit along `ray` over all `objects`.
///
/// Linear scan with strict comparison on `t`, so ties go to the
/// first-encountered object. Reentrant: shadow rays re-enter this from
/// inside shading while primary rays are being traced on other workers.
pub fn nearest_hit(objects: &[Arc<Object>], ray: &Ray) -> Option<Hit> {
    let mut closest: Option<Hit> = None;

    for object in objects {
        if let Some(hit) = intersect(object, ray) {
            match &closest {
                Some(best) if hit.t >= best.t => {}
                _ => closest = Some(hit),
            }
        }
    }

    closest
}

fn sphere_hit(object: &Object, center: Vec3, radius: f32, ray: &Ray) -> Option<Hit> {
    let oc = ray.origin - center;
    let a = ray.direction.dot(ray.direction);
    if a == 0.0 {
        // Zero-length direction: no hit rather than a division fault
        return None;
    }
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let near = (-b - sqrtd) / (2.0 * a);
    let far = (-b + sqrtd) / (2.0 * a);

    // Smallest strictly positive root; near <= far always holds
    let t = if near > 0.0 {
        near
    } else if far > 0.0 {
        far
    } else {
        return None;
    };

    let point = ray.at(t);
    Some(Hit {
        t,
        point,
        normal: (point - center).normalize(),
        material: object.materials[0].clone(),
    })
}

fn plane_hit(object: &Object, point: Vec3, normal: Vec3, ray: &Ray) -> Option<Hit> {
    // Implicit form n.p + d = 0 derived from the plane point
    let d = -normal.dot(point);

    let denominator = normal.dot(ray.direction);
    if denominator == 0.0 {
        // Ray parallel to the plane
        return None;
    }

    let t = -(normal.dot(ray.origin) + d) / denominator;
    if t <= 0.0 {
        return None;
    }

    let position = ray.at(t);
    let material = if object.materials.len() == 2 {
        checker_material(object, position)
    } else {
        object.materials[0].clone()
    };

    Some(Hit {
        t,
        point: position,
        normal,
        material,
    })
}

/// Checkerboard material selection for two-material planes.
///
/// Unit cells indexed by floor(x), floor(z). Where the signs of x and z
/// agree, equal cell parity selects the first material; where they disagree
/// the choice is inverted. The inversion across the sign-quadrant boundary
/// is long-standing rendered behaviour and must not be "simplified" into a
/// uniform floor(x)+floor(z) checker.
fn checker_material(object: &Object, position: Vec3) -> Arc<Material> {
    let ix = position.x.floor() as i64;
    let iz = position.z.floor() as i64;

    let same_parity = ix.rem_euclid(2) == iz.rem_euclid(2);
    let same_sign = (position.x > 0.0 && position.z > 0.0)
        || (position.x < 0.0 && position.z < 0.0);

    let index = match (same_sign, same_parity) {
        (true, true) | (false, false) => 0,
        _ => 1,
    };
    object.materials[index].clone()
}

fn box_hit(object: &Object, min: Vec3, max: Vec3, ray: &Ray) -> Option<Hit> {
    let origin = ray.origin.to_array();
    let dir = ray.direction.to_array();
    let min = min.to_array();
    let max = max.to_array();

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    let mut entry_axis = 0usize;

    for axis in 0..3 {
        if dir[axis] == 0.0 {
            // Parallel to this slab pair: a hit is only possible if the
            // origin already lies between the two faces
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return None;
            }
            continue;
        }

        let t0 = (min[axis] - origin[axis]) / dir[axis];
        let t1 = (max[axis] - origin[axis]) / dir[axis];
        let (low, high) = (t0.min(t1), t0.max(t1));

        // Strict comparison: on a tie the earlier axis keeps the entry face
        if low > t_min {
            t_min = low;
            entry_axis = axis;
        }
        t_max = t_max.min(high);
    }

    // t_min < 0 covers the ray-starts-inside case: the box is not
    // intersectable from within
    if t_min > t_max || t_min <= 0.0 {
        return None;
    }

    let mut normal = Vec3::ZERO;
    normal[entry_axis] = if dir[entry_axis] > 0.0 { -1.0 } else { 1.0 };

    Some(Hit {
        t: t_min,
        point: ray.at(t_min),
        normal,
        material: object.materials[0].clone(),
    })
}

fn node_hit(
    object: &Object,
    transform: &Mat4,
    inverse: &Mat4,
    children: &[Arc<Object>],
    ray: &Ray,
) -> Option<Hit> {
    // Reproject into local space. The direction is deliberately not
    // renormalized: local t then equals world t, so child hits compare
    // directly against hits from other objects.
    let local_ray = Ray::new(
        inverse.transform_point3(ray.origin),
        inverse.transform_vector3(ray.direction),
    );

    nearest_hit(children, &local_ray).map(|hit| {
        let material = match object.materials.first() {
            Some(override_material) => override_material.clone(),
            None => hit.material,
        };
        Hit {
            t: hit.t,
            point: transform.transform_point3(hit.point),
            normal: inverse.transform_normal(hit.normal),
            material,
        }
    })
}
