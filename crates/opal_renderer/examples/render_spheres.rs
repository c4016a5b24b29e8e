//! Example: render a small programmatic scene to PNG.
//!
//! Run with: cargo run --example render_spheres

use std::sync::Arc;

use opal_core::{Light, Material, Object, Scene};
use opal_renderer::{render, Vec3};

fn main() {
    env_logger::init();

    let scene = build_scene();

    println!(
        "Rendering {}x{} @ {} rays/pixel...",
        scene.width,
        scene.height,
        scene.rays_per_pixel()
    );
    let start = std::time::Instant::now();
    let image = render(&scene);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save_png(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let white = Arc::new(Material::diffuse("white", Vec3::splat(0.9)));
    let charcoal = Arc::new(Material::diffuse("charcoal", Vec3::splat(0.15)));
    let red = Arc::new(Material::new(
        "red",
        Vec3::new(0.8, 0.1, 0.1),
        Vec3::splat(0.6),
        64.0,
    ));
    let blue = Arc::new(Material::new(
        "blue",
        Vec3::new(0.1, 0.2, 0.8),
        Vec3::splat(0.3),
        16.0,
    ));

    // Checkered ground plane
    let floor = Object::plane(
        "floor",
        vec![white.clone(), charcoal],
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
    )
    .unwrap();

    let hero = Object::sphere("hero", vec![red], Vec3::new(0.0, 0.0, 0.0), 1.0).unwrap();
    let moon = Arc::new(Object::sphere("moon", vec![blue], Vec3::ZERO, 0.4).unwrap());

    // Two instances of the same small sphere, re-positioned by nodes
    let moon_left = Object::node(
        "moon_left",
        vec![],
        opal_math::Mat4::from_translation(Vec3::new(-2.0, -0.6, 0.5)),
        vec![moon.clone()],
    )
    .unwrap();
    let moon_right = Object::node(
        "moon_right",
        vec![white],
        opal_math::Mat4::from_translation(Vec3::new(2.0, -0.6, 0.5)),
        vec![moon],
    )
    .unwrap();

    let key = Light::point(
        "key",
        Vec3::splat(60.0),
        Vec3::new(4.0, 6.0, 4.0),
        Vec3::new(1.0, 0.0, 0.0),
    );
    let sky = Light::directional("sky", Vec3::splat(0.3), Vec3::new(-0.3, 1.0, 0.2));

    Scene {
        width: 800,
        height: 450,
        jitter: true,
        samples: 2,
        eye: Vec3::new(0.0, 1.2, 6.0),
        lookat: Vec3::new(0.0, 0.0, 0.0),
        up: Vec3::Y,
        fov: 45.0,
        ambient: Vec3::splat(0.08),
        lights: vec![key, sky],
        objects: vec![
            Arc::new(floor),
            Arc::new(hero),
            Arc::new(moon_left),
            Arc::new(moon_right),
        ],
    }
}
