//! Example: Load and inspect a JSON scene description.
//!
//! Run with: cargo run --example load_scene -- scenes/two_spheres.json

use std::env;

use opal_core::json::load_scene;
use opal_core::LightKind;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-json>");
        println!("\nExample:");
        println!("  cargo run --example load_scene -- scenes/two_spheres.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Scene ===");
            println!(
                "Resolution: {}x{} ({} rays/pixel{})",
                scene.width,
                scene.height,
                scene.rays_per_pixel(),
                if scene.jitter { ", jittered" } else { "" }
            );
            println!(
                "Camera: eye ({:.2}, {:.2}, {:.2}), fov {:.1} deg",
                scene.eye.x, scene.eye.y, scene.eye.z, scene.fov
            );
            println!(
                "Ambient: ({:.2}, {:.2}, {:.2})",
                scene.ambient.x, scene.ambient.y, scene.ambient.z
            );

            println!("\n--- Lights ({}) ---", scene.light_count());
            for light in &scene.lights {
                let kind = match light.kind {
                    LightKind::Point => "point",
                    LightKind::Directional => "directional",
                };
                println!(
                    "  {} `{}` at/toward ({:.2}, {:.2}, {:.2})",
                    kind, light.name, light.vector.x, light.vector.y, light.vector.z
                );
            }

            println!("\n--- Objects ({}) ---", scene.object_count());
            for object in &scene.objects {
                println!(
                    "  {} `{}` with {} material(s)",
                    object.kind(),
                    object.name,
                    object.materials.len()
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
