//! Opal - offline Whitted ray tracer.
//!
//! Loads JSON scene descriptions, renders them, and writes PNG images.
//!
//! ```text
//! opal scene.json [more.json ...] [-o OUTDIR] [-f FACTOR]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use opal_core::json::load_scene;
use opal_renderer::render;

struct Args {
    /// Scene description files to render
    scenes: Vec<PathBuf>,
    /// Directory for output images
    outdir: PathBuf,
    /// Resolution scale factor
    factor: f32,
}

fn print_usage() {
    println!("Usage: opal <scene.json>... [options]");
    println!();
    println!("Options:");
    println!("  -o, --outdir <dir>    directory for output files (default: out)");
    println!("  -f, --factor <n>      scale factor for resolution (default: 1.0)");
    println!("  -h, --help            show this help");
}

fn parse_args() -> Result<Args> {
    let mut scenes = Vec::new();
    let mut outdir = PathBuf::from("out");
    let mut factor = 1.0f32;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--outdir" => {
                let value = args.next().context("-o requires a directory")?;
                outdir = PathBuf::from(value);
            }
            "-f" | "--factor" => {
                let value = args.next().context("-f requires a value")?;
                factor = value
                    .parse()
                    .with_context(|| format!("invalid resolution factor `{value}`"))?;
            }
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown option `{other}`"),
            other => scenes.push(PathBuf::from(other)),
        }
    }

    if scenes.is_empty() {
        print_usage();
        bail!("no scene files given");
    }
    if factor <= 0.0 {
        bail!("resolution factor must be positive, got {factor}");
    }

    Ok(Args {
        scenes,
        outdir,
        factor,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;

    std::fs::create_dir_all(&args.outdir).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.outdir.display()
        )
    })?;

    for path in &args.scenes {
        render_scene_file(path, &args)?;
    }

    Ok(())
}

fn render_scene_file(path: &Path, args: &Args) -> Result<()> {
    let mut scene =
        load_scene(path).with_context(|| format!("failed to load scene {}", path.display()))?;

    if args.factor != 1.0 {
        scene.width = ((scene.width as f32 * args.factor) as u32).max(1);
        scene.height = ((scene.height as f32 * args.factor) as u32).max(1);
    }

    let frame = render(&scene);

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene");
    let out = args.outdir.join(format!("{stem}.png"));

    frame
        .save_png(&out)
        .with_context(|| format!("failed to write {}", out.display()))?;

    log::info!("Saved image to {}", out.display());
    println!("Saved image to {}", out.display());

    Ok(())
}
