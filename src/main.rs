//! Renders a small test scene through the whole pipeline and saves it as
//! an image.
//!
//! USAGE:
//! ```bash
//! cargo run --release -- --width 640 --height 400 --output scene.png
//! cargo run --release -- --wireframe --section 0.5
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use gawfill::colors;
use gawfill::math::{vec2::Vec2, vec3::Vec3, vec4::Vec4};
use gawfill::{
    clip_polygon, ClipResult, FillMode, FrameBuffer, FrustumClipper, Plane, ProjectedVertex,
    Rasterizer, RenderTarget, Texture, Vertex, Viewport, DEPTH_CLEAR,
};

const Z_NEAR: f32 = 0.5;
const Z_FAR: f32 = 50.0;
const FOV_Y_DEGREES: f32 = 60.0;
const BACKGROUND: u32 = colors::pack_rgb(16, 16, 24);

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Image file to write (format from the extension)
    #[arg(long, short, value_name = "FILE", default_value = "scene.png")]
    output: PathBuf,

    /// Draw polygon outlines instead of filling
    #[arg(long)]
    wireframe: bool,

    /// Texture for the floor (power-of-two sides); a checkerboard otherwise
    #[arg(long, value_name = "FILE")]
    texture: Option<PathBuf>,

    /// Cut away everything right of this view-space X before rendering
    #[arg(long, value_name = "X", allow_negative_numbers = true)]
    section: Option<f32>,
}

/// A view-space polygon and how to fill it.
struct Polygon {
    name: &'static str,
    mode: FillMode,
    vertices: Vec<Vertex>,
}

fn vertex(x: f32, y: f32, z: f32, uv: (f32, f32), rgba: [f32; 4]) -> Vertex {
    Vertex::new(
        Vec4::point(x, y, z),
        Vec3::UP,
        Vec2::new(uv.0, uv.1),
        Vec4::new(rgba[0], rgba[1], rgba[2], rgba[3]),
    )
}

/// Opaque geometry first, then the blended polygons.
fn scene() -> Vec<Polygon> {
    let grey = [0.9, 0.9, 0.9, 1.0];
    let dark = [0.3, 0.3, 0.35, 1.0];
    vec![
        Polygon {
            name: "floor",
            mode: FillMode::GOURAUD | FillMode::TEXTURE | FillMode::ZBUF,
            // Starts behind the near plane.
            vertices: vec![
                vertex(-4.0, -1.0, 0.1, (0.0, 0.0), grey),
                vertex(4.0, -1.0, 0.1, (8.0, 0.0), grey),
                vertex(4.0, -1.0, 12.0, (8.0, 12.0), dark),
                vertex(-4.0, -1.0, 12.0, (0.0, 12.0), dark),
            ],
        },
        Polygon {
            name: "triangle",
            mode: FillMode::GOURAUD | FillMode::ZBUF,
            vertices: vec![
                vertex(-1.5, -1.0, 4.0, (0.0, 0.0), [1.0, 0.0, 0.0, 1.0]),
                vertex(0.0, 1.5, 4.0, (0.0, 0.0), [0.0, 1.0, 0.0, 1.0]),
                vertex(1.5, -1.0, 5.0, (0.0, 0.0), [0.0, 0.0, 1.0, 1.0]),
            ],
        },
        Polygon {
            name: "glow",
            mode: FillMode::FLAT | FillMode::ADD | FillMode::ZBUF,
            vertices: vec![
                vertex(-2.5, -0.5, 6.0, (0.0, 0.0), [0.1, 0.2, 0.6, 1.0]),
                vertex(-0.5, -0.5, 6.0, (0.0, 0.0), [0.1, 0.2, 0.6, 1.0]),
                vertex(-0.5, 1.0, 6.0, (0.0, 0.0), [0.1, 0.2, 0.6, 1.0]),
                vertex(-2.5, 1.0, 6.0, (0.0, 0.0), [0.1, 0.2, 0.6, 1.0]),
            ],
        },
        Polygon {
            name: "glass",
            mode: FillMode::FLAT | FillMode::ALPHA | FillMode::ZBUF,
            vertices: vec![
                vertex(-0.5, -0.5, 3.0, (0.0, 0.0), [1.0, 0.2, 0.2, 0.5]),
                vertex(1.5, -0.5, 3.0, (0.0, 0.0), [1.0, 0.2, 0.2, 0.5]),
                vertex(1.5, 1.0, 3.0, (0.0, 0.0), [1.0, 0.2, 0.2, 0.5]),
                vertex(-0.5, 1.0, 3.0, (0.0, 0.0), [1.0, 0.2, 0.2, 0.5]),
            ],
        },
    ]
}

/// Left-handed perspective projection of a view-space point (+Z forward).
fn to_clip(p: Vec4, aspect: f32) -> Vec4 {
    let f = 1.0 / (FOV_Y_DEGREES.to_radians() * 0.5).tan();
    Vec4::new(
        p.x * f / aspect,
        p.y * f,
        (p.z * (Z_FAR + Z_NEAR) - 2.0 * Z_FAR * Z_NEAR) / (Z_FAR - Z_NEAR),
        p.z,
    )
}

fn load_texture(path: Option<&PathBuf>) -> anyhow::Result<Texture> {
    match path {
        Some(path) => Texture::from_file(path)
            .with_context(|| format!("failed to load texture {}", path.display())),
        None => Ok(Texture::checker(
            64,
            colors::WHITE,
            colors::pack_rgb(60, 60, 160),
        )?),
    }
}

fn save(pixels: &[u32], width: u32, height: u32, path: &PathBuf) -> anyhow::Result<()> {
    let image = image::RgbaImage::from_fn(width, height, |x, y| {
        let (r, g, b, a) = colors::unpack_rgba(pixels[(y * width + x) as usize]);
        image::Rgba([r as u8, g as u8, b as u8, a as u8])
    });
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "output size must be non-zero"
    );

    let texture = load_texture(args.texture.as_ref())?;
    let mut pixels = vec![BACKGROUND; (args.width * args.height) as usize];
    let mut depth = vec![DEPTH_CLEAR; pixels.len()];

    let framebuffer = FrameBuffer::new(&mut pixels, args.width, args.height)?;
    let mut target = RenderTarget::new(framebuffer)
        .with_depth(&mut depth)?
        .with_texture(&texture);

    let mut rasterizer = Rasterizer::new(args.height);
    let mut clipper = FrustumClipper::new();
    let viewport = Viewport::new(args.width, args.height);
    let aspect = args.width as f32 / args.height as f32;

    let section = args
        .section
        .map(|x| Plane::new(Vec3::new(x, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)));

    let mut cut = Vec::new();
    let mut screen: Vec<ProjectedVertex> = Vec::new();
    let mut drawn = 0;

    for polygon in scene() {
        let mut vertices = polygon.vertices;
        if let Some(plane) = &section {
            if clip_polygon(&mut cut, &vertices, plane) == ClipResult::Outside {
                log::debug!("{}: removed by section plane", polygon.name);
                continue;
            }
            std::mem::swap(&mut vertices, &mut cut);
        }

        for v in &mut vertices {
            v.position = to_clip(v.position, aspect);
        }

        let (result, clipped) = clipper.clip(&vertices);
        log::debug!(
            "{}: frustum clip {:?}, {} -> {} vertices",
            polygon.name,
            result,
            vertices.len(),
            clipped.len()
        );
        if result == ClipResult::Outside {
            continue;
        }

        viewport.project_all(clipped, &mut screen);
        let mode = if args.wireframe {
            FillMode::WIRE | (polygon.mode & FillMode::ZBUF)
        } else {
            polygon.mode
        };
        rasterizer.fill_polygon(&mut target, mode, &screen);
        drawn += 1;
    }

    drop(target);
    save(&pixels, args.width, args.height, &args.output)?;
    log::info!(
        "rendered {drawn} polygons at {}x{} to {}",
        args.width,
        args.height,
        args.output.display()
    );
    Ok(())
}
