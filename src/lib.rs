//! A software polygon clipper and scan-conversion rasterizer.
//!
//! Polygons travel through three stages, all on the CPU:
//!
//! 1. clip-space [`Vertex`] polygons are clipped against the view frustum
//!    ([`FrustumClipper`]) or any plane ([`clip_polygon`]);
//! 2. a [`Viewport`] projects the result to fixed-point screen vertices;
//! 3. a [`Rasterizer`] fills them into a caller-owned ARGB8888 buffer in one
//!    of the [`FillMode`] combinations (flat or Gouraud shading, optional
//!    texture, alpha or additive blending, optional depth test).
//!
//! # Quick Start
//!
//! ```ignore
//! use gawfill::prelude::*;
//!
//! let mut pixels = vec![0u32; 320 * 200];
//! let mut target = RenderTarget::new(FrameBuffer::new(&mut pixels, 320, 200)?);
//! let mut rasterizer = Rasterizer::new(200);
//! rasterizer.fill_polygon(&mut target, FillMode::FLAT, &screen_vertices);
//! ```

pub mod clipper;
pub mod colors;
pub mod error;
pub mod math;
pub mod projection;
pub mod render;
pub mod texture;

pub use clipper::{
    check_clip_polygon, clip_frustum, clip_polygon, ClipResult, FrustumClipper, FrustumPlane,
    Plane, Vertex,
};
pub use error::RasterError;
pub use projection::Viewport;
pub use render::{
    Blend, FillMode, FillRoutine, FillStyle, FrameBuffer, ProjectedVertex, Rasterizer,
    RenderTarget, DEPTH_CLEAR, FILL_TABLE,
};
pub use texture::Texture;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use gawfill::prelude::*;
/// ```
pub mod prelude {
    // Clipping
    pub use crate::clipper::{ClipResult, FrustumClipper, Plane, Vertex};

    // Projection
    pub use crate::projection::Viewport;

    // Math
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::{
        FillMode, FrameBuffer, ProjectedVertex, Rasterizer, RenderTarget, DEPTH_CLEAR,
    };
    pub use crate::texture::Texture;

    pub use crate::error::RasterError;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::rasterizer::scanline::EdgeTable;
    pub use crate::render::rasterizer::span::fill_polygon;
}
