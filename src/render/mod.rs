//! Screen-space rasterization.
//!
//! Everything below works on [`ProjectedVertex`] values: positions already
//! divided by `w`, mapped to the viewport and converted to fixed point.

pub mod fixed;
pub mod framebuffer;
pub mod mode;
pub mod rasterizer;

pub use framebuffer::{FrameBuffer, RenderTarget, DEPTH_CLEAR};
pub use mode::{Blend, FillMode, FillStyle};
pub use rasterizer::{FillRoutine, Rasterizer, FILL_TABLE};

use crate::colors;

/// A vertex ready for scan conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectedVertex {
    /// Screen position, 24.8 fixed point
    pub x: i32,
    pub y: i32,
    /// Texture coordinates, 16.16 fixed point
    pub u: i32,
    pub v: i32,
    /// Colour channels, 0-255
    pub r: i32,
    pub g: i32,
    pub b: i32,
    pub a: i32,
    /// Depth code, 0 (near) to 65535 (far)
    pub z: i32,
}

impl ProjectedVertex {
    /// An opaque white vertex at screen position `(x, y)` in pixels.
    pub fn from_screen(x: f32, y: f32) -> Self {
        Self {
            x: fixed::pos_from_f32(x),
            y: fixed::pos_from_f32(y),
            r: 255,
            g: 255,
            b: 255,
            a: 255,
            ..Self::default()
        }
    }

    pub fn with_rgba(mut self, r: u8, g: u8, b: u8, a: u8) -> Self {
        self.r = r as i32;
        self.g = g as i32;
        self.b = b as i32;
        self.a = a as i32;
        self
    }

    /// Take the colour from a packed ARGB pixel.
    pub fn with_color(self, argb: u32) -> Self {
        let (r, g, b, a) = colors::unpack_rgba(argb);
        self.with_rgba(r as u8, g as u8, b as u8, a as u8)
    }

    /// Texture coordinates where 1.0 spans the texture once.
    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.u = fixed::tex_from_f32(u);
        self.v = fixed::tex_from_f32(v);
        self
    }

    pub fn with_depth(mut self, z: u16) -> Self {
        self.z = z as i32;
        self
    }
}
