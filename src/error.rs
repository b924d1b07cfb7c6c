//! Errors reported while binding surfaces to the rasterizer.
//!
//! Drawing itself never fails: all checks happen once, when a
//! [`FrameBuffer`](crate::render::FrameBuffer), a
//! [`RenderTarget`](crate::render::RenderTarget) or a
//! [`Texture`](crate::texture::Texture) is constructed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    /// Row stride shorter than the visible width.
    #[error("row stride {stride} is smaller than width {width}")]
    InvalidStride { width: u32, stride: u32 },

    /// Colour buffer does not cover `width x height` at the given stride.
    #[error("color buffer holds {actual} pixels, {required} required")]
    ColorBufferTooSmall { required: usize, actual: usize },

    /// Depth buffer does not match the colour buffer layout.
    #[error("depth buffer holds {actual} entries, {required} required")]
    DepthBufferTooSmall { required: usize, actual: usize },

    /// Texture dimensions must be powers of two for mask wrapping.
    #[error("texture size {width}x{height} is not a power of two")]
    TextureNotPowerOfTwo { width: u32, height: u32 },

    /// Texture wider or taller than 16.16 coordinates can address.
    #[error("texture size {width}x{height} exceeds {max}x{max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },

    /// Pixel data length does not match the texture dimensions.
    #[error("texture data holds {actual} pixels, {required} required")]
    TextureDataMismatch { required: usize, actual: usize },

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
