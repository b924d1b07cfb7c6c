//! Borrowed views of the caller's pixel and depth buffers.
//!
//! The display layer owns the memory. The rasterizer only borrows it for a
//! batch of draw calls through a [`RenderTarget`], whose sizes are checked
//! once, at construction, so the fill loops can index rows and columns
//! without re-validating every pixel.

use crate::error::RasterError;
use crate::texture::Texture;

/// Initial value for a depth buffer: every incoming depth passes the test.
pub const DEPTH_CLEAR: u32 = u32::MAX;

/// A view into an ARGB8888 colour buffer with an explicit row stride.
pub struct FrameBuffer<'a> {
    pixels: &'a mut [u32],
    width: u32,
    height: u32,
    stride: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Wrap a tightly packed buffer (`stride == width`).
    pub fn new(pixels: &'a mut [u32], width: u32, height: u32) -> Result<Self, RasterError> {
        Self::with_stride(pixels, width, height, width)
    }

    /// Wrap a buffer whose rows are `stride` pixels apart.
    pub fn with_stride(
        pixels: &'a mut [u32],
        width: u32,
        height: u32,
        stride: u32,
    ) -> Result<Self, RasterError> {
        if stride < width {
            return Err(RasterError::InvalidStride { width, stride });
        }
        let required = required_len(width, height, stride);
        if pixels.len() < required {
            return Err(RasterError::ColorBufferTooSmall {
                required,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Buffer index of `(x, y)`, or `None` outside the visible area.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.stride as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set a pixel, silently ignoring out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill the visible area, leaving any stride padding alone.
    pub fn clear(&mut self, color: u32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (width, stride) = (self.width as usize, self.stride as usize);
        for row in self.pixels.chunks_mut(stride).take(self.height as usize) {
            row[..width].fill(color);
        }
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels[..]
    }
}

fn required_len(width: u32, height: u32, stride: u32) -> usize {
    if width == 0 || height == 0 {
        0
    } else {
        (height as usize - 1) * stride as usize + width as usize
    }
}

/// Everything a draw call writes to or reads from.
///
/// The depth buffer, when present, shares the colour buffer's layout
/// (same width, height and stride). Depth codes are `0..=65535`, smaller
/// is nearer; clear it to [`DEPTH_CLEAR`] before a frame.
pub struct RenderTarget<'a> {
    pub(crate) color: FrameBuffer<'a>,
    pub(crate) depth: Option<&'a mut [u32]>,
    pub(crate) texture: Option<&'a Texture>,
}

impl<'a> RenderTarget<'a> {
    pub fn new(color: FrameBuffer<'a>) -> Self {
        Self {
            color,
            depth: None,
            texture: None,
        }
    }

    /// Bind a depth buffer laid out like the colour buffer.
    pub fn with_depth(mut self, depth: &'a mut [u32]) -> Result<Self, RasterError> {
        let required = required_len(self.color.width, self.color.height, self.color.stride);
        if depth.len() < required {
            return Err(RasterError::DepthBufferTooSmall {
                required,
                actual: depth.len(),
            });
        }
        self.depth = Some(depth);
        Ok(self)
    }

    /// Bind the texture sampled by textured fill modes.
    pub fn with_texture(mut self, texture: &'a Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Swap the bound texture, e.g. on a material change.
    pub fn bind_texture(&mut self, texture: Option<&'a Texture>) {
        self.texture = texture;
    }

    pub fn framebuffer(&self) -> &FrameBuffer<'a> {
        &self.color
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<'a> {
        &mut self.color
    }

    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Reset the bound depth buffer to [`DEPTH_CLEAR`].
    pub fn clear_depth(&mut self) {
        if let Some(depth) = self.depth.as_deref_mut() {
            depth.fill(DEPTH_CLEAR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    #[test]
    fn rejects_short_buffers_and_strides() {
        let mut pixels = vec![0u32; 10 * 10 - 1];
        assert!(matches!(
            FrameBuffer::new(&mut pixels, 10, 10),
            Err(RasterError::ColorBufferTooSmall {
                required: 100,
                actual: 99
            })
        ));
        assert!(matches!(
            FrameBuffer::with_stride(&mut pixels, 10, 5, 8),
            Err(RasterError::InvalidStride { .. })
        ));
    }

    #[test]
    fn last_row_may_omit_stride_padding() {
        // 3 rows of 4 pixels, 6 apart: 2 * 6 + 4
        let mut pixels = vec![0u32; 16];
        let fb = FrameBuffer::with_stride(&mut pixels, 4, 3, 6).unwrap();
        assert_eq!(fb.index(3, 2), Some(15));
        assert_eq!(fb.index(4, 2), None);
    }

    #[test]
    fn clear_skips_padding() {
        let mut pixels = vec![0u32; 12];
        let mut fb = FrameBuffer::with_stride(&mut pixels, 2, 2, 6).unwrap();
        fb.clear(colors::RED);
        assert_eq!(fb.get_pixel(1, 1), Some(colors::RED));
        assert_eq!(pixels[2], 0);
        assert_eq!(pixels[6], colors::RED);
    }

    #[test]
    fn empty_buffers_clear_to_nothing() {
        let mut none: [u32; 0] = [];
        let mut fb = FrameBuffer::new(&mut none, 0, 4).unwrap();
        fb.clear(colors::RED);
        assert_eq!(fb.get_pixel(0, 0), None);

        let mut pixels = vec![0u32; 4];
        let mut fb = FrameBuffer::new(&mut pixels, 4, 0).unwrap();
        fb.clear(colors::RED);
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut pixels = vec![0u32; 4];
        let mut fb = FrameBuffer::new(&mut pixels, 2, 2).unwrap();
        fb.set_pixel(-1, 0, colors::WHITE);
        fb.set_pixel(2, 0, colors::WHITE);
        assert_eq!(fb.get_pixel(0, 2), None);
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn depth_buffer_must_match_layout() {
        let mut pixels = vec![0u32; 16];
        let mut depth = vec![0u32; 15];
        let fb = FrameBuffer::new(&mut pixels, 4, 4).unwrap();
        assert!(matches!(
            RenderTarget::new(fb).with_depth(&mut depth),
            Err(RasterError::DepthBufferTooSmall { .. })
        ));
    }
}
