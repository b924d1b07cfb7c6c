use std::path::Path;

use crate::colors;
use crate::error::RasterError;

/// Largest texture edge addressable by a 16.16 texture coordinate.
pub const MAX_TEXTURE_SIZE: u32 = 1 << 16;

/// A power-of-two texture bound for texture-mapped fills.
///
/// Wrapping is done with `xmask`/`ymask`, so a coordinate of any magnitude
/// (including negative ones) repeats the image without a division.
pub struct Texture {
    data: Vec<u32>, // ARGB8888, row-major
    width: u32,
    height: u32,
    xshift: u32,
    yshift: u32,
    xmask: u32,
    ymask: u32,
}

impl Texture {
    /// Build a texture from ARGB pixels.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self, RasterError> {
        check_size(width, height)?;
        let required = width as usize * height as usize;
        if data.len() != required {
            return Err(RasterError::TextureDataMismatch {
                required,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            xshift: width.trailing_zeros(),
            yshift: height.trailing_zeros(),
            xmask: width - 1,
            ymask: height - 1,
        })
    }

    // Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                colors::pack_rgba(r as u32, g as u32, b as u32, a as u32)
            })
            .collect();

        Self::from_pixels(width, height, data)
    }

    /// A `size` x `size` checkerboard with 1/8-size cells.
    pub fn checker(size: u32, a: u32, b: u32) -> Result<Self, RasterError> {
        check_size(size, size)?;
        let (side, cell) = (size as usize, (size as usize / 8).max(1));
        let data = (0..side * side)
            .map(|i| {
                let (x, y) = (i % side, i / side);
                if ((x / cell) + (y / cell)) % 2 == 0 {
                    a
                } else {
                    b
                }
            })
            .collect();
        Self::from_pixels(size, size, data)
    }

    /// Nearest-neighbour sample at 16.16 fixed-point coordinates, where
    /// `1 << 16` spans the whole texture once.
    #[inline]
    pub fn sample_fixed(&self, u: i32, v: i32) -> u32 {
        let tx = (u >> (16 - self.xshift)) as u32 & self.xmask;
        let ty = (v >> (16 - self.yshift)) as u32 & self.ymask;
        self.data[((ty << self.xshift) + tx) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Both sides a power of two and no larger than [`MAX_TEXTURE_SIZE`].
fn check_size(width: u32, height: u32) -> Result<(), RasterError> {
    if !width.is_power_of_two() || !height.is_power_of_two() {
        return Err(RasterError::TextureNotPowerOfTwo { width, height });
    }
    if width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
        return Err(RasterError::TextureTooLarge {
            width,
            height,
            max: MAX_TEXTURE_SIZE,
        });
    }
    Ok(())
}
