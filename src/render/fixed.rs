//! Fixed-point formats used between projection and pixel writes.
//!
//! - screen positions: 24.8 signed (1/256 pixel)
//! - texture coordinates: 16.16 signed, `1 << 16` = one texture repeat
//! - colour channels while interpolating: 0-255 with [`COLOR_SHIFT`] extra bits
//! - depth while interpolating: 0-65535 with [`DEPTH_SHIFT`] extra bits

pub const POS_SHIFT: u32 = 8;
pub const POS_ONE: i32 = 1 << POS_SHIFT;
pub const POS_HALF: i32 = POS_ONE / 2;

pub const TEX_SHIFT: u32 = 16;
pub const TEX_ONE: i32 = 1 << TEX_SHIFT;

/// Extra precision bits for interpolated colours. Raise it if gradients on
/// large polygons show banding.
pub const COLOR_SHIFT: u32 = 12;

pub const DEPTH_SHIFT: u32 = 8;
pub const DEPTH_MAX: u32 = 0xFFFF;

/// Convert a screen coordinate in pixels to 24.8.
#[inline]
pub fn pos_from_f32(v: f32) -> i32 {
    (v * POS_ONE as f32).round() as i32
}

/// Convert a texture coordinate to 16.16.
#[inline]
pub fn tex_from_f32(v: f32) -> i32 {
    (v * TEX_ONE as f32).round() as i32
}

/// Integer pixel containing a 24.8 position.
#[inline]
pub const fn pixel_of(pos: i32) -> i32 {
    pos >> POS_SHIFT
}

/// 24.8 position of the centre of pixel `index`.
#[inline]
pub const fn pixel_center(index: i32) -> i32 {
    (index << POS_SHIFT) + POS_HALF
}

/// First pixel whose centre lies at or after `pos`.
///
/// A run from `a` to `b` covers the pixels `coverage_index(a)..coverage_index(b)`,
/// so shared edges between neighbouring polygons are drawn exactly once.
#[inline]
pub const fn coverage_index(pos: i32) -> i32 {
    (pos + POS_HALF - 1) >> POS_SHIFT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_round_to_nearest() {
        assert_eq!(pos_from_f32(1.5), 384);
        assert_eq!(pos_from_f32(-0.25), -64);
        assert_eq!(tex_from_f32(0.5), 0x8000);
        assert_eq!(pixel_of(pos_from_f32(3.9)), 3);
        assert_eq!(pixel_of(-1), -1);
    }

    #[test]
    fn coverage_uses_pixel_centres() {
        // Centre of pixel 2 is 2.5
        assert_eq!(coverage_index(pos_from_f32(2.5)), 2);
        assert_eq!(coverage_index(pos_from_f32(2.51)), 3);
        assert_eq!(coverage_index(pos_from_f32(2.0)), 2);
        assert_eq!(coverage_index(pos_from_f32(1.6)), 2);
        assert_eq!(coverage_index(pos_from_f32(-0.6)), -1);
        assert_eq!(pixel_center(2), pos_from_f32(2.5));
    }
}
