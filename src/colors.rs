//! Packed ARGB8888 pixel helpers.
//!
//! Every surface in the crate (framebuffer and texture) stores pixels as
//! `0xAARRGGBB`. Channel math is done on `u32` values in `0..=255`.

pub const BLACK: u32 = 0xFF000000;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const RED: u32 = 0xFFFF0000;
pub const GREEN: u32 = 0xFF00FF00;
pub const BLUE: u32 = 0xFF0000FF;

/// Pack an opaque pixel.
#[inline]
pub const fn pack_rgb(r: u32, g: u32, b: u32) -> u32 {
    0xFF000000 | (r << 16) | (g << 8) | b
}

#[inline]
pub const fn pack_rgba(r: u32, g: u32, b: u32, a: u32) -> u32 {
    (a << 24) | (r << 16) | (g << 8) | b
}

/// Split a pixel into `(r, g, b, a)`.
#[inline]
pub const fn unpack_rgba(pixel: u32) -> (u32, u32, u32, u32) {
    (
        (pixel >> 16) & 0xFF,
        (pixel >> 8) & 0xFF,
        pixel & 0xFF,
        pixel >> 24,
    )
}

/// Multiply two 0-255 channels, treating 255 as one.
#[inline]
pub const fn mul_channel(a: u32, b: u32) -> u32 {
    (a * b + 127) / 255
}

/// Alpha-blend `src` over the `dst` pixel using `alpha` in `0..=255`.
///
/// Each channel is `(src * alpha + dst * (255 - alpha)) / 255`, so
/// `(255, 0, 0)` at alpha 128 over white gives `(255, 127, 127)`.
/// The result is opaque.
#[inline]
pub const fn blend_alpha(r: u32, g: u32, b: u32, alpha: u32, dst: u32) -> u32 {
    let (dr, dg, db, _) = unpack_rgba(dst);
    let inv = 255 - alpha;
    pack_rgb(
        (r * alpha + dr * inv) / 255,
        (g * alpha + dg * inv) / 255,
        (b * alpha + db * inv) / 255,
    )
}

/// Additive blend with per-channel saturation.
#[inline]
pub fn blend_add(r: u32, g: u32, b: u32, dst: u32) -> u32 {
    let (dr, dg, db, _) = unpack_rgba(dst);
    pack_rgb((r + dr).min(255), (g + dg).min(255), (b + db).min(255))
}

/// Convert a `[0, 1]` float channel to `0..=255`, rounding to nearest.
#[inline]
pub fn channel_from_f32(c: f32) -> u32 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_are_consistent() {
        let pixel = pack_rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(pixel, 0x78123456);
        assert_eq!(unpack_rgba(pixel), (0x12, 0x34, 0x56, 0x78));
        assert_eq!(pack_rgb(255, 0, 0), RED);
    }

    #[test]
    fn half_alpha_red_over_white() {
        assert_eq!(blend_alpha(255, 0, 0, 128, WHITE), pack_rgb(255, 127, 127));
    }

    #[test]
    fn alpha_extremes_select_source_or_destination() {
        assert_eq!(blend_alpha(10, 20, 30, 255, WHITE), pack_rgb(10, 20, 30));
        assert_eq!(blend_alpha(10, 20, 30, 0, BLUE), BLUE);
    }

    #[test]
    fn additive_blend_saturates() {
        assert_eq!(blend_add(200, 10, 0, pack_rgb(100, 10, 0)), pack_rgb(255, 20, 0));
    }

    #[test]
    fn channel_multiply_keeps_identity() {
        assert_eq!(mul_channel(255, 77), 77);
        assert_eq!(mul_channel(0, 200), 0);
        assert_eq!(mul_channel(128, 128), 64);
    }
}
