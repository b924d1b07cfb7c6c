//! Horizontal span filling.
//!
//! Every filled mode is one monomorphized instance of [`fill_polygon`]:
//! the const parameters select Gouraud shading, texturing, blending and
//! depth testing, so the per-pixel loop carries no runtime mode checks.

use crate::colors::{self, blend_add, blend_alpha, mul_channel, pack_rgb};
use crate::render::fixed::{coverage_index, pixel_center};
use crate::render::rasterizer::scanline::{EdgeEntry, EdgeTable};
use crate::render::{ProjectedVertex, RenderTarget};

pub const BLEND_NONE: u8 = 0;
pub const BLEND_ALPHA: u8 = 1;
pub const BLEND_ADD: u8 = 2;

/// Surface colour of a flat-shaded polygon, `(r, g, b, a)`.
pub type FlatColor = (u32, u32, u32, u32);

/// Scan-convert `verts` and fill every covered span.
///
/// Flat-shaded variants take their colour from the first vertex. Does
/// nothing when the mode needs a texture or depth buffer the target lacks.
pub fn fill_polygon<const GOURAUD: bool, const TEXTURE: bool, const BLEND: u8, const ZBUF: bool>(
    edges: &mut EdgeTable,
    target: &mut RenderTarget<'_>,
    verts: &[ProjectedVertex],
) {
    if (TEXTURE && target.texture.is_none()) || (ZBUF && target.depth.is_none()) {
        return;
    }
    let Some(first) = verts.first() else {
        return;
    };
    let flat = (
        first.r.clamp(0, 255) as u32,
        first.g.clamp(0, 255) as u32,
        first.b.clamp(0, 255) as u32,
        first.a.clamp(0, 255) as u32,
    );

    let Some(rows) = edges.scan_polygon(verts, target.color.height()) else {
        return;
    };
    for y in rows {
        let (left, right) = edges.row(y);
        fill_span::<GOURAUD, TEXTURE, BLEND, ZBUF>(target, y, &left, &right, flat);
    }
}

/// Fill row `y` between two edge entries.
///
/// Covers the pixels whose centre lies in `[left.x, right.x)`, clamped to
/// the framebuffer width.
#[inline]
pub fn fill_span<const GOURAUD: bool, const TEXTURE: bool, const BLEND: u8, const ZBUF: bool>(
    target: &mut RenderTarget<'_>,
    y: i32,
    left: &EdgeEntry,
    right: &EdgeEntry,
    flat: FlatColor,
) {
    let RenderTarget {
        color,
        depth,
        texture,
    } = target;

    if y < 0 || y >= color.height() as i32 {
        return;
    }
    let x0 = coverage_index(left.x).max(0);
    let x1 = coverage_index(right.x).min(color.width() as i32);
    if x0 >= x1 {
        return;
    }

    let texture = *texture;
    let row = y as usize * color.stride() as usize;
    let pixels = color.pixels_mut();
    let mut depth = depth.as_deref_mut();

    let step = EdgeEntry::gradient(left, right, right.x - left.x);
    let mut cur = left.advanced(&step, pixel_center(x0) - left.x);

    for x in x0..x1 {
        let frag = cur;
        cur.step(&step);
        let idx = row + x as usize;

        let z = frag.depth();
        if ZBUF {
            match depth.as_deref() {
                Some(buf) if z <= buf[idx] => {}
                _ => continue,
            }
        }

        let (mut r, mut g, mut b, mut a) = if GOURAUD { frag.rgba() } else { flat };

        if TEXTURE {
            let Some(tex) = texture else {
                return;
            };
            let (tr, tg, tb, ta) = colors::unpack_rgba(tex.sample_fixed(frag.u, frag.v));
            r = mul_channel(r, tr);
            g = mul_channel(g, tg);
            b = mul_channel(b, tb);
            a = mul_channel(a, ta);
        }

        pixels[idx] = match BLEND {
            BLEND_ALPHA => blend_alpha(r, g, b, a, pixels[idx]),
            BLEND_ADD => blend_add(r, g, b, pixels[idx]),
            _ => pack_rgb(r, g, b),
        };

        if ZBUF {
            if let Some(buf) = depth.as_deref_mut() {
                buf[idx] = z;
            }
        }
    }
}
