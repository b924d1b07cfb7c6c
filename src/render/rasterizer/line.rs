//! Integer DDA line drawing, used by the wireframe modes and for polygons
//! too small to fill.

use crate::colors::pack_rgb;
use crate::render::fixed::{pixel_of, DEPTH_SHIFT};
use crate::render::rasterizer::scanline::EdgeTable;
use crate::render::{ProjectedVertex, RenderTarget};

/// Draw a line from `a` to `b` in the colour of `a`.
///
/// Endpoints are truncated to whole pixels and both are drawn, so a line
/// writes `max(|dx|, |dy|) + 1` pixels. The minor axis advances only when
/// the error term reaches zero. With `ZBUF`, depth is interpolated along
/// the major axis and a pixel is written iff its depth is `<=` the stored
/// value. Pixels outside the framebuffer are skipped.
pub fn draw_line<const ZBUF: bool>(
    target: &mut RenderTarget<'_>,
    a: &ProjectedVertex,
    b: &ProjectedVertex,
) {
    let RenderTarget { color, depth, .. } = target;
    let mut depth = depth.as_deref_mut();
    if ZBUF && depth.is_none() {
        return;
    }

    let ink = pack_rgb(
        a.r.clamp(0, 255) as u32,
        a.g.clamp(0, 255) as u32,
        a.b.clamp(0, 255) as u32,
    );

    let (mut x, mut y) = (pixel_of(a.x), pixel_of(a.y));
    let (x1, y1) = (pixel_of(b.x), pixel_of(b.y));
    let (dx, dy) = ((x1 - x).abs(), (y1 - y).abs());
    let x_inc = if x1 >= x { 1 } else { -1 };
    let y_inc = if y1 >= y { 1 } else { -1 };

    let (major, minor) = if dx > dy { (dx, dy) } else { (dy, dx) };
    let mut error = minor * 2 - major;

    let mut z = (a.z as i64) << DEPTH_SHIFT;
    let dz = if major > 0 {
        (((b.z - a.z) as i64) << DEPTH_SHIFT) / major as i64
    } else {
        0
    };

    for _ in 0..=major {
        if let Some(idx) = color.index(x, y) {
            let incoming = (z >> DEPTH_SHIFT).max(0) as u32;
            let visible = !ZBUF
                || match depth.as_deref_mut() {
                    Some(buf) if incoming <= buf[idx] => {
                        buf[idx] = incoming;
                        true
                    }
                    _ => false,
                };
            if visible {
                color.set_pixel(x, y, ink);
            }
        }

        if error >= 0 {
            error -= major * 2;
            if dx > dy {
                y += y_inc;
            } else {
                x += x_inc;
            }
        }
        error += minor * 2;
        if dx > dy {
            x += x_inc;
        } else {
            y += y_inc;
        }
        z += dz;
    }
}

/// Outline a polygon with lines.
///
/// One or two vertices draw a single line (a point for one vertex).
pub fn wire<const ZBUF: bool>(
    _edges: &mut EdgeTable,
    target: &mut RenderTarget<'_>,
    verts: &[ProjectedVertex],
) {
    match verts {
        [] => {}
        [v] => draw_line::<ZBUF>(target, v, v),
        [a, b] => draw_line::<ZBUF>(target, a, b),
        _ => {
            for (i, a) in verts.iter().enumerate() {
                let b = &verts[(i + 1) % verts.len()];
                draw_line::<ZBUF>(target, a, b);
            }
        }
    }
}
