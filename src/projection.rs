//! Clip space to screen space.
//!
//! The [`Viewport`] maps a clipped [`Vertex`] through the perspective
//! divide onto a pixel rectangle and converts its attributes to the
//! fixed-point formats the rasterizer consumes.

use crate::clipper::Vertex;
use crate::colors::channel_from_f32;
use crate::render::fixed::{pos_from_f32, tex_from_f32, DEPTH_MAX};
use crate::render::ProjectedVertex;

/// A pixel rectangle that normalized device coordinates are mapped onto.
///
/// NDC `x = -1` maps to the left edge, `y = +1` to the top edge, and NDC
/// `z` in `[-1, 1]` to depth codes `0..=65535`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// A viewport covering a whole `width` x `height` output.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Project one clip-space vertex. Returns `None` when `w` is zero.
    pub fn project(&self, vertex: &Vertex) -> Option<ProjectedVertex> {
        let ndc = vertex.position.perspective_divide()?;

        let sx = self.x + (ndc.x + 1.0) * 0.5 * self.width;
        let sy = self.y + (1.0 - ndc.y) * 0.5 * self.height;
        let depth = ((ndc.z + 1.0) * 0.5 * DEPTH_MAX as f32)
            .round()
            .clamp(0.0, DEPTH_MAX as f32);

        let c = vertex.color;
        Some(ProjectedVertex {
            x: pos_from_f32(sx),
            y: pos_from_f32(sy),
            u: tex_from_f32(vertex.texcoord.x),
            v: tex_from_f32(vertex.texcoord.y),
            r: channel_from_f32(c.x) as i32,
            g: channel_from_f32(c.y) as i32,
            b: channel_from_f32(c.z) as i32,
            a: channel_from_f32(c.w) as i32,
            z: depth as i32,
        })
    }

    /// Project a clipped polygon into `out`, replacing its contents.
    ///
    /// Vertices with `w == 0` are dropped; the frustum clipper never emits
    /// them.
    pub fn project_all(&self, vertices: &[Vertex], out: &mut Vec<ProjectedVertex>) {
        out.clear();
        out.extend(vertices.iter().filter_map(|v| self.project(v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{vec2::Vec2, vec3::Vec3, vec4::Vec4};
    use crate::render::fixed::POS_ONE;
    use approx::assert_relative_eq;

    fn vertex(x: f32, y: f32, z: f32, w: f32) -> Vertex {
        Vertex::new(Vec4::new(x, y, z, w), Vec3::FORWARD, Vec2::ZERO, Vec4::ONE)
    }

    #[test]
    fn corners_map_to_viewport_edges() {
        let vp = Viewport::new(320, 200);
        let top_left = vp.project(&vertex(-1.0, 1.0, -1.0, 1.0)).unwrap();
        assert_eq!((top_left.x, top_left.y, top_left.z), (0, 0, 0));

        let bottom_right = vp.project(&vertex(2.0, -2.0, 2.0, 2.0)).unwrap();
        assert_eq!(bottom_right.x, 320 * POS_ONE);
        assert_eq!(bottom_right.y, 200 * POS_ONE);
        assert_eq!(bottom_right.z, DEPTH_MAX as i32);
    }

    #[test]
    fn perspective_divide_scales_toward_centre() {
        let vp = Viewport::new(100, 100);
        let near = vp.project(&vertex(0.5, 0.0, 0.0, 1.0)).unwrap();
        let far = vp.project(&vertex(0.5, 0.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(near.x as f32 / POS_ONE as f32, 75.0);
        assert_relative_eq!(far.x as f32 / POS_ONE as f32, 56.25);
        assert_eq!(near.y, 50 * POS_ONE);
    }

    #[test]
    fn attributes_are_converted_to_fixed_point() {
        let vp = Viewport::new(10, 10);
        let v = Vertex::new(
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec3::FORWARD,
            Vec2::new(0.25, 2.0),
            Vec4::new(1.0, 0.5, 0.0, 1.0),
        );
        let p = vp.project(&v).unwrap();
        assert_eq!((p.u, p.v), (0x4000, 0x20000));
        assert_eq!((p.r, p.g, p.b, p.a), (255, 128, 0, 255));
        assert_eq!(p.z, 32768);
    }

    #[test]
    fn offset_viewport_and_degenerate_w() {
        let vp = Viewport {
            x: 16.0,
            y: 8.0,
            ..Viewport::new(64, 32)
        };
        let centre = vp.project(&vertex(0.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!((centre.x, centre.y), (48 * POS_ONE, 24 * POS_ONE));
        assert!(vp.project(&vertex(1.0, 1.0, 1.0, 0.0)).is_none());

        let mut out = vec![ProjectedVertex::default(); 3];
        vp.project_all(&[vertex(0.0, 0.0, 0.0, 1.0), vertex(1.0, 0.0, 0.0, 0.0)], &mut out);
        assert_eq!(out, vec![centre]);
    }
}
