//! Clip-space clipping against the homogeneous clip cube.
//!
//! Clipping occurs after projection (in homogeneous clip space), before the
//! perspective divide. The clip volume is defined by:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```
//!
//! Each plane is tested with its own inequality and has its own closed-form
//! intersection parameter, so no plane equation is normalized and no
//! division by `w` happens before the clip.

use super::{clip_with, ClipResult, Vertex};

/// The 6 planes of the canonical clip-space cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrustumPlane {
    /// x >= -w
    Left,
    /// x <= w
    Right,
    /// y >= -w
    Bottom,
    /// y <= w
    Top,
    /// z >= -w
    Near,
    /// z <= w
    Far,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];

    pub fn contains(self, v: &Vertex) -> bool {
        let p = v.position;
        match self {
            Self::Left => p.x >= -p.w,
            Self::Right => p.x <= p.w,
            Self::Bottom => p.y >= -p.w,
            Self::Top => p.y <= p.w,
            Self::Near => p.z >= -p.w,
            Self::Far => p.z <= p.w,
        }
    }

    /// Parameter along `a -> b` where the edge crosses this plane.
    fn intersect(self, a: &Vertex, b: &Vertex) -> f32 {
        let (a, b) = (a.position, b.position);
        match self {
            Self::Left => (-a.w - a.x) / (b.x - a.x + b.w - a.w),
            Self::Right => (a.w - a.x) / (b.x - a.x - b.w + a.w),
            Self::Bottom => (-a.w - a.y) / (b.y - a.y + b.w - a.w),
            Self::Top => (a.w - a.y) / (b.y - a.y - b.w + a.w),
            Self::Near => (-a.w - a.z) / (b.z - a.z + b.w - a.w),
            Self::Far => (a.w - a.z) / (b.z - a.z - b.w + a.w),
        }
    }

    /// Build the crossing vertex, with the clipped coordinate placed
    /// exactly on the plane so that it classifies as inside afterwards.
    fn split(self, a: &Vertex, b: &Vertex) -> Vertex {
        let mut v = a.lerp(b, self.intersect(a, b));
        let p = &mut v.position;
        match self {
            Self::Left => p.x = -p.w,
            Self::Right => p.x = p.w,
            Self::Bottom => p.y = -p.w,
            Self::Top => p.y = p.w,
            Self::Near => p.z = -p.w,
            Self::Far => p.z = p.w,
        }
        v
    }
}

/// Clip a polygon, line or point against a single frustum plane.
///
/// - 1 vertex: copied to `out` when inside; `Inside` or `Outside`.
/// - 2 vertices: the surviving start point and/or the crossing point and
///   surviving end point; `Clipped` whenever a crossing point was emitted.
/// - 3+ vertices: Sutherland-Hodgman, see [`super::clip_polygon`].
pub fn clip_frustum(out: &mut Vec<Vertex>, input: &[Vertex], plane: FrustumPlane) -> ClipResult {
    match input {
        [] => {
            out.clear();
            ClipResult::Outside
        }
        [point] => {
            out.clear();
            if plane.contains(point) {
                out.push(*point);
                ClipResult::Inside
            } else {
                ClipResult::Outside
            }
        }
        [a, b] => {
            out.clear();
            match (plane.contains(a), plane.contains(b)) {
                (true, true) => {
                    out.extend_from_slice(input);
                    ClipResult::Inside
                }
                (true, false) => {
                    out.push(*a);
                    out.push(plane.split(a, b));
                    ClipResult::Clipped
                }
                (false, true) => {
                    out.push(plane.split(a, b));
                    out.push(*b);
                    ClipResult::Clipped
                }
                (false, false) => ClipResult::Outside,
            }
        }
        _ => clip_with(
            out,
            input,
            |v| plane.contains(v),
            |a, b| plane.split(a, b),
        ),
    }
}

/// Clips primitives against all six planes of the clip cube.
///
/// Owns two scratch polygons that are swapped between stages, so clipping a
/// stream of polygons does not allocate once the buffers have grown.
pub struct FrustumClipper {
    front: Vec<Vertex>,
    back: Vec<Vertex>,
}

impl FrustumClipper {
    pub fn new() -> Self {
        Self {
            front: Vec::with_capacity(16),
            back: Vec::with_capacity(16),
        }
    }

    /// Clip `input` against all 6 planes in sequence, each stage consuming
    /// the previous stage's output.
    ///
    /// Returns the combined result and the surviving vertices (empty when
    /// the primitive was entirely outside the clip volume).
    pub fn clip(&mut self, input: &[Vertex]) -> (ClipResult, &[Vertex]) {
        self.front.clear();
        self.front.extend_from_slice(input);

        let mut result = ClipResult::Inside;
        for plane in FrustumPlane::ALL {
            let stage = clip_frustum(&mut self.back, &self.front, plane);
            std::mem::swap(&mut self.front, &mut self.back);
            result = result.then(stage);
            if result == ClipResult::Outside {
                self.front.clear();
                break;
            }
        }

        (result, &self.front)
    }
}

impl Default for FrustumClipper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::math::vec3::Vec3;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;

    fn vertex(x: f32, y: f32, z: f32, w: f32, u: f32, v: f32) -> Vertex {
        Vertex::new(
            Vec4::new(x, y, z, w),
            Vec3::FORWARD,
            Vec2::new(u, v),
            Vec4::new(u, v, 1.0, 1.0),
        )
    }

    fn inner_triangle() -> Vec<Vertex> {
        vec![
            vertex(-0.5, -0.5, 0.0, 1.0, 0.0, 0.0),
            vertex(0.5, -0.5, 0.25, 1.0, 1.0, 0.0),
            vertex(0.0, 0.5, -0.25, 1.0, 0.5, 1.0),
        ]
    }

    #[test]
    fn inside_polygon_passes_all_six_planes_unchanged() {
        let tri = inner_triangle();
        for plane in FrustumPlane::ALL {
            let mut out = Vec::new();
            assert_eq!(clip_frustum(&mut out, &tri, plane), ClipResult::Inside);
            assert_eq!(out, tri);
        }

        let mut clipper = FrustumClipper::new();
        let (result, out) = clipper.clip(&tri);
        assert_eq!(result, ClipResult::Inside);
        assert_eq!(out, tri.as_slice());
    }

    #[test]
    fn near_plane_cut_makes_pentagon_with_blended_uvs() {
        // Square in x/y, tilted in z so that the corner at index 2 lies
        // behind the near plane (z < -w) and both adjacent edges cross it.
        let square = vec![
            vertex(-0.5, -0.5, 0.0, 1.0, 0.0, 0.0),
            vertex(0.5, -0.5, -0.5, 1.0, 1.0, 0.0),
            vertex(0.5, 0.5, -3.0, 1.0, 1.0, 1.0),
            vertex(-0.5, 0.5, -0.5, 1.0, 0.0, 1.0),
        ];
        let mut out = Vec::new();
        assert_eq!(
            clip_frustum(&mut out, &square, FrustumPlane::Near),
            ClipResult::Clipped
        );
        assert_eq!(out.len(), 5);

        // Edge 1 -> 2: z goes -0.5 -> -3.0, crossing z = -1 at t = 0.2
        let t = FrustumPlane::Near.intersect(&square[1], &square[2]);
        assert_relative_eq!(t, 0.2, epsilon = 1e-6);
        let a = out[2];
        assert_relative_eq!(a.position.z, -1.0);
        assert_relative_eq!(a.texcoord.x, 1.0);
        assert_relative_eq!(a.texcoord.y, 0.0 + t * (1.0 - 0.0), epsilon = 1e-6);

        // Edge 2 -> 3: z goes -3.0 -> -0.5, crossing at t = 0.8
        let t = FrustumPlane::Near.intersect(&square[2], &square[3]);
        assert_relative_eq!(t, 0.8, epsilon = 1e-6);
        let b = out[3];
        assert_relative_eq!(b.position.z, -1.0);
        assert_relative_eq!(b.texcoord.x, 1.0 + t * (0.0 - 1.0), epsilon = 1e-6);
        assert_relative_eq!(b.texcoord.y, 1.0);
    }

    #[test]
    fn every_plane_interpolates_at_its_own_crossing() {
        let start = Vertex::new(
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec3::FORWARD,
            Vec2::new(0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
        );
        // Each end point lies outside its plane only.
        let cases = [
            (FrustumPlane::Left, Vec4::new(-4.0, 0.3, 0.2, 2.0)),
            (FrustumPlane::Right, Vec4::new(5.0, -0.3, 0.1, 2.0)),
            (FrustumPlane::Bottom, Vec4::new(0.2, -3.0, 0.4, 1.5)),
            (FrustumPlane::Top, Vec4::new(-0.2, 6.0, 0.3, 3.0)),
            (FrustumPlane::Near, Vec4::new(0.1, 0.2, -4.0, 2.0)),
            (FrustumPlane::Far, Vec4::new(0.3, -0.1, 5.0, 2.5)),
        ];

        for (plane, end_position) in cases {
            let end = Vertex::new(
                end_position,
                Vec3::FORWARD,
                Vec2::new(1.0, 2.0),
                Vec4::new(0.0, 1.0, 0.0, 0.0),
            );
            // Distance to the plane along the inside direction.
            let distance = |p: Vec4| match plane {
                FrustumPlane::Left => p.x + p.w,
                FrustumPlane::Right => p.w - p.x,
                FrustumPlane::Bottom => p.y + p.w,
                FrustumPlane::Top => p.w - p.y,
                FrustumPlane::Near => p.z + p.w,
                FrustumPlane::Far => p.w - p.z,
            };
            let (d0, d1) = (distance(start.position), distance(end.position));
            assert!(d0 > 0.0 && d1 < 0.0, "plane {plane:?}");
            let t = d0 / (d0 - d1);

            let mut out = Vec::new();
            assert_eq!(
                clip_frustum(&mut out, &[start, end], plane),
                ClipResult::Clipped,
                "plane {plane:?}"
            );
            assert_eq!(out.len(), 2);
            assert_eq!(out[0], start);

            let cut = out[1];
            assert_relative_eq!(cut.texcoord.x, t, epsilon = 1e-5);
            assert_relative_eq!(cut.texcoord.y, 2.0 * t, epsilon = 1e-5);
            assert_relative_eq!(cut.color.x, 1.0 - t, epsilon = 1e-5);
            assert_relative_eq!(cut.color.y, t, epsilon = 1e-5);
            assert_relative_eq!(cut.position.w, 1.0 + t * (end_position.w - 1.0), epsilon = 1e-5);
            assert_relative_eq!(distance(cut.position), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn frustum_clip_is_idempotent() {
        let tri = vec![
            vertex(-2.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            vertex(0.7, -0.3, 0.1, 1.3, 1.0, 0.0),
            vertex(0.2, 3.0, -0.4, 0.9, 0.0, 1.0),
        ];
        for plane in FrustumPlane::ALL {
            let mut once = Vec::new();
            let mut twice = Vec::new();
            let first = clip_frustum(&mut once, &tri, plane);
            let second = clip_frustum(&mut twice, &once, plane);
            assert_eq!(once, twice, "plane {plane:?}");
            if first != ClipResult::Outside {
                assert_eq!(second, ClipResult::Inside, "plane {plane:?}");
            }
        }
    }

    #[test]
    fn clipper_output_lies_inside_every_plane() {
        let tri = vec![
            vertex(-3.0, -3.0, 0.0, 1.0, 0.0, 0.0),
            vertex(3.0, -3.0, 0.0, 1.0, 1.0, 0.0),
            vertex(0.0, 3.0, 0.0, 1.0, 0.5, 1.0),
        ];
        let mut clipper = FrustumClipper::new();
        let (result, out) = clipper.clip(&tri);
        assert_eq!(result, ClipResult::Clipped);
        assert!(out.len() >= 3);
        for v in out {
            let p = v.position;
            let limit = p.w + 1e-5;
            assert!(p.x.abs() <= limit && p.y.abs() <= limit && p.z.abs() <= limit, "{v:?}");
        }
    }

    #[test]
    fn polygon_outside_one_plane_is_rejected() {
        let tri = vec![
            vertex(2.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            vertex(3.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            vertex(2.5, 0.5, 0.0, 1.0, 0.0, 0.0),
        ];
        let mut clipper = FrustumClipper::new();
        let (result, out) = clipper.clip(&tri);
        assert_eq!(result, ClipResult::Outside);
        assert!(out.is_empty());
    }

    #[test]
    fn points_are_classified_only() {
        let mut out = Vec::new();
        let inside = [vertex(0.0, 0.0, 0.0, 1.0, 0.0, 0.0)];
        let outside = [vertex(0.0, 0.0, 2.0, 1.0, 0.0, 0.0)];
        assert_eq!(clip_frustum(&mut out, &inside, FrustumPlane::Far), ClipResult::Inside);
        assert_eq!(out.len(), 1);
        assert_eq!(clip_frustum(&mut out, &outside, FrustumPlane::Far), ClipResult::Outside);
        assert!(out.is_empty());
    }

    #[test]
    fn lines_keep_surviving_endpoint_and_crossing() {
        let line = [
            vertex(0.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            vertex(3.0, 0.0, 0.0, 1.0, 1.0, 0.0),
        ];
        let mut out = Vec::new();
        assert_eq!(clip_frustum(&mut out, &line, FrustumPlane::Right), ClipResult::Clipped);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], line[0]);
        assert_relative_eq!(out[1].position.x, 1.0);
        assert_relative_eq!(out[1].texcoord.x, 1.0 / 3.0, epsilon = 1e-6);

        let reversed = [line[1], line[0]];
        assert_eq!(clip_frustum(&mut out, &reversed, FrustumPlane::Right), ClipResult::Clipped);
        assert_relative_eq!(out[0].position.x, 1.0);
        assert_eq!(out[1], line[0]);

        let outside = [line[1], line[1]];
        assert_eq!(clip_frustum(&mut out, &outside, FrustumPlane::Right), ClipResult::Outside);
        assert!(out.is_empty());
    }
}
