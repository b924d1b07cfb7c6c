//! Polygon clipping.
//!
//! Convex polygons are clipped one plane at a time with the
//! Sutherland-Hodgman algorithm. Two flavours share the same [`Vertex`]
//! and [`ClipResult`] types:
//!
//! - [`plane`]: arbitrary planes given as point + normal, tested with a
//!   signed distance in 3D. Used for cutting geometry in the modeller.
//! - [`frustum`]: the six planes of the canonical clip volume, tested on
//!   homogeneous coordinates (`-w <= x <= w` ...) before the perspective
//!   divide.
//!
//! Both write into a caller-provided `Vec` so the same scratch storage can
//! be reused across polygons; the output length is the clipped vertex count.

pub mod frustum;
pub mod plane;

pub use frustum::{clip_frustum, FrustumClipper, FrustumPlane};
pub use plane::{check_clip_polygon, clip_polygon, Plane};

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A clip-space vertex with every attribute that survives clipping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    /// Homogeneous position (x, y, z, w)
    pub position: Vec4,
    pub normal: Vec3,
    pub texcoord: Vec2,
    /// RGBA, each channel in [0, 1]
    pub color: Vec4,
}

impl Vertex {
    pub fn new(position: Vec4, normal: Vec3, texcoord: Vec2, color: Vec4) -> Self {
        Self {
            position,
            normal,
            texcoord,
            color,
        }
    }

    /// Linearly interpolate all attributes between two vertices.
    /// Used when a polygon edge crosses a clipping plane.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            normal: self.normal.lerp(other.normal, t),
            texcoord: self.texcoord.lerp(other.texcoord, t),
            color: self.color.lerp(other.color, t),
        }
    }
}

/// Outcome of clipping a polygon against one plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipResult {
    /// Entirely on the inside; the output equals the input.
    Inside,
    /// Straddling the plane; new vertices were introduced.
    Clipped,
    /// Entirely on the outside; the output is empty.
    Outside,
}

impl ClipResult {
    /// Integer code: `1` inside, `0` clipped, `-1` outside.
    pub fn code(self) -> i32 {
        match self {
            ClipResult::Inside => 1,
            ClipResult::Clipped => 0,
            ClipResult::Outside => -1,
        }
    }

    /// Combine the results of two successive clip stages.
    pub(crate) fn then(self, next: ClipResult) -> ClipResult {
        match (self, next) {
            (ClipResult::Outside, _) | (_, ClipResult::Outside) => ClipResult::Outside,
            (ClipResult::Inside, ClipResult::Inside) => ClipResult::Inside,
            _ => ClipResult::Clipped,
        }
    }
}

/// Classification of a single edge, shared by both clippers.
#[derive(Clone, Copy, PartialEq, Eq)]
enum EdgeClass {
    BothInside,
    Leaving,
    Entering,
    BothOutside,
}

impl EdgeClass {
    fn new(start_inside: bool, end_inside: bool) -> Self {
        match (start_inside, end_inside) {
            (true, true) => EdgeClass::BothInside,
            (true, false) => EdgeClass::Leaving,
            (false, true) => EdgeClass::Entering,
            (false, false) => EdgeClass::BothOutside,
        }
    }
}

/// Shared Sutherland-Hodgman loop.
///
/// `inside` classifies a vertex and `intersect` builds the vertex where the
/// edge `a -> b` crosses the plane. Vertices are emitted in input order, so
/// a polygon that is fully inside comes out unchanged.
fn clip_with<I, X>(out: &mut Vec<Vertex>, input: &[Vertex], inside: I, intersect: X) -> ClipResult
where
    I: Fn(&Vertex) -> bool,
    X: Fn(&Vertex, &Vertex) -> Vertex,
{
    out.clear();
    let mut edges_clipped = 0;

    for (i, current) in input.iter().enumerate() {
        let next = &input[(i + 1) % input.len()];

        match EdgeClass::new(inside(current), inside(next)) {
            EdgeClass::BothInside => out.push(*current),
            EdgeClass::Leaving => {
                out.push(*current);
                out.push(intersect(current, next));
                edges_clipped += 1;
            }
            EdgeClass::Entering => {
                out.push(intersect(current, next));
                edges_clipped += 1;
            }
            EdgeClass::BothOutside => {}
        }
    }

    if out.is_empty() {
        ClipResult::Outside
    } else if edges_clipped > 0 {
        ClipResult::Clipped
    } else {
        ClipResult::Inside
    }
}

/// Classification without producing output.
fn classify_with<I>(input: &[Vertex], inside: I) -> ClipResult
where
    I: Fn(&Vertex) -> bool,
{
    let inside_count = input.iter().filter(|v| inside(v)).count();
    if inside_count == 0 {
        ClipResult::Outside
    } else if inside_count == input.len() {
        ClipResult::Inside
    } else {
        ClipResult::Clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn result_codes() {
        assert_eq!(ClipResult::Inside.code(), 1);
        assert_eq!(ClipResult::Clipped.code(), 0);
        assert_eq!(ClipResult::Outside.code(), -1);
    }

    #[test]
    fn stage_results_combine() {
        assert_eq!(ClipResult::Inside.then(ClipResult::Inside), ClipResult::Inside);
        assert_eq!(ClipResult::Inside.then(ClipResult::Clipped), ClipResult::Clipped);
        assert_eq!(ClipResult::Clipped.then(ClipResult::Outside), ClipResult::Outside);
    }

    #[test]
    fn empty_input_is_outside() {
        let plane = Plane::new(Vec3::ZERO, Vec3::RIGHT);
        let mut out = vec![Vertex::new(Vec4::ONE, Vec3::UP, Vec2::ZERO, Vec4::ONE)];
        assert_eq!(check_clip_polygon(&[], &plane), ClipResult::Outside);
        assert_eq!(clip_polygon(&mut out, &[], &plane), ClipResult::Outside);
        assert!(out.is_empty());
    }

    #[test]
    fn lerp_interpolates_every_attribute() {
        let a = Vertex::new(
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
        );
        let b = Vertex::new(
            Vec4::new(4.0, 2.0, -2.0, 3.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec2::new(1.0, 0.5),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
        );
        let m = a.lerp(&b, 0.25);
        assert_relative_eq!(m.position.x, 1.0);
        assert_relative_eq!(m.position.y, 0.5);
        assert_relative_eq!(m.position.z, -0.5);
        assert_relative_eq!(m.position.w, 1.5);
        assert_relative_eq!(m.normal.x, 0.25);
        assert_relative_eq!(m.normal.y, 0.75);
        assert_relative_eq!(m.texcoord.x, 0.25);
        assert_relative_eq!(m.texcoord.y, 0.125);
        assert_relative_eq!(m.color.x, 0.75);
        assert_relative_eq!(m.color.z, 0.25);
        assert_relative_eq!(m.color.w, 0.75);
    }
}
