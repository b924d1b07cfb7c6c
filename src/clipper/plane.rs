//! Clipping against arbitrary planes.
//!
//! Planes are defined by a point and a normal in 3D. Only `x, y, z` of the
//! vertex position take part in the distance test; `w` is interpolated like
//! every other attribute.

use super::{classify_with, clip_with, ClipResult, Vertex};
use crate::math::vec3::Vec3;

/// Below this `|n . dir|` an edge is considered parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Relative slack of the containment test, scaled by `|n|` and the
/// distance from the plane point.
const CONTAINS_EPSILON: f32 = 1e-5;

/// A plane defined by a point on the plane and its normal vector.
/// The normal points toward the "inside" (kept) half-space.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Returns the signed distance from a point to this plane.
    /// Positive = inside (same side as normal), Negative = outside.
    pub fn signed_distance(&self, position: Vec3) -> f32 {
        (position - self.point).dot(self.normal)
    }

    /// A vertex on the plane up to float rounding counts as inside, so
    /// that crossing points built by [`Plane::split`] survive a second pass.
    fn contains(&self, v: &Vertex) -> bool {
        let offset = v.position.to_vec3() - self.point;
        let slack = CONTAINS_EPSILON * self.normal.magnitude() * (1.0 + offset.magnitude());
        offset.dot(self.normal) >= -slack
    }

    /// Parameter along `a -> b` where the segment meets the plane.
    ///
    /// An edge (nearly) parallel to the plane yields `0.0`, i.e. the
    /// intersection collapses onto `a`.
    fn intersect(&self, a: &Vertex, b: &Vertex) -> f32 {
        let origin = a.position.to_vec3();
        let dir = b.position.to_vec3() - origin;

        let ndotdir = self.normal.dot(dir);
        if ndotdir.abs() < PARALLEL_EPSILON {
            return 0.0;
        }
        self.normal.dot(self.point - origin) / ndotdir
    }

    /// Build the crossing vertex and project its position onto the plane.
    fn split(&self, a: &Vertex, b: &Vertex) -> Vertex {
        let mut v = a.lerp(b, self.intersect(a, b));
        let len_sq = self.normal.dot(self.normal);
        if len_sq > 0.0 {
            let p = v.position.to_vec3();
            let snapped = p - self.normal * (self.signed_distance(p) / len_sq);
            v.position.x = snapped.x;
            v.position.y = snapped.y;
            v.position.z = snapped.z;
        }
        v
    }
}

/// Clip a convex polygon against `plane`, writing the result to `out`.
///
/// Returns [`ClipResult::Inside`] when no vertex was touched,
/// [`ClipResult::Clipped`] when intersection vertices were introduced and
/// [`ClipResult::Outside`] when nothing is left.
pub fn clip_polygon(out: &mut Vec<Vertex>, input: &[Vertex], plane: &Plane) -> ClipResult {
    clip_with(
        out,
        input,
        |v| plane.contains(v),
        |a, b| plane.split(a, b),
    )
}

/// Same classification as [`clip_polygon`] without building the output.
pub fn check_clip_polygon(input: &[Vertex], plane: &Plane) -> ClipResult {
    classify_with(input, |v| plane.contains(v))
}
