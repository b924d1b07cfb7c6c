//! Scan conversion of convex polygons into a per-scanline edge table.
//!
//! # Algorithm Overview
//!
//! A convex polygon is split at its topmost and bottommost vertices into two
//! chains that are monotone in Y:
//!
//! ```text
//!            top
//!            /\
//!   prev    /  \    next
//!  chain   /    \   chain
//!          \     \
//!           \    /
//!            \  /
//!           bottom
//! ```
//!
//! Each chain is walked edge by edge from the top down. For every scanline
//! an edge covers, the edge's X position and interpolated attributes are
//! written into one side of the [`EdgeTable`]. Which chain is the left side
//! follows from the polygon's winding, so both clockwise and
//! counter-clockwise input work.
//!
//! # Sampling Convention
//!
//! A scanline `y` belongs to an edge from `a` to `b` when its pixel centre
//! `y + 0.5` satisfies `a.y <= y + 0.5 < b.y`. Values stored for the row are
//! stepped to that centre, not to the top of the pixel. Horizontal edges
//! cover no scanline at all.
//!
//! # Fixed Point
//!
//! Positions are 24.8 and every attribute is interpolated with integer
//! increments computed once per edge (an "inverse slope" per attribute):
//!
//! ```text
//! step = (end - start) * 256 / (b.y - a.y)
//! ```

use std::ops::Range;

use crate::render::fixed::{
    coverage_index, pixel_center, COLOR_SHIFT, DEPTH_SHIFT, POS_ONE, POS_SHIFT,
};
use crate::render::ProjectedVertex;

/// Guard entries around and between the two edge arrays.
pub const EDGE_PAD: usize = 8;

/// Interpolated state of one polygon edge at one scanline.
///
/// The same layout is used for increments: [`EdgeEntry::gradient`] returns
/// an `EdgeEntry` whose fields are per-pixel deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeEntry {
    /// 24.8 screen X
    pub x: i32,
    /// Colour channels with `COLOR_SHIFT` fractional bits
    pub r: i32,
    pub g: i32,
    pub b: i32,
    pub a: i32,
    /// 16.16 texture coordinates
    pub u: i32,
    pub v: i32,
    /// Depth with `DEPTH_SHIFT` fractional bits
    pub z: i32,
}

/// Marker written into unused entries.
const GUARD: EdgeEntry = EdgeEntry {
    x: i32::MIN,
    r: 0,
    g: 0,
    b: 0,
    a: 0,
    u: 0,
    v: 0,
    z: 0,
};

impl EdgeEntry {
    pub fn from_vertex(v: &ProjectedVertex) -> Self {
        Self {
            x: v.x,
            r: v.r << COLOR_SHIFT,
            g: v.g << COLOR_SHIFT,
            b: v.b << COLOR_SHIFT,
            a: v.a << COLOR_SHIFT,
            u: v.u,
            v: v.v,
            z: v.z << DEPTH_SHIFT,
        }
    }

    /// Per-pixel increments from `from` to `to`, which lie `dist` apart
    /// (24.8 units, must be positive).
    ///
    /// Slopes outside the `i32` range saturate. That only happens over a
    /// sub-pixel `dist`, which covers at most one sample.
    pub fn gradient(from: &Self, to: &Self, dist: i32) -> Self {
        let slope = |a: i32, b: i32| {
            ((b as i64 - a as i64) * POS_ONE as i64 / dist as i64)
                .clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        Self {
            x: slope(from.x, to.x),
            r: slope(from.r, to.r),
            g: slope(from.g, to.g),
            b: slope(from.b, to.b),
            a: slope(from.a, to.a),
            u: slope(from.u, to.u),
            v: slope(from.v, to.v),
            z: slope(from.z, to.z),
        }
    }

    /// Move along `step` by `offset` (24.8 units).
    pub fn advanced(&self, step: &Self, offset: i32) -> Self {
        let adv = |value: i32, s: i32| {
            value.wrapping_add(((s as i64 * offset as i64) >> POS_SHIFT) as i32)
        };
        Self {
            x: adv(self.x, step.x),
            r: adv(self.r, step.r),
            g: adv(self.g, step.g),
            b: adv(self.b, step.b),
            a: adv(self.a, step.a),
            u: adv(self.u, step.u),
            v: adv(self.v, step.v),
            z: adv(self.z, step.z),
        }
    }

    /// Advance by one whole pixel. Wraps, since the step past the last
    /// sample may leave the representable range.
    #[inline]
    pub fn step(&mut self, step: &Self) {
        self.x = self.x.wrapping_add(step.x);
        self.r = self.r.wrapping_add(step.r);
        self.g = self.g.wrapping_add(step.g);
        self.b = self.b.wrapping_add(step.b);
        self.a = self.a.wrapping_add(step.a);
        self.u = self.u.wrapping_add(step.u);
        self.v = self.v.wrapping_add(step.v);
        self.z = self.z.wrapping_add(step.z);
    }

    /// Colour and alpha as 0-255 channels.
    #[inline]
    pub fn rgba(&self) -> (u32, u32, u32, u32) {
        let channel = |c: i32| (c >> COLOR_SHIFT).clamp(0, 255) as u32;
        (channel(self.r), channel(self.g), channel(self.b), channel(self.a))
    }

    /// Depth code, 0-65535.
    #[inline]
    pub fn depth(&self) -> u32 {
        (self.z >> DEPTH_SHIFT).max(0) as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Left and right edge arrays for every scanline of the output.
///
/// Both live in one arena laid out as
/// `[pad | left: height | pad | right: height | pad]`. The arena grows
/// with the tallest output height ever configured and never shrinks.
pub struct EdgeTable {
    entries: Vec<EdgeEntry>,
    height: usize,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            height: 0,
        }
    }

    /// Configure for an output `height` rows tall.
    ///
    /// Aborts the process if the arena cannot grow: this only runs while
    /// setting up an output, and there is no way to draw without it.
    pub fn resize(&mut self, height: u32) {
        let height = height as usize;
        let needed = height * 2 + EDGE_PAD * 3;

        if needed > self.entries.len() {
            let additional = needed - self.entries.len();
            if let Err(err) = self.entries.try_reserve_exact(additional) {
                log::error!(
                    "failed to allocate edge table buffer ({} bytes): {err}",
                    needed * std::mem::size_of::<EdgeEntry>()
                );
                std::process::abort();
            }
            log::debug!("edge table grown to {needed} entries for height {height}");
        }

        // Fresh guards for the new layout; the right array may have moved.
        self.entries.clear();
        self.entries.resize(needed.max(self.entries.capacity()), GUARD);
        self.height = height;
    }

    /// Configured output height in rows.
    pub fn height(&self) -> u32 {
        self.height as u32
    }

    #[inline]
    fn base(&self, side: Side) -> usize {
        match side {
            Side::Left => EDGE_PAD,
            Side::Right => self.height + EDGE_PAD * 2,
        }
    }

    /// Left and right entries stored for scanline `y`.
    #[inline]
    pub fn row(&self, y: i32) -> (EdgeEntry, EdgeEntry) {
        let y = y as usize;
        (
            self.entries[self.base(Side::Left) + y],
            self.entries[self.base(Side::Right) + y],
        )
    }

    /// Fill the table for a convex polygon.
    ///
    /// Returns the scanlines covered, clipped to `0..clip_height`, or `None`
    /// when nothing is visible (fewer than three vertices, zero area, or
    /// entirely above/below the output).
    pub fn scan_polygon(
        &mut self,
        verts: &[ProjectedVertex],
        clip_height: u32,
    ) -> Option<Range<i32>> {
        let n = verts.len();
        if n < 3 {
            return None;
        }
        let clip_height = (clip_height as usize).min(self.height) as i32;

        // Twice the signed area; positive is clockwise on a Y-down screen.
        let area2: i64 = (0..n)
            .map(|i| {
                let (a, b) = (&verts[i], &verts[(i + 1) % n]);
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();
        if area2 == 0 {
            return None;
        }

        let mut top = 0;
        let mut bottom = 0;
        for (i, v) in verts.iter().enumerate().skip(1) {
            if v.y < verts[top].y {
                top = i;
            }
            if v.y > verts[bottom].y {
                bottom = i;
            }
        }

        let rows = coverage_index(verts[top].y).max(0)
            ..coverage_index(verts[bottom].y).min(clip_height);
        if rows.is_empty() {
            return None;
        }

        // Going to the next index from the top runs down the right-hand
        // side of a clockwise polygon.
        let (next_side, prev_side) = if area2 > 0 {
            (Side::Right, Side::Left)
        } else {
            (Side::Left, Side::Right)
        };

        let mut i = top;
        while i != bottom {
            let next = (i + 1) % n;
            self.scan_edge(next_side, &verts[i], &verts[next], clip_height);
            i = next;
        }

        let mut i = top;
        while i != bottom {
            let prev = (i + n - 1) % n;
            self.scan_edge(prev_side, &verts[i], &verts[prev], clip_height);
            i = prev;
        }

        Some(rows)
    }

    /// Write the scanlines covered by the downward edge `a -> b`.
    fn scan_edge(
        &mut self,
        side: Side,
        a: &ProjectedVertex,
        b: &ProjectedVertex,
        clip_height: i32,
    ) {
        let dy = b.y - a.y;
        if dy <= 0 {
            return;
        }

        let start = coverage_index(a.y).max(0);
        let end = coverage_index(b.y).min(clip_height);
        if start >= end {
            return;
        }

        let from = EdgeEntry::from_vertex(a);
        let to = EdgeEntry::from_vertex(b);
        let step = EdgeEntry::gradient(&from, &to, dy);
        let mut cur = from.advanced(&step, pixel_center(start) - a.y);

        let base = self.base(side);
        for slot in &mut self.entries[base + start as usize..base + end as usize] {
            *slot = cur;
            cur.step(&step);
        }
    }

    #[cfg(test)]
    pub(crate) fn guards_intact(&self) -> bool {
        let h = self.height;
        let pads = [
            0..EDGE_PAD,
            h + EDGE_PAD..h + EDGE_PAD * 2,
            h * 2 + EDGE_PAD * 2..h * 2 + EDGE_PAD * 3,
        ];
        pads.into_iter().flatten().all(|i| self.entries[i] == GUARD)
    }
}

impl Default for EdgeTable {
    fn default() -> Self {
        Self::new()
    }
}
