//! Polygon fill dispatch.
//!
//! Each of the 64 mode codes maps to one entry of [`FILL_TABLE`]:
//!
//! - fill style 1 (flat) and 2 (gouraud) select a monomorphized
//!   [`span::fill_polygon`] for the texture, blend and depth bits;
//! - fill style 0 (wire) outlines the polygon with [`line::draw_line`],
//!   depth-tested when the depth bit is set. Texture and blend bits are
//!   ignored by the outline;
//! - the reserved style (3) and the reserved blend (both blend bits) are
//!   [`FillRoutine::Unsupported`].
//!
//! [`Rasterizer`] owns the scratch edge table and is the single entry
//! point for drawing.

pub mod line;
pub mod scanline;
pub mod span;

use scanline::EdgeTable;
use span::{BLEND_ADD, BLEND_ALPHA, BLEND_NONE};

use super::mode::{FillMode, FillStyle, MODE_COUNT};
use super::{ProjectedVertex, RenderTarget};

/// Signature shared by every fill routine.
pub type PolygonFn = fn(&mut EdgeTable, &mut RenderTarget<'_>, &[ProjectedVertex]);

/// One slot of the dispatch table.
#[derive(Clone, Copy)]
pub enum FillRoutine {
    Polygon(PolygonFn),
    Unsupported,
}

impl FillRoutine {
    /// Routine for `mode`; codes past the table are unsupported.
    pub fn lookup(mode: FillMode) -> Self {
        FILL_TABLE
            .get(mode.code() as usize)
            .copied()
            .unwrap_or(FillRoutine::Unsupported)
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, FillRoutine::Polygon(_))
    }
}

impl std::fmt::Debug for FillRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillRoutine::Polygon(_) => write!(f, "Polygon"),
            FillRoutine::Unsupported => write!(f, "Unsupported"),
        }
    }
}

macro_rules! filled {
    ($gouraud:literal, $texture:literal, $zbuf:literal, $blend:expr) => {
        match $blend {
            0 => FillRoutine::Polygon(span::fill_polygon::<$gouraud, $texture, BLEND_NONE, $zbuf>),
            1 => FillRoutine::Polygon(span::fill_polygon::<$gouraud, $texture, BLEND_ALPHA, $zbuf>),
            2 => FillRoutine::Polygon(span::fill_polygon::<$gouraud, $texture, BLEND_ADD, $zbuf>),
            _ => FillRoutine::Unsupported,
        }
    };
}

const fn routine(code: usize) -> FillRoutine {
    let blend = (code >> 3) & 3;
    let textured = code & FillMode::TEXTURE.bits() as usize != 0;
    let zbuf = code & FillMode::ZBUF.bits() as usize != 0;

    match (code & 3, textured, zbuf) {
        _ if blend == 3 => FillRoutine::Unsupported,
        (0, _, false) => FillRoutine::Polygon(line::wire::<false>),
        (0, _, true) => FillRoutine::Polygon(line::wire::<true>),
        (1, false, false) => filled!(false, false, false, blend),
        (1, false, true) => filled!(false, false, true, blend),
        (1, true, false) => filled!(false, true, false, blend),
        (1, true, true) => filled!(false, true, true, blend),
        (2, false, false) => filled!(true, false, false, blend),
        (2, false, true) => filled!(true, false, true, blend),
        (2, true, false) => filled!(true, true, false, blend),
        (2, true, true) => filled!(true, true, true, blend),
        _ => FillRoutine::Unsupported,
    }
}

/// Fill routines indexed by mode code.
pub static FILL_TABLE: [FillRoutine; MODE_COUNT] = {
    let mut table = [FillRoutine::Unsupported; MODE_COUNT];
    let mut code = 0;
    while code < MODE_COUNT {
        table[code] = routine(code);
        code += 1;
    }
    table
};

/// Drawing context: the edge table sized for one output height.
///
/// Configure it once per output with [`Rasterizer::new`] or
/// [`Rasterizer::set_output_height`], then issue draw calls against any
/// [`RenderTarget`] no taller than that.
pub struct Rasterizer {
    edges: EdgeTable,
}

impl Rasterizer {
    pub fn new(height: u32) -> Self {
        let mut edges = EdgeTable::new();
        edges.resize(height);
        Self { edges }
    }

    /// Prepare for a new output height. Storage only grows.
    pub fn set_output_height(&mut self, height: u32) {
        self.edges.resize(height);
    }

    pub fn output_height(&self) -> u32 {
        self.edges.height()
    }

    /// Draw a convex polygon in screen space.
    ///
    /// Polygons with fewer than three vertices are drawn as a line. Calling
    /// this with an unsupported mode, without the texture or depth buffer
    /// the mode needs, or with a target taller than the configured output
    /// height is a bug: it asserts in debug builds and draws nothing in
    /// release builds.
    pub fn fill_polygon(
        &mut self,
        target: &mut RenderTarget<'_>,
        mode: FillMode,
        verts: &[ProjectedVertex],
    ) {
        let FillRoutine::Polygon(fill) = FillRoutine::lookup(mode) else {
            debug_assert!(false, "fill mode {:#04x} not implemented", mode.code());
            log::trace!("skipping draw with unsupported fill mode {:#04x}", mode.code());
            return;
        };

        let wire = mode.style() == Some(FillStyle::Wire);
        if mode.is_textured() && !wire && !target.has_texture() {
            debug_assert!(false, "fill mode {:#04x} requires a bound texture", mode.code());
            log::trace!("skipping textured draw without a texture");
            return;
        }
        if mode.is_depth_tested() && !target.has_depth() {
            debug_assert!(false, "fill mode {:#04x} requires a depth buffer", mode.code());
            log::trace!("skipping depth-tested draw without a depth buffer");
            return;
        }
        if target.framebuffer().height() > self.edges.height() {
            debug_assert!(
                false,
                "target height {} exceeds configured output height {}",
                target.framebuffer().height(),
                self.edges.height()
            );
            log::trace!("skipping draw to a target taller than the edge table");
            return;
        }

        if verts.len() < 3 {
            if mode.is_depth_tested() {
                line::wire::<true>(&mut self.edges, target, verts);
            } else {
                line::wire::<false>(&mut self.edges, target, verts);
            }
            return;
        }

        fill(&mut self.edges, target, verts);
    }

    /// Draw a line in the colour of its first vertex.
    pub fn draw_line(&mut self, target: &mut RenderTarget<'_>, verts: &[ProjectedVertex; 2]) {
        line::draw_line::<false>(target, &verts[0], &verts[1]);
    }

    /// Draw a depth-tested line. Draws nothing without a depth buffer.
    pub fn draw_line_zbuf(&mut self, target: &mut RenderTarget<'_>, verts: &[ProjectedVertex; 2]) {
        debug_assert!(target.has_depth(), "depth-tested line without a depth buffer");
        line::draw_line::<true>(target, &verts[0], &verts[1]);
    }
}
