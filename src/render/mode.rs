//! Fill mode codes.
//!
//! A mode is a small bitfield:
//!
//! ```text
//! bits 0-1  fill style   00 wire, 01 flat, 10 gouraud, 11 reserved
//! bit  2    texture
//! bits 3-4  blend        00 none, 01 alpha, 10 additive, 11 reserved
//! bit  5    depth buffer
//! ```
//!
//! The numeric codes are the public contract: they index the dispatch
//! table in [`crate::render::rasterizer`].

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FillMode: u32 {
        const FLAT    = 0x01;
        const GOURAUD = 0x02;
        const TEXTURE = 0x04;
        const ALPHA   = 0x08;
        const ADD     = 0x10;
        const ZBUF    = 0x20;
    }
}

/// Number of distinct mode codes (all six bits).
pub const MODE_COUNT: usize = 64;

pub const STYLE_MASK: u32 = 0x03;
pub const BLEND_MASK: u32 = 0x18;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillStyle {
    Wire,
    Flat,
    Gouraud,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    None,
    Alpha,
    Additive,
}

impl FillMode {
    /// Outline only; the empty bit set.
    pub const WIRE: FillMode = FillMode::empty();

    /// Wrap a raw code, keeping bits this type does not name.
    pub const fn from_code(code: u32) -> Self {
        Self::from_bits_retain(code)
    }

    pub const fn code(self) -> u32 {
        self.bits()
    }

    /// The fill style, or `None` for the reserved value 3.
    pub fn style(self) -> Option<FillStyle> {
        match self.bits() & STYLE_MASK {
            0 => Some(FillStyle::Wire),
            1 => Some(FillStyle::Flat),
            2 => Some(FillStyle::Gouraud),
            _ => None,
        }
    }

    /// The blend mode, or `None` when both blend bits are set.
    pub fn blend(self) -> Option<Blend> {
        match (self.bits() & BLEND_MASK) >> 3 {
            0 => Some(Blend::None),
            1 => Some(Blend::Alpha),
            2 => Some(Blend::Additive),
            _ => None,
        }
    }

    pub fn is_textured(self) -> bool {
        self.contains(FillMode::TEXTURE)
    }

    pub fn is_depth_tested(self) -> bool {
        self.contains(FillMode::ZBUF)
    }

    /// True when every field holds a defined value and no bit above the
    /// depth flag is set.
    pub fn is_valid(self) -> bool {
        (self.bits() as usize) < MODE_COUNT && self.style().is_some() && self.blend().is_some()
    }
}
