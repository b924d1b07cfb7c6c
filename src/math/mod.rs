//! Small `f32` vector types used by the clipper and the viewport mapping.

pub mod vec2;
pub mod vec3;
pub mod vec4;
