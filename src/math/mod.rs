//! Value types for vectors and affine transforms.

pub mod mat4;
pub mod vec2;
pub mod vec3;
