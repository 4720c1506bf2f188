//! Perspective projection to clip space and the clip-to-pixel mapping.
//!
//! The projection is a single divide by `fov + z`. There is no near plane:
//! a vertex at `z == -fov` divides by zero and points behind it come out
//! mirrored. Both are left as the formula produces them.

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Projection constant used when none is configured.
pub const DEFAULT_FOV: f32 = 2.0;

/// Simple perspective projection parameterised by one constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(DEFAULT_FOV)
    }
}

impl Projection {
    pub fn new(fov: f32) -> Self {
        Self { fov }
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Projects a camera-space point: `x * fov / (fov + z)`, likewise for y.
    #[inline]
    pub fn project_to_clip(&self, v: Vec3) -> Vec2 {
        let depth = self.fov + v.z;
        Vec2::new(v.x * self.fov / depth, v.y * self.fov / depth)
    }
}

/// Integer pixel position on the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelCoordinate {
    pub x: i32,
    pub y: i32,
}

impl PixelCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Maps a clip-space point onto a `width x height` screen.
    ///
    /// Both axes scale by half the screen *height* so that one clip unit is
    /// the same number of pixels horizontally and vertically; x is then
    /// centred on `width / 2`. Rounding is half-to-even. Non-finite inputs
    /// saturate to the `i32` range instead of overflowing.
    pub fn from_clip(clip: Vec2, width: u32, height: u32) -> Self {
        let half_height = height as f32 * 0.5;
        let x = (clip.x * half_height).round_ties_even() as i32;
        let y = (clip.y * half_height).round_ties_even() as i32;
        Self {
            x: x.saturating_add((width / 2) as i32),
            y: y.saturating_add((height / 2) as i32),
        }
    }
}
