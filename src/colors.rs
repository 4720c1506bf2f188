//! Float RGBA colors and their conversion to framebuffer bytes.

/// A color with four channels in the [0, 1] range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
pub const WIREFRAME: Color = Color::rgb(0.2, 1.0, 0.6);

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Converts to R, G, B, A bytes.
    ///
    /// Each channel is multiplied by 255 and truncated toward zero. Values
    /// outside [0, 1] saturate at 0 or 255.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b),
            channel_to_byte(self.a),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        WHITE
    }
}

#[inline]
fn channel_to_byte(value: f32) -> u8 {
    (value * 255.0) as u8
}
