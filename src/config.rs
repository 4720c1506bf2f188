//! Render settings for a [`crate::session::Session`].

use crate::colors::{self, Color};
use crate::math::vec3::Vec3;
use crate::projection::DEFAULT_FOV;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Everything a session needs besides the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Projection constant: `x' = x * fov / (fov + z)`.
    pub fov: f32,
    /// Distance the model is pushed along +z after rotation.
    pub camera_distance: f32,
    pub wire_color: Color,
    /// Radians per second for each held rotate command.
    pub rotation_speed: f32,
    /// Scale multiplier per second while a scale command is held.
    pub scale_speed: f32,
    /// Scripted spin in radians per second, applied every tick.
    pub auto_rotate: Vec3,
    /// Start with the model scaled so its bounding radius is 1.
    pub fit_to_view: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fov: DEFAULT_FOV,
            camera_distance: 5.0,
            wire_color: colors::WIREFRAME,
            rotation_speed: 1.5,
            scale_speed: 2.0,
            auto_rotate: Vec3::ZERO,
            fit_to_view: true,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn with_camera_distance(mut self, distance: f32) -> Self {
        self.camera_distance = distance;
        self
    }

    pub fn with_wire_color(mut self, color: Color) -> Self {
        self.wire_color = color;
        self
    }

    pub fn with_auto_rotate(mut self, radians_per_second: Vec3) -> Self {
        self.auto_rotate = radians_per_second;
        self
    }

    pub fn with_fit_to_view(mut self, fit: bool) -> Self {
        self.fit_to_view = fit;
        self
    }
}
