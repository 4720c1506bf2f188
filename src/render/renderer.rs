//! Per-frame wireframe drawing.
//!
//! Provides the [`WireframeRenderer`], which runs the transform → project →
//! rasterize pipeline for a whole model.

use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::model::WireframeModel;
use crate::projection::{PixelCoordinate, Projection};

/// Draws wireframe models into a [`FrameBuffer`].
///
/// Keeps the clip-space scratch array between frames so steady-state
/// rendering does not allocate.
#[derive(Debug, Default)]
pub struct WireframeRenderer {
    clip_points: Vec<Vec2>,
}

impl WireframeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform and project every vertex, then draw every connection.
    ///
    /// The model itself is not modified. Nothing is cleared first; callers
    /// clear the buffer at the start of the frame.
    pub fn render(
        &mut self,
        buffer: &mut FrameBuffer,
        model: &WireframeModel,
        transform: &Mat4,
        projection: &Projection,
        color: Color,
    ) {
        self.clip_points.clear();
        self.clip_points.extend(
            model
                .vertices()
                .iter()
                .map(|&v| projection.project_to_clip(v * *transform)),
        );

        let (width, height) = (buffer.width(), buffer.height());
        for (a, b) in model.lines() {
            let start = PixelCoordinate::from_clip(self.clip_points[a], width, height);
            let end = PixelCoordinate::from_clip(self.clip_points[b], width, height);
            buffer.draw_line(start, end, color);
        }
    }

    /// Clip-space positions from the most recent [`render`](Self::render),
    /// aligned by index with the model's vertices.
    pub fn clip_points(&self) -> &[Vec2] {
        &self.clip_points
    }
}
