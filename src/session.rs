//! A loaded model plus everything needed to render it frame after frame.
//!
//! The caller owns the [`Session`] and drives it explicitly:
//!
//! ```ignore
//! let mut session = Session::init("part.stl", RenderConfig::default())?;
//! loop {
//!     let frame = session.tick(delta_seconds, &input);
//!     display.present(frame.as_bytes())?;
//! }
//! ```
//!
//! `tick` returns a shared borrow of the framebuffer, so the frame can only
//! be read once all of its draw calls are done and must be released before
//! the next tick clears it.

use std::path::Path;

use tracing::info;

use crate::config::RenderConfig;
use crate::error::LoadResult;
use crate::mesh::Mesh;
use crate::model::WireframeModel;
use crate::projection::Projection;
use crate::render::{FrameBuffer, WireframeRenderer};
use crate::transform::{InputState, ModelTransform, TransformController};

pub struct Session {
    model: WireframeModel,
    transform: ModelTransform,
    controller: TransformController,
    projection: Projection,
    renderer: WireframeRenderer,
    framebuffer: FrameBuffer,
    config: RenderConfig,
}

impl Session {
    /// Load an STL file and prepare a session around it.
    pub fn init<P: AsRef<Path>>(path: P, config: RenderConfig) -> LoadResult<Self> {
        let mesh = Mesh::load(path)?;
        Ok(Self::new(WireframeModel::from(mesh), config))
    }

    pub fn new(model: WireframeModel, config: RenderConfig) -> Self {
        let mut controller = TransformController::new(config.rotation_speed, config.scale_speed);
        controller.auto_rotate = config.auto_rotate;

        let transform = Self::initial_transform(&model, &config);
        info!(
            vertices = model.vertices().len(),
            lines = model.line_count(),
            scale = transform.scale(),
            "Session ready"
        );

        Self {
            model,
            transform,
            controller,
            projection: Projection::new(config.fov),
            renderer: WireframeRenderer::new(),
            framebuffer: FrameBuffer::new(config.width, config.height),
            config,
        }
    }

    fn initial_transform(model: &WireframeModel, config: &RenderConfig) -> ModelTransform {
        let mut transform = ModelTransform::new();
        transform.set_translation_xyz(0.0, 0.0, config.camera_distance);

        let radius = model.bounding_radius();
        if config.fit_to_view && radius.is_finite() && radius > 0.0 {
            transform.set_scale(1.0 / radius);
        }
        transform
    }

    /// Advance the transform by one frame of input, then redraw.
    pub fn tick(&mut self, delta_time: f32, input: &InputState) -> &FrameBuffer {
        self.controller
            .update(&mut self.transform, input, delta_time);
        self.render()
    }

    /// Redraw the current state without advancing time.
    pub fn render(&mut self) -> &FrameBuffer {
        self.framebuffer.clear();
        self.renderer.render(
            &mut self.framebuffer,
            &self.model,
            &self.transform.to_matrix(),
            &self.projection,
            self.config.wire_color,
        );
        &self.framebuffer
    }

    /// Reallocate the framebuffer; the next frame renders at the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.framebuffer.resize(width, height);
    }

    pub fn model(&self) -> &WireframeModel {
        &self.model
    }

    pub fn transform(&self) -> &ModelTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut ModelTransform {
        &mut self.transform
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The last completed frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.framebuffer
    }
}
