//! Rasterization: the pixel buffer, line drawing and the wireframe pass.

mod framebuffer;
mod line;
mod renderer;

pub use framebuffer::{FrameBuffer, BYTES_PER_PIXEL};
pub use line::BresenhamLine;
pub use renderer::WireframeRenderer;
