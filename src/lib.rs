//! A CPU wireframe viewer for STL meshes.
//!
//! STL files (binary or ASCII) are loaded into a deduplicated edge list,
//! transformed by a rotate/scale/translate matrix, perspective projected and
//! drawn with Bresenham lines into an RGBA8 framebuffer. SDL2 is used only
//! for window management and display.
//!
//! # Quick Start
//!
//! ```ignore
//! use wirestl::prelude::*;
//!
//! let mut session = Session::init("part.stl", RenderConfig::default())?;
//! let frame = session.tick(1.0 / 60.0, &InputState::default());
//! frame.save_png("part.png")?;
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod error;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod session;
pub mod stl;
pub mod transform;
pub mod triangle;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use error::{LoadError, LoadErrorKind, LoadResult};
pub use mesh::{Edge, Mesh};
pub use model::WireframeModel;
pub use projection::{PixelCoordinate, Projection};
pub use render::FrameBuffer;
pub use session::Session;
pub use transform::{InputState, ModelTransform, TransformController};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use wirestl::prelude::*;
/// ```
pub mod prelude {
    // Loading
    pub use crate::error::{LoadError, LoadResult};
    pub use crate::mesh::{ExactKey, Mesh, QuantizedKey, VertexKey};

    // Model
    pub use crate::model::WireframeModel;

    // Pipeline
    pub use crate::config::RenderConfig;
    pub use crate::projection::{PixelCoordinate, Projection};
    pub use crate::session::Session;
    pub use crate::transform::{InputState, ModelTransform, TransformController};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::colors::Color;
    pub use crate::render::{FrameBuffer, WireframeRenderer};

    // Window & Input
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
