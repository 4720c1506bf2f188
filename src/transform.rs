//! Model transform state and the input-driven controller that updates it.
//!
//! [`ModelTransform`] holds rotation (Euler angles), uniform scale and a
//! translation. [`TransformController`] advances it once per frame from the
//! polled [`InputState`] and the frame's delta time.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// A model's placement in camera space.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_translation_xyz(0.0, 0.0, 5.0)
///     .rotate_y(0.1)
///     .set_scale(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    rotation: Vec3, // Euler angles in radians
    scale: f32,
    translation: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: 1.0,
            translation: Vec3::ZERO,
        }
    }
}

impl ModelTransform {
    /// Create a new transform with default values (rotation=0, scale=1, translation=0).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Rotation ============

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Add a delta rotation (Euler angles in radians).
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    pub fn reset_rotation(&mut self) -> &mut Self {
        self.rotation = Vec3::ZERO;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Multiply the current scale by a factor.
    pub fn scale_by(&mut self, factor: f32) -> &mut Self {
        self.scale *= factor;
        self
    }

    // ============ Translation ============

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec3) -> &mut Self {
        self.translation = translation;
        self
    }

    pub fn set_translation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.translation = Vec3::new(x, y, z);
        self
    }

    // ============ Matrix Generation ============

    /// Generate the model-to-camera matrix.
    ///
    /// Order: Scale * Rotation * Translation
    /// (row vectors, so scale is applied first and translation last)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::scaling(self.scale, self.scale, self.scale)
            * Mat4::from_rotation(self.rotation.x, self.rotation.y, self.rotation.z)
            * Mat4::from_translation_vec(self.translation)
    }
}

/// Discrete commands active during the current frame.
///
/// Filled by whatever polls the input device; the core never reads devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub rotate_x_pos: bool,
    pub rotate_x_neg: bool,
    pub rotate_y_pos: bool,
    pub rotate_y_neg: bool,
    pub rotate_z_pos: bool,
    pub rotate_z_neg: bool,
    pub scale_up: bool,
    pub scale_down: bool,
    pub reset_rotation: bool,
}

/// Rates at which input commands change a [`ModelTransform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformController {
    /// Rotation speed in radians per second, per axis command.
    pub rotation_speed: f32,
    /// Scale multiplier applied per second while scaling is held.
    pub scale_speed: f32,
    /// Unconditional spin in radians per second.
    pub auto_rotate: Vec3,
}

impl Default for TransformController {
    fn default() -> Self {
        Self {
            rotation_speed: 1.5,
            scale_speed: 2.0,
            auto_rotate: Vec3::ZERO,
        }
    }
}

impl TransformController {
    pub fn new(rotation_speed: f32, scale_speed: f32) -> Self {
        Self {
            rotation_speed,
            scale_speed,
            auto_rotate: Vec3::ZERO,
        }
    }

    /// Advances `transform` by `delta_time` seconds of input.
    ///
    /// # Input Mapping
    /// - rotate_{x,y,z}_{pos,neg}: spin about that axis
    /// - scale_up / scale_down: grow or shrink exponentially
    /// - reset_rotation: zero the rotation after everything else this frame
    pub fn update(&self, transform: &mut ModelTransform, input: &InputState, delta_time: f32) {
        let step = self.rotation_speed * delta_time;
        let axis = |pos: bool, neg: bool| match (pos, neg) {
            (true, false) => step,
            (false, true) => -step,
            _ => 0.0,
        };

        transform.rotate(Vec3::new(
            axis(input.rotate_x_pos, input.rotate_x_neg),
            axis(input.rotate_y_pos, input.rotate_y_neg),
            axis(input.rotate_z_pos, input.rotate_z_neg),
        ));
        transform.rotate(self.auto_rotate * delta_time);

        if input.scale_up && !input.scale_down {
            transform.scale_by(self.scale_speed.powf(delta_time));
        }
        if input.scale_down && !input.scale_up {
            transform.scale_by(self.scale_speed.powf(-delta_time));
        }

        if input.reset_rotation {
            transform.reset_rotation();
        }
    }
}
