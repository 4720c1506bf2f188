//! SDL2 display collaborator: opens a window, turns keyboard state into an
//! [`InputState`] and uploads finished RGBA frames.

use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use tracing::debug;

use crate::render::BYTES_PER_PIXEL;
use crate::transform::InputState;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

// Byte order R, G, B, A regardless of host endianness.
const FRAME_FORMAT: PixelFormatEnum = PixelFormatEnum::RGBA32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Caps the loop at [`FPS`] and reports the time between frames.
pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Sleeps out the remainder of the frame budget and returns the elapsed
    /// time since the previous call, in seconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> f32 {
        let mut current_time = window.timer().ticks64();
        let mut delta_ms = current_time.saturating_sub(self.previous_frame_time);

        if delta_ms < FRAME_TARGET_TIME as u64 {
            let time_to_wait = FRAME_TARGET_TIME as u64 - delta_ms;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_ms = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_ms as f32 / 1000.0
    }
}

// Fields drop in declaration order: the texture has to be destroyed while
// the renderer owned by `canvas` and `texture_creator` is still alive.
pub struct Window {
    texture: sdl2::render::Texture<'static>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is boxed, so the reference stays valid when the
        // box moves into Window. `texture` is declared first and drops before
        // both `canvas` and `texture_creator`.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(FRAME_FORMAT, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            texture,
            canvas,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains pending events. Escape counts as a quit request.
    pub fn poll_events(&mut self) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => {
                    debug!(width = w, height = h, "Window resized");
                    result = WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32);
                }
                _ => {}
            }
        }
        result
    }

    /// Snapshot of the held keys as transform commands.
    ///
    /// # Key Mapping
    /// - Up / Down: rotate about X
    /// - Left / Right: rotate about Y
    /// - Q / E: rotate about Z
    /// - W or `=` / S or `-`: scale up / down
    /// - R: reset rotation
    pub fn input_state(&self) -> InputState {
        input_from_keyboard(&self.event_pump.keyboard_state())
    }

    /// Uploads a complete RGBA8 frame and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, self.width as usize * BYTES_PER_PIXEL)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        // SAFETY: as in new(); the old texture is dropped by this assignment
        // while texture_creator is alive.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(FRAME_FORMAT, width, height)
            .map_err(|e| e.to_string())?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

fn input_from_keyboard(keys: &KeyboardState) -> InputState {
    let held = |codes: &[Scancode]| codes.iter().any(|&c| keys.is_scancode_pressed(c));
    InputState {
        rotate_x_pos: held(&[Scancode::Up]),
        rotate_x_neg: held(&[Scancode::Down]),
        rotate_y_pos: held(&[Scancode::Right]),
        rotate_y_neg: held(&[Scancode::Left]),
        rotate_z_pos: held(&[Scancode::E]),
        rotate_z_neg: held(&[Scancode::Q]),
        scale_up: held(&[Scancode::W, Scancode::Equals, Scancode::KpPlus]),
        scale_down: held(&[Scancode::S, Scancode::Minus, Scancode::KpMinus]),
        reset_rotation: held(&[Scancode::R]),
    }
}
