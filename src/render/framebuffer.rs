//! RGBA8 pixel buffer.
//!
//! The buffer is `width * height * 4` bytes, row-major with the origin in the
//! top-left corner, channels ordered R, G, B, A. It is what the display
//! collaborator uploads once a frame is complete.

use std::path::Path;

use crate::colors::Color;
use crate::projection::PixelCoordinate;

use super::line::BresenhamLine;

/// Bytes per pixel (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// An owned RGBA8 frame with bounds-checked pixel writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Create a fully transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; Self::byte_len(width, height)],
            width,
            height,
        }
    }

    fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * BYTES_PER_PIXEL
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate for new dimensions; contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = vec![0; Self::byte_len(width, height)];
        self.width = width;
        self.height = height;
    }

    /// Reset every byte to zero (fully transparent black).
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
        } else {
            None
        }
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if let Some(offset) = self.offset(x, y) {
            self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        }
    }

    /// Write one pixel. Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.put(x, y, color.to_rgba8());
    }

    /// Get the RGBA bytes at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.offset(x, y).map(|offset| {
            let mut rgba = [0; 4];
            rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
            rgba
        })
    }

    /// Draw a one-pixel-wide line including both endpoints.
    ///
    /// Pixels that fall outside the buffer are skipped; the rest of the line
    /// is still drawn exactly as the full line would place it.
    pub fn draw_line(&mut self, start: PixelCoordinate, end: PixelCoordinate, color: Color) {
        let (width, height) = (i64::from(self.width), i64::from(self.height));

        // The path never leaves the endpoints' bounding box.
        let (min_x, max_x) = (start.x.min(end.x), start.x.max(end.x));
        let (min_y, max_y) = (start.y.min(end.y), start.y.max(end.y));
        if i64::from(max_x) < 0
            || i64::from(min_x) >= width
            || i64::from(max_y) < 0
            || i64::from(min_y) >= height
        {
            return;
        }

        // Both axes move monotonically: a pixel is `before` the buffer until
        // it crosses the near edge and `gone` once it crosses the far edge.
        let heading_right = start.x < end.x;
        let heading_down = start.y < end.y;
        let before = |p: PixelCoordinate| {
            let x = i64::from(p.x);
            let y = i64::from(p.y);
            (heading_right && x < 0)
                || (!heading_right && x >= width)
                || (heading_down && y < 0)
                || (!heading_down && y >= height)
        };
        let gone = |p: PixelCoordinate| {
            let x = i64::from(p.x);
            let y = i64::from(p.y);
            (heading_right && x >= width)
                || (!heading_right && x < 0)
                || (heading_down && y >= height)
                || (!heading_down && y < 0)
        };

        // The end point passed the bounding-box test, so it is never `before`.
        let mut line = BresenhamLine::new(start, end);
        let (mut lo, mut hi) = (0, line.steps());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if before(line.point_at(mid)) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        line.seek(lo);

        let rgba = color.to_rgba8();
        for p in line {
            if gone(p) {
                break;
            }
            self.put(p.x, p.y, rgba);
        }
    }

    /// Read-only view of the raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Encode the frame as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
    }
}
