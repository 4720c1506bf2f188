//! Integer line rasterization.

use crate::projection::PixelCoordinate;

/// Iterator over the pixels of a line using Bresenham's algorithm.
///
/// Bresenham's algorithm determines which pixels to illuminate using only
/// integer arithmetic. It tracks an "error" term that represents the distance
/// between the ideal line and the current pixel, and steps along the minor
/// axis whenever that error crosses a threshold.
///
/// Yields an 8-connected path including both endpoints. A zero-length line
/// yields its single point.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    start: PixelCoordinate,
    x: i32,
    y: i32,
    end: PixelCoordinate,
    dx: i64,
    dy: i64,
    // Step direction per axis: +1 toward a larger target, otherwise -1.
    x_step: i32,
    y_step: i32,
    err: i64,
    done: bool,
}

impl BresenhamLine {
    pub fn new(start: PixelCoordinate, end: PixelCoordinate) -> Self {
        // 64-bit deltas so lines spanning the whole i32 range cannot overflow.
        let dx = (i64::from(end.x) - i64::from(start.x)).abs();
        let dy = (i64::from(end.y) - i64::from(start.y)).abs();

        Self {
            start,
            x: start.x,
            y: start.y,
            end,
            dx,
            dy,
            x_step: if start.x < end.x { 1 } else { -1 },
            y_step: if start.y < end.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }

    /// Number of steps from the start to the end; the line yields one more
    /// pixel than this.
    pub fn steps(&self) -> i64 {
        self.dx.max(self.dy)
    }

    // Axis offsets from the start after `step` iterations. The major axis
    // advances every iteration (x on ties); the minor axis has moved once for
    // every n with (2n - 1) * major < 2 * step * minor.
    fn offsets_at(&self, step: i64) -> (i64, i64) {
        let (dx, dy, k) = (i128::from(self.dx), i128::from(self.dy), i128::from(step));
        if self.dx >= self.dy {
            let minor = if dx == 0 { 0 } else { (2 * k * dy + dx - 1) / (2 * dx) };
            (step, minor as i64)
        } else {
            let minor = (2 * k * dx + dy - 1) / (2 * dy);
            (minor as i64, step)
        }
    }

    /// The pixel yielded after `step` iterations, without iterating.
    ///
    /// `step` is clamped to `0..=steps()`.
    pub fn point_at(&self, step: i64) -> PixelCoordinate {
        let (nx, ny) = self.offsets_at(step.clamp(0, self.steps()));
        PixelCoordinate::new(
            (i64::from(self.start.x) + i64::from(self.x_step) * nx) as i32,
            (i64::from(self.start.y) + i64::from(self.y_step) * ny) as i32,
        )
    }

    /// Repositions the iterator so the next pixel is [`point_at(step)`](Self::point_at).
    pub fn seek(&mut self, step: i64) {
        let step = step.clamp(0, self.steps());
        let (nx, ny) = self.offsets_at(step);
        let (dx, dy) = (i128::from(self.dx), i128::from(self.dy));
        let current = self.point_at(step);

        self.x = current.x;
        self.y = current.y;
        // |err| never exceeds the larger delta, so it fits back into i64.
        self.err = (dx - dy + i128::from(ny) * dx - i128::from(nx) * dy) as i64;
        self.done = false;
    }
}

impl Iterator for BresenhamLine {
    type Item = PixelCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = PixelCoordinate::new(self.x, self.y);

        if current == self.end {
            self.done = true;
            return Some(current);
        }

        // Double the error for comparison (avoids floating point).
        let e2 = 2 * self.err;

        // Both conditions can hold, which produces a diagonal step.
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.x_step;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.y_step;
        }

        Some(current)
    }
}
