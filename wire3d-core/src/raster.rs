/// Integer line rasterization and wireframe triangles
use nalgebra::Point2;

use crate::image::{ImageBuffer, PixelColor};

/// Iterator over the pixels of a Bresenham line, both endpoints included.
///
/// Uses the all-octant error accumulation form and yields exactly
/// `max(|dx|, |dy|) + 1` points. Arithmetic is done in `i64` so endpoints
/// anywhere in the `i32` range cannot overflow.
#[derive(Debug, Clone)]
pub struct Line {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl Line {
    pub fn new(from: Point2<i32>, to: Point2<i32>) -> Self {
        let (x0, y0) = (from.x as i64, from.y as i64);
        let (x1, y1) = (to.x as i64, to.y as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();

        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x1 < x0 { -1 } else { 1 },
            sy: if y1 < y0 { -1 } else { 1 },
            err: dx + dy,
            done: false,
        }
    }

    /// Jump ahead `steps` iterations without visiting the skipped points.
    ///
    /// The error term only depends on how many x and y steps were taken:
    /// `err = dx * (1 + y_steps) + dy * (1 + x_steps)`. The major axis
    /// moves on every iteration, and the minor axis step count after `k`
    /// iterations is `max(0, floor((2 * minor * k - major) / (2 * major)) + 1)`.
    fn advance(&mut self, steps: i64) {
        let (major, minor) = (self.dx.max(-self.dy), self.dx.min(-self.dy));
        let remaining = (self.x1 - self.x).abs().max((self.y1 - self.y).abs());
        let steps = steps.clamp(0, remaining);
        if steps == 0 || self.done {
            return;
        }

        // Only valid from the start of the line
        debug_assert_eq!(self.err, self.dx + self.dy);
        let minor_steps = {
            let (major, minor, k) = (major as i128, minor as i128, steps as i128);
            ((2 * minor * k - major).div_euclid(2 * major) + 1).max(0) as i64
        };
        let (x_steps, y_steps) = if self.dx >= -self.dy {
            (steps, minor_steps)
        } else {
            (minor_steps, steps)
        };

        self.x += self.sx * x_steps;
        self.y += self.sy * y_steps;
        self.err = self.dx * (1 + y_steps) + self.dy * (1 + x_steps);
    }

    /// Skip the leading points whose major-axis coordinate lies before a
    /// `width` x `height` canvas. None of them can be plotted.
    fn skip_to_canvas(&mut self, width: i64, height: i64) {
        let steps = if self.dx >= -self.dy {
            if self.sx > 0 {
                -self.x
            } else {
                self.x - (width - 1)
            }
        } else if self.sy > 0 {
            -self.y
        } else {
            self.y - (height - 1)
        };
        self.advance(steps);
    }

    /// Whether the current point has moved beyond the canvas in the
    /// direction of travel. Both coordinates are monotone, so nothing after
    /// it can land on the canvas either.
    fn past_canvas(&self, point: &Point2<i32>, width: i64, height: i64) -> bool {
        let (x, y) = (point.x as i64, point.y as i64);
        (self.sx > 0 && x >= width)
            || (self.sx < 0 && x < 0)
            || (self.sy > 0 && y >= height)
            || (self.sy < 0 && y < 0)
    }
}

impl Iterator for Line {
    type Item = Point2<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Both coordinates stay between the i32 endpoints
        let point = Point2::new(self.x as i32, self.y as i32);

        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = (self.x1 - self.x).abs().max((self.y1 - self.y).abs()) + 1;
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// Draw a line into the image; pixels off the canvas are dropped.
///
/// Runs of off-canvas points before and after the canvas are skipped, so
/// the cost is bounded by the canvas size rather than the line length.
pub fn draw_line(image: &mut ImageBuffer, from: Point2<i32>, to: Point2<i32>, color: PixelColor) {
    let (width, height) = (image.width() as i64, image.height() as i64);
    let mut line = Line::new(from, to);
    line.skip_to_canvas(width, height);

    while let Some(point) = line.next() {
        if line.past_canvas(&point, width, height) {
            break;
        }
        image.set_pixel(point.x, point.y, color);
    }
}

/// Draw the outline of a triangle: v0 to v1, v1 to v2, v2 to v0
pub fn draw_triangle(image: &mut ImageBuffer, points: [Point2<i32>; 3], color: PixelColor) {
    let [v0, v1, v2] = points;
    draw_line(image, v0, v1, color);
    draw_line(image, v1, v2, color);
    draw_line(image, v2, v0, color);
}
