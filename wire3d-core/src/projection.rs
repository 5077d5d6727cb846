/// Orthographic projection from normalized device coordinates to pixels
use nalgebra::{Point2, Point3};

use crate::image::ImageBuffer;

/// Lower bound of the normalized coordinate cube
pub const NDC_MIN: f32 = -1.0;
/// Upper bound of the normalized coordinate cube
pub const NDC_MAX: f32 = 1.0;

/// Target raster for projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn for_image(image: &ImageBuffer) -> Self {
        Self::new(image.width() as u32, image.height() as u32)
    }

    /// Map an x coordinate in `[-1, 1]` to a column in `[0, width - 1]`.
    ///
    /// Values outside the range are extrapolated, not clamped.
    pub fn project_x(&self, x: f32) -> i32 {
        to_pixel(normalize(x), self.width)
    }

    /// Map a y coordinate in `[-1, 1]` to a row in `[0, height - 1]`.
    ///
    /// The axis is flipped: y = 1 lands on row 0 at the top of the image.
    pub fn project_y(&self, y: f32) -> i32 {
        to_pixel(1.0 - normalize(y), self.height)
    }

    /// Project a point onto the raster, dropping z
    pub fn project(&self, point: &Point3<f32>) -> Point2<i32> {
        Point2::new(self.project_x(point.x), self.project_y(point.y))
    }
}

fn normalize(c: f32) -> f32 {
    (c - NDC_MIN) / (NDC_MAX - NDC_MIN)
}

/// Truncates toward zero; `as` saturates values beyond the `i32` range
fn to_pixel(t: f32, dimension: u32) -> i32 {
    (t * (dimension as f32 - 1.0)) as i32
}
