/// Line rasterizer test pattern
use nalgebra::Point2;
use wire3d_core::{palette, raster, ImageBuffer, PixelColor};

/// Pattern segments laid out on a 600x600 reference canvas
const SEGMENTS: &[((i32, i32), (i32, i32), PixelColor)] = &[
    // vertical
    ((10, 100), (10, 400), palette::BLUE),
    // horizontal
    ((100, 50), (400, 50), palette::GREEN),
    // top-left to bottom-right, last pixel falls off the canvas
    ((0, 0), (600, 600), palette::RED),
    // shallow, drawn right to left
    ((300, 300), (0, 50), palette::WHITE),
    // bottom-left to top-right
    ((0, 600), (600, 0), palette::WHITE),
];

const REFERENCE_SIZE: i32 = 600;

/// Draw the pattern scaled to a `size` x `size` image
pub fn line_pattern(size: u16) -> ImageBuffer {
    let mut image = ImageBuffer::new(size, size);
    let scale = |(x, y): (i32, i32)| {
        let s = size as i32;
        Point2::new(x * s / REFERENCE_SIZE, y * s / REFERENCE_SIZE)
    };

    for &(from, to, color) in SEGMENTS {
        raster::draw_line(&mut image, scale(from), scale(to), color);
    }
    image
}
