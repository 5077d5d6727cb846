/// In-memory pixel grid that the rasterizer draws into
use std::path::Path;

use crate::error::TgaError;
use crate::tga;

/// A 24-bit true-color pixel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Row-major pixel grid with row 0 at the top of the image.
///
/// The dimensions are 16-bit because that is what the image header can
/// describe. `pixels.len() == width * height` holds for the whole lifetime
/// of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u16,
    height: u16,
    pixels: Vec<PixelColor>,
}

impl ImageBuffer {
    /// Allocate a black image of the given size
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![PixelColor::default(); width as usize * height as usize],
        }
    }

    /// Build an image from row-major pixel data, `None` if the length does
    /// not match the dimensions.
    pub fn from_pixels(width: u16, height: u16, pixels: Vec<PixelColor>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[PixelColor] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Write a pixel. Coordinates outside the image are silently dropped,
    /// which is how lines running off the canvas get clipped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: PixelColor) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<PixelColor> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Reset every pixel to black
    pub fn clear(&mut self) {
        self.pixels.fill(PixelColor::default());
    }

    /// Encode the image as an uncompressed TGA file, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TgaError> {
        tga::save(self, path)
    }
}
