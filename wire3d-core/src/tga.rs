/// Uncompressed true-color TGA encoding and decoding
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use nom::{
    bytes::complete::take,
    number::complete::{le_u16, le_u8},
    IResult,
};

use crate::error::TgaError;
use crate::image::{ImageBuffer, PixelColor};

pub const HEADER_LEN: usize = 18;

/// Image type for uncompressed true-color data
pub const IMAGE_TYPE_TRUE_COLOR: u8 = 2;
/// Descriptor bit that puts row 0 at the top of the image
pub const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

const BYTES_PER_PIXEL: usize = 3;

/// The fixed 18-byte TGA file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub first_palette_entry: u16,
    pub num_palette_entries: u16,
    pub palette_bits: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub depth: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    /// Header for a 24-bit top-left origin image
    pub fn true_color(width: u16, height: u16) -> Self {
        Self {
            id_length: 0,
            color_map_type: 0,
            image_type: IMAGE_TYPE_TRUE_COLOR,
            first_palette_entry: 0,
            num_palette_entries: 0,
            palette_bits: 0,
            x_origin: 0,
            y_origin: 0,
            width,
            height,
            depth: 24,
            descriptor: DESCRIPTOR_TOP_LEFT,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0] = self.id_length;
        bytes[1] = self.color_map_type;
        bytes[2] = self.image_type;
        bytes[3..5].copy_from_slice(&self.first_palette_entry.to_le_bytes());
        bytes[5..7].copy_from_slice(&self.num_palette_entries.to_le_bytes());
        bytes[7] = self.palette_bits;
        bytes[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        bytes[12..14].copy_from_slice(&self.width.to_le_bytes());
        bytes[14..16].copy_from_slice(&self.height.to_le_bytes());
        bytes[16] = self.depth;
        bytes[17] = self.descriptor;
        bytes
    }

    fn top_left(&self) -> bool {
        self.descriptor & DESCRIPTOR_TOP_LEFT != 0
    }
}

fn parse_header(input: &[u8]) -> IResult<&[u8], TgaHeader> {
    let (input, id_length) = le_u8(input)?;
    let (input, color_map_type) = le_u8(input)?;
    let (input, image_type) = le_u8(input)?;
    let (input, first_palette_entry) = le_u16(input)?;
    let (input, num_palette_entries) = le_u16(input)?;
    let (input, palette_bits) = le_u8(input)?;
    let (input, x_origin) = le_u16(input)?;
    let (input, y_origin) = le_u16(input)?;
    let (input, width) = le_u16(input)?;
    let (input, height) = le_u16(input)?;
    let (input, depth) = le_u8(input)?;
    let (input, descriptor) = le_u8(input)?;

    Ok((
        input,
        TgaHeader {
            id_length,
            color_map_type,
            image_type,
            first_palette_entry,
            num_palette_entries,
            palette_bits,
            x_origin,
            y_origin,
            width,
            height,
            depth,
            descriptor,
        },
    ))
}

/// Write the header followed by BGR pixel data, top row first
pub fn encode<W: Write>(image: &ImageBuffer, mut writer: W) -> Result<(), TgaError> {
    let header = TgaHeader::true_color(image.width(), image.height());

    let mut data = Vec::with_capacity(HEADER_LEN + image.pixels().len() * BYTES_PER_PIXEL);
    data.extend_from_slice(&header.to_bytes());
    for pixel in image.pixels() {
        data.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
    }

    writer.write_all(&data).map_err(TgaError::Encode)?;
    writer.flush().map_err(TgaError::Encode)
}

/// Encode the image to `path`, creating or truncating the file
pub fn save<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> Result<(), TgaError> {
    let path = path.as_ref();
    let io_error = |source| TgaError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    match encode(image, BufWriter::new(file)) {
        Err(TgaError::Encode(source)) => return Err(io_error(source)),
        other => other?,
    }

    info!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Decode an uncompressed 24-bit true-color TGA image
pub fn decode(data: &[u8]) -> Result<ImageBuffer, TgaError> {
    let (rest, header) = parse_header(data).map_err(|_| TgaError::Truncated {
        expected: HEADER_LEN,
        found: data.len(),
    })?;

    if header.color_map_type != 0 || header.image_type != IMAGE_TYPE_TRUE_COLOR {
        return Err(TgaError::Unsupported(format!(
            "image type {} with color map type {}",
            header.image_type, header.color_map_type
        )));
    }
    if header.depth != 24 {
        return Err(TgaError::Unsupported(format!("{} bits per pixel", header.depth)));
    }

    let (width, height) = (header.width as usize, header.height as usize);
    let pixel_len = width * height * BYTES_PER_PIXEL;
    let expected = HEADER_LEN + header.id_length as usize + pixel_len;

    let body: IResult<&[u8], &[u8]> = take(header.id_length as usize)(rest)
        .and_then(|(rest, _id)| take(pixel_len)(rest));
    let (_, body) = body.map_err(|_| TgaError::Truncated {
        expected,
        found: data.len(),
    })?;

    let mut pixels = Vec::with_capacity(width * height);
    for row in 0..height {
        // Bottom-left origin images store the last row first
        let src_row = if header.top_left() { row } else { height - 1 - row };
        let start = src_row * width * BYTES_PER_PIXEL;
        let row_bytes = &body[start..start + width * BYTES_PER_PIXEL];
        pixels.extend(
            row_bytes
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|bgr| PixelColor::new(bgr[2], bgr[1], bgr[0])),
        );
    }

    ImageBuffer::from_pixels(header.width, header.height, pixels)
        .ok_or_else(|| TgaError::Unsupported("pixel count mismatch".to_string()))
}

/// Read and decode a TGA file
pub fn load<P: AsRef<Path>>(path: P) -> Result<ImageBuffer, TgaError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| TgaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&data)
}
