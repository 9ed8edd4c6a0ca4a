//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Grayscale, RGB and
//! CMYK sources are converted to opaque RGBA. JPEG *writing* is not
//! supported; output always goes through the PNG encoder.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use pixfilt_core::{Image, Pixel};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// An opaque RGBA [`Image`].
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let samples = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::L16 => 2,
        PixelFormat::RGB24 => 3,
        PixelFormat::CMYK32 => 4,
    };
    let expected = width as usize * height as usize * samples;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG produced {} bytes, expected {}",
            data.len(),
            expected
        )));
    }

    let pixels = data[..expected]
        .chunks_exact(samples)
        .map(|s| match info.pixel_format {
            PixelFormat::L8 => Pixel::rgb(s[0], s[0], s[0]),
            // Big-endian samples; keep the high byte
            PixelFormat::L16 => Pixel::rgb(s[0], s[0], s[0]),
            PixelFormat::RGB24 => Pixel::rgb(s[0], s[1], s[2]),
            PixelFormat::CMYK32 => cmyk_to_pixel(s[0], s[1], s[2], s[3]),
        })
        .collect();

    Ok(Image::from_pixels(width, height, pixels)?)
}

/// Naive CMYK to RGB conversion without a color profile.
fn cmyk_to_pixel(c: u8, m: u8, y: u8, k: u8) -> Pixel {
    let inv_k = 255 - k as u32;
    let channel = |v: u8| ((255 - v as u32) * inv_k / 255) as u8;
    Pixel::rgb(channel(c), channel(m), channel(y))
}
