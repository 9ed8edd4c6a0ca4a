//! PNG image format support
//!
//! Every PNG color type is decoded to 8-bit RGBA: palettes and low bit
//! depths are expanded, `tRNS` chunks become alpha and 16-bit samples are
//! stripped to their high byte. Output is always 8-bit RGBA.

use crate::{IoError, IoResult};
use pixfilt_core::{Image, Pixel};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    if bytes_per_row < width as usize * samples {
        return Err(IoError::InvalidData(format!(
            "PNG row of {} bytes is too short for {} pixels",
            bytes_per_row, width
        )));
    }

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for row in data.chunks(bytes_per_row).take(height as usize) {
        for s in row[..width as usize * samples].chunks_exact(samples) {
            let pixel = match samples {
                1 => Pixel::rgb(s[0], s[0], s[0]),
                2 => Pixel::rgba(s[0], s[0], s[0], s[1]),
                3 => Pixel::rgb(s[0], s[1], s[2]),
                _ => Pixel::rgba(s[0], s[1], s[2], s[3]),
            };
            pixels.push(pixel);
        }
    }

    Ok(Image::from_pixels(width, height, pixels)?)
}

/// Write a PNG image (8-bit RGBA)
pub fn write_png<W: Write>(image: &Image, writer: W) -> IoResult<()> {
    write_png_rows(
        &image.to_rgba_bytes(),
        image.width(),
        image.height(),
        image.stride(),
        writer,
    )
}

/// Write interleaved RGBA rows as an 8-bit RGBA PNG.
///
/// `stride` is the byte distance between row starts and must be at least
/// `width * 4`; bytes past the end of each row are ignored.
pub fn write_png_rows<W: Write>(
    rgba: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    writer: W,
) -> IoResult<()> {
    let row_bytes = width as usize * 4;
    if width == 0 || height == 0 {
        return Err(IoError::EncodeError(format!(
            "cannot encode empty image {}x{}",
            width, height
        )));
    }
    if stride < row_bytes || rgba.len() < stride * (height as usize - 1) + row_bytes {
        return Err(IoError::EncodeError(format!(
            "buffer of {} bytes with stride {} does not hold {}x{} RGBA pixels",
            rgba.len(),
            stride,
            width,
            height
        )));
    }

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let data: Vec<u8> = if stride == row_bytes {
        rgba[..row_bytes * height as usize].to_vec()
    } else {
        rgba.chunks(stride)
            .take(height as usize)
            .flat_map(|row| row[..row_bytes].iter().copied())
            .collect()
    };

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
