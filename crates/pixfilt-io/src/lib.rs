//! pixfilt-io - Image decoding and encoding
//!
//! Decoding sniffs the format from magic bytes and converts PNG and JPEG
//! sources to 8-bit RGBA [`Image`]s. Encoding always produces PNG.
//!
//! # Example
//!
//! ```no_run
//! use pixfilt_io::{read_image, write_image};
//!
//! let image = read_image("input.jpg")?;
//! write_image(&image, "output.png")?;
//! # Ok::<(), pixfilt_io::IoError>(())
//! ```

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format_from_bytes};

use pixfilt_core::Image;
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// Decode an in-memory image file.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unrecognized or disabled
/// formats and [`IoError::DecodeError`] for corrupt data.
pub fn decode_image(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} images cannot be decoded",
            other
        ))),
    }
}

/// Read an entire file into memory.
pub fn read_file<P: AsRef<Path>>(path: P) -> IoResult<Vec<u8>> {
    Ok(std::fs::read(path)?)
}

/// Read and decode an image file.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let data = read_file(path)?;
    decode_image(&data)
}

/// Encode an image as PNG into a byte vector.
#[cfg(feature = "png-format")]
pub fn encode_png(image: &Image) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    png::write_png(image, &mut buffer)?;
    Ok(buffer)
}

/// Write an image to a file path as PNG.
///
/// The file is created or truncated.
#[cfg(feature = "png-format")]
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    png::write_png(image, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilt_core::Pixel;

    #[test]
    fn test_decode_encoded_png() {
        let image = Image::filled(3, 2, Pixel::rgba(1, 2, 3, 4)).unwrap();
        let bytes = encode_png(&image).unwrap();
        assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Png);
        assert_eq!(decode_image(&bytes).unwrap(), image);
    }

    #[test]
    fn test_decode_unsupported() {
        let err = decode_image(b"GIF89a\x01\x00\x01\x00").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_file("/nonexistent/pixfilt/input.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
