//! Image - the RGBA pixel buffer
//!
//! An [`Image`] is a flat, row-major sequence of [`Pixel`] with an explicit
//! [`Size`]. Filters never mutate their source: they read one `Image` and
//! write a separately allocated destination `Image`.
//!
//! # Pixel layout
//!
//! - Pixel `(x, y)` lives at index `y * width + x`
//! - Rows are tightly packed; the byte stride of a row is `width * 4`
//! - Width and height are always non-zero

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    /// Number of pixels covered by this size.
    #[inline]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The larger of width and height.
    #[inline]
    pub fn max_dimension(self) -> u32 {
        self.width.max(self.height)
    }

    /// Check whether both dimensions are non-zero.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Wrap a signed coordinate into `[0, len)` (toroidal indexing).
#[inline]
pub fn wrap_coord(v: i64, len: u32) -> u32 {
    v.rem_euclid(len as i64) as u32
}

/// Row-major RGBA image buffer.
///
/// # Examples
///
/// ```
/// use pixfilt_core::{Image, Pixel};
///
/// let mut image = Image::new(4, 3).unwrap();
/// image.set(1, 2, Pixel::WHITE).unwrap();
/// assert_eq!(image.get(1, 2), Some(Pixel::WHITE));
/// assert_eq!(image.get(4, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    size: Size,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Create a new image filled with transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    /// Create a new image of the given size filled with transparent black.
    pub fn with_size(size: Size) -> Result<Self> {
        Self::new(size.width, size.height)
    }

    /// Create a new image where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        let size = Size::new(width, height);
        if !size.is_valid() {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Image {
            size,
            pixels: vec![pixel; size.area()],
        })
    }

    /// Wrap an existing row-major pixel vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferLength`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let size = Size::new(width, height);
        if !size.is_valid() {
            return Err(Error::InvalidDimension { width, height });
        }
        if pixels.len() != size.area() {
            return Err(Error::BufferLength {
                expected: size.area(),
                actual: pixels.len(),
            });
        }
        Ok(Image { size, pixels })
    }

    /// Interleaved RGBA bytes, tightly packed (stride = `width * 4`).
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.channels()).collect()
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Get the image size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.size.width as usize * 4
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// All pixels in row-major order, mutable.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    /// Check whether a signed coordinate lies inside the image.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.size.width as i64 && y < self.size.height as i64
    }

    /// Get a pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.size.width && y < self.size.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a pixel without bounds checking against the image width.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is past the end of the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    /// Get a pixel at a signed coordinate, skipping out-of-range positions.
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<Pixel> {
        if self.contains(x, y) {
            Some(self.get_unchecked(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Get a pixel at a signed coordinate with toroidal wraparound.
    ///
    /// Coordinates outside `[0, width)` / `[0, height)` wrap modulo the
    /// image dimension instead of being clamped.
    #[inline]
    pub fn get_wrapped(&self, x: i64, y: i64) -> Pixel {
        self.get_unchecked(
            wrap_coord(x, self.size.width),
            wrap_coord(y, self.size.height),
        )
    }

    /// Set a pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<()> {
        if x >= self.size.width || y >= self.size.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.size.width,
                height: self.size.height,
            });
        }
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
        Ok(())
    }

    /// Set a pixel without bounds checking against the image width.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, pixel: Pixel) {
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
    }

    /// Verify that this image has the expected size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn expect_size(&self, expected: Size) -> Result<()> {
        if self.size != expected {
            return Err(Error::DimensionMismatch {
                expected: (expected.width, expected.height),
                actual: (self.size.width, self.size.height),
            });
        }
        Ok(())
    }

    /// Iterate over `(x, y, pixel)` in row-major order.
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let w = self.size.width;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &p)| ((i as u32) % w, (i as u32) / w, p))
    }
}
