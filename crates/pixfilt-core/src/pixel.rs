//! RGBA pixel type
//!
//! Every image in pixfilt stores four unsigned 8-bit channels per pixel in
//! R, G, B, A order. There is no colormap, no packed depth and no color
//! space handling beyond the raw bytes.

/// A single RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black.
    pub const TRANSPARENT: Pixel = Pixel::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    /// Compose an RGBA pixel.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel { r, g, b, a }
    }

    /// Compose an opaque RGB pixel (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b, a: 255 }
    }

    /// Build a pixel from `[r, g, b, a]`.
    #[inline]
    pub const fn from_channels(c: [u8; 4]) -> Self {
        Pixel::rgba(c[0], c[1], c[2], c[3])
    }

    /// The four channels as `[r, g, b, a]`.
    #[inline]
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Pixel { a, ..self }
    }

    /// Same alpha with the color channels of `other`.
    #[inline]
    pub const fn with_rgb_of(self, other: Pixel) -> Self {
        Pixel {
            r: other.r,
            g: other.g,
            b: other.b,
            a: self.a,
        }
    }

    /// Luma scaled by 1000: `299 R + 587 G + 114 B`.
    ///
    /// Integer form of the `0.299 / 0.587 / 0.114` weights, so ordering by
    /// this key is exact. Alpha does not participate.
    #[inline]
    pub const fn luma_milli(self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }

    /// Sum of absolute channel differences over all four channels.
    ///
    /// Ranges from 0 to 1020.
    #[inline]
    pub fn manhattan(self, other: Pixel) -> u32 {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .map(|(&a, &b)| a.abs_diff(b) as u32)
            .sum()
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(c: [u8; 4]) -> Self {
        Pixel::from_channels(c)
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(p: Pixel) -> Self {
        p.channels()
    }
}

/// Round an `f32` channel value and clamp it to `[0, 255]`.
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value + 0.5).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_roundtrip() {
        let p = Pixel::rgba(1, 2, 3, 4);
        assert_eq!(p.channels(), [1, 2, 3, 4]);
        assert_eq!(Pixel::from_channels([1, 2, 3, 4]), p);
        let arr: [u8; 4] = p.into();
        assert_eq!(Pixel::from(arr), p);
    }

    #[test]
    fn test_luma_weights() {
        assert_eq!(Pixel::rgb(255, 255, 255).luma_milli(), 255_000);
        assert_eq!(Pixel::rgb(0, 0, 0).luma_milli(), 0);
        // Green dominates red, red dominates blue
        assert!(Pixel::rgb(0, 10, 0).luma_milli() > Pixel::rgb(10, 0, 0).luma_milli());
        assert!(Pixel::rgb(10, 0, 0).luma_milli() > Pixel::rgb(0, 0, 10).luma_milli());
        // Alpha is ignored
        assert_eq!(
            Pixel::rgba(7, 8, 9, 0).luma_milli(),
            Pixel::rgba(7, 8, 9, 255).luma_milli()
        );
    }

    #[test]
    fn test_manhattan() {
        let a = Pixel::rgba(0, 0, 0, 0);
        let b = Pixel::rgba(255, 255, 255, 255);
        assert_eq!(a.manhattan(b), 1020);
        assert_eq!(b.manhattan(a), 1020);
        assert_eq!(Pixel::rgba(10, 20, 30, 40).manhattan(Pixel::rgba(12, 18, 30, 41)), 5);
    }

    #[test]
    fn test_with_alpha_and_rgb() {
        let p = Pixel::rgba(10, 20, 30, 0);
        assert_eq!(p.with_alpha(255), Pixel::rgb(10, 20, 30));
        assert_eq!(p.with_rgb_of(Pixel::WHITE), Pixel::rgba(255, 255, 255, 0));
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-3.0), 0);
        assert_eq!(clamp_channel(127.4), 127);
        assert_eq!(clamp_channel(127.5), 128);
        assert_eq!(clamp_channel(300.0), 255);
        assert_eq!(clamp_channel(f32::NAN), 0);
    }
}
