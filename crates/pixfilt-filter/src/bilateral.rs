//! Bilateral filtering (edge-preserving smoothing)
//!
//! Each destination pixel is a weighted average over a disc-shaped
//! neighborhood (wrapping at the image edges). Spatial weights are flat; the
//! range weight falls off linearly with the color difference to the center:
//!
//! ```text
//! w = 1 - clamp(manhattan(center, sample) / 765 * scale, 0, 1)
//! ```
//!
//! where `manhattan` sums absolute differences over all four RGBA channels.
//! `scale = 0` turns the filter into a plain disc average; larger scales
//! suppress dissimilar neighbors more aggressively.

use crate::FilterResult;
use crate::options::{MAX_RADIUS, OptionSpec, Setter};
use crate::registry::FilterOptions;
use crate::window::{check_radius, disc_offsets};
use pixfilt_core::{Image, Pixel, clamp_channel};
use tracing::{info, trace};

/// Normalizer for the color distance (three 8-bit channels at full range).
pub const COLOR_RANGE: f32 = 255.0 * 3.0;

/// Upper bound for [`BilateralOptions::scale`].
pub const MAX_SCALE: f32 = 10.0;

/// Bilateral configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BilateralOptions {
    /// Disc radius in pixels
    pub radius: u32,
    /// Edge sensitivity, clamped to `[0, 10]`
    pub scale: f32,
}

impl Default for BilateralOptions {
    fn default() -> Self {
        BilateralOptions {
            radius: 8,
            scale: 1.0,
        }
    }
}

const BILATERAL_OPTIONS: &[OptionSpec<BilateralOptions>] = &[
    OptionSpec {
        name: "radius",
        default: "8",
        setter: Setter::Integer {
            min: 0,
            max: MAX_RADIUS as i64,
            set: |o, v| o.radius = v as u32,
        },
    },
    OptionSpec {
        name: "scale",
        default: "1.0",
        setter: Setter::Float {
            set: |o, v| o.scale = v.clamp(0.0, MAX_SCALE),
        },
    },
];

impl FilterOptions for BilateralOptions {
    const NAME: &'static str = "bilateral";
    const DESCRIPTION: &'static str = "edge-preserving weighted average";

    fn options() -> &'static [OptionSpec<Self>] {
        BILATERAL_OPTIONS
    }

    fn apply(&self, source: &Image, destination: &mut Image) -> FilterResult<()> {
        bilateral_into(source, destination, self)
    }
}

/// Range weight of `sample` relative to `center`.
#[inline]
pub fn range_weight(center: Pixel, sample: Pixel, scale: f32) -> f32 {
    let d = center.manhattan(sample) as f32;
    1.0 - (d / COLOR_RANGE * scale).clamp(0.0, 1.0)
}

/// Bilateral-filter `source` into a new image of the same size.
pub fn bilateral(source: &Image, options: &BilateralOptions) -> FilterResult<Image> {
    let mut destination = Image::with_size(source.size())?;
    bilateral_into(source, &mut destination, options)?;
    Ok(destination)
}

/// Bilateral-filter `source` into `destination`, which must have the same size.
///
/// A zero total weight leaves the source pixel unchanged.
pub fn bilateral_into(
    source: &Image,
    destination: &mut Image,
    options: &BilateralOptions,
) -> FilterResult<()> {
    let size = source.size();
    destination.expect_size(size)?;
    let radius = check_radius(options.radius)?;

    let scale = options.scale.clamp(0.0, MAX_SCALE);
    info!(radius = options.radius, scale, "bilateral");

    let disc = disc_offsets(radius);

    for y in 0..size.height {
        trace!(row = y, "bilateral");
        for x in 0..size.width {
            let center = source.get_unchecked(x, y);

            let mut sum = [0.0f32; 4];
            let mut weight_sum = 0.0f32;
            for &(dx, dy) in &disc {
                let sample = source.get_wrapped(x as i64 + dx, y as i64 + dy);
                let w = range_weight(center, sample, scale);
                for (acc, c) in sum.iter_mut().zip(sample.channels()) {
                    *acc += c as f32 * w;
                }
                weight_sum += w;
            }

            let result = if weight_sum > 0.0 {
                Pixel::from_channels(sum.map(|s| clamp_channel(s / weight_sum)))
            } else {
                center
            };
            destination.set_unchecked(x, y, result);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_weight() {
        let a = Pixel::rgba(0, 0, 0, 255);
        assert_eq!(range_weight(a, a, 1.0), 1.0);
        // 255 apart on one channel: 1/3 of the range
        let b = Pixel::rgba(255, 0, 0, 255);
        assert!((range_weight(a, b, 1.0) - 2.0 / 3.0).abs() < 1e-6);
        // Scale 3 drives it to zero
        assert_eq!(range_weight(a, b, 3.0), 0.0);
        // Scale 0 ignores color
        assert_eq!(range_weight(a, Pixel::rgba(255, 255, 255, 0), 0.0), 1.0);
        // Four channels can exceed the range; clamp keeps weight at 0
        assert_eq!(range_weight(Pixel::TRANSPARENT, Pixel::WHITE, 1.0), 0.0);
    }

    #[test]
    fn test_radius_zero_is_identity() {
        let mut src = Image::new(3, 3).unwrap();
        for (i, p) in src.pixels_mut().iter_mut().enumerate() {
            *p = Pixel::rgba(i as u8 * 25, 7, 200 - i as u8, 255);
        }
        let out = bilateral(&src, &BilateralOptions { radius: 0, scale: 1.0 }).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let src = Image::filled(6, 4, Pixel::rgba(12, 34, 56, 78)).unwrap();
        let out = bilateral(&src, &BilateralOptions::default()).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_scale_zero_is_disc_average() {
        // 3x3 with one bright pixel; radius 1 plus-window of 5 samples
        let mut src = Image::filled(3, 3, Pixel::rgba(0, 0, 0, 255)).unwrap();
        src.set(1, 1, Pixel::rgba(250, 100, 50, 255)).unwrap();
        let out = bilateral(&src, &BilateralOptions { radius: 1, scale: 0.0 }).unwrap();
        assert_eq!(out.get(1, 1), Some(Pixel::rgba(50, 20, 10, 255)));
        assert_eq!(out.get(1, 0), Some(Pixel::rgba(50, 20, 10, 255)));
        // (0, 0) neighbors: (2,0), (1,0), (0,2), (0,1) and itself; none bright
        assert_eq!(out.get(0, 0), Some(Pixel::rgba(0, 0, 0, 255)));
    }

    #[test]
    fn test_high_scale_preserves_edges() {
        // Left half black, right half white: every neighbor across the edge
        // is 765 away, so with scale >= 1 it gets zero weight.
        let mut src = Image::filled(8, 8, Pixel::rgb(0, 0, 0)).unwrap();
        for y in 0..8 {
            for x in 4..8 {
                src.set(x, y, Pixel::WHITE).unwrap();
            }
        }
        let out = bilateral(&src, &BilateralOptions { radius: 2, scale: 1.0 }).unwrap();
        assert_eq!(out, src);
    }
}
