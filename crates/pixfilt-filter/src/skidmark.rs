//! Radial "skidmark" resampling
//!
//! Produces one output row per angular slice. For slice `s` of `slices` the
//! source is rotated by `π·s/slices` around its center `(width/2, height/2)`
//! and every column inside the circular mask of radius `width/2` is
//! collapsed into a single pixel. The result is `width x slices`.
//!
//! Samples that rotate outside the source are skipped. With
//! [`BlendMethod::Average`] each channel sum is divided by the source height,
//! so columns near the mask rim come out darker; [`BlendMethod::Sum`] clamps
//! the raw sums to 255.

use std::f64::consts::PI;
use std::fmt;

use crate::FilterResult;
use crate::options::{Choice, MAX_SLICES, OptionSpec, Setter, check_range};
use crate::registry::FilterOptions;
use pixfilt_core::{Image, Pixel, Size};
use tracing::{debug, info, trace};

/// How the samples of one column are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMethod {
    /// Channel sums divided by the source height, rounded
    #[default]
    Average,
    /// Channel sums clamped to 255
    Sum,
}

impl Choice for BlendMethod {
    const NAMES: &'static [&'static str] = &["average", "sum"];

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(BlendMethod::Average),
            1 => Some(BlendMethod::Sum),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            BlendMethod::Average => 0,
            BlendMethod::Sum => 1,
        }
    }
}

impl fmt::Display for BlendMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Skidmark configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SkidmarkOptions {
    /// Number of angular slices (output rows), at least 1
    pub slices: u32,
    pub blend: BlendMethod,
}

impl Default for SkidmarkOptions {
    fn default() -> Self {
        SkidmarkOptions {
            slices: 36,
            blend: BlendMethod::Average,
        }
    }
}

const SKIDMARK_OPTIONS: &[OptionSpec<SkidmarkOptions>] = &[
    OptionSpec {
        name: "slices",
        default: "36",
        setter: Setter::Integer {
            min: 1,
            max: MAX_SLICES as i64,
            set: |o, v| o.slices = v as u32,
        },
    },
    OptionSpec {
        name: "blend",
        default: "average",
        setter: Setter::Choice {
            names: BlendMethod::NAMES,
            set: |o, i| {
                if let Some(method) = BlendMethod::from_index(i) {
                    o.blend = method;
                }
            },
        },
    },
];

impl FilterOptions for SkidmarkOptions {
    const NAME: &'static str = "skidmark";
    const DESCRIPTION: &'static str = "collapse rotated columns into one row per angle";

    fn options() -> &'static [OptionSpec<Self>] {
        SKIDMARK_OPTIONS
    }

    fn destination_size(&self, source: Size) -> Size {
        Size::new(source.width, self.slices)
    }

    fn apply(&self, source: &Image, destination: &mut Image) -> FilterResult<()> {
        skidmark_into(source, destination, self)
    }
}

pub(crate) fn check_slices(slices: u32) -> FilterResult<()> {
    check_range("slices", i64::from(slices), 1, i64::from(MAX_SLICES))
}

/// Resample `source` into a new `width x slices` image.
pub fn skidmark(source: &Image, options: &SkidmarkOptions) -> FilterResult<Image> {
    check_slices(options.slices)?;
    let mut destination = Image::with_size(options.destination_size(source.size()))?;
    skidmark_into(source, &mut destination, options)?;
    Ok(destination)
}

/// Resample `source` into `destination`, which must be `width x slices`.
pub fn skidmark_into(
    source: &Image,
    destination: &mut Image,
    options: &SkidmarkOptions,
) -> FilterResult<()> {
    check_slices(options.slices)?;
    let size = source.size();
    destination.expect_size(options.destination_size(size))?;

    let slices = options.slices;
    info!(slices, blend = %options.blend, "skidmark");

    let cx = (size.width / 2) as i64;
    let cy = (size.height / 2) as i64;
    let r = (size.width / 2) as i64;
    let r2 = r * r;
    let height = size.height;
    debug!(cx, cy, mask_radius = r, "skidmark geometry");

    for s in 0..slices {
        trace!(slice = s, "skidmark");
        let angle = PI * s as f64 / slices as f64;
        let (sin, cos) = angle.sin_cos();

        for x in 0..size.width {
            let dx = x as i64 - cx;
            let mut sum = [0u32; 4];

            for y in 0..height {
                let dy = y as i64 - cy;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let (fx, fy) = (dx as f64, dy as f64);
                let sx = (cx as f64 + fx * cos - fy * sin).round() as i64;
                let sy = (cy as f64 + fx * sin + fy * cos).round() as i64;
                let Some(p) = source.get_signed(sx, sy) else {
                    continue;
                };
                for (acc, c) in sum.iter_mut().zip(p.channels()) {
                    *acc += c as u32;
                }
            }

            let blended = match options.blend {
                BlendMethod::Sum => sum.map(|v| v.min(255) as u8),
                BlendMethod::Average => sum.map(|v| ((v + height / 2) / height).min(255) as u8),
            };
            destination.set_unchecked(x, s, Pixel::from_channels(blended));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_size() {
        let options = SkidmarkOptions {
            slices: 7,
            ..SkidmarkOptions::default()
        };
        assert_eq!(options.destination_size(Size::new(5, 3)), Size::new(5, 7));

        let src = Image::new(5, 3).unwrap();
        let out = skidmark(&src, &options).unwrap();
        assert_eq!(out.size(), Size::new(5, 7));
    }

    #[test]
    fn test_single_slice_average_uses_mask() {
        // 4x4, center (2, 2), mask radius 2
        let src = Image::filled(4, 4, Pixel::rgba(100, 100, 100, 100)).unwrap();
        let options = SkidmarkOptions {
            slices: 1,
            blend: BlendMethod::Average,
        };
        let out = skidmark(&src, &options).unwrap();
        // Column 0: only dy = 0 is inside the mask, 100 / 4 rounds to 25
        assert_eq!(out.get(0, 0), Some(Pixel::rgba(25, 25, 25, 25)));
        // Columns 1 and 3: dy in -1..=1
        assert_eq!(out.get(1, 0), Some(Pixel::rgba(75, 75, 75, 75)));
        assert_eq!(out.get(3, 0), Some(Pixel::rgba(75, 75, 75, 75)));
        // Column 2: all four rows
        assert_eq!(out.get(2, 0), Some(Pixel::rgba(100, 100, 100, 100)));
    }

    #[test]
    fn test_sum_blend_clamps() {
        let src = Image::filled(4, 4, Pixel::rgba(100, 100, 100, 100)).unwrap();
        let options = SkidmarkOptions {
            slices: 1,
            blend: BlendMethod::Sum,
        };
        let out = skidmark(&src, &options).unwrap();
        assert_eq!(out.get(0, 0), Some(Pixel::rgba(100, 100, 100, 100)));
        assert_eq!(out.get(2, 0), Some(Pixel::rgba(255, 255, 255, 255)));
    }

    #[test]
    fn test_quarter_turn_moves_vertical_line() {
        // 5x5 black with a red vertical line at x = 2
        let mut src = Image::filled(5, 5, Pixel::BLACK).unwrap();
        for y in 0..5 {
            src.set(2, y, Pixel::rgb(250, 0, 0)).unwrap();
        }
        let out = skidmark(
            &src,
            &SkidmarkOptions {
                slices: 2,
                blend: BlendMethod::Average,
            },
        )
        .unwrap();

        // Slice 0 is unrotated: the center column is the line itself
        assert_eq!(out.get(2, 0).map(|p| p.r), Some(250));
        assert_eq!(out.get(0, 0).map(|p| p.r), Some(0));

        // Slice 1 rotates by 90 degrees: every column crosses the line once
        for x in 0..5 {
            assert_eq!(out.get(x, 1).map(|p| p.r), Some(50));
        }
    }

    #[test]
    fn test_blend_choice_names() {
        assert_eq!(BlendMethod::from_name("sum"), Some(BlendMethod::Sum));
        assert_eq!(BlendMethod::from_name("Sum"), None);
        assert_eq!(BlendMethod::Average.to_string(), "average");
    }
}
