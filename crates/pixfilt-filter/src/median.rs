//! Percentile (rank) filtering by luma
//!
//! Every destination pixel is the source pixel at a given percentile of its
//! disc-shaped neighborhood, ranked by luma. Whole RGBA pixels are selected,
//! so no new colors are introduced. The neighborhood wraps around the image
//! edges.
//!
//! `percent = 50` is the classic median; 0 and 100 select the darkest and
//! brightest neighbor.

use crate::FilterResult;
use crate::options::{MAX_RADIUS, OptionSpec, Setter};
use crate::registry::FilterOptions;
use crate::window::{check_radius, disc_offsets};
use pixfilt_core::{Image, Pixel};
use tracing::{info, trace};

/// Median configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MedianOptions {
    /// Disc radius in pixels
    pub radius: u32,
    /// Percentile to select, clamped to `[0, 100]`
    pub percent: u32,
}

impl Default for MedianOptions {
    fn default() -> Self {
        MedianOptions {
            radius: 8,
            percent: 50,
        }
    }
}

const MEDIAN_OPTIONS: &[OptionSpec<MedianOptions>] = &[
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
        name: "percent",
        default: "50",
        setter: Setter::Integer {
            min: i64::MIN,
            max: i64::MAX,
            set: |o, v| o.percent = v.clamp(0, 100) as u32,
        },
    },
];

impl FilterOptions for MedianOptions {
    const NAME: &'static str = "median";
    const DESCRIPTION: &'static str = "select a luma percentile from a disc neighborhood";

    fn options() -> &'static [OptionSpec<Self>] {
        MEDIAN_OPTIONS
    }

    fn apply(&self, source: &Image, destination: &mut Image) -> FilterResult<()> {
        median_into(source, destination, self)
    }
}

/// Rank of the selected element in a sorted window of `count` samples.
#[inline]
pub fn percentile_rank(count: usize, percent: u32) -> usize {
    let percent = percent.min(100) as usize;
    (count * percent / 100).min(count.saturating_sub(1))
}

/// Median-filter `source` into a new image of the same size.
pub fn median(source: &Image, options: &MedianOptions) -> FilterResult<Image> {
    let mut destination = Image::with_size(source.size())?;
    median_into(source, &mut destination, options)?;
    Ok(destination)
}

/// Median-filter `source` into `destination`, which must have the same size.
pub fn median_into(
    source: &Image,
    destination: &mut Image,
    options: &MedianOptions,
) -> FilterResult<()> {
    let size = source.size();
    destination.expect_size(size)?;
    let radius = check_radius(options.radius)?;

    let percent = options.percent.min(100);
    info!(radius = options.radius, percent, "median");

    let disc = disc_offsets(radius);
    let rank = percentile_rank(disc.len(), percent);
    let mut window: Vec<Pixel> = Vec::with_capacity(disc.len());

    for y in 0..size.height {
        trace!(row = y, "median");
        for x in 0..size.width {
            window.clear();
            window.extend(
                disc.iter()
                    .map(|&(dx, dy)| source.get_wrapped(x as i64 + dx, y as i64 + dy)),
            );
            window.sort_by_key(|p| p.luma_milli());
            destination.set_unchecked(x, y, window[rank]);
        }
    }

    Ok(())
}
