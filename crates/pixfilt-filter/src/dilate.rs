//! Alpha-aware dilation
//!
//! Fills "transparent" pixels (alpha below a threshold) with the color of
//! the nearest "opaque" pixel (alpha at or above the threshold), then forces
//! every output pixel to full opacity.
//!
//! # Modes
//!
//! - **Sharp**: take the color of the first opaque pixel found while walking
//!   the distance-sorted offset table.
//! - **Smooth**: average every opaque pixel whose distance is within
//!   [`SMOOTH_TOLERANCE`] of the nearest one, which softens the seams between
//!   regions filled from different sources.
//!
//! Positions outside the image are skipped; there is no wraparound.

use crate::FilterResult;
use crate::distance::DistanceMethod;
use crate::offsets::OffsetTable;
use crate::options::{Choice, OptionSpec, Setter};
use crate::registry::FilterOptions;
use pixfilt_core::{Image, Pixel};
use tracing::{debug, info, trace, warn};

/// Distance band around the nearest opaque hit that smooth mode averages over.
pub const SMOOTH_TOLERANCE: f32 = 1.0;

/// Dilate configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DilateOptions {
    /// Search radius; 0 means the larger image dimension
    pub radius: u32,
    /// Alpha values below this are transparent
    pub threshold: u8,
    /// Metric ordering the search
    pub distance: DistanceMethod,
    /// Average the nearest ring instead of taking the first hit
    pub smooth: bool,
}

impl Default for DilateOptions {
    fn default() -> Self {
        DilateOptions {
            radius: 0,
            threshold: 128,
            distance: DistanceMethod::Euclidean,
            smooth: true,
        }
    }
}

const DILATE_OPTIONS: &[OptionSpec<DilateOptions>] = &[
    OptionSpec {
        name: "radius",
        default: "0",
        setter: Setter::Integer {
            min: 0,
            max: u32::MAX as i64,
            set: |o, v| o.radius = v as u32,
        },
    },
    OptionSpec {
        name: "threshold",
        default: "128",
        setter: Setter::Integer {
            min: 0,
            max: 255,
            set: |o, v| o.threshold = v as u8,
        },
    },
    OptionSpec {
        name: "distance",
        default: "euclidean",
        setter: Setter::Choice {
            names: DistanceMethod::NAMES,
            set: |o, i| {
                if let Some(method) = DistanceMethod::from_index(i) {
                    o.distance = method;
                }
            },
        },
    },
    OptionSpec {
        name: "smooth",
        default: "true",
        setter: Setter::Boolean {
            set: |o, v| o.smooth = v,
        },
    },
];

impl FilterOptions for DilateOptions {
    const NAME: &'static str = "dilate";
    const DESCRIPTION: &'static str = "fill transparent pixels from the nearest opaque pixel";

    fn options() -> &'static [OptionSpec<Self>] {
        DILATE_OPTIONS
    }

    fn apply(&self, source: &Image, destination: &mut Image) -> FilterResult<()> {
        dilate_into(source, destination, self)
    }
}

/// Dilate `source` into a new image of the same size.
pub fn dilate(source: &Image, options: &DilateOptions) -> FilterResult<Image> {
    let mut destination = Image::with_size(source.size())?;
    dilate_into(source, &mut destination, options)?;
    Ok(destination)
}

/// Dilate `source` into `destination`, which must have the same size.
pub fn dilate_into(
    source: &Image,
    destination: &mut Image,
    options: &DilateOptions,
) -> FilterResult<()> {
    let size = source.size();
    destination.expect_size(size)?;

    let radius = if options.radius == 0 {
        size.max_dimension()
    } else {
        options.radius
    };
    let threshold = options.threshold;

    info!(
        radius,
        threshold,
        distance = %options.distance,
        smooth = options.smooth,
        "dilate"
    );

    if !source.pixels().iter().any(|p| p.a >= threshold) {
        warn!(threshold, "no opaque pixels; only alpha will change");
    }

    debug!("building offset table");
    let table = OffsetTable::build(size, radius as f32, options.distance);
    debug!(entries = table.len(), "offset table built");

    for y in 0..size.height {
        trace!(row = y, "dilate");
        for x in 0..size.width {
            let p = source.get_unchecked(x, y);
            let filled = if p.a >= threshold {
                p
            } else if options.smooth {
                nearest_smooth(source, &table, x, y, threshold).unwrap_or(p)
            } else {
                nearest_sharp(source, &table, x, y, threshold).map_or(p, |t| p.with_rgb_of(t))
            };
            destination.set_unchecked(x, y, filled.with_alpha(255));
        }
    }

    Ok(())
}

/// First opaque pixel in table order.
fn nearest_sharp(
    source: &Image,
    table: &OffsetTable,
    x: u32,
    y: u32,
    threshold: u8,
) -> Option<Pixel> {
    table.iter().find_map(|o| {
        source
            .get_signed(x as i64 + o.dx as i64, y as i64 + o.dy as i64)
            .filter(|t| t.a >= threshold)
    })
}

/// Equal-weight average of the opaque pixels in the nearest distance band.
fn nearest_smooth(
    source: &Image,
    table: &OffsetTable,
    x: u32,
    y: u32,
    threshold: u8,
) -> Option<Pixel> {
    let mut first: Option<f32> = None;
    let mut sum = [0u32; 3];
    let mut count = 0u32;

    for o in table {
        if let Some(d0) = first
            && o.distance > d0 + SMOOTH_TOLERANCE
        {
            break;
        }
        let Some(t) = source.get_signed(x as i64 + o.dx as i64, y as i64 + o.dy as i64) else {
            continue;
        };
        if t.a < threshold {
            continue;
        }
        if first.is_none() {
            first = Some(o.distance);
        }
        sum[0] += t.r as u32;
        sum[1] += t.g as u32;
        sum[2] += t.b as u32;
        count += 1;
    }

    if count == 0 {
        return None;
    }
    let avg = |s: u32| ((s + count / 2) / count) as u8;
    Some(Pixel::rgb(avg(sum[0]), avg(sum[1]), avg(sum[2])))
}
