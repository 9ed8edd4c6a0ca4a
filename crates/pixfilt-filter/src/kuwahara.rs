//! Kuwahara filtering (anisotropic, edge-preserving smoothing)
//!
//! Around each pixel four square quadrants of side `radius + 1` are
//! examined, anchored at the offsets `(-r, -r)`, `(0, -r)`, `(-r, 0)` and
//! `(0, 0)` so that each shares the center pixel. The destination pixel is
//! the per-channel mean of the quadrant with the smallest spread, which is
//! the squared length of its per-channel standard deviation vector.
//! Quadrants wrap around the image edges.

use crate::FilterResult;
use crate::options::{MAX_RADIUS, OptionSpec, Setter};
use crate::registry::FilterOptions;
use crate::window::check_radius;
use pixfilt_core::{Image, Pixel, clamp_channel};
use tracing::{info, trace};

/// Kuwahara configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct KuwaharaOptions {
    /// Quadrant side minus one
    pub radius: u32,
}

impl Default for KuwaharaOptions {
    fn default() -> Self {
        KuwaharaOptions { radius: 8 }
    }
}

const KUWAHARA_OPTIONS: &[OptionSpec<KuwaharaOptions>] = &[OptionSpec {
    name: "radius",
    default: "8",
    setter: Setter::Integer {
        min: 0,
        max: MAX_RADIUS as i64,
        set: |o, v| o.radius = v as u32,
    },
}];

impl FilterOptions for KuwaharaOptions {
    const NAME: &'static str = "kuwahara";
    const DESCRIPTION: &'static str = "mean of the most uniform of four quadrants";

    fn options() -> &'static [OptionSpec<Self>] {
        KUWAHARA_OPTIONS
    }

    fn apply(&self, source: &Image, destination: &mut Image) -> FilterResult<()> {
        kuwahara_into(source, destination, self)
    }
}

/// Running sums for one quadrant.
#[derive(Debug, Clone, Copy, Default)]
struct QuadrantStats {
    sum: [f64; 4],
    sum_sq: [f64; 4],
    count: u32,
}

impl QuadrantStats {
    fn reset(&mut self) {
        *self = QuadrantStats::default();
    }

    fn add(&mut self, p: Pixel) {
        for (i, c) in p.channels().into_iter().enumerate() {
            let v = c as f64;
            self.sum[i] += v;
            self.sum_sq[i] += v * v;
        }
        self.count += 1;
    }

    fn mean(&self) -> [f64; 4] {
        let n = self.count as f64;
        self.sum.map(|s| s / n)
    }

    /// Squared length of the per-channel standard deviation vector.
    fn spread(&self) -> f64 {
        let n = self.count as f64;
        let mean = self.mean();
        let stddev: [f64; 4] =
            std::array::from_fn(|i| (self.sum_sq[i] / n - mean[i] * mean[i]).max(0.0).sqrt());
        stddev.iter().map(|s| s * s).sum()
    }
}

/// Kuwahara-filter `source` into a new image of the same size.
pub fn kuwahara(source: &Image, options: &KuwaharaOptions) -> FilterResult<Image> {
    let mut destination = Image::with_size(source.size())?;
    kuwahara_into(source, &mut destination, options)?;
    Ok(destination)
}

/// Kuwahara-filter `source` into `destination`, which must have the same size.
///
/// Ties between quadrants go to the first in anchor order. An empty
/// quadrant leaves the source pixel unchanged.
pub fn kuwahara_into(
    source: &Image,
    destination: &mut Image,
    options: &KuwaharaOptions,
) -> FilterResult<()> {
    let size = source.size();
    destination.expect_size(size)?;
    let r = i64::from(check_radius(options.radius)?);

    info!(radius = r, "kuwahara");

    let anchors: [(i64, i64); 4] = [(-r, -r), (0, -r), (-r, 0), (0, 0)];
    let mut quadrants = [QuadrantStats::default(); 4];

    for y in 0..size.height {
        trace!(row = y, "kuwahara");
        for x in 0..size.width {
            for (stats, &(ox, oy)) in quadrants.iter_mut().zip(anchors.iter()) {
                stats.reset();
                for j in 0..=r {
                    for i in 0..=r {
                        stats.add(source.get_wrapped(x as i64 + ox + i, y as i64 + oy + j));
                    }
                }
            }

            let best = quadrants
                .iter()
                .filter(|q| q.count > 0)
                .map(|q| (q.spread(), q))
                .fold(None, |best: Option<(f64, &QuadrantStats)>, cand| match best {
                    Some(b) if b.0 <= cand.0 => Some(b),
                    _ => Some(cand),
                });

            let result = match best {
                Some((_, q)) => Pixel::from_channels(q.mean().map(|m| clamp_channel(m as f32))),
                None => source.get_unchecked(x, y),
            };
            destination.set_unchecked(x, y, result);
        }
    }

    Ok(())
}
