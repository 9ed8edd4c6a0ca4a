//! Disc-shaped sampling windows
//!
//! Median and bilateral filtering sample every offset with
//! `dx² + dy² <= radius²` around the center pixel, wrapping at the image
//! edges. The offset list is computed once per run.

use crate::FilterResult;
use crate::options::{MAX_RADIUS, check_range};

/// Validate a window radius against [`MAX_RADIUS`].
pub fn check_radius(radius: u32) -> FilterResult<u16> {
    check_range("radius", i64::from(radius), 0, i64::from(MAX_RADIUS))?;
    Ok(radius as u16)
}

/// Offsets of a disc of `radius`, in row-major order.
///
/// Always contains at least the center `(0, 0)`.
pub fn disc_offsets(radius: u16) -> Vec<(i64, i64)> {
    let r = i64::from(radius);
    let r2 = r * r;
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}
