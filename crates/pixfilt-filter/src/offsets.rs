//! Distance-sorted offset tables
//!
//! Nearest-neighbor searches probe a single shared table of offsets in
//! increasing distance and stop at the first hit. The table is built once
//! per filter run, which turns the per-pixel search into a linear scan with
//! early exit.
//!
//! # Scan window
//!
//! Offsets are enumerated over a window centered on the origin with exactly
//! the image's own dimensions: `dx = ix - width/2` for `ix in 0..width` and
//! `dy = iy - height/2` for `iy in 0..height`. Every offset in that window
//! whose distance is at most the radius is kept.

use crate::distance::DistanceMethod;
use pixfilt_core::Size;

/// A signed displacement with its distance under the table's metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
    pub distance: f32,
}

/// Offsets within a radius, sorted by ascending distance.
#[derive(Debug, Clone)]
pub struct OffsetTable {
    offsets: Vec<Offset>,
    radius: f32,
    metric: DistanceMethod,
}

impl OffsetTable {
    /// Build the table for an image of `size`.
    ///
    /// Ties keep scan order (row-major over the window).
    pub fn build(size: Size, radius: f32, metric: DistanceMethod) -> Self {
        let half_w = (size.width / 2) as i32;
        let half_h = (size.height / 2) as i32;

        let mut offsets = Vec::new();
        for iy in 0..size.height as i32 {
            for ix in 0..size.width as i32 {
                let dx = ix - half_w;
                let dy = iy - half_h;
                let distance = metric.length(dx, dy);
                if distance <= radius {
                    offsets.push(Offset { dx, dy, distance });
                }
            }
        }

        offsets.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        OffsetTable {
            offsets,
            radius,
            metric,
        }
    }

    /// Offsets in ascending distance order.
    #[inline]
    pub fn as_slice(&self) -> &[Offset] {
        &self.offsets
    }

    /// Iterate over offsets in ascending distance order.
    pub fn iter(&self) -> std::slice::Iter<'_, Offset> {
        self.offsets.iter()
    }

    /// Number of offsets.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Check whether the table has no offsets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Radius the table was built with.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Metric the table was built with.
    #[inline]
    pub fn metric(&self) -> DistanceMethod {
        self.metric
    }
}

impl<'a> IntoIterator for &'a OffsetTable {
    type Item = &'a Offset;
    type IntoIter = std::slice::Iter<'a, Offset>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const METRICS: [DistanceMethod; 3] = [
        DistanceMethod::Euclidean,
        DistanceMethod::Manhattan,
        DistanceMethod::Chebyshev,
    ];

    #[test]
    fn test_table_is_complete_and_unique() {
        for size in [Size::new(7, 5), Size::new(8, 8), Size::new(1, 1), Size::new(10, 3)] {
            for metric in METRICS {
                for radius in [0.0f32, 1.0, 1.5, 2.0, 3.0, 100.0] {
                    let table = OffsetTable::build(size, radius, metric);

                    let mut seen = HashSet::new();
                    for o in &table {
                        assert!(o.distance <= radius);
                        assert_eq!(o.distance, metric.length(o.dx, o.dy));
                        assert!(seen.insert((o.dx, o.dy)), "duplicate {:?}", o);
                    }

                    let half_w = (size.width / 2) as i32;
                    let half_h = (size.height / 2) as i32;
                    let mut expected = 0;
                    for dy in -half_h..(size.height as i32 - half_h) {
                        for dx in -half_w..(size.width as i32 - half_w) {
                            if metric.length(dx, dy) <= radius {
                                expected += 1;
                                assert!(seen.contains(&(dx, dy)));
                            }
                        }
                    }
                    assert_eq!(table.len(), expected);
                }
            }
        }
    }

    #[test]
    fn test_table_sorted() {
        let table = OffsetTable::build(Size::new(9, 9), 4.0, DistanceMethod::Euclidean);
        assert!(
            table
                .as_slice()
                .windows(2)
                .all(|w| w[0].distance <= w[1].distance)
        );
        let first = table.as_slice()[0];
        assert_eq!((first.dx, first.dy), (0, 0));
    }

    #[test]
    fn test_window_is_asymmetric_for_even_sizes() {
        // Width 4 scans dx in [-2, 2): dx = 2 never appears
        let table = OffsetTable::build(Size::new(4, 4), 10.0, DistanceMethod::Chebyshev);
        assert_eq!(table.len(), 16);
        assert!(table.iter().all(|o| o.dx >= -2 && o.dx < 2));
        assert!(table.iter().any(|o| o.dx == -2));
    }

    #[test]
    fn test_radius_zero_keeps_only_origin() {
        let table = OffsetTable::build(Size::new(5, 5), 0.0, DistanceMethod::Manhattan);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
        assert_eq!(table.radius(), 0.0);
        assert_eq!(table.metric(), DistanceMethod::Manhattan);
    }

    #[test]
    fn test_manhattan_ring_counts() {
        // Manhattan disc of radius 2 has 1 + 4 + 8 = 13 offsets
        let table = OffsetTable::build(Size::new(11, 11), 2.0, DistanceMethod::Manhattan);
        assert_eq!(table.len(), 13);
        let ring1 = table.iter().filter(|o| o.distance == 1.0).count();
        assert_eq!(ring1, 4);
    }
}
