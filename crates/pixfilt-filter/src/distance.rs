//! Distance metrics over 2D integer offsets

use crate::options::Choice;
use std::fmt;

/// Metric used to order neighbors by distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceMethod {
    /// `sqrt(dx² + dy²)`
    #[default]
    Euclidean,
    /// `|dx| + |dy|`
    Manhattan,
    /// `max(|dx|, |dy|)`
    Chebyshev,
}

impl DistanceMethod {
    /// Distance of the offset `(dx, dy)` from the origin.
    #[inline]
    pub fn length(self, dx: i32, dy: i32) -> f32 {
        match self {
            DistanceMethod::Euclidean => ((dx as f32).powi(2) + (dy as f32).powi(2)).sqrt(),
            DistanceMethod::Manhattan => (dx.unsigned_abs() + dy.unsigned_abs()) as f32,
            DistanceMethod::Chebyshev => dx.unsigned_abs().max(dy.unsigned_abs()) as f32,
        }
    }
}

impl Choice for DistanceMethod {
    const NAMES: &'static [&'static str] = &["euclidean", "manhattan", "chebyshev"];

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(DistanceMethod::Euclidean),
            1 => Some(DistanceMethod::Manhattan),
            2 => Some(DistanceMethod::Chebyshev),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        assert_eq!(DistanceMethod::Euclidean.length(3, -4), 5.0);
        assert_eq!(DistanceMethod::Manhattan.length(3, -4), 7.0);
        assert_eq!(DistanceMethod::Chebyshev.length(3, -4), 4.0);
        for m in [
            DistanceMethod::Euclidean,
            DistanceMethod::Manhattan,
            DistanceMethod::Chebyshev,
        ] {
            assert_eq!(m.length(0, 0), 0.0);
            assert_eq!(m.length(-2, 0), 2.0);
        }
    }

    #[test]
    fn test_metric_ordering() {
        // Chebyshev <= Euclidean <= Manhattan for every offset
        for dy in -5..=5 {
            for dx in -5..=5 {
                let c = DistanceMethod::Chebyshev.length(dx, dy);
                let e = DistanceMethod::Euclidean.length(dx, dy);
                let m = DistanceMethod::Manhattan.length(dx, dy);
                assert!(c <= e + 1e-6 && e <= m + 1e-6, "({dx}, {dy})");
            }
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(DistanceMethod::default(), DistanceMethod::Euclidean);
        assert_eq!(
            DistanceMethod::from_name("chebyshev"),
            Some(DistanceMethod::Chebyshev)
        );
        assert_eq!(DistanceMethod::Manhattan.to_string(), "manhattan");
        assert_eq!(DistanceMethod::from_name("Euclidean"), None);
    }
}
