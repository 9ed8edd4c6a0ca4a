//! pixfilt-test - Regression test framework for pixfilt
//!
//! Provides [`RegParams`], a check recorder in the style of classic
//! image-processing regression suites, and [`fixtures`], small synthetic
//! images that stand in for test data files.
//!
//! # Usage
//!
//! ```
//! use pixfilt_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("example");
//! let image = fixtures::solid(4, 4, pixfilt_core::Pixel::WHITE);
//! rp.compare_values(16.0, image.pixels().len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixfilt-test is at crates/pixfilt-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Get a path for a scratch file under the regout directory
///
/// The name is prefixed with the process id so parallel test binaries do
/// not collide.
pub fn scratch_path(name: &str) -> TestResult<String> {
    let dir = regout_dir();
    std::fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(format!("{}/{}.{}", dir, std::process::id(), name))
}

/// Synthetic test images
///
/// Fixtures panic on invalid dimensions; they are only called from tests
/// with literal sizes.
pub mod fixtures {
    use pixfilt_core::{Image, Pixel};

    fn build(width: u32, height: u32, f: impl Fn(u32, u32) -> Pixel) -> Image {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Image::from_pixels(width, height, pixels).expect("fixture dimensions must be non-zero")
    }

    /// Uniform image.
    pub fn solid(width: u32, height: u32, pixel: Pixel) -> Image {
        build(width, height, |_, _| pixel)
    }

    /// Opaque horizontal gradient: red rises left to right, green top to
    /// bottom, blue constant.
    pub fn gradient(width: u32, height: u32) -> Image {
        build(width, height, |x, y| {
            let r = (x * 255 / width.saturating_sub(1).max(1)) as u8;
            let g = (y * 255 / height.saturating_sub(1).max(1)) as u8;
            Pixel::rgb(r, g, 64)
        })
    }

    /// Opaque checkerboard of `cell`-sized squares, `a` at the origin.
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: Pixel, b: Pixel) -> Image {
        let cell = cell.max(1);
        build(width, height, |x, y| {
            if (x / cell + y / cell) % 2 == 0 { a } else { b }
        })
    }

    /// Left half `left`, right half `right` (split at `width / 2`).
    pub fn split(width: u32, height: u32, left: Pixel, right: Pixel) -> Image {
        build(width, height, |x, _| if x < width / 2 { left } else { right })
    }

    /// Fully transparent image with one opaque `color` pixel at `(x, y)`.
    pub fn single_opaque(width: u32, height: u32, x: u32, y: u32, color: Pixel) -> Image {
        build(width, height, |px, py| {
            if (px, py) == (x, y) {
                color.with_alpha(255)
            } else {
                Pixel::TRANSPARENT
            }
        })
    }

    /// Opaque gradient with a transparent disc of `radius` at the center.
    pub fn hole(width: u32, height: u32, radius: u32) -> Image {
        let cx = (width / 2) as i64;
        let cy = (height / 2) as i64;
        let r2 = (radius as i64).pow(2);
        let base = gradient(width, height);
        build(width, height, |x, y| {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            let p = base.get_unchecked(x, y);
            if dx * dx + dy * dy <= r2 {
                p.with_alpha(0)
            } else {
                p
            }
        })
    }

    /// Image with deterministic pseudo-random RGBA values.
    pub fn noise(width: u32, height: u32, seed: u32) -> Image {
        build(width, height, |x, y| {
            // xorshift over the pixel position
            let mut v = seed ^ x.wrapping_mul(0x9E37_79B9) ^ y.wrapping_mul(0x85EB_CA6B);
            v ^= v << 13;
            v ^= v >> 17;
            v ^= v << 5;
            Pixel::from_channels(v.to_le_bytes())
        })
    }

}
