//! pixfilt - RGBA image filters with a command-line front end
//!
//! # Overview
//!
//! pixfilt reads a PNG or JPEG image, runs one named filter over it and
//! writes the result as PNG. The built-in filters are:
//!
//! - `dilate` - fill transparent pixels from the nearest opaque pixel
//! - `median` - luma percentile over a disc neighborhood
//! - `bilateral` - edge-preserving weighted average
//! - `kuwahara` - mean of the most uniform quadrant
//! - `skidmark` - radial resampling into one row per angle
//!
//! # Example
//!
//! ```
//! use pixfilt::filter::Registry;
//! use pixfilt::{Image, Pixel};
//!
//! let registry = Registry::builtin();
//! let config = registry.lookup("dilate").unwrap().parse(&["radius", "2"]).unwrap();
//!
//! let mut image = Image::new(5, 1).unwrap();
//! image.set(0, 0, Pixel::rgb(9, 8, 7)).unwrap();
//! let output = config.run(&image).unwrap();
//! assert_eq!(output.get(2, 0), Some(Pixel::rgb(9, 8, 7)));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixfilt_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixfilt_filter as filter;
pub use pixfilt_io as io;

pub mod cli;
