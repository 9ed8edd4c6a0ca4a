//! pixfilt-filter - RGBA image filters
//!
//! This crate provides the filters and their configuration machinery:
//!
//! - Alpha-aware dilation (sharp and smooth fill of transparent pixels)
//! - Percentile (median) filtering by luma
//! - Bilateral filtering (edge-preserving smoothing)
//! - Kuwahara filtering (quadrant-based smoothing)
//! - Skidmark radial resampling
//! - Option tables, a generic option parser and a name-based registry
//!
//! Each filter exposes a `name(source, options)` function returning a new
//! image and a `name_into(source, destination, options)` variant writing into
//! a preallocated destination.

pub mod bilateral;
pub mod dilate;
pub mod distance;
mod error;
pub mod kuwahara;
pub mod median;
pub mod offsets;
pub mod options;
pub mod registry;
pub mod skidmark;
pub mod window;

pub use error::{FilterError, FilterResult};
pub use registry::{FilterConfig, FilterKind, FilterOptions, Registry};

// Re-export commonly used types and functions
pub use bilateral::{BilateralOptions, bilateral, bilateral_into};
pub use dilate::{DilateOptions, dilate, dilate_into};
pub use distance::DistanceMethod;
pub use kuwahara::{KuwaharaOptions, kuwahara, kuwahara_into};
pub use median::{MedianOptions, median, median_into};
pub use offsets::{Offset, OffsetTable};
pub use skidmark::{BlendMethod, SkidmarkOptions, skidmark, skidmark_into};
