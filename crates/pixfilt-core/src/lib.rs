//! pixfilt Core - Basic data structures for image filtering
//!
//! This crate provides the fundamental data structures used throughout
//! pixfilt:
//!
//! - [`Pixel`] - One RGBA pixel with 8-bit channels
//! - [`Image`] - Row-major RGBA pixel buffer with explicit [`Size`]
//! - [`Error`] / [`Result`] - Core error type

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::{Image, Size, wrap_coord};
pub use pixel::{Pixel, clamp_channel};
