//! Filter registry and name-based dispatch
//!
//! Every filter configuration type implements [`FilterOptions`], which ties
//! together its name, its option table, its destination-size rule and its
//! apply function. [`FilterKind`] enumerates the built-in filters and
//! [`FilterConfig`] carries a parsed configuration for one of them.
//! A [`Registry`] is built once at startup and looked up by exact name.
//!
//! # Example
//!
//! ```
//! use pixfilt_core::{Image, Pixel};
//! use pixfilt_filter::Registry;
//!
//! let registry = Registry::builtin();
//! let kind = registry.lookup("median").unwrap();
//! let config = kind.parse(&["radius", "1"]).unwrap();
//!
//! let source = Image::filled(4, 4, Pixel::WHITE).unwrap();
//! let output = config.run(&source).unwrap();
//! assert_eq!(output, source);
//! ```

use std::fmt;

use crate::bilateral::BilateralOptions;
use crate::dilate::DilateOptions;
use crate::kuwahara::KuwaharaOptions;
use crate::median::MedianOptions;
use crate::options::{OptionSpec, parse_options};
use crate::skidmark::{SkidmarkOptions, check_slices};
use crate::{FilterError, FilterResult};
use pixfilt_core::{Image, Size};

/// A filter configuration record with its option table and apply function.
pub trait FilterOptions: Default + Sized + 'static {
    /// Name used to select the filter
    const NAME: &'static str;
    /// One-line summary for usage output
    const DESCRIPTION: &'static str;

    /// Option table, in usage order.
    fn options() -> &'static [OptionSpec<Self>];

    /// Parse alternating `name value` tokens on top of the defaults.
    fn parse<S: AsRef<str>>(args: &[S]) -> FilterResult<Self> {
        parse_options(Self::NAME, Self::options(), args)
    }

    /// Size of the destination for a source of `source` size.
    fn destination_size(&self, source: Size) -> Size {
        source
    }

    /// Run the filter from `source` into a preallocated `destination`.
    fn apply(&self, source: &Image, destination: &mut Image) -> FilterResult<()>;
}

fn usage_lines<C: FilterOptions>() -> Vec<String> {
    C::options().iter().map(OptionSpec::usage).collect()
}

/// The built-in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Dilate,
    Median,
    Bilateral,
    Kuwahara,
    Skidmark,
}

impl FilterKind {
    /// All built-in filters in registration order.
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Dilate,
        FilterKind::Median,
        FilterKind::Bilateral,
        FilterKind::Kuwahara,
        FilterKind::Skidmark,
    ];

    /// Name used to select this filter.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Dilate => DilateOptions::NAME,
            FilterKind::Median => MedianOptions::NAME,
            FilterKind::Bilateral => BilateralOptions::NAME,
            FilterKind::Kuwahara => KuwaharaOptions::NAME,
            FilterKind::Skidmark => SkidmarkOptions::NAME,
        }
    }

    /// One-line summary.
    pub fn description(self) -> &'static str {
        match self {
            FilterKind::Dilate => DilateOptions::DESCRIPTION,
            FilterKind::Median => MedianOptions::DESCRIPTION,
            FilterKind::Bilateral => BilateralOptions::DESCRIPTION,
            FilterKind::Kuwahara => KuwaharaOptions::DESCRIPTION,
            FilterKind::Skidmark => SkidmarkOptions::DESCRIPTION,
        }
    }

    /// Usage line for each option (`name <type> (default D)`).
    pub fn option_usage(self) -> Vec<String> {
        match self {
            FilterKind::Dilate => usage_lines::<DilateOptions>(),
            FilterKind::Median => usage_lines::<MedianOptions>(),
            FilterKind::Bilateral => usage_lines::<BilateralOptions>(),
            FilterKind::Kuwahara => usage_lines::<KuwaharaOptions>(),
            FilterKind::Skidmark => usage_lines::<SkidmarkOptions>(),
        }
    }

    /// Default configuration.
    pub fn default_config(self) -> FilterConfig {
        match self {
            FilterKind::Dilate => FilterConfig::Dilate(DilateOptions::default()),
            FilterKind::Median => FilterConfig::Median(MedianOptions::default()),
            FilterKind::Bilateral => FilterConfig::Bilateral(BilateralOptions::default()),
            FilterKind::Kuwahara => FilterConfig::Kuwahara(KuwaharaOptions::default()),
            FilterKind::Skidmark => FilterConfig::Skidmark(SkidmarkOptions::default()),
        }
    }

    /// Parse option tokens into a configuration for this filter.
    pub fn parse<S: AsRef<str>>(self, args: &[S]) -> FilterResult<FilterConfig> {
        Ok(match self {
            FilterKind::Dilate => FilterConfig::Dilate(DilateOptions::parse(args)?),
            FilterKind::Median => FilterConfig::Median(MedianOptions::parse(args)?),
            FilterKind::Bilateral => FilterConfig::Bilateral(BilateralOptions::parse(args)?),
            FilterKind::Kuwahara => FilterConfig::Kuwahara(KuwaharaOptions::parse(args)?),
            FilterKind::Skidmark => FilterConfig::Skidmark(SkidmarkOptions::parse(args)?),
        })
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed configuration for one built-in filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterConfig {
    Dilate(DilateOptions),
    Median(MedianOptions),
    Bilateral(BilateralOptions),
    Kuwahara(KuwaharaOptions),
    Skidmark(SkidmarkOptions),
}

impl FilterConfig {
    /// Filter this configuration belongs to.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterConfig::Dilate(_) => FilterKind::Dilate,
            FilterConfig::Median(_) => FilterKind::Median,
            FilterConfig::Bilateral(_) => FilterKind::Bilateral,
            FilterConfig::Kuwahara(_) => FilterKind::Kuwahara,
            FilterConfig::Skidmark(_) => FilterKind::Skidmark,
        }
    }

    /// Size of the destination for a source of `source` size.
    pub fn destination_size(&self, source: Size) -> Size {
        match self {
            FilterConfig::Dilate(o) => o.destination_size(source),
            FilterConfig::Median(o) => o.destination_size(source),
            FilterConfig::Bilateral(o) => o.destination_size(source),
            FilterConfig::Kuwahara(o) => o.destination_size(source),
            FilterConfig::Skidmark(o) => o.destination_size(source),
        }
    }

    /// Run the filter into a preallocated destination.
    ///
    /// # Errors
    ///
    /// Returns a dimension error when `destination` does not have
    /// [`FilterConfig::destination_size`].
    pub fn apply(&self, source: &Image, destination: &mut Image) -> FilterResult<()> {
        destination.expect_size(self.destination_size(source.size()))?;
        match self {
            FilterConfig::Dilate(o) => o.apply(source, destination),
            FilterConfig::Median(o) => o.apply(source, destination),
            FilterConfig::Bilateral(o) => o.apply(source, destination),
            FilterConfig::Kuwahara(o) => o.apply(source, destination),
            FilterConfig::Skidmark(o) => o.apply(source, destination),
        }
    }

    /// Allocate a destination and run the filter into it.
    pub fn run(&self, source: &Image) -> FilterResult<Image> {
        if let FilterConfig::Skidmark(o) = self {
            check_slices(o.slices)?;
        }
        let mut destination = Image::with_size(self.destination_size(source.size()))?;
        self.apply(source, &mut destination)?;
        Ok(destination)
    }
}

/// Ordered set of filters, looked up by exact name.
#[derive(Debug, Clone)]
pub struct Registry {
    filters: Vec<FilterKind>,
}

impl Registry {
    /// Registry of the built-in filters in [`FilterKind::ALL`] order.
    pub fn builtin() -> Self {
        Registry {
            filters: FilterKind::ALL.to_vec(),
        }
    }

    /// Registered filters in order.
    pub fn iter(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.filters.iter().copied()
    }

    /// Registered filter names in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(FilterKind::name).collect()
    }

    /// Find a filter by exact, case-sensitive name.
    pub fn find(&self, name: &str) -> Option<FilterKind> {
        self.iter().find(|kind| kind.name() == name)
    }

    /// Find a filter by name, failing with [`FilterError::UnknownFilter`].
    pub fn lookup(&self, name: &str) -> FilterResult<FilterKind> {
        self.find(name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::builtin()
    }
}
