//! Option parsing for filter configurations
//!
//! Each filter declares a static table of [`OptionSpec`] entries mapping an
//! option name to a typed setter on its configuration record. A single
//! routine, [`parse_options`], walks alternating `name value` tokens and
//! applies them to a fresh default configuration.
//!
//! Unknown option names are rejected for every filter.
//!
//! # Example
//!
//! ```
//! use pixfilt_filter::options::{OptionSpec, Setter, parse_options};
//!
//! #[derive(Debug, Default)]
//! struct Blur {
//!     radius: u32,
//! }
//!
//! const BLUR_OPTIONS: &[OptionSpec<Blur>] = &[OptionSpec {
//!     name: "radius",
//!     default: "0",
//!     setter: Setter::Integer { min: 0, max: 1000, set: |o, v| o.radius = v as u32 },
//! }];
//!
//! let blur: Blur = parse_options("blur", BLUR_OPTIONS, &["radius", "3"]).unwrap();
//! assert_eq!(blur.radius, 3);
//! ```

use crate::{FilterError, FilterResult};

/// Largest window radius accepted by median, bilateral and kuwahara.
pub const MAX_RADIUS: u32 = 1024;

/// Largest skidmark slice count.
pub const MAX_SLICES: u32 = 4096;

/// Check an integer option value against inclusive bounds.
pub fn check_range(option: &str, value: i64, min: i64, max: i64) -> FilterResult<()> {
    if value < min || value > max {
        return Err(FilterError::OutOfRange {
            option: option.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// An option value drawn from a fixed list of names.
pub trait Choice: Copy + Sized + 'static {
    /// Valid names, indexed by variant.
    const NAMES: &'static [&'static str];

    /// Variant for a position in [`Choice::NAMES`].
    fn from_index(index: usize) -> Option<Self>;

    /// Position of this variant in [`Choice::NAMES`].
    fn index(self) -> usize;

    /// Name of this variant.
    fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// Look up a variant by exact name.
    fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|&n| n == name)
            .and_then(Self::from_index)
    }
}

/// Typed setter for one configuration field.
pub enum Setter<C> {
    /// Decimal integer with inclusive bounds
    Integer {
        min: i64,
        max: i64,
        set: fn(&mut C, i64),
    },
    /// Finite floating-point number
    Float { set: fn(&mut C, f32) },
    /// `true/yes/1` or `false/no/0`
    Boolean { set: fn(&mut C, bool) },
    /// One of a fixed list of names; receives the index into `names`
    Choice {
        names: &'static [&'static str],
        set: fn(&mut C, usize),
    },
}

impl<C> Setter<C> {
    /// Short description of the accepted value, used in errors and usage.
    pub fn expected(&self) -> &'static str {
        match self {
            Setter::Integer { .. } => "an integer",
            Setter::Float { .. } => "a number",
            Setter::Boolean { .. } => "a boolean",
            Setter::Choice { .. } => "a choice",
        }
    }

    /// Type label for usage output (`int`, `float`, `bool`, `a|b|c`).
    pub fn type_label(&self) -> String {
        match self {
            Setter::Integer { .. } => "int".to_string(),
            Setter::Float { .. } => "float".to_string(),
            Setter::Boolean { .. } => "bool".to_string(),
            Setter::Choice { names, .. } => names.join("|"),
        }
    }
}

/// One entry of a filter's option table.
pub struct OptionSpec<C> {
    /// Option name as typed on the command line
    pub name: &'static str,
    /// Default value, as the text that would produce it
    pub default: &'static str,
    /// Parser and field assignment
    pub setter: Setter<C>,
}

impl<C> OptionSpec<C> {
    /// Parse `value` according to the setter type and store it in `config`.
    pub fn apply(&self, config: &mut C, value: &str) -> FilterResult<()> {
        match &self.setter {
            Setter::Integer { min, max, set } => {
                let v = parse_int(self.name, value)?;
                check_range(self.name, v, *min, *max)?;
                set(config, v);
            }
            Setter::Float { set } => set(config, parse_float(self.name, value)?),
            Setter::Boolean { set } => set(config, parse_bool(self.name, value)?),
            Setter::Choice { names, set } => set(config, parse_choice(self.name, value, names)?),
        }
        Ok(())
    }

    /// One usage line: `name <type> (default D)`.
    pub fn usage(&self) -> String {
        format!(
            "{} <{}> (default {})",
            self.name,
            self.setter.type_label(),
            self.default
        )
    }
}

/// Parse alternating `name value` tokens into a fresh configuration.
///
/// # Errors
///
/// - [`FilterError::UnknownOption`] for a name not in `table`
/// - [`FilterError::MissingValue`] when a name is the last token
/// - value errors from [`OptionSpec::apply`]
pub fn parse_options<C, S>(
    filter: &'static str,
    table: &[OptionSpec<C>],
    args: &[S],
) -> FilterResult<C>
where
    C: Default,
    S: AsRef<str>,
{
    let mut config = C::default();
    let mut tokens = args.iter().map(AsRef::as_ref);

    while let Some(name) = tokens.next() {
        let spec = table
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| FilterError::UnknownOption {
                filter,
                option: name.to_string(),
            })?;
        let value = tokens.next().ok_or_else(|| FilterError::MissingValue {
            option: name.to_string(),
            expected: spec.setter.expected(),
        })?;
        spec.apply(&mut config, value)?;
    }

    Ok(config)
}

/// Parse a decimal integer option value.
pub fn parse_int(option: &str, value: &str) -> FilterResult<i64> {
    value.parse::<i64>().map_err(|_| FilterError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
        expected: "an integer",
    })
}

/// Parse a finite floating-point option value.
pub fn parse_float(option: &str, value: &str) -> FilterResult<f32> {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FilterError::InvalidValue {
            option: option.to_string(),
            value: value.to_string(),
            expected: "a number",
        }),
    }
}

/// Parse a boolean option value.
///
/// Accepts `true`, `yes`, `1` and `false`, `no`, `0`; the word forms are
/// case-insensitive.
pub fn parse_bool(option: &str, value: &str) -> FilterResult<bool> {
    const TRUE: [&str; 2] = ["true", "yes"];
    const FALSE: [&str; 2] = ["false", "no"];

    if value == "1" || TRUE.iter().any(|w| value.eq_ignore_ascii_case(w)) {
        Ok(true)
    } else if value == "0" || FALSE.iter().any(|w| value.eq_ignore_ascii_case(w)) {
        Ok(false)
    } else {
        Err(FilterError::InvalidValue {
            option: option.to_string(),
            value: value.to_string(),
            expected: "a boolean (true/false/yes/no/1/0)",
        })
    }
}

/// Match an option value against a fixed name list.
pub fn parse_choice(
    option: &str,
    value: &str,
    names: &'static [&'static str],
) -> FilterResult<usize> {
    names
        .iter()
        .position(|&n| n == value)
        .ok_or_else(|| FilterError::InvalidChoice {
            option: option.to_string(),
            value: value.to_string(),
            choices: names,
        })
}
