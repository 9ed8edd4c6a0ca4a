//! Error types for pixfilt-filter
//!
//! Covers both stages of a filter run: option parsing (usage errors that
//! name the offending token) and filter application.

use thiserror::Error;

/// Errors that can occur while configuring or applying a filter
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixfilt_core::Error),

    /// No filter is registered under this name
    #[error("filter '{0}' not found")]
    UnknownFilter(String),

    /// Option name not declared by the filter
    #[error("option '{option}' not found for filter '{filter}'")]
    UnknownOption {
        /// Filter being configured
        filter: &'static str,
        /// Offending option token
        option: String,
    },

    /// Option name given as the last token without a value
    #[error("expected {expected} after '{option}', but got nothing")]
    MissingValue {
        /// Option name
        option: String,
        /// Description of the expected value
        expected: &'static str,
    },

    /// Option value could not be parsed as the declared type
    #[error("expected {expected} after '{option}', but got '{value}'")]
    InvalidValue {
        /// Option name
        option: String,
        /// Offending value token
        value: String,
        /// Description of the expected value
        expected: &'static str,
    },

    /// Enumerated option value not among the allowed names
    #[error("expected one of [{}] after '{option}', but got '{value}'", .choices.join(", "))]
    InvalidChoice {
        /// Option name
        option: String,
        /// Offending value token
        value: String,
        /// Valid choices
        choices: &'static [&'static str],
    },

    /// Numeric option value outside its allowed range
    #[error("value {value} for '{option}' is out of range [{min}, {max}]")]
    OutOfRange {
        /// Option name
        option: String,
        /// Parsed value
        value: i64,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },
}

impl FilterError {
    /// Check whether this error comes from option parsing or name lookup.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            FilterError::UnknownFilter(_)
                | FilterError::UnknownOption { .. }
                | FilterError::MissingValue { .. }
                | FilterError::InvalidValue { .. }
                | FilterError::InvalidChoice { .. }
                | FilterError::OutOfRange { .. }
        )
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
