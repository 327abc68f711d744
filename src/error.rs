//! Error taxonomy for parsing, scheme resolution and layout.
//!
//! All failures are local and synchronous. Nothing here is retried: the same
//! input always produces the same error.

use thiserror::Error;

/// Problems with the raw `label:value` input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A record has the wrong number of colon-separated fields.
    #[error("record {index} is malformed: {record:?} (expected {expected})")]
    MalformedRecord {
        index: usize,
        record: String,
        expected: &'static str,
    },

    /// A field that must be a finite number is not.
    #[error("record {index}: {field:?} is not a number")]
    NotNumeric { index: usize, field: String },
}

/// Problems with user-selected configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown color scheme {name:?} (expected one of: {known})")]
    UnknownScheme { name: String, known: String },

    #[error("invalid color {value:?}, expected #RRGGBB")]
    InvalidColor { value: String },
}

/// Inputs that parse fine but cannot be laid out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("no data to lay out")]
    InsufficientData,

    #[error("comparison series differ in length ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    #[error("comparison chart needs a second value series")]
    MissingComparisonSeries,

    #[error("slice {label:?} has a negative value")]
    NegativeSlice { label: String },

    #[error("slice values sum to zero")]
    ZeroTotal,
}

/// Any failure raised by the parse -> layout pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

pub type Result<T> = std::result::Result<T, ChartError>;
