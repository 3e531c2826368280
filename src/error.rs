//! Error handling for the encoding pipeline.
//!
//! Almost every field encoder is total: unknown or unparseable categories
//! resolve to sentinels instead of failing. The exception is the count
//! encoder, which reports [`EncodeError::InvalidCount`] for a value that is
//! not `<N>회` after the unit suffix is stripped. Callers can match on that
//! variant to tell a bad record apart from an infrastructure failure:
//!
//! ```
//! use hfea_encode::encoding::{RawCount, encode_count};
//! use hfea_encode::error::EncodeError;
//!
//! match encode_count(Some(RawCount::Text("세번"))) {
//!     Err(EncodeError::InvalidCount { value, .. }) => assert_eq!(value, "세번"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! [`ResultExt`] adds `.context()` to any `Result` whose error converts into
//! [`EncodeError`]:
//!
//! ```no_run
//! use hfea_encode::error::ResultExt as _;
//!
//! fn load() -> hfea_encode::error::Result<String> {
//!     std::fs::read_to_string("encoder.json").context("Failed to read encoder config")
//! }
//! ```

use polars::prelude::{DataType, PolarsError};
use std::fmt;

/// Position of a cell in the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLocation {
    pub column: String,
    pub row: usize,
}

/// Main error type for encoding operations.
#[derive(Debug)]
pub enum EncodeError {
    /// I/O errors (config files, log directories)
    Io(std::io::Error),

    /// Errors raised by polars while building or reshaping frames
    Polars(PolarsError),

    /// A count cell that is neither missing, `6회 이상`, nor `<N>회`
    InvalidCount {
        value: String,
        location: Option<CellLocation>,
    },

    /// A passthrough column whose values cannot be read as numbers
    NonNumericColumn { column: String, dtype: DataType },

    /// Invalid encoder configuration
    Config(String),

    /// Generic error with context
    Other(String),
}

impl EncodeError {
    /// Attaches the column and row of the offending cell to an
    /// [`EncodeError::InvalidCount`]. Other variants are returned unchanged.
    #[must_use]
    pub fn at(self, column: &str, row: usize) -> Self {
        match self {
            Self::InvalidCount { value, .. } => Self::InvalidCount {
                value,
                location: Some(CellLocation {
                    column: column.to_owned(),
                    row,
                }),
            },
            other => other,
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Polars(e) => write!(f, "Data processing error: {e}"),
            Self::InvalidCount {
                value,
                location: Some(loc),
            } => write!(
                f,
                "Invalid count {value:?} in column '{}' at row {}",
                loc.column, loc.row
            ),
            Self::InvalidCount {
                value,
                location: None,
            } => write!(f, "Invalid count {value:?}"),
            Self::NonNumericColumn { column, dtype } => {
                write!(f, "Column '{column}' ({dtype}) is not numeric")
            }
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Polars(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EncodeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<PolarsError> for EncodeError {
    fn from(err: PolarsError) -> Self {
        Self::Polars(err)
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for encoding operations.
pub type Result<T> = std::result::Result<T, EncodeError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<EncodeError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: EncodeError = e.into();
            EncodeError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: EncodeError = e.into();
            EncodeError::Other(format!("{}: {}", f(), err))
        })
    }
}
