//! Error types for loosetime conversions.

use thiserror::Error;

/// A conversion failure. Every variant carries the offending input so callers
/// can report what was actually rejected, not just why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
