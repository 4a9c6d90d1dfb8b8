//! Error type shared by the body builder and the system

use std::fmt;

/// Errors returned by builder setters, configuration and indexed lookups
///
/// All variants are local and recoverable: none of them leaves a `System`
/// in an inconsistent state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NBodyError {
    /// A setter or configuration field received a non-finite or out-of-domain value
    InvalidParameter { name: &'static str, value: f64 },
    /// `body(i)` was called with `i` outside `[0, count)`
    IndexOutOfRange { index: i64, count: usize },
    /// A builder was asked to build a second time
    BuilderReused,
}

impl fmt::Display for NBodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NBodyError::InvalidParameter { name, value } => {
                write!(f, "invalid parameter `{}`: {}", name, value)
            }
            NBodyError::IndexOutOfRange { index, count } => {
                write!(f, "body index {} out of range (count = {})", index, count)
            }
            NBodyError::BuilderReused => write!(f, "body builder has already been built"),
        }
    }
}

impl std::error::Error for NBodyError {}

pub type Result<T> = std::result::Result<T, NBodyError>;

/// Reject NaN and infinities
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NBodyError::InvalidParameter { name, value })
    }
}

/// Reject anything that is not a finite, strictly positive number
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(NBodyError::InvalidParameter { name, value })
    }
}

/// Reject anything that is not a finite, non-negative number
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(NBodyError::InvalidParameter { name, value })
    }
}
