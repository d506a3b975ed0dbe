//! Error types shared by both multiplexing engines.
//!
//! Every constructor validates its parameter snapshot and every curve
//! evaluation checks its outputs, so a plotting layer never receives a
//! non-finite probability. Errors are detected at the smallest scope that
//! can name the offending quantity and returned immediately; the
//! computations are deterministic, so there is nothing to retry.

use std::error::Error;
use std::fmt;

/// Errors raised during parameter validation or curve evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum MuxError {
    /// A parameter lies outside its physical range.
    ParameterRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
    /// A required key is absent from a construction mapping.
    MissingParameter { name: &'static str },
    /// A formula reached a numerically undefined operation.
    NumericDegeneracy { context: &'static str },
    /// A computed probability came out infinite or NaN.
    Overflow { context: &'static str, value: f64 },
}

impl fmt::Display for MuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MuxError::ParameterRange {
                name,
                value,
                expected,
            } => write!(
                f,
                "parameter `{}` = {} out of range (expected {})",
                name, value, expected
            ),
            MuxError::MissingParameter { name } => {
                write!(f, "parameter map is missing key `{}`", name)
            }
            MuxError::NumericDegeneracy { context } => {
                write!(f, "numerically undefined operation in {}", context)
            }
            MuxError::Overflow { context, value } => {
                write!(f, "non-finite result {} from {}", value, context)
            }
        }
    }
}

impl Error for MuxError {}
