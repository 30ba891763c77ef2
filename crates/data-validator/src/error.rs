//! Validation Error Types

use thiserror::Error;

/// Errors during override value validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of the published physical range
    #[error("Response value for request {code} must be in range {min}..={max}, but {value} found")]
    OutOfRange {
        code: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Override text is not a decimal number
    #[error("Response value for request {code} should be a number, however '{text}' found")]
    NonNumeric { code: String, text: String },

    /// Invalid entry in the validation configuration
    #[error("Invalid validation config: {0}")]
    InvalidFormat(String),
}
