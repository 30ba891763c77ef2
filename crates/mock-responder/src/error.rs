//! Mock Responder Error Types

use data_validator::ValidationError;
use obd_protocol::ObdError;
use std::io;
use thiserror::Error;

/// Coarse classification of a [`MockError`], used in log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Command text is not a service/PID selector
    MalformedRequest,
    /// No conversion or range is registered for the code
    UnsupportedConversion,
    /// Value outside the published physical range
    OutOfBounds,
    /// Override text is not a number
    NonNumeric,
    /// Store access failed for a reason other than absence
    IoFault,
    /// Conversion table produced an unencodable byte
    ConversionDefect,
}

/// Failures while synthesizing a mocked response
///
/// Everything except [`MockError::Defect`] degrades to a pass-through.
#[derive(Debug, Error)]
pub enum MockError {
    /// Request could not be parsed, or has no registered conversion
    #[error(transparent)]
    Request(ObdError),

    /// Override text failed parsing or range validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading or writing a mock source failed for a reason other than absence
    #[error("Can't access {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The conversion table produced bytes that do not fit the frame
    #[error(transparent)]
    Defect(#[from] EncodingDefect),
}

impl MockError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MockError::Request(ObdError::MalformedRequest(_)) => ErrorKind::MalformedRequest,
            MockError::Request(ObdError::UnsupportedPid(_)) => ErrorKind::UnsupportedConversion,
            MockError::Request(ObdError::ByteOverflow { .. }) => ErrorKind::ConversionDefect,
            MockError::Validation(ValidationError::OutOfRange { .. }) => ErrorKind::OutOfBounds,
            MockError::Validation(ValidationError::NonNumeric { .. }) => ErrorKind::NonNumeric,
            MockError::Validation(ValidationError::InvalidFormat(_)) => {
                ErrorKind::UnsupportedConversion
            }
            MockError::Io { .. } => ErrorKind::IoFault,
            MockError::Defect(_) => ErrorKind::ConversionDefect,
        }
    }
}

/// A conversion formula emitted a byte outside `0..=255`
///
/// This is a programming error in the PID table, not bad input, so it is
/// returned to the caller instead of being folded into a pass-through.
#[derive(Debug, Error)]
#[error("Conversion table defect: {0}")]
pub struct EncodingDefect(#[from] pub ObdError);

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered configuration could not be built or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Legacy path file could not be read
    #[error("Can't read {path}: {source}")]
    PathFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Legacy path file has no responses directory on its first line
    #[error("{0} does not name a responses directory")]
    EmptyPathFile(String),

    /// Bounds overrides are invalid
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
