//! OBD-II Error Types

use thiserror::Error;

/// Errors raised while parsing requests or encoding response bytes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObdError {
    /// Request text is not a hex service/PID selector
    #[error("Malformed request '{0}': expected hex service and PID digits")]
    MalformedRequest(String),

    /// No conversion is registered for this request
    #[error(
        "No converter for request {0}: add a Pid variant with its encode formula \
         and bounds in obd-protocol/src/pid.rs (see https://en.wikipedia.org/wiki/OBD-II_PIDs)"
    )]
    UnsupportedPid(String),

    /// A conversion produced a byte outside 0..=255
    ///
    /// Only reachable through a broken conversion table or a missing bounds
    /// entry, never through well-formed input.
    #[error("Conversion for PID {pid:02X} produced raw value {raw} for {value}, which does not fit {bytes} byte(s)")]
    ByteOverflow {
        pid: u8,
        value: f64,
        raw: f64,
        bytes: usize,
    },
}
