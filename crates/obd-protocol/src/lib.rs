//! OBD-II Protocol Definitions
//!
//! This crate provides request parsing, the Mode 01 PID conversion table
//! and the ELM response frame format used when fabricating replies for an
//! ELM327 emulator.

mod error;
mod frame;
mod pid;
mod request;

pub use error::ObdError;
pub use frame::{Answer, ResponseFrame, ECM_RESPONSE_HEADER, ONE_STORED_DTC};
pub use pid::{Conversion, Pid};
pub use request::RequestCode;

/// OBD-II mode constants
pub mod mode {
    /// Current data
    pub const CURRENT_DATA: u8 = 0x01;
    /// Diagnostic trouble codes
    pub const READ_DTC: u8 = 0x03;
    /// Clear trouble codes
    pub const CLEAR_DTC: u8 = 0x04;
    /// Added to the service byte in a positive response
    pub const POSITIVE_RESPONSE_OFFSET: u8 = 0x40;
}
