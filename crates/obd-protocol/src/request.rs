//! Request Code Parsing
//!
//! The host emulator hands tasks the raw ELM command text. Only the service
//! byte and, for Mode 01, the PID selector matter here.

use crate::error::ObdError;
use crate::mode;
use crate::pid::Pid;
use std::fmt;

/// A parsed diagnostic request: service plus optional PID selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestCode {
    service: u8,
    pid: Option<u8>,
}

impl RequestCode {
    /// Parse a raw command such as `"0105"`, `"010C1"` or `"03"`
    ///
    /// Whitespace and case are ignored. For Mode 01 the two digits after the
    /// service select the PID; any trailing characters (the ELM response
    /// count digit, extra request bytes) are dropped.
    pub fn parse(cmd: &str) -> Result<Self, ObdError> {
        let cleaned = clean(cmd);
        let service = hex_byte(&cleaned, 0).ok_or_else(|| malformed(cmd))?;

        let pid = if service == mode::CURRENT_DATA {
            Some(hex_byte(&cleaned, 2).ok_or_else(|| malformed(cmd))?)
        } else {
            None
        };

        Ok(Self { service, pid })
    }

    /// Parse only the service byte of a raw command
    ///
    /// Lets a caller route `"01"` to the Mode 01 handler even though the
    /// PID selector is missing.
    pub fn parse_service(cmd: &str) -> Result<u8, ObdError> {
        hex_byte(&clean(cmd), 0).ok_or_else(|| malformed(cmd))
    }

    /// Service (mode) byte
    pub fn service(&self) -> u8 {
        self.service
    }

    /// PID selector byte, present for Mode 01 requests
    pub fn pid_byte(&self) -> Option<u8> {
        self.pid
    }

    /// The PID with a registered conversion, if any
    pub fn pid(&self) -> Result<Pid, ObdError> {
        self.pid
            .and_then(Pid::from_u8)
            .ok_or_else(|| ObdError::UnsupportedPid(self.to_string()))
    }
}

fn clean(cmd: &str) -> String {
    cmd.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

fn hex_byte(cleaned: &str, at: usize) -> Option<u8> {
    cleaned
        .get(at..at + 2)
        .and_then(|s| u8::from_str_radix(s, 16).ok())
}

fn malformed(cmd: &str) -> ObdError {
    ObdError::MalformedRequest(cmd.trim().to_string())
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.service)?;
        if let Some(pid) = self.pid {
            write!(f, "{:02X}", pid)?;
        }
        Ok(())
    }
}
