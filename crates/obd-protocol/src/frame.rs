//! ELM Response Frames
//!
//! Builds the reply text the emulator sends back for a mocked request, using
//! its header/size/data markup.

use crate::mode;
use crate::pid::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine Control Module response address
pub const ECM_RESPONSE_HEADER: &str = "7E8";

/// Stored-DTC payload reporting a single code
pub const ONE_STORED_DTC: [u8; 7] = [0x43, 0x01, 0x43, 0x00, 0x00, 0x00, 0x00];

/// A complete reply: header, size and payload bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFrame {
    /// Response address, e.g. `7E8`
    pub header: String,
    /// Payload bytes, including the service response byte
    pub payload: Vec<u8>,
}

impl ResponseFrame {
    /// Create a frame from a header and raw payload
    pub fn new(header: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            header: header.into(),
            payload,
        }
    }

    /// Build a Mode 01 reply: `41 <pid> <value bytes...>`
    pub fn current_data(header: impl Into<String>, pid: Pid, value_bytes: &[u8]) -> Self {
        let mut payload = Vec::with_capacity(2 + value_bytes.len());
        payload.push(mode::CURRENT_DATA + mode::POSITIVE_RESPONSE_OFFSET);
        payload.push(pid.as_hex());
        payload.extend_from_slice(value_bytes);
        Self::new(header, payload)
    }

    /// Fixed Mode 03 reply reporting one stored trouble code
    pub fn one_stored_dtc(header: impl Into<String>) -> Self {
        Self::new(header, ONE_STORED_DTC.to_vec())
    }

    /// Read a Mode 01 reply back the way a scan tool would
    ///
    /// Returns the PID and its physical value, or `None` for any other
    /// payload.
    pub fn decoded(&self) -> Option<(Pid, f64)> {
        match self.payload.as_slice() {
            [service, pid, value @ ..]
                if *service == mode::CURRENT_DATA + mode::POSITIVE_RESPONSE_OFFSET =>
            {
                let pid = Pid::from_u8(*pid)?;
                Some((pid, pid.decode(value)?))
            }
            _ => None,
        }
    }

    /// Size token: payload length as two hex digits
    pub fn size_token(&self) -> String {
        format!("{:02X}", self.payload.len())
    }

    /// Payload as space-separated uppercase hex, e.g. `41 0C 0F A0`
    pub fn data_token(&self) -> String {
        self.payload
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ResponseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<header>{}</header><size>{}</size><data>{}</data>",
            self.header,
            self.size_token(),
            self.data_token()
        )
    }
}

/// Reply text handed to the emulator verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// A synthesized frame
    Frame(ResponseFrame),
    /// The adapter's `NO DATA` line
    NoData,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Frame(frame) => write!(f, "{}", frame),
            Answer::NoData => f.write_str("<writeln>NO DATA</writeln>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coolant_frame() {
        let frame = ResponseFrame::current_data(ECM_RESPONSE_HEADER, Pid::CoolantTemp, &[0x41]);
        assert_eq!(frame.payload, vec![0x41, 0x05, 0x41]);
        assert_eq!(
            frame.to_string(),
            "<header>7E8</header><size>03</size><data>41 05 41</data>"
        );
    }

    #[test]
    fn test_rpm_frame() {
        let frame = ResponseFrame::current_data("7E8", Pid::Rpm, &[0x0F, 0xA0]);
        assert_eq!(frame.size_token(), "04");
        assert_eq!(frame.data_token(), "41 0C 0F A0");
    }

    #[test]
    fn test_dtc_frame() {
        let frame = ResponseFrame::one_stored_dtc(ECM_RESPONSE_HEADER);
        assert_eq!(
            Answer::Frame(frame).to_string(),
            "<header>7E8</header><size>07</size><data>43 01 43 00 00 00 00</data>"
        );
    }

    #[test]
    fn test_decoded() {
        let rpm = ResponseFrame::current_data("7E8", Pid::Rpm, &[0x0F, 0xA0]);
        assert_eq!(rpm.decoded(), Some((Pid::Rpm, 1000.0)));

        let coolant = ResponseFrame::current_data("7E8", Pid::CoolantTemp, &[0x41]);
        assert_eq!(coolant.decoded(), Some((Pid::CoolantTemp, 25.0)));

        assert_eq!(ResponseFrame::one_stored_dtc("7E8").decoded(), None);
        // Too short for a two-byte PID
        assert_eq!(ResponseFrame::new("7E8", vec![0x41, 0x0C, 0x0F]).decoded(), None);
    }

    #[test]
    fn test_no_data() {
        assert_eq!(Answer::NoData.to_string(), "<writeln>NO DATA</writeln>");
    }
}
