//! OBD-II PID Definitions and Conversion Formulas
//!
//! Defines the Mode 01 Parameter IDs that can be mocked, their published
//! decode formulas, and the exact inverse used to fabricate response bytes.

use crate::error::ObdError;
use serde::{Deserialize, Serialize};

/// Mode 01 (current data) PIDs with a registered conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Pid {
    /// Calculated engine load (0x04)
    EngineLoad = 0x04,
    /// Engine coolant temperature (0x05)
    CoolantTemp = 0x05,
    /// Short-term fuel trim bank 1 (0x06)
    ShortFuelTrimBank1 = 0x06,
    /// Long-term fuel trim bank 1 (0x07)
    LongFuelTrimBank1 = 0x07,
    /// Short-term fuel trim bank 2 (0x08)
    ShortFuelTrimBank2 = 0x08,
    /// Long-term fuel trim bank 2 (0x09)
    LongFuelTrimBank2 = 0x09,
    /// Fuel pressure, gauge (0x0A)
    FuelPressure = 0x0A,
    /// Intake manifold absolute pressure (0x0B)
    IntakeManifoldPressure = 0x0B,
    /// Engine RPM (0x0C)
    Rpm = 0x0C,
    /// Vehicle speed (0x0D)
    Speed = 0x0D,
    /// Timing advance before TDC (0x0E)
    TimingAdvance = 0x0E,
    /// Intake air temperature (0x0F)
    IntakeAirTemp = 0x0F,
    /// Mass air flow rate (0x10)
    Maf = 0x10,
    /// Throttle position (0x11)
    ThrottlePosition = 0x11,
}

/// How a physical value is turned into raw response bytes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// One byte: `round((value + offset) * scale)`
    Linear { scale: f64, offset: f64 },
    /// One byte: `round(value / divisor)`
    Divided { divisor: f64 },
    /// Two bytes, big-endian: `raw = round(value * scale)`, then `[raw / 256, raw % 256]`
    Wide { scale: f64 },
}

impl Pid {
    /// Every PID with a registered conversion, in ascending order
    pub const ALL: [Pid; 14] = [
        Pid::EngineLoad,
        Pid::CoolantTemp,
        Pid::ShortFuelTrimBank1,
        Pid::LongFuelTrimBank1,
        Pid::ShortFuelTrimBank2,
        Pid::LongFuelTrimBank2,
        Pid::FuelPressure,
        Pid::IntakeManifoldPressure,
        Pid::Rpm,
        Pid::Speed,
        Pid::TimingAdvance,
        Pid::IntakeAirTemp,
        Pid::Maf,
        Pid::ThrottlePosition,
    ];

    /// Look up a PID by its selector byte
    pub fn from_u8(pid: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_hex() == pid)
    }

    /// Get the PID hex value
    pub fn as_hex(&self) -> u8 {
        *self as u8
    }

    /// Human-readable parameter name
    pub fn name(&self) -> &'static str {
        match self {
            Pid::EngineLoad => "Calculated engine load",
            Pid::CoolantTemp => "Engine coolant temperature",
            Pid::ShortFuelTrimBank1 => "Short term fuel trim, bank 1",
            Pid::LongFuelTrimBank1 => "Long term fuel trim, bank 1",
            Pid::ShortFuelTrimBank2 => "Short term fuel trim, bank 2",
            Pid::LongFuelTrimBank2 => "Long term fuel trim, bank 2",
            Pid::FuelPressure => "Fuel pressure",
            Pid::IntakeManifoldPressure => "Intake manifold absolute pressure",
            Pid::Rpm => "Engine speed",
            Pid::Speed => "Vehicle speed",
            Pid::TimingAdvance => "Timing advance",
            Pid::IntakeAirTemp => "Intake air temperature",
            Pid::Maf => "Mass air flow rate",
            Pid::ThrottlePosition => "Throttle position",
        }
    }

    /// Physical unit of the decoded value
    pub fn unit(&self) -> &'static str {
        match self {
            Pid::EngineLoad
            | Pid::ShortFuelTrimBank1
            | Pid::LongFuelTrimBank1
            | Pid::ShortFuelTrimBank2
            | Pid::LongFuelTrimBank2
            | Pid::ThrottlePosition => "%",
            Pid::CoolantTemp | Pid::IntakeAirTemp => "°C",
            Pid::FuelPressure | Pid::IntakeManifoldPressure => "kPa",
            Pid::Rpm => "rpm",
            Pid::Speed => "km/h",
            Pid::TimingAdvance => "° before TDC",
            Pid::Maf => "g/s",
        }
    }

    /// Encoding strategy for this PID
    pub fn conversion(&self) -> Conversion {
        match self {
            Pid::EngineLoad | Pid::ThrottlePosition => Conversion::Linear {
                scale: 2.55,
                offset: 0.0,
            },
            Pid::CoolantTemp | Pid::IntakeAirTemp => Conversion::Linear {
                scale: 1.0,
                offset: 40.0,
            },
            Pid::ShortFuelTrimBank1
            | Pid::LongFuelTrimBank1
            | Pid::ShortFuelTrimBank2
            | Pid::LongFuelTrimBank2 => Conversion::Linear {
                scale: 1.28,
                offset: 100.0,
            },
            Pid::FuelPressure => Conversion::Divided { divisor: 3.0 },
            Pid::IntakeManifoldPressure | Pid::Speed => Conversion::Linear {
                scale: 1.0,
                offset: 0.0,
            },
            Pid::TimingAdvance => Conversion::Linear {
                scale: 2.0,
                offset: 64.0,
            },
            Pid::Rpm => Conversion::Wide { scale: 4.0 },
            Pid::Maf => Conversion::Wide { scale: 100.0 },
        }
    }

    /// Get the number of response bytes for this PID
    pub fn response_bytes(&self) -> usize {
        match self.conversion() {
            Conversion::Linear { .. } | Conversion::Divided { .. } => 1,
            Conversion::Wide { .. } => 2,
        }
    }

    /// Published physical range `(min, max)`, inclusive
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Pid::EngineLoad | Pid::ThrottlePosition => (0.0, 100.0),
            Pid::CoolantTemp | Pid::IntakeAirTemp => (-40.0, 215.0),
            Pid::ShortFuelTrimBank1
            | Pid::LongFuelTrimBank1
            | Pid::ShortFuelTrimBank2
            | Pid::LongFuelTrimBank2 => (-100.0, 99.2),
            Pid::FuelPressure => (0.0, 765.0),
            Pid::IntakeManifoldPressure | Pid::Speed => (0.0, 255.0),
            Pid::Rpm => (0.0, 16383.75),
            Pid::TimingAdvance => (-64.0, 63.5),
            Pid::Maf => (0.0, 655.35),
        }
    }

    /// Encode a physical value into response bytes
    ///
    /// Rounds half to even. Returns [`ObdError::ByteOverflow`] if any byte
    /// would fall outside `0..=255`; range validation is expected to have
    /// happened already, so that error means the table itself is wrong.
    pub fn encode(&self, value: f64) -> Result<Vec<u8>, ObdError> {
        let overflow = |raw: f64| ObdError::ByteOverflow {
            pid: self.as_hex(),
            value,
            raw,
            bytes: self.response_bytes(),
        };

        let single = |raw: f64| {
            if (0.0..=255.0).contains(&raw) {
                Ok(vec![raw as u8])
            } else {
                Err(overflow(raw))
            }
        };

        match self.conversion() {
            Conversion::Linear { scale, offset } => {
                single(((value + offset) * scale).round_ties_even())
            }
            Conversion::Divided { divisor } => single((value / divisor).round_ties_even()),
            Conversion::Wide { scale } => {
                let raw = (value * scale).round_ties_even();
                if !(0.0..=65535.0).contains(&raw) {
                    return Err(overflow(raw));
                }
                let raw = raw as u16;
                Ok(vec![(raw / 256) as u8, (raw % 256) as u8])
            }
        }
    }

    /// Decode raw response bytes with the published formula
    ///
    /// Returns `None` when fewer bytes than [`Pid::response_bytes`] are given.
    pub fn decode(&self, bytes: &[u8]) -> Option<f64> {
        if bytes.len() < self.response_bytes() {
            return None;
        }
        let a = bytes[0] as f64;

        let value = match self {
            // A * 100 / 255 (%)
            Pid::EngineLoad | Pid::ThrottlePosition => a * 100.0 / 255.0,
            // A - 40 (°C)
            Pid::CoolantTemp | Pid::IntakeAirTemp => a - 40.0,
            // (A - 128) * 100 / 128 (%)
            Pid::ShortFuelTrimBank1
            | Pid::LongFuelTrimBank1
            | Pid::ShortFuelTrimBank2
            | Pid::LongFuelTrimBank2 => a * 100.0 / 128.0 - 100.0,
            // 3 * A (kPa)
            Pid::FuelPressure => 3.0 * a,
            // A
            Pid::IntakeManifoldPressure | Pid::Speed => a,
            // ((A*256)+B)/4 (rpm)
            Pid::Rpm => (a * 256.0 + bytes[1] as f64) / 4.0,
            // A / 2 - 64 (°)
            Pid::TimingAdvance => a / 2.0 - 64.0,
            // ((A*256)+B) / 100 (g/s)
            Pid::Maf => (a * 256.0 + bytes[1] as f64) / 100.0,
        };
        Some(value)
    }

    /// Largest decode error introduced by rounding to the nearest raw step
    pub fn resolution(&self) -> f64 {
        match self.conversion() {
            Conversion::Linear { scale, .. } | Conversion::Wide { scale } => 0.5 / scale,
            Conversion::Divided { divisor } => 0.5 * divisor,
        }
    }
}
