//! Override Value Parsing and Range Checking

use crate::error::ValidationError;
use obd_protocol::{Pid, RequestCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Validation configuration
///
/// Starts from the published range of every [`Pid`]; entries here replace
/// or drop individual ranges. Keys are Mode 01 request codes such as `"0105"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Replacement `(min, max)` ranges
    #[serde(default)]
    pub ranges: HashMap<String, (f64, f64)>,
    /// Codes validated without any range
    #[serde(default)]
    pub unbounded: Vec<String>,
}

/// Outcome of a successful range check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsCheck {
    /// Value lies inside the known range
    InRange { min: f64, max: f64 },
    /// No range is known for this PID
    Unbounded,
}

/// Parse override text as a decimal number
///
/// Surrounding whitespace is ignored; NaN and infinities are rejected.
pub fn parse_value(code: &str, text: &str) -> Result<f64, ValidationError> {
    let non_numeric = || ValidationError::NonNumeric {
        code: code.to_string(),
        text: text.to_string(),
    };

    let value: f64 = text.trim().parse().map_err(|_| non_numeric())?;
    if !value.is_finite() {
        return Err(non_numeric());
    }
    Ok(value)
}

/// Range validator backed by a per-PID bounds table
#[derive(Debug, Clone)]
pub struct Validator {
    bounds: HashMap<Pid, (f64, f64)>,
}

impl Validator {
    /// Create a validator from the published ranges plus config overrides
    pub fn new(config: &ValidationConfig) -> Result<Self, ValidationError> {
        let mut bounds: HashMap<Pid, (f64, f64)> =
            Pid::ALL.iter().map(|pid| (*pid, pid.bounds())).collect();

        for (code, &(min, max)) in &config.ranges {
            let pid = config_pid(code)?;
            if min.is_nan() || max.is_nan() || min > max {
                return Err(ValidationError::InvalidFormat(format!(
                    "range for {} has min {} above max {}",
                    code, min, max
                )));
            }
            debug!(code = %code, min, max, "Overriding published range");
            bounds.insert(pid, (min, max));
        }

        for code in &config.unbounded {
            let pid = config_pid(code)?;
            debug!(code = %code, "Range check disabled");
            bounds.remove(&pid);
        }

        Ok(Self { bounds })
    }

    /// Known range for a PID
    pub fn bounds(&self, pid: Pid) -> Option<(f64, f64)> {
        self.bounds.get(&pid).copied()
    }

    /// Check a value against the PID's range, inclusive on both ends
    pub fn check(&self, pid: Pid, value: f64) -> Result<BoundsCheck, ValidationError> {
        let Some((min, max)) = self.bounds(pid) else {
            return Ok(BoundsCheck::Unbounded);
        };

        if value < min || value > max {
            Err(ValidationError::OutOfRange {
                code: format!("01{:02X}", pid.as_hex()),
                value,
                min,
                max,
            })
        } else {
            Ok(BoundsCheck::InRange { min, max })
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            bounds: Pid::ALL.iter().map(|pid| (*pid, pid.bounds())).collect(),
        }
    }
}

fn config_pid(code: &str) -> Result<Pid, ValidationError> {
    RequestCode::parse(code)
        .and_then(|request| request.pid())
        .map_err(|e| ValidationError::InvalidFormat(e.to_string()))
}
