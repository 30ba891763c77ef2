//! Live-Data Mocking
//!
//! Answers Mode 01 requests with a fabricated frame when an override value
//! is stored for the request code. A response is built in four steps:
//!
//! decimal text → physical value → raw bytes → `41 <pid> <bytes>` frame
//!
//! Any failure before the frame exists leaves the request to the emulator's
//! own dictionary.

use crate::config::MockConfig;
use crate::error::{ConfigError, EncodingDefect, MockError};
use crate::outcome::TaskOutcome;
use crate::scenario::ScenarioGate;
use crate::store::SharedStore;
use data_validator::{parse_value, BoundsCheck, Validator};
use obd_protocol::{Answer, RequestCode, ResponseFrame};
use tracing::{debug, error, warn};

/// Result of looking up an override
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing stored for this code, the normal case
    Absent,
    /// First line of the override, untrimmed
    ///
    /// Bytes that are not UTF-8 become U+FFFD and fail number parsing.
    Present(String),
}

/// Maps request codes to override keys and reads them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideResolver {
    prefix: String,
}

impl OverrideResolver {
    /// Resolver for keys named `<prefix>-<CODE>.txt`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Store key holding the override for `code`
    pub fn key_for(&self, code: &RequestCode) -> String {
        format!("{}-{}.txt", self.prefix, code)
    }

    /// Look up the override for `code`
    pub fn resolve(&self, store: &SharedStore, code: &RequestCode) -> Result<Resolution, MockError> {
        let key = self.key_for(code);
        match store.read_line(&key) {
            Ok(Some(line)) => Ok(Resolution::Present(
                String::from_utf8_lossy(&line).into_owned(),
            )),
            Ok(None) => {
                debug!(code = %code, key = %key, "No override stored");
                Ok(Resolution::Absent)
            }
            Err(source) => Err(MockError::Io { key, source }),
        }
    }
}

/// Mode 01 mocking task
pub struct LiveDataTask {
    store: SharedStore,
    resolver: OverrideResolver,
    validator: Validator,
    gate: ScenarioGate,
    header: String,
}

impl LiveDataTask {
    /// Create a task from configuration
    pub fn new(store: SharedStore, config: &MockConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            resolver: OverrideResolver::new(&config.override_prefix),
            validator: Validator::new(&config.validation)?,
            gate: ScenarioGate::new(&config.engine_off_scenario),
            header: config.response_header.clone(),
        })
    }

    /// Handle one command under the given scenario
    ///
    /// Only a broken conversion table surfaces as an error; every other
    /// failure is logged and becomes a pass-through.
    pub fn run(&self, scenario: &str, cmd: &str) -> Result<TaskOutcome, EncodingDefect> {
        if let Some(outcome) = self.gate.check(scenario) {
            return Ok(outcome);
        }

        let code = match RequestCode::parse(cmd) {
            Ok(code) => code,
            Err(e) => {
                warn!(cmd = %cmd.trim(), "{}", e);
                return Ok(TaskOutcome::pass_through(cmd));
            }
        };

        let text = match self.resolver.resolve(&self.store, &code) {
            Ok(Resolution::Present(text)) => text,
            Ok(Resolution::Absent) => return Ok(TaskOutcome::pass_through(cmd)),
            Err(e) => {
                error!(
                    code = %code,
                    kind = ?e.kind(),
                    "{}. Falling back to default response from the dictionary.",
                    e
                );
                return Ok(TaskOutcome::pass_through(cmd));
            }
        };

        match self.synthesize(&code, text.trim()) {
            Ok(frame) => {
                debug!(
                    code = %code,
                    value = %text.trim(),
                    key = %self.resolver.key_for(&code),
                    "Mocking value"
                );
                Ok(TaskOutcome::Answer(Answer::Frame(frame)))
            }
            Err(MockError::Defect(defect)) => {
                error!(code = %code, value = %text.trim(), "{}", defect);
                Err(defect)
            }
            Err(e) => {
                error!(
                    code = %code,
                    kind = ?e.kind(),
                    "Failed to construct mock response, reason: {}. Falling back to default \
                     response from the dictionary.",
                    e
                );
                Ok(TaskOutcome::pass_through(cmd))
            }
        }
    }

    /// Convert override text into a frame for `code`
    pub fn synthesize(&self, code: &RequestCode, text: &str) -> Result<ResponseFrame, MockError> {
        let value = parse_value(&code.to_string(), text)?;
        let pid = code.pid().map_err(MockError::Request)?;

        if let BoundsCheck::Unbounded = self.validator.check(pid, value)? {
            warn!(
                code = %code,
                value,
                "Can't guarantee that the response is valid because the allowed range is \
                 unknown. Consider adding a range for this PID."
            );
        }

        let bytes = pid.encode(value).map_err(EncodingDefect)?;
        Ok(ResponseFrame::current_data(&self.header, pid, &bytes))
    }
}
