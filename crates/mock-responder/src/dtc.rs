//! Diagnostic Trouble Code Mocking
//!
//! A flag in the mock store decides whether Mode 03 reports a stored code.
//! Mode 04 empties the flag and lets the emulator acknowledge the clear.

use crate::config::MockConfig;
use crate::outcome::TaskOutcome;
use crate::scenario::ScenarioGate;
use crate::store::SharedStore;
use obd_protocol::{mode, Answer, RequestCode, ResponseFrame};
use tracing::{debug, error, warn};

/// Mode 03/04 mocking task
pub struct DtcTask {
    store: SharedStore,
    flag_key: String,
    gate: ScenarioGate,
    header: String,
}

impl DtcTask {
    /// Create a task from configuration
    pub fn new(store: SharedStore, config: &MockConfig) -> Self {
        Self {
            store,
            flag_key: config.dtc_flag_file.clone(),
            gate: ScenarioGate::new(&config.engine_off_scenario),
            header: config.response_header.clone(),
        }
    }

    /// Handle one command under the given scenario
    pub fn run(&self, scenario: &str, cmd: &str) -> TaskOutcome {
        if let Some(outcome) = self.gate.check(scenario) {
            return outcome;
        }

        match RequestCode::parse(cmd).map(|code| code.service()) {
            Ok(mode::READ_DTC) => self.read_dtc(cmd),
            Ok(mode::CLEAR_DTC) => self.clear_dtc(cmd),
            _ => {
                warn!(cmd = %cmd.trim(), "Unexpected command for DTC task");
                TaskOutcome::pass_through(cmd)
            }
        }
    }

    /// Whether the DTC flag is currently set
    ///
    /// Any content counts, including bytes that are not text.
    pub fn flag_is_set(&self) -> bool {
        matches!(self.store.is_non_empty(&self.flag_key), Ok(Some(true)))
    }

    fn read_dtc(&self, cmd: &str) -> TaskOutcome {
        let set = match self.store.is_non_empty(&self.flag_key) {
            Ok(Some(set)) => set,
            Ok(None) => {
                debug!(key = %self.flag_key, "No DTC flag stored");
                return TaskOutcome::pass_through(cmd);
            }
            Err(e) => {
                error!(
                    "Can't open {}: {}. Falling back to default response from the dictionary.",
                    self.flag_key, e
                );
                return TaskOutcome::pass_through(cmd);
            }
        };

        if !set {
            debug!(key = %self.flag_key, "DTC flag is clear");
            return TaskOutcome::pass_through(cmd);
        }

        debug!("Mocking DTC, because flag is set in {}", self.flag_key);
        TaskOutcome::Answer(Answer::Frame(ResponseFrame::one_stored_dtc(&self.header)))
    }

    fn clear_dtc(&self, cmd: &str) -> TaskOutcome {
        match self.store.truncate(&self.flag_key) {
            Ok(true) => debug!("Flag in {} unset", self.flag_key),
            Ok(false) => debug!(key = %self.flag_key, "No DTC flag location, nothing to clear"),
            Err(e) => error!(
                "Can't open {}: {}. Falling back to default response from the dictionary.",
                self.flag_key, e
            ),
        }
        // The emulator's dictionary acknowledges the clear
        TaskOutcome::pass_through(cmd)
    }
}
