//! Scenario Gate

use crate::outcome::TaskOutcome;
use obd_protocol::Answer;

/// Scenario identifier the emulator uses when the ignition is off
pub const ENGINE_OFF: &str = "engineoff";

/// Short-circuits every mocked request while the engine is off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioGate {
    engine_off: String,
}

impl ScenarioGate {
    /// Gate on a custom engine-off scenario name
    pub fn new(engine_off: impl Into<String>) -> Self {
        Self {
            engine_off: engine_off.into(),
        }
    }

    /// `NO DATA` when `scenario` is the engine-off state, otherwise `None`
    pub fn check(&self, scenario: &str) -> Option<TaskOutcome> {
        (scenario == self.engine_off).then_some(TaskOutcome::Answer(Answer::NoData))
    }
}

impl Default for ScenarioGate {
    fn default() -> Self {
        Self::new(ENGINE_OFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_off() {
        let gate = ScenarioGate::default();
        assert_eq!(
            gate.check("engineoff"),
            Some(TaskOutcome::Answer(Answer::NoData))
        );
        assert_eq!(gate.check("default"), None);
        assert_eq!(gate.check("car"), None);
    }

    #[test]
    fn test_custom_scenario() {
        let gate = ScenarioGate::new("ignition_off");
        assert!(gate.check("ignition_off").is_some());
        assert!(gate.check("engineoff").is_none());
    }
}
