//! Request Dispatch
//!
//! Routes emulator commands to the mocking task responsible for them.

use crate::config::MockConfig;
use crate::dtc::DtcTask;
use crate::error::{ConfigError, EncodingDefect};
use crate::live_data::LiveDataTask;
use crate::outcome::TaskOutcome;
use crate::store::{FileStore, SharedStore};
use obd_protocol::{mode, RequestCode};
use std::sync::Arc;
use tracing::{debug, info};

/// Entry point used by the emulator for every mockable command
pub struct Dispatcher {
    live_data: LiveDataTask,
    dtc: DtcTask,
}

impl Dispatcher {
    /// Build both tasks over a shared store
    pub fn new(store: SharedStore, config: &MockConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            live_data: LiveDataTask::new(store.clone(), config)?,
            dtc: DtcTask::new(store, config),
        })
    }

    /// Build both tasks over the configured responses directory
    pub fn from_config(config: &MockConfig) -> Result<Self, ConfigError> {
        let store = FileStore::new(&config.responses_dir);
        info!(
            responses_dir = %store.root().display(),
            "Reading mock responses from directory"
        );
        Self::new(Arc::new(store), config)
    }

    /// Handle one command under the given scenario
    ///
    /// Routing looks at the service byte only, so the owning task applies
    /// the scenario gate before any further parsing.
    pub fn dispatch(&self, scenario: &str, cmd: &str) -> Result<TaskOutcome, EncodingDefect> {
        match RequestCode::parse_service(cmd) {
            Ok(mode::CURRENT_DATA) => self.live_data.run(scenario, cmd),
            Ok(mode::READ_DTC | mode::CLEAR_DTC) => Ok(self.dtc.run(scenario, cmd)),
            _ => {
                debug!(cmd = %cmd.trim(), "No mocking task for command");
                Ok(TaskOutcome::pass_through(cmd))
            }
        }
    }

    /// Mode 03/04 task
    pub fn dtc(&self) -> &DtcTask {
        &self.dtc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use obd_protocol::Answer;
    use std::fs;

    fn dispatcher(store: Arc<MemoryStore>) -> Dispatcher {
        Dispatcher::new(store, &MockConfig::default()).unwrap()
    }

    #[test]
    fn test_routes_by_service() {
        let store = Arc::new(MemoryStore::new());
        store.insert("7e0-0105.txt", "25");
        store.insert("dtc.txt", "1");
        let dispatcher = dispatcher(store);

        assert_eq!(
            dispatcher.dispatch("default", "0105").unwrap().answer().unwrap().to_string(),
            "<header>7E8</header><size>03</size><data>41 05 41</data>"
        );
        assert!(dispatcher.dispatch("default", "03").unwrap().is_answer());
        assert_eq!(
            dispatcher.dispatch("default", "0902").unwrap(),
            TaskOutcome::PassThrough("0902".to_string())
        );
        assert_eq!(
            dispatcher.dispatch("default", "ATZ").unwrap(),
            TaskOutcome::PassThrough("ATZ".to_string())
        );
    }

    #[test]
    fn test_engine_off_for_mocked_services() {
        let dispatcher = dispatcher(Arc::new(MemoryStore::new()));
        for cmd in ["0105", "010C", "0142", "03", "04"] {
            assert_eq!(
                dispatcher.dispatch("engineoff", cmd).unwrap(),
                TaskOutcome::Answer(Answer::NoData),
                "{cmd}"
            );
        }
    }

    #[test]
    fn test_truncated_live_data_command_is_gated() {
        let store = Arc::new(MemoryStore::new());
        store.insert("dtc.txt", "1");
        let dispatcher = dispatcher(store);

        for cmd in ["01", "01ZZ"] {
            assert_eq!(
                dispatcher.dispatch("engineoff", cmd).unwrap(),
                dispatcher.live_data.run("engineoff", cmd).unwrap()
            );
            assert_eq!(
                dispatcher.dispatch("engineoff", cmd).unwrap(),
                TaskOutcome::Answer(Answer::NoData)
            );
            assert_eq!(
                dispatcher.dispatch("default", cmd).unwrap(),
                TaskOutcome::PassThrough(cmd.to_string())
            );
        }
        assert!(dispatcher.dtc().flag_is_set());
    }

    #[test]
    fn test_from_config_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("7e0-010C.txt"), "1000\n").unwrap();
        let config = MockConfig {
            responses_dir: dir.path().to_path_buf(),
            ..MockConfig::default()
        };
        let dispatcher = Dispatcher::from_config(&config).unwrap();

        let outcome = dispatcher.dispatch("default", "010C").unwrap();
        assert_eq!(
            outcome.answer().unwrap().to_string(),
            "<header>7E8</header><size>04</size><data>41 0C 0F A0</data>"
        );
        assert!(!dispatcher.dispatch("default", "0105").unwrap().is_answer());
    }
}
