//! Mocked Response Synthesis
//!
//! Fabricates ELM327 emulator replies from externally stored override
//! values. When an override is missing or unusable the request falls back
//! to the emulator's built-in response dictionary.

mod config;
mod dispatcher;
mod dtc;
mod error;
mod live_data;
mod outcome;
mod scenario;
mod store;

#[cfg(test)]
mod testing;

pub use self::config::{MockConfig, ENV_PREFIX};
pub use dispatcher::Dispatcher;
pub use dtc::DtcTask;
pub use error::{ConfigError, EncodingDefect, ErrorKind, MockError};
pub use live_data::{LiveDataTask, OverrideResolver, Resolution};
pub use outcome::TaskOutcome;
pub use scenario::{ScenarioGate, ENGINE_OFF};
pub use store::{FileStore, MemoryStore, MockStore, SharedStore, MAX_LINE_BYTES};
