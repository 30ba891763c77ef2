//! Task Outcomes

use obd_protocol::Answer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the emulator should do with a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskOutcome {
    /// Send this reply verbatim
    Answer(Answer),
    /// Let the built-in response dictionary answer the command
    PassThrough(String),
}

impl TaskOutcome {
    /// Pass the original command back to the host
    pub fn pass_through(cmd: &str) -> Self {
        TaskOutcome::PassThrough(cmd.to_string())
    }

    /// Whether a reply was synthesized
    pub fn is_answer(&self) -> bool {
        matches!(self, TaskOutcome::Answer(_))
    }

    /// The synthesized reply, if any
    pub fn answer(&self) -> Option<&Answer> {
        match self {
            TaskOutcome::Answer(answer) => Some(answer),
            TaskOutcome::PassThrough(_) => None,
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Answer(answer) => write!(f, "ANSWER {}", answer),
            TaskOutcome::PassThrough(cmd) => write!(f, "PASSTHROUGH {}", cmd),
        }
    }
}
