//! ELM Mock Driver
//!
//! Feeds emulator commands to the [`Dispatcher`] and prints what the
//! emulator would send back.

use mock_responder::{Dispatcher, MemoryStore, TaskOutcome};
use obd_protocol::Answer;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Per-session settings
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions<'a> {
    /// Current emulator scenario
    pub scenario: &'a str,
    /// Also print the physical value behind every Mode 01 answer
    pub decode: bool,
}

/// Counters for a finished session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: usize,
    pub passed_through: usize,
}

/// Answer every non-empty input line, one command per line
///
/// Stops at the first conversion table defect, returning it as the error.
pub fn run_session<R: BufRead, W: Write>(
    dispatcher: &Dispatcher,
    options: SessionOptions<'_>,
    input: R,
    mut output: W,
) -> anyhow::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    for line in input.lines() {
        let line = line?;
        let cmd = line.trim();
        if cmd.is_empty() {
            continue;
        }

        debug!(cmd = %cmd, scenario = %options.scenario, "Dispatching");
        let outcome = dispatcher.dispatch(options.scenario, cmd)?;

        match &outcome {
            TaskOutcome::Answer(_) => summary.answered += 1,
            TaskOutcome::PassThrough(_) => summary.passed_through += 1,
        }
        writeln!(output, "{}", outcome)?;

        if options.decode {
            if let Some(decoded) = describe(&outcome) {
                writeln!(output, "DECODED {}", decoded)?;
            }
        }
    }

    info!(
        answered = summary.answered,
        passed_through = summary.passed_through,
        "Session finished"
    );
    Ok(summary)
}

/// What a scan tool would display for a Mode 01 answer
pub fn describe(outcome: &TaskOutcome) -> Option<String> {
    let TaskOutcome::Answer(Answer::Frame(frame)) = outcome else {
        return None;
    };
    let (pid, value) = frame.decoded()?;
    Some(format!(
        "01{:02X} {}: {:.2} {}",
        pid.as_hex(),
        pid.name(),
        value,
        pid.unit()
    ))
}

/// Parse a `KEY=VALUE` store entry
pub fn parse_key_value(entry: &str) -> Result<(String, String), String> {
    match entry.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", entry)),
    }
}

/// In-memory store preloaded with `entries`
pub fn memory_store(entries: &[(String, String)]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for (key, value) in entries {
        debug!(key = %key, value = %value, "Preloading memory store");
        store.insert(key.as_str(), value.as_str());
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_responder::MockConfig;

    fn dispatcher() -> Dispatcher {
        let store = memory_store(&[
            ("7e0-010C.txt".to_string(), "1000".to_string()),
            ("dtc.txt".to_string(), "1".to_string()),
        ]);
        Dispatcher::new(store, &MockConfig::default()).unwrap()
    }

    fn options(scenario: &str, decode: bool) -> SessionOptions<'_> {
        SessionOptions { scenario, decode }
    }

    #[test]
    fn test_session_output() {
        let input = "010C\n\n0105\n03\n".as_bytes();
        let mut output = Vec::new();

        let summary =
            run_session(&dispatcher(), options("default", false), input, &mut output).unwrap();
        assert_eq!(
            summary,
            SessionSummary {
                answered: 2,
                passed_through: 1
            }
        );

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ANSWER <header>7E8</header><size>04</size><data>41 0C 0F A0</data>",
                "PASSTHROUGH 0105",
                "ANSWER <header>7E8</header><size>07</size><data>43 01 43 00 00 00 00</data>",
            ]
        );
    }

    #[test]
    fn test_decode_output() {
        let input = "010C\n03\n0105\n".as_bytes();
        let mut output = Vec::new();

        run_session(&dispatcher(), options("default", true), input, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ANSWER <header>7E8</header><size>04</size><data>41 0C 0F A0</data>",
                "DECODED 010C Engine speed: 1000.00 rpm",
                "ANSWER <header>7E8</header><size>07</size><data>43 01 43 00 00 00 00</data>",
                "PASSTHROUGH 0105",
            ]
        );
    }

    #[test]
    fn test_engine_off_session() {
        let mut output = Vec::new();
        run_session(
            &dispatcher(),
            options("engineoff", true),
            "010C\n".as_bytes(),
            &mut output,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "ANSWER <writeln>NO DATA</writeln>\n"
        );
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("7e0-0105.txt=25"),
            Ok(("7e0-0105.txt".to_string(), "25".to_string()))
        );
        assert_eq!(
            parse_key_value("dtc.txt="),
            Ok(("dtc.txt".to_string(), String::new()))
        );
        assert!(parse_key_value("dtc.txt").is_err());
        assert!(parse_key_value("=1").is_err());
    }

    #[test]
    fn test_memory_store_preload() {
        let store = memory_store(&[("7e0-0105.txt".to_string(), "25".to_string())]);
        assert_eq!(store.get("7e0-0105.txt"), Some(b"25".to_vec()));
    }
}
