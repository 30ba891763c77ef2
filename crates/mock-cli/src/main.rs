//! ELM Mock Responder - Main Entry Point
//!
//! Reads emulator commands from stdin, one per line, and prints the answer
//! or pass-through decision for each.
//!
//! ```bash
//! echo 010C | elm-mock --path-config path.config --decode
//! elm-mock --config elm-mock.toml --scenario engineoff < commands.txt
//! echo 0105 | elm-mock --memory --set 7e0-0105.txt=25
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use mock_cli::{init_logging, memory_store, parse_key_value, run_session, SessionOptions};
use mock_responder::{Dispatcher, MockConfig};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "elm-mock")]
#[command(about = "Synthesizes ELM327 emulator replies from mock override files")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, conflicts_with = "path_config")]
    config: Option<PathBuf>,

    /// Plain file whose first line is the responses directory
    #[arg(long)]
    path_config: Option<PathBuf>,

    /// Current emulator scenario
    #[arg(short, long, default_value = "default")]
    scenario: String,

    /// Print the decoded physical value after every Mode 01 answer
    #[arg(long)]
    decode: bool,

    /// Keep mock values in memory instead of the responses directory
    #[arg(long)]
    memory: bool,

    /// Preload a memory store entry, e.g. `7e0-0105.txt=25`
    #[arg(long = "set", value_name = "KEY=VALUE", requires = "memory", value_parser = parse_key_value)]
    entries: Vec<(String, String)>,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    info!("=== ELM mock responder v{} ===", env!("CARGO_PKG_VERSION"));

    let config = match &args.path_config {
        Some(path) => MockConfig::from_path_file(path),
        None => MockConfig::load(args.config.as_deref()),
    }
    .context("Failed to load configuration")?;

    if args.scenario == config.engine_off_scenario {
        info!(scenario = %args.scenario, "Engine-off scenario: every mocked request answers NO DATA");
    }

    let dispatcher = if args.memory {
        info!(entries = args.entries.len(), "Using in-memory mock store");
        Dispatcher::new(memory_store(&args.entries), &config)
    } else {
        Dispatcher::from_config(&config)
    }
    .context("Failed to build dispatcher")?;
    info!(dtc_flag = dispatcher.dtc().flag_is_set(), "Mock DTC flag state");

    let options = SessionOptions {
        scenario: &args.scenario,
        decode: args.decode,
    };
    run_session(&dispatcher, options, io::stdin().lock(), io::stdout().lock())?;

    Ok(())
}
