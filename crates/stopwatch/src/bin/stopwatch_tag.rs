//! `stopwatch-tag`: read and write stopwatch tags on stdin/stdout.
//!
//! Usage:
//!   stopwatch-tag parse    < tag text   → completed record as JSON
//!   stopwatch-tag write    < JSON       → `stopwatch` block
//!   stopwatch-tag status   < tag text   → clock and progress bar now
//!
//! `STOPWATCH_SETTINGS` names a settings JSON file; `RUST_LOG` sets the log filter.

use std::io::{self, Read};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use inline_stopwatch::cli::{parse_tag, status, write_tag, CliError};
use inline_stopwatch::Settings;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn settings() -> Result<Settings, CliError> {
    match std::env::var_os("STOPWATCH_SETTINGS") {
        Some(path) => Ok(Settings::load(Path::new(&path))?),
        None => Ok(Settings::default()),
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run(command: &str, input: &str) -> Result<String, CliError> {
    match command {
        "parse" => parse_tag(input, &settings()?),
        "write" => write_tag(input.trim()),
        "status" => status(input, &settings()?, now_ms()),
        other => Err(CliError::Usage(format!(
            "unknown command `{other}`, expected parse, write or status"
        ))),
    }
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("parse");

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(command, &buf) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
