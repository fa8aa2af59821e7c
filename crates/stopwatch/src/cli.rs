//! Logic behind the `stopwatch-tag` binary.
//!
//! - `parse`: tag text → completed record as JSON
//! - `write`: JSON record → canonical `stopwatch` block
//! - `status`: tag text → clock and progress bar at a given instant

use tag_syntax::TagError;

use crate::data::{Registry, StopwatchData};
use crate::progress::{fill, Anchor};
use crate::schema::StopwatchRecord;
use crate::settings::{Settings, SettingsError};
use crate::stopwatch_syntax;
use crate::time::format_time;

#[derive(Debug)]
pub enum CliError {
    Tag(TagError),
    Json(serde_json::Error),
    Settings(SettingsError),
    Usage(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Tag(e) => write!(f, "{}", e.message()),
            CliError::Json(e) => write!(f, "{e}"),
            CliError::Settings(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "usage: {e}"),
        }
    }
}

impl From<TagError> for CliError {
    fn from(e: TagError) -> Self {
        CliError::Tag(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Settings(e)
    }
}

/// Read a stopwatch from fenced, inline or bare tag text and fill in its defaults.
pub fn read_stopwatch(input: &str, settings: &Settings) -> Result<StopwatchData, CliError> {
    let syntax = stopwatch_syntax();
    let record = match syntax.parse_block(input) {
        Err(TagError::MissingBlock(_)) => syntax.parse(input.trim())?,
        other => other?,
    };
    Ok(StopwatchData::complete(record, settings, &Registry::new()))
}

/// Parse tag text and return the completed record as pretty JSON.
pub fn parse_tag(input: &str, settings: &Settings) -> Result<String, CliError> {
    let data = read_stopwatch(input, settings)?;
    Ok(serde_json::to_string_pretty(&data)?)
}

/// Render a JSON record as a `stopwatch` block.
pub fn write_tag(json: &str) -> Result<String, CliError> {
    let record: StopwatchRecord = serde_json::from_str(json)?;
    Ok(stopwatch_syntax().write(&record)?)
}

/// One line describing the stopwatch at `now_ms`: clock, bar anchor and bar width.
pub fn status(input: &str, settings: &Settings, now_ms: u64) -> Result<String, CliError> {
    let data = read_stopwatch(input, settings)?;
    let sec = data.elapsed(now_ms);
    let bar = fill(sec, data.limit);
    let anchor = match bar.anchor {
        Anchor::Left => "left",
        Anchor::Right => "right",
    };
    let state = if data.is_running() { "running" } else { "stopped" };
    Ok(format!(
        "{} {state} {anchor} {}",
        format_time(sec),
        bar.css_width()
    ))
}
