//! Validation seam between the parser and a typed record.
//!
//! A schema receives the materialized record untouched and either builds its
//! typed value or reports every problem it found as an [`Issue`].

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Path label used when an issue points at the record itself.
pub const ROOT_LABEL: &str = "<root>";

/// Separator between rendered issues.
pub const ISSUE_DELIMITER: &str = "\n";

/// Turns a materialized record into a typed value.
///
/// Implementations must be free of side effects; one schema may serve many
/// concurrent parses. Plain closures of the right shape are schemas too.
pub trait TagSchema {
    type Output;

    fn validate(&self, record: &Map<String, Value>) -> Result<Self::Output, Vec<Issue>>;
}

impl<T, F> TagSchema for F
where
    F: Fn(&Map<String, Value>) -> Result<T, Vec<Issue>>,
{
    type Output = T;

    fn validate(&self, record: &Map<String, Value>) -> Result<T, Vec<Issue>> {
        self(record)
    }
}

/// One problem found by a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Field path from the record root; array positions are numeric segments.
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    pub fn new<I, S>(path: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// `expected {expected} but received {received}`.
    pub fn expected<I, S>(path: I, expected: impl fmt::Display, received: impl fmt::Display) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(path, format!("expected {expected} but received {received}"))
    }

    /// Prefix the path with `segment`, for issues bubbling out of a nested record.
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Dotted path, or [`ROOT_LABEL`] when it is empty.
    pub fn path_label(&self) -> String {
        let joined = self.path.join(".");
        if joined.trim().is_empty() {
            ROOT_LABEL.to_string()
        } else {
            joined
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}.", self.path_label(), self.message)
    }
}

/// Every issue a schema reported for one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_issues(.issues))]
pub struct ValidationFailure {
    pub issues: Vec<Issue>,
}

impl ValidationFailure {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

fn render_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(ISSUE_DELIMITER)
}

/// Short name of a JSON value's kind, for `received …` messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
