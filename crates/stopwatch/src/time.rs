//! `HH:MM:SS` clock text.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("invalid time component `{0}`")]
    InvalidComponent(String),
    #[error("too many time components in `{0}`")]
    TooManyComponents(String),
    #[error("time `{0}` is out of range")]
    Overflow(String),
}

/// Format seconds as zero-padded `HH:MM:SS`. Hours are not wrapped.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Parse `SS`, `MM:SS` or `HH:MM:SS` into seconds.
///
/// Components are not range-checked, so `90` and `1:30` both read as 90.
pub fn parse_time(text: &str) -> Result<u64, TimeError> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() > 3 {
        return Err(TimeError::TooManyComponents(text.to_string()));
    }
    parts.iter().try_fold(0u64, |acc, part| {
        let n = part
            .trim()
            .parse::<u64>()
            .map_err(|_| TimeError::InvalidComponent((*part).to_string()))?;
        acc.checked_mul(60)
            .and_then(|acc| acc.checked_add(n))
            .ok_or_else(|| TimeError::Overflow(text.to_string()))
    })
}
