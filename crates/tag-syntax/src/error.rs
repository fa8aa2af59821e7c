//! Errors surfaced by the tag parser and writer.

use thiserror::Error;

use crate::schema::ValidationFailure;

/// Text shown in place of a tag when parsing itself failed.
pub const GENERIC_ERROR: &str = "Error";

#[derive(Debug, Error)]
pub enum TagError {
    /// A `}` with no matching `{`. Offset is relative to the fragment being scanned.
    #[error("unbalanced closing brace at offset {offset}")]
    BraceImbalance { offset: usize },
    #[error("{0}")]
    Validation(#[from] ValidationFailure),
    #[error("no `{0}` block found")]
    MissingBlock(String),
    #[error("internal failure: {0}")]
    Internal(String),
    #[error("tag value must be a record, got {0}")]
    NotARecord(&'static str),
    #[error("failed to serialize tag value: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TagError {
    /// The text a host renders in place of the widget.
    ///
    /// Validation failures keep their per-field lines; everything else
    /// collapses to [`GENERIC_ERROR`].
    pub fn message(&self) -> String {
        match self {
            TagError::Validation(failure) => failure.to_string(),
            _ => GENERIC_ERROR.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TagError::Validation(_))
    }
}
