//! Parse/write entry points bound to one block name and schema.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, error};

use crate::block::extract_body;
use crate::error::TagError;
use crate::materialize::materialize;
use crate::schema::{TagSchema, ValidationFailure};
use crate::serialize::write_tag;
use crate::tree::parse_tree;

/// A tag language: a block name plus the schema its records must satisfy.
///
/// Every method returns a `Result`; panics raised while parsing or inside
/// the schema are caught and reported as [`TagError::Internal`].
#[derive(Debug, Clone)]
pub struct TagSyntax<S> {
    block_name: String,
    schema: S,
}

impl<S: TagSchema> TagSyntax<S> {
    pub fn new(block_name: impl Into<String>, schema: S) -> Self {
        Self {
            block_name: block_name.into(),
            schema,
        }
    }

    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Parse a tag body (the text after the block name) into a typed record.
    pub fn parse(&self, text: &str) -> Result<S::Output, TagError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.parse_unguarded(text)));
        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                if err.is_validation() {
                    debug!(block = %self.block_name, %err, "tag failed validation");
                } else {
                    error!(block = %self.block_name, %err, "failed to parse tag");
                }
                Err(err)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(block = %self.block_name, %message, "panic while parsing tag");
                Err(TagError::Internal(message))
            }
        }
    }

    /// Find this syntax's block in note text and parse its body.
    pub fn parse_block(&self, text: &str) -> Result<S::Output, TagError> {
        match extract_body(text, &self.block_name) {
            Some(body) => self.parse(body),
            None => Err(TagError::MissingBlock(self.block_name.clone())),
        }
    }

    /// Render a record as this syntax's fenced block.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, TagError> {
        let text = write_tag(&self.block_name, value)?;
        debug!(block = %self.block_name, len = text.len(), "wrote tag");
        Ok(text)
    }

    fn parse_unguarded(&self, text: &str) -> Result<S::Output, TagError> {
        let tree = parse_tree(text)?;
        let record = materialize(&tree);
        debug!(block = %self.block_name, keys = record.len(), "materialized tag");
        self.schema
            .validate(&record)
            .map_err(|issues| TagError::Validation(ValidationFailure::new(issues)))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
