//! Stopwatch tags for notes.
//!
//! A stopwatch lives in the note as a `stopwatch` block:
//!
//! ```text
//! `stopwatch name: tea limit: 180 techStuff: { id: 1 passed: 42 running: no }`
//! ```
//!
//! [`stopwatch_syntax`] reads and writes such blocks through the generic
//! [`tag_syntax::TagSyntax`]; [`StopwatchData::complete`] fills in what the
//! note leaves out.
//!
//! # Example
//!
//! ```
//! use inline_stopwatch::{stopwatch_syntax, Registry, Settings, StopwatchData};
//!
//! let record = stopwatch_syntax().parse("name: tea limit: 180").unwrap();
//! let data = StopwatchData::complete(record, &Settings::default(), &Registry::new());
//! assert_eq!(data.limit, 180);
//! assert_eq!(data.tech_stuff.id, "1");
//!
//! let text = stopwatch_syntax().write(&data.to_record()).unwrap();
//! assert!(text.starts_with("```stopwatch\nname: \"tea\" limit: 180"));
//! ```

pub mod cli;

mod data;
pub use data::{Registry, StopwatchData, TechStuffData};

mod progress;
pub use progress::{fill, Anchor, Fill};

mod schema;
pub use schema::{Running, StopwatchRecord, StopwatchSchema, TechStuff, MAX_SAFE_COUNT};

mod settings;
pub use settings::{Settings, SettingsError};

mod time;
pub use time::{format_time, parse_time, TimeError};

use tag_syntax::TagSyntax;

/// Name that opens a stopwatch block.
pub const BLOCK_NAME: &str = "stopwatch";

pub fn stopwatch_syntax() -> TagSyntax<StopwatchSchema> {
    TagSyntax::new(BLOCK_NAME, StopwatchSchema)
}
