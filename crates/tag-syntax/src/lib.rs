//! Inline tag syntax: `key: value` pairs with nested `{ … }` groups.
//!
//! Text goes through four pure steps: the splitter cuts one level into
//! entries (using the brace matcher for groups), the tree builder descends
//! into every group, the materializer turns the tree into a record of strings
//! and nested records, and a [`TagSchema`] turns that record into a typed
//! value. [`write_tag`] goes the other way.
//!
//! # Example
//!
//! ```
//! use tag_syntax::{Issue, TagSyntax};
//! use serde_json::{json, Map, Value};
//!
//! let syntax = TagSyntax::new("stopwatch", |record: &Map<String, Value>| -> Result<Value, Vec<Issue>> {
//!     Ok(Value::Object(record.clone()))
//! });
//!
//! let value = syntax.parse(r#"name: { first: "Jo hn" last: Lee } limit: 5"#).unwrap();
//! assert_eq!(value, json!({"name": {"first": "Jo hn", "last": "Lee"}, "limit": "5"}));
//!
//! let text = syntax.write(&json!({"limit": 5})).unwrap();
//! assert_eq!(text, "```stopwatch\nlimit: 5\n```");
//! ```

mod block;
pub use block::extract_body;

mod brace;
pub use brace::{check_closers, match_group, BraceDepth, GroupSpan};

mod error;
pub use error::{TagError, GENERIC_ERROR};

mod handler;
pub use handler::TagSyntax;

mod materialize;
pub use materialize::{materialize, strip_quotes};

pub mod schema;
pub use schema::{Issue, TagSchema, ValidationFailure};

mod serialize;
pub use serialize::{escape, render_record, write_tag};

mod splitter;
pub use splitter::split_level;

mod tree;
pub use tree::{build_level, parse_tree};

mod types;
pub use types::{ParsedNode, TagValue};
