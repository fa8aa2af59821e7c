//! Recursive descent from split levels to a full parse tree.

use crate::error::TagError;
use crate::splitter::split_level;
use crate::types::{ParsedNode, TagValue};

/// Parse the root level of a tag body into its children.
pub fn parse_tree(text: &str) -> Result<Vec<(String, ParsedNode)>, TagError> {
    build_level(split_level(text)?)
}

/// Turn one level's entries into parsed children, descending into every group.
///
/// Each group interior is a strict substring of its parent, so the recursion
/// always terminates.
pub fn build_level(entries: Vec<(String, TagValue)>) -> Result<Vec<(String, ParsedNode)>, TagError> {
    entries
        .into_iter()
        .map(|(key, value)| {
            let node = match value {
                TagValue::Final(text) => ParsedNode::Leaf(text),
                TagValue::Group(inner) => ParsedNode::Node(build_level(split_level(&inner)?)?),
            };
            Ok((key, node))
        })
        .collect()
}
