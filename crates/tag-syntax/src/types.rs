//! Intermediate shapes produced while parsing a tag.

/// Shallow parse of one right-hand side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    /// Scalar text, still carrying any quotes.
    Final(String),
    /// Unparsed interior of a balanced `{ … }` span.
    Group(String),
}

impl TagValue {
    pub fn text(&self) -> &str {
        match self {
            TagValue::Final(text) | TagValue::Group(text) => text,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, TagValue::Group(_))
    }
}

/// Fully descended parse tree.
///
/// Keys inside a [`ParsedNode::Node`] keep source order and may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNode {
    Leaf(String),
    Node(Vec<(String, ParsedNode)>),
}

impl ParsedNode {
    /// Last child with the given key, mirroring how the materializer resolves duplicates.
    pub fn get(&self, key: &str) -> Option<&ParsedNode> {
        match self {
            ParsedNode::Leaf(_) => None,
            ParsedNode::Node(children) => children
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, node)| node),
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            ParsedNode::Leaf(text) => Some(text),
            ParsedNode::Node(_) => None,
        }
    }
}
