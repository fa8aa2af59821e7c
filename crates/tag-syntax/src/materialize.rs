//! Parse tree to plain nested record.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::types::ParsedNode;

/// Convert parsed children into a record of strings and nested records.
///
/// Later duplicates overwrite earlier ones. No coercion happens here; every
/// scalar stays a string for the schema to interpret.
///
/// # Example
///
/// ```
/// use tag_syntax::{materialize, parse_tree};
/// use serde_json::json;
///
/// let tree = parse_tree(r#"name: { first: "Jo hn" } limit: 5"#).unwrap();
/// let record = materialize(&tree);
/// assert_eq!(serde_json::Value::Object(record), json!({"name": {"first": "Jo hn"}, "limit": "5"}));
/// ```
pub fn materialize(children: &[(String, ParsedNode)]) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, node) in children {
        let value = match node {
            ParsedNode::Leaf(text) => Value::String(strip_quotes(text).into_owned()),
            ParsedNode::Node(children) => Value::Object(materialize(children)),
        };
        out.insert(key.clone(), value);
    }
    out
}

/// Trim `text` and remove one matching pair of surrounding quotes.
///
/// Double-quoted text also has the writer's `\\` and `\"` escapes reversed.
/// Single-quoted and unquoted text is returned as-is after trimming.
pub fn strip_quotes(text: &str) -> Cow<'_, str> {
    let t = text.trim();
    if t.len() >= 2 {
        if t.starts_with('"') && t.ends_with('"') {
            return unescape(&t[1..t.len() - 1]);
        }
        if t.starts_with('\'') && t.ends_with('\'') {
            return Cow::Borrowed(&t[1..t.len() - 1]);
        }
    }
    Cow::Borrowed(t)
}

fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '"' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::parse_tree;
    use serde_json::json;

    fn record(text: &str) -> Value {
        Value::Object(materialize(&parse_tree(text).unwrap()))
    }

    #[test]
    fn flat_record() {
        assert_eq!(record("passed: 12 limit: 60"), json!({"passed": "12", "limit": "60"}));
    }

    #[test]
    fn nested_record_with_quotes() {
        assert_eq!(
            record(r#"name: { first: "Jo hn" last: Lee } limit: 5"#),
            json!({"name": {"first": "Jo hn", "last": "Lee"}, "limit": "5"})
        );
    }

    #[test]
    fn last_duplicate_wins() {
        assert_eq!(record("a: 1 a: 2"), json!({"a": "2"}));
        assert_eq!(record("a: { x: 1 } a: plain"), json!({"a": "plain"}));
        assert_eq!(record("a: plain a: { x: 1 }"), json!({"a": {"x": "1"}}));
    }

    #[test]
    fn duplicate_keeps_first_position() {
        let map = materialize(&parse_tree("a: 1 b: 2 a: 3").unwrap());
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map["a"], json!("3"));
    }

    #[test]
    fn strip_single_and_double_quotes() {
        assert_eq!(strip_quotes(r#""abc""#), "abc");
        assert_eq!(strip_quotes("'abc'"), "abc");
        assert_eq!(strip_quotes("  'a b'  "), "a b");
    }

    #[test]
    fn strip_is_noop_without_matching_pair() {
        assert_eq!(strip_quotes("abc"), "abc");
        assert_eq!(strip_quotes(r#""abc"#), r#""abc"#);
        assert_eq!(strip_quotes(r#"'abc""#), r#"'abc""#);
        assert_eq!(strip_quotes(r#"""#), r#"""#);
        assert_eq!(strip_quotes("'"), "'");
    }

    #[test]
    fn strip_removes_one_layer_only() {
        assert_eq!(strip_quotes(r#""'inner'""#), "'inner'");
        assert_eq!(strip_quotes(r#"''x''"#), "'x'");
    }

    #[test]
    fn double_quoted_escapes_are_reversed() {
        assert_eq!(strip_quotes(r#""A\"B""#), r#"A"B"#);
        assert_eq!(strip_quotes(r#""back\\slash""#), r"back\slash");
        assert_eq!(strip_quotes(r#""keep \n as is""#), r"keep \n as is");
        assert_eq!(strip_quotes(r"'A\\B'"), r"A\\B");
    }

    #[test]
    fn empty_quotes_give_empty_string() {
        assert_eq!(record(r#"name: """#), json!({"name": ""}));
    }
}
