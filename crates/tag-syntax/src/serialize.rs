//! Canonical tag text from a typed record.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TagError;
use crate::schema::value_kind;

/// Render `value` as a fenced block labelled `block_name`.
///
/// The value must serialize to a record. Field order follows the value's
/// own serialization order.
///
/// # Example
///
/// ```
/// use tag_syntax::write_tag;
/// use serde_json::json;
///
/// let text = write_tag("stopwatch", &json!({"name": "A\"B", "nested": {"x": 1, "y": false}})).unwrap();
/// assert_eq!(text, "```stopwatch\nname: \"A\\\"B\" nested: { x: 1 y: false }\n```");
/// ```
pub fn write_tag<T: Serialize + ?Sized>(block_name: &str, value: &T) -> Result<String, TagError> {
    let record = match serde_json::to_value(value)? {
        Value::Object(record) => record,
        other => return Err(TagError::NotARecord(value_kind(&other))),
    };
    let body = render_record(&record);
    Ok(format!("```{block_name}\n{}\n```", body.trim()))
}

/// Space-joined `key: value` pairs of one record, without the fence.
pub fn render_record(record: &Map<String, Value>) -> String {
    record
        .iter()
        .map(|(key, value)| render_entry(key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_entry(key: &str, value: &Value) -> String {
    match value {
        Value::Object(children) => format!("{key}: {{ {} }}", render_record(children)),
        // Sequences have no syntax of their own; they become index-keyed groups.
        Value::Array(items) => {
            let inner = items
                .iter()
                .enumerate()
                .map(|(i, item)| render_entry(&i.to_string(), item))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{key}: {{ {inner} }}")
        }
        Value::Number(n) => format!("{key}: {n}"),
        Value::Bool(b) => format!("{key}: {b}"),
        Value::Null => format!("{key}: null"),
        Value::String(s) => format!("{key}: \"{}\"", escape(s)),
    }
}

/// Escape backslashes and double quotes for a double-quoted leaf.
///
/// Newlines and braces pass through unchanged.
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last = 0;

    for (i, ch) in s.char_indices() {
        let escaped = match ch {
            '"' => "\\\"",
            '\\' => "\\\\",
            _ => continue,
        };
        result.push_str(&s[last..i]);
        result.push_str(escaped);
        last = i + ch.len_utf8();
    }

    result.push_str(&s[last..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> String {
        match value {
            Value::Object(record) => render_record(&record),
            _ => unreachable!(),
        }
    }

    #[test]
    fn scalars() {
        assert_eq!(
            body(json!({"s": "text", "n": 12, "f": 1.5, "t": true, "z": null})),
            r#"s: "text" n: 12 f: 1.5 t: true z: null"#
        );
    }

    #[test]
    fn nested_record() {
        assert_eq!(
            body(json!({"name": "A\"B", "nested": {"x": 1, "y": false}})),
            r#"name: "A\"B" nested: { x: 1 y: false }"#
        );
    }

    #[test]
    fn arrays_become_index_groups() {
        assert_eq!(
            body(json!({"laps": [3, "x", {"a": 1}]})),
            r#"laps: { 0: 3 1: "x" 2: { a: 1 } }"#
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(body(json!({"g": {}, "l": []})), "g: {  } l: {  }");
    }

    #[test]
    fn fenced_output() {
        let text = write_tag("stopwatch", &json!({"limit": 60})).unwrap();
        assert_eq!(text, "```stopwatch\nlimit: 60\n```");
    }

    #[test]
    fn empty_record_has_empty_body() {
        assert_eq!(write_tag("sw", &json!({})).unwrap(), "```sw\n\n```");
    }

    #[test]
    fn non_record_is_rejected() {
        let err = write_tag("sw", &json!([1, 2])).unwrap_err();
        assert!(matches!(err, TagError::NotARecord("array")));
        assert!(matches!(write_tag("sw", "x"), Err(TagError::NotARecord("string"))));
    }

    #[test]
    fn escape_only_touches_quotes_and_backslashes() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape("line\n{brace}"), "line\n{brace}");
        assert_eq!(escape("日本\"語"), "日本\\\"語");
    }
}
