//! Splits one nesting level of tag text into ordered `(key, value)` entries.

use std::sync::OnceLock;

use regex::Regex;

use crate::brace::{match_group, BraceDepth};
use crate::error::TagError;
use crate::types::TagValue;

/// `key:` or `key :` starting on a word boundary.
fn key_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|[^A-Za-z0-9_])([A-Za-z0-9_]+)\s?:").unwrap())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyToken<'a> {
    key: &'a str,
    /// Byte offset of the first key character.
    start: usize,
    /// Byte offset just past the colon.
    end: usize,
}

fn find_key(text: &str) -> Option<KeyToken<'_>> {
    let caps = key_token_regex().captures(text)?;
    let key = caps.get(1)?;
    let whole = caps.get(0)?;
    Some(KeyToken {
        key: key.as_str(),
        start: key.start(),
        end: whole.end(),
    })
}

/// Split `text` into the entries of a single level.
///
/// Group values keep their raw interior; nothing below this level is parsed.
/// Duplicate keys are all returned, in source order.
///
/// # Example
///
/// ```
/// use tag_syntax::{split_level, TagValue};
///
/// let entries = split_level("limit: 5 tech: { id: 1 }").unwrap();
/// assert_eq!(entries[0], ("limit".to_string(), TagValue::Final("5".into())));
/// assert_eq!(entries[1], ("tech".to_string(), TagValue::Group("id: 1".into())));
/// ```
pub fn split_level(text: &str) -> Result<Vec<(String, TagValue)>, TagError> {
    let mut entries = Vec::new();
    let mut rest = text.trim();
    // Text outside groups shares one balance, so a `{` in one value may be closed in a later one.
    let mut depth = BraceDepth::new();

    while !rest.is_empty() {
        let Some(token) = find_key(rest) else {
            // Trailing text without a key is dropped, but a stray closer still counts.
            depth.scan(rest)?;
            break;
        };
        depth.scan(&rest[..token.start])?;

        let key = token.key.to_string();
        let region = rest[token.end..].trim();

        if region.starts_with('{') {
            let span = match_group(region)?;
            entries.push((key, TagValue::Group(span.value.to_string())));
            rest = span.next;
            continue;
        }

        match find_key(region) {
            Some(next) => {
                let value = region[..next.start].trim();
                depth.scan(value)?;
                entries.push((key, TagValue::Final(value.to_string())));
                rest = &region[next.start..];
            }
            None => {
                depth.scan(region)?;
                entries.push((key, TagValue::Final(region.to_string())));
                rest = "";
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(entries: &[(String, TagValue)]) -> Vec<&str> {
        entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn flat_pairs() {
        let entries = split_level("passed: 12 limit: 60").unwrap();
        assert_eq!(
            entries,
            vec![
                ("passed".to_string(), TagValue::Final("12".into())),
                ("limit".to_string(), TagValue::Final("60".into())),
            ]
        );
    }

    #[test]
    fn space_before_colon_is_allowed_once() {
        let entries = split_level("a : 1 b:2").unwrap();
        assert_eq!(keys(&entries), vec!["a", "b"]);
        assert_eq!(entries[0].1, TagValue::Final("1".into()));
        assert_eq!(entries[1].1, TagValue::Final("2".into()));
    }

    #[test]
    fn quoted_values_with_spaces() {
        let entries = split_level(r#"first: "Jo hn" last: Lee"#).unwrap();
        assert_eq!(entries[0].1, TagValue::Final(r#""Jo hn""#.into()));
        assert_eq!(entries[1].1, TagValue::Final("Lee".into()));
    }

    #[test]
    fn group_value_keeps_raw_interior() {
        let entries = split_level("name: { first: x inner: { y: 1 } } limit: 5").unwrap();
        assert_eq!(
            entries[0].1,
            TagValue::Group("first: x inner: { y: 1 }".into())
        );
        assert_eq!(entries[1], ("limit".to_string(), TagValue::Final("5".into())));
    }

    #[test]
    fn colon_at_end_yields_empty_value() {
        let entries = split_level("a: 1 b:").unwrap();
        assert_eq!(entries[1], ("b".to_string(), TagValue::Final(String::new())));
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let entries = split_level("a: 1 a: 2").unwrap();
        assert_eq!(keys(&entries), vec!["a", "a"]);
        assert_eq!(entries[1].1, TagValue::Final("2".into()));
    }

    #[test]
    fn text_without_keys_is_empty() {
        assert!(split_level("just words").unwrap().is_empty());
        assert!(split_level("   ").unwrap().is_empty());
    }

    #[test]
    fn leading_text_before_first_key_is_dropped() {
        let entries = split_level("noise limit: 3").unwrap();
        assert_eq!(entries, vec![("limit".to_string(), TagValue::Final("3".into()))]);
    }

    #[test]
    fn stray_closer_in_value_fails() {
        let err = split_level("limit: 5 } extra").unwrap_err();
        assert!(matches!(err, TagError::BraceImbalance { .. }));
    }

    #[test]
    fn brace_pair_split_across_values_is_balanced() {
        let entries = split_level("a: x { y: 1 } z: 2").unwrap();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), TagValue::Final("x {".into())),
                ("y".to_string(), TagValue::Final("1 }".into())),
                ("z".to_string(), TagValue::Final("2".into())),
            ]
        );
    }

    #[test]
    fn closer_beyond_the_running_balance_fails() {
        let err = split_level("a: x { y: 1 } } z: 2").unwrap_err();
        assert!(matches!(err, TagError::BraceImbalance { .. }));
    }

    #[test]
    fn stray_closer_after_group_fails() {
        let err = split_level("a: { b: 1 } } c: 2").unwrap_err();
        assert!(matches!(err, TagError::BraceImbalance { .. }));
    }

    #[test]
    fn unclosed_group_falls_through_to_inner_keys() {
        let entries = split_level("a: { b: 1").unwrap();
        assert_eq!(entries[0], ("a".to_string(), TagValue::Group(String::new())));
        assert_eq!(entries[1], ("b".to_string(), TagValue::Final("1".into())));
    }

    #[test]
    fn key_must_start_on_word_boundary() {
        let token = find_key("x-yz: 1").unwrap();
        assert_eq!(token.key, "yz");
        assert_eq!(token.start, 2);
        assert_eq!(token.end, 5);
    }
}
