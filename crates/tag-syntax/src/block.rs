//! Locating a tag body inside note text.

/// Return the text following `block_name` in a fenced block or inline code span.
///
/// The name must stand on its own (followed by whitespace, a backtick, or the
/// end of input). The body ends at the next backtick, which closes both
/// fences and inline spans, and is trimmed. `None` when the name does not occur.
///
/// # Example
///
/// ```
/// use tag_syntax::extract_body;
///
/// assert_eq!(extract_body("```stopwatch\nlimit: 5\n```", "stopwatch"), Some("limit: 5"));
/// assert_eq!(extract_body("`stopwatch name: run`", "stopwatch"), Some("name: run"));
/// assert_eq!(extract_body("`timer limit: 5`", "stopwatch"), None);
/// ```
pub fn extract_body<'a>(text: &'a str, block_name: &str) -> Option<&'a str> {
    if block_name.is_empty() {
        return None;
    }
    let (idx, _) = text.match_indices(block_name).find(|(idx, _)| {
        text[idx + block_name.len()..]
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == '`')
    })?;
    let rest = &text[idx + block_name.len()..];
    let end = rest.find('`').unwrap_or(rest.len());
    Some(rest[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block() {
        let text = "Some note\n```stopwatch\nname: \"run\" limit: 60\n```\nafter: 1";
        assert_eq!(extract_body(text, "stopwatch"), Some("name: \"run\" limit: 60"));
    }

    #[test]
    fn inline_span() {
        assert_eq!(extract_body("`stopwatch limit: 5`", "stopwatch"), Some("limit: 5"));
    }

    #[test]
    fn bare_name_without_body() {
        assert_eq!(extract_body("```stopwatch\n```", "stopwatch"), Some(""));
        assert_eq!(extract_body("stopwatch", "stopwatch"), Some(""));
    }

    #[test]
    fn name_must_be_a_whole_word() {
        assert_eq!(extract_body("stopwatches limit: 1", "stopwatch"), None);
        assert_eq!(
            extract_body("stopwatches then stopwatch limit: 1", "stopwatch"),
            Some("limit: 1")
        );
    }

    #[test]
    fn missing_name() {
        assert_eq!(extract_body("limit: 1", "stopwatch"), None);
        assert_eq!(extract_body("limit: 1", ""), None);
    }
}
