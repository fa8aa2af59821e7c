//! Balanced `{ … }` span detection.

use crate::error::TagError;

/// The first balanced group of a fragment and the text after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpan<'a> {
    /// Interior of the group, trimmed. Empty when no group was found.
    pub value: &'a str,
    /// Text after the closing brace, trimmed. The whole input when no group was found.
    pub next: &'a str,
}

/// Find the first balanced `{ … }` span in `text`.
///
/// A closer seen at depth zero fails with [`TagError::BraceImbalance`].
/// Input with no `{`, or whose group never closes, is not an error: the
/// result then has an empty `value` and `next` set to the whole input.
///
/// # Example
///
/// ```
/// use tag_syntax::match_group;
///
/// let span = match_group("{ a: { b: 1 } } rest: 2").unwrap();
/// assert_eq!(span.value, "a: { b: 1 }");
/// assert_eq!(span.next, "rest: 2");
/// ```
pub fn match_group(text: &str) -> Result<GroupSpan<'_>, TagError> {
    let mut depth = 0usize;
    let mut start = None;

    for (i, ch) in text.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(TagError::BraceImbalance { offset: i });
                }
                depth -= 1;
                if depth == 0 {
                    if let Some(start) = start {
                        return Ok(GroupSpan {
                            value: text[start + 1..i].trim(),
                            next: text[i + 1..].trim(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    Ok(GroupSpan { value: "", next: text })
}

/// Running `{`/`}` balance carried across the fragments of one level.
///
/// A `}` may close a `{` seen in an earlier fragment; only a closer that
/// would take the balance below zero is an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceDepth(usize);

impl BraceDepth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unmatched `{` seen so far.
    pub fn open(&self) -> usize {
        self.0
    }

    /// Feed `text` into the balance. Offsets in errors are relative to `text`.
    pub fn scan(&mut self, text: &str) -> Result<(), TagError> {
        for (i, ch) in text.char_indices() {
            match ch {
                '{' => self.0 += 1,
                '}' => {
                    if self.0 == 0 {
                        return Err(TagError::BraceImbalance { offset: i });
                    }
                    self.0 -= 1;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Scan the whole of `text` and fail on the first `}` that closes nothing.
///
/// Unclosed `{` are tolerated, matching [`match_group`].
pub fn check_closers(text: &str) -> Result<(), TagError> {
    BraceDepth::new().scan(text)
}
