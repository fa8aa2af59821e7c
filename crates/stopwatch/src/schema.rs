//! Schema for `stopwatch` tags.
//!
//! Every field is optional. Counts arrive as text and are coerced the way a
//! lenient number parser would: surrounding whitespace is ignored and an
//! empty value reads as zero. Unknown keys are dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tag_syntax::schema::value_kind;
use tag_syntax::{Issue, TagSchema};

/// Largest integer a count may hold without losing precision in a double.
pub const MAX_SAFE_COUNT: u64 = (1 << 53) - 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Running {
    Yes,
    #[default]
    No,
}

impl Running {
    pub fn is_running(self) -> bool {
        self == Running::Yes
    }

    pub fn flipped(self) -> Self {
        match self {
            Running::Yes => Running::No,
            Running::No => Running::Yes,
        }
    }
}

/// Bookkeeping written back into the tag by the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStuff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<Running>,
}

/// A validated, possibly partial, stopwatch tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stuff: Option<TechStuff>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StopwatchSchema;

impl TagSchema for StopwatchSchema {
    type Output = StopwatchRecord;

    fn validate(&self, record: &Map<String, Value>) -> Result<StopwatchRecord, Vec<Issue>> {
        let mut fields = Fields::new(record, &[]);
        let name = fields.string("name");
        let limit = fields.count("limit", Sign::Positive);
        let tech_stuff = match fields.record("techStuff") {
            Some(inner) => {
                let mut inner = Fields::new(inner, &["techStuff"]);
                let tech = TechStuff {
                    id: inner.string("id"),
                    start_date: inner.string("startDate"),
                    passed: inner.count("passed", Sign::NonNegative),
                    running: inner.running("running"),
                };
                fields.issues.append(&mut inner.issues);
                Some(tech)
            }
            None => None,
        };

        if fields.issues.is_empty() {
            Ok(StopwatchRecord {
                name,
                limit,
                tech_stuff,
            })
        } else {
            Err(fields.issues)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Positive,
    NonNegative,
}

/// Field reader that collects issues instead of stopping at the first one.
struct Fields<'a> {
    record: &'a Map<String, Value>,
    prefix: &'a [&'a str],
    issues: Vec<Issue>,
}

impl<'a> Fields<'a> {
    fn new(record: &'a Map<String, Value>, prefix: &'a [&'a str]) -> Self {
        Self {
            record,
            prefix,
            issues: Vec::new(),
        }
    }

    fn fail(&mut self, key: &str, expected: &str, received: impl std::fmt::Display) {
        let path = self.prefix.iter().copied().chain(std::iter::once(key));
        self.issues.push(Issue::expected(path, expected, received));
    }

    fn text(&mut self, key: &str, expected: &str) -> Option<&'a str> {
        match self.record.get(key)? {
            Value::String(s) => Some(s.as_str()),
            other => {
                self.fail(key, expected, value_kind(other));
                None
            }
        }
    }

    fn string(&mut self, key: &str) -> Option<String> {
        self.text(key, "string").map(str::to_string)
    }

    fn record(&mut self, key: &str) -> Option<&'a Map<String, Value>> {
        match self.record.get(key)? {
            Value::Object(inner) => Some(inner),
            other => {
                self.fail(key, "object", value_kind(other));
                None
            }
        }
    }

    fn count(&mut self, key: &str, sign: Sign) -> Option<u64> {
        let raw = self.text(key, "number")?.trim();
        let n = if raw.is_empty() {
            0.0
        } else {
            match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => n,
                _ => {
                    self.fail(key, "number", "nan");
                    return None;
                }
            }
        };
        if n.fract() != 0.0 {
            self.fail(key, "integer", "float");
            return None;
        }
        if n.abs() > MAX_SAFE_COUNT as f64 {
            self.fail(key, "safe integer", raw);
            return None;
        }
        match sign {
            Sign::Positive if n <= 0.0 => {
                self.fail(key, "positive", raw_or_zero(raw));
                None
            }
            Sign::NonNegative if n < 0.0 => {
                self.fail(key, "nonnegative", raw_or_zero(raw));
                None
            }
            _ => Some(n as u64),
        }
    }

    fn running(&mut self, key: &str) -> Option<Running> {
        match self.text(key, "'yes' | 'no'")? {
            "yes" => Some(Running::Yes),
            "no" => Some(Running::No),
            other => {
                self.fail(key, "'yes' | 'no'", other);
                None
            }
        }
    }
}

fn raw_or_zero(raw: &str) -> &str {
    if raw.is_empty() {
        "0"
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value) -> Result<StopwatchRecord, Vec<Issue>> {
        match value {
            Value::Object(record) => StopwatchSchema.validate(&record),
            _ => unreachable!(),
        }
    }

    fn messages(value: Value) -> Vec<String> {
        check(value)
            .unwrap_err()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn empty_record_is_valid() {
        assert_eq!(check(json!({})).unwrap(), StopwatchRecord::default());
    }

    #[test]
    fn full_record() {
        let record = check(json!({
            "name": "focus",
            "limit": "60",
            "techStuff": {"id": "2", "startDate": "", "passed": " 12 ", "running": "yes"}
        }))
        .unwrap();
        assert_eq!(record.name.as_deref(), Some("focus"));
        assert_eq!(record.limit, Some(60));
        let tech = record.tech_stuff.unwrap();
        assert_eq!(tech.id.as_deref(), Some("2"));
        assert_eq!(tech.start_date.as_deref(), Some(""));
        assert_eq!(tech.passed, Some(12));
        assert_eq!(tech.running, Some(Running::Yes));
    }

    #[test]
    fn negative_limit() {
        assert_eq!(
            messages(json!({"limit": "-3"})),
            vec!["limit: expected positive but received -3."]
        );
    }

    #[test]
    fn zero_limit_and_empty_limit() {
        assert_eq!(
            messages(json!({"limit": "0"})),
            vec!["limit: expected positive but received 0."]
        );
        assert_eq!(
            messages(json!({"limit": ""})),
            vec!["limit: expected positive but received 0."]
        );
    }

    #[test]
    fn non_numeric_and_fractional_counts() {
        assert_eq!(
            messages(json!({"limit": "soon"})),
            vec!["limit: expected number but received nan."]
        );
        assert_eq!(
            messages(json!({"limit": "1.5"})),
            vec!["limit: expected integer but received float."]
        );
        assert_eq!(
            messages(json!({"limit": "1e300"})),
            vec!["limit: expected safe integer but received 1e300."]
        );
    }

    #[test]
    fn nested_issues_carry_the_path() {
        assert_eq!(
            messages(json!({"techStuff": {"passed": "-1", "running": "maybe"}})),
            vec![
                "techStuff.passed: expected nonnegative but received -1.",
                "techStuff.running: expected 'yes' | 'no' but received maybe.",
            ]
        );
    }

    #[test]
    fn wrong_shapes() {
        assert_eq!(
            messages(json!({"name": {"first": "x"}, "techStuff": "none"})),
            vec![
                "name: expected string but received object.",
                "techStuff: expected object but received string.",
            ]
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(
            check(json!({"colour": "red", "limit": "5"})).unwrap(),
            StopwatchRecord {
                limit: Some(5),
                ..Default::default()
            }
        );
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let record = StopwatchRecord {
            limit: Some(5),
            tech_stuff: Some(TechStuff::default()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"limit": 5, "techStuff": {}})
        );
    }

    #[test]
    fn running_flips() {
        assert_eq!(Running::Yes.flipped(), Running::No);
        assert!(Running::No.flipped().is_running());
    }
}
