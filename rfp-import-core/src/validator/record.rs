//! Field checks shared by every record type.

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::str::FromStr;

use crate::models::ValidationOptions;
use crate::report::{Issue, IssueKind};

/// JSON type name of a value, as shown in diagnostics
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders a value for messages: strings bare, everything else as JSON text
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Describes an offending value: numbers by their text, anything else by type
pub(crate) fn describe_value(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        other => type_name(other).to_string(),
    }
}

/// True when `number * 2` is a whole number, computed in decimal arithmetic
pub(crate) fn is_half_increment(number: &Number) -> bool {
    let text = number.to_string();
    let decimal = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text));
    match decimal {
        Ok(d) => (d * Decimal::TWO).fract().is_zero(),
        // Magnitudes outside Decimal's range are never valid scores anyway
        Err(_) => false,
    }
}

/// Checks the fields of one object record and collects the findings
pub struct RecordChecker<'a> {
    label: &'static str,
    index: usize,
    record: &'a Map<String, Value>,
    issues: Vec<Issue>,
}

impl<'a> RecordChecker<'a> {
    pub fn new(label: &'static str, index: usize, record: &'a Map<String, Value>) -> Self {
        Self {
            label,
            index,
            record,
            issues: Vec::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.record.get(field)
    }

    pub fn push(&mut self, kind: IssueKind, message: String) {
        self.issues.push(Issue::error(kind, Some(self.index), message));
    }

    /// Pushes an error scoped to this record: "<Label> at index <i>: <detail>"
    pub fn fail(&mut self, kind: IssueKind, detail: impl AsRef<str>) {
        let message = format!("{} at index {}: {}", self.label, self.index, detail.as_ref());
        self.push(kind, message);
    }

    pub fn finish(self) -> Vec<Issue> {
        self.issues
    }

    /// Flags keys outside `allowed`; a warning instead of an error in lenient mode
    pub fn check_unknown_fields(&mut self, allowed: &[&str], options: &ValidationOptions) {
        let mut unexpected: Vec<&str> = self
            .record
            .keys()
            .map(String::as_str)
            .filter(|key| !allowed.contains(key))
            .collect();
        if unexpected.is_empty() {
            return;
        }
        unexpected.sort_unstable();

        let mut allowed_sorted = allowed.to_vec();
        allowed_sorted.sort_unstable();

        let message = format!(
            "{} at index {}: unexpected fields {:?}. Only these fields are allowed: {}",
            self.label,
            self.index,
            unexpected,
            allowed_sorted.join(", ")
        );
        if options.allow_unknown_fields {
            self.issues
                .push(Issue::warning(IssueKind::UnknownFields, Some(self.index), message));
        } else {
            self.push(IssueKind::UnknownFields, message);
        }
    }

    pub fn check_required(&mut self, required: &[&str]) {
        for field in required {
            if !self.record.contains_key(*field) {
                let message = format!(
                    "{} at index {} missing required field: {}",
                    self.label, self.index, field
                );
                self.push(IssueKind::MissingField, message);
            }
        }
    }

    /// Returns the field as a string, flagging it when present with another type
    pub fn string(&mut self, field: &str) -> Option<&'a str> {
        match self.get(field)? {
            Value::String(s) => Some(s.as_str()),
            other => {
                let detail = format!("{} must be a string (got {})", field, type_name(other));
                self.fail(IssueKind::InvalidType, detail);
                None
            }
        }
    }

    /// Like [`Self::string`], but `null` is accepted silently
    pub fn nullable_string(&mut self, field: &str) -> Option<&'a str> {
        match self.get(field)? {
            Value::Null => None,
            _ => self.string(field),
        }
    }

    pub fn boolean(&mut self, field: &str) {
        if let Some(value) = self.get(field) {
            if !value.is_boolean() {
                self.fail(IssueKind::InvalidType, format!("{} must be a boolean", field));
            }
        }
    }

    pub fn number(&mut self, field: &str) {
        if let Some(value) = self.get(field) {
            if !value.is_number() {
                let detail = format!("{} must be a number (got {})", field, type_name(value));
                self.fail(IssueKind::InvalidType, detail);
            }
        }
    }

    /// Integer of at least 1; floats such as `1.0` are rejected
    pub fn positive_integer(&mut self, field: &str) {
        let Some(value) = self.get(field) else {
            return;
        };
        let detail = format!(
            "{} must be a positive integer (got {})",
            field,
            describe_value(value)
        );
        match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => {
                if n.as_i64().is_some_and(|v| v < 1) {
                    self.fail(IssueKind::OutOfRange, detail);
                }
            }
            _ => self.fail(IssueKind::InvalidType, detail),
        }
    }

    /// Number within `[min, max]`, both bounds inclusive
    pub fn number_between(&mut self, field: &str, min: f64, max: f64) {
        let Some(value) = self.get(field) else {
            return;
        };
        let detail = format!(
            "{} must be a number between {} and {} (got {})",
            field,
            min,
            max,
            describe_value(value)
        );
        match value.as_f64() {
            Some(v) if value.is_number() => {
                if !(min..=max).contains(&v) {
                    self.fail(IssueKind::OutOfRange, detail);
                }
            }
            _ => self.fail(IssueKind::InvalidType, detail),
        }
    }

    /// Optional score in `[0, 5]` on a 0.5 grid; `null` means "not scored"
    pub fn score(&mut self, field: &str) {
        let Some(value) = self.get(field) else {
            return;
        };
        match value {
            Value::Null => {}
            Value::Number(n) => {
                let v = n.as_f64().unwrap_or(f64::NAN);
                if !(0.0..=5.0).contains(&v) {
                    let detail = format!("{} must be between 0 and 5 (got {})", field, n);
                    self.fail(IssueKind::OutOfRange, detail);
                } else if !is_half_increment(n) {
                    let detail = format!("{} must be in 0.5 increments (got {})", field, n);
                    self.fail(IssueKind::InvalidIncrement, detail);
                }
            }
            _ => self.fail(IssueKind::InvalidType, format!("{} must be a number", field)),
        }
    }

    /// Non-empty string of at most `max_chars` characters once trimmed
    pub fn bounded_text(&mut self, field: &str, max_chars: usize) {
        let Some(text) = self.string(field) else {
            return;
        };
        let trimmed = text.trim().chars().count();
        if trimmed == 0 {
            self.fail(IssueKind::InvalidValue, format!("{} cannot be empty", field));
        } else if trimmed > max_chars {
            let detail = format!(
                "{} exceeds {} characters (got {})",
                field, max_chars, trimmed
            );
            self.fail(IssueKind::OutOfRange, detail);
        }
    }

    /// Array of non-empty strings, each at most `max_chars` characters once trimmed
    pub fn tag_list(&mut self, field: &str, max_chars: usize) {
        let Some(value) = self.get(field) else {
            return;
        };
        let Some(tags) = value.as_array() else {
            self.fail(IssueKind::InvalidType, format!("{} must be an array", field));
            return;
        };
        for (position, tag) in tags.iter().enumerate() {
            let Some(tag) = tag.as_str() else {
                let detail = format!("tag at position {} must be a string", position);
                self.fail(IssueKind::InvalidType, detail);
                continue;
            };
            let chars = tag.trim().chars().count();
            if chars == 0 {
                let detail = format!("tag at position {} cannot be empty", position);
                self.fail(IssueKind::InvalidValue, detail);
            } else if chars > max_chars {
                let detail = format!(
                    "tag at position {} exceeds {} characters (got {})",
                    position, max_chars, chars
                );
                self.fail(IssueKind::OutOfRange, detail);
            }
        }
    }
}

/// Remembers values of an array-unique field and flags repeats at the later index
#[derive(Debug, Default)]
pub struct UniqueTracker {
    field: &'static str,
    seen: HashSet<String>,
}

impl UniqueTracker {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            seen: HashSet::new(),
        }
    }

    pub fn observe(&mut self, index: usize, value: &Value) -> Option<Issue> {
        // Key on the JSON text so "1" and 1 stay distinct
        if self.seen.insert(value.to_string()) {
            return None;
        }
        Some(Issue::error(
            IssueKind::Duplicate,
            Some(index),
            format!(
                "Duplicate {} '{}' at index {}",
                self.field,
                display_value(value),
                index
            ),
        ))
    }
}
