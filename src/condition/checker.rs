//! Required-field check.
//!
//! Once the condition has been evaluated, decide whether the field's value
//! satisfies it. An absent value and a blank string are separate failures
//! with their own messages.

use std::fmt;

use crate::reflect::Value;

/// Result of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(Failure),
}

/// A field that is required but not usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub reason: String,
}

/// What was wrong with a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No value at all.
    Missing,
    /// A string that is empty or only whitespace.
    Blank,
}

impl Outcome {
    /// Whether the field passed.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success => None,
            Outcome::Failure(f) => Some(f),
        }
    }

    /// The failure message, if any.
    pub fn reason(&self) -> Option<&str> {
        self.failure().map(|f| f.reason.as_str())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// Check a field value against an evaluated condition.
pub fn check(
    condition_met: bool,
    value: &Value,
    allow_blank: bool,
    field_display_name: &str,
) -> Outcome {
    if !condition_met {
        return Outcome::Success;
    }

    match value {
        Value::Null => Outcome::Failure(Failure {
            kind: FailureKind::Missing,
            reason: format!("{} is required", field_display_name),
        }),
        Value::Str(text) if !allow_blank && is_blank(text) => Outcome::Failure(Failure {
            kind: FailureKind::Blank,
            reason: format!("{} cannot be empty or whitespace", field_display_name),
        }),
        _ => Outcome::Success,
    }
}

/// Empty, or nothing but Unicode whitespace.
fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_is_required() {
        let outcome = check(true, &Value::Null, false, "Name");
        assert_eq!(outcome.reason(), Some("Name is required"));
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::Missing);
    }

    #[test]
    fn whitespace_is_blank() {
        let outcome = check(true, &Value::from("   "), false, "Name");
        assert_eq!(outcome.reason(), Some("Name cannot be empty or whitespace"));
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::Blank);
    }

    #[test]
    fn empty_string_is_blank() {
        let outcome = check(true, &Value::from(""), false, "Name");
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::Blank);
    }

    #[test]
    fn unicode_whitespace_is_blank() {
        let outcome = check(true, &Value::from("\u{00A0}\u{2003}\t"), false, "Name");
        assert!(!outcome.is_success());
    }

    #[test]
    fn blank_allowed_when_configured() {
        assert_eq!(check(true, &Value::from("   "), true, "Name"), Outcome::Success);
    }

    #[test]
    fn allow_blank_still_requires_a_value() {
        let outcome = check(true, &Value::Null, true, "Name");
        assert_eq!(outcome.reason(), Some("Name is required"));
    }

    #[test]
    fn unmet_condition_always_succeeds() {
        assert_eq!(check(false, &Value::Null, false, "Name"), Outcome::Success);
        assert_eq!(check(false, &Value::from(" "), false, "Name"), Outcome::Success);
        assert_eq!(check(false, &Value::Null, true, "Name"), Outcome::Success);
    }

    #[test]
    fn non_text_values_are_present() {
        assert!(check(true, &Value::Int(0), false, "Age").is_success());
        assert!(check(true, &Value::List(vec![]), false, "Tags").is_success());
    }

    #[test]
    fn failure_displays_reason() {
        let outcome = check(true, &Value::Null, false, "Email");
        assert_eq!(outcome.failure().unwrap().to_string(), "Email is required");
    }
}
