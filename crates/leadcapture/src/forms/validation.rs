//! Presence and email-format rules shared by the submission client and the
//! intake endpoints.

use std::sync::OnceLock;

use regex::Regex;

/// Something, `@`, something, `.`, something; no whitespace and no further `@`
/// in the first two segments.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Result of applying a single rule to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Missing,
    Malformed,
}

impl ValidationOutcome {
    pub fn is_valid(self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Non-empty after trimming.
    Required,
    /// Matches [`EMAIL_PATTERN`]; the raw value is tested, not a trimmed copy.
    EmailFormat,
}

impl FieldRule {
    pub fn check(self, value: &str) -> ValidationOutcome {
        match self {
            FieldRule::Required if is_present(value) => ValidationOutcome::Valid,
            FieldRule::Required => ValidationOutcome::Missing,
            FieldRule::EmailFormat if is_valid_email(value) => ValidationOutcome::Valid,
            FieldRule::EmailFormat => ValidationOutcome::Malformed,
        }
    }
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}
