use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{FieldRule, ValidationOutcome};

/// The two lead-capture forms exposed on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Demo booking form collecting name, email and company.
    Contact,
    /// Newsletter signup collecting only an email.
    Newsletter,
}

impl FormKind {
    pub fn key(self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Newsletter => "newsletter",
        }
    }

    /// Fields in the order they are validated and rendered.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            FormKind::Contact => &[FormField::Name, FormField::Email, FormField::Company],
            FormKind::Newsletter => &[FormField::Email],
        }
    }

    pub fn contains(self, field: FormField) -> bool {
        self.fields().contains(&field)
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            FormKind::Contact => "/api/contact",
            FormKind::Newsletter => "/api/subscribe",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Contact => "Demo booking request received. We will contact you soon.",
            FormKind::Newsletter => "Successfully subscribed to our newsletter.",
        }
    }

    /// Body of the 500 response for anything the endpoint did not anticipate.
    pub fn processing_failure_message(self) -> &'static str {
        match self {
            FormKind::Contact => "Failed to process request",
            FormKind::Newsletter => "Failed to process subscription",
        }
    }
}

/// Individual inputs across both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Company,
}

impl FormField {
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Company => "company",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Company => "Company",
        }
    }

    pub fn rules(self) -> &'static [FieldRule] {
        match self {
            FormField::Email => &[FieldRule::Required, FieldRule::EmailFormat],
            FormField::Name | FormField::Company => &[FieldRule::Required],
        }
    }

    /// Runs the field's rules in order and stops at the first violation.
    pub fn check(self, value: &str) -> ValidationOutcome {
        self.rules()
            .iter()
            .map(|rule| rule.check(value))
            .find(|outcome| !outcome.is_valid())
            .unwrap_or(ValidationOutcome::Valid)
    }

    /// Inline message shown next to the input, `None` when the value passes.
    pub fn inline_message(self, outcome: ValidationOutcome) -> Option<String> {
        match outcome {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Missing => Some(format!("{} is required", self.label())),
            ValidationOutcome::Malformed => Some(format!(
                "Please enter a valid {}",
                self.label().to_ascii_lowercase()
            )),
        }
    }
}

/// Missing keys and `null` are absent. Numbers and booleans are checked as
/// their text; arrays and objects carry none and are read as blank.
fn deserialize_field_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Some(String::new()),
    })
}

/// Demo booking payload as received by `POST /api/contact`.
///
/// Every field is optional so a missing key is reported as a validation
/// failure instead of a body parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "deserialize_field_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_field_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_field_text")]
    pub company: Option<String>,
}

/// Newsletter payload as received by `POST /api/subscribe`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default, deserialize_with = "deserialize_field_text")]
    pub email: Option<String>,
}

/// Field values captured from a draft at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    kind: FormKind,
    fields: BTreeMap<FormField, String>,
}

impl SubmissionRequest {
    pub fn new(kind: FormKind, fields: BTreeMap<FormField, String>) -> Self {
        Self { kind, fields }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Serialises as the flat JSON object the endpoints expect.
    pub fn fields(&self) -> &BTreeMap<FormField, String> {
        &self.fields
    }
}

/// Response body shared by both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionResult {
    Accepted { success: bool, message: String },
    Failed { error: String },
}

impl SubmissionResult {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self::Accepted {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionResult::Accepted { message, .. } => message,
            SubmissionResult::Failed { error } => error,
        }
    }
}

/// A submission that passed server-side validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Lead {
    Contact {
        name: String,
        email: String,
        company: String,
    },
    Newsletter {
        email: String,
    },
}

impl Lead {
    pub fn kind(&self) -> FormKind {
        match self {
            Lead::Contact { .. } => FormKind::Contact,
            Lead::Newsletter { .. } => FormKind::Newsletter,
        }
    }
}

/// Entry written to the operational log stream for manual follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedSubmission {
    pub lead: Lead,
    pub received_at: DateTime<Utc>,
}
