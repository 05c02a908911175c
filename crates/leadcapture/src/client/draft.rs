use std::collections::BTreeMap;

use crate::forms::domain::{FormField, FormKind, SubmissionRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error(
        "field '{field_key}' is not part of the {form_key} form",
        field_key = .field.key(),
        form_key = .form.key()
    )]
    UnknownField { field: FormField, form: FormKind },
}

/// In-progress values and inline errors for one form instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    kind: FormKind,
    values: BTreeMap<FormField, String>,
    errors: BTreeMap<FormField, String>,
}

impl SubmissionDraft {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            values: empty_values(kind),
            errors: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn value(&self, field: FormField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    /// Store the value and drop any error the field currently shows. The error
    /// comes back only on the next [`validate`](Self::validate).
    pub fn update_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        if !self.kind.contains(field) {
            return Err(DraftError::UnknownField {
                field,
                form: self.kind,
            });
        }

        self.values.insert(field, value.into());
        self.errors.remove(&field);
        Ok(())
    }

    /// Recompute every field's error and report whether the draft is clean.
    pub fn validate(&mut self) -> bool {
        self.errors = self
            .kind
            .fields()
            .iter()
            .filter_map(|field| {
                let value = self.values.get(field).map(String::as_str).unwrap_or("");
                field
                    .inline_message(field.check(value))
                    .map(|message| (*field, message))
            })
            .collect();
        self.errors.is_empty()
    }

    pub fn to_request(&self) -> SubmissionRequest {
        SubmissionRequest::new(self.kind, self.values.clone())
    }

    pub fn reset(&mut self) {
        self.values = empty_values(self.kind);
        self.errors.clear();
    }
}

fn empty_values(kind: FormKind) -> BTreeMap<FormField, String> {
    kind.fields()
        .iter()
        .map(|field| (*field, String::new()))
        .collect()
}
