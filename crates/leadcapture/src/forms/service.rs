use std::sync::Arc;

use chrono::Utc;

use super::domain::{AcceptedSubmission, ContactRequest, FormField, Lead, NewsletterRequest};
use super::sink::{SinkError, SubmissionSink};

/// First rule a submission broke. Only one is ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionRejection {
    #[error("Name is required")]
    MissingName,
    #[error("Valid email is required")]
    InvalidEmail,
    #[error("Company is required")]
    MissingCompany,
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Rejected(#[from] SubmissionRejection),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

fn require(
    field: FormField,
    value: Option<String>,
    rejection: SubmissionRejection,
) -> Result<String, SubmissionRejection> {
    match value {
        Some(value) if field.check(&value).is_valid() => Ok(value),
        _ => Err(rejection),
    }
}

/// Name, then email, then company.
pub fn validate_contact(request: ContactRequest) -> Result<Lead, SubmissionRejection> {
    let ContactRequest {
        name,
        email,
        company,
    } = request;

    let name = require(FormField::Name, name, SubmissionRejection::MissingName)?;
    let email = require(FormField::Email, email, SubmissionRejection::InvalidEmail)?;
    let company = require(FormField::Company, company, SubmissionRejection::MissingCompany)?;

    Ok(Lead::Contact {
        name,
        email,
        company,
    })
}

pub fn validate_newsletter(request: NewsletterRequest) -> Result<Lead, SubmissionRejection> {
    let email = require(
        FormField::Email,
        request.email,
        SubmissionRejection::InvalidEmail,
    )?;
    Ok(Lead::Newsletter { email })
}

/// Server side of both lead-capture forms. Stateless apart from the sink.
pub struct LeadIntakeService<S> {
    sink: Arc<S>,
}

impl<S> LeadIntakeService<S>
where
    S: SubmissionSink + 'static,
{
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    /// Validate and record a demo booking request.
    pub fn book_demo(&self, request: ContactRequest) -> Result<AcceptedSubmission, IntakeError> {
        let lead = validate_contact(request)?;
        self.accept(lead)
    }

    /// Validate and record a newsletter subscription.
    pub fn subscribe(&self, request: NewsletterRequest) -> Result<AcceptedSubmission, IntakeError> {
        let lead = validate_newsletter(request)?;
        self.accept(lead)
    }

    fn accept(&self, lead: Lead) -> Result<AcceptedSubmission, IntakeError> {
        let submission = AcceptedSubmission {
            lead,
            received_at: Utc::now(),
        };
        self.sink.record(&submission)?;
        Ok(submission)
    }
}
