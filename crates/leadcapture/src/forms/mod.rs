//! Server side of the lead-capture forms: shared field rules, wire types, the
//! intake service, and the HTTP router.

pub mod domain;
pub mod router;
pub mod service;
pub mod sink;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AcceptedSubmission, ContactRequest, FormField, FormKind, Lead, NewsletterRequest,
    SubmissionRequest, SubmissionResult,
};
pub use router::lead_router;
pub use service::{
    validate_contact, validate_newsletter, IntakeError, LeadIntakeService, SubmissionRejection,
};
pub use sink::{SinkError, SubmissionSink, TracingSubmissionSink};
pub use validation::{is_valid_email, FieldRule, ValidationOutcome, EMAIL_PATTERN};
