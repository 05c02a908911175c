use tracing::info;

use super::domain::{AcceptedSubmission, Lead};

/// Destination for accepted submissions. The endpoints have no other side effect.
pub trait SubmissionSink: Send + Sync {
    fn record(&self, submission: &AcceptedSubmission) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("submission sink unavailable: {0}")]
    Unavailable(String),
}

/// Writes accepted leads to the tracing stream so the team can follow up by hand.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSubmissionSink;

impl SubmissionSink for TracingSubmissionSink {
    fn record(&self, submission: &AcceptedSubmission) -> Result<(), SinkError> {
        let received_at = submission.received_at.to_rfc3339();
        match &submission.lead {
            Lead::Contact {
                name,
                email,
                company,
            } => info!(
                form = "contact",
                %name,
                %email,
                %company,
                %received_at,
                "demo booking received"
            ),
            Lead::Newsletter { email } => info!(
                form = "newsletter",
                %email,
                %received_at,
                "newsletter subscription received"
            ),
        }
        Ok(())
    }
}
