use std::sync::Arc;

use tracing::{debug, error, warn};

use super::analytics::{submission_event, AnalyticsRecorder};
use super::draft::{DraftError, SubmissionDraft};
use super::notify::{Notification, Notifier};
use super::transport::SubmissionTransport;
use crate::forms::domain::{FormField, FormKind};

/// Where a form instance sits in its submission lifecycle.
///
/// `Succeeded` and `Failed` are idle states that remember how the last attempt
/// settled; a new submit is allowed from any state except `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub fn is_submitting(self) -> bool {
        matches!(self, SubmissionPhase::Submitting)
    }
}

/// Developer-facing reason a submission failed. Users only ever see the
/// generic failure notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    Rejected { status: u16, error: String },
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    /// Another submit from this instance has not settled yet.
    AlreadySubmitting,
    Accepted { message: String },
    Failed(FailureCause),
}

/// Resets the phase to `Idle` if the in-flight submit never settles, e.g.
/// because its future was dropped mid-request.
struct InFlight<'a> {
    phase: &'a mut SubmissionPhase,
}

impl<'a> InFlight<'a> {
    fn enter(phase: &'a mut SubmissionPhase) -> Self {
        *phase = SubmissionPhase::Submitting;
        Self { phase }
    }

    fn settle(self, next: SubmissionPhase) {
        *self.phase = next;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.phase.is_submitting() {
            *self.phase = SubmissionPhase::Idle;
        }
    }
}

/// Client-side owner of one form's draft and submission lifecycle.
pub struct FormSubmissionHandler<T, N, A> {
    draft: SubmissionDraft,
    phase: SubmissionPhase,
    transport: Arc<T>,
    notifier: Arc<N>,
    analytics: Arc<A>,
}

impl<T, N, A> FormSubmissionHandler<T, N, A>
where
    T: SubmissionTransport,
    N: Notifier,
    A: AnalyticsRecorder,
{
    pub fn new(kind: FormKind, transport: Arc<T>, notifier: Arc<N>, analytics: Arc<A>) -> Self {
        Self {
            draft: SubmissionDraft::new(kind),
            phase: SubmissionPhase::Idle,
            transport,
            notifier,
            analytics,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.draft.kind()
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase.is_submitting()
    }

    pub fn update_field(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        self.draft.update_field(field, value)
    }

    pub fn validate(&mut self) -> bool {
        self.draft.validate()
    }

    /// Validate, send once, and settle back to an idle phase.
    ///
    /// On success the draft is cleared; on any failure it is kept so nothing
    /// has to be retyped.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let kind = self.draft.kind();
        if self.phase.is_submitting() {
            debug!(form = kind.key(), "submit ignored while a request is in flight");
            return SubmitOutcome::AlreadySubmitting;
        }

        if !self.draft.validate() {
            return SubmitOutcome::Invalid;
        }

        let request = self.draft.to_request();
        let in_flight = InFlight::enter(&mut self.phase);

        match self.transport.send(&request).await {
            Ok(response) if response.is_success() => {
                self.draft.reset();
                let (event_name, attributes) = submission_event(kind);
                self.analytics.record(event_name, &attributes);
                self.notifier.notify(Notification::success_for(kind));
                in_flight.settle(SubmissionPhase::Succeeded);
                SubmitOutcome::Accepted {
                    message: response.result.message().to_string(),
                }
            }
            Ok(response) => {
                warn!(
                    form = kind.key(),
                    status = response.status,
                    error = response.result.message(),
                    "submission rejected by server"
                );
                self.notifier.notify(Notification::failure());
                in_flight.settle(SubmissionPhase::Failed);
                SubmitOutcome::Failed(FailureCause::Rejected {
                    status: response.status,
                    error: response.result.message().to_string(),
                })
            }
            Err(err) => {
                error!(form = kind.key(), error = %err, "submission request failed");
                self.notifier.notify(Notification::failure());
                in_flight.settle(SubmissionPhase::Failed);
                SubmitOutcome::Failed(FailureCause::Transport(err.to_string()))
            }
        }
    }
}
