use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::forms::domain::{AcceptedSubmission, ContactRequest, NewsletterRequest};
use crate::forms::sink::{SinkError, SubmissionSink};
use crate::forms::{lead_router, LeadIntakeService};

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    recorded: Arc<Mutex<Vec<AcceptedSubmission>>>,
}

impl SubmissionSink for MemorySink {
    fn record(&self, submission: &AcceptedSubmission) -> Result<(), SinkError> {
        self.recorded
            .lock()
            .expect("sink mutex poisoned")
            .push(submission.clone());
        Ok(())
    }
}

impl MemorySink {
    pub(super) fn recorded(&self) -> Vec<AcceptedSubmission> {
        self.recorded.lock().expect("sink mutex poisoned").clone()
    }
}

pub(super) struct OfflineSink;

impl SubmissionSink for OfflineSink {
    fn record(&self, _submission: &AcceptedSubmission) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("log shipper offline".to_string()))
    }
}

pub(super) fn contact_request() -> ContactRequest {
    ContactRequest {
        name: Some("Ada Lovelace".to_string()),
        email: Some("ada@analytical.engines".to_string()),
        company: Some("Analytical CPA".to_string()),
    }
}

pub(super) fn newsletter_request() -> NewsletterRequest {
    NewsletterRequest {
        email: Some("ada@analytical.engines".to_string()),
    }
}

pub(super) fn build_service() -> (LeadIntakeService<MemorySink>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    (LeadIntakeService::new(sink.clone()), sink)
}

pub(super) fn router_with_sink(sink: Arc<MemorySink>) -> axum::Router {
    lead_router(Arc::new(LeadIntakeService::new(sink)))
}

pub(super) fn json_post(
    path: &str,
    body: impl Into<axum::body::Body>,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(path)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
