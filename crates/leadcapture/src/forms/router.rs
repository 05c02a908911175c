use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use super::domain::{
    AcceptedSubmission, ContactRequest, FormKind, NewsletterRequest, SubmissionResult,
};
use super::service::{IntakeError, LeadIntakeService};
use super::sink::SubmissionSink;

/// Router exposing `POST /api/contact` and `POST /api/subscribe`.
pub fn lead_router<S>(service: Arc<LeadIntakeService<S>>) -> Router
where
    S: SubmissionSink + 'static,
{
    Router::new()
        .route(FormKind::Contact.endpoint(), post(contact_handler::<S>))
        .route(FormKind::Newsletter.endpoint(), post(subscribe_handler::<S>))
        .with_state(service)
}

pub(crate) async fn contact_handler<S>(
    State(service): State<Arc<LeadIntakeService<S>>>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    match read_object::<ContactRequest>(body) {
        Ok(request) => respond(FormKind::Contact, service.book_demo(request)),
        Err(detail) => unreadable_body(FormKind::Contact, detail),
    }
}

pub(crate) async fn subscribe_handler<S>(
    State(service): State<Arc<LeadIntakeService<S>>>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    match read_object::<NewsletterRequest>(body) {
        Ok(request) => respond(FormKind::Newsletter, service.subscribe(request)),
        Err(detail) => unreadable_body(FormKind::Newsletter, detail),
    }
}

/// Bodies are parsed whatever the `Content-Type`; only a JSON object is a submission.
fn read_object<T>(body: Result<Bytes, BytesRejection>) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let bytes = body.map_err(|rejection| rejection.body_text())?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(object @ Value::Object(_)) => {
            serde_json::from_value(object).map_err(|err| err.to_string())
        }
        Ok(other) => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        Err(err) => Err(err.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn respond(kind: FormKind, outcome: Result<AcceptedSubmission, IntakeError>) -> Response {
    match outcome {
        Ok(_) => (
            StatusCode::OK,
            Json(SubmissionResult::accepted(kind.success_message())),
        )
            .into_response(),
        Err(IntakeError::Rejected(rejection)) => (
            StatusCode::BAD_REQUEST,
            Json(SubmissionResult::failed(rejection.to_string())),
        )
            .into_response(),
        Err(IntakeError::Sink(err)) => {
            error!(form = kind.key(), error = %err, "failed to record submission");
            processing_failure(kind)
        }
    }
}

fn unreadable_body(kind: FormKind, detail: String) -> Response {
    warn!(form = kind.key(), detail = %detail, "unreadable submission body");
    processing_failure(kind)
}

fn processing_failure(kind: FormKind) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmissionResult::failed(kind.processing_failure_message())),
    )
        .into_response()
}
