//! End-to-end scenarios: the intake router bound to a real socket, driven by the
//! submission handler through the HTTP transport.

mod common {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use leadcapture::client::{
        FormSubmissionHandler, HttpTransport, NoopAnalytics, Notification, Notifier,
    };
    use leadcapture::config::ClientConfig;
    use leadcapture::forms::{
        lead_router, AcceptedSubmission, FormKind, LeadIntakeService, SinkError, SubmissionSink,
    };

    #[derive(Default)]
    pub struct MemorySink {
        recorded: Mutex<Vec<AcceptedSubmission>>,
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
        pub fn recorded(&self) -> Vec<AcceptedSubmission> {
            self.recorded.lock().expect("sink mutex poisoned").clone()
        }
    }

    pub struct OfflineSink;

    impl SubmissionSink for OfflineSink {
        fn record(&self, _submission: &AcceptedSubmission) -> Result<(), SinkError> {
            Err(SinkError::Unavailable("log shipper offline".to_string()))
        }
    }

    #[derive(Default)]
    pub struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen
                .lock()
                .expect("notifier mutex poisoned")
                .push(notification);
        }
    }

    impl RecordingNotifier {
        pub fn seen(&self) -> Vec<Notification> {
            self.seen.lock().expect("notifier mutex poisoned").clone()
        }
    }

    pub type Handler = FormSubmissionHandler<HttpTransport, RecordingNotifier, NoopAnalytics>;

    pub async fn spawn_server<S>(sink: Arc<S>) -> SocketAddr
    where
        S: SubmissionSink + 'static,
    {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let app = lead_router(Arc::new(LeadIntakeService::new(sink)));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server runs");
        });
        addr
    }

    pub fn handler_for(addr: SocketAddr, kind: FormKind) -> (Handler, Arc<RecordingNotifier>) {
        let transport = HttpTransport::new(&ClientConfig {
            base_url: format!("http://{addr}"),
            timeout: Duration::from_secs(5),
        })
        .expect("client builds");
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = FormSubmissionHandler::new(
            kind,
            Arc::new(transport),
            notifier.clone(),
            Arc::new(NoopAnalytics),
        );
        (handler, notifier)
    }
}

use std::sync::Arc;

use common::*;
use leadcapture::client::{FailureCause, Notification, SubmissionPhase, SubmitOutcome};
use leadcapture::forms::{FormField, FormKind, Lead};

#[tokio::test]
async fn demo_booking_round_trip_resets_draft() {
    let sink = Arc::new(MemorySink::default());
    let addr = spawn_server(sink.clone()).await;
    let (mut handler, notifier) = handler_for(addr, FormKind::Contact);

    handler.update_field(FormField::Name, "Ada Lovelace").expect("name");
    handler
        .update_field(FormField::Email, "ada@analytical.engines")
        .expect("email");
    handler
        .update_field(FormField::Company, "Analytical CPA")
        .expect("company");

    let outcome = handler.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Accepted {
            message: "Demo booking request received. We will contact you soon.".to_string()
        }
    );
    assert_eq!(handler.phase(), SubmissionPhase::Succeeded);
    assert!(handler.draft().is_blank());
    assert_eq!(
        notifier.seen(),
        vec![Notification::success_for(FormKind::Contact)]
    );

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(
        recorded[0].lead,
        Lead::Contact {
            name: "Ada Lovelace".to_string(),
            email: "ada@analytical.engines".to_string(),
            company: "Analytical CPA".to_string(),
        }
    );
}

#[tokio::test]
async fn newsletter_round_trip_resets_draft() {
    let sink = Arc::new(MemorySink::default());
    let addr = spawn_server(sink.clone()).await;
    let (mut handler, notifier) = handler_for(addr, FormKind::Newsletter);

    handler
        .update_field(FormField::Email, "reader@firm.io")
        .expect("email");
    let outcome = handler.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Accepted { .. }));
    assert!(handler.draft().is_blank());
    assert_eq!(
        notifier.seen(),
        vec![Notification::success_for(FormKind::Newsletter)]
    );
    assert_eq!(sink.recorded().len(), 1);
}

#[tokio::test]
async fn server_fault_preserves_draft() {
    let addr = spawn_server(Arc::new(OfflineSink)).await;
    let (mut handler, notifier) = handler_for(addr, FormKind::Newsletter);

    handler
        .update_field(FormField::Email, "reader@firm.io")
        .expect("email");
    let outcome = handler.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(FailureCause::Rejected {
            status: 500,
            error: "Failed to process subscription".to_string(),
        })
    );
    assert_eq!(handler.phase(), SubmissionPhase::Failed);
    assert_eq!(
        handler.draft().value(FormField::Email),
        Some("reader@firm.io")
    );
    assert_eq!(notifier.seen(), vec![Notification::failure()]);
}

#[tokio::test]
async fn refused_connection_is_reported_without_panicking() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let (mut handler, notifier) = handler_for(addr, FormKind::Contact);
    handler.update_field(FormField::Name, "Ada").expect("name");
    handler
        .update_field(FormField::Email, "ada@firm.io")
        .expect("email");
    handler
        .update_field(FormField::Company, "Firm LLP")
        .expect("company");

    let outcome = handler.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(FailureCause::Transport(_))
    ));
    assert!(!handler.is_submitting());
    assert_eq!(handler.draft().value(FormField::Name), Some("Ada"));
    assert_eq!(notifier.seen(), vec![Notification::failure()]);
}
