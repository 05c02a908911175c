use leadcapture::client::{
    AnalyticsRecorder, EventAttributes, Notification, NotificationLevel, Notifier,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Prints notifications the way the landing page would toast them.
#[derive(Default, Clone, Copy)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Failure => "error",
        };
        println!("[{tag}] {}", notification.message);
    }
}

#[derive(Default, Clone, Copy)]
pub(crate) struct TracingAnalytics;

impl AnalyticsRecorder for TracingAnalytics {
    fn record(&self, event_name: &str, attributes: &EventAttributes) {
        let attributes = serde_json::to_string(attributes).unwrap_or_default();
        debug!(event = event_name, %attributes, "analytics event");
    }
}
