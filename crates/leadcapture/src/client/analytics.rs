use std::collections::BTreeMap;

use serde::Serialize;

use crate::forms::domain::FormKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

pub type EventAttributes = BTreeMap<String, AttributeValue>;

/// Injected event-tracking capability.
pub trait AnalyticsRecorder: Send + Sync {
    fn record(&self, event_name: &str, attributes: &EventAttributes);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsRecorder for NoopAnalytics {
    fn record(&self, _event_name: &str, _attributes: &EventAttributes) {}
}

/// Event emitted once a submission of `kind` has been accepted.
pub fn submission_event(kind: FormKind) -> (&'static str, EventAttributes) {
    let mut attributes = EventAttributes::new();
    match kind {
        FormKind::Contact => {
            attributes.insert(
                "form_type".to_string(),
                AttributeValue::Text("demo_booking".to_string()),
            );
            ("form_submit", attributes)
        }
        FormKind::Newsletter => {
            attributes.insert("value".to_string(), AttributeValue::Number(1));
            ("newsletter_signup", attributes)
        }
    }
}
