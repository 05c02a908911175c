//! Client side of the lead-capture forms: the draft being edited, the
//! submission lifecycle, and the capabilities it talks to.

pub mod analytics;
pub mod draft;
pub mod handler;
pub mod notify;
pub mod transport;

pub use analytics::{submission_event, AnalyticsRecorder, AttributeValue, EventAttributes, NoopAnalytics};
pub use draft::{DraftError, SubmissionDraft};
pub use handler::{FailureCause, FormSubmissionHandler, SubmissionPhase, SubmitOutcome};
pub use notify::{Notification, NotificationLevel, Notifier, FAILURE_NOTICE};
pub use transport::{HttpTransport, SubmissionTransport, TransportError, TransportResponse};
