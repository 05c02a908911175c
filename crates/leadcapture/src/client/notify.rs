use crate::forms::domain::FormKind;

/// Generic text for every failed submission, whatever the cause.
pub const FAILURE_NOTICE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// Transient toast-style message surfaced after a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success_for(kind: FormKind) -> Self {
        let message = match kind {
            FormKind::Contact => "Thank you! We will be in touch soon.",
            FormKind::Newsletter => "You're in! Check your inbox soon.",
        };
        Self {
            level: NotificationLevel::Success,
            message: message.to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            level: NotificationLevel::Failure,
            message: FAILURE_NOTICE.to_string(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
