//! Notifications surfaced to the end user through the application's
//! notify callback

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Closed set of notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    ValidationErrors,
    SubmitError,
    SubmitSuccess,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationErrors => "validationErrors",
            Self::SubmitError => "submitError",
            Self::SubmitSuccess => "submitSuccess",
        }
    }

    /// Kinds a submit callback may emit itself
    pub fn is_submit_outcome(&self) -> bool {
        matches!(self, Self::SubmitError | Self::SubmitSuccess)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validationErrors" => Ok(Self::ValidationErrors),
            "submitError" => Ok(Self::SubmitError),
            "submitSuccess" => Ok(Self::SubmitSuccess),
            other => Err(FormError::UnknownNotificationKind(other.to_string())),
        }
    }
}

/// A notification and its reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "reason", rename_all = "camelCase")]
pub enum Notification {
    /// Keys that failed validation, in evaluation order
    ValidationErrors(Vec<String>),
    /// Submission failed, optionally with a reason for the user
    SubmitError(Option<String>),
    SubmitSuccess,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::ValidationErrors(_) => NotificationKind::ValidationErrors,
            Self::SubmitError(_) => NotificationKind::SubmitError,
            Self::SubmitSuccess => NotificationKind::SubmitSuccess,
        }
    }
}

/// Application callback receiving notifications.
///
/// Implemented for any `Fn(Notification)` closure.
#[cfg_attr(test, mockall::automock)]
pub trait Notify: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<F> Notify for F
where
    F: Fn(Notification) + Send + Sync,
{
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

pub type NotifyCallback = Arc<dyn Notify>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            NotificationKind::ValidationErrors,
            NotificationKind::SubmitError,
            NotificationKind::SubmitSuccess,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert_eq!(
            "oops".parse::<NotificationKind>(),
            Err(FormError::UnknownNotificationKind("oops".into()))
        );
    }

    #[test]
    fn test_submit_outcomes() {
        assert!(NotificationKind::SubmitError.is_submit_outcome());
        assert!(NotificationKind::SubmitSuccess.is_submit_outcome());
        assert!(!NotificationKind::ValidationErrors.is_submit_outcome());
    }

    #[test]
    fn test_notification_json() {
        let json = serde_json::to_value(Notification::ValidationErrors(vec!["input2".into()])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "validationErrors", "reason": ["input2"]})
        );
    }

    #[test]
    fn test_closure_is_notify() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: NotifyCallback = Arc::new(move |n: Notification| {
            sink.lock().unwrap().push(n.kind());
        });

        callback.notify(Notification::SubmitSuccess);

        assert_eq!(*seen.lock().unwrap(), vec![NotificationKind::SubmitSuccess]);
    }
}
