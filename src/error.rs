//! Configuration errors and the policy deciding whether they surface

use crate::notify::NotificationKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Developer-facing configuration errors.
///
/// Validation failures are never reported through this type; they live in
/// the error map and in `validationErrors` notifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("name must be a non-empty string unless an inline initial state is given")]
    InvalidName,

    #[error("the initial state for \"{0}\" is missing")]
    MissingInitialState(String),

    #[error("no validators were configured for \"{0}\"")]
    MissingValidators(String),

    #[error("no validator result for {0:?}")]
    MissingValidator(Vec<String>),

    #[error("some of the validations ({0:?}) are not present in the validators")]
    UnknownValidations(Vec<String>),

    #[error("invalid field name(s) {0:?}: every changed field must be present in the form")]
    UnknownFields(Vec<String>),

    #[error("no submit callback was configured for \"{0}\"")]
    MissingSubmit(String),

    #[error("an on_notify callback must be configured to report this notification")]
    MissingNotify,

    #[error("notify inside a submit callback accepts only submitSuccess or submitError, got {0}")]
    InvalidNotification(NotificationKind),

    #[error("unknown notification kind \"{0}\"")]
    UnknownNotificationKind(String),
}

impl FormError {
    /// Errors that production builds log and drop instead of returning
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FormError::UnknownFields(_)
                | FormError::UnknownValidations(_)
                | FormError::MissingNotify
                | FormError::InvalidNotification(_)
        )
    }
}

/// How configuration errors surface.
///
/// Development fails fast so misuse is seen immediately; production keeps
/// the running UI alive by logging recoverable errors and carrying on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    Development,
    Production,
}

impl Default for ErrorMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ErrorMode::Development
        } else {
            ErrorMode::Production
        }
    }
}

impl ErrorMode {
    pub fn is_production(&self) -> bool {
        matches!(self, ErrorMode::Production)
    }

    /// Route `error` through the policy: `Ok(())` when it was logged and
    /// tolerated (the caller drops the operation), `Err` when it must reach
    /// the caller.
    pub(crate) fn surface(&self, error: FormError) -> Result<(), FormError> {
        if self.is_production() && error.is_recoverable() {
            tracing::error!("{error}");
            Ok(())
        } else {
            Err(error)
        }
    }
}
