//! Submit orchestration: validate the whole form, then hand it to the
//! application's submit callback

use crate::error::{ErrorMode, FormError};
use crate::notify::{Notification, NotifyCallback};
use crate::state::{ErrorMap, Form};
use crate::validation::{all_keys, errors_for, ValidatorSet};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Submit state machine:
/// `Idle -> Validating -> {SubmitBlocked | Submitting -> Idle}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    SubmitBlocked,
    Submitting,
}

/// Something whose default action can be cancelled, like a form submit event
pub trait Cancelable {
    fn prevent_default(&mut self);
}

/// Minimal cancelable submit event for hosts without their own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    pub default_prevented: bool,
}

impl Cancelable for SubmitEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Per-call submit options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Override the form name reported to the submit callback
    pub form_name: Option<String>,
}

impl SubmitOptions {
    pub fn form_name(name: impl Into<String>) -> Self {
        Self {
            form_name: Some(name.into()),
        }
    }
}

/// Shared `loading` flag. Only the submit callback toggles it; the
/// orchestrator never does.
#[derive(Debug, Clone, Default)]
pub struct LoadingHandle(Arc<AtomicBool>);

impl LoadingHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&self, loading: bool) {
        self.0.store(loading, Ordering::SeqCst);
    }

    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Notify function handed to the submit callback.
///
/// Accepts only `submitSuccess` / `submitError`.
#[derive(Clone)]
pub struct SubmitNotifier {
    on_notify: Option<NotifyCallback>,
    mode: ErrorMode,
}

impl SubmitNotifier {
    pub fn new(on_notify: Option<NotifyCallback>, mode: ErrorMode) -> Self {
        Self { on_notify, mode }
    }

    pub fn notify(&self, notification: Notification) -> Result<(), FormError> {
        let kind = notification.kind();
        if !kind.is_submit_outcome() {
            return self.mode.surface(FormError::InvalidNotification(kind));
        }
        match &self.on_notify {
            Some(callback) => {
                callback.notify(notification);
                Ok(())
            }
            None => self.mode.surface(FormError::MissingNotify),
        }
    }

    pub fn success(&self) -> Result<(), FormError> {
        self.notify(Notification::SubmitSuccess)
    }

    pub fn error(&self, reason: Option<String>) -> Result<(), FormError> {
        self.notify(Notification::SubmitError(reason))
    }
}

impl fmt::Debug for SubmitNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitNotifier")
            .field("configured", &self.on_notify.is_some())
            .field("mode", &self.mode)
            .finish()
    }
}

/// Arguments of the submit callback
#[derive(Debug, Clone)]
pub struct SubmitParams {
    pub name: Option<String>,
    /// Validated field values
    pub fields: Form,
    pub loading: LoadingHandle,
    pub notify: SubmitNotifier,
}

impl SubmitParams {
    pub fn set_loading(&self, loading: bool) {
        self.loading.set_loading(loading);
    }
}

pub type SubmitFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// What the submit callback hands back to the caller of `handle_submit`
pub enum SubmitReturn {
    /// Work finished synchronously
    Complete,
    /// Asynchronous work for the host to drive
    Pending(SubmitFuture),
}

impl SubmitReturn {
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        SubmitReturn::Pending(Box::pin(future))
    }

    pub fn into_future(self) -> Option<SubmitFuture> {
        match self {
            SubmitReturn::Complete => None,
            SubmitReturn::Pending(future) => Some(future),
        }
    }
}

impl fmt::Debug for SubmitReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitReturn::Complete => f.write_str("Complete"),
            SubmitReturn::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Application submit callback. Implemented for any
/// `Fn(SubmitParams) -> SubmitReturn` closure.
#[cfg_attr(test, mockall::automock)]
pub trait Submit: Send + Sync {
    fn submit(&self, params: SubmitParams) -> SubmitReturn;
}

impl<F> Submit for F
where
    F: Fn(SubmitParams) -> SubmitReturn + Send + Sync,
{
    fn submit(&self, params: SubmitParams) -> SubmitReturn {
        self(params)
    }
}

pub type SubmitCallback = Arc<dyn Submit>;

/// Result of a submit attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The callback ran; its return value is passed through
    Submitted(SubmitReturn),
    /// Validation failed; the callback was not invoked
    Blocked { failing: Vec<String> },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Everything one submit needs, borrowed from the accessor
pub struct SubmitScope<'a> {
    /// Name reported to the callback
    pub name: Option<&'a str>,
    pub form: &'a Form,
    pub validators: &'a ValidatorSet,
    pub on_submit: Option<&'a SubmitCallback>,
    pub on_notify: Option<&'a NotifyCallback>,
    pub loading: &'a LoadingHandle,
    pub errors: &'a mut ErrorMap,
    pub phase: &'a mut SubmitPhase,
    pub mode: ErrorMode,
}

/// Validate every field and custom key with `submitting = true`; submit only
/// when all pass.
pub fn submit(
    scope: SubmitScope<'_>,
    event: Option<&mut dyn Cancelable>,
) -> Result<SubmitOutcome, FormError> {
    if let Some(event) = event {
        event.prevent_default();
    }

    transition(scope.phase, SubmitPhase::Validating, scope.name);
    let results = scope.validators.evaluate(scope.form, true);
    let keys = all_keys(scope.form, &results);
    let pass = match errors_for(&results, &keys) {
        Ok(pass) => pass,
        Err(error) => {
            transition(scope.phase, SubmitPhase::Idle, scope.name);
            return Err(error);
        }
    };
    scope.errors.merge(&pass);

    let failing = pass.failing();
    if !failing.is_empty() {
        transition(scope.phase, SubmitPhase::SubmitBlocked, scope.name);
        match scope.on_notify {
            Some(notify) => notify.notify(Notification::ValidationErrors(failing.clone())),
            None => scope.mode.surface(FormError::MissingNotify)?,
        }
        return Ok(SubmitOutcome::Blocked { failing });
    }

    let Some(on_submit) = scope.on_submit else {
        transition(scope.phase, SubmitPhase::Idle, scope.name);
        return Err(FormError::MissingSubmit(
            scope.name.unwrap_or_default().to_string(),
        ));
    };

    transition(scope.phase, SubmitPhase::Submitting, scope.name);
    let params = SubmitParams {
        name: scope.name.map(str::to_string),
        fields: scope.form.clone(),
        loading: scope.loading.clone(),
        notify: SubmitNotifier::new(scope.on_notify.cloned(), scope.mode),
    };
    let returned = on_submit.submit(params);
    transition(scope.phase, SubmitPhase::Idle, scope.name);

    Ok(SubmitOutcome::Submitted(returned))
}

fn transition(phase: &mut SubmitPhase, next: SubmitPhase, form: Option<&str>) {
    tracing::debug!(form, from = ?*phase, to = ?next, "submit phase");
    *phase = next;
}
