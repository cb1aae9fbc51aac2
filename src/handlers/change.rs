//! Change orchestration: validate a patch, record errors, notify, commit

use crate::error::{ErrorMode, FormError};
use crate::notify::{Notification, NotifyCallback};
use crate::state::{convert, ErrorMap, Form, InputEvent};
use crate::validation::{errors_for, ValidatorSet};

/// Everything one change needs, borrowed from the accessor
pub struct ChangeScope<'a> {
    pub form_name: &'a str,
    /// Latest committed form
    pub form: &'a Form,
    pub validators: &'a ValidatorSet,
    pub on_notify: Option<&'a NotifyCallback>,
    pub errors: &'a mut ErrorMap,
    pub mode: ErrorMode,
}

/// Result of a change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The patch was committed. `errors` holds this pass's flags only.
    Applied { errors: ErrorMap, failing: Vec<String> },
    /// A configuration error was logged and the change discarded
    Dropped,
}

impl ChangeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ChangeOutcome::Applied { .. })
    }

    /// Keys that failed this pass, empty when dropped
    pub fn failing(&self) -> &[String] {
        match self {
            ChangeOutcome::Applied { failing, .. } => failing,
            ChangeOutcome::Dropped => &[],
        }
    }
}

/// Apply a programmatic patch.
///
/// Validation, error-map update, notification and `commit` run in that
/// order. `validations` overrides which keys are re-checked; by default the
/// patch's own keys are.
pub fn apply_field_patch<C>(
    scope: ChangeScope<'_>,
    patch: Form,
    validations: Option<&[String]>,
    commit: C,
) -> Result<ChangeOutcome, FormError>
where
    C: FnOnce(&Form),
{
    let unknown = scope.form.unknown_names(&patch);
    if !unknown.is_empty() {
        scope.mode.surface(FormError::UnknownFields(unknown))?;
        return Ok(ChangeOutcome::Dropped);
    }

    let merged = scope.form.apply(&patch);
    let results = scope.validators.evaluate(&merged, false);

    let keys: Vec<String> = match validations {
        Some(requested) => {
            let unknown: Vec<String> = requested
                .iter()
                .filter(|key| !results.contains(key))
                .cloned()
                .collect();
            if !unknown.is_empty() {
                scope.mode.surface(FormError::UnknownValidations(unknown))?;
                return Ok(ChangeOutcome::Dropped);
            }
            requested.to_vec()
        }
        None => patch.names().map(str::to_string).collect(),
    };

    let pass = errors_for(&results, &keys)?;
    scope.errors.merge(&pass);

    let failing = pass.failing();
    if !failing.is_empty() {
        tracing::debug!(form = scope.form_name, ?failing, "change failed validation");
        if let Some(notify) = scope.on_notify {
            notify.notify(Notification::ValidationErrors(failing.clone()));
        }
    }

    commit(&patch);
    tracing::debug!(form = scope.form_name, fields = ?patch.names().collect::<Vec<_>>(), "change committed");

    Ok(ChangeOutcome::Applied {
        errors: pass,
        failing,
    })
}

/// Apply an input-originated change, converting the raw value by input type
pub fn apply_input_event<C>(
    scope: ChangeScope<'_>,
    event: &InputEvent,
    validations: Option<&[String]>,
    commit: C,
) -> Result<ChangeOutcome, FormError>
where
    C: FnOnce(&Form),
{
    let Some(prior) = scope.form.get(&event.name) else {
        scope
            .mode
            .surface(FormError::UnknownFields(vec![event.name.clone()]))?;
        return Ok(ChangeOutcome::Dropped);
    };

    let value = convert(event.kind, &event.value, event.checked, Some(prior));
    let patch = Form::new().with(event.name.clone(), value);
    apply_field_patch(scope, patch, validations, commit)
}
