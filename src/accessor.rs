//! Form accessor: the per-form binding handed to the UI layer
//!
//! An accessor binds one form name to a [`FormContext`] (or to a private
//! context it owns when built standalone), resolves validators and
//! callbacks once, and exposes the fields view, the change and submit
//! entry points, the loading flag and the input-prop generators.

use crate::context::FormContext;
use crate::error::{ErrorMode, FormError};
use crate::handlers::{
    self, Cancelable, ChangeOutcome, ChangeScope, LoadingHandle, Submit, SubmitCallback,
    SubmitOptions, SubmitOutcome, SubmitPhase, SubmitScope,
};
use crate::inputs::{prefer_extend, ExtendProps, InputProps, Inputs};
use crate::notify::{Notify, NotifyCallback};
use crate::state::{ErrorMap, FieldsView, Form, InputEvent};
use crate::validation::{ValidationResults, ValidatorSet, Validators};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Registry key of a standalone accessor built without a name
const STANDALONE_KEY: &str = "standalone";

/// Options for binding an accessor. Anything set here takes precedence over
/// the context's defaults.
#[derive(Clone, Default)]
pub struct AccessorOptions {
    pub name: Option<String>,
    /// Inline initial form; registered when the context does not know the name
    pub initial_state: Option<Form>,
    pub validators: Option<Validators>,
    pub on_submit: Option<SubmitCallback>,
    pub on_notify: Option<NotifyCallback>,
    /// Only used by standalone accessors; bound ones follow their context
    pub error_mode: Option<ErrorMode>,
    /// Applied to every generated input prop bag
    pub extend_props: Option<ExtendProps>,
    /// Deprecated alias of `extend_props`
    pub generate_props: Option<ExtendProps>,
}

impl AccessorOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn inline(initial_state: Form) -> Self {
        Self {
            initial_state: Some(initial_state),
            ..Self::default()
        }
    }

    pub fn initial_state(mut self, form: Form) -> Self {
        self.initial_state = Some(form);
        self
    }

    pub fn validators(mut self, validators: impl Into<Validators>) -> Self {
        self.validators = Some(validators.into());
        self
    }

    pub fn on_submit(mut self, callback: impl Submit + 'static) -> Self {
        self.on_submit = Some(Arc::new(callback));
        self
    }

    pub fn on_notify(mut self, callback: impl Notify + 'static) -> Self {
        self.on_notify = Some(Arc::new(callback));
        self
    }

    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = Some(mode);
        self
    }

    pub fn extend_props<F>(mut self, extend: F) -> Self
    where
        F: Fn(InputProps) -> InputProps + Send + Sync + 'static,
    {
        self.extend_props = Some(Arc::new(extend));
        self
    }

    #[deprecated(note = "use extend_props")]
    pub fn generate_props<F>(mut self, generate: F) -> Self
    where
        F: Fn(InputProps) -> InputProps + Send + Sync + 'static,
    {
        self.generate_props = Some(Arc::new(generate));
        self
    }

    fn resolved_name(&self) -> Option<String> {
        self.name.clone().filter(|name| !name.is_empty())
    }
}

impl fmt::Debug for AccessorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorOptions")
            .field("name", &self.name)
            .field("initial_state", &self.initial_state)
            .field("validators", &self.validators)
            .field("on_submit", &self.on_submit.is_some())
            .field("on_notify", &self.on_notify.is_some())
            .field("error_mode", &self.error_mode)
            .finish_non_exhaustive()
    }
}

enum Binding<'ctx> {
    Shared(&'ctx FormContext),
    Owned(FormContext),
}

impl Binding<'_> {
    fn context(&self) -> &FormContext {
        match self {
            Binding::Shared(ctx) => ctx,
            Binding::Owned(ctx) => ctx,
        }
    }
}

/// Development builds reject misconfiguration; production carries on
fn require(mode: ErrorMode, ok: bool, error: impl FnOnce() -> FormError) -> Result<(), FormError> {
    if ok || mode.is_production() {
        Ok(())
    } else {
        Err(error())
    }
}

fn accept_all(fields: &Form, _submitting: bool) -> ValidationResults {
    fields.names().map(|name| (name, true)).collect()
}

/// Live binding of one form
pub struct FormAccessor<'ctx> {
    key: String,
    name: Option<String>,
    binding: Binding<'ctx>,
    validators: ValidatorSet,
    on_submit: Option<SubmitCallback>,
    on_notify: Option<NotifyCallback>,
    mode: ErrorMode,
    errors: ErrorMap,
    loading: LoadingHandle,
    phase: SubmitPhase,
    extend_props: Option<ExtendProps>,
}

impl<'ctx> FormAccessor<'ctx> {
    /// Bind to a form of a shared context.
    ///
    /// Without a name, an inline `initial_state` makes the accessor
    /// standalone instead.
    pub fn bind(ctx: &'ctx FormContext, mut options: AccessorOptions) -> Result<Self, FormError> {
        let mode = ctx.error_mode();
        let key = match options.resolved_name() {
            Some(name) => name,
            None if options.initial_state.is_some() => {
                options.error_mode.get_or_insert(mode);
                options.on_submit = options.on_submit.or_else(|| ctx.on_submit().cloned());
                options.on_notify = options.on_notify.or_else(|| ctx.on_notify().cloned());
                return FormAccessor::standalone(options);
            }
            None => {
                require(mode, false, || FormError::InvalidName)?;
                String::new()
            }
        };

        if !ctx.contains(&key) {
            let initial = match options.initial_state.take() {
                Some(initial) => initial,
                None => {
                    require(mode, false, || FormError::MissingInitialState(key.clone()))?;
                    Form::new()
                }
            };
            ctx.register(&key, &initial);
        }

        Self::resolve(Binding::Shared(ctx), key, options, mode)
    }
}

impl FormAccessor<'static> {
    /// Accessor owning a private context seeded from `initial_state`
    pub fn standalone(options: AccessorOptions) -> Result<Self, FormError> {
        let mode = options.error_mode.unwrap_or_default();
        let name = options.resolved_name();
        let initial = match options.initial_state.clone() {
            Some(initial) => initial,
            None => {
                require(mode, false, || match &name {
                    Some(name) => FormError::MissingInitialState(name.clone()),
                    None => FormError::InvalidName,
                })?;
                Form::new()
            }
        };

        let key = name.unwrap_or_else(|| STANDALONE_KEY.to_string());
        let ctx = FormContext::builder()
            .form(key.clone(), initial)
            .error_mode(mode)
            .build();
        Self::resolve(Binding::Owned(ctx), key, options, mode)
    }
}

impl<'ctx> FormAccessor<'ctx> {
    fn resolve(
        binding: Binding<'ctx>,
        key: String,
        options: AccessorOptions,
        mode: ErrorMode,
    ) -> Result<Self, FormError> {
        let name = options.resolved_name();
        let ctx = binding.context();

        let validators = match options.validators.or_else(|| ctx.validators_for(&key)) {
            Some(validators) => validators,
            None => {
                require(mode, false, || FormError::MissingValidators(key.clone()))?;
                Validators::factory(accept_all)
            }
        }
        .normalize();
        let on_submit = options.on_submit.or_else(|| ctx.on_submit().cloned());
        let on_notify = options.on_notify.or_else(|| ctx.on_notify().cloned());

        if !mode.is_production() {
            let form = ctx.form(&key).unwrap_or_default();
            let results = validators.evaluate(&form, false);
            let uncovered: Vec<String> = form
                .names()
                .filter(|field| !results.contains(field))
                .map(str::to_string)
                .collect();
            if !uncovered.is_empty() {
                return Err(FormError::MissingValidator(uncovered));
            }
            require(mode, on_submit.is_some(), || FormError::MissingSubmit(key.clone()))?;
        }

        tracing::debug!(form = %key, standalone = matches!(binding, Binding::Owned(_)), "accessor bound");

        Ok(Self {
            key,
            name,
            binding,
            validators,
            on_submit,
            on_notify,
            mode,
            errors: ErrorMap::new(),
            loading: LoadingHandle::new(),
            phase: SubmitPhase::Idle,
            extend_props: prefer_extend(
                options.extend_props.as_ref(),
                options.generate_props.as_ref(),
            )
            .cloned(),
        })
    }

    /// Name reported to the submit callback
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn context(&self) -> &FormContext {
        self.binding.context()
    }

    /// Latest committed form
    pub fn form(&self) -> Form {
        self.context().form(&self.key).unwrap_or_default()
    }

    /// Values and error flags for rendering
    pub fn fields(&self) -> FieldsView {
        FieldsView::new(&self.form(), &self.errors)
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn loading_handle(&self) -> LoadingHandle {
        self.loading.clone()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.mode
    }

    /// Merge a patch of known fields, re-checking `validations` or the
    /// patch's own keys
    pub fn apply_field_patch(
        &mut self,
        patch: Form,
        validations: Option<&[String]>,
    ) -> Result<ChangeOutcome, FormError> {
        let form = self.form();
        let ctx = self.binding.context();
        let key = &self.key;
        let scope = ChangeScope {
            form_name: key,
            form: &form,
            validators: &self.validators,
            on_notify: self.on_notify.as_ref(),
            errors: &mut self.errors,
            mode: self.mode,
        };
        handlers::apply_field_patch(scope, patch, validations, |patch| ctx.commit(key, patch))
    }

    /// Apply a change reported by an input
    pub fn apply_input_event(
        &mut self,
        event: &InputEvent,
        validations: Option<&[String]>,
    ) -> Result<ChangeOutcome, FormError> {
        let form = self.form();
        let ctx = self.binding.context();
        let key = &self.key;
        let scope = ChangeScope {
            form_name: key,
            form: &form,
            validators: &self.validators,
            on_notify: self.on_notify.as_ref(),
            errors: &mut self.errors,
            mode: self.mode,
        };
        handlers::apply_input_event(scope, event, validations, |patch| ctx.commit(key, patch))
    }

    /// Validate the whole form and hand it to the submit callback
    pub fn handle_submit(
        &mut self,
        event: Option<&mut dyn Cancelable>,
        options: SubmitOptions,
    ) -> Result<SubmitOutcome, FormError> {
        let form = self.form();
        let name = options.form_name.as_deref().or(self.name.as_deref());
        let scope = SubmitScope {
            name,
            form: &form,
            validators: &self.validators,
            on_submit: self.on_submit.as_ref(),
            on_notify: self.on_notify.as_ref(),
            loading: &self.loading,
            errors: &mut self.errors,
            phase: &mut self.phase,
            mode: self.mode,
        };
        handlers::submit(scope, event)
    }

    /// Replace this form with a new initial value if it changed.
    /// Unsaved edits are discarded.
    pub fn set_initial_state(&self, initial: Form) -> bool {
        let mut states = IndexMap::new();
        states.insert(self.key.clone(), initial);
        !self.context().set_initial_states(&states).is_empty()
    }

    /// Input-prop generators over the current fields view
    pub fn inputs(&self) -> Inputs<'_> {
        Inputs::new(self.fields(), self.extend_props.as_ref())
    }
}

impl fmt::Debug for FormAccessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormAccessor")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("errors", &self.errors)
            .field("loading", &self.loading())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{MockSubmit, SubmitParams, SubmitReturn};
    use crate::notify::{MockNotify, Notification};
    use crate::state::{FieldValue, InputKind};

    fn sum_validators() -> Validators {
        Validators::factory(|fields, _| {
            let ok = fields.number("input1").unwrap_or(0.0) + fields.number("input2").unwrap_or(0.0)
                == 2.0;
            [("input1", ok), ("input2", ok), ("customValidation", ok)]
                .into_iter()
                .collect()
        })
    }

    fn all_valid() -> Validators {
        Validators::factory(accept_all)
    }

    fn noop_submit(_: SubmitParams) -> SubmitReturn {
        SubmitReturn::Complete
    }

    fn sum_context() -> FormContext {
        FormContext::builder()
            .form("form", Form::new().with("input1", 0).with("input2", 1))
            .validators(sum_validators())
            .on_submit(noop_submit)
            .error_mode(ErrorMode::Development)
            .build()
    }

    mod construction {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_binds_to_context_defaults() {
            let ctx = sum_context();
            let accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            assert_eq!(accessor.name(), Some("form"));
            assert_eq!(accessor.form(), Form::new().with("input1", 0).with("input2", 1));
            assert!(!accessor.loading());
            assert_eq!(accessor.phase(), SubmitPhase::Idle);
        }

        #[test]
        fn test_requires_name_or_inline_state() {
            let ctx = sum_context();
            let result = FormAccessor::bind(&ctx, AccessorOptions::default());
            assert!(matches!(result, Err(FormError::InvalidName)));

            let empty = FormAccessor::bind(&ctx, AccessorOptions::named(""));
            assert!(matches!(empty, Err(FormError::InvalidName)));
        }

        #[test]
        fn test_requires_initial_state() {
            let ctx = sum_context();
            let result = FormAccessor::bind(&ctx, AccessorOptions::named("missing"));
            assert!(matches!(result, Err(FormError::MissingInitialState(name)) if name == "missing"));
        }

        #[test]
        fn test_inline_state_registers_form() {
            let ctx = sum_context();
            let accessor = FormAccessor::bind(
                &ctx,
                AccessorOptions::named("login")
                    .initial_state(Form::new().with("user", ""))
                    .validators(all_valid()),
            )
            .unwrap();

            assert_eq!(accessor.form(), Form::new().with("user", ""));
            assert_eq!(ctx.form("login"), Some(Form::new().with("user", "")));
        }

        #[test]
        fn test_requires_validators() {
            let ctx = FormContext::builder()
                .form("form", Form::new().with("a", ""))
                .on_submit(noop_submit)
                .error_mode(ErrorMode::Development)
                .build();
            let result = FormAccessor::bind(&ctx, AccessorOptions::named("form"));
            assert!(matches!(result, Err(FormError::MissingValidators(name)) if name == "form"));
        }

        #[test]
        fn test_validators_must_cover_every_field() {
            let ctx = FormContext::builder()
                .form("form", Form::new().with("a", "").with("b", ""))
                .validators(Validators::factory(|_, _| [("a", true)].into_iter().collect()))
                .on_submit(noop_submit)
                .error_mode(ErrorMode::Development)
                .build();
            let result = FormAccessor::bind(&ctx, AccessorOptions::named("form"));
            assert!(matches!(result, Err(FormError::MissingValidator(keys)) if keys == ["b"]));
        }

        #[test]
        fn test_requires_submit_callback() {
            let ctx = FormContext::builder()
                .form("form", Form::new().with("a", ""))
                .validators(all_valid())
                .error_mode(ErrorMode::Development)
                .build();
            let result = FormAccessor::bind(&ctx, AccessorOptions::named("form"));
            assert!(matches!(result, Err(FormError::MissingSubmit(name)) if name == "form"));
        }

        #[test]
        fn test_production_skips_checks() {
            let ctx = FormContext::builder()
                .error_mode(ErrorMode::Production)
                .build();
            let accessor = FormAccessor::bind(&ctx, AccessorOptions::named("draft")).unwrap();

            assert_eq!(accessor.form(), Form::new());
            assert_eq!(accessor.error_mode(), ErrorMode::Production);
        }

        #[test]
        fn test_accessor_options_take_precedence() {
            let ctx = sum_context();
            let mut accessor = FormAccessor::bind(
                &ctx,
                AccessorOptions::named("form").validators(all_valid()),
            )
            .unwrap();

            let outcome = accessor
                .apply_field_patch(Form::new().with("input1", 5), None)
                .unwrap();

            assert!(outcome.failing().is_empty());
        }

        #[test]
        fn test_per_field_validators_are_accepted() {
            let ctx = sum_context();
            let validators: Validators = Validators::per_field()
                .field("input1", |_| true)
                .field("input2", |_| true)
                .into();
            let accessor =
                FormAccessor::bind(&ctx, AccessorOptions::named("form").validators(validators));
            assert!(accessor.is_ok());
        }
    }

    mod change {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_explicit_validations_scenario() {
            let mut mock = MockNotify::new();
            mock.expect_notify()
                .withf(|n| {
                    *n == Notification::ValidationErrors(vec![
                        "input1".into(),
                        "customValidation".into(),
                    ])
                })
                .times(1)
                .return_const(());
            let ctx = FormContext::builder()
                .form("form", Form::new().with("input1", 0).with("input2", 1))
                .validators(sum_validators())
                .on_submit(noop_submit)
                .on_notify(mock)
                .error_mode(ErrorMode::Development)
                .build();
            let mut accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            let validations = vec!["input1".to_string(), "customValidation".to_string()];
            accessor
                .apply_field_patch(Form::new().with("input1", 2), Some(&validations))
                .unwrap();

            assert_eq!(
                *accessor.errors(),
                [("input1", true), ("customValidation", true)].into_iter().collect()
            );
            let fields = accessor.fields();
            assert_eq!(fields.value("input1"), Some(&FieldValue::Number(2.0)));
            assert!(fields.error("input1"));
            assert!(!fields.error("input2"));
            assert!(fields.error("customValidation"));
        }

        #[test]
        fn test_input_event_updates_shared_store() {
            let ctx = sum_context();
            let mut accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            accessor
                .apply_input_event(&InputEvent::new("input1", "1", InputKind::Number), None)
                .unwrap();

            assert_eq!(
                ctx.form("form").and_then(|f| f.get("input1").cloned()),
                Some(FieldValue::Number(1.0))
            );
            assert_eq!(accessor.errors().get("input1"), Some(false));
        }

        #[test]
        fn test_accessors_share_the_store() {
            let ctx = sum_context();
            let mut writer = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();
            let reader = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            writer
                .apply_field_patch(Form::new().with("input2", 7), None)
                .unwrap();

            assert_eq!(reader.fields().value("input2"), Some(&FieldValue::Number(7.0)));
            // Error maps stay local to each accessor
            assert!(reader.errors().is_empty());
        }

        #[test]
        fn test_unknown_field_is_dropped_in_production() {
            let ctx = FormContext::builder()
                .form("form", Form::new().with("a", ""))
                .validators(all_valid())
                .error_mode(ErrorMode::Production)
                .build();
            let mut accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            let outcome = accessor
                .apply_field_patch(Form::new().with("b", "x"), None)
                .unwrap();

            assert_eq!(outcome, ChangeOutcome::Dropped);
            assert_eq!(accessor.form(), Form::new().with("a", ""));
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        fn two_inputs() -> Form {
            Form::new().with("input1", "valid").with("input2", "validToo")
        }

        #[test]
        fn test_valid_form_submits_once() {
            let mut submit_mock = MockSubmit::new();
            submit_mock
                .expect_submit()
                .withf(|params| params.fields == two_inputs())
                .times(1)
                .returning(|_| SubmitReturn::Complete);
            let mut notify_mock = MockNotify::new();
            notify_mock.expect_notify().times(0);
            let ctx = FormContext::builder()
                .form("form", two_inputs())
                .validators(all_valid())
                .on_submit(submit_mock)
                .on_notify(notify_mock)
                .error_mode(ErrorMode::Development)
                .build();
            let mut accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            let outcome = accessor
                .handle_submit(None, SubmitOptions::default())
                .unwrap();

            assert!(outcome.is_submitted());
            assert_eq!(accessor.phase(), SubmitPhase::Idle);
        }

        #[test]
        fn test_failing_validator_blocks_submit() {
            let mut submit_mock = MockSubmit::new();
            submit_mock.expect_submit().times(0);
            let mut notify_mock = MockNotify::new();
            notify_mock
                .expect_notify()
                .withf(|n| *n == Notification::ValidationErrors(vec!["input2".into()]))
                .times(1)
                .return_const(());
            let ctx = FormContext::builder()
                .form("form", two_inputs())
                .validators(Validators::factory(|fields, _| {
                    fields.names().map(|name| (name, name != "input2")).collect()
                }))
                .on_submit(submit_mock)
                .on_notify(notify_mock)
                .error_mode(ErrorMode::Development)
                .build();
            let mut accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            let outcome = accessor
                .handle_submit(None, SubmitOptions::default())
                .unwrap();

            assert!(!outcome.is_submitted());
            assert_eq!(accessor.phase(), SubmitPhase::SubmitBlocked);
            assert!(accessor.fields().error("input2"));
        }

        #[test]
        fn test_form_name_override() {
            let mut submit_mock = MockSubmit::new();
            submit_mock
                .expect_submit()
                .withf(|params| params.name.as_deref() == Some("renamed"))
                .times(1)
                .returning(|_| SubmitReturn::Complete);
            let ctx = FormContext::builder()
                .form("form", two_inputs())
                .validators(all_valid())
                .on_submit(submit_mock)
                .error_mode(ErrorMode::Development)
                .build();
            let mut accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            accessor
                .handle_submit(None, SubmitOptions::form_name("renamed"))
                .unwrap();
        }

        #[test]
        fn test_loading_follows_the_callback() {
            let ctx = FormContext::builder()
                .form("form", two_inputs())
                .validators(all_valid())
                .on_submit(|params: SubmitParams| {
                    params.set_loading(true);
                    SubmitReturn::pending(async move {
                        params.set_loading(false);
                        Ok(())
                    })
                })
                .error_mode(ErrorMode::Development)
                .build();
            let mut accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();

            let outcome = accessor
                .handle_submit(None, SubmitOptions::default())
                .unwrap();
            assert!(accessor.loading());

            let SubmitOutcome::Submitted(returned) = outcome else {
                panic!("expected submission");
            };
            tokio_test::block_on(returned.into_future().expect("pending future")).unwrap();
            assert!(!accessor.loading());
        }
    }

    mod replacement {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_async_initial_state_overwrites_edits() {
            let ctx = FormContext::builder()
                .form("form", Form::new().with("input", ""))
                .validators(all_valid())
                .on_submit(noop_submit)
                .error_mode(ErrorMode::Development)
                .build();
            let mut accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();
            accessor
                .apply_field_patch(Form::new().with("input", "unsaved"), None)
                .unwrap();

            assert!(accessor.set_initial_state(Form::new().with("input", "VALUE")));

            assert_eq!(accessor.fields().value("input"), Some(&FieldValue::from("VALUE")));
        }

        #[test]
        fn test_same_initial_state_is_ignored() {
            let ctx = sum_context();
            let accessor = FormAccessor::bind(&ctx, AccessorOptions::named("form")).unwrap();
            assert!(!accessor.set_initial_state(Form::new().with("input1", 0).with("input2", 1)));
        }

        #[test]
        fn test_inline_initial_state_is_remembered() {
            let ctx = FormContext::builder()
                .validators(all_valid())
                .on_submit(noop_submit)
                .error_mode(ErrorMode::Development)
                .build();
            let mut accessor = FormAccessor::bind(
                &ctx,
                AccessorOptions::named("login").initial_state(Form::new().with("user", "")),
            )
            .unwrap();
            accessor
                .apply_field_patch(Form::new().with("user", "typed"), None)
                .unwrap();

            assert!(!accessor.set_initial_state(Form::new().with("user", "")));
            assert_eq!(accessor.fields().value("user"), Some(&FieldValue::from("typed")));
        }
    }

    mod standalone {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_owns_private_context() {
            let mut accessor = FormAccessor::standalone(
                AccessorOptions::inline(Form::new().with("email", ""))
                    .validators(Validators::factory(|fields, submitting| {
                        ValidationResults::new()
                            .with("email", !submitting || fields.text("email").contains('@'))
                    }))
                    .on_submit(noop_submit)
                    .error_mode(ErrorMode::Development),
            )
            .unwrap();

            assert_eq!(accessor.name(), None);
            accessor
                .apply_field_patch(Form::new().with("email", "ada"), None)
                .unwrap();
            assert!(!accessor.fields().error("email"));

            let outcome = accessor.handle_submit(None, SubmitOptions::default());
            // No notify callback: blocked submits are fatal in development
            assert!(matches!(outcome, Err(FormError::MissingNotify)));
            assert!(accessor.fields().error("email"));
        }

        #[test]
        fn test_unnamed_inline_state_on_context_is_standalone() {
            let ctx = sum_context();
            let accessor = FormAccessor::bind(
                &ctx,
                AccessorOptions::inline(Form::new().with("q", "")).validators(all_valid()),
            )
            .unwrap();

            assert_eq!(accessor.form(), Form::new().with("q", ""));
            assert!(!ctx.contains(STANDALONE_KEY));
        }

        #[test]
        fn test_requires_inline_state() {
            let result = FormAccessor::standalone(
                AccessorOptions::default().error_mode(ErrorMode::Development),
            );
            assert!(matches!(result, Err(FormError::InvalidName)));
        }
    }

    mod inputs {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accessor_extend_props_applies() {
            let ctx = sum_context();
            let accessor = FormAccessor::bind(
                &ctx,
                AccessorOptions::named("form")
                    .extend_props(|props| props.with_attribute("class", "field")),
            )
            .unwrap();

            let props = accessor.inputs().number("input1");

            assert_eq!(props.attributes.get("class").map(String::as_str), Some("field"));
            assert_eq!(props.value, FieldValue::Number(0.0));
        }

        #[test]
        #[allow(deprecated)]
        fn test_accessor_generate_props_is_an_alias() {
            let ctx = sum_context();
            let accessor = FormAccessor::bind(
                &ctx,
                AccessorOptions::named("form")
                    .generate_props(|props| props.with_attribute("class", "legacy")),
            )
            .unwrap();

            let props = accessor.inputs().number("input2");

            assert_eq!(props.attributes.get("class").map(String::as_str), Some("legacy"));
            assert!(!crate::deprecation::warn_once(crate::inputs::GENERATE_PROPS, "again"));
        }
    }
}
