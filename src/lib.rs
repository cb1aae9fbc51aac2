//! formstate - shared state, validation and submit orchestration for
//! multi-field forms
//!
//! A [`FormContext`] holds every named form of an application scope together
//! with default validators and callbacks. A [`FormAccessor`] binds one form
//! name to it and exposes the fields view, the change and submit entry
//! points, the `loading` flag and input-prop generators.
//!
//! ```no_run
//! use formstate::{
//!     AccessorOptions, Form, FormAccessor, FormContext, Notification, SubmitOptions,
//!     SubmitParams, SubmitReturn, ValidationResults, Validators,
//! };
//!
//! let ctx = FormContext::builder()
//!     .form("login", Form::new().with("user", "").with("password", ""))
//!     .validators(Validators::factory(|fields, submitting| {
//!         ValidationResults::new()
//!             .with("user", !submitting || !fields.text("user").is_empty())
//!             .with("password", !submitting || fields.text("password").len() >= 8)
//!     }))
//!     .on_submit(|params: SubmitParams| {
//!         println!("{:?}", params.fields);
//!         SubmitReturn::Complete
//!     })
//!     .on_notify(|notification: Notification| println!("{notification:?}"))
//!     .build();
//!
//! let mut login = FormAccessor::bind(&ctx, AccessorOptions::named("login"))?;
//! let event = login.inputs().text("user").change("ada");
//! login.apply_input_event(&event, None)?;
//! login.handle_submit(None, SubmitOptions::default())?;
//! # Ok::<(), formstate::FormError>(())
//! ```

mod accessor;
mod config;
mod context;
mod deprecation;
mod error;
mod handlers;
mod inputs;
mod notify;
mod state;
mod validation;

pub use accessor::{AccessorOptions, FormAccessor};
pub use config::FormsConfig;
pub use context::{FormContext, FormContextBuilder, FormEvent, SubscriptionId};
pub use error::{ErrorMode, FormError};
pub use handlers::{
    Cancelable, ChangeOutcome, LoadingHandle, Submit, SubmitCallback, SubmitEvent, SubmitFuture,
    SubmitNotifier, SubmitOptions, SubmitOutcome, SubmitParams, SubmitPhase, SubmitReturn,
};
pub use inputs::{ExtendProps, InputOptions, InputProps, Inputs, SubmitProps};
pub use notify::{Notification, NotificationKind, Notify, NotifyCallback};
pub use state::{
    convert, parse_int, ErrorMap, FieldValue, FieldView, FieldsView, Form, FormsRegistry,
    InputEvent, InputKind,
};
pub use validation::{
    ContextValidators, FieldValidatorFn, FieldValidators, ValidationResults, ValidatorFn,
    ValidatorSet, Validators,
};

/// Lower-level orchestration entry points for hosts that manage their own
/// error maps instead of using [`FormAccessor`]
pub mod orchestration {
    pub use crate::handlers::{apply_field_patch, apply_input_event, submit, ChangeScope, SubmitScope};
    pub use crate::validation::{all_keys, errors_for, evaluate};
}
