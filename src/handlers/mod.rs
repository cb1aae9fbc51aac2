//! Change and submit orchestration
//!
//! Within one call the order is fixed: validation, then the error-map
//! update, then notification, then the state commit (change) or the submit
//! callback (submit).

mod change;
mod submit;

pub use change::{apply_field_patch, apply_input_event, ChangeOutcome, ChangeScope};
pub use submit::{
    submit, Cancelable, LoadingHandle, Submit, SubmitCallback, SubmitEvent, SubmitFuture,
    SubmitNotifier, SubmitOptions, SubmitOutcome, SubmitParams, SubmitPhase, SubmitReturn,
    SubmitScope,
};

#[cfg(test)]
pub use submit::MockSubmit;
