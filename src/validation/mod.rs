//! Validator protocol
//!
//! Applications supply validators either as one factory
//! `(fields, submitting) -> {key: valid}` or, deprecated, as a map of
//! per-key functions. Both are normalized to a [`ValidatorSet`] before any
//! orchestration runs.

mod evaluate;
mod validators;

pub use evaluate::{all_keys, errors_for, evaluate};
pub use validators::{
    ContextValidators, FieldValidatorFn, FieldValidators, ValidationResults, ValidatorFn,
    ValidatorSet, Validators,
};
