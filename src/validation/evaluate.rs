//! Evaluation rule: validity results to error flags

use super::validators::{ValidationResults, ValidatorSet};
use crate::error::FormError;
use crate::state::{ErrorMap, Form};

/// Error flags for `keys` from already computed `results`.
///
/// Each flag is the negation of the key's validity. Keys without a result
/// are a form/validator mismatch and fail the whole evaluation.
pub fn errors_for<S: AsRef<str>>(
    results: &ValidationResults,
    keys: &[S],
) -> Result<ErrorMap, FormError> {
    let mut errors = ErrorMap::new();
    let mut missing = Vec::new();

    for key in keys {
        let key = key.as_ref();
        match results.get(key) {
            Some(valid) => errors.insert(key, !valid),
            None => {
                if !missing.iter().any(|m| m == key) {
                    missing.push(key.to_string());
                }
            }
        }
    }

    if missing.is_empty() {
        Ok(errors)
    } else {
        Err(FormError::MissingValidator(missing))
    }
}

/// Run `validators` over `fields` and flag every key in `keys`
pub fn evaluate<S: AsRef<str>>(
    validators: &ValidatorSet,
    fields: &Form,
    keys: &[S],
    submitting: bool,
) -> Result<ErrorMap, FormError> {
    let results = validators.evaluate(fields, submitting);
    errors_for(&results, keys)
}

/// Union of the form's field names and the validator's own keys, fields
/// first
pub fn all_keys(form: &Form, results: &ValidationResults) -> Vec<String> {
    let mut keys: Vec<String> = form.names().map(str::to_string).collect();
    for key in results.keys() {
        if !form.contains(key) {
            keys.push(key.to_string());
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validators;
    use pretty_assertions::assert_eq;

    fn validators() -> ValidatorSet {
        Validators::factory(|fields, _| {
            let ok = fields.number("input1").unwrap_or(0.0) + fields.number("input2").unwrap_or(0.0)
                == 2.0;
            [("input1", ok), ("input2", ok), ("customValidation", ok)]
                .into_iter()
                .collect()
        })
        .normalize()
    }

    #[test]
    fn test_error_is_negated_validity() {
        let form = Form::new().with("input1", 2).with("input2", 1);
        let errors = evaluate(&validators(), &form, &["input1", "customValidation"], false).unwrap();

        assert_eq!(
            errors,
            [("input1", true), ("customValidation", true)].into_iter().collect()
        );
    }

    #[test]
    fn test_valid_fields_are_not_flagged() {
        let form = Form::new().with("input1", 1).with("input2", 1);
        let errors = evaluate(&validators(), &form, &["input1", "input2"], true).unwrap();
        assert!(!errors.has_errors());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_missing_result_is_configuration_error() {
        let form = Form::new().with("input1", 1);
        let result = evaluate(&validators(), &form, &["input1", "unknown", "unknown"], false);
        assert_eq!(result, Err(FormError::MissingValidator(vec!["unknown".into()])));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let form = Form::new().with("input1", 0).with("input2", 1);
        let keys = ["input1", "input2", "customValidation"];
        let first = evaluate(&validators(), &form, &keys, false);
        let second = evaluate(&validators(), &form, &keys, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_keys_unions_fields_and_custom_keys() {
        let form = Form::new().with("input1", 0).with("input2", 1).with("extra", "");
        let results = validators().evaluate(&form, true);
        assert_eq!(
            all_keys(&form, &results),
            vec!["input1", "input2", "extra", "customValidation"]
        );
    }
}
