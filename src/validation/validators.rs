//! Validator shapes and their normalization into a single factory

use crate::deprecation;
use crate::state::Form;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Validity per validation key (`true` = valid)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResults {
    valid: IndexMap<String, bool>,
}

impl ValidationResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, valid: bool) -> Self {
        self.valid.insert(key.into(), valid);
        self
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.valid.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.valid.contains_key(key)
    }

    /// Validation keys in the order the validator produced them
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.valid.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for ValidationResults {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            valid: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// `(fields, submitting) -> validity per key`
pub type ValidatorFn = Arc<dyn Fn(&Form, bool) -> ValidationResults + Send + Sync>;

/// `(fields) -> valid` for one key
pub type FieldValidatorFn = Arc<dyn Fn(&Form) -> bool + Send + Sync>;

/// Validators as supplied by the application
#[derive(Clone)]
pub enum Validators {
    /// A single factory producing every key, including cross-field keys
    Factory(ValidatorFn),
    /// Deprecated: one function per key, unaware of submit time
    PerField(IndexMap<String, FieldValidatorFn>),
}

impl Validators {
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&Form, bool) -> ValidationResults + Send + Sync + 'static,
    {
        Validators::Factory(Arc::new(f))
    }

    /// Start a per-key mapping
    pub fn per_field() -> FieldValidators {
        FieldValidators::default()
    }

    /// Convert to the canonical factory shape. Deprecation notices for
    /// legacy shapes are emitted here and nowhere else.
    pub fn normalize(self) -> ValidatorSet {
        match self {
            Validators::Factory(factory) => ValidatorSet { factory },
            Validators::PerField(map) => {
                deprecation::warn_once(
                    "per-field-validators",
                    "per-field validator maps are deprecated; use Validators::factory",
                );
                let factory: ValidatorFn = Arc::new(move |fields: &Form, _submitting: bool| {
                    map.iter()
                        .map(|(key, validator)| (key.clone(), validator(fields)))
                        .collect::<ValidationResults>()
                });
                ValidatorSet { factory }
            }
        }
    }
}

impl fmt::Debug for Validators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validators::Factory(_) => f.write_str("Validators::Factory(..)"),
            Validators::PerField(map) => f
                .debug_tuple("Validators::PerField")
                .field(&map.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Builder for the per-key validator shape
#[derive(Default)]
pub struct FieldValidators {
    map: IndexMap<String, FieldValidatorFn>,
}

impl FieldValidators {
    pub fn field<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Form) -> bool + Send + Sync + 'static,
    {
        self.map.insert(key.into(), Arc::new(f));
        self
    }
}

impl From<FieldValidators> for Validators {
    fn from(builder: FieldValidators) -> Self {
        Validators::PerField(builder.map)
    }
}

/// Normalized validator set
#[derive(Clone)]
pub struct ValidatorSet {
    factory: ValidatorFn,
}

impl ValidatorSet {
    /// Run the factory over `fields`
    pub fn evaluate(&self, fields: &Form, submitting: bool) -> ValidationResults {
        (self.factory)(fields, submitting)
    }

    /// Every key the set defines, enumerated by invoking it with `placeholder`
    pub fn keys(&self, placeholder: &Form) -> Vec<String> {
        self.evaluate(placeholder, false)
            .keys()
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatorSet(..)")
    }
}

/// Validators configured on a shared context
#[derive(Debug, Clone)]
pub enum ContextValidators {
    /// Used for every form
    Shared(Validators),
    /// Looked up by form name
    PerForm(IndexMap<String, Validators>),
}

impl ContextValidators {
    pub fn resolve(&self, form_name: &str) -> Option<Validators> {
        match self {
            ContextValidators::Shared(validators) => Some(validators.clone()),
            ContextValidators::PerForm(map) => map.get(form_name).cloned(),
        }
    }
}

impl From<Validators> for ContextValidators {
    fn from(validators: Validators) -> Self {
        ContextValidators::Shared(validators)
    }
}
