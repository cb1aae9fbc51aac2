//! Error flags and the derived fields view used for rendering

use super::field::FieldValue;
use super::form::Form;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Invalid flags per validation key (`true` = invalid)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    flags: IndexMap<String, bool>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    /// True when the key has been flagged invalid
    pub fn is_invalid(&self, key: &str) -> bool {
        self.get(key).unwrap_or(false)
    }

    pub fn insert(&mut self, key: impl Into<String>, invalid: bool) {
        self.flags.insert(key.into(), invalid);
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Merge `other` over this map. Keys missing from `other` keep their
    /// previous flag.
    pub fn merge(&mut self, other: &ErrorMap) {
        for (key, invalid) in &other.flags {
            self.flags.insert(key.clone(), *invalid);
        }
    }

    /// Keys flagged invalid, in evaluation order
    pub fn failing(&self) -> Vec<String> {
        self.flags
            .iter()
            .filter(|(_, invalid)| **invalid)
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.flags.values().any(|invalid| *invalid)
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Value and error flag of one field or validation key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldView {
    /// None for custom validation keys that are not fields
    pub value: Option<FieldValue>,
    pub error: bool,
}

/// Read-only `{name: {value, error}}` view, recomputed from a form and its
/// error map
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldsView {
    entries: IndexMap<String, FieldView>,
}

impl FieldsView {
    /// Combine form values with error flags. Every field and every error key
    /// gets an entry; fields come first in declaration order.
    pub fn new(form: &Form, errors: &ErrorMap) -> Self {
        let mut entries = IndexMap::new();
        for (name, value) in form.iter() {
            entries.insert(
                name.to_string(),
                FieldView {
                    value: Some(value.clone()),
                    error: errors.is_invalid(name),
                },
            );
        }
        for (key, invalid) in errors.iter() {
            entries.entry(key.to_string()).or_insert(FieldView {
                value: None,
                error: invalid,
            });
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&FieldView> {
        self.entries.get(name)
    }

    /// Value of a field, if present
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.get(name).and_then(|view| view.value.as_ref())
    }

    /// Error flag of a field or validation key, false when unknown
    pub fn error(&self, name: &str) -> bool {
        self.get(name).is_some_and(|view| view.error)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldView)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
