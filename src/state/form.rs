//! A single form: field name to value, in declaration order

use super::field::FieldValue;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field values of one form.
///
/// A `Form` doubles as a patch: a partial mapping merged into another form
/// with [`Form::apply`]. Key order is the declaration order of the form's
/// shape and drives the order of reported validation keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Form {
    fields: IndexMap<String, FieldValue>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `patch` over this form, returning the new snapshot.
    ///
    /// Keys absent from `patch` keep their value; keys in `patch` take the
    /// patch's value. Keys new to the form are appended. `self` is untouched.
    pub fn apply(&self, patch: &Form) -> Form {
        let mut next = self.clone();
        for (name, value) in &patch.fields {
            next.fields.insert(name.clone(), value.clone());
        }
        next
    }

    /// Names in `patch` that this form does not declare
    pub fn unknown_names(&self, patch: &Form) -> Vec<String> {
        patch
            .names()
            .filter(|name| !self.contains(name))
            .map(str::to_string)
            .collect()
    }

    // Validator helpers: lenient reads that never fail, so validator
    // factories can be invoked with partial or placeholder forms.

    /// Text value of a field, empty when missing or not text
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    /// Numeric value of a field; text values are parsed as integers
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => {
                let n = super::field::parse_int(s);
                (!n.is_nan()).then_some(n)
            }
            _ => None,
        }
    }

    /// Boolean value of a field, false when missing
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::as_flag)
    }

    /// List value of a field, empty when missing
    pub fn list(&self, name: &str) -> &[String] {
        self.get(name).map(FieldValue::as_list).unwrap_or(&[])
    }

    /// ISO `YYYY-MM-DD` date held in a text field
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.text(name), "%Y-%m-%d").ok()
    }
}

impl<K, V> FromIterator<(K, V)> for Form
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Form {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = indexmap::map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
