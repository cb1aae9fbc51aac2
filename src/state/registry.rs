//! Forms registry: every named form held by a shared context

use super::form::Form;
use indexmap::IndexMap;

/// Live forms plus the last initial value seen for each of them
#[derive(Debug, Clone, Default)]
pub struct FormsRegistry {
    live: IndexMap<String, Form>,
    /// Last applied initial values, compared against on re-initialization
    initial: IndexMap<String, Form>,
}

impl FormsRegistry {
    pub fn new(initial_states: IndexMap<String, Form>) -> Self {
        Self {
            live: initial_states.clone(),
            initial: initial_states,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Form> {
        self.live.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.live.contains_key(name)
    }

    /// Form names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.live.keys().map(String::as_str)
    }

    /// Merge `patch` into the named form. An unknown name registers the
    /// patch as a new form.
    pub fn apply(&mut self, name: &str, patch: &Form) {
        let next = match self.live.get(name) {
            Some(current) => current.apply(patch),
            None => patch.clone(),
        };
        self.live.insert(name.to_string(), next);
    }

    /// Add a form that was not part of the initial states, recording `initial`
    /// as its last seen initial value. An already registered name is left
    /// untouched.
    ///
    /// Returns true when the form was added.
    pub fn register(&mut self, name: &str, initial: &Form) -> bool {
        if self.live.contains_key(name) {
            return false;
        }
        self.initial.insert(name.to_string(), initial.clone());
        self.live.insert(name.to_string(), initial.clone());
        true
    }

    /// Wholesale replace the named form when `initial` differs from the last
    /// initial value applied for it. In-progress edits are discarded.
    ///
    /// Returns true when a replacement happened.
    pub fn replace(&mut self, name: &str, initial: &Form) -> bool {
        if self.initial.get(name) == Some(initial) {
            return false;
        }
        self.initial.insert(name.to_string(), initial.clone());
        self.live.insert(name.to_string(), initial.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;
    use pretty_assertions::assert_eq;

    fn registry() -> FormsRegistry {
        let mut states = IndexMap::new();
        states.insert("form".to_string(), Form::new().with("input", ""));
        FormsRegistry::new(states)
    }

    #[test]
    fn test_new_exposes_initial_states() {
        let registry = registry();
        assert_eq!(registry.get("form"), Some(&Form::new().with("input", "")));
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_apply_merges_into_existing_form() {
        let mut registry = registry();
        registry.apply("form", &Form::new().with("input", "x"));
        assert_eq!(
            registry.get("form").and_then(|f| f.get("input")),
            Some(&FieldValue::from("x"))
        );
    }

    #[test]
    fn test_apply_unknown_name_registers_form() {
        let mut registry = registry();
        registry.apply("login", &Form::new().with("user", "ada"));
        assert!(registry.contains("login"));
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["form", "login"]);
    }

    #[test]
    fn test_register_records_initial_value() {
        let mut registry = registry();
        assert!(registry.register("login", &Form::new().with("user", "")));
        registry.apply("login", &Form::new().with("user", "typed"));

        let replaced = registry.replace("login", &Form::new().with("user", ""));

        assert!(!replaced);
        assert_eq!(registry.get("login"), Some(&Form::new().with("user", "typed")));
    }

    #[test]
    fn test_replace_with_same_cleared_number_keeps_edits() {
        let mut states = IndexMap::new();
        states.insert("form".to_string(), Form::new().with("age", f64::NAN).with("name", ""));
        let mut registry = FormsRegistry::new(states);
        registry.apply("form", &Form::new().with("name", "ada"));

        assert!(!registry.replace("form", &Form::new().with("age", f64::NAN).with("name", "")));
        assert_eq!(
            registry.get("form").and_then(|f| f.get("name")),
            Some(&FieldValue::from("ada"))
        );
    }

    #[test]
    fn test_register_existing_name_is_noop() {
        let mut registry = registry();
        registry.apply("form", &Form::new().with("input", "edited"));

        assert!(!registry.register("form", &Form::new().with("input", "other")));
        assert_eq!(registry.get("form"), Some(&Form::new().with("input", "edited")));
    }

    #[test]
    fn test_replace_with_changed_initial_discards_edits() {
        let mut registry = registry();
        registry.apply("form", &Form::new().with("input", "edited"));

        let replaced = registry.replace("form", &Form::new().with("input", "VALUE"));

        assert!(replaced);
        assert_eq!(registry.get("form"), Some(&Form::new().with("input", "VALUE")));
    }

    #[test]
    fn test_replace_with_same_initial_keeps_edits() {
        let mut registry = registry();
        registry.apply("form", &Form::new().with("input", "edited"));

        // Deep-equal to the last initial value, not to the live value
        let replaced = registry.replace("form", &Form::new().with("input", ""));

        assert!(!replaced);
        assert_eq!(registry.get("form"), Some(&Form::new().with("input", "edited")));
    }
}
