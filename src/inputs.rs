//! Input-prop generators
//!
//! Each generator takes a field name and returns a ready-to-bind prop bag
//! built from the current fields view. Hosts render the bag and feed
//! [`InputProps::change`] / [`InputProps::toggle`] back into
//! `FormAccessor::apply_input_event`.

use crate::deprecation;
use crate::handlers::SubmitOptions;
use crate::state::{FieldValue, FieldsView, InputEvent, InputKind};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Hook that overrides or augments a generated prop bag
pub type ExtendProps = Arc<dyn Fn(InputProps) -> InputProps + Send + Sync>;

pub(crate) const GENERATE_PROPS: &str = "generate-props";

/// Pick the prop hook to apply. `extend` wins; falling back to the deprecated
/// `generate` alias logs a one-time notice.
pub(crate) fn prefer_extend<'a>(
    extend: Option<&'a ExtendProps>,
    generate: Option<&'a ExtendProps>,
) -> Option<&'a ExtendProps> {
    if extend.is_some() {
        return extend;
    }
    if generate.is_some() {
        deprecation::warn_once(GENERATE_PROPS, "generate_props is deprecated; use extend_props");
    }
    generate
}

/// Properties of one rendered input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputProps {
    pub id: String,
    pub name: String,
    pub value: FieldValue,
    /// Set for checkboxes and radios
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub error: bool,
    /// Free-form extra attributes, usually added by an extend hook
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl InputProps {
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Change event carrying a new raw value
    pub fn change(&self, raw: impl Into<String>) -> InputEvent {
        InputEvent::new(self.name.clone(), raw, self.kind).checked(self.checked.unwrap_or(false))
    }

    /// Checkbox or radio event for this option being (un)checked
    pub fn toggle(&self, checked: bool) -> InputEvent {
        InputEvent::new(self.name.clone(), self.value.display_value(), self.kind).checked(checked)
    }
}

/// Clickable submit trigger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitProps {
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_name: Option<String>,
}

impl SubmitProps {
    /// Options to pass to `handle_submit` when triggered
    pub fn options(&self) -> SubmitOptions {
        SubmitOptions {
            form_name: self.form_name.clone(),
        }
    }
}

/// Per-call generator options
#[derive(Clone, Default)]
pub struct InputOptions {
    /// Option value for radios, checkbox groups and fixed-value inputs
    pub value: Option<String>,
    pub extend_props: Option<ExtendProps>,
    /// Deprecated alias of `extend_props`
    pub generate_props: Option<ExtendProps>,
}

impl InputOptions {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
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

    fn hook(&self) -> Option<&ExtendProps> {
        prefer_extend(self.extend_props.as_ref(), self.generate_props.as_ref())
    }
}

impl fmt::Debug for InputOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputOptions")
            .field("value", &self.value)
            .field("extend_props", &self.extend_props.is_some())
            .field("generate_props", &self.generate_props.is_some())
            .finish()
    }
}

macro_rules! plain_inputs {
    ($($method:ident => $kind:ident),* $(,)?) => {
        $(
            pub fn $method(&self, name: &str) -> InputProps {
                self.input(InputKind::$kind, name, InputOptions::default())
            }
        )*
    };
}

/// Generators bound to one snapshot of a form's fields
pub struct Inputs<'a> {
    fields: FieldsView,
    extend: Option<&'a ExtendProps>,
}

impl<'a> Inputs<'a> {
    pub fn new(fields: FieldsView, extend: Option<&'a ExtendProps>) -> Self {
        Self { fields, extend }
    }

    plain_inputs! {
        text => Text,
        email => Email,
        password => Password,
        search => Search,
        color => Color,
        tel => Tel,
        url => Url,
        date => Date,
        time => Time,
        week => Week,
        month => Month,
        datetime_local => DatetimeLocal,
        number => Number,
        range => Range,
        select => Select,
    }

    /// One option of a radio group; the id is the option value
    pub fn radio(&self, name: &str, value: &str) -> InputProps {
        self.input(InputKind::Radio, name, InputOptions::value(value))
    }

    /// Checkbox bound to a flag field
    pub fn checkbox(&self, name: &str) -> InputProps {
        self.input(InputKind::Checkbox, name, InputOptions::default())
    }

    /// One option of a checkbox group bound to a list field
    pub fn checkbox_option(&self, name: &str, value: &str) -> InputProps {
        self.input(InputKind::Checkbox, name, InputOptions::value(value))
    }

    pub fn submit(&self, options: SubmitOptions) -> SubmitProps {
        SubmitProps {
            kind: InputKind::Submit,
            form_name: options.form_name,
        }
    }

    /// Generate props for any kind with explicit options
    pub fn input(&self, kind: InputKind, name: &str, options: InputOptions) -> InputProps {
        let field = self.fields.value(name).cloned().unwrap_or_default();

        let (id, value, checked) = match (kind, options.value.as_deref()) {
            (InputKind::Radio, option) => {
                let option = option.unwrap_or_default();
                let checked = field.display_value() == option;
                (option.to_string(), FieldValue::from(option), Some(checked))
            }
            (InputKind::Checkbox, Some(option)) => {
                let checked = field.as_list().iter().any(|item| item == option);
                (option.to_string(), FieldValue::from(option), Some(checked))
            }
            (InputKind::Checkbox, None) => {
                let checked = field.as_flag();
                (name.to_string(), field, Some(checked))
            }
            (_, Some(option)) => (name.to_string(), FieldValue::from(option), None),
            (_, None) => (name.to_string(), field, None),
        };

        let mut props = InputProps {
            id,
            name: name.to_string(),
            value,
            checked,
            kind,
            error: self.fields.error(name),
            attributes: IndexMap::new(),
        };

        if let Some(extend) = self.extend {
            props = extend(props);
        }
        if let Some(hook) = options.hook() {
            props = hook(props);
        }
        props
    }

    pub fn fields(&self) -> &FieldsView {
        &self.fields
    }
}
