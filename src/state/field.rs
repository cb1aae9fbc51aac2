//! Form field value objects and input conversion

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe field values
///
/// Serialized untagged, so a form reads naturally as JSON:
/// `{"name": "Ada", "age": 36, "newsletter": true, "topics": ["rust"]}`.
/// A cleared numeric input holds NaN, written as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(#[serde(with = "nan_as_null")] f64),
    Text(String),
    /// Multi-checkbox groups and multi-selects
    List(Vec<String>),
}

/// NaN equals NaN so an unchanged cleared number is not seen as a change
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Flag(a), FieldValue::Flag(b)) => a == b,
            (FieldValue::Number(a), FieldValue::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            _ => false,
        }
    }
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the boolean value (returns false for non-flag values)
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    /// Get the list value (returns an empty slice for scalars)
    pub fn as_list(&self) -> &[String] {
        match self {
            FieldValue::List(items) => items,
            _ => &[],
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::List(_))
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Flag(b) => b.to_string(),
            FieldValue::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", *n as i64),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Input element types understood by the change orchestrator and the
/// prop generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    #[default]
    Text,
    Radio,
    Email,
    Password,
    Search,
    Color,
    Tel,
    Url,
    Submit,
    Date,
    Time,
    Week,
    Month,
    #[serde(rename = "datetime-local", alias = "datetimeLocal")]
    DatetimeLocal,
    Number,
    Range,
    Checkbox,
    Select,
}

impl InputKind {
    pub const ALL: [InputKind; 18] = [
        InputKind::Text,
        InputKind::Radio,
        InputKind::Email,
        InputKind::Password,
        InputKind::Search,
        InputKind::Color,
        InputKind::Tel,
        InputKind::Url,
        InputKind::Submit,
        InputKind::Date,
        InputKind::Time,
        InputKind::Week,
        InputKind::Month,
        InputKind::DatetimeLocal,
        InputKind::Number,
        InputKind::Range,
        InputKind::Checkbox,
        InputKind::Select,
    ];

    /// The `type` attribute a host should render
    pub fn html_type(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Radio => "radio",
            Self::Email => "email",
            Self::Password => "password",
            Self::Search => "search",
            Self::Color => "color",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Submit => "submit",
            Self::Date => "date",
            Self::Time => "time",
            Self::Week => "week",
            Self::Month => "month",
            Self::DatetimeLocal => "datetime-local",
            Self::Number => "number",
            Self::Range => "range",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
        }
    }

    /// Map a host-reported `type` string back to a kind.
    /// Unrecognized types behave like text: the raw value passes through.
    pub fn from_html_type(value: &str) -> Self {
        match value {
            "radio" => Self::Radio,
            "email" => Self::Email,
            "password" => Self::Password,
            "search" => Self::Search,
            "color" => Self::Color,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "submit" => Self::Submit,
            "date" => Self::Date,
            "time" => Self::Time,
            "week" => Self::Week,
            "month" => Self::Month,
            "datetime-local" | "datetimeLocal" => Self::DatetimeLocal,
            "number" => Self::Number,
            "range" => Self::Range,
            "checkbox" => Self::Checkbox,
            "select" | "select-one" | "select-multiple" => Self::Select,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.html_type())
    }
}

/// An input-originated change, as reported by the host UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(default)]
    pub checked: bool,
}

impl InputEvent {
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
            checked: false,
        }
    }

    /// Set the checked flag (checkboxes)
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Convert a raw input value into a field value.
///
/// `prior` is the field's current value; for checkboxes its shape decides
/// between group toggling (list) and a plain flag.
pub fn convert(kind: InputKind, value: &str, checked: bool, prior: Option<&FieldValue>) -> FieldValue {
    match kind {
        InputKind::Number | InputKind::Range => FieldValue::Number(parse_int(value)),
        InputKind::Checkbox => match prior {
            Some(FieldValue::List(items)) => {
                let mut items = items.clone();
                if checked {
                    if !items.iter().any(|item| item == value) {
                        items.push(value.to_string());
                    }
                } else {
                    items.retain(|item| item != value);
                }
                FieldValue::List(items)
            }
            _ => FieldValue::Flag(checked),
        },
        _ => FieldValue::Text(value.to_string()),
    }
}

/// Base-10 integer parsing with a numeric prefix rule: leading whitespace
/// and an optional sign are accepted, parsing stops at the first non-digit,
/// and input without any leading digit yields NaN.
pub fn parse_int(value: &str) -> f64 {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return f64::NAN;
    }

    // Fold as f64 so very long inputs saturate instead of overflowing.
    let magnitude = digits
        .bytes()
        .fold(0.0_f64, |acc, b| acc * 10.0 + f64::from(b - b'0'));

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
