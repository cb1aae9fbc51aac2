//! Field state store
//!
//! Field values, forms, the registry of named forms, and the derived view
//! a host renders from.

mod field;
mod form;
mod registry;
mod view;

pub use field::{convert, parse_int, FieldValue, InputEvent, InputKind};
pub use form::Form;
pub use registry::FormsRegistry;
pub use view::{ErrorMap, FieldView, FieldsView};
