//! Form processing and validation for Reinhardt
//!
//! A small form layer used by list filters:
//! - fields that clean submitted query parameters into JSON values
//! - forms that bind prefixed parameters, validate them and render HTML
//! - [`ValidationFailure`], which keeps the failed form so it can be shown
//!   again with inline errors
//!
//! Absent parameters are never an error for optional fields; they clean to
//! `null` (or an empty string for text fields).

pub mod bound_field;
pub mod field;
pub mod fields;
pub mod form;
pub mod validation;

pub use bound_field::BoundField;
pub use field::{FieldError, FieldResult, FormField, Widget};
pub use fields::{CharField, ChoiceField, EMPTY_LABEL, IntegerField, NullBooleanField};
pub use form::{ALL_FIELDS_KEY, FieldSchema, Form, FormError, FormResult};
pub use validation::ValidationFailure;
