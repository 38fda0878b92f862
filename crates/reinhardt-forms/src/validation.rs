//! Structured validation failure returned by [`Form::validate`](crate::Form::validate)

use crate::form::Form;
use std::collections::HashMap;

/// Submitted data failed validation
///
/// Carries the form that failed, bound to the submitted values, so callers can
/// show the input again together with the field-level errors.
#[derive(Debug, thiserror::Error)]
#[error("form validation failed: {}", summarize(.form.errors()))]
pub struct ValidationFailure {
	form: Form,
}

impl ValidationFailure {
	pub fn new(form: Form) -> Self {
		Self { form }
	}

	pub fn form(&self) -> &Form {
		&self.form
	}

	pub fn into_form(self) -> Form {
		self.form
	}

	/// Errors keyed by field name (`_all` for form-level errors)
	pub fn field_errors(&self) -> &HashMap<String, Vec<String>> {
		self.form.errors()
	}

	/// Render the failed form with submitted values and inline errors
	pub fn render(&self) -> String {
		self.form.render_bound()
	}
}

fn summarize(errors: &HashMap<String, Vec<String>>) -> String {
	let mut fields: Vec<_> = errors.iter().collect();
	fields.sort_by(|a, b| a.0.cmp(b.0));
	fields
		.into_iter()
		.map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
		.collect::<Vec<_>>()
		.join("; ")
}
