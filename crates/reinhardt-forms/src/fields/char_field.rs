//! Character field for text input

use crate::field::{FieldError, FieldResult, FormField, Widget, submitted_str};
use serde_json::Value;

/// Character field with length validation
#[derive(Debug, Clone)]
pub struct CharField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
}

impl CharField {
	/// Create a new optional CharField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::fields::CharField;
	///
	/// let field = CharField::new("q");
	/// assert_eq!(field.name, "q");
	/// assert!(!field.required);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			required: false,
			help_text: None,
			widget: Widget::TextInput,
			max_length: None,
			min_length: None,
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}
}

impl FormField for CharField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		let Some(text) = submitted_str(value)? else {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(Value::String(String::new()));
		};

		// Character count, not byte count, so multi-byte input is measured correctly
		let char_count = text.chars().count();
		if let Some(max_length) = self.max_length
			&& char_count > max_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at most {} characters (it has {})",
				max_length, char_count
			)));
		}

		if let Some(min_length) = self.min_length
			&& char_count < min_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at least {} characters (it has {})",
				min_length, char_count
			)));
		}

		Ok(Value::String(text))
	}
}
