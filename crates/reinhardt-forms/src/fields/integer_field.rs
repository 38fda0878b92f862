//! Integer field with optional bounds

use crate::field::{FieldError, FieldResult, FormField, Widget, submitted_str};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct IntegerField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub widget: Widget,
	pub min_value: Option<i64>,
	pub max_value: Option<i64>,
}

impl IntegerField {
	/// Create a new optional IntegerField
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{FormField, IntegerField};
	/// use serde_json::json;
	///
	/// let field = IntegerField::new("min");
	/// assert_eq!(field.clean(Some(&json!("12"))).unwrap(), json!(12));
	/// assert_eq!(field.clean(None).unwrap(), json!(null));
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			required: false,
			widget: Widget::NumberInput,
			min_value: None,
			max_value: None,
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

	pub fn with_min_value(mut self, min_value: i64) -> Self {
		self.min_value = Some(min_value);
		self
	}

	pub fn with_max_value(mut self, max_value: i64) -> Self {
		self.max_value = Some(max_value);
		self
	}
}

impl FormField for IntegerField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		let Some(text) = submitted_str(value)? else {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(Value::Null);
		};

		let number: i64 = text
			.parse()
			.map_err(|_| FieldError::Invalid("Enter a whole number.".to_string()))?;

		if let Some(min) = self.min_value
			&& number < min
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value is greater than or equal to {}.",
				min
			)));
		}
		if let Some(max) = self.max_value
			&& number > max
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value is less than or equal to {}.",
				max
			)));
		}

		Ok(Value::from(number))
	}
}
