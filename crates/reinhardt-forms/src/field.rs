//! Field trait, widgets and field-level errors

use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// Error raised while cleaning a single field value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
	/// A required field received no value
	#[error("This field is required.")]
	Required(String),
	/// The submitted value could not be parsed into the field's type
	#[error("{0}")]
	Invalid(String),
	/// The value parsed but failed a validation rule
	#[error("{0}")]
	Validation(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Widget used to render a field as HTML
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
	TextInput,
	NumberInput,
	HiddenInput,
	/// Drop-down with `(value, label)` pairs
	Select { choices: Vec<(String, String)> },
}

impl Widget {
	pub fn input_type(&self) -> Option<&'static str> {
		match self {
			Widget::TextInput => Some("text"),
			Widget::NumberInput => Some("number"),
			Widget::HiddenInput => Some("hidden"),
			Widget::Select { .. } => None,
		}
	}
}

/// A single form field
///
/// Fields are stateless descriptions: they know how to clean a submitted value
/// and which widget renders them, but never hold submitted data themselves.
pub trait FormField: Debug + Send + Sync {
	fn name(&self) -> &str;

	fn label(&self) -> Option<&str> {
		None
	}

	fn required(&self) -> bool {
		false
	}

	fn help_text(&self) -> Option<&str> {
		None
	}

	fn widget(&self) -> &Widget;

	fn initial(&self) -> Option<&Value> {
		None
	}

	/// Convert a submitted value into its cleaned representation
	///
	/// `None` means the parameter was absent from the submission.
	fn clean(&self, value: Option<&Value>) -> FieldResult<Value>;
}

/// Render a JSON value the way it appears inside an HTML attribute or text node
///
/// # Examples
///
/// ```
/// use reinhardt_forms::field::value_to_display;
/// use serde_json::json;
///
/// assert_eq!(value_to_display(&json!(null)), "");
/// assert_eq!(value_to_display(&json!("abc")), "abc");
/// assert_eq!(value_to_display(&json!(42)), "42");
/// assert_eq!(value_to_display(&json!(true)), "true");
/// ```
pub fn value_to_display(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		other => other.to_string(),
	}
}

/// Extract a trimmed string from a submitted value, treating blanks as absent
pub(crate) fn submitted_str(value: Option<&Value>) -> FieldResult<Option<String>> {
	match value {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(s)) => {
			let trimmed = s.trim();
			if trimmed.is_empty() {
				Ok(None)
			} else {
				Ok(Some(trimmed.to_string()))
			}
		}
		Some(Value::Number(n)) => Ok(Some(n.to_string())),
		Some(Value::Bool(b)) => Ok(Some(b.to_string())),
		Some(_) => Err(FieldError::Invalid("Enter a single value.".to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(None, None)]
	#[case(Some(json!(null)), None)]
	#[case(Some(json!("   ")), None)]
	#[case(Some(json!(" x ")), Some("x"))]
	#[case(Some(json!(7)), Some("7"))]
	fn test_submitted_str(#[case] input: Option<Value>, #[case] expected: Option<&str>) {
		let result = submitted_str(input.as_ref()).unwrap();
		assert_eq!(result.as_deref(), expected);
	}

	#[rstest]
	fn test_submitted_str_rejects_arrays() {
		let value = json!(["a", "b"]);
		assert!(matches!(
			submitted_str(Some(&value)),
			Err(FieldError::Invalid(_))
		));
	}

	#[rstest]
	fn test_widget_input_type() {
		assert_eq!(Widget::TextInput.input_type(), Some("text"));
		assert_eq!(Widget::Select { choices: vec![] }.input_type(), None);
	}
}
