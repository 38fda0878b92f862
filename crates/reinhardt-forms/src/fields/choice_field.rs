//! Single-selection fields backed by a fixed list of choices

use crate::field::{FieldError, FieldResult, FormField, Widget, submitted_str};
use serde_json::Value;

/// Label shown for the "nothing selected" option
pub const EMPTY_LABEL: &str = "---------";

/// Select one value out of a list of `(value, label)` choices
///
/// An absent or blank submission cleans to `null` unless the field is required.
///
/// # Examples
///
/// ```
/// use reinhardt_forms::{ChoiceField, FormField};
/// use serde_json::json;
///
/// let field = ChoiceField::new("status")
///     .add_choice("draft", "Draft")
///     .add_choice("published", "Published");
///
/// assert_eq!(field.clean(Some(&json!("draft"))).unwrap(), json!("draft"));
/// assert_eq!(field.clean(None).unwrap(), json!(null));
/// assert!(field.clean(Some(&json!("deleted"))).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ChoiceField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub choices: Vec<(String, String)>,
	pub empty_label: Option<String>,
	widget: Widget,
}

impl ChoiceField {
	pub fn new(name: impl Into<String>) -> Self {
		let mut field = Self {
			name: name.into(),
			label: None,
			required: false,
			choices: Vec::new(),
			empty_label: Some(EMPTY_LABEL.to_string()),
			widget: Widget::Select {
				choices: Vec::new(),
			},
		};
		field.rebuild_widget();
		field
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self.rebuild_widget();
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn add_choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
		self.choices.push((value.into(), label.into()));
		self.rebuild_widget();
		self
	}

	pub fn with_choices(mut self, choices: Vec<(String, String)>) -> Self {
		self.choices = choices;
		self.rebuild_widget();
		self
	}

	pub fn with_empty_label(mut self, label: Option<String>) -> Self {
		self.empty_label = label;
		self.rebuild_widget();
		self
	}

	pub fn valid_value(&self, value: &str) -> bool {
		self.choices.iter().any(|(v, _)| v == value)
	}

	fn rebuild_widget(&mut self) {
		let mut options = Vec::with_capacity(self.choices.len() + 1);
		if !self.required
			&& let Some(empty) = &self.empty_label
		{
			options.push((String::new(), empty.clone()));
		}
		options.extend(self.choices.iter().cloned());
		self.widget = Widget::Select { choices: options };
	}
}

impl FormField for ChoiceField {
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

		if !self.valid_value(&text) {
			return Err(FieldError::Validation(format!(
				"Select a valid choice. {} is not one of the available choices.",
				text
			)));
		}
		Ok(Value::String(text))
	}
}

/// Tri-state boolean select: unknown, yes, no
///
/// Blank means "unknown" and cleans to `null`.
///
/// # Examples
///
/// ```
/// use reinhardt_forms::{FormField, NullBooleanField};
/// use serde_json::json;
///
/// let field = NullBooleanField::new("admin");
/// assert_eq!(field.clean(Some(&json!("true"))).unwrap(), json!(true));
/// assert_eq!(field.clean(Some(&json!("0"))).unwrap(), json!(false));
/// assert_eq!(field.clean(Some(&json!(""))).unwrap(), json!(null));
/// assert!(field.clean(Some(&json!("maybe"))).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NullBooleanField {
	pub name: String,
	pub label: Option<String>,
	widget: Widget,
}

impl NullBooleanField {
	pub fn new(name: impl Into<String>) -> Self {
		Self::with_labels(name, "Unknown", "Yes", "No")
	}

	/// Create the field with custom option labels
	pub fn with_labels(
		name: impl Into<String>,
		unknown: impl Into<String>,
		yes: impl Into<String>,
		no: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			label: None,
			widget: Widget::Select {
				choices: vec![
					(String::new(), unknown.into()),
					("true".to_string(), yes.into()),
					("false".to_string(), no.into()),
				],
			},
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

impl FormField for NullBooleanField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn clean(&self, value: Option<&Value>) -> FieldResult<Value> {
		let Some(text) = submitted_str(value)? else {
			return Ok(Value::Null);
		};
		match text.to_ascii_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
			"false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
			_ => Err(FieldError::Validation(format!(
				"Select a valid choice. {} is not one of the available choices.",
				text
			))),
		}
	}
}
