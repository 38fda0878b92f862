use crate::field::{FormField, Widget, value_to_display};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

/// BoundField represents a field bound to form data
pub struct BoundField<'a> {
	field: &'a dyn FormField,
	data: Option<&'a Value>,
	errors: &'a [String],
	prefix: &'a str,
}

impl<'a> BoundField<'a> {
	/// Bind a field to its value and errors
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("name"));
	/// let data = serde_json::json!("John");
	///
	/// let bound = BoundField::new(field.as_ref(), Some(&data), &[], "");
	/// assert_eq!(bound.name(), "name");
	/// assert_eq!(bound.value(), Some(&data));
	/// ```
	pub fn new(
		field: &'a dyn FormField,
		data: Option<&'a Value>,
		errors: &'a [String],
		prefix: &'a str,
	) -> Self {
		Self {
			field,
			data,
			errors,
			prefix,
		}
	}

	pub fn name(&self) -> &str {
		self.field.name()
	}

	/// Get the HTML name attribute (with prefix)
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("min"));
	///
	/// let bound = BoundField::new(field.as_ref(), None, &[], "");
	/// assert_eq!(bound.html_name(), "min");
	///
	/// let bound_prefixed = BoundField::new(field.as_ref(), None, &[], "price");
	/// assert_eq!(bound_prefixed.html_name(), "price-min");
	/// ```
	pub fn html_name(&self) -> String {
		if self.prefix.is_empty() {
			self.field.name().to_string()
		} else {
			format!("{}-{}", self.prefix, self.field.name())
		}
	}

	pub fn id_for_label(&self) -> String {
		format!("id_{}", self.html_name())
	}

	/// Label text, falling back to a humanized field name
	pub fn label(&self) -> String {
		match self.field.label() {
			Some(label) => label.to_string(),
			None => humanize(self.field.name()),
		}
	}

	pub fn value(&self) -> Option<&Value> {
		self.data.or_else(|| self.field.initial())
	}

	pub fn errors(&self) -> &[String] {
		self.errors
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	pub fn widget(&self) -> &Widget {
		self.field.widget()
	}

	/// Render label, widget, errors and help text as one form group
	pub fn render(&self) -> String {
		let mut html = String::new();
		let group_class = if self.has_errors() {
			"form-group has-error"
		} else {
			"form-group"
		};
		html.push_str(&format!(r#"<div class="{}">"#, group_class));

		if !matches!(self.widget(), Widget::HiddenInput) {
			html.push_str(&format!(
				r#"<label for="{}">{}</label>"#,
				encode_double_quoted_attribute(&self.id_for_label()),
				encode_text(&self.label())
			));
		}

		html.push_str(&self.render_widget());

		if self.has_errors() {
			html.push_str(r#"<ul class="errorlist">"#);
			for error in self.errors {
				html.push_str(&format!("<li>{}</li>", encode_text(error)));
			}
			html.push_str("</ul>");
		}

		if let Some(help) = self.field.help_text() {
			html.push_str(&format!(
				r#"<small class="help-text">{}</small>"#,
				encode_text(help)
			));
		}

		html.push_str("</div>");
		html
	}

	fn render_widget(&self) -> String {
		let current = self.value().map(value_to_display).unwrap_or_default();
		let name = self.html_name();
		let id = self.id_for_label();

		match self.widget() {
			Widget::Select { choices } => {
				let mut html = format!(
					r#"<select name="{}" id="{}">"#,
					encode_double_quoted_attribute(&name),
					encode_double_quoted_attribute(&id)
				);
				for (value, label) in choices {
					let selected = if *value == current { " selected" } else { "" };
					html.push_str(&format!(
						r#"<option value="{}"{}>{}</option>"#,
						encode_double_quoted_attribute(value),
						selected,
						encode_text(label)
					));
				}
				html.push_str("</select>");
				html
			}
			widget => format!(
				r#"<input type="{}" name="{}" id="{}" value="{}">"#,
				widget.input_type().unwrap_or("text"),
				encode_double_quoted_attribute(&name),
				encode_double_quoted_attribute(&id),
				encode_double_quoted_attribute(&current)
			),
		}
	}
}

fn humanize(name: &str) -> String {
	let spaced = name.replace(['_', '-'], " ");
	let mut chars = spaced.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
