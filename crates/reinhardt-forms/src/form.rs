use crate::bound_field::BoundField;
use crate::field::{FieldError, FormField, Widget};
use crate::validation::ValidationFailure;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Field error in {field}: {error}")]
	Field { field: String, error: FieldError },
	#[error("Validation error: {0}")]
	Validation(String),
}

pub type FormResult<T> = Result<T, FormError>;

type CleanFunction = Box<dyn Fn(&HashMap<String, Value>) -> FormResult<()> + Send + Sync>;

/// Special key for form-level (non-field-specific) errors.
pub const ALL_FIELDS_KEY: &str = "_all";

/// Structural description of one field, used to compare forms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
	pub name: String,
	pub html_name: String,
	pub label: Option<String>,
	pub required: bool,
	pub widget: Widget,
}

/// A set of fields that can be bound to submitted data, validated and rendered
pub struct Form {
	fields: Vec<Box<dyn FormField>>,
	/// Raw submitted data keyed by prefixed HTML name
	data: HashMap<String, Value>,
	cleaned: HashMap<String, Value>,
	errors: HashMap<String, Vec<String>>,
	is_bound: bool,
	clean_functions: Vec<CleanFunction>,
	prefix: String,
	css_class: String,
	submit_label: String,
}

impl Form {
	/// Create a new empty form
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Form;
	///
	/// let form = Form::new();
	/// assert!(!form.is_bound());
	/// assert!(form.fields().is_empty());
	/// ```
	pub fn new() -> Self {
		Self::with_prefix(String::new())
	}

	/// Create a new form whose HTML names carry `prefix`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Form;
	///
	/// let form = Form::with_prefix("price");
	/// assert_eq!(form.prefix(), "price");
	/// assert_eq!(form.add_prefix_to_field_name("min"), "price-min");
	/// ```
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			fields: vec![],
			data: HashMap::new(),
			cleaned: HashMap::new(),
			errors: HashMap::new(),
			is_bound: false,
			clean_functions: vec![],
			prefix: prefix.into(),
			css_class: "filter-form".to_string(),
			submit_label: "Filter".to_string(),
		}
	}

	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
	}

	/// Builder-style variant of [`Form::add_field`]
	pub fn field(mut self, field: impl FormField + 'static) -> Self {
		self.fields.push(Box::new(field));
		self
	}

	pub fn set_css_class(&mut self, css_class: impl Into<String>) {
		self.css_class = css_class.into();
	}

	pub fn set_submit_label(&mut self, label: impl Into<String>) {
		self.submit_label = label.into();
	}

	/// Bind form data for validation; keys are prefixed HTML names
	pub fn bind(&mut self, data: HashMap<String, Value>) {
		self.data = data;
		self.is_bound = true;
	}

	/// Bind string parameters as submitted by a query string or POST body
	///
	/// Only parameters belonging to this form's fields are kept. A repeated
	/// parameter binds its first value.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{CharField, Form};
	///
	/// let mut form = Form::with_prefix("f").field(CharField::new("q"));
	/// form.bind_params([("f-q", "alice"), ("page", "2")]);
	/// assert!(form.is_bound());
	/// assert_eq!(form.data().len(), 1);
	/// ```
	pub fn bind_params<I, K, V>(&mut self, params: I)
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let names: Vec<String> = self
			.fields
			.iter()
			.map(|f| self.add_prefix_to_field_name(f.name()))
			.collect();
		let mut data = HashMap::new();
		for (k, v) in params {
			let k = k.as_ref();
			if names.iter().any(|n| n == k) {
				data.entry(k.to_string())
					.or_insert_with(|| Value::String(v.as_ref().to_string()));
			}
		}
		self.bind(data);
	}

	/// Validate the form and return true if all fields are valid
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{Form, IntegerField};
	/// use serde_json::json;
	///
	/// let mut form = Form::new().field(IntegerField::new("min"));
	/// form.bind_params([("min", "3")]);
	///
	/// assert!(form.is_valid());
	/// assert_eq!(form.cleaned_data().get("min"), Some(&json!(3)));
	/// ```
	pub fn is_valid(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.errors.clear();
		self.cleaned.clear();

		for field in &self.fields {
			let html_name = self.add_prefix_to_field_name(field.name());
			match field.clean(self.data.get(&html_name)) {
				Ok(cleaned) => {
					self.cleaned.insert(field.name().to_string(), cleaned);
				}
				Err(e) => {
					self.errors
						.entry(field.name().to_string())
						.or_default()
						.push(e.to_string());
				}
			}
		}

		// Cross-field checks only run on fully cleaned data
		if self.errors.is_empty() {
			for clean_fn in &self.clean_functions {
				if let Err(e) = clean_fn(&self.cleaned) {
					match e {
						FormError::Field { field, error } => {
							self.errors.entry(field).or_default().push(error.to_string());
						}
						FormError::Validation(msg) => {
							self.errors
								.entry(ALL_FIELDS_KEY.to_string())
								.or_default()
								.push(msg);
						}
					}
				}
			}
		}

		self.errors.is_empty()
	}

	/// Validate and hand back either the cleaned data or a structured failure
	///
	/// The failure owns this form so it can be rendered with the submitted
	/// values and inline errors.
	pub fn validate(mut self) -> Result<HashMap<String, Value>, ValidationFailure> {
		if !self.is_bound {
			self.bind(HashMap::new());
		}
		if self.is_valid() {
			Ok(std::mem::take(&mut self.cleaned))
		} else {
			Err(ValidationFailure::new(self))
		}
	}

	pub fn add_clean_function<F>(&mut self, f: F)
	where
		F: Fn(&HashMap<String, Value>) -> FormResult<()> + Send + Sync + 'static,
	{
		self.clean_functions.push(Box::new(f));
	}

	pub fn cleaned_data(&self) -> &HashMap<String, Value> {
		&self.cleaned
	}

	pub fn data(&self) -> &HashMap<String, Value> {
		&self.data
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	pub fn non_field_errors(&self) -> &[String] {
		self.errors
			.get(ALL_FIELDS_KEY)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn FormField> {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.map(|f| f.as_ref())
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn add_prefix_to_field_name(&self, field_name: &str) -> String {
		if self.prefix.is_empty() {
			field_name.to_string()
		} else {
			format!("{}-{}", self.prefix, field_name)
		}
	}

	/// Describe the form's fields in order
	pub fn schema(&self) -> Vec<FieldSchema> {
		self.fields
			.iter()
			.map(|f| FieldSchema {
				name: f.name().to_string(),
				html_name: self.add_prefix_to_field_name(f.name()),
				label: f.label().map(str::to_string),
				required: f.required(),
				widget: f.widget().clone(),
			})
			.collect()
	}

	pub fn get_bound_field<'a>(&'a self, name: &str) -> Option<BoundField<'a>> {
		let field = self.get_field(name)?;
		let html_name = self.add_prefix_to_field_name(name);
		Some(BoundField::new(
			field,
			self.data.get(&html_name),
			self.field_errors(name),
			&self.prefix,
		))
	}

	/// Render the form showing `values`, keyed by field name
	///
	/// This is the clean rendering used after successful validation.
	pub fn render(&self, values: &HashMap<String, Value>) -> String {
		let groups = self.fields.iter().map(|field| {
			BoundField::new(
				field.as_ref(),
				values.get(field.name()),
				self.field_errors(field.name()),
				&self.prefix,
			)
			.render()
		});
		self.wrap(groups)
	}

	/// Render the form with the raw submitted data and any errors
	pub fn render_bound(&self) -> String {
		let groups = self.fields.iter().map(|field| {
			let html_name = self.add_prefix_to_field_name(field.name());
			BoundField::new(
				field.as_ref(),
				self.data.get(&html_name),
				self.field_errors(field.name()),
				&self.prefix,
			)
			.render()
		});
		self.wrap(groups)
	}

	fn field_errors(&self, name: &str) -> &[String] {
		self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	fn wrap(&self, groups: impl Iterator<Item = String>) -> String {
		let mut html = format!(
			r#"<form method="get" class="{}">"#,
			encode_double_quoted_attribute(&self.css_class)
		);
		let non_field = self.non_field_errors();
		if !non_field.is_empty() {
			html.push_str(r#"<ul class="errorlist nonfield">"#);
			for error in non_field {
				html.push_str(&format!("<li>{}</li>", encode_text(error)));
			}
			html.push_str("</ul>");
		}
		for group in groups {
			html.push_str(&group);
		}
		html.push_str(&format!(
			r#"<button type="submit">{}</button></form>"#,
			encode_text(&self.submit_label)
		));
		html
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Form {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Form")
			.field("prefix", &self.prefix)
			.field("fields", &self.fields)
			.field("is_bound", &self.is_bound)
			.field("errors", &self.errors)
			.finish_non_exhaustive()
	}
}
