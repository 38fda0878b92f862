use super::{Filter, FilterParams, bind_request, cleaned, config_from_value};
use crate::context::FilterContext;
use crate::error::{ListingError, ListingResult};
use crate::query::{Predicate, Query};
use crate::request::Request;
use reinhardt_forms::field::value_to_display;
use reinhardt_forms::{ChoiceField, Form};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration of a [`ChoiceFilter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChoiceFilterConfig {
	pub field: String,
	#[serde(default)]
	pub title: Option<String>,
	/// Query parameter name, the field name by default
	#[serde(default)]
	pub param: Option<String>,
	/// `(value, label)` pairs
	pub choices: Vec<(String, String)>,
	/// Label of the "no filter" option; `None` uses the form default
	#[serde(default)]
	pub empty_label: Option<String>,
}

impl ChoiceFilterConfig {
	pub fn new(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: None,
			param: None,
			choices: Vec::new(),
			empty_label: None,
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
		self.choices.push((value.into(), label.into()));
		self
	}
}

/// Equality filter over a fixed list of values
///
/// # Examples
///
/// ```
/// use reinhardt_crud::filter::ChoiceFilter;
/// use serde_json::json;
///
/// let filter = ChoiceFilter::from_value(json!({
///     "field": "status",
///     "choices": [["draft", "Draft"], ["published", "Published"]],
/// }))
/// .unwrap();
/// assert_eq!(filter.config().choices.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ChoiceFilter {
	config: ChoiceFilterConfig,
}

impl ChoiceFilter {
	pub fn new(config: ChoiceFilterConfig) -> ListingResult<Self> {
		if config.choices.is_empty() {
			return Err(ListingError::Config(format!(
				"choice filter '{}' has no choices",
				config.field
			)));
		}
		Ok(Self { config })
	}

	pub fn from_value(value: Value) -> ListingResult<Self> {
		Self::new(config_from_value(value)?)
	}

	pub fn param(&self) -> &str {
		self.config.param.as_deref().unwrap_or(&self.config.field)
	}

	pub fn config(&self) -> &ChoiceFilterConfig {
		&self.config
	}
}

impl<Q: Query> Filter<Q> for ChoiceFilter {
	fn name(&self) -> &str {
		self.param()
	}

	fn title(&self) -> Option<&str> {
		self.config.title.as_deref()
	}

	fn create_form(&self, request: &dyn Request, _filter_context: &FilterContext) -> Form {
		let mut field = ChoiceField::new(self.param()).with_choices(self.config.choices.clone());
		if let Some(label) = &self.config.empty_label {
			field = field.with_empty_label(Some(label.clone()));
		}
		if let Some(title) = &self.config.title {
			field = field.with_label(title);
		}
		bind_request(Form::new().field(field), request)
	}

	fn apply_on_query(&self, query: &Q, params: &FilterParams) -> Q {
		match cleaned(params, self.param()) {
			Some(value) => {
				query.filter(Predicate::eq(&self.config.field, value_to_display(value)).into())
			}
			None => query.clone(),
		}
	}
}
