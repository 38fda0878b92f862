use super::{Filter, FilterParams, bind_request, cleaned, config_from_value};
use crate::context::FilterContext;
use crate::error::{ListingError, ListingResult};
use crate::query::{FilterCondition, FilterOperator, Predicate, Query};
use crate::request::Request;
use reinhardt_forms::field::value_to_display;
use reinhardt_forms::{CharField, Form};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration of a [`SearchFilter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchFilterConfig {
	/// Fields searched; a row matches if any of them contains the text
	pub fields: Vec<String>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default = "default_param")]
	pub param: String,
	#[serde(default)]
	pub case_sensitive: bool,
	#[serde(default = "default_max_length")]
	pub max_length: usize,
}

fn default_param() -> String {
	"q".to_string()
}

fn default_max_length() -> usize {
	200
}

impl SearchFilterConfig {
	pub fn new<I, S>(fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			fields: fields.into_iter().map(Into::into).collect(),
			title: None,
			param: default_param(),
			case_sensitive: false,
			max_length: default_max_length(),
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn param(mut self, param: impl Into<String>) -> Self {
		self.param = param.into();
		self
	}
}

/// Free-text search across several fields
///
/// # Examples
///
/// ```
/// use reinhardt_crud::filter::{SearchFilter, SearchFilterConfig};
///
/// let filter = SearchFilter::new(SearchFilterConfig::new(["name", "email"])).unwrap();
/// assert_eq!(filter.param(), "q");
///
/// let no_fields: Vec<String> = Vec::new();
/// assert!(SearchFilter::new(SearchFilterConfig::new(no_fields)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SearchFilter {
	config: SearchFilterConfig,
}

impl SearchFilter {
	pub fn new(config: SearchFilterConfig) -> ListingResult<Self> {
		if config.fields.is_empty() {
			return Err(ListingError::Config(format!(
				"search filter '{}' has no fields",
				config.param
			)));
		}
		Ok(Self { config })
	}

	pub fn from_value(value: Value) -> ListingResult<Self> {
		Self::new(config_from_value(value)?)
	}

	pub fn param(&self) -> &str {
		&self.config.param
	}
}

impl<Q: Query> Filter<Q> for SearchFilter {
	fn name(&self) -> &str {
		self.param()
	}

	fn title(&self) -> Option<&str> {
		self.config.title.as_deref()
	}

	fn create_form(&self, request: &dyn Request, _filter_context: &FilterContext) -> Form {
		let mut field = CharField::new(self.param()).with_max_length(self.config.max_length);
		if let Some(title) = &self.config.title {
			field = field.with_label(title);
		}
		let mut form = Form::new().field(field);
		form.set_submit_label("Search");
		bind_request(form, request)
	}

	fn apply_on_query(&self, query: &Q, params: &FilterParams) -> Q {
		let Some(text) = cleaned(params, self.param()) else {
			return query.clone();
		};
		let text = value_to_display(text).trim().to_string();
		let operator = if self.config.case_sensitive {
			FilterOperator::Contains
		} else {
			FilterOperator::IContains
		};
		let predicates = self
			.config
			.fields
			.iter()
			.map(|field| Predicate::new(field, operator, text.as_str()))
			.collect();
		query.filter(FilterCondition::or_predicates(predicates))
	}
}
