use super::{Filter, FilterParams, bind_request, cleaned, config_from_value};
use crate::context::FilterContext;
use crate::error::ListingResult;
use crate::query::{Predicate, Query};
use crate::request::Request;
use reinhardt_forms::{Form, NullBooleanField};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration of a [`BooleanFilter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BooleanFilterConfig {
	/// Boolean field of the listed rows
	pub field: String,
	#[serde(default)]
	pub title: Option<String>,
	/// Query parameter name, the field name by default
	#[serde(default)]
	pub param: Option<String>,
	#[serde(default = "default_yes")]
	pub yes_label: String,
	#[serde(default = "default_no")]
	pub no_label: String,
	#[serde(default = "default_any")]
	pub any_label: String,
}

fn default_yes() -> String {
	"Yes".to_string()
}

fn default_no() -> String {
	"No".to_string()
}

fn default_any() -> String {
	"Any".to_string()
}

impl BooleanFilterConfig {
	pub fn new(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: None,
			param: None,
			yes_label: default_yes(),
			no_label: default_no(),
			any_label: default_any(),
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}

/// Yes / no / any selection over a boolean field
///
/// # Examples
///
/// ```
/// use reinhardt_crud::filter::BooleanFilter;
/// use serde_json::json;
///
/// let filter = BooleanFilter::from_value(json!({"field": "admin", "title": "Admin"})).unwrap();
/// assert_eq!(filter.param(), "admin");
///
/// assert!(BooleanFilter::from_value(json!({"field": "admin", "colour": "red"})).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct BooleanFilter {
	config: BooleanFilterConfig,
}

impl BooleanFilter {
	pub fn new(config: BooleanFilterConfig) -> Self {
		Self { config }
	}

	pub fn from_value(value: Value) -> ListingResult<Self> {
		Ok(Self::new(config_from_value(value)?))
	}

	pub fn param(&self) -> &str {
		self.config.param.as_deref().unwrap_or(&self.config.field)
	}

	pub fn config(&self) -> &BooleanFilterConfig {
		&self.config
	}
}

impl<Q: Query> Filter<Q> for BooleanFilter {
	fn name(&self) -> &str {
		self.param()
	}

	fn title(&self) -> Option<&str> {
		self.config.title.as_deref()
	}

	fn create_form(&self, request: &dyn Request, _filter_context: &FilterContext) -> Form {
		let mut field = NullBooleanField::with_labels(
			self.param(),
			&self.config.any_label,
			&self.config.yes_label,
			&self.config.no_label,
		);
		if let Some(title) = &self.config.title {
			field = field.with_label(title);
		}
		bind_request(Form::new().field(field), request)
	}

	fn apply_on_query(&self, query: &Q, params: &FilterParams) -> Q {
		match cleaned(params, self.param()) {
			Some(Value::Bool(wanted)) => {
				query.filter(Predicate::eq(&self.config.field, *wanted).into())
			}
			_ => query.clone(),
		}
	}
}
