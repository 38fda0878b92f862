use super::{Filter, FilterParams, bind_request, cleaned, config_from_value};
use crate::context::FilterContext;
use crate::error::ListingResult;
use crate::query::{FilterCondition, FilterOperator, Predicate, Query};
use crate::request::Request;
use reinhardt_forms::{Form, FormError, IntegerField};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const MIN: &str = "min";
const MAX: &str = "max";

/// Configuration of a [`RangeFilter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeFilterConfig {
	pub field: String,
	#[serde(default)]
	pub title: Option<String>,
	/// Parameter prefix, the field name by default: `price-min`, `price-max`
	#[serde(default)]
	pub param: Option<String>,
	/// Lowest value the form accepts
	#[serde(default)]
	pub lower_bound: Option<i64>,
	/// Highest value the form accepts
	#[serde(default)]
	pub upper_bound: Option<i64>,
}

impl RangeFilterConfig {
	pub fn new(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: None,
			param: None,
			lower_bound: None,
			upper_bound: None,
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn bounds(mut self, lower: i64, upper: i64) -> Self {
		self.lower_bound = Some(lower);
		self.upper_bound = Some(upper);
		self
	}
}

/// Inclusive integer range with optional ends
///
/// A minimum above the maximum is rejected as a form error.
///
/// # Examples
///
/// ```
/// use reinhardt_crud::filter::{RangeFilter, RangeFilterConfig};
///
/// let filter = RangeFilter::new(RangeFilterConfig::new("price"));
/// assert_eq!(filter.param_names(), ["price-min".to_string(), "price-max".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct RangeFilter {
	config: RangeFilterConfig,
}

impl RangeFilter {
	pub fn new(config: RangeFilterConfig) -> Self {
		Self { config }
	}

	pub fn from_value(value: Value) -> ListingResult<Self> {
		Ok(Self::new(config_from_value(value)?))
	}

	pub fn prefix(&self) -> &str {
		self.config.param.as_deref().unwrap_or(&self.config.field)
	}

	/// Request parameters read by this filter
	pub fn param_names(&self) -> [String; 2] {
		[
			format!("{}-{}", self.prefix(), MIN),
			format!("{}-{}", self.prefix(), MAX),
		]
	}

	fn bounded(&self, mut field: IntegerField) -> IntegerField {
		if let Some(lower) = self.config.lower_bound {
			field = field.with_min_value(lower);
		}
		if let Some(upper) = self.config.upper_bound {
			field = field.with_max_value(upper);
		}
		field
	}
}

impl<Q: Query> Filter<Q> for RangeFilter {
	fn name(&self) -> &str {
		self.prefix()
	}

	fn param_names(&self) -> Vec<String> {
		RangeFilter::param_names(self).to_vec()
	}

	fn title(&self) -> Option<&str> {
		self.config.title.as_deref()
	}

	fn create_form(&self, request: &dyn Request, _filter_context: &FilterContext) -> Form {
		let mut form = Form::with_prefix(self.prefix())
			.field(self.bounded(IntegerField::new(MIN).with_label("Min")))
			.field(self.bounded(IntegerField::new(MAX).with_label("Max")));
		form.add_clean_function(|data| {
			let min = data.get(MIN).and_then(Value::as_i64);
			let max = data.get(MAX).and_then(Value::as_i64);
			match (min, max) {
				(Some(min), Some(max)) if min > max => Err(FormError::Validation(format!(
					"Minimum {} is greater than maximum {}.",
					min, max
				))),
				_ => Ok(()),
			}
		});
		bind_request(form, request)
	}

	fn apply_on_query(&self, query: &Q, params: &FilterParams) -> Q {
		let field = &self.config.field;
		let mut predicates = Vec::with_capacity(2);
		if let Some(min) = cleaned(params, MIN).and_then(Value::as_i64) {
			predicates.push(Predicate::new(field, FilterOperator::Gte, min));
		}
		if let Some(max) = cleaned(params, MAX).and_then(Value::as_i64) {
			predicates.push(Predicate::new(field, FilterOperator::Lte, max));
		}

		if predicates.is_empty() {
			query.clone()
		} else {
			query.filter(FilterCondition::and_predicates(predicates))
		}
	}
}
