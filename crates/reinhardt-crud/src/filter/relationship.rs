use super::{Filter, FilterParams, bind_request, cleaned, config_from_value};
use crate::context::FilterContext;
use crate::error::ListingResult;
use crate::query::{Predicate, Query};
use crate::request::Request;
use reinhardt_forms::field::value_to_display;
use reinhardt_forms::{ChoiceField, Form};
use reinhardt_tables::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Deref;

/// Configuration of a [`SingleRelationshipValueFilter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SingleRelationshipValueFilterConfig {
	/// Foreign key field of the listed rows, e.g. `group_id`
	pub field: String,
	#[serde(default)]
	pub title: Option<String>,
	/// Query parameter name, the field name by default
	#[serde(default)]
	pub param: Option<String>,
	/// Field of the related rows the foreign key points at
	#[serde(default = "default_value_field")]
	pub value_field: String,
	/// Field of the related rows shown to the user
	#[serde(default = "default_label_field")]
	pub label_field: String,
}

fn default_value_field() -> String {
	"id".to_string()
}

fn default_label_field() -> String {
	"name".to_string()
}

impl SingleRelationshipValueFilterConfig {
	pub fn new(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			title: None,
			param: None,
			value_field: default_value_field(),
			label_field: default_label_field(),
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn label_field(mut self, label_field: impl Into<String>) -> Self {
		self.label_field = label_field.into();
		self
	}
}

/// Pick one related object, e.g. "Choose group", and keep rows pointing at it
///
/// Choices are read from the related rows when the filter is built; filters
/// are built per request, so they reflect the related collection at that time.
/// Related rows without a value are skipped.
#[derive(Debug, Clone)]
pub struct SingleRelationshipValueFilter {
	config: SingleRelationshipValueFilterConfig,
	choices: Vec<(String, String)>,
}

impl SingleRelationshipValueFilter {
	pub fn new<'a, T, I>(config: SingleRelationshipValueFilterConfig, related: I) -> Self
	where
		T: Resource,
		I: IntoIterator<Item = &'a T>,
	{
		let choices = related
			.into_iter()
			.filter_map(|row| {
				let value = row.get_field(&config.value_field)?;
				if value.is_null() {
					return None;
				}
				let label = row
					.get_field(&config.label_field)
					.map(|label| value_to_display(&label))
					.unwrap_or_else(|| value_to_display(&value));
				Some((value_to_display(&value), label))
			})
			.collect();
		Self { config, choices }
	}

	/// Read the choices from a related query
	pub fn from_query<RQ, T>(config: SingleRelationshipValueFilterConfig, related: &RQ) -> Self
	where
		RQ: Query,
		RQ::Row: Deref<Target = T>,
		T: Resource,
	{
		let rows = related.all();
		Self::new(config, rows.iter().map(|row| row.deref()))
	}

	pub fn from_value<'a, T, I>(value: Value, related: I) -> ListingResult<Self>
	where
		T: Resource,
		I: IntoIterator<Item = &'a T>,
	{
		Ok(Self::new(config_from_value(value)?, related))
	}

	pub fn param(&self) -> &str {
		self.config.param.as_deref().unwrap_or(&self.config.field)
	}

	pub fn choices(&self) -> &[(String, String)] {
		&self.choices
	}
}

impl<Q: Query> Filter<Q> for SingleRelationshipValueFilter {
	fn name(&self) -> &str {
		self.param()
	}

	fn title(&self) -> Option<&str> {
		self.config.title.as_deref()
	}

	fn create_form(&self, request: &dyn Request, _filter_context: &FilterContext) -> Form {
		let mut field = ChoiceField::new(self.param()).with_choices(self.choices.clone());
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

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	struct Group {
		id: Option<i64>,
		name: &'static str,
	}

	impl Resource for Group {
		fn field_names() -> Vec<&'static str> {
			vec!["id", "name"]
		}

		fn get_field(&self, name: &str) -> Option<Value> {
			match name {
				"id" => self.id.map(|id| json!(id)),
				"name" => Some(json!(self.name)),
				_ => None,
			}
		}
	}

	#[rstest]
	fn test_choices_from_related_rows() {
		let groups = [
			Group {
				id: Some(1),
				name: "Staff",
			},
			Group {
				id: None,
				name: "Unsaved",
			},
			Group {
				id: Some(2),
				name: "Guests",
			},
		];
		let filter = SingleRelationshipValueFilter::new(
			SingleRelationshipValueFilterConfig::new("group_id"),
			groups.iter(),
		);
		assert_eq!(
			filter.choices(),
			&[
				("1".to_string(), "Staff".to_string()),
				("2".to_string(), "Guests".to_string()),
			]
		);
		assert_eq!(filter.param(), "group_id");
	}
}
