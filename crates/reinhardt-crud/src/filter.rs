//! List filters
//!
//! A filter turns request parameters into query conditions. Each filter owns a
//! small form: the form is bound to the request, validated, applied to the
//! query and rendered back into the listing page.
//!
//! Invalid input never fails the listing. The filter leaves the query as it
//! was and renders its form with inline errors instead.
//!
//! # Examples
//!
//! ```
//! use reinhardt_crud::filter::{BooleanFilter, BooleanFilterConfig, Filter, process_filters};
//! use reinhardt_crud::query::{MemoryQuerySet, Query};
//! use reinhardt_crud::render::TeraRenderer;
//! use reinhardt_crud::{FilterContext, ListingRequest};
//! use reinhardt_tables::Resource;
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct User {
//!     admin: bool,
//! }
//!
//! impl Resource for User {
//!     fn field_names() -> Vec<&'static str> {
//!         vec!["admin"]
//!     }
//!
//!     fn get_field(&self, name: &str) -> Option<Value> {
//!         (name == "admin").then(|| json!(self.admin))
//!     }
//! }
//!
//! let renderer = Arc::new(TeraRenderer::new().unwrap());
//! let request = ListingRequest::from_query_string("admin=yes", renderer).unwrap();
//! let users = MemoryQuerySet::new(vec![User { admin: true }, User { admin: false }]);
//!
//! let filters: Vec<Box<dyn Filter<MemoryQuerySet<User>>>> =
//!     vec![Box::new(BooleanFilter::new(BooleanFilterConfig::new("admin")))];
//!
//! let (query, fragments) =
//!     process_filters(&request, &filters, users, &FilterContext::new()).unwrap();
//! assert_eq!(query.count(), 1);
//! assert_eq!(fragments.len(), 1);
//! ```

mod boolean;
mod choice;
mod pipeline;
mod range;
mod relationship;
mod search;

pub use boolean::{BooleanFilter, BooleanFilterConfig};
pub use choice::{ChoiceFilter, ChoiceFilterConfig};
pub use pipeline::process_filters;
pub use range::{RangeFilter, RangeFilterConfig};
pub use relationship::{SingleRelationshipValueFilter, SingleRelationshipValueFilterConfig};
pub use search::{SearchFilter, SearchFilterConfig};

use crate::context::FilterContext;
use crate::error::{ListingError, ListingResult};
use crate::query::Query;
use crate::render::{FILTER_TEMPLATE, context};
use crate::request::Request;
use reinhardt_forms::{Form, ValidationFailure};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Cleaned form values keyed by field name
pub type FilterParams = HashMap<String, Value>;

/// A reusable unit that narrows a query and exposes a form for it
///
/// Implementors supply [`create_form`](Filter::create_form) and
/// [`apply_on_query`](Filter::apply_on_query); validation, rendering and the
/// combined [`process`](Filter::process) step have default implementations.
pub trait Filter<Q: Query>: Send + Sync {
	/// Identifies the filter in logs and in the rendered fragment
	fn name(&self) -> &str;

	fn title(&self) -> Option<&str> {
		None
	}

	/// Request parameters this filter's form binds, the name by default
	///
	/// No two filters in one pipeline may share a parameter.
	fn param_names(&self) -> Vec<String> {
		vec![self.name().to_string()]
	}

	/// Template wrapping the rendered form
	fn template(&self) -> &str {
		FILTER_TEMPLATE
	}

	/// Build this filter's form, bound to the request parameters
	///
	/// Must give the same form for the same request and context.
	fn create_form(&self, request: &dyn Request, filter_context: &FilterContext) -> Form;

	/// A new query with the criteria in `params` applied
	///
	/// Absent criteria leave the query as it is.
	fn apply_on_query(&self, query: &Q, params: &FilterParams) -> Q;

	/// Validate the submitted parameters against the form
	///
	/// Absent parameters are valid and mean "no filter".
	fn process_form(
		&self,
		request: &dyn Request,
		filter_context: &FilterContext,
	) -> Result<FilterParams, ValidationFailure> {
		self.create_form(request, filter_context).validate()
	}

	/// Wrap `rendered_form` with [`template`](Filter::template)
	fn render(
		&self,
		request: &dyn Request,
		rendered_form: &str,
		filter_context: &FilterContext,
	) -> ListingResult<String> {
		let ctx = context([
			("filter_context", filter_context.to_value()),
			("rendered_form", Value::String(rendered_form.to_string())),
			("filter_name", Value::String(self.name().to_string())),
			("title", self.title().map(Value::from).unwrap_or(Value::Null)),
		]);
		ctx.and_then(|ctx| request.renderer().render(self.template(), &ctx)).map_err(|e| {
			tracing::error!(
				filter = %self.name(),
				template = %self.template(),
				error = %e,
				"filter rendering failed"
			);
			ListingError::Render(e)
		})
	}

	/// Validate, apply and render in one step
	///
	/// On a validation failure the query comes back unchanged and the
	/// fragment shows the form with its errors.
	fn process(
		&self,
		request: &dyn Request,
		query: &Q,
		filter_context: &FilterContext,
	) -> ListingResult<(Q, String)> {
		let form = self.create_form(request, filter_context);

		let (query, rendered_form) = match self.process_form(request, filter_context) {
			Ok(params) => {
				tracing::debug!(filter = %self.name(), ?params, "applying filter");
				let rendered = form.render(&params);
				(self.apply_on_query(query, &params), rendered)
			}
			Err(failure) => {
				tracing::warn!(
					filter = %self.name(),
					errors = ?failure.field_errors(),
					"filter input rejected"
				);
				(query.clone(), failure.render())
			}
		};

		let html = self.render(request, &rendered_form, filter_context)?;
		Ok((query, html))
	}
}

/// Read a filter configuration record from a JSON object
///
/// Unknown keys are rejected.
pub fn config_from_value<C: DeserializeOwned>(value: Value) -> ListingResult<C> {
	serde_json::from_value(value).map_err(|e| ListingError::Config(e.to_string()))
}

/// Bind a fresh form to every request parameter
pub(crate) fn bind_request(mut form: Form, request: &dyn Request) -> Form {
	form.bind_params(
		request
			.params()
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str())),
	);
	form
}

/// The cleaned value of `name`, `None` when empty or absent
pub(crate) fn cleaned<'a>(params: &'a FilterParams, name: &str) -> Option<&'a Value> {
	params.get(name).filter(|value| match value {
		Value::Null => false,
		Value::String(s) => !s.trim().is_empty(),
		_ => true,
	})
}
