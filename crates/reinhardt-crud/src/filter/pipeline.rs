use super::Filter;
use crate::context::FilterContext;
use crate::error::{ListingError, ListingResult};
use crate::query::Query;
use crate::request::Request;
use std::collections::HashMap;

/// Run `filters` in order over `query`
///
/// Filter *i* sees the query as narrowed by filters `0..i`. Returns the final
/// query and one rendered fragment per filter, in filter order. A filter whose
/// input fails validation leaves the query unchanged and the remaining filters
/// still run.
///
/// # Errors
///
/// - [`ListingError::ContractViolation`] if two filters read the same
///   parameter (see [`Filter::param_names`]), or a filter has an empty name
/// - [`ListingError::Render`] if a fragment cannot be rendered
pub fn process_filters<Q: Query>(
	request: &dyn Request,
	filters: &[Box<dyn Filter<Q>>],
	query: Q,
	filter_context: &FilterContext,
) -> ListingResult<(Q, Vec<String>)> {
	check_names(filters)?;

	filters.iter().try_fold(
		(query, Vec::with_capacity(filters.len())),
		|(query, mut fragments), filter| {
			let (query, html) = filter.process(request, &query, filter_context)?;
			tracing::debug!(filter = %filter.name(), step = fragments.len(), "filter processed");
			fragments.push(html);
			Ok((query, fragments))
		},
	)
}

fn check_names<Q: Query>(filters: &[Box<dyn Filter<Q>>]) -> ListingResult<()> {
	let mut readers: HashMap<String, &str> = HashMap::with_capacity(filters.len());
	for filter in filters {
		let name = filter.name();
		if name.is_empty() {
			return Err(ListingError::ContractViolation(
				"filter name must not be empty".to_string(),
			));
		}
		for param in filter.param_names() {
			if let Some(other) = readers.insert(param.clone(), name) {
				return Err(ListingError::ContractViolation(format!(
					"filters '{}' and '{}' both read the '{}' parameter",
					other, name, param
				)));
			}
		}
	}
	Ok(())
}
