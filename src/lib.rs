//! # Reinhardt
//!
//! Filtered, paginated CRUD listings for Rust web applications, inspired by the
//! Django admin changelist.
//!
//! A listing page is built from three pieces:
//!
//! - **forms**: the small form behind every list filter, bound to the request
//!   query string, validated and rendered back with inline errors
//! - **tables**: column definitions that turn a row into display cells with
//!   links, actions and friendly timestamps
//! - **crud**: list filters, the `process_filters` pipeline and the paginated
//!   [`Listing`]
//!
//! ## Feature Flags
//!
//! - `full` (default) - everything below
//! - `forms` - filter forms only
//! - `tables` - table columns only
//! - `crud` - filters and listings (enables `forms` and `tables`)
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt::prelude::*;
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct Article {
//!     title: &'static str,
//!     published: bool,
//! }
//!
//! impl Resource for Article {
//!     fn field_names() -> Vec<&'static str> {
//!         vec!["title", "published"]
//!     }
//!
//!     fn get_field(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "title" => Some(json!(self.title)),
//!             "published" => Some(json!(self.published)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let articles = MemoryQuerySet::new(vec![
//!     Article { title: "Draft", published: false },
//!     Article { title: "Release notes", published: true },
//! ]);
//! let filters: Vec<Box<dyn Filter<MemoryQuerySet<Article>>>> = vec![Box::new(
//!     BooleanFilter::new(BooleanFilterConfig::new("published").title("Published")),
//! )];
//!
//! let renderer = Arc::new(TeraRenderer::new().unwrap());
//! let request = ListingRequest::from_query_string("published=yes", renderer).unwrap();
//! let (query, fragments) =
//!     process_filters(&request, &filters, articles, &FilterContext::new()).unwrap();
//!
//! assert_eq!(query.count(), 1);
//! assert!(fragments[0].contains("Published"));
//! ```

#[cfg(feature = "crud")]
pub mod crud;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "tables")]
pub mod tables;

// Re-export forms
#[cfg(feature = "forms")]
pub use reinhardt_forms::{
	BoundField, CharField, ChoiceField, FieldError, Form, FormError, FormResult, IntegerField,
	NullBooleanField, ValidationFailure,
};

// Re-export tables
#[cfg(feature = "tables")]
pub use reinhardt_tables::{
	Cell, Column, HeaderCell, ListingView, NavigateTarget, Resource, Table, TableBuilder,
	TableError, UrlResolver,
};

// Re-export listings
#[cfg(feature = "crud")]
pub use reinhardt_crud::{
	Filter, FilterContext, Listing, ListingError, ListingPage, ListingRequest, ListingResult,
	ListingSettings, MemoryQuerySet, Page, Paginator, Query, RenderError, Renderer, Request,
	TeraRenderer, process_filters,
};

/// Prelude module for convenient imports
///
/// Import everything commonly needed with:
/// ```rust
/// use reinhardt::prelude::*;
/// ```
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use crate::{Form, FormError, ValidationFailure};

	#[cfg(feature = "tables")]
	pub use crate::{Column, ListingView, Resource, Table, UrlResolver};
	#[cfg(feature = "tables")]
	pub use reinhardt_tables::column::{
		ControlsColumn, FieldColumn, FriendlyTimeColumn, StringPresentationColumn,
	};

	#[cfg(feature = "crud")]
	pub use crate::{
		Filter, FilterContext, Listing, ListingError, ListingRequest, MemoryQuerySet, Paginator,
		Query, TeraRenderer, process_filters,
	};
	#[cfg(feature = "crud")]
	pub use reinhardt_crud::filter::{
		BooleanFilter, BooleanFilterConfig, ChoiceFilter, ChoiceFilterConfig, RangeFilter,
		RangeFilterConfig, SearchFilter, SearchFilterConfig, SingleRelationshipValueFilter,
		SingleRelationshipValueFilterConfig,
	};
}
