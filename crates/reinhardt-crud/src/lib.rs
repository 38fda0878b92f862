//! Filtered CRUD listings for Reinhardt
//!
//! This crate turns a queryable collection into a listing page:
//!
//! 1. [`process_filters`](filter::process_filters) runs a chain of
//!    [`Filter`](filter::Filter)s over a [`Query`](query::Query). Each filter
//!    binds its form to the request, narrows the query and renders a fragment.
//! 2. A [`Listing`] shows the narrowed query through a
//!    [`Table`](reinhardt_tables::Table), one page at a time.
//!
//! ```mermaid
//! graph LR
//!     A[Request] --> B[process_filters]
//!     Q[Query] --> B
//!     B --> C[Filtered query]
//!     B --> D[Filter fragments]
//!     C --> E[Listing]
//!     D --> E
//!     T[Table] --> E
//!     E --> F[ListingPage / HTML]
//! ```
//!
//! Rendering goes through the [`Renderer`](render::Renderer) carried by the
//! request; [`TeraRenderer`](render::TeraRenderer) ships the default
//! `crud/*.html` templates.

#![warn(rustdoc::broken_intra_doc_links)]

pub mod context;
pub mod error;
pub mod filter;
pub mod listing;
pub mod query;
pub mod render;
pub mod request;
pub mod settings;

// Re-exports for convenience
pub use context::FilterContext;
pub use error::{ListingError, ListingResult, RenderError};
pub use filter::{Filter, process_filters};
pub use listing::{Listing, ListingPage, Page, Paginator};
pub use query::{FilterCondition, FilterOperator, FilterValue, MemoryQuerySet, Predicate, Query};
pub use render::{Renderer, TeraRenderer};
pub use request::{ListingRequest, Request};
pub use settings::{ListingSettings, SettingsError};
