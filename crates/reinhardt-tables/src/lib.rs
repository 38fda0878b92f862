//! Listing tables for Reinhardt CRUD views
//!
//! A [`Table`] is an ordered set of [`Column`]s describing how objects of one
//! [`Resource`] type are shown in a listing. Each column extracts a cell value,
//! resolves where a click on the cell navigates, and names the templates that
//! render its header and body.
//!
//! # Column types
//!
//! - [`FieldColumn`](column::FieldColumn): reads one field, or computes the value with a getter
//! - [`StringPresentationColumn`](column::StringPresentationColumn): the row's `Display` output
//! - [`FriendlyTimeColumn`](column::FriendlyTimeColumn): absolute and relative time
//! - [`ControlsColumn`](column::ControlsColumn): show / edit / delete links
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[Table] --> B[Columns]
//!     B --> C[FieldColumn]
//!     B --> D[StringPresentationColumn]
//!     B --> E[FriendlyTimeColumn]
//!     B --> F[ControlsColumn]
//!     A --> G[render_row]
//!     G --> H[Cell]
//!     H --> I[UrlResolver]
//! ```

#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod resource;
pub mod table;

// Re-exports for convenience
pub use column::{Cell, Column, ColumnOptions, HeaderCell};
pub use error::{Result, TableError};
pub use resource::{ListingView, NavigateTarget, Resource, UrlResolver};
pub use table::{Table, TableBuilder};
