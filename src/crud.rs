//! CRUD listings module.
//!
//! List filters, the filter pipeline and paginated listing pages.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt::crud::filter::{BooleanFilter, BooleanFilterConfig};
//!
//! let filter = BooleanFilter::new(BooleanFilterConfig::new("is_active").title("Active"));
//! assert_eq!(filter.param(), "is_active");
//! ```

#[cfg(feature = "crud")]
pub use reinhardt_crud::*;
