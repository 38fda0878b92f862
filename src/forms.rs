//! Filter forms module.
//!
//! Fields, validation and HTML rendering for the small forms each list filter
//! binds to the request.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt::forms::{Form, IntegerField};
//!
//! let mut form = Form::with_prefix("price").field(IntegerField::new("min"));
//! form.bind_params([("price-min", "10")]);
//! assert!(form.is_valid());
//! ```

#[cfg(feature = "forms")]
pub use reinhardt_forms::*;
