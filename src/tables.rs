//! Listing tables module.
//!
//! Column definitions and the [`Table`] that turns rows into header and body
//! cells.

#[cfg(feature = "tables")]
pub use reinhardt_tables::*;
