//! Error types for table definitions

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
	/// Two columns share the same id
	#[error("Duplicate column id '{0}'")]
	DuplicateColumn(String),

	/// A column relies on field lookup but the row type has no such field
	#[error("Column '{id}' has no getter and does not match any field of {row_type}")]
	UnresolvableColumn { id: String, row_type: &'static str },

	#[error("Column id must not be empty")]
	EmptyColumnId,

	#[error("Unknown timezone '{0}'")]
	InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
