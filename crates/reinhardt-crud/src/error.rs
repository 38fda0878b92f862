//! Error types for listings and filters

use crate::settings::SettingsError;
use reinhardt_tables::TableError;
use thiserror::Error;

/// Template rendering error
#[derive(Debug, Error)]
pub enum RenderError {
	/// No template registered under this name
	#[error("Template not found: {0}")]
	TemplateNotFound(String),

	/// A context value could not be converted for the template engine
	#[error("Template context value '{key}' is not serializable: {source}")]
	Context {
		key: String,
		#[source]
		source: serde_json::Error,
	},

	/// The template engine rejected the template or its context
	#[error("Template rendering failed: {0}")]
	Engine(#[from] tera::Error),
}

/// Listing error type
///
/// Invalid filter input is not an error at this level: filters recover it
/// and show the form with inline errors.
#[derive(Debug, Error)]
pub enum ListingError {
	/// A filter or listing was wired up incorrectly
	#[error("Contract violation: {0}")]
	ContractViolation(String),

	#[error(transparent)]
	Render(#[from] RenderError),

	#[error(transparent)]
	Table(#[from] TableError),

	/// Filter configuration could not be read
	#[error("Invalid configuration: {0}")]
	Config(String),
}

/// Result type for listing operations
pub type ListingResult<T> = Result<T, ListingError>;

impl From<SettingsError> for ListingError {
	fn from(err: SettingsError) -> Self {
		ListingError::Config(err.to_string())
	}
}

impl From<serde_urlencoded::de::Error> for ListingError {
	fn from(err: serde_urlencoded::de::Error) -> Self {
		ListingError::Config(format!("Malformed query string: {}", err))
	}
}

impl From<serde_urlencoded::ser::Error> for ListingError {
	fn from(err: serde_urlencoded::ser::Error) -> Self {
		ListingError::Config(format!("Cannot encode query string: {}", err))
	}
}
