//! Column showing the string presentation of the whole row

use crate::column::base::{Column, ColumnOptions};
use crate::resource::{ListingView, Resource};
use serde_json::Value;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

pub type Formatter = Arc<dyn Fn(String) -> String + Send + Sync>;

/// Renders `row.to_string()` passed through a formatter
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::column::StringPresentationColumn;
///
/// struct Tag(String);
///
/// impl std::fmt::Display for Tag {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "#{}", self.0)
///     }
/// }
///
/// let column = StringPresentationColumn::<Tag>::new("tag").formatter(|s| s.to_uppercase());
/// assert_eq!(column.present(&Tag("rust".to_string())), "#RUST");
/// ```
pub struct StringPresentationColumn<R> {
	options: ColumnOptions<R>,
	formatter: Formatter,
}

impl<R> StringPresentationColumn<R> {
	pub fn new(id: impl Into<String>) -> Self {
		Self::with_options(ColumnOptions::new(id))
	}

	pub fn with_options(options: ColumnOptions<R>) -> Self {
		Self {
			options,
			formatter: Arc::new(|s| s),
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.options = self.options.name(name);
		self
	}

	pub fn navigate_view_name(mut self, view_name: impl Into<String>) -> Self {
		self.options = self.options.navigate_view_name(view_name);
		self
	}

	pub fn formatter<F>(mut self, formatter: F) -> Self
	where
		F: Fn(String) -> String + Send + Sync + 'static,
	{
		self.formatter = Arc::new(formatter);
		self
	}

	pub fn present(&self, obj: &R) -> String
	where
		R: Display,
	{
		(self.formatter)(obj.to_string())
	}
}

impl<R> Debug for StringPresentationColumn<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StringPresentationColumn")
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}

impl<R: Resource + Display> Column<R> for StringPresentationColumn<R> {
	fn options(&self) -> &ColumnOptions<R> {
		&self.options
	}

	fn requires_field(&self) -> bool {
		false
	}

	fn get_value(&self, _view: &dyn ListingView, obj: &R) -> Value {
		Value::String(self.present(obj))
	}
}
