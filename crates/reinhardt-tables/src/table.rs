//! Ordered column sets describing one listing

use crate::column::{Cell, Column, HeaderCell};
use crate::error::{Result, TableError};
use crate::resource::{ListingView, Resource};
use std::collections::HashSet;
use std::fmt::{self, Debug};

/// The shape of a listing: its columns in display order
///
/// Column ids are unique, and every column that reads a field by id refers to
/// one of [`Resource::field_names`]. Both are checked by [`Table::new`].
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::column::{ControlsColumn, FieldColumn};
/// use reinhardt_tables::{Resource, Table};
/// use serde_json::{json, Value};
///
/// struct User {
///     email: String,
/// }
///
/// impl Resource for User {
///     fn field_names() -> Vec<&'static str> {
///         vec!["email"]
///     }
///
///     fn get_field(&self, name: &str) -> Option<Value> {
///         (name == "email").then(|| json!(self.email))
///     }
/// }
///
/// let table = Table::<User>::builder()
///     .column(FieldColumn::new("email").name("Email"))
///     .column(ControlsColumn::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(table.column_ids(), vec!["email", "controls"]);
/// ```
pub struct Table<R: Resource> {
	columns: Vec<Box<dyn Column<R>>>,
}

impl<R: Resource> Table<R> {
	pub fn new(columns: Vec<Box<dyn Column<R>>>) -> Result<Self> {
		let fields = R::field_names();
		let mut seen = HashSet::with_capacity(columns.len());

		for column in &columns {
			let id = column.id();
			if id.is_empty() {
				return Err(TableError::EmptyColumnId);
			}
			if !seen.insert(id.to_string()) {
				return Err(TableError::DuplicateColumn(id.to_string()));
			}
			if column.requires_field() && !fields.contains(&id) {
				return Err(TableError::UnresolvableColumn {
					id: id.to_string(),
					row_type: std::any::type_name::<R>(),
				});
			}
		}

		tracing::debug!(
			row_type = std::any::type_name::<R>(),
			columns = columns.len(),
			"table defined"
		);
		Ok(Self { columns })
	}

	pub fn builder() -> TableBuilder<R> {
		TableBuilder {
			columns: Vec::new(),
		}
	}
}

impl<R: Resource> Table<R> {
	pub fn columns(&self) -> &[Box<dyn Column<R>>] {
		&self.columns
	}

	pub fn get_column(&self, id: &str) -> Option<&dyn Column<R>> {
		self.columns
			.iter()
			.find(|column| column.id() == id)
			.map(|column| column.as_ref())
	}

	pub fn column_ids(&self) -> Vec<&str> {
		self.columns.iter().map(|column| column.id()).collect()
	}

	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	pub fn headers(&self) -> Vec<HeaderCell> {
		self.columns.iter().map(|column| column.header()).collect()
	}

	/// One cell per column, in column order
	pub fn render_row(&self, view: &dyn ListingView, obj: &R) -> Vec<Cell> {
		self.columns
			.iter()
			.map(|column| column.render_cell(view, obj))
			.collect()
	}
}

impl<R: Resource> Debug for Table<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Table")
			.field("columns", &self.columns)
			.finish()
	}
}

/// Collects columns for [`Table::new`]
pub struct TableBuilder<R: Resource> {
	columns: Vec<Box<dyn Column<R>>>,
}

impl<R: Resource> TableBuilder<R> {
	pub fn column(mut self, column: impl Column<R> + 'static) -> Self {
		self.columns.push(Box::new(column));
		self
	}

	pub fn build(self) -> Result<Table<R>> {
		Table::new(self.columns)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::{ControlsColumn, FieldColumn};
	use rstest::rstest;
	use serde_json::{Value, json};

	struct Item {
		title: String,
	}

	impl Resource for Item {
		fn field_names() -> Vec<&'static str> {
			vec!["title"]
		}

		fn get_field(&self, name: &str) -> Option<Value> {
			(name == "title").then(|| json!(self.title))
		}
	}

	#[rstest]
	fn test_duplicate_column_rejected() {
		let result = Table::<Item>::builder()
			.column(FieldColumn::new("title"))
			.column(FieldColumn::new("title").name("Again"))
			.build();
		assert_eq!(
			result.err(),
			Some(TableError::DuplicateColumn("title".to_string()))
		);
	}

	#[rstest]
	fn test_unknown_field_rejected() {
		let result = Table::<Item>::builder()
			.column(FieldColumn::new("price"))
			.build();
		assert!(matches!(
			result,
			Err(TableError::UnresolvableColumn { ref id, .. }) if id == "price"
		));
	}

	#[rstest]
	fn test_getter_column_needs_no_field() {
		let table = Table::<Item>::builder()
			.column(
				FieldColumn::new("shout")
					.getter(|_, _, item: &Item| Some(json!(item.title.to_uppercase()))),
			)
			.column(ControlsColumn::new())
			.build()
			.unwrap();
		assert_eq!(table.len(), 2);
		assert!(table.get_column("shout").is_some());
		assert!(table.get_column("title").is_none());
	}

	#[rstest]
	fn test_empty_id_rejected() {
		let result = Table::<Item>::builder().column(FieldColumn::new("")).build();
		assert_eq!(result.err(), Some(TableError::EmptyColumnId));
	}
}
