//! Row action controls (view / edit / delete)

use crate::column::base::{ActionLink, Cell, Column, ColumnOptions};
use crate::resource::{ListingView, NavigateTarget, Resource};
use serde_json::Value;
use std::fmt::{self, Debug};

pub const CONTROLS_ID: &str = "controls";
pub const CONTROLS_NAME: &str = "Actions";
pub const CONTROLS_HEADER_TEMPLATE: &str = "crud/column_header_controls.html";
pub const CONTROLS_BODY_TEMPLATE: &str = "crud/column_body_controls.html";

/// Column rendering the action buttons of each row
///
/// The cell value is always empty; the body template renders the action links.
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::column::{Column, ControlsColumn};
/// # struct User;
/// # impl reinhardt_tables::Resource for User {
/// #     fn field_names() -> Vec<&'static str> { vec![] }
/// #     fn get_field(&self, _: &str) -> Option<serde_json::Value> { None }
/// # }
///
/// let column = ControlsColumn::<User>::new();
/// assert_eq!(column.id(), "controls");
/// assert_eq!(column.actions().len(), 3);
/// ```
pub struct ControlsColumn<R> {
	options: ColumnOptions<R>,
	actions: Vec<(String, String)>,
}

impl<R> ControlsColumn<R> {
	pub fn new() -> Self {
		Self {
			options: ColumnOptions::new(CONTROLS_ID)
				.name(CONTROLS_NAME)
				.header_template(CONTROLS_HEADER_TEMPLATE)
				.body_template(CONTROLS_BODY_TEMPLATE),
			actions: vec![
				("show".to_string(), "View".to_string()),
				("edit".to_string(), "Edit".to_string()),
				("delete".to_string(), "Delete".to_string()),
			],
		}
	}

	/// Replace the `(view_name, label)` actions
	pub fn with_actions(mut self, actions: Vec<(String, String)>) -> Self {
		self.actions = actions;
		self
	}

	pub fn actions(&self) -> &[(String, String)] {
		&self.actions
	}
}

impl<R> Default for ControlsColumn<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> Debug for ControlsColumn<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ControlsColumn")
			.field("options", &self.options)
			.field("actions", &self.actions)
			.finish()
	}
}

impl<R: Resource> Column<R> for ControlsColumn<R> {
	fn options(&self) -> &ColumnOptions<R> {
		&self.options
	}

	fn requires_field(&self) -> bool {
		false
	}

	fn get_value(&self, _view: &dyn ListingView, _obj: &R) -> Value {
		Value::String(String::new())
	}

	fn render_cell(&self, view: &dyn ListingView, obj: &R) -> Cell {
		let resolver = view.resolver();
		let actions = match NavigateTarget::of(obj) {
			Some(target) => self
				.actions
				.iter()
				.map(|(view_name, label)| ActionLink {
					view_name: view_name.clone(),
					label: label.clone(),
					url: resolver.resource_url(&target, view_name),
				})
				.collect(),
			None => Vec::new(),
		};

		Cell {
			column_id: self.options.id.clone(),
			value: String::new(),
			raw: Value::String(String::new()),
			navigate_url: None,
			template: self.options.body_template.clone(),
			friendly_time: None,
			actions,
		}
	}
}
