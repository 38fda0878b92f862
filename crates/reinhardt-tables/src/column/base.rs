//! Base column trait and implementation

use crate::column::time::FriendlyTime;
use crate::resource::{ListingView, NavigateTarget, Resource, UrlResolver};
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Debug};
use std::sync::Arc;

pub const DEFAULT_HEADER_TEMPLATE: &str = "crud/column_header.html";
pub const DEFAULT_BODY_TEMPLATE: &str = "crud/column_body.html";
/// Arrow-style format used by time columns
pub const DEFAULT_TIME_FORMAT: &str = "MM/DD/YYYY HH:mm";

/// Extracts a cell value: `(view, column, row)`
pub type Getter<R> =
	Arc<dyn Fn(&dyn ListingView, &ColumnOptions<R>, &R) -> Option<Value> + Send + Sync>;

/// Builds the URL a cell links to: `(request, row)`
pub type NavigateUrlGetter<R> = Arc<dyn Fn(&dyn UrlResolver, &R) -> Option<String> + Send + Sync>;

/// Picks the object a cell links to: `(row, request)`
pub type NavigateTargetGetter<R> =
	Arc<dyn Fn(&R, &dyn UrlResolver) -> Option<NavigateTarget> + Send + Sync>;

/// Configuration shared by every column type
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::column::ColumnOptions;
///
/// struct User;
///
/// let options = ColumnOptions::<User>::new("email")
///     .name("Email")
///     .navigate_view_name("show");
///
/// assert_eq!(options.id, "email");
/// assert_eq!(options.label(), "Email");
/// ```
pub struct ColumnOptions<R> {
	/// Must match a field of the listed objects unless a getter is set
	pub id: String,
	pub name: Option<String>,
	/// Opaque rendering hint passed through to templates
	pub renderer: Option<String>,
	pub getter: Option<Getter<R>>,
	pub format: String,
	pub header_template: String,
	pub body_template: String,
	pub navigate_view_name: Option<String>,
	pub navigate_url_getter: Option<NavigateUrlGetter<R>>,
	pub navigate_target: Option<NavigateTargetGetter<R>>,
}

impl<R> ColumnOptions<R> {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: None,
			renderer: None,
			getter: None,
			format: DEFAULT_TIME_FORMAT.to_string(),
			header_template: DEFAULT_HEADER_TEMPLATE.to_string(),
			body_template: DEFAULT_BODY_TEMPLATE.to_string(),
			navigate_view_name: None,
			navigate_url_getter: None,
			navigate_target: None,
		}
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn renderer(mut self, renderer: impl Into<String>) -> Self {
		self.renderer = Some(renderer.into());
		self
	}

	pub fn getter<F>(mut self, getter: F) -> Self
	where
		F: Fn(&dyn ListingView, &ColumnOptions<R>, &R) -> Option<Value> + Send + Sync + 'static,
	{
		self.getter = Some(Arc::new(getter));
		self
	}

	pub fn format(mut self, format: impl Into<String>) -> Self {
		self.format = format.into();
		self
	}

	pub fn header_template(mut self, template: impl Into<String>) -> Self {
		self.header_template = template.into();
		self
	}

	pub fn body_template(mut self, template: impl Into<String>) -> Self {
		self.body_template = template.into();
		self
	}

	pub fn navigate_view_name(mut self, view_name: impl Into<String>) -> Self {
		self.navigate_view_name = Some(view_name.into());
		self
	}

	pub fn navigate_url_getter<F>(mut self, getter: F) -> Self
	where
		F: Fn(&dyn UrlResolver, &R) -> Option<String> + Send + Sync + 'static,
	{
		self.navigate_url_getter = Some(Arc::new(getter));
		self
	}

	/// Link to a related object instead of the row itself
	pub fn navigate_target<F>(mut self, target: F) -> Self
	where
		F: Fn(&R, &dyn UrlResolver) -> Option<NavigateTarget> + Send + Sync + 'static,
	{
		self.navigate_target = Some(Arc::new(target));
		self
	}

	/// Header text: the display name, falling back to the id
	pub fn label(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.id)
	}
}

impl<R> Clone for ColumnOptions<R> {
	fn clone(&self) -> Self {
		Self {
			id: self.id.clone(),
			name: self.name.clone(),
			renderer: self.renderer.clone(),
			getter: self.getter.clone(),
			format: self.format.clone(),
			header_template: self.header_template.clone(),
			body_template: self.body_template.clone(),
			navigate_view_name: self.navigate_view_name.clone(),
			navigate_url_getter: self.navigate_url_getter.clone(),
			navigate_target: self.navigate_target.clone(),
		}
	}
}

impl<R> Debug for ColumnOptions<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ColumnOptions")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("renderer", &self.renderer)
			.field("getter", &self.getter.is_some())
			.field("format", &self.format)
			.field("header_template", &self.header_template)
			.field("body_template", &self.body_template)
			.field("navigate_view_name", &self.navigate_view_name)
			.field("navigate_url_getter", &self.navigate_url_getter.is_some())
			.finish_non_exhaustive()
	}
}

/// Header of one column, ready for a template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
	pub id: String,
	pub name: String,
	pub template: String,
	pub renderer: Option<String>,
}

/// One rendered cell of a listing row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
	pub column_id: String,
	/// Display text of the value
	pub value: String,
	pub raw: Value,
	pub navigate_url: Option<String>,
	pub template: String,
	pub friendly_time: Option<FriendlyTime>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub actions: Vec<ActionLink>,
}

/// A row action rendered by [`ControlsColumn`](crate::column::ControlsColumn)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionLink {
	pub view_name: String,
	pub label: String,
	pub url: String,
}

/// Trait for table column definitions
///
/// Each column is responsible for:
/// - extracting the value of one cell from a row
/// - resolving where a click on the cell should navigate
/// - describing which templates render its header and body
///
/// Columns are built once per table and shared by every row and request, so
/// implementations hold configuration only.
pub trait Column<R: Resource>: Debug + Send + Sync {
	fn options(&self) -> &ColumnOptions<R>;

	fn id(&self) -> &str {
		&self.options().id
	}

	/// Whether the default field lookup is used to read values
	///
	/// Tables check such columns against [`Resource::field_names`].
	fn requires_field(&self) -> bool {
		self.options().getter.is_none()
	}

	/// Extract the raw value for this column
	///
	/// Calls the getter when configured, otherwise reads the field named by
	/// the column id. Missing and null values become an empty string.
	fn get_value(&self, view: &dyn ListingView, obj: &R) -> Value {
		let options = self.options();
		let value = match &options.getter {
			Some(getter) => getter(view, options, obj),
			None => obj.get_field(&options.id),
		};
		empty_if_null(value)
	}

	/// Object a click on this cell should lead to; the row itself by default
	fn get_navigate_target(&self, obj: &R, request: &dyn UrlResolver) -> Option<NavigateTarget> {
		match &self.options().navigate_target {
			Some(target) => target(obj, request),
			None => NavigateTarget::of(obj),
		}
	}

	/// Link for this cell, `None` when the cell is not clickable
	///
	/// `view_name` overrides the configured `navigate_view_name`.
	fn get_navigate_url(
		&self,
		obj: &R,
		request: &dyn UrlResolver,
		view_name: Option<&str>,
	) -> Option<String> {
		let options = self.options();
		if let Some(url_getter) = &options.navigate_url_getter {
			return url_getter(request, obj);
		}

		let configured = options.navigate_view_name.as_deref()?;
		let target = self.get_navigate_target(obj, request)?;
		let view_name = view_name.unwrap_or(configured);
		Some(request.resource_url(&target, view_name))
	}

	fn header(&self) -> HeaderCell {
		let options = self.options();
		HeaderCell {
			id: options.id.clone(),
			name: options.label().to_string(),
			template: options.header_template.clone(),
			renderer: options.renderer.clone(),
		}
	}

	fn render_cell(&self, view: &dyn ListingView, obj: &R) -> Cell {
		default_cell(self, view, obj)
	}
}

/// Cell built from [`Column::get_value`] and [`Column::get_navigate_url`]
pub fn default_cell<R, C>(column: &C, view: &dyn ListingView, obj: &R) -> Cell
where
	R: Resource,
	C: Column<R> + ?Sized,
{
	let raw = column.get_value(view, obj);
	Cell {
		column_id: column.id().to_string(),
		value: display_value(&raw),
		navigate_url: column.get_navigate_url(obj, view.resolver(), None),
		template: column.options().body_template.clone(),
		friendly_time: None,
		actions: Vec::new(),
		raw,
	}
}

pub(crate) fn empty_if_null(value: Option<Value>) -> Value {
	match value {
		None | Some(Value::Null) => Value::String(String::new()),
		Some(value) => value,
	}
}

/// Text shown for a cell value
pub fn display_value(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// A column reading one field of the row, or a computed value via a getter
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::column::{Column, ColumnOptions, FieldColumn};
///
/// struct User;
/// # impl reinhardt_tables::Resource for User {
/// #     fn field_names() -> Vec<&'static str> { vec!["email"] }
/// #     fn get_field(&self, _: &str) -> Option<serde_json::Value> { None }
/// # }
///
/// let column = FieldColumn::<User>::new("email").name("Email");
/// assert_eq!(column.id(), "email");
/// assert_eq!(column.header().name, "Email");
/// ```
pub struct FieldColumn<R> {
	options: ColumnOptions<R>,
}

impl<R> FieldColumn<R> {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			options: ColumnOptions::new(id),
		}
	}

	pub fn with_options(options: ColumnOptions<R>) -> Self {
		Self { options }
	}

	pub fn name(self, name: impl Into<String>) -> Self {
		self.map(|o| o.name(name))
	}

	pub fn getter<F>(self, getter: F) -> Self
	where
		F: Fn(&dyn ListingView, &ColumnOptions<R>, &R) -> Option<Value> + Send + Sync + 'static,
	{
		self.map(|o| o.getter(getter))
	}

	pub fn navigate_view_name(self, view_name: impl Into<String>) -> Self {
		self.map(|o| o.navigate_view_name(view_name))
	}

	pub fn navigate_url_getter<F>(self, getter: F) -> Self
	where
		F: Fn(&dyn UrlResolver, &R) -> Option<String> + Send + Sync + 'static,
	{
		self.map(|o| o.navigate_url_getter(getter))
	}

	pub fn navigate_target<F>(self, target: F) -> Self
	where
		F: Fn(&R, &dyn UrlResolver) -> Option<NavigateTarget> + Send + Sync + 'static,
	{
		self.map(|o| o.navigate_target(target))
	}

	fn map(mut self, f: impl FnOnce(ColumnOptions<R>) -> ColumnOptions<R>) -> Self {
		self.options = f(self.options);
		self
	}
}

impl<R> Debug for FieldColumn<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldColumn")
			.field("options", &self.options)
			.finish()
	}
}

impl<R: Resource> Column<R> for FieldColumn<R> {
	fn options(&self) -> &ColumnOptions<R> {
		&self.options
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[derive(Debug)]
	struct TestRow {
		id: i64,
		value: Option<String>,
	}

	impl Resource for TestRow {
		fn field_names() -> Vec<&'static str> {
			vec!["id", "value"]
		}

		fn get_field(&self, name: &str) -> Option<Value> {
			match name {
				"id" => Some(json!(self.id)),
				"value" => self.value.as_ref().map(|v| json!(v)),
				_ => None,
			}
		}

		fn traversal_path(&self) -> Option<Vec<String>> {
			Some(vec!["rows".to_string(), self.id.to_string()])
		}
	}

	struct PathResolver;

	impl UrlResolver for PathResolver {
		fn resource_url(&self, target: &NavigateTarget, view_name: &str) -> String {
			format!("/{}/{}", target.path.join("/"), view_name)
		}
	}

	impl ListingView for PathResolver {
		fn resolver(&self) -> &dyn UrlResolver {
			self
		}
	}

	fn row(value: Option<&str>) -> TestRow {
		TestRow {
			id: 7,
			value: value.map(str::to_string),
		}
	}

	#[rstest]
	fn test_get_value_reads_field() {
		let column = FieldColumn::<TestRow>::new("value");
		assert_eq!(column.get_value(&PathResolver, &row(Some("Hello"))), json!("Hello"));
	}

	#[rstest]
	#[case("value")]
	#[case("missing")]
	fn test_get_value_missing_or_null_is_empty(#[case] id: &str) {
		let column = FieldColumn::<TestRow>::new(id);
		assert_eq!(column.get_value(&PathResolver, &row(None)), json!(""));
	}

	#[rstest]
	fn test_getter_takes_precedence_over_field() {
		let column = FieldColumn::<TestRow>::new("value")
			.getter(|_view, column, row| Some(json!(format!("{}:{}", column.id, row.id))));
		assert_eq!(column.get_value(&PathResolver, &row(Some("x"))), json!("value:7"));
		assert!(!column.requires_field());
	}

	#[rstest]
	fn test_getter_returning_null_is_empty() {
		let column = FieldColumn::<TestRow>::new("computed").getter(|_, _, _| Some(Value::Null));
		assert_eq!(column.get_value(&PathResolver, &row(None)), json!(""));
	}

	#[rstest]
	fn test_not_clickable_without_navigation() {
		let column = FieldColumn::<TestRow>::new("value");
		assert_eq!(column.get_navigate_url(&row(None), &PathResolver, None), None);
		assert_eq!(
			column.get_navigate_url(&row(None), &PathResolver, Some("edit")),
			None
		);
	}

	#[rstest]
	fn test_navigate_view_name_builds_url() {
		let column = FieldColumn::<TestRow>::new("value").navigate_view_name("show");
		assert_eq!(
			column.get_navigate_url(&row(None), &PathResolver, None),
			Some("/rows/7/show".to_string())
		);
		assert_eq!(
			column.get_navigate_url(&row(None), &PathResolver, Some("edit")),
			Some("/rows/7/edit".to_string())
		);
	}

	#[rstest]
	fn test_url_getter_wins_over_view_name() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let column = FieldColumn::<TestRow>::new("value")
			.navigate_view_name("show")
			.navigate_target(move |_, _| {
				counter.fetch_add(1, Ordering::SeqCst);
				None
			})
			.navigate_url_getter(|_, row| Some(format!("https://example.com/{}", row.id)));

		assert_eq!(
			column.get_navigate_url(&row(None), &PathResolver, None),
			Some("https://example.com/7".to_string())
		);
		assert_eq!(calls.load(Ordering::SeqCst), 0);
	}

	#[rstest]
	fn test_navigate_target_override() {
		let column = FieldColumn::<TestRow>::new("value")
			.navigate_view_name("show")
			.navigate_target(|row, _| {
				Some(NavigateTarget::new(vec!["parents".to_string(), row.id.to_string()]))
			});
		assert_eq!(
			column.get_navigate_url(&row(None), &PathResolver, None),
			Some("/parents/7/show".to_string())
		);
	}

	#[rstest]
	fn test_missing_target_is_not_clickable() {
		let column = FieldColumn::<TestRow>::new("value")
			.navigate_view_name("show")
			.navigate_target(|_, _| None);
		assert_eq!(column.get_navigate_url(&row(None), &PathResolver, None), None);
	}

	#[rstest]
	fn test_render_cell() {
		let column = FieldColumn::<TestRow>::new("id").navigate_view_name("show");
		let cell = column.render_cell(&PathResolver, &row(None));
		assert_eq!(cell.column_id, "id");
		assert_eq!(cell.value, "7");
		assert_eq!(cell.raw, json!(7));
		assert_eq!(cell.navigate_url.as_deref(), Some("/rows/7/show"));
		assert_eq!(cell.template, DEFAULT_BODY_TEMPLATE);
	}

	#[rstest]
	fn test_header_falls_back_to_id() {
		let column = FieldColumn::<TestRow>::new("value");
		let header = column.header();
		assert_eq!(header.name, "value");
		assert_eq!(header.template, DEFAULT_HEADER_TEMPLATE);
	}
}
