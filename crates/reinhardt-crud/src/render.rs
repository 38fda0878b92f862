//! Template rendering for filters, cells and listing pages

use crate::error::{ListingResult, RenderError};
use crate::settings::ListingSettings;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tera::{Context, Tera};

pub const FILTER_TEMPLATE: &str = "crud/filter.html";
pub const LISTING_TEMPLATE: &str = "crud/listing.html";

/// Templates shipped with the crate, `(name, source)`
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
	(FILTER_TEMPLATE, include_str!("../templates/crud/filter.html")),
	(LISTING_TEMPLATE, include_str!("../templates/crud/listing.html")),
	(
		"crud/column_header.html",
		include_str!("../templates/crud/column_header.html"),
	),
	(
		"crud/column_body.html",
		include_str!("../templates/crud/column_body.html"),
	),
	(
		"crud/column_header_controls.html",
		include_str!("../templates/crud/column_header_controls.html"),
	),
	(
		"crud/column_body_controls.html",
		include_str!("../templates/crud/column_body_controls.html"),
	),
	(
		"crud/column_body_friendly_time.html",
		include_str!("../templates/crud/column_body_friendly_time.html"),
	),
];

/// Renders a named template with a JSON object as context
pub trait Renderer: Send + Sync {
	fn render(&self, template: &str, context: &Value) -> Result<String, RenderError>;
}

/// Build a template context object from serializable pairs
///
/// # Examples
///
/// ```
/// use reinhardt_crud::render::context;
/// use serde_json::json;
///
/// let ctx = context([("title", json!("Users")), ("count", json!(2))]).unwrap();
/// assert_eq!(ctx["count"], json!(2));
/// ```
pub fn context<K, V, I>(pairs: I) -> Result<Value, RenderError>
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Serialize,
{
	let mut map = serde_json::Map::new();
	for (key, value) in pairs {
		let key = key.into();
		let value = serde_json::to_value(value).map_err(|source| RenderError::Context {
			key: key.clone(),
			source,
		})?;
		map.insert(key, value);
	}
	Ok(Value::Object(map))
}

/// Tera-backed renderer
///
/// Starts with the built-in `crud/*.html` templates. Templates loaded from a
/// directory take precedence over built-ins with the same name.
///
/// # Examples
///
/// ```
/// use reinhardt_crud::render::{Renderer, TeraRenderer};
/// use serde_json::json;
///
/// let renderer = TeraRenderer::new().unwrap();
/// let html = renderer
///     .render(
///         "crud/filter.html",
///         &json!({"filter_context": {}, "rendered_form": "<form></form>", "filter_name": "admin", "title": null}),
///     )
///     .unwrap();
/// assert!(html.contains("<form></form>"));
/// ```
pub struct TeraRenderer {
	tera: Tera,
}

impl TeraRenderer {
	pub fn new() -> Result<Self, RenderError> {
		Ok(Self {
			tera: builtin_engine()?,
		})
	}

	/// Load `template_dir/**/*.html` on top of the built-ins
	pub fn from_dir(template_dir: impl AsRef<std::path::Path>) -> Result<Self, RenderError> {
		let pattern = format!("{}/**/*.html", template_dir.as_ref().display());
		let mut tera = Tera::new(&pattern)?;
		tera.extend(&builtin_engine()?)?;
		tracing::debug!(
			pattern = %pattern,
			templates = tera.get_template_names().count(),
			"loaded listing templates"
		);
		Ok(Self { tera })
	}

	pub fn from_settings(settings: &ListingSettings) -> ListingResult<Self> {
		let renderer = match &settings.template_dir {
			Some(dir) => Self::from_dir(dir)?,
			None => Self::new()?,
		};
		Ok(renderer)
	}

	/// Register or replace one template from source
	pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
		self.tera.add_raw_template(name, source)?;
		Ok(())
	}

	pub fn has_template(&self, name: &str) -> bool {
		self.tera.get_template_names().any(|n| n == name)
	}
}

fn builtin_engine() -> Result<Tera, RenderError> {
	let mut tera = Tera::default();
	tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())?;
	Ok(tera)
}

impl Renderer for TeraRenderer {
	fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
		if !self.has_template(template) {
			return Err(RenderError::TemplateNotFound(template.to_string()));
		}
		let tera_context = Context::from_value(context.clone())?;
		Ok(self.tera.render(template, &tera_context)?)
	}
}

impl fmt::Debug for TeraRenderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<&str> = self.tera.get_template_names().collect();
		names.sort_unstable();
		f.debug_struct("TeraRenderer")
			.field("templates", &names)
			.finish()
	}
}
