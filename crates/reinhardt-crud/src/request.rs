//! The request a listing is built for

use crate::error::ListingResult;
use crate::render::Renderer;
use reinhardt_tables::{NavigateTarget, UrlResolver};
use std::fmt;
use std::sync::Arc;

/// Submitted parameters, a renderer and URL resolution for one request
pub trait Request: UrlResolver + Send + Sync {
	/// Query parameters in submission order; keys may repeat
	fn params(&self) -> &[(String, String)];

	/// First value submitted for `name`
	fn param(&self, name: &str) -> Option<&str> {
		self.params()
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	fn renderer(&self) -> &dyn Renderer;
}

/// A request parsed from an URL query string
///
/// Resource URLs are `{base_url}/{path...}/{view_name}`, each segment
/// percent-encoded.
///
/// # Examples
///
/// ```
/// use reinhardt_crud::render::TeraRenderer;
/// use reinhardt_crud::{ListingRequest, Request};
/// use reinhardt_tables::{NavigateTarget, UrlResolver};
/// use std::sync::Arc;
///
/// let renderer = Arc::new(TeraRenderer::new().unwrap());
/// let request = ListingRequest::from_query_string("admin=true&page=2", renderer)
///     .unwrap()
///     .with_base_url("/admin/");
///
/// assert_eq!(request.param("page"), Some("2"));
/// assert_eq!(
///     request.resource_url(&NavigateTarget::new(["users", "1"]), "edit"),
///     "/admin/users/1/edit"
/// );
/// ```
#[derive(Clone)]
pub struct ListingRequest {
	params: Vec<(String, String)>,
	base_url: String,
	renderer: Arc<dyn Renderer>,
}

impl ListingRequest {
	pub fn new(params: Vec<(String, String)>, renderer: Arc<dyn Renderer>) -> Self {
		Self {
			params,
			base_url: String::new(),
			renderer,
		}
	}

	/// Parse `a=1&b=2`; a leading `?` is ignored
	pub fn from_query_string(query: &str, renderer: Arc<dyn Renderer>) -> ListingResult<Self> {
		let query = query.strip_prefix('?').unwrap_or(query);
		let params: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
		Ok(Self::new(params, renderer))
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into().trim_end_matches('/').to_string();
		self
	}

	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((key.into(), value.into()));
		self
	}
}

impl UrlResolver for ListingRequest {
	fn resource_url(&self, target: &NavigateTarget, view_name: &str) -> String {
		let mut url = self.base_url.clone();
		for segment in target.path.iter().map(String::as_str).chain([view_name]) {
			url.push('/');
			url.push_str(&urlencoding::encode(segment));
		}
		url
	}
}

impl Request for ListingRequest {
	fn params(&self) -> &[(String, String)] {
		&self.params
	}

	fn renderer(&self) -> &dyn Renderer {
		self.renderer.as_ref()
	}
}

impl fmt::Debug for ListingRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListingRequest")
			.field("params", &self.params)
			.field("base_url", &self.base_url)
			.finish_non_exhaustive()
	}
}
