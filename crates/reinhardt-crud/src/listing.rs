//! Paginated listing pages
//!
//! A [`Listing`] combines a filtered query with a [`Table`] and turns the
//! current page of rows into header and body cells ready for templates.

use crate::error::{ListingError, ListingResult};
use crate::query::Query;
use crate::render::{LISTING_TEMPLATE, Renderer, context};
use crate::request::Request;
use crate::settings::ListingSettings;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use reinhardt_tables::{Cell, HeaderCell, ListingView, Resource, Table, UrlResolver};
use serde::Serialize;
use serde_json::json;
use std::borrow::Borrow;

pub const PAGE_PARAM: &str = "page";
pub const DEFAULT_PER_PAGE: usize = 20;

/// Splits a listing into pages of `per_page` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
	per_page: usize,
}

impl Paginator {
	/// `per_page` of zero is raised to one
	pub fn new(per_page: usize) -> Self {
		Self {
			per_page: per_page.max(1),
		}
	}

	pub fn from_settings(settings: &ListingSettings) -> Self {
		Self::new(settings.per_page)
	}

	pub fn per_page(&self) -> usize {
		self.per_page
	}

	/// The page to show for a requested page number
	///
	/// Missing or unparsable numbers give page 1; numbers past the end give
	/// the last page.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_crud::Paginator;
	///
	/// let paginator = Paginator::new(10);
	/// let page = paginator.page(25, Some("9"));
	/// assert_eq!(page.number, 3);
	/// assert_eq!(page.total_pages, 3);
	/// assert!(page.has_previous);
	/// assert!(!page.has_next);
	///
	/// assert_eq!(paginator.page(25, Some("abc")).number, 1);
	/// assert_eq!(paginator.page(0, None).total_pages, 1);
	/// ```
	pub fn page(&self, total_items: usize, requested: Option<&str>) -> Page {
		let total_pages = total_items.div_ceil(self.per_page).max(1);
		let number = requested
			.and_then(|n| n.trim().parse::<usize>().ok())
			.unwrap_or(1)
			.clamp(1, total_pages);
		Page {
			number,
			per_page: self.per_page,
			total_items,
			total_pages,
			has_previous: number > 1,
			has_next: number < total_pages,
		}
	}
}

impl Default for Paginator {
	fn default() -> Self {
		Self::new(DEFAULT_PER_PAGE)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
	/// 1-based
	pub number: usize,
	pub per_page: usize,
	pub total_items: usize,
	pub total_pages: usize,
	pub has_previous: bool,
	pub has_next: bool,
}

impl Page {
	/// Index of the first row on this page
	pub fn offset(&self) -> usize {
		(self.number - 1) * self.per_page
	}
}

/// One page of a listing, ready for templates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage {
	pub headers: Vec<HeaderCell>,
	pub rows: Vec<Vec<Cell>>,
	pub page: Page,
	/// Rendered filter fragments, in filter order
	pub filters: Vec<String>,
}

/// A filtered query shown through a table
///
/// # Examples
///
/// ```
/// use chrono_tz::Tz;
/// use reinhardt_crud::query::MemoryQuerySet;
/// use reinhardt_crud::render::TeraRenderer;
/// use reinhardt_crud::{Listing, ListingRequest, Paginator};
/// use reinhardt_tables::column::FieldColumn;
/// use reinhardt_tables::{ListingView, Resource, Table, UrlResolver};
/// use serde_json::{json, Value};
/// use std::sync::Arc;
///
/// struct Tag(&'static str);
///
/// impl Resource for Tag {
///     fn field_names() -> Vec<&'static str> {
///         vec!["name"]
///     }
///
///     fn get_field(&self, name: &str) -> Option<Value> {
///         (name == "name").then(|| json!(self.0))
///     }
/// }
///
/// struct TagView;
///
/// impl ListingView for TagView {
///     fn resolver(&self) -> &dyn UrlResolver {
///         unreachable!("the request resolves URLs")
///     }
/// }
///
/// let table = Table::<Tag>::builder().column(FieldColumn::new("name")).build().unwrap();
/// let tags = MemoryQuerySet::new(vec![Tag("rust"), Tag("web"), Tag("crud")]);
/// let request =
///     ListingRequest::from_query_string("page=2", Arc::new(TeraRenderer::new().unwrap())).unwrap();
///
/// let page = Listing::new(&table, tags)
///     .paginator(Paginator::new(2))
///     .page(&TagView, &request, Tz::UTC);
///
/// assert_eq!(page.page.number, 2);
/// assert_eq!(page.rows.len(), 1);
/// assert_eq!(page.rows[0][0].value, "crud");
/// ```
pub struct Listing<'t, R: Resource, Q> {
	table: &'t Table<R>,
	query: Q,
	paginator: Paginator,
	filters: Vec<String>,
}

impl<'t, R, Q> Listing<'t, R, Q>
where
	R: Resource,
	Q: Query,
	Q::Row: Borrow<R>,
{
	pub fn new(table: &'t Table<R>, query: Q) -> Self {
		Self {
			table,
			query,
			paginator: Paginator::default(),
			filters: Vec::new(),
		}
	}

	pub fn paginator(mut self, paginator: Paginator) -> Self {
		self.paginator = paginator;
		self
	}

	/// Rendered filter fragments to show above the table
	pub fn filters(mut self, fragments: Vec<String>) -> Self {
		self.filters = fragments;
		self
	}

	pub fn query(&self) -> &Q {
		&self.query
	}

	/// Build the page selected by the request's `page` parameter
	///
	/// URLs are resolved through `request`. Time columns without their own
	/// timezone use `default_tz`.
	pub fn page<Req: Request>(
		&self,
		view: &dyn ListingView,
		request: &Req,
		default_tz: Tz,
	) -> ListingPage {
		let page = self
			.paginator
			.page(self.query.count(), request.param(PAGE_PARAM));
		let page_view = PageView {
			view,
			request,
			default_tz,
		};

		let rows = self
			.query
			.all()
			.into_iter()
			.skip(page.offset())
			.take(page.per_page)
			.map(|row| self.table.render_row(&page_view, row.borrow()))
			.collect::<Vec<_>>();

		tracing::debug!(
			page = page.number,
			total_pages = page.total_pages,
			rows = rows.len(),
			"listing page built"
		);

		ListingPage {
			headers: self.table.headers(),
			rows,
			page,
			filters: self.filters.clone(),
		}
	}

	/// Render the page through each column's templates and `crud/listing.html`
	pub fn render<Req: Request>(
		&self,
		view: &dyn ListingView,
		request: &Req,
		default_tz: Tz,
	) -> ListingResult<String> {
		let listing = self.page(view, request, default_tz);
		let renderer = request.renderer();

		let headers = listing
			.headers
			.iter()
			.map(|header| render_part(renderer, &header.template, json!({ "header": header })))
			.collect::<ListingResult<Vec<_>>>()?;
		let rows = listing
			.rows
			.iter()
			.map(|cells| {
				cells
					.iter()
					.map(|cell| render_part(renderer, &cell.template, json!({ "cell": cell })))
					.collect::<ListingResult<Vec<_>>>()
			})
			.collect::<ListingResult<Vec<_>>>()?;

		let ctx = context([
			("headers", json!(headers)),
			("rows", json!(rows)),
			("page", json!(listing.page)),
			("filters", json!(listing.filters)),
			("query_string", json!(query_without_page(request)?)),
		])?;
		render_part(renderer, LISTING_TEMPLATE, ctx)
	}
}

/// The request's parameters minus `page`, encoded for pagination links
///
/// Keeps submission order so filters stay applied on every page.
fn query_without_page(request: &dyn Request) -> ListingResult<String> {
	let params: Vec<(&str, &str)> = request
		.params()
		.iter()
		.filter(|(key, _)| key != PAGE_PARAM)
		.map(|(key, value)| (key.as_str(), value.as_str()))
		.collect();
	Ok(serde_urlencoded::to_string(params)?)
}

fn render_part(
	renderer: &dyn Renderer,
	template: &str,
	ctx: serde_json::Value,
) -> ListingResult<String> {
	renderer.render(template, &ctx).map_err(|e| {
		tracing::error!(template = %template, error = %e, "listing rendering failed");
		ListingError::Render(e)
	})
}

/// The caller's view with the request's URLs and the page's default timezone
struct PageView<'a, Req> {
	view: &'a dyn ListingView,
	request: &'a Req,
	default_tz: Tz,
}

impl<Req: Request> ListingView for PageView<'_, Req> {
	fn resolver(&self) -> &dyn UrlResolver {
		self.request
	}

	fn default_timezone(&self) -> Tz {
		self.default_tz
	}

	fn now(&self) -> DateTime<Utc> {
		self.view.now()
	}
}
