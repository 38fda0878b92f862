//! Listing page tests


use chrono_tz::Tz;
use fixtures::{AdminView, User, request, two_users};
use reinhardt_crud::filter::{BooleanFilter, BooleanFilterConfig, SearchFilter, SearchFilterConfig};
use reinhardt_crud::query::MemoryQuerySet;
use reinhardt_crud::render::TeraRenderer;
use reinhardt_crud::{
	Filter, FilterContext, Listing, ListingError, ListingRequest, ListingSettings, Paginator, Query,
	RenderError, process_filters,
};
use reinhardt_tables::Table;
use reinhardt_tables::column::{ControlsColumn, FieldColumn, FriendlyTimeColumn};
use rstest::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

type Users = MemoryQuerySet<User>;

#[fixture]
fn users_table() -> Table<User> {
	Table::builder()
		.column(FieldColumn::new("email").name("Email").navigate_view_name("show"))
		.column(FriendlyTimeColumn::new("last_login_at", "Last login"))
		.column(ControlsColumn::new())
		.build()
		.unwrap()
}

#[rstest]
fn test_page_cells(users_table: Table<User>, two_users: Users) {
	let req = request("");

	let page = Listing::new(&users_table, two_users).page(&AdminView, &req, Tz::UTC);

	let headers: Vec<_> = page.headers.iter().map(|h| h.name.as_str()).collect();
	assert_eq!(headers, vec!["Email", "Last login", "Actions"]);
	assert_eq!(page.rows.len(), 2);

	let u1 = &page.rows[0];
	assert_eq!(u1[0].value, "u1@example.com");
	assert_eq!(u1[0].navigate_url.as_deref(), Some("/admin/user/1/show"));

	let login = u1[1].friendly_time.as_ref().unwrap();
	assert_eq!(login.relative, "3 hours ago");
	assert_eq!(login.absolute, "01/01/2024 00:00");

	let actions: Vec<_> = u1[2].actions.iter().map(|a| a.url.as_str()).collect();
	assert_eq!(
		actions,
		vec!["/admin/user/1/show", "/admin/user/1/edit", "/admin/user/1/delete"]
	);

	// u2 never logged in
	assert!(page.rows[1][1].friendly_time.is_none());
	assert_eq!(page.page.total_items, 2);
	assert!(!page.page.has_next);
}

#[rstest]
fn test_view_timezone_applies_to_time_columns(users_table: Table<User>, two_users: Users) {
	let req = request("");

	let page =
		Listing::new(&users_table, two_users).page(&AdminView, &req, Tz::America__New_York);

	let login = page.rows[0][1].friendly_time.as_ref().unwrap();
	assert_eq!(login.absolute, "12/31/2023 19:00");
	assert_eq!(login.iso, "2024-01-01T00:00:00+00:00");
}

#[rstest]
#[case("page=2", 2, "u2@example.com")]
#[case("page=1", 1, "u1@example.com")]
#[case("page=9", 2, "u2@example.com")]
#[case("page=abc", 1, "u1@example.com")]
fn test_pagination(
	users_table: Table<User>,
	two_users: Users,
	#[case] query: &str,
	#[case] number: usize,
	#[case] email: &str,
) {
	let req = request(query);

	let page = Listing::new(&users_table, two_users)
		.paginator(Paginator::new(1))
		.page(&AdminView, &req, Tz::UTC);

	assert_eq!(page.page.number, number);
	assert_eq!(page.page.total_pages, 2);
	assert_eq!(page.rows.len(), 1);
	assert_eq!(page.rows[0][0].value, email);
}

#[rstest]
fn test_render_filtered_listing(users_table: Table<User>, two_users: Users) {
	let req = request("admin=true");
	let filters: Vec<Box<dyn Filter<Users>>> = vec![Box::new(BooleanFilter::new(
		BooleanFilterConfig::new("admin").title("Admin"),
	))];
	let (query, fragments) =
		process_filters(&req, &filters, two_users, &FilterContext::new()).unwrap();

	let html = Listing::new(&users_table, query)
		.filters(fragments)
		.render(&AdminView, &req, Tz::UTC)
		.unwrap();

	assert!(html.contains(r#"class="crud-filters""#));
	assert!(html.contains(r#"data-filter="admin""#));
	assert!(html.contains(r#"data-column="email""#));
	assert!(html.contains("u1@example.com"));
	assert!(!html.contains("u2@example.com"));
	assert!(html.contains("3 hours ago"));
	assert!(html.contains("Delete"));
	assert!(!html.contains("crud-pagination"));
}

#[rstest]
fn test_render_empty_listing(users_table: Table<User>, two_users: Users) {
	let req = request("q=nobody");
	let filters: Vec<Box<dyn Filter<Users>>> = vec![Box::new(
		SearchFilter::new(SearchFilterConfig::new(["email"])).unwrap(),
	)];
	let (query, fragments) =
		process_filters(&req, &filters, two_users, &FilterContext::new()).unwrap();

	let html = Listing::new(&users_table, query)
		.filters(fragments)
		.render(&AdminView, &req, Tz::UTC)
		.unwrap();

	assert!(html.contains("No items."));
	assert!(html.contains(r#"colspan="3""#));
}

#[rstest]
fn test_render_pagination_links(users_table: Table<User>, two_users: Users) {
	let req = request("page=2");

	let html = Listing::new(&users_table, two_users)
		.paginator(Paginator::new(1))
		.render(&AdminView, &req, Tz::UTC)
		.unwrap();

	assert!(html.contains("Page 2 of 2 (2 items)"));
	assert!(html.contains(r#"<a rel="prev" href="?page=1">"#));
	assert!(!html.contains(r#"rel="next""#));
}

#[rstest]
fn test_pagination_links_keep_filter_parameters(users_table: Table<User>, two_users: Users) {
	let req = request("q=example&page=1");
	let filters: Vec<Box<dyn Filter<Users>>> = vec![Box::new(
		SearchFilter::new(SearchFilterConfig::new(["email"])).unwrap(),
	)];
	let (query, fragments) =
		process_filters(&req, &filters, two_users, &FilterContext::new()).unwrap();

	let html = Listing::new(&users_table, query)
		.filters(fragments)
		.paginator(Paginator::new(1))
		.render(&AdminView, &req, Tz::UTC)
		.unwrap();

	assert!(html.contains(r#"<a rel="next" href="?q=example&amp;page=2">"#));
}

#[rstest]
fn test_templates_from_directory_override_builtins(two_users: Users) {
	let dir = TempDir::new().unwrap();
	fs::create_dir_all(dir.path().join("crud")).unwrap();
	fs::write(
		dir.path().join("crud/filter.html"),
		r#"<aside id="filter-{{ filter_name }}">{{ rendered_form | safe }}</aside>"#,
	)
	.unwrap();

	let renderer = Arc::new(TeraRenderer::from_dir(dir.path()).unwrap());
	let req = ListingRequest::from_query_string("admin=no", renderer).unwrap();
	let filters: Vec<Box<dyn Filter<Users>>> =
		vec![Box::new(BooleanFilter::new(BooleanFilterConfig::new("admin")))];

	let (query, fragments) =
		process_filters(&req, &filters, two_users, &FilterContext::new()).unwrap();

	assert_eq!(query.count(), 1);
	assert!(fragments[0].starts_with(r#"<aside id="filter-admin">"#));
}

#[rstest]
fn test_missing_column_template_fails_render(two_users: Users) {
	let table = Table::<User>::builder()
		.column(
			FriendlyTimeColumn::new("last_login_at", "Last login").header_template("crud/nope.html"),
		)
		.build()
		.unwrap();
	let req = request("");

	let result = Listing::new(&table, two_users).render(&AdminView, &req, Tz::UTC);

	assert!(matches!(
		result,
		Err(ListingError::Render(RenderError::TemplateNotFound(ref name))) if name == "crud/nope.html"
	));
}

#[rstest]
fn test_listing_from_settings_file(two_users: Users) {
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("listing.toml");
	fs::write(
		&path,
		"default_timezone = \"Europe/Helsinki\"\nper_page = 1\ntime_format = \"YYYY-MM-DD HH:mm\"\n",
	)
	.unwrap();

	let settings = ListingSettings::load(Some(&path)).unwrap();
	let renderer = Arc::new(TeraRenderer::from_settings(&settings).unwrap());
	let req = ListingRequest::from_query_string("", renderer).unwrap();
	let table = Table::<User>::builder()
		.column(
			FriendlyTimeColumn::new("last_login_at", "Last login").format(&settings.time_format),
		)
		.build()
		.unwrap();

	let page = Listing::new(&table, two_users)
		.paginator(Paginator::from_settings(&settings))
		.page(&AdminView, &req, settings.timezone().unwrap());

	assert_eq!(page.page.total_pages, 2);
	assert_eq!(page.rows[0][0].value, "2024-01-01 02:00");
}
