
use fixtures::{AdminView, TestUser, sample_users, view};
use proptest::prelude::*;
use reinhardt_tables::column::{
	ControlsColumn, FieldColumn, FriendlyTimeColumn, StringPresentationColumn, arrow_to_strftime,
	display_value,
};
use reinhardt_tables::{Column, Table, TableError};
use rstest::*;
use serde_json::{Value, json};

#[rstest]
fn test_string_presentation_uses_display(sample_users: Vec<TestUser>, view: AdminView) {
	let column = StringPresentationColumn::<TestUser>::new("name");
	assert_eq!(column.get_value(&view, &sample_users[0]), json!("Alice"));
}

#[rstest]
fn test_string_presentation_formatter(sample_users: Vec<TestUser>, view: AdminView) {
	let column =
		StringPresentationColumn::<TestUser>::new("label").formatter(|s| format!("<{}>", s));
	assert_eq!(column.get_value(&view, &sample_users[1]), json!("<Bob>"));
}

#[rstest]
fn test_friendly_time_in_utc(sample_users: Vec<TestUser>, view: AdminView) {
	let column =
		FriendlyTimeColumn::<TestUser>::new("last_login_at", "Last login").format("MM/DD/YYYY HH:mm");
	let friendly = column.friendly_time(&view, &sample_users[0]).unwrap();

	assert_eq!(friendly.absolute, "01/01/2024 00:00");
	assert!(!friendly.relative.is_empty());
	assert_eq!(friendly.relative, "3 hours ago");
}

#[rstest]
fn test_friendly_time_timezone_override(sample_users: Vec<TestUser>, view: AdminView) {
	let column = FriendlyTimeColumn::<TestUser>::new("last_login_at", "Last login")
		.timezone("America/New_York")
		.unwrap();
	let cell = column.render_cell(&view, &sample_users[0]);

	assert_eq!(cell.value, "12/31/2023 19:00");
	assert_eq!(
		cell.friendly_time.map(|f| f.iso),
		Some("2024-01-01T00:00:00+00:00".to_string())
	);
	assert_eq!(cell.template, "crud/column_body_friendly_time.html");
}

#[rstest]
fn test_friendly_time_missing_value(sample_users: Vec<TestUser>, view: AdminView) {
	let column = FriendlyTimeColumn::<TestUser>::new("last_login_at", "Last login");
	let cell = column.render_cell(&view, &sample_users[1]);

	assert_eq!(cell.value, "");
	assert!(cell.friendly_time.is_none());
}

#[rstest]
fn test_render_row(sample_users: Vec<TestUser>, view: AdminView) {
	let table = Table::<TestUser>::builder()
		.column(FieldColumn::new("email").name("Email").navigate_view_name("show"))
		.column(FieldColumn::new("admin"))
		.column(ControlsColumn::new())
		.build()
		.unwrap();

	let headers = table.headers();
	assert_eq!(headers[0].name, "Email");
	assert_eq!(headers[2].template, "crud/column_header_controls.html");

	let cells = table.render_row(&view, &sample_users[0]);
	assert_eq!(cells.len(), 3);
	assert_eq!(cells[0].value, "alice@example.com");
	assert_eq!(cells[0].navigate_url.as_deref(), Some("/admin/users/1/show"));
	assert_eq!(cells[1].value, "true");
	assert_eq!(cells[1].navigate_url, None);

	let urls: Vec<&str> = cells[2].actions.iter().map(|a| a.url.as_str()).collect();
	assert_eq!(
		urls,
		vec!["/admin/users/1/show", "/admin/users/1/edit", "/admin/users/1/delete"]
	);
}

#[rstest]
fn test_controls_id_cannot_be_reused() {
	let result = Table::<TestUser>::builder()
		.column(ControlsColumn::new())
		.column(ControlsColumn::new())
		.build();
	assert_eq!(
		result.err(),
		Some(TableError::DuplicateColumn("controls".to_string()))
	);
}

#[rstest]
fn test_cell_serializes_for_templates(sample_users: Vec<TestUser>, view: AdminView) {
	let column = FieldColumn::<TestUser>::new("name");
	let cell = serde_json::to_value(column.render_cell(&view, &sample_users[1])).unwrap();

	assert_eq!(cell["value"], json!("Bob"));
	assert_eq!(cell["navigate_url"], Value::Null);
	assert!(cell.get("actions").is_none());
}

proptest! {
	#[test]
	fn prop_get_value_is_total(field in "[a-z_]{0,12}") {
		let user = TestUser {
			id: 9,
			name: String::new(),
			email: String::new(),
			admin: false,
			last_login_at: None,
		};
		let view = view();
		let column = FieldColumn::<TestUser>::new(field);
		let value = column.get_value(&view, &user);
		prop_assert_ne!(value, Value::Null);
	}

	#[test]
	fn prop_arrow_format_never_leaves_bare_percent(format in ".{0,24}") {
		let translated = arrow_to_strftime(&format);
		let stripped = translated.replace("%%", "");
		prop_assert!(!stripped.ends_with('%'));
	}

	#[test]
	fn prop_display_value_of_strings_is_identity(s in ".*") {
		prop_assert_eq!(display_value(&Value::String(s.clone())), s);
	}
}
