//! Filter processing tests
//!
//! Runs the stock filters through `process_filters` against an in-memory
//! user collection and checks both the narrowed query and the fragments.


use fixtures::{Group, User, groups, request, two_users};
use proptest::prelude::*;
use reinhardt_crud::filter::{
	BooleanFilter, BooleanFilterConfig, ChoiceFilter, ChoiceFilterConfig, FilterParams,
	RangeFilter, RangeFilterConfig, SearchFilter, SearchFilterConfig,
	SingleRelationshipValueFilter, SingleRelationshipValueFilterConfig,
};
use reinhardt_crud::query::MemoryQuerySet;
use reinhardt_crud::{
	Filter, FilterContext, ListingError, Predicate, Query, RenderError, Request, process_filters,
};
use reinhardt_forms::{CharField, Form};
use rstest::*;
use serde_json::json;

type Users = MemoryQuerySet<User>;
type Filters = Vec<Box<dyn Filter<Users>>>;

fn admin_filter() -> Box<dyn Filter<Users>> {
	Box::new(BooleanFilter::new(BooleanFilterConfig::new("admin").title("Admin")))
}

fn ids(query: &Users) -> Vec<i64> {
	query.all().iter().map(|u| u.id).collect()
}

#[rstest]
fn test_no_parameters_keep_every_row(two_users: Users) {
	let filters: Filters = vec![admin_filter()];

	let (query, fragments) =
		process_filters(&request(""), &filters, two_users, &FilterContext::new()).unwrap();

	assert_eq!(query.count(), 2);
	assert_eq!(fragments.len(), 1);
	assert!(fragments[0].contains(r#"data-filter="admin""#));
	assert!(fragments[0].contains("Admin"));
	assert!(!fragments[0].contains("has-error"));
}

#[rstest]
#[case("admin=true", vec![1])]
#[case("admin=yes", vec![1])]
#[case("admin=false", vec![2])]
#[case("admin=", vec![1, 2])]
#[case("admin=yes&admin=zzz", vec![1])]
fn test_boolean_filter_narrows(two_users: Users, #[case] query: &str, #[case] expected: Vec<i64>) {
	let filters: Filters = vec![admin_filter()];

	let (query, _) =
		process_filters(&request(query), &filters, two_users, &FilterContext::new()).unwrap();

	assert_eq!(ids(&query), expected);
}

#[rstest]
fn test_invalid_value_is_shown_not_applied(two_users: Users) {
	let filters: Filters = vec![admin_filter()];

	let (query, fragments) = process_filters(
		&request("admin=maybe"),
		&filters,
		two_users,
		&FilterContext::new(),
	)
	.unwrap();

	assert_eq!(query.count(), 2);
	assert!(fragments[0].contains("has-error"));
	assert!(fragments[0].contains(r#"<ul class="errorlist">"#));
	assert!(fragments[0].contains("maybe is not one of the available choices"));
}

#[rstest]
fn test_successful_filter_selects_cleaned_value(two_users: Users) {
	let filters: Filters = vec![admin_filter()];

	let (_, fragments) =
		process_filters(&request("admin=yes"), &filters, two_users, &FilterContext::new())
			.unwrap();

	// "yes" cleans to true, which is the option shown as selected
	assert!(fragments[0].contains(r#"<option value="true" selected>"#));
}

#[rstest]
fn test_filter_context_reaches_template(two_users: Users) {
	let filters: Filters = vec![admin_filter()];
	let ctx = FilterContext::new().with("css_class", "sidebar");

	let (_, fragments) = process_filters(&request(""), &filters, two_users, &ctx).unwrap();

	assert!(fragments[0].contains(r#"class="crud-filter sidebar""#));
}

#[rstest]
fn test_filters_chain_in_order(two_users: Users) {
	let filters: Filters = vec![
		admin_filter(),
		Box::new(RangeFilter::new(RangeFilterConfig::new("age"))),
	];

	let (query, fragments) = process_filters(
		&request("admin=false&age-min=18"),
		&filters,
		two_users,
		&FilterContext::new(),
	)
	.unwrap();

	// u2 passes the admin filter but is 17
	assert_eq!(query.count(), 0);
	assert_eq!(fragments.len(), 2);
	assert!(fragments[0].contains(r#"data-filter="admin""#));
	assert!(fragments[1].contains(r#"data-filter="age""#));
}

#[rstest]
fn test_filter_order_does_not_change_result(two_users: Users) {
	let req = request("admin=true&age-max=40");
	let forward: Filters = vec![
		admin_filter(),
		Box::new(RangeFilter::new(RangeFilterConfig::new("age"))),
	];
	let backward: Filters = vec![
		Box::new(RangeFilter::new(RangeFilterConfig::new("age"))),
		admin_filter(),
	];

	let (a, _) = process_filters(&req, &forward, two_users.clone(), &FilterContext::new()).unwrap();
	let (b, _) = process_filters(&req, &backward, two_users, &FilterContext::new()).unwrap();

	assert_eq!(ids(&a), ids(&b));
	assert_eq!(ids(&a), vec![1]);
}

#[rstest]
fn test_empty_filter_list_returns_query_unchanged(two_users: Users) {
	let filters: Filters = Vec::new();

	let (query, fragments) =
		process_filters(&request("admin=true"), &filters, two_users, &FilterContext::new())
			.unwrap();

	assert_eq!(query.count(), 2);
	assert!(fragments.is_empty());
}

#[rstest]
fn test_duplicate_filter_names_are_rejected(two_users: Users) {
	let filters: Filters = vec![admin_filter(), admin_filter()];

	let result = process_filters(&request(""), &filters, two_users, &FilterContext::new());

	assert!(matches!(result, Err(ListingError::ContractViolation(_))));
}

#[rstest]
fn test_filters_sharing_a_prefixed_parameter_are_rejected(two_users: Users) {
	let choice = ChoiceFilterConfig::new("age-min").choice("18", "Adults");
	let filters: Filters = vec![
		Box::new(RangeFilter::new(RangeFilterConfig::new("age"))),
		Box::new(ChoiceFilter::new(choice).unwrap()),
	];

	let result = process_filters(&request(""), &filters, two_users, &FilterContext::new());

	match result {
		Err(ListingError::ContractViolation(message)) => {
			assert!(message.contains("'age-min'"), "{}", message);
		}
		other => panic!("expected a contract violation, got {:?}", other.map(|(q, _)| q)),
	}
}

#[rstest]
fn test_range_minimum_above_maximum(two_users: Users) {
	let filters: Filters = vec![Box::new(RangeFilter::new(
		RangeFilterConfig::new("age").title("Age"),
	))];

	let (query, fragments) = process_filters(
		&request("age-min=50&age-max=20"),
		&filters,
		two_users,
		&FilterContext::new(),
	)
	.unwrap();

	assert_eq!(query.count(), 2);
	assert!(fragments[0].contains("errorlist nonfield"));
	assert!(fragments[0].contains("Minimum 50 is greater than maximum 20."));
}

#[rstest]
#[case("age-min=18", vec![1])]
#[case("age-max=18", vec![2])]
#[case("age-min=17&age-max=30", vec![1, 2])]
fn test_range_bounds_are_inclusive(
	two_users: Users,
	#[case] query: &str,
	#[case] expected: Vec<i64>,
) {
	let filters: Filters = vec![Box::new(RangeFilter::new(RangeFilterConfig::new("age")))];

	let (query, _) =
		process_filters(&request(query), &filters, two_users, &FilterContext::new()).unwrap();

	assert_eq!(ids(&query), expected);
}

#[rstest]
#[case("q=U2@EXAMPLE", vec![2])]
#[case("q=example.com", vec![1, 2])]
#[case("q=nobody", vec![])]
#[case("q=", vec![1, 2])]
fn test_search_filter_matches_any_field(
	two_users: Users,
	#[case] query: &str,
	#[case] expected: Vec<i64>,
) {
	let search = SearchFilter::new(SearchFilterConfig::new(["email", "id"])).unwrap();
	let filters: Filters = vec![Box::new(search)];

	let (query, fragments) =
		process_filters(&request(query), &filters, two_users, &FilterContext::new()).unwrap();

	assert_eq!(ids(&query), expected);
	assert!(fragments[0].contains("Search"));
}

#[rstest]
fn test_choice_filter(two_users: Users) {
	let config = ChoiceFilterConfig::new("age")
		.title("Age group")
		.choice("17", "Minor")
		.choice("30", "Adult");
	let filters: Filters = vec![Box::new(ChoiceFilter::new(config).unwrap())];

	let (query, fragments) =
		process_filters(&request("age=30"), &filters, two_users, &FilterContext::new()).unwrap();

	assert_eq!(ids(&query), vec![1]);
	assert!(fragments[0].contains("Adult"));
}

#[rstest]
fn test_relationship_filter_choose_group(two_users: Users, groups: Vec<Group>) {
	let config = SingleRelationshipValueFilterConfig::new("group_id").title("Choose group");
	let filter = SingleRelationshipValueFilter::new(config, groups.iter());
	let filters: Filters = vec![Box::new(filter)];

	let (query, fragments) =
		process_filters(&request("group_id=2"), &filters, two_users, &FilterContext::new())
			.unwrap();

	assert_eq!(ids(&query), vec![2]);
	assert!(fragments[0].contains("Choose group"));
	assert!(fragments[0].contains(r#"<option value="2" selected>Guests</option>"#));
	assert!(fragments[0].contains(r#"<option value="1">Staff</option>"#));
}

#[rstest]
fn test_relationship_filter_from_related_query(two_users: Users, groups: Vec<Group>) {
	let related = MemoryQuerySet::new(groups);
	let config = SingleRelationshipValueFilterConfig::new("group_id");
	let filter = SingleRelationshipValueFilter::from_query(config, &related);
	let filters: Filters = vec![Box::new(filter)];

	let (query, fragments) =
		process_filters(&request("group_id=7"), &filters, two_users, &FilterContext::new())
			.unwrap();

	// 7 is not one of the groups
	assert_eq!(query.count(), 2);
	assert!(fragments[0].contains("has-error"));
}

#[rstest]
fn test_filters_from_config_records() {
	let boolean = BooleanFilter::from_value(json!({"field": "admin", "yes_label": "Admins"}));
	assert!(boolean.is_ok());

	let unknown = RangeFilter::from_value(json!({"field": "age", "step": 5}));
	assert!(matches!(unknown, Err(ListingError::Config(_))));

	let missing_field = SearchFilter::from_value(json!({"title": "Search"}));
	assert!(matches!(missing_field, Err(ListingError::Config(_))));
}

#[rstest]
fn test_create_form_is_repeatable() {
	let filter = RangeFilter::new(RangeFilterConfig::new("age").bounds(0, 150));
	let req = request("age-min=3");
	let ctx = FilterContext::new();

	let first = Filter::<Users>::create_form(&filter, &req, &ctx);
	let second = Filter::<Users>::create_form(&filter, &req, &ctx);

	assert_eq!(first.schema(), second.schema());
	assert_eq!(first.render_bound(), second.render_bound());
	assert_eq!(first.data(), second.data());
}

/// A filter whose wrapper template does not exist
struct MisconfiguredFilter;

impl Filter<Users> for MisconfiguredFilter {
	fn name(&self) -> &str {
		"email"
	}

	fn template(&self) -> &str {
		"crud/missing.html"
	}

	fn create_form(&self, request: &dyn Request, _filter_context: &FilterContext) -> Form {
		let mut form = Form::new().field(CharField::new("email"));
		form.bind_params(request.params().iter().map(|(k, v)| (k.as_str(), v.as_str())));
		form
	}

	fn apply_on_query(&self, query: &Users, params: &FilterParams) -> Users {
		match params.get("email").and_then(|v| v.as_str()) {
			Some(email) if !email.is_empty() => query.filter(Predicate::eq("email", email).into()),
			_ => query.clone(),
		}
	}
}

#[rstest]
fn test_missing_template_fails_the_pipeline(two_users: Users) {
	let filters: Filters = vec![admin_filter(), Box::new(MisconfiguredFilter)];

	let result = process_filters(
		&request("email=u1@example.com"),
		&filters,
		two_users,
		&FilterContext::new(),
	);

	match result {
		Err(ListingError::Render(RenderError::TemplateNotFound(name))) => {
			assert_eq!(name, "crud/missing.html");
		}
		other => panic!("expected a missing template error, got {:?}", other.map(|(q, _)| q)),
	}
}

proptest! {
	#[test]
	fn prop_adding_filters_never_grows_the_result(
		ages in proptest::collection::vec(0i64..100, 0..30),
		minimums in proptest::collection::vec(0i64..100, 1..5),
	) {
		let users = MemoryQuerySet::new(
			ages.iter()
				.enumerate()
				.map(|(i, age)| {
					let mut user = User::new(i as i64, &format!("u{}@example.com", i), false);
					user.age = *age;
					user
				})
				.collect(),
		);
		let query_string = minimums
			.iter()
			.enumerate()
			.map(|(i, min)| format!("age{}-min={}", i, min))
			.collect::<Vec<_>>()
			.join("&");
		let req = request(&query_string);

		let mut previous = users.count();
		for n in 1..=minimums.len() {
			let filters: Filters = (0..n)
				.map(|i| {
					let mut config = RangeFilterConfig::new("age");
					config.param = Some(format!("age{}", i));
					Box::new(RangeFilter::new(config)) as Box<dyn Filter<Users>>
				})
				.collect();
			let (query, fragments) =
				process_filters(&req, &filters, users.clone(), &FilterContext::new()).unwrap();
			prop_assert_eq!(fragments.len(), n);
			prop_assert!(query.count() <= previous);
			previous = query.count();
		}
	}
}
