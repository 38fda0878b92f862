//! Composable listing queries
//!
//! Filters narrow a [`Query`] by adding [`FilterCondition`]s. Queries are values:
//! [`Query::filter`] returns a new query and leaves the original untouched, so
//! a query can be read again after later filters narrowed a copy of it.

use reinhardt_tables::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
	Eq,
	Ne,
	Gt,
	Gte,
	Lt,
	Lte,
	/// Field equals one of a list of values
	In,
	/// Case-sensitive substring match
	Contains,
	/// Case-insensitive substring match
	IContains,
	/// Field is null or missing (`Boolean(false)` inverts)
	IsNull,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
	String(String),
	Integer(i64),
	Float(f64),
	Boolean(bool),
	Null,
	List(Vec<FilterValue>),
}

impl From<&str> for FilterValue {
	fn from(value: &str) -> Self {
		FilterValue::String(value.to_string())
	}
}

impl From<String> for FilterValue {
	fn from(value: String) -> Self {
		FilterValue::String(value)
	}
}

impl From<i32> for FilterValue {
	fn from(value: i32) -> Self {
		FilterValue::Integer(value.into())
	}
}

impl From<i64> for FilterValue {
	fn from(value: i64) -> Self {
		FilterValue::Integer(value)
	}
}

impl From<f64> for FilterValue {
	fn from(value: f64) -> Self {
		FilterValue::Float(value)
	}
}

impl From<bool> for FilterValue {
	fn from(value: bool) -> Self {
		FilterValue::Boolean(value)
	}
}

impl From<&Value> for FilterValue {
	fn from(value: &Value) -> Self {
		match value {
			Value::Null => FilterValue::Null,
			Value::Bool(b) => FilterValue::Boolean(*b),
			Value::Number(n) => match n.as_i64() {
				Some(i) => FilterValue::Integer(i),
				None => FilterValue::Float(n.as_f64().unwrap_or(f64::NAN)),
			},
			Value::String(s) => FilterValue::String(s.clone()),
			Value::Array(items) => FilterValue::List(items.iter().map(FilterValue::from).collect()),
			Value::Object(_) => FilterValue::String(value.to_string()),
		}
	}
}

impl fmt::Display for FilterValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FilterValue::String(s) => write!(f, "{}", s),
			FilterValue::Integer(i) => write!(f, "{}", i),
			FilterValue::Float(x) => write!(f, "{}", x),
			FilterValue::Boolean(b) => write!(f, "{}", b),
			FilterValue::Null => write!(f, "null"),
			FilterValue::List(items) => {
				let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
				write!(f, "[{}]", parts.join(", "))
			}
		}
	}
}

/// One comparison against a row field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
	pub field: String,
	pub operator: FilterOperator,
	pub value: FilterValue,
}

impl Predicate {
	pub fn new(
		field: impl Into<String>,
		operator: FilterOperator,
		value: impl Into<FilterValue>,
	) -> Self {
		Self {
			field: field.into(),
			operator,
			value: value.into(),
		}
	}

	pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
		Self::new(field, FilterOperator::Eq, value)
	}

	/// Evaluate against one field value; `None` means the field is missing
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_crud::query::{FilterOperator, Predicate};
	/// use serde_json::json;
	///
	/// let adults = Predicate::new("age", FilterOperator::Gte, 18);
	/// assert!(adults.matches(Some(&json!(30))));
	/// assert!(!adults.matches(Some(&json!(12))));
	/// assert!(!adults.matches(None));
	///
	/// // Submitted form values are strings; numeric fields still compare
	/// assert!(Predicate::eq("group_id", "2").matches(Some(&json!(2))));
	/// ```
	pub fn matches(&self, field: Option<&Value>) -> bool {
		let field = field.unwrap_or(&Value::Null);
		match self.operator {
			FilterOperator::IsNull => {
				let wants_null = !matches!(self.value, FilterValue::Boolean(false));
				field.is_null() == wants_null
			}
			FilterOperator::Eq => compare(field, &self.value) == Some(Ordering::Equal),
			FilterOperator::Ne => {
				!field.is_null() && compare(field, &self.value) != Some(Ordering::Equal)
			}
			FilterOperator::Gt => compare(field, &self.value) == Some(Ordering::Greater),
			FilterOperator::Gte => matches!(
				compare(field, &self.value),
				Some(Ordering::Greater | Ordering::Equal)
			),
			FilterOperator::Lt => compare(field, &self.value) == Some(Ordering::Less),
			FilterOperator::Lte => matches!(
				compare(field, &self.value),
				Some(Ordering::Less | Ordering::Equal)
			),
			FilterOperator::In => match &self.value {
				FilterValue::List(options) => options
					.iter()
					.any(|option| compare(field, option) == Some(Ordering::Equal)),
				single => compare(field, single) == Some(Ordering::Equal),
			},
			FilterOperator::Contains => {
				text_of(field).is_some_and(|text| text.contains(&self.value.to_string()))
			}
			FilterOperator::IContains => text_of(field).is_some_and(|text| {
				text.to_lowercase()
					.contains(&self.value.to_string().to_lowercase())
			}),
		}
	}
}

fn text_of(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}

/// Order a field value against a filter value
///
/// Numbers compare numerically, including numeric strings submitted by
/// forms. Mismatched types and nulls are incomparable.
fn compare(field: &Value, value: &FilterValue) -> Option<Ordering> {
	match (field, value) {
		(Value::Null, _) | (_, FilterValue::Null) | (_, FilterValue::List(_)) => None,
		(Value::Bool(a), FilterValue::Boolean(b)) => Some(a.cmp(b)),
		(Value::Bool(a), FilterValue::String(s)) => s.parse::<bool>().ok().map(|b| a.cmp(&b)),
		(Value::String(a), FilterValue::String(b)) => Some(a.as_str().cmp(b.as_str())),
		(Value::Number(n), _) => {
			let rhs = match value {
				FilterValue::Integer(i) => *i as f64,
				FilterValue::Float(x) => *x,
				FilterValue::String(s) => s.trim().parse::<f64>().ok()?,
				_ => return None,
			};
			n.as_f64()?.partial_cmp(&rhs)
		}
		(Value::String(a), FilterValue::Integer(_) | FilterValue::Float(_)) => {
			let lhs = a.trim().parse::<f64>().ok()?;
			let rhs = match value {
				FilterValue::Integer(i) => *i as f64,
				FilterValue::Float(x) => *x,
				_ => return None,
			};
			lhs.partial_cmp(&rhs)
		}
		_ => None,
	}
}

/// Composite condition supporting AND/OR logic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterCondition {
	Single(Predicate),
	/// All conditions must match
	And(Vec<FilterCondition>),
	/// Any condition must match
	Or(Vec<FilterCondition>),
	Not(Box<FilterCondition>),
}

impl FilterCondition {
	pub fn and(conditions: Vec<FilterCondition>) -> Self {
		Self::And(conditions)
	}

	pub fn or(conditions: Vec<FilterCondition>) -> Self {
		Self::Or(conditions)
	}

	#[allow(clippy::should_implement_trait)]
	pub fn not(condition: FilterCondition) -> Self {
		Self::Not(Box::new(condition))
	}

	/// OR the predicates together, as used by search across several fields
	pub fn or_predicates(predicates: Vec<Predicate>) -> Self {
		Self::Or(predicates.into_iter().map(FilterCondition::Single).collect())
	}

	pub fn and_predicates(predicates: Vec<Predicate>) -> Self {
		Self::And(predicates.into_iter().map(FilterCondition::Single).collect())
	}

	/// Evaluate against a row
	///
	/// An empty `And` matches everything and an empty `Or` matches nothing.
	pub fn evaluate<R: Resource + ?Sized>(&self, row: &R) -> bool {
		match self {
			FilterCondition::Single(predicate) => {
				predicate.matches(row.get_field(&predicate.field).as_ref())
			}
			FilterCondition::And(conditions) => conditions.iter().all(|c| c.evaluate(row)),
			FilterCondition::Or(conditions) => conditions.iter().any(|c| c.evaluate(row)),
			FilterCondition::Not(condition) => !condition.evaluate(row),
		}
	}
}

impl From<Predicate> for FilterCondition {
	fn from(predicate: Predicate) -> Self {
		FilterCondition::Single(predicate)
	}
}

/// A lazily evaluated, composable collection query
///
/// Implementations only ever gain conditions; nothing here writes to the data
/// source.
pub trait Query: Clone + Send + Sync {
	type Row;

	/// A new query further narrowed by `condition`
	fn filter(&self, condition: FilterCondition) -> Self;

	fn count(&self) -> usize;

	fn all(&self) -> Vec<Self::Row>;
}

/// Query over rows held in memory
///
/// Rows are shared through `Arc` between the query and every narrowed copy of
/// it, and are never mutated.
///
/// # Examples
///
/// ```
/// use reinhardt_crud::query::{MemoryQuerySet, Predicate, Query};
/// use reinhardt_tables::Resource;
/// use serde_json::{json, Value};
///
/// struct User {
///     admin: bool,
/// }
///
/// impl Resource for User {
///     fn field_names() -> Vec<&'static str> {
///         vec!["admin"]
///     }
///
///     fn get_field(&self, name: &str) -> Option<Value> {
///         (name == "admin").then(|| json!(self.admin))
///     }
/// }
///
/// let users = MemoryQuerySet::new(vec![User { admin: true }, User { admin: false }]);
/// let admins = users.filter(Predicate::eq("admin", true).into());
///
/// assert_eq!(admins.count(), 1);
/// assert_eq!(users.count(), 2);
/// ```
pub struct MemoryQuerySet<R> {
	rows: Arc<Vec<Arc<R>>>,
	conditions: Vec<FilterCondition>,
}

impl<R> MemoryQuerySet<R> {
	pub fn new(rows: Vec<R>) -> Self {
		Self::from_shared(rows.into_iter().map(Arc::new).collect())
	}

	pub fn from_shared(rows: Vec<Arc<R>>) -> Self {
		Self {
			rows: Arc::new(rows),
			conditions: Vec::new(),
		}
	}

	/// Conditions added so far, in the order filters applied them
	pub fn conditions(&self) -> &[FilterCondition] {
		&self.conditions
	}
}

impl<R: Resource> MemoryQuerySet<R> {
	fn matching(&self) -> impl Iterator<Item = &Arc<R>> {
		self.rows
			.iter()
			.filter(|row| self.conditions.iter().all(|c| c.evaluate::<R>(row)))
	}
}

impl<R> Clone for MemoryQuerySet<R> {
	fn clone(&self) -> Self {
		Self {
			rows: Arc::clone(&self.rows),
			conditions: self.conditions.clone(),
		}
	}
}

impl<R> fmt::Debug for MemoryQuerySet<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryQuerySet")
			.field("rows", &self.rows.len())
			.field("conditions", &self.conditions)
			.finish()
	}
}

impl<R: Resource + Send + Sync> Query for MemoryQuerySet<R> {
	type Row = Arc<R>;

	fn filter(&self, condition: FilterCondition) -> Self {
		let mut narrowed = self.clone();
		narrowed.conditions.push(condition);
		narrowed
	}

	fn count(&self) -> usize {
		self.matching().count()
	}

	fn all(&self) -> Vec<Arc<R>> {
		self.matching().cloned().collect()
	}
}
