//! Caller-supplied data passed through filters untouched

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extra values for filter forms and templates
///
/// The engine never reads these; they are handed to every
/// [`Filter`](crate::filter::Filter) and exposed to the filter template as
/// `filter_context`.
///
/// # Examples
///
/// ```
/// use reinhardt_crud::FilterContext;
/// use serde_json::json;
///
/// let context = FilterContext::new().with("css_class", "sidebar");
/// assert_eq!(context.get("css_class"), Some(&json!("sidebar")));
/// assert_eq!(context.to_value(), json!({"css_class": "sidebar"}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterContext(Map<String, Value>);

impl FilterContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.0.iter()
	}

	pub fn to_value(&self) -> Value {
		Value::Object(self.0.clone())
	}
}

impl From<Map<String, Value>> for FilterContext {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}
