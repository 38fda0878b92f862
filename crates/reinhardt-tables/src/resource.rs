//! Row objects, navigation targets and the view a table is rendered in

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;

/// An object that can be listed in a table
///
/// # Examples
///
/// ```
/// use reinhardt_tables::Resource;
/// use serde_json::{json, Value};
///
/// struct User {
///     id: i64,
///     email: String,
/// }
///
/// impl Resource for User {
///     fn field_names() -> Vec<&'static str> {
///         vec!["id", "email"]
///     }
///
///     fn get_field(&self, name: &str) -> Option<Value> {
///         match name {
///             "id" => Some(json!(self.id)),
///             "email" => Some(json!(self.email)),
///             _ => None,
///         }
///     }
///
///     fn traversal_path(&self) -> Option<Vec<String>> {
///         Some(vec!["users".to_string(), self.id.to_string()])
///     }
/// }
///
/// let user = User { id: 1, email: "u1@example.com".to_string() };
/// assert_eq!(user.get_field("email"), Some(json!("u1@example.com")));
/// ```
pub trait Resource: 'static {
	/// Names of the fields [`Resource::get_field`] can resolve
	fn field_names() -> Vec<&'static str>
	where
		Self: Sized;

	fn get_field(&self, name: &str) -> Option<Value>;

	/// Path segments addressing this object, `None` if it cannot be linked to
	fn traversal_path(&self) -> Option<Vec<String>> {
		None
	}
}

/// Where a clicked cell should navigate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigateTarget {
	pub path: Vec<String>,
}

impl NavigateTarget {
	pub fn new<I, S>(path: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			path: path.into_iter().map(Into::into).collect(),
		}
	}

	/// Target the object itself
	pub fn of<R: Resource + ?Sized>(resource: &R) -> Option<Self> {
		resource.traversal_path().map(|path| Self { path })
	}
}

/// Builds URLs for navigation targets
pub trait UrlResolver {
	fn resource_url(&self, target: &NavigateTarget, view_name: &str) -> String;
}

/// The view a table is rendered in, handed to column getters
pub trait ListingView {
	fn resolver(&self) -> &dyn UrlResolver;

	/// Timezone used by time columns without an explicit override
	fn default_timezone(&self) -> Tz {
		Tz::UTC
	}

	/// Reference instant for relative time labels
	fn now(&self) -> DateTime<Utc> {
		Utc::now()
	}
}
