//! Timestamp column printing both the exact and the humanized relative time

use crate::column::base::{Cell, Column, ColumnOptions, default_cell};
use crate::error::{Result, TableError};
use crate::resource::{ListingView, Resource};
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Debug};

pub const FRIENDLY_TIME_BODY_TEMPLATE: &str = "crud/column_body_friendly_time.html";

/// Two renderings of one stored timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendlyTime {
	/// Formatted in the column (or view) timezone
	pub absolute: String,
	/// e.g. "3 hours ago", "in 2 days"
	pub relative: String,
	/// RFC 3339 in UTC, for `<time datetime=...>`
	pub iso: String,
}

/// Column for timestamps
///
/// # Example
///
/// ```rust
/// use reinhardt_tables::column::FriendlyTimeColumn;
/// # struct User;
///
/// let column = FriendlyTimeColumn::<User>::new("last_login_at", "Last login")
///     .timezone("Europe/Helsinki")
///     .unwrap();
/// assert_eq!(column.timezone_override().map(|tz| tz.name()), Some("Europe/Helsinki"));
/// ```
pub struct FriendlyTimeColumn<R> {
	options: ColumnOptions<R>,
	timezone: Option<Tz>,
}

impl<R> FriendlyTimeColumn<R> {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			options: ColumnOptions::new(id)
				.name(name)
				.body_template(FRIENDLY_TIME_BODY_TEMPLATE),
			timezone: None,
		}
	}

	/// Override the view's timezone with an IANA name
	pub fn timezone(self, name: &str) -> Result<Self> {
		let tz: Tz = name
			.parse()
			.map_err(|_| TableError::InvalidTimezone(name.to_string()))?;
		Ok(self.with_timezone(tz))
	}

	pub fn with_timezone(mut self, tz: Tz) -> Self {
		self.timezone = Some(tz);
		self
	}

	/// Arrow-style format, e.g. `MM/DD/YYYY HH:mm`
	pub fn format(mut self, format: impl Into<String>) -> Self {
		self.options = self.options.format(format);
		self
	}

	pub fn navigate_view_name(mut self, view_name: impl Into<String>) -> Self {
		self.options = self.options.navigate_view_name(view_name);
		self
	}

	pub fn header_template(mut self, template: impl Into<String>) -> Self {
		self.options = self.options.header_template(template);
		self
	}

	pub fn timezone_override(&self) -> Option<Tz> {
		self.timezone
	}
}

impl<R: Resource> FriendlyTimeColumn<R> {
	/// Both renderings of this column's value, `None` if it is not a timestamp
	pub fn friendly_time(&self, view: &dyn ListingView, obj: &R) -> Option<FriendlyTime> {
		let value = self.get_value(view, obj);
		let tz = self.timezone.unwrap_or_else(|| view.default_timezone());
		format_friendly_time(&value, &self.options.format, tz, view.now())
	}
}

impl<R> Debug for FriendlyTimeColumn<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FriendlyTimeColumn")
			.field("options", &self.options)
			.field("timezone", &self.timezone)
			.finish()
	}
}

impl<R: Resource> Column<R> for FriendlyTimeColumn<R> {
	fn options(&self) -> &ColumnOptions<R> {
		&self.options
	}

	fn render_cell(&self, view: &dyn ListingView, obj: &R) -> Cell {
		let mut cell = default_cell(self, view, obj);
		cell.friendly_time = self.friendly_time(view, obj);
		if let Some(friendly) = &cell.friendly_time {
			cell.value = friendly.absolute.clone();
		}
		cell
	}
}

/// Render a stored timestamp as absolute and relative text
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use reinhardt_tables::column::format_friendly_time;
/// use serde_json::json;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap();
/// let friendly = format_friendly_time(
///     &json!("2024-01-01T00:00:00Z"),
///     "MM/DD/YYYY HH:mm",
///     chrono_tz::UTC,
///     now,
/// )
/// .unwrap();
///
/// assert_eq!(friendly.absolute, "01/01/2024 00:00");
/// assert_eq!(friendly.relative, "3 hours ago");
/// ```
pub fn format_friendly_time(
	value: &Value,
	format: &str,
	tz: Tz,
	now: DateTime<Utc>,
) -> Option<FriendlyTime> {
	let timestamp = parse_timestamp(value)?;
	let absolute = timestamp
		.with_timezone(&tz)
		.format(&arrow_to_strftime(format))
		.to_string();
	Some(FriendlyTime {
		absolute,
		relative: humanize(timestamp, now),
		iso: timestamp.to_rfc3339(),
	})
}

/// Accepts RFC 3339 strings, naive `YYYY-MM-DD HH:MM:SS` (taken as UTC) and
/// integer UNIX seconds
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
	match value {
		Value::String(s) => {
			let s = s.trim();
			if s.is_empty() {
				return None;
			}
			if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
				return Some(dt.with_timezone(&Utc));
			}
			["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
				.iter()
				.find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
				.map(|naive| naive.and_utc())
		}
		Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
		_ => None,
	}
}

/// Humanized distance between `then` and `now`
pub fn humanize(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
	let formatter = timeago::Formatter::new();
	let delta = now.signed_duration_since(then);
	match delta.to_std() {
		Ok(elapsed) => {
			let text = formatter.convert(elapsed);
			if text == "now" {
				"just now".to_string()
			} else {
				text
			}
		}
		Err(_) => {
			let ahead = (-delta).to_std().unwrap_or_default();
			match formatter.convert(ahead).strip_suffix(" ago") {
				Some(span) => format!("in {}", span),
				None => "just now".to_string(),
			}
		}
	}
}

// Longest tokens first so `MMMM` wins over `MM`
const ARROW_TOKENS: &[(&str, &str)] = &[
	("YYYY", "%Y"),
	("YY", "%y"),
	("MMMM", "%B"),
	("MMM", "%b"),
	("MM", "%m"),
	("M", "%-m"),
	("DDDD", "%j"),
	("DD", "%d"),
	("D", "%-d"),
	("dddd", "%A"),
	("ddd", "%a"),
	("HH", "%H"),
	("H", "%-H"),
	("hh", "%I"),
	("h", "%-I"),
	("mm", "%M"),
	("m", "%-M"),
	("ss", "%S"),
	("s", "%-S"),
	("A", "%p"),
	("a", "%P"),
	("ZZ", "%:z"),
	("Z", "%z"),
	("X", "%s"),
];

/// Translate an Arrow/Moment format string into a chrono `strftime` string
///
/// Text inside `[...]` is copied literally.
///
/// # Examples
///
/// ```
/// use reinhardt_tables::column::arrow_to_strftime;
///
/// assert_eq!(arrow_to_strftime("MM/DD/YYYY HH:mm"), "%m/%d/%Y %H:%M");
/// assert_eq!(arrow_to_strftime("[at] h:mm A"), "at %-I:%M %p");
/// assert_eq!(arrow_to_strftime("100%"), "100%%");
/// ```
pub fn arrow_to_strftime(format: &str) -> String {
	let mut out = String::with_capacity(format.len() * 2);
	let mut rest = format;

	'scan: while let Some(c) = rest.chars().next() {
		if c == '['
			&& let Some(end) = rest.find(']')
		{
			push_literal(&mut out, &rest[1..end]);
			rest = &rest[end + 1..];
			continue;
		}
		for (token, replacement) in ARROW_TOKENS {
			if rest.starts_with(token) {
				out.push_str(replacement);
				rest = &rest[token.len()..];
				continue 'scan;
			}
		}
		push_literal(&mut out, &rest[..c.len_utf8()]);
		rest = &rest[c.len_utf8()..];
	}
	out
}

fn push_literal(out: &mut String, text: &str) {
	for c in text.chars() {
		if c == '%' {
			out.push_str("%%");
		} else {
			out.push(c);
		}
	}
}
