//! Listing settings
//!
//! Settings are read from a TOML file, then overridden by environment
//! variables prefixed with [`ENV_PREFIX`], then validated:
//!
//! ```toml
//! template_dir = "templates"
//! default_timezone = "Europe/Helsinki"
//! per_page = 50
//! time_format = "YYYY-MM-DD HH:mm"
//! ```
//!
//! `REINHARDT_LISTING_PER_PAGE=10` would then replace `per_page`.

use chrono_tz::Tz;
use reinhardt_tables::column::DEFAULT_TIME_FORMAT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_PREFIX: &str = "REINHARDT_LISTING_";

#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid setting {key}: {message}")]
	Invalid { key: String, message: String },
}

impl SettingsError {
	fn invalid(key: &str, message: impl Into<String>) -> Self {
		SettingsError::Invalid {
			key: key.to_string(),
			message: message.into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingSettings {
	/// Extra templates, overriding the built-in `crud/*.html`
	pub template_dir: Option<PathBuf>,
	/// IANA name used by time columns without their own timezone
	pub default_timezone: String,
	pub per_page: usize,
	/// Arrow-style format for time columns
	pub time_format: String,
}

impl Default for ListingSettings {
	fn default() -> Self {
		Self {
			template_dir: None,
			default_timezone: "UTC".to_string(),
			per_page: 20,
			time_format: DEFAULT_TIME_FORMAT.to_string(),
		}
	}
}

impl ListingSettings {
	/// Load from an optional TOML file, then the environment, then validate
	///
	/// A missing file is not an error; defaults apply.
	pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
		let mut settings = match path {
			Some(path) if path.exists() => Self::from_file(path)?,
			_ => Self::default(),
		};
		settings.apply_env(ENV_PREFIX)?;
		settings.validate()?;
		tracing::debug!(?settings, "listing settings loaded");
		Ok(settings)
	}

	pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
		let content = fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// # Examples
	///
	/// ```
	/// use reinhardt_crud::settings::ListingSettings;
	///
	/// let settings = ListingSettings::from_toml_str("per_page = 5").unwrap();
	/// assert_eq!(settings.per_page, 5);
	/// assert_eq!(settings.default_timezone, "UTC");
	///
	/// assert!(ListingSettings::from_toml_str("page_size = 5").is_err());
	/// ```
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(content)?)
	}

	/// Override settings from `PREFIX`-ed environment variables
	pub fn apply_env(&mut self, prefix: &str) -> Result<(), SettingsError> {
		let overrides = std::env::vars().filter_map(|(key, value)| {
			key.strip_prefix(prefix)
				.map(|name| (name.to_lowercase(), value))
		});
		self.apply_overrides(overrides)
	}

	/// Apply `(setting, value)` string pairs
	pub fn apply_overrides<I>(&mut self, overrides: I) -> Result<(), SettingsError>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		for (key, value) in overrides {
			match key.as_str() {
				"template_dir" => self.template_dir = Some(PathBuf::from(value)),
				"default_timezone" => self.default_timezone = value,
				"time_format" => self.time_format = value,
				"per_page" => {
					self.per_page = value.trim().parse().map_err(|_| {
						SettingsError::invalid("per_page", format!("'{}' is not a number", value))
					})?;
				}
				other => tracing::debug!(setting = other, "ignoring unknown listing setting"),
			}
		}
		Ok(())
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.per_page == 0 {
			return Err(SettingsError::invalid("per_page", "must be greater than 0"));
		}
		self.timezone()?;
		if let Some(dir) = &self.template_dir
			&& !dir.is_dir()
		{
			return Err(SettingsError::invalid(
				"template_dir",
				format!("{} is not a directory", dir.display()),
			));
		}
		Ok(())
	}

	pub fn timezone(&self) -> Result<Tz, SettingsError> {
		self.default_timezone.parse().map_err(|_| {
			SettingsError::invalid(
				"default_timezone",
				format!("unknown timezone '{}'", self.default_timezone),
			)
		})
	}
}
