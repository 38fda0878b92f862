//! Column types for listing tables

pub mod base;
pub mod controls;
pub mod string;
pub mod time;

pub use base::{
	ActionLink, Cell, Column, ColumnOptions, DEFAULT_BODY_TEMPLATE, DEFAULT_HEADER_TEMPLATE,
	DEFAULT_TIME_FORMAT, FieldColumn, Getter, HeaderCell, NavigateTargetGetter, NavigateUrlGetter,
	default_cell, display_value,
};
pub use controls::{
	CONTROLS_BODY_TEMPLATE, CONTROLS_HEADER_TEMPLATE, CONTROLS_ID, CONTROLS_NAME, ControlsColumn,
};
pub use string::{Formatter, StringPresentationColumn};
pub use time::{
	FRIENDLY_TIME_BODY_TEMPLATE, FriendlyTime, FriendlyTimeColumn, arrow_to_strftime,
	format_friendly_time, humanize, parse_timestamp,
};
