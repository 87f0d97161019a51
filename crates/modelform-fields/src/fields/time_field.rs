//! Time-of-day picker

use super::base::ScalarValue;
use crate::field::{FieldError, FieldNode, FieldResult, Widget, display_value};
use crate::schema::{FieldKind, FieldSchema};
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde_json::Value;

/// Time-of-day picker over a full ISO-8601 timestamp.
///
/// Only hour and minute are editable; the date part, seconds and
/// milliseconds of the stored timestamp are preserved. Timestamps are kept
/// in UTC with millisecond precision.
#[derive(Debug, Clone)]
pub struct TimeField {
	scalar: ScalarValue,
}

/// Formats a timestamp the way time fields store it.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
	dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value)
		.ok()
		.map(|dt| dt.with_timezone(&Utc))
}

impl TimeField {
	/// Create a time field, seeded with the current time when `initial` is
	/// `null`.
	pub fn new(name: impl Into<String>, schema: FieldSchema, initial: Value) -> Self {
		Self::new_at(name, schema, initial, Utc::now())
	}

	/// Create a time field, seeded with `now` when `initial` is `null`
	///
	/// # Examples
	///
	/// ```
	/// use chrono::{TimeZone, Utc};
	/// use modelform_fields::fields::TimeField;
	/// use modelform_fields::{FieldNode, FieldSchema};
	/// use serde_json::{Value, json};
	///
	/// let now = Utc.with_ymd_and_hms(2015, 3, 4, 10, 20, 0).unwrap();
	/// let field = TimeField::new_at("start", FieldSchema::time(), Value::Null, now);
	/// assert_eq!(field.get_value(), json!("2015-03-04T10:20:00.000Z"));
	/// assert_eq!(field.time_of_day(), Some((10, 20)));
	/// ```
	pub fn new_at(
		name: impl Into<String>,
		schema: FieldSchema,
		initial: Value,
		now: DateTime<Utc>,
	) -> Self {
		let initial = match initial {
			Value::Null => Value::String(format_timestamp(&now)),
			other => other,
		};
		Self {
			scalar: ScalarValue::new(name, schema, initial),
		}
	}

	pub fn timestamp(&self) -> Option<DateTime<Utc>> {
		match self.scalar.get() {
			Value::String(s) => parse_timestamp(&s),
			_ => None,
		}
	}

	/// Hour and minute of the stored timestamp.
	pub fn time_of_day(&self) -> Option<(u32, u32)> {
		self.timestamp().map(|dt| (dt.hour(), dt.minute()))
	}

	/// Changes hour and minute, keeping the rest of the timestamp
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::fields::TimeField;
	/// use modelform_fields::{FieldNode, FieldSchema};
	/// use serde_json::json;
	///
	/// let mut field = TimeField::new(
	///     "start",
	///     FieldSchema::time(),
	///     json!("2015-03-04T10:20:30.250Z"),
	/// );
	/// field.set_time(18, 5).unwrap();
	/// assert_eq!(field.get_value(), json!("2015-03-04T18:05:30.250Z"));
	/// assert!(field.set_time(24, 0).is_err());
	/// ```
	pub fn set_time(&mut self, hour: u32, minute: u32) -> FieldResult<()> {
		if hour > 23 || minute > 59 {
			return Err(FieldError::InvalidTime { hour, minute });
		}
		let current = self.timestamp().ok_or_else(|| FieldError::InvalidTimestamp {
			name: self.scalar.name.clone(),
			value: display_value(&self.scalar.get()),
		})?;
		let updated = current
			.with_hour(hour)
			.and_then(|dt| dt.with_minute(minute))
			.ok_or(FieldError::InvalidTime { hour, minute })?;
		self.scalar.set(Value::String(format_timestamp(&updated)));
		Ok(())
	}
}

impl FieldNode for TimeField {
	fn name(&self) -> &str {
		&self.scalar.name
	}

	fn kind(&self) -> FieldKind {
		FieldKind::Time
	}

	fn label(&self) -> Option<&str> {
		self.scalar.schema.label.as_deref()
	}

	fn help_text(&self) -> Option<&str> {
		self.scalar.schema.help_text.as_deref()
	}

	fn required(&self) -> bool {
		self.scalar.schema.required
	}

	fn initial(&self) -> &Value {
		&self.scalar.initial
	}

	fn get_value(&self) -> Value {
		self.scalar.get()
	}

	fn validate_field(&self) -> FieldResult<()> {
		self.scalar.validate_required()
	}

	fn widget(&self) -> Widget {
		let (hour, minute) = self.time_of_day().unwrap_or((0, 0));
		Widget::TimeInput { hour, minute }
	}

	/// Replaces the whole timestamp.
	fn set_value(&mut self, value: Value) -> FieldResult<()> {
		match &value {
			Value::String(s) if parse_timestamp(s).is_some() => {
				self.scalar.set(value);
				Ok(())
			}
			other => Err(FieldError::InvalidTimestamp {
				name: self.scalar.name.clone(),
				value: display_value(other),
			}),
		}
	}

	fn as_time_mut(&mut self) -> Option<&mut TimeField> {
		Some(self)
	}
}
