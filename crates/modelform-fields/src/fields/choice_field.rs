//! Single-choice selector

use super::base::ScalarValue;
use crate::field::{FieldError, FieldNode, FieldResult, Widget, display_value};
use crate::schema::{FieldKind, FieldSchema};
use crate::settings::FormSettings;
use serde_json::Value;

/// Selector over a fixed list of string choices.
///
/// A blank sentinel option always precedes the declared choices. An
/// untouched selector shows the blank option and reports `null` as its
/// value.
#[derive(Debug, Clone)]
pub struct ChoiceField {
	scalar: ScalarValue,
	blank: String,
}

impl ChoiceField {
	pub fn new(
		name: impl Into<String>,
		schema: FieldSchema,
		initial: Value,
		settings: &FormSettings,
	) -> Self {
		Self {
			scalar: ScalarValue::new(name, schema, initial),
			blank: settings.blank_choice.clone(),
		}
	}

	pub fn choices(&self) -> &[String] {
		&self.scalar.schema.choices
	}

	/// All options in display order, blank sentinel first
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::fields::ChoiceField;
	/// use modelform_fields::{FieldSchema, FormSettings};
	/// use serde_json::Value;
	///
	/// let field = ChoiceField::new(
	///     "color",
	///     FieldSchema::choice(["red", "green"]),
	///     Value::Null,
	///     &FormSettings::default(),
	/// );
	/// assert_eq!(field.options(), vec!["_blank", "red", "green"]);
	/// ```
	pub fn options(&self) -> Vec<String> {
		std::iter::once(self.blank.clone())
			.chain(self.scalar.schema.choices.iter().cloned())
			.collect()
	}

	/// The option currently shown as selected.
	///
	/// Non-string values from the backing source are shown as text, so a
	/// seeded `1` selects the `"1"` option.
	pub fn selected(&self) -> String {
		match self.scalar.get() {
			Value::Null => self.blank.clone(),
			other => display_value(&other),
		}
	}

	/// Whether the value is unset or the blank sentinel.
	pub fn is_blank(&self) -> bool {
		match self.scalar.get() {
			Value::Null => true,
			Value::String(s) => s == self.blank,
			_ => false,
		}
	}
}

impl FieldNode for ChoiceField {
	fn name(&self) -> &str {
		&self.scalar.name
	}

	fn kind(&self) -> FieldKind {
		FieldKind::Choice
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
		if self.scalar.schema.required && self.is_blank() {
			return Err(FieldError::BlankChoice);
		}
		Ok(())
	}

	fn widget(&self) -> Widget {
		Widget::Select {
			options: self.options(),
			selected: self.selected(),
		}
	}

	fn set_value(&mut self, value: Value) -> FieldResult<()> {
		match &value {
			Value::Null => {}
			Value::String(s) if *s == self.blank || self.choices().contains(s) => {}
			Value::String(s) => {
				return Err(FieldError::InvalidChoice {
					name: self.scalar.name.clone(),
					value: s.clone(),
				});
			}
			_ => {
				return Err(FieldError::InvalidValue {
					name: self.scalar.name.clone(),
					expected: "one of the choices",
				});
			}
		}
		self.scalar.set(value);
		Ok(())
	}
}
