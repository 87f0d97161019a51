//! Numeric input

use super::base::ScalarValue;
use crate::field::{FieldError, FieldNode, FieldResult, Widget};
use crate::schema::{FieldKind, FieldSchema};
use crate::validators::NumberValidator;
use serde_json::Value;

/// Number input.
///
/// Values are kept exactly as entered: text typed into the control stays a
/// string, numbers from the backing source stay numbers.
#[derive(Debug, Clone)]
pub struct NumberField {
	scalar: ScalarValue,
}

impl NumberField {
	/// Create a number input
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::fields::NumberField;
	/// use modelform_fields::{FieldNode, FieldSchema};
	/// use serde_json::json;
	///
	/// let mut field = NumberField::new("numberField", FieldSchema::number(), json!("2"));
	/// field.set_value(json!("42")).unwrap();
	/// assert_eq!(field.get_value(), json!("42"));
	/// ```
	pub fn new(name: impl Into<String>, schema: FieldSchema, initial: Value) -> Self {
		Self {
			scalar: ScalarValue::new(name, schema, initial),
		}
	}
}

impl FieldNode for NumberField {
	fn name(&self) -> &str {
		&self.scalar.name
	}

	fn kind(&self) -> FieldKind {
		FieldKind::Number
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
		self.scalar.validate_required()?;
		if let Value::String(s) = self.scalar.get()
			&& !s.trim().is_empty()
		{
			NumberValidator::new().validate(&self.scalar.name, &s)?;
		}
		Ok(())
	}

	fn widget(&self) -> Widget {
		Widget::NumberInput {
			placeholder: self.scalar.schema.placeholder.clone(),
		}
	}

	fn set_value(&mut self, value: Value) -> FieldResult<()> {
		match value {
			Value::String(_) | Value::Number(_) | Value::Null => {
				self.scalar.set(value);
				Ok(())
			}
			_ => Err(FieldError::InvalidValue {
				name: self.scalar.name.clone(),
				expected: "a number or numeric text",
			}),
		}
	}
}
