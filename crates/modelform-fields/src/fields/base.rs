//! Edit buffer shared by the scalar widgets

use crate::field::{FieldError, FieldResult, is_empty_value};
use crate::schema::FieldSchema;
use serde_json::Value;

/// Name, schema entry, initial value and edit buffer of a scalar field.
#[derive(Debug, Clone)]
pub struct ScalarValue {
	pub name: String,
	pub schema: FieldSchema,
	pub initial: Value,
	value: Value,
}

impl ScalarValue {
	/// Create a scalar seeded with `initial`
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::FieldSchema;
	/// use modelform_fields::fields::ScalarValue;
	/// use serde_json::json;
	///
	/// let scalar = ScalarValue::new("test", FieldSchema::text(), json!("fieldInitial"));
	/// assert_eq!(scalar.get(), json!("fieldInitial"));
	/// ```
	pub fn new(name: impl Into<String>, schema: FieldSchema, initial: Value) -> Self {
		Self {
			name: name.into(),
			schema,
			value: initial.clone(),
			initial,
		}
	}

	/// The edited value, falling back to the initial one while the edit
	/// buffer is `null`.
	pub fn get(&self) -> Value {
		if self.value.is_null() {
			self.initial.clone()
		} else {
			self.value.clone()
		}
	}

	pub fn set(&mut self, value: Value) {
		self.value = value;
	}

	/// The raw edit buffer, without the fallback to the initial value.
	pub fn edit_buffer(&self) -> &Value {
		&self.value
	}

	pub fn validate_required(&self) -> FieldResult<()> {
		if self.schema.required && is_empty_value(&self.get()) {
			return Err(FieldError::Required(self.name.clone()));
		}
		Ok(())
	}
}
