//! Text, password and email inputs

use super::base::ScalarValue;
use crate::field::{
	FieldError, FieldNode, FieldResult, InputType, Widget, display_value, is_empty_value,
};
use crate::schema::{FieldKind, FieldSchema};
use crate::settings::FormSettings;
use crate::validators::{EmailValidator, MaxLengthValidator};
use serde_json::Value;

/// Single-line text input.
///
/// Email inputs additionally check the address format; the check runs even
/// for optional fields, so an empty optional email does not validate.
#[derive(Debug, Clone)]
pub struct InputField {
	scalar: ScalarValue,
	input_type: InputType,
	max_length: MaxLengthValidator,
}

impl InputField {
	/// Create an input for a text, password or email schema entry
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::fields::InputField;
	/// use modelform_fields::{FieldNode, FieldSchema, FormSettings};
	/// use serde_json::json;
	///
	/// let mut field = InputField::new(
	///     "fieldName",
	///     FieldSchema::text().required(),
	///     json!("fieldInitial"),
	///     &FormSettings::default(),
	/// );
	/// assert_eq!(field.get_value(), json!("fieldInitial"));
	///
	/// field.set_value(json!("fieldNewValue")).unwrap();
	/// assert_eq!(field.get_value(), json!("fieldNewValue"));
	/// assert!(field.validate_field().is_ok());
	/// ```
	pub fn new(
		name: impl Into<String>,
		schema: FieldSchema,
		initial: Value,
		settings: &FormSettings,
	) -> Self {
		let input_type = match schema.kind {
			FieldKind::Password => InputType::Password,
			FieldKind::Email => InputType::Email,
			_ => InputType::Text,
		};
		let max_length =
			MaxLengthValidator::new(schema.max_length.unwrap_or(settings.default_max_length));
		Self {
			scalar: ScalarValue::new(name, schema, initial),
			input_type,
			max_length,
		}
	}

	pub fn input_type(&self) -> InputType {
		self.input_type
	}

	pub fn max_length(&self) -> usize {
		self.max_length.max()
	}
}

impl FieldNode for InputField {
	fn name(&self) -> &str {
		&self.scalar.name
	}

	fn kind(&self) -> FieldKind {
		self.scalar.schema.kind
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

		let value = self.scalar.get();
		let text = display_value(&value);
		if self.input_type == InputType::Email {
			EmailValidator::new().validate(&self.scalar.name, &text)?;
		}
		if !is_empty_value(&value) {
			self.max_length.validate(&self.scalar.name, &text)?;
		}
		Ok(())
	}

	fn widget(&self) -> Widget {
		Widget::TextInput {
			input_type: self.input_type,
			max_length: self.max_length.max(),
			placeholder: self.scalar.schema.placeholder.clone(),
		}
	}

	fn set_value(&mut self, value: Value) -> FieldResult<()> {
		match value {
			Value::String(_) | Value::Null => {
				self.scalar.set(value);
				Ok(())
			}
			_ => Err(FieldError::InvalidValue {
				name: self.scalar.name.clone(),
				expected: "a string",
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn input(schema: FieldSchema, initial: Value) -> InputField {
		InputField::new("fieldName", schema, initial, &FormSettings::default())
	}

	#[rstest]
	fn test_input_responds_to_edits() {
		// Arrange
		let mut field = input(FieldSchema::text(), json!("fieldInitial"));

		// Act
		field.set_value(json!("fieldNewValue")).unwrap();

		// Assert
		assert_eq!(field.get_value(), json!("fieldNewValue"));
		assert!(field.validate_field().is_ok());
	}

	#[rstest]
	fn test_required_blank_fails() {
		let field = input(FieldSchema::text().required(), Value::Null);
		let err = field.validate_field().unwrap_err();
		assert!(err.to_string().contains("fieldName"));
		assert!(err.to_string().contains("required"));
	}

	#[rstest]
	fn test_optional_blank_passes() {
		let field = input(FieldSchema::text(), Value::Null);
		assert!(field.validate_field().is_ok());
	}

	#[rstest]
	fn test_invalid_email_fails() {
		let mut field = input(FieldSchema::email(), json!("fieldInitial"));

		field.set_value(json!("fieldNewValue")).unwrap();

		assert_eq!(field.get_value(), json!("fieldNewValue"));
		assert_eq!(
			field.validate_field(),
			Err(FieldError::InvalidEmail("fieldName".to_string()))
		);
	}

	#[rstest]
	fn test_valid_email_passes() {
		let mut field = input(FieldSchema::email(), json!("fieldInitial"));

		field.set_value(json!("bo@enactuswaterloo.com")).unwrap();

		assert!(field.validate_field().is_ok());
	}

	#[rstest]
	fn test_empty_optional_email_fails_format_check() {
		let field = input(FieldSchema::email(), Value::Null);
		assert!(matches!(
			field.validate_field(),
			Err(FieldError::InvalidEmail(_))
		));
	}

	#[rstest]
	fn test_required_checked_before_email_format() {
		let field = input(FieldSchema::email().required(), Value::Null);
		assert!(matches!(field.validate_field(), Err(FieldError::Required(_))));
	}

	#[rstest]
	fn test_max_length_defaults_to_settings() {
		let field = input(FieldSchema::text(), Value::Null);
		assert_eq!(field.max_length(), 150);

		let field = input(FieldSchema::text().with_max_length(4), Value::Null);
		assert_eq!(field.max_length(), 4);
	}

	#[rstest]
	fn test_max_length_enforced() {
		let mut field = input(FieldSchema::text().with_max_length(4), Value::Null);

		field.set_value(json!("abcde")).unwrap();

		assert!(matches!(
			field.validate_field(),
			Err(FieldError::MaxLength { max: 4, actual: 5, .. })
		));
	}

	#[rstest]
	fn test_non_string_edit_rejected() {
		let mut field = input(FieldSchema::text(), json!("keep"));

		assert!(field.set_value(json!(3)).is_err());
		assert_eq!(field.get_value(), json!("keep"));
	}

	#[rstest]
	#[case(FieldSchema::text(), InputType::Text)]
	#[case(FieldSchema::password(), InputType::Password)]
	#[case(FieldSchema::email(), InputType::Email)]
	fn test_widget_input_type(#[case] schema: FieldSchema, #[case] expected: InputType) {
		let field = input(schema.with_placeholder("150 chars max"), Value::Null);
		assert_eq!(
			field.widget(),
			Widget::TextInput {
				input_type: expected,
				max_length: 150,
				placeholder: Some("150 chars max".to_string()),
			}
		);
	}
}
