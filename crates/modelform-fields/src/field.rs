//! The field node interface shared by every widget and composite field

use crate::fields::{ArrayField, TimeField};
use crate::schema::FieldKind;
use serde_json::Value;

/// Errors raised while editing or validating a single field node.
///
/// The display string of every variant is the human-readable message shown
/// to the person filling in the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("{0} is required to complete this form.")]
	Required(String),
	#[error("{0} is not a valid email")]
	InvalidEmail(String),
	#[error("Please select a non-blank choice")]
	BlankChoice,
	#[error("Ensure {name} has at most {max} characters (it has {actual})")]
	MaxLength {
		name: String,
		max: usize,
		actual: usize,
	},
	#[error("{0} must be a number")]
	NotANumber(String),
	#[error("{value:?} is not one of the choices of {name}")]
	InvalidChoice { name: String, value: String },
	#[error("{name} expects {expected}")]
	InvalidValue { name: String, expected: &'static str },
	#[error("Enter a valid time of day (got {hour}:{minute:02})")]
	InvalidTime { hour: u32, minute: u32 },
	#[error("{name} does not hold a valid timestamp: {value}")]
	InvalidTimestamp { name: String, value: String },
	#[error("Element {index} does not exist in {name} ({len} elements)")]
	IndexOutOfRange {
		name: String,
		index: usize,
		len: usize,
	},
	#[error("{0} cannot be edited directly")]
	NotEditable(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// HTML input type used by text-like widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
	Text,
	Password,
	Email,
}

impl InputType {
	/// The value of the rendered `type` attribute.
	///
	/// Plain text inputs keep the historical `"input"` type.
	pub fn as_html_type(&self) -> &'static str {
		match self {
			InputType::Text => "input",
			InputType::Password => "password",
			InputType::Email => "email",
		}
	}
}

/// Description of the control a rendering host should draw for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
	TextInput {
		input_type: InputType,
		max_length: usize,
		placeholder: Option<String>,
	},
	NumberInput {
		placeholder: Option<String>,
	},
	/// Options always start with the blank sentinel.
	Select {
		options: Vec<String>,
		selected: String,
	},
	TimeInput {
		hour: u32,
		minute: u32,
	},
	Object,
	ArrayElement {
		index: usize,
	},
	Array {
		add_label: String,
	},
}

/// A node in the runtime field tree.
///
/// Every widget, object field, array element and array field implements
/// this trait. A node owns its value and, for composites, its children.
pub trait FieldNode: Send + Sync + std::fmt::Debug {
	/// Name of the schema entry this node was built from.
	///
	/// Array elements are named after their position.
	fn name(&self) -> &str;

	fn kind(&self) -> FieldKind;

	fn label(&self) -> Option<&str> {
		None
	}

	fn help_text(&self) -> Option<&str> {
		None
	}

	fn required(&self) -> bool {
		false
	}

	/// The value the node was seeded with.
	fn initial(&self) -> &Value;

	/// The current value: the edited value, or the initial one when no edit
	/// has happened.
	fn get_value(&self) -> Value;

	/// Checks the current value, stopping at the first failure.
	fn validate_field(&self) -> FieldResult<()>;

	fn widget(&self) -> Widget;

	/// Overwrites the edit buffer of a scalar node.
	fn set_value(&mut self, _value: Value) -> FieldResult<()> {
		Err(FieldError::NotEditable(self.name().to_string()))
	}

	/// Direct children in render order.
	fn children(&self) -> Vec<&dyn FieldNode> {
		Vec::new()
	}

	/// Looks up a direct child by path segment.
	fn child(&self, _segment: &str) -> Option<&dyn FieldNode> {
		None
	}

	fn child_mut(&mut self, _segment: &str) -> Option<&mut dyn FieldNode> {
		None
	}

	fn as_array(&self) -> Option<&ArrayField> {
		None
	}

	fn as_array_mut(&mut self) -> Option<&mut ArrayField> {
		None
	}

	fn as_time_mut(&mut self) -> Option<&mut TimeField> {
		None
	}
}

/// Whether a value counts as "not filled in" for required checks.
pub fn is_empty_value(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
		Value::Bool(_) | Value::Number(_) => false,
	}
}

/// Text shown for a scalar value inside a control.
pub fn display_value(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(null), true)]
	#[case(json!(""), true)]
	#[case(json!([]), true)]
	#[case(json!({}), true)]
	#[case(json!("x"), false)]
	#[case(json!(0), false)]
	#[case(json!(false), false)]
	#[case(json!([1]), false)]
	fn test_is_empty_value(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(is_empty_value(&value), expected);
	}

	#[rstest]
	fn test_display_value() {
		assert_eq!(display_value(&json!(null)), "");
		assert_eq!(display_value(&json!("abc")), "abc");
		assert_eq!(display_value(&json!(3)), "3");
		assert_eq!(display_value(&json!(true)), "true");
	}

	#[rstest]
	fn test_required_message_names_field() {
		let err = FieldError::Required("fieldName".to_string());
		assert_eq!(
			err.to_string(),
			"fieldName is required to complete this form."
		);
	}

	#[rstest]
	fn test_blank_choice_message() {
		assert!(FieldError::BlankChoice.to_string().contains("non-blank"));
	}

	#[rstest]
	#[case(InputType::Text, "input")]
	#[case(InputType::Password, "password")]
	#[case(InputType::Email, "email")]
	fn test_input_type_html(#[case] input_type: InputType, #[case] expected: &str) {
		assert_eq!(input_type.as_html_type(), expected);
	}
}
