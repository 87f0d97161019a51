//! Schema to field tree conversion
//!
//! Each schema entry is dispatched on its [`FieldKind`] to the field type
//! that handles it. Composite kinds recurse through the same entry point, so
//! nested objects and arrays of objects are built with the same rules as the
//! top level.

use crate::field::FieldNode;
use crate::fields::{ArrayField, ChoiceField, CompositeField, InputField, NumberField, TimeField};
use crate::schema::{FieldKind, FieldSchema, Schema};
use crate::settings::FormSettings;
use crate::source::{ValueSource, initial_value};
use serde_json::Value;
use std::sync::Arc;

/// Builds one field node per schema entry, in schema order, with default
/// settings
///
/// Initial values are looked up by field name in `source`; a missing or
/// `null` entry leaves the field unseeded.
///
/// # Examples
///
/// ```
/// use modelform_fields::{FieldSchema, Schema, parse_fields};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .with_field("title", FieldSchema::text())
///     .with_field("count", FieldSchema::number());
/// let source = json!({"title": "Hello"});
///
/// let fields = parse_fields(&schema, Some(&source));
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].get_value(), json!("Hello"));
/// assert_eq!(fields[1].get_value(), json!(null));
/// ```
pub fn parse_fields(
	schema: &Schema,
	source: Option<&dyn ValueSource>,
) -> Vec<Box<dyn FieldNode>> {
	parse_fields_with(&Arc::new(FormSettings::default()), schema, source)
}

/// Same as [`parse_fields`], sharing `settings` with every built node.
pub fn parse_fields_with(
	settings: &Arc<FormSettings>,
	schema: &Schema,
	source: Option<&dyn ValueSource>,
) -> Vec<Box<dyn FieldNode>> {
	schema
		.iter()
		.map(|(name, field)| build_field(settings, name, field, initial_value(source, name)))
		.collect()
}

/// Builds the node for a single schema entry.
pub fn build_field(
	settings: &Arc<FormSettings>,
	name: &str,
	schema: &FieldSchema,
	initial: Value,
) -> Box<dyn FieldNode> {
	tracing::debug!(field = name, kind = %schema.kind, "building field");

	let schema = schema.clone();
	match schema.kind {
		FieldKind::Text | FieldKind::Password | FieldKind::Email => {
			Box::new(InputField::new(name, schema, initial, settings))
		}
		FieldKind::Number => Box::new(NumberField::new(name, schema, initial)),
		FieldKind::Choice => Box::new(ChoiceField::new(name, schema, initial, settings)),
		FieldKind::Time => Box::new(TimeField::new(name, schema, initial)),
		FieldKind::Object => Box::new(CompositeField::object(settings, name, schema, initial)),
		FieldKind::Array => Box::new(ArrayField::new(settings, name, schema, initial)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::MemoryModel;
	use rstest::rstest;
	use serde_json::json;

	fn mixed_schema() -> Schema {
		Schema::new()
			.with_field("name", FieldSchema::text())
			.with_field("secret", FieldSchema::password())
			.with_field("mail", FieldSchema::email())
			.with_field("count", FieldSchema::number())
			.with_field("color", FieldSchema::choice(["red", "green"]))
			.with_field("start", FieldSchema::time())
			.with_field(
				"address",
				FieldSchema::object(Schema::new().with_field("street", FieldSchema::text())),
			)
			.with_field(
				"items",
				FieldSchema::array(Schema::new().with_field("item", FieldSchema::text())),
			)
	}

	// ============================================================
	// Dispatch
	// ============================================================

	#[rstest]
	fn test_one_node_per_entry_in_order() {
		let fields = parse_fields(&mixed_schema(), None);

		let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
		assert_eq!(
			names,
			vec![
				"name", "secret", "mail", "count", "color", "start", "address", "items"
			]
		);
	}

	#[rstest]
	#[case(0, FieldKind::Text)]
	#[case(1, FieldKind::Password)]
	#[case(2, FieldKind::Email)]
	#[case(3, FieldKind::Number)]
	#[case(4, FieldKind::Choice)]
	#[case(5, FieldKind::Time)]
	#[case(6, FieldKind::Object)]
	#[case(7, FieldKind::Array)]
	fn test_kind_dispatch(#[case] position: usize, #[case] expected: FieldKind) {
		let fields = parse_fields(&mixed_schema(), None);
		assert_eq!(fields[position].kind(), expected);
	}

	#[rstest]
	fn test_specialised_views() {
		let mut fields = parse_fields(&mixed_schema(), None);

		assert!(fields[7].as_array().is_some());
		assert!(fields[5].as_time_mut().is_some());
		assert!(fields[0].as_array().is_none());
	}

	#[rstest]
	fn test_empty_schema() {
		assert!(parse_fields(&Schema::new(), None).is_empty());
	}

	// ============================================================
	// Initial values
	// ============================================================

	#[rstest]
	fn test_initial_from_model() {
		// Arrange
		let schema = Schema::new().with_field("test", FieldSchema::text());
		let model = MemoryModel::from_value(json!({"test": "test value"}));

		// Act
		let fields = parse_fields(&schema, Some(&model));

		// Assert
		assert_eq!(fields[0].get_value(), json!("test value"));
		assert_eq!(fields[0].initial(), &json!("test value"));
	}

	#[rstest]
	fn test_initial_from_plain_mapping() {
		let schema = Schema::new().with_field("test", FieldSchema::text());
		let source = json!({"test": "test value"});

		let fields = parse_fields(&schema, Some(&source));

		assert_eq!(fields[0].get_value(), json!("test value"));
	}

	#[rstest]
	fn test_null_initial_is_unseeded() {
		let schema = Schema::new().with_field("test", FieldSchema::text());
		let source = json!({"test": null});

		let fields = parse_fields(&schema, Some(&source));

		assert_eq!(fields[0].initial(), &Value::Null);
	}

	#[rstest]
	fn test_nested_initials_reach_children() {
		let source = json!({
			"address": {"street": "King St"},
			"items": [{"item": "pen"}, {"item": "ink"}],
		});

		let fields = parse_fields(&mixed_schema(), Some(&source));

		assert_eq!(fields[6].get_value(), json!({"street": "King St"}));
		assert_eq!(
			fields[7].get_value(),
			json!([{"item": "pen"}, {"item": "ink"}])
		);
	}

	#[rstest]
	fn test_round_trip_of_unedited_values() {
		let schema = Schema::new()
			.with_field("name", FieldSchema::text())
			.with_field("count", FieldSchema::number())
			.with_field("color", FieldSchema::choice(["red"]))
			.with_field("start", FieldSchema::time())
			.with_field(
				"items",
				FieldSchema::array(
					Schema::new()
						.with_field("item", FieldSchema::text())
						.with_field("numberField", FieldSchema::number()),
				),
			);
		let source = json!({
			"name": "n",
			"count": 4,
			"color": "red",
			"start": "2015-01-01T23:59:00.000Z",
			"items": [{"item": "test", "numberField": "3"}],
		});

		let fields = parse_fields(&schema, Some(&source));

		for field in &fields {
			assert_eq!(&field.get_value(), &source[field.name()]);
		}
	}

	#[rstest]
	fn test_settings_are_shared_with_nodes() {
		let settings = Arc::new(FormSettings {
			default_max_length: 10,
			..FormSettings::default()
		});
		let schema = Schema::new().with_field("name", FieldSchema::text());

		let fields = parse_fields_with(&settings, &schema, None);

		assert!(matches!(
			fields[0].widget(),
			crate::field::Widget::TextInput { max_length: 10, .. }
		));
	}
}
