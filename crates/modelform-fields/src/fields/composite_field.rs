//! Object fields and array elements

use crate::field::{FieldError, FieldNode, FieldResult, Widget, is_empty_value};
use crate::parser::parse_fields_with;
use crate::schema::{FieldKind, FieldSchema};
use crate::settings::FormSettings;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Whether a composite stands on its own or lives inside an array field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
	Object,
	Element { index: usize },
}

/// A field whose value is a mapping of child field values.
///
/// An object field maps every child, `null` included. An array element
/// leaves out children without a value, so an untouched element collects
/// as `{}`.
///
/// Children are built from the nested schema, seeded from the composite's
/// own value, and owned exclusively by the composite.
#[derive(Debug)]
pub struct CompositeField {
	name: String,
	schema: FieldSchema,
	mode: CompositeMode,
	seed: Value,
	children: Vec<Box<dyn FieldNode>>,
	settings: Arc<FormSettings>,
}

impl CompositeField {
	/// Create an object field
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use modelform_fields::fields::CompositeField;
	/// use modelform_fields::{FieldNode, FieldSchema, FormSettings, Schema};
	/// use serde_json::json;
	///
	/// let schema = FieldSchema::object(
	///     Schema::new()
	///         .with_field("street", FieldSchema::text())
	///         .with_field("zip", FieldSchema::number()),
	/// );
	/// let field = CompositeField::object(
	///     &Arc::new(FormSettings::default()),
	///     "address",
	///     schema,
	///     json!({"street": "Main St", "zip": "12345"}),
	/// );
	/// assert_eq!(field.get_value(), json!({"street": "Main St", "zip": "12345"}));
	/// ```
	pub fn object(
		settings: &Arc<FormSettings>,
		name: impl Into<String>,
		schema: FieldSchema,
		initial: Value,
	) -> Self {
		Self::build(settings, name.into(), schema, CompositeMode::Object, initial)
	}

	/// Create the element at `index` of an array field.
	pub fn element(
		settings: &Arc<FormSettings>,
		schema: FieldSchema,
		index: usize,
		seed: Value,
	) -> Self {
		Self::build(
			settings,
			index.to_string(),
			schema,
			CompositeMode::Element { index },
			seed,
		)
	}

	fn build(
		settings: &Arc<FormSettings>,
		name: String,
		schema: FieldSchema,
		mode: CompositeMode,
		initial: Value,
	) -> Self {
		let seed = match initial {
			Value::Null => Value::Object(Map::new()),
			other => other,
		};
		let children = parse_fields_with(settings, &schema.fields, Some(&seed));
		Self {
			name,
			schema,
			mode,
			seed,
			children,
			settings: Arc::clone(settings),
		}
	}

	pub fn mode(&self) -> CompositeMode {
		self.mode
	}

	/// Position inside the owning array field, if any.
	pub fn index(&self) -> Option<usize> {
		match self.mode {
			CompositeMode::Element { index } => Some(index),
			CompositeMode::Object => None,
		}
	}

	/// Rebuilds the children from `seed`, moving the element to `index`.
	pub(crate) fn reseed(&mut self, index: usize, seed: Value) {
		*self = Self::element(&self.settings, self.schema.clone(), index, seed);
	}
}

impl FieldNode for CompositeField {
	fn name(&self) -> &str {
		&self.name
	}

	fn kind(&self) -> FieldKind {
		FieldKind::Object
	}

	fn label(&self) -> Option<&str> {
		match self.mode {
			CompositeMode::Object => self.schema.label.as_deref(),
			CompositeMode::Element { .. } => None,
		}
	}

	fn help_text(&self) -> Option<&str> {
		match self.mode {
			CompositeMode::Object => self.schema.help_text.as_deref(),
			CompositeMode::Element { .. } => None,
		}
	}

	fn required(&self) -> bool {
		self.mode == CompositeMode::Object && self.schema.required
	}

	fn initial(&self) -> &Value {
		&self.seed
	}

	fn get_value(&self) -> Value {
		let mut result = Map::new();
		for child in &self.children {
			let value = child.get_value();
			if value.is_null() && self.index().is_some() {
				continue;
			}
			result.insert(child.name().to_string(), value);
		}
		Value::Object(result)
	}

	/// A required object needs at least one child holding a value.
	fn validate_field(&self) -> FieldResult<()> {
		if self.required() && self.children.iter().all(|c| is_empty_value(&c.get_value())) {
			return Err(FieldError::Required(self.name.clone()));
		}
		for child in &self.children {
			child.validate_field()?;
		}
		Ok(())
	}

	fn widget(&self) -> Widget {
		match self.mode {
			CompositeMode::Object => Widget::Object,
			CompositeMode::Element { index } => Widget::ArrayElement { index },
		}
	}

	fn children(&self) -> Vec<&dyn FieldNode> {
		self.children.iter().map(|child| child.as_ref()).collect()
	}

	fn child(&self, segment: &str) -> Option<&dyn FieldNode> {
		self.children
			.iter()
			.find(|child| child.name() == segment)
			.map(|child| child.as_ref())
	}

	fn child_mut(&mut self, segment: &str) -> Option<&mut dyn FieldNode> {
		for child in self.children.iter_mut() {
			if child.name() == segment {
				return Some(child.as_mut());
			}
		}
		None
	}
}
