//! Repeating array field

use super::composite_field::CompositeField;
use crate::field::{FieldError, FieldNode, FieldResult, Widget, display_value};
use crate::schema::{FieldKind, FieldSchema};
use crate::settings::FormSettings;
use serde_json::{Map, Value};
use std::sync::Arc;

/// An ordered, growable list of composite elements sharing one schema.
#[derive(Debug)]
pub struct ArrayField {
	name: String,
	schema: FieldSchema,
	initial: Value,
	elements: Vec<CompositeField>,
	settings: Arc<FormSettings>,
}

impl ArrayField {
	/// Create an array field with one element per item of `initial`
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use modelform_fields::fields::ArrayField;
	/// use modelform_fields::{FieldNode, FieldSchema, FormSettings, Schema};
	/// use serde_json::json;
	///
	/// let schema = FieldSchema::array(Schema::new().with_field("item", FieldSchema::text()));
	/// let mut field = ArrayField::new(
	///     &Arc::new(FormSettings::default()),
	///     "items",
	///     schema,
	///     json!([{"item": "a"}, {"item": "b"}]),
	/// );
	/// assert_eq!(field.len(), 2);
	///
	/// field.on_remove_element(0).unwrap();
	/// assert_eq!(field.get_value(), json!([{"item": "b"}]));
	/// ```
	pub fn new(
		settings: &Arc<FormSettings>,
		name: impl Into<String>,
		schema: FieldSchema,
		initial: Value,
	) -> Self {
		let mut field = Self {
			name: name.into(),
			schema,
			initial,
			elements: Vec::new(),
			settings: Arc::clone(settings),
		};
		let seeds = field.initial.as_array().cloned().unwrap_or_default();
		field.elements = field.build_elements(seeds);
		field
	}

	fn build_elements(&self, seeds: Vec<Value>) -> Vec<CompositeField> {
		seeds
			.into_iter()
			.enumerate()
			.map(|(index, seed)| {
				CompositeField::element(&self.settings, self.schema.clone(), index, seed)
			})
			.collect()
	}

	/// Number of materialised elements.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn elements(&self) -> &[CompositeField] {
		&self.elements
	}

	pub fn element(&self, index: usize) -> Option<&CompositeField> {
		self.elements.get(index)
	}

	pub fn element_mut(&mut self, index: usize) -> Option<&mut CompositeField> {
		self.elements.get_mut(index)
	}

	/// Label of the "add new" affordance.
	pub fn add_label(&self) -> String {
		match &self.schema.label {
			Some(label) => format!("Add new {}", label),
			None => "Add new".to_string(),
		}
	}

	/// Appends an element seeded with an empty mapping and returns its index.
	pub fn add_new(&mut self) -> usize {
		let index = self.elements.len();
		self.elements.push(CompositeField::element(
			&self.settings,
			self.schema.clone(),
			index,
			Value::Object(Map::new()),
		));
		tracing::debug!(field = %self.name, index, "added array element");
		index
	}

	/// Removes the element at `index` and returns its collected value.
	///
	/// Every remaining element is rebuilt from the collected values so each
	/// keeps its content while moving to its new position.
	pub fn on_remove_element(&mut self, index: usize) -> FieldResult<Value> {
		if index >= self.elements.len() {
			return Err(FieldError::IndexOutOfRange {
				name: self.name.clone(),
				index,
				len: self.elements.len(),
			});
		}

		let mut values: Vec<Value> = self.elements.iter().map(|e| e.get_value()).collect();
		let removed = values.remove(index);
		self.elements.truncate(values.len());
		for (position, (element, value)) in self.elements.iter_mut().zip(values).enumerate() {
			element.reseed(position, value);
		}

		tracing::debug!(
			field = %self.name,
			index,
			remaining = self.elements.len(),
			"removed array element"
		);
		Ok(removed)
	}

	/// Rendering key of the element at `index`
	///
	/// Prefers an `_id` on the element's seed, then a position/`item` pair,
	/// then the bare position. Keys never influence values.
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use modelform_fields::fields::ArrayField;
	/// use modelform_fields::{FieldSchema, FormSettings, Schema};
	/// use serde_json::json;
	///
	/// let field = ArrayField::new(
	///     &Arc::new(FormSettings::default()),
	///     "items",
	///     FieldSchema::array(Schema::new()),
	///     json!([{"_id": "abc"}, {"item": "pen"}, {}]),
	/// );
	/// assert_eq!(field.element_key(0).as_deref(), Some("element-abc"));
	/// assert_eq!(field.element_key(1).as_deref(), Some("element-1-pen"));
	/// assert_eq!(field.element_key(2).as_deref(), Some("element-2"));
	/// assert_eq!(field.element_key(3), None);
	/// ```
	pub fn element_key(&self, index: usize) -> Option<String> {
		let element = self.elements.get(index)?;
		let seed = element.initial();
		let present = |key: &str| {
			seed.get(key)
				.filter(|v| !v.is_null() && !display_value(v).is_empty())
				.map(display_value)
		};

		let key = if let Some(id) = present("_id") {
			format!("element-{}", id)
		} else if let Some(item) = present("item") {
			format!("element-{}-{}", index, item)
		} else {
			format!("element-{}", index)
		};
		Some(key)
	}
}

impl FieldNode for ArrayField {
	fn name(&self) -> &str {
		&self.name
	}

	fn kind(&self) -> FieldKind {
		FieldKind::Array
	}

	fn label(&self) -> Option<&str> {
		self.schema.label.as_deref()
	}

	fn help_text(&self) -> Option<&str> {
		self.schema.help_text.as_deref()
	}

	fn required(&self) -> bool {
		self.schema.required
	}

	fn initial(&self) -> &Value {
		&self.initial
	}

	fn get_value(&self) -> Value {
		Value::Array(self.elements.iter().map(|e| e.get_value()).collect())
	}

	fn validate_field(&self) -> FieldResult<()> {
		if self.schema.required && self.elements.is_empty() {
			return Err(FieldError::Required(self.name.clone()));
		}
		for element in &self.elements {
			element.validate_field()?;
		}
		Ok(())
	}

	fn widget(&self) -> Widget {
		Widget::Array {
			add_label: self.add_label(),
		}
	}

	fn children(&self) -> Vec<&dyn FieldNode> {
		self.elements
			.iter()
			.map(|element| element as &dyn FieldNode)
			.collect()
	}

	fn child(&self, segment: &str) -> Option<&dyn FieldNode> {
		let index = segment.parse::<usize>().ok()?;
		self.elements
			.get(index)
			.map(|element| element as &dyn FieldNode)
	}

	fn child_mut(&mut self, segment: &str) -> Option<&mut dyn FieldNode> {
		let index = segment.parse::<usize>().ok()?;
		match self.elements.get_mut(index) {
			Some(element) => Some(element),
			None => None,
		}
	}

	fn as_array(&self) -> Option<&ArrayField> {
		Some(self)
	}

	fn as_array_mut(&mut self) -> Option<&mut ArrayField> {
		Some(self)
	}
}
