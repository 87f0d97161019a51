//! Form schemas
//!
//! A [`Schema`] is an ordered mapping from field name to [`FieldSchema`].
//! Schemas are immutable once built: parsing a form never writes back into
//! them, so one schema can back any number of forms.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Errors raised while turning a JSON document into a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("Unknown field type {type_name:?} at {path}")]
	UnknownType { path: String, type_name: String },
	#[error("Field {path} has no type")]
	MissingType { path: String },
	#[error("Choice field {path} has no choices")]
	MissingChoices { path: String },
	#[error("Invalid field definition at {path}: {message}")]
	InvalidEntry { path: String, message: String },
	#[error("Expected an object of field definitions at {path}")]
	NotAnObject { path: String },
}

/// The closed set of field kinds a schema entry can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	Text,
	Password,
	Email,
	Number,
	Choice,
	Time,
	Object,
	Array,
}

impl FieldKind {
	/// Resolves a schema `type` string.
	///
	/// Both the constructor-style names (`String`, `Number`, `Array`,
	/// `Object`) and their lowercase spellings are accepted.
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::FieldKind;
	///
	/// assert_eq!(FieldKind::from_type_name("String"), Some(FieldKind::Text));
	/// assert_eq!(FieldKind::from_type_name("email"), Some(FieldKind::Email));
	/// assert_eq!(FieldKind::from_type_name("Time"), Some(FieldKind::Time));
	/// assert_eq!(FieldKind::from_type_name("Date"), None);
	/// ```
	pub fn from_type_name(name: &str) -> Option<Self> {
		match name {
			"String" | "string" | "text" => Some(FieldKind::Text),
			"password" => Some(FieldKind::Password),
			"email" => Some(FieldKind::Email),
			"Number" | "number" => Some(FieldKind::Number),
			"choice" => Some(FieldKind::Choice),
			"Time" | "time" => Some(FieldKind::Time),
			"Object" | "object" => Some(FieldKind::Object),
			"Array" | "array" => Some(FieldKind::Array),
			_ => None,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			FieldKind::Text => "String",
			FieldKind::Password => "password",
			FieldKind::Email => "email",
			FieldKind::Number => "Number",
			FieldKind::Choice => "choice",
			FieldKind::Time => "Time",
			FieldKind::Object => "Object",
			FieldKind::Array => "Array",
		}
	}

	/// Object and array fields carry a nested schema.
	pub fn is_composite(&self) -> bool {
		matches!(self, FieldKind::Object | FieldKind::Array)
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.type_name())
	}
}

/// Type and validation metadata of one schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
	pub kind: FieldKind,
	pub required: bool,
	pub label: Option<String>,
	pub placeholder: Option<String>,
	pub help_text: Option<String>,
	pub max_length: Option<usize>,
	pub choices: Vec<String>,
	/// Nested schema of object and array fields.
	pub fields: Arc<Schema>,
}

impl FieldSchema {
	/// Create a schema entry of the given kind
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::{FieldKind, FieldSchema};
	///
	/// let field = FieldSchema::new(FieldKind::Email);
	/// assert_eq!(field.kind, FieldKind::Email);
	/// assert!(!field.required);
	/// assert!(field.fields.is_empty());
	/// ```
	pub fn new(kind: FieldKind) -> Self {
		Self {
			kind,
			required: false,
			label: None,
			placeholder: None,
			help_text: None,
			max_length: None,
			choices: Vec::new(),
			fields: Arc::new(Schema::new()),
		}
	}

	pub fn text() -> Self {
		Self::new(FieldKind::Text)
	}

	pub fn password() -> Self {
		Self::new(FieldKind::Password)
	}

	pub fn email() -> Self {
		Self::new(FieldKind::Email)
	}

	pub fn number() -> Self {
		Self::new(FieldKind::Number)
	}

	pub fn time() -> Self {
		Self::new(FieldKind::Time)
	}

	/// Create a choice entry
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::FieldSchema;
	///
	/// let field = FieldSchema::choice(["red", "green"]);
	/// assert_eq!(field.choices, vec!["red".to_string(), "green".to_string()]);
	/// ```
	pub fn choice<I, S>(choices: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(FieldKind::Choice).with_choices(choices)
	}

	pub fn object(fields: Schema) -> Self {
		Self::new(FieldKind::Object).with_fields(fields)
	}

	/// Create an array entry whose elements follow `fields`
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::{FieldKind, FieldSchema, Schema};
	///
	/// let field = FieldSchema::array(
	///     Schema::new().with_field("item", FieldSchema::text().required()),
	/// );
	/// assert_eq!(field.kind, FieldKind::Array);
	/// assert_eq!(field.fields.len(), 1);
	/// ```
	pub fn array(fields: Schema) -> Self {
		Self::new(FieldKind::Array).with_fields(fields)
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_choices<I, S>(mut self, choices: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.choices = choices.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_fields(mut self, fields: Schema) -> Self {
		self.fields = Arc::new(fields);
		self
	}
}

/// Ordered mapping from field name to [`FieldSchema`].
///
/// Insertion order is render order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Schema {
	entries: Vec<(String, FieldSchema)>,
}

impl Schema {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a field, replacing an existing entry of the same name in place
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::{FieldSchema, Schema};
	///
	/// let schema = Schema::new()
	///     .with_field("name", FieldSchema::text())
	///     .with_field("email", FieldSchema::email().required());
	/// assert_eq!(schema.names().collect::<Vec<_>>(), vec!["name", "email"]);
	/// ```
	pub fn with_field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
		self.add_field(name, field);
		self
	}

	pub fn add_field(&mut self, name: impl Into<String>, field: FieldSchema) {
		let name = name.into();
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			Some(entry) => entry.1 = field,
			None => self.entries.push((name, field)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&FieldSchema> {
		self.entries
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, field)| field)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
		self.entries
			.iter()
			.map(|(name, field)| (name.as_str(), field))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(name, _)| name.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Parse a schema from its JSON form
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::{FieldKind, Schema};
	/// use serde_json::json;
	///
	/// let schema = Schema::from_json(&json!({
	///     "email": {"type": "email", "required": true, "label": "Email", "maxLength": 100},
	///     "tags": {"type": "Array", "fields": {"item": {"type": "String"}}},
	/// }))
	/// .unwrap();
	///
	/// assert_eq!(schema.get("email").unwrap().max_length, Some(100));
	/// assert_eq!(schema.get("tags").unwrap().kind, FieldKind::Array);
	/// ```
	pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
		match value {
			Value::Object(map) => parse_entries(map, None),
			_ => Err(SchemaError::NotAnObject {
				path: "<root>".to_string(),
			}),
		}
	}
}

impl TryFrom<Value> for Schema {
	type Error = SchemaError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		Schema::from_json(&value)
	}
}

impl TryFrom<&Value> for Schema {
	type Error = SchemaError;

	fn try_from(value: &Value) -> Result<Self, Self::Error> {
		Schema::from_json(value)
	}
}

/// Wire form of a schema entry before its type is resolved.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldSchema {
	#[serde(rename = "type")]
	type_name: Option<String>,
	#[serde(default)]
	required: bool,
	label: Option<String>,
	placeholder: Option<String>,
	help_text: Option<String>,
	max_length: Option<usize>,
	choices: Option<Vec<String>>,
	fields: Option<Value>,
}

fn join_path(prefix: Option<&str>, name: &str) -> String {
	match prefix {
		Some(prefix) => format!("{}.{}", prefix, name),
		None => name.to_string(),
	}
}

fn parse_entries(map: &Map<String, Value>, prefix: Option<&str>) -> Result<Schema, SchemaError> {
	let mut schema = Schema::new();
	for (name, entry) in map {
		let path = join_path(prefix, name);
		let field = parse_entry(entry, &path)?;
		schema.add_field(name.clone(), field);
	}
	Ok(schema)
}

fn parse_entry(entry: &Value, path: &str) -> Result<FieldSchema, SchemaError> {
	let raw: RawFieldSchema =
		serde_json::from_value(entry.clone()).map_err(|e| SchemaError::InvalidEntry {
			path: path.to_string(),
			message: e.to_string(),
		})?;

	let type_name = raw.type_name.ok_or_else(|| SchemaError::MissingType {
		path: path.to_string(),
	})?;
	let kind = FieldKind::from_type_name(&type_name).ok_or_else(|| SchemaError::UnknownType {
		path: path.to_string(),
		type_name: type_name.clone(),
	})?;

	let mut field = FieldSchema::new(kind);
	field.required = raw.required;
	field.label = raw.label;
	field.placeholder = raw.placeholder;
	field.help_text = raw.help_text;
	field.max_length = raw.max_length;

	if kind == FieldKind::Choice {
		field.choices = raw.choices.ok_or_else(|| SchemaError::MissingChoices {
			path: path.to_string(),
		})?;
	}

	if kind.is_composite()
		&& let Some(fields) = raw.fields
	{
		let nested = match &fields {
			Value::Object(map) => parse_entries(map, Some(path))?,
			Value::Null => Schema::new(),
			_ => {
				return Err(SchemaError::NotAnObject {
					path: path.to_string(),
				});
			}
		};
		field.fields = Arc::new(nested);
	}

	Ok(field)
}
