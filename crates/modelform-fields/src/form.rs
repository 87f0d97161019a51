//! The form container bound to a backing model

use crate::event::{FieldEvent, apply_event, find_field, find_field_mut};
use crate::field::{FieldError, FieldNode};
use crate::parser::parse_fields_with;
use crate::schema::{Schema, SchemaError};
use crate::settings::FormSettings;
use crate::source::{FormModel, ValueSource};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
	#[error("Field error in {field}: {error}")]
	Field { field: String, error: FieldError },
	#[error("No field at {0}")]
	UnknownField(String),
	#[error("Field {path} does not support the {event} event")]
	UnsupportedEvent { path: String, event: &'static str },
	#[error("Model error: {0}")]
	Model(String),
	#[error(transparent)]
	Schema(#[from] SchemaError),
	#[error("Invalid settings: {0}")]
	Settings(String),
}

pub type FormResult<T> = Result<T, FormError>;

type SaveCallback = Box<dyn FnMut() + Send>;

/// A form whose fields are seeded from, and saved into, a backing model.
pub struct ModelForm<M> {
	schema: Arc<Schema>,
	settings: Arc<FormSettings>,
	model: M,
	fields: Vec<Box<dyn FieldNode>>,
	on_save: Option<SaveCallback>,
}

impl<M: FormModel> ModelForm<M> {
	/// Create a form over `model` with default settings
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::{FieldSchema, FieldEvent, MemoryModel, ModelForm, Schema};
	/// use serde_json::json;
	///
	/// let schema = Schema::new().with_field("name", FieldSchema::text().required());
	/// let model = MemoryModel::from_value(json!({"name": "Bo"}));
	/// let mut form = ModelForm::new(schema, model);
	///
	/// form.handle_event(&FieldEvent::change("name", json!("Alice"))).unwrap();
	/// form.save().unwrap();
	///
	/// assert_eq!(form.model().attributes()["name"], json!("Alice"));
	/// assert_eq!(form.model().save_count(), 1);
	/// ```
	pub fn new(schema: impl Into<Arc<Schema>>, model: M) -> Self {
		Self::with_settings(schema, model, FormSettings::default())
	}

	pub fn with_settings(schema: impl Into<Arc<Schema>>, model: M, settings: FormSettings) -> Self {
		let schema = schema.into();
		let settings = Arc::new(settings);
		let fields = parse_fields_with(&settings, &schema, Some(&model as &dyn ValueSource));
		Self {
			schema,
			settings,
			model,
			fields,
			on_save: None,
		}
	}

	/// Create a form from the JSON form of its schema.
	pub fn from_json(schema: &Value, model: M) -> FormResult<Self> {
		Ok(Self::new(Schema::from_json(schema)?, model))
	}

	/// Registers a callback run after every successful save.
	pub fn on_save<F>(mut self, callback: F) -> Self
	where
		F: FnMut() + Send + 'static,
	{
		self.on_save = Some(Box::new(callback));
		self
	}

	pub fn schema(&self) -> &Arc<Schema> {
		&self.schema
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	pub fn model(&self) -> &M {
		&self.model
	}

	/// Mutable access to the model. Call [`ModelForm::reload`] afterwards to
	/// reseed the fields.
	pub fn model_mut(&mut self) -> &mut M {
		&mut self.model
	}

	pub fn into_model(self) -> M {
		self.model
	}

	/// Top-level field nodes in schema order.
	pub fn fields(&self) -> &[Box<dyn FieldNode>] {
		&self.fields
	}

	/// Looks up a node by dotted path, e.g. `items.0.item`.
	pub fn field(&self, path: &str) -> Option<&dyn FieldNode> {
		find_field(&self.fields, path)
	}

	pub fn field_mut(&mut self, path: &str) -> Option<&mut dyn FieldNode> {
		find_field_mut(&mut self.fields, path)
	}

	pub fn handle_event(&mut self, event: &FieldEvent) -> FormResult<()> {
		apply_event(&mut self.fields, event)
	}

	/// Validates every top-level field in schema order, stopping at the first
	/// failure.
	pub fn validate(&self) -> FormResult<()> {
		for field in &self.fields {
			field.validate_field().map_err(|error| FormError::Field {
				field: field.name().to_string(),
				error,
			})?;
		}
		Ok(())
	}

	pub fn is_valid(&self) -> bool {
		self.validate().is_ok()
	}

	/// Current values of every top-level field, keyed by name in schema order
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::{FieldSchema, MemoryModel, ModelForm, Schema};
	/// use serde_json::json;
	///
	/// let schema = Schema::new()
	///     .with_field("b", FieldSchema::text())
	///     .with_field("a", FieldSchema::number());
	/// let form = ModelForm::new(schema, MemoryModel::from_value(json!({"a": 1})));
	///
	/// assert_eq!(form.value(), json!({"b": null, "a": 1}));
	/// ```
	pub fn value(&self) -> Value {
		let mut values = Map::new();
		for field in &self.fields {
			values.insert(field.name().to_string(), field.get_value());
		}
		Value::Object(values)
	}

	/// Rebuilds every field from the model, discarding unsaved edits.
	pub fn reload(&mut self) {
		self.fields = parse_fields_with(
			&self.settings,
			&self.schema,
			Some(&self.model as &dyn ValueSource),
		);
	}

	/// Validates the form and commits its values to the model
	///
	/// Nothing is written when validation fails. Otherwise every top-level
	/// value is written with [`FormModel::set_field`], the model is saved and
	/// the save callback, if any, is run.
	pub fn save(&mut self) -> FormResult<()> {
		if let Err(err) = self.validate() {
			tracing::warn!(error = %err, "form save rejected by validation");
			return Err(err);
		}

		for field in &self.fields {
			tracing::debug!(field = field.name(), "writing field to model");
			self.model
				.set_field(field.name(), field.get_value())
				.map_err(|e| {
					tracing::warn!(field = field.name(), error = %e, "model rejected field value");
					FormError::Model(e)
				})?;
		}

		self.model.save().map_err(|e| {
			tracing::warn!(error = %e, "model save failed");
			FormError::Model(e)
		})?;
		tracing::debug!(fields = self.fields.len(), "form saved");

		if let Some(callback) = self.on_save.as_mut() {
			callback();
		}
		Ok(())
	}
}

impl<M: fmt::Debug> fmt::Debug for ModelForm<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelForm")
			.field("schema", &self.schema)
			.field("settings", &self.settings)
			.field("model", &self.model)
			.field("fields", &self.fields)
			.field("on_save", &self.on_save.is_some())
			.finish()
	}
}
