//! Backing value sources and models
//!
//! A [`ValueSource`] supplies initial values while a form is parsed. A
//! [`FormModel`] is a source that also accepts committed values and knows how
//! to persist itself.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Read access to initial field values.
///
/// A `null` result is treated the same as a missing one.
pub trait ValueSource {
	fn get(&self, name: &str) -> Option<Value>;
}

impl ValueSource for Map<String, Value> {
	fn get(&self, name: &str) -> Option<Value> {
		Map::get(self, name).cloned()
	}
}

impl ValueSource for Value {
	fn get(&self, name: &str) -> Option<Value> {
		self.as_object().and_then(|map| map.get(name)).cloned()
	}
}

impl ValueSource for HashMap<String, Value> {
	fn get(&self, name: &str) -> Option<Value> {
		HashMap::get(self, name).cloned()
	}
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
	fn get(&self, name: &str) -> Option<Value> {
		(**self).get(name)
	}
}

/// A backing object that receives the values of a saved form.
///
/// # Examples
///
/// ```
/// use modelform_fields::{FormModel, ValueSource};
/// use serde_json::{Value, json};
///
/// struct Profile {
///     name: String,
/// }
///
/// impl ValueSource for Profile {
///     fn get(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(json!(self.name)),
///             _ => None,
///         }
///     }
/// }
///
/// impl FormModel for Profile {
///     fn set_field(&mut self, name: &str, value: Value) -> Result<(), String> {
///         match (name, value) {
///             ("name", Value::String(s)) => {
///                 self.name = s;
///                 Ok(())
///             }
///             (name, _) => Err(format!("cannot set {}", name)),
///         }
///     }
///
///     fn save(&mut self) -> Result<(), String> {
///         Ok(())
///     }
/// }
///
/// let mut profile = Profile { name: "Bo".to_string() };
/// profile.set_field("name", json!("Alice")).unwrap();
/// assert_eq!(profile.get("name"), Some(json!("Alice")));
/// ```
pub trait FormModel: ValueSource {
	fn set_field(&mut self, name: &str, value: Value) -> Result<(), String>;

	fn save(&mut self) -> Result<(), String>;
}

/// In-memory [`FormModel`] backed by an ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryModel {
	attributes: Map<String, Value>,
	save_count: usize,
}

impl MemoryModel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a model from a JSON object
	///
	/// Non-object values produce an empty model.
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::{MemoryModel, ValueSource};
	/// use serde_json::json;
	///
	/// let model = MemoryModel::from_value(json!({"test": "v"}));
	/// assert_eq!(model.get("test"), Some(json!("v")));
	/// assert_eq!(model.save_count(), 0);
	/// ```
	pub fn from_value(value: Value) -> Self {
		let attributes = match value {
			Value::Object(map) => map,
			_ => Map::new(),
		};
		Self {
			attributes,
			save_count: 0,
		}
	}

	pub fn attributes(&self) -> &Map<String, Value> {
		&self.attributes
	}

	/// Number of completed `save()` calls.
	pub fn save_count(&self) -> usize {
		self.save_count
	}

	pub fn into_value(self) -> Value {
		Value::Object(self.attributes)
	}
}

impl ValueSource for MemoryModel {
	fn get(&self, name: &str) -> Option<Value> {
		self.attributes.get(name).cloned()
	}
}

impl FormModel for MemoryModel {
	fn set_field(&mut self, name: &str, value: Value) -> Result<(), String> {
		self.attributes.insert(name.to_string(), value);
		Ok(())
	}

	fn save(&mut self) -> Result<(), String> {
		self.save_count += 1;
		Ok(())
	}
}

/// Resolves the initial value of `name`, treating `null` as absent.
pub fn initial_value(source: Option<&dyn ValueSource>, name: &str) -> Value {
	source
		.and_then(|source| source.get(name))
		.filter(|value| !value.is_null())
		.unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_value_object_lookup() {
		let value = json!({"test": "test value"});
		assert_eq!(ValueSource::get(&value, "test"), Some(json!("test value")));
		assert_eq!(ValueSource::get(&value, "other"), None);
	}

	#[rstest]
	fn test_non_object_value_has_no_fields() {
		assert_eq!(ValueSource::get(&json!("scalar"), "test"), None);
		assert_eq!(ValueSource::get(&json!([1, 2]), "0"), None);
	}

	#[rstest]
	fn test_hash_map_lookup() {
		let mut map = HashMap::new();
		map.insert("test".to_string(), json!(3));
		assert_eq!(ValueSource::get(&map, "test"), Some(json!(3)));
	}

	#[rstest]
	fn test_initial_value_filters_null() {
		let value = json!({"present": "v", "empty": null});
		let source: &dyn ValueSource = &value;

		assert_eq!(initial_value(Some(source), "present"), json!("v"));
		assert_eq!(initial_value(Some(source), "empty"), Value::Null);
		assert_eq!(initial_value(Some(source), "missing"), Value::Null);
		assert_eq!(initial_value(None, "present"), Value::Null);
	}

	#[rstest]
	fn test_memory_model_set_and_save() {
		// Arrange
		let mut model = MemoryModel::new();

		// Act
		model.set_field("name", json!("Bo")).unwrap();
		model.save().unwrap();

		// Assert
		assert_eq!(model.get("name"), Some(json!("Bo")));
		assert_eq!(model.save_count(), 1);
		assert_eq!(model.into_value(), json!({"name": "Bo"}));
	}
}
