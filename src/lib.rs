//! # modelform
//!
//! Declarative forms driven by a schema and bound to a backing model.
//!
//! A [`Schema`] names each field and its kind. Parsing it against a backing
//! [`ValueSource`] yields a tree of field nodes: scalar widgets, object fields
//! and repeating array fields whose elements are built recursively from the
//! nested schema. A [`ModelForm`] collects the current values of that tree,
//! validates them and saves them into its [`FormModel`].
//!
//! ## Feature Flags
//!
//! - `minimal` - Schema, field nodes and the form container
//! - `full` (default) - Adds the HTML renderer
//! - `render` - The [`render`] module
//!
//! ## Quick Example
//!
//! ```
//! use modelform::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::from_json(&json!({
//!     "email": {"type": "email", "required": true, "label": "Email"},
//!     "items": {
//!         "type": "Array",
//!         "fields": {"item": {"type": "String", "required": true}},
//!     },
//! }))
//! .unwrap();
//!
//! let mut form = ModelForm::new(schema, MemoryModel::new());
//! form.handle_event(&FieldEvent::change("email", json!("bo@example.com"))).unwrap();
//! form.handle_event(&FieldEvent::AddElement { path: "items".to_string() }).unwrap();
//! form.handle_event(&FieldEvent::change("items.0.item", json!("pen"))).unwrap();
//! form.save().unwrap();
//!
//! assert_eq!(
//!     form.model().attributes()["items"],
//!     json!([{"item": "pen"}]),
//! );
//! ```

pub use modelform_fields::{
	ArrayField, ChoiceField, CompositeField, CompositeMode, EmailValidator, FieldError,
	FieldEvent, FieldKind, FieldNode, FieldResult, FieldSchema, FormError, FormModel, FormResult,
	FormSettings, InputField, InputType, MaxLengthValidator, MemoryModel, ModelForm,
	NumberField, NumberValidator, Schema, SchemaError, TimeField, ValueSource, Widget,
	apply_event, build_field, find_field, find_field_mut, parse_fields, parse_fields_with,
};

/// Lower-level access to the field crate's modules.
pub use modelform_fields as fields;

#[cfg(feature = "render")]
pub use modelform_render as render;

/// Commonly used types
pub mod prelude {
	pub use crate::{
		FieldError, FieldEvent, FieldKind, FieldNode, FieldSchema, FormError, FormModel,
		FormResult, FormSettings, MemoryModel, ModelForm, Schema, ValueSource, Widget,
		parse_fields,
	};

	#[cfg(feature = "render")]
	pub use crate::render::HtmlRenderer;
}
