//! Schema-driven forms bound to a backing model
//!
//! This crate provides:
//! - Schema descriptors parsed from JSON with a closed set of field kinds
//! - Text, password, email, number, choice and time widgets
//! - Object fields and repeating array fields built recursively from nested schemas
//! - Fail-fast validation and save into a [`FormModel`]
//! - Edit events addressed by dotted field paths

pub mod event;
pub mod field;
pub mod fields;
pub mod form;
pub mod parser;
pub mod schema;
pub mod settings;
pub mod source;
pub mod validators;

pub use event::{FieldEvent, apply_event, find_field, find_field_mut};
pub use field::{FieldError, FieldNode, FieldResult, InputType, Widget};
pub use fields::{
	ArrayField, ChoiceField, CompositeField, CompositeMode, InputField, NumberField, TimeField,
};
pub use form::{FormError, FormResult, ModelForm};
pub use parser::{build_field, parse_fields, parse_fields_with};
pub use schema::{FieldKind, FieldSchema, Schema, SchemaError};
pub use settings::FormSettings;
pub use source::{FormModel, MemoryModel, ValueSource};
pub use validators::{EmailValidator, MaxLengthValidator, NumberValidator};
