//! Edit events and dotted field paths
//!
//! A path names a node from the top of the form: `email` is a top-level
//! field, `address.street` a child of an object field and `items.1.item` the
//! `item` field of the second element of the `items` array.
//!
//! Field names may themselves contain dots. At each level a child whose name
//! matches the whole remaining path wins, otherwise the path is split after a
//! matching child name.

use crate::field::{FieldError, FieldNode};
use crate::form::{FormError, FormResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user interaction with one node of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FieldEvent {
	/// New value typed or selected in a scalar control.
	Change { path: String, value: Value },
	/// New hour and minute picked in a time control.
	SetTime { path: String, hour: u32, minute: u32 },
	/// The "add new" button of an array field.
	AddElement { path: String },
	/// The remove button of the element at `index`.
	RemoveElement { path: String, index: usize },
}

impl FieldEvent {
	pub fn change(path: impl Into<String>, value: Value) -> Self {
		Self::Change {
			path: path.into(),
			value,
		}
	}

	pub fn path(&self) -> &str {
		match self {
			Self::Change { path, .. }
			| Self::SetTime { path, .. }
			| Self::AddElement { path }
			| Self::RemoveElement { path, .. } => path,
		}
	}

	fn name(&self) -> &'static str {
		match self {
			Self::Change { .. } => "change",
			Self::SetTime { .. } => "set_time",
			Self::AddElement { .. } => "add_element",
			Self::RemoveElement { .. } => "remove_element",
		}
	}
}

/// Resolves a dotted path against a list of top-level nodes
///
/// # Examples
///
/// ```
/// use modelform_fields::{FieldSchema, Schema, find_field, parse_fields};
/// use serde_json::json;
///
/// let schema = Schema::new().with_field(
///     "items",
///     FieldSchema::array(Schema::new().with_field("item", FieldSchema::text())),
/// );
/// let source = json!({"items": [{"item": "a"}, {"item": "b"}]});
/// let fields = parse_fields(&schema, Some(&source));
///
/// let node = find_field(&fields, "items.1.item").unwrap();
/// assert_eq!(node.get_value(), json!("b"));
/// assert!(find_field(&fields, "items.2.item").is_none());
/// ```
pub fn find_field<'a>(fields: &'a [Box<dyn FieldNode>], path: &str) -> Option<&'a dyn FieldNode> {
	let segments = resolve_path(fields, path)?;
	let (first, rest) = segments.split_first()?;
	let mut node: &dyn FieldNode = fields.iter().find(|f| f.name() == *first)?.as_ref();
	for segment in rest {
		node = node.child(segment)?;
	}
	Some(node)
}

pub fn find_field_mut<'a>(
	fields: &'a mut [Box<dyn FieldNode>],
	path: &str,
) -> Option<&'a mut dyn FieldNode> {
	let segments = resolve_path(fields, path)?;
	let (first, rest) = segments.split_first()?;
	let mut node: &mut dyn FieldNode = fields.iter_mut().find(|f| f.name() == *first)?.as_mut();
	for segment in rest {
		node = node.child_mut(segment)?;
	}
	Some(node)
}

/// Splits `path` into the node names it passes through.
fn resolve_path<'p>(fields: &[Box<dyn FieldNode>], path: &'p str) -> Option<Vec<&'p str>> {
	let nodes: Vec<&dyn FieldNode> = fields.iter().map(|f| f.as_ref()).collect();
	let mut segments = Vec::new();
	resolve_segments(&nodes, path, &mut segments).then_some(segments)
}

fn resolve_segments<'p>(
	nodes: &[&dyn FieldNode],
	rest: &'p str,
	segments: &mut Vec<&'p str>,
) -> bool {
	if nodes.iter().any(|n| n.name() == rest) {
		segments.push(rest);
		return true;
	}
	for node in nodes {
		let name = node.name();
		let Some(tail) = rest.strip_prefix(name).and_then(|r| r.strip_prefix('.')) else {
			continue;
		};
		segments.push(&rest[..name.len()]);
		if resolve_segments(&node.children(), tail, segments) {
			return true;
		}
		segments.pop();
	}
	false
}

/// Applies `event` to the node it targets.
pub fn apply_event(fields: &mut [Box<dyn FieldNode>], event: &FieldEvent) -> FormResult<()> {
	let path = event.path();
	tracing::debug!(path, event = event.name(), "applying field event");

	let node =
		find_field_mut(fields, path).ok_or_else(|| FormError::UnknownField(path.to_string()))?;
	let unsupported = || FormError::UnsupportedEvent {
		path: path.to_string(),
		event: event.name(),
	};

	let result = match event {
		FieldEvent::Change { value, .. } => node.set_value(value.clone()),
		FieldEvent::SetTime { hour, minute, .. } => node
			.as_time_mut()
			.ok_or_else(unsupported)?
			.set_time(*hour, *minute),
		FieldEvent::AddElement { .. } => {
			node.as_array_mut().ok_or_else(unsupported)?.add_new();
			Ok(())
		}
		FieldEvent::RemoveElement { index, .. } => node
			.as_array_mut()
			.ok_or_else(unsupported)?
			.on_remove_element(*index)
			.map(|_| ()),
	};

	result.map_err(|error| match error {
		FieldError::NotEditable(_) => unsupported(),
		error => FormError::Field {
			field: path.to_string(),
			error,
		},
	})
}
