//! HTML rendering of field trees

use crate::escape::{escape_html, escape_html_attr};
use modelform_fields::field::display_value;
use modelform_fields::{FieldNode, FormModel, FormSettings, ModelForm, Widget};
use std::fmt::Write;

/// Renders field nodes as Bootstrap-style HTML controls.
///
/// Every scalar control is named after its dotted field path, which a host
/// submits back as a [`modelform_fields::FieldEvent::Change`]. A time field is
/// the exception: it renders two controls named `{path}.hours` and
/// `{path}.minutes`, and the pair maps to one
/// [`modelform_fields::FieldEvent::SetTime`] for `{path}`. Ids are derived
/// from the same path through [`FormSettings::html_id`].
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
	settings: FormSettings,
}

impl HtmlRenderer {
	pub fn new(settings: FormSettings) -> Self {
		Self { settings }
	}

	/// Create a renderer sharing the settings of `form`.
	pub fn for_form<M: FormModel>(form: &ModelForm<M>) -> Self {
		Self::new(form.settings().clone())
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	/// Renders every top-level field of `form`.
	pub fn render_form<M: FormModel>(&self, form: &ModelForm<M>) -> String {
		self.render_fields(form.fields())
	}

	/// Renders top-level nodes in order
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::{FieldSchema, Schema, parse_fields};
	/// use modelform_render::HtmlRenderer;
	/// use serde_json::json;
	///
	/// let schema = Schema::new().with_field("name", FieldSchema::text().with_label("Name"));
	/// let source = json!({"name": "Bo"});
	/// let fields = parse_fields(&schema, Some(&source));
	///
	/// let html = HtmlRenderer::default().render_fields(&fields);
	/// assert!(html.contains(r#"<label for="form-field-name">Name</label>"#));
	/// assert!(html.contains(r#"value="Bo""#));
	/// ```
	pub fn render_fields(&self, fields: &[Box<dyn FieldNode>]) -> String {
		tracing::debug!(fields = fields.len(), "rendering form fields");
		let mut html = String::new();
		for field in fields {
			self.write_node(&mut html, field.as_ref(), field.name(), None);
		}
		html
	}

	/// Renders one node found at `path`.
	pub fn render_field(&self, node: &dyn FieldNode, path: &str) -> String {
		let mut html = String::new();
		self.write_node(&mut html, node, path, None);
		html
	}

	fn write_node(&self, html: &mut String, node: &dyn FieldNode, path: &str, key: Option<&str>) {
		let id = escape_html_attr(&self.settings.html_id(path));
		let name = escape_html_attr(path);

		match node.widget() {
			Widget::Object => {
				let _ = write!(html, r#"<div class="object-field" id="{}">"#, id);
				self.write_label(html, node, &id);
				self.write_children(html, node, path);
				html.push_str("</div>");
			}
			Widget::ArrayElement { index } => {
				html.push_str(r#"<div class="array-element-field""#);
				if let Some(key) = key {
					let _ = write!(html, r#" data-key="{}""#, escape_html_attr(key));
				}
				let _ = write!(html, r#" data-index="{}">"#, index);
				self.write_children(html, node, path);
				let _ = write!(
					html,
					r#"<button type="button" class="trash-button" data-path="{}" data-index="{}">&#128465;</button>"#,
					escape_html_attr(parent_path(path)),
					index
				);
				html.push_str("</div>");
			}
			Widget::Array { add_label } => {
				let _ = write!(html, r#"<div class="array-field" id="{}">"#, id);
				self.write_label(html, node, &id);
				for (position, element) in node.children().into_iter().enumerate() {
					let key = node.as_array().and_then(|array| array.element_key(position));
					let element_path = format!("{}.{}", path, element.name());
					self.write_node(html, element, &element_path, key.as_deref());
				}
				let _ = write!(
					html,
					r#"<button type="button" class="add-button" data-path="{}">{}</button>"#,
					name,
					escape_html(&add_label)
				);
				html.push_str("</div>");
			}
			widget => {
				html.push_str(r#"<div class="form-group">"#);
				self.write_label(html, node, &id);
				self.write_control(html, node, widget, &id, &name);
				if let Some(help) = node.help_text() {
					let _ = write!(
						html,
						r#"<small class="form-text text-muted">{}</small>"#,
						escape_html(help)
					);
				}
				html.push_str("</div>");
			}
		}
	}

	fn write_children(&self, html: &mut String, node: &dyn FieldNode, path: &str) {
		for child in node.children() {
			let child_path = format!("{}.{}", path, child.name());
			self.write_node(html, child, &child_path, None);
		}
	}

	fn write_label(&self, html: &mut String, node: &dyn FieldNode, id: &str) {
		if let Some(label) = node.label() {
			let _ = write!(html, r#"<label for="{}">{}</label>"#, id, escape_html(label));
		}
	}

	fn write_control(
		&self,
		html: &mut String,
		node: &dyn FieldNode,
		widget: Widget,
		id: &str,
		name: &str,
	) {
		let value = escape_html_attr(&display_value(&node.get_value()));
		let required = if node.required() { " required" } else { "" };

		match widget {
			Widget::TextInput {
				input_type,
				max_length,
				placeholder,
			} => {
				let _ = write!(
					html,
					r#"<input type="{}" class="form-control" id="{}" name="{}" value="{}" maxlength="{}"{}{} />"#,
					input_type.as_html_type(),
					id,
					name,
					value,
					max_length,
					placeholder_attr(placeholder.as_deref()),
					required
				);
			}
			Widget::NumberInput { placeholder } => {
				let _ = write!(
					html,
					r#"<input type="number" class="form-control" id="{}" name="{}" value="{}"{}{} />"#,
					id,
					name,
					value,
					placeholder_attr(placeholder.as_deref()),
					required
				);
			}
			Widget::Select { options, selected } => {
				let _ = write!(
					html,
					r#"<select class="form-control" id="{}" name="{}"{}>"#,
					id, name, required
				);
				for (position, option) in options.iter().enumerate() {
					// The leading option is the blank sentinel and shows no text.
					let text = if position == 0 { "" } else { option.as_str() };
					let mark = if *option == selected { " selected" } else { "" };
					let _ = write!(
						html,
						r#"<option value="{}"{}>{}</option>"#,
						escape_html_attr(option),
						mark,
						escape_html(text)
					);
				}
				html.push_str("</select>");
			}
			Widget::TimeInput { hour, minute } => {
				let _ = write!(
					html,
					concat!(
						r#"<div class="form-inline time-field">"#,
						r#"<input type="number" class="form-control" id="{id}-hours" name="{name}.hours" min="0" max="23" value="{hour}" />"#,
						r#"<span>:</span>"#,
						r#"<input type="number" class="form-control" id="{id}-minutes" name="{name}.minutes" min="0" max="59" value="{minute:02}" />"#,
						"</div>"
					),
					id = id,
					name = name,
					hour = hour,
					minute = minute
				);
			}
			Widget::Object | Widget::ArrayElement { .. } | Widget::Array { .. } => {}
		}
	}
}

fn placeholder_attr(placeholder: Option<&str>) -> String {
	match placeholder {
		Some(text) => format!(r#" placeholder="{}""#, escape_html_attr(text)),
		None => String::new(),
	}
}

fn parent_path(path: &str) -> &str {
	path.rsplit_once('.').map(|(parent, _)| parent).unwrap_or(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use modelform_fields::{FieldSchema, Schema, parse_fields};
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn renderer() -> HtmlRenderer {
		HtmlRenderer::default()
	}

	fn render(renderer: &HtmlRenderer, schema: Schema, source: serde_json::Value) -> String {
		let fields = parse_fields(&schema, Some(&source));
		renderer.render_fields(&fields)
	}

	// ============================================================
	// Scalar controls
	// ============================================================

	#[rstest]
	fn test_text_input(renderer: HtmlRenderer) {
		// Arrange
		let schema = Schema::new().with_field(
			"title",
			FieldSchema::text()
				.required()
				.with_label("Title")
				.with_placeholder("Short title"),
		);

		// Act
		let html = render(&renderer, schema, json!({"title": "Hello"}));

		// Assert
		assert_eq!(
			html,
			concat!(
				r#"<div class="form-group">"#,
				r#"<label for="form-field-title">Title</label>"#,
				r#"<input type="input" class="form-control" id="form-field-title" name="title" value="Hello" maxlength="150" placeholder="Short title" required />"#,
				"</div>"
			)
		);
	}

	#[rstest]
	#[case(FieldSchema::password(), r#"type="password""#)]
	#[case(FieldSchema::email(), r#"type="email""#)]
	#[case(FieldSchema::number(), r#"type="number""#)]
	fn test_input_types(
		renderer: HtmlRenderer,
		#[case] field: FieldSchema,
		#[case] expected: &str,
	) {
		let html = render(&renderer, Schema::new().with_field("f", field), json!({}));
		assert!(html.contains(expected));
	}

	#[rstest]
	fn test_declared_max_length(renderer: HtmlRenderer) {
		let schema = Schema::new().with_field("code", FieldSchema::text().with_max_length(8));
		let html = render(&renderer, schema, json!({}));
		assert!(html.contains(r#"maxlength="8""#));
	}

	#[rstest]
	fn test_select_has_blank_first(renderer: HtmlRenderer) {
		let schema = Schema::new().with_field("color", FieldSchema::choice(["red", "green"]));

		let html = render(&renderer, schema, json!({"color": "green"}));

		assert!(html.contains(concat!(
			r#"<select class="form-control" id="form-field-color" name="color">"#,
			r#"<option value="_blank"></option>"#,
			r#"<option value="red">red</option>"#,
			r#"<option value="green" selected>green</option>"#,
			"</select>"
		)));
	}

	#[rstest]
	fn test_time_control(renderer: HtmlRenderer) {
		let schema = Schema::new().with_field("start", FieldSchema::time());

		let html = render(&renderer, schema, json!({"start": "2015-01-01T08:05:00.000Z"}));

		assert!(html.contains(r#"<div class="form-inline time-field">"#));
		assert!(html.contains(r#"name="start.hours" min="0" max="23" value="8""#));
		assert!(html.contains(r#"name="start.minutes" min="0" max="59" value="05""#));
	}

	#[rstest]
	fn test_help_text(renderer: HtmlRenderer) {
		let schema =
			Schema::new().with_field("n", FieldSchema::number().with_help_text("Whole units"));
		let html = render(&renderer, schema, json!({}));
		assert!(html.contains(r#"<small class="form-text text-muted">Whole units</small>"#));
	}

	#[rstest]
	fn test_values_and_labels_are_escaped(renderer: HtmlRenderer) {
		let schema =
			Schema::new().with_field("bio", FieldSchema::text().with_label("<b>Bio</b>"));

		let html = render(&renderer, schema, json!({"bio": "\"><script>x</script>"}));

		assert!(!html.contains("<script>"));
		assert!(html.contains("&lt;b&gt;Bio&lt;/b&gt;"));
		assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;x&lt;/script&gt;""#));
	}

	// ============================================================
	// Composite controls
	// ============================================================

	#[rstest]
	fn test_object_children_use_dotted_names(renderer: HtmlRenderer) {
		let schema = Schema::new().with_field(
			"address",
			FieldSchema::object(Schema::new().with_field("street", FieldSchema::text()))
				.with_label("Address"),
		);

		let html = render(&renderer, schema, json!({"address": {"street": "King"}}));

		assert!(html.starts_with(r#"<div class="object-field" id="form-field-address">"#));
		assert!(html.contains(r#"<label for="form-field-address">Address</label>"#));
		assert!(html.contains(r#"id="form-field-address-street" name="address.street" value="King""#));
	}

	#[rstest]
	fn test_array_elements_and_add_button(renderer: HtmlRenderer) {
		// Arrange
		let schema = Schema::new().with_field(
			"items",
			FieldSchema::array(Schema::new().with_field("item", FieldSchema::text()))
				.with_label("Item"),
		);

		// Act
		let html = render(
			&renderer,
			schema,
			json!({"items": [{"_id": "x1", "item": "pen"}, {"item": "ink"}]}),
		);

		// Assert
		assert!(html.contains(r#"<div class="array-element-field" data-key="element-x1" data-index="0">"#));
		assert!(html.contains(r#"<div class="array-element-field" data-key="element-1-ink" data-index="1">"#));
		assert!(html.contains(r#"name="items.1.item" value="ink""#));
		assert!(html.contains(
			r#"<button type="button" class="trash-button" data-path="items" data-index="1">"#
		));
		assert!(html.ends_with(
			r#"<button type="button" class="add-button" data-path="items">Add new Item</button></div>"#
		));
	}

	#[rstest]
	fn test_custom_id_prefix() {
		let renderer = HtmlRenderer::new(FormSettings {
			id_prefix: "id_".to_string(),
			..FormSettings::default()
		});
		let schema = Schema::new().with_field("name", FieldSchema::text().with_label("Name"));

		let html = render(&renderer, schema, json!({}));

		assert!(html.contains(r#"<label for="id_name">"#));
	}

	#[rstest]
	fn test_parent_path() {
		assert_eq!(parent_path("items.0"), "items");
		assert_eq!(parent_path("a.items.3"), "a.items");
		assert_eq!(parent_path("items"), "items");
	}
}
