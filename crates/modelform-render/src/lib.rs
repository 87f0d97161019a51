//! HTML rendering for modelform field trees
//!
//! Turns the [`Widget`](modelform_fields::Widget) description of every node
//! into markup. All text content and attribute values are escaped.

pub mod escape;
pub mod renderer;

pub use escape::{escape_html, escape_html_attr};
pub use renderer::HtmlRenderer;
