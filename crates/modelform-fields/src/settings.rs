//! Form-wide settings

use crate::form::{FormError, FormResult};
use serde::{Deserialize, Serialize};

/// Default `maxlength` of text inputs that declare none.
pub const DEFAULT_MAX_LENGTH: usize = 150;

/// Value of the leading empty option of every choice field.
pub const BLANK_CHOICE: &str = "_blank";

pub const DEFAULT_ID_PREFIX: &str = "form-field-";

/// Settings shared by every node of a parsed form.
///
/// Missing keys fall back to their defaults, so a partial TOML table is
/// enough to override a single setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	pub default_max_length: usize,
	pub blank_choice: String,
	pub id_prefix: String,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			default_max_length: DEFAULT_MAX_LENGTH,
			blank_choice: BLANK_CHOICE.to_string(),
			id_prefix: DEFAULT_ID_PREFIX.to_string(),
		}
	}
}

impl FormSettings {
	/// Load settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::FormSettings;
	///
	/// let settings = FormSettings::from_toml_str("default_max_length = 80").unwrap();
	/// assert_eq!(settings.default_max_length, 80);
	/// assert_eq!(settings.blank_choice, "_blank");
	/// ```
	pub fn from_toml_str(content: &str) -> FormResult<Self> {
		toml::from_str(content).map_err(|e| FormError::Settings(e.to_string()))
	}

	/// HTML id of the control rendered for a field path
	///
	/// # Examples
	///
	/// ```
	/// use modelform_fields::FormSettings;
	///
	/// let settings = FormSettings::default();
	/// assert_eq!(settings.html_id("email"), "form-field-email");
	/// assert_eq!(settings.html_id("items.0.item"), "form-field-items-0-item");
	/// ```
	pub fn html_id(&self, path: &str) -> String {
		format!("{}{}", self.id_prefix, path.replace('.', "-"))
	}
}
