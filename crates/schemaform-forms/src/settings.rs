//! TOML-backed form settings
//!
//! ```toml
//! default_max_length = 500
//! render_labels = true
//! csrf_enabled = true
//! relax_key_columns = false
//! submit_text = "Save"
//! wrapper_class = "form-row"
//! method = "POST"
//! ```
//!
//! Every key is optional.

use serde::Deserialize;
use std::path::Path;

use crate::descriptor::{DEFAULT_MAX_LENGTH, JSON_PLACEHOLDER_GUIDE};
use crate::model::{FormModel, FormOptions, RequestMethod};
use crate::render::RenderOptions;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read settings: {0}")]
	Io(#[from] std::io::Error),
	#[error("Invalid settings: {0}")]
	Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	pub default_max_length: usize,
	pub render_labels: bool,
	pub csrf_enabled: bool,
	pub relax_key_columns: bool,
	pub submit_text: String,
	pub wrapper_class: Option<String>,
	pub json_placeholder_guide: String,
	pub method: RequestMethod,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			default_max_length: DEFAULT_MAX_LENGTH,
			render_labels: true,
			csrf_enabled: true,
			relax_key_columns: false,
			submit_text: "Submit".to_string(),
			wrapper_class: None,
			json_placeholder_guide: JSON_PLACEHOLDER_GUIDE.to_string(),
			method: RequestMethod::Post,
		}
	}
}

impl FormSettings {
	/// Parse settings from TOML text
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{FormSettings, RequestMethod};
	///
	/// let settings = FormSettings::from_toml_str("submit_text = \"Save\"\nmethod = \"GET\"").unwrap();
	/// assert_eq!(settings.submit_text, "Save");
	/// assert_eq!(settings.method, RequestMethod::Get);
	/// assert_eq!(settings.default_max_length, 255);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&source)?;
		tracing::debug!(path = %path.display(), "form settings loaded");
		Ok(settings)
	}

	pub fn form_options(&self) -> FormOptions {
		FormOptions {
			labels: self.render_labels,
			default_max_length: self.default_max_length,
			relax_key_columns: self.relax_key_columns,
			json_placeholder_guide: self.json_placeholder_guide.clone(),
		}
	}

	pub fn render_options(&self) -> RenderOptions {
		RenderOptions {
			render_labels: self.render_labels,
			wrapper_class: self.wrapper_class.clone(),
			submit_text: self.submit_text.clone(),
			title: None,
		}
	}

	/// Apply the form-level settings (method, CSRF) to a built model
	pub fn apply(&self, model: FormModel) -> FormModel {
		model
			.with_method(self.method)
			.with_csrf(self.csrf_enabled)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_empty_document_uses_defaults() {
		let settings = FormSettings::from_toml_str("").unwrap();
		assert_eq!(settings, FormSettings::default());
	}

	#[test]
	fn test_projections() {
		let settings = FormSettings::from_toml_str(
			r#"
			default_max_length = 1000
			render_labels = false
			relax_key_columns = true
			wrapper_class = "row"
			submit_text = "Create"
			"#,
		)
		.unwrap();

		let form = settings.form_options();
		assert_eq!(form.default_max_length, 1000);
		assert!(!form.labels);
		assert!(form.relax_key_columns);

		let render = settings.render_options();
		assert!(!render.render_labels);
		assert_eq!(render.wrapper_class.as_deref(), Some("row"));
		assert_eq!(render.submit_text, "Create");
	}

	#[test]
	fn test_invalid_method_rejected() {
		let result = FormSettings::from_toml_str("method = \"PATCH\"");
		assert!(matches!(result, Err(SettingsError::Toml(_))));
	}

	#[test]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "csrf_enabled = false").unwrap();

		let settings = FormSettings::from_file(file.path()).unwrap();
		assert!(!settings.csrf_enabled);
	}

	#[test]
	fn test_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let result = FormSettings::from_file(dir.path().join("absent.toml"));

		assert!(matches!(result, Err(SettingsError::Io(_))));
	}
}
