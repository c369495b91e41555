//! Renderable configuration of a single input
//!
//! A [`FieldDescriptor`] is derived from one [`ColumnMetadata`] plus the
//! form-level [`FormOptions`]. Descriptors are immutable; configuration is
//! accumulated in a [`FieldDescriptorBuilder`] and frozen by
//! [`FieldDescriptorBuilder::build`].

use schemaform_db::ColumnMetadata;
use serde::{Deserialize, Serialize};

use crate::error::FormResult;
use crate::model::FormOptions;
use crate::resolver::resolve_column;
use crate::util::{humanize, title_case};
use crate::widget::WidgetKind;

/// Maximum input length used when the column declares none
pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Guidance appended to the placeholder of JSON-encoded fields
pub const JSON_PLACEHOLDER_GUIDE: &str = "Separate using commas E.g One,two,three";

/// Resolved, render-ready configuration for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	name: String,
	widget: WidgetKind,
	label: Option<String>,
	placeholder: String,
	options: Vec<String>,
	default_value: Option<String>,
	max_length: usize,
	required: bool,
	accepts_multiple: bool,
	is_json_encoded: bool,
}

impl FieldDescriptor {
	/// Start configuring a descriptor by hand
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{FieldDescriptor, WidgetKind};
	///
	/// let field = FieldDescriptor::builder("first_name", WidgetKind::Text)
	///     .required(true)
	///     .build();
	///
	/// assert_eq!(field.placeholder(), "First name");
	/// assert_eq!(field.max_length(), 255);
	/// assert!(field.required());
	/// ```
	pub fn builder(name: impl Into<String>, widget: WidgetKind) -> FieldDescriptorBuilder {
		FieldDescriptorBuilder::new(name, widget)
	}

	/// Derive the descriptor for an introspected column
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::ColumnMetadata;
	/// use schemaform_forms::{FieldDescriptor, FormOptions, WidgetKind};
	///
	/// let column = ColumnMetadata::new("project_tags", "json").with_nullable(true);
	/// let field = FieldDescriptor::from_column(&column, &FormOptions::default()).unwrap();
	///
	/// assert_eq!(field.widget(), WidgetKind::Text);
	/// assert!(field.is_json_encoded());
	/// assert!(field.accepts_multiple());
	/// assert!(!field.required());
	/// assert_eq!(field.label(), Some("Project Tags"));
	/// assert_eq!(
	///     field.placeholder(),
	///     "Project Tags: Separate using commas E.g One,two,three"
	/// );
	/// ```
	pub fn from_column(column: &ColumnMetadata, options: &FormOptions) -> FormResult<Self> {
		let resolved = resolve_column(column)?;

		let relaxed = options.relax_key_columns
			&& (column.key_role().is_identifying() || column.is_auto_increment());
		let required = !column.nullable() && !relaxed;

		let mut builder = FieldDescriptorBuilder::new(column.name(), resolved.widget)
			.options(resolved.options)
			.required(required)
			.max_length(
				resolved
					.declared_length
					.unwrap_or(options.default_max_length),
			)
			.placeholder_guide(options.json_placeholder_guide.clone());

		if let Some(default) = column.literal_default() {
			builder = builder.default_value(default);
		}
		if options.labels {
			builder = builder.label(title_case(column.name()));
		}
		if resolved.is_json {
			builder = builder.json_encoded();
		}

		Ok(builder.build())
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn widget(&self) -> WidgetKind {
		self.widget
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn placeholder(&self) -> &str {
		&self.placeholder
	}

	/// Option values for dropdowns and radio groups
	pub fn options(&self) -> &[String] {
		&self.options
	}

	pub fn default_value(&self) -> Option<&str> {
		self.default_value.as_deref()
	}

	pub fn max_length(&self) -> usize {
		self.max_length
	}

	pub fn required(&self) -> bool {
		self.required
	}

	pub fn accepts_multiple(&self) -> bool {
		self.accepts_multiple
	}

	/// Submitted comma separated values are stored as a JSON array
	pub fn is_json_encoded(&self) -> bool {
		self.is_json_encoded
	}

	/// HTML `id` attribute of the rendered control
	pub fn html_id(&self) -> String {
		format!("id_{}", self.name)
	}
}

/// Accumulates descriptor configuration; see [`FieldDescriptor::builder`]
#[derive(Debug, Clone)]
pub struct FieldDescriptorBuilder {
	name: String,
	widget: WidgetKind,
	label: Option<String>,
	placeholder: Option<String>,
	placeholder_guide: String,
	options: Vec<String>,
	default_value: Option<String>,
	max_length: usize,
	required: bool,
	is_json_encoded: bool,
}

impl FieldDescriptorBuilder {
	pub fn new(name: impl Into<String>, widget: WidgetKind) -> Self {
		Self {
			name: name.into(),
			widget,
			label: None,
			placeholder: None,
			placeholder_guide: JSON_PLACEHOLDER_GUIDE.to_string(),
			options: Vec::new(),
			default_value: None,
			max_length: DEFAULT_MAX_LENGTH,
			required: false,
			is_json_encoded: false,
		}
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Override the placeholder derived from the field name
	pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	/// Guidance appended to the placeholder of JSON-encoded fields
	pub fn placeholder_guide(mut self, guide: impl Into<String>) -> Self {
		self.placeholder_guide = guide.into();
		self
	}

	pub fn options(mut self, options: Vec<String>) -> Self {
		self.options = options;
		self
	}

	pub fn default_value(mut self, value: impl Into<String>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	pub fn max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Mark the field as a JSON array column
	///
	/// JSON fields always render as a text input accepting multiple comma
	/// separated values, whatever widget was configured before.
	pub fn json_encoded(mut self) -> Self {
		self.is_json_encoded = true;
		self.widget = WidgetKind::Text;
		self
	}

	pub fn build(self) -> FieldDescriptor {
		let placeholder = if self.is_json_encoded {
			let base = self
				.placeholder
				.unwrap_or_else(|| title_case(&self.name));
			format!("{}: {}", base, self.placeholder_guide)
		} else {
			self.placeholder.unwrap_or_else(|| humanize(&self.name))
		};

		let options = if self.widget.has_options() {
			self.options
		} else {
			Vec::new()
		};

		FieldDescriptor {
			name: self.name,
			widget: self.widget,
			label: self.label,
			placeholder,
			options,
			default_value: self.default_value,
			max_length: self.max_length,
			required: self.required,
			accepts_multiple: self.is_json_encoded,
			is_json_encoded: self.is_json_encoded,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use schemaform_db::KeyRole;

	#[test]
	fn test_nullable_column_is_optional() {
		let column = ColumnMetadata::new("nickname", "varchar(40)").with_nullable(true);
		let field = FieldDescriptor::from_column(&column, &FormOptions::default()).unwrap();

		assert!(!field.required());
		assert_eq!(field.max_length(), 40);
	}

	#[test]
	fn test_non_nullable_column_is_required() {
		let column = ColumnMetadata::new("email", "varchar(255)");
		let field = FieldDescriptor::from_column(&column, &FormOptions::default()).unwrap();

		assert!(field.required());
		assert_eq!(field.placeholder(), "Email");
	}

	#[test]
	fn test_key_columns_relaxed_by_policy() {
		let column = ColumnMetadata::new("slug", "varchar(64)").with_key_role(KeyRole::Unique);

		let strict = FieldDescriptor::from_column(&column, &FormOptions::default()).unwrap();
		assert!(strict.required());

		let relaxed_options = FormOptions::default().with_relax_key_columns(true);
		let relaxed = FieldDescriptor::from_column(&column, &relaxed_options).unwrap();
		assert!(!relaxed.required());
	}

	#[test]
	fn test_labels_disabled() {
		let column = ColumnMetadata::new("first_name", "varchar(60)");
		let options = FormOptions::default().with_labels(false);
		let field = FieldDescriptor::from_column(&column, &options).unwrap();

		assert_eq!(field.label(), None);
		assert_eq!(field.placeholder(), "First name");
	}

	#[test]
	fn test_default_max_length_from_options() {
		let column = ColumnMetadata::new("body", "text");
		let options = FormOptions::default().with_default_max_length(4000);
		let field = FieldDescriptor::from_column(&column, &options).unwrap();

		assert_eq!(field.widget(), WidgetKind::TextArea);
		assert_eq!(field.max_length(), 4000);
	}

	#[test]
	fn test_default_value_carried() {
		let column = ColumnMetadata::new("status", "enum('draft','review','live')")
			.with_default("review");
		let field = FieldDescriptor::from_column(&column, &FormOptions::default()).unwrap();

		assert_eq!(field.widget(), WidgetKind::Dropdown);
		assert_eq!(field.options(), ["draft", "review", "live"]);
		assert_eq!(field.default_value(), Some("review"));
	}

	#[test]
	fn test_generated_default_not_prefilled() {
		let column = ColumnMetadata::new("created_at", "timestamp")
			.with_default("CURRENT_TIMESTAMP")
			.with_extra("DEFAULT_GENERATED");
		let field = FieldDescriptor::from_column(&column, &FormOptions::default()).unwrap();

		assert_eq!(field.widget(), WidgetKind::Date);
		assert_eq!(field.default_value(), None);
	}

	#[test]
	fn test_json_overrides_configured_widget() {
		let field = FieldDescriptor::builder("links", WidgetKind::TextArea)
			.json_encoded()
			.placeholder("Links")
			.build();

		assert_eq!(field.widget(), WidgetKind::Text);
		assert!(field.accepts_multiple());
		assert_eq!(
			field.placeholder(),
			format!("Links: {}", JSON_PLACEHOLDER_GUIDE)
		);
	}

	#[test]
	fn test_custom_json_guide() {
		let column = ColumnMetadata::new("tags", "json");
		let options = FormOptions::default().with_json_placeholder_guide("comma separated");
		let field = FieldDescriptor::from_column(&column, &options).unwrap();

		assert_eq!(field.placeholder(), "Tags: comma separated");
	}

	#[test]
	fn test_options_dropped_for_widgets_without_choices() {
		let field = FieldDescriptor::builder("title", WidgetKind::Text)
			.options(vec!["a".to_string()])
			.build();

		assert!(field.options().is_empty());
	}

	#[test]
	fn test_html_id() {
		let field = FieldDescriptor::builder("email", WidgetKind::Text).build();
		assert_eq!(field.html_id(), "id_email");
	}
}
