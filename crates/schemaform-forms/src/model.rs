//! Form model built from a table's columns
//!
//! [`FormModel`] owns the ordered field descriptors of one table together with
//! the form-level settings (action, method, CSRF, htmx). It is the input of
//! both [`FormRenderer`](crate::FormRenderer) and
//! [`SubmissionHandler`](crate::SubmissionHandler).
//!
//! ## Example
//!
//! ```
//! use schemaform_db::ColumnMetadata;
//! use schemaform_forms::{FormModel, FormOptions, RequestMethod};
//!
//! let columns = vec![
//!     ColumnMetadata::auto_increment_key("id", "int"),
//!     ColumnMetadata::new("name", "varchar(100)"),
//!     ColumnMetadata::new("email", "varchar(255)"),
//! ];
//!
//! let model = FormModel::build("users", &columns, &FormOptions::default())
//!     .unwrap()
//!     .with_action("/users")
//!     .with_method(RequestMethod::Post)
//!     .omit(["email"]);
//!
//! assert_eq!(model.field_names(), ["name"]);
//! ```

use schemaform_db::{ColumnMetadata, InsertStatement, TableIntrospector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::descriptor::{DEFAULT_MAX_LENGTH, FieldDescriptor, JSON_PLACEHOLDER_GUIDE};
use crate::error::{FormError, FormResult};
use crate::htmx::HtmxConfig;

/// HTTP method of the rendered form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
	Get,
	#[default]
	Post,
}

impl RequestMethod {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
		}
	}
}

impl fmt::Display for RequestMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for RequestMethod {
	type Err = FormError;

	/// Parse a method name, ignoring case
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::RequestMethod;
	///
	/// assert_eq!("post".parse::<RequestMethod>().unwrap(), RequestMethod::Post);
	/// assert_eq!("GET".parse::<RequestMethod>().unwrap(), RequestMethod::Get);
	/// assert!("PATCH".parse::<RequestMethod>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_uppercase().as_str() {
			"GET" => Ok(Self::Get),
			"POST" => Ok(Self::Post),
			_ => Err(FormError::InvalidRequestMethod(s.to_string())),
		}
	}
}

/// Options applied while deriving field descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
	/// Give every field a label derived from its name
	pub labels: bool,
	/// `maxlength` for columns that declare no length
	pub default_max_length: usize,
	/// Treat primary/unique key columns as optional even when not nullable
	pub relax_key_columns: bool,
	pub json_placeholder_guide: String,
}

impl Default for FormOptions {
	fn default() -> Self {
		Self {
			labels: true,
			default_max_length: DEFAULT_MAX_LENGTH,
			relax_key_columns: false,
			json_placeholder_guide: JSON_PLACEHOLDER_GUIDE.to_string(),
		}
	}
}

impl FormOptions {
	pub fn with_labels(mut self, labels: bool) -> Self {
		self.labels = labels;
		self
	}

	pub fn with_default_max_length(mut self, max_length: usize) -> Self {
		self.default_max_length = max_length;
		self
	}

	pub fn with_relax_key_columns(mut self, relax: bool) -> Self {
		self.relax_key_columns = relax;
		self
	}

	pub fn with_json_placeholder_guide(mut self, guide: impl Into<String>) -> Self {
		self.json_placeholder_guide = guide.into();
		self
	}
}

/// Ordered field descriptors for one table plus form-level settings
#[derive(Debug, Clone)]
pub struct FormModel {
	table: String,
	fields: Vec<FieldDescriptor>,
	action: String,
	method: RequestMethod,
	csrf_enabled: bool,
	htmx: Option<HtmxConfig>,
}

impl FormModel {
	/// Build the model from introspected columns
	///
	/// Auto-increment columns are skipped; every other column yields one field
	/// in its original order. Fails when `columns` is empty or any column type
	/// cannot be mapped to a widget.
	pub fn build(
		table: impl Into<String>,
		columns: &[ColumnMetadata],
		options: &FormOptions,
	) -> FormResult<Self> {
		let table = table.into();
		if columns.is_empty() {
			return Err(FormError::SchemaIntrospectionFailed {
				table,
				reason: "table has no columns".to_string(),
			});
		}

		let fields = columns
			.iter()
			.filter(|column| !column.is_auto_increment())
			.map(|column| FieldDescriptor::from_column(column, options))
			.collect::<FormResult<Vec<_>>>()?;

		tracing::info!(table = %table, fields = fields.len(), "form model built");

		Ok(Self {
			table,
			fields,
			action: String::new(),
			method: RequestMethod::default(),
			csrf_enabled: true,
			htmx: None,
		})
	}

	/// Introspect `table` and build its model
	///
	/// Database failures are logged with their detail and surfaced as
	/// [`FormError::SchemaIntrospectionFailed`].
	pub async fn introspect(
		introspector: &dyn TableIntrospector,
		table: &str,
		options: &FormOptions,
	) -> FormResult<Self> {
		let columns = introspector.describe_table(table).await.map_err(|e| {
			tracing::error!(table = %table, error = %e, "table introspection failed");
			FormError::SchemaIntrospectionFailed {
				table: table.to_string(),
				reason: e.to_string(),
			}
		})?;
		Self::build(table, &columns, options)
	}

	/// Keep only the named fields, in their original order
	///
	/// Every name must refer to an existing field; otherwise the whole
	/// selection fails and lists the unknown names.
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::ColumnMetadata;
	/// use schemaform_forms::{FormError, FormModel, FormOptions};
	///
	/// let columns = vec![
	///     ColumnMetadata::new("name", "varchar(100)"),
	///     ColumnMetadata::new("email", "varchar(255)"),
	/// ];
	/// let model = FormModel::build("users", &columns, &FormOptions::default()).unwrap();
	///
	/// let err = model.clone().restrict_to(["bogus"]).unwrap_err();
	/// assert!(matches!(err, FormError::InvalidFieldSelection { .. }));
	///
	/// let model = model.restrict_to(["email"]).unwrap();
	/// assert_eq!(model.field_names(), ["email"]);
	/// ```
	pub fn restrict_to<I, S>(mut self, names: I) -> FormResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let wanted: BTreeSet<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
		let missing: Vec<String> = wanted
			.iter()
			.filter(|name| self.field(name).is_none())
			.cloned()
			.collect();
		if !missing.is_empty() {
			return Err(FormError::InvalidFieldSelection { missing });
		}

		self.fields.retain(|field| wanted.contains(field.name()));
		Ok(self)
	}

	/// Remove the named fields; unknown names are ignored
	pub fn omit<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let dropped: BTreeSet<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
		self.fields.retain(|field| !dropped.contains(field.name()));
		tracing::debug!(table = %self.table, omitted = ?dropped, "fields omitted");
		self
	}

	/// Set where the form submits to (URI or URL)
	pub fn with_action(mut self, action: impl Into<String>) -> Self {
		self.action = action.into();
		self
	}

	pub fn with_method(mut self, method: RequestMethod) -> Self {
		self.method = method;
		self
	}

	pub fn with_csrf(mut self, enabled: bool) -> Self {
		self.csrf_enabled = enabled;
		self
	}

	pub fn with_htmx(mut self, htmx: HtmxConfig) -> Self {
		self.htmx = Some(htmx);
		self
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name() == name)
	}

	pub fn field_names(&self) -> Vec<&str> {
		self.fields.iter().map(|f| f.name()).collect()
	}

	pub fn action(&self) -> &str {
		&self.action
	}

	pub fn method(&self) -> RequestMethod {
		self.method
	}

	pub fn csrf_enabled(&self) -> bool {
		self.csrf_enabled
	}

	pub fn htmx(&self) -> Option<&HtmxConfig> {
		self.htmx.as_ref()
	}

	/// Column and placeholder lists for inserting one row of this form
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::ColumnMetadata;
	/// use schemaform_forms::{FormModel, FormOptions};
	///
	/// let columns = vec![
	///     ColumnMetadata::auto_increment_key("id", "int"),
	///     ColumnMetadata::new("title", "varchar(100)"),
	///     ColumnMetadata::new("tags", "json"),
	/// ];
	/// let model = FormModel::build("posts", &columns, &FormOptions::default()).unwrap();
	///
	/// let stmt = model.build_insert_statement();
	/// assert_eq!(stmt.columns(), ["title", "tags"]);
	/// assert_eq!(stmt.placeholders(), [":title", ":tags"]);
	/// ```
	pub fn build_insert_statement(&self) -> InsertStatement {
		InsertStatement::new(&self.table, self.fields.iter().map(|f| f.name()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::widget::WidgetKind;

	fn user_columns() -> Vec<ColumnMetadata> {
		vec![
			ColumnMetadata::auto_increment_key("id", "int(11)"),
			ColumnMetadata::new("name", "varchar(100)"),
			ColumnMetadata::new("email", "varchar(255)").with_nullable(true),
		]
	}

	#[test]
	fn test_build_skips_auto_increment() {
		let model = FormModel::build("users", &user_columns(), &FormOptions::default()).unwrap();

		assert_eq!(model.field_names(), ["name", "email"]);
		assert!(model.field("id").is_none());
	}

	#[test]
	fn test_build_defaults() {
		let model = FormModel::build("users", &user_columns(), &FormOptions::default()).unwrap();

		assert_eq!(model.table(), "users");
		assert_eq!(model.action(), "");
		assert_eq!(model.method(), RequestMethod::Post);
		assert!(model.csrf_enabled());
		assert!(model.htmx().is_none());
	}

	#[test]
	fn test_build_empty_columns_fails() {
		let result = FormModel::build("ghost", &[], &FormOptions::default());

		assert!(matches!(
			result,
			Err(FormError::SchemaIntrospectionFailed { table, .. }) if table == "ghost"
		));
	}

	#[test]
	fn test_build_aborts_on_unsupported_column() {
		let mut columns = user_columns();
		columns.push(ColumnMetadata::new("location", "point"));

		let result = FormModel::build("users", &columns, &FormOptions::default());
		assert!(matches!(
			result,
			Err(FormError::UnsupportedColumnType { column, .. }) if column == "location"
		));
	}

	#[test]
	fn test_restrict_preserves_original_order() {
		let model = FormModel::build("users", &user_columns(), &FormOptions::default())
			.unwrap()
			.restrict_to(["email", "name"])
			.unwrap();

		assert_eq!(model.field_names(), ["name", "email"]);
	}

	#[test]
	fn test_restrict_reports_every_missing_name() {
		let err = FormModel::build("users", &user_columns(), &FormOptions::default())
			.unwrap()
			.restrict_to(["name", "zeta", "alpha"])
			.unwrap_err();

		match err {
			FormError::InvalidFieldSelection { missing } => assert_eq!(missing, ["alpha", "zeta"]),
			other => panic!("unexpected error: {:?}", other),
		}
	}

	#[test]
	fn test_restrict_to_auto_increment_column_fails() {
		let result = FormModel::build("users", &user_columns(), &FormOptions::default())
			.unwrap()
			.restrict_to(["id"]);

		assert!(matches!(result, Err(FormError::InvalidFieldSelection { .. })));
	}

	#[test]
	fn test_omit_is_lenient() {
		let model = FormModel::build("users", &user_columns(), &FormOptions::default())
			.unwrap()
			.omit(["bogus"]);

		assert_eq!(model.field_names(), ["name", "email"]);
	}

	#[test]
	fn test_omit_then_insert_statement() {
		let model = FormModel::build("users", &user_columns(), &FormOptions::default())
			.unwrap()
			.omit(["email"]);
		let stmt = model.build_insert_statement();

		assert_eq!(stmt.table(), "users");
		assert_eq!(stmt.columns(), ["name"]);
		assert_eq!(stmt.placeholders(), [":name"]);
	}

	#[test]
	fn test_setters() {
		let model = FormModel::build("users", &user_columns(), &FormOptions::default())
			.unwrap()
			.with_action("/signup")
			.with_method(RequestMethod::Get)
			.with_csrf(false)
			.with_htmx(HtmxConfig::new("#result"));

		assert_eq!(model.action(), "/signup");
		assert_eq!(model.method(), RequestMethod::Get);
		assert!(!model.csrf_enabled());
		assert_eq!(model.htmx().map(|h| h.target.as_str()), Some("#result"));
	}

	#[test]
	fn test_field_widgets_follow_columns() {
		let columns = vec![
			ColumnMetadata::new("bio", "text"),
			ColumnMetadata::new("age", "int"),
			ColumnMetadata::new("user_password", "varchar(255)"),
		];
		let model = FormModel::build("people", &columns, &FormOptions::default()).unwrap();

		let widgets: Vec<WidgetKind> = model.fields().iter().map(|f| f.widget()).collect();
		assert_eq!(
			widgets,
			[WidgetKind::TextArea, WidgetKind::Number, WidgetKind::Password]
		);
	}

	#[test]
	fn test_request_method_display() {
		assert_eq!(RequestMethod::Get.to_string(), "GET");
		assert_eq!(RequestMethod::Post.to_string(), "POST");
	}
}
