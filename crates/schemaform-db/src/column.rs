//! Introspected column metadata

use serde::{Deserialize, Serialize};

/// Role a column plays in the table's keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
	#[default]
	None,
	Primary,
	Unique,
	/// Part of a non-unique index
	Multiple,
}

impl KeyRole {
	/// Parse the `Key` column of a MySQL `DESCRIBE` row
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::KeyRole;
	///
	/// assert_eq!(KeyRole::from_mysql("PRI"), KeyRole::Primary);
	/// assert_eq!(KeyRole::from_mysql("uni"), KeyRole::Unique);
	/// assert_eq!(KeyRole::from_mysql(""), KeyRole::None);
	/// ```
	pub fn from_mysql(key: &str) -> Self {
		match key.trim().to_ascii_uppercase().as_str() {
			"PRI" => Self::Primary,
			"UNI" => Self::Unique,
			"MUL" => Self::Multiple,
			_ => Self::None,
		}
	}

	/// Whether the role identifies rows (primary or unique)
	pub fn is_identifying(&self) -> bool {
		matches!(self, Self::Primary | Self::Unique)
	}
}

/// Normalized description of one table column
///
/// Built once per column during introspection and never mutated afterwards;
/// the `with_*` methods consume and return the value so construction reads as
/// a single expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
	name: String,
	raw_type: String,
	nullable: bool,
	key_role: KeyRole,
	default_value: Option<String>,
	extra: String,
}

impl ColumnMetadata {
	/// Create a non-nullable, non-key column without default
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::ColumnMetadata;
	///
	/// let column = ColumnMetadata::new("title", "varchar(120)");
	/// assert_eq!(column.name(), "title");
	/// assert_eq!(column.raw_type(), "varchar(120)");
	/// assert!(!column.nullable());
	/// assert!(!column.is_auto_increment());
	/// ```
	pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			raw_type: raw_type.into(),
			nullable: false,
			key_role: KeyRole::None,
			default_value: None,
			extra: String::new(),
		}
	}

	/// Build from the six string columns of a MySQL `DESCRIBE` row
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::{ColumnMetadata, KeyRole};
	///
	/// let column = ColumnMetadata::from_describe_row("id", "int", "NO", "PRI", None, "auto_increment");
	/// assert_eq!(column.key_role(), KeyRole::Primary);
	/// assert!(column.is_auto_increment());
	/// assert!(!column.nullable());
	/// ```
	pub fn from_describe_row(
		field: impl Into<String>,
		column_type: impl Into<String>,
		null: &str,
		key: &str,
		default: Option<String>,
		extra: impl Into<String>,
	) -> Self {
		Self {
			name: field.into(),
			raw_type: column_type.into(),
			nullable: null.trim().eq_ignore_ascii_case("YES"),
			key_role: KeyRole::from_mysql(key),
			default_value: default,
			extra: extra.into(),
		}
	}

	pub fn with_nullable(mut self, nullable: bool) -> Self {
		self.nullable = nullable;
		self
	}

	pub fn with_key_role(mut self, key_role: KeyRole) -> Self {
		self.key_role = key_role;
		self
	}

	pub fn with_default(mut self, value: impl Into<String>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
		self.extra = extra.into();
		self
	}

	/// Shorthand for an auto-increment primary key column
	pub fn auto_increment_key(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
		Self::new(name, raw_type)
			.with_key_role(KeyRole::Primary)
			.with_extra("auto_increment")
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn raw_type(&self) -> &str {
		&self.raw_type
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	pub fn key_role(&self) -> KeyRole {
		self.key_role
	}

	pub fn default_value(&self) -> Option<&str> {
		self.default_value.as_deref()
	}

	pub fn extra(&self) -> &str {
		&self.extra
	}

	/// Whether the database fills this column itself
	pub fn is_auto_increment(&self) -> bool {
		self.extra.to_ascii_lowercase().contains("auto_increment")
	}

	/// Whether the default is computed by the database rather than a literal
	///
	/// MySQL marks expression defaults with `DEFAULT_GENERATED` in `Extra`;
	/// older servers report `CURRENT_TIMESTAMP` style defaults without it.
	pub fn has_generated_default(&self) -> bool {
		if self.extra.to_ascii_uppercase().contains("DEFAULT_GENERATED") {
			return true;
		}
		let Some(default) = self.default_value.as_deref() else {
			return false;
		};
		let default = default.trim().to_ascii_uppercase();
		default.starts_with('(')
			|| GENERATED_DEFAULT_FUNCTIONS
				.iter()
				.any(|function| default.starts_with(function))
	}

	/// Default value usable as an input's initial value
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::ColumnMetadata;
	///
	/// let status = ColumnMetadata::new("status", "varchar(10)").with_default("draft");
	/// assert_eq!(status.literal_default(), Some("draft"));
	///
	/// let created = ColumnMetadata::new("created_at", "timestamp")
	///     .with_default("CURRENT_TIMESTAMP")
	///     .with_extra("DEFAULT_GENERATED");
	/// assert_eq!(created.literal_default(), None);
	/// ```
	pub fn literal_default(&self) -> Option<&str> {
		if self.has_generated_default() {
			None
		} else {
			self.default_value()
		}
	}
}

/// SQL functions that may appear as a column default
const GENERATED_DEFAULT_FUNCTIONS: [&str; 6] = [
	"CURRENT_TIMESTAMP",
	"CURRENT_DATE",
	"CURRENT_TIME",
	"LOCALTIMESTAMP",
	"LOCALTIME",
	"NOW(",
];
