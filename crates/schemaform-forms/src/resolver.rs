//! Column type to widget resolution
//!
//! Maps a raw column type such as `enum('a','b')` or `varchar(255)` and the
//! column's name to a [`WidgetKind`]. Resolution is total over the supported
//! base types; anything else is an error rather than a fallback widget.

use schemaform_db::ColumnMetadata;

use crate::error::FormError;
use crate::widget::WidgetKind;

/// Option values offered for boolean columns rendered as radio buttons
pub const BOOLEAN_RADIO_VALUES: [&str; 2] = ["0", "1"];

/// Resolution failure for a raw column type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("unsupported column type '{0}'")]
	UnsupportedColumnType(String),
	#[error("malformed enum literal '{0}'")]
	MalformedEnumLiteral(String),
}

impl ResolveError {
	/// Attach the column name, producing the construction error
	pub fn for_column(self, column: &str) -> FormError {
		match self {
			Self::UnsupportedColumnType(raw_type) => FormError::UnsupportedColumnType {
				column: column.to_string(),
				raw_type,
			},
			Self::MalformedEnumLiteral(raw_type) => FormError::MalformedEnumLiteral {
				column: column.to_string(),
				raw_type,
			},
		}
	}
}

/// Lower-cased base type with any value list and modifiers removed
///
/// # Examples
///
/// ```
/// use schemaform_forms::resolver::base_type;
///
/// assert_eq!(base_type("enum('a','b')"), "enum");
/// assert_eq!(base_type("VARCHAR(255)"), "varchar");
/// assert_eq!(base_type("int(11) unsigned"), "int");
/// assert_eq!(base_type("bigint unsigned"), "bigint");
/// ```
pub fn base_type(raw_type: &str) -> String {
	let head = match raw_type.find('(') {
		Some(idx) => &raw_type[..idx],
		None => raw_type,
	};
	head.split_whitespace()
		.next()
		.unwrap_or_default()
		.to_ascii_lowercase()
}

/// Extract the quoted values of an `enum(...)`/`set(...)` literal
///
/// Values keep their declared order; surrounding quotes are stripped and
/// doubled quotes are unescaped.
///
/// # Examples
///
/// ```
/// use schemaform_forms::resolver::parse_enum_values;
///
/// let values = parse_enum_values("enum('a','b','c')").unwrap();
/// assert_eq!(values, ["a", "b", "c"]);
///
/// assert!(parse_enum_values("enum").is_err());
/// ```
pub fn parse_enum_values(raw_type: &str) -> Result<Vec<String>, ResolveError> {
	let malformed = || ResolveError::MalformedEnumLiteral(raw_type.to_string());

	let open = raw_type.find('(').ok_or_else(malformed)?;
	let inner = raw_type[open..].trim().trim_matches(|c: char| c == '(' || c == ')');
	if inner.trim().is_empty() {
		return Err(malformed());
	}

	Ok(inner
		.split(',')
		.map(|token| token.trim().trim_matches('\'').replace("''", "'"))
		.collect())
}

/// Choose the widget for a column
///
/// `value_count` is the number of values in the column's enum literal (zero
/// for non-enum types). Rules, first match wins:
/// 1. an `enum` with exactly two values is a radio pair
/// 2. a column whose name contains `password` (case-sensitive) is a password input
/// 3. dispatch on the base type
///
/// # Examples
///
/// ```
/// use schemaform_forms::resolver::resolve;
/// use schemaform_forms::WidgetKind;
///
/// assert_eq!(resolve("varchar(255)", "user_password", 0).unwrap(), WidgetKind::Password);
/// assert_eq!(resolve("enum('y','n')", "active", 2).unwrap(), WidgetKind::Radio);
/// assert_eq!(resolve("enum('a','b','c')", "size", 3).unwrap(), WidgetKind::Dropdown);
/// assert!(resolve("geometry", "area", 0).is_err());
/// ```
pub fn resolve(
	raw_type: &str,
	column_name: &str,
	value_count: usize,
) -> Result<WidgetKind, ResolveError> {
	let base = base_type(raw_type);

	if base == "enum" && value_count == 2 {
		return Ok(WidgetKind::Radio);
	}
	if column_name.contains("password") {
		return Ok(WidgetKind::Password);
	}

	match base.as_str() {
		"int" | "smallint" | "mediumint" | "bigint" => Ok(WidgetKind::Number),
		"varchar" | "json" => Ok(WidgetKind::Text),
		"text" | "longtext" => Ok(WidgetKind::TextArea),
		"enum" => Ok(WidgetKind::Dropdown),
		"boolean" | "bool" | "tinyint" => Ok(WidgetKind::Radio),
		"date" | "datetime" | "timestamp" => Ok(WidgetKind::Date),
		_ => Err(ResolveError::UnsupportedColumnType(raw_type.to_string())),
	}
}

/// Everything the descriptor needs to know about a column's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
	pub base_type: String,
	pub widget: WidgetKind,
	/// Option values for dropdowns and radio groups, empty otherwise
	pub options: Vec<String>,
	/// Length declared in `varchar(N)`
	pub declared_length: Option<usize>,
	/// `json` columns take comma separated values stored as a JSON array
	pub is_json: bool,
}

/// Resolve a column's widget, option values and declared length
///
/// # Examples
///
/// ```
/// use schemaform_db::ColumnMetadata;
/// use schemaform_forms::resolver::resolve_column;
/// use schemaform_forms::WidgetKind;
///
/// let resolved = resolve_column(&ColumnMetadata::new("is_public", "tinyint(1)")).unwrap();
/// assert_eq!(resolved.widget, WidgetKind::Radio);
/// assert_eq!(resolved.options, ["0", "1"]);
/// ```
pub fn resolve_column(column: &ColumnMetadata) -> Result<ResolvedType, FormError> {
	let raw_type = column.raw_type();
	let base = base_type(raw_type);

	let enum_values = if base == "enum" {
		parse_enum_values(raw_type).map_err(|e| e.for_column(column.name()))?
	} else {
		Vec::new()
	};

	let widget =
		resolve(raw_type, column.name(), enum_values.len()).map_err(|e| e.for_column(column.name()))?;

	let options = match widget {
		WidgetKind::Dropdown | WidgetKind::Radio if base == "enum" => enum_values,
		WidgetKind::Radio => BOOLEAN_RADIO_VALUES.iter().map(|v| v.to_string()).collect(),
		_ => Vec::new(),
	};

	let declared_length = if base == "varchar" {
		declared_length(raw_type)
	} else {
		None
	};

	tracing::debug!(
		column = %column.name(),
		raw_type = %raw_type,
		widget = ?widget,
		"column type resolved"
	);

	Ok(ResolvedType {
		is_json: base == "json",
		base_type: base,
		widget,
		options,
		declared_length,
	})
}

fn declared_length(raw_type: &str) -> Option<usize> {
	let open = raw_type.find('(')?;
	let close = raw_type[open..].find(')')? + open;
	raw_type[open + 1..close].trim().parse().ok()
}
