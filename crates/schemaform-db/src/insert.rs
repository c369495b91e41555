//! Row insertion capability and the parameterized insert shape

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::DbResult;

/// Executes a single-row insert
///
/// `columns` fixes the column order; `values` maps each of those columns to
/// the raw string that should be stored.
#[async_trait]
pub trait RowInserter: Send + Sync {
	async fn insert_row(
		&self,
		table: &str,
		columns: &[String],
		values: &HashMap<String, String>,
	) -> DbResult<()>;
}

/// Column and placeholder lists of a parameterized insert
///
/// Placeholders are named after their column (`:name`) and kept in the same
/// order as the columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
	table: String,
	columns: Vec<String>,
	placeholders: Vec<String>,
}

impl InsertStatement {
	/// Create the statement for the given columns
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::InsertStatement;
	///
	/// let stmt = InsertStatement::new("users", ["name", "email"]);
	/// assert_eq!(stmt.columns(), ["name", "email"]);
	/// assert_eq!(stmt.placeholders(), [":name", ":email"]);
	/// ```
	pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
		let placeholders = columns.iter().map(|c| format!(":{}", c)).collect();
		Self {
			table: table.into(),
			columns,
			placeholders,
		}
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	pub fn placeholders(&self) -> &[String] {
		&self.placeholders
	}

	/// Render the statement as SQL text with named placeholders
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::InsertStatement;
	///
	/// let stmt = InsertStatement::new("users", ["name", "email"]);
	/// assert_eq!(
	///     stmt.to_sql(),
	///     "INSERT INTO `users` (`name`, `email`) VALUES (:name, :email)"
	/// );
	/// ```
	pub fn to_sql(&self) -> String {
		let columns = self
			.columns
			.iter()
			.map(|c| quote_identifier(c))
			.collect::<Vec<_>>()
			.join(", ");
		format!(
			"INSERT INTO {} ({}) VALUES ({})",
			quote_identifier(&self.table),
			columns,
			self.placeholders.join(", ")
		)
	}
}

fn quote_identifier(name: &str) -> String {
	format!("`{}`", name.replace('`', "``"))
}
