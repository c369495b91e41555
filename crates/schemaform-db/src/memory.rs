//! In-memory database backend
//!
//! Keeps table definitions and inserted rows in process memory. Useful for
//! tests and for rendering forms without a live database.
//!
//! ## Example
//!
//! ```rust
//! use schemaform_db::{ColumnMetadata, InMemoryDatabase, RowInserter, TableIntrospector};
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = InMemoryDatabase::new().with_table(
//!     "notes",
//!     vec![
//!         ColumnMetadata::auto_increment_key("id", "int"),
//!         ColumnMetadata::new("body", "text"),
//!     ],
//! );
//!
//! let columns = db.describe_table("notes").await?;
//! assert_eq!(columns.len(), 2);
//!
//! let mut values = HashMap::new();
//! values.insert("body".to_string(), "hello".to_string());
//! db.insert_row("notes", &["body".to_string()], &values).await?;
//! assert_eq!(db.insert_count(), 1);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;

use crate::column::ColumnMetadata;
use crate::error::{DatabaseError, DbResult};
use crate::identifier::validate_identifier;
use crate::insert::RowInserter;
use crate::introspection::TableIntrospector;

/// A row accepted by [`InMemoryDatabase`], values in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedRow {
	pub table: String,
	pub values: Vec<(String, String)>,
}

impl InsertedRow {
	/// Look up the stored value of a column
	pub fn get(&self, column: &str) -> Option<&str> {
		self.values
			.iter()
			.find(|(name, _)| name == column)
			.map(|(_, value)| value.as_str())
	}
}

/// Process-local implementation of both database capabilities
#[derive(Default)]
pub struct InMemoryDatabase {
	tables: RwLock<HashMap<String, Vec<ColumnMetadata>>>,
	rows: Mutex<Vec<InsertedRow>>,
	insert_failure: Mutex<Option<String>>,
}

impl InMemoryDatabase {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a table, consuming and returning the database
	pub fn with_table(self, name: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
		self.add_table(name, columns);
		self
	}

	/// Register or replace a table definition
	pub fn add_table(&self, name: impl Into<String>, columns: Vec<ColumnMetadata>) {
		self.tables.write().insert(name.into(), columns);
	}

	/// Make every subsequent insert fail with the given reason
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::{DatabaseError, InMemoryDatabase, RowInserter};
	/// use std::collections::HashMap;
	///
	/// # async fn example() {
	/// let db = InMemoryDatabase::new();
	/// db.fail_inserts_with("disk full");
	/// let result = db.insert_row("t", &[], &HashMap::new()).await;
	/// assert!(matches!(result, Err(DatabaseError::InsertRejected(_))));
	/// # }
	/// ```
	pub fn fail_inserts_with(&self, reason: impl Into<String>) {
		*self.insert_failure.lock() = Some(reason.into());
	}

	/// Snapshot of all accepted rows, oldest first
	pub fn inserted_rows(&self) -> Vec<InsertedRow> {
		self.rows.lock().clone()
	}

	pub fn insert_count(&self) -> usize {
		self.rows.lock().len()
	}
}

#[async_trait]
impl TableIntrospector for InMemoryDatabase {
	async fn describe_table(&self, table: &str) -> DbResult<Vec<ColumnMetadata>> {
		validate_identifier(table)?;
		self.tables
			.read()
			.get(table)
			.cloned()
			.ok_or_else(|| DatabaseError::UnknownTable(table.to_string()))
	}
}

#[async_trait]
impl RowInserter for InMemoryDatabase {
	async fn insert_row(
		&self,
		table: &str,
		columns: &[String],
		values: &HashMap<String, String>,
	) -> DbResult<()> {
		if let Some(reason) = self.insert_failure.lock().clone() {
			return Err(DatabaseError::InsertRejected(reason));
		}

		validate_identifier(table)?;
		let tables = self.tables.read();
		let definition = tables
			.get(table)
			.ok_or_else(|| DatabaseError::UnknownTable(table.to_string()))?;

		let mut row = Vec::with_capacity(columns.len());
		for column in columns {
			if !definition.iter().any(|c| c.name() == column) {
				return Err(DatabaseError::InsertRejected(format!(
					"Unknown column '{}' in '{}'",
					column, table
				)));
			}
			let value = values.get(column).cloned().unwrap_or_default();
			row.push((column.clone(), value));
		}

		tracing::debug!(table = %table, columns = columns.len(), "in-memory row stored");
		self.rows.lock().push(InsertedRow {
			table: table.to_string(),
			values: row,
		});
		Ok(())
	}
}
