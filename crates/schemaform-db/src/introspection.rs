//! Table introspection capability

use async_trait::async_trait;

use crate::column::ColumnMetadata;
use crate::error::DbResult;

/// Reads the column definitions of a table
///
/// Implementations return columns in their declared order and fail with
/// [`DatabaseError::UnknownTable`](crate::DatabaseError::UnknownTable) when the
/// table does not exist.
#[async_trait]
pub trait TableIntrospector: Send + Sync {
	async fn describe_table(&self, table: &str) -> DbResult<Vec<ColumnMetadata>>;
}
