/// Errors raised by database capabilities
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
	#[error("Unknown table: {0}")]
	UnknownTable(String),
	#[error("Invalid identifier: {0:?}")]
	InvalidIdentifier(String),
	#[error("Query error: {0}")]
	Query(String),
	#[error("Connection error: {0}")]
	Connection(String),
	#[error("Insert rejected: {0}")]
	InsertRejected(String),
}

pub type DbResult<T> = Result<T, DatabaseError>;
