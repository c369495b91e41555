//! Database capabilities for schemaform
//!
//! This crate holds everything the form layer needs from a relational
//! database, expressed as injectable capabilities:
//! - [`ColumnMetadata`]: one introspected column (name, raw type, nullability, key role, default, extra)
//! - [`TableIntrospector`]: reads a table's ordered column list
//! - [`RowInserter`]: executes a single-row insert
//! - [`InsertStatement`]: the column/placeholder lists of a parameterized insert
//! - [`InMemoryDatabase`]: a process-local backend for tests and demos
//!
//! With the `mysql` feature, [`MySqlBackend`] implements both capabilities on top of `sqlx`.

pub mod column;
pub mod error;
pub mod identifier;
pub mod insert;
pub mod introspection;
pub mod memory;
#[cfg(feature = "mysql")]
pub mod mysql;

pub use column::{ColumnMetadata, KeyRole};
pub use error::{DatabaseError, DbResult};
pub use identifier::validate_identifier;
pub use insert::{InsertStatement, RowInserter};
pub use introspection::TableIntrospector;
pub use memory::{InMemoryDatabase, InsertedRow};
#[cfg(feature = "mysql")]
pub use mysql::MySqlBackend;
