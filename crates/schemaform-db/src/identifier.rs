//! SQL identifier checks
//!
//! Table and column names reach SQL text as identifiers, never as bound
//! parameters, so they are restricted to a conservative character set.

use crate::error::{DatabaseError, DbResult};
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

/// Maximum identifier length accepted by MySQL.
pub const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Validate a table or column name
///
/// # Examples
///
/// ```
/// use schemaform_db::validate_identifier;
///
/// assert!(validate_identifier("resume_projects").is_ok());
/// assert!(validate_identifier("users; DROP TABLE users").is_err());
/// assert!(validate_identifier("").is_err());
/// ```
pub fn validate_identifier(name: &str) -> DbResult<()> {
	if name.len() > MAX_IDENTIFIER_LENGTH || !IDENTIFIER_RE.is_match(name) {
		return Err(DatabaseError::InvalidIdentifier(name.to_string()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_accepts_plain_names() {
		assert!(validate_identifier("users").is_ok());
		assert!(validate_identifier("_private").is_ok());
		assert!(validate_identifier("col$1").is_ok());
	}

	#[test]
	fn test_rejects_injection_attempts() {
		assert!(validate_identifier("users`; --").is_err());
		assert!(validate_identifier("1users").is_err());
		assert!(validate_identifier("user name").is_err());
	}

	#[test]
	fn test_rejects_overlong_names() {
		let name = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
		assert!(validate_identifier(&name).is_err());
		assert!(validate_identifier(&"a".repeat(MAX_IDENTIFIER_LENGTH)).is_ok());
	}
}
