//! Error taxonomy for form construction and submission

/// Errors raised while building a form from table metadata
///
/// Every variant aborts construction; no partially built form is produced.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Schema introspection failed for table '{table}': {reason}")]
	SchemaIntrospectionFailed { table: String, reason: String },
	#[error("Unsupported column type '{raw_type}' for column '{column}'")]
	UnsupportedColumnType { column: String, raw_type: String },
	#[error("Malformed enum literal '{raw_type}' for column '{column}'")]
	MalformedEnumLiteral { column: String, raw_type: String },
	#[error("Invalid field selection, unknown fields: {}", missing.join(", "))]
	InvalidFieldSelection { missing: Vec<String> },
	#[error("Invalid request method: {0:?}")]
	InvalidRequestMethod(String),
	#[error("Invalid htmx swap mode: {0:?}")]
	InvalidSwapMode(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// Errors raised while handling a submitted form
///
/// These are recovered into a user-facing message by the caller; see
/// [`SubmissionError::user_message`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
	#[error("CSRF token missing or incorrect")]
	CsrfValidationFailed,
	#[error("Required field '{0}' is missing")]
	MissingRequiredField(String),
	/// The database error is logged where it happens and deliberately not carried.
	#[error("The submission could not be saved")]
	PersistenceFailed,
}

impl SubmissionError {
	/// Text suitable for showing to the person who submitted the form
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::SubmissionError;
	///
	/// let err = SubmissionError::MissingRequiredField("first_name".to_string());
	/// assert_eq!(err.user_message(), "First Name is required.");
	/// ```
	pub fn user_message(&self) -> String {
		match self {
			Self::CsrfValidationFailed => {
				"Your form session has expired. Please reload the page and try again.".to_string()
			}
			Self::MissingRequiredField(field) => {
				format!("{} is required.", crate::util::title_case(field))
			}
			Self::PersistenceFailed => {
				"The submission could not be saved. Please try again later.".to_string()
			}
		}
	}
}

pub type SubmissionResult<T> = Result<T, SubmissionError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invalid_field_selection_lists_all_names() {
		let err = FormError::InvalidFieldSelection {
			missing: vec!["bogus".to_string(), "other".to_string()],
		};

		assert_eq!(
			err.to_string(),
			"Invalid field selection, unknown fields: bogus, other"
		);
	}

	#[test]
	fn test_persistence_message_is_generic() {
		let err = SubmissionError::PersistenceFailed;

		assert!(!err.user_message().contains("SQL"));
		assert_eq!(err.to_string(), "The submission could not be saved");
	}
}
