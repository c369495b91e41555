//! Validation and persistence of submitted forms

use schemaform_db::RowInserter;
use std::collections::HashMap;
use std::sync::Arc;

use crate::csrf::{CSRF_FIELD_NAME, CsrfGuard, SessionStore};
use crate::error::{SubmissionError, SubmissionResult};
use crate::model::FormModel;
use crate::util::html_escape;

/// Encode a comma separated value list as a JSON array
///
/// Items are trimmed and empty items dropped, so blank input yields `[]`.
///
/// # Examples
///
/// ```
/// use schemaform_forms::encode_json_list;
///
/// assert_eq!(encode_json_list("a,b,c"), r#"["a","b","c"]"#);
/// assert_eq!(encode_json_list(" rust , ,web "), r#"["rust","web"]"#);
/// assert_eq!(encode_json_list(""), "[]");
/// ```
pub fn encode_json_list(raw: &str) -> String {
	let items: Vec<&str> = raw
		.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.collect();
	serde_json::Value::from(items).to_string()
}

/// Outcome of a submission, ready to send back to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionReply {
	Accepted,
	Rejected(String),
}

impl SubmissionReply {
	pub fn is_accepted(&self) -> bool {
		matches!(self, Self::Accepted)
	}

	pub fn message(&self) -> &str {
		match self {
			Self::Accepted => "Submitted successfully.",
			Self::Rejected(message) => message,
		}
	}

	/// Markup fragment suitable for an htmx swap target
	pub fn to_html(&self) -> String {
		let class = if self.is_accepted() {
			"form-success"
		} else {
			"form-error"
		};
		format!(
			"<div class=\"{}\">{}</div>",
			class,
			html_escape(self.message())
		)
	}
}

impl From<SubmissionResult<()>> for SubmissionReply {
	fn from(result: SubmissionResult<()>) -> Self {
		match result {
			Ok(()) => Self::Accepted,
			Err(e) => Self::Rejected(e.user_message()),
		}
	}
}

/// Checks submitted data against a [`FormModel`] and inserts the row
pub struct SubmissionHandler {
	inserter: Arc<dyn RowInserter>,
	csrf: CsrfGuard,
}

impl SubmissionHandler {
	pub fn new(inserter: Arc<dyn RowInserter>, sessions: Arc<dyn SessionStore>) -> Self {
		Self {
			inserter,
			csrf: CsrfGuard::new(sessions),
		}
	}

	/// Guard sharing this handler's session store, for rendering
	pub fn csrf(&self) -> &CsrfGuard {
		&self.csrf
	}

	/// Validate `form_data` and insert it as one row of the model's table
	///
	/// Nothing is written unless every check passes. Only keys naming a model
	/// field are persisted; optional fields that were not submitted or were
	/// submitted blank are left to the column default. Blank JSON fields are
	/// stored as `[]`. Database errors are logged and reported as
	/// [`SubmissionError::PersistenceFailed`].
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use std::sync::Arc;
	/// use schemaform_db::{ColumnMetadata, InMemoryDatabase};
	/// use schemaform_forms::{FormModel, FormOptions, InMemorySessionStore, SubmissionHandler};
	///
	/// # async fn example() {
	/// let columns = vec![ColumnMetadata::new("tags", "json")];
	/// let db = Arc::new(InMemoryDatabase::new().with_table("posts", columns.clone()));
	/// let model = FormModel::build("posts", &columns, &FormOptions::default()).unwrap();
	///
	/// let handler = SubmissionHandler::new(db.clone(), Arc::new(InMemorySessionStore::new()));
	/// let token = handler.csrf().issue("session");
	///
	/// let form = HashMap::from([
	///     ("csrf_token".to_string(), token),
	///     ("tags".to_string(), "a,b,c".to_string()),
	/// ]);
	/// handler.handle("session", form, &model).await.unwrap();
	///
	/// assert_eq!(db.inserted_rows()[0].get("tags"), Some(r#"["a","b","c"]"#));
	/// # }
	/// ```
	pub async fn handle(
		&self,
		session_id: &str,
		mut form_data: HashMap<String, String>,
		model: &FormModel,
	) -> SubmissionResult<()> {
		let submitted_token = form_data.remove(CSRF_FIELD_NAME);
		if model.csrf_enabled()
			&& let Err(rejection) = self.csrf.verify(session_id, submitted_token.as_deref())
		{
			tracing::warn!(
				table = %model.table(),
				session = %session_id,
				reason = %rejection,
				"submission rejected by csrf check"
			);
			return Err(SubmissionError::CsrfValidationFailed);
		}

		let mut columns = Vec::with_capacity(model.fields().len());
		let mut values = HashMap::with_capacity(model.fields().len());
		for field in model.fields() {
			let raw = form_data.remove(field.name());
			let blank = raw.as_deref().is_none_or(|v| v.trim().is_empty());
			if field.required() && blank {
				tracing::warn!(table = %model.table(), field = %field.name(), "required field missing");
				return Err(SubmissionError::MissingRequiredField(field.name().to_string()));
			}

			let Some(raw) = raw else {
				continue;
			};
			if blank && !field.is_json_encoded() {
				continue;
			}
			let value = if field.is_json_encoded() {
				encode_json_list(&raw)
			} else {
				raw
			};
			columns.push(field.name().to_string());
			values.insert(field.name().to_string(), value);
		}

		if !form_data.is_empty() {
			let mut ignored: Vec<&str> = form_data.keys().map(String::as_str).collect();
			ignored.sort_unstable();
			tracing::debug!(table = %model.table(), ignored = ?ignored, "unknown submitted keys ignored");
		}

		if let Err(e) = self
			.inserter
			.insert_row(model.table(), &columns, &values)
			.await
		{
			tracing::error!(table = %model.table(), error = %e, "insert failed");
			return Err(SubmissionError::PersistenceFailed);
		}

		tracing::info!(table = %model.table(), columns = columns.len(), "row persisted");
		Ok(())
	}

	/// Run [`handle`](Self::handle) and fold the outcome into a reply
	pub async fn respond(
		&self,
		session_id: &str,
		form_data: HashMap<String, String>,
		model: &FormModel,
	) -> SubmissionReply {
		self.handle(session_id, form_data, model).await.into()
	}
}

impl std::fmt::Debug for SubmissionHandler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SubmissionHandler")
			.field("csrf", &self.csrf)
			.finish_non_exhaustive()
	}
}
