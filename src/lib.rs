//! # Schemaform
//!
//! Scaffold HTML insert forms from a database table's column metadata.
//!
//! Schemaform reads a table's columns, picks an input widget for each one,
//! renders the form (optionally wired for htmx) and writes the submitted row
//! back after checking its CSRF token.
//!
//! ## Feature Flags
//!
//! - `mysql` - MySQL introspection and inserts via `sqlx` and `sea-query`
//! - `full` - All features enabled
//!
//! ## Crates
//!
//! - [`db`]: column metadata and the injectable database capabilities
//! - [`forms`]: widget resolution, form model, rendering and submission handling
//!
//! ## Quick Example
//!
//! ```
//! use schemaform::prelude::*;
//!
//! let columns = vec![
//!     ColumnMetadata::auto_increment_key("id", "int(11)"),
//!     ColumnMetadata::new("title", "varchar(120)"),
//!     ColumnMetadata::new("status", "enum('draft','live')"),
//! ];
//!
//! let settings = FormSettings::default();
//! let model = settings.apply(
//!     FormModel::build("posts", &columns, &settings.form_options())
//!         .unwrap()
//!         .with_action("/posts"),
//! );
//!
//! let html = FormRenderer::new(settings.render_options()).render(&model, Some("token"));
//! assert!(html.contains(r#"type="radio""#));
//! ```

pub use schemaform_db as db;
pub use schemaform_forms as forms;

pub use schemaform_db::{
	ColumnMetadata, DatabaseError, InMemoryDatabase, InsertStatement, KeyRole, RowInserter,
	TableIntrospector,
};
#[cfg(feature = "mysql")]
pub use schemaform_db::MySqlBackend;
pub use schemaform_forms::{
	CsrfGuard, FieldDescriptor, FormError, FormModel, FormOptions, FormRenderer, FormSettings,
	HtmxConfig, InMemorySessionStore, RenderOptions, RequestMethod, SessionStore, SubmissionError,
	SubmissionHandler, SubmissionReply, SwapMode, WidgetKind,
};

/// Everything needed to build, render and submit a form
pub mod prelude {
	pub use crate::{
		ColumnMetadata, CsrfGuard, FieldDescriptor, FormError, FormModel, FormOptions,
		FormRenderer, FormSettings, HtmxConfig, InMemoryDatabase, InMemorySessionStore,
		RenderOptions, RequestMethod, RowInserter, SessionStore, SubmissionError,
		SubmissionHandler, SubmissionReply, SwapMode, TableIntrospector, WidgetKind,
	};

	#[cfg(feature = "mysql")]
	pub use crate::MySqlBackend;
}
