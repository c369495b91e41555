//! Form scaffolding for database tables
//!
//! This crate turns a table's column metadata into an HTML form and turns the
//! submitted form back into an insert:
//! - Column type resolution to input widgets (text, textarea, number, date, password, dropdown, radio)
//! - Field selection with strict inclusion and lenient omission
//! - HTML rendering with labels, wrappers and htmx attributes
//! - Per-session CSRF tokens with constant-time verification
//! - JSON array encoding of comma separated values on submission
//! - TOML settings for the form and renderer options
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use schemaform_db::{ColumnMetadata, InMemoryDatabase};
//! use schemaform_forms::{
//!     FormModel, FormOptions, FormRenderer, InMemorySessionStore, RenderOptions, SubmissionHandler,
//! };
//!
//! # async fn example() {
//! let db = Arc::new(InMemoryDatabase::new().with_table(
//!     "contacts",
//!     vec![
//!         ColumnMetadata::auto_increment_key("id", "int(11)"),
//!         ColumnMetadata::new("name", "varchar(100)"),
//!         ColumnMetadata::new("notes", "text").with_nullable(true),
//!     ],
//! ));
//!
//! let model = FormModel::introspect(&*db, "contacts", &FormOptions::default())
//!     .await
//!     .unwrap()
//!     .with_action("/contacts");
//!
//! let handler = SubmissionHandler::new(db.clone(), Arc::new(InMemorySessionStore::new()));
//! let html = FormRenderer::new(RenderOptions::default())
//!     .render_for_session(&model, handler.csrf(), "session-1");
//! assert!(html.contains("name=\"name\""));
//!
//! let token = handler.csrf().current("session-1").unwrap();
//! let form = HashMap::from([
//!     ("csrf_token".to_string(), token),
//!     ("name".to_string(), "Ada".to_string()),
//! ]);
//! assert!(handler.respond("session-1", form, &model).await.is_accepted());
//! assert_eq!(db.insert_count(), 1);
//! # }
//! ```

pub mod csrf;
pub mod descriptor;
pub mod error;
pub mod htmx;
pub mod model;
pub mod render;
pub mod resolver;
pub mod settings;
pub mod submission;
pub mod util;
pub mod widget;

pub use csrf::{CsrfGuard, CsrfRejection, InMemorySessionStore, SessionStore, generate_token};
pub use descriptor::{FieldDescriptor, FieldDescriptorBuilder};
pub use error::{FormError, FormResult, SubmissionError, SubmissionResult};
pub use htmx::{HtmxConfig, SwapMode};
pub use model::{FormModel, FormOptions, RequestMethod};
pub use render::{FormRenderer, RenderOptions};
pub use resolver::{ResolveError, ResolvedType, parse_enum_values, resolve, resolve_column};
pub use settings::{FormSettings, SettingsError};
pub use submission::{SubmissionHandler, SubmissionReply, encode_json_list};
pub use widget::WidgetKind;
