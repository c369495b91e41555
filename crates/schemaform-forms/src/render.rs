//! HTML emission for [`FormModel`]
//!
//! Every value taken from the model (names, labels, placeholders, defaults,
//! options, action, htmx selectors) is HTML-escaped before it is written.

use crate::csrf::{CSRF_FIELD_NAME, CsrfGuard};
use crate::descriptor::FieldDescriptor;
use crate::model::FormModel;
use crate::util::{html_escape, title_case};
use crate::widget::WidgetKind;

/// Presentation settings for [`FormRenderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
	pub render_labels: bool,
	/// Class of a `<div>` wrapped around each label and control
	pub wrapper_class: Option<String>,
	pub submit_text: String,
	/// Heading shown above the form; defaults to the table name
	pub title: Option<String>,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			render_labels: true,
			wrapper_class: None,
			submit_text: "Submit".to_string(),
			title: None,
		}
	}
}

impl RenderOptions {
	pub fn with_labels(mut self, render_labels: bool) -> Self {
		self.render_labels = render_labels;
		self
	}

	pub fn with_wrapper_class(mut self, class: impl Into<String>) -> Self {
		self.wrapper_class = Some(class.into());
		self
	}

	pub fn with_submit_text(mut self, text: impl Into<String>) -> Self {
		self.submit_text = text.into();
		self
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}

/// Turns a [`FormModel`] into markup
#[derive(Debug, Clone, Default)]
pub struct FormRenderer {
	options: RenderOptions,
}

impl FormRenderer {
	pub fn new(options: RenderOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// Render the form
	///
	/// `csrf_token` is written to a hidden input when the model has CSRF
	/// enabled; it is ignored otherwise. Rendering a CSRF-enabled model
	/// without a token logs a warning, since the form cannot be submitted;
	/// prefer [`render_for_session`](Self::render_for_session).
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_db::ColumnMetadata;
	/// use schemaform_forms::{FormModel, FormOptions, FormRenderer, RenderOptions};
	///
	/// let columns = vec![ColumnMetadata::new("first_name", "varchar(60)")];
	/// let model = FormModel::build("people", &columns, &FormOptions::default())
	///     .unwrap()
	///     .with_action("/people");
	///
	/// let html = FormRenderer::new(RenderOptions::default()).render(&model, Some("tok"));
	/// assert!(html.contains(r#"<form action="/people" method="POST">"#));
	/// assert!(html.contains(r#"<input type="hidden" name="csrf_token" value="tok">"#));
	/// assert!(html.contains(r#"<label for="id_first_name">First Name:</label>"#));
	/// assert!(html.contains(r#"maxlength="60""#));
	/// ```
	pub fn render(&self, model: &FormModel, csrf_token: Option<&str>) -> String {
		let mut html = String::new();

		let title = self
			.options
			.title
			.clone()
			.unwrap_or_else(|| title_case(model.table()));
		html.push_str(&format!("<h2>{}</h2>\n", html_escape(&title)));

		if let Some(htmx) = model.htmx()
			&& let Some(render_target) = &htmx.render_target
		{
			html.push_str(&format!(
				"<div id=\"{}\"></div>\n",
				html_escape(render_target)
			));
		}

		html.push_str(&self.open_form_tag(model));
		html.push('\n');

		if model.csrf_enabled() {
			let token = csrf_token.unwrap_or_default();
			if token.is_empty() {
				tracing::warn!(
					table = %model.table(),
					"csrf enabled but no token given, submissions will be rejected"
				);
			}
			html.push_str(&format!(
				"<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
				CSRF_FIELD_NAME,
				html_escape(token)
			));
		}

		for field in model.fields() {
			html.push_str(&self.render_field(field));
		}

		html.push_str(&format!(
			"<button type=\"submit\">{}</button>\n</form>\n",
			html_escape(&self.options.submit_text)
		));
		html
	}

	/// Issue a CSRF token for the session and render with it
	///
	/// No token is issued when the model has CSRF disabled.
	pub fn render_for_session(&self, model: &FormModel, csrf: &CsrfGuard, session_id: &str) -> String {
		if model.csrf_enabled() {
			let token = csrf.issue(session_id);
			self.render(model, Some(&token))
		} else {
			self.render(model, None)
		}
	}

	fn open_form_tag(&self, model: &FormModel) -> String {
		let action = html_escape(model.action());
		match model.htmx() {
			Some(htmx) => format!(
				"<form hx-{}=\"{}\" hx-target=\"{}\" hx-swap=\"{}\">",
				model.method().as_str().to_ascii_lowercase(),
				action,
				html_escape(&htmx.target),
				htmx.swap
			),
			None => format!(
				"<form action=\"{}\" method=\"{}\">",
				action,
				model.method()
			),
		}
	}

	fn render_field(&self, field: &FieldDescriptor) -> String {
		let mut html = String::new();

		if let Some(class) = &self.options.wrapper_class {
			html.push_str(&format!("<div class=\"{}\">\n", html_escape(class)));
		}

		let label = field.label().filter(|_| self.options.render_labels);
		if field.widget() == WidgetKind::Radio {
			// each radio has its own id, so the group is labelled by a legend
			html.push_str(&format!(
				"<fieldset id=\"{}\">\n",
				html_escape(&field.html_id())
			));
			if let Some(label) = label {
				html.push_str(&format!("<legend>{}:</legend>\n", html_escape(label)));
			}
			html.push_str(&render_widget(field));
			html.push_str("\n</fieldset>\n");
		} else {
			if let Some(label) = label {
				html.push_str(&format!(
					"<label for=\"{}\">{}:</label>\n",
					html_escape(&field.html_id()),
					html_escape(label)
				));
			}
			html.push_str(&render_widget(field));
			html.push('\n');
		}

		if self.options.wrapper_class.is_some() {
			html.push_str("</div>\n");
		}
		html
	}
}

fn render_widget(field: &FieldDescriptor) -> String {
	let name = html_escape(field.name());
	let id = html_escape(&field.html_id()).into_owned();
	let required = if field.required() { " required" } else { "" };

	match field.widget() {
		WidgetKind::TextArea => format!(
			"<textarea name=\"{}\" id=\"{}\" placeholder=\"{}\" maxlength=\"{}\"{}>{}</textarea>",
			name,
			id,
			html_escape(field.placeholder()),
			field.max_length(),
			required,
			html_escape(field.default_value().unwrap_or(""))
		),
		WidgetKind::Dropdown => {
			let mut html = format!("<select name=\"{}\" id=\"{}\"{}>\n", name, id, required);
			for option in field.options() {
				let selected = if field.default_value() == Some(option.as_str()) {
					" selected"
				} else {
					""
				};
				html.push_str(&format!(
					"<option value=\"{}\"{}>{}</option>\n",
					html_escape(option),
					selected,
					html_escape(&title_case(option))
				));
			}
			html.push_str("</select>");
			html
		}
		WidgetKind::Radio => {
			let mut html = String::new();
			for (index, option) in field.options().iter().enumerate() {
				let checked = if field.default_value() == Some(option.as_str()) {
					" checked"
				} else {
					""
				};
				html.push_str(&format!(
					"<div><span>{}</span><input type=\"radio\" name=\"{}\" id=\"{}_{}\" value=\"{}\"{}{}></div>\n",
					html_escape(option),
					name,
					id,
					index,
					html_escape(option),
					checked,
					required
				));
			}
			html.truncate(html.trim_end().len());
			html
		}
		kind @ (WidgetKind::Text | WidgetKind::Number | WidgetKind::Date | WidgetKind::Password) => {
			let mut html = format!(
				"<input type=\"{}\" name=\"{}\" id=\"{}\" placeholder=\"{}\"",
				kind.input_type().unwrap_or("text"),
				name,
				id,
				html_escape(field.placeholder())
			);
			if matches!(kind, WidgetKind::Text | WidgetKind::Password) {
				html.push_str(&format!(" maxlength=\"{}\"", field.max_length()));
			}
			if kind != WidgetKind::Password
				&& let Some(value) = field.default_value()
			{
				html.push_str(&format!(" value=\"{}\"", html_escape(value)));
			}
			if field.accepts_multiple() {
				html.push_str(" multiple");
			}
			html.push_str(required);
			html.push('>');
			html
		}
	}
}
