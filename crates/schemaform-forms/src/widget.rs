use serde::{Deserialize, Serialize};

/// Category of input control chosen for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
	/// `varchar` and `json` columns
	Text,
	/// `text` and `longtext` columns
	TextArea,
	/// Integer columns
	Number,
	/// Enum columns with more than two values
	Dropdown,
	/// Boolean columns and two-valued enums
	Radio,
	/// Date and timestamp columns
	Date,
	/// Columns whose name mentions a password
	Password,
}

impl WidgetKind {
	/// Whether the widget renders a fixed list of options
	pub fn has_options(&self) -> bool {
		matches!(self, Self::Dropdown | Self::Radio)
	}

	/// Value of the `type` attribute for widgets rendered as `<input>`
	pub fn input_type(&self) -> Option<&'static str> {
		match self {
			Self::Text => Some("text"),
			Self::Number => Some("number"),
			Self::Date => Some("date"),
			Self::Password => Some("password"),
			Self::Radio => Some("radio"),
			Self::TextArea | Self::Dropdown => None,
		}
	}
}
