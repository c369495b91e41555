//! Text helpers shared by descriptors and the renderer

use std::borrow::Cow;

/// Escapes HTML special characters in a string.
///
/// Returns a borrowed reference if no escaping is needed,
/// or an owned string if any characters were escaped.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// `first_name` -> `First name`
pub fn humanize(name: &str) -> String {
	capitalize(&name.replace('_', " "))
}

/// `first_name` -> `First Name`
pub fn title_case(name: &str) -> String {
	name.replace('_', " ")
		.split(' ')
		.map(capitalize)
		.collect::<Vec<_>>()
		.join(" ")
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_html_escape_no_special_chars() {
		assert_eq!(html_escape("Hello World"), Cow::Borrowed("Hello World"));
	}

	#[test]
	fn test_html_escape_markup() {
		assert_eq!(
			html_escape(r#"<a href="x">'&'</a>"#),
			"&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
		);
	}

	#[test]
	fn test_humanize() {
		assert_eq!(humanize("first_name"), "First name");
		assert_eq!(humanize("email"), "Email");
		assert_eq!(humanize(""), "");
	}

	#[test]
	fn test_title_case() {
		assert_eq!(title_case("first_name"), "First Name");
		assert_eq!(title_case("resume_projects"), "Resume Projects");
		assert_eq!(title_case("a__b"), "A  B");
	}
}
