//! htmx wiring for rendered forms

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// Value of the `hx-swap` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwapMode {
	#[default]
	#[serde(rename = "innerHTML")]
	InnerHtml,
	#[serde(rename = "outerHTML")]
	OuterHtml,
	#[serde(rename = "beforebegin")]
	BeforeBegin,
	#[serde(rename = "afterbegin")]
	AfterBegin,
	#[serde(rename = "beforeend")]
	BeforeEnd,
	#[serde(rename = "afterend")]
	AfterEnd,
	#[serde(rename = "delete")]
	Delete,
	#[serde(rename = "none")]
	None,
}

impl SwapMode {
	const ALL: [SwapMode; 8] = [
		Self::InnerHtml,
		Self::OuterHtml,
		Self::BeforeBegin,
		Self::AfterBegin,
		Self::BeforeEnd,
		Self::AfterEnd,
		Self::Delete,
		Self::None,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InnerHtml => "innerHTML",
			Self::OuterHtml => "outerHTML",
			Self::BeforeBegin => "beforebegin",
			Self::AfterBegin => "afterbegin",
			Self::BeforeEnd => "beforeend",
			Self::AfterEnd => "afterend",
			Self::Delete => "delete",
			Self::None => "none",
		}
	}
}

impl fmt::Display for SwapMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SwapMode {
	type Err = FormError;

	/// # Examples
	///
	/// ```
	/// use schemaform_forms::SwapMode;
	///
	/// assert_eq!("outerHTML".parse::<SwapMode>().unwrap(), SwapMode::OuterHtml);
	/// assert_eq!("innerhtml".parse::<SwapMode>().unwrap(), SwapMode::InnerHtml);
	/// assert!("sideways".parse::<SwapMode>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim();
		Self::ALL
			.into_iter()
			.find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
			.ok_or_else(|| FormError::InvalidSwapMode(s.to_string()))
	}
}

/// htmx attributes attached to a form
///
/// `target` is the CSS selector the response is swapped into. When
/// `render_target` is set, an empty container with that id is rendered ahead
/// of the form so the response has somewhere to land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmxConfig {
	pub target: String,
	#[serde(default)]
	pub swap: SwapMode,
	#[serde(default)]
	pub render_target: Option<String>,
}

impl HtmxConfig {
	/// Target a selector with the default `innerHTML` swap
	///
	/// # Examples
	///
	/// ```
	/// use schemaform_forms::{HtmxConfig, SwapMode};
	///
	/// let htmx = HtmxConfig::new("#form-response")
	///     .with_swap(SwapMode::OuterHtml)
	///     .with_render_target("form-response");
	/// assert_eq!(htmx.target, "#form-response");
	/// assert_eq!(htmx.render_target.as_deref(), Some("form-response"));
	/// ```
	pub fn new(target: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			swap: SwapMode::default(),
			render_target: None,
		}
	}

	pub fn with_swap(mut self, swap: SwapMode) -> Self {
		self.swap = swap;
		self
	}

	pub fn with_render_target(mut self, id: impl Into<String>) -> Self {
		self.render_target = Some(id.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_swap_mode_round_trips_through_str() {
		for mode in SwapMode::ALL {
			assert_eq!(mode.as_str().parse::<SwapMode>().unwrap(), mode);
		}
	}

	#[test]
	fn test_swap_mode_invalid() {
		assert!(matches!(
			"inner".parse::<SwapMode>(),
			Err(FormError::InvalidSwapMode(value)) if value == "inner"
		));
	}

	#[test]
	fn test_htmx_defaults() {
		let htmx = HtmxConfig::new("#out");

		assert_eq!(htmx.swap, SwapMode::InnerHtml);
		assert!(htmx.render_target.is_none());
	}
}
