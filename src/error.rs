use core::fmt::{self, Display, Formatter};
use thiserror::Error;
use wasm_bindgen::{JsError, JsValue};

/// The markup attribute a binding was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BindingKind {
	ForEach,
	Value,
	Content,
	If,
	Visible,
	Class,
	Style,
	Click,
}

impl BindingKind {
	/// Every kind, in render pipeline order.
	pub const ALL: [Self; 8] = [Self::ForEach, Self::Value, Self::Content, Self::If, Self::Visible, Self::Class, Self::Style, Self::Click];

	#[must_use]
	pub const fn attribute(self) -> &'static str {
		match self {
			Self::ForEach => "for-each",
			Self::Value => "bind-value",
			Self::Content => "bind-content",
			Self::If => "if",
			Self::Visible => "bind-visible",
			Self::Class => "bind-class",
			Self::Style => "bind-style",
			Self::Click => "click",
		}
	}
}

impl Display for BindingKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.attribute())
	}
}

/// Everything that can go wrong while setting up or rendering bindings.
///
/// Setup errors abort the whole binding root. [`Error::InvalidHandler`] only surfaces when the event fires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
	#[error("Unknown property \"{property}\" used in {kind} on: {snippet}. Make sure your view model \"{view_model}\" defines it.")]
	PropertyValidation {
		property: String,
		kind: BindingKind,
		view_model: String,
		snippet: String,
	},

	#[error("Invalid {kind} expression: \"{expression}\". Expected format: {expected}")]
	InvalidBindingSyntax {
		kind: BindingKind,
		expression: String,
		expected: &'static str,
	},

	#[error("Property \"{property}\" used in {kind} must be {expected}, but found different type on view model \"{view_model}\". Element: {snippet}")]
	InvalidPropertyType {
		property: String,
		kind: BindingKind,
		expected: &'static str,
		view_model: String,
		snippet: String,
	},

	#[error("{kind}: Cannot setup binding, {issue}")]
	InvalidDomStructure { kind: BindingKind, issue: &'static str },

	#[error("Handler \"{handler}\" defined in {event}=\"...\" is not a function of view model \"{view_model}\".")]
	InvalidHandler { handler: String, view_model: String, event: &'static str },

	#[error("View model \"{0}\" is already registered")]
	DuplicateViewModel(String),

	#[error("View model \"{0}\" is not registered. Did you call `ViewModelRegistry::register`?")]
	UnknownViewModel(String),

	#[error("`{operation}` failed: {message}")]
	Dom { operation: &'static str, message: String },
}

impl Error {
	/// Adapter for `map_err` on fallible `web_sys` calls.
	pub(crate) fn dom(operation: &'static str) -> impl FnOnce(JsValue) -> Self {
		move |error| Self::Dom {
			operation,
			message: format!("{:?}", error),
		}
	}

	#[must_use]
	pub fn kind(&self) -> Option<BindingKind> {
		match self {
			Self::PropertyValidation { kind, .. } | Self::InvalidBindingSyntax { kind, .. } | Self::InvalidPropertyType { kind, .. } | Self::InvalidDomStructure { kind, .. } => Some(*kind),
			Self::InvalidHandler { .. } => Some(BindingKind::Click),
			Self::DuplicateViewModel(_) | Self::UnknownViewModel(_) | Self::Dom { .. } => None,
		}
	}
}

/// Thrown into JavaScript as a native `Error` carrying the message.
impl From<Error> for JsValue {
	fn from(error: Error) -> Self {
		JsError::new(&error.to_string()).into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn property_validation_message() {
		let error = Error::PropertyValidation {
			property: "user.name".to_owned(),
			kind: BindingKind::Value,
			view_model: "Profile".to_owned(),
			snippet: "<input bind-value=\"user.name\">".to_owned(),
		};
		assert_eq!(
			error.to_string(),
			"Unknown property \"user.name\" used in bind-value on: <input bind-value=\"user.name\">. Make sure your view model \"Profile\" defines it."
		);
		assert_eq!(error.kind(), Some(BindingKind::Value));
	}

	#[test]
	fn for_each_messages() {
		let syntax = Error::InvalidBindingSyntax {
			kind: BindingKind::ForEach,
			expression: "item in items".to_owned(),
			expected: "item of collection",
		};
		assert_eq!(syntax.to_string(), "Invalid for-each expression: \"item in items\". Expected format: item of collection");

		let structure = Error::InvalidDomStructure {
			kind: BindingKind::ForEach,
			issue: "element has no parent node",
		};
		assert_eq!(structure.to_string(), "for-each: Cannot setup binding, element has no parent node");

		let property_type = Error::InvalidPropertyType {
			property: "items".to_owned(),
			kind: BindingKind::ForEach,
			expected: "an array",
			view_model: "Todo".to_owned(),
			snippet: "<li></li>".to_owned(),
		};
		assert!(property_type.to_string().starts_with("Property \"items\" used in for-each must be an array,"));
	}

	#[test]
	fn handler_and_registry_messages() {
		let handler = Error::InvalidHandler {
			handler: "save".to_owned(),
			view_model: "Form".to_owned(),
			event: "click",
		};
		assert_eq!(handler.to_string(), "Handler \"save\" defined in click=\"...\" is not a function of view model \"Form\".");
		assert_eq!(handler.kind(), Some(BindingKind::Click));

		assert_eq!(Error::DuplicateViewModel("App".to_owned()).to_string(), "View model \"App\" is already registered");
		assert!(Error::UnknownViewModel("App".to_owned()).to_string().starts_with("View model \"App\" is not registered."));
		assert_eq!(Error::UnknownViewModel("App".to_owned()).kind(), None);
	}

	#[test]
	fn kinds_display_as_attributes() {
		let attributes: Vec<String> = BindingKind::ALL.iter().map(ToString::to_string).collect();
		assert_eq!(attributes, ["for-each", "bind-value", "bind-content", "if", "bind-visible", "bind-class", "bind-style", "click"]);
	}
}
