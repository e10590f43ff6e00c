//! Setup-time checks that bindings reference existing view model properties.

use crate::{
	error::{BindingKind, Error},
	scope::Scope,
};
use tracing::trace;

const SNIPPET_LENGTH: usize = 100;

/// The element's markup with whitespace runs collapsed, trimmed and cut to at most 100 characters.
#[must_use]
pub fn element_snippet(element: &web_sys::Element) -> String {
	snippet(&element.outer_html())
}

fn snippet(html: &str) -> String {
	html.split_whitespace().collect::<Vec<_>>().join(" ").chars().take(SNIPPET_LENGTH).collect()
}

/// Fails with [`Error::PropertyValidation`] unless `path` names a property of `scope`.
///
/// Dotted paths are checked segment by segment. A null or undefined intermediate value counts as missing.
pub fn assert_property(scope: &dyn Scope, path: &str, kind: BindingKind, element: &web_sys::Element) -> Result<(), Error> {
	if scope.has(path) {
		trace!(path, %kind, "Validated property.");
		return Ok(());
	}
	Err(Error::PropertyValidation {
		property: path.to_owned(),
		kind,
		view_model: scope.type_name().to_owned(),
		snippet: element_snippet(element),
	})
}
