//! `if` and `bind-visible`: toggle `display` between `none` and the element's original inline value.

use super::{collect, inline_style};
use crate::{
	error::{BindingKind, Error},
	scope::Scope,
	validation::assert_property,
};
use tracing::{instrument, warn};

#[derive(Debug)]
pub(crate) struct ConditionalBinding {
	pub kind: BindingKind,
	pub element: web_sys::Element,
	pub path: String,
	original_display: String,
}

#[instrument(skip(root, scope))]
pub(crate) fn setup(root: &web_sys::Element, scope: &dyn Scope, kind: BindingKind) -> Result<Vec<ConditionalBinding>, Error> {
	let mut bindings = Vec::new();
	for (element, path) in collect::elements(root, kind)? {
		assert_property(scope, &path, kind, &element)?;
		let original_display = inline_style(&element).map(|style| style.get_property_value("display")).transpose().map_err(Error::dom("getPropertyValue"))?.unwrap_or_default();
		bindings.push(ConditionalBinding {
			kind,
			element,
			path,
			original_display,
		});
	}
	Ok(bindings)
}

pub(crate) fn render(binding: &ConditionalBinding, scope: &dyn Scope) -> Result<(), Error> {
	let style = match inline_style(&binding.element) {
		Some(style) => style,
		None => {
			warn!(kind = %binding.kind, tag = %binding.element.tag_name(), "Element has no inline style; skipping.");
			return Ok(());
		}
	};
	let display = if scope.get(&binding.path).is_truthy() { binding.original_display.as_str() } else { "none" };
	style.set_property("display", display).map_err(Error::dom("setProperty"))
}
