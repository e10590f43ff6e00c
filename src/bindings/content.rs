//! `bind-content`: the bound value as inner markup.
//!
//! The value is parsed as HTML, not escaped. Only bind strings that can't contain untrusted markup.

use super::collect;
use crate::{
	error::{BindingKind, Error},
	scope::Scope,
	validation::assert_property,
};
use tracing::{instrument, trace};

#[derive(Debug)]
pub(crate) struct ContentBinding {
	pub element: web_sys::Element,
	pub path: String,
}

#[instrument(skip_all)]
pub(crate) fn setup(root: &web_sys::Element, scope: &dyn Scope) -> Result<Vec<ContentBinding>, Error> {
	collect::elements(root, BindingKind::Content)?
		.into_iter()
		.map(|(element, path)| {
			assert_property(scope, &path, BindingKind::Content, &element)?;
			Ok(ContentBinding { element, path })
		})
		.collect()
}

pub(crate) fn render(binding: &ContentBinding, scope: &dyn Scope) -> Result<(), Error> {
	let value = scope.get(&binding.path);
	let markup = if value.is_nullish() { String::new() } else { value.to_js_string() };
	if cfg!(feature = "dangerous-logging") {
		trace!(path = %binding.path, %markup, "Rendering content.");
	}
	binding.element.set_inner_html(&markup);
	Ok(())
}
