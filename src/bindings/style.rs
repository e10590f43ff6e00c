//! `bind-style`: inline styles from an object of property names to values.

use super::{collect, inline_style};
use crate::{
	error::{BindingKind, Error},
	scope::Scope,
	validation::assert_property,
	value::Value,
};
use tracing::{instrument, warn};

#[derive(Debug)]
pub(crate) struct StyleBinding {
	pub element: web_sys::Element,
	pub path: String,
}

#[instrument(skip_all)]
pub(crate) fn setup(root: &web_sys::Element, scope: &dyn Scope) -> Result<Vec<StyleBinding>, Error> {
	collect::elements(root, BindingKind::Style)?
		.into_iter()
		.map(|(element, path)| {
			assert_property(scope, &path, BindingKind::Style, &element)?;
			Ok(StyleBinding { element, path })
		})
		.collect()
}

/// Anything but a plain object clears the inline style. An object replaces it, skipping nullish entries.
pub(crate) fn render(binding: &StyleBinding, scope: &dyn Scope) -> Result<(), Error> {
	let declarations = match scope.get(&binding.path) {
		Value::Object(declarations) => declarations,
		_ => return binding.element.remove_attribute("style").map_err(Error::dom("removeAttribute")),
	};
	let style = match inline_style(&binding.element) {
		Some(style) => style,
		None => {
			warn!(tag = %binding.element.tag_name(), "Element has no inline style; skipping.");
			return Ok(());
		}
	};
	style.set_css_text("");
	for (name, value) in declarations.entries() {
		if value.is_nullish() {
			continue;
		}
		style.set_property(&css_property_name(&name), &value.to_js_string()).map_err(Error::dom("setProperty"))?;
	}
	Ok(())
}

/// `backgroundColor` → `background-color`. Custom properties and hyphenated names are kept as they are.
fn css_property_name(name: &str) -> String {
	if name == "cssFloat" {
		return "float".to_owned();
	}
	if name.starts_with("--") || name.contains('-') {
		return name.to_owned();
	}
	let mut css = String::with_capacity(name.len() + 4);
	for c in name.chars() {
		if c.is_ascii_uppercase() {
			css.push('-');
			css.push(c.to_ascii_lowercase());
		} else {
			css.push(c);
		}
	}
	css
}
