use crate::error::{BindingKind, Error};
use tracing::trace;
use wasm_bindgen::JsCast;

/// Elements below (and including) `root` that declare `kind`, with the trimmed attribute value.
///
/// Blank attribute values are skipped. So is markup that belongs to a `for-each` template: such elements are
/// bound per clone, against the item scope.
pub(crate) fn elements(root: &web_sys::Element, kind: BindingKind) -> Result<Vec<(web_sys::Element, String)>, Error> {
	let attribute = kind.attribute();
	let mut candidates = Vec::new();
	if root.has_attribute(attribute) {
		candidates.push(root.clone());
	}
	let found = root.query_selector_all(&format!("[{}]", attribute)).map_err(Error::dom("querySelectorAll"))?;
	for i in 0..found.length() {
		if let Some(element) = found.get(i).and_then(|node| node.dyn_into::<web_sys::Element>().ok()) {
			candidates.push(element);
		}
	}

	let mut elements = Vec::with_capacity(candidates.len());
	for element in candidates {
		let value = match element.get_attribute(attribute) {
			Some(value) if !value.trim().is_empty() => value.trim().to_owned(),
			_ => continue,
		};
		if inside_template(&element, root, kind) {
			trace!(attribute, "Skipped templated element.");
			continue;
		}
		elements.push((element, value));
	}
	Ok(elements)
}

/// Whether `element` is (part of) a `for-each` template below `root`.
///
/// The `for-each` element itself only counts for the other binding kinds, since its own `for-each` is what
/// turns it into a template.
fn inside_template(element: &web_sys::Element, root: &web_sys::Element, kind: BindingKind) -> bool {
	if kind != BindingKind::ForEach && is_template(element) {
		return true;
	}
	if element == root {
		return false;
	}
	let mut current = element.parent_element();
	while let Some(ancestor) = current {
		if is_template(&ancestor) {
			return true;
		}
		if &ancestor == root {
			break;
		}
		current = ancestor.parent_element();
	}
	false
}

/// A blank `for-each` declares nothing, so it doesn't make a template either.
fn is_template(element: &web_sys::Element) -> bool {
	element.get_attribute(BindingKind::ForEach.attribute()).map_or(false, |value| !value.trim().is_empty())
}
