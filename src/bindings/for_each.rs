//! `for-each="item of collection"`: one clone of the element per collection entry.
//!
//! During setup the element is detached as a template and a placeholder comment takes its place. Rendering
//! reconciles by position: missing clones are appended after the last one (or the placeholder), surplus clones are
//! removed from the end, and every remaining clone is re-pointed at the entry at its index and re-rendered.
//! There is no keying, so replacing an entry reuses the clone at its position.

use super::{collect, Bindings};
use crate::{
	error::{BindingKind, Error},
	listeners::Listeners,
	path,
	scope::{ItemScope, Scope},
	validation::{assert_property, element_snippet},
	value::Value,
};
use core::cell::RefCell;
use std::rc::Rc;
use tracing::{instrument, trace, trace_span, warn};
use wasm_bindgen::JsCast;

const EXPECTED_SYNTAX: &str = "item of collection";

#[derive(Debug)]
pub(crate) struct ForEachBinding {
	alias: String,
	collection: String,
	template: web_sys::Element,
	placeholder: web_sys::Comment,
	items: RefCell<Vec<RenderedItem>>,
}

/// One live clone with the bindings set up on it.
#[derive(Debug)]
struct RenderedItem {
	element: web_sys::Element,
	scope: Rc<ItemScope>,
	bindings: Bindings,
	_listeners: Listeners,
}

impl ForEachBinding {
	pub fn collection(&self) -> &str {
		&self.collection
	}

	/// Paths outside the loop item that the template's bindings read.
	///
	/// A change to any of them has to refresh the clones even though the collection itself didn't change.
	pub fn outer_paths(&self) -> Result<Vec<String>, Error> {
		let mut paths = Vec::new();
		let mut elements = vec![self.template.clone()];
		let descendants = self.template.query_selector_all("*").map_err(Error::dom("querySelectorAll"))?;
		elements.extend((0..descendants.length()).filter_map(|i| descendants.get(i)).filter_map(|node| node.dyn_into::<web_sys::Element>().ok()));

		// Nested loops bring their own aliases into scope.
		let mut aliases = vec![self.alias.clone()];
		for element in &elements {
			if let Some(expression) = element.get_attribute(BindingKind::ForEach.attribute()) {
				if let Some((alias, _)) = parse(&expression) {
					aliases.push(alias.to_owned());
				}
			}
		}

		for element in &elements {
			for kind in BindingKind::ALL {
				let path = match (kind, element.get_attribute(kind.attribute())) {
					(BindingKind::Click, _) | (_, None) => continue,
					(BindingKind::ForEach, Some(expression)) => match parse(&expression) {
						Some((_, collection)) => collection.to_owned(),
						None => continue,
					},
					(_, Some(path)) => path.trim().to_owned(),
				};
				let local = aliases.iter().any(|alias| path::strip_alias(&path, alias).is_some());
				if !path.is_empty() && !local && !paths.contains(&path) {
					paths.push(path);
				}
			}
		}
		Ok(paths)
	}
}

/// Splits `"<alias> of <collection>"`. Both names must be identifiers.
fn parse(expression: &str) -> Option<(&str, &str)> {
	let mut words = expression.split_whitespace();
	match (words.next(), words.next(), words.next(), words.next()) {
		(Some(alias), Some("of"), Some(collection), None) if path::is_identifier(alias) && path::is_identifier(collection) => Some((alias, collection)),
		_ => None,
	}
}

#[instrument(skip_all)]
pub(crate) fn setup(root: &web_sys::Element, scope: &dyn Scope) -> Result<Vec<ForEachBinding>, Error> {
	collect::elements(root, BindingKind::ForEach)?.into_iter().map(|(element, expression)| setup_one(&element, &expression, scope)).collect()
}

fn setup_one(element: &web_sys::Element, expression: &str, scope: &dyn Scope) -> Result<ForEachBinding, Error> {
	let (alias, collection) = parse(expression).ok_or_else(|| Error::InvalidBindingSyntax {
		kind: BindingKind::ForEach,
		expression: expression.to_owned(),
		expected: EXPECTED_SYNTAX,
	})?;

	assert_property(scope, collection, BindingKind::ForEach, element)?;
	if scope.get(collection).as_array().is_none() {
		return Err(Error::InvalidPropertyType {
			property: collection.to_owned(),
			kind: BindingKind::ForEach,
			expected: "an array",
			view_model: scope.type_name().to_owned(),
			snippet: element_snippet(element),
		});
	}

	let parent = element.parent_node().ok_or(Error::InvalidDomStructure {
		kind: BindingKind::ForEach,
		issue: "element has no parent node",
	})?;

	let template = element
		.clone_node_with_deep(true)
		.map_err(Error::dom("cloneNode"))?
		.unchecked_into::<web_sys::Element>();
	template.remove_attribute(BindingKind::ForEach.attribute()).map_err(Error::dom("removeAttribute"))?;

	let document = element.owner_document().ok_or(Error::InvalidDomStructure {
		kind: BindingKind::ForEach,
		issue: "element has no owner document",
	})?;
	let placeholder = document.create_comment(&format!("for-each: {} of {}", alias, collection));
	parent.insert_before(&placeholder, Some(element.as_ref())).map_err(Error::dom("insertBefore"))?;
	element.remove();
	trace!(alias, collection, "Replaced template with placeholder.");

	Ok(ForEachBinding {
		alias: alias.to_owned(),
		collection: collection.to_owned(),
		template,
		placeholder,
		items: RefCell::new(Vec::new()),
	})
}

pub(crate) fn render(binding: &ForEachBinding, scope: &Rc<dyn Scope>) -> Result<(), Error> {
	let span = trace_span!("for-each", alias = %binding.alias, collection = %binding.collection);
	let _enter = span.enter();

	let entries = match scope.get(&binding.collection) {
		Value::Array(array) => array.to_vec(),
		other => {
			warn!(type_of = other.type_of(), "Collection is not an array, skipping render.");
			return Ok(());
		}
	};

	let mut items = binding.items.borrow_mut();
	let previous = items.len();
	trace!(previous, current = entries.len(), "Reconciling.");

	for (index, entry) in entries.iter().enumerate().skip(previous) {
		let item = create_item(binding, scope, &items, index, entry.clone())?;
		items.push(item);
	}
	if items.len() > entries.len() {
		for removed in items.drain(entries.len()..) {
			removed.element.remove();
		}
	}

	for (index, (item, entry)) in items.iter().zip(entries).enumerate() {
		item.scope.set_item(index, entry);
		item.bindings.render(&(Rc::clone(&item.scope) as Rc<dyn Scope>))?;
	}
	Ok(())
}

fn create_item(binding: &ForEachBinding, scope: &Rc<dyn Scope>, items: &[RenderedItem], index: usize, entry: Value) -> Result<RenderedItem, Error> {
	let element = binding
		.template
		.clone_node_with_deep(true)
		.map_err(Error::dom("cloneNode"))?
		.unchecked_into::<web_sys::Element>();

	let item_scope = Rc::new(ItemScope::new(Rc::clone(scope), binding.alias.as_str(), binding.collection.as_str(), index, entry));
	let dyn_scope: Rc<dyn Scope> = Rc::clone(&item_scope) as Rc<dyn Scope>;
	let mut listeners = Listeners::new();
	let bindings = Bindings::setup(&element, &dyn_scope, &mut listeners)?;

	let anchor: &web_sys::Node = match items.last() {
		Some(last) => &last.element,
		None => &binding.placeholder,
	};
	match anchor.parent_node() {
		Some(parent) => {
			parent.insert_before(&element, anchor.next_sibling().as_ref()).map_err(Error::dom("insertBefore"))?;
			trace!(index, "Inserted clone.");
			bindings.render(&dyn_scope)?;
		}
		None => warn!(index, "Could not insert clone, the placeholder has no parent node."),
	}

	Ok(RenderedItem {
		element,
		scope: item_scope,
		bindings,
		_listeners: listeners,
	})
}
