//! The binding kinds.
//!
//! Each kind has a `setup` that collects its elements, validates their property paths and captures whatever static
//! state rendering needs, and a `render` that applies the current view model value to one binding.
//! [`Bindings`] runs all of them over one subtree in a fixed order.

pub(crate) mod class;
pub(crate) mod click;
pub(crate) mod collect;
pub(crate) mod conditional;
pub(crate) mod content;
pub(crate) mod for_each;
pub(crate) mod style;
pub(crate) mod value;

use crate::{
	error::{BindingKind, Error},
	listeners::Listeners,
	scope::Scope,
};
use std::rc::Rc;
use tracing::{instrument, trace};
use wasm_bindgen::JsCast;

/// Identifies one render-driven binding within a [`Bindings`] set.
///
/// `if` and `bind-visible` share storage; their `index` counts through both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingKey {
	pub kind: BindingKind,
	pub index: usize,
}

/// All bindings of one subtree, bound against one scope.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
	pub for_each: Vec<for_each::ForEachBinding>,
	pub value: Vec<value::ValueBinding>,
	pub content: Vec<content::ContentBinding>,
	pub conditional: Vec<conditional::ConditionalBinding>,
	pub class: Vec<class::ClassBinding>,
	pub style: Vec<style::StyleBinding>,
	pub clicks: usize,
}

impl Bindings {
	/// Sets up every binding kind below (and including) `root`.
	///
	/// `for-each` goes first so that template markup leaves the live tree before anything else is collected.
	#[instrument(skip_all)]
	pub fn setup(root: &web_sys::Element, scope: &Rc<dyn Scope>, listeners: &mut Listeners) -> Result<Self, Error> {
		let for_each = for_each::setup(root, scope.as_ref())?;
		let value = value::setup(root, scope, listeners)?;
		let content = content::setup(root, scope.as_ref())?;
		let mut conditional = conditional::setup(root, scope.as_ref(), BindingKind::If)?;
		conditional.extend(conditional::setup(root, scope.as_ref(), BindingKind::Visible)?);
		let class = class::setup(root, scope.as_ref())?;
		let style = style::setup(root, scope.as_ref())?;
		let clicks = click::setup(root, scope, listeners)?;

		let bindings = Self {
			for_each,
			value,
			content,
			conditional,
			class,
			style,
			clicks,
		};
		trace!(count = bindings.len(), clicks, "Set up bindings.");
		Ok(bindings)
	}

	/// Keys of all render-driven bindings, in render pipeline order.
	pub fn keys(&self) -> Vec<BindingKey> {
		let for_each = (0..self.for_each.len()).map(|index| BindingKey { kind: BindingKind::ForEach, index });
		let value = (0..self.value.len()).map(|index| BindingKey { kind: BindingKind::Value, index });
		let content = (0..self.content.len()).map(|index| BindingKey { kind: BindingKind::Content, index });
		let conditional = self.conditional.iter().enumerate().map(|(index, binding)| BindingKey { kind: binding.kind, index });
		let class = (0..self.class.len()).map(|index| BindingKey { kind: BindingKind::Class, index });
		let style = (0..self.style.len()).map(|index| BindingKey { kind: BindingKind::Style, index });
		for_each.chain(value).chain(content).chain(conditional).chain(class).chain(style).collect()
	}

	/// The property path a binding reads. [`None`] for keys that don't belong to this set.
	pub fn path(&self, key: BindingKey) -> Option<&str> {
		Some(match key.kind {
			BindingKind::ForEach => self.for_each.get(key.index)?.collection(),
			BindingKind::Value => &self.value.get(key.index)?.path,
			BindingKind::Content => &self.content.get(key.index)?.path,
			BindingKind::If | BindingKind::Visible => &self.conditional.get(key.index)?.path,
			BindingKind::Class => &self.class.get(key.index)?.path,
			BindingKind::Style => &self.style.get(key.index)?.path,
			BindingKind::Click => return None,
		})
	}

	pub fn render_key(&self, key: BindingKey, scope: &Rc<dyn Scope>) -> Result<(), Error> {
		match key.kind {
			BindingKind::ForEach => self.for_each.get(key.index).map_or(Ok(()), |binding| for_each::render(binding, scope)),
			BindingKind::Value => self.value.get(key.index).map_or(Ok(()), |binding| value::render(binding, scope.as_ref())),
			BindingKind::Content => self.content.get(key.index).map_or(Ok(()), |binding| content::render(binding, scope.as_ref())),
			BindingKind::If | BindingKind::Visible => self.conditional.get(key.index).map_or(Ok(()), |binding| conditional::render(binding, scope.as_ref())),
			BindingKind::Class => self.class.get(key.index).map_or(Ok(()), |binding| class::render(binding, scope.as_ref())),
			BindingKind::Style => self.style.get(key.index).map_or(Ok(()), |binding| style::render(binding, scope.as_ref())),
			BindingKind::Click => Ok(()),
		}
	}

	/// Renders every binding unconditionally.
	pub fn render(&self, scope: &Rc<dyn Scope>) -> Result<(), Error> {
		for key in self.keys() {
			self.render_key(key, scope)?;
		}
		Ok(())
	}

	/// The number of render-driven bindings.
	pub fn len(&self) -> usize {
		self.for_each.len() + self.value.len() + self.content.len() + self.conditional.len() + self.class.len() + self.style.len()
	}
}

/// The inline style declaration of an HTML or SVG element.
pub(crate) fn inline_style(element: &web_sys::Element) -> Option<web_sys::CssStyleDeclaration> {
	if let Some(element) = element.dyn_ref::<web_sys::HtmlElement>() {
		Some(element.style())
	} else {
		element.dyn_ref::<web_sys::SvgElement>().map(web_sys::SvgElement::style)
	}
}
