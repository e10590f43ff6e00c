//! What bindings resolve property paths and handler names against.
//!
//! A [`ViewModel`] is the root scope of a bound element: a reactive data record plus explicit registries of
//! computed properties and event handlers. Inside a `for-each` clone, an [`ItemScope`] puts the current item
//! under its alias on top of the enclosing scope.

use crate::{
	path,
	reactive::Reactive,
	value::{Object, Value},
};
use core::{
	cell::{Cell, RefCell},
	fmt,
};
use hashbrown::HashMap;
use std::{borrow::Cow, rc::Rc};
use tracing::warn;

/// An event handler. Receives the scope the triggering element was bound in.
pub type Handler = Rc<dyn Fn(&dyn Scope, &web_sys::Event)>;

/// A computed (derived) property.
pub type Getter = Rc<dyn Fn(&dyn Scope) -> Value>;

pub trait Scope {
	/// The view model's type name, used in error messages.
	fn type_name(&self) -> &str;

	/// The current value at a dotted path, [`Value::Undefined`] if it doesn't resolve.
	fn get(&self, path: &str) -> Value;

	/// Writes through change tracking. Returns whether a change was recorded.
	fn set(&self, path: &str, value: Value) -> bool;

	/// Whether `path` names an existing property. Intermediate segments must not be nullish.
	fn has(&self, path: &str) -> bool;

	/// Whether `path` resolves through a computed property, whose dependencies are unknown.
	fn is_computed(&self, path: &str) -> bool;

	/// A change-tracking handle for the container at `path`.
	fn observe(&self, path: &str) -> Option<Reactive>;

	fn handler(&self, name: &str) -> Option<Handler>;
}

/// The root scope of one bound element.
pub struct ViewModel {
	type_name: Cow<'static, str>,
	state: Reactive,
	computed: HashMap<String, Getter>,
	handlers: HashMap<String, Handler>,
}

#[must_use]
pub struct ViewModelBuilder {
	type_name: Cow<'static, str>,
	data: Object,
	computed: HashMap<String, Getter>,
	handlers: HashMap<String, Handler>,
}

impl ViewModel {
	pub fn builder(type_name: impl Into<Cow<'static, str>>) -> ViewModelBuilder {
		ViewModelBuilder {
			type_name: type_name.into(),
			data: Object::new(),
			computed: HashMap::new(),
			handlers: HashMap::new(),
		}
	}

	/// The change-tracking handle over this view model's data.
	#[must_use]
	pub fn state(&self) -> &Reactive {
		&self.state
	}

	/// Routes every change of this view model's data to `on_change`, replacing any previous subscriber.
	pub fn subscribe(&self, on_change: impl Fn(&str) + 'static) {
		self.state.subscribe(on_change);
	}
}

impl ViewModelBuilder {
	pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.data.insert(name, value);
		self
	}

	pub fn computed(mut self, name: impl Into<String>, getter: impl Fn(&dyn Scope) -> Value + 'static) -> Self {
		self.computed.insert(name.into(), Rc::new(getter));
		self
	}

	pub fn handler(mut self, name: impl Into<String>, handler: impl Fn(&dyn Scope, &web_sys::Event) + 'static) -> Self {
		self.handlers.insert(name.into(), Rc::new(handler));
		self
	}

	#[must_use]
	pub fn build(self) -> ViewModel {
		ViewModel {
			type_name: self.type_name,
			state: Reactive::for_object(self.data),
			computed: self.computed,
			handlers: self.handlers,
		}
	}
}

impl Scope for ViewModel {
	fn type_name(&self) -> &str {
		&self.type_name
	}

	fn get(&self, path: &str) -> Value {
		let (first, rest) = path::split_first(path);
		match self.computed.get(first) {
			Some(getter) => {
				let value = getter(self);
				match rest {
					Some(rest) => value.get_path(rest),
					None => value,
				}
			}
			None => self.state.get_path(path),
		}
	}

	fn set(&self, path: &str, value: Value) -> bool {
		if self.is_computed(path) {
			warn!(path, view_model = %self.type_name, "Ignored write to a computed property.");
			return false;
		}
		self.state.set_path(path, value)
	}

	fn has(&self, path: &str) -> bool {
		self.is_computed(path) || self.state.raw().has_path(path)
	}

	fn is_computed(&self, path: &str) -> bool {
		self.computed.contains_key(path::split_first(path).0)
	}

	fn observe(&self, path: &str) -> Option<Reactive> {
		if self.is_computed(path) {
			return None;
		}
		self.state.child_path(path)
	}

	fn handler(&self, name: &str) -> Option<Handler> {
		self.handlers.get(name).cloned()
	}
}

impl fmt::Debug for ViewModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewModel")
			.field("type_name", &self.type_name)
			.field("state", &self.state)
			.field("computed", &self.computed.keys().collect::<Vec<_>>())
			.field("handlers", &self.handlers.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// The scope of one `for-each` clone: `alias` and `alias.*` resolve against the current item, the rest against the parent.
///
/// Writes below the alias go through the item's handle inside the parent collection, so they are reported as
/// `collection.index.field`.
pub struct ItemScope {
	parent: Rc<dyn Scope>,
	alias: String,
	collection: String,
	index: Cell<usize>,
	item: RefCell<Value>,
}

impl ItemScope {
	#[must_use]
	pub fn new(parent: Rc<dyn Scope>, alias: impl Into<String>, collection: impl Into<String>, index: usize, item: Value) -> Self {
		Self {
			parent,
			alias: alias.into(),
			collection: collection.into(),
			index: Cell::new(index),
			item: RefCell::new(item),
		}
	}

	#[must_use]
	pub fn alias(&self) -> &str {
		&self.alias
	}

	#[must_use]
	pub fn index(&self) -> usize {
		self.index.get()
	}

	#[must_use]
	pub fn item(&self) -> Value {
		self.item.borrow().clone()
	}

	/// Points this scope at a (possibly replaced) collection entry.
	pub fn set_item(&self, index: usize, item: Value) {
		self.index.set(index);
		*self.item.borrow_mut() = item;
	}

	fn collection_handle(&self) -> Option<Reactive> {
		self.parent.observe(&self.collection)
	}
}

impl Scope for ItemScope {
	fn type_name(&self) -> &str {
		self.parent.type_name()
	}

	fn get(&self, path: &str) -> Value {
		match path::strip_alias(path, &self.alias) {
			Some("") => self.item(),
			Some(rest) => self.item().get_path(rest),
			None => self.parent.get(path),
		}
	}

	fn set(&self, path: &str, value: Value) -> bool {
		match path::strip_alias(path, &self.alias) {
			Some("") => {
				let index = self.index().to_string();
				let changed = match self.collection_handle() {
					Some(collection) => collection.set(&index, value.clone()),
					None => false,
				};
				*self.item.borrow_mut() = value;
				changed
			}
			Some(rest) => match self.observe(&self.alias) {
				Some(item) => item.set_path(rest, value),
				None => {
					warn!(path, "Ignored write below a primitive loop item.");
					false
				}
			},
			None => self.parent.set(path, value),
		}
	}

	fn has(&self, path: &str) -> bool {
		// Items may legitimately omit optional fields, so anything below the alias counts as present.
		path::strip_alias(path, &self.alias).is_some() || self.parent.has(path)
	}

	fn is_computed(&self, path: &str) -> bool {
		path::strip_alias(path, &self.alias).is_none() && self.parent.is_computed(path)
	}

	fn observe(&self, path: &str) -> Option<Reactive> {
		match path::strip_alias(path, &self.alias) {
			Some(rest) => {
				let item = self.collection_handle()?.child(&self.index().to_string())?;
				if rest.is_empty() {
					Some(item)
				} else {
					item.child_path(rest)
				}
			}
			None => self.parent.observe(path),
		}
	}

	fn handler(&self, name: &str) -> Option<Handler> {
		self.parent.handler(name)
	}
}

impl fmt::Debug for ItemScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ItemScope")
			.field("alias", &self.alias)
			.field("collection", &self.collection)
			.field("index", &self.index.get())
			.finish_non_exhaustive()
	}
}
