//! Change tracking for view model data.
//!
//! A [`Reactive`] handle wraps an [`Object`](crate::Object) or [`Array`](crate::Array) and reports every observable
//! mutation made through it to a single subscriber as a dotted property path.
//!
//! Handles for nested containers are created explicitly through [`Reactive::child`] and are cached by container
//! identity, so reaching the same container twice (even through a self-reference) yields the identical handle
//! instead of recursing. The cache is an arena of weak entries: containers the view model no longer holds are
//! reclaimed as it grows.
//!
//! Mutating the value returned by [`Reactive::raw`] bypasses change tracking entirely.

use crate::{
	path::{self, ROOT},
	value::{array_index, Object, Value, WeakContainer},
};
use core::{cell::RefCell, cmp::Ordering, fmt};
use hashbrown::HashMap;
use std::rc::Rc;
use tracing::{trace, warn};

type Subscriber = Rc<dyn Fn(&str)>;

const MIN_SWEEP_THRESHOLD: usize = 16;

/// A change-tracking handle onto a view model container.
#[derive(Clone)]
pub struct Reactive {
	context: Rc<Context>,
	node: usize,
	/// Keeps the container (and with it the arena entry) alive while the handle exists.
	target: Value,
}

struct Context {
	arena: RefCell<Arena>,
	subscriber: RefCell<Option<Subscriber>>,
}

struct Arena {
	nodes: Vec<Node>,
	by_identity: HashMap<usize, usize>,
	free: Vec<usize>,
	sweep_threshold: usize,
}

struct Node {
	target: WeakContainer,
	/// [`None`] for the root container.
	path: Option<Rc<str>>,
}

impl Reactive {
	/// Starts tracking `target`, which must be an object or array. Primitives yield [`None`].
	#[must_use]
	pub fn new(target: impl Into<Value>) -> Option<Self> {
		Context::handle(&Context::new(), target.into(), None)
	}

	/// Starts tracking a record, which unlike [`Reactive::new`] can't fail.
	#[must_use]
	pub(crate) fn for_object(target: Object) -> Self {
		let (id, weak) = (target.id(), target.downgrade());
		Context::attach(&Context::new(), Value::Object(target), id, weak, None)
	}

	/// [`Reactive::new`] with `on_change` already subscribed.
	#[must_use]
	pub fn wrap(target: impl Into<Value>, on_change: impl Fn(&str) + 'static) -> Option<Self> {
		let reactive = Self::new(target)?;
		reactive.subscribe(on_change);
		Some(reactive)
	}

	/// Installs the change callback shared by every handle of this graph, replacing any previous one.
	///
	/// The callback runs synchronously after each mutation, with no internal borrow held, so it may mutate again.
	pub fn subscribe(&self, on_change: impl Fn(&str) + 'static) {
		*self.context.subscriber.borrow_mut() = Some(Rc::new(on_change));
	}

	pub fn unsubscribe(&self) {
		self.context.subscriber.borrow_mut().take();
	}

	/// The untracked container. Mutations through it notify nobody.
	#[must_use]
	pub fn raw(&self) -> Value {
		self.target.clone()
	}

	/// The path this container was first reached through, [`None`] for the root.
	#[must_use]
	pub fn path(&self) -> Option<Rc<str>> {
		self.context.arena.borrow().nodes[self.node].path.clone()
	}

	#[must_use]
	pub fn is_array(&self) -> bool {
		matches!(self.target, Value::Array(_))
	}

	/// Number of items (arrays) or keys (objects).
	#[must_use]
	pub fn len(&self) -> usize {
		match &self.target {
			Value::Array(array) => array.len(),
			Value::Object(object) => object.len(),
			_ => 0,
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The current value at `key`, untracked.
	#[must_use]
	pub fn get(&self, key: &str) -> Value {
		self.target.get_key(key)
	}

	#[must_use]
	pub fn get_path(&self, path: &str) -> Value {
		self.target.get_path(path)
	}

	/// A handle for the container stored at `key`, or [`None`] if that is a primitive.
	#[must_use]
	pub fn child(&self, key: &str) -> Option<Self> {
		let path = self.path_of(key);
		Context::handle(&self.context, self.get(key), Some(path.into()))
	}

	#[must_use]
	pub fn child_path(&self, path: &str) -> Option<Self> {
		path::segments(path).try_fold(self.clone(), |handle, segment| handle.child(segment))
	}

	/// Writes `key` and notifies with its full path, unless the stored value is already strictly equal.
	///
	/// Returns whether a change was recorded.
	pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
		let value = value.into();
		let old = self.get(key);
		if old.strict_eq(&value) {
			return false;
		}
		let path = self.path_of(key);
		if !store(&self.target, key, value.clone()) {
			warn!(key, type_of = self.target.type_of(), "Ignored write of a key the container can't hold.");
			return false;
		}
		self.adopt(&value, &path);
		self.notify(&path);
		true
	}

	/// [`Reactive::set`] below a dotted path. A missing or primitive intermediate segment makes this a no-op.
	pub fn set_path(&self, path: &str, value: impl Into<Value>) -> bool {
		let (parent, last) = path::split_last(path);
		let target = match parent {
			Some(parent) => match self.child_path(parent) {
				Some(target) => target,
				None => return false,
			},
			None => self.clone(),
		};
		target.set(last, value)
	}

	/// Removes `key`, notifying only if it existed.
	pub fn delete(&self, key: &str) -> bool {
		if !remove(&self.target, key) {
			return false;
		}
		self.notify(&self.path_of(key));
		true
	}

	/// Writes `key` on an arbitrary container and notifies with that container's path context.
	///
	/// Containers this graph has never handed out a handle for report the root path. Returns whether the write
	/// happened; a key the target can't hold changes nothing and notifies nobody.
	pub fn set_in(&self, target: &Value, key: &str, value: impl Into<Value>) -> bool {
		let value = value.into();
		let path = match self.context.known_path(target) {
			Some(parent) => path::join(parent.as_deref(), key),
			None => ROOT.to_owned(),
		};
		if !store(target, key, value.clone()) {
			warn!(key, type_of = target.type_of(), "`set_in` target cannot hold this key.");
			return false;
		}
		if !path.is_empty() {
			self.adopt(&value, &path);
		}
		self.notify(&path);
		true
	}

	/// Removes `key` from an arbitrary container and notifies with that container's path context.
	pub fn delete_in(&self, target: &Value, key: &str) {
		let path = match self.context.known_path(target) {
			Some(parent) => path::join(parent.as_deref(), key),
			None => ROOT.to_owned(),
		};
		remove(target, key);
		self.notify(&path);
	}

	/// Appends `values` and returns the new length.
	pub fn push<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> usize {
		let values: Vec<Value> = values.into_iter().map(Into::into).collect();
		self.mutate_array("push", |array, this| {
			let start = array.len();
			for (i, value) in values.iter().enumerate() {
				this.adopt(value, &this.path_of(&(start + i).to_string()));
			}
			array.push(values)
		})
		.unwrap_or(0)
	}

	pub fn pop(&self) -> Option<Value> {
		self.mutate_array("pop", |array, _| array.pop()).flatten()
	}

	pub fn shift(&self) -> Option<Value> {
		self.mutate_array("shift", |array, _| array.shift()).flatten()
	}

	/// Prepends `values` and returns the new length.
	pub fn unshift<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> usize {
		let values: Vec<Value> = values.into_iter().map(Into::into).collect();
		self.mutate_array("unshift", |array, this| {
			for (i, value) in values.iter().enumerate() {
				this.adopt(value, &this.path_of(&i.to_string()));
			}
			array.unshift(values)
		})
		.unwrap_or(0)
	}

	/// Removes `delete_count` items at `start`, inserts `values` in their place and returns the removed items.
	pub fn splice<V: Into<Value>>(&self, start: usize, delete_count: usize, values: impl IntoIterator<Item = V>) -> Vec<Value> {
		let values: Vec<Value> = values.into_iter().map(Into::into).collect();
		self.mutate_array("splice", |array, this| {
			let start = start.min(array.len());
			for (i, value) in values.iter().enumerate() {
				this.adopt(value, &this.path_of(&(start + i).to_string()));
			}
			array.splice(start, delete_count, values)
		})
		.unwrap_or_default()
	}

	/// Sorts by string conversion, like `Array.prototype.sort()` without a comparator.
	pub fn sort(&self) {
		self.mutate_array("sort", |array, _| array.sort());
	}

	pub fn sort_by(&self, compare: impl FnMut(&Value, &Value) -> Ordering) {
		self.mutate_array("sort", |array, _| array.sort_by(compare));
	}

	pub fn reverse(&self) {
		self.mutate_array("reverse", |array, _| array.reverse());
	}

	fn mutate_array<R>(&self, method: &'static str, mutate: impl FnOnce(&crate::Array, &Self) -> R) -> Option<R> {
		let array = match &self.target {
			Value::Array(array) => array,
			other => {
				warn!(method, type_of = other.type_of(), "Array method called on a non-array handle.");
				return None;
			}
		};
		let result = mutate(array, self);
		let path = self.path();
		// The whole array is reported as changed, not the touched indices.
		self.notify(path.as_deref().unwrap_or(ROOT));
		Some(result)
	}

	fn path_of(&self, key: &str) -> String {
		path::join(self.path().as_deref(), key)
	}

	/// Gives a freshly stored container its path context if it has none yet.
	fn adopt(&self, value: &Value, path: &str) {
		drop(Context::handle(&self.context, value.clone(), Some(path.into())));
	}

	fn notify(&self, path: &str) {
		if cfg!(feature = "dangerous-logging") {
			trace!(path, target = ?self.target, "Change");
		} else {
			trace!(path, "Change");
		}
		let subscriber = self.context.subscriber.borrow().clone();
		if let Some(subscriber) = subscriber {
			subscriber(path);
		}
	}
}

impl Context {
	fn new() -> Rc<Self> {
		Rc::new(Self {
			arena: RefCell::new(Arena {
				nodes: Vec::new(),
				by_identity: HashMap::new(),
				free: Vec::new(),
				sweep_threshold: MIN_SWEEP_THRESHOLD,
			}),
			subscriber: RefCell::new(None),
		})
	}

	fn handle(context: &Rc<Self>, target: Value, path: Option<Rc<str>>) -> Option<Reactive> {
		let id = target.id()?;
		let weak = target.downgrade()?;
		Some(Self::attach(context, target, id, weak, path))
	}

	fn attach(context: &Rc<Self>, target: Value, id: usize, weak: WeakContainer, path: Option<Rc<str>>) -> Reactive {
		let mut arena = context.arena.borrow_mut();
		let node = match arena.by_identity.get(&id).copied() {
			Some(node) if arena.nodes[node].target.upgrade().and_then(|v| v.id()) == Some(id) => node,
			// The address was reused after the previous container was dropped.
			Some(node) => {
				arena.nodes[node] = Node { target: weak, path };
				node
			}
			None => {
				let node = arena.allocate(Node { target: weak, path });
				arena.by_identity.insert(id, node);
				node
			}
		};
		Reactive {
			context: Rc::clone(context),
			node,
			target,
		}
	}

	/// `Some(path)` if `target` has a live handle node in this graph.
	fn known_path(&self, target: &Value) -> Option<Option<Rc<str>>> {
		let id = target.id()?;
		let arena = self.arena.borrow();
		let node = &arena.nodes[*arena.by_identity.get(&id)?];
		if node.target.upgrade().and_then(|v| v.id()) == Some(id) {
			Some(node.path.clone())
		} else {
			None
		}
	}
}

impl Arena {
	fn allocate(&mut self, node: Node) -> usize {
		if self.free.is_empty() && self.nodes.len() >= self.sweep_threshold {
			self.sweep();
		}
		match self.free.pop() {
			Some(index) => {
				self.nodes[index] = node;
				index
			}
			None => {
				self.nodes.push(node);
				self.nodes.len() - 1
			}
		}
	}

	fn sweep(&mut self) {
		let nodes = &self.nodes;
		self.by_identity.retain(|_, node| nodes[*node].target.is_alive());
		self.free = (0..nodes.len()).filter(|&i| !nodes[i].target.is_alive()).collect();
		let live = nodes.len() - self.free.len();
		self.sweep_threshold = (live * 2).max(MIN_SWEEP_THRESHOLD);
		trace!(live, reclaimed = self.free.len(), "Swept reactive arena.");
	}
}

fn store(target: &Value, key: &str, value: Value) -> bool {
	match target {
		Value::Object(object) => {
			object.insert(key, value);
			true
		}
		Value::Array(array) => array_index(key).and_then(|index| array.set(index, value)).is_some(),
		_ => false,
	}
}

fn remove(target: &Value, key: &str) -> bool {
	match target {
		Value::Object(object) => object.remove(key).is_some(),
		// Deleting an index leaves a hole.
		Value::Array(array) => match array_index(key) {
			Some(index) if index < array.len() => array.set(index, Value::Undefined).is_some(),
			_ => false,
		},
		_ => false,
	}
}

impl PartialEq for Reactive {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.context, &other.context) && self.node == other.node
	}
}

impl Eq for Reactive {}

impl fmt::Debug for Reactive {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut debug = f.debug_struct("Reactive");
		debug.field("path", &self.path()).field("node", &self.node);
		if cfg!(feature = "dangerous-logging") {
			debug.field("target", &self.target);
		}
		debug.finish_non_exhaustive()
	}
}
