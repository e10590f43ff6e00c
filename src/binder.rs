//! Sets up all bindings of a root element once and renders them selectively afterwards.

use crate::{
	bindings::{BindingKey, Bindings},
	error::{BindingKind, Error},
	listeners::Listeners,
	path::ROOT,
	scope::Scope,
	tracker::DependencyTracker,
};
use core::{
	cell::{Cell, RefCell},
	fmt,
};
use std::{collections::VecDeque, rc::Rc};
use tracing::{instrument, trace, trace_span};

/// The live bindings of one root element.
///
/// Dropping the [`Binder`] detaches every event listener it installed. The DOM is left as it was last rendered.
pub struct Binder {
	root: web_sys::Element,
	scope: Rc<dyn Scope>,
	bindings: Bindings,
	keys: Vec<BindingKey>,
	tracker: DependencyTracker<BindingKey>,
	rendering: Cell<bool>,
	pending: RefCell<VecDeque<Option<String>>>,
	listeners: Listeners,
}

/// Sets up every binding below (and including) `root` against `scope`, registers their dependencies and renders once.
///
/// # Errors
///
/// Any setup error aborts the whole root. Bindings set up before the failing one are dropped, detaching their
/// listeners; `for-each` templates already replaced by their placeholder stay replaced.
#[instrument(skip(scope), fields(view_model = scope.type_name()))]
pub fn setup_bindings(root: &web_sys::Element, scope: Rc<dyn Scope>) -> Result<Rc<Binder>, Error> {
	let mut listeners = Listeners::new();
	let bindings = Bindings::setup(root, &scope, &mut listeners)?;

	let keys = bindings.keys();
	let mut tracker = DependencyTracker::new();
	for &key in &keys {
		if let Some(path) = bindings.path(key) {
			tracker.register(key, path, Some(scope.as_ref()));
		}
		if key.kind == BindingKind::ForEach {
			if let Some(binding) = bindings.for_each.get(key.index) {
				for path in binding.outer_paths()? {
					tracker.register(key, &path, Some(scope.as_ref()));
				}
			}
		}
	}
	trace!(bindings = keys.len(), listeners = listeners.len(), "Registered dependencies.");

	let binder = Rc::new(Binder {
		root: root.clone(),
		scope,
		bindings,
		keys,
		tracker,
		rendering: Cell::new(false),
		pending: RefCell::new(VecDeque::new()),
		listeners,
	});
	binder.render(None)?;
	Ok(binder)
}

impl Binder {
	/// Renders the bindings affected by a change at `changed_path`, or all of them for [`None`] and the root path.
	///
	/// A render requested while another one is running (from a listener or a subscriber reacting to DOM updates) is
	/// queued and performed by the outer call once it finishes, in request order.
	///
	/// # Errors
	///
	/// Fails if a `for-each` clone can't be set up or a DOM call fails. Queued renders are discarded in that case.
	pub fn render(&self, changed_path: Option<&str>) -> Result<(), Error> {
		if self.rendering.replace(true) {
			trace!(changed_path, "Queued re-entrant render.");
			self.pending.borrow_mut().push_back(changed_path.map(ToOwned::to_owned));
			return Ok(());
		}

		let mut result = self.render_now(changed_path);
		while result.is_ok() {
			let next = self.pending.borrow_mut().pop_front();
			match next {
				Some(changed_path) => result = self.render_now(changed_path.as_deref()),
				None => break,
			}
		}
		self.pending.borrow_mut().clear();
		self.rendering.set(false);
		result
	}

	fn render_now(&self, changed_path: Option<&str>) -> Result<(), Error> {
		let span = trace_span!("render", changed_path);
		let _enter = span.enter();

		match changed_path {
			None | Some(ROOT) => {
				trace!(bindings = self.keys.len(), "Full render.");
				self.bindings.render(&self.scope)
			}
			Some(changed_path) => {
				let affected = self.tracker.affected(changed_path, self.keys.iter().copied());
				trace!(affected = affected.len(), "Selective render.");
				for key in affected {
					self.bindings.render_key(key, &self.scope)?;
				}
				Ok(())
			}
		}
	}

	/// The keys of the bindings a change at `changed_path` re-renders, in render order.
	#[must_use]
	pub fn affected(&self, changed_path: &str) -> Vec<BindingKey> {
		if changed_path == ROOT {
			return self.keys.clone();
		}
		self.tracker.affected(changed_path, self.keys.iter().copied())
	}

	#[must_use]
	pub fn root(&self) -> &web_sys::Element {
		&self.root
	}

	#[must_use]
	pub fn scope(&self) -> &Rc<dyn Scope> {
		&self.scope
	}

	/// The number of render-driven bindings directly below the root. Bindings inside `for-each` clones aren't counted.
	#[must_use]
	pub fn binding_count(&self) -> usize {
		self.keys.len()
	}

	/// The number of event listeners installed directly below the root.
	#[must_use]
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}
}

impl fmt::Debug for Binder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Binder")
			.field("view_model", &self.scope.type_name())
			.field("bindings", &self.keys)
			.field("listeners", &self.listeners)
			.field("rendering", &self.rendering.get())
			.finish_non_exhaustive()
	}
}
