//! Reverse index from bindings to the property paths they read.
//!
//! Given a changed path, [`DependencyTracker`] answers which bindings have to re-render, using
//! [`path::affects`](crate::path::affects) (exact, descendant or ancestor match). Bindings on computed properties
//! can't be analysed statically and are therefore always considered affected.

use crate::{path, scope::Scope};
use core::hash::Hash;
use hashbrown::{HashMap, HashSet};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct DependencyTracker<K>
where
	K: Copy + Eq + Hash,
{
	dependencies: HashMap<K, Dependencies>,
}

#[derive(Debug, Clone, Default)]
struct Dependencies {
	paths: HashSet<String>,
	/// Set if any registered path resolves through a computed property.
	computed: bool,
}

impl<K> Default for DependencyTracker<K>
where
	K: Copy + Eq + Hash,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<K> DependencyTracker<K>
where
	K: Copy + Eq + Hash,
{
	#[must_use]
	pub fn new() -> Self {
		Self { dependencies: HashMap::new() }
	}

	/// Records that `binding` reads `path`. Registering the same pair twice has no effect.
	///
	/// With a `scope`, paths that resolve through a computed property flag the binding as always affected.
	pub fn register(&mut self, binding: K, path: &str, scope: Option<&dyn Scope>) {
		let entry = self.dependencies.entry(binding).or_default();
		entry.paths.insert(path.to_owned());
		if scope.map_or(false, |scope| scope.is_computed(path)) {
			trace!(path, "Registered computed dependency.");
			entry.computed = true;
		}
	}

	/// Forgets every path registered for `binding`.
	pub fn unregister(&mut self, binding: &K) -> bool {
		self.dependencies.remove(binding).is_some()
	}

	#[must_use]
	pub fn is_affected(&self, binding: &K, changed_path: &str) -> bool {
		match self.dependencies.get(binding) {
			Some(dependencies) => dependencies.computed || dependencies.paths.iter().any(|path| path::affects(path, changed_path)),
			None => false,
		}
	}

	/// The subset of `bindings` affected by a change at `changed_path`, in iteration order.
	pub fn affected(&self, changed_path: &str, bindings: impl IntoIterator<Item = K>) -> Vec<K> {
		bindings.into_iter().filter(|binding| self.is_affected(binding, changed_path)).collect()
	}

	/// The number of bindings with at least one registered path.
	#[must_use]
	pub fn len(&self) -> usize {
		self.dependencies.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.dependencies.is_empty()
	}
}
