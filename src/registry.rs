use crate::{error::Error, scope::ViewModel};
use core::fmt;
use hashbrown::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Creates a fresh view model for one bound root.
pub type Constructor = Rc<dyn Fn() -> ViewModel>;

/// Maps `view-model="…"` names to view model constructors.
#[derive(Clone, Default)]
pub struct ViewModelRegistry {
	constructors: HashMap<String, Constructor>,
}

impl ViewModelRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// # Errors
	///
	/// [`Error::DuplicateViewModel`] if `name` is taken. The existing registration is kept.
	pub fn register(&mut self, name: impl Into<String>, constructor: impl Fn() -> ViewModel + 'static) -> Result<(), Error> {
		let name = name.into();
		if self.constructors.contains_key(&name) {
			return Err(Error::DuplicateViewModel(name));
		}
		trace!(name = %name, "Registered view model.");
		self.constructors.insert(name, Rc::new(constructor));
		Ok(())
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<Constructor> {
		self.constructors.get(name).cloned()
	}

	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.constructors.contains_key(name)
	}

	/// Constructs the view model registered as `name`.
	///
	/// # Errors
	///
	/// [`Error::UnknownViewModel`] if nothing is registered under `name`.
	pub fn create(&self, name: &str) -> Result<ViewModel, Error> {
		let constructor = self.constructors.get(name).ok_or_else(|| Error::UnknownViewModel(name.to_owned()))?;
		Ok(constructor())
	}

	pub fn clear(&mut self) {
		self.constructors.clear();
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.constructors.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.constructors.is_empty()
	}
}

impl fmt::Debug for ViewModelRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.constructors.keys()).finish()
	}
}
