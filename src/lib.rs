//! Attribute-driven DOM bindings for plain view models.
//!
//! Markup declares what to show (`bind-value`, `bind-content`, `if`, `bind-visible`, `bind-class`, `bind-style`,
//! `for-each`) and what to call (`click`); a [`ViewModel`] holds the data. [`setup_bindings`] wires the two once,
//! and every change made through the view model's [`Reactive`] handle re-renders exactly the bindings that read
//! the changed path.
//!
//! Everything here runs synchronously on the thread that owns the DOM.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod binder;
mod bindings;
mod bootstrap;
mod error;
mod listeners;
pub mod path;
mod reactive;
mod registry;
mod scope;
pub mod tracker;
mod validation;
mod value;

pub use binder::{setup_bindings, Binder};
pub use bindings::BindingKey;
pub use bootstrap::{bootstrap, mount_template, BootstrapOptions, Mounted, VIEW_MODEL_ATTRIBUTE};
pub use error::{BindingKind, Error};
pub use reactive::Reactive;
pub use registry::{Constructor, ViewModelRegistry};
pub use scope::{Getter, Handler, ItemScope, Scope, ViewModel, ViewModelBuilder};
pub use validation::{assert_property, element_snippet};
pub use value::{array_index, number_to_js_string, parse_js_number, Array, Object, Value, MAX_ARRAY_INDEX, MAX_SPARSE_GAP};
