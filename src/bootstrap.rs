//! Finds `view-model` roots in the document and binds each to a fresh view model.

use crate::{
	binder::{setup_bindings, Binder},
	error::Error,
	registry::ViewModelRegistry,
	scope::{Scope, ViewModel},
};
use std::rc::{Rc, Weak};
use tracing::{error, info, instrument, trace, warn};
use wasm_bindgen::JsCast;

/// The attribute marking a bound root.
pub const VIEW_MODEL_ATTRIBUTE: &str = "view-model";

#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
	/// Where to look for roots. Defaults to the document element.
	pub root: Option<web_sys::Element>,
}

/// A bound root. Dropping it detaches its event listeners and stops change propagation.
#[derive(Debug)]
pub struct Mounted {
	pub root: web_sys::Element,
	pub view_model: Rc<ViewModel>,
	pub binder: Rc<Binder>,
}

/// Binds every `[view-model]` element below (and including) the search root.
///
/// Each root gets a fresh view model from `registry`; its changes re-render the affected bindings synchronously.
///
/// # Errors
///
/// The first unknown view model name or binding setup error aborts bootstrapping. Roots bound before the failure
/// are dropped again.
#[instrument(skip_all)]
pub fn bootstrap(registry: &ViewModelRegistry, options: BootstrapOptions) -> Result<Vec<Mounted>, Error> {
	let search_root = match options.root {
		Some(root) => root,
		None => web_sys::window()
			.and_then(|window| window.document())
			.and_then(|document| document.document_element())
			.ok_or(Error::Dom {
				operation: "document.documentElement",
				message: "no document element".to_owned(),
			})?,
	};

	let mut roots = Vec::new();
	if search_root.has_attribute(VIEW_MODEL_ATTRIBUTE) {
		roots.push(search_root.clone());
	}
	let found = search_root.query_selector_all(&format!("[{}]", VIEW_MODEL_ATTRIBUTE)).map_err(Error::dom("querySelectorAll"))?;
	roots.extend((0..found.length()).filter_map(|i| found.get(i)).filter_map(|node| node.dyn_into::<web_sys::Element>().ok()));

	if roots.is_empty() {
		warn!("No [{}] elements found.", VIEW_MODEL_ATTRIBUTE);
	}

	let mut mounted = Vec::with_capacity(roots.len());
	for root in roots {
		let name = match root.get_attribute(VIEW_MODEL_ATTRIBUTE) {
			Some(name) if !name.trim().is_empty() => name.trim().to_owned(),
			_ => {
				trace!("Skipped root with blank view model name.");
				continue;
			}
		};
		mounted.push(mount(registry, root, &name)?);
	}
	Ok(mounted)
}

fn mount(registry: &ViewModelRegistry, root: web_sys::Element, name: &str) -> Result<Mounted, Error> {
	let view_model = Rc::new(registry.create(name)?);
	let binder = setup_bindings(&root, Rc::clone(&view_model) as Rc<dyn Scope>)?;

	let weak: Weak<Binder> = Rc::downgrade(&binder);
	view_model.subscribe(move |changed_path| {
		if let Some(binder) = weak.upgrade() {
			if let Err(error) = binder.render(Some(changed_path)) {
				error!("Failed to render change at {:?}: {}", changed_path, error);
			}
		}
	});

	info!(view_model = name, bindings = binder.binding_count(), "Bound view model.");
	Ok(Mounted { root, view_model, binder })
}

/// Replaces the markup of `container` with `html` and bootstraps it.
///
/// # Errors
///
/// As [`bootstrap`].
pub fn mount_template(registry: &ViewModelRegistry, container: &web_sys::Element, html: &str) -> Result<Vec<Mounted>, Error> {
	container.set_inner_html(html);
	bootstrap(registry, BootstrapOptions { root: Some(container.clone()) })
}
