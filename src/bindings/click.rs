//! `click`: calls a named view model handler. The name is resolved when the event fires, not during setup.

use super::collect;
use crate::{
	error::{BindingKind, Error},
	listeners::Listeners,
	scope::Scope,
};
use std::rc::Rc;
use tracing::{instrument, trace_span};

/// Attaches one listener per element and returns how many were attached.
#[instrument(skip_all)]
pub(crate) fn setup(root: &web_sys::Element, scope: &Rc<dyn Scope>, listeners: &mut Listeners) -> Result<usize, Error> {
	let elements = collect::elements(root, BindingKind::Click)?;
	for (element, name) in &elements {
		let scope = Rc::clone(scope);
		let name = name.clone();
		listeners.add(element, "click", move |event| {
			let span = trace_span!("click", handler = %name);
			let _enter = span.enter();
			let handler = scope.handler(&name).ok_or_else(|| Error::InvalidHandler {
				handler: name.clone(),
				view_model: scope.type_name().to_owned(),
				event: "click",
			})?;
			handler(scope.as_ref(), &event);
			Ok(())
		})?;
	}
	Ok(elements.len())
}
