//! `bind-value`: two-way binding for form controls, text content for everything else.

use super::collect;
use crate::{
	error::{BindingKind, Error},
	listeners::Listeners,
	scope::Scope,
	validation::assert_property,
	value::{parse_js_number, Value},
};
use std::rc::Rc;
use tracing::{instrument, level_filters::STATIC_MAX_LEVEL, trace, Level};
use wasm_bindgen::JsCast;

#[derive(Debug)]
pub(crate) struct ValueBinding {
	pub element: web_sys::Element,
	pub path: String,
	control: Option<Control>,
}

/// A form control with a live `.value`.
#[derive(Debug, Clone)]
enum Control {
	Input(web_sys::HtmlInputElement),
	TextArea(web_sys::HtmlTextAreaElement),
	Select(web_sys::HtmlSelectElement),
}

impl Control {
	fn of(element: &web_sys::Element) -> Option<Self> {
		if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
			Some(Self::Input(input.clone()))
		} else if let Some(text_area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
			Some(Self::TextArea(text_area.clone()))
		} else {
			element.dyn_ref::<web_sys::HtmlSelectElement>().map(|select| Self::Select(select.clone()))
		}
	}

	fn value(&self) -> String {
		match self {
			Self::Input(input) => input.value(),
			Self::TextArea(text_area) => text_area.value(),
			Self::Select(select) => select.value(),
		}
	}

	fn set_value(&self, value: &str) {
		match self {
			Self::Input(input) => input.set_value(value),
			Self::TextArea(text_area) => text_area.set_value(value),
			Self::Select(select) => select.set_value(value),
		}
	}
}

#[instrument(skip_all)]
pub(crate) fn setup(root: &web_sys::Element, scope: &Rc<dyn Scope>, listeners: &mut Listeners) -> Result<Vec<ValueBinding>, Error> {
	let mut bindings = Vec::new();
	for (element, path) in collect::elements(root, BindingKind::Value)? {
		assert_property(scope.as_ref(), &path, BindingKind::Value, &element)?;
		let control = Control::of(&element);

		if let Some(control) = control.clone() {
			let scope = Rc::clone(scope);
			let path = path.clone();
			listeners.add(&element, "input", move |_event| {
				let text = control.value();
				let value = match scope.get(&path) {
					// Numbers stay numbers. A comma is accepted as decimal separator and garbage becomes 0.
					Value::Number(_) => Value::Number(parse_js_number(&text.replacen(',', ".", 1)).unwrap_or(0.0)),
					_ => Value::from(text),
				};
				if cfg!(feature = "dangerous-logging") {
					trace!(path = %path, ?value, "Writing back input.");
				} else {
					trace!(path = %path, "Writing back input.");
				}
				scope.set(&path, value);
				Ok(())
			})?;
		}

		bindings.push(ValueBinding { element, path, control });
	}
	Ok(bindings)
}

pub(crate) fn render(binding: &ValueBinding, scope: &dyn Scope) -> Result<(), Error> {
	let value = scope.get(&binding.path);
	let text = if value.is_nullish() { String::new() } else { value.to_js_string() };
	match &binding.control {
		Some(control) => {
			// Rewriting an unchanged value would reset the caret.
			if control.value() != text {
				control.set_value(&text);
			}
		}
		None => binding.element.set_text_content(Some(&text)),
	}
	if STATIC_MAX_LEVEL >= Level::TRACE && cfg!(feature = "dangerous-logging") {
		trace!(path = %binding.path, %text, "Rendered value.");
	}
	Ok(())
}
