//! `bind-class`: static classes from the markup followed by classes derived from the bound value.

use super::collect;
use crate::{
	error::{BindingKind, Error},
	scope::Scope,
	validation::assert_property,
	value::Value,
};
use tracing::instrument;

#[derive(Debug)]
pub(crate) struct ClassBinding {
	pub element: web_sys::Element,
	pub path: String,
	static_classes: String,
}

#[instrument(skip_all)]
pub(crate) fn setup(root: &web_sys::Element, scope: &dyn Scope) -> Result<Vec<ClassBinding>, Error> {
	collect::elements(root, BindingKind::Class)?
		.into_iter()
		.map(|(element, path)| {
			assert_property(scope, &path, BindingKind::Class, &element)?;
			let static_classes = element.get_attribute("class").unwrap_or_default().trim().to_owned();
			Ok(ClassBinding { element, path, static_classes })
		})
		.collect()
}

pub(crate) fn render(binding: &ClassBinding, scope: &dyn Scope) -> Result<(), Error> {
	let classes = class_name(&binding.static_classes, &scope.get(&binding.path));
	binding.element.set_attribute("class", &classes).map_err(Error::dom("setAttribute"))
}

/// A string is used verbatim, arrays contribute their truthy entries and objects the keys of their truthy values.
fn dynamic_classes(value: &Value) -> String {
	match value {
		Value::String(classes) => classes.to_string(),
		Value::Array(array) => array.to_vec().iter().filter(|entry| entry.is_truthy()).map(Value::to_js_string).collect::<Vec<_>>().join(" "),
		Value::Object(object) => object.entries().into_iter().filter(|(_, enabled)| enabled.is_truthy()).map(|(name, _)| name).collect::<Vec<_>>().join(" "),
		_ => String::new(),
	}
}

fn class_name(static_classes: &str, value: &Value) -> String {
	let dynamic = dynamic_classes(value);
	[static_classes, dynamic.as_str()].iter().filter(|part| !part.is_empty()).copied().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Array, Object};

	#[test]
	fn static_classes_come_first() {
		let flags = Object::from_iter([("active", true), ("hidden", false)]);
		assert_eq!(class_name("card selected", &flags.into()), "card selected active");
	}

	#[test]
	fn value_shapes() {
		let list: Array = [Value::from("a"), Value::Null, Value::from(""), Value::from("b"), Value::from(0)].into_iter().collect();
		assert_eq!(class_name("", &list.into()), "a b");
		assert_eq!(class_name("x", &Value::from("y z")), "x y z");
		assert_eq!(class_name("x", &Value::from("")), "x");
		assert_eq!(class_name("x", &Value::from(1)), "x");
		assert_eq!(class_name("", &Value::Undefined), "");
	}
}
