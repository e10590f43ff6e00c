//! Dynamically typed view model data.
//!
//! [`Value`] mirrors the shapes a view model can hold: primitives plus shared, interior-mutable
//! [`Array`]s and [`Object`]s. Containers have identity (like JavaScript objects), which is what the
//! [reactive layer](crate::reactive) keys its cache on and what [`Value::strict_eq`] compares.
//!
//! The coercion helpers ([`Value::is_truthy`], [`Value::to_js_string`]) follow the rules of
//! [***Boolean***](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Boolean)
//! and [***String***](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String)
//! conversion, since that is what markup authors expect to see rendered.

use core::{cell::RefCell, cmp::Ordering, fmt};
use hashbrown::HashSet;
use std::rc::{Rc, Weak};

#[derive(Clone, Default)]
pub enum Value {
	#[default]
	Undefined,
	Null,
	Bool(bool),
	Number(f64),
	String(Rc<str>),
	Array(Array),
	Object(Object),
}

/// A shared, ordered string-keyed record.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<Vec<(String, Value)>>>);

/// A shared list of values.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

#[derive(Clone)]
pub(crate) enum WeakContainer {
	Object(Weak<RefCell<Vec<(String, Value)>>>),
	Array(Weak<RefCell<Vec<Value>>>),
}

impl Value {
	#[must_use]
	pub fn is_nullish(&self) -> bool {
		matches!(self, Self::Undefined | Self::Null)
	}

	/// `Boolean(value)`.
	#[must_use]
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Undefined | Self::Null => false,
			Self::Bool(b) => *b,
			Self::Number(n) => *n != 0.0 && !n.is_nan(),
			Self::String(s) => !s.is_empty(),
			Self::Array(_) | Self::Object(_) => true,
		}
	}

	/// `a === b`: primitives by value (`NaN` is unequal to itself), containers by identity.
	#[must_use]
	#[allow(clippy::float_cmp)]
	pub fn strict_eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b,
			(Self::String(a), Self::String(b)) => a == b,
			(Self::Array(a), Self::Array(b)) => a.ptr_eq(b),
			(Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
			_ => false,
		}
	}

	#[must_use]
	pub fn type_of(&self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Object(_) => "object",
		}
	}

	#[must_use]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_array(&self) -> Option<&Array> {
		match self {
			Self::Array(array) => Some(array),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}

	/// Identity of a container value, [`None`] for primitives.
	#[must_use]
	pub fn id(&self) -> Option<usize> {
		match self {
			Self::Array(array) => Some(array.id()),
			Self::Object(object) => Some(object.id()),
			_ => None,
		}
	}

	/// `String(value)`.
	#[must_use]
	pub fn to_js_string(&self) -> String {
		let mut out = String::new();
		self.write_js_string(&mut out, &mut HashSet::new());
		out
	}

	fn write_js_string(&self, out: &mut String, visiting: &mut HashSet<usize>) {
		match self {
			Self::Undefined => out.push_str("undefined"),
			Self::Null => out.push_str("null"),
			Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
			Self::Number(n) => out.push_str(&number_to_js_string(*n)),
			Self::String(s) => out.push_str(s),
			Self::Object(_) => out.push_str("[object Object]"),
			Self::Array(array) => {
				// `Array.prototype.join` renders revisited arrays and nullish items as empty strings.
				if !visiting.insert(array.id()) {
					return;
				}
				for (i, item) in array.to_vec().iter().enumerate() {
					if i > 0 {
						out.push(',');
					}
					if !item.is_nullish() {
						item.write_js_string(out, visiting);
					}
				}
				visiting.remove(&array.id());
			}
		}
	}

	/// Reads a single property the way a JavaScript member access would.
	///
	/// Arrays expose their indices and `length`, strings expose `length`. Anything missing is [`Value::Undefined`].
	#[must_use]
	#[allow(clippy::cast_precision_loss)]
	pub fn get_key(&self, key: &str) -> Value {
		match self {
			Self::Object(object) => object.get(key).unwrap_or_default(),
			Self::Array(array) => {
				if key == "length" {
					return Value::Number(array.len() as f64);
				}
				array_index(key).and_then(|i| array.get(i)).unwrap_or_default()
			}
			Self::String(s) if key == "length" => Value::Number(s.encode_utf16().count() as f64),
			_ => Value::Undefined,
		}
	}

	#[must_use]
	pub fn has_key(&self, key: &str) -> bool {
		match self {
			Self::Object(object) => object.contains_key(key),
			Self::Array(array) => key == "length" || array_index(key).map_or(false, |i| i < array.len()),
			Self::String(_) => key == "length",
			_ => false,
		}
	}

	/// Resolves a dotted property path. Traversal through a nullish or missing segment yields [`Value::Undefined`].
	#[must_use]
	pub fn get_path(&self, path: &str) -> Value {
		let mut current = self.clone();
		for segment in crate::path::segments(path) {
			if current.is_nullish() {
				return Value::Undefined;
			}
			current = current.get_key(segment);
		}
		current
	}

	/// Whether every segment of `path` exists. Intermediate segments must be non-nullish; the last one only has to be present.
	#[must_use]
	pub fn has_path(&self, path: &str) -> bool {
		let mut current = self.clone();
		let mut segments = crate::path::segments(path).peekable();
		while let Some(segment) = segments.next() {
			if current.is_nullish() || !current.has_key(segment) {
				return false;
			}
			current = current.get_key(segment);
			if segments.peek().is_some() && current.is_nullish() {
				return false;
			}
		}
		true
	}

	pub(crate) fn downgrade(&self) -> Option<WeakContainer> {
		match self {
			Self::Array(array) => Some(WeakContainer::Array(Rc::downgrade(&array.0))),
			Self::Object(object) => Some(object.downgrade()),
			_ => None,
		}
	}

	fn fmt_debug(&self, f: &mut fmt::Formatter<'_>, visiting: &mut HashSet<usize>) -> fmt::Result {
		match self {
			Self::Undefined => f.write_str("undefined"),
			Self::Null => f.write_str("null"),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Number(n) => f.write_str(&number_to_js_string(*n)),
			Self::String(s) => write!(f, "{:?}", s),
			Self::Array(array) => {
				if !visiting.insert(array.id()) {
					return f.write_str("[Circular]");
				}
				f.write_str("[")?;
				for (i, item) in array.to_vec().iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					item.fmt_debug(f, visiting)?;
				}
				visiting.remove(&array.id());
				f.write_str("]")
			}
			Self::Object(object) => {
				if !visiting.insert(object.id()) {
					return f.write_str("[Circular]");
				}
				f.write_str("{")?;
				for (i, (key, item)) in object.entries().iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}: ", key)?;
					item.fmt_debug(f, visiting)?;
				}
				visiting.remove(&object.id());
				f.write_str("}")
			}
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.fmt_debug(f, &mut HashSet::new())
	}
}

/// `Number.prototype.toString()`: shortest round-trip digits, in exponent notation outside `1e-7 < |n| < 1e21`.
#[must_use]
pub fn number_to_js_string(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_owned()
	} else if n.is_infinite() {
		if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
	} else if n == 0.0 {
		// Covers `-0`.
		"0".to_owned()
	} else if n < 0.0 {
		format!("-{}", finite_to_js_string(-n))
	} else {
		finite_to_js_string(n)
	}
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn finite_to_js_string(n: f64) -> String {
	// `{:e}` yields the shortest digits that round-trip, e.g. `1.2345e3`.
	let scientific = format!("{:e}", n);
	let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
	let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
	let len = digits.len() as i32;
	// Digits before the decimal point.
	let point = exponent.parse::<i32>().unwrap_or(0) + 1;

	if len <= point && point <= 21 {
		digits + &"0".repeat((point - len) as usize)
	} else if 0 < point && point <= 21 {
		let (whole, fraction) = digits.split_at(point as usize);
		format!("{}.{}", whole, fraction)
	} else if -6 < point && point <= 0 {
		format!("0.{}{}", "0".repeat(-point as usize), digits)
	} else {
		let (first, rest) = digits.split_at(1);
		let sign = if point > 0 { '+' } else { '-' };
		let separator = if rest.is_empty() { "" } else { "." };
		format!("{}{}{}e{}{}", first, separator, rest, sign, (point - 1).abs())
	}
}

/// `Number(text)`, returning [`None`] where JavaScript would produce `NaN`.
#[must_use]
pub fn parse_js_number(text: &str) -> Option<f64> {
	let text = text.trim();
	if text.is_empty() {
		return Some(0.0);
	}
	match text {
		"Infinity" | "+Infinity" => return Some(f64::INFINITY),
		"-Infinity" => return Some(f64::NEG_INFINITY),
		_ => (),
	}
	let radix = match text.get(..2) {
		Some("0x" | "0X") => Some(16),
		Some("0o" | "0O") => Some(8),
		Some("0b" | "0B") => Some(2),
		_ => None,
	};
	if let Some(radix) = radix {
		let digits = &text[2..];
		if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
			return None;
		}
		return Some(digits.chars().fold(0.0, |n, c| n * f64::from(radix) + c.to_digit(radix).map_or(0.0, f64::from)));
	}
	// Rust also accepts spellings such as "inf" and "NaN" that JavaScript rejects.
	if text.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
		return None;
	}
	text.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// The highest index a JavaScript array can hold.
pub const MAX_ARRAY_INDEX: usize = 4_294_967_294;

/// How many holes a single write may open past the end of an [`Array`].
pub const MAX_SPARSE_GAP: usize = 1 << 16;

/// `key` as an array index: canonical decimal (no sign, no leading zeros) and at most [`MAX_ARRAY_INDEX`].
#[must_use]
pub fn array_index(key: &str) -> Option<usize> {
	let index = key.parse::<usize>().ok().filter(|&index| index <= MAX_ARRAY_INDEX)?;
	(index.to_string() == key).then_some(index)
}

impl Object {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<Value> {
		self.0.borrow().iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
	}

	#[must_use]
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.borrow().iter().any(|(k, _)| k == key)
	}

	/// Inserts or replaces `key`, keeping the position of an existing key. Returns the previous value.
	pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		let key = key.into();
		let value = value.into();
		let mut entries = self.0.borrow_mut();
		match entries.iter_mut().find(|(k, _)| *k == key) {
			Some((_, slot)) => Some(core::mem::replace(slot, value)),
			None => {
				entries.push((key, value));
				None
			}
		}
	}

	pub fn remove(&self, key: &str) -> Option<Value> {
		let mut entries = self.0.borrow_mut();
		let index = entries.iter().position(|(k, _)| k == key)?;
		Some(entries.remove(index).1)
	}

	#[must_use]
	pub fn keys(&self) -> Vec<String> {
		self.0.borrow().iter().map(|(k, _)| k.clone()).collect()
	}

	/// A snapshot of the entries in insertion order.
	#[must_use]
	pub fn entries(&self) -> Vec<(String, Value)> {
		self.0.borrow().clone()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.borrow().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.borrow().is_empty()
	}

	#[must_use]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	#[must_use]
	pub fn id(&self) -> usize {
		Rc::as_ptr(&self.0) as *const () as usize
	}

	pub(crate) fn downgrade(&self) -> WeakContainer {
		WeakContainer::Object(Rc::downgrade(&self.0))
	}
}

impl Array {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<Value> {
		self.0.borrow().get(index).cloned()
	}

	/// Writes `index`, padding with [`Value::Undefined`] like a sparse JavaScript array would read back.
	///
	/// Returns the previous value, or [`None`] without writing if `index` lies more than [`MAX_SPARSE_GAP`] past
	/// the end or beyond [`MAX_ARRAY_INDEX`].
	pub fn set(&self, index: usize, value: impl Into<Value>) -> Option<Value> {
		let mut items = self.0.borrow_mut();
		if index >= items.len() {
			if index > MAX_ARRAY_INDEX || index - items.len() > MAX_SPARSE_GAP {
				return None;
			}
			items.resize(index.checked_add(1)?, Value::Undefined);
		}
		Some(core::mem::replace(&mut items[index], value.into()))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.borrow().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.borrow().is_empty()
	}

	/// Appends `values` and returns the new length.
	pub fn push(&self, values: impl IntoIterator<Item = Value>) -> usize {
		let mut items = self.0.borrow_mut();
		items.extend(values);
		items.len()
	}

	pub fn pop(&self) -> Option<Value> {
		self.0.borrow_mut().pop()
	}

	pub fn shift(&self) -> Option<Value> {
		let mut items = self.0.borrow_mut();
		if items.is_empty() {
			None
		} else {
			Some(items.remove(0))
		}
	}

	/// Prepends `values` (keeping their order) and returns the new length.
	pub fn unshift(&self, values: impl IntoIterator<Item = Value>) -> usize {
		let mut items = self.0.borrow_mut();
		let tail = core::mem::take(&mut *items);
		items.extend(values);
		items.extend(tail);
		items.len()
	}

	/// Removes `delete_count` items at `start` (both clamped), inserts `values` there and returns the removed items.
	pub fn splice(&self, start: usize, delete_count: usize, values: impl IntoIterator<Item = Value>) -> Vec<Value> {
		let mut items = self.0.borrow_mut();
		let start = start.min(items.len());
		let end = start.saturating_add(delete_count).min(items.len());
		items.splice(start..end, values).collect()
	}

	/// Sorts with `compare`. The comparator may read this array: it runs on a detached copy.
	pub fn sort_by(&self, mut compare: impl FnMut(&Value, &Value) -> Ordering) {
		let mut items = self.to_vec();
		items.sort_by(|a, b| compare(a, b));
		*self.0.borrow_mut() = items;
	}

	/// `Array.prototype.sort()` without a comparator: by string conversion, `undefined` last.
	pub fn sort(&self) {
		self.sort_by(|a, b| match (a, b) {
			(Value::Undefined, Value::Undefined) => Ordering::Equal,
			(Value::Undefined, _) => Ordering::Greater,
			(_, Value::Undefined) => Ordering::Less,
			_ => a.to_js_string().encode_utf16().cmp(b.to_js_string().encode_utf16()),
		});
	}

	pub fn reverse(&self) {
		self.0.borrow_mut().reverse();
	}

	/// A snapshot of the items.
	#[must_use]
	pub fn to_vec(&self) -> Vec<Value> {
		self.0.borrow().clone()
	}

	#[must_use]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	#[must_use]
	pub fn id(&self) -> usize {
		Rc::as_ptr(&self.0) as *const () as usize
	}
}

impl WeakContainer {
	pub(crate) fn upgrade(&self) -> Option<Value> {
		match self {
			Self::Object(weak) => weak.upgrade().map(|rc| Value::Object(Object(rc))),
			Self::Array(weak) => weak.upgrade().map(|rc| Value::Array(Array(rc))),
		}
	}

	pub(crate) fn is_alive(&self) -> bool {
		match self {
			Self::Object(weak) => weak.strong_count() > 0,
			Self::Array(weak) => weak.strong_count() > 0,
		}
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&Value::Object(self.clone()), f)
	}
}

impl fmt::Debug for Array {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&Value::Array(self.clone()), f)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let object = Self::new();
		for (key, value) in iter {
			object.insert(key, value);
		}
		object
	}
}

impl<V: Into<Value>> FromIterator<V> for Array {
	fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
		Self(Rc::new(RefCell::new(iter.into_iter().map(Into::into).collect())))
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Number(value.into())
	}
}

impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Self::Number(value.into())
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into())
	}
}

impl From<Array> for Value {
	fn from(value: Array) -> Self {
		Self::Array(value)
	}
}

impl From<Object> for Value {
	fn from(value: Object) -> Self {
		Self::Object(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value.into_iter().collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn item(text: &str) -> Value {
		Object::from_iter([("text", text)]).into()
	}

	#[test]
	fn truthiness_follows_boolean_coercion() {
		assert!(!Value::Undefined.is_truthy());
		assert!(!Value::Null.is_truthy());
		assert!(!Value::from(0).is_truthy());
		assert!(!Value::from(f64::NAN).is_truthy());
		assert!(!Value::from("").is_truthy());
		assert!(Value::from(1).is_truthy());
		assert!(Value::from("0").is_truthy());
		assert!(Value::from(Array::new()).is_truthy());
		assert!(Value::from(Object::new()).is_truthy());
	}

	#[test]
	fn strict_equality_compares_containers_by_identity() {
		let a = Object::new();
		assert!(Value::from(a.clone()).strict_eq(&Value::from(a)));
		assert!(!Value::from(Object::new()).strict_eq(&Value::from(Object::new())));
		assert!(Value::from("x").strict_eq(&Value::from("x")));
		assert!(!Value::from(f64::NAN).strict_eq(&Value::from(f64::NAN)));
		assert!(!Value::from(1).strict_eq(&Value::from("1")));
	}

	#[test]
	fn stringifies_like_javascript() {
		assert_eq!(Value::from(3).to_js_string(), "3");
		assert_eq!(Value::from(1.5).to_js_string(), "1.5");
		assert_eq!(Value::from(-0.0).to_js_string(), "0");
		assert_eq!(Value::from(f64::INFINITY).to_js_string(), "Infinity");
		assert_eq!(Value::Null.to_js_string(), "null");
		assert_eq!(Value::from(Object::new()).to_js_string(), "[object Object]");
		let array: Array = [Value::from(1), Value::Null, Value::from("b")].into_iter().collect();
		assert_eq!(Value::from(array).to_js_string(), "1,,b");
	}

	#[test]
	fn parses_numbers_like_javascript() {
		assert_eq!(parse_js_number(""), Some(0.0));
		assert_eq!(parse_js_number(" 12.5 "), Some(12.5));
		assert_eq!(parse_js_number("1e3"), Some(1000.0));
		assert_eq!(parse_js_number("abc"), None);
		assert_eq!(parse_js_number("inf"), None);
		assert_eq!(parse_js_number("NaN"), None);
		assert_eq!(parse_js_number("0x10"), Some(16.0));
		assert_eq!(parse_js_number("0B101"), Some(5.0));
		assert_eq!(parse_js_number("0o17"), Some(15.0));
		assert_eq!(parse_js_number("0x"), None);
		assert_eq!(parse_js_number("-0x10"), None);
		assert_eq!(parse_js_number("0b12"), None);
	}

	#[test]
	fn large_and_small_numbers_use_exponent_notation() {
		assert_eq!(number_to_js_string(1e21), "1e+21");
		assert_eq!(number_to_js_string(1.5e300), "1.5e+300");
		assert_eq!(number_to_js_string(1e20), "100000000000000000000");
		assert_eq!(number_to_js_string(123_456.0), "123456");
		assert_eq!(number_to_js_string(0.5), "0.5");
		assert_eq!(number_to_js_string(0.000_001), "0.000001");
		assert_eq!(number_to_js_string(1e-7), "1e-7");
		assert_eq!(number_to_js_string(-2.5e-8), "-2.5e-8");
		assert_eq!(number_to_js_string(-42.25), "-42.25");
	}

	#[test]
	fn array_indices_are_canonical_and_bounded() {
		assert_eq!(array_index("0"), Some(0));
		assert_eq!(array_index("4294967294"), Some(MAX_ARRAY_INDEX));
		assert_eq!(array_index("4294967295"), None);
		assert_eq!(array_index("18446744073709551615"), None);
		assert_eq!(array_index("01"), None);
		assert_eq!(array_index("+1"), None);
		assert_eq!(array_index("length"), None);
	}

	#[test]
	fn far_sparse_writes_are_refused() {
		let array: Array = [1, 2].into_iter().collect();
		assert!(array.set(usize::MAX, 0).is_none());
		assert!(array.set(2 + MAX_SPARSE_GAP + 1, 0).is_none());
		assert_eq!(array.len(), 2);

		assert!(matches!(array.set(4, 5), Some(Value::Undefined)));
		assert_eq!(array.len(), 5);
		assert!(array.get(3).map_or(false, |hole| matches!(hole, Value::Undefined)));
	}

	#[test]
	fn nested_paths() {
		let profile = Object::from_iter([("name", Value::from("Ada")), ("nickname", Value::Null)]);
		let user = Object::from_iter([("profile", Value::from(profile))]);
		let root = Value::from(Object::from_iter([("user", Value::from(user)), ("none", Value::Null)]));

		assert_eq!(root.get_path("user.profile.name").as_str(), Some("Ada"));
		assert!(root.get_path("user.missing.name").is_nullish());
		assert!(root.has_path("user.profile.name"));
		assert!(root.has_path("user.profile.nickname"));
		assert!(!root.has_path("user.profile.nickname.first"));
		assert!(!root.has_path("none.field"));
		assert!(!root.has_path("user.age"));
	}

	#[test]
	fn arrays_expose_length_and_indices() {
		let items: Array = [item("a"), item("b")].into_iter().collect();
		let root = Value::from(Object::from_iter([("items", Value::from(items))]));
		assert_eq!(root.get_path("items.length").as_f64(), Some(2.0));
		assert_eq!(root.get_path("items.1.text").as_str(), Some("b"));
		assert!(root.has_path("items.0.text"));
		assert!(!root.has_path("items.2"));
	}

	#[test]
	fn object_keeps_insertion_order() {
		let object = Object::new();
		object.insert("b", 1);
		object.insert("a", 2);
		object.insert("b", 3);
		assert_eq!(object.keys(), ["b", "a"]);
		assert_eq!(object.get("b").and_then(|v| v.as_f64()), Some(3.0));
		assert_eq!(object.remove("b").and_then(|v| v.as_f64()), Some(3.0));
		assert_eq!(object.keys(), ["a"]);
	}

	#[test]
	fn array_mutators() {
		let array: Array = [1, 2, 3].into_iter().collect();
		assert_eq!(array.unshift([Value::from(0)]), 4);
		let removed = array.splice(1, 2, [Value::from(9)]);
		assert_eq!(removed.len(), 2);
		assert_eq!(Value::from(array.clone()).to_js_string(), "0,9,3");
		array.sort();
		assert_eq!(Value::from(array.clone()).to_js_string(), "0,3,9");
		array.reverse();
		assert_eq!(Value::from(array.clone()).to_js_string(), "9,3,0");
		assert_eq!(array.shift().and_then(|v| v.as_f64()), Some(9.0));
		assert_eq!(array.pop().and_then(|v| v.as_f64()), Some(0.0));
	}

	#[test]
	fn debug_output_survives_cycles() {
		let object = Object::new();
		object.insert("self", object.clone());
		assert_eq!(format!("{:?}", object), "{self: [Circular]}");
	}
}
