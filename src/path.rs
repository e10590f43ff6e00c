//! Dot-joined property paths (`"user.profile.name"`).
//!
//! There is no indexing syntax: collections are observed as a whole through the name of the property that holds them.

/// The path reported for changes to the root container itself.
///
/// It never matches a binding's path, so the orchestrator treats it as "render everything".
pub const ROOT: &str = "";

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
	path.split('.')
}

/// The first segment and, if present, the remainder after the first dot.
#[must_use]
pub fn split_first(path: &str) -> (&str, Option<&str>) {
	match path.split_once('.') {
		Some((first, rest)) => (first, Some(rest)),
		None => (path, None),
	}
}

/// The parent path and the last segment.
#[must_use]
pub fn split_last(path: &str) -> (Option<&str>, &str) {
	match path.rsplit_once('.') {
		Some((parent, last)) => (Some(parent), last),
		None => (None, path),
	}
}

#[must_use]
pub fn join(parent: Option<&str>, key: &str) -> String {
	match parent {
		Some(parent) if !parent.is_empty() => format!("{}.{}", parent, key),
		_ => key.to_owned(),
	}
}

/// If `path` is `alias` or starts with `alias.`, the part after the alias (`Some("")` for the alias itself).
#[must_use]
pub fn strip_alias<'a>(path: &'a str, alias: &str) -> Option<&'a str> {
	let rest = path.strip_prefix(alias)?;
	if rest.is_empty() {
		Some("")
	} else {
		rest.strip_prefix('.')
	}
}

/// Whether a binding reading `binding_path` must re-render after a change at `changed_path`.
///
/// Matches exact paths, bindings below the changed path and bindings above it.
/// Siblings that only share a prefix (`a.b`/`a.c`, `user`/`username`) do not match.
#[must_use]
pub fn affects(binding_path: &str, changed_path: &str) -> bool {
	binding_path == changed_path || is_strict_extension(binding_path, changed_path) || is_strict_extension(changed_path, binding_path)
}

fn is_strict_extension(path: &str, prefix: &str) -> bool {
	path.strip_prefix(prefix).map_or(false, |rest| rest.starts_with('.'))
}

/// `\w+` without the Unicode flag: ASCII letters, digits and underscores.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
	!text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
