use std::collections::HashMap;
use std::fmt::Display;

use serde::Serialize;

use crate::ReflectError;
use crate::ReflectResult;

/// Structured metadata describing one parsed construct.
///
/// A record is owned by one reflector for the lifetime of a single parse
/// pass. The token range is written exactly once, after the scope scan
/// completes; before that it holds the defaults and must not be relied on.
#[derive(Debug, Clone, Serialize)]
pub struct ReflectionRecord {
	name: String,
	namespace: String,
	namespace_aliases: HashMap<String, String>,
	token_start: usize,
	token_end: usize,
	line_start: usize,
}

impl Default for ReflectionRecord {
	fn default() -> Self {
		Self {
			name: String::from("Unknown"),
			namespace: String::from("default"),
			namespace_aliases: HashMap::new(),
			token_start: 0,
			token_end: 0,
			line_start: 0,
		}
	}
}

impl ReflectionRecord {
	pub fn new() -> Self {
		Self::default()
	}

	/// The construct's name, `"Unknown"` until set.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Set the construct's name. An empty or all-whitespace value is
	/// rejected and the previous name is kept.
	pub fn set_name(&mut self, name: impl Into<String>) -> ReflectResult<()> {
		let name = name.into();

		if name.trim().is_empty() {
			return Err(ReflectError::InvalidArgument {
				field: "name",
				reason: "expected a non-empty string".into(),
			});
		}

		self.name = name;
		Ok(())
	}

	/// The namespace the construct lives in, `"default"` until set.
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Set the construct's namespace. An empty or all-whitespace value is
	/// rejected and the previous namespace is kept.
	pub fn set_namespace(&mut self, namespace: impl Into<String>) -> ReflectResult<()> {
		let namespace = namespace.into();

		if namespace.trim().is_empty() {
			return Err(ReflectError::InvalidArgument {
				field: "namespace",
				reason: "expected a non-empty string".into(),
			});
		}

		self.namespace = namespace;
		Ok(())
	}

	/// The namespace aliases in scope for this construct, mapping alias to
	/// fully qualified name.
	pub fn namespace_aliases(&self) -> &HashMap<String, String> {
		&self.namespace_aliases
	}

	/// Replace the alias map wholesale.
	pub fn set_namespace_aliases(&mut self, aliases: HashMap<String, String>) {
		self.namespace_aliases = aliases;
	}

	/// Register a single alias.
	pub fn add_namespace_alias(&mut self, alias: impl Into<String>, name: impl Into<String>) {
		self.namespace_aliases.insert(alias.into(), name.into());
	}

	/// The index of the first token belonging to this construct.
	pub fn token_start(&self) -> usize {
		self.token_start
	}

	/// The index of the last token belonging to this construct (inclusive).
	pub fn token_end(&self) -> usize {
		self.token_end
	}

	/// The first source line of the construct.
	pub fn line_start(&self) -> usize {
		self.line_start
	}

	pub(crate) fn set_line_start(&mut self, line: usize) {
		self.line_start = line;
	}

	/// Record the construct's token range. Called once per parse pass, after
	/// the scope scan; `token_start <= token_end` always holds afterward.
	pub(crate) fn set_token_range(&mut self, start: usize, end: usize) {
		debug_assert!(start <= end, "scope scan produced an inverted token range");
		self.token_start = start;
		self.token_end = end.max(start);
	}
}

impl Display for ReflectionRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)
	}
}
