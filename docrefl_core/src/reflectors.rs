//! Concrete construct reflectors built on the dispatch engine.

use derive_more::Deref;
use derive_more::DerefMut;
use tracing::debug;
use xmltree::Element;
use xmltree::XMLNode;

use crate::ReflectResult;
use crate::cursor::TokenCursor;
use crate::dispatch::Handler;
use crate::dispatch::HandlerTable;
use crate::dispatch::Reflect;
use crate::dispatch::parse;
use crate::dispatch::walk_block_scope;
use crate::merge::merge_element;
use crate::record::ReflectionRecord;
use crate::resolver;
use crate::resolver::Visibility;
use crate::tokens::TokenKind;

/// Reflects a single parameter of a function or method declaration: the
/// variable name, plus the declared type and default value recovered from
/// the surrounding token window.
///
/// The scope is the default single token, so parsing an argument never moves
/// the cursor.
#[derive(Debug, Default, Deref, DerefMut)]
pub struct ArgumentReflector {
	#[deref]
	#[deref_mut]
	record: ReflectionRecord,
	declared_type: Option<String>,
	default_value: Option<String>,
}

impl ArgumentReflector {
	pub fn new() -> Self {
		Self::default()
	}

	/// The declared type of the parameter, if the declaration carries one.
	pub fn declared_type(&self) -> Option<&str> {
		self.declared_type.as_deref()
	}

	/// The default value of the parameter, quotes trimmed, if present.
	pub fn default_value(&self) -> Option<&str> {
		self.default_value.as_deref()
	}
}

impl Reflect for ArgumentReflector {
	fn process_generic_information(&mut self, cursor: &mut TokenCursor) -> ReflectResult<()> {
		if let Some(token) = cursor.current() {
			let name = token.content.clone();
			self.set_name(name)?;
		}

		self.declared_type = resolver::declared_type(cursor);
		self.default_value = resolver::default_value(cursor);

		Ok(())
	}

	fn to_xml(&self) -> Element {
		let mut element = Element::new("argument");
		element
			.attributes
			.insert("line".to_string(), self.line_start().to_string());
		element.children.push(text_node("name", self.name()));

		if let Some(declared_type) = &self.declared_type {
			element.children.push(text_node("type", declared_type));
		}

		if let Some(default_value) = &self.default_value {
			element.children.push(text_node("default", default_value));
		}

		element
	}
}

/// Reflects a class property declaration: name, visibility, `static` flag,
/// and default value. The scope runs from the property variable to the
/// terminating semicolon.
#[derive(Debug, Default, Deref, DerefMut)]
pub struct PropertyReflector {
	#[deref]
	#[deref_mut]
	record: ReflectionRecord,
	visibility: Visibility,
	is_static: bool,
	default_value: Option<String>,
}

impl PropertyReflector {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn visibility(&self) -> Visibility {
		self.visibility
	}

	pub fn is_static(&self) -> bool {
		self.is_static
	}

	pub fn default_value(&self) -> Option<&str> {
		self.default_value.as_deref()
	}
}

impl Reflect for PropertyReflector {
	fn process_generic_information(&mut self, cursor: &mut TokenCursor) -> ReflectResult<()> {
		if let Some(token) = cursor.current() {
			let name = token.content.clone();
			self.set_name(name)?;
		}

		self.visibility = resolver::visibility(cursor);
		self.is_static = resolver::find_static(cursor).is_some();
		self.default_value = resolver::default_value(cursor);

		Ok(())
	}

	fn walk_scope(
		&mut self,
		cursor: &mut TokenCursor,
		handlers: &HandlerTable<Self>,
	) -> ReflectResult<(usize, usize)> {
		walk_block_scope(self, cursor, handlers)
	}

	fn to_xml(&self) -> Element {
		let mut element = Element::new("property");
		element
			.attributes
			.insert("line".to_string(), self.line_start().to_string());
		element
			.attributes
			.insert("visibility".to_string(), self.visibility.to_string());
		element
			.attributes
			.insert("static".to_string(), self.is_static.to_string());
		element.children.push(text_node("name", self.name()));

		if let Some(default_value) = &self.default_value {
			element.children.push(text_node("default", default_value));
		}

		element
	}
}

/// Reflects a function or method declaration: name, modifiers, and the
/// parameter list, each parameter sub-parsed with an [`ArgumentReflector`].
///
/// The scope is the whole declaration, signature and body, up to the close
/// brace matching the body's open brace (or the semicolon terminating a
/// body-less declaration). Visibility and the `abstract`/`final`/`static`
/// flags are meaningful when the function is a method; for a free function
/// they stay at their defaults.
#[derive(Debug, Deref, DerefMut)]
pub struct FunctionReflector {
	#[deref]
	#[deref_mut]
	record: ReflectionRecord,
	visibility: Visibility,
	is_abstract: bool,
	is_final: bool,
	is_static: bool,
	in_signature: bool,
	arguments: Vec<ArgumentReflector>,
}

impl Default for FunctionReflector {
	fn default() -> Self {
		Self {
			record: ReflectionRecord::default(),
			visibility: Visibility::default(),
			is_abstract: false,
			is_final: false,
			is_static: false,
			in_signature: true,
			arguments: Vec::new(),
		}
	}
}

impl FunctionReflector {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn visibility(&self) -> Visibility {
		self.visibility
	}

	pub fn is_abstract(&self) -> bool {
		self.is_abstract
	}

	pub fn is_final(&self) -> bool {
		self.is_final
	}

	pub fn is_static(&self) -> bool {
		self.is_static
	}

	pub fn arguments(&self) -> &[ArgumentReflector] {
		&self.arguments
	}

	/// A parameter token in the signature: sub-parse it with an
	/// [`ArgumentReflector`]. Variables in the body hit this handler too and
	/// are ignored.
	fn process_variable(&mut self, cursor: &mut TokenCursor) -> ReflectResult<()> {
		if !self.in_signature {
			return Ok(());
		}

		let mut argument = ArgumentReflector::new();
		parse(&mut argument, cursor)?;
		debug!(name = argument.name(), "reflected argument");
		self.arguments.push(argument);

		Ok(())
	}

	/// The body's open brace ends the signature; parameters cannot appear
	/// past it.
	fn process_open_brace(&mut self, _cursor: &mut TokenCursor) -> ReflectResult<()> {
		self.in_signature = false;

		Ok(())
	}
}

impl Reflect for FunctionReflector {
	fn process_generic_information(&mut self, cursor: &mut TokenCursor) -> ReflectResult<()> {
		// The cursor sits on the `function` keyword; the name is the
		// identifier before the parameter list.
		if let Some(token) = cursor.find_next_by_kind(
			TokenKind::Identifier,
			resolver::LOOKUP_WINDOW,
			&[TokenKind::OpenParen],
		) {
			let name = token.content.clone();
			self.set_name(name)?;
		}

		self.visibility = resolver::visibility(cursor);
		self.is_abstract = resolver::find_abstract(cursor).is_some();
		self.is_final = resolver::find_final(cursor).is_some();
		self.is_static = resolver::find_static(cursor).is_some();

		Ok(())
	}

	fn handler(kind: TokenKind) -> Option<Handler<Self>> {
		match kind {
			TokenKind::Variable => Some(Self::process_variable),
			TokenKind::OpenBrace => Some(Self::process_open_brace),
			_ => None,
		}
	}

	fn walk_scope(
		&mut self,
		cursor: &mut TokenCursor,
		handlers: &HandlerTable<Self>,
	) -> ReflectResult<(usize, usize)> {
		walk_block_scope(self, cursor, handlers)
	}

	fn to_xml(&self) -> Element {
		let mut element = Element::new("function");
		element
			.attributes
			.insert("line".to_string(), self.line_start().to_string());
		element
			.attributes
			.insert("namespace".to_string(), self.namespace().to_string());
		element
			.attributes
			.insert("visibility".to_string(), self.visibility.to_string());
		element
			.attributes
			.insert("abstract".to_string(), self.is_abstract.to_string());
		element
			.attributes
			.insert("final".to_string(), self.is_final.to_string());
		element
			.attributes
			.insert("static".to_string(), self.is_static.to_string());
		element.children.push(text_node("name", self.name()));

		for argument in &self.arguments {
			merge_element(&mut element, &argument.to_xml());
		}

		element
	}
}

fn text_node(name: &str, text: &str) -> XMLNode {
	let mut element = Element::new(name);
	element.children.push(XMLNode::Text(text.to_string()));

	XMLNode::Element(element)
}
