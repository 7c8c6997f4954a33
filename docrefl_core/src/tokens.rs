use std::collections::HashMap;
use std::fmt::Display;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Lexical category of a [`Token`].
///
/// The set is fixed and enumerable; [`TokenKind::ALL`] lists every kind in
/// declaration order and is what the handler-name table and per-pass handler
/// tables are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
	/// `function`
	Function,
	/// `class`
	Class,
	/// `interface`
	Interface,
	/// `namespace`
	Namespace,
	/// `use`
	Use,
	/// `as`
	As,
	/// `const`
	Const,
	/// `abstract`
	Abstract,
	/// `final`
	Final,
	/// `static`
	Static,
	/// `public`
	Public,
	/// `private`
	Private,
	/// `protected`
	Protected,
	/// A bare identifier, e.g. `render` or a type name like `string`.
	Identifier,
	/// A `$`-prefixed variable name, e.g. `$view`.
	Variable,
	/// A single- or double-quoted string literal, quotes included.
	QuotedString,
	/// An integer literal, e.g. `123`.
	IntNumber,
	/// A floating point literal, e.g. `123.456`.
	FloatNumber,
	/// The `array` keyword used in type hints and `array(...)` literals.
	ArrayKeyword,
	/// A run of spaces, tabs, and newlines.
	Whitespace,
	/// `// ...` or `/* ... */`
	Comment,
	/// `/** ... */`
	DocComment,
	/// `{`
	OpenBrace,
	/// `}`
	CloseBrace,
	/// `(`
	OpenParen,
	/// `)`
	CloseParen,
	/// `,`
	Comma,
	/// `;`
	Semicolon,
	/// `=`
	Equals,
	/// Any source text the lexer does not classify (operators, stray bytes).
	Other,
}

impl TokenKind {
	/// Every kind, in declaration order.
	pub const ALL: &'static [TokenKind] = &[
		TokenKind::Function,
		TokenKind::Class,
		TokenKind::Interface,
		TokenKind::Namespace,
		TokenKind::Use,
		TokenKind::As,
		TokenKind::Const,
		TokenKind::Abstract,
		TokenKind::Final,
		TokenKind::Static,
		TokenKind::Public,
		TokenKind::Private,
		TokenKind::Protected,
		TokenKind::Identifier,
		TokenKind::Variable,
		TokenKind::QuotedString,
		TokenKind::IntNumber,
		TokenKind::FloatNumber,
		TokenKind::ArrayKeyword,
		TokenKind::Whitespace,
		TokenKind::Comment,
		TokenKind::DocComment,
		TokenKind::OpenBrace,
		TokenKind::CloseBrace,
		TokenKind::OpenParen,
		TokenKind::CloseParen,
		TokenKind::Comma,
		TokenKind::Semicolon,
		TokenKind::Equals,
		TokenKind::Other,
	];

	/// The canonical uppercase name of the kind, carrying the fixed `T_`
	/// prefix shared by every kind.
	pub fn name(self) -> &'static str {
		match self {
			TokenKind::Function => "T_FUNCTION",
			TokenKind::Class => "T_CLASS",
			TokenKind::Interface => "T_INTERFACE",
			TokenKind::Namespace => "T_NAMESPACE",
			TokenKind::Use => "T_USE",
			TokenKind::As => "T_AS",
			TokenKind::Const => "T_CONST",
			TokenKind::Abstract => "T_ABSTRACT",
			TokenKind::Final => "T_FINAL",
			TokenKind::Static => "T_STATIC",
			TokenKind::Public => "T_PUBLIC",
			TokenKind::Private => "T_PRIVATE",
			TokenKind::Protected => "T_PROTECTED",
			TokenKind::Identifier => "T_IDENTIFIER",
			TokenKind::Variable => "T_VARIABLE",
			TokenKind::QuotedString => "T_QUOTED_STRING",
			TokenKind::IntNumber => "T_INT_NUMBER",
			TokenKind::FloatNumber => "T_FLOAT_NUMBER",
			TokenKind::ArrayKeyword => "T_ARRAY",
			TokenKind::Whitespace => "T_WHITESPACE",
			TokenKind::Comment => "T_COMMENT",
			TokenKind::DocComment => "T_DOC_COMMENT",
			TokenKind::OpenBrace => "T_OPEN_BRACE",
			TokenKind::CloseBrace => "T_CLOSE_BRACE",
			TokenKind::OpenParen => "T_OPEN_PAREN",
			TokenKind::CloseParen => "T_CLOSE_PAREN",
			TokenKind::Comma => "T_COMMA",
			TokenKind::Semicolon => "T_SEMICOLON",
			TokenKind::Equals => "T_EQUALS",
			TokenKind::Other => "T_OTHER",
		}
	}

	/// The canonical handler name for this kind: the `T_` prefix is stripped,
	/// each underscore-separated word is capitalized and concatenated, and the
	/// result is prefixed with `process` (`T_OPEN_BRACE` becomes
	/// `processOpenBrace`).
	///
	/// The kind-to-handler-name mapping is a pure function of the kind, so it
	/// is computed once per process over [`TokenKind::ALL`] and shared by
	/// every dispatch pass.
	pub fn handler_name(self) -> &'static str {
		static HANDLER_NAMES: Lazy<HashMap<TokenKind, String>> = Lazy::new(|| {
			TokenKind::ALL
				.iter()
				.map(|kind| (*kind, derive_handler_name(kind.name())))
				.collect()
		});

		&HANDLER_NAMES[&self]
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Derive a handler name from a canonical kind name.
fn derive_handler_name(name: &str) -> String {
	let stripped = name.get(2..).unwrap_or(name);
	let mut handler = String::from("process");

	for word in stripped.split('_') {
		let mut chars = word.chars();
		if let Some(first) = chars.next() {
			handler.extend(first.to_uppercase());
			handler.push_str(chars.as_str().to_lowercase().as_str());
		}
	}

	handler
}

/// A single lexical unit of source text.
///
/// Tokens are produced by the lexer and owned by a
/// [`TokenCursor`](crate::TokenCursor); the reflection core only ever reads
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
	/// The lexical category.
	pub kind: TokenKind,
	/// The raw source text of the token, exactly as written.
	pub content: String,
	/// The 1-based source line the token starts on.
	pub line: usize,
	/// The position of the token in the owning cursor's sequence. Assigned by
	/// the cursor when it takes ownership of the stream.
	pub index: usize,
}

impl Token {
	pub fn new(kind: TokenKind, content: impl Into<String>, line: usize) -> Self {
		Self {
			kind,
			content: content.into(),
			line,
			index: 0,
		}
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.content)
	}
}
