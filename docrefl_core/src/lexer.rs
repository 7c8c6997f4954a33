use logos::Logos;

use crate::tokens::Token;
use crate::tokens::TokenKind;

/// Raw tokens produced by logos for flat tokenization of source text.
///
/// Nothing is skipped: whitespace and comments become tokens too, since the
/// attribute lookups count them as steps in their bounded search windows.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
	#[token("function")]
	Function,
	#[token("class")]
	Class,
	#[token("interface")]
	Interface,
	#[token("namespace")]
	Namespace,
	#[token("use")]
	Use,
	#[token("as")]
	As,
	#[token("const")]
	Const,
	#[token("abstract")]
	Abstract,
	#[token("final")]
	Final,
	#[token("static")]
	Static,
	#[token("public")]
	Public,
	#[token("private")]
	Private,
	#[token("protected")]
	Protected,
	#[token("array")]
	ArrayKeyword,
	#[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
	Variable,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
	Identifier,
	#[regex(r#""([^"\\]|\\.)*""#)]
	DoubleQuotedString,
	#[regex(r"'([^'\\]|\\.)*'")]
	SingleQuotedString,
	#[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
	FloatNumber,
	#[regex(r"[0-9]+")]
	IntNumber,
	#[regex(r"/\*\*([^*]|\*+[^*/])*\*+/", priority = 6)]
	DocComment,
	#[regex(r"/\*([^*]|\*+[^*/])*\*+/", priority = 5)]
	BlockComment,
	#[regex(r"//[^\n]*", allow_greedy = true)]
	LineComment,
	#[regex(r"[ \t\r\n]+")]
	Whitespace,
	#[token("{")]
	OpenBrace,
	#[token("}")]
	CloseBrace,
	#[token("(")]
	OpenParen,
	#[token(")")]
	CloseParen,
	#[token(",")]
	Comma,
	#[token(";")]
	Semicolon,
	#[token("=")]
	Equals,
}

impl From<RawToken> for TokenKind {
	fn from(raw: RawToken) -> Self {
		match raw {
			RawToken::Function => TokenKind::Function,
			RawToken::Class => TokenKind::Class,
			RawToken::Interface => TokenKind::Interface,
			RawToken::Namespace => TokenKind::Namespace,
			RawToken::Use => TokenKind::Use,
			RawToken::As => TokenKind::As,
			RawToken::Const => TokenKind::Const,
			RawToken::Abstract => TokenKind::Abstract,
			RawToken::Final => TokenKind::Final,
			RawToken::Static => TokenKind::Static,
			RawToken::Public => TokenKind::Public,
			RawToken::Private => TokenKind::Private,
			RawToken::Protected => TokenKind::Protected,
			RawToken::ArrayKeyword => TokenKind::ArrayKeyword,
			RawToken::Variable => TokenKind::Variable,
			RawToken::Identifier => TokenKind::Identifier,
			RawToken::DoubleQuotedString | RawToken::SingleQuotedString => TokenKind::QuotedString,
			RawToken::FloatNumber => TokenKind::FloatNumber,
			RawToken::IntNumber => TokenKind::IntNumber,
			RawToken::DocComment => TokenKind::DocComment,
			RawToken::BlockComment | RawToken::LineComment => TokenKind::Comment,
			RawToken::Whitespace => TokenKind::Whitespace,
			RawToken::OpenBrace => TokenKind::OpenBrace,
			RawToken::CloseBrace => TokenKind::CloseBrace,
			RawToken::OpenParen => TokenKind::OpenParen,
			RawToken::CloseParen => TokenKind::CloseParen,
			RawToken::Comma => TokenKind::Comma,
			RawToken::Semicolon => TokenKind::Semicolon,
			RawToken::Equals => TokenKind::Equals,
		}
	}
}

/// Tokenize raw source text into the flat token stream a
/// [`TokenCursor`](crate::TokenCursor) is built from.
///
/// Unclassified source text becomes [`TokenKind::Other`] tokens rather than
/// an error; malformed input yields a best-effort stream, never a failure.
pub(crate) fn tokenize(source: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	let mut line = 1;

	for (result, span) in RawToken::lexer(source).spanned() {
		let slice = &source[span];
		let kind = match result {
			Ok(raw) => TokenKind::from(raw),
			Err(()) => TokenKind::Other,
		};

		tokens.push(Token::new(kind, slice, line));
		line += slice.bytes().filter(|byte| *byte == b'\n').count();
	}

	tokens
}
