//! Bounded-lookahead heuristics that recover semantic attributes (declared
//! type, default value, modifier flags, visibility) from the raw tokens
//! around the cursor position, without a full grammar.
//!
//! Every lookup inspects at most [`LOOKUP_WINDOW`] tokens and aborts at an
//! explicit stop set of delimiter kinds, so a search never leaks past the
//! boundary of the construct being inspected. A miss is an expected outcome
//! (`None`), not an error: a parameter simply may not declare a type. None
//! of these operations move the cursor's persistent position.

use std::fmt::Display;

use serde::Serialize;

use crate::cursor::TokenCursor;
use crate::tokens::Token;
use crate::tokens::TokenKind;

/// Maximum number of tokens any attribute lookup examines.
pub const LOOKUP_WINDOW: usize = 5;

/// Member visibility recovered from the modifier keywords preceding a
/// construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
	#[default]
	Public,
	Private,
	Protected,
}

impl Display for Visibility {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let label = match self {
			Visibility::Public => "public",
			Visibility::Private => "private",
			Visibility::Protected => "protected",
		};

		write!(f, "{label}")
	}
}

/// The declared type preceding the cursor position, if any.
///
/// Searches backward for a bare identifier (a type name), falling back to
/// the `array` keyword; either search stops at a parameter boundary (`,` or
/// `(`).
pub fn declared_type(cursor: &TokenCursor) -> Option<String> {
	const STOP: &[TokenKind] = &[TokenKind::Comma, TokenKind::OpenParen];

	cursor
		.find_previous_by_kind(TokenKind::Identifier, LOOKUP_WINDOW, STOP)
		.or_else(|| cursor.find_previous_by_kind(TokenKind::ArrayKeyword, LOOKUP_WINDOW, STOP))
		.map(|token| token.content.clone())
}

/// The default value following the cursor position, if any.
///
/// Searches forward, stopping at a parameter-list boundary (`,` or `)`),
/// trying each literal kind in fixed order: identifier (a constant),
/// quoted string, integer, float, `array`. The first search that matches
/// wins. One leading and one trailing quote character of either style is
/// trimmed from the match.
pub fn default_value(cursor: &TokenCursor) -> Option<String> {
	const STOP: &[TokenKind] = &[TokenKind::Comma, TokenKind::CloseParen];
	const CANDIDATES: &[TokenKind] = &[
		TokenKind::Identifier,
		TokenKind::QuotedString,
		TokenKind::IntNumber,
		TokenKind::FloatNumber,
		TokenKind::ArrayKeyword,
	];

	CANDIDATES
		.iter()
		.find_map(|kind| cursor.find_next_by_kind(*kind, LOOKUP_WINDOW, STOP))
		.map(|token| trim_quotes(&token.content).to_string())
}

/// The `abstract` keyword preceding the cursor position, if present within
/// the window. Stops at the end of a previous block (`}`).
pub fn find_abstract(cursor: &TokenCursor) -> Option<&Token> {
	cursor.find_previous_by_kind(TokenKind::Abstract, LOOKUP_WINDOW, &[TokenKind::CloseBrace])
}

/// The `final` keyword preceding the cursor position, if present within the
/// window. Stops at the end of a previous block (`}`).
pub fn find_final(cursor: &TokenCursor) -> Option<&Token> {
	cursor.find_previous_by_kind(TokenKind::Final, LOOKUP_WINDOW, &[TokenKind::CloseBrace])
}

/// The `static` keyword preceding the cursor position, if present within the
/// window. Stops at a block or statement boundary (`{` or `;`).
pub fn find_static(cursor: &TokenCursor) -> Option<&Token> {
	cursor.find_previous_by_kind(
		TokenKind::Static,
		LOOKUP_WINDOW,
		&[TokenKind::OpenBrace, TokenKind::Semicolon],
	)
}

/// The visibility of the construct at the cursor position.
///
/// Defaults to public. The `private` and `protected` checks run
/// independently, in that order, so a `protected` match overwrites a
/// `private` one. Legitimate source never declares both; the fixed ordering
/// is preserved for compatibility, not as a semantic rule.
pub fn visibility(cursor: &TokenCursor) -> Visibility {
	const STOP: &[TokenKind] = &[TokenKind::OpenBrace, TokenKind::Semicolon];

	let mut visibility = Visibility::Public;

	if cursor
		.find_previous_by_kind(TokenKind::Private, LOOKUP_WINDOW, STOP)
		.is_some()
	{
		visibility = Visibility::Private;
	}

	if cursor
		.find_previous_by_kind(TokenKind::Protected, LOOKUP_WINDOW, STOP)
		.is_some()
	{
		visibility = Visibility::Protected;
	}

	visibility
}

/// Trim exactly one leading and one trailing quote character (single or
/// double) from a literal. Unquoted values pass through unchanged.
fn trim_quotes(value: &str) -> &str {
	let value = value.strip_prefix(['\'', '"']).unwrap_or(value);

	value.strip_suffix(['\'', '"']).unwrap_or(value)
}
