use crate::TokenCursor;
use crate::TokenKind;

/// Build a cursor over `source`, positioned on the first token of `kind`.
/// Exhausts the cursor when no such token exists.
pub fn cursor_at(source: &str, kind: TokenKind) -> TokenCursor {
	cursor_at_nth(source, kind, 0)
}

/// Build a cursor over `source`, positioned on the nth (0-based) token of
/// `kind`.
pub fn cursor_at_nth(source: &str, kind: TokenKind, nth: usize) -> TokenCursor {
	let mut cursor = TokenCursor::from_source(source);
	let mut seen = 0;

	while let Some(token) = cursor.current() {
		if token.kind == kind {
			if seen == nth {
				break;
			}

			seen += 1;
		}

		cursor.advance();
	}

	cursor
}
