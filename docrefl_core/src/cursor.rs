use crate::lexer::tokenize;
use crate::tokens::Token;
use crate::tokens::TokenKind;

/// An ordered, randomly addressable sequence of tokens with a movable read
/// position.
///
/// The cursor owns its tokens and assigns each one its sequence index on
/// construction. The bounded searches ([`find_previous_by_kind`] and
/// [`find_next_by_kind`]) never move the persistent read position; only
/// [`advance`] and [`seek`] do.
///
/// [`find_previous_by_kind`]: TokenCursor::find_previous_by_kind
/// [`find_next_by_kind`]: TokenCursor::find_next_by_kind
/// [`advance`]: TokenCursor::advance
/// [`seek`]: TokenCursor::seek
#[derive(Debug, Clone)]
pub struct TokenCursor {
	tokens: Vec<Token>,
	position: usize,
}

impl TokenCursor {
	/// Take ownership of a token stream, assigning sequence indices.
	pub fn new(tokens: Vec<Token>) -> Self {
		let tokens = tokens
			.into_iter()
			.enumerate()
			.map(|(index, mut token)| {
				token.index = index;
				token
			})
			.collect();

		Self {
			tokens,
			position: 0,
		}
	}

	/// Tokenize `source` and build a cursor over the result, positioned at
	/// the first token.
	pub fn from_source(source: impl AsRef<str>) -> Self {
		Self::new(tokenize(source.as_ref()))
	}

	/// The token at the read position, or `None` when the cursor is
	/// exhausted.
	pub fn current(&self) -> Option<&Token> {
		self.tokens.get(self.position)
	}

	/// The current read position.
	pub fn key(&self) -> usize {
		self.position
	}

	/// Move the read position one token forward and return the new current
	/// token.
	pub fn advance(&mut self) -> Option<&Token> {
		if self.position < self.tokens.len() {
			self.position += 1;
		}

		self.current()
	}

	/// Move the read position to `position`, clamped to one past the last
	/// token.
	pub fn seek(&mut self, position: usize) {
		self.position = position.min(self.tokens.len());
	}

	/// The token at `index`, independent of the read position.
	pub fn get(&self, index: usize) -> Option<&Token> {
		self.tokens.get(index)
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Search backward from the token before the read position for the first
	/// token of `kind`, inspecting at most `max_steps` tokens.
	///
	/// Encountering a token whose kind is in `stop_kinds` aborts the search
	/// immediately: a match beyond a stop token is never returned, since the
	/// stop set marks the boundary of the construct being inspected.
	pub fn find_previous_by_kind(
		&self,
		kind: TokenKind,
		max_steps: usize,
		stop_kinds: &[TokenKind],
	) -> Option<&Token> {
		let mut index = self.position;

		for _ in 0..max_steps {
			if index == 0 {
				return None;
			}

			index -= 1;
			let token = &self.tokens[index];

			if stop_kinds.contains(&token.kind) {
				return None;
			}

			if token.kind == kind {
				return Some(token);
			}
		}

		None
	}

	/// Search forward from the token after the read position for the first
	/// token of `kind`, inspecting at most `max_steps` tokens. Stop semantics
	/// match [`find_previous_by_kind`](TokenCursor::find_previous_by_kind).
	pub fn find_next_by_kind(
		&self,
		kind: TokenKind,
		max_steps: usize,
		stop_kinds: &[TokenKind],
	) -> Option<&Token> {
		let mut index = self.position;

		for _ in 0..max_steps {
			index += 1;
			let token = self.tokens.get(index)?;

			if stop_kinds.contains(&token.kind) {
				return None;
			}

			if token.kind == kind {
				return Some(token);
			}
		}

		None
	}
}
