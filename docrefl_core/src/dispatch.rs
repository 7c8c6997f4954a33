use std::ops::Deref;
use std::ops::DerefMut;

use tracing::trace;
use xmltree::Element;

use crate::ReflectResult;
use crate::cursor::TokenCursor;
use crate::record::ReflectionRecord;
use crate::tokens::TokenKind;

/// A per-token-kind processing step. Handlers may read or advance the
/// cursor, but must leave it on their last consumed token so the scope
/// walker can continue scanning from a consistent position.
pub type Handler<R> = fn(&mut R, &mut TokenCursor) -> ReflectResult<()>;

/// The resolved capability map for one concrete reflector type.
///
/// Built once per parse pass from [`Reflect::handler`] over
/// [`TokenKind::ALL`], so the scan itself is a plain indexed lookup per
/// token. The table must not be shared across distinct concrete types:
/// which kinds have handlers is a property of the type.
pub struct HandlerTable<R> {
	handlers: Vec<Option<Handler<R>>>,
}

impl<R: Reflect> HandlerTable<R> {
	pub fn new() -> Self {
		let handlers = TokenKind::ALL.iter().map(|kind| R::handler(*kind)).collect();

		Self { handlers }
	}

	pub fn get(&self, kind: TokenKind) -> Option<Handler<R>> {
		self.handlers.get(kind as usize).copied().flatten()
	}
}

impl<R: Reflect> Default for HandlerTable<R> {
	fn default() -> Self {
		Self::new()
	}
}

/// A construct-specific reflector driven by the dispatch engine.
///
/// Implementors embed a [`ReflectionRecord`] and expose it through
/// `Deref`/`DerefMut` (the `derive_more` deref derives keep this a one-line
/// annotation). The engine itself is the [`parse`] function; a reflector
/// only supplies the three construct-specific pieces: generic information
/// extraction, the capability map, and (optionally) a compound scope walker.
pub trait Reflect: Deref<Target = ReflectionRecord> + DerefMut {
	/// Extract the construct's generic information (name, attributes) from
	/// the tokens at or near the cursor position. Must not advance the
	/// cursor past the construct's own scope.
	fn process_generic_information(&mut self, cursor: &mut TokenCursor) -> ReflectResult<()>;

	/// The handler for `kind`, if this construct cares about it. Most kinds
	/// are irrelevant to most constructs; the default map is empty.
	fn handler(kind: TokenKind) -> Option<Handler<Self>>
	where
		Self: Sized,
	{
		let _ = kind;
		None
	}

	/// Walk the tokens belonging to this construct, dispatching each one,
	/// and return the first and last token index visited.
	///
	/// The default scope is exactly the current token. Compound constructs
	/// (anything with a body) override this, typically by delegating to
	/// [`walk_block_scope`].
	fn walk_scope(
		&mut self,
		cursor: &mut TokenCursor,
		handlers: &HandlerTable<Self>,
	) -> ReflectResult<(usize, usize)>
	where
		Self: Sized,
	{
		let start = cursor.key();
		dispatch(self, cursor, handlers)?;

		Ok((start, start))
	}

	/// Serialize this construct into a documentation element. The shape is
	/// construct-specific; aggregates assemble child documents through the
	/// merge utilities in [`crate::merge`].
	fn to_xml(&self) -> Element;

	/// Render [`Reflect::to_xml`] as an XML string.
	fn to_xml_string(&self) -> ReflectResult<String> {
		let mut buffer = Vec::new();
		self.to_xml().write(&mut buffer)?;

		Ok(String::from_utf8_lossy(&buffer).into_owned())
	}
}

/// Parse one construct's scope from the cursor position.
///
/// An exhausted cursor is not an error: the record is left at its defaults
/// and no handler runs. Otherwise the starting line is recorded, the
/// reflector extracts its generic information, and the scope walk dispatches
/// every token it visits; the visited range becomes the record's token range,
/// written once after the scan completes.
pub fn parse<R: Reflect>(reflector: &mut R, cursor: &mut TokenCursor) -> ReflectResult<()> {
	let Some(token) = cursor.current() else {
		return Ok(());
	};
	let line = token.line;

	reflector.set_line_start(line);
	reflector.process_generic_information(cursor)?;

	let handlers = HandlerTable::new();
	let (start, end) = reflector.walk_scope(cursor, &handlers)?;
	reflector.set_token_range(start, end);

	Ok(())
}

/// Dispatch the current token to its handler, if the concrete type has one.
///
/// Unhandled kinds are silently skipped; that is the normal case, not an
/// error.
pub fn dispatch<R: Reflect>(
	reflector: &mut R,
	cursor: &mut TokenCursor,
	handlers: &HandlerTable<R>,
) -> ReflectResult<()> {
	let Some(token) = cursor.current() else {
		return Ok(());
	};
	let kind = token.kind;
	let line = token.line;

	match handlers.get(kind) {
		Some(handler) => {
			trace!(handler = kind.handler_name(), line, "dispatching token");
			handler(reflector, cursor)
		}
		None => {
			trace!(handler = kind.handler_name(), "no handler for token kind");
			Ok(())
		}
	}
}

/// Walk a compound scope: dispatch every token from the current position up
/// to and including the close brace matching the first open brace, or up to
/// a terminating semicolon seen before any open brace (a body-less
/// declaration such as an abstract or interface method).
///
/// Returns the first and last token index visited. Handlers that consume
/// ahead are respected: the walk resumes after the handler's final position.
pub fn walk_block_scope<R: Reflect>(
	reflector: &mut R,
	cursor: &mut TokenCursor,
	handlers: &HandlerTable<R>,
) -> ReflectResult<(usize, usize)> {
	let start = cursor.key();
	let mut end = start;
	let mut depth = 0_usize;

	while let Some(token) = cursor.current() {
		let kind = token.kind;

		dispatch(reflector, cursor, handlers)?;
		end = cursor.key();

		match kind {
			TokenKind::OpenBrace => depth += 1,
			TokenKind::CloseBrace => {
				depth = depth.saturating_sub(1);
				if depth == 0 {
					break;
				}
			}
			TokenKind::Semicolon if depth == 0 => break,
			_ => {}
		}

		cursor.advance();
	}

	Ok((start, end))
}
