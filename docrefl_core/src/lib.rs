//! `docrefl_core` is the token-driven extraction engine at the heart of the
//! docrefl documentation generator. It turns a flat, ordered stream of
//! lexical tokens into structured reflection records describing syntactic
//! constructs (functions, properties, arguments) without building a full
//! abstract syntax tree: semantic attributes are recovered from bounded
//! token windows, and malformed input yields best-effort records rather than
//! a parse failure.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source text
//!   → Lexer (logos; flat token stream, nothing skipped)
//!   → TokenCursor (positionable, searchable sequence over the tokens)
//!   → parse() (records the starting line, extracts generic information,
//!     walks the construct's scope dispatching each token to its handler)
//!   → ReflectionRecord (name, namespace, aliases, token range, start line)
//!   → to_xml() / merge (per-construct fragments assembled into one document)
//! ```
//!
//! ## Key Types
//!
//! - [`TokenCursor`] — ordered token sequence with a movable read position
//!   and bounded forward/backward searches that abort at stop sets.
//! - [`Reflect`] — the trait a concrete construct reflector implements:
//!   generic information extraction, a per-kind handler capability map, and
//!   an overridable scope walker.
//! - [`ReflectionRecord`] — the mutable state a parse pass produces.
//! - [`resolver`] — stateless heuristics for declared type, default value,
//!   modifier flags, and visibility near the cursor position.
//! - [`FunctionReflector`], [`PropertyReflector`], [`ArgumentReflector`] —
//!   the construct reflectors shipped with the engine.
//!
//! ## Quick Start
//!
//! ```rust
//! use docrefl_core::FunctionReflector;
//! use docrefl_core::Reflect;
//! use docrefl_core::TokenCursor;
//! use docrefl_core::TokenKind;
//! use docrefl_core::parse;
//!
//! let source = "final public function render($view, $format = 'html') {}";
//! let mut cursor = TokenCursor::from_source(source);
//! while cursor.current().is_some_and(|token| token.kind != TokenKind::Function) {
//! 	cursor.advance();
//! }
//!
//! let mut function = FunctionReflector::new();
//! parse(&mut function, &mut cursor).unwrap();
//!
//! assert_eq!(function.name(), "render");
//! assert_eq!(function.arguments().len(), 2);
//! assert_eq!(function.arguments()[1].default_value(), Some("html"));
//! assert!(function.is_final());
//! ```

pub use cursor::*;
pub use dispatch::*;
pub use error::*;
pub use merge::*;
pub use record::*;
pub use reflectors::*;
pub use resolver::Visibility;
pub use tokens::*;

mod cursor;
mod dispatch;
mod error;
pub(crate) mod lexer;
mod merge;
mod record;
mod reflectors;
pub mod resolver;
mod tokens;

#[cfg(test)]
mod __fixtures;
#[cfg(test)]
mod __tests;
