use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ReflectError {
	#[error("invalid value for `{field}`: {reason}")]
	#[diagnostic(code(docrefl::invalid_argument))]
	InvalidArgument {
		field: &'static str,
		reason: String,
	},

	#[error("malformed documentation fragment: {0}")]
	#[diagnostic(
		code(docrefl::malformed_fragment),
		help("the fragment must be well-formed XML")
	)]
	MalformedFragment(#[from] xmltree::ParseError),

	#[error("failed to serialize document: {0}")]
	#[diagnostic(code(docrefl::xml_write))]
	XmlWrite(#[from] xmltree::Error),
}

pub type ReflectResult<T> = Result<T, ReflectError>;
