//! Assembly of per-construct documentation fragments into one aggregate
//! document.

use xmltree::Element;
use xmltree::XMLNode;

use crate::ReflectResult;

/// Parse `fragment` and append each of its top-level elements, in order, as
/// a child of `origin`.
///
/// The fragment may contain several top-level elements. Parsing happens
/// before any import, so a malformed fragment raises
/// [`MalformedFragment`](crate::ReflectError::MalformedFragment) and leaves
/// `origin` untouched. Existing children are never removed or reordered.
pub fn merge_fragment(origin: &mut Element, fragment: &str) -> ReflectResult<()> {
	// A wrapper element lets the fragment carry more than one top-level
	// element, which a document parse would otherwise reject.
	let wrapped = format!("<fragment>{fragment}</fragment>");
	let parsed = Element::parse(wrapped.as_bytes())?;

	origin.children.extend(
		parsed
			.children
			.into_iter()
			.filter(|node| matches!(node, XMLNode::Element(_))),
	);

	Ok(())
}

/// Append a deep copy of an in-memory element as a child of `origin`.
///
/// No node ownership is shared between the two documents afterward.
pub fn merge_element(origin: &mut Element, fragment: &Element) {
	origin.children.push(XMLNode::Element(fragment.clone()));
}
