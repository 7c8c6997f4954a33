use std::collections::HashMap;

use derive_more::Deref;
use derive_more::DerefMut;
use rstest::rstest;
use similar_asserts::assert_eq;
use xmltree::Element;

use super::__fixtures::*;
use super::*;
use crate::resolver;

/// Minimal reflector used to observe engine behavior: records whether the
/// generic information step ran and which kinds were dispatched to a
/// handler. Only `function` tokens have one.
#[derive(Default, Deref, DerefMut)]
struct TestReflector {
	#[deref]
	#[deref_mut]
	record: ReflectionRecord,
	processed_generic: bool,
	handled: Vec<TokenKind>,
}

impl TestReflector {
	fn process_function(&mut self, _cursor: &mut TokenCursor) -> ReflectResult<()> {
		self.handled.push(TokenKind::Function);

		Ok(())
	}
}

impl Reflect for TestReflector {
	fn process_generic_information(&mut self, _cursor: &mut TokenCursor) -> ReflectResult<()> {
		self.processed_generic = true;

		Ok(())
	}

	fn handler(kind: TokenKind) -> Option<Handler<Self>> {
		match kind {
			TokenKind::Function => Some(Self::process_function),
			_ => None,
		}
	}

	fn to_xml(&self) -> Element {
		Element::new("test")
	}
}

#[test]
fn parse_on_exhausted_cursor_is_a_no_op() -> ReflectResult<()> {
	let mut cursor = TokenCursor::new(vec![]);
	let mut reflector = TestReflector::default();
	parse(&mut reflector, &mut cursor)?;

	assert!(!reflector.processed_generic);
	assert!(reflector.handled.is_empty());
	assert_eq!(reflector.name(), "Unknown");
	assert_eq!(reflector.token_start(), 0);
	assert_eq!(reflector.token_end(), 0);
	assert_eq!(reflector.line_start(), 0);

	// Same for a cursor that has run past its last token.
	let mut cursor = TokenCursor::from_source("function f() {}");
	cursor.seek(cursor.len());
	parse(&mut reflector, &mut cursor)?;
	assert!(!reflector.processed_generic);

	Ok(())
}

#[test]
fn default_scope_is_exactly_the_current_token() -> ReflectResult<()> {
	let mut cursor = cursor_at("public function render() {}", TokenKind::Function);
	let start = cursor.key();
	let mut reflector = TestReflector::default();
	parse(&mut reflector, &mut cursor)?;

	assert!(reflector.processed_generic);
	assert_eq!(reflector.handled, vec![TokenKind::Function]);
	assert_eq!(reflector.token_start(), start);
	assert_eq!(reflector.token_end(), start);
	assert_eq!(reflector.line_start(), 1);

	Ok(())
}

#[test]
fn unhandled_token_kind_is_a_no_op() -> ReflectResult<()> {
	let mut cursor = cursor_at("class Foo {}", TokenKind::Class);
	let mut reflector = TestReflector::default();
	parse(&mut reflector, &mut cursor)?;

	assert!(reflector.handled.is_empty());
	assert_eq!(reflector.name(), "Unknown");
	assert_eq!(reflector.namespace(), "default");

	Ok(())
}

#[test]
fn handler_tables_are_per_concrete_type() {
	let function_table = HandlerTable::<FunctionReflector>::new();
	assert!(function_table.get(TokenKind::Variable).is_some());
	assert!(function_table.get(TokenKind::OpenBrace).is_some());
	assert!(function_table.get(TokenKind::Comment).is_none());

	let property_table = HandlerTable::<PropertyReflector>::new();
	assert!(property_table.get(TokenKind::Variable).is_none());
}

#[rstest]
#[case(TokenKind::Function, "processFunction")]
#[case(TokenKind::OpenBrace, "processOpenBrace")]
#[case(TokenKind::DocComment, "processDocComment")]
#[case(TokenKind::QuotedString, "processQuotedString")]
#[case(TokenKind::ArrayKeyword, "processArray")]
fn handler_name_derivation(#[case] kind: TokenKind, #[case] expected: &str) {
	assert_eq!(kind.handler_name(), expected);
}

#[rstest]
#[case::only_protected("protected $value", Visibility::Protected)]
#[case::only_private("private $value", Visibility::Private)]
#[case::neither("$value", Visibility::Public)]
#[case::both("private protected $value", Visibility::Protected)]
fn visibility_resolution(#[case] source: &str, #[case] expected: Visibility) {
	let cursor = cursor_at(source, TokenKind::Variable);
	assert_eq!(resolver::visibility(&cursor), expected);
}

#[rstest]
#[case::single_quoted("$a = 'value'", Some("value"))]
#[case::double_quoted(r#"$a = "value""#, Some("value"))]
#[case::integer("$a = 42", Some("42"))]
#[case::float("$a = 1.5", Some("1.5"))]
#[case::array_literal("$a = array()", Some("array"))]
#[case::constant("$a = SORT_ASC", Some("SORT_ASC"))]
#[case::none("$a", None)]
fn default_value_extraction(#[case] source: &str, #[case] expected: Option<&str>) {
	let cursor = cursor_at(source, TokenKind::Variable);
	assert_eq!(resolver::default_value(&cursor).as_deref(), expected);
}

#[rstest]
#[case::type_hint("function f(string $value)", 0, Some("string"))]
#[case::array_hint("function f(array $value)", 0, Some("array"))]
#[case::no_hint("function f($value)", 0, None)]
#[case::stops_at_parameter_boundary("function f(string $a, $b)", 1, None)]
fn declared_type_lookup(
	#[case] source: &str,
	#[case] nth: usize,
	#[case] expected: Option<&str>,
) {
	let cursor = cursor_at_nth(source, TokenKind::Variable, nth);
	assert_eq!(resolver::declared_type(&cursor).as_deref(), expected);
}

#[test]
fn modifier_lookups() {
	let cursor = cursor_at("final public function f() {}", TokenKind::Function);
	assert!(resolver::find_final(&cursor).is_some());
	assert!(resolver::find_abstract(&cursor).is_none());
	assert!(resolver::find_static(&cursor).is_none());

	let cursor = cursor_at("public static function f() {}", TokenKind::Function);
	assert!(resolver::find_static(&cursor).is_some());

	let cursor = cursor_at("abstract function f($a);", TokenKind::Function);
	assert!(resolver::find_abstract(&cursor).is_some());
}

#[test]
fn stop_set_aborts_the_search() {
	// `static` sits within the window but behind a statement boundary.
	let cursor = cursor_at("static; function f() {}", TokenKind::Function);
	assert!(resolver::find_static(&cursor).is_none());
}

#[test]
fn search_window_is_bounded() {
	let cursor = cursor_at("final public static function f() {}", TokenKind::Function);

	// `final` sits six tokens back, one past the five-token window.
	assert!(
		cursor
			.find_previous_by_kind(TokenKind::Final, 5, &[])
			.is_none()
	);
	assert!(
		cursor
			.find_previous_by_kind(TokenKind::Final, 6, &[])
			.is_some()
	);
}

#[test]
fn bounded_searches_do_not_move_the_cursor() {
	let cursor = cursor_at("private static $count = 0;", TokenKind::Variable);
	let key = cursor.key();

	assert!(
		cursor
			.find_previous_by_kind(TokenKind::Private, 5, &[])
			.is_some()
	);
	assert!(
		cursor
			.find_next_by_kind(TokenKind::IntNumber, 5, &[])
			.is_some()
	);
	assert_eq!(cursor.key(), key);
}

#[test]
fn lexing_tracks_kinds_and_lines() {
	let cursor = TokenCursor::from_source("class Foo\n{\n\tprivate $bar = 1;\n}");
	let kinds: Vec<_> = (0..cursor.len())
		.map(|index| cursor.get(index).unwrap().kind)
		.collect();

	assert_eq!(
		kinds,
		vec![
			TokenKind::Class,
			TokenKind::Whitespace,
			TokenKind::Identifier,
			TokenKind::Whitespace,
			TokenKind::OpenBrace,
			TokenKind::Whitespace,
			TokenKind::Private,
			TokenKind::Whitespace,
			TokenKind::Variable,
			TokenKind::Whitespace,
			TokenKind::Equals,
			TokenKind::Whitespace,
			TokenKind::IntNumber,
			TokenKind::Semicolon,
			TokenKind::Whitespace,
			TokenKind::CloseBrace,
		]
	);
	assert_eq!(cursor.get(8).unwrap().line, 3);
	assert_eq!(cursor.get(15).unwrap().line, 4);
	assert_eq!(cursor.get(15).unwrap().index, 15);
}

#[test]
fn doc_comments_are_distinct_from_plain_comments() {
	let cursor = TokenCursor::from_source("/** doc */ /* plain */ // line");

	assert_eq!(cursor.get(0).unwrap().kind, TokenKind::DocComment);
	assert_eq!(cursor.get(2).unwrap().kind, TokenKind::Comment);
	assert_eq!(cursor.get(4).unwrap().kind, TokenKind::Comment);
}

#[test]
fn unrecognized_source_text_becomes_other_tokens() {
	let cursor = TokenCursor::from_source("$a + 1");

	assert_eq!(cursor.get(2).unwrap().kind, TokenKind::Other);
	assert_eq!(cursor.get(2).unwrap().content, "+");
}

#[test]
fn function_reflector_extracts_signature_and_scope() -> ReflectResult<()> {
	let source = "final public function render($view, string $format = 'html', array $options = \
	              array()) {\n\t$partial = 1;\n\tif ($view) { $partial = 2; }\n}";
	let mut cursor = cursor_at(source, TokenKind::Function);
	let start = cursor.key();

	let mut function = FunctionReflector::new();
	parse(&mut function, &mut cursor)?;

	assert_eq!(function.name(), "render");
	assert_eq!(function.visibility(), Visibility::Public);
	assert!(function.is_final());
	assert!(!function.is_abstract());
	assert!(!function.is_static());

	let arguments = function.arguments();
	assert_eq!(arguments.len(), 3);
	assert_eq!(arguments[0].name(), "$view");
	assert_eq!(arguments[0].declared_type(), None);
	assert_eq!(arguments[0].default_value(), None);
	assert_eq!(arguments[1].name(), "$format");
	assert_eq!(arguments[1].declared_type(), Some("string"));
	assert_eq!(arguments[1].default_value(), Some("html"));
	assert_eq!(arguments[2].name(), "$options");
	assert_eq!(arguments[2].declared_type(), Some("array"));
	assert_eq!(arguments[2].default_value(), Some("array"));

	assert_eq!(function.token_start(), start);
	let closing = cursor.get(function.token_end()).unwrap();
	assert_eq!(closing.kind, TokenKind::CloseBrace);
	assert_eq!(closing.line, 4);

	Ok(())
}

#[test]
fn abstract_method_scope_ends_at_the_semicolon() -> ReflectResult<()> {
	let mut cursor = cursor_at("abstract function compute($input);", TokenKind::Function);
	let mut function = FunctionReflector::new();
	parse(&mut function, &mut cursor)?;

	assert!(function.is_abstract());
	assert_eq!(function.name(), "compute");
	assert_eq!(function.arguments().len(), 1);
	assert_eq!(
		cursor.get(function.token_end()).unwrap().kind,
		TokenKind::Semicolon
	);

	Ok(())
}

#[test]
fn property_reflector_extracts_visibility_and_default() -> ReflectResult<()> {
	let source = "class Counter {\n\tprivate static $count = 0;\n}";
	let mut cursor = cursor_at(source, TokenKind::Variable);
	let start = cursor.key();

	let mut property = PropertyReflector::new();
	parse(&mut property, &mut cursor)?;

	assert_eq!(property.name(), "$count");
	assert_eq!(property.visibility(), Visibility::Private);
	assert!(property.is_static());
	assert_eq!(property.default_value(), Some("0"));
	assert_eq!(property.token_start(), start);
	assert_eq!(
		cursor.get(property.token_end()).unwrap().kind,
		TokenKind::Semicolon
	);
	assert_eq!(property.line_start(), 2);

	Ok(())
}

#[test]
fn merge_fragment_appends_top_level_elements_in_order() -> ReflectResult<()> {
	let mut origin = Element::parse("<docblock><description/></docblock>".as_bytes())?;
	merge_fragment(&mut origin, r#"<tag name="param"/><tag name="return"/>"#)?;

	let children: Vec<_> = origin
		.children
		.iter()
		.filter_map(|node| node.as_element())
		.collect();
	assert_eq!(children.len(), 3);
	assert_eq!(children[0].name, "description");
	assert_eq!(children[1].name, "tag");
	assert_eq!(
		children[1].attributes.get("name").map(String::as_str),
		Some("param")
	);
	assert_eq!(
		children[2].attributes.get("name").map(String::as_str),
		Some("return")
	);

	Ok(())
}

#[test]
fn merge_malformed_fragment_leaves_origin_untouched() -> ReflectResult<()> {
	let mut origin = Element::parse("<docblock><description/></docblock>".as_bytes())?;
	let error = merge_fragment(&mut origin, "<unclosed").unwrap_err();

	assert!(matches!(error, ReflectError::MalformedFragment(_)));
	assert_eq!(origin.children.len(), 1);

	Ok(())
}

#[test]
fn merge_element_deep_copies_the_fragment() -> ReflectResult<()> {
	let mut origin = Element::parse("<file/>".as_bytes())?;
	let mut fragment = Element::new("function");
	fragment.attributes.insert("line".into(), "3".into());

	merge_element(&mut origin, &fragment);
	fragment.attributes.insert("line".into(), "9".into());

	let child = origin.children[0].as_element().unwrap();
	assert_eq!(child.attributes.get("line").map(String::as_str), Some("3"));

	Ok(())
}

#[test]
fn function_to_xml_merges_argument_fragments() -> ReflectResult<()> {
	let mut cursor = cursor_at("function f($a, $b) {}", TokenKind::Function);
	let mut function = FunctionReflector::new();
	parse(&mut function, &mut cursor)?;

	let element = function.to_xml();
	assert_eq!(element.name, "function");
	assert_eq!(
		element.get_child("name").and_then(Element::get_text).as_deref(),
		Some("f")
	);

	let arguments: Vec<_> = element
		.children
		.iter()
		.filter_map(|node| node.as_element())
		.filter(|child| child.name == "argument")
		.collect();
	assert_eq!(arguments.len(), 2);
	assert_eq!(
		arguments[0]
			.get_child("name")
			.and_then(Element::get_text)
			.as_deref(),
		Some("$a")
	);

	let xml = function.to_xml_string()?;
	assert!(xml.contains("<name>f</name>"));

	Ok(())
}

#[test]
fn set_name_rejects_empty_values() {
	let mut record = ReflectionRecord::new();
	record.set_name("render").unwrap();

	let error = record.set_name("  ").unwrap_err();
	assert!(matches!(
		error,
		ReflectError::InvalidArgument { field: "name", .. }
	));
	assert_eq!(record.name(), "render");
}

#[test]
fn namespace_and_alias_accessors() -> ReflectResult<()> {
	let mut record = ReflectionRecord::new();
	assert_eq!(record.namespace(), "default");

	record.set_namespace("App\\Service")?;
	record.add_namespace_alias("Str", "App\\Support\\Str");

	let mut aliases = HashMap::new();
	aliases.insert("Arr".to_string(), "App\\Support\\Arr".to_string());
	record.set_namespace_aliases(aliases);

	assert_eq!(record.namespace(), "App\\Service");
	assert_eq!(
		record.namespace_aliases().get("Arr").map(String::as_str),
		Some("App\\Support\\Arr")
	);
	assert!(record.namespace_aliases().get("Str").is_none());
	assert!(record.set_namespace("").is_err());
	assert_eq!(record.namespace(), "App\\Service");
	assert_eq!(record.to_string(), "Unknown");

	Ok(())
}

#[test]
fn records_serialize_for_downstream_emitters() -> ReflectResult<()> {
	let mut record = ReflectionRecord::new();
	record.set_name("render")?;

	let value = serde_json::to_value(&record).expect("record serializes");
	assert_eq!(value["name"], "render");
	assert_eq!(value["namespace"], "default");

	let visibility = serde_json::to_value(Visibility::Protected).expect("visibility serializes");
	assert_eq!(visibility, serde_json::json!("protected"));

	Ok(())
}
