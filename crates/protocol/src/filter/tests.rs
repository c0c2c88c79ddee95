use super::*;

fn p(n: u32) -> Filter {
	Property::new("lsServer", "attr").greater_than(n)
}

fn logic_of(filter: &Filter) -> Logic {
	filter.as_composite().expect("composite").logic()
}

fn operand_count(filter: &Filter) -> usize {
	filter.as_composite().expect("composite").operands().len()
}

#[test]
fn test_predicate_builders_use_wire_tags() {
	let prop = Property::new("lsServer", "name");
	let cases = [
		(prop.equals("a"), "eq"),
		(prop.not_equals("a"), "ne"),
		(prop.greater_than(1), "gt"),
		(prop.greater_or_equal(1), "ge"),
		(prop.less_than(1), "lt"),
		(prop.less_or_equal(1), "le"),
		(prop.wildcard_match("web-*"), "wcard"),
		(prop.any_bit("a,b"), "anybit"),
		(prop.all_bits("a,b"), "allbit"),
	];
	for (filter, tag) in cases {
		let element = filter.to_element();
		assert_eq!(element.name(), tag);
		assert_eq!(element.attribute("class"), Some("lsServer"));
		assert_eq!(element.attribute("property"), Some("name"));
		assert_eq!(Operator::from_tag(tag).map(Operator::tag), Some(tag));
	}
	assert_eq!(Operator::from_tag("between"), None);
}

#[test]
fn test_bitmask_accepts_string_or_tokens() {
	let prop = Property::new("faultInst", "severity");
	let joined = prop.any_bit("critical,major");
	assert_eq!(prop.any_bit(vec!["critical", "major"]), joined);
	assert_eq!(prop.any_bit(["critical", "major"]), joined);
	assert_eq!(prop.any_bit(&["critical", "major"][..]), joined);
	assert_eq!(joined.as_predicate().unwrap().value(), "critical,major");
	assert_eq!(prop.all_bits(vec![1, 2, 4]).as_predicate().unwrap().value(), "1,2,4");
}

#[test]
fn test_and_flattens_left_and_right() {
	let left = (p(1) & p(2)) & p(3);
	let right = p(1) & (p(2) & p(3));

	for filter in [&left, &right] {
		assert_eq!(logic_of(filter), Logic::And);
		assert_eq!(operand_count(filter), 3);
	}
	assert_eq!(left, right);
	let values: Vec<_> = left
		.as_composite()
		.unwrap()
		.operands()
		.iter()
		.map(|f| f.as_predicate().unwrap().value().to_owned())
		.collect();
	assert_eq!(values, ["1", "2", "3"]);
}

#[test]
fn test_or_flattens_both_sides() {
	let filter = (p(1) | p(2)) | (p(3) | p(4));
	assert_eq!(logic_of(&filter), Logic::Or);
	assert_eq!(operand_count(&filter), 4);
}

#[test]
fn test_mixed_logic_never_flattens() {
	let filter = (p(1) | p(2)) & p(3);
	assert_eq!(logic_of(&filter), Logic::And);
	assert_eq!(operand_count(&filter), 2);
	assert_eq!(logic_of(&filter.as_composite().unwrap().operands()[0]), Logic::Or);
}

#[test]
fn test_not_is_unary_and_never_flattens() {
	let filter = !!p(1);
	let outer = filter.as_composite().unwrap();
	assert_eq!(outer.logic(), Logic::Not);
	assert_eq!(outer.operands().len(), 1);
	assert_eq!(logic_of(&outer.operands()[0]), Logic::Not);

	let combined = !p(1) & !p(2);
	assert_eq!(operand_count(&combined), 2);
}

#[test]
fn test_compiles_nested_expression() {
	let filter = p(5) | (p(5) & p(5));
	let gt = r#"<gt class="lsServer" property="attr" value="5"/>"#;
	assert_eq!(filter.to_xml(), format!("<or>{gt}<and>{gt}{gt}</and></or>"));
}

#[test]
fn test_in_filter_wraps_once() {
	let element = (p(1) & p(2)).to_in_filter();
	assert_eq!(element.name(), "inFilter");
	assert_eq!(element.children().len(), 1);
	assert_eq!(element.children()[0].name(), "and");
}

#[test]
fn test_values_are_escaped_when_compiled() {
	let filter = Property::new("lsServer", "descr").equals(r#"a<b & "c""#);
	assert_eq!(
		filter.to_xml(),
		r#"<eq class="lsServer" property="descr" value="a&lt;b &amp; &quot;c&quot;"/>"#
	);
}

#[test]
fn test_composing_with_plain_value_is_type_mismatch() {
	let err = p(1).try_and(5).unwrap_err();
	assert!(matches!(err, Error::TypeMismatch(_)));
	let err = p(1).try_or("web").unwrap_err();
	assert!(matches!(err, Error::TypeMismatch(_)));
	assert!(Operand::from(true).into_filter().is_err());

	let ok = p(1).try_and(p(2)).unwrap();
	assert_eq!(ok, p(1) & p(2));
}

#[test]
fn test_parse_predicates_and_operators() {
	let cases = [
		("lsServer.name == web", Operator::Equals, "web"),
		("lsServer.name != web", Operator::NotEquals, "web"),
		("lsServer.n > 1", Operator::GreaterThan, "1"),
		("lsServer.n >= 1", Operator::GreaterOrEqual, "1"),
		("lsServer.n < 1", Operator::LessThan, "1"),
		("lsServer.n <= 1", Operator::LessOrEqual, "1"),
		("lsServer.name ~= \"web *\"", Operator::Wildcard, "web *"),
		("faultInst.severity anybit critical,major", Operator::AnyBit, "critical,major"),
		("faultInst.severity allbit major", Operator::AllBits, "major"),
	];
	for (input, operator, value) in cases {
		let filter: Filter = input.parse().unwrap();
		let predicate = filter.as_predicate().unwrap_or_else(|| panic!("{input}"));
		assert_eq!(predicate.operator(), operator, "{input}");
		assert_eq!(predicate.value(), value, "{input}");
	}
}

#[test]
fn test_parse_precedence_and_flattening() {
	let parsed: Filter = "a.x == 1 | a.x == 2 & !a.x == 3".parse().unwrap();
	let x = Property::new("a", "x");
	assert_eq!(parsed, x.equals(1) | (x.equals(2) & !x.equals(3)));

	let parsed: Filter = "(a.x == 1 & a.x == 2) & a.x == 3".parse().unwrap();
	assert_eq!(operand_count(&parsed), 3);

	let parsed: Filter = "!(a.x==1|a.x==2)".parse().unwrap();
	assert_eq!(parsed, !(x.equals(1) | x.equals(2)));
}

#[test]
fn test_parse_rejects_bad_syntax() {
	for input in ["", "a.x ==", "a.x == 1 &", "(a.x == 1", "a.x === 1 )", "a.x between 1"] {
		let err = input.parse::<Filter>().unwrap_err();
		assert!(matches!(err, Error::FilterSyntax { .. }), "{input:?} gave {err:?}");
	}
}

#[test]
fn test_parse_plain_value_is_type_mismatch() {
	for input in ["5", "a.x == 1 & 5", "!web", "web | a.x == 1"] {
		let err = input.parse::<Filter>().unwrap_err();
		assert!(matches!(err, Error::TypeMismatch(_)), "{input:?} gave {err:?}");
	}
}
