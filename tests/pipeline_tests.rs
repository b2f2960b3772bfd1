// tests/pipeline_tests.rs
//
// The per-unit pipeline with the shipped JSON parser and with a stand-in
// upstream parser plugged in through the `TreeParser` seam.

use arbor::ast::{Binary, NodeKind};
use arbor::pipeline::{process_unit, process_units, SourceUnit};
use arbor::syntax::{JsonTreeParser, TaggedTree};
use arbor::visit::{Accept, Visitor};
use arbor::{ArborError, ErrorContext, ErrorType};
use miette::Report;
use serde_json::json;

/// Pretends every source text is `print(<text>)`.
fn print_parser(source_text: &str) -> Result<TaggedTree, ArborError> {
    if source_text.is_empty() {
        return Err(ArborError::Parse {
            message: "empty unit".to_string(),
            ctx: ErrorContext::with_help("the stand-in parser needs some text"),
            source: None,
        });
    }
    Ok(json!(["toplevel", [["stat", ["call", ["name", "print"], [["string", source_text]]]]]]))
}

#[test]
fn test_custom_parser_plugs_into_pipeline() {
    let unit = SourceUnit::new("hello.js", "hello");
    let node = process_unit(&print_parser, &unit).unwrap();
    assert_eq!(node.kind(), NodeKind::Program);
    assert_eq!(node.pretty(), r#"(program (stat (call print "hello")))"#);
}

#[test]
fn test_parser_failure_is_reported_before_materialization() {
    let unit = SourceUnit::new("empty.js", "");
    let err = process_unit(&print_parser, &unit).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Parse);
}

#[test]
fn test_json_parse_error_names_the_unit() {
    let unit = SourceUnit::new("broken.json", r#"["toplevel", "#);
    let err = process_unit(&JsonTreeParser, &unit).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Parse);
    let rendered = format!("{:?}", Report::new(err));
    assert!(rendered.contains("broken.json"), "{rendered}");
}

#[test]
fn test_many_units_in_parallel_keep_input_order() {
    let units: Vec<_> = (0..64)
        .map(|i| SourceUnit::new(format!("unit-{i}.json"), format!(r#"["num", {i}]"#)))
        .collect();
    let outcomes = process_units(&JsonTreeParser, &units);
    assert_eq!(outcomes.len(), 64);
    for (i, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.name, format!("unit-{i}.json"));
        let node = outcome.result.as_ref().unwrap();
        assert_eq!(node.pretty(), i.to_string());
    }
}

#[test]
fn test_one_bad_unit_does_not_affect_the_others() {
    let units = vec![
        SourceUnit::new("a.json", r#"["name", "a"]"#),
        SourceUnit::new("b.json", r#"["toplevel", [["ex", "e"]]]"#),
        SourceUnit::new("c.json", r#"["name", "c"]"#),
    ];
    let kinds: Vec<_> = process_units(&JsonTreeParser, &units)
        .into_iter()
        .map(|o| o.result.map(|n| n.kind()).map_err(|e| e.error_type()))
        .collect();
    assert_eq!(
        kinds,
        [
            Ok(NodeKind::Identifier),
            Err(ErrorType::UnknownConstruct),
            Ok(NodeKind::Identifier),
        ]
    );
}

#[derive(Default)]
struct BinaryCount(usize);

impl Visitor for BinaryCount {
    fn visit_binary(&mut self, _: &Binary) {
        self.0 += 1;
    }
}

/// `a + a + ... + a` as the upstream parser nests it: one array per operator.
fn left_associated_chain(operators: usize) -> String {
    format!(
        r#"["toplevel", [["stat", {}["name", "a"]{}]]]"#,
        r#"["binary", "+", "#.repeat(operators),
        r#", ["name", "a"]]"#.repeat(operators)
    )
}

#[test]
fn test_deeply_nested_operator_chain_materializes() {
    let unit = SourceUnit::new("chain.json", left_associated_chain(1_000));
    let node = process_unit(&JsonTreeParser, &unit).unwrap();
    assert_eq!(node.kind(), NodeKind::Program);

    let mut count = BinaryCount::default();
    node.accept(&mut count);
    assert_eq!(count.0, 1_000);
}
