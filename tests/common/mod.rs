//! Shared helpers for the integration tests.
#![allow(dead_code)]

use arbor::ast::*;
use arbor::visit::Visitor;
use serde_json::{json, Value};

/// Records the name of every callback in firing order.
#[derive(Debug, Default)]
pub struct CallbackLog {
    pub calls: Vec<&'static str>,
}

impl Visitor for CallbackLog {
    fn visit_program(&mut self, _: &Program) {
        self.calls.push("visit_program");
    }
    fn visit_function(&mut self, _: &Function) {
        self.calls.push("visit_function");
    }
    fn visit_return(&mut self, _: &Return) {
        self.calls.push("visit_return");
    }
    fn visit_variable_declaration(&mut self, _: &VariableDeclaration) {
        self.calls.push("visit_variable_declaration");
    }
    fn visit_binding(&mut self, _: &Binding) {
        self.calls.push("visit_binding");
    }
    fn visit_expression_statement(&mut self, _: &ExpressionStatement) {
        self.calls.push("visit_expression_statement");
    }
    fn visit_literal(&mut self, _: &Literal) {
        self.calls.push("visit_literal");
    }
    fn visit_identifier(&mut self, _: &Identifier) {
        self.calls.push("visit_identifier");
    }
    fn visit_binary(&mut self, _: &Binary) {
        self.calls.push("visit_binary");
    }
    fn visit_array_literal(&mut self, _: &ArrayLiteral) {
        self.calls.push("visit_array_literal");
    }
    fn visit_call(&mut self, _: &Call) {
        self.calls.push("visit_call");
    }
    fn visit_regex_literal(&mut self, _: &RegexLiteral) {
        self.calls.push("visit_regex_literal");
    }
    fn visit_object_literal(&mut self, _: &ObjectLiteral) {
        self.calls.push("visit_object_literal");
    }
    fn visit_property(&mut self, _: &Property) {
        self.calls.push("visit_property");
    }
    fn visit_block(&mut self, _: &Block) {
        self.calls.push("visit_block");
    }
    fn visit_if(&mut self, _: &If) {
        self.calls.push("visit_if");
    }
    fn visit_assignment(&mut self, _: &Assignment) {
        self.calls.push("visit_assignment");
    }
    fn visit_unary_prefix(&mut self, _: &Unary) {
        self.calls.push("visit_unary_prefix");
    }
    fn visit_unary_postfix(&mut self, _: &Unary) {
        self.calls.push("visit_unary_postfix");
    }
    fn visit_new(&mut self, _: &New) {
        self.calls.push("visit_new");
    }
    fn visit_member_access(&mut self, _: &MemberAccess) {
        self.calls.push("visit_member_access");
    }
    fn visit_try(&mut self, _: &Try) {
        self.calls.push("visit_try");
    }
    fn visit_exception_handler(&mut self, _: &ExceptionHandler) {
        self.calls.push("visit_exception_handler");
    }
    fn visit_throw(&mut self, _: &Throw) {
        self.calls.push("visit_throw");
    }
    fn visit_while(&mut self, _: &While) {
        self.calls.push("visit_while");
    }
    fn visit_do_while(&mut self, _: &DoWhile) {
        self.calls.push("visit_do_while");
    }
    fn visit_switch(&mut self, _: &Switch) {
        self.calls.push("visit_switch");
    }
    fn visit_case(&mut self, _: &Case) {
        self.calls.push("visit_case");
    }
    fn visit_for(&mut self, _: &For) {
        self.calls.push("visit_for");
    }
    fn visit_for_in(&mut self, _: &ForIn) {
        self.calls.push("visit_for_in");
    }
    fn visit_sequence(&mut self, _: &Sequence) {
        self.calls.push("visit_sequence");
    }
    fn visit_ternary(&mut self, _: &Ternary) {
        self.calls.push("visit_ternary");
    }
    fn visit_break(&mut self, _: &Break) {
        self.calls.push("visit_break");
    }
    fn visit_continue(&mut self, _: &Continue) {
        self.calls.push("visit_continue");
    }
    fn visit_labeled(&mut self, _: &Labeled) {
        self.calls.push("visit_labeled");
    }
}

/// Materializes `tree` and returns the callbacks fired by a full traversal.
pub fn callbacks(tree: &Value) -> Vec<&'static str> {
    use arbor::visit::Accept;

    let node = materialize_node(tree).expect("sample tree should materialize");
    let mut log = CallbackLog::default();
    node.accept(&mut log);
    log.calls
}

/// A small, well-formed sample tree for every registered tag.
pub fn sample(tag: Tag) -> Value {
    match tag {
        Tag::Toplevel => json!(["toplevel", [["stat", ["name", "a"]]]]),
        Tag::Defun => json!(["defun", "f", ["x"], [["return", ["name", "x"]]]]),
        Tag::Function => json!(["function", null, [], []]),
        Tag::Return => json!(["return", ["num", 1]]),
        Tag::Var => json!(["var", [["x", ["num", 1]], ["y"]]]),
        Tag::Stat => json!(["stat", ["name", "a"]]),
        Tag::Num => json!(["num", 1]),
        Tag::String => json!(["string", "s"]),
        Tag::Name => json!(["name", "a"]),
        Tag::Binary => json!(["binary", "+", ["num", 1], ["num", 2]]),
        Tag::Array => json!(["array", [["num", 1], ["string", "b"]]]),
        Tag::Call => json!(["call", ["name", "f"], [["num", 1]]]),
        Tag::Regexp => json!(["regexp", "a+", "g"]),
        Tag::Object => json!(["object", [["k", ["num", 1]]]]),
        Tag::Block => json!(["block", [["stat", ["name", "a"]]]]),
        Tag::If => json!(["if", ["name", "c"], ["block"], ["block"]]),
        Tag::Assign => json!(["assign", true, ["name", "a"], ["num", 1]]),
        Tag::UnaryPrefix => json!(["unary-prefix", "!", ["name", "a"]]),
        Tag::UnaryPostfix => json!(["unary-postfix", "++", ["name", "a"]]),
        Tag::New => json!(["new", ["name", "C"], [["num", 1]]]),
        Tag::Dot => json!(["dot", ["name", "a"], "b"]),
        Tag::Sub => json!(["sub", ["name", "a"], ["num", 0]]),
        Tag::Try => json!([
            "try",
            [["stat", ["name", "a"]]],
            ["e", [["stat", ["name", "e"]]]],
            [["stat", ["name", "b"]]]
        ]),
        Tag::Throw => json!(["throw", ["name", "e"]]),
        Tag::While => json!(["while", ["name", "c"], ["block"]]),
        Tag::Do => json!(["do", ["name", "c"], ["block"]]),
        Tag::Switch => json!([
            "switch",
            ["name", "x"],
            [[["num", 1], [["break", null]]], [null, []]]
        ]),
        Tag::For => json!([
            "for",
            ["var", [["i", ["num", 0]]]],
            ["binary", "<", ["name", "i"], ["num", 3]],
            ["unary-postfix", "++", ["name", "i"]],
            ["block"]
        ]),
        Tag::ForIn => json!([
            "for-in",
            ["var", [["k"]]],
            ["name", "k"],
            ["name", "o"],
            ["block"]
        ]),
        Tag::Seq => json!(["seq", ["name", "a"], ["name", "b"]]),
        Tag::Conditional => json!(["conditional", ["name", "c"], ["num", 1], ["num", 2]]),
        Tag::Break => json!(["break", "outer"]),
        Tag::Continue => json!(["continue", null]),
        Tag::Label => json!(["label", "outer", ["while", ["name", "c"], ["block"]]]),
    }
}

/// Counts `["name", _]`, `["num", _]` and `["string", _]` arrays in a raw tree.
pub fn raw_leaf_count(tree: &Value) -> usize {
    let Some(items) = tree.as_array() else {
        return 0;
    };
    let is_leaf = items.len() == 2
        && matches!(
            items[0].as_str(),
            Some("name") | Some("num") | Some("string")
        )
        && !items[1].is_array();
    if is_leaf {
        return 1;
    }
    items.iter().map(raw_leaf_count).sum()
}
