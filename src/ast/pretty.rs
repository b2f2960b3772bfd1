//! S-expression rendering of the typed AST, used by the `ast` command.

use crate::ast::*;

impl Node {
    /// Pretty-prints the node as a single-line s-expression.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::ast::materialize_node;
    /// use serde_json::json;
    ///
    /// let node = materialize_node(&json!(["binary", "+", ["num", 1], ["name", "x"]])).unwrap();
    /// assert_eq!(node.pretty(), "(+ 1 x)");
    /// ```
    pub fn pretty(&self) -> String {
        grow_stack(|| self.render())
    }

    fn render(&self) -> String {
        match self {
            Node::Program(n) => list("program", pretty_all(&n.body)),
            Node::Function(n) => {
                let mut parts = vec![
                    n.name.clone().unwrap_or_else(|| "_".to_string()),
                    format!("({})", n.params.join(" ")),
                ];
                parts.extend(pretty_all(&n.body));
                list("function", parts)
            }
            Node::Return(n) => list("return", optional(&n.value)),
            Node::VariableDeclaration(n) => {
                let bindings = n.bindings.iter().map(pretty_binding).collect();
                list("var", bindings)
            }
            Node::ExpressionStatement(n) => list("stat", vec![n.expression.pretty()]),
            Node::Literal(n) => match &n.value {
                LiteralValue::Number(value) => value.to_string(),
                LiteralValue::String(value) => format!("{value:?}"),
            },
            Node::Identifier(n) => n.name.clone(),
            Node::Binary(n) => list(&n.operator, vec![n.left.pretty(), n.right.pretty()]),
            Node::ArrayLiteral(n) => list("array", pretty_all(&n.elements)),
            Node::Call(n) => list("call", prepend(n.callee.pretty(), pretty_all(&n.arguments))),
            Node::RegexLiteral(n) => format!("/{}/{}", n.pattern, n.flags),
            Node::ObjectLiteral(n) => {
                let properties = n.properties.iter().map(pretty_property).collect();
                list("object", properties)
            }
            Node::Block(n) => list("block", pretty_all(&n.body)),
            Node::If(n) => {
                let mut parts = vec![n.condition.pretty(), n.consequent.pretty()];
                parts.extend(optional(&n.alternate));
                list("if", parts)
            }
            Node::Assignment(n) => list(&n.operator, vec![n.target.pretty(), n.value.pretty()]),
            Node::UnaryPrefix(n) => list("prefix", vec![n.operator.clone(), n.operand.pretty()]),
            Node::UnaryPostfix(n) => list("postfix", vec![n.operator.clone(), n.operand.pretty()]),
            Node::New(n) => list("new", prepend(n.constructor.pretty(), pretty_all(&n.arguments))),
            Node::MemberAccess(n) => match &n.property {
                MemberProperty::Named(name) => list(".", vec![n.object.pretty(), name.clone()]),
                MemberProperty::Computed(index) => {
                    list("[]", vec![n.object.pretty(), index.pretty()])
                }
            },
            Node::Try(n) => {
                let mut parts = vec![list("block", pretty_all(&n.body))];
                if let Some(handler) = &n.handler {
                    parts.push(list(
                        "catch",
                        prepend(handler.param.clone(), pretty_all(&handler.body)),
                    ));
                }
                if let Some(finalizer) = &n.finalizer {
                    parts.push(list("finally", pretty_all(finalizer)));
                }
                list("try", parts)
            }
            Node::Throw(n) => list("throw", vec![n.value.pretty()]),
            Node::While(n) => list("while", vec![n.condition.pretty(), n.body.pretty()]),
            Node::DoWhile(n) => list("do-while", vec![n.condition.pretty(), n.body.pretty()]),
            Node::Switch(n) => {
                let cases = n.cases.iter().map(pretty_case);
                list("switch", prepend(n.discriminant.pretty(), cases.collect()))
            }
            Node::For(n) => list(
                "for",
                vec![
                    placeholder(&n.init),
                    placeholder(&n.condition),
                    placeholder(&n.update),
                    n.body.pretty(),
                ],
            ),
            Node::ForIn(n) => list(
                "for-in",
                vec![
                    n.init.pretty(),
                    n.lhs.pretty(),
                    n.object.pretty(),
                    n.body.pretty(),
                ],
            ),
            Node::Sequence(n) => list("seq", pretty_all(&n.expressions)),
            Node::Ternary(n) => list(
                "?:",
                vec![
                    n.condition.pretty(),
                    n.consequent.pretty(),
                    n.alternate.pretty(),
                ],
            ),
            Node::Break(n) => list("break", n.label.iter().cloned().collect()),
            Node::Continue(n) => list("continue", n.label.iter().cloned().collect()),
            Node::Labeled(n) => list("label", vec![n.label.clone(), n.body.pretty()]),
        }
    }
}

// ----------------------------------------------------------------------------
// Pretty-printing helpers
// ----------------------------------------------------------------------------

fn list(head: &str, parts: Vec<String>) -> String {
    if parts.is_empty() {
        return format!("({head})");
    }
    format!("({} {})", head, parts.join(" "))
}

fn prepend(first: String, mut rest: Vec<String>) -> Vec<String> {
    rest.insert(0, first);
    rest
}

fn pretty_all(nodes: &NodeCollection) -> Vec<String> {
    nodes.iter().map(Node::pretty).collect()
}

fn optional(node: &Option<Box<Node>>) -> Vec<String> {
    node.iter().map(|n| n.pretty()).collect()
}

/// Absent `for` header clauses render as `_` so positions stay readable.
fn placeholder(node: &Option<Box<Node>>) -> String {
    node.as_ref().map_or_else(|| "_".to_string(), |n| n.pretty())
}

fn pretty_binding(binding: &Binding) -> String {
    match &binding.init {
        Some(init) => format!("({} {})", binding.name, init.pretty()),
        None => format!("({})", binding.name),
    }
}

fn pretty_property(property: &Property) -> String {
    let entry = format!("{} {}", property.key, property.value.pretty());
    match property.accessor {
        Some(accessor) => format!("({} {entry})", accessor.as_str()),
        None => format!("({entry})"),
    }
}

fn pretty_case(case: &Case) -> String {
    let body = pretty_all(&case.body);
    match &case.test {
        CaseTest::Expression(test) => list("case", prepend(test.pretty(), body)),
        CaseTest::Default => list("default", body),
    }
}
