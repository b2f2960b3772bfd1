//! Visitor protocol for the typed AST.
//!
//! Two traits:
//!
//! - [`Visitor`]: one callback per node kind, all defaulting to a no-op.
//!   Implement it and override only the kinds a pass cares about. A visitor
//!   never recurses on its own; it only reacts.
//! - [`Accept`]: implemented by every node type (and by `NodeCollection`,
//!   `Option` and `Box` of them). `accept` fires the node's own callback
//!   first, then propagates to every child field in declaration order.
//!
//! Recursion lives here, in one place, so no variant can silently prune a
//! subtree.
//!
//! ```rust
//! use arbor::ast::{materialize_node, Call};
//! use arbor::visit::{Accept, Visitor};
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct Callees(Vec<String>);
//!
//! impl Visitor for Callees {
//!     fn visit_call(&mut self, node: &Call) {
//!         if let Some(name) = node.callee.as_identifier() {
//!             self.0.push(name.to_string());
//!         }
//!     }
//! }
//!
//! let tree = json!(["toplevel", [["stat", ["call", ["name", "print"], [["string", "hi"]]]]]]);
//! let mut callees = Callees::default();
//! materialize_node(&tree).unwrap().accept(&mut callees);
//! assert_eq!(callees.0, ["print"]);
//! ```

use crate::ast::*;

// ============================================================================
// VISITOR
// ============================================================================

/// Per-kind callbacks, fired in pre-order. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Visitor {
    /// Fired before the kind-specific callback of every node, positional
    /// kinds included.
    fn before_visit(&mut self, kind: NodeKind) {}

    fn visit_program(&mut self, node: &Program) {}
    fn visit_function(&mut self, node: &Function) {}
    fn visit_return(&mut self, node: &Return) {}
    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) {}
    fn visit_binding(&mut self, node: &Binding) {}
    fn visit_expression_statement(&mut self, node: &ExpressionStatement) {}
    fn visit_literal(&mut self, node: &Literal) {}
    fn visit_identifier(&mut self, node: &Identifier) {}
    fn visit_binary(&mut self, node: &Binary) {}
    fn visit_array_literal(&mut self, node: &ArrayLiteral) {}
    fn visit_call(&mut self, node: &Call) {}
    fn visit_regex_literal(&mut self, node: &RegexLiteral) {}
    fn visit_object_literal(&mut self, node: &ObjectLiteral) {}
    fn visit_property(&mut self, node: &Property) {}
    fn visit_block(&mut self, node: &Block) {}
    fn visit_if(&mut self, node: &If) {}
    fn visit_assignment(&mut self, node: &Assignment) {}
    fn visit_unary_prefix(&mut self, node: &Unary) {}
    fn visit_unary_postfix(&mut self, node: &Unary) {}
    fn visit_new(&mut self, node: &New) {}
    fn visit_member_access(&mut self, node: &MemberAccess) {}
    fn visit_try(&mut self, node: &Try) {}
    fn visit_exception_handler(&mut self, node: &ExceptionHandler) {}
    fn visit_throw(&mut self, node: &Throw) {}
    fn visit_while(&mut self, node: &While) {}
    fn visit_do_while(&mut self, node: &DoWhile) {}
    fn visit_switch(&mut self, node: &Switch) {}
    fn visit_case(&mut self, node: &Case) {}
    fn visit_for(&mut self, node: &For) {}
    fn visit_for_in(&mut self, node: &ForIn) {}
    fn visit_sequence(&mut self, node: &Sequence) {}
    fn visit_ternary(&mut self, node: &Ternary) {}
    fn visit_break(&mut self, node: &Break) {}
    fn visit_continue(&mut self, node: &Continue) {}
    fn visit_labeled(&mut self, node: &Labeled) {}
}

// ============================================================================
// ACCEPT
// ============================================================================

/// Pre-order traversal entry point.
pub trait Accept {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V);
}

impl Accept for Node {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        grow_stack(|| walk_node(self, visitor));
    }
}

fn walk_node<V: Visitor + ?Sized>(node: &Node, visitor: &mut V) {
    visitor.before_visit(node.kind());
    match node {
        Node::Program(node) => {
            visitor.visit_program(node);
            node.body.accept(visitor);
        }
        Node::Function(node) => {
            visitor.visit_function(node);
            node.body.accept(visitor);
        }
        Node::Return(node) => {
            visitor.visit_return(node);
            node.value.accept(visitor);
        }
        Node::VariableDeclaration(node) => {
            visitor.visit_variable_declaration(node);
            node.bindings.accept(visitor);
        }
        Node::ExpressionStatement(node) => {
            visitor.visit_expression_statement(node);
            node.expression.accept(visitor);
        }
        Node::Literal(node) => visitor.visit_literal(node),
        Node::Identifier(node) => visitor.visit_identifier(node),
        Node::Binary(node) => {
            visitor.visit_binary(node);
            node.left.accept(visitor);
            node.right.accept(visitor);
        }
        Node::ArrayLiteral(node) => {
            visitor.visit_array_literal(node);
            node.elements.accept(visitor);
        }
        Node::Call(node) => {
            visitor.visit_call(node);
            node.callee.accept(visitor);
            node.arguments.accept(visitor);
        }
        Node::RegexLiteral(node) => visitor.visit_regex_literal(node),
        Node::ObjectLiteral(node) => {
            visitor.visit_object_literal(node);
            node.properties.accept(visitor);
        }
        Node::Block(node) => {
            visitor.visit_block(node);
            node.body.accept(visitor);
        }
        Node::If(node) => {
            visitor.visit_if(node);
            node.condition.accept(visitor);
            node.consequent.accept(visitor);
            node.alternate.accept(visitor);
        }
        Node::Assignment(node) => {
            visitor.visit_assignment(node);
            node.target.accept(visitor);
            node.value.accept(visitor);
        }
        Node::UnaryPrefix(node) => {
            visitor.visit_unary_prefix(node);
            node.operand.accept(visitor);
        }
        Node::UnaryPostfix(node) => {
            visitor.visit_unary_postfix(node);
            node.operand.accept(visitor);
        }
        Node::New(node) => {
            visitor.visit_new(node);
            node.constructor.accept(visitor);
            node.arguments.accept(visitor);
        }
        Node::MemberAccess(node) => {
            visitor.visit_member_access(node);
            node.object.accept(visitor);
            if let MemberProperty::Computed(index) = &node.property {
                index.accept(visitor);
            }
        }
        Node::Try(node) => {
            visitor.visit_try(node);
            node.body.accept(visitor);
            node.handler.accept(visitor);
            node.finalizer.accept(visitor);
        }
        Node::Throw(node) => {
            visitor.visit_throw(node);
            node.value.accept(visitor);
        }
        Node::While(node) => {
            visitor.visit_while(node);
            node.condition.accept(visitor);
            node.body.accept(visitor);
        }
        Node::DoWhile(node) => {
            visitor.visit_do_while(node);
            node.condition.accept(visitor);
            node.body.accept(visitor);
        }
        Node::Switch(node) => {
            visitor.visit_switch(node);
            node.discriminant.accept(visitor);
            node.cases.accept(visitor);
        }
        Node::For(node) => {
            visitor.visit_for(node);
            node.init.accept(visitor);
            node.condition.accept(visitor);
            node.update.accept(visitor);
            node.body.accept(visitor);
        }
        Node::ForIn(node) => {
            visitor.visit_for_in(node);
            node.init.accept(visitor);
            node.lhs.accept(visitor);
            node.object.accept(visitor);
            node.body.accept(visitor);
        }
        Node::Sequence(node) => {
            visitor.visit_sequence(node);
            node.expressions.accept(visitor);
        }
        Node::Ternary(node) => {
            visitor.visit_ternary(node);
            node.condition.accept(visitor);
            node.consequent.accept(visitor);
            node.alternate.accept(visitor);
        }
        Node::Break(node) => visitor.visit_break(node),
        Node::Continue(node) => visitor.visit_continue(node),
        Node::Labeled(node) => {
            visitor.visit_labeled(node);
            node.body.accept(visitor);
        }
    }
}

// ----------------------------------------------------------------------------
// Positional kinds
// ----------------------------------------------------------------------------

impl Accept for Binding {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.before_visit(NodeKind::Binding);
        visitor.visit_binding(self);
        self.init.accept(visitor);
    }
}

impl Accept for Property {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.before_visit(NodeKind::Property);
        visitor.visit_property(self);
        self.value.accept(visitor);
    }
}

impl Accept for ExceptionHandler {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.before_visit(NodeKind::ExceptionHandler);
        visitor.visit_exception_handler(self);
        self.body.accept(visitor);
    }
}

impl Accept for Case {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.before_visit(NodeKind::Case);
        visitor.visit_case(self);
        if let CaseTest::Expression(test) = &self.test {
            test.accept(visitor);
        }
        self.body.accept(visitor);
    }
}

// ----------------------------------------------------------------------------
// Containers: no callback of their own, children in order
// ----------------------------------------------------------------------------

impl<T: Accept> Accept for NodeCollection<T> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for item in self {
            item.accept(visitor);
        }
    }
}

impl<T: Accept> Accept for Option<T> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        if let Some(inner) = self {
            inner.accept(visitor);
        }
    }
}

impl<T: Accept + ?Sized> Accept for Box<T> {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        (**self).accept(visitor);
    }
}
