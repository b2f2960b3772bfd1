//! Typed AST for Arbor.
//!
//! The materializer turns a tagged-array tree into these types. Every node
//! owns its children exclusively (a tree, never a graph) and is immutable
//! once built. `Node` is the sum type over all tag-decoded kinds; the four
//! positional kinds (`Binding`, `Property`, `Case`, `ExceptionHandler`) are
//! only ever reached through their parent's typed fields.
//!
//! # Examples
//!
//! ```rust
//! use arbor::ast::{materialize, NodeKind};
//! use serde_json::json;
//!
//! let tree = json!(["toplevel", [["stat", ["name", "x"]]]]);
//! let program = materialize(&tree).unwrap().unwrap();
//! assert_eq!(program.kind(), NodeKind::Program);
//! ```

use std::fmt;

use serde::Serialize;

pub mod builder;
pub mod pretty;
pub mod registry;

pub use builder::{materialize, materialize_node, materialize_slot};
pub use registry::Tag;

/// Free stack required before recursing into a child.
const STACK_RED_ZONE: usize = 32 * 1024;
/// Size of each stack segment allocated when the red zone is reached.
const STACK_SEGMENT: usize = 1024 * 1024;

/// Runs `f` on a fresh stack segment when the current one is nearly used up.
///
/// Left-associative operator chains nest one array per operand, so tree
/// depth follows source length. The materializer, the visitor walk and the
/// pretty-printer recurse through here.
pub(crate) fn grow_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, f)
}

// ============================================================================
// NODE KINDS
// ============================================================================

/// The resolved, strongly-typed variant name a tagged array decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Program,
    Function,
    Return,
    VariableDeclaration,
    Binding,
    ExpressionStatement,
    Literal,
    Identifier,
    Binary,
    ArrayLiteral,
    Call,
    RegexLiteral,
    ObjectLiteral,
    Property,
    Block,
    If,
    Assignment,
    UnaryPrefix,
    UnaryPostfix,
    New,
    MemberAccess,
    Try,
    ExceptionHandler,
    Throw,
    While,
    DoWhile,
    Switch,
    Case,
    For,
    ForIn,
    Sequence,
    Ternary,
    Break,
    Continue,
    Labeled,
}

impl NodeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::Function => "Function",
            NodeKind::Return => "Return",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::Binding => "Binding",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::Literal => "Literal",
            NodeKind::Identifier => "Identifier",
            NodeKind::Binary => "Binary",
            NodeKind::ArrayLiteral => "ArrayLiteral",
            NodeKind::Call => "Call",
            NodeKind::RegexLiteral => "RegexLiteral",
            NodeKind::ObjectLiteral => "ObjectLiteral",
            NodeKind::Property => "Property",
            NodeKind::Block => "Block",
            NodeKind::If => "If",
            NodeKind::Assignment => "Assignment",
            NodeKind::UnaryPrefix => "UnaryPrefix",
            NodeKind::UnaryPostfix => "UnaryPostfix",
            NodeKind::New => "New",
            NodeKind::MemberAccess => "MemberAccess",
            NodeKind::Try => "Try",
            NodeKind::ExceptionHandler => "ExceptionHandler",
            NodeKind::Throw => "Throw",
            NodeKind::While => "While",
            NodeKind::DoWhile => "DoWhile",
            NodeKind::Switch => "Switch",
            NodeKind::Case => "Case",
            NodeKind::For => "For",
            NodeKind::ForIn => "ForIn",
            NodeKind::Sequence => "Sequence",
            NodeKind::Ternary => "Ternary",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::Labeled => "Labeled",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// NODE COLLECTION
// ============================================================================

/// Ordered, possibly-empty sequence of children for variadic positions.
///
/// An empty collection means "no children"; a field that may be missing
/// altogether is typed `Option<NodeCollection<_>>` instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeCollection<T = Node> {
    items: Vec<T>,
}

impl<T> NodeCollection<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for NodeCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for NodeCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for NodeCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a NodeCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for NodeCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ============================================================================
// NODE
// ============================================================================

/// A materialized AST node. The variant is the node's kind and fixes its shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Node {
    Program(Program),
    Function(Function),
    Return(Return),
    VariableDeclaration(VariableDeclaration),
    ExpressionStatement(ExpressionStatement),
    Literal(Literal),
    Identifier(Identifier),
    Binary(Binary),
    ArrayLiteral(ArrayLiteral),
    Call(Call),
    RegexLiteral(RegexLiteral),
    ObjectLiteral(ObjectLiteral),
    Block(Block),
    If(If),
    Assignment(Assignment),
    UnaryPrefix(Unary),
    UnaryPostfix(Unary),
    New(New),
    MemberAccess(MemberAccess),
    Try(Try),
    Throw(Throw),
    While(While),
    DoWhile(DoWhile),
    Switch(Switch),
    For(For),
    ForIn(ForIn),
    Sequence(Sequence),
    Ternary(Ternary),
    Break(Break),
    Continue(Continue),
    Labeled(Labeled),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Program(_) => NodeKind::Program,
            Node::Function(_) => NodeKind::Function,
            Node::Return(_) => NodeKind::Return,
            Node::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            Node::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            Node::Literal(_) => NodeKind::Literal,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::Binary(_) => NodeKind::Binary,
            Node::ArrayLiteral(_) => NodeKind::ArrayLiteral,
            Node::Call(_) => NodeKind::Call,
            Node::RegexLiteral(_) => NodeKind::RegexLiteral,
            Node::ObjectLiteral(_) => NodeKind::ObjectLiteral,
            Node::Block(_) => NodeKind::Block,
            Node::If(_) => NodeKind::If,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::UnaryPrefix(_) => NodeKind::UnaryPrefix,
            Node::UnaryPostfix(_) => NodeKind::UnaryPostfix,
            Node::New(_) => NodeKind::New,
            Node::MemberAccess(_) => NodeKind::MemberAccess,
            Node::Try(_) => NodeKind::Try,
            Node::Throw(_) => NodeKind::Throw,
            Node::While(_) => NodeKind::While,
            Node::DoWhile(_) => NodeKind::DoWhile,
            Node::Switch(_) => NodeKind::Switch,
            Node::For(_) => NodeKind::For,
            Node::ForIn(_) => NodeKind::ForIn,
            Node::Sequence(_) => NodeKind::Sequence,
            Node::Ternary(_) => NodeKind::Ternary,
            Node::Break(_) => NodeKind::Break,
            Node::Continue(_) => NodeKind::Continue,
            Node::Labeled(_) => NodeKind::Labeled,
        }
    }

    /// The identifier name, if this node is an `Identifier`.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Node::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }
}

// ============================================================================
// VARIANT PAYLOADS
// ============================================================================

/// Top-level statement sequence of a source unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub body: NodeCollection,
}

/// Which raw tag a function came from; both decode to `Function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionForm {
    Declaration,
    Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub form: FunctionForm,
    /// `None` for anonymous function expressions.
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: NodeCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Return {
    pub value: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub bindings: NodeCollection<Binding>,
}

/// One `name = init` pair of a variable declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Binding {
    pub name: String,
    pub init: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Box<Node>,
}

/// Raw value of a literal; the variant is the literal's subtype.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binary {
    pub operator: String,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteral {
    pub elements: NodeCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub callee: Box<Node>,
    pub arguments: NodeCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegexLiteral {
    pub pattern: String,
    pub flags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectLiteral {
    pub properties: NodeCollection<Property>,
}

/// One entry of an object literal. Accessors carry the getter or setter
/// function as their value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Property {
    pub key: String,
    pub value: Box<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessor: Option<PropertyAccessor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyAccessor {
    Get,
    Set,
}

impl PropertyAccessor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PropertyAccessor::Get => "get",
            PropertyAccessor::Set => "set",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub body: NodeCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct If {
    pub condition: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// Full operator text: `=`, `+=`, `>>>=`, ...
    pub operator: String,
    pub target: Box<Node>,
    pub value: Box<Node>,
}

/// Shared payload of `UnaryPrefix` and `UnaryPostfix`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unary {
    pub operator: String,
    pub operand: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct New {
    pub constructor: Box<Node>,
    pub arguments: NodeCollection,
}

/// The property side of a member access: `a.b` or `a[b]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberProperty {
    Named(String),
    Computed(Box<Node>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberAccess {
    pub object: Box<Node>,
    pub property: MemberProperty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Try {
    pub body: NodeCollection,
    pub handler: Option<ExceptionHandler>,
    /// `None` when there is no `finally` clause at all.
    pub finalizer: Option<NodeCollection>,
}

/// The `catch (param) { body }` clause of a `Try`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ExceptionHandler {
    pub param: String,
    pub body: NodeCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Throw {
    pub value: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct While {
    pub condition: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoWhile {
    pub condition: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Switch {
    pub discriminant: Box<Node>,
    pub cases: NodeCollection<Case>,
}

/// The test of a switch case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseTest {
    Default,
    Expression(Box<Node>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Case {
    pub test: CaseTest,
    pub body: NodeCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct For {
    pub init: Option<Box<Node>>,
    pub condition: Option<Box<Node>>,
    pub update: Option<Box<Node>>,
    pub body: Box<Node>,
}

/// `for (init in object)`. `init` is the declaration or target expression as
/// written; `lhs` is the assigned target (the declared name for a `var`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForIn {
    pub init: Box<Node>,
    pub lhs: Box<Node>,
    pub object: Box<Node>,
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequence {
    pub expressions: NodeCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ternary {
    pub condition: Box<Node>,
    pub consequent: Box<Node>,
    pub alternate: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Break {
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Continue {
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Labeled {
    pub label: String,
    pub body: Box<Node>,
}
