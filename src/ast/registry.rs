//! The fixed tag registry.
//!
//! Maps raw tag strings to [`Tag`] cases, and tags to the [`NodeKind`] they
//! decode to. The mapping is many-to-one: `defun`/`function` both become
//! `Function`, `dot`/`sub` both become `MemberAccess`, and the three value
//! tags split between `Literal` and `Identifier`.

use std::fmt;

use crate::ast::NodeKind;

/// One case per registered raw tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Toplevel,
    Defun,
    Function,
    Return,
    Var,
    Stat,
    Num,
    String,
    Name,
    Binary,
    Array,
    Call,
    Regexp,
    Object,
    Block,
    If,
    Assign,
    UnaryPrefix,
    UnaryPostfix,
    New,
    Dot,
    Sub,
    Try,
    Throw,
    While,
    Do,
    Switch,
    For,
    ForIn,
    Seq,
    Conditional,
    Break,
    Continue,
    Label,
}

impl Tag {
    /// Every registered tag, in registry order.
    pub const ALL: [Tag; 34] = [
        Tag::Toplevel,
        Tag::Defun,
        Tag::Function,
        Tag::Return,
        Tag::Var,
        Tag::Stat,
        Tag::Num,
        Tag::String,
        Tag::Name,
        Tag::Binary,
        Tag::Array,
        Tag::Call,
        Tag::Regexp,
        Tag::Object,
        Tag::Block,
        Tag::If,
        Tag::Assign,
        Tag::UnaryPrefix,
        Tag::UnaryPostfix,
        Tag::New,
        Tag::Dot,
        Tag::Sub,
        Tag::Try,
        Tag::Throw,
        Tag::While,
        Tag::Do,
        Tag::Switch,
        Tag::For,
        Tag::ForIn,
        Tag::Seq,
        Tag::Conditional,
        Tag::Break,
        Tag::Continue,
        Tag::Label,
    ];

    /// Resolves a raw tag string. `None` means the construct is unknown.
    pub fn lookup(raw: &str) -> Option<Tag> {
        let tag = match raw {
            "toplevel" => Tag::Toplevel,
            "defun" => Tag::Defun,
            "function" => Tag::Function,
            "return" => Tag::Return,
            "var" => Tag::Var,
            "stat" => Tag::Stat,
            "num" => Tag::Num,
            "string" => Tag::String,
            "name" => Tag::Name,
            "binary" => Tag::Binary,
            "array" => Tag::Array,
            "call" => Tag::Call,
            "regexp" => Tag::Regexp,
            "object" => Tag::Object,
            "block" => Tag::Block,
            "if" => Tag::If,
            "assign" => Tag::Assign,
            "unary-prefix" => Tag::UnaryPrefix,
            "unary-postfix" => Tag::UnaryPostfix,
            "new" => Tag::New,
            "dot" => Tag::Dot,
            "sub" => Tag::Sub,
            "try" => Tag::Try,
            "throw" => Tag::Throw,
            "while" => Tag::While,
            "do" => Tag::Do,
            "switch" => Tag::Switch,
            "for" => Tag::For,
            "for-in" => Tag::ForIn,
            "seq" => Tag::Seq,
            "conditional" => Tag::Conditional,
            "break" => Tag::Break,
            "continue" => Tag::Continue,
            "label" => Tag::Label,
            _ => return None,
        };
        Some(tag)
    }

    /// The raw tag string, exactly as the upstream parser spells it.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Tag::Toplevel => "toplevel",
            Tag::Defun => "defun",
            Tag::Function => "function",
            Tag::Return => "return",
            Tag::Var => "var",
            Tag::Stat => "stat",
            Tag::Num => "num",
            Tag::String => "string",
            Tag::Name => "name",
            Tag::Binary => "binary",
            Tag::Array => "array",
            Tag::Call => "call",
            Tag::Regexp => "regexp",
            Tag::Object => "object",
            Tag::Block => "block",
            Tag::If => "if",
            Tag::Assign => "assign",
            Tag::UnaryPrefix => "unary-prefix",
            Tag::UnaryPostfix => "unary-postfix",
            Tag::New => "new",
            Tag::Dot => "dot",
            Tag::Sub => "sub",
            Tag::Try => "try",
            Tag::Throw => "throw",
            Tag::While => "while",
            Tag::Do => "do",
            Tag::Switch => "switch",
            Tag::For => "for",
            Tag::ForIn => "for-in",
            Tag::Seq => "seq",
            Tag::Conditional => "conditional",
            Tag::Break => "break",
            Tag::Continue => "continue",
            Tag::Label => "label",
        }
    }

    /// The node kind this tag decodes to.
    pub const fn kind(&self) -> NodeKind {
        match self {
            Tag::Toplevel => NodeKind::Program,
            Tag::Defun | Tag::Function => NodeKind::Function,
            Tag::Return => NodeKind::Return,
            Tag::Var => NodeKind::VariableDeclaration,
            Tag::Stat => NodeKind::ExpressionStatement,
            Tag::Num | Tag::String => NodeKind::Literal,
            Tag::Name => NodeKind::Identifier,
            Tag::Binary => NodeKind::Binary,
            Tag::Array => NodeKind::ArrayLiteral,
            Tag::Call => NodeKind::Call,
            Tag::Regexp => NodeKind::RegexLiteral,
            Tag::Object => NodeKind::ObjectLiteral,
            Tag::Block => NodeKind::Block,
            Tag::If => NodeKind::If,
            Tag::Assign => NodeKind::Assignment,
            Tag::UnaryPrefix => NodeKind::UnaryPrefix,
            Tag::UnaryPostfix => NodeKind::UnaryPostfix,
            Tag::New => NodeKind::New,
            Tag::Dot | Tag::Sub => NodeKind::MemberAccess,
            Tag::Try => NodeKind::Try,
            Tag::Throw => NodeKind::Throw,
            Tag::While => NodeKind::While,
            Tag::Do => NodeKind::DoWhile,
            Tag::Switch => NodeKind::Switch,
            Tag::For => NodeKind::For,
            Tag::ForIn => NodeKind::ForIn,
            Tag::Seq => NodeKind::Sequence,
            Tag::Conditional => NodeKind::Ternary,
            Tag::Break => NodeKind::Break,
            Tag::Continue => NodeKind::Continue,
            Tag::Label => NodeKind::Labeled,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
