//! Materializer: tagged-array tree to typed [`Node`].
//!
//! Decoding is a single recursive pass. Slot 0 of every array is looked up
//! in the [`Tag`] registry; the matching builder reads its fields by fixed
//! position and recurses into child slots. There is no partial decoding:
//! the first unknown tag or mis-shaped slot aborts the whole unit.

use serde_json::Value;
use tracing::trace;

use crate::ast::*;
use crate::diagnostics::{malformed_shape, unknown_construct, ArborError};
use crate::syntax::TaggedTree;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Materializes a tagged tree. JSON `null` is the sanctioned "absent child"
/// and yields `Ok(None)`.
///
/// # Examples
///
/// ```rust
/// use arbor::ast::{materialize, Node};
/// use serde_json::{json, Value};
///
/// assert_eq!(materialize(&Value::Null).unwrap(), None);
/// let node = materialize(&json!(["name", "print"])).unwrap().unwrap();
/// assert_eq!(node.as_identifier(), Some("print"));
/// ```
pub fn materialize(tree: &TaggedTree) -> Result<Option<Node>, ArborError> {
    if tree.is_null() {
        return Ok(None);
    }
    build_node(tree).map(Some)
}

/// Materializes an array slot that may be missing altogether.
pub fn materialize_slot(slot: Option<&TaggedTree>) -> Result<Option<Node>, ArborError> {
    match slot {
        Some(tree) => materialize(tree),
        None => Ok(None),
    }
}

/// Materializes a tree that must be present; `null` is a malformed shape.
pub fn materialize_node(tree: &TaggedTree) -> Result<Node, ArborError> {
    build_node(tree)
}

// ============================================================================
// DISPATCH
// ============================================================================

fn build_node(tree: &TaggedTree) -> Result<Node, ArborError> {
    grow_stack(|| build_tagged(tree))
}

fn build_tagged(tree: &TaggedTree) -> Result<Node, ArborError> {
    let items = tree.as_array().ok_or_else(|| {
        malformed_shape(
            "tagged tree",
            format!("expected a tagged array, found {}", json_type(tree)),
            tree,
        )
    })?;
    let raw_tag = items
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| malformed_shape("tagged tree", "slot 0 must be a tag string", tree))?;
    let tag = Tag::lookup(raw_tag).ok_or_else(|| unknown_construct(raw_tag, tree))?;
    trace!(tag = %tag, kind = %tag.kind(), "materializing");

    let slots = Slots {
        construct: tag.as_str(),
        items,
        raw: tree,
    };

    let node = match tag {
        Tag::Toplevel => Node::Program(Program {
            body: slots.collection(1)?,
        }),
        Tag::Defun | Tag::Function => Node::Function(build_function(tag, &slots)?),
        Tag::Return => Node::Return(Return {
            value: slots.optional_node(1)?,
        }),
        Tag::Var => Node::VariableDeclaration(VariableDeclaration {
            bindings: slots.each(1, build_binding)?,
        }),
        Tag::Stat => Node::ExpressionStatement(ExpressionStatement {
            expression: slots.node(1)?,
        }),
        Tag::Num => Node::Literal(Literal {
            value: LiteralValue::Number(slots.number(1)?),
        }),
        Tag::String => Node::Literal(Literal {
            value: LiteralValue::String(slots.string(1)?),
        }),
        Tag::Name => Node::Identifier(Identifier {
            name: slots.string(1)?,
        }),
        Tag::Binary => Node::Binary(Binary {
            operator: slots.string(1)?,
            left: slots.node(2)?,
            right: slots.node(3)?,
        }),
        Tag::Array => Node::ArrayLiteral(ArrayLiteral {
            elements: slots.collection(1)?,
        }),
        Tag::Call => Node::Call(Call {
            callee: slots.node(1)?,
            arguments: slots.collection(2)?,
        }),
        Tag::Regexp => Node::RegexLiteral(RegexLiteral {
            pattern: slots.string(1)?,
            flags: slots.optional_string(2)?.unwrap_or_default(),
        }),
        Tag::Object => Node::ObjectLiteral(ObjectLiteral {
            properties: slots.each(1, build_property)?,
        }),
        Tag::Block => Node::Block(Block {
            body: slots.collection_or_empty(1)?,
        }),
        Tag::If => Node::If(If {
            condition: slots.node(1)?,
            consequent: slots.node(2)?,
            alternate: slots.optional_node(3)?,
        }),
        Tag::Assign => Node::Assignment(Assignment {
            operator: assignment_operator(&slots)?,
            target: slots.node(2)?,
            value: slots.node(3)?,
        }),
        Tag::UnaryPrefix => Node::UnaryPrefix(build_unary(&slots)?),
        Tag::UnaryPostfix => Node::UnaryPostfix(build_unary(&slots)?),
        Tag::New => Node::New(New {
            constructor: slots.node(1)?,
            arguments: slots.collection_or_empty(2)?,
        }),
        Tag::Dot => Node::MemberAccess(MemberAccess {
            object: slots.node(1)?,
            property: MemberProperty::Named(slots.string(2)?),
        }),
        Tag::Sub => Node::MemberAccess(MemberAccess {
            object: slots.node(1)?,
            property: MemberProperty::Computed(slots.node(2)?),
        }),
        Tag::Try => Node::Try(Try {
            body: slots.collection(1)?,
            handler: slots
                .present(2)
                .map(build_exception_handler)
                .transpose()?,
            finalizer: slots.optional_collection(3)?,
        }),
        Tag::Throw => Node::Throw(Throw {
            value: slots.node(1)?,
        }),
        Tag::While => Node::While(While {
            condition: slots.node(1)?,
            body: slots.node(2)?,
        }),
        Tag::Do => Node::DoWhile(DoWhile {
            condition: slots.node(1)?,
            body: slots.node(2)?,
        }),
        Tag::Switch => Node::Switch(Switch {
            discriminant: slots.node(1)?,
            cases: slots.each(2, build_case)?,
        }),
        Tag::For => Node::For(For {
            init: slots.optional_node(1)?,
            condition: slots.optional_node(2)?,
            update: slots.optional_node(3)?,
            body: slots.node(4)?,
        }),
        Tag::ForIn => Node::ForIn(ForIn {
            init: slots.node(1)?,
            lhs: slots.node(2)?,
            object: slots.node(3)?,
            body: slots.node(4)?,
        }),
        Tag::Seq => Node::Sequence(Sequence {
            expressions: slots.rest(1)?,
        }),
        Tag::Conditional => Node::Ternary(Ternary {
            condition: slots.node(1)?,
            consequent: slots.node(2)?,
            alternate: slots.node(3)?,
        }),
        Tag::Break => Node::Break(Break {
            label: slots.optional_string(1)?,
        }),
        Tag::Continue => Node::Continue(Continue {
            label: slots.optional_string(1)?,
        }),
        Tag::Label => Node::Labeled(Labeled {
            label: slots.string(1)?,
            body: slots.node(2)?,
        }),
    };

    Ok(node)
}

// ----------------------------------------------------------------------------
// Node-specific builders
// ----------------------------------------------------------------------------

fn build_function(tag: Tag, slots: &Slots<'_>) -> Result<Function, ArborError> {
    let form = match tag {
        Tag::Defun => FunctionForm::Declaration,
        _ => FunctionForm::Expression,
    };
    let params = slots
        .array(2)?
        .iter()
        .enumerate()
        .map(|(index, param)| {
            param.as_str().map(str::to_string).ok_or_else(|| {
                slots.malformed(format!(
                    "parameter {index} must be a string, found {}",
                    json_type(param)
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Function {
        form,
        name: slots.optional_string(1)?,
        params,
        body: slots.collection(3)?,
    })
}

fn build_unary(slots: &Slots<'_>) -> Result<Unary, ArborError> {
    Ok(Unary {
        operator: slots.string(1)?,
        operand: slots.node(2)?,
    })
}

/// `true` marks plain `=`; a string names the compound operator (`"+"` is `+=`).
fn assignment_operator(slots: &Slots<'_>) -> Result<String, ArborError> {
    match slots.present(1) {
        Some(Value::Bool(true)) => Ok("=".to_string()),
        Some(Value::String(op)) => Ok(format!("{op}=")),
        other => Err(slots.malformed(format!(
            "slot 1 must be `true` or an operator string, found {}",
            other.map_or("nothing", json_type)
        ))),
    }
}

/// `[name, init?]`
fn build_binding(pair: &Value) -> Result<Binding, ArborError> {
    let slots = Slots::positional("binding", pair)?;
    Ok(Binding {
        name: slots.string(0)?,
        init: slots.optional_node(1)?,
    })
}

/// `[key, value, ("get" | "set")?]`; numeric keys are kept in their source
/// spelling.
fn build_property(pair: &Value) -> Result<Property, ArborError> {
    let slots = Slots::positional("property", pair)?;
    let key = match slots.present(0) {
        Some(Value::String(key)) => key.clone(),
        Some(Value::Number(key)) => key.to_string(),
        other => {
            return Err(slots.malformed(format!(
                "slot 0 must be a property key, found {}",
                other.map_or("nothing", json_type)
            )))
        }
    };
    let accessor = match slots.optional_string(2)?.as_deref() {
        None => None,
        Some("get") => Some(PropertyAccessor::Get),
        Some("set") => Some(PropertyAccessor::Set),
        Some(other) => {
            return Err(slots.malformed(format!(
                "slot 2 must be \"get\" or \"set\", found \"{other}\""
            )))
        }
    };
    Ok(Property {
        key,
        value: slots.node(1)?,
        accessor,
    })
}

/// `[param, [stmt]]`
fn build_exception_handler(clause: &Value) -> Result<ExceptionHandler, ArborError> {
    let slots = Slots::positional("exception handler", clause)?;
    Ok(ExceptionHandler {
        param: slots.string(0)?,
        body: slots.collection(1)?,
    })
}

/// `[test | null, [stmt]]`; a null test is the `default` case.
fn build_case(clause: &Value) -> Result<Case, ArborError> {
    let slots = Slots::positional("case", clause)?;
    let test = match slots.optional_node(0)? {
        Some(expr) => CaseTest::Expression(expr),
        None => CaseTest::Default,
    };
    Ok(Case {
        test,
        body: slots.collection(1)?,
    })
}

// ============================================================================
// SLOT ACCESS
// ============================================================================

/// Positional view over one raw array, reporting errors against it.
struct Slots<'a> {
    construct: &'static str,
    items: &'a [Value],
    raw: &'a Value,
}

impl<'a> Slots<'a> {
    /// View over an untagged positional array (binding pairs, cases, ...).
    fn positional(construct: &'static str, raw: &'a Value) -> Result<Self, ArborError> {
        let items = raw.as_array().ok_or_else(|| {
            malformed_shape(
                construct,
                format!("expected an array, found {}", json_type(raw)),
                raw,
            )
        })?;
        Ok(Self {
            construct,
            items,
            raw,
        })
    }

    fn malformed(&self, message: impl Into<String>) -> ArborError {
        malformed_shape(self.construct, message, self.raw)
    }

    /// The slot's value; a missing slot and an explicit `null` are both absent.
    fn present(&self, index: usize) -> Option<&'a Value> {
        self.items.get(index).filter(|value| !value.is_null())
    }

    fn required(&self, index: usize, what: &str) -> Result<&'a Value, ArborError> {
        self.present(index)
            .ok_or_else(|| self.malformed(format!("slot {index} ({what}) is missing")))
    }

    fn node(&self, index: usize) -> Result<Box<Node>, ArborError> {
        let tree = self.required(index, "child node")?;
        build_node(tree).map(Box::new)
    }

    fn optional_node(&self, index: usize) -> Result<Option<Box<Node>>, ArborError> {
        self.present(index)
            .map(|tree| build_node(tree).map(Box::new))
            .transpose()
    }

    fn array(&self, index: usize) -> Result<&'a [Value], ArborError> {
        let value = self.required(index, "array")?;
        value.as_array().map(Vec::as_slice).ok_or_else(|| {
            self.malformed(format!(
                "slot {index} must be an array, found {}",
                json_type(value)
            ))
        })
    }

    fn collection(&self, index: usize) -> Result<NodeCollection, ArborError> {
        self.each(index, materialize_node)
    }

    fn collection_or_empty(&self, index: usize) -> Result<NodeCollection, ArborError> {
        Ok(self.optional_collection(index)?.unwrap_or_default())
    }

    fn optional_collection(&self, index: usize) -> Result<Option<NodeCollection>, ArborError> {
        if self.present(index).is_none() {
            return Ok(None);
        }
        self.collection(index).map(Some)
    }

    /// Decodes every element of the array at `index` with `build`.
    fn each<T>(
        &self,
        index: usize,
        build: impl Fn(&Value) -> Result<T, ArborError>,
    ) -> Result<NodeCollection<T>, ArborError> {
        self.array(index)?.iter().map(build).collect()
    }

    /// Every slot from `start` to the end, as nodes.
    fn rest(&self, start: usize) -> Result<NodeCollection, ArborError> {
        self.items
            .iter()
            .skip(start)
            .map(materialize_node)
            .collect()
    }

    fn string(&self, index: usize) -> Result<String, ArborError> {
        self.optional_string(index)?
            .ok_or_else(|| self.malformed(format!("slot {index} (string) is missing")))
    }

    fn optional_string(&self, index: usize) -> Result<Option<String>, ArborError> {
        match self.present(index) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.malformed(format!(
                "slot {index} must be a string, found {}",
                json_type(other)
            ))),
        }
    }

    fn number(&self, index: usize) -> Result<f64, ArborError> {
        let value = self.required(index, "number")?;
        value.as_f64().ok_or_else(|| {
            self.malformed(format!(
                "slot {index} must be a number, found {}",
                json_type(value)
            ))
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
