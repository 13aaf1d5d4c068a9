use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::types::DataType;

/// Node Kinds
///
/// One case per grammar construct. The kind decides how many children a
/// node has and what they mean; see the parser for each layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Assignment,
    MathExpression,
    Expression,
    FunctionDef,
    Invocation,
    FunctionParams,
    CallParams,
    Statement,
    Loop,
    Conditional,
    IfBranch,
    ElseBranch,
    LogicalConnector,
    Condition,
    Comparison,
    Return,
    RaiseError,
    MainEntry,
    Block,
    BinaryOperator,
    BooleanLiteral,
    Comparator,
    TextLiteral,
    IntLiteral,
    FloatLiteral,
    Identifier,
    SwitchCase,
    CaseArm,
    ForLoop,
    TryCatch,
}

impl NodeKind {
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::BooleanLiteral
                | NodeKind::TextLiteral
                | NodeKind::IntLiteral
                | NodeKind::FloatLiteral
        )
    }

    /// Literals and identifiers: the nodes built straight from a value token.
    pub fn is_value(&self) -> bool {
        self.is_literal() || *self == NodeKind::Identifier
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One end of a bounded iteration, as computed for a `ForLoop`.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// A value folded down to an integer.
    Literal(i64),
    /// A value taken verbatim from the loop header.
    Value(Box<Node>),
    /// A value shifted by a constant, e.g. `limit + 1`.
    Offset(Box<Node>, i64),
    /// A value with its sign flipped.
    Negated(Box<Node>),
}

/// Structured `range` arguments for a `ForLoop`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForBounds {
    pub variable: String,
    pub start: Bound,
    pub stop: Bound,
    pub step: Bound,
}

impl ForBounds {
    pub fn has_unit_step(&self) -> bool {
        self.step == Bound::Literal(1)
    }
}

/// Facts the semantic analyzer attaches to a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotations {
    pub data_type: Option<DataType>,
    pub range: Option<ForBounds>,
}

/// AST Node
///
/// Every node exclusively owns its children. The shape of the tree is frozen
/// once parsing completes; only `annotations` change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub content: Option<String>,
    pub children: Vec<Node>,
    pub position: Position,
    pub annotations: Annotations,
}

impl Node {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Node {
            kind,
            content: None,
            children: vec![],
            position,
            annotations: Annotations::default(),
        }
    }

    /// A childless node carrying the text of the token it was built from.
    pub fn leaf(kind: NodeKind, content: impl Into<String>, position: Position) -> Self {
        Node {
            content: Some(content.into()),
            ..Node::new(kind, position)
        }
    }

    pub fn branch(kind: NodeKind, children: Vec<Node>, position: Position) -> Self {
        Node {
            children,
            ..Node::new(kind, position)
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }

    /// Returns the `index`-th child, or an internal fault if the tree does not
    /// have the shape the parser guarantees.
    pub fn child(&self, index: usize) -> Result<&Node, Error> {
        self.children.get(index).ok_or_else(|| self.malformed())
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut Node, Error> {
        if index < self.children.len() {
            Ok(&mut self.children[index])
        } else {
            Err(self.malformed())
        }
    }

    pub fn get_content(&self) -> Result<&str, Error> {
        self.content.as_deref().ok_or_else(|| self.malformed())
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.annotations.data_type
    }

    /// The inferred type, which every node has after analysis.
    pub fn expect_type(&self) -> Result<DataType, Error> {
        self.annotations.data_type.ok_or_else(|| {
            Error::new(
                ErrorImpl::MissingAnnotation {
                    node: self.kind.to_string(),
                    annotation: String::from("tipo"),
                },
                self.position,
                self.content.clone().unwrap_or_default(),
            )
        })
    }

    pub fn set_type(&mut self, data_type: DataType) {
        self.annotations.data_type = Some(data_type);
    }

    /// Counts literal and identifier nodes in the subtree.
    pub fn count_values(&self) -> usize {
        let own = usize::from(self.kind.is_value());
        own + self.children.iter().map(Node::count_values).sum::<usize>()
    }

    pub fn malformed(&self) -> Error {
        Error::new(
            ErrorImpl::MalformedNode {
                node: self.kind.to_string(),
            },
            self.position,
            self.content.clone().unwrap_or_default(),
        )
    }
}
