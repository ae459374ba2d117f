//! Operation nodes: an operator applied to an ordered list of operands.

mod flatten;

use std::{fmt::{self, Display, Formatter}, ops::Range};
use tracing::debug;
use crate::bindings::Bindings;
use crate::error::{kind::InvalidArity, Error};
use crate::expression::Expression;
use crate::node::Node;
use crate::solve::Solve;
use flatten::flatten_sum;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The operator of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpKind {
    /// Addition of two or more operands.
    Sum,

    /// Multiplication of two or more operands.
    Product,

    /// Division.
    Quotient,

    /// Division rounded towards negative infinity.
    IntegerQuotient,

    /// The remainder of [`OpKind::IntegerQuotient`].
    Remainder,

    /// Exponentiation.
    Power,

    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitOr,
    BitXor,
}

impl OpKind {
    /// The name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Sum => "Sum",
            OpKind::Product => "Product",
            OpKind::Quotient => "Quotient",
            OpKind::IntegerQuotient => "IntegerQuotient",
            OpKind::Remainder => "Remainder",
            OpKind::Power => "Power",
            OpKind::ShiftLeft => "ShiftLeft",
            OpKind::ShiftRight => "ShiftRight",
            OpKind::BitAnd => "BitAnd",
            OpKind::BitOr => "BitOr",
            OpKind::BitXor => "BitXor",
        }
    }

    /// The symbol written between operands when rendering.
    pub fn symbol(&self) -> &'static str {
        match self {
            OpKind::Sum => "+",
            OpKind::Product => "*",
            OpKind::Quotient => "/",
            OpKind::IntegerQuotient => "//",
            OpKind::Remainder => "%",
            OpKind::Power => "^",
            OpKind::ShiftLeft => "<<",
            OpKind::ShiftRight => ">>",
            OpKind::BitAnd => "&",
            OpKind::BitOr => "|",
            OpKind::BitXor => "xor",
        }
    }

    /// The binding power of the operator. Higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            OpKind::BitOr => 1,
            OpKind::BitXor => 2,
            OpKind::BitAnd => 3,
            OpKind::ShiftLeft | OpKind::ShiftRight => 4,
            OpKind::Sum => 5,
            OpKind::Product | OpKind::Quotient | OpKind::IntegerQuotient | OpKind::Remainder => 6,
            OpKind::Power => 7,
        }
    }

    /// Returns true if the operation takes exactly two operands.
    pub fn is_binary(&self) -> bool {
        !matches!(self, OpKind::Sum | OpKind::Product)
    }

    /// Applies the operator to two solved operands.
    pub fn apply(&self, lhs: Node, rhs: Node) -> Result<Node, Error> {
        match self {
            OpKind::Sum => Ok(lhs + rhs),
            OpKind::Product => Ok(lhs * rhs),
            OpKind::Quotient => lhs / rhs,
            OpKind::IntegerQuotient => lhs.floor_div(rhs),
            OpKind::Remainder => lhs % rhs,
            OpKind::Power => lhs.pow(rhs),
            OpKind::ShiftLeft => lhs << rhs,
            OpKind::ShiftRight => lhs >> rhs,
            OpKind::BitAnd => lhs & rhs,
            OpKind::BitOr => lhs | rhs,
            OpKind::BitXor => lhs ^ rhs,
        }
    }

    fn arity_error(&self, given: usize) -> Error {
        Error::bare(InvalidArity {
            op: self.name(),
            expected: 2,
            exact: self.is_binary(),
            given,
        })
    }
}

impl Display for OpKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An operator applied to an ordered list of operands.
///
/// Operations are brought into canonical form as they are built: the operands of a
/// [`Sum`](OpKind::Sum) are flattened and like terms are merged, while every other operator keeps
/// its operands as given. [`Product`](OpKind::Product)s in particular are never rearranged; real
/// multiplication is folded by [`Term`](crate::Term) and [`Group`](crate::Group) arithmetic
/// before a product node is ever needed.
#[derive(Debug, Clone)]
pub struct Operation {
    kind: OpKind,
    children: Vec<Node>,
}

impl Operation {
    /// Creates an operation, checking that it has a valid number of operands: exactly two for
    /// binary operators, and at least two for sums and products.
    pub fn new(kind: OpKind, children: Vec<Node>) -> Result<Self, Error> {
        let given = children.len();
        let valid = if kind.is_binary() { given == 2 } else { given >= 2 };
        if !valid {
            return Err(kind.arity_error(given));
        }
        Ok(Self::assemble(kind, children))
    }

    /// Creates an operation without checking its arity. Sums built this way may end up with any
    /// number of operands after flattening.
    pub(crate) fn assemble(kind: OpKind, children: Vec<Node>) -> Self {
        let children = match kind {
            OpKind::Sum => flatten_sum(children),
            _ => children,
        };
        Self { kind, children }
    }

    /// Builds the sum of the given operands, reduced to a single node where possible.
    pub(crate) fn sum(children: Vec<Node>) -> Node {
        Self::assemble(OpKind::Sum, children).into_node()
    }

    /// Builds the product of the given operands, reduced to a single node where possible.
    pub(crate) fn product(children: Vec<Node>) -> Node {
        Self::assemble(OpKind::Product, children).into_node()
    }

    /// Builds a binary operation.
    pub(crate) fn binary(kind: OpKind, lhs: Node, rhs: Node) -> Node {
        Self::assemble(kind, vec![lhs, rhs]).into_node()
    }

    /// Converts the operation into a node. An empty sum is zero, and a sum or product with a
    /// single operand is that operand.
    pub fn into_node(mut self) -> Node {
        match (self.kind, self.children.len()) {
            (OpKind::Sum, 0) => Node::from(0),
            (OpKind::Product, 0) => Node::from(1),
            (OpKind::Sum | OpKind::Product, 1) => match self.children.pop() {
                Some(only) => only,
                None => Node::from(0),
            },
            _ => Node::Expr(Expression::new(self)),
        }
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Splits a binary operation into its two operands, or returns it unchanged if it does not
    /// have exactly two.
    pub(crate) fn into_pair(mut self) -> Result<(Node, Node), Self> {
        if self.children.len() != 2 {
            return Err(self);
        }
        match (self.children.pop(), self.children.pop()) {
            (Some(rhs), Some(lhs)) => Ok((lhs, rhs)),
            _ => Err(self),
        }
    }

    /// Returns true if the operand at `index` must be wrapped in parentheses when rendered.
    fn needs_parens(&self, index: usize, child: &Node) -> bool {
        let Some(child) = child.precedence() else {
            return false;
        };
        let own = self.kind.precedence();
        match self.kind {
            OpKind::Sum | OpKind::Product => child < own,
            OpKind::Power => child <= own,
            _ => child < own || (index > 0 && child == own),
        }
    }

    /// Renders the operation, returning the text and the span of each operand within it.
    pub fn render(&self) -> (String, Vec<Range<usize>>) {
        if self.children.is_empty() {
            let identity = if self.kind == OpKind::Product { "1" } else { "0" };
            return (identity.to_string(), Vec::new());
        }

        let mut out = String::new();
        let mut spans = Vec::with_capacity(self.children.len());
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(self.kind.symbol());
                out.push(' ');
            }

            let parens = self.needs_parens(i, child);
            if parens {
                out.push('(');
            }
            let start = out.len();
            out.push_str(&child.to_string());
            spans.push(start..out.len());
            if parens {
                out.push(')');
            }
        }
        (out, spans)
    }

    /// Solves every operand and folds the results with `fold`. Operands that fail to solve are
    /// folded in unsolved.
    fn reduce(&self, bindings: &Bindings, init: Node, fold: impl Fn(Node, Node) -> Node) -> Node {
        self.children.iter().fold(init, |acc, child| match child.solve(bindings) {
            Ok(value) => fold(acc, value),
            Err(err) => {
                debug!(op = %self.kind, child = %child, error = %err, "leaving operand unsolved");
                fold(acc, child.clone())
            },
        })
    }
}

impl Solve for Operation {
    /// Solves the operation.
    ///
    /// Sums and products tolerate operands that cannot be solved, leaving them in the residual
    /// result. Every other operator solves both operands strictly, so an error in either one is
    /// returned, with its spans moved to point into this operation's rendering.
    fn solve(&self, bindings: &Bindings) -> Result<Node, Error> {
        match self.kind {
            OpKind::Sum => Ok(self.reduce(bindings, Node::from(0), |acc, value| acc + value)),
            OpKind::Product => Ok(self.reduce(bindings, Node::from(1), |acc, value| acc * value)),
            kind => {
                let [lhs, rhs] = self.children.as_slice() else {
                    return Err(kind.arity_error(self.children.len()));
                };

                let spans = || self.render().1;
                let solve_operand = |operand: &Node, index: usize| {
                    operand.solve(bindings).map_err(|err| {
                        let start = spans().get(index).map_or(0, |span| span.start);
                        err.offset(start)
                    })
                };

                let lhs = solve_operand(lhs, 0)?;
                let rhs = solve_operand(rhs, 1)?;
                kind.apply(lhs, rhs).map_err(|err| err.or_spans(spans))
            },
        }
    }
}

impl PartialEq for Operation {
    /// Operands of sums and products are compared regardless of order. Every other operation
    /// compares its operands in order.
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.children.len() != other.children.len() {
            return false;
        }

        match self.kind {
            OpKind::Sum | OpKind::Product => {
                let mut unmatched = other.children.iter().collect::<Vec<_>>();
                self.children.iter().all(|child| {
                    match unmatched.iter().position(|candidate| *candidate == child) {
                        Some(i) => {
                            unmatched.swap_remove(i);
                            true
                        },
                        None => false,
                    }
                })
            },
            _ => self.children == other.children,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.render().0)
    }
}
