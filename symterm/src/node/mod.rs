//! The [`Node`] type, the closed set of everything that can appear in an expression tree.

pub mod iter;
mod ops;

use indexmap::IndexSet;
use rug::{Complex, Float, Integer};
use std::fmt::{self, Display, Formatter};
use crate::algebra::{group::Group, term::Term};
use crate::bindings::Bindings;
use crate::comparity::{Comparity, Relation};
use crate::error::Error;
use crate::expression::Expression;
use crate::function::Function;
use crate::numeric::Number;
use crate::operation::{OpKind, Operation};
use crate::solve::Solve;
use iter::NodeIter;

/// A node of an expression tree.
///
/// Nodes are plain values: every arithmetic operation consumes its operands and builds a new node,
/// so a node handed out by one operation can never be changed through another.
///
/// Literals enter the tree through [`From`]: a string becomes a [`Term`] with that name, and a
/// number becomes a [`Number`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A number in closed form.
    Number(Number),

    /// A named unknown with a coefficient and a power.
    Term(Term),

    /// A product of distinct named unknowns with a shared coefficient.
    Group(Group),

    /// An operation over two or more child nodes.
    Expr(Expression),

    /// A function applied to a parameter node.
    Func(Function),
}

impl Node {
    /// Returns true if the node is the number zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Node::Number(n) if n.is_zero())
    }

    /// Returns true if the node is the number one.
    pub fn is_one(&self) -> bool {
        matches!(self, Node::Number(n) if n.is_one())
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Node::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Node::Term(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&Expression> {
        match self {
            Node::Expr(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&Function> {
        match self {
            Node::Func(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the direct children of this node: the operands of an expression, or the
    /// parameter, coefficient and power of a function.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Number(_) | Node::Term(_) | Node::Group(_) => Vec::new(),
            Node::Expr(e) => e.root().children().iter().collect(),
            Node::Func(f) => vec![f.parameter(), f.coefficient(), f.power()],
        }
    }

    /// Returns an iterator that traverses the tree in left-to-right post-order (i.e.
    /// depth-first).
    pub fn post_order_iter(&self) -> NodeIter<'_> {
        NodeIter::new(self)
    }

    /// Returns the names of every unknown in the tree, in the order they first appear.
    pub fn unknowns(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        for node in self.post_order_iter() {
            match node {
                Node::Term(term) => {
                    names.insert(term.name().to_string());
                },
                Node::Group(group) => {
                    names.extend(group.members().iter().map(|member| member.name().to_string()));
                },
                _ => (),
            }
        }
        names
    }

    /// The binding power of the operator at the root of this node, used to decide where
    /// parentheses are needed when rendering. Leaves have no operator.
    pub(crate) fn precedence(&self) -> Option<u8> {
        match self {
            Node::Expr(e) => Some(e.kind().precedence()),
            _ => None,
        }
    }

    /// Raises the node to the given power.
    pub fn pow(self, rhs: impl Into<Node>) -> Result<Node, Error> {
        match (self, rhs.into()) {
            (Node::Number(l), Node::Number(r)) => l.pow(r).map(Node::Number),
            (Node::Term(t), rhs) => t.pow(rhs),
            (Node::Group(g), rhs) => g.pow(rhs),
            (Node::Func(f), rhs) => f.pow(rhs),
            (Node::Expr(e), rhs) => e.pow(rhs),
            (lhs, rhs) => Ok(Operation::binary(OpKind::Power, lhs, rhs)),
        }
    }

    /// Floor division: the quotient rounded towards negative infinity.
    pub fn floor_div(self, rhs: impl Into<Node>) -> Result<Node, Error> {
        match (self, rhs.into()) {
            (Node::Number(l), Node::Number(r)) => l.floor_div(r).map(Node::Number),
            (lhs, rhs) => Ok(Operation::binary(OpKind::IntegerQuotient, lhs, rhs)),
        }
    }

    /// Builds the comparison `self == rhs`.
    pub fn equal_to(self, rhs: impl Into<Node>) -> Comparity {
        Comparity::new(self, Relation::Equal, rhs)
    }

    /// Builds the comparison `self != rhs`.
    pub fn not_equal_to(self, rhs: impl Into<Node>) -> Comparity {
        Comparity::new(self, Relation::NotEqual, rhs)
    }

    /// Builds the comparison `self > rhs`.
    pub fn greater_than(self, rhs: impl Into<Node>) -> Comparity {
        Comparity::new(self, Relation::Greater, rhs)
    }

    /// Builds the comparison `self >= rhs`.
    pub fn greater_equal(self, rhs: impl Into<Node>) -> Comparity {
        Comparity::new(self, Relation::GreaterEqual, rhs)
    }

    /// Builds the comparison `self < rhs`.
    pub fn less_than(self, rhs: impl Into<Node>) -> Comparity {
        Comparity::new(self, Relation::Less, rhs)
    }

    /// Builds the comparison `self <= rhs`.
    pub fn less_equal(self, rhs: impl Into<Node>) -> Comparity {
        Comparity::new(self, Relation::LessEqual, rhs)
    }
}

impl Solve for Node {
    /// Numbers solve to themselves, and functions are [evaluated](Function::evaluate), which
    /// never fails.
    fn solve(&self, bindings: &Bindings) -> Result<Node, Error> {
        match self {
            Node::Number(_) => Ok(self.clone()),
            Node::Term(t) => t.solve(bindings),
            Node::Group(g) => g.solve(bindings),
            Node::Expr(e) => e.solve(bindings),
            Node::Func(f) => Ok(f.evaluate(bindings).into_node()),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Node::Number(n) => n.fmt(f),
            Node::Term(t) => t.fmt(f),
            Node::Group(g) => g.fmt(f),
            Node::Expr(e) => e.fmt(f),
            Node::Func(func) => func.fmt(f),
        }
    }
}

impl From<Number> for Node {
    fn from(n: Number) -> Self {
        Node::Number(n)
    }
}

impl From<Term> for Node {
    fn from(t: Term) -> Self {
        Node::Term(t)
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Node::Group(g)
    }
}

impl From<Expression> for Node {
    fn from(e: Expression) -> Self {
        Node::Expr(e)
    }
}

impl From<Operation> for Node {
    fn from(op: Operation) -> Self {
        Node::Expr(Expression::new(op))
    }
}

impl From<Function> for Node {
    fn from(f: Function) -> Self {
        Node::Func(f)
    }
}

/// A name is an unknown with coefficient and power one.
impl From<&str> for Node {
    fn from(name: &str) -> Self {
        Node::Term(Term::symbol(name))
    }
}

impl From<String> for Node {
    fn from(name: String) -> Self {
        Node::Term(Term::symbol(name))
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Node {
                fn from(n: $t) -> Self {
                    Node::Number(Number::from(n))
                }
            }
        )*
    };
}

from_number!(i32, i64, u32, u64, usize, f64, (f64, f64), Integer, Float, Complex);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::function::Function;
    use super::*;

    #[test]
    fn literal_conversion() {
        assert_eq!(Node::from("x"), Node::Term(Term::symbol("x")));
        assert!(matches!(Node::from(2), Node::Number(Number::Integer(_))));
        assert!(matches!(Node::from(2.5), Node::Number(Number::Float(_))));
        assert!(matches!(Node::from((1.0, 2.0)), Node::Number(Number::Complex(_))));
    }

    #[test]
    fn unknowns_in_order() {
        let expr = Node::from("y") * Node::from("x") + Function::sin("z") + Node::from("y");
        let names = expr.unknowns().into_iter().collect::<Vec<_>>();
        assert_eq!(names, vec!["y", "x", "z"]);
    }

    #[test]
    fn number_pow() {
        assert_eq!(Node::from(3).pow(2).unwrap(), Node::from(9));
    }

    #[test]
    fn symbolic_floor_div() {
        let node = Node::from(7).floor_div("x").unwrap();
        let Node::Expr(expr) = node else {
            panic!("expected an expression");
        };
        assert_eq!(expr.kind(), OpKind::IntegerQuotient);
        assert_eq!(expr.to_string(), "7 // x");
    }

    #[test]
    fn functions_always_solve() {
        let node = Node::Func(Function::sin("x"));
        assert_eq!(node.solve(&Bindings::new()).unwrap(), node);
    }
}
