//! The [`Expression`] wrapper and its arithmetic.

use std::{fmt::{self, Display, Formatter}, ops::{Add, Div, Mul, Neg}};
use crate::bindings::Bindings;
use crate::error::Error;
use crate::node::Node;
use crate::operation::{OpKind, Operation};
use crate::solve::Solve;

/// A tree of nodes rooted at a single [`Operation`].
///
/// Arithmetic on an expression keeps the tree shallow where it can. Multiplying an expression whose
/// root is a [`Sum`](OpKind::Sum) distributes the other operand over every child, and multiplying
/// one whose root is a [`Quotient`](OpKind::Quotient) multiplies into its numerator (and, if the
/// other operand is a quotient too, its denominator). Everything else wraps both operands in a new
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: Operation,
}

impl Expression {
    /// Wraps the given operation.
    pub fn new(root: Operation) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Operation {
        &self.root
    }

    pub fn into_root(self) -> Operation {
        self.root
    }

    /// The operator at the root of the expression.
    pub fn kind(&self) -> OpKind {
        self.root.kind()
    }

    /// Raises the expression to the given power. Raising to one returns the expression itself.
    pub fn pow(self, rhs: impl Into<Node>) -> Result<Node, Error> {
        let rhs = rhs.into();
        if rhs.is_one() {
            return Ok(Node::Expr(self));
        }
        Ok(Operation::binary(OpKind::Power, Node::Expr(self), rhs))
    }
}

impl Solve for Expression {
    fn solve(&self, bindings: &Bindings) -> Result<Node, Error> {
        self.root.solve(bindings)
    }
}

impl<T: Into<Node>> Add<T> for Expression {
    type Output = Node;

    fn add(self, rhs: T) -> Node {
        Operation::sum(vec![Node::Expr(self), rhs.into()])
    }
}

impl<T: Into<Node>> Mul<T> for Expression {
    type Output = Node;

    fn mul(self, rhs: T) -> Node {
        let rhs = rhs.into();
        if rhs.is_one() {
            return Node::Expr(self);
        }

        match self.kind() {
            OpKind::Quotient => match self.root.into_pair() {
                Ok((numerator, denominator)) => match rhs {
                    Node::Expr(other) if other.kind() == OpKind::Quotient => {
                        match other.root.into_pair() {
                            Ok((top, bottom)) => Operation::binary(
                                OpKind::Quotient,
                                numerator * top,
                                denominator * bottom,
                            ),
                            Err(other) => Operation::binary(
                                OpKind::Quotient,
                                numerator * Node::from(other),
                                denominator,
                            ),
                        }
                    },
                    rhs => Operation::binary(OpKind::Quotient, numerator * rhs, denominator),
                },
                Err(root) => Operation::product(vec![Node::from(root), rhs]),
            },
            OpKind::Sum => {
                let children = self.root
                    .into_children()
                    .into_iter()
                    .map(|child| child * rhs.clone())
                    .collect();
                Operation::sum(children)
            },
            _ => Operation::product(vec![Node::Expr(self), rhs]),
        }
    }
}

impl<T: Into<Node>> Div<T> for Expression {
    type Output = Result<Node, Error>;

    fn div(self, rhs: T) -> Self::Output {
        let rhs = rhs.into();
        if rhs.is_one() {
            return Ok(Node::Expr(self));
        }
        Ok(Operation::binary(OpKind::Quotient, Node::Expr(self), rhs))
    }
}

impl Neg for Expression {
    type Output = Node;

    fn neg(self) -> Node {
        self * Node::from(-1)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.root.fmt(f)
    }
}

impl From<Operation> for Expression {
    fn from(root: Operation) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use pretty_assertions::assert_eq;
    use crate::error::kind::UnboundName;
    use crate::{Group, Term};
    use super::*;

    fn sum(children: Vec<Node>) -> Expression {
        Expression::new(Operation::new(OpKind::Sum, children).unwrap())
    }

    #[test]
    fn solve_bound_sum() {
        let expr = sum(vec![Node::from("x"), Node::from(5)]);
        assert_eq!(expr.solve(&Bindings::new().with("x", 3)).unwrap(), Node::from(8));
    }

    #[test]
    fn solve_leaves_residual() {
        let expr = sum(vec![Node::from("x"), Node::from("y")]);
        let residual = expr.solve(&Bindings::new().with("x", 2)).unwrap();
        assert!(matches!(residual, Node::Expr(_)));
        assert_eq!(residual.to_string(), "2 + y");

        let value = residual.solve(&Bindings::new().with("y", 4)).unwrap();
        assert_eq!(value, Node::from(6));
    }

    #[test]
    fn sum_distributes() {
        let expr = sum(vec![Node::from("x"), Node::from(1)]);
        let node = expr * 2;
        assert_eq!(node.to_string(), "2x + 2");

        let expr = sum(vec![Node::from("x"), Node::from(1)]);
        let node = expr * Term::symbol("y");
        let Node::Expr(product) = node else {
            panic!("expected an expression");
        };
        assert_eq!(product.kind(), OpKind::Sum);
        assert_eq!(product.root().children(), &[
            Group::new(1, [Term::symbol("x"), Term::symbol("y")]),
            Node::from("y"),
        ]);
    }

    #[test]
    fn quotient_multiplies_numerator() {
        let quotient = (Term::symbol("x") / Term::symbol("y")).unwrap();
        let node = quotient.clone() * 3;
        assert_eq!(node.to_string(), "3x / y");

        let other = (Term::symbol("a") / Term::symbol("b")).unwrap();
        let node = quotient * other;
        assert_eq!(node.to_string(), "xa / yb");
    }

    #[test]
    fn identities() {
        let expr = sum(vec![Node::from("x"), Node::from(1)]);
        assert_eq!(expr.clone() * 1, Node::Expr(expr.clone()));
        assert_eq!(expr.clone().pow(1).unwrap(), Node::Expr(expr.clone()));
        assert_eq!((expr.clone() / 1).unwrap(), Node::Expr(expr));
    }

    #[test]
    fn negate_distributes() {
        let expr = sum(vec![Node::from("x"), Node::from(1)]);
        assert_eq!((-expr).to_string(), "-x + -1");
    }

    #[test]
    fn add_flattens() {
        let expr = sum(vec![Node::from("x"), Node::from(1)]);
        let node = expr + Term::new("x", 2, 1);
        assert_eq!(node.to_string(), "3x + 1");
    }

    #[test]
    fn error_points_at_the_operand() {
        let numerator = sum(vec![Node::from("x"), Node::from(1)]);
        let expr = (numerator / Term::symbol("z")).unwrap();
        assert_eq!(expr.to_string(), "(x + 1) / z");

        let err = expr.solve(&Bindings::new().with("x", 1)).unwrap_err();
        assert!(err.is::<UnboundName>());
        assert_eq!(err.spans, vec![10..11]);

        let text = expr.to_string();
        let mut out = Vec::new();
        err.build_report("expr")
            .write(("expr", Source::from(text)), &mut out)
            .unwrap();
        let out = String::from_utf8(strip_ansi_escapes::strip(out)).unwrap();
        assert!(out.contains("`z` has no value"));
        assert!(out.contains("this unknown"));
    }
}
