//! Operator overloads on [`Node`].
//!
//! A pair of numbers is folded right away. Every other pair is routed to the left operand's own
//! arithmetic (see [`Term`], [`Group`], [`Expression`] and [`Function`]), which decides whether
//! the result can be reduced or must be kept as a new [`Operation`].

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Shl, Shr, Sub};
use crate::algebra::{group::Group, term::Term};
use crate::error::Error;
use crate::expression::Expression;
use crate::function::Function;
use crate::numeric::Number;
use crate::operation::{OpKind, Operation};
use super::Node;

impl<T: Into<Node>> Add<T> for Node {
    type Output = Node;

    fn add(self, rhs: T) -> Node {
        match (self, rhs.into()) {
            (Node::Number(l), Node::Number(r)) => Node::Number(l + r),
            (Node::Term(t), rhs) => t + rhs,
            (Node::Group(g), rhs) => g + rhs,
            (Node::Func(f), rhs) => f + rhs,
            (Node::Expr(e), rhs) => e + rhs,
            (lhs, rhs) => Operation::sum(vec![lhs, rhs]),
        }
    }
}

impl<T: Into<Node>> Sub<T> for Node {
    type Output = Node;

    fn sub(self, rhs: T) -> Node {
        self + -rhs.into()
    }
}

/// Multiplication by an expression is always handled by the expression, so that sums and
/// quotients can distribute the other operand over their children.
impl<T: Into<Node>> Mul<T> for Node {
    type Output = Node;

    fn mul(self, rhs: T) -> Node {
        match (self, rhs.into()) {
            (Node::Number(l), Node::Number(r)) => Node::Number(l * r),
            (Node::Expr(e), rhs) | (rhs, Node::Expr(e)) => e * rhs,
            (Node::Term(t), rhs) => t * rhs,
            (Node::Group(g), rhs) => g * rhs,
            (Node::Func(f), rhs) => f * rhs,
            (lhs @ Node::Number(_), rhs) => rhs * lhs,
        }
    }
}

impl<T: Into<Node>> Div<T> for Node {
    type Output = Result<Node, Error>;

    fn div(self, rhs: T) -> Self::Output {
        match (self, rhs.into()) {
            (Node::Number(l), Node::Number(r)) => (l / r).map(Node::Number),
            (Node::Term(t), rhs) => t / rhs,
            (Node::Group(g), rhs) => g / rhs,
            (Node::Func(f), rhs) => f / rhs,
            (Node::Expr(e), rhs) => e / rhs,
            (lhs, rhs) => Ok(Operation::binary(OpKind::Quotient, lhs, rhs)),
        }
    }
}

impl Neg for Node {
    type Output = Node;

    fn neg(self) -> Node {
        match self {
            Node::Number(n) => Node::Number(-n),
            Node::Term(t) => -t,
            Node::Group(g) => -g,
            Node::Func(f) => -f,
            Node::Expr(e) => -e,
        }
    }
}

/// Build an operator that folds two numbers and otherwise builds the matching operation.
macro_rules! build_fallible {
    ($($trait:ident $method:ident; $kind:expr),* $(,)?) => {
        $(
            impl<T: Into<Node>> $trait<T> for Node {
                type Output = Result<Node, Error>;

                fn $method(self, rhs: T) -> Self::Output {
                    match (self, rhs.into()) {
                        (Node::Number(l), Node::Number(r)) => l.$method(r).map(Node::Number),
                        (lhs, rhs) => Ok(Operation::binary($kind, lhs, rhs)),
                    }
                }
            }
        )*
    };
}

build_fallible! {
    Rem rem; OpKind::Remainder,
    Shl shl; OpKind::ShiftLeft,
    Shr shr; OpKind::ShiftRight,
    BitAnd bitand; OpKind::BitAnd,
    BitOr bitor; OpKind::BitOr,
    BitXor bitxor; OpKind::BitXor,
}

/// Forward the operators that have no type-specific rules to [`Node`].
macro_rules! forward_to_node {
    (@fallible $ty:ty; $($trait:ident $method:ident),*) => {
        $(
            impl<T: Into<Node>> $trait<T> for $ty {
                type Output = Result<Node, Error>;

                fn $method(self, rhs: T) -> Self::Output {
                    Node::from(self).$method(rhs)
                }
            }
        )*
    };
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: Into<Node>> Sub<T> for $ty {
                type Output = Node;

                fn sub(self, rhs: T) -> Node {
                    Node::from(self) - rhs
                }
            }

            forward_to_node!(@fallible $ty; Rem rem, Shl shl, Shr shr, BitAnd bitand, BitOr bitor, BitXor bitxor);

            impl $ty {
                /// Floor division. See [`Node::floor_div`].
                pub fn floor_div(self, rhs: impl Into<Node>) -> Result<Node, Error> {
                    Node::from(self).floor_div(rhs)
                }
            }
        )*
    };
}

forward_to_node!(Term, Group, Expression, Function);

/// Numbers keep their own closed arithmetic with other numbers; these overloads accept any node
/// on the right.
macro_rules! number_with_node {
    ($($trait:ident $method:ident -> $output:ty),* $(,)?) => {
        $(
            impl $trait<Node> for Number {
                type Output = $output;

                fn $method(self, rhs: Node) -> $output {
                    Node::Number(self).$method(rhs)
                }
            }
        )*
    };
}

number_with_node! {
    Add add -> Node,
    Sub sub -> Node,
    Mul mul -> Node,
    Div div -> Result<Node, Error>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::error::kind::DivideByZero;
    use crate::{Bindings, Function, Solve};
    use super::*;

    #[test]
    fn numbers_fold() {
        assert_eq!(Node::from(2) + 3, Node::from(5));
        assert_eq!(Node::from(2) - 3, Node::from(-1));
        assert_eq!(Node::from(2) * 3.5, Node::from(7.0));
        assert_eq!((Node::from(9) / 3).unwrap(), Node::from(3));
        assert_eq!((Node::from(9) % 4).unwrap(), Node::from(1));
        assert_eq!((Node::from(1) << 3).unwrap(), Node::from(8));
    }

    #[test]
    fn number_on_the_left() {
        let node = Node::from(3) * Term::symbol("x");
        assert_eq!(node, Term::new("x", 3, 1));

        let node = Number::from(2) + Node::from("y");
        assert_eq!(node.to_string(), "2 + y");
    }

    #[test]
    fn symbolic_operators_build_operations() {
        let node = (Term::symbol("x") % 3).unwrap();
        assert_eq!(node.to_string(), "x % 3");

        let node = Term::symbol("x").floor_div(2).unwrap();
        assert_eq!(node.to_string(), "x // 2");

        let node = (Term::symbol("x") ^ Term::symbol("y")).unwrap();
        assert_eq!(node.as_expr().map(Expression::kind), Some(OpKind::BitXor));

        let node = (Group::new(1, [Term::symbol("a"), Term::symbol("b")]) >> 1).unwrap();
        assert_eq!(node.to_string(), "ab >> 1");
    }

    #[test]
    fn subtraction_negates() {
        let node = Term::symbol("x") - Term::symbol("x");
        assert_eq!(node, Node::from(0));

        let node = Function::cos("t") - Function::cos("t");
        assert_eq!(node, Node::from(0));
    }

    #[test]
    fn division_by_zero_is_not_checked_symbolically() {
        let node = (Term::symbol("x") / 0).unwrap();
        let err = node.solve(&Bindings::new().with("x", 1)).unwrap_err();
        assert!(err.is::<DivideByZero>());
    }
}
