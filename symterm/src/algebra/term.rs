use std::{fmt::{self, Display, Formatter}, ops::{Add, Div, Mul, Neg}};
use crate::bindings::Bindings;
use crate::error::{kind::UnboundName, Error};
use crate::node::Node;
use crate::numeric::Number;
use crate::operation::{OpKind, Operation};
use crate::solve::Solve;
use super::{fmt_coefficient, fmt_power, group::Group};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named unknown with a numeric coefficient and power, the atomic unit of algebra.
///
/// A term solves to `(coefficient * value)^power`, where `value` is the value bound to its name.
///
/// Terms never hold a zero coefficient or a zero power: [`Term::new`] collapses those to a
/// [`Number`] instead.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    name: String,
    coefficient: Number,
    power: Number,
}

impl Term {
    /// Creates the unknown `name`, with coefficient and power one.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coefficient: Number::from(1),
            power: Number::from(1),
        }
    }

    /// Creates a term with the given coefficient and power.
    ///
    /// A zero coefficient produces the number zero, and a zero power produces the coefficient
    /// itself.
    pub fn new(name: impl Into<String>, coefficient: impl Into<Number>, power: impl Into<Number>) -> Node {
        let (coefficient, power) = (coefficient.into(), power.into());
        if coefficient.is_zero() {
            Node::from(0)
        } else if power.is_zero() {
            Node::Number(coefficient)
        } else {
            Node::Term(Self { name: name.into(), coefficient, power })
        }
    }

    /// Creates the unknown `name` raised to `power`, with coefficient one. The power must not be
    /// zero.
    pub(crate) fn unit(name: impl Into<String>, power: Number) -> Self {
        Self { name: name.into(), coefficient: Number::from(1), power }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coefficient(&self) -> &Number {
        &self.coefficient
    }

    pub fn power(&self) -> &Number {
        &self.power
    }

    /// Returns true if the two terms can be added into one: they have the same name and power.
    pub fn is_similar(&self, other: &Term) -> bool {
        self.name == other.name && self.power == other.power
    }

    /// Returns the term with the magnitude of its coefficient.
    pub fn abs(self) -> Term {
        Term { coefficient: self.coefficient.abs(), ..self }
    }

    /// Splits the term into its coefficient and the same term with coefficient one.
    pub(crate) fn split_coefficient(self) -> (Number, Term) {
        let coefficient = self.coefficient;
        (coefficient, Term { coefficient: Number::from(1), ..self })
    }

    /// Raises the term to the given power.
    ///
    /// A numeric exponent `k` raises the coefficient to `k` and multiplies the power by `k`, the
    /// same as multiplying the term by itself `k` times. Any other exponent builds a
    /// [`Power`](OpKind::Power) operation.
    pub fn pow(self, rhs: impl Into<Node>) -> Result<Node, Error> {
        match rhs.into() {
            Node::Number(k) => {
                let coefficient = self.coefficient.pow(k.clone())?;
                Ok(Term::new(self.name, coefficient, self.power * k))
            },
            rhs => Ok(Operation::binary(OpKind::Power, Node::Term(self), rhs)),
        }
    }

    /// The span covering the whole rendered term, used to point errors at it.
    fn span(&self) -> Vec<std::ops::Range<usize>> {
        vec![0..self.to_string().len()]
    }
}

impl Solve for Term {
    /// Substitutes the value bound to the term's name, failing with [`UnboundName`] if there is
    /// none.
    fn solve(&self, bindings: &Bindings) -> Result<Node, Error> {
        let value = bindings.get(&self.name)
            .cloned()
            .ok_or_else(|| Error::new(self.span(), UnboundName { name: self.name.clone() }))?;

        (Node::Number(self.coefficient.clone()) * value)
            .pow(Node::Number(self.power.clone()))
            .map_err(|err| err.or_spans(|| self.span()))
    }
}

impl<T: Into<Node>> Add<T> for Term {
    type Output = Node;

    fn add(self, rhs: T) -> Node {
        match rhs.into() {
            Node::Term(other) if self.is_similar(&other) => {
                Term::new(self.name, self.coefficient + other.coefficient, self.power)
            },
            rhs => Operation::sum(vec![Node::Term(self), rhs]),
        }
    }
}

impl<T: Into<Node>> Mul<T> for Term {
    type Output = Node;

    fn mul(self, rhs: T) -> Node {
        match rhs.into() {
            Node::Number(n) => Term::new(self.name, self.coefficient * n, self.power),
            Node::Term(other) if other.name == self.name => Term::new(
                self.name,
                self.coefficient * other.coefficient,
                self.power + other.power,
            ),
            Node::Term(other) => Group::new(1, [self, other]),
            Node::Group(group) => group * self,
            Node::Func(func) => func * self,
            Node::Expr(expr) => expr * self,
        }
    }
}

/// Dividing by a term with the same name subtracts powers, which may leave a negative power.
/// Dividing by a group cancels against the group's member of the same name. Anything else builds
/// a [`Quotient`](OpKind::Quotient).
impl<T: Into<Node>> Div<T> for Term {
    type Output = Result<Node, Error>;

    fn div(self, rhs: T) -> Self::Output {
        match rhs.into() {
            Node::Term(other) if other.name == self.name => Ok(Term::new(
                self.name,
                (self.coefficient / other.coefficient)?,
                self.power - other.power,
            )),
            Node::Group(group) => group.divide_into(self),
            rhs => Ok(Operation::binary(OpKind::Quotient, Node::Term(self), rhs)),
        }
    }
}

impl Neg for Term {
    type Output = Node;

    fn neg(self) -> Node {
        Term::new(self.name, -self.coefficient, self.power)
    }
}

/// The power applies to the coefficient too, so a term with both is written `(3x)^2`.
impl Display for Term {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.coefficient.is_one() || self.power.is_one() {
            fmt_coefficient(f, &self.coefficient)?;
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "(")?;
            fmt_coefficient(f, &self.coefficient)?;
            write!(f, "{})", self.name)?;
        }
        fmt_power(f, &self.power)
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Term::symbol(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use crate::error::kind::UnboundName;
    use super::*;

    fn term(name: &str, coefficient: i64, power: i64) -> Term {
        match Term::new(name, coefficient, power) {
            Node::Term(t) => t,
            other => panic!("expected a term, got {}", other),
        }
    }

    #[test]
    fn collapse_rules() {
        assert_eq!(Term::new("x", 0, 3), Node::from(0));
        assert_eq!(Term::new("x", 4, 0), Node::from(4));
        assert!(matches!(Term::new("x", 4, 2), Node::Term(_)));
    }

    #[test]
    fn same_name_product_stays_a_term() {
        let product = Term::symbol("x") * Term::symbol("x");
        let Node::Term(t) = product else {
            panic!("expected a term");
        };
        assert_eq!(t.name(), "x");
        assert_eq!(t.power(), &Number::from(2));
    }

    #[test]
    fn different_names_make_a_group() {
        let product = Term::symbol("x") * Term::symbol("y");
        let Node::Group(group) = product else {
            panic!("expected a group");
        };
        let mapping = group.as_mapping();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["x"].power(), &Number::from(1));
        assert_eq!(mapping["y"].power(), &Number::from(1));
    }

    #[test]
    fn coefficients_move_into_the_group() {
        let product = term("x", 2, 1) * term("y", 3, 1);
        let Node::Group(group) = product else {
            panic!("expected a group");
        };
        assert_eq!(group.coefficient(), &Number::from(6));
        assert!(group.members().iter().all(|m| m.coefficient().is_one()));
    }

    #[test]
    fn scale_by_number() {
        assert_eq!(term("x", 2, 3) * 4, Term::new("x", 8, 3));
        assert_eq!(term("x", 2, 3) * 0, Node::from(0));
    }

    #[test]
    fn divide_same_name() {
        assert_eq!((term("x", 6, 3) / term("x", 2, 1)).unwrap(), Term::new("x", 3, 2));
        assert_eq!((term("x", 6, 1) / term("x", 2, 3)).unwrap(), Term::new("x", 3, -2));
        assert_eq!((Term::symbol("x") / Term::symbol("x")).unwrap(), Node::from(1));
    }

    #[test]
    fn divide_otherwise_builds_quotient() {
        let node = (Term::symbol("x") / Term::symbol("y")).unwrap();
        assert_eq!(node.as_expr().map(|e| e.kind()), Some(OpKind::Quotient));
        assert_eq!(node.to_string(), "x / y");
    }

    #[test]
    fn add_dissimilar_builds_sum() {
        let node = term("x", 1, 2) + term("x", 1, 1);
        assert_eq!(node.as_expr().map(|e| e.kind()), Some(OpKind::Sum));
        assert_eq!(node.to_string(), "x^2 + x");
    }

    #[test]
    fn raise_to_power() {
        assert_eq!(term("x", 2, 3).pow(2).unwrap(), Term::new("x", 4, 6));
        assert_eq!(term("x", 2, 3).pow(0).unwrap(), Node::from(1));
        let node = Term::symbol("x").pow("n").unwrap();
        assert_eq!(node.to_string(), "x ^ n");
    }

    #[test]
    fn solve_unbound() {
        let err = Term::symbol("x").solve(&Bindings::new()).unwrap_err();
        assert_eq!(err.downcast_ref::<UnboundName>(), Some(&UnboundName { name: "x".to_string() }));
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn solve_symbolic_value() {
        let bindings = Bindings::new().with("x", "y");
        assert_eq!(term("x", 3, 1).solve(&bindings).unwrap(), Term::new("y", 3, 1));
    }

    #[test]
    fn display() {
        assert_eq!(term("x", 1, 1).to_string(), "x");
        assert_eq!(term("x", 3, 1).to_string(), "3x");
        assert_eq!(term("x", 1, 2).to_string(), "x^2");
        assert_eq!(term("x", -1, 2).to_string(), "(-x)^2");
        assert_eq!(term("x", 3, -1).to_string(), "(3x)^-1");
    }

    #[test]
    fn display_matches_value() {
        let t = term("x", 3, 2);
        assert_eq!(t.to_string(), "(3x)^2");
        assert_eq!(t.solve(&Bindings::new().with("x", 1)).unwrap(), Node::from(9));
    }

    proptest! {
        #[test]
        fn similar_terms_add_coefficients(c1 in -1000i64..1000, c2 in -1000i64..1000, p in 1i64..5) {
            let sum = Term::new("x", c1, p) + Term::new("x", c2, p);
            prop_assert_eq!(sum, Term::new("x", c1 + c2, p));
        }

        #[test]
        fn solve_is_scaled_power(c in 1i64..20, p in 1i64..4, v in -20i64..20) {
            let t = term("x", c, p);
            let solved = t.solve(&Bindings::new().with("x", v)).unwrap();
            let expected = Number::from(c * v).pow(Number::from(p)).unwrap();
            prop_assert_eq!(solved, Node::Number(expected));
        }
    }
}
