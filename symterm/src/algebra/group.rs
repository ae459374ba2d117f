use indexmap::IndexMap;
use std::{fmt::{self, Display, Formatter}, ops::{Add, Div, Mul, Neg}};
use tracing::trace;
use crate::bindings::Bindings;
use crate::error::{kind::UnboundName, Error};
use crate::node::Node;
use crate::numeric::Number;
use crate::operation::{OpKind, Operation};
use crate::solve::Solve;
use super::{fmt_coefficient, fmt_power, term::Term};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The members of a group keyed by name, each with coefficient one.
type Mapping = IndexMap<String, Term>;

/// Multiplies `name^power` into the mapping. A member whose power cancels to zero is removed.
fn merge(mapping: &mut Mapping, name: &str, power: Number) {
    let power = match mapping.get(name) {
        Some(existing) => existing.power().clone() + power,
        None => power,
    };

    if power.is_zero() {
        mapping.shift_remove(name);
    } else {
        mapping.insert(name.to_string(), Term::unit(name, power));
    }
}

/// A product of distinct named unknowns with one shared coefficient, such as `3xy^2`.
///
/// Every member has coefficient one, and no two members share a name. A group always has at
/// least two members: constructors collapse smaller products to a [`Term`] or a [`Number`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group {
    coefficient: Number,
    members: Vec<Term>,
}

impl Group {
    /// Creates the product of `coefficient` and the given terms.
    ///
    /// The coefficients of the terms are multiplied into the group coefficient, and terms with
    /// the same name are merged by adding their powers. The result collapses to zero if the
    /// coefficient is zero or no terms are given, and to a single [`Term`] if only one name
    /// remains.
    pub fn new(coefficient: impl Into<Number>, members: impl IntoIterator<Item = Term>) -> Node {
        let mut coefficient = coefficient.into();
        let mut mapping = Mapping::new();
        let mut given = 0;
        for member in members {
            let (member_coefficient, member) = member.split_coefficient();
            coefficient = coefficient * member_coefficient;
            merge(&mut mapping, member.name(), member.power().clone());
            given += 1;
        }

        if given == 0 {
            return Node::from(0);
        }
        Self::assemble(coefficient, mapping)
    }

    /// Builds the reduced node for a coefficient and an already merged mapping. Unlike
    /// [`Group::new`], an empty mapping means every member cancelled, leaving the coefficient.
    fn assemble(coefficient: Number, mapping: Mapping) -> Node {
        if coefficient.is_zero() {
            return Node::from(0);
        }

        let mut members = mapping.into_values().collect::<Vec<_>>();
        match (members.pop(), members.is_empty()) {
            (None, _) => Node::Number(coefficient),
            (Some(only), true) => Term::new(only.name(), coefficient, only.power().clone()),
            (Some(last), false) => {
                members.push(last);
                Node::Group(Group { coefficient, members })
            },
        }
    }

    pub fn coefficient(&self) -> &Number {
        &self.coefficient
    }

    pub fn members(&self) -> &[Term] {
        &self.members
    }

    /// Returns the members keyed by name, with members sharing a name multiplied together.
    pub fn as_mapping(&self) -> IndexMap<String, Term> {
        let mut mapping = Mapping::new();
        for member in &self.members {
            merge(&mut mapping, member.name(), member.power().clone());
        }
        mapping
    }

    fn into_mapping(self) -> Mapping {
        self.members
            .into_iter()
            .map(|member| (member.name().to_string(), member))
            .collect()
    }

    /// Returns true if the two groups can be added into one: they contain exactly the same
    /// `(name, power)` pairs.
    pub fn is_similar(&self, other: &Group) -> bool {
        self.members.len() == other.members.len()
            && self.members.iter().all(|member| {
                other.members.iter().any(|o| o.name() == member.name() && o.power() == member.power())
            })
    }

    /// Returns true if the two groups contain the same names, regardless of their powers.
    pub fn is_roughly_similar(&self, other: &Group) -> bool {
        self.members.len() == other.members.len()
            && self.members.iter().all(|member| {
                other.members.iter().any(|o| o.name() == member.name())
            })
    }

    /// Raises the group to the given power.
    ///
    /// A numeric exponent `k` raises the coefficient to `k` and multiplies the power of every
    /// member by `k`. Any other exponent builds a [`Power`](OpKind::Power) operation.
    pub fn pow(self, rhs: impl Into<Node>) -> Result<Node, Error> {
        match rhs.into() {
            Node::Number(k) => {
                let coefficient = self.coefficient.pow(k.clone())?;
                let mut mapping = Mapping::new();
                for member in &self.members {
                    merge(&mut mapping, member.name(), member.power().clone() * k.clone());
                }
                Ok(Self::assemble(coefficient, mapping))
            },
            rhs => Ok(Operation::binary(OpKind::Power, Node::Group(self), rhs)),
        }
    }

    /// Divides `numerator` by this group, cancelling it against the member with the same name.
    pub(crate) fn divide_into(self, numerator: Term) -> Result<Node, Error> {
        let mut mapping = self.as_mapping();
        let Some(member) = mapping.shift_remove(numerator.name()) else {
            return Ok(Operation::binary(OpKind::Quotient, Node::Term(numerator), Node::Group(self)));
        };

        let top = (numerator / member)?;
        let bottom = Self::assemble(self.coefficient, mapping);
        if bottom.is_one() {
            Ok(top)
        } else {
            Ok(Operation::binary(OpKind::Quotient, top, bottom))
        }
    }

    /// The span covering the whole rendered group, used to point errors at it.
    fn span(&self) -> Vec<std::ops::Range<usize>> {
        vec![0..self.to_string().len()]
    }
}

impl PartialEq for Group {
    /// Members are compared regardless of order.
    fn eq(&self, other: &Self) -> bool {
        self.coefficient == other.coefficient && self.is_similar(other)
    }
}

impl Solve for Group {
    /// Multiplies the coefficient by every member's bound value raised to the member's power,
    /// failing with [`UnboundName`] at the first member with no value.
    fn solve(&self, bindings: &Bindings) -> Result<Node, Error> {
        let mut result = Node::Number(self.coefficient.clone());
        for member in &self.members {
            let value = bindings.get(member.name())
                .cloned()
                .ok_or_else(|| Error::new(self.span(), UnboundName { name: member.name().to_string() }))?;
            let factor = value
                .pow(Node::Number(member.power().clone()))
                .map_err(|err| err.or_spans(|| self.span()))?;
            result = result * factor;
        }
        Ok(result)
    }
}

impl<T: Into<Node>> Add<T> for Group {
    type Output = Node;

    fn add(self, rhs: T) -> Node {
        match rhs.into() {
            Node::Group(other) if self.is_similar(&other) => {
                let coefficient = self.coefficient.clone() + other.coefficient;
                Self::assemble(coefficient, self.into_mapping())
            },
            rhs => Operation::sum(vec![Node::Group(self), rhs]),
        }
    }
}

impl<T: Into<Node>> Mul<T> for Group {
    type Output = Node;

    fn mul(self, rhs: T) -> Node {
        match rhs.into() {
            Node::Number(n) => {
                let coefficient = self.coefficient.clone() * n;
                Self::assemble(coefficient, self.into_mapping())
            },
            Node::Term(term) => {
                let (term_coefficient, term) = term.split_coefficient();
                let coefficient = self.coefficient.clone() * term_coefficient;
                let mut mapping = self.into_mapping();
                merge(&mut mapping, term.name(), term.power().clone());
                Self::assemble(coefficient, mapping)
            },
            Node::Group(other) => {
                let coefficient = self.coefficient.clone() * other.coefficient;
                let mut mapping = self.into_mapping();
                for member in other.members {
                    merge(&mut mapping, member.name(), member.power().clone());
                }
                Self::assemble(coefficient, mapping)
            },
            Node::Func(func) => func * self,
            Node::Expr(expr) => expr * self,
        }
    }
}

/// Members of the divisor that also appear in this group cancel against them. When every member
/// of the divisor cancels the result is a reduced group (or term, or number); otherwise the
/// leftover members form the denominator of a [`Quotient`](OpKind::Quotient).
impl<T: Into<Node>> Div<T> for Group {
    type Output = Result<Node, Error>;

    fn div(self, rhs: T) -> Self::Output {
        match rhs.into() {
            Node::Number(n) => {
                let coefficient = (self.coefficient.clone() / n)?;
                Ok(Self::assemble(coefficient, self.into_mapping()))
            },
            Node::Term(term) if self.members.iter().any(|m| m.name() == term.name()) => {
                let (term_coefficient, term) = term.split_coefficient();
                let coefficient = (self.coefficient.clone() / term_coefficient)?;
                let mut mapping = self.into_mapping();
                merge(&mut mapping, term.name(), -term.power().clone());
                Ok(Self::assemble(coefficient, mapping))
            },
            Node::Group(other) => {
                let coefficient = (self.coefficient.clone() / other.coefficient)?;
                let mut mapping = self.into_mapping();
                let mut remaining = Vec::new();
                for member in other.members {
                    if mapping.contains_key(member.name()) {
                        merge(&mut mapping, member.name(), -member.power().clone());
                    } else {
                        remaining.push(member);
                    }
                }

                let top = Self::assemble(coefficient, mapping);
                if remaining.is_empty() {
                    return Ok(top);
                }

                trace!(remaining = remaining.len(), "members left in the denominator");
                let bottom = Group::new(1, remaining);
                Ok(Operation::binary(OpKind::Quotient, top, bottom))
            },
            rhs => Ok(Operation::binary(OpKind::Quotient, Node::Group(self), rhs)),
        }
    }
}

impl Neg for Group {
    type Output = Node;

    fn neg(self) -> Node {
        let coefficient = -self.coefficient.clone();
        Self::assemble(coefficient, self.into_mapping())
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fmt_coefficient(f, &self.coefficient)?;

        // single-letter names can be written side by side
        let separator = if self.members.iter().all(|m| m.name().chars().count() == 1) {
            ""
        } else {
            "*"
        };
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", separator)?;
            }
            write!(f, "{}", member.name())?;
            fmt_power(f, member.power())?;
        }
        Ok(())
    }
}
