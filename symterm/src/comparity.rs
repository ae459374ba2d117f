//! Chained comparisons between nodes, such as `5 < x < 10`.

use std::{cmp::Ordering, fmt::{self, Display, Formatter}, ops::Range};
use crate::bindings::Bindings;
use crate::error::{kind::NotComparable, Error};
use crate::node::Node;
use crate::numeric::Number;
use crate::solve::Solve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A relation between two operands of a [`Comparity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relation {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl Relation {
    /// The symbol of the relation.
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Equal => "==",
            Relation::NotEqual => "!=",
            Relation::Greater => ">",
            Relation::GreaterEqual => ">=",
            Relation::Less => "<",
            Relation::LessEqual => "<=",
        }
    }

    /// Returns whether the relation holds between the two numbers, or [`None`] if the numbers
    /// cannot be ordered.
    pub fn holds(&self, lhs: &Number, rhs: &Number) -> Option<bool> {
        match self {
            Relation::Equal => Some(lhs == rhs),
            Relation::NotEqual => Some(lhs != rhs),
            Relation::Greater => lhs.partial_cmp(rhs).map(Ordering::is_gt),
            Relation::GreaterEqual => lhs.partial_cmp(rhs).map(Ordering::is_ge),
            Relation::Less => lhs.partial_cmp(rhs).map(Ordering::is_lt),
            Relation::LessEqual => lhs.partial_cmp(rhs).map(Ordering::is_le),
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The left side of a comparison: a node, or the comparison it continues.
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Node(Node),
    Chain(Box<Comparity>),
}

/// A comparison between two or more nodes.
///
/// Chaining a comparison adds another operand on the right, so `5 < x < 10` holds when both
/// `5 < x` and `x < 10` hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparity {
    left: Operand,
    relation: Relation,
    right: Node,
}

/// Build the methods that continue a comparison with another operand.
macro_rules! chain_methods {
    ($($name:ident $relation:ident),* $(,)?) => {
        $(
            #[doc = concat!("Continues the comparison with the [`", stringify!($relation), "`](Relation::", stringify!($relation), ") relation.")]
            pub fn $name(self, rhs: impl Into<Node>) -> Comparity {
                self.chain(Relation::$relation, rhs)
            }
        )*
    };
}

impl Comparity {
    /// Creates the comparison `left relation right`.
    pub fn new(left: impl Into<Node>, relation: Relation, right: impl Into<Node>) -> Self {
        Self {
            left: Operand::Node(left.into()),
            relation,
            right: right.into(),
        }
    }

    /// Continues the comparison, comparing its rightmost operand with `rhs`.
    pub fn chain(self, relation: Relation, rhs: impl Into<Node>) -> Self {
        Self {
            left: Operand::Chain(Box::new(self)),
            relation,
            right: rhs.into(),
        }
    }

    chain_methods! {
        equal_to Equal,
        not_equal_to NotEqual,
        greater_than Greater,
        greater_equal GreaterEqual,
        less_than Less,
        less_equal LessEqual,
    }

    /// Flattens the chain into its first operand, followed by every relation and the operand to
    /// its right, in order.
    pub fn links(&self) -> (&Node, Vec<(Relation, &Node)>) {
        let (first, mut rest) = match &self.left {
            Operand::Node(node) => (node, Vec::new()),
            Operand::Chain(chain) => chain.links(),
        };
        rest.push((self.relation, &self.right));
        (first, rest)
    }

    /// Renders the comparison, returning the text and the span of each operand within it.
    pub fn render(&self) -> (String, Vec<Range<usize>>) {
        let (first, links) = self.links();
        let mut out = first.to_string();
        let mut spans = vec![0..out.len()];
        for (relation, node) in links {
            out.push(' ');
            out.push_str(relation.symbol());
            out.push(' ');
            let start = out.len();
            out.push_str(&node.to_string());
            spans.push(start..out.len());
        }
        (out, spans)
    }

    /// Solves every operand and checks that every relation in the chain holds.
    ///
    /// Each operand must solve to a number. An operand that is left symbolic, or an ordering
    /// relation between numbers that cannot be ordered (such as complex numbers), fails with
    /// [`NotComparable`].
    pub fn fits(&self, bindings: &Bindings) -> Result<bool, Error> {
        let (first, links) = self.links();
        let spans = self.render().1;

        let mut operands = Vec::with_capacity(links.len() + 1);
        for (i, node) in std::iter::once(first).chain(links.iter().map(|(_, node)| *node)).enumerate() {
            let value = node.solve(bindings).map_err(|err| err.offset(spans[i].start))?;
            operands.push(value);
        }

        for (i, (relation, _)) in links.iter().enumerate() {
            let (lhs, rhs) = (&operands[i], &operands[i + 1]);
            let holds = match (lhs, rhs) {
                (Node::Number(l), Node::Number(r)) => relation.holds(l, r),
                _ => None,
            };

            match holds {
                Some(true) => (),
                Some(false) => return Ok(false),
                None => return Err(Error::new(
                    vec![spans[i].clone(), spans[i + 1].clone()],
                    NotComparable { left: lhs.to_string(), right: rhs.to_string() },
                )),
            }
        }
        Ok(true)
    }
}

impl Display for Comparity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.render().0)
    }
}
