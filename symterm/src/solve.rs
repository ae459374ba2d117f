use crate::bindings::Bindings;
use crate::error::Error;
use crate::node::Node;

/// Any node that can be solved to produce a value.
pub trait Solve {
    /// Solves the node using the given bindings of names to values.
    ///
    /// The result is a [`Node::Number`] when every name the node depends on is bound, and a
    /// residual node over the unbound names otherwise. Whether an unbound name is an error
    /// depends on the node: a [`Term`](crate::Term) or [`Group`](crate::Group) solved directly
    /// fails with [`UnboundName`](crate::error::kind::UnboundName), while an
    /// [`Expression`](crate::Expression) leaves such children unsolved inside sums and products.
    fn solve(&self, bindings: &Bindings) -> Result<Node, Error>;

    /// Solves the node with only the built-in constants bound.
    fn solve_default(&self) -> Result<Node, Error> {
        self.solve(&Bindings::with_constants())
    }
}
