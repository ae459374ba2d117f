//! Symbolic algebra over named unknowns.
//!
//! Expressions are trees of [`Node`]s. The leaves are [`Number`]s, [`Term`]s (a named unknown
//! with a coefficient and a power) and [`Group`]s (a product of distinct terms sharing one
//! coefficient). Interior nodes are [`Expression`]s, each wrapping a single [`Operation`], and
//! [`Function`]s such as `Sin` or `Sqrt` applied to a parameter node.
//!
//! Arithmetic on nodes builds new trees that are kept in a reduced form as they are built: like
//! terms are merged in sums, same-named unknowns are folded in products, and common factors cancel
//! in quotients of groups. Any tree can then be [solved](Solve) against a set of [`Bindings`],
//! producing either a number or a smaller residual expression over the names left unbound.
//!
//! ```
//! use symterm::{Bindings, Node, Solve, Term};
//!
//! let expr = Term::symbol("x") * 2 + 5;
//! let value = expr.solve(&Bindings::new().with("x", 3)).unwrap();
//! assert_eq!(value, Node::from(11));
//! ```

pub mod algebra;
pub mod bindings;
pub mod comparity;
pub mod consts;
pub mod error;
pub mod expression;
pub mod function;
pub mod node;
pub mod numeric;
pub mod operation;
pub mod primitive;
pub mod solve;
pub mod trig_mode;

pub use algebra::{group::Group, term::Term};
pub use bindings::Bindings;
pub use comparity::{Comparity, Relation};
pub use error::Error;
pub use expression::Expression;
pub use function::{Evaluation, Function, FunctionKind, options::EvalOptions};
pub use node::Node;
pub use numeric::Number;
pub use operation::{OpKind, Operation};
pub use solve::Solve;
pub use trig_mode::TrigMode;
