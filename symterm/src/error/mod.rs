//! Errors raised while building or solving expressions.
//!
//! Every error is a [`symterm_error::Error`], a boxed [`ErrorKind`](symterm_error::ErrorKind)
//! paired with the regions of the rendered expression it points at. The concrete kinds live in
//! [`kind`].

pub mod kind;

pub use symterm_error::Error;
