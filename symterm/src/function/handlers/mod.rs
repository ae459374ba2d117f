//! The numeric implementations behind each [`FunctionKind`](super::FunctionKind).

pub mod rounding;
pub mod root;
pub mod trigonometry;
