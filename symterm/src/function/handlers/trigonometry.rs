//! General trigonometric and hyperbolic trigonometric functions.
//!
//! Real arguments are computed on [`Float`](rug::Float)s, so an argument outside of a function's
//! real domain produces NaN. Complex arguments are computed on [`Complex`](rug::Complex) numbers.

use crate::numeric::Number;

/// Build a function that applies the method of the same name to the real or complex value.
macro_rules! build_trig {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(n: Number) -> Number {
                match n {
                    Number::Complex(c) => Number::Complex(c.$name()),
                    n => Number::Float(n.to_float().$name()),
                }
            }
        )*
    };
}

build_trig! {
    sin, cos, tan,
    asin, acos, atan,
    sinh, cosh, tanh,
    asinh, acosh, atanh,
}
