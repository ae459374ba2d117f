//! Rounding functions.

use rug::{ops::Pow, Float};
use crate::numeric::Number;
use crate::primitive::{complex, float};

/// Returns the rounded value as an integer when it is finite.
fn integral(n: Float) -> Number {
    match n.to_integer() {
        Some(i) => Number::Integer(i),
        None => Number::Float(n),
    }
}

/// Build a rounding function. Integers are returned unchanged, and complex numbers have both of
/// their parts rounded.
macro_rules! build_rounding {
    ($($name:ident; $doc:literal),* $(,)?) => {
        $(
            #[doc = $doc]
            pub fn $name(n: Number) -> Number {
                match n {
                    Number::Integer(_) => n,
                    Number::Float(f) => integral(f.$name()),
                    Number::Complex(c) => {
                        let (real, imag) = c.into_real_imag();
                        Number::Complex(complex((real.$name(), imag.$name())))
                    },
                }
            }
        )*
    };
}

build_rounding! {
    floor; "Round a number down to the nearest integer.",
    ceil; "Round a number up to the nearest integer.",
    trunc; "Rounds a number towards zero.",
}

/// Rounds a number to the given number of decimal places.
pub fn round(n: Number, places: u32) -> Number {
    fn inner(n: Float, scale: &Float) -> Float {
        (n * scale).round() / scale
    }

    let scale = float(10).pow(places);
    match n {
        Number::Integer(_) => n,
        Number::Float(f) => Number::Float(inner(f, &scale)),
        Number::Complex(c) => {
            let (real, imag) = c.into_real_imag();
            Number::Complex(complex((inner(real, &scale), inner(imag, &scale))))
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn to_integers() {
        assert_eq!(floor(Number::from(2.7)), Number::from(2));
        assert!(matches!(floor(Number::from(2.7)), Number::Integer(_)));
        assert_eq!(ceil(Number::from(2.1)), Number::from(3));
        assert_eq!(trunc(Number::from(-2.7)), Number::from(-2));
        assert_eq!(floor(Number::from(-2.5)), Number::from(-3));
        assert_eq!(floor(Number::from(7)), Number::from(7));
    }

    #[test]
    fn decimal_places() {
        assert_float_relative_eq!(round(Number::from(3.14159), 2).to_f64(), 3.14);
        assert_float_relative_eq!(round(Number::from(2.5), 0).to_f64(), 3.0);
        assert_eq!(round(Number::from(12), 3), Number::from(12));
    }
}
