//! The numeric literal type that every leaf of an expression tree eventually solves to.

pub mod ops;

use rug::{Complex, Float, Integer};
use std::{cmp::Ordering, fmt::{self, Display, Formatter}};
use crate::consts::PI;
use crate::primitive::{complex, float, int};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A numeric value. Integers are exact; floats and complex numbers use
/// [`PRECISION`](crate::primitive::PRECISION) bits of precision.
///
/// Arithmetic between two numbers promotes both operands to the wider of the two kinds (integer,
/// then float, then complex) before computing the result. See [`ops`] for the operators.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Number {
    /// An integer.
    Integer(Integer),

    /// A real number.
    Float(Float),

    /// A complex number.
    Complex(Complex),
}

impl Number {
    /// Returns the name of this number's kind, used in error messages.
    pub fn typename(&self) -> &'static str {
        match self {
            Number::Integer(_) => "Integer",
            Number::Float(_) => "Float",
            Number::Complex(_) => "Complex",
        }
    }

    /// Returns true if the number is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(n) => n.is_zero(),
            Number::Float(n) => n.is_zero(),
            Number::Complex(c) => c.is_zero(),
        }
    }

    /// Returns true if the number is exactly one.
    pub fn is_one(&self) -> bool {
        match self {
            Number::Integer(n) => *n == 1,
            Number::Float(n) => *n == 1,
            Number::Complex(c) => c.imag().is_zero() && *c.real() == 1,
        }
    }

    /// Returns true if the number has no fractional or imaginary part.
    pub fn is_integer(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(n) => n.is_integer(),
            Number::Complex(c) => c.imag().is_zero() && c.real().is_integer(),
        }
    }

    /// Returns true if the number is real and strictly less than zero.
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(n) => *n < 0,
            Number::Float(n) => *n < 0,
            Number::Complex(_) => false,
        }
    }

    /// Returns true if the number is a float that is not a number.
    pub fn is_nan(&self) -> bool {
        match self {
            Number::Integer(_) => false,
            Number::Float(n) => n.is_nan(),
            Number::Complex(c) => c.real().is_nan() || c.imag().is_nan(),
        }
    }

    /// Converts the number to an [`Integer`], if it has no fractional or imaginary part.
    pub fn to_integer(&self) -> Option<Integer> {
        match self {
            Number::Integer(n) => Some(n.clone()),
            Number::Float(n) if n.is_integer() => n.to_integer(),
            Number::Complex(c) if c.imag().is_zero() && c.real().is_integer() => c.real().to_integer(),
            _ => None,
        }
    }

    /// Converts the number to the nearest [`f64`]. Complex numbers are converted by their real
    /// part.
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Integer(n) => n.to_f64(),
            Number::Float(n) => n.to_f64(),
            Number::Complex(c) => c.real().to_f64(),
        }
    }

    /// Converts the number to a [`Float`], discarding any imaginary part.
    pub fn to_float(&self) -> Float {
        match self {
            Number::Integer(n) => float(n),
            Number::Float(n) => n.clone(),
            Number::Complex(c) => c.real().clone(),
        }
    }

    /// Converts the number to a [`Complex`].
    pub fn to_complex(&self) -> Complex {
        match self {
            Number::Integer(n) => complex(n),
            Number::Float(n) => complex(n),
            Number::Complex(c) => c.clone(),
        }
    }

    /// Returns the magnitude of the number.
    pub fn abs(self) -> Number {
        match self {
            Number::Integer(n) => Number::Integer(n.abs()),
            Number::Float(n) => Number::Float(n.abs()),
            Number::Complex(c) => Number::Float(c.abs().into_real_imag().0),
        }
    }

    /// Interprets the number as an angle in degrees and converts it to radians.
    pub fn into_radians(self) -> Number {
        match self {
            Number::Integer(n) => Number::Float(float(n) * &*PI / float(180)),
            Number::Float(n) => Number::Float(n * &*PI / float(180)),
            Number::Complex(c) => Number::Complex(c * &*PI / float(180)),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(lhs), Number::Integer(rhs)) => lhs == rhs,
            (Number::Complex(_), _) | (_, Number::Complex(_)) => self.to_complex() == other.to_complex(),
            _ => self.to_float() == other.to_float(),
        }
    }
}

impl PartialOrd for Number {
    /// Numbers are ordered by their real value. Complex numbers are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Complex(_), _) | (_, Number::Complex(_)) => None,
            (Number::Integer(lhs), Number::Integer(rhs)) => lhs.partial_cmp(rhs),
            _ => self.to_float().partial_cmp(&other.to_float()),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n.to_f64()),
            Number::Complex(c) => {
                let (re, im) = (c.real().to_f64(), c.imag().to_f64());
                if re == 0.0 {
                    write!(f, "{}i", im)
                } else if im < 0.0 {
                    write!(f, "{}-{}i", re, -im)
                } else {
                    write!(f, "{}+{}i", re, im)
                }
            },
        }
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::Integer(int(n))
                }
            }
        )*
    };
}

from_int!(i32, i64, u32, u64, usize);

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(float(n))
    }
}

/// A `(real, imaginary)` pair is a complex literal.
impl From<(f64, f64)> for Number {
    fn from(parts: (f64, f64)) -> Self {
        Number::Complex(complex(parts))
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Number::Integer(n)
    }
}

impl From<Float> for Number {
    fn from(n: Float) -> Self {
        Number::Float(n)
    }
}

impl From<Complex> for Number {
    fn from(c: Complex) -> Self {
        Number::Complex(c)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn equality_across_kinds() {
        assert_eq!(Number::from(2), Number::from(2.0));
        assert_eq!(Number::from(2), Number::from((2.0, 0.0)));
        assert_ne!(Number::from(2), Number::from(2.5));
    }

    #[test]
    fn ordering() {
        assert!(Number::from(2) < Number::from(2.5));
        assert!(Number::from(-1.5) < Number::from(0));
        assert_eq!(Number::from((1.0, 1.0)).partial_cmp(&Number::from(0)), None);
    }

    #[test]
    fn display() {
        assert_eq!(Number::from(-12).to_string(), "-12");
        assert_eq!(Number::from(2.5).to_string(), "2.5");
        assert_eq!(Number::from(3.0).to_string(), "3");
        assert_eq!(Number::from((1.0, -2.0)).to_string(), "1-2i");
        assert_eq!(Number::from((0.0, 1.0)).to_string(), "1i");
    }

    #[test]
    fn predicates() {
        assert!(Number::from(0.0).is_zero());
        assert!(Number::from(1.0).is_one());
        assert!(Number::from(4.0).is_integer());
        assert!(!Number::from(4.5).is_integer());
        assert!(Number::from(-3).is_negative());
        assert_eq!(Number::from(7.0).to_integer(), Some(int(7)));
        assert_eq!(Number::from(7.5).to_integer(), None);
    }

    #[test]
    fn degrees_to_radians() {
        let radians = Number::from(180).into_radians();
        assert!((radians.to_f64() - std::f64::consts::PI).abs() < 1e-12);
    }
}
