//! Arithmetic between [`Number`]s.
//!
//! `+`, `-`, `*` and unary `-` never fail. Every other operator returns a
//! [`Result`], since it can divide by zero or be undefined for the kind of its operands.

use rug::{ops::Pow, Complex, Float, Integer};
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Shl, Shr, Sub};
use crate::error::{kind::{BitshiftOverflow, DivideByZero, InvalidBinaryOperation}, Error};
use crate::primitive::{complex, float};
use super::Number;

/// A pair of operands promoted to the same kind.
enum Operands {
    Integer(Integer, Integer),
    Real(Float, Float),
    Complex(Complex, Complex),
}

/// Promotes both operands to the wider of their two kinds.
fn promote(left: Number, right: Number) -> Operands {
    match (left, right) {
        (Number::Integer(l), Number::Integer(r)) => Operands::Integer(l, r),
        (Number::Complex(l), r) => Operands::Complex(l, r.to_complex()),
        (l, Number::Complex(r)) => Operands::Complex(l.to_complex(), r),
        (l, r) => Operands::Real(l.to_float(), r.to_float()),
    }
}

/// Converts both operands to integers for bitwise operators, which are only defined on numbers
/// with no fractional part.
fn integer_operands(op: &'static str, left: Number, right: Number) -> Result<(Integer, Integer), Error> {
    match (left.to_integer(), right.to_integer()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(Error::bare(InvalidBinaryOperation {
            op,
            left: left.typename(),
            right: right.typename(),
        })),
    }
}

/// Returns an error if the divisor is zero.
fn check_divisor(divisor: &Number) -> Result<(), Error> {
    if divisor.is_zero() {
        Err(Error::bare(DivideByZero))
    } else {
        Ok(())
    }
}

macro_rules! ring_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Number {
            type Output = Number;

            fn $method(self, rhs: Number) -> Number {
                match promote(self, rhs) {
                    Operands::Integer(l, r) => Number::Integer(l $op r),
                    Operands::Real(l, r) => Number::Float(l $op r),
                    Operands::Complex(l, r) => Number::Complex(l $op r),
                }
            }
        }
    };
}

ring_op!(Add, add, +);
ring_op!(Sub, sub, -);
ring_op!(Mul, mul, *);

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Number::Integer(n) => Number::Integer(-n),
            Number::Float(n) => Number::Float(-n),
            Number::Complex(c) => Number::Complex(-c),
        }
    }
}

/// Division of two integers is exact when the divisor divides the dividend, and produces a float
/// otherwise.
impl Div for Number {
    type Output = Result<Number, Error>;

    fn div(self, rhs: Number) -> Self::Output {
        check_divisor(&rhs)?;
        Ok(match promote(self, rhs) {
            Operands::Integer(l, r) => {
                if l.is_divisible(&r) {
                    Number::Integer(l / r)
                } else {
                    Number::Float(float(l) / float(r))
                }
            },
            Operands::Real(l, r) => Number::Float(l / r),
            Operands::Complex(l, r) => Number::Complex(l / r),
        })
    }
}

/// The remainder takes the sign of the divisor, so that `a == (a // b) * b + a % b`.
impl Rem for Number {
    type Output = Result<Number, Error>;

    fn rem(self, rhs: Number) -> Self::Output {
        check_divisor(&rhs)?;
        let (lt, rt) = (self.typename(), rhs.typename());
        match promote(self, rhs) {
            Operands::Integer(l, r) => Ok(Number::Integer(l.div_rem_floor(r).1)),
            Operands::Real(l, r) => {
                let quotient = Float::with_val(l.prec(), &l / &r).floor();
                Ok(Number::Float(l - quotient * r))
            },
            Operands::Complex(..) => Err(Error::bare(InvalidBinaryOperation { op: "%", left: lt, right: rt })),
        }
    }
}

macro_rules! bitwise_op {
    ($trait:ident, $method:ident, $op:tt, $symbol:literal) => {
        impl $trait for Number {
            type Output = Result<Number, Error>;

            fn $method(self, rhs: Number) -> Self::Output {
                let (l, r) = integer_operands($symbol, self, rhs)?;
                Ok(Number::Integer(l $op r))
            }
        }
    };
}

bitwise_op!(BitAnd, bitand, &, "&");
bitwise_op!(BitOr, bitor, |, "|");
bitwise_op!(BitXor, bitxor, ^, "xor");

macro_rules! shift_op {
    ($trait:ident, $method:ident, $op:tt, $symbol:literal) => {
        impl $trait for Number {
            type Output = Result<Number, Error>;

            fn $method(self, rhs: Number) -> Self::Output {
                let (l, r) = integer_operands($symbol, self, rhs)?;
                let amount = r.to_usize().ok_or_else(|| Error::bare(BitshiftOverflow))?;
                Ok(Number::Integer(l $op amount))
            }
        }
    };
}

shift_op!(Shl, shl, <<, "<<");
shift_op!(Shr, shr, >>, ">>");

impl Number {
    /// Floor division: the quotient rounded towards negative infinity.
    pub fn floor_div(self, rhs: Number) -> Result<Number, Error> {
        check_divisor(&rhs)?;
        let (lt, rt) = (self.typename(), rhs.typename());
        match promote(self, rhs) {
            Operands::Integer(l, r) => Ok(Number::Integer(l.div_rem_floor(r).0)),
            Operands::Real(l, r) => Ok(Number::Float((l / r).floor())),
            Operands::Complex(..) => Err(Error::bare(InvalidBinaryOperation { op: "//", left: lt, right: rt })),
        }
    }

    /// Raises the number to the given power.
    ///
    /// Integer powers of integers are exact when the exponent is small and non-negative. A
    /// negative real raised to a fractional power produces a complex number.
    pub fn pow(self, rhs: Number) -> Result<Number, Error> {
        if self.is_zero() && rhs.is_negative() {
            return Err(Error::bare(DivideByZero));
        }
        if rhs.is_one() {
            return Ok(self);
        }

        Ok(match promote(self, rhs) {
            Operands::Integer(l, r) => {
                // large exponents take unreasonably long to compute exactly
                if let Some(r) = r.to_u16() {
                    Number::Integer(l.pow(u32::from(r)))
                } else {
                    Number::Float(float(l).pow(r))
                }
            },
            Operands::Real(l, r) => {
                if l < 0 && !r.is_integer() {
                    Number::Complex(complex(l).pow(complex(r)))
                } else {
                    Number::Float(l.pow(r))
                }
            },
            Operands::Complex(l, r) => Number::Complex(l.pow(r)),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::error::kind::{BitshiftOverflow, DivideByZero, InvalidBinaryOperation};
    use super::*;

    fn n<T: Into<Number>>(value: T) -> Number {
        value.into()
    }

    #[test]
    fn promotion() {
        assert!(matches!(n(2) + n(3), Number::Integer(_)));
        assert!(matches!(n(2) + n(0.5), Number::Float(_)));
        assert!(matches!(n(2) * n((1.0, 1.0)), Number::Complex(_)));
        assert_eq!(n(2) - n(0.5), n(1.5));
    }

    #[test]
    fn exact_integer_division() {
        let quotient = (n(12) / n(4)).unwrap();
        assert!(matches!(quotient, Number::Integer(_)));
        assert_eq!(quotient, n(3));

        let quotient = (n(1) / n(4)).unwrap();
        assert!(matches!(quotient, Number::Float(_)));
        assert_eq!(quotient, n(0.25));
    }

    #[test]
    fn divide_by_zero() {
        assert!((n(1) / n(0)).unwrap_err().is::<DivideByZero>());
        assert!((n(1.5) / n(0.0)).unwrap_err().is::<DivideByZero>());
        assert!(n(1).floor_div(n(0)).unwrap_err().is::<DivideByZero>());
        assert!((n(1) % n(0)).unwrap_err().is::<DivideByZero>());
        assert!(n(0).pow(n(-1)).unwrap_err().is::<DivideByZero>());
    }

    #[test]
    fn floored_division_and_remainder() {
        assert_eq!(n(-7).floor_div(n(2)).unwrap(), n(-4));
        assert_eq!((n(-7) % n(2)).unwrap(), n(1));
        assert_eq!((n(7) % n(-2)).unwrap(), n(-1));
        assert_eq!(n(7.5).floor_div(n(2)).unwrap(), n(3));
        assert_eq!((n(7.5) % n(2)).unwrap(), n(1.5));
    }

    #[test]
    fn powers() {
        assert_eq!(n(2).pow(n(10)).unwrap(), n(1024));
        assert_eq!(n(2).pow(n(-1)).unwrap(), n(0.5));
        assert_eq!(n(9).pow(n(0.5)).unwrap(), n(3));
        assert!(matches!(n(-8).pow(n(0.5)).unwrap(), Number::Complex(_)));
    }

    #[test]
    fn bitwise() {
        assert_eq!((n(0b1100) & n(0b1010)).unwrap(), n(0b1000));
        assert_eq!((n(0b1100) | n(0b1010)).unwrap(), n(0b1110));
        assert_eq!((n(0b1100) ^ n(0b1010)).unwrap(), n(0b0110));
        assert_eq!((n(1) << n(4)).unwrap(), n(16));
        assert_eq!((n(16.0) >> n(2)).unwrap(), n(4));
    }

    #[test]
    fn bitwise_errors() {
        assert!((n(1.5) & n(1)).unwrap_err().is::<InvalidBinaryOperation>());
        assert!((n(1) << n(-1)).unwrap_err().is::<BitshiftOverflow>());
    }
}
