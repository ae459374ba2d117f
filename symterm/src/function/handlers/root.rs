//! Roots, including the reducing square root.

use rug::{ops::Pow, Integer};
use tracing::trace;
use crate::error::{kind::InvalidDomain, Error};
use crate::function::Function;
use crate::node::Node;
use crate::numeric::Number;

/// Trial division stops at this divisor. Square factors of larger primes stay under the radical.
const TRIAL_LIMIT: u32 = 1 << 16;

/// Computes `n^exponent`.
pub fn root(n: Number, exponent: &Number) -> Result<Number, Error> {
    n.pow(exponent.clone())
}

/// Splits a non-negative integer `n` into `(outside, inside)` such that
/// `outside^2 * inside == n`, moving as much of `n` outside of the radical as possible.
pub fn extract_square(n: &Integer) -> (Integer, Integer) {
    if n.is_perfect_square() {
        return (n.clone().sqrt(), Integer::from(1));
    }

    let mut rest = n.clone();
    let mut outside = Integer::from(1);
    let mut inside = Integer::from(1);
    let mut divisor = 2u32;
    while divisor < TRIAL_LIMIT && Integer::from(divisor).square() <= rest {
        let mut multiplicity = 0u32;
        while rest.is_divisible_u(divisor) {
            rest /= divisor;
            multiplicity += 1;
        }

        outside *= Integer::from(divisor).pow(multiplicity / 2);
        if multiplicity % 2 == 1 {
            inside *= divisor;
        }
        divisor += 1;
    }

    if rest.is_perfect_square() {
        outside *= rest.sqrt();
    } else {
        inside *= rest;
    }
    (outside, inside)
}

/// The square root, reduced so that the radicand is as small as possible.
///
/// A perfect square produces its root as a number. Any other integer produces `outside *
/// Sqrt(inside)`, and a non-integer argument produces `Sqrt(n)` unchanged.
pub fn sqrt(n: Number) -> Result<Node, Error> {
    if n.is_negative() {
        return Err(Error::bare(InvalidDomain {
            function: "Sqrt".to_string(),
            value: n.to_string(),
        }));
    }

    let Some(radicand) = n.to_integer() else {
        return Ok(Node::Func(Function::sqrt(n)));
    };

    let (outside, inside) = extract_square(&radicand);
    trace!(%radicand, %outside, %inside, "reduced square root");
    if inside == 1 {
        Ok(Node::from(outside))
    } else {
        Ok(Node::Func(Function::sqrt(inside).with_coefficient(outside)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::error::kind::InvalidDomain;
    use super::*;

    fn split(n: u32) -> (Integer, Integer) {
        extract_square(&Integer::from(n))
    }

    #[test]
    fn perfect_squares() {
        assert_eq!(split(0), (Integer::from(0), Integer::from(1)));
        assert_eq!(split(1), (Integer::from(1), Integer::from(1)));
        assert_eq!(split(144), (Integer::from(12), Integer::from(1)));
    }

    #[test]
    fn square_factors_move_outside() {
        assert_eq!(split(18), (Integer::from(3), Integer::from(2)));
        assert_eq!(split(72), (Integer::from(6), Integer::from(2)));
        assert_eq!(split(12), (Integer::from(2), Integer::from(3)));
        assert_eq!(split(30), (Integer::from(1), Integer::from(30)));
        assert_eq!(split(7 * 7 * 13), (Integer::from(7), Integer::from(13)));
    }

    #[test]
    fn reduce() {
        assert_eq!(sqrt(Number::from(4)).unwrap(), Node::from(2));
        assert_eq!(
            sqrt(Number::from(50)).unwrap(),
            Node::Func(Function::sqrt(2).with_coefficient(5)),
        );
        assert_eq!(sqrt(Number::from(2.5)).unwrap(), Node::Func(Function::sqrt(2.5)));
    }

    #[test]
    fn negative_radicand() {
        let err = sqrt(Number::from(-4)).unwrap_err();
        assert_eq!(err.downcast_ref::<InvalidDomain>(), Some(&InvalidDomain {
            function: "Sqrt".to_string(),
            value: "-4".to_string(),
        }));
    }
}
