//! Named unknowns and products of them: the leaves of the tree that carry algebra.

pub mod group;
pub mod term;

use std::fmt::{self, Formatter};
use crate::numeric::Number;

/// Writes a coefficient in front of a name. A coefficient of one is implied and `-1` is written
/// as a bare sign.
pub(crate) fn fmt_coefficient(f: &mut Formatter, coefficient: &Number) -> fmt::Result {
    if coefficient.is_one() {
        Ok(())
    } else if (-coefficient.clone()).is_one() {
        write!(f, "-")
    } else if let Number::Complex(_) = coefficient {
        write!(f, "({})", coefficient)
    } else {
        write!(f, "{}", coefficient)
    }
}

/// Writes the `^power` suffix after a name, unless the power is one.
pub(crate) fn fmt_power(f: &mut Formatter, power: &Number) -> fmt::Result {
    if power.is_one() {
        Ok(())
    } else if let Number::Complex(_) = power {
        write!(f, "^({})", power)
    } else {
        write!(f, "^{}", power)
    }
}
