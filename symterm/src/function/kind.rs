use levenshtein::levenshtein;
use std::fmt::{self, Display, Formatter};
use crate::error::{kind::{InvalidDomain, UnknownFunction}, Error};
use crate::node::Node;
use crate::numeric::Number;
use super::handlers::{rounding, root, trigonometry};

/// The name of every function, as accepted by [`FunctionKind::from_name`].
const NAMES: [&str; 18] = [
    "sin", "cos", "tan",
    "asin", "acos", "atan",
    "sinh", "cosh", "tanh",
    "asinh", "acosh", "atanh",
    "sqrt", "root",
    "floor", "ceil", "trunc", "round",
];

/// Which function a [`Function`](super::Function) applies to its parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionKind {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,

    /// The square root. Integer arguments are reduced so that the remaining radicand has no
    /// square factors.
    Sqrt,

    /// Raises the argument to `exponent`, e.g. an exponent of `1/3` takes the cube root.
    Root { exponent: Number },

    Floor,
    Ceil,
    Trunc,

    /// Rounds to the given number of decimal places.
    Round { places: u32 },
}

impl FunctionKind {
    /// Resolves a function by name, ignoring case. `root` takes the square root and `round`
    /// rounds to 2 decimal places.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        let lower = name.to_lowercase();
        Ok(match lower.as_str() {
            "sin" => FunctionKind::Sin,
            "cos" => FunctionKind::Cos,
            "tan" => FunctionKind::Tan,
            "asin" => FunctionKind::Asin,
            "acos" => FunctionKind::Acos,
            "atan" => FunctionKind::Atan,
            "sinh" => FunctionKind::Sinh,
            "cosh" => FunctionKind::Cosh,
            "tanh" => FunctionKind::Tanh,
            "asinh" => FunctionKind::Asinh,
            "acosh" => FunctionKind::Acosh,
            "atanh" => FunctionKind::Atanh,
            "sqrt" => FunctionKind::Sqrt,
            "root" => FunctionKind::Root { exponent: Number::from(0.5) },
            "floor" => FunctionKind::Floor,
            "ceil" => FunctionKind::Ceil,
            "trunc" => FunctionKind::Trunc,
            "round" => FunctionKind::Round { places: 2 },
            _ => {
                let suggestions = NAMES.iter()
                    .filter(|n| levenshtein(n, &lower) < 2)
                    .map(|n| n.to_string())
                    .collect();
                return Err(Error::bare(UnknownFunction { name: name.to_string(), suggestions }));
            },
        })
    }

    /// The name of the function.
    pub fn name(&self) -> &'static str {
        match self {
            FunctionKind::Sin => "Sin",
            FunctionKind::Cos => "Cos",
            FunctionKind::Tan => "Tan",
            FunctionKind::Asin => "Asin",
            FunctionKind::Acos => "Acos",
            FunctionKind::Atan => "Atan",
            FunctionKind::Sinh => "Sinh",
            FunctionKind::Cosh => "Cosh",
            FunctionKind::Tanh => "Tanh",
            FunctionKind::Asinh => "Asinh",
            FunctionKind::Acosh => "Acosh",
            FunctionKind::Atanh => "Atanh",
            FunctionKind::Sqrt => "Sqrt",
            FunctionKind::Root { .. } => "Root",
            FunctionKind::Floor => "Floor",
            FunctionKind::Ceil => "Ceil",
            FunctionKind::Trunc => "Trunc",
            FunctionKind::Round { .. } => "Round",
        }
    }

    /// Applies the function to a numeric argument.
    pub(crate) fn apply(&self, value: Number) -> Result<Node, Error> {
        let result = match self {
            FunctionKind::Sin => trigonometry::sin(value.clone()),
            FunctionKind::Cos => trigonometry::cos(value.clone()),
            FunctionKind::Tan => trigonometry::tan(value.clone()),
            FunctionKind::Asin => trigonometry::asin(value.clone()),
            FunctionKind::Acos => trigonometry::acos(value.clone()),
            FunctionKind::Atan => trigonometry::atan(value.clone()),
            FunctionKind::Sinh => trigonometry::sinh(value.clone()),
            FunctionKind::Cosh => trigonometry::cosh(value.clone()),
            FunctionKind::Tanh => trigonometry::tanh(value.clone()),
            FunctionKind::Asinh => trigonometry::asinh(value.clone()),
            FunctionKind::Acosh => trigonometry::acosh(value.clone()),
            FunctionKind::Atanh => trigonometry::atanh(value.clone()),
            FunctionKind::Sqrt => return root::sqrt(value),
            FunctionKind::Root { exponent } => root::root(value.clone(), exponent)?,
            FunctionKind::Floor => rounding::floor(value.clone()),
            FunctionKind::Ceil => rounding::ceil(value.clone()),
            FunctionKind::Trunc => rounding::trunc(value.clone()),
            FunctionKind::Round { places } => rounding::round(value.clone(), *places),
        };

        if result.is_nan() && !value.is_nan() {
            return Err(Error::bare(InvalidDomain {
                function: self.name().to_string(),
                value: value.to_string(),
            }));
        }
        Ok(Node::Number(result))
    }
}

impl Display for FunctionKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(FunctionKind::from_name("COS").unwrap(), FunctionKind::Cos);
        assert_eq!(FunctionKind::from_name("Round").unwrap(), FunctionKind::Round { places: 2 });
    }

    #[test]
    fn unknown_name_suggests() {
        let err = FunctionKind::from_name("sqr").unwrap_err();
        assert_eq!(err.downcast_ref::<UnknownFunction>(), Some(&UnknownFunction {
            name: "sqr".to_string(),
            suggestions: vec!["sqrt".to_string()],
        }));

        let err = FunctionKind::from_name("sinn").unwrap_err();
        let kind = err.downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(kind.suggestions, vec!["sin".to_string(), "sinh".to_string()]);
    }

    #[test]
    fn invalid_domain() {
        let err = FunctionKind::Asin.apply(Number::from(2)).unwrap_err();
        assert!(err.is::<InvalidDomain>());
        assert_eq!(err.to_string(), "`Asin` is not defined for 2");
    }

    #[test]
    fn root_exponent() {
        let kind = FunctionKind::Root { exponent: Number::from(3) };
        assert_eq!(kind.apply(Number::from(2)).unwrap(), Node::from(8));
    }
}
