use ariadne::Fmt;
use symterm_attrs::ErrorKind;
use symterm_error::EXPR;

/// A [`Term`](crate::algebra::term::Term) or [`Group`](crate::algebra::group::Group) was solved
/// directly, but one of its names has no bound value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", self.name),
    labels = ["this unknown"],
    help = format!(
        "bind it before solving, e.g. `{}`",
        format!("Bindings::new().with(\"{}\", <value>)", self.name).fg(EXPR),
    ),
)]
pub struct UnboundName {
    /// The name that had no value.
    pub name: String,
}

/// An operation was built with the wrong number of operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` operation was given {} operand(s)", self.op, self.given),
    help = if self.exact {
        format!("`{}` takes exactly {} operands", self.op, self.expected)
    } else {
        format!("`{}` takes at least {} operands", self.op, self.expected)
    },
)]
pub struct InvalidArity {
    /// The name of the operation.
    pub op: &'static str,

    /// The number of operands the operation takes.
    pub expected: usize,

    /// Whether `expected` is an exact count rather than a minimum.
    pub exact: bool,

    /// The number of operands that were given.
    pub given: usize,
}

/// A value was divided by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot divide by zero",
    labels = ["", "this evaluates to zero"],
)]
pub struct DivideByZero;

/// The given binary operation cannot be applied to the given operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot apply the `{}` operator to these operands", self.op),
    labels = [
        format!("this operand has type `{}`", self.left),
        format!("this operand has type `{}`", self.right),
    ],
    help = "bitwise operators and shifts only accept integers",
)]
pub struct InvalidBinaryOperation {
    /// The operator that was used.
    pub op: &'static str,

    /// The type of the left operand.
    pub left: &'static str,

    /// The type of the right operand.
    pub right: &'static str,
}

/// Attempted to bitshift an integer by too many bits.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "maximum bitshift amount exceeded",
    labels = ["", "too many bits to shift by"],
    help = "the shift amount must be a non-negative integer that fits in a machine word"
)]
pub struct BitshiftOverflow;

/// A function was applied to a value outside of its domain.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined for {}", self.function, self.value),
    labels = ["this argument"],
)]
pub struct InvalidDomain {
    /// The name of the function.
    pub function: String,

    /// The rendered value the function was applied to.
    pub value: String,
}

/// Two operands of a comparison could not be compared.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot compare `{}` with `{}`", self.left, self.right),
    labels = ["this operand", "this operand"],
    help = "both sides must solve to real numbers; bind every unknown before calling `fits`",
)]
pub struct NotComparable {
    /// The rendered left operand.
    pub left: String,

    /// The rendered right operand.
    pub right: String,
}

/// No function has the given name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", self.name),
    labels = ["this function"],
    help = if self.suggestions.is_empty() {
        "see `FunctionKind` for a list of available functions".to_string()
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
)]
pub struct UnknownFunction {
    /// The name that was looked up.
    pub name: String,

    /// A list of similarly named functions, if any.
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use ariadne::Source;
    use pretty_assertions::assert_eq;
    use symterm_error::ErrorKind;
    use super::*;

    fn render(kind: &dyn ErrorKind, text: &str, spans: &[std::ops::Range<usize>]) -> String {
        let mut out = Vec::new();
        kind.build_report("expr", spans)
            .write(("expr", Source::from(text)), &mut out)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn unit_kind_reports() {
        assert_eq!(BitshiftOverflow.message(), "maximum bitshift amount exceeded");

        let out = render(&BitshiftOverflow, "x << -1", &[0..1, 5..7]);
        assert!(out.contains("maximum bitshift amount exceeded"));
        assert!(out.contains("too many bits to shift by"));
        assert!(out.contains("fits in a machine word"));
    }

    #[test]
    fn fields_are_in_scope() {
        let kind = InvalidBinaryOperation { op: "&", left: "Float", right: "Integer" };
        assert_eq!(kind.message(), "cannot apply the `&` operator to these operands");

        let out = render(&kind, "1.5 & 1", &[0..3, 6..7]);
        assert!(out.contains("this operand has type `Float`"));
        assert!(out.contains("this operand has type `Integer`"));
    }

    #[test]
    fn labels_without_spans_are_dropped() {
        let kind = NotComparable { left: "5".to_string(), right: "y".to_string() };
        let out = render(&kind, "5 < y", &[]);
        assert!(out.contains("cannot compare `5` with `y`"));
        assert!(!out.contains("this operand"));
    }
}
