//! Named functions applied to a parameter node, such as `Sin(x)` or `Sqrt(x + 1)`.

pub mod handlers;
pub mod kind;
pub mod options;

use std::{fmt::{self, Debug, Display, Formatter}, ops::{Add, Div, Mul, Neg}, sync::Arc};
use tracing::debug;
use crate::bindings::Bindings;
use crate::error::Error;
use crate::node::Node;
use crate::numeric::Number;
use crate::operation::{OpKind, Operation};
use crate::solve::Solve;
use crate::trig_mode::TrigMode;
use options::EvalOptions;

pub use kind::FunctionKind;

/// Transforms the bindings before the parameter of a function is solved.
pub type Preprocessor = Arc<dyn Fn(Bindings) -> Bindings + Send + Sync>;

/// Transforms the solved parameter of a function before the function is applied.
pub type Prehandler = Arc<dyn Fn(Number) -> Result<Number, Error> + Send + Sync>;

/// Transforms the final value of a function.
pub type Postprocessor = Arc<dyn Fn(Node) -> Node + Send + Sync>;

/// The result of [evaluating](Function::evaluate) a function.
#[derive(Debug)]
pub enum Evaluation {
    /// The function was evaluated. The value may still be symbolic if the parameter was only
    /// partially solved.
    Evaluated(Node),

    /// The function could not be evaluated. It is returned unchanged, along with the error that
    /// stopped evaluation.
    Unevaluated {
        function: Function,
        error: Error,
    },
}

impl Evaluation {
    /// Returns true if the function was evaluated.
    pub fn is_evaluated(&self) -> bool {
        matches!(self, Evaluation::Evaluated(_))
    }

    /// Returns the error that stopped evaluation, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Evaluation::Evaluated(_) => None,
            Evaluation::Unevaluated { error, .. } => Some(error),
        }
    }

    /// Converts the evaluation into a node: the value if evaluation succeeded, or the unevaluated
    /// function otherwise.
    pub fn into_node(self) -> Node {
        match self {
            Evaluation::Evaluated(node) => node,
            Evaluation::Unevaluated { function, .. } => Node::Func(function),
        }
    }
}

/// A function applied to a parameter, scaled by a coefficient and raised to a power:
/// `coefficient * Name(parameter)^power`.
///
/// Evaluating a function never fails. If anything goes wrong along the way, such as an unbound
/// name in the parameter or an argument outside of the function's domain, the function is
/// returned unevaluated together with the error (see [`Evaluation`]).
///
/// The hooks run only when the matching flag of the function's own [`EvalOptions`], or of the
/// options passed to [`Function::evaluate_with`], is set.
#[derive(Clone)]
pub struct Function {
    kind: FunctionKind,
    parameter: Box<Node>,
    coefficient: Box<Node>,
    power: Box<Node>,
    options: EvalOptions,
    preprocessor: Option<Preprocessor>,
    prehandler: Option<Prehandler>,
    postprocessor: Option<Postprocessor>,
}

/// Build a constructor for each kind of function that has no extra arguments.
macro_rules! constructors {
    ($($name:ident $kind:ident),* $(,)?) => {
        $(
            #[doc = concat!("Creates `", stringify!($kind), "(parameter)`.")]
            pub fn $name(parameter: impl Into<Node>) -> Self {
                Self::new(FunctionKind::$kind, parameter)
            }
        )*
    };
}

impl Function {
    /// Creates a function with coefficient and power one and default options.
    pub fn new(kind: FunctionKind, parameter: impl Into<Node>) -> Self {
        Self {
            kind,
            parameter: Box::new(parameter.into()),
            coefficient: Box::new(Node::from(1)),
            power: Box::new(Node::from(1)),
            options: EvalOptions::default(),
            preprocessor: None,
            prehandler: None,
            postprocessor: None,
        }
    }

    constructors! {
        sin Sin, cos Cos, tan Tan,
        asin Asin, acos Acos, atan Atan,
        sinh Sinh, cosh Cosh, tanh Tanh,
        asinh Asinh, acosh Acosh, atanh Atanh,
        sqrt Sqrt,
        floor Floor, ceil Ceil, trunc Trunc,
    }

    /// Creates `Root(parameter)`, which raises the parameter to `exponent`.
    pub fn root(parameter: impl Into<Node>, exponent: impl Into<Number>) -> Self {
        Self::new(FunctionKind::Root { exponent: exponent.into() }, parameter)
    }

    /// Creates `Round(parameter)`, which rounds to `places` decimal places.
    pub fn round(parameter: impl Into<Node>, places: u32) -> Self {
        Self::new(FunctionKind::Round { places }, parameter)
    }

    pub fn with_coefficient(mut self, coefficient: impl Into<Node>) -> Self {
        self.coefficient = Box::new(coefficient.into());
        self
    }

    pub fn with_power(mut self, power: impl Into<Node>) -> Self {
        self.power = Box::new(power.into());
        self
    }

    /// Sets the options that are always in effect when evaluating this function.
    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_preprocessor(mut self, f: impl Fn(Bindings) -> Bindings + Send + Sync + 'static) -> Self {
        self.preprocessor = Some(Arc::new(f));
        self
    }

    pub fn with_prehandler(mut self, f: impl Fn(Number) -> Result<Number, Error> + Send + Sync + 'static) -> Self {
        self.prehandler = Some(Arc::new(f));
        self
    }

    pub fn with_postprocessor(mut self, f: impl Fn(Node) -> Node + Send + Sync + 'static) -> Self {
        self.postprocessor = Some(Arc::new(f));
        self
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    pub fn parameter(&self) -> &Node {
        &self.parameter
    }

    pub fn coefficient(&self) -> &Node {
        &self.coefficient
    }

    pub fn power(&self) -> &Node {
        &self.power
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    /// Returns true if the two functions can be added into one: they apply the same function to
    /// the same parameter, raised to the same power.
    pub fn is_similar(&self, other: &Function) -> bool {
        self.applies_to_same(other) && self.power == other.power
    }

    /// Returns true if the two functions apply the same function to the same parameter.
    pub fn applies_to_same(&self, other: &Function) -> bool {
        self.kind == other.kind && self.parameter == other.parameter
    }

    /// Evaluates the function with its own options.
    pub fn evaluate(&self, bindings: &Bindings) -> Evaluation {
        self.evaluate_with(bindings, EvalOptions::default())
    }

    /// Evaluates the function with its own options merged with `options`.
    pub fn evaluate_with(&self, bindings: &Bindings, options: EvalOptions) -> Evaluation {
        let options = self.options.merge(options);
        match self.try_evaluate(bindings, options) {
            Ok(node) => Evaluation::Evaluated(node),
            Err(error) => {
                debug!(function = %self, error = %error, "leaving function unevaluated");
                Evaluation::Unevaluated { function: self.clone(), error }
            },
        }
    }

    fn try_evaluate(&self, bindings: &Bindings, options: EvalOptions) -> Result<Node, Error> {
        let preprocessed: Bindings;
        let bindings = match &self.preprocessor {
            Some(preprocessor) if options.preprocess => {
                preprocessed = preprocessor(bindings.clone());
                &preprocessed
            },
            _ => bindings,
        };

        let result = match self.parameter.solve(bindings)? {
            Node::Number(value) => self.apply(value, options)?,
            residual => Node::Func(Function {
                parameter: Box::new(residual),
                coefficient: Box::new(Node::from(1)),
                power: Box::new(Node::from(1)),
                ..self.clone()
            }),
        };

        // coefficient and power are optional refinements; failing to solve them is not fatal
        let coefficient = self.coefficient.solve(bindings).unwrap_or_else(|_| (*self.coefficient).clone());
        let power = self.power.solve(bindings).unwrap_or_else(|_| (*self.power).clone());
        let value = coefficient * result.pow(power)?;

        Ok(match &self.postprocessor {
            Some(postprocessor) if options.postprocess => postprocessor(value),
            _ => value,
        })
    }

    /// Applies the function to a solved numeric parameter. In degrees, the parameter is converted
    /// to radians before anything else sees it, whatever the kind of function.
    fn apply(&self, mut value: Number, options: EvalOptions) -> Result<Node, Error> {
        if options.trig_mode == TrigMode::Degrees {
            value = value.into_radians();
        }

        if let Some(prehandler) = self.prehandler.as_ref().filter(|_| options.prehandle) {
            value = prehandler(value)?;
        }

        self.kind.apply(value)
    }

    /// Rebuilds the function with a new coefficient and power, collapsing to a number when the
    /// coefficient is zero or the power is zero.
    fn with_parts(self, coefficient: Node, power: Node) -> Node {
        if coefficient.is_zero() {
            Node::from(0)
        } else if power.is_zero() {
            coefficient
        } else {
            Node::Func(Function {
                coefficient: Box::new(coefficient),
                power: Box::new(power),
                ..self
            })
        }
    }

    /// Raises the function to the given power.
    ///
    /// A numeric exponent `k` raises the coefficient to `k` and multiplies the power by `k`. Any
    /// other exponent builds a [`Power`](OpKind::Power) operation.
    pub fn pow(self, rhs: impl Into<Node>) -> Result<Node, Error> {
        match rhs.into() {
            Node::Number(k) => {
                let coefficient = (*self.coefficient).clone().pow(Node::Number(k.clone()))?;
                let power = (*self.power).clone() * Node::Number(k);
                Ok(self.with_parts(coefficient, power))
            },
            rhs => Ok(Operation::binary(OpKind::Power, Node::Func(self), rhs)),
        }
    }
}

impl Solve for Function {
    /// Evaluates the function. This never fails.
    fn solve(&self, bindings: &Bindings) -> Result<Node, Error> {
        Ok(self.evaluate(bindings).into_node())
    }
}

impl PartialEq for Function {
    /// Functions are equal if they apply the same function to the same parameter with the same
    /// coefficient and power. Options and hooks are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.is_similar(other) && self.coefficient == other.coefficient
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("kind", &self.kind)
            .field("parameter", &self.parameter)
            .field("coefficient", &self.coefficient)
            .field("power", &self.power)
            .field("options", &self.options)
            .field("preprocessor", &self.preprocessor.is_some())
            .field("prehandler", &self.prehandler.is_some())
            .field("postprocessor", &self.postprocessor.is_some())
            .finish()
    }
}

impl<T: Into<Node>> Add<T> for Function {
    type Output = Node;

    fn add(self, rhs: T) -> Node {
        match rhs.into() {
            Node::Func(other) if self.is_similar(&other) => {
                let coefficient = (*self.coefficient).clone() + *other.coefficient;
                let power = (*self.power).clone();
                self.with_parts(coefficient, power)
            },
            rhs => Operation::sum(vec![Node::Func(self), rhs]),
        }
    }
}

impl<T: Into<Node>> Mul<T> for Function {
    type Output = Node;

    fn mul(self, rhs: T) -> Node {
        match rhs.into() {
            rhs if rhs.is_one() => Node::Func(self),
            Node::Func(other) if self.applies_to_same(&other) => {
                let coefficient = (*self.coefficient).clone() * *other.coefficient;
                let power = (*self.power).clone() + *other.power;
                self.with_parts(coefficient, power)
            },
            rhs @ (Node::Number(_) | Node::Term(_) | Node::Group(_)) => {
                let coefficient = (*self.coefficient).clone() * rhs;
                let power = (*self.power).clone();
                self.with_parts(coefficient, power)
            },
            Node::Expr(expr) => expr * Node::Func(self),
            rhs => Operation::product(vec![Node::Func(self), rhs]),
        }
    }
}

impl<T: Into<Node>> Div<T> for Function {
    type Output = Result<Node, Error>;

    fn div(self, rhs: T) -> Self::Output {
        match rhs.into() {
            rhs if rhs.is_one() => Ok(Node::Func(self)),
            rhs @ Node::Number(_) => {
                let coefficient = ((*self.coefficient).clone() / rhs)?;
                let power = (*self.power).clone();
                Ok(self.with_parts(coefficient, power))
            },
            Node::Func(other) if self.applies_to_same(&other) => {
                let coefficient = ((*self.coefficient).clone() / *other.coefficient)?;
                let power = (*self.power).clone() - *other.power;
                Ok(self.with_parts(coefficient, power))
            },
            rhs => Ok(Operation::binary(OpKind::Quotient, Node::Func(self), rhs)),
        }
    }
}

impl Neg for Function {
    type Output = Node;

    fn neg(self) -> Node {
        let coefficient = -(*self.coefficient).clone();
        let power = (*self.power).clone();
        self.with_parts(coefficient, power)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &*self.coefficient {
            c if c.is_one() => (),
            Node::Number(n) if (-n.clone()).is_one() => write!(f, "-")?,
            Node::Number(Number::Complex(_)) | Node::Expr(_) => write!(f, "({})*", self.coefficient)?,
            c => write!(f, "{}*", c)?,
        }

        write!(f, "{}", self.kind)?;

        match &*self.power {
            p if p.is_one() => (),
            Node::Number(Number::Complex(_)) | Node::Expr(_) => write!(f, "^({})", self.power)?,
            p => write!(f, "^{}", p)?,
        }

        match &self.kind {
            FunctionKind::Root { exponent } => write!(f, "({}, {})", self.parameter, exponent),
            FunctionKind::Round { places } => write!(f, "({}, {})", self.parameter, places),
            _ => write!(f, "({})", self.parameter),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use crate::error::kind::{InvalidDomain, UnboundName};
    use crate::Term;
    use super::*;

    fn at(name: &str, value: impl Into<Node>) -> Bindings {
        Bindings::new().with(name, value)
    }

    #[test]
    fn sqrt_reduces() {
        let f = Function::sqrt("x");
        assert_eq!(
            f.evaluate(&at("x", 18)).into_node(),
            Node::Func(Function::sqrt(2).with_coefficient(3)),
        );
        assert_eq!(f.evaluate(&at("x", 18)).into_node().to_string(), "3*Sqrt(2)");
        assert_eq!(f.evaluate(&at("x", 4)).into_node(), Node::from(2));
    }

    #[test]
    fn unbound_parameter_returns_itself() {
        let f = Function::sin("x").with_coefficient(2);
        let evaluation = f.evaluate(&Bindings::new());
        assert!(!evaluation.is_evaluated());
        assert!(evaluation.error().is_some_and(|err| err.is::<UnboundName>()));
        assert_eq!(evaluation.into_node(), Node::Func(f));
    }

    #[test]
    fn residual_parameter() {
        let f = Function::cos(Term::symbol("x") + Term::symbol("y"));
        let node = f.evaluate(&at("x", 1)).into_node();
        assert_eq!(node.to_string(), "Cos(1 + y)");
    }

    #[test]
    fn coefficient_and_power() {
        let f = Function::sqrt("x").with_coefficient(3).with_power(2);
        assert_eq!(f.evaluate(&at("x", 16)).into_node(), Node::from(48));
        assert_eq!(f.to_string(), "3*Sqrt^2(x)");
    }

    #[test]
    fn degrees() {
        let f = Function::sin("x").with_options(EvalOptions::new().with_trig_mode(TrigMode::Degrees));
        let value = f.evaluate(&at("x", 90)).into_node();
        assert_float_relative_eq!(value.as_number().unwrap().to_f64(), 1.0);

        // results are never converted back
        let f = Function::asin("x");
        let options = EvalOptions::new().with_trig_mode(TrigMode::Degrees);
        let value = f.evaluate_with(&at("x", 1), options).into_node();
        assert_float_relative_eq!(value.as_number().unwrap().to_f64(), (std::f64::consts::PI / 180.0).asin());
    }

    #[test]
    fn degrees_convert_every_parameter() {
        let options = EvalOptions::new().with_trig_mode(TrigMode::Degrees);
        let value = Function::root("x", 1).evaluate_with(&at("x", 180), options).into_node();
        assert_float_relative_eq!(value.as_number().unwrap().to_f64(), std::f64::consts::PI);

        let value = Function::floor("x").evaluate_with(&at("x", 360), options).into_node();
        assert_eq!(value, Node::from(6));
    }

    #[test]
    fn invalid_domain_is_recovered() {
        let f = Function::asin("x");
        let evaluation = f.evaluate(&at("x", 2));
        assert!(evaluation.error().is_some_and(|err| err.is::<InvalidDomain>()));
        assert_eq!(evaluation.into_node(), Node::Func(f));
    }

    #[test]
    fn hooks_need_their_flags() {
        let f = Function::sqrt("x").with_prehandler(|n| Ok(n.abs()));
        assert!(!f.evaluate(&at("x", -16)).is_evaluated());

        let options = EvalOptions::new().with_prehandle(true);
        assert_eq!(f.evaluate_with(&at("x", -16), options).into_node(), Node::from(4));

        let f = Function::sqrt("x")
            .with_preprocessor(|bindings| bindings.with("x", 9))
            .with_options(EvalOptions::new().with_preprocess(true));
        assert_eq!(f.evaluate(&Bindings::new()).into_node(), Node::from(3));

        let f = Function::floor("x")
            .with_postprocessor(|node| node * 10)
            .with_options(EvalOptions::new().with_postprocess(true));
        assert_eq!(f.evaluate(&at("x", 2.5)).into_node(), Node::from(20));
    }

    #[test]
    fn equality_includes_coefficient() {
        let two = Function::sin("x").with_coefficient(2);
        let three = Function::sin("x").with_coefficient(3);
        assert_ne!(two, three);
        assert!(two.is_similar(&three));
        assert_eq!(two + three, Node::Func(Function::sin("x").with_coefficient(5)));
    }

    #[test]
    fn arithmetic() {
        let sin = Function::sin("x");
        assert_eq!(sin.clone() * sin.clone(), Node::Func(Function::sin("x").with_power(2)));
        assert_eq!(sin.clone() * 4, Node::Func(Function::sin("x").with_coefficient(4)));
        assert_eq!((sin.clone() / sin.clone()).unwrap(), Node::from(1));
        assert_eq!(
            sin.clone().pow(3).unwrap(),
            Node::Func(Function::sin("x").with_power(3)),
        );
        assert_eq!(-sin.clone(), Node::Func(Function::sin("x").with_coefficient(-1)));
        assert_eq!((-sin.clone()).to_string(), "-Sin(x)");

        let node = sin.clone() + Function::cos("x");
        assert_eq!(node.to_string(), "Sin(x) + Cos(x)");

        let node = sin * Function::sin("y");
        assert_eq!(node.to_string(), "Sin(x) * Sin(y)");
    }

    #[test]
    fn display_extra_arguments() {
        assert_eq!(Function::round("x", 3).to_string(), "Round(x, 3)");
        assert_eq!(Function::root("x", 3).to_string(), "Root(x, 3)");
    }
}
