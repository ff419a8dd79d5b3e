//! Errors that can occur while converting, transforming, or evaluating expressions.

use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::{ErrorKind, EXPR};

/// An unparseable number literal.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", literal),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The literal as written.
    pub literal: String,
}

/// An equation (`a = b`) was used inside another expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "equations can only appear at the top level of a problem",
    labels = ["this equation"],
    help = format!("to nest an equation, write it as {}", "Eq(lhs, rhs)".fg(EXPR)),
)]
pub struct NestedEquation;

/// Infinity was written as a value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "infinity (`oo`) is not supported as a value",
    labels = ["this symbol"],
    help = "use a finite value instead",
)]
pub struct InfiniteValue;

/// A tuple was used somewhere other than the arguments of a function call.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "tuples can only be used as function arguments",
    labels = ["this tuple"],
    help = format!("tuples give integration limits, such as {}", "integrate(x, (x, 0, 1))".fg(EXPR)),
)]
pub struct MisplacedTuple;

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` takes {}, but {} {} given", name, expected, given, if *given == 1 { "was" } else { "were" }),
    labels = ["this call"],
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// A description of the expected number of arguments.
    pub expected: &'static str,

    /// The number of arguments given.
    pub given: usize,
}

/// The variable of a derivative or integral was not given, and there are zero or several free
/// symbols to choose from.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if symbols.is_empty() {
        format!("cannot infer the variable of {}: the expression has no variables", operation)
    } else {
        format!("cannot infer the variable of {}: the expression depends on {}", operation, symbols.join(", "))
    },
    labels = [""],
    help = format!("name the variable explicitly, such as {}", "diff(f, x)".fg(EXPR)),
)]
pub struct AmbiguousVariable {
    /// The operation, such as `differentiation`.
    pub operation: &'static str,

    /// The free symbols of the expression.
    pub symbols: Vec<String>,
}

/// Something other than a symbol was given as the variable of a derivative or integral.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid variable of {}", given, operation),
    labels = ["this argument"],
    help = "variables must be plain symbols, such as `x` or `t`",
)]
pub struct InvalidVariable {
    /// The operation, such as `integration`.
    pub operation: &'static str,

    /// The argument that was given.
    pub given: String,
}

/// A symbol without a numeric value was found while evaluating an expression numerically.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot evaluate `{}` to a number", symbol),
    labels = [""],
)]
pub struct NotNumeric {
    /// The symbol, or unevaluated expression, with no numeric value.
    pub symbol: String,
}

/// An unknown function was found while evaluating an expression numerically.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown function `{}`", name),
    labels = [""],
    help = match suggestion {
        Some(suggestion) => format!("did you mean {}?", format!("`{}`", suggestion).fg(EXPR)),
        None => "this function has no numeric implementation".to_string(),
    },
)]
pub struct UnknownFunction {
    /// The name of the function.
    pub name: String,

    /// The name of the closest known function, if there is a close one.
    pub suggestion: Option<String>,
}

/// The expression evaluates to a value that is not a finite number, such as `1/0`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the expression is undefined",
    labels = [""],
    help = "check for a division by zero",
)]
pub struct Undefined;

/// No method is known to solve the given equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("could not find a method to solve `{}` for {}", expr, var),
    labels = [""],
)]
pub struct CannotSolve {
    /// The expression that was set to zero.
    pub expr: String,

    /// The variable to solve for.
    pub var: String,
}
