//! Classification of problems by the kind of answer they ask for.

use cas_compute::symbolic::{
    doit::{is_derivative_call, is_integral_call},
    SymExpr,
};

/// The kind of problem an input represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A derivative request, such as `diff(x**3, x)`.
    Derivative,

    /// An integral request, such as `integrate(x**2, x)`.
    Integral,

    /// An equation, such as `x**2 = 4`.
    Equality,

    /// An expression with unknowns, such as `x**2 - 4`. It is solved as if it were set to zero.
    ExpressionWithSymbols,

    /// An expression without unknowns, such as `2+2`. It is evaluated.
    ConstantExpression,
}

/// Classifies a problem. The first matching rule wins:
///
/// 1. A derivative call at the top level, or `diff(` anywhere in the raw input.
/// 2. An integral call at the top level, or `integrate(` anywhere in the raw input.
/// 3. An equation.
/// 4. An expression without free variables.
/// 5. Anything else.
///
/// The substring checks look at the raw input, so `mydiff(x)` is also a derivative request.
pub fn classify(input: &str, expr: &SymExpr) -> Shape {
    let top_call = expr.as_call().map(|(name, _)| name);

    if top_call.is_some_and(is_derivative_call) || input.contains("diff(") {
        Shape::Derivative
    } else if top_call.is_some_and(is_integral_call) || input.contains("integrate(") {
        Shape::Integral
    } else if top_call == Some("Eq") {
        Shape::Equality
    } else if expr.free_symbols().is_empty() {
        Shape::ConstantExpression
    } else {
        Shape::ExpressionWithSymbols
    }
}
