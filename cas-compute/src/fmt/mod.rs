//! Rendering of symbolic expressions as plain text and LaTeX.
//!
//! [`display`] produces compact, copy-pastable text such as `3*x**2 - 4` or `x**3/3`.
//! [`latex`] produces LaTeX such as `3 x^{2} - 4` or `\frac{x^{3}}{3}`. Both order terms
//! and factors the same way, so the two forms of an expression always read alike.

mod display;
mod float;
mod latex;
mod order;

use crate::symbolic::{expr::Primary, SymExpr};

pub use display::display;
pub use float::{display_float, latex_float, SIGNIFICANT_DIGITS};
pub use latex::latex;

/// How tightly an expression binds when printed. Expressions are wrapped in parentheses when
/// they appear in a position that requires a higher precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    /// Sums, and anything printed with a leading minus sign.
    Add,

    /// Products and fractions.
    Mul,

    /// Powers.
    Pow,

    /// Numbers, symbols, and function calls.
    Atom,
}

/// Returns true if `exp` is exactly `1/2`.
fn is_half(exp: &SymExpr) -> bool {
    exp.as_number().is_some_and(|num| *num.numer() == 1 && *num.denom() == 2)
}

/// Returns true if the expression is printed as a fraction or product.
fn is_product_like(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Mul(_) => true,
        SymExpr::Exp(_, exp) => exp.is_negative_term(),
        SymExpr::Primary(Primary::Number(num)) => *num.denom() != 1,
        _ => false,
    }
}

fn precedence(expr: &SymExpr) -> Precedence {
    if expr.is_negative_term() {
        return Precedence::Add;
    }

    match expr {
        SymExpr::Add(_) => Precedence::Add,
        _ if is_product_like(expr) => Precedence::Mul,
        SymExpr::Exp(_, exp) if is_half(exp) => Precedence::Atom,
        SymExpr::Exp(..) => Precedence::Pow,
        _ => Precedence::Atom,
    }
}

/// Splits a leading minus sign off an expression.
fn split_sign(expr: &SymExpr) -> (bool, SymExpr) {
    if expr.is_negative_term() {
        (true, -expr.clone())
    } else {
        (false, expr.clone())
    }
}

/// Returns the factors of a product, or the expression itself as the only factor.
fn factors_of(expr: &SymExpr) -> &[SymExpr] {
    match expr {
        SymExpr::Mul(factors) => factors,
        other => std::slice::from_ref(other),
    }
}
