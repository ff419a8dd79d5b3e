//! Symbolic integration.
//!
//! The integrator is a small set of table rules: linearity, the power rule on linear bases,
//! exponentials, elementary functions of linear arguments, expansion of products, and
//! integration by parts for a polynomial times an exponential, trigonometric, hyperbolic or
//! logarithmic factor. Anything else is reported as not integrable.

use super::{
    derivative::derivative,
    expand::expand,
    expr::SymExpr,
    poly::Poly,
    simplify::simplify,
};
use tracing::{debug, trace};

/// Limits the recursion of integration by parts and expansion.
const MAX_DEPTH: usize = 16;

/// Divides and simplifies the denominator first, so that numeric denominators are folded into
/// the coefficient.
fn div(numer: SymExpr, denom: SymExpr) -> SymExpr {
    numer / simplify(&denom)
}

/// Builds `f(arg)`.
fn call(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg.clone()])
}

/// If the expression is `a*var + b` with `a` nonzero and both independent of `var`, returns
/// `(a, b)`.
fn linear(expr: &SymExpr, var: &str) -> Option<(SymExpr, SymExpr)> {
    let poly = Poly::from_expr(expr, var)?;
    if poly.degree() != 1 {
        return None;
    }
    Some((poly.coeff(1), poly.coeff(0)))
}

/// Integrates a power `base^exp`.
fn integrate_power(base: &SymExpr, exp: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    match (base.contains_symbol(var), exp.contains_symbol(var)) {
        (true, false) => {
            let positive_integer = exp.as_integer().is_some_and(|n| *n > 0);
            if positive_integer && matches!(base, SymExpr::Add(_)) {
                return integrate_inner(&expand(&SymExpr::pow(base.clone(), exp.clone())), var, depth + 1);
            }

            if let Some((a, _)) = linear(base, var) {
                if exp.as_number().is_some_and(|n| *n == -1) {
                    // 1/(ax+b) -> log(ax+b)/a
                    return Some(div(call("log", base), a));
                }

                // (ax+b)^n -> (ax+b)^(n+1)/(a*(n+1))
                let next = simplify(&(exp.clone() + SymExpr::int(1)));
                return Some(div(SymExpr::pow(base.clone(), next.clone()), a * next));
            }

            // 1/(ax^2 + c) -> atan(x*sqrt(a/c))/sqrt(a*c), for positive a and c
            if exp.as_number().is_some_and(|n| *n == -1) {
                let poly = Poly::from_expr(base, var)?;
                let coeffs = poly.rational_coeffs()?;
                if let [c, b, a] = coeffs.as_slice() {
                    if b.cmp0().is_eq() && a.cmp0().is_gt() && c.cmp0().is_gt() {
                        let scale = SymExpr::rational(a.clone() / c.clone()).sqrt();
                        let norm = SymExpr::rational(a.clone() * c.clone()).sqrt();
                        return Some(div(call("atan", &(scale * SymExpr::symbol(var))), norm));
                    }
                }
            }

            None
        },
        (false, true) => {
            // c^(ax+b) -> c^(ax+b)/(a*log(c))
            let (a, _) = linear(exp, var)?;
            let power = SymExpr::pow(base.clone(), exp.clone());
            Some(div(power, a * call("log", base)))
        },
        _ => None,
    }
}

/// Integrates a call to an elementary function of a linear argument.
fn integrate_call(name: &str, args: &[SymExpr], var: &str) -> Option<SymExpr> {
    let [u] = args else {
        return None;
    };
    let (a, _) = linear(u, var)?;

    let antiderivative = match name {
        "sin" => -call("cos", u),
        "cos" => call("sin", u),
        "tan" => -call("log", &call("cos", u)),
        "exp" => SymExpr::pow(SymExpr::e(), u.clone()),
        "sinh" => call("cosh", u),
        "cosh" => call("sinh", u),
        "log" => u.clone() * call("log", u) - u.clone(),
        _ => return None,
    };
    Some(div(antiderivative, a))
}

/// Returns true if the factor can be integrated repeatedly by the table rules, which makes it a
/// good candidate for the `dv` part of integration by parts.
fn is_repeatable(factor: &SymExpr, var: &str) -> bool {
    match factor {
        SymExpr::Exp(base, exp) => !base.contains_symbol(var) && linear(exp, var).is_some(),
        _ => factor.as_unary_call(&["sin", "cos", "sinh", "cosh", "exp"])
            .is_some_and(|u| linear(u, var).is_some()),
    }
}

/// Integration by parts, `∫u dv = uv - ∫v du`, where `u` is a polynomial.
fn by_parts(factors: &[SymExpr], var: &str, depth: usize) -> Option<SymExpr> {
    let poly_of = |rest: Vec<SymExpr>| -> Option<SymExpr> {
        let u = SymExpr::Mul(rest).downgrade();
        let poly = Poly::from_expr(&u, var)?;
        (poly.degree() >= 1).then_some(u)
    };

    for (i, factor) in factors.iter().enumerate() {
        let mut rest = factors.to_vec();
        rest.remove(i);

        if is_repeatable(factor, var) {
            let Some(u) = poly_of(rest) else {
                continue;
            };
            trace!(u = ?u, dv = ?factor, "integrating by parts");
            let v = integrate_inner(factor, var, depth + 1)?;
            let du = derivative(&u, var);
            let rest = integrate_inner(&simplify(&(v.clone() * du)), var, depth + 1)?;
            return Some(u * v - rest);
        }

        if factor.as_unary_call(&["log"]).is_some_and(|arg| linear(arg, var).is_some()) {
            // u = log(...), dv = polynomial
            let Some(p) = poly_of(rest) else {
                continue;
            };
            let v = integrate_inner(&p, var, depth + 1)?;
            let du = derivative(factor, var);
            let rest = integrate_inner(&expand(&(v.clone() * du)), var, depth + 1)?;
            return Some(factor.clone() * v - rest);
        }
    }

    None
}

/// Integrates without simplifying the result.
fn integrate_inner(expr: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    if depth > MAX_DEPTH {
        return None;
    }

    let x = SymExpr::symbol(var);
    if !expr.contains_symbol(var) {
        return Some(expr.clone() * x);
    }

    match expr {
        SymExpr::Primary(_) if expr.is_symbol(var) => {
            Some(SymExpr::rational((1, 2)) * SymExpr::pow(x, SymExpr::int(2)))
        },
        SymExpr::Primary(_) => {
            let (name, args) = expr.as_call()?;
            integrate_call(name, args, var)
        },
        SymExpr::Add(terms) => terms.iter()
            .map(|term| integrate_inner(term, var, depth))
            .collect::<Option<Vec<_>>>()
            .map(SymExpr::Add),
        SymExpr::Mul(factors) => {
            let (constant, dependent): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| !factor.contains_symbol(var));
            if !constant.is_empty() {
                let dependent = SymExpr::Mul(dependent).downgrade();
                return Some(SymExpr::Mul(constant) * integrate_inner(&dependent, var, depth)?);
            }

            // (x + 1)*(x - 1), x*(x + 2)^2
            let expanded = expand(expr);
            if expanded != *expr && !matches!(expanded, SymExpr::Mul(_)) {
                return integrate_inner(&expanded, var, depth + 1);
            }

            // x^2*x^-1 etc. collapse under simplification
            let simplified = simplify(expr);
            if simplified != *expr {
                return integrate_inner(&simplified, var, depth + 1);
            }

            by_parts(factors, var, depth)
        },
        SymExpr::Exp(base, exp) => integrate_power(base, exp, var, depth),
    }
}

/// Computes an antiderivative of an expression with respect to `var`, without the constant of
/// integration. The result is simplified.
///
/// Returns [`None`] if no rule applies to the expression.
pub fn integrate(expr: &SymExpr, var: &str) -> Option<SymExpr> {
    let result = integrate_inner(&simplify(expr), var, 0).map(|result| simplify(&result));
    if result.is_none() {
        debug!(expr = ?expr, var, "no integration rule applies");
    }
    result
}

/// Computes the definite integral of an expression with respect to `var`, from `lower` to
/// `upper`.
pub fn integrate_definite(expr: &SymExpr, var: &str, lower: &SymExpr, upper: &SymExpr) -> Option<SymExpr> {
    let antiderivative = integrate(expr, var)?;
    Some(simplify(&(
        antiderivative.substitute(var, upper) - antiderivative.substitute(var, lower)
    )))
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::try_from(parse(input).unwrap()).unwrap()
    }

    fn check(input: &str, expected: &str) {
        assert_eq!(integrate(&parse_expr(input), "x"), Some(simplify(&parse_expr(expected))));
    }

    #[test]
    fn power_rule() {
        check("x**2", "x**3/3");
        check("3*x**2 + 2*x + 1", "x**3 + x**2 + x");
        check("1/x", "log(x)");
        check("1/(2*x + 1)", "log(2*x + 1)/2");
        check("sqrt(x)", "2*x**(3/2)/3");
    }

    #[test]
    fn constants() {
        check("5", "5*x");
        check("y", "x*y");
    }

    #[test]
    fn exponentials_and_trig() {
        check("exp(2*x)", "E**(2*x)/2");
        check("sin(x)", "-cos(x)");
        check("cos(3*x)", "sin(3*x)/3");
        check("2**x", "2**x/log(2)");
        check("1/(x**2 + 1)", "atan(x)");
    }

    #[test]
    fn expansion() {
        check("(x + 1)*(x - 1)", "x**3/3 - x");
    }

    #[test]
    fn by_parts() {
        check("x*exp(x)", "x*E**x - E**x");
        check("x*cos(x)", "x*sin(x) + cos(x)");
        check("log(x)", "x*log(x) - x");
    }

    #[test]
    fn definite() {
        let result = integrate_definite(&parse_expr("x**2"), "x", &SymExpr::int(0), &SymExpr::int(3));
        assert_eq!(result, Some(SymExpr::int(9)));
    }

    #[test]
    fn not_integrable() {
        assert_eq!(integrate(&parse_expr("sin(x**2)"), "x"), None);
        assert_eq!(integrate(&parse_expr("exp(x**2)"), "x"), None);
    }
}
