//! Symbolic differentiation.

use super::{expr::SymExpr, simplify::simplify};

/// Builds `f(arg)`.
fn call(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg.clone()])
}

/// Derivative of a function call with respect to its argument, multiplied by the derivative of
/// the argument (chain rule).
fn diff_call(name: &str, args: &[SymExpr], var: &str) -> SymExpr {
    let unevaluated = || SymExpr::call("Derivative", vec![
        SymExpr::call(name, args.to_vec()),
        SymExpr::symbol(var),
    ]);

    let u = match args {
        [u] => u,
        [u, base] if name == "log" && !base.contains_symbol(var) => {
            // log(u, b) = log(u)/log(b)
            return diff(u, var) / (u.clone() * call("log", base));
        },
        _ => return unevaluated(),
    };

    let one = SymExpr::int(1);
    let square = SymExpr::pow(u.clone(), SymExpr::int(2));
    let outer = match name {
        "sin" => call("cos", u),
        "cos" => -call("sin", u),
        "tan" => one + SymExpr::pow(call("tan", u), SymExpr::int(2)),
        "exp" => SymExpr::pow(SymExpr::e(), u.clone()),
        "log" => u.clone().recip(),
        "sqrt" => SymExpr::rational((1, 2)) * SymExpr::pow(u.clone(), SymExpr::rational((-1, 2))),
        "asin" => SymExpr::pow(one - square, SymExpr::rational((-1, 2))),
        "acos" => -SymExpr::pow(one - square, SymExpr::rational((-1, 2))),
        "atan" => (one + square).recip(),
        "sinh" => call("cosh", u),
        "cosh" => call("sinh", u),
        "tanh" => one - SymExpr::pow(call("tanh", u), SymExpr::int(2)),
        "asinh" => SymExpr::pow(square + one, SymExpr::rational((-1, 2))),
        "acosh" => SymExpr::pow(square - one, SymExpr::rational((-1, 2))),
        "atanh" => (one - square).recip(),
        "abs" => call("sign", u),
        _ => return unevaluated(),
    };

    outer * diff(u, var)
}

/// Differentiates without simplifying.
fn diff(expr: &SymExpr, var: &str) -> SymExpr {
    if !expr.contains_symbol(var) {
        return SymExpr::int(0);
    }

    match expr {
        SymExpr::Primary(_) if expr.is_symbol(var) => SymExpr::int(1),
        SymExpr::Primary(_) => match expr.as_call() {
            Some((name, args)) => diff_call(name, args, var),
            None => SymExpr::int(0),
        },
        SymExpr::Add(terms) => SymExpr::Add(terms.iter().map(|term| diff(term, var)).collect()),
        SymExpr::Mul(factors) => {
            // (fgh)' = f'gh + fg'h + fgh'
            let terms = (0..factors.len())
                .filter(|&i| factors[i].contains_symbol(var))
                .map(|i| {
                    let mut product = factors.clone();
                    product[i] = diff(&factors[i], var);
                    SymExpr::Mul(product)
                })
                .collect();
            SymExpr::Add(terms)
        },
        SymExpr::Exp(base, exp) => {
            let power = expr.clone();
            if !exp.contains_symbol(var) {
                // (u^n)' = n*u^(n-1)*u'
                (**exp).clone()
                    * SymExpr::pow((**base).clone(), (**exp).clone() - SymExpr::int(1))
                    * diff(base, var)
            } else if !base.contains_symbol(var) {
                // (a^v)' = a^v*log(a)*v'
                power * call("log", base) * diff(exp, var)
            } else {
                // (u^v)' = u^v*(v'*log(u) + v*u'/u)
                power * (
                    diff(exp, var) * call("log", base)
                        + (**exp).clone() * diff(base, var) / (**base).clone()
                )
            }
        },
    }
}

/// Computes the derivative of an expression with respect to `var`. The result is simplified.
///
/// Derivatives of functions without a known derivative are left unevaluated, as a call to
/// `Derivative(f, var)`.
pub fn derivative(expr: &SymExpr, var: &str) -> SymExpr {
    simplify(&diff(expr, var))
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
        assert_eq!(derivative(&parse_expr(input), "x"), simplify(&parse_expr(expected)));
    }

    #[test]
    fn power_rule() {
        check("x**3", "3*x**2");
        check("5*x**2 + 2*x - 7", "10*x + 2");
        check("sqrt(x)", "1/(2*sqrt(x))");
        check("1/x", "-1/x**2");
    }

    #[test]
    fn constants() {
        check("y**2 + pi", "0");
        check("x*y", "y");
    }

    #[test]
    fn product_rule() {
        check("x*sin(x)", "sin(x) + x*cos(x)");
    }

    #[test]
    fn chain_rule() {
        check("sin(x**2)", "2*x*cos(x**2)");
        check("exp(2*x)", "2*E**(2*x)");
        check("log(3*x)", "1/x");
        check("cos(x)**2", "-2*sin(x)*cos(x)");
    }

    #[test]
    fn general_power() {
        check("x**x", "x**x*(log(x) + 1)");
    }

    #[test]
    fn unknown_function() {
        check("f(x)", "Derivative(f(x), x)");
    }
}
