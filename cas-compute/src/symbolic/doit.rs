//! Evaluation of unevaluated derivative and integral calls inside an expression.
//!
//! Derivatives are requested with `diff(f, ...)` or `Derivative(f, ...)`, and integrals with
//! `integrate(f, ...)` or `Integral(f, ...)`. The arguments after `f` name the variables:
//!
//! - `diff(f)`: the only free variable of `f`
//! - `diff(f, x)`, `diff(f, x, y)`: with respect to `x`, then `y`
//! - `diff(f, x, 2)`, `diff(f, (x, 2))`: second derivative with respect to `x`
//! - `integrate(f, x)`: antiderivative with respect to `x`
//! - `integrate(f, (x, a, b))`: definite integral from `a` to `b`

use cas_error::Error;
use crate::error::{AmbiguousVariable, InvalidVariable, WrongArgumentCount};
use crate::fmt::display;
use super::{
    derivative::derivative,
    expr::SymExpr,
    integrate::{integrate, integrate_definite},
    simplify::simplify,
};
use tracing::debug;

/// Returns true if the name is a derivative request.
pub fn is_derivative_call(name: &str) -> bool {
    matches!(name, "diff" | "Derivative")
}

/// Returns true if the name is an integral request.
pub fn is_integral_call(name: &str) -> bool {
    matches!(name, "integrate" | "Integral")
}

/// Picks the variable of an operation that did not name one: the single free variable of the
/// expression.
fn infer_variable(expr: &SymExpr, operation: &'static str) -> Result<String, Error> {
    let symbols = expr.free_symbols();
    if symbols.len() == 1 {
        if let Some(var) = symbols.into_iter().next() {
            return Ok(var);
        }
    }
    Err(Error::new(Vec::new(), AmbiguousVariable {
        operation,
        symbols: expr.free_symbols().into_iter().collect(),
    }))
}

/// Extracts a variable name, or reports the argument as invalid.
fn variable(arg: &SymExpr, operation: &'static str) -> Result<String, Error> {
    arg.as_symbol()
        .map(str::to_string)
        .ok_or_else(|| Error::new(Vec::new(), InvalidVariable {
            operation,
            given: display(arg),
        }))
}

/// Resolves the variables of a derivative request into the list of variables to differentiate
/// by, in order, with repetition for higher derivatives.
fn derivative_variables(f: &SymExpr, args: &[SymExpr]) -> Result<Vec<String>, Error> {
    const OPERATION: &str = "differentiation";
    if args.is_empty() {
        return Ok(vec![infer_variable(f, OPERATION)?]);
    }

    let mut vars: Vec<String> = Vec::new();
    for arg in args {
        if let Some(count) = arg.as_integer().and_then(|n| n.to_usize()) {
            // diff(f, x, n): the previous variable n times in total
            let Some(last) = vars.last().cloned() else {
                return Err(Error::new(Vec::new(), InvalidVariable { operation: OPERATION, given: display(arg) }));
            };
            vars.extend(std::iter::repeat(last).take(count.saturating_sub(1)));
            if count == 0 {
                vars.pop();
            }
            continue;
        }

        if let Some(("Tuple", [var, count])) = arg.as_call() {
            let var = variable(var, OPERATION)?;
            let count = count.as_integer()
                .and_then(|n| n.to_usize())
                .ok_or_else(|| Error::new(Vec::new(), InvalidVariable { operation: OPERATION, given: display(arg) }))?;
            vars.extend(std::iter::repeat(var).take(count));
            continue;
        }

        vars.push(variable(arg, OPERATION)?);
    }
    Ok(vars)
}

/// Evaluates a derivative request.
fn eval_derivative(name: &str, args: &[SymExpr]) -> Result<SymExpr, Error> {
    let Some((f, rest)) = args.split_first() else {
        return Err(Error::new(Vec::new(), WrongArgumentCount {
            name: name.to_string(),
            expected: "at least 1 argument",
            given: 0,
        }));
    };

    let vars = derivative_variables(f, rest)?;
    debug!(f = %crate::fmt::display(f), ?vars, "differentiating");
    Ok(vars.iter().fold(f.clone(), |acc, var| derivative(&acc, var)))
}

/// Evaluates an integral request. Integrals without a known antiderivative stay unevaluated.
fn eval_integral(name: &str, args: &[SymExpr]) -> Result<SymExpr, Error> {
    const OPERATION: &str = "integration";
    let Some((f, rest)) = args.split_first() else {
        return Err(Error::new(Vec::new(), WrongArgumentCount {
            name: name.to_string(),
            expected: "at least 1 argument",
            given: 0,
        }));
    };

    let limits = if rest.is_empty() {
        vec![SymExpr::symbol(infer_variable(f, OPERATION)?)]
    } else {
        rest.to_vec()
    };

    let mut result = f.clone();
    for limit in limits {
        let integrated = match limit.as_call() {
            Some(("Tuple", [var, lower, upper])) => {
                let var = variable(var, OPERATION)?;
                integrate_definite(&result, &var, lower, upper)
            },
            Some(("Tuple", [var])) => integrate(&result, &variable(var, OPERATION)?),
            _ => integrate(&result, &variable(&limit, OPERATION)?),
        };

        result = match integrated {
            Some(integrated) => integrated,
            None => {
                debug!(f = %crate::fmt::display(&result), "leaving integral unevaluated");
                SymExpr::call("Integral", vec![result, limit])
            },
        };
    }
    Ok(result)
}

/// Evaluates every derivative and integral request in the expression, innermost first, and
/// simplifies the result.
pub fn doit(expr: &SymExpr) -> Result<SymExpr, Error> {
    let expr = expr.try_map_children(doit)?;
    let evaluated = match expr.as_call() {
        Some((name, args)) if is_derivative_call(name) => eval_derivative(name, args)?,
        Some((name, args)) if is_integral_call(name) => eval_integral(name, args)?,
        _ => expr,
    };
    Ok(simplify(&evaluated))
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
        assert_eq!(doit(&parse_expr(input)).unwrap(), simplify(&parse_expr(expected)));
    }

    #[test]
    fn derivative_forms() {
        check("diff(x**3, x)", "3*x**2");
        check("diff(x**3)", "3*x**2");
        check("diff(x**3, x, 2)", "6*x");
        check("diff(x**3, (x, 3))", "6");
        check("Derivative(x**2*y, x, y)", "2*x");
    }

    #[test]
    fn integral_forms() {
        check("integrate(x**2, x)", "x**3/3");
        check("Integral(2*x)", "x**2");
        check("integrate(x, (x, 0, 2))", "2");
        check("integrate(x*y, x, y)", "x**2*y**2/4");
    }

    #[test]
    fn nested_requests() {
        check("diff(integrate(cos(x), x), x)", "cos(x)");
        check("1 + diff(x**2, x)", "2*x + 1");
    }

    #[test]
    fn unevaluated_integral() {
        check("integrate(sin(x**2), x)", "Integral(sin(x**2), x)");
    }

    #[test]
    fn ambiguous_variable() {
        let err = doit(&parse_expr("diff(x*y)")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot infer the variable of differentiation: the expression depends on x, y",
        );
    }

    #[test]
    fn invalid_variable() {
        let err = doit(&parse_expr("integrate(x, 2*x)")).unwrap_err();
        assert_eq!(err.to_string(), "`2*x` is not a valid variable of integration");
    }

    #[test]
    fn missing_arguments() {
        let err = doit(&parse_expr("diff()")).unwrap_err();
        assert_eq!(err.to_string(), "`diff` takes at least 1 argument, but 0 were given");
    }
}
