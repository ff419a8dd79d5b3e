//! Simplification rules for function calls: rewriting `sqrt` and `exp` as powers, exact values
//! of elementary functions, and odd / even symmetry.

use crate::numerical::funcs;
use crate::primitive::{complex, rational};
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// Functions with `f(-x) = -f(x)`.
const ODD: &[&str] = &["sin", "tan", "asin", "atan", "sinh", "tanh", "asinh", "atanh"];

/// Functions with `f(-x) = f(x)`.
const EVEN: &[&str] = &["cos", "cosh", "abs"];

/// `sqrt(a) = a^(1/2)`
/// `exp(a) = e^a`
pub fn rewrite_function(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, &["sqrt", "exp"], |name, arg| match name {
        "sqrt" => Some(arg.clone().sqrt()),
        _ => Some(SymExpr::pow(SymExpr::e(), arg.clone())),
    })?;

    step_collector.push(Step::RewriteFunction);
    Some(opt)
}

/// `r*pi` as an expression.
fn pi_times(r: Rational) -> SymExpr {
    if r.cmp0().is_eq() {
        SymExpr::int(0)
    } else if r == 1 {
        SymExpr::pi()
    } else {
        SymExpr::Mul(vec![SymExpr::rational(r), SymExpr::pi()])
    }
}

/// `sqrt(n)/d` as an expression.
fn root_over(n: u32, d: u32) -> SymExpr {
    let root = SymExpr::int(n).sqrt();
    if d == 1 {
        root
    } else {
        SymExpr::Mul(vec![SymExpr::rational((1, d)), root])
    }
}

/// If the argument is a rational multiple of `pi` (including zero), returns the multiple.
fn pi_multiple(arg: &SymExpr) -> Option<Rational> {
    if let Some(n) = arg.as_number() {
        return n.cmp0().is_eq().then(Rational::new);
    }

    let (coeff, rest) = arg.coeff_and_rest();
    if rest != SymExpr::pi() {
        return None;
    }
    coeff.as_number().cloned()
}

/// Reduces `r` into `[0, period)`.
fn reduce(r: Rational, period: u32) -> Rational {
    let turns = (r.clone() / period).floor();
    r - turns * period
}

/// `sin(r*pi)` for multiples of `pi/6` and `pi/4`.
fn sin_pi(r: Rational) -> Option<SymExpr> {
    let mut r = reduce(r, 2);
    let mut negative = false;
    if r >= 1 {
        r -= 1;
        negative = true;
    }
    if r > rational((1, 2)) {
        r = 1 - r;
    }

    let value = if r.cmp0().is_eq() {
        SymExpr::int(0)
    } else if r == rational((1, 6)) {
        SymExpr::rational((1, 2))
    } else if r == rational((1, 4)) {
        root_over(2, 2)
    } else if r == rational((1, 3)) {
        root_over(3, 2)
    } else if r == rational((1, 2)) {
        SymExpr::int(1)
    } else {
        return None;
    };

    Some(if negative { -value } else { value })
}

/// `tan(r*pi)` for multiples of `pi/6` and `pi/4`.
fn tan_pi(r: Rational) -> Option<SymExpr> {
    let mut r = reduce(r, 1);
    let mut negative = false;
    if r > rational((1, 2)) {
        r = 1 - r;
        negative = true;
    }

    let value = if r.cmp0().is_eq() {
        SymExpr::int(0)
    } else if r == rational((1, 6)) {
        root_over(3, 3)
    } else if r == rational((1, 4)) {
        SymExpr::int(1)
    } else if r == rational((1, 3)) {
        root_over(3, 1)
    } else if r == rational((1, 2)) {
        return Some(SymExpr::zoo());
    } else {
        return None;
    };

    Some(if negative { -value } else { value })
}

/// `asin(a)` for the values of `sin` at multiples of `pi/6` and `pi/4`, as a multiple of `pi`.
fn asin_value(arg: &SymExpr) -> Option<Rational> {
    let (sign, magnitude) = if arg.is_negative_term() {
        (-1, -arg.clone())
    } else {
        (1, arg.clone())
    };

    let r = if magnitude.is_zero() {
        Rational::new()
    } else if magnitude == SymExpr::rational((1, 2)) {
        rational((1, 6))
    } else if magnitude == root_over(2, 2) {
        rational((1, 4))
    } else if magnitude == root_over(3, 2) {
        rational((1, 3))
    } else if magnitude.is_one() && magnitude.as_number().is_some() {
        rational((1, 2))
    } else {
        return None;
    };
    Some(r * sign)
}

/// `atan(a)` for the values of `tan` at multiples of `pi/6` and `pi/4`, as a multiple of `pi`.
fn atan_value(arg: &SymExpr) -> Option<Rational> {
    if arg.is_zero() {
        Some(Rational::new())
    } else if arg.is_one() && arg.as_number().is_some() {
        Some(rational((1, 4)))
    } else if *arg == root_over(3, 1) {
        Some(rational((1, 3)))
    } else if *arg == root_over(3, 3) {
        Some(rational((1, 6)))
    } else {
        None
    }
}

/// Exact values of elementary functions at special points.
///
/// `sin(pi/6) = 1/2`
/// `cos(pi) = -1`
/// `tan(pi/2) = zoo`
/// `asin(1) = pi/2`
/// `log(1) = 0`
/// `log(-2) = log(2) + i*pi`
/// `log(e^3) = 3`
/// `abs(-2) = 2`
pub fn special_value(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let names = [
        "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "log", "abs",
    ];
    let opt = do_call(expr, &names, |name, arg| match name {
        "sin" => sin_pi(pi_multiple(arg)?),
        "cos" => sin_pi(pi_multiple(arg)? + rational((1, 2))),
        "tan" => tan_pi(pi_multiple(arg)?),
        "asin" => asin_value(arg).map(pi_times),
        "acos" => asin_value(arg).map(|r| pi_times(rational((1, 2)) - r)),
        "atan" => atan_value(arg).map(pi_times),
        "sinh" | "tanh" => arg.is_zero().then(|| SymExpr::int(0)),
        "cosh" => arg.is_zero().then(|| SymExpr::int(1)),
        "log" => {
            if *arg == SymExpr::e() {
                Some(SymExpr::int(1))
            } else if let Some(n) = arg.as_number() {
                if *n == 1 {
                    Some(SymExpr::int(0))
                } else if n.cmp0().is_eq() {
                    Some(SymExpr::zoo())
                } else if n.cmp0().is_lt() {
                    // principal branch
                    let magnitude = SymExpr::call("log", vec![SymExpr::rational(-n.clone())]);
                    Some(magnitude + SymExpr::i() * SymExpr::pi())
                } else {
                    None
                }
            } else if let SymExpr::Exp(base, exp) = arg {
                (**base == SymExpr::e() && exp.as_number().is_some()).then(|| (**exp).clone())
            } else {
                None
            }
        },
        _ => arg.as_number().map(|n| SymExpr::rational(n.clone().abs())),
    })?;

    step_collector.push(Step::SpecialValue);
    Some(opt)
}

/// `f(-a) = -f(a)` for odd functions
/// `f(-a) = f(a)` for even functions
pub fn symmetry(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let names = ODD.iter().chain(EVEN).copied().collect::<Vec<_>>();
    let opt = do_call(expr, &names, |name, arg| {
        if !arg.is_negative_term() {
            return None;
        }

        let call = SymExpr::call(name, vec![-arg.clone()]);
        if ODD.contains(&name) {
            Some(-call)
        } else {
            Some(call)
        }
    })?;

    step_collector.push(Step::Symmetry);
    Some(opt)
}

/// Evaluates a function numerically if its arguments are numbers, and at least one of them is a
/// float. Complex results are left unevaluated.
///
/// `sin(0.5) = 0.479...`
pub fn evaluate_float(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let SymExpr::Primary(Primary::Call(name, args)) = expr else {
        return None;
    };
    if !args.iter().all(SymExpr::is_numeric) || args.iter().all(|arg| arg.as_number().is_some()) {
        return None;
    }

    let values = args.iter()
        .map(|arg| match arg {
            SymExpr::Primary(Primary::Number(n)) => complex(n),
            SymExpr::Primary(Primary::Float(n)) => complex(n),
            _ => complex(0),
        })
        .collect();
    let value = funcs::eval(name, values)?;
    if !value.imag().is_zero() || !value.real().is_finite() {
        return None;
    }

    step_collector.push(Step::EvaluateFloat);
    Some(SymExpr::float(value.real().clone()))
}

/// Applies all function rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    evaluate_float(expr, step_collector)
        .or_else(|| rewrite_function(expr, step_collector))
        .or_else(|| special_value(expr, step_collector))
        .or_else(|| symmetry(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn sine_table() {
        assert_eq!(sin_pi(rational((7, 6))), Some(SymExpr::rational((-1, 2))));
        assert_eq!(sin_pi(rational((-1, 2))), Some(SymExpr::int(-1)));
        assert_eq!(sin_pi(rational((1, 5))), None);
    }

    #[test]
    fn tangent_table() {
        assert_eq!(tan_pi(rational((3, 4))), Some(SymExpr::int(-1)));
        assert_eq!(tan_pi(rational((1, 2))), Some(SymExpr::zoo()));
    }

    #[test]
    fn inverse_cosine() {
        let expr = SymExpr::call("acos", vec![SymExpr::rational((-1, 2))]);
        assert_eq!(
            special_value(&expr, &mut ()),
            Some(SymExpr::Mul(vec![SymExpr::rational((2, 3)), SymExpr::pi()])),
        );
    }

    #[test]
    fn float_argument() {
        let expr = SymExpr::call("cos", vec![SymExpr::float(crate::primitive::float(0))]);
        assert_eq!(
            evaluate_float(&expr, &mut ()),
            Some(SymExpr::float(crate::primitive::float(1))),
        );
    }
}
