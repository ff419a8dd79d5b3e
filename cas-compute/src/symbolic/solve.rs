//! Solving equations for a single unknown.
//!
//! [`solve_for`] finds the roots of `expr = 0`. The strategies, tried in order, are:
//!
//! 1. Clear denominators. Roots of a denominator are excluded from the result.
//! 2. Split products: the roots of `f*g` are the roots of `f` and the roots of `g`.
//! 3. Polynomials: linear and quadratic formulas, rational roots with deflation for higher
//!    degrees, and real roots of binomials `a*x^n + b`.
//! 4. Isolation: if a single term contains the unknown, invert the operations around it (powers,
//!    `exp`, `log`, `sin`, `cos`, `tan`).
//!
//! Candidates are substituted back into the equation, and those that do not satisfy it (such as
//! `x = 1` for `sqrt(x) + 1`, which only appears after squaring) are dropped. Roots are returned
//! sorted: real numbers in ascending order, then complex numbers, then symbolic roots.

use cas_error::Error;
use crate::{
    error::CannotSolve,
    fmt::display,
    numerical::evaluate,
    primitive::{complex, float, int, PRECISION},
};
use rug::{ops::Pow, Float, Integer, Rational};
use std::cmp::Ordering;
use super::{
    expand::expand,
    expr::SymExpr,
    poly::Poly,
    simplify::{fraction::as_numer_denom, simplify},
};
use tracing::{debug, trace};

/// Limits the nesting of isolation steps.
const MAX_DEPTH: usize = 16;

/// Rational root search is skipped for coefficients with more divisors than this.
const MAX_DIVISORS: usize = 4096;

/// A candidate root is kept if substituting it leaves a residual this many digits smaller than
/// the largest term.
const ROOT_TOLERANCE_DIGITS: i32 = 60;

/// A single solution: the value of each unknown.
pub type Substitution = Vec<(String, SymExpr)>;

/// The solutions of an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Solutions {
    /// The equation holds for every value of its unknowns.
    Identity,

    /// The equation holds for exactly these values. An empty list means there is no solution.
    Substitutions(Vec<Substitution>),
}

/// Builds `f(arg)`.
fn call(name: &str, arg: SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg])
}

/// Brings a sum over a common denominator. Returns the numerator, and the denominators that
/// depend on `var`.
fn together(expr: &SymExpr, var: &str) -> (SymExpr, Vec<SymExpr>) {
    let SymExpr::Add(terms) = expr else {
        let (numer, denom) = as_numer_denom(expr);
        let denoms = if denom.contains_symbol(var) { vec![denom] } else { Vec::new() };
        return (numer, denoms);
    };

    let parts = terms.iter().map(as_numer_denom).collect::<Vec<_>>();
    let mut denoms: Vec<SymExpr> = Vec::new();
    for (_, denom) in &parts {
        if denom.contains_symbol(var) && !denoms.contains(denom) {
            denoms.push(denom.clone());
        }
    }
    if denoms.is_empty() {
        return (expr.clone(), denoms);
    }

    let numer = parts.into_iter()
        .map(|(numer, denom)| {
            let others = denoms.iter()
                .filter(|other| **other != denom)
                .cloned()
                .fold(SymExpr::int(1), |acc, other| acc * other);
            if denom.contains_symbol(var) {
                numer * others
            } else {
                numer / denom * others
            }
        })
        .fold(SymExpr::int(0), |acc, term| acc + term);
    (expand(&numer), denoms)
}

/// Returns the positive divisors of `n`, or [`None`] if there are too many to search.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.clone().abs();
    if n == 0 || n.significant_bits() > 40 {
        return None;
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = int(1);
    while Integer::from(&d * &d) <= n {
        if n.is_divisible(&d) {
            let other = Integer::from(&n / &d);
            if other != d {
                large.push(other);
            }
            small.push(d.clone());
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    (small.len() <= MAX_DIVISORS).then_some(small)
}

/// Evaluates a polynomial with rational coefficients (lowest degree first).
fn eval_rational(coeffs: &[Rational], x: &Rational) -> Rational {
    coeffs.iter()
        .rev()
        .fold(Rational::new(), |acc, coeff| acc * x + coeff)
}

/// Divides a polynomial by `(x - root)`. The remainder is assumed to be zero.
pub(crate) fn deflate(coeffs: &[Rational], root: &Rational) -> Vec<Rational> {
    let mut quotient = vec![Rational::new(); coeffs.len() - 1];
    let mut carry = Rational::new();
    for i in (1..coeffs.len()).rev() {
        carry = carry * root + &coeffs[i];
        quotient[i - 1] = carry.clone();
    }
    quotient
}

/// Finds one rational root of a polynomial with rational coefficients, by the rational root
/// theorem.
pub(crate) fn find_rational_root(coeffs: &[Rational]) -> Option<Rational> {
    // scale to integer coefficients
    let lcm = coeffs.iter().fold(int(1), |acc, coeff| acc.lcm(coeff.denom()));
    let ints = coeffs.iter()
        .map(|coeff| Integer::from(coeff.numer() * (Integer::from(&lcm / coeff.denom()))))
        .collect::<Vec<_>>();

    let constant = ints.first()?;
    let leading = ints.last()?;
    let ps = divisors(constant)?;
    let qs = divisors(leading)?;
    for q in &qs {
        for p in &ps {
            for candidate in [Rational::from((p.clone(), q.clone())), -Rational::from((p.clone(), q.clone()))] {
                if eval_rational(coeffs, &candidate).cmp0().is_eq() {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

/// Roots of `c1*x + c0`.
fn linear_roots(c0: &SymExpr, c1: &SymExpr) -> Vec<SymExpr> {
    vec![simplify(&(-c0.clone() / c1.clone()))]
}

/// Roots of `c2*x^2 + c1*x + c0`, by the quadratic formula.
fn quadratic_roots(c0: &SymExpr, c1: &SymExpr, c2: &SymExpr) -> Vec<SymExpr> {
    let disc = simplify(&(
        SymExpr::pow(c1.clone(), SymExpr::int(2))
            - SymExpr::int(4) * c2.clone() * c0.clone()
    ));
    let denom = SymExpr::int(2) * c2.clone();
    if disc.is_zero() {
        return vec![simplify(&(-c1.clone() / denom))];
    }

    let root = disc.sqrt();
    vec![
        simplify(&((-c1.clone() - root.clone()) / denom.clone())),
        simplify(&((-c1.clone() + root) / denom)),
    ]
}

/// Roots of `a*x^n + b`. Only real roots are returned when `n > 2`.
fn binomial_roots(a: &SymExpr, b: &SymExpr, n: usize) -> Option<Vec<SymExpr>> {
    let value = simplify(&(-b.clone() / a.clone()));
    let exp = SymExpr::rational(Rational::from((1, n as u64)));

    if n % 2 == 1 {
        return Some(match value.as_number() {
            // real cube root of a negative number
            Some(num) if num.cmp0().is_lt() => {
                vec![simplify(&-SymExpr::pow(SymExpr::rational(-num.clone()), exp))]
            },
            _ => vec![simplify(&SymExpr::pow(value, exp))],
        });
    }

    match value.as_number() {
        Some(num) if num.cmp0().is_lt() => Some(Vec::new()),
        Some(num) if num.cmp0().is_eq() => Some(vec![SymExpr::int(0)]),
        _ => {
            let root = simplify(&SymExpr::pow(value, exp));
            Some(vec![simplify(&-root.clone()), root])
        },
    }
}

/// Roots of a polynomial with no rational roots left: linear, quadratic, binomial, or even in
/// `x`, i.e. a polynomial in `x^2`.
fn leftover_roots(coeffs: &[Rational]) -> Option<Vec<SymExpr>> {
    let exprs = coeffs.iter().cloned().map(SymExpr::rational).collect::<Vec<_>>();
    match exprs.as_slice() {
        [_] => Some(Vec::new()),
        [c0, c1] => Some(linear_roots(c0, c1)),
        [c0, c1, c2] => Some(quadratic_roots(c0, c1, c2)),
        [c0, middle @ .., cn] if middle.iter().all(SymExpr::is_zero) => {
            binomial_roots(cn, c0, exprs.len() - 1)
        },
        _ if coeffs.iter().skip(1).step_by(2).all(|coeff| coeff.cmp0().is_eq()) => {
            // y = x^2
            let halved = coeffs.iter().step_by(2).cloned().collect::<Vec<_>>();
            let squares = rational_poly_roots(halved)?;
            Some(squares.into_iter()
                .flat_map(|square| {
                    let root = simplify(&square.sqrt());
                    [simplify(&-root.clone()), root]
                })
                .collect())
        },
        _ => None,
    }
}

/// Roots of a polynomial with rational coefficients of any degree.
///
/// If part of the polynomial cannot be solved, the roots found so far are returned. Returns
/// [`None`] only if no root could be found at all.
fn rational_poly_roots(mut coeffs: Vec<Rational>) -> Option<Vec<SymExpr>> {
    let mut roots = Vec::new();

    // x = 0, possibly repeated
    while coeffs.len() > 1 && coeffs[0].cmp0().is_eq() {
        roots.push(SymExpr::int(0));
        coeffs.remove(0);
    }

    while coeffs.len() > 3 {
        match find_rational_root(&coeffs) {
            Some(root) => {
                trace!(root = %root, "found rational root");
                coeffs = deflate(&coeffs, &root);
                roots.push(SymExpr::rational(root));
            },
            None => break,
        }
    }

    match leftover_roots(&coeffs) {
        Some(leftover) => roots.extend(leftover),
        None if roots.is_empty() => return None,
        None => debug!(degree = coeffs.len() - 1, "leaving part of the polynomial unsolved"),
    }
    Some(roots)
}

/// Roots of a polynomial in `var`.
fn poly_roots(poly: &Poly) -> Option<Vec<SymExpr>> {
    if let Some(coeffs) = poly.rational_coeffs() {
        return rational_poly_roots(coeffs);
    }

    match poly.coeffs.as_slice() {
        [c0, c1] => Some(linear_roots(c0, c1)),
        [c0, c1, c2] => Some(quadratic_roots(c0, c1, c2)),
        [c0, middle @ .., cn] if middle.iter().all(SymExpr::is_zero) => {
            binomial_roots(cn, c0, poly.degree())
        },
        _ => None,
    }
}

/// Solves `lhs = rhs` for `var`, where `lhs` is the only part of the equation that depends on
/// `var`.
fn invert(lhs: &SymExpr, rhs: SymExpr, var: &str, depth: usize) -> Option<Vec<SymExpr>> {
    if depth > MAX_DEPTH {
        return None;
    }
    if lhs.is_symbol(var) {
        return Some(vec![simplify(&rhs)]);
    }

    match lhs {
        SymExpr::Add(terms) => {
            let (dependent, constant): (Vec<_>, Vec<_>) = terms.iter()
                .cloned()
                .partition(|term| term.contains_symbol(var));
            let [term] = dependent.as_slice() else {
                return None;
            };
            let constant = SymExpr::Add(constant).downgrade();
            invert(term, rhs - constant, var, depth + 1)
        },
        SymExpr::Mul(factors) => {
            let (dependent, constant): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| factor.contains_symbol(var));
            let [factor] = dependent.as_slice() else {
                return None;
            };
            let constant = SymExpr::Mul(constant).downgrade();
            invert(factor, rhs / constant, var, depth + 1)
        },
        SymExpr::Exp(base, exp) if !exp.contains_symbol(var) => {
            let root = SymExpr::pow(rhs, simplify(&(**exp).clone().recip()));
            match exp.as_integer() {
                Some(n) if n.is_even() => {
                    let mut roots = invert(base, -root.clone(), var, depth + 1)?;
                    roots.extend(invert(base, root, var, depth + 1)?);
                    Some(roots)
                },
                _ => invert(base, root, var, depth + 1),
            }
        },
        SymExpr::Exp(base, exp) if !base.contains_symbol(var) => {
            // b^u = rhs -> u = log(rhs)/log(b)
            invert(exp, call("log", rhs) / call("log", (**base).clone()), var, depth + 1)
        },
        SymExpr::Primary(_) => {
            let (name, args) = lhs.as_call()?;
            let [u] = args else {
                return None;
            };
            let pi = SymExpr::pi();
            let inverses = match name {
                "log" => vec![SymExpr::pow(SymExpr::e(), rhs)],
                "exp" => vec![call("log", rhs)],
                "sqrt" => vec![SymExpr::pow(rhs, SymExpr::int(2))],
                "sin" => vec![
                    call("asin", rhs.clone()),
                    pi - call("asin", rhs),
                ],
                "cos" => vec![
                    call("acos", rhs.clone()),
                    SymExpr::int(2) * pi - call("acos", rhs),
                ],
                "tan" => vec![call("atan", rhs)],
                _ => return None,
            };

            let mut roots = Vec::new();
            for inverse in inverses {
                roots.extend(invert(u, inverse, var, depth + 1)?);
            }
            Some(roots)
        },
        _ => None,
    }
}

/// Roots of a numerator, without checking denominators.
fn numerator_roots(expr: &SymExpr, var: &str, depth: usize) -> Option<Vec<SymExpr>> {
    if depth > MAX_DEPTH {
        return None;
    }
    if !expr.contains_symbol(var) {
        return Some(Vec::new());
    }

    match expr {
        SymExpr::Mul(factors) => {
            let mut roots = Vec::new();
            for factor in factors.iter().filter(|factor| factor.contains_symbol(var)) {
                roots.extend(numerator_roots(factor, var, depth + 1)?);
            }
            return Some(roots);
        },
        SymExpr::Exp(base, exp) if !exp.contains_symbol(var) => {
            // u^n = 0 -> u = 0, for positive n
            let positive = exp.is_numeric() && !exp.is_negative_number() && !exp.is_zero();
            return if positive {
                numerator_roots(base, var, depth + 1)
            } else {
                Some(Vec::new())
            };
        },
        SymExpr::Exp(base, _) if !base.contains_symbol(var) => {
            // b^u is never zero
            return Some(Vec::new());
        },
        _ => (),
    }

    if let Some(poly) = Poly::from_expr(expr, var) {
        if poly.degree() >= 1 {
            return poly_roots(&poly);
        }
    }

    invert(expr, SymExpr::int(0), var, depth + 1)
}

/// Returns true unless substituting `candidate` for `var` gives a number that is clearly not
/// zero, or is undefined. Candidates that leave other unknowns behind are kept.
fn satisfies(expr: &SymExpr, var: &str, candidate: &SymExpr) -> bool {
    let substituted = expr.substitute(var, candidate);
    if !substituted.free_symbols().is_empty() {
        return true;
    }

    let terms = match &substituted {
        SymExpr::Add(terms) => terms.as_slice(),
        other => std::slice::from_ref(other),
    };
    let mut scale = float(1);
    let mut total = complex(0);
    for term in terms {
        let Ok(value) = evaluate(term) else {
            return false;
        };
        let magnitude = Float::with_val(PRECISION, value.abs_ref());
        if magnitude > scale {
            scale = magnitude;
        }
        total += value;
    }

    let residual = Float::with_val(PRECISION, total.abs_ref());
    residual <= scale * float(10).pow(-ROOT_TOLERANCE_DIGITS)
}

/// Orders roots: real numbers ascending, then complex numbers, then symbolic roots.
fn compare_roots(a: &(Option<(f64, f64)>, String), b: &(Option<(f64, f64)>, String)) -> Ordering {
    match (&a.0, &b.0) {
        (Some((a_re, a_im)), Some((b_re, b_im))) => {
            let a_real = *a_im == 0.0;
            let b_real = *b_im == 0.0;
            b_real.cmp(&a_real)
                .then(a_re.total_cmp(b_re))
                .then(a_im.total_cmp(b_im))
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.1.cmp(&b.1),
    }
}

/// Finds every root of `expr = 0` with respect to `var`.
///
/// Returns an error if no method applies to the equation. An empty list means the equation has
/// no solution.
pub fn solve_for(expr: &SymExpr, var: &str) -> Result<Vec<SymExpr>, Error> {
    let expr = simplify(expr);
    let (numer, denoms) = together(&expr, var);
    trace!(numer = %crate::fmt::display(&numer), denoms = denoms.len(), "solving");

    let candidates = numerator_roots(&simplify(&numer), var, 0)
        .ok_or_else(|| Error::new(Vec::new(), CannotSolve {
            expr: display(&expr),
            var: var.to_string(),
        }))?;

    let mut roots: Vec<SymExpr> = Vec::new();
    for candidate in candidates {
        let candidate = simplify(&candidate);
        if candidate.post_order_iter().any(|node| *node == SymExpr::zoo()) || roots.contains(&candidate) {
            continue;
        }
        let excluded = denoms.iter()
            .any(|denom| simplify(&denom.substitute(var, &candidate)).is_zero());
        if excluded {
            debug!(root = %crate::fmt::display(&candidate), "excluding root of the denominator");
            continue;
        }
        if !satisfies(&expr, var, &candidate) {
            debug!(root = %crate::fmt::display(&candidate), "excluding root that does not satisfy the equation");
            continue;
        }
        roots.push(candidate);
    }

    let mut keyed = roots.into_iter()
        .map(|root| {
            let value = evaluate(&root)
                .ok()
                .map(|value| (value.real().to_f64(), value.imag().to_f64()));
            ((value, display(&root)), root)
        })
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| compare_roots(a, b));
    Ok(keyed.into_iter().map(|(_, root)| root).collect())
}

/// Solves the equation `lhs = rhs`.
///
/// The unknowns are tried in lexicographic order, and the roots for the first unknown that has
/// any are returned. An equation without unknowns is either an identity, or has no solution.
pub fn solve_equation(lhs: &SymExpr, rhs: &SymExpr) -> Result<Solutions, Error> {
    let expr = simplify(&(lhs.clone() - rhs.clone()));
    let unknowns = expr.free_symbols();
    if unknowns.is_empty() {
        return Ok(if expr.is_zero() {
            Solutions::Identity
        } else {
            Solutions::Substitutions(Vec::new())
        });
    }

    let mut first_error = None;
    let mut solved_empty = false;
    for var in &unknowns {
        match solve_for(&expr, var) {
            Ok(roots) if roots.is_empty() => solved_empty = true,
            Ok(roots) => {
                return Ok(Solutions::Substitutions(
                    roots.into_iter()
                        .map(|root| vec![(var.clone(), root)])
                        .collect(),
                ));
            },
            Err(err) => {
                debug!(var, error = %err, "could not solve for unknown");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            },
        }
    }

    match first_error {
        Some(err) if !solved_empty => Err(err),
        _ => Ok(Solutions::Substitutions(Vec::new())),
    }
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::try_from(parse(input).unwrap()).unwrap()
    }

    fn roots(input: &str) -> Vec<SymExpr> {
        solve_for(&parse_expr(input), "x").unwrap()
    }

    fn exprs(inputs: &[&str]) -> Vec<SymExpr> {
        inputs.iter().map(|input| simplify(&parse_expr(input))).collect()
    }

    #[test]
    fn linear() {
        assert_eq!(roots("2*x - 6"), exprs(&["3"]));
        assert_eq!(roots("x/3 + 1"), exprs(&["-3"]));
        assert_eq!(roots("a*x + b"), exprs(&["-b/a"]));
    }

    #[test]
    fn quadratic() {
        assert_eq!(roots("x**2 - 4"), exprs(&["-2", "2"]));
        assert_eq!(roots("x**2 - 2"), exprs(&["-sqrt(2)", "sqrt(2)"]));
        assert_eq!(roots("x**2 + 1"), exprs(&["-I", "I"]));
        assert_eq!(roots("x**2 - 2*x + 1"), exprs(&["1"]));
    }

    #[test]
    fn cubic_with_rational_roots() {
        assert_eq!(roots("x**3 - 6*x**2 + 11*x - 6"), exprs(&["1", "2", "3"]));
        assert_eq!(roots("x**3 - x"), exprs(&["-1", "0", "1"]));
    }

    #[test]
    fn binomial() {
        assert_eq!(roots("x**3 - 2"), exprs(&["2**(1/3)"]));
        assert_eq!(roots("x**3 + 2"), exprs(&["-2**(1/3)"]));
        assert_eq!(roots("x**4 - 16"), exprs(&["-2", "2", "-2*I", "2*I"]));
        assert_eq!(roots("x**4 + 16"), Vec::<SymExpr>::new());
    }

    #[test]
    fn partially_solvable_polynomials() {
        let found = roots("x**6 - 64");
        assert_eq!(found.len(), 6);
        assert_eq!(found[..2], exprs(&["-2", "2"])[..]);
        for root in &found {
            let value = evaluate(&SymExpr::pow(root.clone(), SymExpr::int(6))).unwrap();
            assert!((value.real().to_f64() - 64.0).abs() < 1e-9);
            assert!(value.imag().to_f64().abs() < 1e-9);
        }

        let found = roots("x**1000 - 1");
        assert_eq!(found[..2], exprs(&["-1", "1"])[..]);
    }

    #[test]
    fn extraneous_roots_are_dropped() {
        assert_eq!(roots("sqrt(x) + 1"), Vec::<SymExpr>::new());
        assert_eq!(roots("x**(1/2) + 3"), Vec::<SymExpr>::new());
        assert_eq!(roots("sqrt(x) - 3"), exprs(&["9"]));
        assert_eq!(roots("x**(1/3) + 2"), Vec::<SymExpr>::new());
    }

    #[test]
    fn products_and_fractions() {
        assert_eq!(roots("(x - 1)*(x + 5)"), exprs(&["-5", "1"]));
        assert_eq!(roots("(x**2 - 1)/(x - 1)"), exprs(&["-1"]));
        assert_eq!(roots("x + 1/x"), exprs(&["-I", "I"]));
        assert_eq!(roots("1/x"), Vec::<SymExpr>::new());
    }

    #[test]
    fn isolation() {
        assert_eq!(roots("exp(x) - 2"), exprs(&["log(2)"]));
        assert_eq!(roots("log(x) - 1"), exprs(&["E"]));
        assert_eq!(roots("sin(x)"), exprs(&["0", "pi"]));
        assert_eq!(roots("cos(x)"), exprs(&["pi/2", "3*pi/2"]));
    }

    #[test]
    fn cannot_solve() {
        let err = solve_for(&parse_expr("x + sin(x)"), "x").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("could not find a method to solve"));
        assert!(message.ends_with("for x"));
    }

    #[test]
    fn equations() {
        let solutions = solve_equation(&parse_expr("x**2"), &SymExpr::int(4)).unwrap();
        assert_eq!(solutions, Solutions::Substitutions(vec![
            vec![("x".to_string(), SymExpr::int(-2))],
            vec![("x".to_string(), SymExpr::int(2))],
        ]));

        let solutions = solve_equation(&parse_expr("x + y"), &SymExpr::int(2)).unwrap();
        assert_eq!(solutions, Solutions::Substitutions(vec![
            vec![("x".to_string(), simplify(&parse_expr("2 - y")))],
        ]));
    }

    #[test]
    fn identities_and_contradictions() {
        assert_eq!(solve_equation(&parse_expr("x + 1"), &parse_expr("1 + x")).unwrap(), Solutions::Identity);
        assert_eq!(
            solve_equation(&parse_expr("x + 1"), &parse_expr("x + 2")).unwrap(),
            Solutions::Substitutions(Vec::new()),
        );
    }
}
