//! Factoring univariate polynomials over the rationals.

use crate::primitive::int;
use rug::{Integer, Rational};
use super::{
    expr::SymExpr,
    poly::Poly,
    solve::{deflate, find_rational_root},
};

/// Builds `q*var - p` for the root `p/q`.
fn linear_factor(var: &str, root: &Rational) -> SymExpr {
    let (p, q) = root.clone().into_numer_denom();
    let term = if q == 1 {
        SymExpr::symbol(var)
    } else {
        SymExpr::Mul(vec![SymExpr::int(q), SymExpr::symbol(var)])
    };
    if p == 0 {
        term
    } else {
        SymExpr::Add(vec![term, SymExpr::int(-p)])
    }
}

/// Factors an expression that is a polynomial in exactly one variable with rational
/// coefficients.
///
/// The result is a product of the content of the polynomial, its linear factors `(q*x - p)`
/// raised to their multiplicities, and whatever polynomial is left without rational roots. The
/// result is not simplified, so that the factors stay visible. Returns [`None`] if the expression
/// is not such a polynomial.
pub fn factor(expr: &SymExpr) -> Option<SymExpr> {
    let symbols = expr.free_symbols();
    if symbols.len() != 1 {
        return None;
    }
    let var = symbols.iter().next()?;
    let poly = Poly::from_expr(expr, var)?;
    if poly.degree() == 0 {
        return None;
    }
    let coeffs = poly.rational_coeffs()?;

    // pull out the content, so that the rest has coprime integer coefficients and a positive
    // leading coefficient
    let lcm = coeffs.iter().fold(int(1), |acc, coeff| acc.lcm(coeff.denom()));
    let gcd = coeffs.iter()
        .map(|coeff| Integer::from(coeff.numer() * Integer::from(&lcm / coeff.denom())))
        .fold(int(0), |acc, n| acc.gcd(&n));
    let mut content = Rational::from((gcd, lcm));
    if coeffs.last().is_some_and(|lead| lead.cmp0().is_lt()) {
        content = -content;
    }
    let mut rest = coeffs.iter()
        .map(|coeff| Rational::from(coeff / &content))
        .collect::<Vec<_>>();

    let mut roots: Vec<(Rational, u32)> = Vec::new();
    while rest.len() > 1 {
        let root = if rest[0].cmp0().is_eq() {
            Rational::new()
        } else {
            match find_rational_root(&rest) {
                Some(root) => root,
                None => break,
            }
        };
        rest = deflate(&rest, &root);

        // `rest` had leading coefficient `lead`, dividing by `x - p/q` leaves `lead`, and
        // dividing by `q*x - p` instead leaves `lead/q`
        let q = Rational::from(root.denom());
        rest.iter_mut().for_each(|coeff| *coeff /= &q);

        match roots.iter_mut().find(|(seen, _)| *seen == root) {
            Some((_, count)) => *count += 1,
            None => roots.push((root, 1)),
        }
    }

    let mut factors = Vec::new();
    if content != 1 {
        factors.push(SymExpr::rational(content));
    }
    roots.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (root, count) in &roots {
        let linear = linear_factor(var, root);
        if *count == 1 {
            factors.push(linear);
        } else {
            factors.push(SymExpr::pow(linear, SymExpr::int(*count)));
        }
    }
    if rest.len() > 1 {
        let var_expr = SymExpr::symbol(var.as_str());
        let terms = rest.into_iter()
            .enumerate()
            .rev()
            .filter(|(_, coeff)| coeff.cmp0().is_ne())
            .map(|(i, coeff)| {
                let power = match i {
                    0 => return SymExpr::rational(coeff),
                    1 => var_expr.clone(),
                    _ => SymExpr::pow(var_expr.clone(), SymExpr::int(i as u64)),
                };
                if coeff == 1 {
                    power
                } else {
                    SymExpr::Mul(vec![SymExpr::rational(coeff), power])
                }
            })
            .collect::<Vec<_>>();
        factors.push(SymExpr::Add(terms).downgrade());
    }

    Some(SymExpr::Mul(factors).downgrade())
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::parse;
    use crate::symbolic::{expand, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::try_from(parse(input).unwrap()).unwrap()
    }

    fn x_minus(n: i32) -> SymExpr {
        SymExpr::Add(vec![SymExpr::symbol("x"), SymExpr::int(-n)])
    }

    #[test]
    fn difference_of_squares() {
        let factored = factor(&parse_expr("x**2 - 4")).unwrap();
        assert_eq!(factored, SymExpr::Mul(vec![x_minus(-2), x_minus(2)]));
    }

    #[test]
    fn repeated_root_and_content() {
        let factored = factor(&parse_expr("2*x**2 - 4*x + 2")).unwrap();
        assert_eq!(factored, SymExpr::Mul(vec![
            SymExpr::int(2),
            SymExpr::pow(x_minus(1), SymExpr::int(2)),
        ]));
    }

    #[test]
    fn rational_root() {
        let factored = factor(&parse_expr("2*x**2 - x")).unwrap();
        assert_eq!(factored, SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::Add(vec![
                SymExpr::Mul(vec![SymExpr::int(2), SymExpr::symbol("x")]),
                SymExpr::int(-1),
            ]),
        ]));
    }

    #[test]
    fn irreducible_part_is_kept() {
        let expr = parse_expr("x**3 + x");
        let factored = factor(&expr).unwrap();
        assert_eq!(simplify(&expand(&factored)), simplify(&expand(&expr)));
        assert!(matches!(factored, SymExpr::Mul(ref factors) if factors.len() == 2));
    }

    #[test]
    fn not_a_polynomial() {
        assert_eq!(factor(&parse_expr("sin(x)")), None);
        assert_eq!(factor(&parse_expr("x*y - 1")), None);
        assert_eq!(factor(&parse_expr("5")), None);
    }
}
