//! Tools to help build and take apart fractions.

use crate::symbolic::expr::SymExpr;

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`SymExpr::Mul`] containing the numerator, and the denominator raised
/// to the power of -1. Numeric denominators are divided out directly.
pub fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    match denominator.as_number() {
        Some(den) if den.cmp0().is_ne() => numerator * SymExpr::rational(den.clone().recip()),
        _ => numerator * denominator.recip(),
    }
}

/// Splits an expression into its numerator and denominator, by moving every factor with a
/// negative numeric exponent (and the denominator of a rational coefficient) into the
/// denominator.
///
/// - `x/3` -> `(x, 3)`
/// - `2*x**2*(x - 1)**-1` -> `(2*x**2, x - 1)`
/// - `x + 1/x` -> `(x + 1/x, 1)` (sums are not combined)
pub fn as_numer_denom(expr: &SymExpr) -> (SymExpr, SymExpr) {
    let factors = match expr {
        SymExpr::Mul(factors) => factors.as_slice(),
        other => std::slice::from_ref(other),
    };

    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in factors {
        match factor {
            SymExpr::Exp(base, exp) if exp.is_negative_term() => {
                let positive = -(**exp).clone();
                if positive.is_one() {
                    denom.push((**base).clone());
                } else {
                    denom.push(SymExpr::pow((**base).clone(), positive));
                }
            },
            _ => match factor.as_number() {
                Some(num) if *num.denom() != 1 => {
                    if *num.numer() != 1 {
                        numer.push(SymExpr::int(num.numer().clone()));
                    }
                    denom.push(SymExpr::int(num.denom().clone()));
                },
                _ => numer.push(factor.clone()),
            },
        }
    }

    (SymExpr::Mul(numer).downgrade(), SymExpr::Mul(denom).downgrade())
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::try_from(parse(input).unwrap()).unwrap()
    }

    #[test]
    fn numeric_denominator() {
        assert_eq!(make_fraction(SymExpr::symbol("x"), SymExpr::int(4)), SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::rational((1, 4)),
        ]));
    }

    #[test]
    fn split_fraction() {
        let (numer, denom) = as_numer_denom(&parse_expr("3*x/(x - 1)"));
        assert_eq!(numer, parse_expr("3*x"));
        assert_eq!(denom, parse_expr("x - 1"));
    }

    #[test]
    fn split_rational_coefficient() {
        let (numer, denom) = as_numer_denom(&parse_expr("x**3/3"));
        assert_eq!(numer, parse_expr("x**3"));
        assert_eq!(denom, SymExpr::int(3));
    }

    #[test]
    fn split_negative_power() {
        let (numer, denom) = as_numer_denom(&parse_expr("x**-2"));
        assert_eq!(numer, SymExpr::int(1));
        assert_eq!(denom, parse_expr("x**2"));
    }
}
