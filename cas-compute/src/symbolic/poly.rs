//! A dense view of univariate polynomials.

use super::{expand::expand, expr::SymExpr, simplify::simplify};
use rug::Rational;

/// A polynomial in a single variable, with coefficients that do not depend on that variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    /// The variable of the polynomial.
    pub var: String,

    /// `coeffs[i]` is the coefficient of `var^i`. There are no trailing zero coefficients; the
    /// zero polynomial has no coefficients at all.
    pub coeffs: Vec<SymExpr>,
}

impl Poly {
    /// Builds the polynomial view of an expression, after expanding it. Returns [`None`] if the
    /// expression is not a polynomial in `var`.
    pub fn from_expr(expr: &SymExpr, var: &str) -> Option<Self> {
        let expanded = expand(expr);
        let terms = match &expanded {
            SymExpr::Add(terms) => terms.as_slice(),
            other => std::slice::from_ref(other),
        };

        let mut coeffs: Vec<SymExpr> = Vec::new();
        for term in terms {
            let (degree, coeff) = split_term(term, var)?;
            if coeffs.len() <= degree {
                coeffs.resize(degree + 1, SymExpr::int(0));
            }
            coeffs[degree] = simplify(&(std::mem::replace(&mut coeffs[degree], SymExpr::int(0)) + coeff));
        }

        while coeffs.last().is_some_and(SymExpr::is_zero) {
            coeffs.pop();
        }
        Some(Self { var: var.to_string(), coeffs })
    }

    /// Returns the degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the coefficient of `var^i`.
    pub fn coeff(&self, i: usize) -> SymExpr {
        self.coeffs.get(i).cloned().unwrap_or_else(|| SymExpr::int(0))
    }

    /// Returns the coefficients as exact rationals, if all of them are.
    pub fn rational_coeffs(&self) -> Option<Vec<Rational>> {
        self.coeffs.iter()
            .map(|coeff| coeff.as_number().cloned())
            .collect()
    }

    /// Converts the polynomial back to an expression.
    pub fn to_expr(&self) -> SymExpr {
        let var = SymExpr::symbol(self.var.as_str());
        let terms = self.coeffs.iter()
            .enumerate()
            .filter(|(_, coeff)| !coeff.is_zero())
            .map(|(i, coeff)| coeff.clone() * SymExpr::pow(var.clone(), SymExpr::int(i as u64)))
            .collect();
        simplify(&SymExpr::Add(terms))
    }
}

/// Splits a term of an expanded polynomial into its degree in `var` and its coefficient.
fn split_term(term: &SymExpr, var: &str) -> Option<(usize, SymExpr)> {
    let factors = match term {
        SymExpr::Mul(factors) => factors.as_slice(),
        other => std::slice::from_ref(other),
    };

    let mut degree = 0;
    let mut coeff = Vec::new();
    for factor in factors {
        if !factor.contains_symbol(var) {
            coeff.push(factor.clone());
            continue;
        }

        match factor {
            SymExpr::Primary(_) if factor.is_symbol(var) => degree += 1,
            SymExpr::Exp(base, exp) if base.is_symbol(var) => {
                degree += exp.as_integer()?.to_usize()?;
            },
            _ => return None,
        }
    }

    Some((degree, SymExpr::Mul(coeff).downgrade()))
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use crate::primitive::rational;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::try_from(parse(input).unwrap()).unwrap()
    }

    #[test]
    fn quadratic() {
        let poly = Poly::from_expr(&parse_expr("(x - 1)*(2*x + 3)"), "x").unwrap();
        assert_eq!(poly.degree(), 2);
        assert_eq!(poly.rational_coeffs().unwrap(), vec![rational(-3), rational(1), rational(2)]);
    }

    #[test]
    fn symbolic_coefficients() {
        let poly = Poly::from_expr(&parse_expr("a*x**2 + b"), "x").unwrap();
        assert_eq!(poly.coeffs, vec![SymExpr::symbol("b"), SymExpr::int(0), SymExpr::symbol("a")]);
        assert!(poly.rational_coeffs().is_none());
    }

    #[test]
    fn not_a_polynomial() {
        assert!(Poly::from_expr(&parse_expr("sin(x) + 1"), "x").is_none());
        assert!(Poly::from_expr(&parse_expr("1/x"), "x").is_none());
    }

    #[test]
    fn zero_polynomial() {
        let poly = Poly::from_expr(&parse_expr("x - x"), "x").unwrap();
        assert!(poly.is_zero());
    }
}
