//! The order in which terms of sums and factors of products are printed.

use crate::{consts::{is_constant, I_NAME}, symbolic::SymExpr};
use super::display::display;

/// Returns the numeric value of an exponent, if it is a number.
fn numeric_exponent(exp: &SymExpr) -> Option<f64> {
    if let Some(num) = exp.as_number() {
        Some(num.to_f64())
    } else {
        exp.as_float().map(|num| num.to_f64())
    }
}

/// Returns the total degree of a term in its free symbols. Factors that are not powers of a
/// symbol have degree 0.
fn degree(term: &SymExpr) -> f64 {
    match term {
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        SymExpr::Exp(base, exp) => match base.as_symbol() {
            Some(name) if !is_constant(name) => numeric_exponent(exp).unwrap_or(0.0),
            _ => 0.0,
        },
        _ => match term.as_symbol() {
            Some(name) if !is_constant(name) => 1.0,
            _ => 0.0,
        },
    }
}

/// Orders the terms of a sum for printing.
///
/// Terms are sorted by descending degree. Numbers go last if any term has free symbols, and
/// first otherwise. If the first term would be negative, the first positive term is moved in
/// front of it, so that `-x + 2` prints as `2 - x`.
pub fn add_terms(terms: &[SymExpr]) -> Vec<&SymExpr> {
    let has_symbols = terms.iter().any(|term| !term.free_symbols().is_empty());
    let number_rank = |term: &SymExpr| match (term.is_numeric(), has_symbols) {
        (true, true) | (false, false) => 1,
        _ => 0,
    };

    let mut keyed = terms.iter()
        .map(|term| {
            let key = (number_rank(term), degree(term), display(&term.coeff_and_rest().1));
            (key, term)
        })
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| {
        a.0.cmp(&b.0)
            .then(b.1.total_cmp(&a.1))
            .then(a.2.cmp(&b.2))
    });

    let mut ordered = keyed.into_iter().map(|(_, term)| term).collect::<Vec<_>>();
    if ordered.first().is_some_and(|term| term.is_negative_term()) {
        if let Some(idx) = ordered.iter().position(|term| !term.is_negative_term()) {
            let positive = ordered.remove(idx);
            ordered.insert(0, positive);
        }
    }
    ordered
}

/// Sort key of a factor in a product. Sums that differ only in their constant term are ordered
/// by that constant, so `(x + 2)*(x - 2)` prints as `(x - 2)*(x + 2)`.
fn factor_key(factor: &SymExpr) -> (u8, String, f64) {
    if factor.is_numeric() {
        return (0, String::new(), 0.0);
    }
    if factor.is_symbol(I_NAME) {
        return (2, String::new(), 0.0);
    }
    if factor.free_symbols().is_empty() {
        return (1, display(factor), 0.0);
    }

    let base = match factor {
        SymExpr::Exp(base, _) => base,
        other => other,
    };
    if let Some(name) = base.as_symbol() {
        return (3, name.to_string(), 0.0);
    }
    match base {
        SymExpr::Add(terms) => {
            let (numbers, rest): (Vec<_>, Vec<_>) = terms.iter()
                .cloned()
                .partition(|term| term.as_number().is_some());
            let constant: f64 = numbers.iter()
                .filter_map(|term| term.as_number().map(|num| num.to_f64()))
                .sum();
            (4, display(&SymExpr::Add(rest).downgrade()), constant)
        },
        _ => (4, display(factor), 0.0),
    }
}

/// Orders the factors of a product for printing: numbers, then constants, then the imaginary
/// unit, then powers of symbols by name, then everything else.
pub fn mul_factors(factors: &[SymExpr]) -> Vec<&SymExpr> {
    let mut keyed = factors.iter()
        .map(|factor| (factor_key(factor), factor))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.cmp(&b.1))
            .then(a.2.total_cmp(&b.2))
    });
    keyed.into_iter().map(|(_, factor)| factor).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn descending_degree_numbers_last() {
        let terms = vec![
            SymExpr::int(-4),
            SymExpr::symbol("x"),
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::int(2)),
        ];
        assert_eq!(add_terms(&terms), vec![&terms[2], &terms[1], &terms[0]]);
    }

    #[test]
    fn numbers_first_without_symbols() {
        let terms = vec![SymExpr::i(), SymExpr::int(2)];
        assert_eq!(add_terms(&terms), vec![&terms[1], &terms[0]]);
    }

    #[test]
    fn negative_leading_term_rotated() {
        let terms = vec![
            SymExpr::Mul(vec![SymExpr::int(-1), SymExpr::symbol("y")]),
            SymExpr::int(2),
        ];
        assert_eq!(add_terms(&terms), vec![&terms[1], &terms[0]]);
    }

    #[test]
    fn factor_order() {
        let factors = vec![
            SymExpr::symbol("y"),
            SymExpr::i(),
            SymExpr::symbol("x"),
            SymExpr::int(2),
        ];
        assert_eq!(mul_factors(&factors), vec![&factors[3], &factors[1], &factors[2], &factors[0]]);
    }

    #[test]
    fn sums_ordered_by_constant() {
        let plus = SymExpr::Add(vec![SymExpr::symbol("x"), SymExpr::int(2)]);
        let minus = SymExpr::Add(vec![SymExpr::symbol("x"), SymExpr::int(-2)]);
        let factors = vec![plus, minus];
        assert_eq!(mul_factors(&factors), vec![&factors[1], &factors[0]]);
    }
}
