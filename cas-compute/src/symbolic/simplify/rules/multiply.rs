//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `a*(b*c) = a*b*c`
///
/// A product with a single factor is replaced by the factor.
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.len() <= 1 {
            return Some(SymExpr::Mul(factors.to_vec()).downgrade());
        }
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let flat = factors.iter()
            .flat_map(|factor| match factor {
                SymExpr::Mul(inner) => inner.clone(),
                other => vec![other.clone()],
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Mul(flat).downgrade())
    })?;

    step_collector.push(Step::FlattenMultiply);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
///
/// `0*zoo` is undefined and is left to [`combine_numbers`].
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.contains(&SymExpr::zoo()) {
            return None;
        }
        factors.iter()
            .find(|factor| factor.is_zero())
            .cloned()
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Multiplies all numeric factors into a single coefficient, dropping it if it is exactly one.
/// Numeric factors are absorbed by complex infinity.
///
/// `2*a*3 = 6*a`
/// `1*a = a`
/// `2*zoo = zoo`
pub fn combine_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (numbers, mut rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(SymExpr::is_numeric);
        if numbers.is_empty() {
            return None;
        }

        if rest.contains(&SymExpr::zoo()) {
            return Some(SymExpr::Mul(rest).downgrade());
        }

        let product = numbers.iter()
            .cloned()
            .fold(SymExpr::int(1), |acc, factor| match (acc, factor) {
                (SymExpr::Primary(lhs), SymExpr::Primary(rhs)) => lhs * rhs,
                (acc, _) => acc,
            });
        let drop_product = product.as_number().is_some() && product.is_one();
        if numbers.len() == 1 && !drop_product {
            return None;
        }

        if !drop_product {
            rest.insert(0, product);
        }
        Some(SymExpr::Mul(rest).downgrade())
    })?;

    step_collector.push(Step::CombineNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^b*a^c = a^(b+c)`
/// `a/a = 1`
/// etc.
///
/// Plain numbers are left to [`combine_numbers`], but powers with numeric bases are combined
/// (`sqrt(2)*sqrt(2) = 2`).
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut numbers = Vec::new();
        // (base, exponent), in order of first appearance
        let mut groups: Vec<(SymExpr, SymExpr)> = Vec::with_capacity(factors.len());
        for factor in factors {
            if factor.is_numeric() {
                numbers.push(factor.clone());
                continue;
            }

            let (base, exp) = match factor {
                SymExpr::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
                other => (other.clone(), SymExpr::int(1)),
            };
            match groups.iter_mut().find(|(other, _)| *other == base) {
                Some((_, sum)) => *sum = std::mem::replace(sum, SymExpr::int(0)) + exp,
                None => groups.push((base, exp)),
            }
        }

        if numbers.len() + groups.len() == factors.len() {
            return None;
        }

        let new_factors = numbers.into_iter()
            .chain(groups.into_iter().map(|(base, exp)| {
                if exp.is_one() && exp.as_number().is_some() {
                    base
                } else {
                    SymExpr::pow(base, exp)
                }
            }))
            .collect::<Vec<_>>();
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Distributes a numeric coefficient over a sum, when the product has exactly those two factors.
///
/// `2*(a+b) = 2a+2b`
/// `-(a-b) = b-a`
pub fn distribute_coefficient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (coeff, terms) = match factors {
            [coeff @ SymExpr::Primary(Primary::Number(_) | Primary::Float(_)), SymExpr::Add(terms)]
            | [SymExpr::Add(terms), coeff @ SymExpr::Primary(Primary::Number(_) | Primary::Float(_))] => (coeff, terms),
            _ => return None,
        };

        Some(SymExpr::Add(
            terms.iter()
                .map(|term| coeff.clone() * term.clone())
                .collect(),
        ))
    })?;

    step_collector.push(Step::DistributeCoefficient);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| combine_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
        .or_else(|| distribute_coefficient(expr, step_collector))
}
