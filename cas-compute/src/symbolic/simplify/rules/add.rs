//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// `a+(b+c) = a+b+c`
///
/// A sum with a single term is replaced by the term.
pub fn flatten(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if terms.len() <= 1 {
            return Some(SymExpr::Add(terms.to_vec()).downgrade());
        }
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let flat = terms.iter()
            .flat_map(|term| match term {
                SymExpr::Add(inner) => inner.clone(),
                other => vec![other.clone()],
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(flat).downgrade())
    })?;

    step_collector.push(Step::FlattenAdd);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| term.as_number().map_or(true, |n| n.cmp0().is_ne()))
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `a+zoo = zoo`
pub fn add_infinity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        terms.iter()
            .any(|term| *term == SymExpr::zoo())
            .then(SymExpr::zoo)
    })?;

    step_collector.push(Step::AddInfinity);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// `2+3 = 5`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        // (coefficient, remaining factors), in order of first appearance
        let mut groups: Vec<(SymExpr, SymExpr)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coeff, rest) = term.coeff_and_rest();
            match groups.iter_mut().find(|(_, other)| *other == rest) {
                Some((sum, _)) => *sum = std::mem::replace(sum, SymExpr::int(0)) + coeff,
                None => groups.push((coeff, rest)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter(|(coeff, _)| !coeff.is_zero())
            .map(|(coeff, rest)| {
                if rest.is_one() {
                    coeff
                } else if coeff.is_one() && coeff.as_number().is_some() {
                    rest
                } else {
                    coeff * rest
                }
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| add_infinity(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}
