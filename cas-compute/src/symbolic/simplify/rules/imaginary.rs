//! Simplification rules for powers of the imaginary unit.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};

/// `i^2 = -1`
/// `i^3 = -i`
/// `i^4 = 1`
/// `i^-1 = -i`
pub fn imaginary_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if *base != SymExpr::i() {
            return None;
        }

        let cycle = exp.as_integer()?.mod_u(4);
        Some(match cycle {
            0 => SymExpr::int(1),
            1 => SymExpr::i(),
            2 => SymExpr::int(-1),
            _ => -SymExpr::i(),
        })
    })?;

    step_collector.push(Step::ImaginaryPower);
    Some(opt)
}

/// Applies all imaginary unit rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    imaginary_power(expr, step_collector)
}
