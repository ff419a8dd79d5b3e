//! Simplification of algebraic expressions.
//!
//! Simplification works bottom-up: the children of a node are simplified first, then every rule
//! in [`rules`] is tried on the node itself. When a rule applies, the rewritten node is
//! simplified again, until no rule applies anymore.
//!
//! Each rule only reports a change when the rewritten expression is different from its input,
//! so the process always reaches a fixed point for well-behaved rules. As a safety net, the
//! number of rewrites per call is capped.

pub mod fraction;
pub mod rules;
pub mod step;

use super::{expr::SymExpr, step_collector::StepCollector};
use step::Step;
use tracing::warn;

/// The maximum number of rule applications in a single call to [`simplify`].
const MAX_REWRITES: usize = 10_000;

/// Simplifies the given node, assuming nothing about its children.
fn simplify_node(
    expr: &SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
    budget: &mut usize,
) -> SymExpr {
    let mut current = expr.map_children(|child| simplify_node(child, &mut *step_collector, &mut *budget));

    while let Some(next) = rules::all(&current, &mut *step_collector) {
        if *budget == 0 {
            warn!(expr = ?expr, "simplification did not converge, returning partial result");
            return next;
        }
        *budget -= 1;

        // rules can create unsimplified children, such as `a^c*b^c` from `(ab)^c`
        current = next.map_children(|child| simplify_node(child, &mut *step_collector, &mut *budget));
    }

    current
}

/// Simplifies the given expression, collecting the steps taken into the given collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut budget = MAX_REWRITES;
    simplify_node(expr, step_collector, &mut budget)
}

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies the given expression, returning the steps taken alongside the result.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, &mut steps);
    (simplified, steps)
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::try_from(parse(input).unwrap()).unwrap()
    }

    fn simplified(input: &str) -> SymExpr {
        simplify(&parse_expr(input))
    }

    #[test]
    fn combine_numbers() {
        assert_eq!(simplified("2 + 2"), SymExpr::int(4));
        assert_eq!(simplified("1/3 + 1/6"), SymExpr::rational((1, 2)));
        assert_eq!(simplified("2*3*4 - 4"), SymExpr::int(20));
        assert_eq!(simplified("2**10"), SymExpr::int(1024));
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplified("x + x + x"), parse_expr("3*x"));
        assert_eq!(simplified("2*x + 3*y - x - 3*y"), parse_expr("x"));
        assert_eq!(simplified("x - x"), SymExpr::int(0));
    }

    #[test]
    fn combine_like_factors() {
        assert_eq!(simplified("x*x**2"), parse_expr("x**3"));
        assert_eq!(simplified("x*y/x"), parse_expr("y"));
        assert_eq!(simplified("3*x**2/x"), parse_expr("3*x"));
    }

    #[test]
    fn multiply_zero_and_one() {
        assert_eq!(simplified("0*x + 1*y"), parse_expr("y"));
        assert_eq!(simplified("x**0"), SymExpr::int(1));
        assert_eq!(simplified("x**1"), parse_expr("x"));
        assert_eq!(simplified("1**x"), SymExpr::int(1));
    }

    #[test]
    fn distribute_coefficient() {
        assert_eq!(simplified("2*(x + 1)"), parse_expr("2*x + 2"));
        assert_eq!(simplified("-(x - 3)"), parse_expr("3 - x"));
    }

    #[test]
    fn roots() {
        assert_eq!(simplified("sqrt(4)"), SymExpr::int(2));
        assert_eq!(simplified("sqrt(12)"), SymExpr::Mul(vec![
            SymExpr::int(2),
            SymExpr::int(3).sqrt(),
        ]));
        assert_eq!(simplified("8**(2/3)"), SymExpr::int(4));
        assert_eq!(simplified("sqrt(2)*sqrt(2)"), SymExpr::int(2));
        assert_eq!(simplified("1/sqrt(2)"), SymExpr::Mul(vec![
            SymExpr::rational((1, 2)),
            SymExpr::int(2).sqrt(),
        ]));
        assert_eq!(simplified("sqrt(-4)"), parse_expr("2*I"));
    }

    #[test]
    fn imaginary_unit() {
        assert_eq!(simplified("I*I"), SymExpr::int(-1));
        assert_eq!(simplified("I**3"), parse_expr("-I"));
        assert_eq!(simplified("I**4"), SymExpr::int(1));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(simplified("1/0"), SymExpr::zoo());
        assert_eq!(simplified("0/0"), SymExpr::zoo());
        assert_eq!(simplified("0*(1/0) + 2"), SymExpr::zoo());
    }

    #[test]
    fn special_values() {
        assert_eq!(simplified("sin(0)"), SymExpr::int(0));
        assert_eq!(simplified("cos(pi)"), SymExpr::int(-1));
        assert_eq!(simplified("sin(pi/6)"), SymExpr::rational((1, 2)));
        assert_eq!(simplified("cos(pi/4)"), SymExpr::Mul(vec![
            SymExpr::rational((1, 2)),
            SymExpr::int(2).sqrt(),
        ]));
        assert_eq!(simplified("tan(pi/4)"), SymExpr::int(1));
        assert_eq!(simplified("log(1)"), SymExpr::int(0));
        assert_eq!(simplified("exp(log(x))"), parse_expr("x"));
        assert_eq!(simplified("asin(1)"), parse_expr("pi/2"));
        assert_eq!(simplified("log(-1)"), parse_expr("I*pi"));
        assert_eq!(simplified("log(-2)"), simplified("log(2) + I*pi"));
    }

    #[test]
    fn symmetry() {
        assert_eq!(simplified("sin(-x)"), parse_expr("-sin(x)"));
        assert_eq!(simplified("cos(-x)"), parse_expr("cos(x)"));
    }

    #[test]
    fn floats_contaminate() {
        let expr = simplified("0.5 + 1/2");
        assert_eq!(expr, SymExpr::float(crate::primitive::float(1)));
    }

    #[test]
    fn steps_are_collected() {
        let (expr, steps) = simplify_with_steps(&parse_expr("x + 0"));
        assert_eq!(expr, parse_expr("x"));
        assert_eq!(steps, vec![Step::AddZero]);
    }
}
