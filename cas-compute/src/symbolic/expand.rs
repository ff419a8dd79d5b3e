//! Expansion of products and powers of sums.

use super::{expr::SymExpr, simplify::simplify};

/// Powers of sums with exponents larger than this are left alone.
const MAX_EXPANDED_POWER: u32 = 32;

/// Multiplies out a list of factors, distributing over every sum among them.
fn distribute(factors: Vec<SymExpr>) -> SymExpr {
    let mut terms = vec![SymExpr::int(1)];
    for factor in factors {
        let factor_terms = match factor {
            SymExpr::Add(inner) => inner,
            other => vec![other],
        };
        terms = terms.iter()
            .flat_map(|term| {
                factor_terms.iter()
                    .map(move |factor_term| simplify(&(term.clone() * factor_term.clone())))
            })
            .collect();
    }
    SymExpr::Add(terms).downgrade()
}

/// Expands the children of a node, then the node itself.
fn expand_node(expr: &SymExpr) -> SymExpr {
    match expr.map_children(expand_node) {
        SymExpr::Mul(factors) => distribute(factors),
        SymExpr::Exp(base, exp) => {
            let power = exp.as_integer()
                .and_then(|n| n.to_u32())
                .filter(|n| (2..=MAX_EXPANDED_POWER).contains(n));
            match (*base, power) {
                (SymExpr::Add(terms), Some(n)) => {
                    distribute(vec![SymExpr::Add(terms); n as usize])
                },
                (base, _) => SymExpr::Exp(Box::new(base), exp),
            }
        },
        other => other,
    }
}

/// Expands an expression by distributing products over sums and expanding positive integer powers
/// of sums. The result is simplified.
///
/// `(x + 1)^2 = x^2 + 2x + 1`
/// `x*(y + 2) = x*y + 2x`
pub fn expand(expr: &SymExpr) -> SymExpr {
    simplify(&expand_node(&simplify(expr)))
}
