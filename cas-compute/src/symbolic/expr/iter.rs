use super::{Primary, SymExpr};

/// An iterator that traverses the tree of expressions in left-to-right post-order (i.e.
/// depth-first), visiting the arguments of function calls before the call itself.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Expressions left to visit, paired with whether their children are already on the stack.
    stack: Vec<(&'a SymExpr, bool)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator starting at the given root.
    pub fn new(expr: &'a SymExpr) -> Self {
        Self { stack: vec![(expr, false)] }
    }
}

/// Returns the direct children of an expression.
fn children(expr: &SymExpr) -> &[SymExpr] {
    match expr {
        SymExpr::Primary(Primary::Call(_, args)) => args,
        SymExpr::Primary(_) => &[],
        SymExpr::Add(exprs) | SymExpr::Mul(exprs) => exprs,
        SymExpr::Exp(..) => &[],
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            if expanded {
                return Some(expr);
            }

            self.stack.push((expr, true));
            if let SymExpr::Exp(base, exp) = expr {
                self.stack.push((exp, false));
                self.stack.push((base, false));
            } else {
                self.stack.extend(children(expr).iter().rev().map(|child| (child, false)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn visits_children_first() {
        // x^2 + f(y)
        let expr = SymExpr::Add(vec![
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::int(2)),
            SymExpr::call("f", vec![SymExpr::symbol("y")]),
        ]);
        let order = expr.post_order_iter()
            .map(|expr| match expr {
                SymExpr::Primary(Primary::Symbol(name)) => name.clone(),
                SymExpr::Primary(Primary::Number(n)) => n.to_string(),
                SymExpr::Primary(Primary::Call(name, _)) => format!("{}()", name),
                SymExpr::Primary(Primary::Float(_)) => "float".to_string(),
                SymExpr::Add(_) => "+".to_string(),
                SymExpr::Mul(_) => "*".to_string(),
                SymExpr::Exp(..) => "^".to_string(),
            })
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["x", "2", "^", "y", "f()", "+"]);
    }
}
