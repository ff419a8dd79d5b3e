//! Markdown walkthroughs of how a problem was answered.
//!
//! The walkthrough is computed from scratch, independently of the answer: the problem is parsed
//! and classified again. Each walkthrough starts with a short answer, followed by bullet points
//! interleaved with `$$ ... $$` LaTeX blocks.

use cas_compute::{
    fmt::{display, latex},
    numerical::{evaluate, to_expr},
    symbolic::{
        doit,
        factor,
        simplify,
        simplify::step::Step,
        simplify_with_steps,
        solve_equation,
        solve_for,
        Solutions,
        SymExpr,
    },
};
use cas_error::Error;
use crate::{parse_problem, shape::{classify, Shape}, INTEGRATION_CONSTANT};
use tracing::debug;

const INTRO: &str = "**Here's what I found. Short answer first, then a quick walkthrough:**";

/// Wraps LaTeX in a display math block.
fn latex_block(expr: &SymExpr) -> String {
    format!("$$ {} $$", latex(expr))
}

/// Collects the lines of a walkthrough.
#[derive(Debug, Default)]
struct Walkthrough {
    parts: Vec<String>,
}

impl Walkthrough {
    fn new(short_answer: &str) -> Self {
        let mut walkthrough = Self::default();
        walkthrough.push(INTRO);
        walkthrough.push(format!("**Short answer:** {}", short_answer));
        walkthrough.push("");
        walkthrough.push("**Walkthrough:**");
        walkthrough
    }

    fn push(&mut self, line: impl Into<String>) {
        self.parts.push(line.into());
    }

    fn block(&mut self, expr: &SymExpr) {
        self.parts.push(latex_block(expr));
    }

    fn finish(self) -> String {
        self.parts.join("\n\n")
    }
}

/// Lists the simplification rules that were applied, in the order they were first used.
fn describe_steps(steps: &[Step]) -> Option<String> {
    let mut descriptions: Vec<&str> = Vec::new();
    for step in steps {
        let description = step.description();
        if !descriptions.contains(&description) {
            descriptions.push(description);
        }
    }
    (!descriptions.is_empty()).then(|| format!("- Rules applied: {}.", descriptions.join(", ")))
}

fn explain_constant(input: &str, expr: &SymExpr) -> Result<String, Error> {
    let (simplified, steps) = simplify_with_steps(expr);
    let value = to_expr(&evaluate(&simplified)?);
    let mut walkthrough = Walkthrough::new(&display(&value));
    walkthrough.push(format!("- I simplified the expression `{}` and evaluated it.", input));
    if let Some(rules) = describe_steps(&steps) {
        walkthrough.push(rules);
    }
    walkthrough.block(&value);
    Ok(walkthrough.finish())
}

fn explain_derivative(input: &str, expr: &SymExpr) -> Result<String, Error> {
    let result = simplify(&doit(expr)?);
    let mut walkthrough = Walkthrough::new(&display(&result));
    walkthrough.push(format!("- You asked for the derivative of `{}`.", input));
    walkthrough.push("- I applied the derivative rules and simplified the result:");
    walkthrough.block(&result);
    Ok(walkthrough.finish())
}

fn explain_integral(input: &str, expr: &SymExpr) -> Result<String, Error> {
    let result = simplify(&doit(expr)?);
    let mut walkthrough = Walkthrough::new(&format!("{}{}", display(&result), INTEGRATION_CONSTANT));
    walkthrough.push(format!("- You requested an integral for `{}`.", input));
    walkthrough.push("- I computed the antiderivative:");
    walkthrough.block(&result);
    walkthrough.push("- (Remember to add the constant of integration: `+ C`)");
    Ok(walkthrough.finish())
}

fn explain_equality(lhs: &SymExpr, rhs: &SymExpr) -> Result<String, Error> {
    let mut walkthrough = Walkthrough::new("I solved the equation and listed the solution(s) below.");
    let canonical = simplify(&(lhs.clone() - rhs.clone()));
    walkthrough.push("- I rewrote the equation in canonical form (left - right = 0):");
    walkthrough.block(&SymExpr::eq(canonical, SymExpr::int(0)));

    match solve_equation(lhs, rhs)? {
        Solutions::Identity => {
            walkthrough.push("- Both sides are always equal, so every value is a solution.");
        },
        Solutions::Substitutions(solutions) if solutions.is_empty() => {
            walkthrough.push("- I couldn't find a solution.");
        },
        Solutions::Substitutions(solutions) => {
            for (var, value) in solutions.iter().flatten() {
                walkthrough.push(format!("- Solution: {} =", var));
                walkthrough.block(&SymExpr::eq(SymExpr::symbol(var.as_str()), value.clone()));
            }
        },
    }
    Ok(walkthrough.finish())
}

fn explain_expression(expr: &SymExpr) -> Result<String, Error> {
    let mut walkthrough = Walkthrough::new(
        "I treated this as an equation `... = 0` and tried to solve for the main variable.",
    );
    let symbols = expr.free_symbols();
    let Some(var) = symbols.iter().next() else {
        return Ok(walkthrough.finish());
    };
    walkthrough.push(format!("- Primary variable chosen: `{}`", var));

    match factor(expr) {
        Some(factored) if display(&factored) != display(expr) => {
            walkthrough.push("- I checked for factorization and found:");
            walkthrough.block(&factored);
        },
        _ => debug!(var, "no factorization to show"),
    }

    walkthrough.push("- I solved the equation:");
    walkthrough.block(&SymExpr::eq(expr.clone(), SymExpr::int(0)));

    let roots = solve_for(expr, var)?;
    if roots.is_empty() {
        walkthrough.push("- I couldn't find algebraic roots; here is the simplified expression:");
        walkthrough.block(&simplify(expr));
    } else {
        for root in roots {
            walkthrough.push("- Solution:");
            walkthrough.block(&SymExpr::eq(SymExpr::symbol(var.as_str()), root));
        }
    }
    Ok(walkthrough.finish())
}

fn explain(input: &str) -> Result<String, Error> {
    let expr = parse_problem(input)?;
    match classify(input, &expr) {
        Shape::Derivative => explain_derivative(input, &expr),
        Shape::Integral => explain_integral(input, &expr),
        Shape::Equality => match expr.as_call() {
            Some((_, [lhs, rhs])) => explain_equality(lhs, rhs),
            _ => explain_expression(&expr),
        },
        Shape::ConstantExpression => explain_constant(input, &expr),
        Shape::ExpressionWithSymbols => explain_expression(&expr),
    }
}

/// Writes a Markdown walkthrough of how a problem is answered.
///
/// If the problem cannot be parsed or answered, the walkthrough is an apology followed by the
/// error message.
pub fn generate_explanation(input: &str) -> String {
    explain(input).unwrap_or_else(|err| {
        format!("**Sorry, I couldn't generate a walkthrough.**\n\nError: {}", err)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn constant() {
        assert_eq!(generate_explanation("2+2"), [
            INTRO,
            "**Short answer:** 4",
            "",
            "**Walkthrough:**",
            "- I simplified the expression `2+2` and evaluated it.",
            "- Rules applied: combine like terms.",
            "$$ 4 $$",
        ].join("\n\n"));
    }

    #[test]
    fn derivative() {
        let explanation = generate_explanation("diff(x**3, x)");
        assert!(explanation.contains("**Short answer:** 3*x**2"));
        assert!(explanation.contains("- You asked for the derivative of `diff(x**3, x)`."));
        assert!(explanation.ends_with("$$ 3 x^{2} $$"));
    }

    #[test]
    fn integral() {
        let explanation = generate_explanation("integrate(x**2, x)");
        assert!(explanation.contains("**Short answer:** x**3/3 + C"));
        assert!(explanation.contains(r"$$ \frac{x^{3}}{3} $$"));
        assert!(explanation.ends_with("- (Remember to add the constant of integration: `+ C`)"));
    }

    #[test]
    fn equation() {
        let explanation = generate_explanation("2*x + 3 = 7");
        assert!(explanation.contains("$$ 2 x - 4 = 0 $$"));
        assert!(explanation.contains("- Solution: x =\n\n$$ x = 2 $$"));
    }

    #[test]
    fn equation_without_solution() {
        let explanation = generate_explanation("x = x + 1");
        assert!(explanation.ends_with("- I couldn't find a solution."));
    }

    #[test]
    fn expression_with_factorization() {
        let explanation = generate_explanation("x**2 - 4");
        assert!(explanation.contains("- Primary variable chosen: `x`"));
        assert!(explanation.contains(r"- I checked for factorization and found:"));
        assert!(explanation.contains(r"$$ \left(x - 2\right) \left(x + 2\right) $$"));
        assert!(explanation.contains("$$ x^{2} - 4 = 0 $$"));
        assert!(explanation.contains("$$ x = -2 $$"));
        assert!(explanation.contains("$$ x = 2 $$"));
    }

    #[test]
    fn expression_without_roots() {
        let explanation = generate_explanation("sqrt(x) + 1");
        assert!(!explanation.contains("factorization"));
        assert!(explanation.contains("- I couldn't find algebraic roots; here is the simplified expression:"));
        assert!(explanation.ends_with(r"$$ \sqrt{x} + 1 $$"));
    }

    #[test]
    fn unsolvable_expression() {
        let explanation = generate_explanation("x + sin(x)");
        assert!(explanation.starts_with("**Sorry, I couldn't generate a walkthrough.**\n\nError: could not find a method"));
    }

    #[test]
    fn steps_of_a_constant() {
        assert_eq!(describe_steps(&[]), None);
        assert_eq!(
            describe_steps(&[Step::CombineLikeTerms, Step::EvaluatePower, Step::CombineLikeTerms]),
            Some("- Rules applied: combine like terms, evaluate powers.".to_string()),
        );
    }

    #[test]
    fn parse_error() {
        let explanation = generate_explanation("(x + 1");
        assert!(explanation.starts_with("**Sorry, I couldn't generate a walkthrough.**\n\nError: "));
    }
}
