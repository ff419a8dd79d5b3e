//! Resolving a problem to its answer.

use cas_compute::{
    fmt::{display, latex},
    numerical::{evaluate, to_expr},
    symbolic::{doit, simplify, solve_equation, solve_for, Solutions, SymExpr},
};
use cas_error::Error;
use crate::{join_solutions, parse_problem, shape::{classify, Shape}, INTEGRATION_CONSTANT};
use tracing::debug;

/// The answer to a problem.
#[derive(Debug)]
pub enum Answer {
    /// The problem was answered.
    Solved {
        /// Compact plain text form of the answer.
        display: String,

        /// LaTeX form of the answer.
        latex: String,
    },

    /// The problem could not be parsed or answered. The error carries spans into the input.
    Failed(Error),
}

impl Answer {
    fn solved(display: String, latex: String) -> Self {
        Self::Solved { display, latex }
    }

    /// Returns the plain text form of the answer, or `Error: <message>` if it failed.
    pub fn display(&self) -> String {
        match self {
            Self::Solved { display, .. } => display.clone(),
            Self::Failed(err) => format!("Error: {}", err),
        }
    }

    /// Returns the LaTeX form of the answer, or `\text{Error: <message>}` if it failed.
    pub fn latex(&self) -> String {
        match self {
            Self::Solved { latex, .. } => latex.clone(),
            Self::Failed(err) => {
                let message = format!("Error: {}", err).replace('}', r"\}");
                format!(r"\text{{{}}}", message)
            },
        }
    }

    /// Returns true if the problem could not be answered.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

fn solve_derivative(expr: &SymExpr) -> Result<Answer, Error> {
    let result = simplify(&doit(expr)?);
    Ok(Answer::solved(display(&result), latex(&result)))
}

fn solve_integral(expr: &SymExpr) -> Result<Answer, Error> {
    let result = simplify(&doit(expr)?);
    Ok(Answer::solved(
        format!("{}{}", display(&result), INTEGRATION_CONSTANT),
        format!("{}{}", latex(&result), INTEGRATION_CONSTANT),
    ))
}

fn solve_equality(lhs: &SymExpr, rhs: &SymExpr) -> Result<Answer, Error> {
    match solve_equation(lhs, rhs)? {
        Solutions::Identity => Ok(Answer::solved("True".to_string(), r"\text{True}".to_string())),
        Solutions::Substitutions(solutions) if solutions.is_empty() => {
            Ok(Answer::solved("No solution".to_string(), r"\text{No solution}".to_string()))
        },
        Solutions::Substitutions(solutions) => {
            let (display, latex) = join_solutions(
                solutions.iter()
                    .flatten()
                    .map(|(var, value)| (var.as_str(), value)),
            );
            Ok(Answer::solved(display, latex))
        },
    }
}

fn solve_constant(expr: &SymExpr) -> Result<Answer, Error> {
    let value = to_expr(&evaluate(&simplify(expr))?);
    Ok(Answer::solved(display(&value), latex(&value)))
}

fn solve_expression(expr: &SymExpr) -> Result<Answer, Error> {
    let symbols = expr.free_symbols();
    if let Some(var) = symbols.iter().next() {
        let roots = solve_for(expr, var)?;
        if !roots.is_empty() {
            let (display, latex) = join_solutions(roots.iter().map(|root| (var.as_str(), root)));
            return Ok(Answer::solved(display, latex));
        }
        debug!(var, "no roots, showing the simplified expression");
    }

    let simplified = simplify(expr);
    Ok(Answer::solved(display(&simplified), latex(&simplified)))
}

fn resolve(input: &str) -> Result<Answer, Error> {
    let expr = parse_problem(input)?;
    let shape = classify(input, &expr);
    debug!(input, ?shape, "classified problem");

    match shape {
        Shape::Derivative => solve_derivative(&expr),
        Shape::Integral => solve_integral(&expr),
        Shape::Equality => match expr.as_call() {
            Some((_, [lhs, rhs])) => solve_equality(lhs, rhs),
            _ => solve_expression(&expr),
        },
        Shape::ConstantExpression => solve_constant(&expr),
        Shape::ExpressionWithSymbols => solve_expression(&expr),
    }
}

/// Answers a math problem.
///
/// Never panics: any parse or computation error is returned as [`Answer::Failed`], whose
/// [`display`](Answer::display) and [`latex`](Answer::latex) forms describe the error. Errors
/// raised without a location point at the whole input.
pub fn solve_math_problem(input: &str) -> Answer {
    match resolve(input) {
        Ok(answer) => answer,
        Err(err) => {
            debug!(input, error = %err, "failed to answer problem");
            Answer::Failed(err.or_span(0..input.len()))
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn pair(input: &str) -> (String, String) {
        let answer = solve_math_problem(input);
        (answer.display(), answer.latex())
    }

    #[test]
    fn constant() {
        assert_eq!(pair("2+2"), ("4".to_string(), "4".to_string()));
        assert_eq!(pair("1/4"), ("0.25".to_string(), "0.25".to_string()));
    }

    #[test]
    fn derivative() {
        assert_eq!(pair("diff(x**3, x)"), ("3*x**2".to_string(), "3 x^{2}".to_string()));
    }

    #[test]
    fn integral() {
        assert_eq!(
            pair("integrate(x**2, x)"),
            ("x**3/3 + C".to_string(), r"\frac{x^{3}}{3} + C".to_string()),
        );
    }

    #[test]
    fn expression_roots() {
        let (display, latex) = pair("x**2 - 4");
        assert_eq!(display, "x = -2, x = 2");
        assert_eq!(latex, r"x = -2\; , \; x = 2");
    }

    #[test]
    fn equation_without_solution() {
        assert_eq!(pair("x + 1 = x"), ("No solution".to_string(), r"\text{No solution}".to_string()));
    }

    #[test]
    fn identity() {
        assert_eq!(pair("x + 1 = 1 + x").0, "True");
    }

    #[test]
    fn expression_without_roots_is_simplified() {
        assert_eq!(pair("sqrt(x) + 1 + 1"), ("sqrt(x) + 2".to_string(), r"\sqrt{x} + 2".to_string()));
    }

    #[test]
    fn unsolvable_expression_is_an_error() {
        let answer = solve_math_problem("x + sin(x) + x");
        assert!(answer.is_error());
        assert!(answer.display().starts_with("Error: could not find a method to solve"));
    }

    #[test]
    fn zero_over_zero_is_undefined() {
        assert_eq!(solve_math_problem("0/0").display(), solve_math_problem("1/0").display());
        assert!(solve_math_problem("0/0").is_error());
    }

    #[test]
    fn errors_are_escaped() {
        let answer = solve_math_problem("(x + 1");
        assert!(answer.is_error());
        assert!(answer.display().starts_with("Error: "));
        assert!(answer.latex().starts_with(r"\text{Error: "));
        assert!(answer.latex().ends_with('}'));
    }
}
