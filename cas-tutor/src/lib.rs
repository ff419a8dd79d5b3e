//! Answers math problems entered as plain text, and explains how the answer was found.
//!
//! A problem such as `diff(x**3, x)`, `integrate(x**2, x)`, `x^2 - 4 = 0` or `2+2` is parsed,
//! [classified](shape::classify) by its [`Shape`], and handed to the matching operation of
//! `cas-compute`. The answer is always a pair of strings: a compact plain text form and a LaTeX
//! form.
//!
//! ```
//! use cas_tutor::solve_math_problem;
//!
//! let answer = solve_math_problem("diff(x**3, x)");
//! assert_eq!(answer.display(), "3*x**2");
//! assert_eq!(answer.latex(), "3 x^{2}");
//! ```
//!
//! [`present`] additionally runs the answer through a [fallback chain](fallback) and attaches a
//! Markdown walkthrough from [`generate_explanation`].

pub mod answer;
pub mod explain;
pub mod fallback;
pub mod shape;

use cas_compute::{
    fmt::{display, latex},
    symbolic::SymExpr,
};
use cas_error::Error;
use cas_parser::parser::parse;

pub use answer::{solve_math_problem, Answer};
pub use explain::generate_explanation;
pub use fallback::{present, Presentation, RawAnswer};
pub use shape::{classify, Shape};

/// The suffix appended to every antiderivative.
pub const INTEGRATION_CONSTANT: &str = " + C";

/// Separates solutions in LaTeX output.
const LATEX_SEPARATOR: &str = r"\; , \; ";

/// Parses a problem and converts it to its symbolic form.
pub(crate) fn parse_problem(input: &str) -> Result<SymExpr, Error> {
    let ast = parse(input)?;
    SymExpr::try_from(ast)
}

/// Renders `var = value` for each root, as plain text joined with `, ` and as LaTeX joined with
/// a spaced comma.
pub(crate) fn join_solutions<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a SymExpr)>) -> (String, String) {
    let (displays, latexes): (Vec<_>, Vec<_>) = pairs.into_iter()
        .map(|(var, value)| {
            let equation = SymExpr::eq(SymExpr::symbol(var), value.clone());
            (format!("{} = {}", var, display(value)), latex(&equation))
        })
        .unzip();
    (displays.join(", "), latexes.join(LATEX_SEPARATOR))
}
