//! The answer as shown to a user, with a fallback for empty or unusable answers.
//!
//! [`present`] treats the answer from [`solve_math_problem`] as untrusted. If either of its
//! strings is empty or looks empty (such as `[]` or `None`), a second answer is computed by an
//! independent, simpler dispatch ([`local_fallback`]), and replaces the first one if it is
//! usable.

use cas_compute::{
    fmt::{display, latex},
    numerical::{evaluate, to_expr},
    symbolic::{
        doit,
        doit::{is_derivative_call, is_integral_call},
        simplify,
        solve_for,
    },
};
use cas_error::Error;
use crate::{
    answer::{solve_math_problem, Answer},
    explain::generate_explanation,
    join_solutions,
    parse_problem,
    INTEGRATION_CONSTANT,
};
use tracing::{debug, warn};

/// Strings that are treated as an empty answer.
const EMPTY_LOOKING: [&str; 5] = ["[]", "()", "Tuple()", "None", "NoneType"];

/// An answer of unknown quality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAnswer {
    /// A plain text form and a LaTeX form.
    Pair(String, String),

    /// Only a plain text form.
    Single(String),

    /// No answer at all.
    Nothing,
}

impl From<Answer> for RawAnswer {
    fn from(answer: Answer) -> Self {
        Self::Pair(answer.display(), answer.latex())
    }
}

/// The answer to a problem, ready to be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Plain text form of the answer.
    pub display: String,

    /// LaTeX form of the answer. May be empty.
    pub latex: String,

    /// Markdown walkthrough of the solution.
    pub explanation: String,
}

impl Presentation {
    /// Returns true if the answer describes an error.
    pub fn is_error(&self) -> bool {
        is_error_display(&self.display)
    }
}

/// Returns true if the string is blank or one of the [`EMPTY_LOOKING`] strings.
pub fn is_empty_looking(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || EMPTY_LOOKING.contains(&trimmed)
}

/// Returns true if a displayed answer describes an error, i.e. it starts with `error` in any
/// case.
pub fn is_error_display(display: &str) -> bool {
    display.get(..5).is_some_and(|prefix| prefix.eq_ignore_ascii_case("error"))
}

fn fallback_answer(input: &str) -> Result<(String, String), Error> {
    let expr = parse_problem(input)?;
    let top_call = expr.as_call().map(|(name, _)| name);

    if top_call.is_some_and(is_derivative_call) || input.contains("diff(") {
        let result = doit(&expr)?;
        return Ok((display(&result), latex(&result)));
    }

    if top_call.is_some_and(is_integral_call) || input.contains("integrate(") {
        let result = doit(&expr)?;
        return Ok((
            format!("{}{}", display(&result), INTEGRATION_CONSTANT),
            format!("{}{}", latex(&result), INTEGRATION_CONSTANT),
        ));
    }

    let symbols = expr.free_symbols();
    let Some(var) = symbols.iter().next() else {
        let value = to_expr(&evaluate(&simplify(&expr))?);
        return Ok((display(&value), latex(&value)));
    };

    let roots = solve_for(&expr, var)?;
    if !roots.is_empty() {
        return Ok(join_solutions(roots.iter().map(|root| (var.as_str(), root))));
    }

    let simplified = simplify(&expr);
    Ok((display(&simplified), latex(&simplified)))
}

/// Answers a problem with a simple dispatch of its own: derivatives and integrals are evaluated,
/// constants are evaluated numerically, and anything else is solved for its first unknown, or
/// simplified if it has no roots.
pub fn local_fallback(input: &str) -> (String, String) {
    fallback_answer(input).unwrap_or_else(|err| {
        debug!(input, error = %err, "fallback failed");
        (format!("Error during fallback: {}", err), r"\text{Error during fallback}".to_string())
    })
}

/// Turns an untrusted answer into a `(display, latex)` pair, computing the [`local_fallback`]
/// when the answer is missing or looks empty.
pub fn normalize(raw: RawAnswer, input: &str) -> (String, String) {
    let (text, latex) = match raw {
        RawAnswer::Pair(text, latex) => (text, latex),
        RawAnswer::Single(text) => (text, String::new()),
        RawAnswer::Nothing => local_fallback(input),
    };

    if is_empty_looking(&text) || is_empty_looking(&latex) {
        let (fallback_text, fallback_latex) = local_fallback(input);
        if !is_empty_looking(&fallback_text) {
            warn!(input, original = %text, replacement = %fallback_text, "replacing empty answer");
            return (fallback_text, fallback_latex);
        }
    }
    (text, latex)
}

/// Answers and explains a problem, for showing to a user.
pub fn present(input: &str) -> Presentation {
    let raw = RawAnswer::from(solve_math_problem(input));
    let (display, latex) = normalize(raw, input);
    Presentation {
        display,
        latex,
        explanation: generate_explanation(input),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn empty_looking_strings() {
        for s in ["", "   ", "[]", "()", " Tuple() ", "None", "NoneType"] {
            assert!(is_empty_looking(s), "{:?}", s);
        }
        assert!(!is_empty_looking("0"));
        assert!(!is_empty_looking("x = 2"));
    }

    #[test]
    fn error_prefix_is_case_insensitive() {
        assert!(is_error_display("Error: unexpected end of input"));
        assert!(is_error_display("error during fallback"));
        assert!(is_error_display("ERROR"));
        assert!(!is_error_display("Err"));
        assert!(!is_error_display("x = 2"));
    }

    #[test]
    fn pair_is_kept() {
        let raw = RawAnswer::Pair("4".to_string(), "4".to_string());
        assert_eq!(normalize(raw, "2+2"), ("4".to_string(), "4".to_string()));
    }

    #[test]
    fn single_string_is_replaced_by_fallback() {
        let raw = RawAnswer::Single("4".to_string());
        assert_eq!(normalize(raw, "2+2"), ("4".to_string(), "4".to_string()));
    }

    #[test]
    fn empty_looking_pair_is_replaced() {
        let raw = RawAnswer::Pair("[]".to_string(), String::new());
        assert_eq!(
            normalize(raw, "x**2 - 1"),
            ("x = -1, x = 1".to_string(), r"x = -1\; , \; x = 1".to_string()),
        );
    }

    #[test]
    fn nothing_uses_fallback() {
        let (display, latex) = normalize(RawAnswer::Nothing, "integrate(x, x)");
        assert_eq!(display, "x**2/2 + C");
        assert_eq!(latex, r"\frac{x^{2}}{2} + C");
    }

    #[test]
    fn fallback_errors() {
        let (display, latex) = local_fallback("(x");
        assert!(display.starts_with("Error during fallback: "));
        assert_eq!(latex, r"\text{Error during fallback}");
    }

    #[test]
    fn fallback_error_replaces_single_string() {
        let raw = RawAnswer::Single("something".to_string());
        let (display, latex) = normalize(raw, "()");
        assert!(display.starts_with("Error during fallback: "));
        assert_eq!(latex, r"\text{Error during fallback}");
    }

    #[test]
    fn presentation() {
        let presentation = present("2+2");
        assert_eq!(presentation.display, "4");
        assert_eq!(presentation.latex, "4");
        assert!(presentation.explanation.contains("**Short answer:** 4"));
        assert!(!presentation.is_error());
    }
}
