use cas_tutor::{classify, present, solve_math_problem, Shape};
use pretty_assertions::assert_eq;

fn pair(input: &str) -> (String, String) {
    let answer = solve_math_problem(input);
    (answer.display(), answer.latex())
}

#[test]
fn two_plus_two() {
    assert_eq!(pair("2+2"), ("4".to_string(), "4".to_string()));
}

#[test]
fn derivative_of_cube() {
    assert_eq!(pair("diff(x**3, x)"), ("3*x**2".to_string(), "3 x^{2}".to_string()));
}

#[test]
fn integral_of_square() {
    let (display, latex) = pair("integrate(x**2, x)");
    assert_eq!(display, "x**3/3 + C");
    assert_eq!(latex, r"\frac{x^{3}}{3} + C");
}

#[test]
fn integrals_always_end_with_constant() {
    for input in ["integrate(sin(x), x)", "integrate(x, (x, 0, 2))", "integrate(sin(x)/x, x)"] {
        let (display, latex) = pair(input);
        assert!(display.ends_with(" + C"), "{}: {}", input, display);
        assert!(latex.ends_with(" + C"), "{}: {}", input, latex);
    }
}

#[test]
fn unevaluated_integral_is_shown() {
    assert_eq!(pair("integrate(sin(x)/x, x)").0, "Integral(sin(x)/x, x) + C");
}

#[test]
fn roots_of_expression() {
    let (display, latex) = pair("x**2 - 4");
    assert_eq!(display, "x = -2, x = 2");
    assert!(!latex.is_empty());
}

#[test]
fn complex_roots() {
    assert_eq!(pair("x**2 + 1").0, "x = -I, x = I");
}

#[test]
fn first_variable_is_lexicographic() {
    assert_eq!(pair("y + 2*b").0, "b = -y/2");
}

#[test]
fn equations() {
    assert_eq!(pair("2*x + 3 = 7"), ("x = 2".to_string(), "x = 2".to_string()));
    assert_eq!(pair("x**2 = 2").0, "x = -sqrt(2), x = sqrt(2)");
    assert_eq!(pair("exp(x) = 1").0, "x = 0");
}

#[test]
fn equation_without_solution() {
    assert_eq!(pair("x + 1 = x + 2"), ("No solution".to_string(), r"\text{No solution}".to_string()));
}

#[test]
fn diff_substring_routes_to_derivative() {
    let input = "mydiff(x)";
    let answer = solve_math_problem(input);
    assert_eq!(answer.display(), "mydiff(x)");
}

#[test]
fn malformed_input() {
    let (display, latex) = pair("(x + 1");
    assert!(display.starts_with("Error:"));
    assert!(latex.starts_with(r"\text{Error:"));
}

#[test]
fn evaluation_errors() {
    let (display, _) = pair("sine(1)");
    assert_eq!(display, "Error: unknown function `sine`");
}

#[test]
fn display_is_never_empty() {
    for input in ["2+2", "x", "pi", "sin(x)", "x**2 - 4", "diff(x, x)", "x = 1", "1/0", "Eq(x, x)"] {
        let presentation = present(input);
        assert!(!presentation.display.is_empty(), "{}", input);
        assert!(!presentation.explanation.is_empty(), "{}", input);
    }
}

#[test]
fn classifier_is_shared() {
    let expr = cas_compute::symbolic::SymExpr::symbol("x");
    assert_eq!(classify("diff(", &expr), Shape::Derivative);
    assert_eq!(classify("x", &expr), Shape::ExpressionWithSymbols);
}

#[test]
fn extraneous_roots_fall_back_to_expression() {
    assert_eq!(pair("sqrt(x) + 1"), ("sqrt(x) + 1".to_string(), r"\sqrt{x} + 1".to_string()));
    assert_eq!(pair("x**(1/2) + 3").0, "sqrt(x) + 3");
}

#[test]
fn rational_roots_survive_unsolved_factors() {
    assert!(pair("x**6 - 64").0.starts_with("x = -2, x = 2, "));
    assert!(pair("x**1000 - 1").0.starts_with("x = -1, x = 1"));
}

#[test]
fn unsolvable_expression_reports_error() {
    let (display, _) = pair("x + sin(x)");
    assert!(display.starts_with("Error: could not find a method to solve"), "{}", display);
}

#[test]
fn zero_over_zero() {
    assert_eq!(pair("0/0").0, "Error: the expression is undefined");
}

#[test]
fn exponential_with_negative_value() {
    let (display, _) = pair("exp(x) + 1");
    assert!(display == "x = I*pi" || display == "x = pi*I", "{}", display);
}

#[test]
fn infinity_is_an_error() {
    assert!(pair("oo").0.starts_with("Error: infinity"));
}
