use crate::{consts::E_NAME, symbolic::{expr::Primary, simplify::fraction::as_numer_denom, SymExpr}};
use super::{
    factors_of,
    float::display_float,
    is_half,
    order::{add_terms, mul_factors},
    precedence,
    split_sign,
    Precedence,
};

/// Displays the expression, wrapped in parentheses if it binds less tightly than `min`.
fn wrap(expr: &SymExpr, min: Precedence) -> String {
    if precedence(expr) < min {
        format!("({})", display(expr))
    } else {
        display(expr)
    }
}

fn display_add(terms: &[SymExpr]) -> String {
    let mut out = String::new();
    for (i, term) in add_terms(terms).into_iter().enumerate() {
        if i == 0 {
            out.push_str(&display(term));
        } else if term.is_negative_term() {
            out.push_str(" - ");
            out.push_str(&display(&-term.clone()));
        } else {
            out.push_str(" + ");
            out.push_str(&display(term));
        }
    }
    out
}

/// Displays the factors of a product, without any denominator.
fn display_factors(expr: &SymExpr) -> String {
    mul_factors(factors_of(expr))
        .into_iter()
        .map(|factor| wrap(factor, Precedence::Mul))
        .collect::<Vec<_>>()
        .join("*")
}

/// Displays a product, fraction, or negated expression.
fn display_product(expr: &SymExpr) -> String {
    let (negative, expr) = split_sign(expr);
    let (numer, denom) = as_numer_denom(&expr);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&display_factors(&numer));
    if !denom.is_one() {
        out.push('/');
        match denom {
            SymExpr::Mul(_) => out.push_str(&format!("({})", display_factors(&denom))),
            _ => out.push_str(&wrap(&denom, Precedence::Pow)),
        }
    }
    out
}

fn display_pow(expr: &SymExpr, base: &SymExpr, exp: &SymExpr) -> String {
    if exp.is_negative_term() {
        display_product(expr)
    } else if is_half(exp) {
        format!("sqrt({})", display(base))
    } else if base.is_symbol(E_NAME) {
        format!("exp({})", display(exp))
    } else {
        format!("{}**{}", wrap(base, Precedence::Atom), wrap(exp, Precedence::Atom))
    }
}

fn display_call(name: &str, args: &[SymExpr]) -> String {
    let args_str = args.iter().map(display).collect::<Vec<_>>().join(", ");
    match name {
        "Tuple" if args.len() == 1 => format!("({},)", args_str),
        "Tuple" => format!("({})", args_str),
        "abs" => format!("Abs({})", args_str),
        _ => format!("{}({})", name, args_str),
    }
}

/// Renders an expression as compact plain text, using `**` for powers.
///
/// ```
/// use cas_compute::{fmt::display, symbolic::{simplify, SymExpr}};
/// use cas_parser::parser::parse;
///
/// let expr = SymExpr::try_from(parse("x^3/3 - 2*x^2 + sqrt(2)").unwrap()).unwrap();
/// assert_eq!(display(&simplify(&expr)), "x**3/3 - 2*x**2 + sqrt(2)");
/// ```
pub fn display(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Primary(Primary::Number(num)) if *num.denom() == 1 => num.numer().to_string(),
        SymExpr::Primary(Primary::Float(num)) => display_float(num),
        SymExpr::Primary(Primary::Symbol(name)) => name.clone(),
        SymExpr::Primary(Primary::Call(name, args)) => display_call(name, args),
        SymExpr::Add(terms) => display_add(terms),
        SymExpr::Exp(base, exp) => display_pow(expr, base, exp),
        SymExpr::Primary(Primary::Number(_)) | SymExpr::Mul(_) => display_product(expr),
    }
}

#[cfg(test)]
mod tests {
    use cas_parser::parser::parse;
    use crate::symbolic::{derivative, integrate, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::try_from(parse(input).unwrap()).unwrap()
    }

    fn show(input: &str) -> String {
        display(&simplify(&parse_expr(input)))
    }

    #[test]
    fn numbers() {
        assert_eq!(show("2 + 2"), "4");
        assert_eq!(show("-3"), "-3");
        assert_eq!(show("3/6"), "1/2");
        assert_eq!(show("-3/2"), "-3/2");
        assert_eq!(show("2.5 * 2"), "5");
    }

    #[test]
    fn polynomials() {
        assert_eq!(show("x**2 - 4"), "x**2 - 4");
        assert_eq!(show("-4 + x^2"), "x**2 - 4");
        assert_eq!(show("2 - y"), "2 - y");
        assert_eq!(show("-x - 1"), "-x - 1");
        assert_eq!(show("x*3*x"), "3*x**2");
    }

    #[test]
    fn fractions() {
        assert_eq!(show("x**3/3"), "x**3/3");
        assert_eq!(show("1/x"), "1/x");
        assert_eq!(show("x/(2*y)"), "x/(2*y)");
        assert_eq!(show("1/(x + 1)"), "1/(x + 1)");
        assert_eq!(show("-y/2"), "-y/2");
        assert_eq!(show("3*pi/2"), "3*pi/2");
    }

    #[test]
    fn powers_and_roots() {
        assert_eq!(show("sqrt(2)"), "sqrt(2)");
        assert_eq!(show("1/sqrt(2)"), "sqrt(2)/2");
        assert_eq!(show("x**(1/3)"), "x**(1/3)");
        assert_eq!(show("(x + 1)**2"), "(x + 1)**2");
        assert_eq!(show("exp(x)"), "exp(x)");
        assert_eq!(show("x**(n + 1)"), "x**(n + 1)");
    }

    #[test]
    fn products() {
        let scaled_sum = SymExpr::Mul(vec![SymExpr::int(2), parse_expr("x + 1")]);
        assert_eq!(display(&scaled_sum), "2*(x + 1)");
        assert_eq!(show("-I"), "-I");
        assert_eq!(show("y*x"), "x*y");
        assert_eq!(show("2*sqrt(-3)"), "2*sqrt(3)*I");
    }

    #[test]
    fn calls() {
        assert_eq!(show("sin(x) + 1"), "sin(x) + 1");
        assert_eq!(show("abs(x)"), "Abs(x)");
        assert_eq!(show("x = 2"), "Eq(x, 2)");
    }

    #[test]
    fn calculus_results() {
        let x = "x";
        let cube = SymExpr::try_from(parse("x**3").unwrap()).unwrap();
        assert_eq!(display(&derivative(&cube, x)), "3*x**2");

        let square = SymExpr::try_from(parse("x**2").unwrap()).unwrap();
        assert_eq!(display(&integrate(&square, x).unwrap()), "x**3/3");
    }
}
