use crate::{
    consts::{E_NAME, GREEK, I_NAME, PI_NAME, ZOO_NAME},
    symbolic::{expr::Primary, simplify::fraction::as_numer_denom, SymExpr},
};
use super::{
    factors_of,
    float::latex_float,
    is_half,
    order::{add_terms, mul_factors},
    precedence,
    split_sign,
    Precedence,
};

/// Functions that LaTeX has a command for.
const COMMANDS: [&str; 12] = [
    "sin", "cos", "tan", "cot", "sec", "csc", "sinh", "cosh", "tanh", "coth", "log", "exp",
];

/// Renders the argument list of a function call.
fn call_args(args: &[SymExpr]) -> String {
    let args = args.iter().map(latex).collect::<Vec<_>>().join(", ");
    format!(r"{{\left({} \right)}}", args)
}

/// Renders a function name, optionally raised to a power, like `\sin^{2}`.
fn function_name(name: &str, power: Option<&SymExpr>) -> String {
    let name = if COMMANDS.contains(&name) {
        format!(r"\{}", name)
    } else if name.chars().count() == 1 {
        name.to_string()
    } else {
        format!(r"\operatorname{{{}}}", name)
    };
    match power {
        Some(power) => format!("{}^{{{}}}", name, latex(power)),
        None => name,
    }
}

/// Renders a symbol name. Greek letter names become the letter, and a trailing number or a part
/// after an underscore becomes a subscript, so `x1` renders as `x_{1}`.
fn latex_symbol(name: &str) -> String {
    match name {
        PI_NAME => return r"\pi".to_string(),
        E_NAME => return "e".to_string(),
        I_NAME => return "i".to_string(),
        ZOO_NAME => return r"\tilde{\infty}".to_string(),
        _ => (),
    }

    let (base, sub) = match name.split_once('_') {
        Some((base, sub)) if !base.is_empty() && !sub.is_empty() => (base, Some(sub)),
        _ => {
            let split = name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
            if split > 0 && split < name.len() {
                (&name[..split], Some(&name[split..]))
            } else {
                (name, None)
            }
        },
    };

    let base = GREEK.get(base).map(|letter| letter.to_string()).unwrap_or_else(|| base.to_string());
    match sub {
        Some(sub) => format!("{}_{{{}}}", base, latex_symbol(sub)),
        None => base,
    }
}

/// Renders the expression, wrapped in `\left( \right)` if it binds less tightly than `min`.
fn wrap(expr: &SymExpr, min: Precedence) -> String {
    if precedence(expr) < min {
        format!(r"\left({}\right)", latex(expr))
    } else {
        latex(expr)
    }
}

fn latex_add(terms: &[SymExpr]) -> String {
    let mut out = String::new();
    for (i, term) in add_terms(terms).into_iter().enumerate() {
        if i == 0 {
            out.push_str(&latex(term));
        } else if term.is_negative_term() {
            out.push_str(" - ");
            out.push_str(&latex(&-term.clone()));
        } else {
            out.push_str(" + ");
            out.push_str(&latex(term));
        }
    }
    out
}

/// Renders the factors of a product. Factors are separated by a space, or by `\cdot` when a
/// factor starts with a digit.
fn latex_factors(expr: &SymExpr) -> String {
    let mut out = String::new();
    for (i, factor) in mul_factors(factors_of(expr)).into_iter().enumerate() {
        let rendered = wrap(factor, Precedence::Mul);
        if i > 0 {
            if rendered.starts_with(|c: char| c.is_ascii_digit()) {
                out.push_str(r" \cdot ");
            } else {
                out.push(' ');
            }
        }
        out.push_str(&rendered);
    }
    out
}

/// Renders a product, fraction, or negated expression.
fn latex_product(expr: &SymExpr) -> String {
    let (negative, expr) = split_sign(expr);
    let (numer, denom) = as_numer_denom(&expr);

    let body = if denom.is_one() {
        latex_factors(&numer)
    } else {
        format!(r"\frac{{{}}}{{{}}}", latex_part(&numer), latex_part(&denom))
    };

    if negative {
        format!("- {}", body)
    } else {
        body
    }
}

/// Renders the numerator or denominator of a fraction.
fn latex_part(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Mul(_) => latex_factors(expr),
        other => latex(other),
    }
}

fn latex_pow(expr: &SymExpr, base: &SymExpr, exp: &SymExpr) -> String {
    if exp.is_negative_term() {
        return latex_product(expr);
    }
    if is_half(exp) {
        return format!(r"\sqrt{{{}}}", latex(base));
    }
    if let Some(num) = exp.as_number() {
        if *num.numer() == 1 && *num.denom() != 1 {
            return format!(r"\sqrt[{}]{{{}}}", num.denom(), latex(base));
        }
    }
    if base.is_symbol(E_NAME) {
        return format!("e^{{{}}}", latex(exp));
    }
    if let Some((name, args)) = base.as_call() {
        if COMMANDS.contains(&name) && name != "exp" {
            return format!("{}{}", function_name(name, Some(exp)), call_args(args));
        }
    }
    format!("{}^{{{}}}", wrap(base, Precedence::Atom), latex(exp))
}

/// Renders `Derivative(f, x, ...)` as `\frac{d}{d x} f`.
fn latex_derivative(args: &[SymExpr]) -> String {
    let Some((f, vars)) = args.split_first() else {
        return r"\operatorname{Derivative}".to_string();
    };
    let order = vars.len().max(1);
    let vars = if vars.is_empty() {
        String::new()
    } else {
        vars.iter().map(|var| format!("d {}", latex(var))).collect::<Vec<_>>().join(" ")
    };

    let f = wrap(f, Precedence::Mul);
    if order == 1 {
        format!(r"\frac{{d}}{{{}}} {}", vars, f)
    } else {
        format!(r"\frac{{d^{{{}}}}}{{{}}} {}", order, vars, f)
    }
}

/// Renders `Integral(f, x)` or `Integral(f, (x, a, b))`.
fn latex_integral(args: &[SymExpr]) -> String {
    let Some((f, limits)) = args.split_first() else {
        return r"\int".to_string();
    };
    let f = wrap(f, Precedence::Mul);
    match limits.first().and_then(SymExpr::as_call) {
        Some(("Tuple", [var, lower, upper])) => {
            format!(r"\int\limits_{{{}}}^{{{}}} {}\, d{}", latex(lower), latex(upper), f, latex(var))
        },
        Some(("Tuple", [var])) => format!(r"\int {}\, d{}", f, latex(var)),
        _ => match limits.first() {
            Some(var) => format!(r"\int {}\, d{}", f, latex(var)),
            None => format!(r"\int {}", f),
        },
    }
}

fn latex_call(name: &str, args: &[SymExpr]) -> String {
    match (name, args) {
        ("Eq", [lhs, rhs]) => format!("{} = {}", latex(lhs), latex(rhs)),
        ("Tuple", _) => {
            let items = args.iter().map(latex).collect::<Vec<_>>().join(r", \  ");
            format!(r"\left( {}\right)", items)
        },
        ("sqrt", [arg]) => format!(r"\sqrt{{{}}}", latex(arg)),
        ("exp", [arg]) => format!("e^{{{}}}", latex(arg)),
        ("abs", [arg]) => format!(r"\left|{}\right|", latex(arg)),
        ("Derivative", _) => latex_derivative(args),
        ("Integral", _) => latex_integral(args),
        _ => format!("{}{}", function_name(name, None), call_args(args)),
    }
}

/// Renders an expression as LaTeX.
///
/// ```
/// use cas_compute::{fmt::latex, symbolic::{simplify, SymExpr}};
/// use cas_parser::parser::parse;
///
/// let expr = SymExpr::try_from(parse("x^3/3 + sin(x)").unwrap()).unwrap();
/// assert_eq!(latex(&simplify(&expr)), r"\frac{x^{3}}{3} + \sin{\left(x \right)}");
/// ```
pub fn latex(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Primary(Primary::Number(num)) if *num.denom() == 1 => num.numer().to_string(),
        SymExpr::Primary(Primary::Float(num)) => latex_float(num),
        SymExpr::Primary(Primary::Symbol(name)) => latex_symbol(name),
        SymExpr::Primary(Primary::Call(name, args)) => latex_call(name, args),
        SymExpr::Add(terms) => latex_add(terms),
        SymExpr::Exp(base, exp) => latex_pow(expr, base, exp),
        SymExpr::Primary(Primary::Number(_)) | SymExpr::Mul(_) => latex_product(expr),
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
        latex(&simplify(&parse_expr(input)))
    }

    #[test]
    fn numbers() {
        assert_eq!(show("2 + 2"), "4");
        assert_eq!(show("-2"), "-2");
        assert_eq!(show("1/2"), r"\frac{1}{2}");
        assert_eq!(show("-3/4"), r"- \frac{3}{4}");
    }

    #[test]
    fn polynomials() {
        assert_eq!(show("3*x**2"), "3 x^{2}");
        assert_eq!(show("x**2 - 4"), "x^{2} - 4");
        assert_eq!(show("x**3/3"), r"\frac{x^{3}}{3}");
        assert_eq!(show("-x"), "- x");
    }

    #[test]
    fn roots_and_constants() {
        assert_eq!(show("sqrt(2)"), r"\sqrt{2}");
        assert_eq!(show("x**(1/3)"), r"\sqrt[3]{x}");
        assert_eq!(show("2*pi"), r"2 \pi");
        assert_eq!(show("-I"), "- i");
        assert_eq!(show("exp(x)"), "e^{x}");
        assert_eq!(show("1/0"), r"\tilde{\infty}");
    }

    #[test]
    fn symbols() {
        assert_eq!(latex_symbol("theta"), r"\theta");
        assert_eq!(latex_symbol("x1"), "x_{1}");
        assert_eq!(latex_symbol("a_b"), "a_{b}");
        assert_eq!(latex_symbol("speed"), "speed");
    }

    #[test]
    fn functions() {
        assert_eq!(show("sin(x)"), r"\sin{\left(x \right)}");
        assert_eq!(show("sin(x)**2"), r"\sin^{2}{\left(x \right)}");
        assert_eq!(show("log(x)"), r"\log{\left(x \right)}");
        assert_eq!(show("asin(x)"), r"\operatorname{asin}{\left(x \right)}");
        assert_eq!(show("f(x, y)"), r"f{\left(x, y \right)}");
        assert_eq!(show("abs(x)"), r"\left|x\right|");
    }

    #[test]
    fn equations() {
        assert_eq!(latex(&SymExpr::eq(SymExpr::symbol("x"), SymExpr::int(-2))), "x = -2");
    }

    #[test]
    fn fractions_and_products() {
        assert_eq!(show("1/(x + 1)"), r"\frac{1}{x + 1}");
        let scaled_sum = SymExpr::Mul(vec![SymExpr::int(2), parse_expr("x + 1")]);
        assert_eq!(latex(&scaled_sum), r"2 \left(x + 1\right)");
        assert_eq!(show("x/(2*y)"), r"\frac{x}{2 y}");
    }

    #[test]
    fn calculus_results() {
        assert_eq!(latex(&derivative(&parse_expr("x**3"), "x")), "3 x^{2}");
        assert_eq!(latex(&integrate(&parse_expr("x**2"), "x").unwrap()), r"\frac{x^{3}}{3}");
        assert_eq!(
            latex(&SymExpr::call("Integral", vec![parse_expr("sin(x)/x"), SymExpr::symbol("x")])),
            r"\int \frac{\sin{\left(x \right)}}{x}\, dx",
        );
    }
}
