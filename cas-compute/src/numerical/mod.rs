//! Numerical evaluation of constant expressions.
//!
//! [`evaluate`] computes the value of an expression with no free variables as a [`Complex`]
//! number with [`PRECISION`] bits of precision. Errors are returned without spans; the caller
//! attaches the span of the whole input with [`cas_error::Error::or_span`].

pub mod funcs;

use cas_error::Error;
use crate::{
    consts::{E, E_NAME, I, I_NAME, PI, PI_NAME, ZOO_NAME},
    error::{NotNumeric, Undefined, UnknownFunction, WrongArgumentCount},
    fmt::display,
    primitive::{complex, float, PRECISION},
    symbolic::expr::{Primary, SymExpr},
};
use levenshtein::levenshtein;
use rug::{ops::Pow, Complex, Float};
use tracing::trace;

/// Parts of a result smaller than this, relative to the other part, are rounding noise.
const CHOP_DIGITS: i32 = 140;

/// Returns the known function name closest to the given name, if any is close enough.
fn suggest(name: &str) -> Option<String> {
    funcs::names()
        .map(|candidate| (levenshtein(candidate, name), candidate))
        .filter(|(distance, _)| *distance <= 2)
        .min()
        .map(|(_, candidate)| candidate.to_string())
}

/// Raises `base` to `exp`, keeping real results real where possible.
fn pow(base: Complex, exp: Complex) -> Complex {
    if base.imag().is_zero() && exp.imag().is_zero() {
        let (re_base, re_exp) = (base.real(), exp.real());
        if !re_base.is_sign_negative() || re_exp.is_integer() {
            return complex(re_base.clone().pow(re_exp));
        }
    }
    base.pow(exp)
}

/// Recursively evaluates an expression.
fn eval(expr: &SymExpr) -> Result<Complex, Error> {
    let value = match expr {
        SymExpr::Primary(Primary::Number(num)) => complex(num),
        SymExpr::Primary(Primary::Float(num)) => complex(num),
        SymExpr::Primary(Primary::Symbol(name)) => match name.as_str() {
            PI_NAME => complex(&*PI),
            E_NAME => complex(&*E),
            I_NAME => I.clone(),
            ZOO_NAME => return Err(Error::new(Vec::new(), Undefined)),
            _ => return Err(Error::new(Vec::new(), NotNumeric { symbol: name.clone() })),
        },
        SymExpr::Primary(Primary::Call(name, args)) => {
            if !funcs::exists(name) {
                if name.chars().next().is_some_and(char::is_uppercase) || matches!(name.as_str(), "diff" | "integrate") {
                    return Err(Error::new(Vec::new(), NotNumeric { symbol: display(expr) }));
                }
                return Err(Error::new(Vec::new(), UnknownFunction {
                    name: name.clone(),
                    suggestion: suggest(name),
                }));
            }

            let values = args.iter()
                .map(eval)
                .collect::<Result<Vec<_>, _>>()?;
            funcs::eval(name, values)
                .ok_or_else(|| Error::new(Vec::new(), WrongArgumentCount {
                    name: name.clone(),
                    expected: funcs::expected_args(name),
                    given: args.len(),
                }))?
        },
        SymExpr::Add(terms) => terms.iter()
            .try_fold(complex(0), |acc, term| Ok::<_, Error>(acc + eval(term)?))?,
        SymExpr::Mul(factors) => factors.iter()
            .try_fold(complex(1), |acc, factor| Ok::<_, Error>(acc * eval(factor)?))?,
        SymExpr::Exp(base, exp) => {
            let base = eval(base)?;
            let exp = eval(exp)?;
            if base.is_zero() && exp.real().is_sign_negative() {
                return Err(Error::new(Vec::new(), Undefined));
            }
            pow(base, exp)
        },
    };

    if value.real().is_finite() && value.imag().is_finite() {
        Ok(value)
    } else {
        Err(Error::new(Vec::new(), Undefined))
    }
}

/// Zeroes a part that is negligible next to the other, such as the imaginary part of
/// `exp(i*pi)`.
fn chop(mut value: Complex) -> Complex {
    let threshold = |other: &Float| -> Float {
        let scale = if other.is_zero() { float(1) } else { other.clone().abs() };
        scale * float(10).pow(-CHOP_DIGITS)
    };

    let imag_threshold = threshold(value.real());
    if value.imag().clone().abs() < imag_threshold {
        *value.mut_imag() = float(0);
    }
    let real_threshold = threshold(value.imag());
    if value.real().clone().abs() < real_threshold {
        *value.mut_real() = float(0);
    }
    value
}

/// Evaluates an expression with no free variables to a complex number.
pub fn evaluate(expr: &SymExpr) -> Result<Complex, Error> {
    let value = chop(eval(expr)?);
    trace!(expr = %crate::fmt::display(expr), value = %value, "evaluated");
    Ok(value)
}

/// Converts the result of [`evaluate`] back to an expression, `re + im*I`, with floating-point
/// parts.
pub fn to_expr(value: &Complex) -> SymExpr {
    let (re, im) = (value.real(), value.imag());
    let real = SymExpr::float(Float::with_val(PRECISION, re));
    if im.is_zero() {
        return real;
    }

    let imag = if *im == 1 {
        SymExpr::i()
    } else if *im == -1 {
        SymExpr::Mul(vec![SymExpr::int(-1), SymExpr::i()])
    } else {
        SymExpr::Mul(vec![SymExpr::float(Float::with_val(PRECISION, im)), SymExpr::i()])
    };
    if re.is_zero() {
        imag
    } else {
        SymExpr::Add(vec![real, imag])
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use cas_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval_str(input: &str) -> Result<Complex, Error> {
        evaluate(&SymExpr::try_from(parse(input).unwrap()).unwrap())
    }

    #[test]
    fn arithmetic() {
        let value = eval_str("2 + 3*4 - 1/2").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 13.5);
        assert!(value.imag().is_zero());
    }

    #[test]
    fn constants_and_functions() {
        let value = eval_str("sin(pi/2) + log(E) + sqrt(16)").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 6.0);
    }

    #[test]
    fn negative_base_integer_power() {
        let value = eval_str("(-2)**3").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), -8.0);
        assert!(value.imag().is_zero());
    }

    #[test]
    fn euler_identity_is_real() {
        let value = eval_str("E**(I*pi)").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), -1.0);
        assert!(value.imag().is_zero());
    }

    #[test]
    fn complex_result() {
        let value = eval_str("sqrt(-9)").unwrap();
        assert!(value.real().is_zero());
        assert_float_absolute_eq!(value.imag().to_f64(), 3.0);
        assert_eq!(to_expr(&value), SymExpr::Mul(vec![SymExpr::float(float(3)), SymExpr::i()]));
    }

    #[test]
    fn unknown_function_suggestion() {
        let err = eval_str("sinn(2)").unwrap_err();
        assert_eq!(err.to_string(), "unknown function `sinn`");
    }

    #[test]
    fn division_by_zero_is_undefined() {
        let err = eval_str("1/0").unwrap_err();
        assert_eq!(err.to_string(), "the expression is undefined");
    }

    #[test]
    fn symbols_are_not_numeric() {
        let err = eval_str("x + 1").unwrap_err();
        assert_eq!(err.to_string(), "cannot evaluate `x` to a number");
    }

    #[test]
    fn wrong_argument_count() {
        let err = eval_str("sin(1, 2)").unwrap_err();
        assert_eq!(err.to_string(), "`sin` takes 1 argument, but 2 were given");
    }
}
