//! Formatting of floating-point numbers.

use rug::{float::Round, Float};
use std::cmp::Ordering;

/// The number of significant digits printed for a float.
pub const SIGNIFICANT_DIGITS: usize = 15;

/// Numbers whose decimal exponent is at least this large are printed in scientific notation.
const MAX_DECIMAL_EXPONENT: i32 = 16;

/// Numbers whose decimal exponent is smaller than this are printed in scientific notation.
const MIN_DECIMAL_EXPONENT: i32 = -4;

/// A float rounded to [`SIGNIFICANT_DIGITS`] digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rounded {
    /// True if the number is negative.
    negative: bool,

    /// The significant digits, without trailing zeros. Never empty.
    digits: String,

    /// The power of ten of the first digit, so that `1234` has exponent 3.
    exponent: i32,
}

/// Rounds a normal float. Returns [`None`] for zero, infinities and NaN.
fn round(n: &Float) -> Option<Rounded> {
    if !n.is_normal() {
        return None;
    }

    let (negative, digits, exponent) = n.to_sign_string_exp_round(10, Some(SIGNIFICANT_DIGITS), Round::Nearest);
    let digits = digits.trim_end_matches('0');
    Some(Rounded {
        negative,
        digits: if digits.is_empty() { "0".to_string() } else { digits.to_string() },
        exponent: exponent? - 1,
    })
}

/// Writes the digits of a rounded number in decimal notation.
fn decimal(rounded: &Rounded) -> String {
    let Rounded { digits, exponent, .. } = rounded;
    match exponent.cmp(&0) {
        Ordering::Less => format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits),
        _ => {
            let whole = *exponent as usize + 1;
            match digits.len().cmp(&whole) {
                Ordering::Greater => format!("{}.{}", &digits[..whole], &digits[whole..]),
                _ => format!("{}{}", digits, "0".repeat(whole - digits.len())),
            }
        },
    }
}

/// Writes the mantissa of a rounded number in scientific notation, e.g. `1.5` or `1.0`.
fn mantissa(rounded: &Rounded) -> String {
    let (first, rest) = rounded.digits.split_at(1);
    if rest.is_empty() {
        format!("{}.0", first)
    } else {
        format!("{}.{}", first, rest)
    }
}

/// Returns true if a number with the given exponent is printed in scientific notation.
fn is_scientific(exponent: i32) -> bool {
    !(MIN_DECIMAL_EXPONENT..MAX_DECIMAL_EXPONENT).contains(&exponent)
}

/// Formats a float as plain text.
///
/// Integer values are printed without a fractional part, other values with up to
/// [`SIGNIFICANT_DIGITS`] significant digits and no trailing zeros. Very large and very small
/// values use `e` notation, like `1.5e+20`.
pub fn display_float(n: &Float) -> String {
    let Some(rounded) = round(n) else {
        return if n.is_nan() {
            "nan".to_string()
        } else if n.is_infinite() {
            if n.is_sign_negative() { "-oo" } else { "oo" }.to_string()
        } else {
            "0".to_string()
        };
    };

    let sign = if rounded.negative { "-" } else { "" };
    if is_scientific(rounded.exponent) {
        let exp_sign = if rounded.exponent < 0 { '-' } else { '+' };
        format!("{}{}e{}{}", sign, mantissa(&rounded), exp_sign, rounded.exponent.abs())
    } else {
        format!("{}{}", sign, decimal(&rounded))
    }
}

/// Formats a float as LaTeX. Scientific notation is written as `1.5 \cdot 10^{20}`.
pub fn latex_float(n: &Float) -> String {
    let Some(rounded) = round(n) else {
        return if n.is_infinite() {
            if n.is_sign_negative() { r"-\infty" } else { r"\infty" }.to_string()
        } else if n.is_nan() {
            r"\text{NaN}".to_string()
        } else {
            "0".to_string()
        };
    };

    let sign = if rounded.negative { "-" } else { "" };
    if is_scientific(rounded.exponent) {
        format!(r"{}{} \cdot 10^{{{}}}", sign, mantissa(&rounded), rounded.exponent)
    } else {
        format!("{}{}", sign, decimal(&rounded))
    }
}
