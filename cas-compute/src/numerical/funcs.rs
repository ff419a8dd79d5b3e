//! Complex-valued implementations of the built-in functions.
//!
//! Every function here takes and returns [`Complex`] values, computed with the precision of
//! the arguments. Functions with a branch cut use the principal branch.

use crate::primitive::complex;
use rug::{ops::Pow, Complex};

/// Build the table of single-argument functions.
macro_rules! unary_funcs {
    ($($name:literal => $func:expr),* $(,)?) => {
        /// Names of every single-argument function with a numeric implementation.
        pub const UNARY: &[&str] = &[$($name),*];

        /// Evaluates the named single-argument function.
        fn eval_unary(name: &str, n: Complex) -> Option<Complex> {
            match name {
                $(
                    // NOTE: the closure call is contained within the macro, so we allow the
                    // clippy::redundant_closure_call lint
                    #[allow(clippy::redundant_closure_call)]
                    $name => Some(($func)(n)),
                )*
                _ => None,
            }
        }
    };
}

unary_funcs! {
    "sin" => |n: Complex| n.sin(),
    "cos" => |n: Complex| n.cos(),
    "tan" => |n: Complex| n.tan(),
    "csc" => |n: Complex| n.sin().recip(),
    "sec" => |n: Complex| n.cos().recip(),
    "cot" => |n: Complex| n.tan().recip(),
    "asin" => |n: Complex| n.asin(),
    "acos" => |n: Complex| n.acos(),
    "atan" => |n: Complex| n.atan(),
    "sinh" => |n: Complex| n.sinh(),
    "cosh" => |n: Complex| n.cosh(),
    "tanh" => |n: Complex| n.tanh(),
    "asinh" => |n: Complex| n.asinh(),
    "acosh" => |n: Complex| n.acosh(),
    "atanh" => |n: Complex| n.atanh(),
    "exp" => |n: Complex| n.exp(),
    "log" => |n: Complex| n.ln(),
    "sqrt" => |n: Complex| n.sqrt(),
    "abs" => |n: Complex| n.abs(),
    "sign" => |n: Complex| if n.is_zero() { n } else { n.clone() / n.abs() },
    "re" => |n: Complex| complex(n.real()),
    "im" => |n: Complex| complex(n.imag()),
    "conjugate" => |n: Complex| n.conj(),
    "floor" => |n: Complex| complex(n.real().clone().floor()),
    "ceiling" => |n: Complex| complex(n.real().clone().ceil()),
}

/// Names of every two-argument function with a numeric implementation.
pub const BINARY: &[&str] = &["log", "root"];

/// Evaluates the named two-argument function.
fn eval_binary(name: &str, a: Complex, b: Complex) -> Option<Complex> {
    match name {
        // log(x, base)
        "log" => Some(a.ln() / b.ln()),
        // root(x, n)
        "root" => Some(a.pow(b.recip())),
        _ => None,
    }
}

/// Evaluates a built-in function.
///
/// Returns [`None`] if there is no function with the given name that accepts the given number of
/// arguments.
pub fn eval(name: &str, args: Vec<Complex>) -> Option<Complex> {
    let mut args = args.into_iter();
    match (args.next(), args.next(), args.next()) {
        (Some(n), None, None) => eval_unary(name, n),
        (Some(a), Some(b), None) => eval_binary(name, a, b),
        _ => None,
    }
}

/// Returns true if a function with the given name exists, regardless of the number of arguments
/// it takes.
pub fn exists(name: &str) -> bool {
    UNARY.contains(&name) || BINARY.contains(&name)
}

/// Describes the number of arguments the given function accepts.
pub fn expected_args(name: &str) -> &'static str {
    match (UNARY.contains(&name), BINARY.contains(&name)) {
        (true, true) => "1 or 2 arguments",
        (false, true) => "2 arguments",
        _ => "1 argument",
    }
}

/// All function names, used to suggest a correction for misspelled names.
pub fn names() -> impl Iterator<Item = &'static str> {
    UNARY.iter().chain(BINARY).copied()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use crate::consts::PI;
    use super::*;

    #[test]
    fn sine_of_half_pi() {
        let result = eval("sin", vec![complex(&*PI) / 2]).unwrap();
        assert_float_absolute_eq!(result.real().to_f64(), 1.0);
        assert_float_absolute_eq!(result.imag().to_f64(), 0.0);
    }

    #[test]
    fn log_with_base() {
        let result = eval("log", vec![complex(8), complex(2)]).unwrap();
        assert_float_absolute_eq!(result.real().to_f64(), 3.0);
    }

    #[test]
    fn sqrt_of_negative() {
        let result = eval("sqrt", vec![complex(-4)]).unwrap();
        assert_float_absolute_eq!(result.real().to_f64(), 0.0);
        assert_float_absolute_eq!(result.imag().to_f64(), 2.0);
    }

    #[test]
    fn wrong_arity() {
        assert!(eval("sin", vec![complex(1), complex(2)]).is_none());
        assert!(eval("frobnicate", vec![complex(1)]).is_none());
        assert_eq!(expected_args("log"), "1 or 2 arguments");
    }
}
