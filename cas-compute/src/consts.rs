//! Named constants that can appear in expressions, and the numeric values they stand for.

use once_cell::sync::Lazy;
use rug::{Complex, Float};
use std::collections::HashMap;
use super::primitive::{complex, float};

/// The name of the circle constant `π`.
pub const PI_NAME: &str = "pi";

/// The name of Euler's number `e`.
pub const E_NAME: &str = "E";

/// The name of the imaginary unit `i`.
pub const I_NAME: &str = "I";

/// The name of complex infinity, the result of dividing a nonzero number by zero.
pub const ZOO_NAME: &str = "zoo";

/// Returns true if the given symbol name is a built-in constant rather than a free variable.
pub fn is_constant(name: &str) -> bool {
    matches!(name, PI_NAME | E_NAME | I_NAME | ZOO_NAME)
}

/// The imaginary unit.
pub static I: Lazy<Complex> = Lazy::new(|| complex((0, 1)));

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

/// Symbol names that are rendered as Greek letters in LaTeX output.
pub static GREEK: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("alpha", r"\alpha"), ("beta", r"\beta"), ("gamma", r"\gamma"), ("delta", r"\delta"),
        ("epsilon", r"\epsilon"), ("zeta", r"\zeta"), ("eta", r"\eta"), ("theta", r"\theta"),
        ("iota", r"\iota"), ("kappa", r"\kappa"), ("lambda", r"\lambda"), ("mu", r"\mu"),
        ("nu", r"\nu"), ("xi", r"\xi"), ("rho", r"\rho"), ("sigma", r"\sigma"), ("tau", r"\tau"),
        ("upsilon", r"\upsilon"), ("phi", r"\phi"), ("chi", r"\chi"), ("psi", r"\psi"),
        ("omega", r"\omega"), ("Gamma", r"\Gamma"), ("Delta", r"\Delta"), ("Theta", r"\Theta"),
        ("Lambda", r"\Lambda"), ("Xi", r"\Xi"), ("Pi", r"\Pi"), ("Sigma", r"\Sigma"),
        ("Phi", r"\Phi"), ("Psi", r"\Psi"), ("Omega", r"\Omega"),
    ]
    .into_iter()
    .collect()
});
