//! Tokenizer and parser for math problems entered as plain text, such as `diff(x**3, x)` or
//! `x^2 - 4 = 0`.
//!
//! The accepted syntax follows the usual computer algebra conventions: `+ - * /` for the basic
//! operations, `**` or `^` for exponentiation, `=` for equations, `f(a, b)` for function calls
//! and `(a, b, c)` for tuples (used for definite integration limits).

pub mod parser;
pub mod tokenizer;
