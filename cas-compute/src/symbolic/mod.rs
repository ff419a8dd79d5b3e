//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`cas_parser::parser::expr::Expr`] nodes produced by [`cas_parser`], with the
//! main difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`, where as the
//! [`cas_parser::parser::expr::Expr`] node would have two children, `x` and `(y + z)`.
//!
//! If you have a [`cas_parser::parser::expr::Expr`], you can convert it to a [`SymExpr`] using
//! the [`TryFrom`] trait. Conversion is lossy, as [`SymExpr`] does not store span information,
//! however the resulting expression will be semantically equivalent to the original.
//!
//! ```
//! use cas_compute::symbolic::SymExpr;
//! use cas_parser::parser::parse;
//!
//! let expr = SymExpr::try_from(parse("x + (y + z)").unwrap()).unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("y"),
//!     SymExpr::symbol("z"),
//! ]));
//! ```
//!
//! # Simplification
//!
//! A primary use case for algebraic manipulation is to reduce expressions to some canonical form.
//! This is done with the [`simplify()`] function, which accepts an expression and returns a
//! "simplified" version of it, by applying the rules in [`simplify::rules`] until none of them
//! apply anymore.
//!
//! ```
//! use cas_compute::symbolic::{simplify, SymExpr};
//! use cas_parser::parser::parse;
//!
//! let expr = SymExpr::try_from(parse("x + x + x").unwrap()).unwrap();
//!
//! // `x + x + x = 3x`
//! assert_eq!(simplify(&expr), SymExpr::Mul(vec![
//!     SymExpr::int(3),
//!     SymExpr::symbol("x"),
//! ]));
//! ```
//!
//! # Calculus and equations
//!
//! On top of simplification, this module can differentiate ([`derivative()`]), integrate
//! ([`integrate()`]), evaluate unevaluated calculus calls in place ([`doit()`]), solve equations
//! ([`solve_for()`], [`solve_equation()`]) and factor polynomials ([`factor()`]).

pub mod derivative;
pub mod doit;
pub mod expand;
pub mod expr;
pub mod factor;
pub mod integrate;
pub mod poly;
pub mod simplify;
pub mod solve;
pub mod step_collector;

pub use derivative::derivative;
pub use doit::doit;
pub use expand::expand;
pub use expr::{Primary, SymExpr};
pub use factor::factor;
pub use integrate::integrate;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use solve::{solve_equation, solve_for, Solutions};
pub use step_collector::StepCollector;
