//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](cas_parser::parser::expr::Expr) type from `cas_parser` is a recursive `enum`
//! that represents the AST of a math problem. It's convenient for parsing, but not so much for
//! algebraic manipulation.
//!
//! This module defines a separate [`SymExpr`], a type that simplifies the AST by recursively
//! flattening it into a list of terms or factors, depending on the operation. Subtraction is
//! represented as addition of a negated term, and division as multiplication by a power with
//! exponent `-1`.
//!
//! Equations, tuples, derivatives and integrals are represented as function calls named `Eq`,
//! `Tuple`, `Derivative` (or `diff`) and `Integral` (or `integrate`), respectively.
//!
//! # Strict equality
//!
//! Determining whether two expressions are mathematically equal is extremely difficult in
//! general, since there are an infinite number of ways to write the same expression. Consider
//! `x^2 + 2x + 1` and `(x + 1)^2`: they are equal, but only after expanding one of them.
//!
//! We instead define a subset of mathematical equality, called **strict equality**. Two
//! expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both
//! [`SymExpr::Add`], etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//! terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality can **never** report false positives, and does not depend on any
//! simplification to work, which makes it usable from inside the simplifier itself to decide if
//! terms / factors are similar enough to be combined.
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**.

mod iter;

use crate::{
    consts::{is_constant, E_NAME, I_NAME, PI_NAME, ZOO_NAME},
    error::{InfiniteValue, InvalidNumber, MisplacedTuple, NestedEquation},
    primitive::{float_from_str, int, int_from_str, rational},
};
use cas_error::Error;
use cas_parser::parser::{
    expr::Expr as AstExpr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
};
use iter::ExprIter;
use rug::{Float, Integer, Rational};
use std::{collections::BTreeSet, ops::{Add, Div, Mul, Neg, Sub}};
use super::simplify::fraction::make_fraction;

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone)]
pub enum Primary {
    /// An exact rational number, such as `2`, `-7`, or `1/3`.
    Number(Rational),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable or named constant, such as `x`, `y`, or `pi`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `f(x, y)`.
    Call(String, Vec<SymExpr>),
}

/// Numbers of different types are never equal: `2` and `2.0` are different primaries.
impl PartialEq for Primary {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(lhs), Self::Number(rhs)) => lhs == rhs,
            (Self::Float(lhs), Self::Float(rhs)) => lhs == rhs,
            (Self::Symbol(lhs), Self::Symbol(rhs)) => lhs == rhs,
            (Self::Call(lhs_name, lhs_args), Self::Call(rhs_name, rhs_args)) => {
                lhs_name == rhs_name && lhs_args == rhs_args
            },
            _ => false,
        }
    }
}

/// This module **must never** produce non-normal [`Float`]s (such as `NaN`) inside a
/// [`Primary::Float`], so that equality is reflexive.
impl Eq for Primary {}

/// Adds two [`Primary`]s together. If both are numbers, the numbers are added together (mixing a
/// [`Rational`] and a [`Float`] results in a [`Float`]). Otherwise, the two [`Primary`]s are
/// wrapped in a [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => SymExpr::Primary(Primary::Number(lhs + rhs)),
            (Primary::Float(lhs), Primary::Float(rhs)) => SymExpr::Primary(Primary::Float(lhs + rhs)),
            (Primary::Float(lhs), Primary::Number(rhs)) | (Primary::Number(rhs), Primary::Float(lhs)) => {
                SymExpr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => SymExpr::Add(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// Multiplies two [`Primary`]s together, with the same numeric rules as [`Add`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Number(lhs), Primary::Number(rhs)) => SymExpr::Primary(Primary::Number(lhs * rhs)),
            (Primary::Float(lhs), Primary::Float(rhs)) => SymExpr::Primary(Primary::Float(lhs * rhs)),
            (Primary::Float(lhs), Primary::Number(rhs)) | (Primary::Number(rhs), Primary::Float(lhs)) => {
                SymExpr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => SymExpr::Mul(vec![SymExpr::Primary(lhs), SymExpr::Primary(rhs)]),
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// This type should be distinguished from the [`cas_parser::parser::expr::Expr`] type, which is
/// produced by [`cas_parser`]. The main difference is that this type **flattens** out the tree
/// structure. For example, the expression `x + (y + z)` would be represented internally as a
/// single [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates an exact integer expression.
    pub fn int<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Number(Rational::from(int(n))))
    }

    /// Creates an exact rational expression.
    pub fn rational<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(rational(n)))
    }

    /// Creates a floating-point expression.
    pub fn float(n: Float) -> Self {
        Self::Primary(Primary::Float(n))
    }

    /// Creates a symbol expression.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a function call expression.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Creates `base^exp`. No simplification is done.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Creates the equation `lhs = rhs`.
    pub fn eq(lhs: SymExpr, rhs: SymExpr) -> Self {
        Self::call("Eq", vec![lhs, rhs])
    }

    /// The circle constant `π`.
    pub fn pi() -> Self {
        Self::symbol(PI_NAME)
    }

    /// Euler's number `e`.
    pub fn e() -> Self {
        Self::symbol(E_NAME)
    }

    /// The imaginary unit `i`.
    pub fn i() -> Self {
        Self::symbol(I_NAME)
    }

    /// Complex infinity, the value of `1/0`.
    pub fn zoo() -> Self {
        Self::symbol(ZOO_NAME)
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(num),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Number`] with denominator 1, returns the integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number()
            .filter(|num| *num.denom() == 1)
            .map(|num| num.numer())
    }

    /// If the expression is a [`Primary::Float`], returns a reference to the contained float.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(num)) => Some(num),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`] or a [`Primary::Float`].
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_) | Primary::Float(_)))
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(num)) => num.cmp0().is_eq(),
            Self::Primary(Primary::Float(num)) => num.is_zero(),
            _ => false,
        }
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(num)) => *num == 1,
            Self::Primary(Primary::Float(num)) => *num == 1,
            _ => false,
        }
    }

    /// Returns true if the expression is a negative number.
    pub fn is_negative_number(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(num)) => num.cmp0().is_lt(),
            Self::Primary(Primary::Float(num)) => num.is_sign_negative() && !num.is_zero(),
            _ => false,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the expression is the symbol with the given name.
    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }

    /// If the expression is a [`Primary::Call`], returns the name and arguments.
    pub fn as_call(&self) -> Option<(&str, &[SymExpr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// If the expression is a call to one of the given functions with a single argument, returns
    /// the argument.
    pub fn as_unary_call(&self, names: &[&str]) -> Option<&SymExpr> {
        match self.as_call()? {
            (name, [arg]) if names.contains(&name) => Some(arg),
            _ => None,
        }
    }

    /// Splits the expression into its numeric coefficient and the remaining factors.
    ///
    /// - `5` -> `(5, 1)`
    /// - `3*a` -> `(3, a)`
    /// - `-a*b/4` -> `(-1/4, a*b)`
    /// - `a` -> `(1, a)`
    pub fn coeff_and_rest(&self) -> (SymExpr, SymExpr) {
        match self {
            Self::Primary(Primary::Number(_) | Primary::Float(_)) => (self.clone(), Self::int(1)),
            Self::Mul(factors) => {
                let mut coeff = Self::int(1);
                let mut rest = Vec::with_capacity(factors.len());
                for factor in factors {
                    match factor {
                        Self::Primary(num @ (Primary::Number(_) | Primary::Float(_))) => {
                            coeff = match coeff {
                                Self::Primary(current) => current * num.clone(),
                                other => other,
                            };
                        },
                        _ => rest.push(factor.clone()),
                    }
                }
                (coeff, Self::Mul(rest).downgrade())
            },
            _ => (Self::int(1), self.clone()),
        }
    }

    /// Returns true if the expression would be printed with a leading minus sign, i.e. it is a
    /// negative number or has a negative numeric coefficient.
    pub fn is_negative_term(&self) -> bool {
        self.coeff_and_rest().0.is_negative_number()
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or an [`SymExpr::Primary`]
    /// containing the integer 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::int(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::int(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        Self::pow(self, Self::rational((1, 2)))
    }

    /// Returns the reciprocal of this expression. No simplification is done.
    pub fn recip(self) -> Self {
        Self::pow(self, Self::int(-1))
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the free variables of the expression in lexicographic order. Named constants such
    /// as `pi` and function names are not included.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(|expr| match expr {
                Self::Primary(Primary::Symbol(name)) if !is_constant(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns true if the expression contains the given symbol anywhere, including inside
    /// function calls.
    pub fn contains_symbol(&self, var: &str) -> bool {
        match self {
            Self::Primary(Primary::Symbol(name)) => name == var,
            Self::Primary(Primary::Call(_, args)) => args.iter().any(|arg| arg.contains_symbol(var)),
            Self::Primary(_) => false,
            Self::Add(exprs) | Self::Mul(exprs) => exprs.iter().any(|expr| expr.contains_symbol(var)),
            Self::Exp(base, exp) => base.contains_symbol(var) || exp.contains_symbol(var),
        }
    }

    /// Returns true if the expression contains no free variables.
    pub fn is_constant(&self) -> bool {
        self.free_symbols().is_empty()
    }

    /// Replaces every occurrence of the symbol `var` with `value`. No simplification is done.
    pub fn substitute(&self, var: &str, value: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(name)) if name == var => value.clone(),
            Self::Primary(Primary::Call(name, args)) => Self::call(
                name.clone(),
                args.iter().map(|arg| arg.substitute(var, value)).collect(),
            ),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => terms.iter()
                .map(|term| term.substitute(var, value))
                .fold(Self::Add(Vec::new()), |acc, term| acc + term),
            Self::Mul(factors) => factors.iter()
                .map(|factor| factor.substitute(var, value))
                .fold(Self::Mul(Vec::new()), |acc, factor| acc * factor),
            Self::Exp(base, exp) => Self::pow(base.substitute(var, value), exp.substitute(var, value)),
        }
    }

    /// Applies the given function to every direct child of the expression, including the
    /// arguments of function calls.
    pub fn map_children<F>(&self, mut f: F) -> SymExpr
    where
        F: FnMut(&SymExpr) -> SymExpr,
    {
        match self {
            Self::Primary(Primary::Call(name, args)) => {
                Self::call(name.clone(), args.iter().map(&mut f).collect())
            },
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(&mut f).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(&mut f).collect()),
            Self::Exp(base, exp) => Self::pow(f(base), f(exp)),
        }
    }

    /// Fallible version of [`SymExpr::map_children`].
    pub fn try_map_children<F, E>(&self, mut f: F) -> Result<SymExpr, E>
    where
        F: FnMut(&SymExpr) -> Result<SymExpr, E>,
    {
        Ok(match self {
            Self::Primary(Primary::Call(name, args)) => {
                Self::call(name.clone(), args.iter().map(&mut f).collect::<Result<_, _>>()?)
            },
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(&mut f).collect::<Result<_, _>>()?),
            Self::Mul(factors) => Self::Mul(factors.iter().map(&mut f).collect::<Result<_, _>>()?),
            Self::Exp(base, exp) => Self::pow(f(base)?, f(exp)?),
        })
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }

                // match every element with a distinct partner, so that `[a, a, b]` and `[a, b, b]`
                // are not considered equal
                let mut used = vec![false; rhs.len()];
                lhs.iter().all(|lhs| {
                    let partner = rhs.iter()
                        .enumerate()
                        .position(|(i, rhs)| !used[i] && lhs == rhs);
                    match partner {
                        Some(i) => {
                            used[i] = true;
                            true
                        },
                        None => false,
                    }
                })
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

/// Where an AST node appears, which decides if equations and tuples are allowed there.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Position {
    /// The whole problem.
    Top,

    /// A direct argument of a function call.
    Argument,

    /// Anywhere else.
    Inner,
}

/// Converts an AST node into a [`SymExpr`].
fn convert(expr: AstExpr, position: Position) -> Result<SymExpr, Error> {
    Ok(match expr {
        AstExpr::Literal(literal) => match literal {
            Literal::Integer(lit) => {
                let value = int_from_str(&lit.value)
                    .ok_or_else(|| Error::new(vec![lit.span.clone()], InvalidNumber { literal: lit.value.clone() }))?;
                SymExpr::Primary(Primary::Number(Rational::from(value)))
            },
            Literal::Float(lit) => {
                let value = float_from_str(&lit.value)
                    .ok_or_else(|| Error::new(vec![lit.span.clone()], InvalidNumber { literal: lit.value.clone() }))?;
                SymExpr::float(value)
            },
            Literal::Symbol(sym) if sym.name == "oo" => {
                return Err(Error::new(vec![sym.span], InfiniteValue));
            },
            Literal::Symbol(sym) => SymExpr::symbol(sym.name),
        },
        AstExpr::Paren(paren) => convert(*paren.expr, position)?,
        AstExpr::Tuple(tuple) => {
            if position != Position::Argument {
                return Err(Error::new(vec![tuple.span], MisplacedTuple));
            }
            let values = tuple.values
                .into_iter()
                .map(|value| convert(value, Position::Inner))
                .collect::<Result<_, _>>()?;
            SymExpr::call("Tuple", values)
        },
        AstExpr::Call(call) => {
            let name = match call.name.name.as_str() {
                "ln" => "log".to_string(),
                _ => call.name.name,
            };
            let args = call.args
                .into_iter()
                .map(|arg| convert(arg, Position::Argument))
                .collect::<Result<_, _>>()?;
            SymExpr::call(name, args)
        },
        AstExpr::Unary(unary) => {
            let operand = convert(*unary.operand, Position::Inner)?;
            match unary.op.kind {
                UnaryOpKind::Neg => operand.neg(),
                UnaryOpKind::Pos => operand,
            }
        },
        AstExpr::Binary(bin) => {
            let span = bin.span.clone();
            let lhs = convert(*bin.lhs, Position::Inner)?;
            let rhs = convert(*bin.rhs, Position::Inner)?;
            match bin.op.kind {
                BinOpKind::Exp => SymExpr::pow(lhs, rhs),
                BinOpKind::Mul => lhs * rhs,
                // treat this as lhs * rhs^-1
                BinOpKind::Div => make_fraction(lhs, rhs),
                BinOpKind::Add => lhs + rhs,
                // treat this as lhs + -1 * rhs
                BinOpKind::Sub => lhs + rhs.neg(),
                BinOpKind::Eq => {
                    if position != Position::Top {
                        return Err(Error::new(vec![span], NestedEquation));
                    }
                    SymExpr::eq(lhs, rhs)
                },
            }
        },
    })
}

/// Converts a parsed problem into a [`SymExpr`]. The conversion fails if an equation is nested
/// inside another expression, if a tuple is used outside of a function call, or if a number
/// literal cannot be represented.
impl TryFrom<AstExpr> for SymExpr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        convert(expr, Position::Top)
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// in one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where
/// the operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are
/// combined in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Subtracts two [`SymExpr`]s, as `lhs + -1 * rhs`.
impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs.neg()
    }
}

/// Divides two [`SymExpr`]s, as `lhs * rhs^-1`.
impl Div for SymExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        make_fraction(self, rhs)
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, or a product with a numeric factor, in which case the number is
/// negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(num)) => Self::Primary(Primary::Number(-num)),
            Self::Primary(Primary::Float(num)) => Self::Primary(Primary::Float(-num)),
            Self::Mul(mut factors) => match factors.iter().position(SymExpr::is_numeric) {
                Some(idx) => {
                    let negated = -factors.remove(idx);
                    if !(negated.is_one() && negated.as_number().is_some()) {
                        factors.insert(idx, negated);
                    }
                    Self::Mul(factors).downgrade()
                },
                None => {
                    factors.insert(0, Self::int(-1));
                    Self::Mul(factors)
                },
            },
            expr => Self::int(-1) * expr,
        }
    }
}

/// NOTE: Strict equality allows different orderings of terms and factors, so a failing
/// `pretty_assertions` diff can show differences that are only in the order of the elements.
#[cfg(test)]
mod tests {
    use cas_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::try_from(parse(input).unwrap()).unwrap()
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2*(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_2() {
        // these are NOT strictly equal (but are semantically equal)
        let a = parse_expr("2*(x + (y - 5))");
        let b = parse_expr("2*x + 2*y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        let a = SymExpr::Add(vec![SymExpr::symbol("a"), SymExpr::symbol("a"), SymExpr::symbol("b")]);
        let b = SymExpr::Add(vec![SymExpr::symbol("a"), SymExpr::symbol("b"), SymExpr::symbol("b")]);
        assert_ne!(a, b);
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5*x + 6");

        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::int(6),
            SymExpr::Mul(vec![SymExpr::int(5), SymExpr::symbol("x")]),
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::int(2)),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        let expr = parse_expr("x - y/2");
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![SymExpr::rational((-1, 2)), SymExpr::symbol("y")]),
        ]));

        let expr = parse_expr("x/y");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::pow(SymExpr::symbol("y"), SymExpr::int(-1)),
        ]));
    }

    #[test]
    fn negative_literal() {
        assert_eq!(parse_expr("-3"), SymExpr::int(-3));
        assert_eq!(parse_expr("-2.5"), SymExpr::float(crate::primitive::float(-2.5)));
    }

    #[test]
    fn equation_and_calls() {
        let expr = parse_expr("sin(x) = ln(y)");
        assert_eq!(expr, SymExpr::eq(
            SymExpr::call("sin", vec![SymExpr::symbol("x")]),
            SymExpr::call("log", vec![SymExpr::symbol("y")]),
        ));
    }

    #[test]
    fn tuple_argument() {
        let expr = parse_expr("integrate(x, (x, 0, 1))");
        assert_eq!(expr, SymExpr::call("integrate", vec![
            SymExpr::symbol("x"),
            SymExpr::call("Tuple", vec![SymExpr::symbol("x"), SymExpr::int(0), SymExpr::int(1)]),
        ]));
    }

    #[test]
    fn nested_equation_is_rejected() {
        let err = SymExpr::try_from(parse("(x = 1) + 2").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "equations can only appear at the top level of a problem");
        assert_eq!(err.spans, vec![1..6]);
    }

    #[test]
    fn misplaced_tuple_is_rejected() {
        let err = SymExpr::try_from(parse("(1, 2) + x").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "tuples can only be used as function arguments");
    }

    #[test]
    fn infinity_is_rejected() {
        let err = SymExpr::try_from(parse("x + oo").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "infinity (`oo`) is not supported as a value");
        assert_eq!(err.spans, vec![4..6]);
    }

    #[test]
    fn free_symbols_are_sorted() {
        let expr = parse_expr("z + sin(y*pi) + x**E + I");
        assert_eq!(
            expr.free_symbols().into_iter().collect::<Vec<_>>(),
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        );
        assert!(parse_expr("2*pi + E").is_constant());
    }

    #[test]
    fn substitution() {
        let expr = parse_expr("x**2 + f(x)");
        let substituted = expr.substitute("x", &SymExpr::int(3));
        assert_eq!(substituted, SymExpr::Add(vec![
            SymExpr::pow(SymExpr::int(3), SymExpr::int(2)),
            SymExpr::call("f", vec![SymExpr::int(3)]),
        ]));
    }

    #[test]
    fn coefficients() {
        let (coeff, rest) = parse_expr("-3*x*y").coeff_and_rest();
        assert_eq!(coeff, SymExpr::int(-3));
        assert_eq!(rest, SymExpr::Mul(vec![SymExpr::symbol("x"), SymExpr::symbol("y")]));
        assert!(parse_expr("-x").is_negative_term());
        assert!(!parse_expr("x").is_negative_term());
    }
}
