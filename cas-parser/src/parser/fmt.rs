//! [`Display`] implementations that write the syntax tree back out as normalized input.

use std::fmt::{Display, Formatter, Result};
use super::{
    binary::Binary,
    call::Call,
    expr::Expr,
    literal::Literal,
    paren::{Paren, Tuple},
    token::op::{BinOpKind, UnaryOpKind},
    unary::Unary,
};

/// Writes the given expressions separated by `, `.
fn fmt_list(f: &mut Formatter, values: &[Expr]) -> Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Literal::Integer(int) => write!(f, "{}", int.value),
            Literal::Float(float) => write!(f, "{}", float.value),
            Literal::Symbol(sym) => write!(f, "{}", sym.name),
        }
    }
}

impl Display for Paren {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "({})", self.expr)
    }
}

impl Display for Tuple {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "(")?;
        fmt_list(f, &self.values)?;
        if self.values.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}(", self.name.name)?;
        fmt_list(f, &self.args)?;
        write!(f, ")")
    }
}

impl Display for UnaryOpKind {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            UnaryOpKind::Neg => write!(f, "-"),
            UnaryOpKind::Pos => write!(f, "+"),
        }
    }
}

impl Display for Unary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.op.kind, self.operand)
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            BinOpKind::Exp => write!(f, "**"),
            BinOpKind::Mul => write!(f, "*"),
            BinOpKind::Div => write!(f, "/"),
            BinOpKind::Add => write!(f, "+"),
            BinOpKind::Sub => write!(f, "-"),
            BinOpKind::Eq => write!(f, "="),
        }
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.op.kind {
            BinOpKind::Exp | BinOpKind::Mul | BinOpKind::Div => {
                write!(f, "{}{}{}", self.lhs, self.op.kind, self.rhs)
            },
            _ => write!(f, "{} {} {}", self.lhs, self.op.kind, self.rhs),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Tuple(tuple) => tuple.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
