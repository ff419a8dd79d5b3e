use std::ops::Range;
use super::{
    error::{kind, Error},
    expr::{Expr, Primary},
    token::{CloseParen, Comma, OpenParen},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

/// A list of comma-separated expressions surrounded by parentheses, such as `(1, x, y + 2)`.
///
/// This is used as a building block for parenthesized expressions, tuples, and function call
/// arguments. Trailing commas are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParenDelimited {
    /// The expressions inside the parentheses.
    pub values: Vec<Expr>,

    /// Whether a comma appeared anywhere inside the parentheses.
    pub has_comma: bool,

    /// The span of the opening parenthesis.
    pub open_span: Range<usize>,

    /// The span of the closing parenthesis.
    pub close_span: Range<usize>,
}

impl ParenDelimited {
    /// Returns the span from the opening parenthesis to the closing parenthesis, inclusive.
    pub fn span(&self) -> Range<usize> {
        self.open_span.start..self.close_span.end
    }
}

impl Parse for ParenDelimited {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        let unclosed = || Error::new_fatal(
            vec![open_paren.span.clone()],
            kind::UnclosedParenthesis { opening: true },
        );

        let mut values = Vec::new();
        let mut has_comma = false;
        loop {
            match input.current_token().map(|token| token.kind) {
                None => return Err(unclosed()),
                Some(TokenKind::CloseParen) => break,
                Some(_) => (),
            }

            match input.try_parse::<Expr>() {
                Ok(value) => values.push(value),
                Err(err) if err.fatal => return Err(err),
                Err(_) if input.current_token().is_none() => return Err(unclosed()),
                Err(err) => return Err(err),
            }

            if input.try_parse::<Comma>().is_ok() {
                has_comma = true;
            } else {
                break;
            }
        }

        match input.try_parse::<CloseParen>() {
            Ok(close_paren) => Ok(Self {
                values,
                has_comma,
                open_span: open_paren.span.clone(),
                close_span: close_paren.span,
            }),
            Err(_) if input.current_token().is_none() => Err(unclosed()),
            Err(err) => Err(err),
        }
    }
}

/// A parenthesized expression, such as `(1 + 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        self.expr.innermost()
    }
}

/// A tuple of expressions, such as `(x, 0, 1)`. Tuples are mainly used to give the variable and
/// limits of a definite integral.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    /// The values of the tuple.
    pub values: Vec<Expr>,

    /// The region of the source code that this tuple was parsed from.
    pub span: Range<usize>,
}

impl Tuple {
    /// Returns the span of the tuple.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Parses either a parenthesized expression or a tuple, depending on whether the parentheses
/// contain a comma.
pub(crate) fn parse_paren_or_tuple(input: &mut Parser) -> Result<Primary, Error> {
    let delimited = input.try_parse::<ParenDelimited>()?;
    let span = delimited.span();

    if delimited.has_comma {
        return Ok(Primary::Tuple(Tuple {
            values: delimited.values,
            span,
        }));
    }

    let mut values = delimited.values;
    match values.pop() {
        Some(expr) if values.is_empty() => Ok(Primary::Paren(Paren {
            expr: Box::new(expr),
            span,
        })),
        _ => Err(Error::new_fatal(vec![span], kind::EmptyParenthesis)),
    }
}
