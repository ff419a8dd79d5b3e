pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod fmt;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use cas_error::ErrorKind;
use error::{Error, kind};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This function can also catch fatal errors and immediately short-circuit the parsing
/// process.
///
/// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
/// value is returned. Otherwise, the stream is left unchanged and the error of the last
/// attempted parsing function is returned.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                // ignore this error and try the next parser, or return it
                err => err,
            }
        )+
    }};
}

/// A high-level parser for math problems. This is the type to use to parse an arbitrary piece of
/// input into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token, skipping any whitespace. The cursor is not moved. Returns
    /// [`None`] if there are no more tokens.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Moves the cursor to the position of the given parser, which should be a clone of this
    /// parser that has been advanced.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. This function can be used in the [`Parse::parse`]
    /// implementation of a type with the given [`Parser`], as it will automatically backtrack the
    /// cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;

        match self.current_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(Error::new_fatal(vec![token.span.clone()], kind::UnclosedParenthesis { opening: false }))
            },
            Some(token) => {
                let span = token.span.start..self.eof_span().end;
                Err(Error::new(vec![span], kind::ExpectedEof))
            },
        }
    }
}

/// Parses the given input as a single, complete expression.
pub fn parse(source: &str) -> Result<expr::Expr, Error> {
    Parser::new(source).try_parse_full::<expr::Expr>()
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of the equation sign (`=`).
    Eq,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^` or `**`).
    Exp,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::Call;
    use expr::Expr;
    use literal::{Literal, LitInt, LitSym};
    use token::op::{BinOp, BinOpKind};

    /// Writes the expression with every operation fully parenthesized, to check grouping.
    fn grouping(expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => literal.to_string(),
            Expr::Paren(paren) => grouping(&paren.expr),
            Expr::Tuple(tuple) => format!(
                "tuple[{}]",
                tuple.values.iter().map(grouping).collect::<Vec<_>>().join(", "),
            ),
            Expr::Call(call) => format!(
                "{}[{}]",
                call.name.name,
                call.args.iter().map(grouping).collect::<Vec<_>>().join(", "),
            ),
            Expr::Unary(unary) => format!("({}{})", unary.op.kind, grouping(&unary.operand)),
            Expr::Binary(binary) => format!(
                "({} {} {})",
                grouping(&binary.lhs),
                binary.op.kind,
                grouping(&binary.rhs),
            ),
        }
    }

    fn parse_grouping(source: &str) -> String {
        grouping(&parse(source).unwrap())
    }

    fn parse_error_message(source: &str) -> (String, bool) {
        let err = parse(source).unwrap_err();
        (err.kind.message(), err.fatal)
    }

    #[test]
    fn literal_int() {
        let expr = parse("16").unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Integer(LitInt {
            value: "16".to_string(),
            span: 0..2,
        })));
    }

    #[test]
    fn literal_float() {
        let expr = parse("  2.50 ").unwrap();
        match expr {
            Expr::Literal(Literal::Float(float)) => {
                assert_eq!(float.value, "2.50");
                assert_eq!(float.span, 2..6);
            },
            other => panic!("expected float literal, got {:?}", other),
        }
    }

    #[test]
    fn binary_expr() {
        let expr = parse("3 * x").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Literal(Literal::Integer(LitInt {
                value: "3".to_string(),
                span: 0..1,
            }))),
            op: BinOp {
                kind: BinOpKind::Mul,
                span: 2..3,
            },
            rhs: Box::new(Expr::Literal(Literal::Symbol(LitSym {
                name: "x".to_string(),
                span: 4..5,
            }))),
            span: 0..5,
        }));
    }

    #[test]
    fn operator_precedence() {
        assert_eq!(parse_grouping("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(parse_grouping("1 * 2 + 3"), "((1 * 2) + 3)");
        assert_eq!(parse_grouping("1 - 2 - 3"), "((1 - 2) - 3)");
        assert_eq!(parse_grouping("8 / 4 / 2"), "((8 / 4) / 2)");
    }

    #[test]
    fn exponent_right_associativity() {
        assert_eq!(parse_grouping("2**3**2"), "(2 ** (3 ** 2))");
        assert_eq!(parse_grouping("2^3^2"), "(2 ** (3 ** 2))");
    }

    #[test]
    fn negation_binds_looser_than_exponent() {
        assert_eq!(parse_grouping("-x**2"), "(-(x ** 2))");
        assert_eq!(parse_grouping("-x**2 + 1"), "((-(x ** 2)) + 1)");
        assert_eq!(parse_grouping("2**-x"), "(2 ** (-x))");
        assert_eq!(parse_grouping("--x"), "(-(-x))");
        assert_eq!(parse_grouping("-2 * x"), "((-2) * x)");
    }

    #[test]
    fn parenthesized() {
        assert_eq!(parse_grouping("(1 + 2) * 3"), "((1 + 2) * 3)");
        assert_eq!(parse_grouping("((x))"), "x");
    }

    #[test]
    fn function_calls() {
        assert_eq!(parse_grouping("diff(x**3, x)"), "diff[(x ** 3), x]");
        assert_eq!(parse_grouping("sin(cos(x)) + 1"), "(sin[cos[x]] + 1)");
        assert_eq!(parse_grouping("f()"), "f[]");

        let expr = parse("integrate(x, x)").unwrap();
        match expr {
            Expr::Call(Call { name, args, span, .. }) => {
                assert_eq!(name.name, "integrate");
                assert_eq!(args.len(), 2);
                assert_eq!(span, 0..15);
            },
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn tuples() {
        assert_eq!(parse_grouping("integrate(x, (x, 0, 1))"), "integrate[x, tuple[x, 0, 1]]");
        assert_eq!(parse_grouping("(x,)"), "tuple[x]");
    }

    #[test]
    fn equations() {
        assert_eq!(parse_grouping("2*x + 1 = 7"), "(((2 * x) + 1) = 7)");
        assert_eq!(parse_grouping("x = y - 1"), "(x = (y - 1))");
    }

    #[test]
    fn whitespace_everywhere() {
        assert_eq!(parse_grouping("  x\t+\n1  "), "(x + 1)");
    }

    #[test]
    fn display_round_trip() {
        let source = "diff(sin(x)**2, x) + (x, 1)";
        assert_eq!(parse(source).unwrap().to_string(), source);
    }

    #[test]
    fn unclosed_opening_parenthesis() {
        assert_eq!(parse_error_message("(x + 1"), ("unclosed parenthesis".to_string(), true));
        assert_eq!(parse_error_message("diff(x**3, x"), ("unclosed parenthesis".to_string(), true));
        assert_eq!(parse_error_message("sin((x)"), ("unclosed parenthesis".to_string(), true));
    }

    #[test]
    fn unclosed_closing_parenthesis() {
        assert_eq!(parse_error_message("x + 1)"), ("unclosed parenthesis".to_string(), true));
        assert_eq!(parse_error_message(")"), ("unclosed parenthesis".to_string(), true));
    }

    #[test]
    fn empty_parenthesis() {
        assert_eq!(
            parse_error_message("2 * ()"),
            ("missing expression inside parenthesis".to_string(), true),
        );
    }

    #[test]
    fn chained_equation() {
        let err = parse("a = b = c").unwrap_err();
        assert!(err.fatal);
        assert_eq!(err.spans, vec![2..3, 6..7]);
    }

    #[test]
    fn trailing_input() {
        let err = parse("2 x").unwrap_err();
        assert_eq!(err.kind.message(), "expected end of input");
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn missing_operand() {
        assert_eq!(parse_error_message("2 +").0, "unexpected end of input");
        assert_eq!(parse_error_message("").0, "unexpected end of input");
    }
}
