//! Token stream navigation and error helpers shared by the parser.

use crate::ast::Span;
use crate::diag::Diag;
use crate::lexer::token::{Token, TokenKind};

/// Common error type for parsing operations.
pub type ParseError = Box<Diag>;

/// Common result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Cursor over a token slice that always ends in [`TokenKind::Eof`].
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a new token stream.
    ///
    /// The slice must be non-empty and end with an EOF token; [`super::Parser`]
    /// guarantees this.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Returns the current token, or the trailing EOF once past the end.
    pub fn current(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.pos.min(tokens.len().saturating_sub(1))]
    }

    /// Returns the token after the current one.
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos + 1)
    }

    /// Advances to the next token; stays put at EOF.
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    pub fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    /// Consumes the current token if it matches the given kind.
    pub fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific token kind and returns its span.
    pub fn expect(&mut self, kind: TokenKind, code: &str) -> ParseResult<Span> {
        if self.check(&kind) {
            let span = self.current().span.clone();
            self.advance();
            Ok(span)
        } else {
            Err(self.error_here(
                format!("expected {kind}, found {}", self.current().kind),
                code,
            ))
        }
    }

    /// Creates an error diagnostic labeled at the current token.
    pub fn diag_here(&self, message: impl Into<String>, code: &str) -> Diag {
        Diag::error(message.into())
            .with_primary_label(self.current().span.clone(), "here")
            .with_code(code)
    }

    /// Same as [`Self::diag_here`], boxed for use as a [`ParseError`].
    pub fn error_here(&self, message: impl Into<String>, code: &str) -> ParseError {
        Box::new(self.diag_here(message, code))
    }

    /// Returns the span of the previously consumed token.
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span.clone()
        } else {
            self.current().span.clone()
        }
    }
}
