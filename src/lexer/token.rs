//! Token types for filter lexical analysis.

use crate::ast::Span;
use smol_str::SmolStr;
use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords (case-insensitive)
    And,
    In,
    Not,
    Like,
    ILike,

    // Names
    Identifier(SmolStr),
    QuotedIdentifier(SmolStr), // `...`

    // Literals
    StringLiteral(SmolStr), // '...' or "..."
    NumberLiteral(SmolStr),

    // Operators
    Eq,        // =
    NotEq,     // <>
    NotEqBang, // !=
    Lt,        // <
    Gt,        // >
    LtEq,      // <=
    GtEq,      // >=

    // Punctuation
    Dot,    // .
    Comma,  // ,
    LParen, // (
    RParen, // )

    // Special
    Eof,
}

impl TokenKind {
    /// Returns true if this token kind is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::And | TokenKind::In | TokenKind::Not | TokenKind::Like | TokenKind::ILike
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::And => write!(f, "AND"),
            TokenKind::In => write!(f, "IN"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::Like => write!(f, "LIKE"),
            TokenKind::ILike => write!(f, "ILIKE"),
            TokenKind::Identifier(name) => write!(f, "identifier '{name}'"),
            TokenKind::QuotedIdentifier(name) => write!(f, "identifier `{name}`"),
            TokenKind::StringLiteral(value) => write!(f, "string '{value}'"),
            TokenKind::NumberLiteral(value) => write!(f, "number {value}"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::NotEq => write!(f, "'<>'"),
            TokenKind::NotEqBang => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::LtEq => write!(f, "'<='"),
            TokenKind::GtEq => write!(f, "'>='"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in source text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the source slice covered by this token, if the span lies
    /// within `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.span.clone())
    }
}
