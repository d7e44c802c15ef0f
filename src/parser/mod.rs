//! Parser infrastructure for filter syntax.
//!
//! The parser consumes the lexer's token stream and builds a [`Filter`]. It
//! checks structure only; whether the names in a filter mean anything is the
//! semantic validator's job.

pub mod base;
mod comparison;

use crate::ast::Filter;
use crate::diag::{Diag, SourceFile, convert_diagnostics_to_reports};
use crate::lexer::token::{Token, TokenKind};
use miette::Report;

/// Result of parsing a filter string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed filter, or `None` if lexing or parsing reported an error.
    pub filter: Option<Filter>,
    /// Lexer and parser diagnostics, in source order.
    pub diagnostics: Vec<Diag>,
}

impl ParseResult {
    /// Renders the diagnostics as miette reports against `source`.
    pub fn reports(&self, source: &str) -> Vec<Report> {
        convert_diagnostics_to_reports(&self.diagnostics, &SourceFile::new(source))
    }
}

/// Filter parser.
pub struct Parser<'source> {
    tokens: Vec<Token>,
    diagnostics: Vec<Diag>,
    source: &'source str,
}

impl<'source> Parser<'source> {
    /// Creates a new parser from a token stream, appending EOF if missing.
    pub fn new(mut tokens: Vec<Token>, source: &'source str) -> Self {
        if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
            let eof_pos = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, eof_pos..eof_pos));
        }

        Self {
            tokens,
            diagnostics: Vec::new(),
            source,
        }
    }

    /// Prepends lexer diagnostics so they are reported with the parse result.
    pub fn with_lexer_diagnostics(mut self, lex_diags: Vec<Diag>) -> Self {
        let mut all_diags = lex_diags;
        all_diags.append(&mut self.diagnostics);
        self.diagnostics = all_diags;
        self
    }

    /// Parses the token stream into a filter.
    pub fn parse(mut self) -> ParseResult {
        let (filter, parser_diags) = comparison::parse_filter_tokens(&self.tokens, self.source);
        self.diagnostics.extend(parser_diags);

        let filter = if self.diagnostics.iter().any(Diag::is_error) {
            None
        } else {
            Some(filter)
        };

        ParseResult {
            filter,
            diagnostics: self.diagnostics,
        }
    }
}

/// Lexes and parses a filter string.
pub fn parse(source: &str) -> ParseResult {
    let lexed = crate::lexer::tokenize(source);
    Parser::new(lexed.tokens, source)
        .with_lexer_diagnostics(lexed.diagnostics)
        .parse()
}
