//! Grammar for filters and the comparisons they conjoin.
//!
//! ```text
//! filter     := ε | comparison (AND comparison)*
//! comparison := identifier op value
//! identifier := name ('.' key)?
//! key        := word ('.' word)* | `quoted` | 'string'
//! op         := = | != | <> | > | >= | < | <= | LIKE | ILIKE | IN | NOT IN
//! value      := number | string | '(' string (',' string)* ')'
//! ```
//!
//! The parser stops at the first syntax error; a filter is short enough that
//! recovery would only produce follow-on noise.

use super::base::{ParseResult, TokenStream};
use crate::ast::{CompareOp, Comparison, Filter, Identifier, Spanned, Value, merge_spans};
use crate::diag::Diag;
use crate::lexer::token::{Token, TokenKind};
use smol_str::SmolStr;

/// Parses a whole filter from tokens.
///
/// Returns the filter built so far together with any syntax diagnostics.
pub(super) fn parse_filter_tokens(tokens: &[Token], source: &str) -> (Filter, Vec<Diag>) {
    let mut parser = ComparisonParser {
        stream: TokenStream::new(tokens),
        source,
    };
    let mut filter = Filter {
        comparisons: Vec::new(),
        span: 0..source.len(),
    };

    if parser.stream.check(&TokenKind::Eof) {
        return (filter, Vec::new());
    }

    loop {
        match parser.parse_comparison() {
            Ok(comparison) => filter.comparisons.push(comparison),
            Err(diag) => return (filter, vec![*diag]),
        }

        if parser.stream.consume(&TokenKind::And) {
            continue;
        }
        if parser.stream.check(&TokenKind::Eof) {
            return (filter, Vec::new());
        }

        let diag = parser
            .stream
            .diag_here(
                format!(
                    "expected AND or end of filter, found {}",
                    parser.stream.current().kind
                ),
                "P005",
            )
            .with_help("comparisons can only be combined with AND");
        return (filter, vec![diag]);
    }
}

struct ComparisonParser<'a> {
    stream: TokenStream<'a>,
    source: &'a str,
}

impl<'a> ComparisonParser<'a> {
    fn parse_comparison(&mut self) -> ParseResult<Comparison> {
        let left = self.parse_identifier()?;
        let op = self.parse_operator()?;
        let right = self.parse_value(op.node)?;
        Ok(Comparison::new(left, op, right))
    }

    fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.stream.current();
        let name = match &token.kind {
            TokenKind::Identifier(name)
            | TokenKind::QuotedIdentifier(name)
            | TokenKind::StringLiteral(name) => name.clone(),
            other => {
                return Err(Box::new(
                    self.stream
                        .diag_here(format!("expected identifier, found {other}"), "P001")
                        .with_help("a comparison looks like `metrics.accuracy > 0.9`"),
                ));
            }
        };
        self.stream.advance();

        if !self.stream.consume(&TokenKind::Dot) {
            return Ok(Identifier::bare(name, token.span.clone()));
        }

        let key = self.parse_key()?;
        let span = merge_spans(&token.span, &self.stream.previous_span());
        Ok(Identifier::new(name, key, span))
    }

    /// Parses the key after `category.`.
    ///
    /// Unquoted keys may themselves contain dots (`tags.mlflow.source.name`);
    /// keywords are allowed as segments and keep their source spelling.
    fn parse_key(&mut self) -> ParseResult<SmolStr> {
        let token = self.stream.current();
        match &token.kind {
            TokenKind::QuotedIdentifier(key) | TokenKind::StringLiteral(key) => {
                if key.is_empty() {
                    return Err(self.stream.error_here("key must not be empty", "P001"));
                }
                self.stream.advance();
                return Ok(key.clone());
            }
            kind if !self.is_key_segment(kind) => {
                return Err(self.stream.error_here(
                    format!("expected key after '.', found {kind}"),
                    "P001",
                ));
            }
            _ => {}
        }

        let mut key = String::from(self.segment_text(token)?);
        self.stream.advance();

        while self.stream.check(&TokenKind::Dot)
            && self
                .stream
                .peek()
                .is_some_and(|next| self.is_key_segment(&next.kind))
        {
            self.stream.advance();
            key.push('.');
            key.push_str(self.segment_text(self.stream.current())?);
            self.stream.advance();
        }

        Ok(SmolStr::new(key))
    }

    /// Text of one unquoted key segment. Keywords keep their source spelling.
    fn segment_text(&self, token: &'a Token) -> ParseResult<&'a str> {
        if let TokenKind::Identifier(name) = &token.kind {
            return Ok(name.as_str());
        }
        token.slice(self.source).ok_or_else(|| {
            self.stream
                .error_here(format!("key segment {} is outside the source", token.kind), "P001")
        })
    }

    fn is_key_segment(&self, kind: &TokenKind) -> bool {
        matches!(kind, TokenKind::Identifier(_)) || kind.is_keyword()
    }

    fn parse_operator(&mut self) -> ParseResult<Spanned<CompareOp>> {
        let token = self.stream.current();
        let op = match token.kind {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::NotEq | TokenKind::NotEqBang => CompareOp::NotEq,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::GtEq => CompareOp::GtEq,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::LtEq => CompareOp::LtEq,
            TokenKind::Like => CompareOp::Like,
            TokenKind::ILike => CompareOp::ILike,
            TokenKind::In => CompareOp::In,
            TokenKind::Not => {
                self.stream.advance();
                let in_span = self.stream.expect(TokenKind::In, "P003")?;
                return Ok(Spanned::new(
                    CompareOp::NotIn,
                    merge_spans(&token.span, &in_span),
                ));
            }
            ref other => {
                return Err(Box::new(
                    self.stream
                        .diag_here(format!("expected comparison operator, found {other}"), "P002")
                        .with_help("valid operators are =, !=, <>, >, >=, <, <=, LIKE, ILIKE, IN, NOT IN"),
                ));
            }
        };
        self.stream.advance();
        Ok(Spanned::new(op, token.span.clone()))
    }

    /// Parses the literal after `op`.
    ///
    /// `IN` and `NOT IN` take a parenthesised list, every other operator a
    /// single number or string.
    fn parse_value(&mut self, op: CompareOp) -> ParseResult<Spanned<Value>> {
        let token = self.stream.current();
        if op.is_membership() {
            if token.kind != TokenKind::LParen {
                return Err(Box::new(
                    self.stream
                        .diag_here(
                            format!("expected list of strings after {op}, found {}", token.kind),
                            "P004",
                        )
                        .with_help("wrap the values in parentheses, e.g. ('a', 'b')"),
                ));
            }
            return self.parse_string_list();
        }

        match &token.kind {
            TokenKind::NumberLiteral(text) => {
                let number = text.parse::<f64>().map_err(|_| {
                    self.stream
                        .error_here(format!("malformed number '{text}'"), "P004")
                })?;
                if !number.is_finite() {
                    return Err(self
                        .stream
                        .error_here(format!("number '{text}' is out of range"), "P004"));
                }
                self.stream.advance();
                Ok(Spanned::new(Value::Number(number), token.span.clone()))
            }
            TokenKind::StringLiteral(value) => {
                self.stream.advance();
                Ok(Spanned::new(Value::String(value.clone()), token.span.clone()))
            }
            TokenKind::LParen => Err(Box::new(
                self.stream
                    .diag_here(format!("list of strings is not allowed after {op}"), "P004")
                    .with_help("lists are only compared with IN or NOT IN"),
            )),
            other => Err(Box::new(
                self.stream
                    .diag_here(format!("expected number or string, found {other}"), "P004")
                    .with_help("quote string values, e.g. 'my-value'"),
            )),
        }
    }

    fn parse_string_list(&mut self) -> ParseResult<Spanned<Value>> {
        let open = self.stream.expect(TokenKind::LParen, "P004")?;
        let mut items = Vec::new();

        loop {
            match &self.stream.current().kind {
                TokenKind::StringLiteral(item) => {
                    items.push(item.clone());
                    self.stream.advance();
                }
                other => {
                    return Err(Box::new(
                        self.stream
                            .diag_here(format!("expected string in list, found {other}"), "P004")
                            .with_help("lists hold one or more quoted strings, e.g. ('a', 'b')"),
                    ));
                }
            }
            if !self.stream.consume(&TokenKind::Comma) {
                break;
            }
        }

        let close = self.stream.expect(TokenKind::RParen, "P004")?;
        Ok(Spanned::new(
            Value::StringList(items),
            merge_spans(&open, &close),
        ))
    }
}
