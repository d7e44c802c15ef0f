//! Lexical analysis for filter strings.
//!
//! Scanning is driven by a `logos` state machine over [`RawToken`]; this
//! module maps the raw tokens onto [`TokenKind`], resolves keywords, and turns
//! scanning failures into diagnostics. The lexer never stops on a bad
//! character, so one pass reports every lexical problem in the input.

pub mod keywords;
pub mod token;

use crate::diag::Diag;
use logos::Logos;
use smol_str::SmolStr;
use token::{Token, TokenKind};

/// Result of lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerResult {
    /// The tokens produced, always ending with [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
    /// Lexical errors encountered while scanning.
    pub diagnostics: Vec<Diag>,
}

/// Raw scanner output before keyword resolution.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| SmolStr::new(lex.slice()))]
    Word(SmolStr),

    #[regex(r"-?[0-9]+", lex_number)]
    Number(SmolStr),

    #[token("'", |lex| lex_quoted(lex, '\''))]
    SingleQuoted(SmolStr),

    #[token("\"", |lex| lex_quoted(lex, '"'))]
    DoubleQuoted(SmolStr),

    #[token("`", |lex| lex_quoted(lex, '`'))]
    Backticked(SmolStr),

    #[token("=")]
    Eq,
    #[token("<>")]
    NotEq,
    #[token("!=")]
    NotEqBang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

/// Extends an integer match with an optional fraction and exponent.
///
/// Done by hand so that `1.` followed by a non-digit leaves the dot for the
/// next token.
fn lex_number(lex: &mut logos::Lexer<'_, RawToken>) -> SmolStr {
    let rest = lex.remainder().as_bytes();
    let mut len = 0;

    if rest.first() == Some(&b'.') && rest.get(1).is_some_and(u8::is_ascii_digit) {
        len = 1 + count_digits(&rest[1..]);
    }

    if matches!(rest.get(len), Some(b'e' | b'E')) {
        let mut exp = len + 1;
        if matches!(rest.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits = count_digits(&rest[exp..]);
        if digits > 0 {
            len = exp + digits;
        }
    }

    lex.bump(len);
    SmolStr::new(lex.slice())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Scans the body of a quoted string or identifier after its opening quote.
///
/// `\n`, `\t`, `\\` and an escaped closing quote are unescaped; any other
/// escape is kept verbatim so LIKE patterns such as `'a\_b'` survive.
/// Returns `None` (a lexing error) when the closing quote is missing.
fn lex_quoted(lex: &mut logos::Lexer<'_, RawToken>, quote: char) -> Option<SmolStr> {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut chars = rest.char_indices();

    while let Some((index, ch)) = chars.next() {
        if ch == quote {
            lex.bump(index + ch.len_utf8());
            return Some(SmolStr::new(value));
        }
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some((_, 'n')) => value.push('\n'),
            Some((_, 't')) => value.push('\t'),
            Some((_, '\\')) => value.push('\\'),
            Some((_, escaped)) if escaped == quote => value.push(quote),
            Some((_, escaped)) => {
                value.push('\\');
                value.push(escaped);
            }
            None => break,
        }
    }

    lex.bump(rest.len());
    None
}

/// A lexical analyzer for filter text.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    diagnostics: Vec<Diag>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenizes the source text and returns tokens plus diagnostics.
    pub fn tokenize(mut self) -> LexerResult {
        let mut raw = RawToken::lexer(self.source);

        while let Some(result) = raw.next() {
            let span = raw.span();
            match result {
                Ok(token) => {
                    let kind = Self::convert(token);
                    self.tokens.push(Token::new(kind, span));
                }
                Err(()) => self.report_error(span),
            }
        }

        let eof = self.source.len();
        self.tokens.push(Token::new(TokenKind::Eof, eof..eof));

        LexerResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn convert(token: RawToken) -> TokenKind {
        match token {
            RawToken::Word(word) => {
                keywords::lookup_keyword(&word).unwrap_or(TokenKind::Identifier(word))
            }
            RawToken::Number(text) => TokenKind::NumberLiteral(text),
            RawToken::SingleQuoted(value) | RawToken::DoubleQuoted(value) => {
                TokenKind::StringLiteral(value)
            }
            RawToken::Backticked(name) => TokenKind::QuotedIdentifier(name),
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::NotEqBang => TokenKind::NotEqBang,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
        }
    }

    fn report_error(&mut self, span: std::ops::Range<usize>) {
        let Some(first) = self.source[span.start..].chars().next() else {
            return;
        };

        let diag = match first {
            '\'' | '"' => Diag::error("unclosed string literal")
                .with_primary_label(span.start..self.source.len(), "string starts here")
                .with_help(format!("add a closing {first}"))
                .with_code("L002"),
            '`' => Diag::error("unclosed quoted identifier")
                .with_primary_label(span.start..self.source.len(), "identifier starts here")
                .with_help("add a closing `")
                .with_code("L002"),
            other => Diag::error(format!("invalid character '{other}'"))
                .with_primary_label(span.start..span.start + other.len_utf8(), "here")
                .with_code("L001"),
        };
        self.diagnostics.push(diag);
    }
}

/// Convenience function to tokenize a filter string.
pub fn tokenize(source: &str) -> LexerResult {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.into_iter().map(|t| t.kind).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.into())
    }

    #[test]
    fn empty_input() {
        let result = tokenize("");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].kind, TokenKind::Eof);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(kinds("  \t\n "), vec![TokenKind::Eof]);
    }

    #[test]
    fn dotted_comparison() {
        assert_eq!(
            kinds("metrics.foobar = 40"),
            vec![
                ident("metrics"),
                TokenKind::Dot,
                ident("foobar"),
                TokenKind::Eq,
                TokenKind::NumberLiteral("40".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            kinds("and AND In not NOT like ILike"),
            vec![
                TokenKind::And,
                TokenKind::And,
                TokenKind::In,
                TokenKind::Not,
                TokenKind::Not,
                TokenKind::Like,
                TokenKind::ILike,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn words_starting_with_keywords_are_identifiers() {
        assert_eq!(kinds("android"), vec![ident("android"), TokenKind::Eof]);
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(
            kinds("= != <> < > <= >="),
            vec![
                TokenKind::Eq,
                TokenKind::NotEqBang,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("0.9 -3 1e5 2.5E-3 7"),
            vec![
                TokenKind::NumberLiteral("0.9".into()),
                TokenKind::NumberLiteral("-3".into()),
                TokenKind::NumberLiteral("1e5".into()),
                TokenKind::NumberLiteral("2.5E-3".into()),
                TokenKind::NumberLiteral("7".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::NumberLiteral("1".into()),
                TokenKind::Dot,
                ident("x"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn both_quote_styles_make_strings() {
        assert_eq!(
            kinds(r#"'single' "double""#),
            vec![
                TokenKind::StringLiteral("single".into()),
                TokenKind::StringLiteral("double".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            kinds(r"'it\'s' 'a\_b' 'x\\y'"),
            vec![
                TokenKind::StringLiteral("it's".into()),
                TokenKind::StringLiteral(r"a\_b".into()),
                TokenKind::StringLiteral(r"x\y".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn backtick_identifier() {
        let result = tokenize("params.`random_state`");
        assert_eq!(
            result.tokens[2].kind,
            TokenKind::QuotedIdentifier("random_state".into())
        );
        assert_eq!(result.tokens[2].span, 7..21);
    }

    #[test]
    fn spans_are_byte_offsets() {
        let result = tokenize("run_name = 'x'");
        assert_eq!(result.tokens[0].span, 0..8);
        assert_eq!(result.tokens[1].span, 9..10);
        assert_eq!(result.tokens[2].span, 11..14);
        assert_eq!(result.tokens[3].span, 14..14);
    }

    #[test]
    fn unclosed_string_is_reported() {
        let result = tokenize("tags.x = 'oops");
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("unclosed string"));
        assert_eq!(result.diagnostics[0].code.as_deref(), Some("L002"));
        assert_eq!(result.tokens.last().map(|t| &t.kind), Some(&TokenKind::Eof));
    }

    #[test]
    fn unclosed_backtick_is_reported() {
        let result = tokenize("params.`oops");
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("unclosed quoted identifier"));
    }

    #[test]
    fn invalid_characters_do_not_stop_scanning() {
        let result = tokenize("metrics.a @ 1 # 2");
        assert_eq!(result.diagnostics.len(), 2);
        assert!(
            result
                .diagnostics
                .iter()
                .all(|d| d.code.as_deref() == Some("L001"))
        );
        assert!(
            result
                .tokens
                .iter()
                .any(|t| t.kind == TokenKind::NumberLiteral("2".into()))
        );
    }
}
