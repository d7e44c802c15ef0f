//! Keyword recognition for the filter language.
//!
//! Keywords are case-insensitive; everything else that looks like a word is
//! an identifier.

use super::token::TokenKind;

/// Looks up a keyword by name (case-insensitive).
pub fn lookup_keyword(name: &str) -> Option<TokenKind> {
    match name.to_ascii_uppercase().as_str() {
        "AND" => Some(TokenKind::And),
        "IN" => Some(TokenKind::In),
        "NOT" => Some(TokenKind::Not),
        "LIKE" => Some(TokenKind::Like),
        "ILIKE" => Some(TokenKind::ILike),
        _ => None,
    }
}
