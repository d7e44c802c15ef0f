//! Identifier resolution: raw category tokens to canonical categories.

use smol_str::SmolStr;
use tracing::trace;

use crate::ast::Identifier;
use crate::semantic::category::Category;
use crate::semantic::error::ValidationError;

/// Resolves a raw category token to its canonical category.
///
/// Canonical names win, then aliases in [`Category::ALL`] order. Matching is
/// exact and case-sensitive with no fuzzy fallback: `Metrics` is an error,
/// not a guess. Empty input is not special-cased; callers apply the
/// bare-key rule first (see [`apply_bare_key_rule`]).
pub fn resolve_category(raw: &str) -> Result<Category, ValidationError> {
    if let Some(category) = Category::from_canonical(raw) {
        return Ok(category);
    }

    if let Some(category) = Category::from_alias(raw) {
        trace!(alias = raw, canonical = %category, "resolved category alias");
        return Ok(category);
    }

    Err(ValidationError::UnknownIdentifier {
        identifier: SmolStr::new(raw),
    })
}

/// Rewrites the bare-key shorthand into an explicit attribute access.
///
/// `run_name = 'x'` means `attribute.run_name = 'x'`. The parser marks this by
/// leaving `category` empty; nodes built elsewhere may instead carry the
/// single name in `category` with an empty `key`. Both shapes are handled.
pub(super) fn apply_bare_key_rule(identifier: &mut Identifier) {
    if identifier.key.is_empty() && !identifier.category.is_empty() {
        identifier.key = std::mem::take(&mut identifier.category);
    }
    if identifier.category.is_empty() {
        identifier.category = Category::Attribute.to_smol_str();
    }
}
