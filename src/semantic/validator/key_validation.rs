//! Key validation against each category's vocabulary.

use smol_str::SmolStr;

use crate::semantic::category::{
    ALTERNATE_NUMERIC_ATTRIBUTES, ALTERNATE_STRING_ATTRIBUTES, Category, KeyRule,
};
use crate::semantic::error::ValidationError;

/// Checks that `key` is legal for an already-resolved `category`.
///
/// Accepted keys are returned unchanged. The legacy attribute spellings
/// (`created`, `Run Name`, ...) are accepted but not rewritten to their
/// primary column names.
pub fn validate_key(category: Category, key: &str) -> Result<SmolStr, ValidationError> {
    match category.key_rule() {
        KeyRule::AllowList(allowed) if category == Category::Attribute => {
            let known = allowed.contains(&key)
                || ALTERNATE_NUMERIC_ATTRIBUTES.contains(&key)
                || ALTERNATE_STRING_ATTRIBUTES.contains(&key);
            if !known {
                return Err(ValidationError::InvalidAttributeKey {
                    key: SmolStr::new(key),
                    allowed,
                });
            }
        }
        KeyRule::AllowList(allowed) => {
            if !allowed.contains(&key) {
                return Err(ValidationError::InvalidDatasetKey {
                    key: SmolStr::new(key),
                    allowed,
                });
            }
        }
        KeyRule::Unrestricted => {
            if key.is_empty() {
                return Err(ValidationError::EmptyKey { category });
            }
        }
    }

    Ok(SmolStr::new(key))
}
