//! Value type checking for comparisons whose category is already canonical.
//!
//! The base rules: metrics take numbers, parameters and tags take strings,
//! attributes and datasets are left alone. With strict attribute typing,
//! timestamp attributes take numbers and the remaining attribute and dataset
//! keys take strings, with a list exactly when the operator is `IN` /
//! `NOT IN`. For parsed filters that pairing already holds.

use crate::ast::{Comparison, ValueKind};
use crate::semantic::category::{Category, is_numeric_attribute};
use crate::semantic::error::ValidationError;

use super::ValidationConfig;

/// What a category demands of the right-hand literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expectation {
    /// No rule.
    Any,
    /// Exactly this kind.
    Exactly(ValueKind),
    /// A string or a list of strings.
    StringLike,
}

impl Expectation {
    fn admits(self, found: ValueKind) -> bool {
        match self {
            Expectation::Any => true,
            Expectation::Exactly(kind) => kind == found,
            Expectation::StringLike => {
                matches!(found, ValueKind::String | ValueKind::StringList)
            }
        }
    }

    /// Kind named in the error message when `admits` fails.
    fn reported_kind(self) -> ValueKind {
        match self {
            Expectation::Exactly(kind) => kind,
            Expectation::Any | Expectation::StringLike => ValueKind::String,
        }
    }
}

fn expectation(category: Category, key: &str, config: &ValidationConfig) -> Expectation {
    match category {
        Category::Metric => Expectation::Exactly(ValueKind::Numeric),
        Category::Parameter | Category::Tag => Expectation::Exactly(ValueKind::String),
        Category::Attribute if config.strict_attribute_types => {
            if is_numeric_attribute(key) {
                Expectation::Exactly(ValueKind::Numeric)
            } else {
                Expectation::StringLike
            }
        }
        Category::Dataset if config.strict_attribute_types => Expectation::StringLike,
        Category::Attribute | Category::Dataset => Expectation::Any,
    }
}

/// Checks the right-hand literal of a canonical comparison.
///
/// Must run after identifier resolution: a category that is not canonical
/// is reported as an unknown identifier rather than guessed at.
pub fn check_value_type(
    comparison: &Comparison,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    let left = &comparison.left;
    let category = Category::from_canonical(&left.category).ok_or_else(|| {
        ValidationError::UnknownIdentifier {
            identifier: left.category.clone(),
        }
    })?;
    let found = comparison.right.node.kind();

    let expected = expectation(category, &left.key, config);
    if !expected.admits(found) {
        return Err(ValidationError::TypeMismatch {
            category,
            expected: expected.reported_kind(),
            found,
        });
    }

    if expected == Expectation::StringLike {
        let membership = comparison.op.node.is_membership();
        if membership != (found == ValueKind::StringList) {
            let expected = if membership {
                ValueKind::StringList
            } else {
                ValueKind::String
            };
            return Err(ValidationError::TypeMismatch {
                category,
                expected,
                found,
            });
        }
    }

    Ok(())
}
