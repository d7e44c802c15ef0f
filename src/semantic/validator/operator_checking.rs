//! Operator compatibility, enabled by
//! [`ValidationConfig::strict_operators`](super::ValidationConfig::strict_operators).

use crate::ast::{CompareOp, Comparison};
use crate::semantic::category::{Category, is_numeric_attribute};
use crate::semantic::error::ValidationError;

/// Whether `op` makes sense for `key` within `category`.
///
/// Numeric columns take the relational operators. String columns take
/// equality and the pattern operators, and the fixed attribute and dataset
/// columns also take `IN` / `NOT IN`.
pub fn accepts_operator(category: Category, key: &str, op: CompareOp) -> bool {
    let equality = matches!(op, CompareOp::Eq | CompareOp::NotEq);
    match category {
        Category::Metric => op.is_relational(),
        Category::Attribute if is_numeric_attribute(key) => op.is_relational(),
        Category::Parameter | Category::Tag => equality || op.is_pattern(),
        Category::Attribute | Category::Dataset => {
            equality || op.is_pattern() || op.is_membership()
        }
    }
}

/// Operators that make sense for `key` within `category`, in grammar order.
pub fn allowed_operators(category: Category, key: &str) -> Vec<CompareOp> {
    CompareOp::ALL
        .into_iter()
        .filter(|op| accepts_operator(category, key, *op))
        .collect()
}

/// Rejects operators the category cannot be searched with.
pub fn check_operator(category: Category, comparison: &Comparison) -> Result<(), ValidationError> {
    let op = comparison.op.node;
    if accepts_operator(category, &comparison.left.key, op) {
        return Ok(());
    }

    Err(ValidationError::UnsupportedOperator {
        category,
        key: comparison.left.key.clone(),
        op,
    })
}
