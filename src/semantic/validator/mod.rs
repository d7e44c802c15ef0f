//! Filter validator coordinating the per-comparison checks.

mod identifier_resolution;
mod key_validation;
mod operator_checking;
mod value_checking;

pub use identifier_resolution::resolve_category;
pub use key_validation::validate_key;
pub use operator_checking::{accepts_operator, allowed_operators, check_operator};
pub use value_checking::check_value_type;

use tracing::debug;

use crate::ast::{Comparison, Filter, Span};
use crate::diag::Diag;
use crate::semantic::error::ValidationError;

/// Configuration for semantic validation.
///
/// Both checks are off by default, which accepts exactly what the search
/// backend itself accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Type-check attribute and dataset values (timestamps numeric, the rest strings).
    pub strict_attribute_types: bool,

    /// Reject operators that make no sense for the category.
    pub strict_operators: bool,
}

/// Validates and canonicalizes filter comparisons.
#[derive(Debug, Clone, Default)]
pub struct FilterValidator {
    config: ValidationConfig,
}

impl FilterValidator {
    /// Creates a new validator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new validator with custom configuration.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Enables value type checks for attributes and datasets.
    pub fn with_strict_attribute_types(mut self, enabled: bool) -> Self {
        self.config.strict_attribute_types = enabled;
        self
    }

    /// Enables operator compatibility checks.
    pub fn with_strict_operators(mut self, enabled: bool) -> Self {
        self.config.strict_operators = enabled;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates one comparison and rewrites its identifier in place.
    ///
    /// On success `left.category` holds the canonical category name and
    /// `left.key` the accepted key. On failure the node may already carry the
    /// canonical category (if resolution got that far) and must be discarded.
    pub fn validate_comparison(&self, comparison: &mut Comparison) -> Result<(), ValidationError> {
        identifier_resolution::apply_bare_key_rule(&mut comparison.left);

        let category = resolve_category(&comparison.left.category)?;
        comparison.left.category = category.to_smol_str();

        comparison.left.key = validate_key(category, &comparison.left.key)?;

        check_value_type(comparison, &self.config)?;

        if self.config.strict_operators {
            check_operator(category, comparison)?;
        }

        debug!(
            category = %category,
            key = %comparison.left.key,
            op = %comparison.op.node,
            "validated comparison"
        );
        Ok(())
    }

    /// Validates every comparison of `filter`, collecting one diagnostic per
    /// rejected comparison.
    ///
    /// Validation does not stop at the first bad clause. The filter is only
    /// usable when the returned list is empty.
    pub fn validate(&self, filter: &mut Filter) -> Vec<Diag> {
        let mut diagnostics = Vec::new();

        for comparison in &mut filter.comparisons {
            if let Err(err) = self.validate_comparison(comparison) {
                debug!(error = %err, "rejected comparison");
                diagnostics.push(comparison_diag(&err, comparison));
            }
        }

        diagnostics
    }
}

/// Diagnostic for `err`, labeled at the offending part of `comparison`.
fn comparison_diag(err: &ValidationError, comparison: &Comparison) -> Diag {
    let diag = err.to_diag(error_span(err, comparison));
    match err {
        ValidationError::TypeMismatch { .. } | ValidationError::UnsupportedOperator { .. } => {
            let left = &comparison.left;
            diag.with_secondary_label(left.span.clone(), format!("{} '{}'", left.category, left.key))
        }
        ValidationError::UnknownIdentifier { .. } | ValidationError::InvalidAttributeKey { .. } => {
            diag.with_note("category names and attribute keys are case-sensitive")
        }
        ValidationError::InvalidDatasetKey { .. } | ValidationError::EmptyKey { .. } => diag,
    }
}

/// Span of the part of `comparison` that `err` is about.
fn error_span(err: &ValidationError, comparison: &Comparison) -> Span {
    match err {
        ValidationError::UnknownIdentifier { .. }
        | ValidationError::InvalidAttributeKey { .. }
        | ValidationError::InvalidDatasetKey { .. }
        | ValidationError::EmptyKey { .. } => comparison.left.span.clone(),
        ValidationError::TypeMismatch { .. } => comparison.right.span.clone(),
        ValidationError::UnsupportedOperator { .. } => comparison.op.span.clone(),
    }
}
