//! Typed errors for semantic validation of a single comparison.

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

use super::category::Category;
use super::diag::{SemanticDiagBuilder, SemanticDiagKind};
use crate::ast::{CompareOp, Span, ValueKind};
use crate::diag::Diag;

/// Why a comparison was rejected.
///
/// Every variant is fatal for the comparison it was raised on and is meant to
/// be surfaced to the caller as a bad-filter response.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("invalid identifier '{identifier}'")]
    #[diagnostic(
        code(run_filter::unknown_identifier),
        help("valid identifiers are metric, parameter, tag, attribute and dataset, or one of their aliases")
    )]
    UnknownIdentifier { identifier: SmolStr },

    #[error("invalid attribute key '{key}', allowed values are {}", .allowed.join(", "))]
    #[diagnostic(
        code(run_filter::invalid_attribute_key),
        help("attribute keys are fixed run columns; use tags.<name> for custom fields")
    )]
    InvalidAttributeKey {
        key: SmolStr,
        allowed: &'static [&'static str],
    },

    #[error("invalid dataset key '{key}', allowed values are {}", .allowed.join(", "))]
    #[diagnostic(code(run_filter::invalid_dataset_key))]
    InvalidDatasetKey {
        key: SmolStr,
        allowed: &'static [&'static str],
    },

    #[error("{category} key must not be empty")]
    #[diagnostic(code(run_filter::empty_key))]
    EmptyKey { category: Category },

    #[error("expected {expected} value for {category}, found {found}")]
    #[diagnostic(
        code(run_filter::type_mismatch),
        help("metrics compare against numbers, parameters and tags against quoted strings, IN against a list of strings")
    )]
    TypeMismatch {
        category: Category,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("operator {op} is not supported for {category} '{key}'")]
    #[diagnostic(code(run_filter::unsupported_operator))]
    UnsupportedOperator {
        category: Category,
        key: SmolStr,
        op: CompareOp,
    },
}

impl ValidationError {
    /// Classifies the error for diagnostics.
    pub fn kind(&self) -> SemanticDiagKind {
        match self {
            Self::UnknownIdentifier { .. } => SemanticDiagKind::UnknownIdentifier,
            Self::InvalidAttributeKey { .. }
            | Self::InvalidDatasetKey { .. }
            | Self::EmptyKey { .. } => SemanticDiagKind::InvalidKey,
            Self::TypeMismatch { .. } => SemanticDiagKind::TypeMismatch,
            Self::UnsupportedOperator { .. } => SemanticDiagKind::UnsupportedOperator,
        }
    }

    /// Converts to a crate [`Diag`] labeled at `span`.
    pub fn to_diag(&self, span: Span) -> Diag {
        let label = match self {
            Self::UnknownIdentifier { .. } => "unknown identifier".to_string(),
            Self::InvalidAttributeKey { .. } | Self::InvalidDatasetKey { .. } => {
                "key not allowed here".to_string()
            }
            Self::EmptyKey { .. } => "empty key".to_string(),
            Self::TypeMismatch {
                expected, found, ..
            } => format!("expected {expected}, found {found}"),
            Self::UnsupportedOperator { op, .. } => format!("{op} not allowed here"),
        };

        let mut builder =
            SemanticDiagBuilder::new(self.kind(), self.to_string()).with_primary_label(span, label);
        if let Some(code) = self.code() {
            builder = builder.with_code(code.to_string());
        }
        if let Some(help) = self.help() {
            builder = builder.with_help(help.to_string());
        }
        builder.build()
    }
}
